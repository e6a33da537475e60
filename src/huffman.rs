//! Huffman coding tree and symbol encode/decode.
//!
//! The tree is rebuilt from the persisted frequency table on decode, so
//! construction must be fully deterministic. Pending nodes merge lowest
//! weight first, larger tag first on equal weight, then oldest node first.

use crate::bitreader::BitReader;
use crate::bitwriter::BitWriter;
use crate::error::{CodecError, Result};
use crate::frequency::FrequencyTable;
use crate::node::{CodeNode, NodeId, Pending};
use std::collections::BinaryHeap;
use std::io::{Read, Write};
use tracing::{debug, trace, warn};

/// Upper bound on output pre-allocated from an untrusted symbol count.
const MAX_PREALLOC: u64 = 1 << 20;

#[derive(Debug, Clone)]
pub struct HuffmanCodec {
    nodes: Vec<CodeNode>,
    root: NodeId,
    leaves: [Option<NodeId>; 256],
    /// Root-to-leaf bit path per byte value; empty when the byte has no leaf.
    paths: Vec<Vec<bool>>,
}

impl HuffmanCodec {
    /// Build the coding tree for `table`.
    pub fn build(table: &FrequencyTable) -> Result<Self> {
        let mut nodes = Vec::with_capacity(2 * 256);
        let mut leaves = [None; 256];
        let mut heap = BinaryHeap::new();

        for (symbol, count) in table.iter() {
            let id = NodeId(nodes.len());
            nodes.push(CodeNode::leaf(symbol, u64::from(count)));
            leaves[symbol as usize] = Some(id);
            heap.push(Pending::of(id, &nodes[id.0]));
        }

        let root = match heap.len() {
            0 => return Err(CodecError::EmptyFrequencyTable),
            1 => {
                // A lone leaf still needs one bit per symbol, so hang it
                // under a root that carries the same byte as its tag.
                let only = heap.pop().map(|p| p.id).ok_or(CodecError::EmptyFrequencyTable)?;
                let (weight, tag) = (nodes[only.0].weight, nodes[only.0].tag);
                let root = NodeId(nodes.len());
                nodes.push(CodeNode::internal(weight, tag, only, None));
                nodes[only.0].parent = Some(root);
                root
            }
            _ => {
                while heap.len() > 1 {
                    let (Some(first), Some(second)) = (heap.pop(), heap.pop()) else {
                        break;
                    };
                    let id = NodeId(nodes.len());
                    nodes.push(CodeNode::internal(
                        first.weight + second.weight,
                        first.tag + second.tag,
                        first.id,
                        Some(second.id),
                    ));
                    nodes[first.id.0].parent = Some(id);
                    nodes[second.id.0].parent = Some(id);
                    heap.push(Pending::of(id, &nodes[id.0]));
                }
                heap.pop().map(|p| p.id).ok_or(CodecError::EmptyFrequencyTable)?
            }
        };

        let mut codec = Self {
            nodes,
            root,
            leaves,
            paths: vec![Vec::new(); 256],
        };
        codec.derive_paths();

        debug!(
            symbols = codec.symbol_count(),
            max_code_len = codec.max_code_len(),
            weight = codec.weight(),
            "built coding tree"
        );
        Ok(codec)
    }

    /// Walk each leaf up to the root, then reverse into emission order.
    fn derive_paths(&mut self) {
        for symbol in 0..256usize {
            let Some(leaf) = self.leaves[symbol] else {
                continue;
            };
            let mut path = Vec::new();
            let mut current = leaf;
            while let Some(parent) = self.nodes[current.0].parent {
                path.push(self.nodes[parent.0].left != Some(current));
                current = parent;
            }
            path.reverse();
            trace!(symbol, len = path.len(), "assigned code");
            self.paths[symbol] = path;
        }
    }

    /// Emit the code for `symbol`.
    pub fn encode_symbol<W: Write>(&self, symbol: u8, writer: &mut BitWriter<W>) -> Result<()> {
        let path = self.code(symbol).ok_or(CodecError::UnknownSymbol(symbol))?;
        for &bit in path {
            writer.write_bit(bit)?;
        }
        Ok(())
    }

    /// Decode one symbol. Running out of bits is a corrupt stream.
    pub fn decode_symbol<R: Read>(&self, reader: &mut BitReader<R>) -> Result<u8> {
        self.try_decode_symbol(reader)?.ok_or(CodecError::EndOfStream)
    }

    fn try_decode_symbol<R: Read>(&self, reader: &mut BitReader<R>) -> Result<Option<u8>> {
        let mut current = &self.nodes[self.root.0];
        loop {
            if let Some(symbol) = current.symbol {
                return Ok(Some(symbol));
            }
            let next = match reader.read_bit()? {
                None => return Ok(None),
                Some(false) => current.left,
                Some(true) => current.right,
            };
            current = &self.nodes[next.ok_or(CodecError::InvalidCode)?.0];
        }
    }

    /// Decode exactly `count` symbols into `sink`.
    pub fn decode_stream<R: Read, W: Write>(
        &self,
        reader: &mut BitReader<R>,
        count: u64,
        sink: &mut W,
    ) -> Result<()> {
        for decoded in 0..count {
            match self.try_decode_symbol(reader)? {
                Some(symbol) => sink.write_all(&[symbol])?,
                None => {
                    warn!(decoded, expected = count, "bitstream exhausted early");
                    return Err(CodecError::UnexpectedEndOfStream {
                        decoded,
                        expected: count,
                    });
                }
            }
        }
        Ok(())
    }

    /// Decode exactly `count` symbols.
    pub fn decode_symbols<R: Read>(&self, reader: &mut BitReader<R>, count: u64) -> Result<Vec<u8>> {
        let mut out = Vec::with_capacity(count.min(MAX_PREALLOC) as usize);
        self.decode_stream(reader, count, &mut out)?;
        Ok(out)
    }

    /// Root-to-leaf path for `symbol`, `false` meaning left.
    pub fn code(&self, symbol: u8) -> Option<&[bool]> {
        self.leaves[symbol as usize].map(|_| self.paths[symbol as usize].as_slice())
    }

    pub fn code_len(&self, symbol: u8) -> Option<usize> {
        self.code(symbol).map(<[bool]>::len)
    }

    /// `(symbol, code)` for every coded byte, in byte order.
    pub fn codes(&self) -> impl Iterator<Item = (u8, &[bool])> + '_ {
        (0..=255u8).filter_map(move |s| self.code(s).map(|c| (s, c)))
    }

    pub fn symbol_count(&self) -> usize {
        self.leaves.iter().filter(|l| l.is_some()).count()
    }

    pub fn max_code_len(&self) -> usize {
        self.codes().map(|(_, c)| c.len()).max().unwrap_or(0)
    }

    /// Total weight under the root, i.e. the message length.
    pub fn weight(&self) -> u64 {
        self.nodes[self.root.0].weight
    }

    pub fn root(&self) -> &CodeNode {
        &self.nodes[self.root.0]
    }

    /// Payload size in bits for a message with these frequencies.
    pub fn encoded_bits(&self, table: &FrequencyTable) -> u64 {
        table
            .iter()
            .map(|(s, c)| u64::from(c) * self.code_len(s).unwrap_or(0) as u64)
            .sum()
    }
}
