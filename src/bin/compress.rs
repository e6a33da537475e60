//! Huffman-compress a file.
//! Usage: compress [input] [output]

use anyhow::Context;
use huffcode::cli;
use huffcode::config::CodecConfig;
use huffcode::Compressor;
use std::{env, process};

fn main() {
    let args: Vec<String> = env::args().collect();
    let (input, output) = match cli::parse_paths(&args) {
        Ok(paths) => paths,
        Err(e) => {
            cli::usage("./compress", &e);
            process::exit(1);
        }
    };
    cli::init_logging();

    let run = || -> anyhow::Result<()> {
        let config = CodecConfig::from_env().context("loading configuration")?;
        let report = Compressor::new(config)
            .compress_file(&input, &output)
            .with_context(|| format!("compressing {}", input.display()))?;
        tracing::debug!(report = %serde_json::to_string(&report)?, "report");
        println!(
            "Done. {} bytes → {} bytes",
            report.original_size, report.compressed_size
        );
        Ok(())
    };

    if let Err(e) = run() {
        eprintln!("Error: {:#}", e);
        process::exit(1);
    }
}
