//! Restore a file produced by `compress`.
//! Usage: uncompress [input] [output]

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
            cli::usage("./uncompress", &e);
            process::exit(1);
        }
    };
    cli::init_logging();

    let run = || -> anyhow::Result<()> {
        let config = CodecConfig::from_env().context("loading configuration")?;
        let report = Compressor::new(config)
            .decompress_file(&input, &output)
            .with_context(|| format!("decompressing {}", input.display()))?;
        tracing::debug!(report = %serde_json::to_string(&report)?, "report");
        println!(
            "Done. {} bytes → {} bytes",
            report.compressed_size, report.original_size
        );
        Ok(())
    };

    if let Err(e) = run() {
        eprintln!("Error: {:#}", e);
        process::exit(1);
    }
}
