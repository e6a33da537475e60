//! Argument checks and logging setup shared by the `compress` and
//! `uncompress` binaries.

use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing_subscriber::EnvFilter;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum UsageError {
    #[error("expected exactly two arguments")]
    WrongArgCount,

    #[error("input and output destination must be different")]
    SamePath,
}

/// Validate `[program, input, output]`.
pub fn parse_paths(args: &[String]) -> Result<(PathBuf, PathBuf), UsageError> {
    let [_, input, output] = args else {
        return Err(UsageError::WrongArgCount);
    };
    let (input, output) = (PathBuf::from(input), PathBuf::from(output));
    if input == output || same_file(&input, &output) {
        return Err(UsageError::SamePath);
    }
    Ok((input, output))
}

fn same_file(a: &Path, b: &Path) -> bool {
    match (a.canonicalize(), b.canonicalize()) {
        (Ok(a), Ok(b)) => a == b,
        _ => false,
    }
}

pub fn usage(program: &str, err: &UsageError) {
    eprintln!("{}", err);
    eprintln!("Correct usage:");
    eprintln!("  {} [input] [output]", program);
}

/// Log to stderr, filtered by `RUST_LOG` (default `warn`).
pub fn init_logging() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_accepts_two_paths() {
        let (input, output) = parse_paths(&args(&["compress", "in.txt", "out.huf"])).unwrap();
        assert_eq!(input, PathBuf::from("in.txt"));
        assert_eq!(output, PathBuf::from("out.huf"));
    }

    #[test]
    fn test_wrong_arg_count() {
        assert_eq!(
            parse_paths(&args(&["compress", "in.txt"])),
            Err(UsageError::WrongArgCount)
        );
        assert_eq!(
            parse_paths(&args(&["compress", "a", "b", "c"])),
            Err(UsageError::WrongArgCount)
        );
    }

    #[test]
    fn test_usage_messages() {
        assert_eq!(
            UsageError::SamePath.to_string(),
            "input and output destination must be different"
        );
        assert_eq!(
            UsageError::WrongArgCount.to_string(),
            "expected exactly two arguments"
        );
    }

    #[test]
    fn test_same_path() {
        assert_eq!(
            parse_paths(&args(&["compress", "x.bin", "x.bin"])),
            Err(UsageError::SamePath)
        );
    }

    #[test]
    fn test_same_file_through_different_spelling() {
        let dir = tempfile::tempdir().unwrap();
        let file = dir.path().join("data.bin");
        std::fs::write(&file, b"x").unwrap();
        let dotted = dir.path().join(".").join("data.bin");
        assert_eq!(
            parse_paths(&[
                "compress".to_string(),
                file.display().to_string(),
                dotted.display().to_string(),
            ]),
            Err(UsageError::SamePath)
        );
    }
}
