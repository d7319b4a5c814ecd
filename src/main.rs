//! oasdoc — assemble an OpenAPI document from `openapi:` comment annotations.
//!
//! Scans source files for comment blocks whose first line carries an
//! `openapi:` directive (`openapi:main`, `openapi:operation`,
//! `openapi:components`), merges the fragments into one document, validates
//! it against the OpenAPI 3 schema, and writes the result as YAML:
//!
//! ```text
//! oasdoc src/ -o openapi.yaml
//! oasdoc 'src/**/*.rs' --stdout
//! ```

mod assemble;
mod error;
mod extract;
mod fragment;
mod validate;

use anyhow::{Context, Result};
use clap::Parser;
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Parser)]
#[command(
    name = "oasdoc",
    about = "Assemble an OpenAPI document from openapi: comment annotations in source files"
)]
struct Cli {
    /// Input files, directories, or glob patterns. Defaults to the current
    /// directory. Directories are scanned recursively.
    inputs: Vec<String>,

    /// Output file for the assembled document
    #[arg(short = 'o', long, default_value = "openapi.yaml")]
    output: PathBuf,

    /// Print the assembled document to stdout instead of writing a file
    #[arg(long)]
    stdout: bool,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let patterns = if cli.inputs.is_empty() {
        vec![".".to_string()]
    } else {
        cli.inputs.clone()
    };

    let files = expand_inputs(&patterns)?;

    let mut assembler = assemble::Assembler::new();
    for path in &files {
        let content = fs::read_to_string(path)
            .with_context(|| format!("failed to read {}", path.display()))?;
        for block in extract::annotation_blocks(&content) {
            assembler
                .add(&block)
                .with_context(|| format!("in {}", path.display()))?;
        }
    }

    let document = assembler.finish().context("failed to assemble document")?;

    if cli.stdout {
        print!("{document}");
    } else {
        fs::write(&cli.output, &document)
            .with_context(|| format!("failed to write {}", cli.output.display()))?;
    }

    Ok(())
}

/// File extensions scanned when an input is a directory.
const SUPPORTED_EXTENSIONS: &[&str] = &["rs", "go"];

/// Expand files, directories, and glob patterns into a sorted, deduplicated
/// file list. Discovery order is part of the output contract: operations
/// under one path and same-type components merge in this order.
fn expand_inputs(patterns: &[String]) -> Result<Vec<PathBuf>> {
    let mut files = Vec::new();
    for pattern in patterns {
        let path = Path::new(pattern);
        if path.is_file() {
            files.push(path.to_path_buf());
            continue;
        }
        if path.is_dir() {
            scan_dir(path, &mut files)
                .with_context(|| format!("failed to read directory: {}", path.display()))?;
            continue;
        }
        let matches: Vec<_> = glob::glob(pattern)
            .with_context(|| format!("invalid glob pattern: {}", pattern))?
            .filter_map(|r| r.ok())
            .filter(|p| p.is_file())
            .collect();
        if matches.is_empty() {
            eprintln!("warning: no files matched: {}", pattern);
        }
        files.extend(matches);
    }
    files.sort();
    files.dedup();
    Ok(files)
}

/// Recursively collect supported source files under a directory.
fn scan_dir(dir: &Path, files: &mut Vec<PathBuf>) -> Result<()> {
    for entry in fs::read_dir(dir)? {
        let path = entry?.path();
        if path.is_dir() {
            scan_dir(&path, files)?;
        } else if let Some(ext) = path.extension().and_then(|e| e.to_str()) {
            if SUPPORTED_EXTENSIONS.contains(&ext) {
                files.push(path);
            }
        }
    }
    Ok(())
}
