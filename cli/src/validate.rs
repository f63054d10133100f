#![deny(missing_docs)]

//! # Validate Command
//!
//! Parses every given document (directories are searched for `.yaml`,
//! `.yml` and `.json` files) and prints one status line per document.
//! External files shared between documents are loaded once for the run.

use crate::error::{CliError, CliResult};
use log::info;
use oasr_core::{parse_openapi_with_cache, DocumentCache, FsLoader, ParseOptions};
use std::io::Write;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

const DOCUMENT_EXTENSIONS: [&str; 3] = ["yaml", "yml", "json"];

/// Arguments for the validate command.
#[derive(clap::Args, Debug, Clone)]
pub struct ValidateArgs {
    /// Documents or directories to validate.
    #[clap(required = true)]
    pub paths: Vec<PathBuf>,

    /// Check structure only; leave `$ref`s unresolved.
    #[clap(long)]
    pub no_resolve: bool,
}

/// Validates each document, writing results to `out`.
///
/// Fails with [`CliError::Failed`] when any document does not parse.
pub fn execute(args: &ValidateArgs, out: &mut impl Write) -> CliResult<()> {
    let files = collect_documents(&args.paths)?;
    info!("Validating {} document(s)", files.len());

    let options = ParseOptions::default().resolve_references(!args.no_resolve);
    let cache = DocumentCache::new();
    let mut failed = 0;

    for file in &files {
        match parse_openapi_with_cache(file.as_path(), &options, &cache, &FsLoader) {
            Ok(_) => writeln!(out, "ok      {}", file.display())?,
            Err(e) => {
                failed += 1;
                writeln!(out, "FAILED  {}: {}", file.display(), e)?;
            }
        }
    }

    if failed > 0 {
        return Err(CliError::Failed(failed));
    }
    Ok(())
}

/// Expands directories into the documents they contain, in name order.
fn collect_documents(paths: &[PathBuf]) -> CliResult<Vec<PathBuf>> {
    let mut files = Vec::new();
    for path in paths {
        if !path.is_dir() {
            files.push(path.clone());
            continue;
        }
        let before = files.len();
        let walker = WalkDir::new(path).sort_by_file_name().into_iter();
        for entry in walker.filter_map(|e| e.ok()) {
            if entry.file_type().is_file() && is_document(entry.path()) {
                files.push(entry.into_path());
            }
        }
        if files.len() == before {
            return Err(CliError::General(format!(
                "no YAML or JSON documents found in {}",
                path.display()
            )));
        }
    }
    Ok(files)
}

fn is_document(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| DOCUMENT_EXTENSIONS.contains(&ext.to_ascii_lowercase().as_str()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    const GOOD: &str = r#"
openapi: 3.1.0
info: {title: Good, version: "1"}
paths:
  /ping:
    get:
      responses:
        '200': {description: pong}
"#;

    const BROKEN_REF: &str = r#"
openapi: 3.1.0
info: {title: Broken, version: "1"}
paths:
  /ping:
    get:
      responses:
        '200':
          $ref: '#/components/responses/Missing'
"#;

    fn run(args: &ValidateArgs) -> (CliResult<()>, String) {
        let mut out = Vec::new();
        let result = execute(args, &mut out);
        (result, String::from_utf8(out).unwrap())
    }

    #[test]
    fn test_validate_directory_reports_each_file() {
        let dir = tempdir().unwrap();
        fs::write(dir.path().join("a_good.yaml"), GOOD).unwrap();
        fs::write(dir.path().join("b_broken.yml"), BROKEN_REF).unwrap();
        fs::write(dir.path().join("notes.txt"), "ignored").unwrap();

        let args = ValidateArgs {
            paths: vec![dir.path().to_path_buf()],
            no_resolve: false,
        };
        let (result, output) = run(&args);

        assert!(matches!(result, Err(CliError::Failed(1))));
        let lines: Vec<&str> = output.lines().collect();
        assert_eq!(lines.len(), 2);
        assert!(lines[0].starts_with("ok") && lines[0].ends_with("a_good.yaml"));
        assert!(lines[1].starts_with("FAILED"));
        assert!(lines[1].contains("#/components/responses/Missing"));
    }

    #[test]
    fn test_no_resolve_skips_reference_errors() {
        let dir = tempdir().unwrap();
        let file = dir.path().join("broken.yaml");
        fs::write(&file, BROKEN_REF).unwrap();

        let args = ValidateArgs {
            paths: vec![file],
            no_resolve: true,
        };
        let (result, output) = run(&args);
        assert!(result.is_ok());
        assert!(output.starts_with("ok"));
    }

    #[test]
    fn test_empty_directory_is_an_error() {
        let dir = tempdir().unwrap();
        let args = ValidateArgs {
            paths: vec![dir.path().to_path_buf()],
            no_resolve: false,
        };
        let (result, _) = run(&args);
        assert!(matches!(result, Err(CliError::General(_))));
    }

    #[test]
    fn test_is_document() {
        assert!(is_document(Path::new("api.YAML")));
        assert!(is_document(Path::new("api.json")));
        assert!(!is_document(Path::new("api.toml")));
        assert!(!is_document(Path::new("Makefile")));
    }
}
