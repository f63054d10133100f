#![deny(missing_docs)]

//! # Resolve Command
//!
//! Prints a document with every `$ref` replaced by its target.

use crate::error::{CliError, CliResult};
use oasr_core::oas::Document;
use oasr_core::parse_openapi;
use std::io::Write;
use std::path::PathBuf;

/// Output encoding.
#[derive(clap::ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum Format {
    /// YAML.
    Yaml,
    /// Pretty-printed JSON.
    Json,
}

/// Arguments for the resolve command.
#[derive(clap::Args, Debug, Clone)]
pub struct ResolveArgs {
    /// Root document.
    pub path: PathBuf,

    /// Output format.
    #[clap(long, value_enum, env = "OASR_FORMAT", default_value = "yaml")]
    pub format: Format,
}

/// Parses and resolves the document, writing it to `out`.
pub fn execute(args: &ResolveArgs, out: &mut impl Write) -> CliResult<()> {
    let doc = parse_openapi(args.path.as_path())?;
    out.write_all(render(&doc, args.format)?.as_bytes())?;
    Ok(())
}

fn render(doc: &Document, format: Format) -> CliResult<String> {
    match format {
        Format::Yaml => serde_yaml::to_string(doc).map_err(|e| CliError::Render(e.to_string())),
        Format::Json => serde_json::to_string_pretty(doc)
            .map(|json| json + "\n")
            .map_err(|e| CliError::Render(e.to_string())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    fn write_spec(dir: &std::path::Path) -> PathBuf {
        fs::write(
            dir.join("shared.yaml"),
            "Id:\n  type: integer\n  format: int64\n",
        )
        .unwrap();
        let root = dir.join("openapi.yaml");
        fs::write(
            &root,
            r#"
openapi: 3.1.0
info: {title: Resolve, version: "1"}
paths: {}
components:
  schemas:
    Id:
      $ref: 'shared.yaml#/Id'
"#,
        )
        .unwrap();
        root
    }

    #[test]
    fn test_resolve_json_inlines_external_schema() {
        let dir = tempdir().unwrap();
        let args = ResolveArgs {
            path: write_spec(dir.path()),
            format: Format::Json,
        };
        let mut out = Vec::new();
        execute(&args, &mut out).unwrap();

        let value: serde_json::Value = serde_json::from_slice(&out).unwrap();
        assert_eq!(
            value["components"]["schemas"]["Id"],
            serde_json::json!({"type": "integer", "format": "int64"})
        );
    }

    #[test]
    fn test_resolve_yaml_has_no_refs() {
        let dir = tempdir().unwrap();
        let args = ResolveArgs {
            path: write_spec(dir.path()),
            format: Format::Yaml,
        };
        let mut out = Vec::new();
        execute(&args, &mut out).unwrap();

        let text = String::from_utf8(out).unwrap();
        assert!(text.contains("format: int64"));
        assert!(!text.contains("$ref"));
    }

    #[test]
    fn test_resolve_missing_file() {
        let dir = tempdir().unwrap();
        let args = ResolveArgs {
            path: dir.path().join("absent.yaml"),
            format: Format::Yaml,
        };
        let mut out = Vec::new();
        assert!(matches!(execute(&args, &mut out), Err(CliError::Parse(_))));
    }
}
