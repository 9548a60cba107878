use anyhow::{Context, Result};
use serde_json::Value;
use sha2::{Digest, Sha256};
use std::{fs, path::Path};

use crate::report::model::SourceInfo;

/// Raw audit report context used during ingestion.
///
/// Holds the parsed document and a cryptographic fingerprint of the
/// exact bytes it was parsed from.
#[derive(Debug, Clone)]
pub struct ReportContext {
    /// Optional source path (informational only).
    pub path: Option<String>,

    /// Parsed JSON document. Shape is not validated here.
    pub document: Value,

    /// Size of the raw payload in bytes.
    pub size_bytes: u64,

    /// Hex-encoded SHA-256 of the raw payload.
    pub sha256: String,
}

impl ReportContext {
    /// Convert into the report-facing source metadata, dropping the document.
    pub fn into_source(self) -> SourceInfo {
        SourceInfo {
            path: self.path,
            size_bytes: self.size_bytes,
            sha256: self.sha256,
        }
    }
}

/// Read an audit report from disk and parse it as JSON.
///
/// Only I/O and JSON syntax failures are errors. A document of any shape,
/// including a bare array or scalar, is handed on to the normalizer.
pub fn read_report(path: &Path) -> Result<ReportContext> {
    let bytes =
        fs::read(path).with_context(|| format!("failed to read report: {}", path.display()))?;

    parse_report_bytes(&bytes, Some(path.display().to_string()))
        .with_context(|| format!("failed to parse report: {}", path.display()))
}

/// Parse an in-memory report payload.
pub fn parse_report_bytes(bytes: &[u8], path: Option<String>) -> Result<ReportContext> {
    let document: Value = serde_json::from_slice(bytes).context("report is not valid JSON")?;

    let mut hasher = Sha256::new();
    hasher.update(bytes);

    Ok(ReportContext {
        path,
        document,
        size_bytes: bytes.len() as u64,
        sha256: hex::encode(hasher.finalize()),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn temp_report(data: &[u8]) -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(data).unwrap();
        file.flush().unwrap();
        file
    }

    #[test]
    fn reads_document_and_computes_stable_hash() {
        let file = temp_report(b"{}");

        let ctx = read_report(file.path()).expect("report read succeeds");

        assert_eq!(ctx.document, serde_json::json!({}));
        assert_eq!(ctx.size_bytes, 2);
        // echo -n "{}" | sha256sum
        assert_eq!(
            ctx.sha256,
            "44136fa355b3678a1146ad16f7e8649e94fb4fc21fe77e8310c060f61caaff8a"
        );
    }

    #[test]
    fn different_inputs_produce_different_hashes() {
        let a = read_report(temp_report(br#"{"results": {}}"#).path()).unwrap();
        let b = read_report(temp_report(br#"{"results": []}"#).path()).unwrap();

        assert_ne!(a.sha256, b.sha256);
    }

    #[test]
    fn non_object_documents_are_accepted() {
        let ctx = parse_report_bytes(b"[1, 2, 3]", None).unwrap();
        assert!(ctx.document.is_array());
    }

    #[test]
    fn invalid_json_returns_error() {
        assert!(parse_report_bytes(b"{not json", None).is_err());
    }

    #[test]
    fn missing_file_returns_error() {
        let result = read_report(Path::new("non_existent_report.json"));
        assert!(result.is_err());
    }

    #[test]
    fn object_key_order_is_preserved() {
        let ctx = parse_report_bytes(br#"{"zeta": 1, "alpha": 2}"#, None).unwrap();
        let keys: Vec<&str> = ctx
            .document
            .as_object()
            .unwrap()
            .keys()
            .map(String::as_str)
            .collect();
        assert_eq!(keys, vec!["zeta", "alpha"]);
    }

    #[test]
    fn converts_to_source_info() {
        let ctx = ReportContext {
            path: Some("audit.json".into()),
            document: Value::Null,
            size_bytes: 4,
            sha256: "abcd".into(),
        };

        let source = ctx.into_source();
        assert_eq!(source.path, Some("audit.json".into()));
        assert_eq!(source.sha256, "abcd");
    }
}
