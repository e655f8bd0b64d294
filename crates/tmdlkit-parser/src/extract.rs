//! Embedded-content extraction from partition sources
//!
//! Partition `source` values are Power Query M scripts. Two narrow patterns
//! are pulled out of them:
//! - `{[Schema="...",Item="..."]}` navigation steps naming a database table
//! - `Binary.FromText("...", BinaryEncoding.Base64)` inline tables, whose
//!   payload is usually deflate-compressed JSON
//!
//! Failures are recorded as [`SourceDetail`] entries, never returned as errors.

use std::io::Read;
use std::sync::LazyLock;

use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use flate2::read::{DeflateDecoder, ZlibDecoder};
use regex::Regex;
use tmdlkit_core::{PayloadKind, SourceDetail};

static REFERENCE_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"\{\s*\[\s*Schema\s*=\s*"([^"]+)"\s*,\s*Item\s*=\s*"([^"]+)"\s*\]\s*\}"#)
        .expect("schema/item pattern is valid")
});

static PAYLOAD_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"Binary\.FromText\(\s*"([^"]+)"\s*,\s*BinaryEncoding\.Base64\s*\)"#)
        .expect("base64 payload pattern is valid")
});

/// Content reported when a payload decodes but cannot be inflated
pub const UNCOMPRESSED_CONTENT: &str = "Decompression failed or not compressed";

/// Run both extractions on a source value and merge them into `details`
///
/// Schema/item references replace the existing list when at least one is
/// found; decoded payloads are appended afterwards. Returns the number of
/// payloads that failed to decode or inflate.
pub fn apply_source_extraction(source: &str, details: &mut Vec<SourceDetail>) -> usize {
    let references = extract_references(source);
    if !references.is_empty() {
        tracing::debug!(count = references.len(), "extracted schema/item references");
        *details = references;
    }

    let payloads = extract_payloads(source);
    let failures = payloads.iter().filter(|detail| detail.is_failure()).count();
    if !payloads.is_empty() {
        tracing::debug!(count = payloads.len(), failures, "extracted embedded payloads");
        details.extend(payloads);
    }

    failures
}

/// Find every schema/item reference in source order
pub fn extract_references(source: &str) -> Vec<SourceDetail> {
    REFERENCE_RE
        .captures_iter(source)
        .map(|caps| SourceDetail::reference(&caps[1], &caps[2]))
        .collect()
}

/// Decode every base64 payload in source order
pub fn extract_payloads(source: &str) -> Vec<SourceDetail> {
    PAYLOAD_RE
        .captures_iter(source)
        .map(|caps| decode_payload(&caps[1]))
        .collect()
}

/// Decode one base64 literal and try to inflate it
pub fn decode_payload(encoded: &str) -> SourceDetail {
    let bytes = match STANDARD.decode(encoded) {
        Ok(bytes) => bytes,
        Err(e) => {
            tracing::debug!(error = %e, "base64 payload could not be decoded");
            return SourceDetail::Error {
                error: format!("Failed to decode: {}", e),
            };
        }
    };

    match inflate(&bytes) {
        Some(content) => SourceDetail::Payload {
            content_type: PayloadKind::DecompressedJson,
            content,
        },
        None => SourceDetail::Payload {
            content_type: PayloadKind::RawDecoded,
            content: UNCOMPRESSED_CONTENT.to_string(),
        },
    }
}

/// Inflate as raw deflate, then as a zlib stream; the result must be UTF-8
fn inflate(bytes: &[u8]) -> Option<String> {
    let mut text = String::new();
    if DeflateDecoder::new(bytes).read_to_string(&mut text).is_ok() {
        return Some(text);
    }

    text.clear();
    if ZlibDecoder::new(bytes).read_to_string(&mut text).is_ok() {
        return Some(text);
    }

    None
}
