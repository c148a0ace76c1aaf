use crate::domain::model::ShortLinkRecord;
use crate::utils::error::{ExpandError, Result};
use regex::Regex;
use std::sync::OnceLock;

static HASH_RE: OnceLock<Regex> = OnceLock::new();

// Matches a path-segment-shaped token immediately before a comma, e.g.
// the `abc123` in `http,bit.ly,/abc123,2024-01-01`.
fn hash_pattern() -> &'static Regex {
    HASH_RE.get_or_init(|| Regex::new(r"/(\w+),").expect("hash pattern is valid"))
}

/// Order-preserving subset of lines containing the marker substring.
/// Lines are kept verbatim.
pub fn filter_relevant<'a>(lines: &'a [String], marker: &str) -> Vec<&'a String> {
    lines.iter().filter(|line| line.contains(marker)).collect()
}

pub fn extract_hash(line: &str) -> Result<String> {
    hash_pattern()
        .captures(line)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str().to_string())
        .ok_or_else(|| ExpandError::MalformedRecord {
            line: line.to_string(),
            reason: "no hash segment of the form /<id>, found".to_string(),
        })
}

/// Rebuilds the original short link from the first three comma-separated
/// fields as `field0://field1field2`.
pub fn linkify(line: &str) -> Result<String> {
    let parts: Vec<&str> = line.split(',').collect();
    if parts.len() < 3 {
        return Err(ExpandError::MalformedRecord {
            line: line.to_string(),
            reason: format!("expected at least 3 comma-separated fields, got {}", parts.len()),
        });
    }
    Ok(format!("{}://{}{}", parts[0], parts[1], parts[2]))
}

pub fn parse_record(line: &str) -> Result<ShortLinkRecord> {
    Ok(ShortLinkRecord {
        raw: line.to_string(),
        hash: extract_hash(line)?,
        link: linkify(line)?,
    })
}
