use serde::{Deserialize, Serialize};

/// One relevant input line: the raw text (newline stripped), the extracted
/// short-link hash, and the link reconstructed from the first three fields.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShortLinkRecord {
    pub raw: String,
    pub hash: String,
    pub link: String,
}

/// A record joined positionally with its expansion result. Row order is
/// input order; the pairing has no key, so order must never change.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OutputRow {
    pub raw: String,
    pub link: String,
    pub long_url: String,
}

#[derive(Debug, Clone)]
pub struct ExpandReport {
    pub rows: Vec<OutputRow>,
    pub csv_output: String,
}
