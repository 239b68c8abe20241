//! Naive comma-delimited decoder for labor-market observation tables.
//!
//! The first line is the header row defining field order; data lines are
//! zipped against it positionally. Numeric columns are coerced with
//! parse-or-zero semantics so decoding never fails on malformed values.
//!
//! # Known limitation
//!
//! The only separator is a single comma and there is no quote or escape
//! handling beyond trimming one layer of surrounding quotes per field. A
//! field value containing a comma or a quoted newline is not supported.
//! The export side writes real quoting, which round-trips here as long as
//! values are comma-free.
//!
//! Header names are accepted in both canonical form (`employment`,
//! `meanWage`, ...) and the BLS source form (`TOT_EMP`, `A_MEAN`, ...).
//! Unknown columns are ignored; missing trailing columns read as empty
//! text or zero.

use std::path::Path;

use crate::error::DecodeResult;
use crate::models::{Record, RegionType};

/// Decode delimited text into records.
///
/// Total function: blank lines are skipped, short rows leave their
/// trailing fields at the empty/zero defaults, and malformed numerics
/// coerce to zero. The record count always equals the number of non-blank
/// lines minus the header.
///
/// # Example
/// ```ignore
/// use workmap::decode;
///
/// let csv = "year,Region,TOT_EMP\n2024,United States,1000";
/// let records = decode(csv);
///
/// assert_eq!(records.len(), 1);
/// assert_eq!(records[0].employment, 1000.0);
/// ```
pub fn decode(text: &str) -> Vec<Record> {
    let mut lines = text.lines();

    let headers: Vec<&str> = match lines.next() {
        Some(header_line) => header_line.split(',').map(clean_field).collect(),
        None => return Vec::new(),
    };

    let mut records = Vec::new();

    for line in lines {
        if line.trim().is_empty() {
            continue;
        }

        let values: Vec<&str> = line.split(',').map(clean_field).collect();
        records.push(record_from_row(&headers, &values));
    }

    records
}

/// Decode raw bytes, auto-detecting the text encoding first.
pub fn decode_bytes(bytes: &[u8]) -> Vec<Record> {
    let encoding = detect_encoding(bytes);
    let content = decode_content(bytes, &encoding);
    decode(&content)
}

/// Decode a file from disk.
pub fn decode_file<P: AsRef<Path>>(path: P) -> DecodeResult<Vec<Record>> {
    let bytes = std::fs::read(path.as_ref())?;
    Ok(decode_bytes(&bytes))
}

/// Detect the encoding of raw bytes using chardet.
pub fn detect_encoding(bytes: &[u8]) -> String {
    let result = chardet::detect(bytes);
    let charset = result.0;

    // Normalize charset names
    match charset.to_lowercase().as_str() {
        "ascii" | "utf-8" | "utf8" => "utf-8".to_string(),
        "iso-8859-1" | "iso-8859-15" | "latin-1" | "latin1" => "iso-8859-1".to_string(),
        "windows-1252" | "cp1252" => "windows-1252".to_string(),
        _ => charset,
    }
}

/// Decode bytes to a string using the specified encoding. Undecodable
/// sequences are replaced rather than raised.
pub fn decode_content(bytes: &[u8], encoding: &str) -> String {
    match encoding.to_lowercase().as_str() {
        "iso-8859-1" | "latin-1" | "latin1" => {
            encoding_rs::ISO_8859_15.decode(bytes).0.to_string()
        }
        "windows-1252" | "cp1252" => encoding_rs::WINDOWS_1252.decode(bytes).0.to_string(),
        _ => String::from_utf8_lossy(bytes).to_string(),
    }
}

/// Trim surrounding whitespace and one layer of quotes.
fn clean_field(raw: &str) -> &str {
    raw.trim().trim_matches('"')
}

/// Parse-or-zero numeric coercion. Unparsable, non-finite and negative
/// values all coerce to zero.
fn coerce(raw: &str) -> f64 {
    match raw.trim().parse::<f64>() {
        Ok(value) if value.is_finite() && value >= 0.0 => value,
        _ => 0.0,
    }
}

/// Zip one data row against the header row.
fn record_from_row(headers: &[&str], values: &[&str]) -> Record {
    let mut record = Record::default();

    for (i, header) in headers.iter().enumerate() {
        let raw = values.get(i).copied().unwrap_or("");

        match *header {
            "year" => record.year = coerce(raw) as i32,
            "Region_Type" | "regionType" => {
                record.region_type = RegionType::from_label_lenient(raw)
            }
            "Region" | "region" => record.region = raw.to_string(),
            "SOC_Code" | "code" => record.code = raw.to_string(),
            "OCC_TITLE" | "title" => record.title = raw.to_string(),
            "SOC_Major_Group_Name" | "groupName" => record.group_name = raw.to_string(),
            "TOT_EMP" | "employment" => record.employment = coerce(raw),
            "A_MEAN" | "meanWage" => record.mean_wage = coerce(raw),
            "GDP" | "gdp" => record.gdp = coerce(raw),
            "complexity_score" | "complexityScore" => record.complexity_score = coerce(raw),
            _ => {}
        }
    }

    record
}
