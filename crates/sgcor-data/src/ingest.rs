//! Upload decoding and CSV parsing.
//!
//! Turns the raw uploaded byte buffer into a [`DataTable`]: decodes under
//! UTF-8 with a Latin-1 fallback, auto-detects the field delimiter from the
//! first lines, and parses records leniently. The buffer itself is never
//! retained past this stage.

use csv::ReaderBuilder;
use sgcor_core::error::{DashboardError, Result};
use sgcor_core::models::{Cell, DataTable};
use tracing::{debug, warn};

/// Delimiters considered by the sniffer, in priority order.
const DELIMITER_CANDIDATES: &[u8] = &[b';', b',', b'\t', b'|'];

/// How many non-empty lines the sniffer inspects.
const SNIFF_LINES: usize = 5;

// ── Public API ────────────────────────────────────────────────────────────────

/// Decode the upload as UTF-8, falling back to Latin-1.
///
/// Latin-1 maps every byte to the code point of the same value, so the
/// fallback always yields text; a hard failure here means the buffer was
/// empty.
pub fn decode_buffer(bytes: &[u8]) -> Result<String> {
    if bytes.is_empty() {
        return Err(DashboardError::Decode("empty upload buffer".to_string()));
    }

    match std::str::from_utf8(bytes) {
        Ok(text) => Ok(text.to_string()),
        Err(e) => {
            warn!("UTF-8 decode failed at byte {}; retrying as Latin-1", e.valid_up_to());
            Ok(bytes.iter().map(|&b| b as char).collect())
        }
    }
}

/// Detect the field delimiter by counting candidate occurrences over the
/// first [`SNIFF_LINES`] non-empty lines.
///
/// A candidate that appears a consistent, non-zero number of times on every
/// inspected line wins; ties are broken by the per-line count, then by
/// candidate priority. Defaults to `,` when nothing matches.
pub fn sniff_delimiter(text: &str) -> u8 {
    let lines: Vec<&str> = text
        .lines()
        .filter(|l| !l.trim().is_empty())
        .take(SNIFF_LINES)
        .collect();
    if lines.is_empty() {
        return b',';
    }

    let mut best: Option<(u8, usize)> = None;
    for &candidate in DELIMITER_CANDIDATES {
        let counts: Vec<usize> = lines
            .iter()
            .map(|l| l.bytes().filter(|&b| b == candidate).count())
            .collect();
        let first = counts[0];
        if first == 0 || counts.iter().any(|&c| c != first) {
            continue;
        }
        if best.map(|(_, n)| first > n).unwrap_or(true) {
            best = Some((candidate, first));
        }
    }

    best.map(|(d, _)| d).unwrap_or(b',')
}

/// Parse the uploaded byte buffer into a raw [`DataTable`].
///
/// Headers come from the first record; every field enters the table as
/// [`Cell::Text`], with empty fields already normalised to [`Cell::Missing`].
/// Short or long rows are tolerated (padded / truncated to the header width).
pub fn parse_table(bytes: &[u8]) -> Result<DataTable> {
    let text = decode_buffer(bytes)?;
    let delimiter = sniff_delimiter(&text);
    debug!(delimiter = %(delimiter as char), "delimiter detected");

    let mut reader = ReaderBuilder::new()
        .delimiter(delimiter)
        .flexible(true)
        .from_reader(text.as_bytes());

    let headers: Vec<String> = reader
        .headers()
        .map_err(DashboardError::CsvParse)?
        .iter()
        .map(|h| h.trim().to_string())
        .collect();
    if headers.is_empty() {
        return Err(DashboardError::Decode("no header row found".to_string()));
    }

    let mut table = DataTable::new(headers);
    for record in reader.records() {
        let record = record.map_err(DashboardError::CsvParse)?;
        let cells: Vec<Cell> = record.iter().map(Cell::from_field).collect();
        table.push_row(cells);
    }

    debug!(
        rows = table.row_count(),
        cols = table.columns.len(),
        "upload parsed"
    );
    Ok(table)
}

// ── Tests ─────────────────────────────────────────────────────────────────────
