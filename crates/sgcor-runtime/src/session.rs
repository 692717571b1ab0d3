//! Per-session state with a content-keyed memoized load.
//!
//! Loading is split in two: the buffer-dependent stages (ingest → clean →
//! coerce) are memoized in an explicit cache map keyed on the SHA-256 of the
//! upload, so cosmetic interactions (view switches, repeated loads of the
//! same file) never re-run them; the selection-dependent stages (filter →
//! aggregate → derive) re-run on every filter change via [`SessionState::refresh`].

use std::collections::{HashMap, HashSet};
use std::path::Path;

use sha2::{Digest, Sha256};
use sgcor_core::error::{DashboardError, Result};
use sgcor_core::models::DataTable;
use sgcor_core::schema;
use sgcor_data::filter::convention_values;
use sgcor_data::pipeline::{self, Report};
use tracing::{debug, info};

/// SHA-256 digest of an upload buffer.
type BufferKey = [u8; 32];

// ── SessionState ──────────────────────────────────────────────────────────────

/// All mutable state for one interactive session.
///
/// Nothing here survives the session; the cache only short-circuits repeated
/// loads of byte-identical uploads within it.
#[derive(Debug, Default)]
pub struct SessionState {
    /// Memo cache: upload digest → cleaned, coerced table.
    cache: HashMap<BufferKey, DataTable>,
    /// The currently loaded table, `None` before the first successful load.
    table: Option<DataTable>,
    /// Every convention value present in the current table, sorted.
    conventions: Vec<String>,
    /// The active sidebar selection.
    selected: HashSet<String>,
    /// The derived report for the current table + selection.
    report: Option<Report>,
}

impl SessionState {
    pub fn new() -> Self {
        Self::default()
    }

    // ── Loading ───────────────────────────────────────────────────────────────

    /// Load an upload buffer, reusing the memoized cleaned table when the
    /// same bytes were seen before. Resets the convention selection to
    /// "everything" and rebuilds the report.
    ///
    /// The buffer itself is not retained; only its digest and the cleaned
    /// table are.
    pub fn load_buffer(&mut self, bytes: &[u8]) -> Result<()> {
        let key: BufferKey = Sha256::digest(bytes).into();

        let table = match self.cache.get(&key) {
            Some(cached) => {
                debug!("memoized load hit; skipping ingest and clean stages");
                cached.clone()
            }
            None => {
                let loaded = pipeline::load_table(bytes)?;
                self.cache.insert(key, loaded.clone());
                loaded
            }
        };

        self.conventions = convention_values(&table);
        self.selected = self.conventions.iter().cloned().collect();
        self.table = Some(table);
        self.refresh()
    }

    /// Read `path` into memory and load it. The file contents are dropped as
    /// soon as parsing finishes.
    pub fn load_file(&mut self, path: &Path) -> Result<()> {
        let bytes = std::fs::read(path).map_err(|source| DashboardError::FileRead {
            path: path.to_path_buf(),
            source,
        })?;
        info!(path = %path.display(), len = bytes.len(), "upload read");
        self.load_buffer(&bytes)
    }

    // ── Filter selection ──────────────────────────────────────────────────────

    /// Toggle one convention in or out of the selection and rebuild.
    pub fn toggle_convention(&mut self, value: &str) -> Result<()> {
        if !self.selected.remove(value) {
            self.selected.insert(value.to_string());
        }
        self.refresh()
    }

    /// Select every available convention and rebuild.
    pub fn select_all_conventions(&mut self) -> Result<()> {
        self.selected = self.conventions.iter().cloned().collect();
        self.refresh()
    }

    /// Replace the whole selection and rebuild.
    pub fn set_selected(&mut self, selected: HashSet<String>) -> Result<()> {
        self.selected = selected;
        self.refresh()
    }

    // ── Accessors ─────────────────────────────────────────────────────────────

    /// The current derived report, `None` before the first load.
    pub fn report(&self) -> Option<&Report> {
        self.report.as_ref()
    }

    /// The cleaned table currently loaded.
    pub fn table(&self) -> Option<&DataTable> {
        self.table.as_ref()
    }

    /// All convention values available to the filter, sorted.
    pub fn conventions(&self) -> &[String] {
        &self.conventions
    }

    /// `true` when `value` is currently selected.
    pub fn is_selected(&self, value: &str) -> bool {
        self.selected.contains(value)
    }

    /// Per-company registration counts for the current table.
    pub fn company_counts(&self) -> Result<Vec<(String, u32)>> {
        let table = self.table.as_ref().ok_or(DashboardError::EmptyTable)?;
        pipeline::company_counts(table)
    }

    // ── Private ───────────────────────────────────────────────────────────────

    /// Re-run the selection-dependent half of the pipeline.
    ///
    /// The filter only applies when the convention column exists; otherwise
    /// the whole table is aggregated.
    fn refresh(&mut self) -> Result<()> {
        let Some(table) = self.table.as_ref() else {
            self.report = None;
            return Ok(());
        };

        let selection = table
            .has_column(schema::CONVENTION)
            .then_some(&self.selected);
        self.report = Some(pipeline::build_report(table, selection)?);
        Ok(())
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
