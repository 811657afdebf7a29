use std::path::Path;

use anyhow::Result;
use tracing::info;

use crate::artifact::write_atomic;

/// One iteration's ring size and the metrics its benchmark run produced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResultRow {
    pub ring_size: i64,
    pub metrics: Vec<u64>,
}

impl ResultRow {
    pub fn new(ring_size: i64, metrics: Vec<u64>) -> Self {
        Self { ring_size, metrics }
    }

    /// Ring size followed by the metrics, as written to the report.
    pub fn fields(&self) -> Vec<String> {
        std::iter::once(self.ring_size.to_string())
            .chain(self.metrics.iter().map(u64::to_string))
            .collect()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ResultTable {
    header: Vec<String>,
    rows: Vec<ResultRow>,
}

impl ResultTable {
    pub fn new(header: Vec<String>) -> Self {
        Self { header, rows: Vec::new() }
    }

    pub fn header(&self) -> &[String] {
        &self.header
    }

    pub fn rows(&self) -> &[ResultRow] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn push(&mut self, row: ResultRow) {
        self.rows.push(row);
    }

    /// Header line, then one line per row. Every line ends in `\n`.
    pub fn to_csv(&self) -> String {
        let mut out = String::new();
        push_record(&mut out, self.header.iter().map(|h| csv_field(h)));
        for row in &self.rows {
            push_record(&mut out, row.fields());
        }
        out
    }

    /// Write the whole report in one step. Nothing is left at `path` if the
    /// write fails.
    pub fn write_csv(&self, path: &Path) -> Result<()> {
        write_atomic(path, self.to_csv().as_bytes())?;
        info!(path = %path.display(), rows = self.rows.len(), "wrote sweep report");
        Ok(())
    }
}

fn push_record<I, S>(out: &mut String, fields: I)
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    for (idx, field) in fields.into_iter().enumerate() {
        if idx > 0 {
            out.push(',');
        }
        out.push_str(field.as_ref());
    }
    out.push('\n');
}

/// Quote a header field when it carries a delimiter, quote or newline.
fn csv_field(raw: &str) -> String {
    if raw.contains([',', '"', '\n', '\r']) {
        format!("\"{}\"", raw.replace('"', "\"\""))
    } else {
        raw.to_string()
    }
}
