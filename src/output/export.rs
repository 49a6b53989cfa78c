// CSV export and import of result tables.
//
// Format: header row `Title,Category`, comma-delimited, RFC 4180 quoting,
// UTF-8. The header is always written, even for an empty table.

use std::path::Path;

use anyhow::{Context, Result};

use super::table::{ClassificationResult, ResultTable};

pub const CSV_HEADER: [&str; 2] = ["Title", "Category"];

/// Suggested file name for browser downloads.
pub const CSV_FILE_NAME: &str = "categorized_titles.csv";

impl ResultTable {
    /// Render the table as CSV text.
    pub fn to_csv(&self) -> Result<String> {
        let mut writer = csv::WriterBuilder::new()
            .has_headers(false)
            .from_writer(Vec::new());

        writer.write_record(CSV_HEADER)?;
        for row in self.rows() {
            writer.write_record([row.title.as_str(), row.category.as_str()])?;
        }

        let bytes = writer
            .into_inner()
            .map_err(|e| anyhow::anyhow!("Failed to flush CSV writer: {e}"))?;
        String::from_utf8(bytes).context("CSV output was not valid UTF-8")
    }

    /// Parse CSV text produced by `to_csv` back into a table.
    pub fn from_csv(text: &str) -> Result<Self> {
        let mut reader = csv::ReaderBuilder::new()
            .has_headers(true)
            .from_reader(text.as_bytes());

        let headers = reader.headers().context("CSV has no header row")?;
        if headers.iter().ne(CSV_HEADER) {
            anyhow::bail!("Unexpected CSV header: {:?}", headers.iter().collect::<Vec<_>>());
        }

        reader
            .records()
            .enumerate()
            .map(|(i, record)| -> Result<ClassificationResult> {
                let record = record.with_context(|| format!("Bad CSV record {}", i + 1))?;
                if record.len() != 2 {
                    anyhow::bail!("CSV record {} has {} fields, expected 2", i + 1, record.len());
                }
                Ok(ClassificationResult {
                    title: record[0].to_string(),
                    category: record[1]
                        .parse()
                        .with_context(|| format!("Bad category in CSV record {}", i + 1))?,
                })
            })
            .collect()
    }

    /// Write the CSV rendering to a file on disk.
    pub fn write_csv(&self, path: &Path) -> Result<()> {
        std::fs::write(path, self.to_csv()?)
            .with_context(|| format!("Failed to write {}", path.display()))
    }
}
