//! Reading delimited dataset files.

use std::fmt;
use std::fs;
use std::path::Path;

use sha2::{Digest, Sha256};

use super::table::DataTable;
use crate::error::{DriftguardError, Result};

/// Lines inspected when guessing the delimiter.
const SAMPLE_LINES: usize = 10;

/// Field separators recognised in dataset files.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Delimiter {
    Tab,
    Comma,
    Semicolon,
    Pipe,
}

impl Delimiter {
    /// Candidates in tie-break order.
    const CANDIDATES: [Delimiter; 4] = [
        Delimiter::Tab,
        Delimiter::Comma,
        Delimiter::Semicolon,
        Delimiter::Pipe,
    ];

    pub fn byte(self) -> u8 {
        match self {
            Delimiter::Tab => b'\t',
            Delimiter::Comma => b',',
            Delimiter::Semicolon => b';',
            Delimiter::Pipe => b'|',
        }
    }

    /// Guess the separator from the leading lines of a file.
    ///
    /// The winner splits the header at least once and, preferably, splits
    /// every sampled line the same number of times. Files with a single
    /// column fall back to comma.
    pub fn detect(contents: &[u8]) -> Result<Self> {
        let lines: Vec<&[u8]> = contents
            .split(|&b| b == b'\n')
            .filter(|line| !line.trim_ascii().is_empty())
            .take(SAMPLE_LINES)
            .collect();

        if lines.is_empty() {
            return Err(DriftguardError::EmptyData("file has no lines".to_string()));
        }

        let mut best: Option<((bool, usize), Delimiter)> = None;
        for candidate in Self::CANDIDATES {
            let counts: Vec<usize> = lines
                .iter()
                .map(|line| unquoted_count(line, candidate.byte()))
                .collect();

            let header_splits = counts[0];
            if header_splits == 0 {
                continue;
            }

            let rank = (counts.iter().all(|&c| c == header_splits), header_splits);
            if best.is_none_or(|(best_rank, _)| rank > best_rank) {
                best = Some((rank, candidate));
            }
        }

        Ok(best.map_or(Delimiter::Comma, |(_, delimiter)| delimiter))
    }
}

impl fmt::Display for Delimiter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Delimiter::Tab => "tab",
            Delimiter::Comma => "comma",
            Delimiter::Semicolon => "semicolon",
            Delimiter::Pipe => "pipe",
        };
        f.write_str(name)
    }
}

/// Identity of a dataset file as it was read.
#[derive(Debug, Clone, PartialEq)]
pub struct DatasetFingerprint {
    /// File name without directories.
    pub file: String,
    /// Hex SHA-256 of the raw bytes.
    pub sha256: String,
    pub delimiter: Delimiter,
    pub rows: usize,
    pub columns: usize,
}

/// A dataset file read fully into memory.
#[derive(Debug, Clone)]
pub struct Dataset {
    pub table: DataTable,
    pub fingerprint: DatasetFingerprint,
}

/// Read a delimited file with a header row.
///
/// A header-only file yields a table with no rows. Ragged rows are fitted
/// to the header width.
pub fn read_dataset(path: impl AsRef<Path>) -> Result<Dataset> {
    let path = path.as_ref();
    let contents = fs::read(path).map_err(|source| DriftguardError::Io {
        path: path.to_path_buf(),
        source,
    })?;

    let delimiter = Delimiter::detect(&contents)?;
    let table = parse_table(&contents, delimiter)?;

    let fingerprint = DatasetFingerprint {
        file: path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_default(),
        sha256: format!("{:x}", Sha256::digest(&contents)),
        delimiter,
        rows: table.row_count(),
        columns: table.column_count(),
    };

    Ok(Dataset { table, fingerprint })
}

fn parse_table(contents: &[u8], delimiter: Delimiter) -> Result<DataTable> {
    let mut reader = csv::ReaderBuilder::new()
        .delimiter(delimiter.byte())
        .flexible(true)
        .from_reader(contents);

    let headers: Vec<String> = reader.headers()?.iter().map(str::to_string).collect();
    if headers.iter().all(|h| h.is_empty()) {
        return Err(DriftguardError::EmptyData("no header row".to_string()));
    }

    let rows = reader
        .records()
        .map(|record| record.map(|r| r.iter().map(str::to_string).collect()))
        .collect::<std::result::Result<Vec<Vec<String>>, csv::Error>>()?;

    Ok(DataTable::new(headers, rows))
}

/// Occurrences of `delimiter` outside double quotes.
fn unquoted_count(line: &[u8], delimiter: u8) -> usize {
    let mut in_quotes = false;
    line.iter()
        .filter(|&&b| {
            if b == b'"' {
                in_quotes = !in_quotes;
            }
            !in_quotes && b == delimiter
        })
        .count()
}
