use std::fs::File;
use std::io::{self, BufRead, BufReader};
use std::path::Path;

use flate2::read::MultiGzDecoder;

use crate::error::ScreenError;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TsvRow {
    pub line: usize,
    pub fields: Vec<String>,
}

impl TsvRow {
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Trimmed value of column `index`, or `""` past the end of the row.
    pub fn field(&self, index: usize) -> &str {
        self.fields
            .get(index)
            .map(|value| value.trim())
            .unwrap_or("")
    }
}

/// Tab-delimited rows with 1-based physical line numbers. Empty lines and
/// lines starting with `#` are skipped.
pub struct TsvReader<R> {
    lines: io::Lines<R>,
    line: usize,
    source: String,
}

impl<R: BufRead> TsvReader<R> {
    pub fn new(reader: R, source: impl Into<String>) -> Self {
        Self {
            lines: reader.lines(),
            line: 0,
            source: source.into(),
        }
    }

    pub fn source(&self) -> &str {
        &self.source
    }
}

impl<R: BufRead> Iterator for TsvReader<R> {
    type Item = Result<TsvRow, ScreenError>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            let line = match self.lines.next()? {
                Ok(line) => line,
                Err(err) => {
                    return Some(Err(ScreenError::InputRead {
                        path: self.source.clone(),
                        message: err.to_string(),
                    }));
                }
            };
            self.line += 1;
            let line = line.strip_suffix('\r').unwrap_or(&line);
            if line.is_empty() || line.starts_with('#') {
                continue;
            }
            return Some(Ok(TsvRow {
                line: self.line,
                fields: line.split('\t').map(str::to_string).collect(),
            }));
        }
    }
}

pub fn open(path: &Path) -> Result<TsvReader<Box<dyn BufRead>>, ScreenError> {
    let file = File::open(path).map_err(|err| ScreenError::InputRead {
        path: path.display().to_string(),
        message: err.to_string(),
    })?;
    let reader: Box<dyn BufRead> = if is_gzip(path) {
        Box::new(BufReader::new(MultiGzDecoder::new(file)))
    } else {
        Box::new(BufReader::new(file))
    };
    Ok(TsvReader::new(reader, path.display().to_string()))
}

fn is_gzip(path: &Path) -> bool {
    path.extension()
        .map(|ext| ext.eq_ignore_ascii_case("gz"))
        .unwrap_or(false)
}
