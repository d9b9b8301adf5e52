use std::collections::{BTreeSet, HashMap};
use std::io::BufRead;
use std::path::Path;

use crate::error::ScreenError;
use crate::tsv::{self, TsvReader};

pub trait IdResolver {
    /// Canonical identifiers `symbol` may refer to within `taxon_id`. Empty
    /// when unknown, more than one when ambiguous.
    fn resolve(&self, taxon_id: &str, symbol: &str) -> BTreeSet<String>;
}

impl<T: IdResolver + ?Sized> IdResolver for &T {
    fn resolve(&self, taxon_id: &str, symbol: &str) -> BTreeSet<String> {
        (**self).resolve(taxon_id, symbol)
    }
}

#[derive(Debug, Clone, Default)]
pub struct GeneIdentifierTable {
    keys: HashMap<(String, String), BTreeSet<String>>,
    primaries: usize,
}

impl GeneIdentifierTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert<'a>(
        &mut self,
        taxon_id: &str,
        primary_id: &'a str,
        symbol: &'a str,
        synonyms: impl IntoIterator<Item = &'a str>,
    ) {
        let taxon_id = taxon_id.trim();
        let primary_id = primary_id.trim();
        self.primaries += 1;
        let keys = [primary_id, symbol]
            .into_iter()
            .chain(synonyms)
            .map(str::trim)
            .filter(|key| !key.is_empty());
        for key in keys {
            self.keys
                .entry((taxon_id.to_string(), key.to_string()))
                .or_default()
                .insert(primary_id.to_string());
        }
    }

    pub fn from_reader<R: BufRead>(reader: R, source: &str) -> Result<Self, ScreenError> {
        Self::from_rows(TsvReader::new(reader, source))
    }

    pub fn from_path(path: &Path) -> Result<Self, ScreenError> {
        Self::from_rows(tsv::open(path)?)
    }

    fn from_rows<R: BufRead>(rows: TsvReader<R>) -> Result<Self, ScreenError> {
        let mut table = Self::new();
        for row in rows {
            let row = row?;
            if row.len() < 3 {
                return Err(ScreenError::IdentifierTable {
                    line: row.line,
                    message: format!("expected at least 3 columns, found {}", row.len()),
                });
            }
            let (taxon_id, primary_id) = (row.field(0), row.field(1));
            if taxon_id.is_empty() || primary_id.is_empty() {
                return Err(ScreenError::IdentifierTable {
                    line: row.line,
                    message: "taxon and primary identifier are required".to_string(),
                });
            }
            table.insert(
                taxon_id,
                primary_id,
                row.field(2),
                row.field(3).split(','),
            );
        }
        Ok(table)
    }

    pub fn primary_count(&self) -> usize {
        self.primaries
    }
}

impl IdResolver for GeneIdentifierTable {
    fn resolve(&self, taxon_id: &str, symbol: &str) -> BTreeSet<String> {
        self.keys
            .get(&(taxon_id.to_string(), symbol.trim().to_string()))
            .cloned()
            .unwrap_or_default()
    }
}
