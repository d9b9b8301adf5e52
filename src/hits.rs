use std::collections::BTreeSet;

use tracing::{info, warn};

use crate::domain::{EntityClass, HITS_HEADER_MARKER, ResultCode};
use crate::emit::Emitter;
use crate::error::ScreenError;
use crate::gene::GeneResolver;
use crate::resolver::IdResolver;
use crate::screen::ScreenRegistry;
use crate::sink::{EntitySink, ItemRef};
use crate::tsv::TsvRow;

const FIRST_SCREEN_COLUMN: usize = 2;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActiveScreen {
    pub name: String,
    pub column: usize,
    pub screen: ItemRef,
}

#[derive(Debug, Clone, Default)]
pub struct HitMatrixOutcome {
    pub observed: BTreeSet<String>,
    pub active: Vec<ActiveScreen>,
    pub header_found: bool,
    pub amplicons: usize,
    pub hits: usize,
}

impl HitMatrixOutcome {
    pub fn active_names(&self) -> Vec<String> {
        self.active.iter().map(|screen| screen.name.clone()).collect()
    }
}

pub struct HitMatrixReader<'a, R: ?Sized> {
    registry: &'a ScreenRegistry,
    resolver: &'a R,
}

impl<'a, R: IdResolver + ?Sized> HitMatrixReader<'a, R> {
    pub fn new(registry: &'a ScreenRegistry, resolver: &'a R) -> Self {
        Self { registry, resolver }
    }

    pub fn load<I, S>(
        &self,
        rows: I,
        genes: &mut GeneResolver,
        emitter: &mut Emitter<S>,
    ) -> Result<HitMatrixOutcome, ScreenError>
    where
        I: IntoIterator<Item = Result<TsvRow, ScreenError>>,
        S: EntitySink,
    {
        let mut outcome = HitMatrixOutcome::default();
        let mut header_len = 0;
        for row in rows {
            let row = row?;
            if !outcome.header_found {
                if row.field(0) == HITS_HEADER_MARKER {
                    header_len = row.len();
                    self.read_header(&row, &mut outcome);
                }
                continue;
            }
            if row.len() != header_len {
                return Err(ScreenError::MalformedRow {
                    file: "hits".to_string(),
                    line: row.line,
                    expected: header_len,
                    actual: row.len(),
                });
            }
            outcome.hits += self.read_amplicon(&row, &outcome.active, genes, emitter)?;
            outcome.amplicons += 1;
        }

        if !outcome.header_found {
            warn!("no '{HITS_HEADER_MARKER}' header row found in hits file");
        }
        info!(
            active_screens = outcome.active.len(),
            amplicons = outcome.amplicons,
            hits = outcome.hits,
            genes = genes.len(),
            "loaded screen hits"
        );
        Ok(outcome)
    }

    fn read_header(&self, row: &TsvRow, outcome: &mut HitMatrixOutcome) {
        outcome.header_found = true;
        for column in FIRST_SCREEN_COLUMN..row.len() {
            let name = row.field(column);
            if name.is_empty() {
                continue;
            }
            outcome.observed.insert(name.to_string());
            let Some(screen) = self.registry.get(name) else {
                continue;
            };
            if outcome.active.iter().any(|active| active.name == name) {
                continue;
            }
            outcome.active.push(ActiveScreen {
                name: name.to_string(),
                column,
                screen: screen.clone(),
            });
        }
    }

    fn read_amplicon<S: EntitySink>(
        &self,
        row: &TsvRow,
        active: &[ActiveScreen],
        genes: &mut GeneResolver,
        emitter: &mut Emitter<S>,
    ) -> Result<usize, ScreenError> {
        let identifier = row.field(0);
        let organism = emitter.organism()?;
        let mut amplicon = emitter.create(EntityClass::Amplicon);
        amplicon.set_attribute("primaryIdentifier", identifier);
        amplicon.set_reference("organism", &organism);

        let mut targets: Vec<ItemRef> = Vec::new();
        for symbol in row.field(1).split(',').map(str::trim) {
            if symbol.is_empty() {
                continue;
            }
            if let Some(gene) = genes.resolve(symbol, self.resolver, emitter)? {
                amplicon.add_to_collection("genes", &gene);
                if !targets.contains(&gene) {
                    targets.push(gene);
                }
            }
        }

        let mut stored = 0;
        for screen in active {
            let raw = row.field(screen.column);
            let result: ResultCode = raw.parse().map_err(|_| ScreenError::UnrecognizedResultCode {
                code: raw.to_string(),
                screen: screen.name.clone(),
                amplicon: identifier.to_string(),
                line: row.line,
            })?;
            if targets.is_empty() {
                self.store_hit(emitter, result, amplicon.identifier(), &screen.screen, None)?;
                stored += 1;
            } else {
                for gene in &targets {
                    self.store_hit(
                        emitter,
                        result,
                        amplicon.identifier(),
                        &screen.screen,
                        Some(gene),
                    )?;
                    stored += 1;
                }
            }
        }
        emitter.store(amplicon)?;
        Ok(stored)
    }

    fn store_hit<S: EntitySink>(
        &self,
        emitter: &mut Emitter<S>,
        result: ResultCode,
        amplicon: &ItemRef,
        screen: &ItemRef,
        gene: Option<&ItemRef>,
    ) -> Result<ItemRef, ScreenError> {
        let mut hit = emitter.create(EntityClass::ScreenHit);
        if let Some(gene) = gene {
            hit.set_reference("gene", gene);
        }
        hit.set_attribute("result", result.label());
        hit.set_reference("pcrProduct", amplicon);
        hit.set_reference("rnaiScreen", screen);
        emitter.store(hit)
    }
}
