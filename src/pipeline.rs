use std::collections::BTreeMap;
use std::path::Path;

use serde::Serialize;
use tracing::info;

use crate::context::IngestContext;
use crate::emit::Provenance;
use crate::error::ScreenError;
use crate::hits::HitMatrixReader;
use crate::resolver::IdResolver;
use crate::screen::{DuplicateScreens, ScreenRegistry};
use crate::sink::EntitySink;
use crate::tsv::{self, TsvRow};
use crate::validate;

#[derive(Debug, Clone, Default)]
pub struct PipelineOptions {
    pub provenance: Provenance,
    pub duplicate_screens: DuplicateScreens,
}

#[derive(Debug, Clone, Serialize)]
pub struct IngestSummary {
    pub started_at: String,
    pub finished_at: String,
    pub items: BTreeMap<String, usize>,
    pub active_screens: Vec<String>,
    pub screens_without_hits: Vec<String>,
    pub unresolved_genes: BTreeMap<String, usize>,
}

impl IngestSummary {
    pub fn item_count(&self, class_name: &str) -> usize {
        self.items.get(class_name).copied().unwrap_or(0)
    }
}

pub struct Pipeline<R, S> {
    resolver: R,
    context: IngestContext<S>,
    duplicate_screens: DuplicateScreens,
}

impl<R: IdResolver, S: EntitySink> Pipeline<R, S> {
    pub fn new(resolver: R, sink: S, options: PipelineOptions) -> Self {
        Self {
            resolver,
            context: IngestContext::new(sink, options.provenance),
            duplicate_screens: options.duplicate_screens,
        }
    }

    pub fn run_files(
        self,
        screen_details: &Path,
        hits: &Path,
    ) -> Result<IngestSummary, ScreenError> {
        let details = tsv::open(screen_details)?;
        let hits = tsv::open(hits)?;
        self.run(details, hits)
    }

    pub fn run<D, H>(mut self, screen_details: D, hits: H) -> Result<IngestSummary, ScreenError>
    where
        D: IntoIterator<Item = Result<TsvRow, ScreenError>>,
        H: IntoIterator<Item = Result<TsvRow, ScreenError>>,
    {
        let started_at = chrono::Utc::now().to_rfc3339();
        let context = &mut self.context;

        let registry = ScreenRegistry::load(
            screen_details,
            &mut context.publications,
            &mut context.emitter,
            self.duplicate_screens,
        )?;
        let outcome = HitMatrixReader::new(&registry, &self.resolver).load(
            hits,
            &mut context.genes,
            &mut context.emitter,
        )?;
        let report = validate::check(&registry.names(), &outcome.observed)?;

        let items = context
            .emitter
            .counts()
            .iter()
            .map(|(class, count)| (class.name().to_string(), *count))
            .collect();
        let summary = IngestSummary {
            started_at,
            finished_at: chrono::Utc::now().to_rfc3339(),
            items,
            active_screens: outcome.active_names(),
            screens_without_hits: report.without_hits.into_iter().collect(),
            unresolved_genes: context.genes.unresolved().clone(),
        };
        info!(
            screens = registry.len(),
            amplicons = outcome.amplicons,
            hits = outcome.hits,
            unresolved = summary.unresolved_genes.len(),
            "ingestion finished"
        );
        Ok(summary)
    }
}
