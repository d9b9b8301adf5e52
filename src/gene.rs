use std::collections::{BTreeMap, HashMap};

use tracing::info;

use crate::domain::{EntityClass, TAXON_ID};
use crate::emit::Emitter;
use crate::error::ScreenError;
use crate::resolver::IdResolver;
use crate::sink::{EntitySink, ItemRef};

#[derive(Debug, Default)]
pub struct GeneResolver {
    genes: HashMap<String, ItemRef>,
    unresolved: BTreeMap<String, usize>,
}

impl GeneResolver {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn resolve<R, S>(
        &mut self,
        symbol: &str,
        resolver: &R,
        emitter: &mut Emitter<S>,
    ) -> Result<Option<ItemRef>, ScreenError>
    where
        R: IdResolver + ?Sized,
        S: EntitySink,
    {
        let symbol = symbol.trim();
        if symbol.is_empty() {
            return Err(ScreenError::EmptyGeneSymbol);
        }

        let candidates = resolver.resolve(TAXON_ID, symbol);
        if candidates.len() != 1 {
            info!(
                symbol,
                count = candidates.len(),
                candidates = ?candidates,
                "failed to resolve gene to one identifier, ignoring gene"
            );
            self.unresolved
                .insert(symbol.to_string(), candidates.len());
            return Ok(None);
        }
        let Some(primary_id) = candidates.into_iter().next() else {
            return Ok(None);
        };

        if let Some(gene) = self.genes.get(&primary_id) {
            return Ok(Some(gene.clone()));
        }
        let organism = emitter.organism()?;
        let mut gene = emitter.create(EntityClass::Gene);
        gene.set_attribute("primaryIdentifier", primary_id.as_str());
        gene.set_reference("organism", &organism);
        let gene = emitter.store(gene)?;
        self.genes.insert(primary_id, gene.clone());
        Ok(Some(gene))
    }

    pub fn gene(&self, primary_id: &str) -> Option<&ItemRef> {
        self.genes.get(primary_id)
    }

    pub fn len(&self) -> usize {
        self.genes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.genes.is_empty()
    }

    pub fn unresolved(&self) -> &BTreeMap<String, usize> {
        &self.unresolved
    }
}
