use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::domain::{DEFAULT_DATA_SET, DEFAULT_DATA_SOURCE, EntityClass, TAXON_ID};
use crate::error::ScreenError;
use crate::sink::{EntitySink, Item, ItemRef};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Provenance {
    pub data_source: String,
    pub data_set: String,
}

impl Default for Provenance {
    fn default() -> Self {
        Self {
            data_source: DEFAULT_DATA_SOURCE.to_string(),
            data_set: DEFAULT_DATA_SET.to_string(),
        }
    }
}

pub struct Emitter<S> {
    sink: S,
    provenance: Provenance,
    organism: Option<ItemRef>,
    data_set: Option<ItemRef>,
    counts: BTreeMap<EntityClass, usize>,
}

impl<S: EntitySink> Emitter<S> {
    pub fn new(sink: S, provenance: Provenance) -> Self {
        Self {
            sink,
            provenance,
            organism: None,
            data_set: None,
            counts: BTreeMap::new(),
        }
    }

    pub fn create(&mut self, class: EntityClass) -> Item {
        self.sink.create_item(class)
    }

    pub fn store(&mut self, mut item: Item) -> Result<ItemRef, ScreenError> {
        if item.class().is_bio_entity() {
            let data_set = self.data_set()?;
            item.add_to_collection("dataSets", &data_set);
        }
        let class = item.class();
        let identifier = self.sink.store(item)?;
        *self.counts.entry(class).or_default() += 1;
        Ok(identifier)
    }

    pub fn organism(&mut self) -> Result<ItemRef, ScreenError> {
        if let Some(organism) = &self.organism {
            return Ok(organism.clone());
        }
        let mut organism = self.create(EntityClass::Organism);
        organism.set_attribute("taxonId", TAXON_ID);
        let organism = self.store(organism)?;
        self.organism = Some(organism.clone());
        Ok(organism)
    }

    pub fn data_set(&mut self) -> Result<ItemRef, ScreenError> {
        if let Some(data_set) = &self.data_set {
            return Ok(data_set.clone());
        }
        let mut source = self.create(EntityClass::DataSource);
        source.set_attribute("name", self.provenance.data_source.clone());
        let source = self.store(source)?;

        let mut data_set = self.create(EntityClass::DataSet);
        data_set.set_attribute("name", self.provenance.data_set.clone());
        data_set.set_reference("dataSource", &source);
        let data_set = self.store(data_set)?;
        self.data_set = Some(data_set.clone());
        Ok(data_set)
    }

    pub fn counts(&self) -> &BTreeMap<EntityClass, usize> {
        &self.counts
    }

    pub fn count(&self, class: EntityClass) -> usize {
        self.counts.get(&class).copied().unwrap_or(0)
    }

    pub fn sink(&self) -> &S {
        &self.sink
    }

    pub fn into_sink(self) -> S {
        self.sink
    }
}
