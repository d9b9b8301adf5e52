use std::collections::HashMap;

use crate::domain::EntityClass;
use crate::emit::Emitter;
use crate::error::ScreenError;
use crate::sink::{EntitySink, ItemRef};

#[derive(Debug, Default)]
pub struct PublicationCache {
    publications: HashMap<String, ItemRef>,
}

impl PublicationCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get_or_create<S: EntitySink>(
        &mut self,
        pubmed_id: &str,
        emitter: &mut Emitter<S>,
    ) -> Result<ItemRef, ScreenError> {
        if let Some(publication) = self.publications.get(pubmed_id) {
            return Ok(publication.clone());
        }
        let mut publication = emitter.create(EntityClass::Publication);
        publication.set_attribute("pubMedId", pubmed_id);
        let publication = emitter.store(publication)?;
        self.publications
            .insert(pubmed_id.to_string(), publication.clone());
        Ok(publication)
    }

    pub fn len(&self) -> usize {
        self.publications.len()
    }

    pub fn is_empty(&self) -> bool {
        self.publications.is_empty()
    }
}
