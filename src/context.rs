use crate::emit::{Emitter, Provenance};
use crate::gene::GeneResolver;
use crate::publication::PublicationCache;
use crate::sink::EntitySink;

pub struct IngestContext<S> {
    pub emitter: Emitter<S>,
    pub publications: PublicationCache,
    pub genes: GeneResolver,
}

impl<S: EntitySink> IngestContext<S> {
    pub fn new(sink: S, provenance: Provenance) -> Self {
        Self {
            emitter: Emitter::new(sink, provenance),
            publications: PublicationCache::new(),
            genes: GeneResolver::new(),
        }
    }

    pub fn into_sink(self) -> S {
        self.emitter.into_sink()
    }
}
