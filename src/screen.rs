use std::collections::{BTreeSet, HashMap};

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::domain::{DETAILS_HEADER_MARKER, EntityClass};
use crate::emit::Emitter;
use crate::error::ScreenError;
use crate::publication::PublicationCache;
use crate::sink::{EntitySink, ItemRef};
use crate::tsv::TsvRow;

pub const SCREEN_DETAILS_COLUMNS: usize = 5;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum DuplicateScreens {
    #[default]
    LastWins,
    Reject,
}

#[derive(Debug, Clone, Default)]
pub struct ScreenRegistry {
    screens: HashMap<String, ItemRef>,
}

impl ScreenRegistry {
    pub fn load<I, S>(
        rows: I,
        publications: &mut PublicationCache,
        emitter: &mut Emitter<S>,
        duplicates: DuplicateScreens,
    ) -> Result<Self, ScreenError>
    where
        I: IntoIterator<Item = Result<TsvRow, ScreenError>>,
        S: EntitySink,
    {
        let mut registry = Self::default();
        for row in rows {
            let row = row?;
            if row.len() != SCREEN_DETAILS_COLUMNS {
                return Err(ScreenError::MalformedRow {
                    file: "screen details".to_string(),
                    line: row.line,
                    expected: SCREEN_DETAILS_COLUMNS,
                    actual: row.len(),
                });
            }
            let pubmed_id = row.field(0);
            if pubmed_id == DETAILS_HEADER_MARKER {
                debug!(line = row.line, "skipping screen details header");
                continue;
            }
            let name = row.field(2);
            if name.is_empty() {
                debug!(line = row.line, "skipping screen details row without a name");
                continue;
            }
            if registry.screens.contains_key(name) {
                if duplicates == DuplicateScreens::Reject {
                    return Err(ScreenError::DuplicateScreen(name.to_string()));
                }
                debug!(screen = name, line = row.line, "replacing earlier screen");
            }

            let organism = emitter.organism()?;
            let publication = if pubmed_id.is_empty() {
                None
            } else {
                Some(publications.get_or_create(pubmed_id, emitter)?)
            };

            let mut screen = emitter.create(EntityClass::Screen);
            screen.set_attribute("name", name);
            screen.set_attribute("cellLine", row.field(3));
            let description = row.field(4);
            if !description.is_empty() {
                screen.set_attribute("analysisDescription", description);
            }
            screen.set_reference("organism", &organism);
            if let Some(publication) = &publication {
                screen.set_reference("publication", publication);
            }
            let screen = emitter.store(screen)?;
            registry.screens.insert(name.to_string(), screen);
        }
        info!(
            screens = registry.len(),
            publications = publications.len(),
            "loaded screen details"
        );
        Ok(registry)
    }

    pub fn get(&self, name: &str) -> Option<&ItemRef> {
        self.screens.get(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.screens.contains_key(name)
    }

    pub fn names(&self) -> BTreeSet<String> {
        self.screens.keys().cloned().collect()
    }

    pub fn len(&self) -> usize {
        self.screens.len()
    }

    pub fn is_empty(&self) -> bool {
        self.screens.is_empty()
    }
}
