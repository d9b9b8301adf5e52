use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::domain::EntityClass;
use crate::error::ScreenError;

#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ItemRef(String);

impl ItemRef {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ItemRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[derive(Debug, Clone, Default)]
pub struct ItemIds {
    last: u64,
}

impl ItemIds {
    pub fn next(&mut self) -> ItemRef {
        self.last += 1;
        ItemRef(format!("0_{}", self.last))
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Item {
    identifier: ItemRef,
    class: EntityClass,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    attributes: BTreeMap<String, String>,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    references: BTreeMap<String, ItemRef>,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    collections: BTreeMap<String, Vec<ItemRef>>,
}

impl Item {
    pub fn new(identifier: ItemRef, class: EntityClass) -> Self {
        Self {
            identifier,
            class,
            attributes: BTreeMap::new(),
            references: BTreeMap::new(),
            collections: BTreeMap::new(),
        }
    }

    pub fn identifier(&self) -> &ItemRef {
        &self.identifier
    }

    pub fn class(&self) -> EntityClass {
        self.class
    }

    pub fn set_attribute(&mut self, name: &str, value: impl Into<String>) {
        self.attributes.insert(name.to_string(), value.into());
    }

    pub fn set_reference(&mut self, name: &str, target: &ItemRef) {
        self.references.insert(name.to_string(), target.clone());
    }

    pub fn add_to_collection(&mut self, name: &str, target: &ItemRef) {
        let members = self.collections.entry(name.to_string()).or_default();
        if !members.contains(target) {
            members.push(target.clone());
        }
    }

    pub fn attribute(&self, name: &str) -> Option<&str> {
        self.attributes.get(name).map(String::as_str)
    }

    pub fn reference(&self, name: &str) -> Option<&ItemRef> {
        self.references.get(name)
    }

    pub fn collection(&self, name: &str) -> &[ItemRef] {
        self.collections
            .get(name)
            .map(Vec::as_slice)
            .unwrap_or_default()
    }
}

pub trait EntitySink {
    fn create_item(&mut self, class: EntityClass) -> Item;
    fn store(&mut self, item: Item) -> Result<ItemRef, ScreenError>;
}

impl<T: EntitySink + ?Sized> EntitySink for &mut T {
    fn create_item(&mut self, class: EntityClass) -> Item {
        (**self).create_item(class)
    }

    fn store(&mut self, item: Item) -> Result<ItemRef, ScreenError> {
        (**self).store(item)
    }
}

#[derive(Debug, Default)]
pub struct MemorySink {
    ids: ItemIds,
    items: Vec<Item>,
}

impl MemorySink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn items(&self) -> &[Item] {
        &self.items
    }

    pub fn of_class(&self, class: EntityClass) -> impl Iterator<Item = &Item> {
        self.items.iter().filter(move |item| item.class() == class)
    }

    pub fn count(&self, class: EntityClass) -> usize {
        self.of_class(class).count()
    }

    pub fn get(&self, identifier: &ItemRef) -> Option<&Item> {
        self.items
            .iter()
            .find(|item| item.identifier() == identifier)
    }
}

impl EntitySink for MemorySink {
    fn create_item(&mut self, class: EntityClass) -> Item {
        Item::new(self.ids.next(), class)
    }

    fn store(&mut self, item: Item) -> Result<ItemRef, ScreenError> {
        let identifier = item.identifier().clone();
        self.items.push(item);
        Ok(identifier)
    }
}
