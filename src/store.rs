use std::fs;
use std::io::{BufWriter, Write};

use camino::{Utf8Path, Utf8PathBuf};
use tempfile::{Builder, NamedTempFile};

use crate::domain::EntityClass;
use crate::error::ScreenError;
use crate::sink::{EntitySink, Item, ItemIds, ItemRef};

pub struct JsonLinesStore {
    ids: ItemIds,
    destination: Utf8PathBuf,
    writer: BufWriter<NamedTempFile>,
    written: usize,
}

impl JsonLinesStore {
    pub fn create(destination: &Utf8Path) -> Result<Self, ScreenError> {
        let parent = match destination.parent() {
            Some(parent) if !parent.as_str().is_empty() => parent,
            _ => Utf8Path::new("."),
        };
        fs::create_dir_all(parent.as_std_path())
            .map_err(|err| ScreenError::Filesystem(err.to_string()))?;
        let temp = Builder::new()
            .prefix("flyrnai-items")
            .suffix(".jsonl.tmp")
            .tempfile_in(parent.as_std_path())
            .map_err(|err| ScreenError::Filesystem(err.to_string()))?;
        Ok(Self {
            ids: ItemIds::default(),
            destination: destination.to_path_buf(),
            writer: BufWriter::new(temp),
            written: 0,
        })
    }

    pub fn destination(&self) -> &Utf8Path {
        &self.destination
    }

    pub fn written(&self) -> usize {
        self.written
    }

    pub fn finish(self) -> Result<usize, ScreenError> {
        let temp = self
            .writer
            .into_inner()
            .map_err(|err| ScreenError::Filesystem(err.to_string()))?;
        temp.as_file()
            .sync_all()
            .map_err(|err| ScreenError::Filesystem(err.to_string()))?;
        if self.destination.as_std_path().exists() {
            fs::remove_file(self.destination.as_std_path())
                .map_err(|err| ScreenError::Filesystem(err.to_string()))?;
        }
        temp.persist(self.destination.as_std_path())
            .map_err(|err| ScreenError::Filesystem(err.to_string()))?;
        Ok(self.written)
    }
}

impl EntitySink for JsonLinesStore {
    fn create_item(&mut self, class: EntityClass) -> Item {
        Item::new(self.ids.next(), class)
    }

    fn store(&mut self, item: Item) -> Result<ItemRef, ScreenError> {
        serde_json::to_writer(&mut self.writer, &item)
            .map_err(|err| ScreenError::Serialize(err.to_string()))?;
        self.writer
            .write_all(b"\n")
            .map_err(|err| ScreenError::Filesystem(err.to_string()))?;
        self.written += 1;
        Ok(item.identifier().clone())
    }
}

pub fn read_items(path: &Utf8Path) -> Result<Vec<Item>, ScreenError> {
    let content = fs::read_to_string(path.as_std_path()).map_err(|err| ScreenError::InputRead {
        path: path.to_string(),
        message: err.to_string(),
    })?;
    content
        .lines()
        .filter(|line| !line.trim().is_empty())
        .map(|line| {
            serde_json::from_str(line).map_err(|err| ScreenError::Serialize(err.to_string()))
        })
        .collect()
}
