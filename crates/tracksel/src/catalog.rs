use serde::{Deserialize, Serialize};

use crate::{error::TrackSelResult, format::VideoFormat};

/// Representations of the same content that a player can swap between.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SwitchableSet {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub formats: Vec<VideoFormat>,
}

impl SwitchableSet {
    pub fn new(formats: Vec<VideoFormat>) -> Self {
        Self { id: None, formats }
    }

    pub fn len(&self) -> usize {
        self.formats.len()
    }

    pub fn is_empty(&self) -> bool {
        self.formats.is_empty()
    }

    pub fn format(&self, index: usize) -> &VideoFormat {
        &self.formats[index]
    }

    pub fn iter(&self) -> impl Iterator<Item = &VideoFormat> {
        self.formats.iter()
    }
}

impl FromIterator<VideoFormat> for SwitchableSet {
    fn from_iter<T: IntoIterator<Item = VideoFormat>>(iter: T) -> Self {
        Self::new(iter.into_iter().collect())
    }
}

/// Every video switchable set available to the current playback session.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Catalog {
    pub sets: Vec<SwitchableSet>,
}

impl Catalog {
    pub fn new(sets: Vec<SwitchableSet>) -> Self {
        Self { sets }
    }

    pub fn from_json(data: &str) -> TrackSelResult<Self> {
        let catalog: Catalog = serde_json::from_str(data)?;
        for (index, set) in catalog.sets.iter().enumerate() {
            if set.is_empty() {
                log::warn!("Switchable set {index} has no representation.");
            }
        }
        Ok(catalog)
    }

    pub fn len(&self) -> usize {
        self.sets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sets.is_empty()
    }

    pub fn set(&self, index: usize) -> &SwitchableSet {
        &self.sets[index]
    }

    pub fn iter(&self) -> impl Iterator<Item = &SwitchableSet> {
        self.sets.iter()
    }
}
