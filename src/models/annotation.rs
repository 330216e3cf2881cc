use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Where a word of the live text came from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Provenance {
    /// Present in the recognizer transcript
    Unchanged,
    /// Introduced by the correction pipeline
    AiAdded,
    /// Typed by the user since the last saved text
    Manual,
}

/// Classification of one word of the live text
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DiffAnnotation {
    /// Byte offset of the word in the live text
    pub offset: usize,
    pub provenance: Provenance,
    /// Transcript word this one replaced, if any
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub original_word: Option<String>,
}

impl DiffAnnotation {
    pub fn is_manual(&self) -> bool {
        self.provenance == Provenance::Manual
    }

    pub fn is_ai_added(&self) -> bool {
        self.provenance == Provenance::AiAdded
    }

    pub fn is_changed(&self) -> bool {
        self.provenance != Provenance::Unchanged
    }
}

/// Annotations for every word of one live snapshot, keyed by offset
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DiffAnnotations {
    by_offset: BTreeMap<usize, DiffAnnotation>,
}

impl DiffAnnotations {
    pub fn insert(&mut self, annotation: DiffAnnotation) {
        self.by_offset.insert(annotation.offset, annotation);
    }

    pub fn get(&self, offset: usize) -> Option<&DiffAnnotation> {
        self.by_offset.get(&offset)
    }

    /// Provenance of the word at `offset`, unchanged when unknown
    pub fn provenance(&self, offset: usize) -> Provenance {
        self.get(offset)
            .map(|a| a.provenance)
            .unwrap_or(Provenance::Unchanged)
    }

    pub fn iter(&self) -> impl Iterator<Item = &DiffAnnotation> {
        self.by_offset.values()
    }

    /// Annotations that are not `Unchanged`
    pub fn changed(&self) -> impl Iterator<Item = &DiffAnnotation> {
        self.iter().filter(|a| a.is_changed())
    }

    pub fn count(&self, provenance: Provenance) -> usize {
        self.iter().filter(|a| a.provenance == provenance).count()
    }

    pub fn len(&self) -> usize {
        self.by_offset.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_offset.is_empty()
    }
}
