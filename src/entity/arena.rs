//! Class records indexed by name, with an explicit "apply move" operation.
//!
//! Move-based algorithms that let one proposal influence the next work on an
//! arena snapshot instead of the shared [`EntitySearchResult`]. Each
//! [`ClassArena::apply_move`] returns a new snapshot; property maps are
//! persistent, so unchanged classes share their data with the previous one.

use super::model::ClassEntity;
use super::search_result::EntitySearchResult;
use std::collections::HashMap;
use std::sync::Arc;

#[derive(Debug, Clone, Default)]
pub struct ClassArena {
    classes: Vec<ClassEntity>,
    index: Arc<HashMap<String, usize>>,
}

impl ClassArena {
    /// Copies every class of the search result into a fresh arena.
    pub fn from_result(entities: &EntitySearchResult) -> Self {
        Self::from_classes(entities.classes())
    }

    pub fn from_classes(classes: &[ClassEntity]) -> Self {
        let classes: Vec<ClassEntity> = classes.iter().map(ClassEntity::copy).collect();
        let mut index = HashMap::with_capacity(classes.len());
        for (i, class) in classes.iter().enumerate() {
            index.entry(class.name().to_string()).or_insert(i);
        }
        Self {
            classes,
            index: Arc::new(index),
        }
    }

    pub fn classes(&self) -> &[ClassEntity] {
        &self.classes
    }

    pub fn get(&self, name: &str) -> Option<&ClassEntity> {
        self.index.get(name).map(|&i| &self.classes[i])
    }

    pub fn len(&self) -> usize {
        self.classes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.classes.is_empty()
    }

    /// Returns a snapshot where `unit` left `from` and joined `to`.
    ///
    /// Unknown class names are ignored on their side of the move.
    pub fn apply_move(&self, unit: &str, from: &str, to: &str) -> ClassArena {
        let mut next = self.clone();
        if let Some(&i) = self.index.get(from) {
            next.classes[i].remove_from_class(unit);
        }
        if let Some(&i) = self.index.get(to) {
            next.classes[i].add_to_class(unit);
        }
        next
    }
}
