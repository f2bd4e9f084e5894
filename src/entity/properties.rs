//! Weighted property sets used as the basis of entity similarity.
//!
//! A property is a class, a field or a method that has some relation to the
//! entity owning the set. Each property carries a weight (at least 1) that
//! reflects how important the relation is. Weights follow "upsert-max"
//! semantics: offering a weight for a key that already has a larger one is a
//! no-op, so a weight never decreases and is never summed.
//!
//! # Override methods
//!
//! Override methods participate in [`RelevantProperties::size_of_intersection`]
//! and in the shared-key correction of [`RelevantProperties::size_of_union`],
//! but they are *not* counted by [`RelevantProperties::size`]. Every accuracy
//! score downstream depends on this asymmetry, so it is kept as-is.
//!
//! The maps are persistent (`im`), which makes [`RelevantProperties::copy`]
//! cheap and lets class snapshots share structure.

use im::HashMap;
use serde::{Deserialize, Serialize};

/// Weight given to a property when none is specified
pub const DEFAULT_PROPERTY_WEIGHT: u32 = 1;

type WeightMap = HashMap<String, u32>;

/// A weighted multiset of the things an entity relates to.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RelevantProperties {
    #[serde(default)]
    classes: WeightMap,
    #[serde(default)]
    fields: WeightMap,
    #[serde(default)]
    not_override_methods: WeightMap,
    #[serde(default)]
    override_methods: WeightMap,
}

fn upsert_max(map: &mut WeightMap, key: String, weight: u32) {
    let weight = weight.max(DEFAULT_PROPERTY_WEIGHT);
    if map.get(&key).copied().unwrap_or(0) < weight {
        map.insert(key, weight);
    }
}

fn weighted_size(map: &WeightMap) -> i64 {
    map.values().map(|&w| i64::from(w)).sum()
}

fn shared_weight(m1: &WeightMap, m2: &WeightMap, f: fn(u32, u32) -> u32) -> i64 {
    m1.iter()
        .filter_map(|(key, &w1)| m2.get(key).map(|&w2| i64::from(f(w1, w2))))
        .sum()
}

impl RelevantProperties {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_class(&mut self, class: impl Into<String>) {
        self.add_class_weighted(class, DEFAULT_PROPERTY_WEIGHT);
    }

    pub fn add_class_weighted(&mut self, class: impl Into<String>, weight: u32) {
        upsert_max(&mut self.classes, class.into(), weight);
    }

    pub fn add_field(&mut self, field: impl Into<String>) {
        self.add_field_weighted(field, DEFAULT_PROPERTY_WEIGHT);
    }

    pub fn add_field_weighted(&mut self, field: impl Into<String>, weight: u32) {
        upsert_max(&mut self.fields, field.into(), weight);
    }

    pub fn add_not_override_method(&mut self, method: impl Into<String>) {
        self.add_not_override_method_weighted(method, DEFAULT_PROPERTY_WEIGHT);
    }

    pub fn add_not_override_method_weighted(&mut self, method: impl Into<String>, weight: u32) {
        upsert_max(&mut self.not_override_methods, method.into(), weight);
    }

    pub fn add_override_method(&mut self, method: impl Into<String>) {
        self.add_override_method_weighted(method, DEFAULT_PROPERTY_WEIGHT);
    }

    pub fn add_override_method_weighted(&mut self, method: impl Into<String>, weight: u32) {
        upsert_max(&mut self.override_methods, method.into(), weight);
    }

    /// Removes a method from the non-override set, returning whether it was present.
    pub fn remove_method(&mut self, method: &str) -> bool {
        self.not_override_methods.remove(method).is_some()
    }

    /// Builder-style variant of [`Self::add_class_weighted`].
    pub fn with_class(mut self, class: impl Into<String>, weight: u32) -> Self {
        self.add_class_weighted(class, weight);
        self
    }

    /// Builder-style variant of [`Self::add_field_weighted`].
    pub fn with_field(mut self, field: impl Into<String>, weight: u32) -> Self {
        self.add_field_weighted(field, weight);
        self
    }

    /// Builder-style variant of [`Self::add_not_override_method_weighted`].
    pub fn with_method(mut self, method: impl Into<String>, weight: u32) -> Self {
        self.add_not_override_method_weighted(method, weight);
        self
    }

    /// Builder-style variant of [`Self::add_override_method_weighted`].
    pub fn with_override_method(mut self, method: impl Into<String>, weight: u32) -> Self {
        self.add_override_method_weighted(method, weight);
        self
    }

    pub fn classes(&self) -> impl Iterator<Item = &str> {
        self.classes.keys().map(String::as_str)
    }

    pub fn fields(&self) -> impl Iterator<Item = &str> {
        self.fields.keys().map(String::as_str)
    }

    pub fn not_override_methods(&self) -> impl Iterator<Item = &str> {
        self.not_override_methods.keys().map(String::as_str)
    }

    pub fn override_methods(&self) -> impl Iterator<Item = &str> {
        self.override_methods.keys().map(String::as_str)
    }

    pub fn contains_class(&self, class: &str) -> bool {
        self.classes.contains_key(class)
    }

    pub fn contains_method(&self, method: &str) -> bool {
        self.not_override_methods.contains_key(method)
    }

    pub fn number_of_classes(&self) -> usize {
        self.classes.len()
    }

    pub fn number_of_methods(&self) -> usize {
        self.not_override_methods.len()
    }

    /// Combined weight of a key across classes, fields and non-override methods.
    pub fn weight(&self, name: &str) -> u32 {
        [&self.classes, &self.not_override_methods, &self.fields]
            .iter()
            .map(|map| map.get(name).copied().unwrap_or(0))
            .sum()
    }

    /// Sum of weights of classes, fields and non-override methods.
    pub fn size(&self) -> i64 {
        weighted_size(&self.classes)
            + weighted_size(&self.fields)
            + weighted_size(&self.not_override_methods)
    }

    /// Sum of `min(w1, w2)` over keys shared in any of the four maps.
    pub fn size_of_intersection(&self, other: &RelevantProperties) -> i64 {
        self.shared_across_maps(other, u32::min)
    }

    /// `size(self) + size(other)` minus `max(w1, w2)` over shared keys.
    ///
    /// Can be negative when the two sets share only override methods.
    pub fn size_of_union(&self, other: &RelevantProperties) -> i64 {
        self.size() + other.size() - self.shared_across_maps(other, u32::max)
    }

    /// Independent snapshot; later mutation of either side is not visible to the other.
    pub fn copy(&self) -> Self {
        self.clone()
    }

    fn shared_across_maps(&self, other: &RelevantProperties, f: fn(u32, u32) -> u32) -> i64 {
        shared_weight(&self.classes, &other.classes, f)
            + shared_weight(&self.not_override_methods, &other.not_override_methods, f)
            + shared_weight(&self.override_methods, &other.override_methods, f)
            + shared_weight(&self.fields, &other.fields, f)
    }
}
