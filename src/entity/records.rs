//! Serde records describing entity discovery output, and the preparation
//! step that turns them into a normalized [`EntitySearchResult`].

use super::model::{ClassEntity, FieldEntity, MethodEntity, MethodFlags};
use super::properties::RelevantProperties;
use super::registry::{MetricRegistry, NormalizationPolicy};
use super::search_result::EntitySearchResult;
use crate::errors::{Error, Result};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashSet};
use std::io::Read;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ClassRecord {
    pub name: String,
    #[serde(default)]
    pub properties: RelevantProperties,
    #[serde(default)]
    pub metrics: BTreeMap<String, f64>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MethodRecord {
    #[serde(alias = "name")]
    pub signature: String,
    /// Owning class; derived from the signature when absent
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub class_name: Option<String>,
    #[serde(default)]
    pub properties: RelevantProperties,
    #[serde(default)]
    pub metrics: BTreeMap<String, f64>,
    #[serde(flatten)]
    pub flags: MethodFlags,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FieldRecord {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub class_name: Option<String>,
    #[serde(default)]
    pub properties: RelevantProperties,
    #[serde(default)]
    pub metrics: BTreeMap<String, f64>,
}

/// Raw discovery output: entities with properties and sparse metric values.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct EntityRecords {
    #[serde(default)]
    pub classes: Vec<ClassRecord>,
    #[serde(default)]
    pub methods: Vec<MethodRecord>,
    #[serde(default)]
    pub fields: Vec<FieldRecord>,
    #[serde(default)]
    pub elapsed_ms: u64,
}

impl EntityRecords {
    pub fn from_json(contents: &str) -> Result<Self> {
        Ok(serde_json::from_str(contents)?)
    }

    pub fn from_reader<R: Read>(reader: R) -> Result<Self> {
        Ok(serde_json::from_reader(reader)?)
    }

    /// Builds fully formed entities with feature vectors normalized together.
    pub fn prepare(self, policy: NormalizationPolicy) -> Result<EntitySearchResult> {
        self.validate()?;

        let registry = MetricRegistry::from_ids(
            self.classes
                .iter()
                .flat_map(|c| c.metrics.keys())
                .chain(self.methods.iter().flat_map(|m| m.metrics.keys()))
                .chain(self.fields.iter().flat_map(|f| f.metrics.keys()))
                .cloned(),
        );

        let mut vectors: Vec<Vec<f64>> = self
            .classes
            .iter()
            .map(|c| registry.assemble(&c.metrics))
            .chain(self.methods.iter().map(|m| registry.assemble(&m.metrics)))
            .chain(self.fields.iter().map(|f| registry.assemble(&f.metrics)))
            .collect();
        policy.apply(&mut vectors, registry.dimension());

        let mut vectors = vectors.into_iter();
        let classes: Vec<ClassEntity> = self
            .classes
            .into_iter()
            .zip(vectors.by_ref())
            .map(|(record, vector)| ClassEntity::new(record.name, record.properties, vector))
            .collect();
        let methods: Vec<MethodEntity> = self
            .methods
            .into_iter()
            .zip(vectors.by_ref())
            .map(|(record, vector)| {
                let method = MethodEntity::new(record.signature, record.properties, vector)
                    .with_flags(record.flags);
                match record.class_name {
                    Some(class_name) => method.with_class_name(class_name),
                    None => method,
                }
            })
            .collect();
        let fields: Vec<FieldEntity> = self
            .fields
            .into_iter()
            .zip(vectors)
            .map(|(record, vector)| {
                let field = FieldEntity::new(record.name, record.properties, vector);
                match record.class_name {
                    Some(class_name) => field.with_class_name(class_name),
                    None => field,
                }
            })
            .collect();

        log::info!("Generated {} class entities", classes.len());
        log::info!("Generated {} method entities", methods.len());
        log::info!("Generated {} field entities", fields.len());

        Ok(EntitySearchResult::new(classes, methods, fields, self.elapsed_ms)?.with_registry(registry))
    }

    fn validate(&self) -> Result<()> {
        let names = self
            .classes
            .iter()
            .map(|c| c.name.as_str())
            .chain(self.methods.iter().map(|m| m.signature.as_str()))
            .chain(self.fields.iter().map(|f| f.name.as_str()));

        let mut seen = HashSet::new();
        for name in names {
            if name.trim().is_empty() {
                return Err(Error::invalid_input("entity with an empty name"));
            }
            if !seen.insert(name) {
                log::warn!("Entity {} is listed more than once", name);
            }
        }
        Ok(())
    }
}
