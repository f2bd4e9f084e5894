use super::properties::RelevantProperties;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::Arc;

/// Which kind of source element an entity wraps
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EntityKind {
    Class,
    Method,
    Field,
}

impl fmt::Display for EntityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EntityKind::Class => write!(f, "class"),
            EntityKind::Method => write!(f, "method"),
            EntityKind::Field => write!(f, "field"),
        }
    }
}

/// Capabilities shared by classes, methods and fields.
pub trait CodeEntity: Send + Sync {
    /// Qualified name; for methods this is the full signature.
    fn identifier(&self) -> &str;

    /// Qualified name of the class that contains this entity.
    fn class_name(&self) -> &str;

    /// Whether a move refactoring may relocate this entity.
    fn is_movable(&self) -> bool;

    fn kind(&self) -> EntityKind;

    fn properties(&self) -> &RelevantProperties;

    /// Normalized feature vector, one value per registered metric.
    fn vector(&self) -> &[f64];

    fn is_field(&self) -> bool {
        self.kind() == EntityKind::Field
    }
}

/// Qualified name of the class owning a member, e.g. `a.B` for `a.B.m(int)`.
///
/// Returns an empty string for names without a qualifier.
pub fn owner_class_of(member: &str) -> &str {
    let without_params = member.split('(').next().unwrap_or(member);
    without_params
        .rfind('.')
        .map(|idx| &without_params[..idx])
        .unwrap_or("")
}

/// Simple name of a member, e.g. `m` for `a.B.m(int)`.
pub fn simple_name_of(member: &str) -> &str {
    let without_params = member.split('(').next().unwrap_or(member);
    without_params
        .rfind('.')
        .map(|idx| &without_params[idx + 1..])
        .unwrap_or(without_params)
}

fn empty_vector() -> Arc<[f64]> {
    Arc::from(Vec::new())
}

#[derive(Debug, Clone, PartialEq)]
pub struct ClassEntity {
    name: String,
    properties: RelevantProperties,
    vector: Arc<[f64]>,
    statistic_vector: Arc<[f64]>,
}

impl ClassEntity {
    pub fn new(name: impl Into<String>, properties: RelevantProperties, vector: Vec<f64>) -> Self {
        Self {
            name: name.into(),
            properties,
            vector: vector.into(),
            statistic_vector: empty_vector(),
        }
    }

    pub fn with_statistic_vector(mut self, statistic_vector: Vec<f64>) -> Self {
        self.statistic_vector = statistic_vector.into();
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Aggregate of the statistic vectors of the methods the class owns.
    ///
    /// Empty when the class owns no method.
    pub fn statistic_vector(&self) -> &[f64] {
        &self.statistic_vector
    }

    /// Independent copy whose property set can be mutated freely.
    pub fn copy(&self) -> Self {
        Self {
            properties: self.properties.copy(),
            ..self.clone()
        }
    }

    pub fn add_to_class(&mut self, method: &str) {
        self.properties.add_not_override_method(method);
    }

    pub fn remove_from_class(&mut self, method: &str) -> bool {
        self.properties.remove_method(method)
    }

    pub fn owns_method(&self, method: &str) -> bool {
        self.properties.contains_method(method)
    }
}

impl CodeEntity for ClassEntity {
    fn identifier(&self) -> &str {
        &self.name
    }

    fn class_name(&self) -> &str {
        &self.name
    }

    fn is_movable(&self) -> bool {
        true
    }

    fn kind(&self) -> EntityKind {
        EntityKind::Class
    }

    fn properties(&self) -> &RelevantProperties {
        &self.properties
    }

    fn vector(&self) -> &[f64] {
        &self.vector
    }
}

/// Source-level traits of a method that decide whether it can move
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MethodFlags {
    #[serde(default)]
    pub is_override: bool,
    #[serde(default)]
    pub is_abstract: bool,
    #[serde(default)]
    pub is_constructor: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub struct MethodEntity {
    signature: String,
    class_name: String,
    properties: RelevantProperties,
    vector: Arc<[f64]>,
    flags: MethodFlags,
}

impl MethodEntity {
    /// Creates a method whose owning class is derived from its signature.
    pub fn new(signature: impl Into<String>, properties: RelevantProperties, vector: Vec<f64>) -> Self {
        let signature = signature.into();
        let class_name = owner_class_of(&signature).to_string();
        Self {
            signature,
            class_name,
            properties,
            vector: vector.into(),
            flags: MethodFlags::default(),
        }
    }

    pub fn with_class_name(mut self, class_name: impl Into<String>) -> Self {
        self.class_name = class_name.into();
        self
    }

    pub fn with_flags(mut self, flags: MethodFlags) -> Self {
        self.flags = flags;
        self
    }

    pub fn signature(&self) -> &str {
        &self.signature
    }

    pub fn simple_name(&self) -> &str {
        simple_name_of(&self.signature)
    }

    pub fn flags(&self) -> MethodFlags {
        self.flags
    }

    /// A method's statistic vector is its normalized feature vector.
    pub fn statistic_vector(&self) -> &[f64] {
        &self.vector
    }
}

impl CodeEntity for MethodEntity {
    fn identifier(&self) -> &str {
        &self.signature
    }

    fn class_name(&self) -> &str {
        &self.class_name
    }

    fn is_movable(&self) -> bool {
        !(self.flags.is_override || self.flags.is_abstract || self.flags.is_constructor)
    }

    fn kind(&self) -> EntityKind {
        EntityKind::Method
    }

    fn properties(&self) -> &RelevantProperties {
        &self.properties
    }

    fn vector(&self) -> &[f64] {
        &self.vector
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct FieldEntity {
    name: String,
    class_name: String,
    properties: RelevantProperties,
    vector: Arc<[f64]>,
}

impl FieldEntity {
    pub fn new(name: impl Into<String>, properties: RelevantProperties, vector: Vec<f64>) -> Self {
        let name = name.into();
        let class_name = owner_class_of(&name).to_string();
        Self {
            name,
            class_name,
            properties,
            vector: vector.into(),
        }
    }

    pub fn with_class_name(mut self, class_name: impl Into<String>) -> Self {
        self.class_name = class_name.into();
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }
}

impl CodeEntity for FieldEntity {
    fn identifier(&self) -> &str {
        &self.name
    }

    fn class_name(&self) -> &str {
        &self.class_name
    }

    fn is_movable(&self) -> bool {
        true
    }

    fn kind(&self) -> EntityKind {
        EntityKind::Field
    }

    fn properties(&self) -> &RelevantProperties {
        &self.properties
    }

    fn vector(&self) -> &[f64] {
        &self.vector
    }
}
