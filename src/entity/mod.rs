//! Entity model: classes, methods and fields with their relevant properties
//! and normalized feature vectors.
//!
//! Entities are built fully formed in one step, either directly or from
//! discovery [`records`], and are not mutated once an
//! [`EntitySearchResult`] has been produced. Algorithms that need to
//! reassign membership work on a [`ClassArena`] copy.

pub mod arena;
pub mod model;
pub mod properties;
pub mod records;
pub mod registry;
pub mod search_result;

pub use arena::ClassArena;
pub use model::{
    owner_class_of, simple_name_of, ClassEntity, CodeEntity, EntityKind, FieldEntity, MethodEntity,
    MethodFlags,
};
pub use properties::{RelevantProperties, DEFAULT_PROPERTY_WEIGHT};
pub use records::{ClassRecord, EntityRecords, FieldRecord, MethodRecord};
pub use registry::{MetricRegistry, NormalizationPolicy};
pub use search_result::EntitySearchResult;
