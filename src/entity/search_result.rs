use super::model::{ClassEntity, CodeEntity, FieldEntity, MethodEntity};
use super::registry::MetricRegistry;
use crate::errors::{Error, Result};
use std::collections::HashMap;
use std::time::Duration;

/// Every class, method and field found in one analysis scope.
///
/// Produced once per analysis and read by every algorithm; algorithms copy
/// what they need to mutate. Class statistic vectors are derived here from
/// the methods each class owns, so every method of one class must carry a
/// vector of the same dimension.
#[derive(Debug, Clone, Default)]
pub struct EntitySearchResult {
    classes: Vec<ClassEntity>,
    methods: Vec<MethodEntity>,
    fields: Vec<FieldEntity>,
    elapsed: Duration,
    registry: MetricRegistry,
}

impl EntitySearchResult {
    pub fn new(
        classes: Vec<ClassEntity>,
        methods: Vec<MethodEntity>,
        fields: Vec<FieldEntity>,
        elapsed_ms: u64,
    ) -> Result<Self> {
        let classes = derive_statistic_vectors(classes, &methods)?;
        Ok(Self {
            classes,
            methods,
            fields,
            elapsed: Duration::from_millis(elapsed_ms),
            registry: MetricRegistry::default(),
        })
    }

    pub fn with_registry(mut self, registry: MetricRegistry) -> Self {
        self.registry = registry;
        self
    }

    pub fn classes(&self) -> &[ClassEntity] {
        &self.classes
    }

    pub fn methods(&self) -> &[MethodEntity] {
        &self.methods
    }

    pub fn fields(&self) -> &[FieldEntity] {
        &self.fields
    }

    pub fn elapsed(&self) -> Duration {
        self.elapsed
    }

    pub fn registry(&self) -> &MetricRegistry {
        &self.registry
    }

    /// First class with the given qualified name.
    pub fn class(&self, name: &str) -> Option<&ClassEntity> {
        self.classes.iter().find(|c| c.name() == name)
    }

    pub fn method(&self, signature: &str) -> Option<&MethodEntity> {
        self.methods.iter().find(|m| m.signature() == signature)
    }

    pub fn methods_of<'a>(&'a self, class_name: &'a str) -> impl Iterator<Item = &'a MethodEntity> + 'a {
        self.methods.iter().filter(move |m| m.class_name() == class_name)
    }

    pub fn is_empty(&self) -> bool {
        self.classes.is_empty() && self.methods.is_empty() && self.fields.is_empty()
    }
}

fn derive_statistic_vectors(classes: Vec<ClassEntity>, methods: &[MethodEntity]) -> Result<Vec<ClassEntity>> {
    let sums = {
        let mut first_index: HashMap<&str, usize> = HashMap::new();
        for (i, class) in classes.iter().enumerate() {
            first_index.entry(class.name()).or_insert(i);
        }

        let mut sums: Vec<Option<Vec<f64>>> = vec![None; classes.len()];
        for method in methods {
            let Some(&i) = first_index.get(method.class_name()) else {
                continue;
            };
            let vector = method.statistic_vector();
            let sum = sums[i].get_or_insert_with(|| vec![0.0; vector.len()]);
            if sum.len() != vector.len() {
                return Err(Error::DimensionMismatch {
                    left: sum.len(),
                    right: vector.len(),
                });
            }
            sum.iter_mut().zip(vector).for_each(|(acc, v)| *acc += v);
        }
        sums
    };

    Ok(classes
        .into_iter()
        .zip(sums)
        .map(|(class, sum)| class.with_statistic_vector(sum.unwrap_or_default()))
        .collect())
}
