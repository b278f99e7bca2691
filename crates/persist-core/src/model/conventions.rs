//! Model conventions applied after the model is defined

use super::ModelDefinition;

/// A rule that rewrites model metadata
pub trait ModelConvention: Send + Sync {
    fn name(&self) -> &str;

    fn apply(&self, model: &mut ModelDefinition);
}

/// Ordered set of conventions contributed by the host and the provider
#[derive(Default)]
pub struct ConventionBuilder {
    conventions: Vec<Box<dyn ModelConvention>>,
}

impl std::fmt::Debug for ConventionBuilder {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_list().entries(self.names()).finish()
    }
}

impl ConventionBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, convention: impl ModelConvention + 'static) -> &mut Self {
        self.conventions.push(Box::new(convention));
        self
    }

    pub fn len(&self) -> usize {
        self.conventions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.conventions.is_empty()
    }

    pub fn names(&self) -> Vec<&str> {
        self.conventions.iter().map(|c| c.name()).collect()
    }

    /// Apply every convention in insertion order
    pub fn apply_all(&self, model: &mut ModelDefinition) {
        for convention in &self.conventions {
            tracing::debug!(convention = convention.name(), "Applying model convention");
            convention.apply(model);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{EntityDefinition, NamingConvention};

    struct UppercaseTables;

    impl ModelConvention for UppercaseTables {
        fn name(&self) -> &str {
            "uppercase-tables"
        }

        fn apply(&self, model: &mut ModelDefinition) {
            for entity in model.entities_mut() {
                let upper = entity.effective_table_name().to_uppercase();
                entity.table_name = Some(upper);
            }
        }
    }

    #[test]
    fn test_conventions_apply_in_order() {
        let mut model = ModelDefinition::new();
        model.add_entity(EntityDefinition::new("MediaItem"));

        let mut builder = ConventionBuilder::new();
        builder.add(NamingConvention::SnakeCase).add(UppercaseTables);
        assert_eq!(builder.names(), vec!["snake-case", "uppercase-tables"]);

        builder.apply_all(&mut model);
        assert_eq!(model.table_names(), vec!["MEDIA_ITEM"]);
    }

    #[test]
    fn test_empty_builder() {
        let builder = ConventionBuilder::new();
        assert!(builder.is_empty());
        assert_eq!(builder.len(), 0);
    }
}
