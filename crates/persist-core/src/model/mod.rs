//! Model metadata and conventions

mod conventions;
mod definition;
mod naming;

pub use conventions::{ConventionBuilder, ModelConvention};
pub use definition::{
    ColumnType, DateTimeKind, EntityDefinition, ModelDefinition, PropertyDefinition,
};
pub use naming::{to_snake_case, NamingConvention};
