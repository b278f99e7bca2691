//! Model metadata handed to providers while the host builds its model

/// Storage type of a mapped property
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColumnType {
    Boolean,
    Integer,
    BigInt,
    Real,
    Text,
    Uuid,
    Binary,
    Timestamp,
}

/// How a timestamp without an offset is interpreted
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DateTimeKind {
    Utc,
    Local,
}

/// A mapped property of an entity
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PropertyDefinition {
    pub name: String,
    pub column_type: ColumnType,
    /// Explicit column name; `None` lets the naming convention decide
    pub column_name: Option<String>,
    /// Timezone annotation, only meaningful for timestamps
    pub date_time_kind: Option<DateTimeKind>,
}

impl PropertyDefinition {
    pub fn new(name: impl Into<String>, column_type: ColumnType) -> Self {
        Self {
            name: name.into(),
            column_type,
            column_name: None,
            date_time_kind: None,
        }
    }

    #[must_use]
    pub fn with_column_name(mut self, column_name: impl Into<String>) -> Self {
        self.column_name = Some(column_name.into());
        self
    }

    #[must_use]
    pub fn with_date_time_kind(mut self, kind: DateTimeKind) -> Self {
        self.date_time_kind = Some(kind);
        self
    }

    pub fn is_timestamp(&self) -> bool {
        self.column_type == ColumnType::Timestamp
    }

    /// Column name used in the schema
    pub fn effective_column_name(&self) -> &str {
        self.column_name.as_deref().unwrap_or(&self.name)
    }
}

/// A mapped entity
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EntityDefinition {
    pub name: String,
    /// Explicit table name; `None` lets the naming convention decide
    pub table_name: Option<String>,
    pub properties: Vec<PropertyDefinition>,
}

impl EntityDefinition {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            table_name: None,
            properties: Vec::new(),
        }
    }

    #[must_use]
    pub fn with_table_name(mut self, table_name: impl Into<String>) -> Self {
        self.table_name = Some(table_name.into());
        self
    }

    #[must_use]
    pub fn property(mut self, property: PropertyDefinition) -> Self {
        self.properties.push(property);
        self
    }

    /// Table name used in the schema
    pub fn effective_table_name(&self) -> &str {
        self.table_name.as_deref().unwrap_or(&self.name)
    }

    pub fn find_property(&self, name: &str) -> Option<&PropertyDefinition> {
        self.properties.iter().find(|p| p.name == name)
    }
}

/// The host's model, mutated by providers and conventions
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ModelDefinition {
    entities: Vec<EntityDefinition>,
}

impl ModelDefinition {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_entity(&mut self, entity: EntityDefinition) -> &mut Self {
        self.entities.push(entity);
        self
    }

    pub fn entities(&self) -> &[EntityDefinition] {
        &self.entities
    }

    pub fn entities_mut(&mut self) -> &mut [EntityDefinition] {
        &mut self.entities
    }

    pub fn find_entity(&self, name: &str) -> Option<&EntityDefinition> {
        self.entities.iter().find(|e| e.name == name)
    }

    /// Table names in declaration order
    pub fn table_names(&self) -> Vec<String> {
        self.entities
            .iter()
            .map(|e| e.effective_table_name().to_string())
            .collect()
    }

    /// Give every unannotated timestamp the given kind
    ///
    /// Returns the number of properties changed.
    pub fn set_default_date_time_kind(&mut self, kind: DateTimeKind) -> usize {
        let mut changed = 0;
        for property in self
            .entities
            .iter_mut()
            .flat_map(|e| e.properties.iter_mut())
            .filter(|p| p.is_timestamp() && p.date_time_kind.is_none())
        {
            property.date_time_kind = Some(kind);
            changed += 1;
        }
        changed
    }
}
