//! Naming conventions mapping domain identifiers to schema identifiers

use super::{ModelConvention, ModelDefinition};

/// Identifier rewriting rule selected by the provider
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum NamingConvention {
    /// Schema names equal domain names
    #[default]
    Identity,
    /// `MediaItemId` becomes `media_item_id`
    SnakeCase,
}

impl NamingConvention {
    pub fn rewrite(&self, name: &str) -> String {
        match self {
            Self::Identity => name.to_string(),
            Self::SnakeCase => to_snake_case(name),
        }
    }
}

impl ModelConvention for NamingConvention {
    fn name(&self) -> &str {
        match self {
            Self::Identity => "identity",
            Self::SnakeCase => "snake-case",
        }
    }

    fn apply(&self, model: &mut ModelDefinition) {
        for entity in model.entities_mut() {
            if entity.table_name.is_none() {
                entity.table_name = Some(self.rewrite(&entity.name));
            }
            for property in &mut entity.properties {
                if property.column_name.is_none() {
                    property.column_name = Some(self.rewrite(&property.name));
                }
            }
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum CharClass {
    Upper,
    Lower,
    Digit,
    Separator,
}

/// Convert an identifier to snake case
///
/// An underscore goes before an uppercase letter that follows a lowercase
/// letter or a separator, and before the last capital of an acronym when a
/// lowercase letter follows it. Digits never start a new word. Characters
/// other than letters, digits and `_` act as word separators.
pub fn to_snake_case(name: &str) -> String {
    let chars: Vec<char> = name.chars().collect();
    let mut out = String::with_capacity(name.len() + name.len() / 5);
    let mut previous: Option<CharClass> = None;

    for (index, &c) in chars.iter().enumerate() {
        if c == '_' {
            out.push('_');
            previous = None;
            continue;
        }

        let class = if c.is_uppercase() {
            CharClass::Upper
        } else if c.is_lowercase() {
            CharClass::Lower
        } else if c.is_numeric() {
            CharClass::Digit
        } else {
            if previous.is_some() {
                previous = Some(CharClass::Separator);
            }
            continue;
        };

        match class {
            CharClass::Upper => {
                let next_is_lower = chars.get(index + 1).is_some_and(|n| n.is_lowercase());
                let boundary = matches!(previous, Some(CharClass::Separator | CharClass::Lower))
                    || (matches!(previous, Some(CharClass::Upper)) && next_is_lower);
                if boundary {
                    out.push('_');
                }
                out.extend(c.to_lowercase());
            }
            _ => {
                if previous == Some(CharClass::Separator) {
                    out.push('_');
                }
                out.push(c);
            }
        }

        previous = Some(class);
    }

    out
}
