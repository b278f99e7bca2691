//! Statement text built by the provider
//!
//! Identifiers are only ever spliced into SQL through [`quote_identifier`].

/// Statistics refresh and space reclamation for the whole database
pub const VACUUM_ANALYZE: &str = "VACUUM ANALYZE";

/// Quote an identifier, doubling embedded double quotes
pub fn quote_identifier(name: &str) -> String {
    let mut quoted = String::with_capacity(name.len() + 2);
    quoted.push('"');
    for c in name.chars() {
        if c == '"' {
            quoted.push('"');
        }
        quoted.push(c);
    }
    quoted.push('"');
    quoted
}

/// One statement emptying every table, resetting identities and cascading
///
/// Returns `None` when there is nothing to truncate.
pub fn truncate_tables<I, S>(table_names: I) -> Option<String>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let quoted: Vec<String> = table_names
        .into_iter()
        .map(|name| quote_identifier(name.as_ref()))
        .collect();

    if quoted.is_empty() {
        return None;
    }

    Some(format!(
        "TRUNCATE TABLE {} RESTART IDENTITY CASCADE;",
        quoted.join(", ")
    ))
}
