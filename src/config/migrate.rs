//! Config file migration.
//!
//! Adds keys and sections introduced since the config file was written,
//! using their default values, while preserving the user's existing content,
//! comments and formatting.

use toml_edit::{DocumentMut, Item, Table};

use super::{Config, ConfigError};

/// Outcome of a migration pass over a config file's content.
#[derive(Debug)]
pub struct MigrationResult {
    /// The migrated file content.
    pub content: String,
    /// Added keys as `section.key` strings, in insertion order.
    pub added_fields: Vec<String>,
    /// Sections that did not exist before.
    pub sections_added: Vec<String>,
}

impl MigrationResult {
    pub fn has_changes(&self) -> bool {
        !self.added_fields.is_empty()
    }
}

/// Merge missing sections and keys from the default config into `existing`.
///
/// Existing keys keep their values; only absent ones are added.
pub fn migrate_config(existing: &str) -> Result<MigrationResult, ConfigError> {
    let mut doc: DocumentMut = existing.parse()?;
    let defaults: DocumentMut = toml::to_string_pretty(&Config::default())?.parse()?;

    let mut added_fields = Vec::new();
    let mut sections_added = Vec::new();

    for (section, default_item) in defaults.iter() {
        let Some(default_table) = default_item.as_table() else {
            continue;
        };

        if !doc.contains_key(section) {
            doc.insert(section, Item::Table(Table::new()));
            sections_added.push(section.to_string());
        }
        let Some(table) = doc[section].as_table_mut() else {
            continue;
        };

        for (key, value) in default_table.iter() {
            if !table.contains_key(key) {
                table.insert(key, value.clone());
                added_fields.push(format!("{section}.{key}"));
            }
        }
    }

    Ok(MigrationResult {
        content: doc.to_string(),
        added_fields,
        sections_added,
    })
}
