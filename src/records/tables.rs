//! Named tables of records, kept in creation order.

use crate::error::{Result, StoreError};
use crate::records::RecordSet;
use serde::de::{MapAccess, Visitor};
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;

/// A named record set.
#[derive(Clone, Debug, PartialEq, Eq)]
struct Table {
    name: String,
    records: RecordSet,
}

/// Ordered collection of named tables.
///
/// Serializes as a map from table name to an array of records, with keys in
/// creation order.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Tables {
    tables: Vec<Table>,
}

impl Tables {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an empty table.
    pub fn create(&mut self, name: &str) -> Result<()> {
        if self.position(name).is_some() {
            return Err(StoreError::TableExists(name.to_string()));
        }
        self.tables.push(Table {
            name: name.to_string(),
            records: RecordSet::new(),
        });
        Ok(())
    }

    /// Remove a table and all its records.
    pub fn drop_table(&mut self, name: &str) -> Result<()> {
        let pos = self
            .position(name)
            .ok_or_else(|| StoreError::TableNotFound(name.to_string()))?;
        self.tables.remove(pos);
        Ok(())
    }

    /// Table names in creation order.
    pub fn names(&self) -> Vec<String> {
        self.tables.iter().map(|t| t.name.clone()).collect()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.position(name).is_some()
    }

    pub fn get(&self, name: &str) -> Result<&RecordSet> {
        self.tables
            .iter()
            .find(|t| t.name == name)
            .map(|t| &t.records)
            .ok_or_else(|| StoreError::TableNotFound(name.to_string()))
    }

    pub fn get_mut(&mut self, name: &str) -> Result<&mut RecordSet> {
        self.tables
            .iter_mut()
            .find(|t| t.name == name)
            .map(|t| &mut t.records)
            .ok_or_else(|| StoreError::TableNotFound(name.to_string()))
    }

    /// Total records across all tables.
    pub fn record_count(&self) -> usize {
        self.tables.iter().map(|t| t.records.len()).sum()
    }

    fn position(&self, name: &str) -> Option<usize> {
        self.tables.iter().position(|t| t.name == name)
    }
}

impl Serialize for Tables {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.tables.len()))?;
        for table in &self.tables {
            map.serialize_entry(&table.name, &table.records)?;
        }
        map.end()
    }
}

struct TablesVisitor;

impl<'de> Visitor<'de> for TablesVisitor {
    type Value = Tables;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("a map of table names to arrays of strings")
    }

    fn visit_map<A: MapAccess<'de>>(self, mut access: A) -> std::result::Result<Tables, A::Error> {
        let mut tables = Tables::new();
        while let Some((name, records)) = access.next_entry::<String, RecordSet>()? {
            if tables.contains(&name) {
                return Err(serde::de::Error::custom(format!("duplicate table: {name}")));
            }
            tables.tables.push(Table { name, records });
        }
        Ok(tables)
    }
}

impl<'de> Deserialize<'de> for Tables {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        deserializer.deserialize_map(TablesVisitor)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_and_drop() {
        let mut tables = Tables::new();
        tables.create("customers").unwrap();
        tables.create("orders").unwrap();
        assert_eq!(tables.names(), vec!["customers", "orders"]);

        assert!(matches!(
            tables.create("customers"),
            Err(StoreError::TableExists(_))
        ));

        tables.drop_table("customers").unwrap();
        assert_eq!(tables.names(), vec!["orders"]);
        assert!(matches!(
            tables.drop_table("customers"),
            Err(StoreError::TableNotFound(_))
        ));
    }

    #[test]
    fn test_json_keeps_creation_order() {
        let mut tables = Tables::new();
        tables.create("zeta").unwrap();
        tables.create("alpha").unwrap();
        tables.get_mut("zeta").unwrap().push("z1");
        tables.get_mut("alpha").unwrap().push("a1");

        let json = serde_json::to_string(&tables).unwrap();
        assert_eq!(json, r#"{"zeta":["z1"],"alpha":["a1"]}"#);

        let back: Tables = serde_json::from_str(&json).unwrap();
        assert_eq!(back, tables);
        assert_eq!(back.names(), vec!["zeta", "alpha"]);
        assert_eq!(back.record_count(), 2);
    }

    #[test]
    fn test_duplicate_keys_rejected() {
        let result: std::result::Result<Tables, _> = serde_json::from_str(r#"{"a":[],"a":["x"]}"#);
        assert!(result.is_err());
    }

    #[test]
    fn test_non_string_rows_rejected() {
        let result: std::result::Result<Tables, _> = serde_json::from_str(r#"{"a":[1,2]}"#);
        assert!(result.is_err());
    }
}
