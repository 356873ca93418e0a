//! Storage records and record sets
//!
//! A [`Record`] is one flat row destined for a SQL table. A [`RecordSet`] groups
//! rows by table name: a structured-datatype category (`CWE`, `CX`, ...) or a
//! segment label (`PID`, `AIS`, ...).

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::collections::BTreeMap;

/// One flat storage row, column name to value, in insertion order
pub type Record = Map<String, Value>;

/// Mapping from table name to ordered rows
///
/// # Examples
///
/// ```
/// use hl7_store::domain::record::{Record, RecordSet};
/// use serde_json::json;
///
/// let mut records = RecordSet::new();
/// let mut row = Record::new();
/// row.insert("msg_id".to_string(), json!("M1"));
/// records.push("PID", row);
///
/// assert_eq!(records.get("PID").len(), 1);
/// assert!(records.get("CWE").is_empty());
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RecordSet {
    tables: BTreeMap<String, Vec<Record>>,
}

impl RecordSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// True when no table holds any row
    pub fn is_empty(&self) -> bool {
        self.tables.values().all(Vec::is_empty)
    }

    /// Total number of rows across all tables
    pub fn len(&self) -> usize {
        self.tables.values().map(Vec::len).sum()
    }

    /// Makes sure a table key exists, even without rows
    pub fn ensure(&mut self, table: &str) -> &mut Vec<Record> {
        self.tables.entry(table.to_string()).or_default()
    }

    /// Appends one row to a table
    pub fn push(&mut self, table: &str, record: Record) {
        self.ensure(table).push(record);
    }

    /// Appends rows to a table, keeping their order
    pub fn extend(&mut self, table: &str, records: impl IntoIterator<Item = Record>) {
        self.ensure(table).extend(records);
    }

    /// Rows of a table, empty when the table is unknown
    pub fn get(&self, table: &str) -> &[Record] {
        self.tables.get(table).map(Vec::as_slice).unwrap_or_default()
    }

    pub fn contains_table(&self, table: &str) -> bool {
        self.tables.contains_key(table)
    }

    /// Table names in sorted order
    pub fn tables(&self) -> impl Iterator<Item = &str> {
        self.tables.keys().map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &[Record])> {
        self.tables.iter().map(|(k, v)| (k.as_str(), v.as_slice()))
    }

    /// Every row of every table
    pub fn records(&self) -> impl Iterator<Item = &Record> {
        self.tables.values().flatten()
    }

    /// Appends every table of `other` after the rows already held
    pub fn merge(&mut self, other: RecordSet) {
        for (table, rows) in other.tables {
            self.tables.entry(table).or_default().extend(rows);
        }
    }

    /// JSON rendition used for output and checksums
    pub fn to_value(&self) -> Value {
        Value::Object(
            self.tables
                .iter()
                .map(|(table, rows)| {
                    (
                        table.clone(),
                        Value::Array(rows.iter().cloned().map(Value::Object).collect()),
                    )
                })
                .collect(),
        )
    }
}
