//! Checksum calculation for prepared records
//!
//! Checksums are taken over a canonical JSON rendition: object keys are
//! sorted recursively, array order is kept. Row order inside a table is
//! therefore significant while column order is not.

use crate::domain::{RecordSet, Result, StoreError};
use serde_json::Value;
use sha2::{Digest, Sha256};
use std::collections::BTreeMap;

/// SHA-256 checksum of any JSON value, hex encoded
///
/// # Examples
///
/// ```
/// use hl7_store::core::verification::checksum::calculate_checksum;
/// use serde_json::json;
///
/// let a = calculate_checksum(&json!({"msg_id": "M1", "msg_sid": "1"})).unwrap();
/// let b = calculate_checksum(&json!({"msg_sid": "1", "msg_id": "M1"})).unwrap();
/// assert_eq!(a, b);
/// assert_eq!(a.len(), 64);
/// ```
pub fn calculate_checksum(data: &Value) -> Result<String> {
    let normalized = normalize_json(data);
    let text = serde_json::to_string(&normalized)
        .map_err(|e| StoreError::Serialization(e.to_string()))?;

    let mut hasher = Sha256::new();
    hasher.update(text.as_bytes());
    Ok(format!("{:x}", hasher.finalize()))
}

/// Checksum of a whole record set
pub fn record_set_checksum(records: &RecordSet) -> Result<String> {
    calculate_checksum(&records.to_value())
}

fn normalize_json(value: &Value) -> Value {
    match value {
        Value::Object(map) => {
            let sorted: BTreeMap<&String, Value> =
                map.iter().map(|(k, v)| (k, normalize_json(v))).collect();
            Value::Object(sorted.into_iter().map(|(k, v)| (k.clone(), v)).collect())
        }
        Value::Array(items) => Value::Array(items.iter().map(normalize_json).collect()),
        _ => value.clone(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::Record;
    use serde_json::json;

    fn row(pairs: &[(&str, Value)]) -> Record {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.clone()))
            .collect()
    }

    #[test]
    fn test_checksum_is_deterministic() {
        let data = json!({"CWE": [{"cwe_identifier": "F"}]});
        assert_eq!(
            calculate_checksum(&data).unwrap(),
            calculate_checksum(&data).unwrap()
        );
    }

    #[test]
    fn test_column_order_does_not_matter() {
        let mut a = RecordSet::new();
        a.push("PID", row(&[("msg_id", json!("M1")), ("pid_dob", json!(null))]));
        let mut b = RecordSet::new();
        b.push("PID", row(&[("pid_dob", json!(null)), ("msg_id", json!("M1"))]));

        assert_eq!(
            record_set_checksum(&a).unwrap(),
            record_set_checksum(&b).unwrap()
        );
    }

    #[test]
    fn test_row_order_matters() {
        let first = row(&[("cx_id_number", json!("A"))]);
        let second = row(&[("cx_id_number", json!("B"))]);

        let mut a = RecordSet::new();
        a.extend("CX", [first.clone(), second.clone()]);
        let mut b = RecordSet::new();
        b.extend("CX", [second, first]);

        assert_ne!(
            record_set_checksum(&a).unwrap(),
            record_set_checksum(&b).unwrap()
        );
    }

    #[test]
    fn test_checksum_is_hex() {
        let checksum = record_set_checksum(&RecordSet::new()).unwrap();
        assert_eq!(checksum.len(), 64);
        assert!(checksum.chars().all(|c| c.is_ascii_hexdigit()));
    }
}
