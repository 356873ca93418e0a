//! Identity context stamped onto every prepared record

use super::ids::{GroupId, MessageId};
use super::record::Record;
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

/// Provisional segment sequence ID used until a policy reads the real one
pub const PROVISIONAL_SID: &str = "1";

/// Column names of the identity stamp
pub mod columns {
    pub const MESSAGE_ID: &str = "msg_id";
    pub const SID: &str = "msg_sid";
    pub const GROUP_ID: &str = "msg_group_id";
    pub const GROUP_ENTRY: &str = "msg_group_entry";
}

/// The `(message id, segment sequence id, group id, group entry)` tuple
///
/// Every record emitted by one `prepare` call carries the same stamp drawn
/// from this context.
///
/// # Examples
///
/// ```
/// use hl7_store::domain::identity::IdentityContext;
/// use hl7_store::domain::MessageId;
///
/// let mut identity = IdentityContext::default();
/// identity.message_id = Some(MessageId::new("M1").unwrap());
///
/// let stamp = identity.stamp();
/// assert_eq!(stamp["msg_id"], "M1");
/// assert_eq!(stamp["msg_sid"], "1");
/// assert_eq!(stamp["msg_group_entry"], 1);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IdentityContext {
    /// Parent message, required before records are prepared
    pub message_id: Option<MessageId>,

    /// Segment repetition index within the message, required before records are prepared
    pub sid: Option<String>,

    /// Repeating group the segment belongs to
    pub group_id: GroupId,

    /// 1-based position within the repeating group
    pub group_entry: u32,
}

impl Default for IdentityContext {
    fn default() -> Self {
        Self {
            message_id: None,
            sid: Some(PROVISIONAL_SID.to_string()),
            group_id: GroupId::top_level(),
            group_entry: 1,
        }
    }
}

impl IdentityContext {
    /// Names the first missing required part, if any
    pub fn missing_part(&self) -> Option<&'static str> {
        if self.message_id.is_none() {
            return Some("message ID is required for preparing records, set it before preparing");
        }
        match &self.sid {
            Some(sid) if !sid.trim().is_empty() => None,
            _ => Some(
                "segment sequence ID is required for preparing records, \
                 ensure it is present before preparing",
            ),
        }
    }

    /// Starts a record with the four identity columns
    pub fn stamp(&self) -> Record {
        let mut record = Record::new();
        record.insert(
            columns::MESSAGE_ID.to_string(),
            self.message_id
                .as_ref()
                .map_or(Value::Null, |id| json!(id.as_str())),
        );
        record.insert(
            columns::SID.to_string(),
            self.sid.as_ref().map_or(Value::Null, |sid| json!(sid)),
        );
        record.insert(columns::GROUP_ID.to_string(), json!(self.group_id.as_str()));
        record.insert(columns::GROUP_ENTRY.to_string(), json!(self.group_entry));
        record
    }

    /// True when `record` carries exactly this context's stamp
    pub fn is_stamped_on(&self, record: &Record) -> bool {
        self.stamp()
            .iter()
            .all(|(column, value)| record.get(column) == Some(value))
    }
}
