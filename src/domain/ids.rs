//! Domain identifier types with validation
//!
//! Newtype wrappers for the identifiers stamped onto every prepared record.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Message identifier newtype wrapper
///
/// Identifies the parent HL7v2 message of a segment. Allocation is the
/// caller's responsibility; the crate only stamps it onto records.
///
/// # Examples
///
/// ```
/// use hl7_store::domain::ids::MessageId;
/// use std::str::FromStr;
///
/// let message_id = MessageId::from_str("M1").unwrap();
/// assert_eq!(message_id.as_str(), "M1");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct MessageId(String);

impl MessageId {
    /// Creates a new MessageId from a string
    ///
    /// # Returns
    ///
    /// Returns `Ok(MessageId)` if the ID is valid, `Err` otherwise
    pub fn new(id: impl Into<String>) -> Result<Self, String> {
        let id = id.into();
        if id.trim().is_empty() {
            return Err("Message ID cannot be empty".to_string());
        }
        Ok(Self(id))
    }

    /// Returns the message ID as a string slice
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Consumes self and returns the inner String
    pub fn into_inner(self) -> String {
        self.0
    }
}

impl fmt::Display for MessageId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for MessageId {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

impl TryFrom<String> for MessageId {
    type Error = String;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<MessageId> for String {
    fn from(id: MessageId) -> Self {
        id.0
    }
}

impl AsRef<str> for MessageId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// Repeating-group identifier
///
/// Names the logical group (an insurance group, an order group) a segment
/// belongs to. Segments outside any repeating group use [`GroupId::top_level`].
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct GroupId(String);

impl GroupId {
    /// Identifier used for segments that sit at message top level
    pub const TOP_LEVEL: &'static str = "1";

    /// Creates a new GroupId from a string
    pub fn new(id: impl Into<String>) -> Result<Self, String> {
        let id = id.into();
        if id.trim().is_empty() {
            return Err("Group ID cannot be empty".to_string());
        }
        Ok(Self(id))
    }

    /// The top-level group
    pub fn top_level() -> Self {
        Self(Self::TOP_LEVEL.to_string())
    }

    /// Returns the group ID as a string slice
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Returns true for the top-level sentinel
    pub fn is_top_level(&self) -> bool {
        self.0 == Self::TOP_LEVEL
    }
}

impl Default for GroupId {
    fn default() -> Self {
        Self::top_level()
    }
}

impl fmt::Display for GroupId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for GroupId {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

impl TryFrom<String> for GroupId {
    type Error = String;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<GroupId> for String {
    fn from(id: GroupId) -> Self {
        id.0
    }
}

impl AsRef<str> for GroupId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}
