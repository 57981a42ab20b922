use std::fmt;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

macro_rules! define_id {
    ($name:ident) => {
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(Uuid);

        impl $name {
            pub fn new() -> Self {
                Self(Uuid::new_v4())
            }

            pub fn from_uuid(uuid: Uuid) -> Self {
                Self(uuid)
            }
        }

        impl Default for $name {
            fn default() -> Self {
                Self::new()
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl From<Uuid> for $name {
            fn from(value: Uuid) -> Self {
                Self(value)
            }
        }

        impl From<$name> for Uuid {
            fn from(value: $name) -> Self {
                value.0
            }
        }
    };
}

/// Opaque text identifiers for ids that are persisted.
///
/// Fresh ids are UUIDv4 text, but any string read back from storage is
/// accepted as-is.
macro_rules! define_text_id {
    ($name:ident) => {
        #[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(String);

        impl $name {
            pub fn new() -> Self {
                Self::from_uuid(Uuid::new_v4())
            }

            pub fn from_uuid(uuid: Uuid) -> Self {
                Self(uuid.to_string())
            }

            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl Default for $name {
            fn default() -> Self {
                Self::new()
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(&self.0)
            }
        }

        impl From<String> for $name {
            fn from(value: String) -> Self {
                Self(value)
            }
        }

        impl From<&str> for $name {
            fn from(value: &str) -> Self {
                Self(value.to_string())
            }
        }

        impl From<$name> for String {
            fn from(value: $name) -> Self {
                value.0
            }
        }
    };
}

// Persisted IDs
define_text_id!(SessionId);
define_text_id!(CustomQuestionId);

// In-memory IDs
define_id!(RequestId);

/// Seat number of a player at the table.
///
/// Players are numbered from 1 in the order they sit down; the number is
/// stable for the lifetime of a round and is what custom questions and
/// topic requests record as their author.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PlayerId(u32);

impl PlayerId {
    pub fn new(seat: u32) -> Self {
        Self(seat)
    }

    pub fn seat(self) -> u32 {
        self.0
    }
}

impl fmt::Display for PlayerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ids_serialize_as_plain_strings() {
        let uuid = Uuid::nil();
        let id = SessionId::from_uuid(uuid);
        let json = serde_json::to_string(&id).expect("serialize");
        assert_eq!(json, "\"00000000-0000-0000-0000-000000000000\"");

        let back: SessionId = serde_json::from_str(&json).expect("deserialize");
        assert_eq!(back, id);

        let request = RequestId::from_uuid(uuid);
        assert_eq!(
            serde_json::to_string(&request).expect("serialize"),
            "\"00000000-0000-0000-0000-000000000000\""
        );
    }

    #[test]
    fn persisted_ids_accept_any_text() {
        let session: SessionId = serde_json::from_str("\"k3j9x2abc\"").expect("deserialize");
        assert_eq!(session.as_str(), "k3j9x2abc");

        let custom: CustomQuestionId = serde_json::from_str("\"q1w2e3r4t\"").expect("deserialize");
        assert_eq!(custom, CustomQuestionId::from("q1w2e3r4t"));
        assert_eq!(custom.to_string(), "q1w2e3r4t");
    }

    #[test]
    fn fresh_text_ids_are_uuid_text() {
        let id = CustomQuestionId::new();
        assert!(Uuid::parse_str(id.as_str()).is_ok());
        assert_ne!(id, CustomQuestionId::new());
    }

    #[test]
    fn player_id_serializes_as_number() {
        let json = serde_json::to_string(&PlayerId::new(2)).expect("serialize");
        assert_eq!(json, "2");
    }

    #[test]
    fn fresh_ids_are_distinct() {
        assert_ne!(RequestId::new(), RequestId::new());
    }
}
