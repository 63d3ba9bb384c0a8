use serde::{Deserialize, Serialize};
use sqlx::prelude::{FromRow, Type};

use crate::api::error;

/// Directional state one user holds toward the other endpoint of a relationship.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Type, Serialize, Deserialize)]
#[sqlx(type_name = "relationship_type", rename_all = "PascalCase")]
pub enum RelationshipType {
    None,
    Friend,
    Blocked,
    PendingIncoming,
    PendingOutgoing,
}

impl RelationshipType {
    pub const ALL: [RelationshipType; 5] = [
        RelationshipType::None,
        RelationshipType::Friend,
        RelationshipType::Blocked,
        RelationshipType::PendingIncoming,
        RelationshipType::PendingOutgoing,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            RelationshipType::None => "None",
            RelationshipType::Friend => "Friend",
            RelationshipType::Blocked => "Blocked",
            RelationshipType::PendingIncoming => "PendingIncoming",
            RelationshipType::PendingOutgoing => "PendingOutgoing",
        }
    }
}

impl std::str::FromStr for RelationshipType {
    type Err = error::SystemError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        RelationshipType::ALL
            .into_iter()
            .find(|t| t.as_str() == s)
            .ok_or_else(|| error::SystemError::InvalidRelationshipType(s.to_string()))
    }
}

impl std::fmt::Display for RelationshipType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One slot of a relationship row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RelationshipUser {
    pub user_id: String,
    pub relationship_type: RelationshipType,
}

impl RelationshipUser {
    pub fn new(user_id: impl Into<String>, relationship_type: RelationshipType) -> Self {
        Self { user_id: user_id.into(), relationship_type }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RelationshipEntity {
    pub id: String,
    pub user_1: RelationshipUser,
    pub user_2: RelationshipUser,
    pub conversation_id: String,
    pub created_on: chrono::DateTime<chrono::Utc>,
    pub updated_on: chrono::DateTime<chrono::Utc>,
}

impl RelationshipEntity {
    /// The counterpart slot from `requester_id`'s point of view.
    /// Anyone who is not `user_1` is treated as `user_2`.
    pub fn other_slot(&self, requester_id: &str) -> &RelationshipUser {
        if self.user_1.user_id == requester_id {
            &self.user_2
        } else {
            &self.user_1
        }
    }

    /// True when this row links `a` and `b`, in either slot order.
    pub fn connects(&self, a: &str, b: &str) -> bool {
        (self.user_1.user_id == a && self.user_2.user_id == b)
            || (self.user_1.user_id == b && self.user_2.user_id == a)
    }

    /// True when `user_id` occupies a slot holding `relationship_type`.
    pub fn has_slot(&self, user_id: &str, relationship_type: RelationshipType) -> bool {
        [&self.user_1, &self.user_2]
            .into_iter()
            .any(|slot| slot.user_id == user_id && slot.relationship_type == relationship_type)
    }
}

#[derive(Debug, Clone, FromRow)]
pub struct RelationshipRow {
    pub id: String,
    pub user_1_id: String,
    pub user_1_type: RelationshipType,
    pub user_2_id: String,
    pub user_2_type: RelationshipType,
    pub conversation_id: String,
    pub created_on: chrono::DateTime<chrono::Utc>,
    pub updated_on: chrono::DateTime<chrono::Utc>,
}

impl From<RelationshipRow> for RelationshipEntity {
    fn from(row: RelationshipRow) -> Self {
        RelationshipEntity {
            id: row.id,
            user_1: RelationshipUser::new(row.user_1_id, row.user_1_type),
            user_2: RelationshipUser::new(row.user_2_id, row.user_2_type),
            conversation_id: row.conversation_id,
            created_on: row.created_on,
            updated_on: row.updated_on,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test::relationship;

    #[test]
    fn test_relationship_type_serializes_as_name() {
        let json = serde_json::to_string(&RelationshipType::PendingIncoming).unwrap();
        assert_eq!(json, "\"PendingIncoming\"");
        let parsed: RelationshipType = serde_json::from_str("\"Blocked\"").unwrap();
        assert_eq!(parsed, RelationshipType::Blocked);
    }

    #[test]
    fn test_relationship_type_rejects_unknown_value() {
        let err = "Deleted".parse::<RelationshipType>().unwrap_err();
        assert!(matches!(err, error::SystemError::InvalidRelationshipType(v) if v == "Deleted"));
        assert!(serde_json::from_str::<RelationshipType>("\"Deleted\"").is_err());
    }

    #[test]
    fn test_other_slot_from_either_side() {
        let rel = relationship(
            "r1",
            ("A", RelationshipType::PendingOutgoing),
            ("B", RelationshipType::PendingIncoming),
        );
        assert_eq!(rel.other_slot("A").user_id, "B");
        assert_eq!(rel.other_slot("A").relationship_type, RelationshipType::PendingIncoming);
        assert_eq!(rel.other_slot("B").user_id, "A");
        assert_eq!(rel.other_slot("B").relationship_type, RelationshipType::PendingOutgoing);
    }

    #[test]
    fn test_connects_ignores_slot_order() {
        let rel =
            relationship("r1", ("A", RelationshipType::Friend), ("B", RelationshipType::Friend));
        assert!(rel.connects("A", "B"));
        assert!(rel.connects("B", "A"));
        assert!(!rel.connects("A", "C"));
        assert!(!rel.connects("A", "A"));
    }

    #[test]
    fn test_has_slot_matches_user_and_type_together() {
        let rel = relationship(
            "r1",
            ("A", RelationshipType::PendingOutgoing),
            ("B", RelationshipType::PendingIncoming),
        );
        assert!(rel.has_slot("B", RelationshipType::PendingIncoming));
        assert!(!rel.has_slot("A", RelationshipType::PendingIncoming));
        assert!(!rel.has_slot("B", RelationshipType::PendingOutgoing));
    }
}
