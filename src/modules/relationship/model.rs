use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::{
    api::error,
    modules::{
        relationship::schema::{RelationshipEntity, RelationshipType, RelationshipUser},
        user::model::UserDetails,
    },
};

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct RelationshipUserBody {
    #[validate(length(min = 1, message = "user_id cannot be empty"))]
    pub user_id: String,
    pub relationship_type: String,
}

/// Body of `POST /relationships` and `PUT /relationships`.
/// Timestamps are owned by the service and ignored when sent.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct RelationshipBody {
    #[serde(default)]
    pub id: Option<String>,
    #[validate(nested)]
    pub user_1: RelationshipUserBody,
    #[validate(nested)]
    pub user_2: RelationshipUserBody,
    #[serde(default)]
    pub conversation_id: Option<String>,
}

impl TryFrom<RelationshipUserBody> for RelationshipUser {
    type Error = error::SystemError;

    fn try_from(body: RelationshipUserBody) -> Result<Self, Self::Error> {
        Ok(RelationshipUser::new(body.user_id, body.relationship_type.parse()?))
    }
}

/// A relationship submitted by a client, with both slot types already checked.
#[derive(Debug, Clone, PartialEq)]
pub struct Relationship {
    pub id: Option<String>,
    pub user_1: RelationshipUser,
    pub user_2: RelationshipUser,
    pub conversation_id: String,
}

impl Relationship {
    pub fn new(user_1: RelationshipUser, user_2: RelationshipUser) -> Self {
        Relationship { id: None, user_1, user_2, conversation_id: String::new() }
    }

    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = Some(id.into());
        self
    }
}

impl TryFrom<RelationshipBody> for Relationship {
    type Error = error::SystemError;

    fn try_from(body: RelationshipBody) -> Result<Self, Self::Error> {
        let mut relationship = Relationship::new(body.user_1.try_into()?, body.user_2.try_into()?);
        relationship.conversation_id = body.conversation_id.unwrap_or_default();
        Ok(match body.id.filter(|id| !id.is_empty()) {
            Some(id) => relationship.with_id(id),
            None => relationship,
        })
    }
}

pub struct NewRelationship {
    pub user_1: RelationshipUser,
    pub user_2: RelationshipUser,
    pub conversation_id: String,
    pub created_on: chrono::DateTime<chrono::Utc>,
    pub updated_on: chrono::DateTime<chrono::Utc>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DetailedUser {
    pub id: String,
    pub username: String,
    pub status: String,
    pub relationship_type: RelationshipType,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DetailedRelationship {
    pub id: String,
    pub user: DetailedUser,
    pub conversation_id: String,
    pub created_on: chrono::DateTime<chrono::Utc>,
    pub updated_on: chrono::DateTime<chrono::Utc>,
}

impl DetailedRelationship {
    pub fn from_parts(relationship: &RelationshipEntity, requester_id: &str, user: UserDetails) -> Self {
        let other = relationship.other_slot(requester_id);
        DetailedRelationship {
            id: relationship.id.clone(),
            user: DetailedUser {
                id: other.user_id.clone(),
                username: user.username,
                status: user.status,
                relationship_type: other.relationship_type,
            },
            conversation_id: relationship.conversation_id.clone(),
            created_on: relationship.created_on,
            updated_on: relationship.updated_on,
        }
    }
}
