use crate::{
    api::error,
    modules::relationship::{
        model::NewRelationship,
        schema::{RelationshipEntity, RelationshipType},
    },
};

#[async_trait::async_trait]
pub trait RelationshipRepository: Send + Sync {
    /// Rows where `user_id` holds a slot whose own type is `relationship_type`.
    async fn find_by_user(
        &self,
        user_id: &str,
        relationship_type: RelationshipType,
    ) -> Result<Vec<RelationshipEntity>, error::SystemError>;

    async fn find_by_id(&self, id: &str) -> Result<Option<RelationshipEntity>, error::SystemError>;

    /// Whether a row other than `exclude_id` already links the two users, in either order.
    async fn exists_pair(
        &self,
        user_id_a: &str,
        user_id_b: &str,
        exclude_id: Option<&str>,
    ) -> Result<bool, error::SystemError>;

    async fn insert(
        &self,
        relationship: &NewRelationship,
    ) -> Result<RelationshipEntity, error::SystemError>;

    async fn replace_by_id(
        &self,
        id: &str,
        relationship: &RelationshipEntity,
    ) -> Result<(), error::SystemError>;

    async fn delete_by_id(&self, id: &str) -> Result<(), error::SystemError>;

    async fn ping(&self) -> Result<(), error::SystemError>;

    async fn close(&self);
}
