use std::sync::Arc;

use futures_util::future::try_join_all;

use crate::{
    api::error,
    modules::{
        relationship::{model::DetailedRelationship, schema::RelationshipEntity},
        user::repository::UserRepository,
    },
};

#[derive(Clone)]
pub struct UserDetailEnricher {
    user_repo: Arc<dyn UserRepository + Send + Sync>,
}

impl UserDetailEnricher {
    pub fn new(user_repo: Arc<dyn UserRepository + Send + Sync>) -> Self {
        UserDetailEnricher { user_repo }
    }

    /// Describes each row from `requester_id`'s side: the counterpart's profile and type.
    /// One failed lookup fails the whole list. Output order follows `relationships`.
    pub async fn resolve(
        &self,
        requester_id: &str,
        relationships: &[RelationshipEntity],
    ) -> Result<Vec<DetailedRelationship>, error::SystemError> {
        try_join_all(relationships.iter().map(|relationship| async move {
            let other_id = relationship.other_slot(requester_id).user_id.as_str();
            let user = self
                .user_repo
                .find_by_id(other_id)
                .await
                .map_err(|e| error::SystemError::user_lookup_failed(other_id, e.to_string()))?
                .ok_or_else(|| error::SystemError::user_lookup_failed(other_id, "user not found"))?;

            Ok::<_, error::SystemError>(DetailedRelationship::from_parts(
                relationship,
                requester_id,
                user,
            ))
        }))
        .await
    }
}
