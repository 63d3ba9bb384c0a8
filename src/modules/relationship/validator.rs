use std::sync::Arc;

use crate::{
    api::error,
    modules::{
        relationship::{model::Relationship, repository::RelationshipRepository},
        user::repository::UserRepository,
    },
};

/// Business rules a relationship must satisfy before it is written.
/// Slot types are already checked when the request body becomes a `Relationship`.
#[derive(Clone)]
pub struct RelationshipValidator {
    relationship_repo: Arc<dyn RelationshipRepository + Send + Sync>,
    user_repo: Arc<dyn UserRepository + Send + Sync>,
    verify_users: bool,
}

impl RelationshipValidator {
    pub fn new(
        relationship_repo: Arc<dyn RelationshipRepository + Send + Sync>,
        user_repo: Arc<dyn UserRepository + Send + Sync>,
        verify_users: bool,
    ) -> Self {
        RelationshipValidator { relationship_repo, user_repo, verify_users }
    }

    /// Checks run in order and stop at the first failure:
    /// both users exist, they differ, and no other row links them.
    pub async fn validate(
        &self,
        candidate: &Relationship,
        exclude_id: Option<&str>,
    ) -> Result<(), error::SystemError> {
        let user_1 = candidate.user_1.user_id.as_str();
        let user_2 = candidate.user_2.user_id.as_str();

        if self.verify_users {
            let (user_1_exists, user_2_exists) =
                tokio::try_join!(self.user_repo.exists(user_1), self.user_repo.exists(user_2))?;
            if !user_1_exists {
                return Err(error::SystemError::UserNotFound(user_1.to_string()));
            }
            if !user_2_exists {
                return Err(error::SystemError::UserNotFound(user_2.to_string()));
            }
        }

        if user_1 == user_2 {
            return Err(error::SystemError::SameUserId);
        }

        if self.relationship_repo.exists_pair(user_1, user_2, exclude_id).await? {
            return Err(error::SystemError::RelationshipExists);
        }

        Ok(())
    }
}
