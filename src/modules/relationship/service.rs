use log::info;
use std::sync::Arc;

use crate::{
    api::error,
    modules::{
        conversation::repository::ConversationRepository,
        relationship::{
            enricher::UserDetailEnricher,
            model::{DetailedRelationship, NewRelationship, Relationship},
            repository::RelationshipRepository,
            schema::{RelationshipEntity, RelationshipType},
            validator::RelationshipValidator,
        },
        user::repository::UserRepository,
    },
};

#[derive(Clone)]
pub struct RelationshipService {
    relationship_repo: Arc<dyn RelationshipRepository + Send + Sync>,
    user_repo: Arc<dyn UserRepository + Send + Sync>,
    conversation_repo: Arc<dyn ConversationRepository + Send + Sync>,
    validator: RelationshipValidator,
    enricher: UserDetailEnricher,
}

impl RelationshipService {
    pub fn with_dependencies(
        relationship_repo: Arc<dyn RelationshipRepository + Send + Sync>,
        user_repo: Arc<dyn UserRepository + Send + Sync>,
        conversation_repo: Arc<dyn ConversationRepository + Send + Sync>,
        verify_users: bool,
    ) -> Self {
        info!("RelationshipService initialized with dependencies (verify_users: {verify_users})");
        RelationshipService {
            validator: RelationshipValidator::new(
                relationship_repo.clone(),
                user_repo.clone(),
                verify_users,
            ),
            enricher: UserDetailEnricher::new(user_repo.clone()),
            relationship_repo,
            user_repo,
            conversation_repo,
        }
    }

    pub async fn get_friends_list(
        &self,
        user_id: &str,
    ) -> Result<Vec<DetailedRelationship>, error::SystemError> {
        self.list_by_user(user_id, RelationshipType::Friend).await
    }

    pub async fn get_invites_list(
        &self,
        user_id: &str,
    ) -> Result<Vec<DetailedRelationship>, error::SystemError> {
        self.list_by_user(user_id, RelationshipType::PendingIncoming).await
    }

    async fn list_by_user(
        &self,
        user_id: &str,
        relationship_type: RelationshipType,
    ) -> Result<Vec<DetailedRelationship>, error::SystemError> {
        let relationships = self.relationship_repo.find_by_user(user_id, relationship_type).await?;
        if relationships.is_empty() {
            return Err(error::SystemError::RelationshipNotFound);
        }
        self.enricher.resolve(user_id, &relationships).await
    }

    pub async fn get_relationship(&self, id: &str) -> Result<RelationshipEntity, error::SystemError> {
        self.relationship_repo.find_by_id(id).await?.ok_or(error::SystemError::RelationshipNotFound)
    }

    pub async fn add_relationship(
        &self,
        candidate: Relationship,
    ) -> Result<RelationshipEntity, error::SystemError> {
        self.validator.validate(&candidate, None).await?;

        let conversation_id = self
            .conversation_repo
            .create_direct_conversation(&candidate.user_1.user_id, &candidate.user_2.user_id)
            .await?;

        let now = chrono::Utc::now();
        let new_relationship = NewRelationship {
            user_1: candidate.user_1,
            user_2: candidate.user_2,
            conversation_id,
            created_on: now,
            updated_on: now,
        };

        let relationship = self.relationship_repo.insert(&new_relationship).await?;
        info!("Relationship {} created", relationship.id);
        Ok(relationship)
    }

    pub async fn update_relationship(
        &self,
        candidate: Relationship,
    ) -> Result<RelationshipEntity, error::SystemError> {
        let id = candidate.id.as_deref().ok_or(error::SystemError::RelationshipNotFound)?;
        let stored = self
            .relationship_repo
            .find_by_id(id)
            .await?
            .ok_or(error::SystemError::RelationshipNotFound)?;

        self.validator.validate(&candidate, Some(id)).await?;

        let conversation_id = if candidate.conversation_id.is_empty() {
            stored.conversation_id
        } else {
            candidate.conversation_id
        };
        let updated = RelationshipEntity {
            id: stored.id,
            user_1: candidate.user_1,
            user_2: candidate.user_2,
            conversation_id,
            created_on: stored.created_on,
            updated_on: chrono::Utc::now(),
        };

        self.relationship_repo.replace_by_id(&updated.id, &updated).await?;
        Ok(updated)
    }

    pub async fn delete_relationship(&self, id: &str) -> Result<(), error::SystemError> {
        if self.relationship_repo.find_by_id(id).await?.is_none() {
            return Err(error::SystemError::RelationshipNotFound);
        }
        self.relationship_repo.delete_by_id(id).await
    }

    pub async fn ping(&self) -> Result<(), error::SystemError> {
        self.relationship_repo.ping().await
    }

    /// Store first, then the user service, then the text-chat service.
    pub async fn readiness(&self) -> Result<(), error::SystemError> {
        self.ping().await?;
        self.user_repo.ping().await?;
        self.conversation_repo.ping().await
    }

    pub async fn shutdown(&self) {
        self.relationship_repo.close().await;
    }
}
