use tokio::sync::RwLock;
use uuid::Uuid;

use crate::{
    api::error,
    modules::relationship::{
        model::NewRelationship,
        repository::RelationshipRepository,
        schema::{RelationshipEntity, RelationshipType},
    },
};

/// Process-local backend. Rows keep insertion order.
#[derive(Default)]
pub struct RelationshipRepositoryMemory {
    rows: RwLock<Vec<RelationshipEntity>>,
}

impl RelationshipRepositoryMemory {
    pub fn new() -> Self {
        Self::default()
    }

    #[cfg(test)]
    pub fn with_rows(rows: Vec<RelationshipEntity>) -> Self {
        Self { rows: RwLock::new(rows) }
    }

    #[cfg(test)]
    pub async fn len(&self) -> usize {
        self.rows.read().await.len()
    }
}

fn pair_taken(rows: &[RelationshipEntity], a: &str, b: &str, exclude_id: Option<&str>) -> bool {
    rows.iter().any(|row| Some(row.id.as_str()) != exclude_id && row.connects(a, b))
}

#[async_trait::async_trait]
impl RelationshipRepository for RelationshipRepositoryMemory {
    async fn find_by_user(
        &self,
        user_id: &str,
        relationship_type: RelationshipType,
    ) -> Result<Vec<RelationshipEntity>, error::SystemError> {
        let rows = self.rows.read().await;
        Ok(rows.iter().filter(|row| row.has_slot(user_id, relationship_type)).cloned().collect())
    }

    async fn find_by_id(&self, id: &str) -> Result<Option<RelationshipEntity>, error::SystemError> {
        let rows = self.rows.read().await;
        Ok(rows.iter().find(|row| row.id == id).cloned())
    }

    async fn exists_pair(
        &self,
        user_id_a: &str,
        user_id_b: &str,
        exclude_id: Option<&str>,
    ) -> Result<bool, error::SystemError> {
        let rows = self.rows.read().await;
        Ok(pair_taken(&rows, user_id_a, user_id_b, exclude_id))
    }

    async fn insert(
        &self,
        relationship: &NewRelationship,
    ) -> Result<RelationshipEntity, error::SystemError> {
        let mut rows = self.rows.write().await;
        if pair_taken(&rows, &relationship.user_1.user_id, &relationship.user_2.user_id, None) {
            return Err(error::SystemError::RelationshipExists);
        }

        let entity = RelationshipEntity {
            id: Uuid::new_v7(uuid::Timestamp::now(uuid::NoContext)).to_string(),
            user_1: relationship.user_1.clone(),
            user_2: relationship.user_2.clone(),
            conversation_id: relationship.conversation_id.clone(),
            created_on: relationship.created_on,
            updated_on: relationship.updated_on,
        };
        rows.push(entity.clone());
        Ok(entity)
    }

    async fn replace_by_id(
        &self,
        id: &str,
        relationship: &RelationshipEntity,
    ) -> Result<(), error::SystemError> {
        let mut rows = self.rows.write().await;
        let index = rows
            .iter()
            .position(|row| row.id == id)
            .ok_or(error::SystemError::RelationshipNotFound)?;

        if pair_taken(&rows, &relationship.user_1.user_id, &relationship.user_2.user_id, Some(id)) {
            return Err(error::SystemError::RelationshipExists);
        }

        let stored = &mut rows[index];
        stored.user_1 = relationship.user_1.clone();
        stored.user_2 = relationship.user_2.clone();
        stored.conversation_id = relationship.conversation_id.clone();
        stored.updated_on = relationship.updated_on;
        Ok(())
    }

    async fn delete_by_id(&self, id: &str) -> Result<(), error::SystemError> {
        let mut rows = self.rows.write().await;
        let index = rows
            .iter()
            .position(|row| row.id == id)
            .ok_or(error::SystemError::RelationshipNotFound)?;
        rows.remove(index);
        Ok(())
    }

    async fn ping(&self) -> Result<(), error::SystemError> {
        Ok(())
    }

    async fn close(&self) {
        log::info!("In-memory relationship store closed");
    }
}
