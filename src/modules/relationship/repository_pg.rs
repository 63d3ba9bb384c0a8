use uuid::Uuid;

use crate::{
    api::error,
    modules::relationship::{
        model::NewRelationship,
        repository::RelationshipRepository,
        schema::{RelationshipEntity, RelationshipRow, RelationshipType},
    },
};

#[derive(Clone)]
pub struct RelationshipRepositoryPg {
    pool: sqlx::PgPool,
}

impl RelationshipRepositoryPg {
    pub fn new(pool: sqlx::PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait::async_trait]
impl RelationshipRepository for RelationshipRepositoryPg {
    async fn find_by_user(
        &self,
        user_id: &str,
        relationship_type: RelationshipType,
    ) -> Result<Vec<RelationshipEntity>, error::SystemError> {
        let rows = sqlx::query_as::<_, RelationshipRow>(
            r#"
            SELECT *
            FROM relationships
            WHERE
                (user_1_id = $1 AND user_1_type = $2)
            OR (user_2_id = $1 AND user_2_type = $2)
            ORDER BY created_on, id
            "#,
        )
        .bind(user_id)
        .bind(relationship_type)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.into_iter().map(RelationshipEntity::from).collect())
    }

    async fn find_by_id(&self, id: &str) -> Result<Option<RelationshipEntity>, error::SystemError> {
        let row =
            sqlx::query_as::<_, RelationshipRow>("SELECT * FROM relationships WHERE id = $1")
                .bind(id)
                .fetch_optional(&self.pool)
                .await?;

        Ok(row.map(RelationshipEntity::from))
    }

    async fn exists_pair(
        &self,
        user_id_a: &str,
        user_id_b: &str,
        exclude_id: Option<&str>,
    ) -> Result<bool, error::SystemError> {
        let exists = sqlx::query_scalar::<_, bool>(
            r#"
            SELECT EXISTS (
                SELECT 1
                FROM relationships
                WHERE
                    ((user_1_id = $1 AND user_2_id = $2) OR (user_1_id = $2 AND user_2_id = $1))
                AND ($3::text IS NULL OR id <> $3)
            )
            "#,
        )
        .bind(user_id_a)
        .bind(user_id_b)
        .bind(exclude_id)
        .fetch_one(&self.pool)
        .await?;

        Ok(exists)
    }

    async fn insert(
        &self,
        relationship: &NewRelationship,
    ) -> Result<RelationshipEntity, error::SystemError> {
        let id = Uuid::new_v7(uuid::Timestamp::now(uuid::NoContext)).to_string();

        let row = sqlx::query_as::<_, RelationshipRow>(
            r#"
            INSERT INTO relationships
                (id, user_1_id, user_1_type, user_2_id, user_2_type, conversation_id, created_on, updated_on)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            RETURNING *
            "#,
        )
        .bind(&id)
        .bind(&relationship.user_1.user_id)
        .bind(relationship.user_1.relationship_type)
        .bind(&relationship.user_2.user_id)
        .bind(relationship.user_2.relationship_type)
        .bind(&relationship.conversation_id)
        .bind(relationship.created_on)
        .bind(relationship.updated_on)
        .fetch_one(&self.pool)
        .await?;

        log::info!("Inserted relationship {}", row.id);
        Ok(row.into())
    }

    async fn replace_by_id(
        &self,
        id: &str,
        relationship: &RelationshipEntity,
    ) -> Result<(), error::SystemError> {
        let rows = sqlx::query(
            r#"
            UPDATE relationships
            SET
                user_1_id       = $2,
                user_1_type     = $3,
                user_2_id       = $4,
                user_2_type     = $5,
                conversation_id = $6,
                updated_on      = $7
            WHERE id = $1
            "#,
        )
        .bind(id)
        .bind(&relationship.user_1.user_id)
        .bind(relationship.user_1.relationship_type)
        .bind(&relationship.user_2.user_id)
        .bind(relationship.user_2.relationship_type)
        .bind(&relationship.conversation_id)
        .bind(relationship.updated_on)
        .execute(&self.pool)
        .await?
        .rows_affected();

        if rows == 0 {
            return Err(error::SystemError::RelationshipNotFound);
        }
        Ok(())
    }

    async fn delete_by_id(&self, id: &str) -> Result<(), error::SystemError> {
        let rows = sqlx::query("DELETE FROM relationships WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?
            .rows_affected();

        log::info!("Deleted {} row(s) from relationships for id {}", rows, id);
        if rows == 0 {
            return Err(error::SystemError::RelationshipNotFound);
        }
        Ok(())
    }

    async fn ping(&self) -> Result<(), error::SystemError> {
        sqlx::query("SELECT 1")
            .execute(&self.pool)
            .await
            .map_err(|e| error::SystemError::StoreUnavailable(e.to_string().into()))?;
        Ok(())
    }

    async fn close(&self) {
        self.pool.close().await;
        log::info!("PostgreSQL connection pool closed");
    }
}
