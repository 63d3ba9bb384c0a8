use crate::{api::error, modules::user::model::UserDetails};

#[async_trait::async_trait]
pub trait UserRepository: Send + Sync {
    async fn find_by_id(&self, id: &str) -> Result<Option<UserDetails>, error::SystemError>;

    async fn exists(&self, id: &str) -> Result<bool, error::SystemError> {
        Ok(self.find_by_id(id).await?.is_some())
    }

    async fn ping(&self) -> Result<(), error::SystemError>;
}
