use crate::api::error;

#[async_trait::async_trait]
pub trait ConversationRepository: Send + Sync {
    /// Asks the text-chat service for a conversation between two users and returns its id.
    async fn create_direct_conversation(
        &self,
        user_a: &str,
        user_b: &str,
    ) -> Result<String, error::SystemError>;

    async fn ping(&self) -> Result<(), error::SystemError>;
}
