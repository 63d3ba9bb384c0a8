use crate::{
    api::error,
    modules::conversation::{
        model::{ConversationCreated, NewConversation},
        repository::ConversationRepository,
    },
};

#[derive(Clone)]
pub struct ConversationRepositoryHttp {
    client: reqwest::Client,
    base_url: String,
}

impl ConversationRepositoryHttp {
    pub fn new(client: reqwest::Client, base_url: impl Into<String>) -> Self {
        Self { client, base_url: base_url.into() }
    }
}

#[async_trait::async_trait]
impl ConversationRepository for ConversationRepositoryHttp {
    async fn create_direct_conversation(
        &self,
        user_a: &str,
        user_b: &str,
    ) -> Result<String, error::SystemError> {
        let url = format!("{}/conversations", self.base_url);
        let created = self
            .client
            .post(&url)
            .json(&NewConversation { user_id: [user_a, user_b] })
            .send()
            .await?
            .error_for_status()?
            .json::<ConversationCreated>()
            .await?;

        created.into_id().ok_or_else(|| {
            error::SystemError::HttpClientError("text-chat reply has no conversation id".into())
        })
    }

    async fn ping(&self) -> Result<(), error::SystemError> {
        let url = format!("{}/health/ready", self.base_url);
        self.client
            .get(&url)
            .send()
            .await
            .and_then(|r| r.error_for_status())
            .map_err(|e| {
                error::SystemError::UpstreamUnavailable(
                    format!("microservice-text-chat: {e}").into(),
                )
            })?;
        Ok(())
    }
}
