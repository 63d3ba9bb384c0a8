use reqwest::StatusCode;

use crate::{
    api::error,
    modules::user::{model::UserDetails, repository::UserRepository},
};

#[derive(Clone)]
pub struct UserRepositoryHttp {
    client: reqwest::Client,
    base_url: String,
}

impl UserRepositoryHttp {
    pub fn new(client: reqwest::Client, base_url: impl Into<String>) -> Self {
        Self { client, base_url: base_url.into() }
    }

    /// `{base_url}/users/{id}` with `id` percent-encoded as a single path segment.
    fn user_url(&self, id: &str) -> Result<reqwest::Url, error::SystemError> {
        let mut url = reqwest::Url::parse(&self.base_url).map_err(|e| {
            error::SystemError::HttpClientError(format!("Invalid user service url: {e}").into())
        })?;
        url.path_segments_mut()
            .map_err(|_| {
                error::SystemError::HttpClientError("User service url cannot be a base".into())
            })?
            .pop_if_empty()
            .push("users")
            .push(id);
        Ok(url)
    }
}

#[async_trait::async_trait]
impl UserRepository for UserRepositoryHttp {
    async fn find_by_id(&self, id: &str) -> Result<Option<UserDetails>, error::SystemError> {
        // dot segments are dropped by the url builder and would address another resource
        if matches!(id, "" | "." | "..") {
            return Ok(None);
        }
        let response = self.client.get(self.user_url(id)?).send().await?;

        if response.status() == StatusCode::NOT_FOUND {
            return Ok(None);
        }

        let user = response.error_for_status()?.json::<UserDetails>().await?;
        Ok(Some(user))
    }

    async fn ping(&self) -> Result<(), error::SystemError> {
        let url = format!("{}/health/ready", self.base_url);
        self.client
            .get(&url)
            .send()
            .await
            .and_then(|r| r.error_for_status())
            .map_err(|e| {
                error::SystemError::UpstreamUnavailable(format!("microservice-user: {e}").into())
            })?;
        Ok(())
    }
}
