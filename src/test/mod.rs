use std::collections::{HashMap, HashSet};
use std::sync::atomic::{AtomicUsize, Ordering};

use crate::{
    api::error,
    modules::{
        conversation::repository::ConversationRepository,
        relationship::schema::{RelationshipEntity, RelationshipType, RelationshipUser},
        user::{model::UserDetails, repository::UserRepository},
    },
};

pub fn relationship(
    id: &str,
    user_1: (&str, RelationshipType),
    user_2: (&str, RelationshipType),
) -> RelationshipEntity {
    let at = chrono::DateTime::parse_from_rfc3339("2021-03-20T12:00:00Z")
        .unwrap()
        .with_timezone(&chrono::Utc);
    RelationshipEntity {
        id: id.to_string(),
        user_1: RelationshipUser::new(user_1.0, user_1.1),
        user_2: RelationshipUser::new(user_2.0, user_2.1),
        conversation_id: format!("conv-{id}"),
        created_on: at,
        updated_on: at,
    }
}

#[derive(Default)]
pub struct FakeUserRepository {
    users: HashMap<String, UserDetails>,
    broken: HashSet<String>,
    unavailable: bool,
}

impl FakeUserRepository {
    pub fn with_users(ids: &[&str]) -> Self {
        let users = ids
            .iter()
            .map(|id| {
                let user = UserDetails {
                    id: id.to_string(),
                    username: format!("user-{id}"),
                    status: "Online".to_string(),
                };
                (id.to_string(), user)
            })
            .collect();
        Self { users, ..Default::default() }
    }

    /// Lookups for `id` fail as if the user service returned garbage.
    pub fn broken(mut self, id: &str) -> Self {
        self.broken.insert(id.to_string());
        self
    }

    pub fn unavailable(mut self) -> Self {
        self.unavailable = true;
        self
    }
}

#[async_trait::async_trait]
impl UserRepository for FakeUserRepository {
    async fn find_by_id(&self, id: &str) -> Result<Option<UserDetails>, error::SystemError> {
        if self.unavailable {
            return Err(error::SystemError::UpstreamUnavailable("connection refused".into()));
        }
        if self.broken.contains(id) {
            return Err(error::SystemError::HttpClientError("Invalid response body".into()));
        }
        Ok(self.users.get(id).cloned())
    }

    async fn ping(&self) -> Result<(), error::SystemError> {
        if self.unavailable {
            return Err(error::SystemError::UpstreamUnavailable("microservice-user".into()));
        }
        Ok(())
    }
}

#[derive(Default)]
pub struct FakeConversationRepository {
    created: AtomicUsize,
    failing: bool,
}

impl FakeConversationRepository {
    pub fn failing() -> Self {
        Self { failing: true, ..Default::default() }
    }

    pub fn created(&self) -> usize {
        self.created.load(Ordering::SeqCst)
    }
}

#[async_trait::async_trait]
impl ConversationRepository for FakeConversationRepository {
    async fn create_direct_conversation(
        &self,
        user_a: &str,
        user_b: &str,
    ) -> Result<String, error::SystemError> {
        if self.failing {
            return Err(error::SystemError::UpstreamUnavailable("microservice-text-chat".into()));
        }
        let n = self.created.fetch_add(1, Ordering::SeqCst) + 1;
        Ok(format!("conv-{user_a}-{user_b}-{n}"))
    }

    async fn ping(&self) -> Result<(), error::SystemError> {
        if self.failing {
            return Err(error::SystemError::UpstreamUnavailable("microservice-text-chat".into()));
        }
        Ok(())
    }
}
