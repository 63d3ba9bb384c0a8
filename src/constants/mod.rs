#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StoreBackend {
    Postgres,
    Memory,
}

impl std::str::FromStr for StoreBackend {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "postgres" | "postgresql" => Ok(StoreBackend::Postgres),
            "memory" | "mock" => Ok(StoreBackend::Memory),
            other => Err(format!("unknown store backend: {other}")),
        }
    }
}

pub struct Env {
    pub store_backend: StoreBackend,
    pub database_url: Option<String>,
    pub database_max_connections: u32,
    pub user_service_url: String,
    pub text_chat_service_url: String,
    pub verify_users: bool,
    pub upstream_timeout_secs: u64,
    pub request_timeout_secs: u64,
    pub shutdown_timeout_secs: u64,
    pub ip: String,
    pub port: u16,
    pub workers: usize,
}

fn parsed<T: std::str::FromStr>(key: &str, default: &str) -> T {
    std::env::var(key)
        .unwrap_or_else(|_| default.to_string())
        .parse::<T>()
        .unwrap_or_else(|_| panic!("{key} must be a valid {}", std::any::type_name::<T>()))
}

impl Env {
    fn new() -> Self {
        let store_backend = parsed::<StoreBackend>("STORE_BACKEND", "postgres");

        let database_url = std::env::var("DATABASE_URL").ok();
        if store_backend == StoreBackend::Postgres && database_url.is_none() {
            panic!("DATABASE_URL must be set in .env file or environment variable");
        }
        let database_max_connections = parsed::<u32>("DATABASE_MAX_CONNECTIONS", "5");

        let user_service_url = std::env::var("USER_SERVICE_URL")
            .unwrap_or_else(|_| "http://microservice-user:9090".to_string());
        let text_chat_service_url = std::env::var("TEXT_CHAT_SERVICE_URL")
            .unwrap_or_else(|_| "http://microservice-text-chat:9090".to_string());
        let verify_users = parsed::<bool>("VERIFY_USERS", "true");

        let upstream_timeout_secs = parsed::<u64>("UPSTREAM_TIMEOUT_SECS", "5");
        let request_timeout_secs = parsed::<u64>("REQUEST_TIMEOUT_SECS", "10");
        let shutdown_timeout_secs = parsed::<u64>("SHUTDOWN_TIMEOUT_SECS", "30");

        let ip = std::env::var("IP").unwrap_or_else(|_| "127.0.0.1".to_string());
        let port = parsed::<u16>("PORT", "9090");
        let workers = parsed::<usize>("WORKERS", "2");

        Env {
            store_backend,
            database_url,
            database_max_connections,
            user_service_url: user_service_url.trim_end_matches('/').to_string(),
            text_chat_service_url: text_chat_service_url.trim_end_matches('/').to_string(),
            verify_users,
            upstream_timeout_secs,
            request_timeout_secs,
            shutdown_timeout_secs,
            ip,
            port,
            workers,
        }
    }
}

impl Default for Env {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_store_backend_from_str() {
        assert_eq!("postgres".parse::<StoreBackend>().unwrap(), StoreBackend::Postgres);
        assert_eq!("Memory".parse::<StoreBackend>().unwrap(), StoreBackend::Memory);
        assert!("mongo".parse::<StoreBackend>().is_err());
    }
}
