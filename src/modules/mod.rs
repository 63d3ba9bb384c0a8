pub mod relationship {
    pub mod schema;
    pub mod model;
    pub mod repository;
    pub mod repository_pg;
    pub mod repository_memory;
    pub mod validator;
    pub mod enricher;
    pub mod service;
    pub mod handle;
    pub mod route;
}

pub mod user {
    pub mod model;
    pub mod repository;
    pub mod repository_http;
}

pub mod conversation {
    pub mod model;
    pub mod repository;
    pub mod repository_http;
}

pub mod health {
    pub mod handle;
    pub mod route;
}
