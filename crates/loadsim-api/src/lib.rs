mod error;
pub use error::ApiError;

mod handler;
pub use handler::{AgentHandler, HealthInfo, StartedTask};

mod adapter;
pub use adapter::AgentAdapter;

mod http;
pub use http::HttpApi;

pub use axum;
