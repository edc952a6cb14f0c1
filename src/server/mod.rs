mod analytics_routes;
pub mod api_key;
pub mod config;
mod http_layers;
mod job_routes;
pub mod metrics;
pub mod server;
pub mod state;

pub use config::ServerConfig;
pub use http_layers::*;
pub use server::{make_app, run_server};
