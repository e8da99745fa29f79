//! HTTP hosting for the agent

pub mod app;
pub mod routes;

pub use app::register_agent;
