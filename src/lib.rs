pub mod api;
pub mod client;
pub mod config;
pub mod models;
pub mod service;

pub use client::{Backend, BackendClient};
pub use config::AppConfig;
pub use service::{build_snapshot, SeguimientoService};
