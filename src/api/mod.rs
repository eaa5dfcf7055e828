pub mod handlers;

pub use handlers::*;

use axum::{
    routing::{get, post, put},
    Router,
};
use std::sync::Arc;

use crate::client::Backend;
use crate::service::SeguimientoService;

/// 构建路由
pub fn router<B: Backend>(service: Arc<SeguimientoService<B>>) -> Router {
    let seguimiento_routes = Router::new()
        .route("/api/seguimiento/:id/detalle", get(load_detail::<B>))
        .route("/api/seguimiento/:id/gestion", put(submit_gestion::<B>))
        .route("/api/seguimiento/:id/adjudicar", post(adjudicar::<B>))
        .route("/api/catalogos", get(catalogos::<B>))
        .route("/api/servidores", get(search_servidores::<B>))
        .with_state(service);

    Router::new()
        .route("/health", get(health_check))
        .merge(seguimiento_routes)
}
