use crate::client::Backend;
use crate::models::{AdjudicarPayload, Catalogos, DetailSnapshot, GestionPayload, ServidorPublico};
use crate::service::{AwardForm, GestionForm, SeguimientoService, ServiceError};
use axum::{
    extract::{Json, Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// 通用响应体
#[derive(Debug, Serialize, Deserialize)]
pub struct ApiResponse<T> {
    pub success: bool,
    pub message: String,
    pub data: Option<T>,
}

/// 明细响应体
#[derive(Debug, Serialize, Deserialize)]
pub struct DetailResponse {
    pub success: bool,
    pub message: String,
    /// 后端没有返回明细 (不是错误)
    pub sin_detalle: bool,
    pub data: Option<DetailSnapshot>,
}

/// 中标响应体
#[derive(Debug, Serialize, Deserialize)]
pub struct AwardResponse {
    pub success: bool,
    pub message: String,
    pub id: Option<i64>,
    pub payload: Option<AdjudicarPayload>,
    pub detalle: Option<DetailSnapshot>,
}

#[derive(Debug, Deserialize)]
pub struct CatalogosQuery {
    pub id_ente: Option<i64>,
}

#[derive(Debug, Deserialize)]
pub struct ServidoresQuery {
    pub id_ente: i64,
    #[serde(default)]
    pub q: String,
}

fn error_status(err: &ServiceError) -> StatusCode {
    match err {
        ServiceError::Backend(_) => StatusCode::BAD_GATEWAY,
        ServiceError::Validation(_) => StatusCode::UNPROCESSABLE_ENTITY,
        ServiceError::NotFound(_) => StatusCode::NOT_FOUND,
    }
}

fn failure<T: Serialize>(err: ServiceError) -> Response {
    let response: ApiResponse<T> = ApiResponse {
        success: false,
        message: format!("Error: {}", err.reason()),
        data: None,
    };
    (error_status(&err), Json(response)).into_response()
}

fn success<T: Serialize>(message: String, data: T) -> Response {
    let response = ApiResponse {
        success: true,
        message,
        data: Some(data),
    };
    (StatusCode::OK, Json(response)).into_response()
}

/// 健康检查
pub async fn health_check() -> &'static str {
    "OK"
}

/// 加载跟踪明细 (树 + 中标列表 + 会议时间)
pub async fn load_detail<B: Backend>(
    State(service): State<Arc<SeguimientoService<B>>>,
    Path(record_id): Path<i64>,
) -> Response {
    match service.load_detail(record_id).await {
        Ok(snapshot) => {
            let sin_detalle = snapshot.is_empty();
            let response = DetailResponse {
                success: true,
                message: if sin_detalle {
                    "Sin detalle para este seguimiento".to_string()
                } else {
                    format!(
                        "{} partidas, {} adjudicados",
                        snapshot.partidas.len(),
                        snapshot.adjudicados.len()
                    )
                },
                sin_detalle,
                data: Some(snapshot.as_ref().clone()),
            };
            (StatusCode::OK, Json(response)).into_response()
        }
        Err(e) => {
            let response = DetailResponse {
                success: false,
                message: format!("Error: {}", e.reason()),
                sin_detalle: false,
                data: None,
            };
            (error_status(&e), Json(response)).into_response()
        }
    }
}

/// 提交 "Gestión del Rector"
pub async fn submit_gestion<B: Backend>(
    State(service): State<Arc<SeguimientoService<B>>>,
    Path(record_id): Path<i64>,
    Json(form): Json<GestionForm>,
) -> Response {
    match service.submit_gestion(record_id, &form).await {
        Ok(payload) => success(
            "Captura registrada correctamente".to_string(),
            payload,
        ),
        Err(e) => failure::<GestionPayload>(e),
    }
}

/// 中标/延期某个供应商
pub async fn adjudicar<B: Backend>(
    State(service): State<Arc<SeguimientoService<B>>>,
    Path(record_id): Path<i64>,
    Json(form): Json<AwardForm>,
) -> Response {
    match service.adjudicar(record_id, &form).await {
        Ok(outcome) => {
            let message = match outcome.generated_id {
                Some(id) => format!("Proveedor adjudicado correctamente (ID generado: {})", id),
                None => "Guardado correcto pero sin ID devuelto por el backend".to_string(),
            };
            let response = AwardResponse {
                success: true,
                message,
                id: outcome.generated_id,
                payload: Some(outcome.payload),
                detalle: Some(outcome.snapshot.as_ref().clone()),
            };
            (StatusCode::OK, Json(response)).into_response()
        }
        Err(e) => {
            let response = AwardResponse {
                success: false,
                message: format!("Error: {}", e.reason()),
                id: None,
                payload: None,
                detalle: None,
            };
            (error_status(&e), Json(response)).into_response()
        }
    }
}

/// 下拉框目录
pub async fn catalogos<B: Backend>(
    State(service): State<Arc<SeguimientoService<B>>>,
    Query(query): Query<CatalogosQuery>,
) -> Response {
    match service.catalogos(query.id_ente).await {
        Ok(catalogos) => success(
            format!(
                "{} estatus, {} fundamentos, {} servidores",
                catalogos.estatus.len(),
                catalogos.fundamentos.len(),
                catalogos.servidores.len()
            ),
            catalogos,
        ),
        Err(e) => failure::<Catalogos>(e),
    }
}

/// 按名称查找公务员
pub async fn search_servidores<B: Backend>(
    State(service): State<Arc<SeguimientoService<B>>>,
    Query(query): Query<ServidoresQuery>,
) -> Response {
    match service.search_servidores(query.id_ente, &query.q).await {
        Ok(found) => success(format!("{} servidores", found.len()), found),
        Err(e) => failure::<Vec<ServidorPublico>>(e),
    }
}
