pub mod backend;
pub mod error;

pub use backend::BackendClient;
pub use error::ClientError;

use serde_json::Value;
use std::future::Future;

use crate::models::{AdjudicarPayload, GestionPayload, ServidorPublico};

/// 后端 REST 接口, 服务层只依赖这个 trait
pub trait Backend: Send + Sync + 'static {
    /// sp_rector_seguimiento_detalle 的扁平结果; 非数组视为空
    fn fetch_detail(
        &self,
        record_id: i64,
    ) -> impl Future<Output = Result<Vec<Value>, ClientError>> + Send;

    fn fetch_estatus_options(&self) -> impl Future<Output = Result<Vec<String>, ClientError>> + Send;

    fn fetch_fundamentos(&self) -> impl Future<Output = Result<Vec<Value>, ClientError>> + Send;

    fn fetch_servidores(
        &self,
        id_ente: i64,
    ) -> impl Future<Output = Result<Vec<ServidorPublico>, ClientError>> + Send;

    /// PUT seguimiento-gestion
    fn update_gestion(
        &self,
        record_id: i64,
        payload: &GestionPayload,
    ) -> impl Future<Output = Result<(), ClientError>> + Send;

    /// 已存在的中标记录ID
    fn find_existing_award(
        &self,
        provider_id: i64,
    ) -> impl Future<Output = Result<Option<i64>, ClientError>> + Send;

    /// 返回后端生成的ID (可能没有)
    fn post_award(
        &self,
        payload: &AdjudicarPayload,
    ) -> impl Future<Output = Result<Option<i64>, ClientError>> + Send;
}
