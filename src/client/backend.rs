use reqwest::Response;
use serde::de::DeserializeOwned;
use serde_json::Value;
use std::time::Duration;
use tracing::{debug, info};

use super::{Backend, ClientError};
use crate::config::BackendConfig;
use crate::models::{AdjudicarPayload, GestionPayload, ServidorPublico};

/// licitación 后端的 HTTP 客户端
pub struct BackendClient {
    client: reqwest::Client,
    base_url: String,
}

impl BackendClient {
    pub fn new(config: &BackendConfig) -> Result<Self, ClientError> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;
        Ok(Self {
            client,
            base_url: config.api_base(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    async fn get_json<T: DeserializeOwned>(&self, url: &str) -> Result<T, ClientError> {
        debug!(url = %url, "GET");
        let resp = self.client.get(url).send().await?;
        read_json(resp).await
    }
}

/// 非 2xx 转为 ClientError::Server
async fn check_status(resp: Response) -> Result<Response, ClientError> {
    let status = resp.status();
    if status.is_success() {
        return Ok(resp);
    }
    let body = resp.text().await.unwrap_or_default();
    Err(ClientError::from_response(status.as_u16(), body))
}

async fn read_json<T: DeserializeOwned>(resp: Response) -> Result<T, ClientError> {
    let resp = check_status(resp).await?;
    let bytes = resp.bytes().await?;
    Ok(serde_json::from_slice(&bytes)?)
}

/// 不看状态码, 只要响应体是 JSON 就返回; 非 JSON 的错误响应才转为 ClientError
async fn read_json_any_status(resp: Response) -> Result<Value, ClientError> {
    let status = resp.status();
    let body = resp.text().await?;
    match serde_json::from_str::<Value>(&body) {
        Ok(value) => {
            if !status.is_success() {
                debug!(status = status.as_u16(), "明细接口返回非 2xx 的 JSON, 按无数据处理");
            }
            Ok(value)
        }
        Err(e) if status.is_success() => Err(e.into()),
        Err(_) => Err(ClientError::from_response(status.as_u16(), body)),
    }
}

/// 数组原样返回, 其他一律视为空
pub(crate) fn rows_or_empty(value: Value) -> Vec<Value> {
    match value {
        Value::Array(rows) => rows,
        _ => Vec::new(),
    }
}

/// 目录接口可能直接返回数组, 也可能包在 `resultado` 里
pub(crate) fn catalog_rows(value: Value) -> Vec<Value> {
    match value {
        Value::Array(rows) => rows,
        Value::Object(mut obj) => obj.remove("resultado").map(rows_or_empty).unwrap_or_default(),
        _ => Vec::new(),
    }
}

/// 提取 `{id}` 或裸数字, 0 和负数视为没有
pub(crate) fn generated_id(value: &Value) -> Option<i64> {
    let id = match value {
        Value::Number(n) => n.as_i64(),
        Value::Object(obj) => obj.get("id").and_then(Value::as_i64),
        _ => None,
    }?;
    (id > 0).then_some(id)
}

impl Backend for BackendClient {
    async fn fetch_detail(&self, record_id: i64) -> Result<Vec<Value>, ClientError> {
        let url = self.url(&format!(
            "/rector/seguimiento-detalle?p_id={}&incluir_detalle_proveedor=true",
            record_id
        ));
        debug!(url = %url, "GET");
        let resp = self.client.get(&url).send().await?;
        let value = read_json_any_status(resp).await?;
        let rows = rows_or_empty(value);
        info!(record_id, rows = rows.len(), "detalle recibido");
        Ok(rows)
    }

    async fn fetch_estatus_options(&self) -> Result<Vec<String>, ClientError> {
        let url = self.url("/procesos/enum-seguimiento-partida-rubro-estatus");
        let value: Value = self.get_json(&url).await?;
        let options = rows_or_empty(value)
            .into_iter()
            .filter_map(|v| match v {
                Value::String(s) => Some(s),
                Value::Object(mut obj) => match obj.remove("estatus") {
                    Some(Value::String(s)) => Some(s),
                    _ => None,
                },
                _ => None,
            })
            .collect();
        Ok(options)
    }

    async fn fetch_fundamentos(&self) -> Result<Vec<Value>, ClientError> {
        let url = self.url("/catalogos/cat-fundamiento?p_id=-99");
        let value: Value = self.get_json(&url).await?;
        Ok(catalog_rows(value))
    }

    async fn fetch_servidores(&self, id_ente: i64) -> Result<Vec<ServidorPublico>, ClientError> {
        let url = self.url(&format!(
            "/catalogos/servidores-publicos-ente?p_id=-99&p_id_ente={}",
            id_ente
        ));
        let value: Value = self.get_json(&url).await?;
        let servidores = rows_or_empty(value)
            .into_iter()
            .filter_map(|v| serde_json::from_value(v).ok())
            .collect();
        Ok(servidores)
    }

    async fn update_gestion(
        &self,
        record_id: i64,
        payload: &GestionPayload,
    ) -> Result<(), ClientError> {
        let url = self.url(&format!("/rector/seguimiento-gestion/{}", record_id));
        info!(url = %url, estatus = %payload.p_r_estatus, "enviando gestión");
        let resp = self.client.put(&url).json(payload).send().await?;
        check_status(resp).await?;
        Ok(())
    }

    async fn find_existing_award(&self, provider_id: i64) -> Result<Option<i64>, ClientError> {
        let url = self.url(&format!(
            "/rector/verificar-adjudicado?p_id_rubro_proveedor={}",
            provider_id
        ));
        let resp = self.client.get(&url).send().await?;
        if !resp.status().is_success() {
            return Ok(None);
        }
        let value: Value = resp.json().await?;
        Ok(generated_id(&value))
    }

    async fn post_award(&self, payload: &AdjudicarPayload) -> Result<Option<i64>, ClientError> {
        let url = self.url("/rector/seguimiento-gestion-proveedor-adjudicado/");
        info!(
            url = %url,
            proveedor = payload.p_id_seguimiento_partida_rubro_proveedor,
            estatus = %payload.p_estatus,
            "enviando adjudicación"
        );
        let resp = self.client.post(&url).json(payload).send().await?;
        let resp = check_status(resp).await?;
        let body = resp.text().await?;
        let value = serde_json::from_str::<Value>(&body).unwrap_or(Value::Null);
        Ok(generated_id(&value))
    }
}
