use thiserror::Error;

#[derive(Error, Debug)]
pub enum ClientError {
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),
    #[error("backend returned {status}: {body}")]
    Server {
        status: u16,
        /// 响应体中的 `detail` 字段
        detail: Option<String>,
        body: String,
    },
    #[error("JSON parse error: {0}")]
    Json(#[from] serde_json::Error),
}

impl ClientError {
    /// 从非 2xx 响应体构造, 尝试取出 `detail`
    pub fn from_response(status: u16, body: String) -> Self {
        let detail = serde_json::from_str::<serde_json::Value>(&body)
            .ok()
            .and_then(|v| match v.get("detail")? {
                serde_json::Value::String(s) => Some(s.clone()),
                serde_json::Value::Null => None,
                other => Some(other.to_string()),
            });
        ClientError::Server {
            status,
            detail,
            body,
        }
    }

    /// 给用户看的失败原因
    pub fn reason(&self) -> String {
        match self {
            ClientError::Server {
                detail: Some(detail),
                ..
            } => detail.clone(),
            ClientError::Server { status, .. } => format!("backend returned HTTP {}", status),
            ClientError::Http(e) => format!("backend unreachable: {}", e),
            ClientError::Json(e) => format!("unexpected backend response: {}", e),
        }
    }
}
