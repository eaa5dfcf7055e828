use serde::{Deserialize, Serialize};

/// 公务员 (servidores-publicos-ente)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ServidorPublico {
    #[serde(default)]
    pub id: i64,
    #[serde(default)]
    pub nombre: String,
    /// 其余字段原样透传
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

/// 下拉框使用的目录数据
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Catalogos {
    pub estatus: Vec<String>,
    pub fundamentos: Vec<serde_json::Value>,
    pub servidores: Vec<ServidorPublico>,
}
