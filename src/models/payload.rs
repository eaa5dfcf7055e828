use bigdecimal::BigDecimal;
use serde::{Deserialize, Serialize};

/// 操作类型, 本服务只发送更新
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Accion {
    #[serde(rename = "EDITAR")]
    Editar,
}

/// sp_rector_seguimiento_gestion 参数
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GestionPayload {
    pub p_accion: Accion,
    pub p_r_suplencia_oficio_no: String,
    /// yyyy-mm-dd
    pub p_r_fecha_emision: Option<String>,
    pub p_r_asunto: String,
    /// YYYY-MM-DDTHH:MM:00, 日期或时间缺一则为 null
    pub p_r_fecha_y_hora_reunion: Option<String>,
    pub p_r_estatus: String,
    pub p_r_id_usuario_registra: i64,
    pub p_r_id_servidor_publico_asiste: Option<i64>,
    pub p_r_observaciones: String,
    pub p_r_con_observaciones: bool,
}

/// sp_rector_seguimiento_gestion_proveedor_adjudicado 参数
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AdjudicarPayload {
    pub p_estatus: String,
    pub p_id_seguimiento_partida_rubro: i64,
    pub p_id_seguimiento_partida_rubro_proveedor: i64,
    /// 已存在的中标记录ID, 新建时为 null
    pub p_id: Option<i64>,
    pub p_importe_ajustado_sin_iva: BigDecimal,
    pub p_importe_ajustado_total: BigDecimal,
    pub p_id_fundamento: i64,
}
