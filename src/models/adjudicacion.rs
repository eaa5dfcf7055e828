use bigdecimal::BigDecimal;
use serde::{Deserialize, Serialize};

use super::Estatus;

/// 中标/延期记录, 按 award_link_id 唯一
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AwardedEntry {
    pub partida_id: i64,
    pub rubro_id: i64,
    pub status: Estatus,
    pub fundamento_id: i64,
    pub awarded_amount_before_tax: BigDecimal,
    pub awarded_amount_total: BigDecimal,
    /// id_seguimiento_partida_rubro_proveedor_adjudicado
    pub award_link_id: i64,
    pub provider: AwardedProvider,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AwardedProvider {
    pub rfc: String,
    pub razon_social: String,
    pub nombre_comercial: String,
    pub persona_juridica: String,
    pub correo: String,
    pub entidad_federativa: String,
}
