use bigdecimal::BigDecimal;
use serde::{Deserialize, Serialize};
use std::fmt;

/// 分项状态 (enum-seguimiento-partida-rubro-estatus)
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Estatus {
    Adjudicado,
    Diferimiento,
    Cancelado,
    /// 其他状态原样保留 (包括空字符串)
    Otro(String),
}

impl Estatus {
    pub fn from_raw(raw: &str) -> Self {
        match raw {
            "ADJUDICADO" => Estatus::Adjudicado,
            "DIFERIMIENTO" => Estatus::Diferimiento,
            "CANCELADO" => Estatus::Cancelado,
            other => Estatus::Otro(other.to_string()),
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            Estatus::Adjudicado => "ADJUDICADO",
            Estatus::Diferimiento => "DIFERIMIENTO",
            Estatus::Cancelado => "CANCELADO",
            Estatus::Otro(s) => s,
        }
    }

    /// 行里没有状态 (字段缺失或为空)
    pub fn is_blank(&self) -> bool {
        matches!(self, Estatus::Otro(s) if s.trim().is_empty())
    }

    /// 仍然有效 (vigente): 已中标或延期
    pub fn is_vigente(&self) -> bool {
        matches!(self, Estatus::Adjudicado | Estatus::Diferimiento)
    }

    /// 需要法律依据和调整金额的状态
    pub fn requires_fundamento(&self) -> bool {
        self.is_vigente()
    }
}

impl From<String> for Estatus {
    fn from(value: String) -> Self {
        Estatus::from_raw(&value)
    }
}

impl From<Estatus> for String {
    fn from(value: Estatus) -> Self {
        value.as_str().to_string()
    }
}

impl fmt::Display for Estatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Default for Estatus {
    fn default() -> Self {
        Estatus::Otro(String::new())
    }
}

/// 规范化后的明细行 (sp_rector_seguimiento_detalle 的一行)
///
/// 所有字段都有确定的类型和默认值, 缺失金额为 0, 缺失文本为空串。
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FlatRow {
    pub id_partida: i64,
    pub partida: String,
    pub id_rubro: i64,
    pub rubro: String,
    pub monto_presupuesto_suficiencia: BigDecimal,
    pub id_seguimiento_partida_rubro: i64,
    /// 直接关联的供应商记录ID
    pub id_seguimiento_partida_rubro_proveedor: i64,
    /// 备选 (propuesto) 供应商ID
    pub id_proveedor_propuesto: i64,
    /// 打包的候选供应商字符串, 如 "1)RFC123 Acme;2)RFC456 Otro"
    pub proveedores: String,
    pub importe_sin_iva: BigDecimal,
    pub importe_total: BigDecimal,

    pub estatus: Estatus,
    pub id_seguimiento_partida_rubro_proveedor_adjudicado: i64,
    pub id_fundamento: i64,
    pub importe_ajustado_sin_iva: BigDecimal,
    pub importe_ajustado_total: BigDecimal,
    pub rfc_proveedor: String,
    pub razon_social: String,
    pub nombre_comercial: String,
    pub persona_juridica: String,
    pub correo_electronico: String,
    pub entidad_federativa: String,

    pub fecha_y_hora_reunion: Option<String>,

    // 表头信息 (只取第一行)
    pub ente: String,
    pub ente_clasificacion: String,
    pub tipo_licitacion: String,
    pub tipo_licitacion_no_veces: i64,
    pub tipo_licitacion_no_veces_descripcion: String,
    pub tipo_evento: String,
    pub estatus_general: String,
}
