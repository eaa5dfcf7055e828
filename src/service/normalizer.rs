use bigdecimal::{BigDecimal, Zero};
use serde_json::{Map, Value};
use std::str::FromStr;

use crate::models::{Estatus, FlatRow};

/// 字段别名表: 带前缀的名字排在前面, 存在即优先
pub mod aliases {
    pub const ID_PARTIDA: &[&str] = &["e_id_partida", "id_partida"];
    pub const PARTIDA: &[&str] = &["e_partida", "partida"];
    pub const ID_RUBRO: &[&str] = &["e_id_rubro", "id_rubro"];
    pub const RUBRO: &[&str] = &["e_rubro", "rubro"];
    pub const MONTO_SUFICIENCIA: &[&str] = &[
        "e_monto_presupuesto_suficiencia",
        "monto_presupuesto_suficiencia",
    ];
    pub const ID_SEGUIMIENTO_PARTIDA_RUBRO: &[&str] = &[
        "e_id_seguimiento_partida_rubro",
        "id_seguimiento_partida_rubro",
    ];
    pub const ID_PROVEEDOR_VINCULADO: &[&str] = &["id_seguimiento_partida_rubro_proveedor"];
    pub const ID_PROVEEDOR_PROPUESTO: &[&str] =
        &["e_id_seguimiento_partida_rubro_proveedor", "id_proveedor"];
    pub const PROVEEDORES: &[&str] = &["e_proveedores", "proveedores"];
    pub const IMPORTE_SIN_IVA: &[&str] = &["e_importe_sin_iva", "importe_sin_iva"];
    pub const IMPORTE_TOTAL: &[&str] = &["e_importe_total", "importe_total"];
    pub const ESTATUS: &[&str] = &["e_estatus", "estatus"];
    pub const ID_ADJUDICADO: &[&str] = &[
        "e_id_seguimiento_partida_rubro_proveedor_adjudicado",
        "id_seguimiento_partida_rubro_proveedor_adjudicado",
    ];
    pub const ID_FUNDAMENTO: &[&str] = &["e_id_fundamento", "id_fundamento"];
    pub const IMPORTE_AJUSTADO_SIN_IVA: &[&str] =
        &["e_importe_ajustado_sin_iva", "importe_ajustado_sin_iva"];
    pub const IMPORTE_AJUSTADO_TOTAL: &[&str] =
        &["e_importe_ajustado_total", "importe_ajustado_total"];
    pub const RFC_PROVEEDOR: &[&str] = &["e_rfc_proveedor", "rfc_proveedor"];
    pub const RAZON_SOCIAL: &[&str] = &["e_razon_social", "razon_social"];
    pub const NOMBRE_COMERCIAL: &[&str] = &["e_nombre_comercial", "nombre_comercial"];
    pub const PERSONA_JURIDICA: &[&str] = &["e_persona_juridica", "persona_juridica"];
    pub const CORREO: &[&str] = &["e_correo_electronico", "correo_electronico"];
    pub const ENTIDAD_FEDERATIVA: &[&str] = &["e_entidad_federativa", "entidad_federativa"];
    pub const FECHA_Y_HORA_REUNION: &[&str] =
        &["e_fecha_y_hora_reunion", "fecha_y_hora_reunion"];
    pub const ENTE: &[&str] = &["e_ente", "ente"];
    pub const ENTE_CLASIFICACION: &[&str] = &["e_ente_clasificacion", "ente_clasificacion"];
    pub const TIPO_LICITACION: &[&str] = &["e_tipo_licitacion", "tipo_licitacion"];
    pub const TIPO_LICITACION_NO_VECES: &[&str] =
        &["e_tipo_licitacion_no_veces", "tipo_licitacion_no_veces"];
    pub const TIPO_LICITACION_NO_VECES_DESCRIPCION: &[&str] = &[
        "e_tipo_licitacion_no_veces_descripcion",
        "tipo_licitacion_no_veces_descripcion",
    ];
    pub const TIPO_EVENTO: &[&str] = &["e_tipo_evento", "tipo_evento"];
    pub const ESTATUS_GENERAL: &[&str] = &["r_estatus"];
}

/// 批量规范化, 从不失败
pub fn normalize_rows(rows: &[Value]) -> Vec<FlatRow> {
    rows.iter().map(normalize_row).collect()
}

/// 单行规范化; 非对象的行得到全默认值
pub fn normalize_row(raw: &Value) -> FlatRow {
    let empty = Map::new();
    let row = raw.as_object().unwrap_or(&empty);

    FlatRow {
        id_partida: int_field(row, aliases::ID_PARTIDA),
        partida: text_field(row, aliases::PARTIDA),
        id_rubro: int_field(row, aliases::ID_RUBRO),
        rubro: text_field(row, aliases::RUBRO),
        monto_presupuesto_suficiencia: decimal_field(row, aliases::MONTO_SUFICIENCIA),
        id_seguimiento_partida_rubro: int_field(row, aliases::ID_SEGUIMIENTO_PARTIDA_RUBRO),
        id_seguimiento_partida_rubro_proveedor: int_field(row, aliases::ID_PROVEEDOR_VINCULADO),
        id_proveedor_propuesto: int_field(row, aliases::ID_PROVEEDOR_PROPUESTO),
        proveedores: text_field(row, aliases::PROVEEDORES),
        importe_sin_iva: decimal_field(row, aliases::IMPORTE_SIN_IVA),
        importe_total: decimal_field(row, aliases::IMPORTE_TOTAL),

        estatus: Estatus::from_raw(&text_field(row, aliases::ESTATUS)),
        id_seguimiento_partida_rubro_proveedor_adjudicado: int_field(row, aliases::ID_ADJUDICADO),
        id_fundamento: int_field(row, aliases::ID_FUNDAMENTO),
        importe_ajustado_sin_iva: decimal_field(row, aliases::IMPORTE_AJUSTADO_SIN_IVA),
        importe_ajustado_total: decimal_field(row, aliases::IMPORTE_AJUSTADO_TOTAL),
        rfc_proveedor: text_field(row, aliases::RFC_PROVEEDOR),
        razon_social: text_field(row, aliases::RAZON_SOCIAL),
        nombre_comercial: text_field(row, aliases::NOMBRE_COMERCIAL),
        persona_juridica: text_field(row, aliases::PERSONA_JURIDICA),
        correo_electronico: text_field(row, aliases::CORREO),
        entidad_federativa: text_field(row, aliases::ENTIDAD_FEDERATIVA),

        fecha_y_hora_reunion: optional_text_field(row, aliases::FECHA_Y_HORA_REUNION),

        ente: text_field(row, aliases::ENTE),
        ente_clasificacion: text_field(row, aliases::ENTE_CLASIFICACION),
        tipo_licitacion: text_field(row, aliases::TIPO_LICITACION),
        tipo_licitacion_no_veces: int_field(row, aliases::TIPO_LICITACION_NO_VECES),
        tipo_licitacion_no_veces_descripcion: text_field(
            row,
            aliases::TIPO_LICITACION_NO_VECES_DESCRIPCION,
        ),
        tipo_evento: text_field(row, aliases::TIPO_EVENTO),
        estatus_general: text_field(row, aliases::ESTATUS_GENERAL),
    }
}

/// 按别名顺序查找第一个存在且非 null 的字段
pub fn lookup<'a>(row: &'a Map<String, Value>, names: &[&str]) -> Option<&'a Value> {
    names
        .iter()
        .filter_map(|name| row.get(*name))
        .find(|v| !v.is_null())
}

fn text_field(row: &Map<String, Value>, names: &[&str]) -> String {
    lookup(row, names).map(coerce_text).unwrap_or_default()
}

fn optional_text_field(row: &Map<String, Value>, names: &[&str]) -> Option<String> {
    lookup(row, names)
        .map(coerce_text)
        .filter(|s| !s.trim().is_empty())
}

fn int_field(row: &Map<String, Value>, names: &[&str]) -> i64 {
    lookup(row, names).map(coerce_int).unwrap_or(0)
}

fn decimal_field(row: &Map<String, Value>, names: &[&str]) -> BigDecimal {
    lookup(row, names)
        .map(coerce_decimal)
        .unwrap_or_else(BigDecimal::zero)
}

pub fn coerce_text(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Number(n) => n.to_string(),
        Value::Bool(b) => b.to_string(),
        _ => String::new(),
    }
}

/// 数值转换, 无法解析时为 0 (空串、null 都视为 0)
pub fn coerce_decimal(value: &Value) -> BigDecimal {
    match value {
        Value::Number(n) => BigDecimal::from_str(&n.to_string()).unwrap_or_else(|_| BigDecimal::zero()),
        Value::String(s) => {
            let trimmed = s.trim();
            if trimmed.is_empty() {
                return BigDecimal::zero();
            }
            BigDecimal::from_str(trimmed).unwrap_or_else(|_| BigDecimal::zero())
        }
        Value::Bool(true) => BigDecimal::from(1),
        _ => BigDecimal::zero(),
    }
}

/// 整数ID转换, 小数部分截断, 无法解析时为 0
pub fn coerce_int(value: &Value) -> i64 {
    match value {
        Value::Number(n) => n
            .as_i64()
            .or_else(|| n.as_f64().filter(|f| f.is_finite()).map(|f| f.trunc() as i64))
            .unwrap_or(0),
        Value::String(s) => {
            let trimmed = s.trim();
            trimmed
                .parse::<i64>()
                .ok()
                .or_else(|| {
                    trimmed
                        .parse::<f64>()
                        .ok()
                        .filter(|f| f.is_finite())
                        .map(|f| f.trunc() as i64)
                })
                .unwrap_or(0)
        }
        Value::Bool(true) => 1,
        _ => 0,
    }
}
