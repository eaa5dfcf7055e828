use indexmap::IndexMap;
use std::collections::HashMap;

use crate::models::{AwardedEntry, AwardedProvider, Estatus, FlatRow};

/// 提取当前有效 (vigente) 的中标/延期记录
///
/// 1. 过滤 ADJUDICADO / DIFERIMIENTO 且中标ID非 0 的行
/// 2. 映射为 AwardedEntry
/// 3. 按中标ID去重, 保留第一条
/// 4. 按每个中标ID在本批次中最后出现的状态再次过滤
///
/// 第 4 步是最终的有效性判断: 同一中标ID后面出现 CANCELADO 等状态时, 该记录被剔除。
pub fn extract_awards(rows: &[FlatRow]) -> Vec<AwardedEntry> {
    // 每个中标ID的最新状态 (后出现的覆盖先出现的)
    let mut latest_status: HashMap<i64, &Estatus> = HashMap::new();
    for row in rows {
        let link_id = row.id_seguimiento_partida_rubro_proveedor_adjudicado;
        // 没有状态的行不改变已知状态
        if link_id != 0 && !row.estatus.is_blank() {
            latest_status.insert(link_id, &row.estatus);
        }
    }

    let mut unique: IndexMap<i64, AwardedEntry> = IndexMap::new(); // 保序+去重
    for row in rows
        .iter()
        .filter(|r| r.estatus.is_vigente())
        .filter(|r| r.id_seguimiento_partida_rubro_proveedor_adjudicado != 0)
    {
        unique
            .entry(row.id_seguimiento_partida_rubro_proveedor_adjudicado)
            .or_insert_with(|| to_entry(row));
    }

    unique
        .into_values()
        .filter_map(|mut entry| {
            let current = latest_status.get(&entry.award_link_id)?;
            if !current.is_vigente() {
                tracing::debug!(
                    "中标记录 {} 状态已变为 {}, 不再有效",
                    entry.award_link_id,
                    current
                );
                return None;
            }
            entry.status = (*current).clone();
            Some(entry)
        })
        .collect()
}

fn to_entry(row: &FlatRow) -> AwardedEntry {
    AwardedEntry {
        partida_id: row.id_partida,
        rubro_id: row.id_rubro,
        status: row.estatus.clone(),
        fundamento_id: row.id_fundamento,
        awarded_amount_before_tax: row.importe_ajustado_sin_iva.clone(),
        awarded_amount_total: row.importe_ajustado_total.clone(),
        award_link_id: row.id_seguimiento_partida_rubro_proveedor_adjudicado,
        provider: AwardedProvider {
            rfc: row.rfc_proveedor.clone(),
            razon_social: row.razon_social.clone(),
            nombre_comercial: row.nombre_comercial.clone(),
            persona_juridica: row.persona_juridica.clone(),
            correo: row.correo_electronico.clone(),
            entidad_federativa: row.entidad_federativa.clone(),
        },
    }
}

/// (partida, rubro) 是否已有有效的中标记录
pub fn has_active_award(awards: &[AwardedEntry], partida_id: i64, rubro_id: i64) -> bool {
    awards
        .iter()
        .any(|a| a.partida_id == partida_id && a.rubro_id == rubro_id && a.status.is_vigente())
}
