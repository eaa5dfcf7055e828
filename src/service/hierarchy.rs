use indexmap::IndexMap;

use super::provider_parser::parse_providers;
use crate::models::{FlatRow, Partida, ProviderCandidate, Rubro};

/// 把扁平行折叠为 Partida -> Rubro -> 供应商 三层树
///
/// 所有展示字段首次出现为准, 后续行只追加, 不覆盖。
pub fn build_hierarchy(rows: &[FlatRow]) -> Vec<Partida> {
    let mut partidas: IndexMap<i64, Partida> = IndexMap::new(); // 保序

    for row in rows {
        let partida = partidas
            .entry(row.id_partida)
            .or_insert_with(|| Partida::new(row.id_partida, row.partida.clone()));

        let rubro = rubro_entry(partida, row);

        if row.proveedores.trim().is_empty() {
            continue;
        }

        let provider_id = resolve_provider_id(row);
        for parsed in parse_providers(&row.proveedores) {
            if parsed.rfc.is_empty() {
                tracing::debug!(
                    "partida {} rubro {}: 供应商格式无法识别, 整段作为名称: {:?}",
                    row.id_partida,
                    row.id_rubro,
                    parsed.name
                );
            }
            rubro.insert_candidate(ProviderCandidate {
                id: provider_id,
                rfc: parsed.rfc.to_string(),
                name: parsed.name.to_string(),
                amount_before_tax: row.importe_sin_iva.clone(),
                amount_total: row.importe_total.clone(),
            });
        }
    }

    partidas.into_values().collect()
}

/// 在 partida 内线性查找 rubro, 不存在时追加
fn rubro_entry<'a>(partida: &'a mut Partida, row: &FlatRow) -> &'a mut Rubro {
    let idx = match partida.rubros.iter().position(|r| r.id == row.id_rubro) {
        Some(idx) => idx,
        None => {
            partida.rubros.push(Rubro {
                id: row.id_rubro,
                name: row.rubro.clone(),
                budget_amount: row.monto_presupuesto_suficiencia.clone(),
                tracking_id: row.id_seguimiento_partida_rubro,
                candidates: Vec::new(),
            });
            partida.rubros.len() - 1
        }
    };
    &mut partida.rubros[idx]
}

/// 供应商ID: 直接关联ID > 备选ID > 0
fn resolve_provider_id(row: &FlatRow) -> i64 {
    if row.id_seguimiento_partida_rubro_proveedor != 0 {
        row.id_seguimiento_partida_rubro_proveedor
    } else if row.id_proveedor_propuesto != 0 {
        row.id_proveedor_propuesto
    } else {
        0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::service::normalizer::normalize_rows;
    use bigdecimal::BigDecimal;
    use serde_json::json;
    use std::collections::HashSet;

    #[test]
    fn single_row_builds_one_branch() {
        let rows = normalize_rows(&[json!({
            "id_partida": 1, "partida": "P1",
            "id_rubro": 10, "rubro": "R1",
            "proveedores": "1)ABC123 Acme;2)XYZ999 Beta"
        })]);
        let tree = build_hierarchy(&rows);

        assert_eq!(tree.len(), 1);
        assert_eq!(tree[0].id, 1);
        assert_eq!(tree[0].name, "P1");
        assert_eq!(tree[0].rubros.len(), 1);

        let rubro = &tree[0].rubros[0];
        assert_eq!(rubro.id, 10);
        let pairs: Vec<_> = rubro
            .candidates
            .iter()
            .map(|c| (c.rfc.as_str(), c.name.as_str()))
            .collect();
        assert_eq!(pairs, vec![("ABC123", "Acme"), ("XYZ999", "Beta")]);
    }

    #[test]
    fn rows_sharing_rubro_merge_candidates() {
        let rows = normalize_rows(&[
            json!({ "id_partida": 1, "id_rubro": 10, "proveedores": "1)ABC123 Acme;2)XYZ999 Beta" }),
            json!({ "id_partida": 1, "id_rubro": 10, "proveedores": "1)XYZ999 Beta;2)QRS555 Gamma" }),
        ]);
        let tree = build_hierarchy(&rows);

        assert_eq!(tree.len(), 1);
        assert_eq!(tree[0].rubros.len(), 1);
        let rfcs: Vec<_> = tree[0].rubros[0]
            .candidates
            .iter()
            .map(|c| c.rfc.as_str())
            .collect();
        assert_eq!(rfcs, vec!["ABC123", "XYZ999", "QRS555"]);
    }

    #[test]
    fn first_seen_display_values_win() {
        let rows = normalize_rows(&[
            json!({ "id_partida": 1, "partida": "Original", "id_rubro": 10, "rubro": "R",
                    "e_monto_presupuesto_suficiencia": 100, "id_seguimiento_partida_rubro": 5 }),
            json!({ "id_partida": 1, "partida": "Cambiada", "id_rubro": 10, "rubro": "R2",
                    "e_monto_presupuesto_suficiencia": 999, "id_seguimiento_partida_rubro": 6 }),
        ]);
        let tree = build_hierarchy(&rows);

        assert_eq!(tree[0].name, "Original");
        let rubro = &tree[0].rubros[0];
        assert_eq!(rubro.name, "R");
        assert_eq!(rubro.budget_amount, BigDecimal::from(100));
        assert_eq!(rubro.tracking_id, 5);
    }

    #[test]
    fn rubro_identity_is_scoped_to_partida() {
        let rows = normalize_rows(&[
            json!({ "id_partida": 1, "id_rubro": 10 }),
            json!({ "id_partida": 2, "id_rubro": 10 }),
            json!({ "id_partida": 1, "id_rubro": 11 }),
        ]);
        let tree = build_hierarchy(&rows);

        assert_eq!(tree.iter().map(|p| p.id).collect::<Vec<_>>(), vec![1, 2]);
        assert_eq!(tree[0].rubros.iter().map(|r| r.id).collect::<Vec<_>>(), vec![10, 11]);
        assert_eq!(tree[1].rubros.len(), 1);
    }

    #[test]
    fn provider_id_priority() {
        let rows = normalize_rows(&[
            json!({ "id_partida": 1, "id_rubro": 10, "proveedores": "1)AAA111 Uno",
                    "id_seguimiento_partida_rubro_proveedor": 70, "id_proveedor": 9 }),
            json!({ "id_partida": 1, "id_rubro": 11, "proveedores": "1)AAA111 Uno",
                    "id_seguimiento_partida_rubro_proveedor": 0,
                    "e_id_seguimiento_partida_rubro_proveedor": 80 }),
            json!({ "id_partida": 1, "id_rubro": 12, "proveedores": "1)AAA111 Uno" }),
        ]);
        let tree = build_hierarchy(&rows);
        let ids: Vec<_> = tree[0].rubros.iter().map(|r| r.candidates[0].id).collect();
        assert_eq!(ids, vec![70, 80, 0]);
    }

    #[test]
    fn same_rfc_with_different_id_is_kept_apart() {
        let rows = normalize_rows(&[
            json!({ "id_partida": 1, "id_rubro": 10, "proveedores": "1)AAA111 Uno",
                    "id_seguimiento_partida_rubro_proveedor": 1 }),
            json!({ "id_partida": 1, "id_rubro": 10, "proveedores": "1)AAA111 Uno",
                    "id_seguimiento_partida_rubro_proveedor": 2 }),
        ]);
        let tree = build_hierarchy(&rows);
        assert_eq!(tree[0].rubros[0].candidates.len(), 2);
    }

    #[test]
    fn missing_providers_contribute_nothing() {
        let rows = normalize_rows(&[
            json!({ "id_partida": 1, "id_rubro": 10 }),
            json!({ "id_partida": 1, "id_rubro": 10, "proveedores": null }),
            json!({ "id_partida": 1, "id_rubro": 10, "proveedores": "" }),
        ]);
        let tree = build_hierarchy(&rows);
        assert_eq!(tree[0].rubros.len(), 1);
        assert!(tree[0].rubros[0].candidates.is_empty());
    }

    #[test]
    fn fallback_segment_becomes_name_only_candidate() {
        let rows = normalize_rows(&[json!({
            "id_partida": 1, "id_rubro": 10, "proveedores": "3)weird format no rfc"
        })]);
        let tree = build_hierarchy(&rows);
        let candidate = &tree[0].rubros[0].candidates[0];
        assert_eq!(candidate.rfc, "");
        assert_eq!(candidate.name, "weird format no rfc");
    }

    #[test]
    fn building_is_idempotent_and_unique() {
        let rows = normalize_rows(&[
            json!({ "id_partida": 2, "id_rubro": 20, "proveedores": "1)AAA111 Uno;1)AAA111 Uno" }),
            json!({ "id_partida": 1, "id_rubro": 10, "proveedores": "2)BBB222 Dos" }),
            json!({ "id_partida": 2, "id_rubro": 21, "proveedores": "3)CCC333 Tres" }),
            json!({ "id_partida": 2, "id_rubro": 20, "proveedores": "1)AAA111 Uno;4)DDD444 Cuatro" }),
        ]);
        let first = build_hierarchy(&rows);
        let second = build_hierarchy(&rows);
        assert_eq!(first, second);

        for partida in &first {
            let rubro_ids: HashSet<_> = partida.rubros.iter().map(|r| r.id).collect();
            assert_eq!(rubro_ids.len(), partida.rubros.len());
            for rubro in &partida.rubros {
                let keys: HashSet<_> = rubro
                    .candidates
                    .iter()
                    .map(|c| (c.id, c.rfc.clone()))
                    .collect();
                assert_eq!(keys.len(), rubro.candidates.len());
            }
        }
    }
}
