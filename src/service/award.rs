use bigdecimal::{BigDecimal, Zero};
use serde::{Deserialize, Serialize};

use super::adjudication::has_active_award;
use crate::models::{AdjudicarPayload, DetailSnapshot, Estatus, ProviderCandidate};

/// "Seleccionar estatus proveedor" 表单
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AwardForm {
    pub id_partida: i64,
    pub id_rubro: i64,
    /// 选中的供应商: ID 字符串或 RFC
    #[serde(default)]
    pub proveedor: String,
    #[serde(default)]
    pub estatus: String,
    #[serde(default)]
    pub id_fundamento: Option<i64>,
    #[serde(default)]
    pub importe_sin_iva: Option<BigDecimal>,
    #[serde(default)]
    pub importe_total: Option<BigDecimal>,
}

/// 校验通过后的中标请求, 还缺已有记录ID (p_id)
#[derive(Debug, Clone, PartialEq)]
pub struct AwardRequest {
    pub tracking_id: i64,
    pub provider: ProviderCandidate,
    pub estatus: Estatus,
    pub fundamento_id: i64,
    pub amount_before_tax: BigDecimal,
    pub amount_total: BigDecimal,
}

impl AwardRequest {
    pub fn into_payload(self, existing_id: Option<i64>) -> AdjudicarPayload {
        AdjudicarPayload {
            p_estatus: self.estatus.to_string(),
            p_id_seguimiento_partida_rubro: self.tracking_id,
            p_id_seguimiento_partida_rubro_proveedor: self.provider.id,
            p_id: existing_id,
            p_importe_ajustado_sin_iva: self.amount_before_tax,
            p_importe_ajustado_total: self.amount_total,
            p_id_fundamento: self.fundamento_id,
        }
    }
}

/// 按顺序校验中标表单, 失败时返回给用户看的原因
pub fn validate_award(snapshot: &DetailSnapshot, form: &AwardForm) -> Result<AwardRequest, String> {
    let key = form.proveedor.trim();
    if key.is_empty() {
        return Err("Selecciona un proveedor antes de adjudicar".into());
    }
    if form.estatus.trim().is_empty() {
        return Err("Selecciona un estatus antes de adjudicar".into());
    }
    let estatus = Estatus::from_raw(form.estatus.trim());
    let requires_fundamento = estatus.requires_fundamento();

    let (fundamento_id, amount_before_tax, amount_total) = if requires_fundamento {
        let fundamento_id = form
            .id_fundamento
            .filter(|id| *id != 0)
            .ok_or("Selecciona fundamento legal antes de adjudicar")?;
        match (&form.importe_sin_iva, &form.importe_total) {
            (Some(sin_iva), Some(total)) if *sin_iva > BigDecimal::zero() => {
                (fundamento_id, sin_iva.clone(), total.clone())
            }
            _ => return Err("Ingresa los importes ajustados correctamente".into()),
        }
    } else {
        (0, BigDecimal::zero(), BigDecimal::zero())
    };

    let partida = snapshot
        .find_partida(form.id_partida)
        .ok_or("No se encontró la partida seleccionada")?;
    let rubro = partida
        .find_rubro(form.id_rubro)
        .ok_or("No se encontró el rubro seleccionado")?;
    if rubro.tracking_id == 0 {
        return Err("No se encontró el id_seguimiento_partida_rubro".into());
    }

    if has_active_award(&snapshot.adjudicados, partida.id, rubro.id) {
        return Err(
            "Ya existe un registro adjudicado para este rubro. No puedes adjudicar dos veces."
                .into(),
        );
    }

    let provider = rubro
        .candidates
        .iter()
        .find(|c| c.id.to_string() == key || c.rfc == key)
        .or_else(|| find_by_rfc_anywhere(snapshot, key))
        .filter(|c| c.id != 0)
        .cloned()
        .ok_or("No se encontró el proveedor seleccionado en la base de datos")?;

    Ok(AwardRequest {
        tracking_id: rubro.tracking_id,
        provider,
        estatus,
        fundamento_id,
        amount_before_tax,
        amount_total,
    })
}

/// 全树按 RFC 查找, 最后一个匹配为准
fn find_by_rfc_anywhere<'a>(snapshot: &'a DetailSnapshot, rfc: &str) -> Option<&'a ProviderCandidate> {
    snapshot
        .partidas
        .iter()
        .flat_map(|p| p.rubros.iter())
        .flat_map(|r| r.candidates.iter())
        .filter(|c| c.rfc == rfc)
        .last()
}
