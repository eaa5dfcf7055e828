use serde::{Deserialize, Serialize};

use super::meeting::{compose_meeting, issue_date_to_iso, mask_date, mask_time};
use crate::models::{Accion, GestionPayload, MeetingSchedule};

/// 默认登记用户 (会话中没有用户时)
pub const DEFAULT_USER_ID: i64 = 1;

/// 前端提交的 "Gestión del Rector" 表单
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct GestionForm {
    #[serde(default)]
    pub oficio: String,
    /// dd/mm/yyyy
    #[serde(default)]
    pub fecha_emision: Option<String>,
    #[serde(default)]
    pub asunto: String,
    #[serde(default)]
    pub fecha_reunion: Option<String>,
    #[serde(default)]
    pub hora_reunion: Option<String>,
    #[serde(default)]
    pub estatus_general: String,
    #[serde(default)]
    pub id_servidor_publico: Option<i64>,
    #[serde(default)]
    pub observaciones: String,
    #[serde(default)]
    pub con_observaciones: bool,
    #[serde(default)]
    pub id_usuario: Option<i64>,
}

impl GestionForm {
    /// 经过输入掩码后的会议时间
    pub fn meeting(&self) -> MeetingSchedule {
        MeetingSchedule {
            date: self
                .fecha_reunion
                .as_deref()
                .map(mask_date)
                .filter(|s| !s.is_empty()),
            time: self
                .hora_reunion
                .as_deref()
                .map(mask_time)
                .filter(|s| !s.is_empty()),
        }
    }
}

/// 生成 seguimiento-gestion 的更新参数
///
/// 会议日期或时间缺一时整个字段为 null; 未勾选备注时备注为空串。
pub fn build_gestion_payload(form: &GestionForm) -> GestionPayload {
    let fecha_emision = form.fecha_emision.as_deref().map(mask_date);

    GestionPayload {
        p_accion: Accion::Editar,
        p_r_suplencia_oficio_no: form.oficio.clone(),
        p_r_fecha_emision: issue_date_to_iso(fecha_emision.as_deref()),
        p_r_asunto: form.asunto.clone(),
        p_r_fecha_y_hora_reunion: compose_meeting(&form.meeting()),
        p_r_estatus: form.estatus_general.clone(),
        p_r_id_usuario_registra: form.id_usuario.filter(|id| *id != 0).unwrap_or(DEFAULT_USER_ID),
        p_r_id_servidor_publico_asiste: form.id_servidor_publico.filter(|id| *id != 0),
        p_r_observaciones: if form.con_observaciones {
            form.observaciones.clone()
        } else {
            String::new()
        },
        p_r_con_observaciones: form.con_observaciones,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn form() -> GestionForm {
        GestionForm {
            oficio: "OF-123/2025".into(),
            fecha_emision: Some("01/03/2025".into()),
            asunto: "Revisión de propuestas".into(),
            fecha_reunion: Some("07/03/2025".into()),
            hora_reunion: Some("09:05".into()),
            estatus_general: "EN PROCESO".into(),
            id_servidor_publico: Some(14),
            observaciones: "Falta documentación".into(),
            con_observaciones: true,
            id_usuario: Some(3),
        }
    }

    #[test]
    fn full_form_maps_every_field() {
        let payload = build_gestion_payload(&form());
        assert_eq!(payload.p_accion, Accion::Editar);
        assert_eq!(payload.p_r_suplencia_oficio_no, "OF-123/2025");
        assert_eq!(payload.p_r_fecha_emision.as_deref(), Some("2025-03-01"));
        assert_eq!(payload.p_r_fecha_y_hora_reunion.as_deref(), Some("2025-03-07T09:05:00"));
        assert_eq!(payload.p_r_estatus, "EN PROCESO");
        assert_eq!(payload.p_r_id_usuario_registra, 3);
        assert_eq!(payload.p_r_id_servidor_publico_asiste, Some(14));
        assert_eq!(payload.p_r_observaciones, "Falta documentación");
        assert!(payload.p_r_con_observaciones);
    }

    #[test]
    fn half_meeting_is_sent_as_null() {
        let mut f = form();
        f.hora_reunion = None;
        let payload = build_gestion_payload(&f);
        assert_eq!(payload.p_r_fecha_y_hora_reunion, None);

        let value = serde_json::to_value(&payload).unwrap();
        assert!(value["p_r_fecha_y_hora_reunion"].is_null());
    }

    #[test]
    fn observations_are_blank_when_toggle_is_off() {
        let mut f = form();
        f.con_observaciones = false;
        let value = serde_json::to_value(build_gestion_payload(&f)).unwrap();
        assert_eq!(value["p_r_observaciones"], json!(""));
        assert_eq!(value["p_r_con_observaciones"], json!(false));
    }

    #[test]
    fn defaults_when_session_data_is_missing() {
        let payload = build_gestion_payload(&GestionForm::default());
        assert_eq!(payload.p_r_id_usuario_registra, DEFAULT_USER_ID);
        assert_eq!(payload.p_r_id_servidor_publico_asiste, None);
        assert_eq!(payload.p_r_fecha_emision, None);
        assert_eq!(payload.p_r_fecha_y_hora_reunion, None);

        let value = serde_json::to_value(&payload).unwrap();
        assert_eq!(value["p_accion"], json!("EDITAR"));
    }

    #[test]
    fn loosely_typed_inputs_are_masked() {
        let mut f = form();
        f.fecha_reunion = Some("07032025".into());
        f.hora_reunion = Some("0905".into());
        let payload = build_gestion_payload(&f);
        assert_eq!(payload.p_r_fecha_y_hora_reunion.as_deref(), Some("2025-03-07T09:05:00"));
    }
}
