use serde::{Deserialize, Serialize};

use super::{AwardedEntry, Partida};

/// 会议时间 (表单的两个字段)
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MeetingSchedule {
    /// dd/mm/yyyy
    pub date: Option<String>,
    /// hh:mm
    pub time: Option<String>,
}

impl MeetingSchedule {
    pub fn new(date: impl Into<String>, time: impl Into<String>) -> Self {
        Self {
            date: Some(date.into()),
            time: Some(time.into()),
        }
    }
}

/// 明细表头 (取第一行)
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DetalleGeneral {
    pub ente: String,
    pub ente_clasificacion: String,
    pub tipo_licitacion: String,
    pub tipo_licitacion_no_veces: i64,
    pub tipo_licitacion_no_veces_descripcion: String,
    pub tipo_evento: String,
    pub estatus_actual: String,
    pub fecha_y_hora_reunion: Option<String>,
}

/// 一次明细加载的完整结果, 每次加载整体替换
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DetailSnapshot {
    pub record_id: i64,
    pub general: Option<DetalleGeneral>,
    pub partidas: Vec<Partida>,
    pub adjudicados: Vec<AwardedEntry>,
    pub reunion: MeetingSchedule,
}

impl DetailSnapshot {
    pub fn empty(record_id: i64) -> Self {
        Self {
            record_id,
            ..Default::default()
        }
    }

    /// 后端没有返回任何明细
    pub fn is_empty(&self) -> bool {
        self.general.is_none()
    }

    pub fn find_partida(&self, partida_id: i64) -> Option<&Partida> {
        self.partidas.iter().find(|p| p.id == partida_id)
    }
}
