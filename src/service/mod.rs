pub mod adjudication;
pub mod award;
pub mod cache;
pub mod hierarchy;
pub mod meeting;
pub mod normalizer;
pub mod payload;
pub mod provider_parser;
pub mod seguimiento;

pub use adjudication::extract_awards;
pub use award::{validate_award, AwardForm, AwardRequest};
pub use cache::{LoadTicket, SnapshotCache, StoreOutcome};
pub use hierarchy::build_hierarchy;
pub use meeting::{compose_meeting, parse_meeting};
pub use normalizer::normalize_rows;
pub use payload::{build_gestion_payload, GestionForm};
pub use provider_parser::{parse_providers, ParsedProvider};
pub use seguimiento::{AwardOutcome, SeguimientoService};

use serde_json::Value;
use thiserror::Error;

use crate::client::ClientError;
use crate::models::{DetailSnapshot, DetalleGeneral, FlatRow};

#[derive(Error, Debug)]
pub enum ServiceError {
    #[error("backend error: {0}")]
    Backend(#[from] ClientError),
    #[error("{0}")]
    Validation(String),
    #[error("{0}")]
    NotFound(String),
}

impl ServiceError {
    /// 给用户看的失败原因
    pub fn reason(&self) -> String {
        match self {
            ServiceError::Backend(e) => e.reason(),
            ServiceError::Validation(msg) | ServiceError::NotFound(msg) => msg.clone(),
        }
    }
}

/// 一次加载: 规范化一次, 然后分别构建树、中标列表、会议时间和表头
pub fn build_snapshot(record_id: i64, raw_rows: &[Value]) -> DetailSnapshot {
    if raw_rows.is_empty() {
        return DetailSnapshot::empty(record_id);
    }

    let rows = normalize_rows(raw_rows);
    let first = &rows[0];

    DetailSnapshot {
        record_id,
        general: Some(detalle_general(first)),
        partidas: build_hierarchy(&rows),
        adjudicados: extract_awards(&rows),
        reunion: parse_meeting(first.fecha_y_hora_reunion.as_deref()),
    }
}

fn detalle_general(row: &FlatRow) -> DetalleGeneral {
    DetalleGeneral {
        ente: row.ente.clone(),
        ente_clasificacion: row.ente_clasificacion.clone(),
        tipo_licitacion: row.tipo_licitacion.clone(),
        tipo_licitacion_no_veces: row.tipo_licitacion_no_veces,
        tipo_licitacion_no_veces_descripcion: row.tipo_licitacion_no_veces_descripcion.clone(),
        tipo_evento: row.tipo_evento.clone(),
        estatus_actual: row.estatus_general.clone(),
        fecha_y_hora_reunion: row.fecha_y_hora_reunion.clone(),
    }
}
