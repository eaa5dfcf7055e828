#![allow(dead_code)]

use seguimiento_rector::client::{Backend, ClientError};
use seguimiento_rector::models::{AdjudicarPayload, GestionPayload, ServidorPublico};
use serde_json::{json, Value};
use std::collections::HashMap;
use std::sync::Mutex;

/// 内存中的后端, 记录所有写操作
#[derive(Default)]
pub struct FakeBackend {
    pub details: Mutex<HashMap<i64, Value>>,
    pub fail_detail: Mutex<bool>,
    pub fail_gestion: Mutex<Option<String>>,
    pub existing_award: Mutex<Option<i64>>,
    pub generated_id: Mutex<Option<i64>>,
    pub gestiones: Mutex<Vec<(i64, GestionPayload)>>,
    pub awards: Mutex<Vec<AdjudicarPayload>>,
    pub servidores: Mutex<Vec<ServidorPublico>>,
}

impl FakeBackend {
    pub fn with_detail(record_id: i64, rows: Value) -> Self {
        let backend = Self::default();
        backend.set_detail(record_id, rows);
        backend
    }

    pub fn set_detail(&self, record_id: i64, rows: Value) {
        self.details.lock().unwrap().insert(record_id, rows);
    }
}

fn unavailable(body: &str) -> ClientError {
    ClientError::from_response(503, body.to_string())
}

impl Backend for FakeBackend {
    async fn fetch_detail(&self, record_id: i64) -> Result<Vec<Value>, ClientError> {
        if *self.fail_detail.lock().unwrap() {
            return Err(unavailable(r#"{"detail":"base de datos no disponible"}"#));
        }
        let value = self
            .details
            .lock()
            .unwrap()
            .get(&record_id)
            .cloned()
            .unwrap_or(Value::Null);
        Ok(match value {
            Value::Array(rows) => rows,
            _ => Vec::new(),
        })
    }

    async fn fetch_estatus_options(&self) -> Result<Vec<String>, ClientError> {
        Ok(vec![
            "ADJUDICADO".to_string(),
            "DIFERIMIENTO".to_string(),
            "CANCELADO".to_string(),
        ])
    }

    async fn fetch_fundamentos(&self) -> Result<Vec<Value>, ClientError> {
        Ok(vec![json!({ "id": 4, "descripcion": "Art. 41 fracción III" })])
    }

    async fn fetch_servidores(&self, _id_ente: i64) -> Result<Vec<ServidorPublico>, ClientError> {
        Ok(self.servidores.lock().unwrap().clone())
    }

    async fn update_gestion(
        &self,
        record_id: i64,
        payload: &GestionPayload,
    ) -> Result<(), ClientError> {
        if let Some(detail) = self.fail_gestion.lock().unwrap().clone() {
            return Err(ClientError::from_response(
                400,
                json!({ "detail": detail }).to_string(),
            ));
        }
        self.gestiones
            .lock()
            .unwrap()
            .push((record_id, payload.clone()));
        Ok(())
    }

    async fn find_existing_award(&self, _provider_id: i64) -> Result<Option<i64>, ClientError> {
        Ok(*self.existing_award.lock().unwrap())
    }

    async fn post_award(&self, payload: &AdjudicarPayload) -> Result<Option<i64>, ClientError> {
        self.awards.lock().unwrap().push(payload.clone());
        Ok(*self.generated_id.lock().unwrap())
    }
}

/// 一个典型的明细结果
pub fn sample_rows() -> Value {
    json!([
        {
            "e_id_partida": 2110, "partida": "Materiales de oficina",
            "id_rubro": 10, "rubro": "Papelería",
            "e_monto_presupuesto_suficiencia": "150000.00",
            "id_seguimiento_partida_rubro": 100,
            "id_seguimiento_partida_rubro_proveedor": 501,
            "proveedores": "1)ABC123 Acme;2)XYZ999 Beta",
            "e_importe_sin_iva": 1000, "e_importe_total": 1160,
            "estatus": "PENDIENTE",
            "ente": "Secretaría de Finanzas", "ente_clasificacion": "Centralizada",
            "e_tipo_licitacion": "Licitación Pública", "e_tipo_licitacion_no_veces": 1,
            "tipo_licitacion_no_veces_descripcion": "Primera vez",
            "e_tipo_evento": "Presencial", "r_estatus": "EN PROCESO",
            "e_fecha_y_hora_reunion": "2025-03-07T09:05:00"
        },
        {
            "e_id_partida": 2110, "partida": "Materiales de oficina",
            "id_rubro": 11, "rubro": "Tóner",
            "e_monto_presupuesto_suficiencia": 80000,
            "id_seguimiento_partida_rubro": 101,
            "id_seguimiento_partida_rubro_proveedor": 0,
            "e_id_seguimiento_partida_rubro_proveedor": 602,
            "proveedores": "1)QRS555 Gamma",
            "estatus": "ADJUDICADO",
            "id_seguimiento_partida_rubro_proveedor_adjudicado": 55,
            "id_fundamento": 4,
            "importe_ajustado_sin_iva": 70000, "importe_ajustado_total": 81200,
            "e_rfc_proveedor": "QRS555", "razon_social": "Gamma SA de CV",
            "nombre_comercial": "Gamma", "persona_juridica": "MORAL",
            "correo_electronico": "ventas@gamma.mx", "entidad_federativa": "Jalisco"
        },
        {
            "e_id_partida": 2110, "partida": "Materiales de oficina",
            "id_rubro": 11, "rubro": "Tóner",
            "proveedores": "1)QRS555 Gamma",
            "id_seguimiento_partida_rubro_proveedor": 0,
            "e_id_seguimiento_partida_rubro_proveedor": 602,
            "estatus": "ADJUDICADO",
            "id_seguimiento_partida_rubro_proveedor_adjudicado": 55
        },
        {
            "e_id_partida": 5150, "partida": "Equipo de cómputo",
            "id_rubro": 10, "rubro": "Laptops",
            "id_seguimiento_partida_rubro": 300,
            "id_seguimiento_partida_rubro_proveedor": 700,
            "proveedores": "1)LAP321 Cómputo Total"
        }
    ])
}
