use std::sync::Arc;

use super::{
    build_gestion_payload, build_snapshot, validate_award, AwardForm, GestionForm, ServiceError,
    SnapshotCache, StoreOutcome,
};
use crate::client::{Backend, BackendClient};
use crate::models::{AdjudicarPayload, Catalogos, DetailSnapshot, GestionPayload, ServidorPublico};

/// 中标操作结果
#[derive(Debug, Clone)]
pub struct AwardOutcome {
    /// 后端生成的ID
    pub generated_id: Option<i64>,
    pub payload: AdjudicarPayload,
    /// 中标后重新加载的明细
    pub snapshot: Arc<DetailSnapshot>,
}

/// 跟踪 (seguimiento rector) 服务: 加载明细、提交状态、中标
pub struct SeguimientoService<B: Backend = BackendClient> {
    backend: B,
    cache: SnapshotCache,
}

impl<B: Backend> SeguimientoService<B> {
    pub fn new(backend: B) -> Self {
        Self {
            backend,
            cache: SnapshotCache::new(),
        }
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    pub fn cached(&self, record_id: i64) -> Option<Arc<DetailSnapshot>> {
        self.cache.get(record_id)
    }

    /// 加载并重建明细; 失败时缓存保持上一次成功的结果
    pub async fn load_detail(&self, record_id: i64) -> Result<Arc<DetailSnapshot>, ServiceError> {
        let ticket = self.cache.begin(record_id);

        let rows = match self.backend.fetch_detail(record_id).await {
            Ok(rows) => rows,
            Err(e) => {
                tracing::error!("记录 {} 明细加载失败: {}", record_id, e);
                return Err(e.into());
            }
        };

        let snapshot = Arc::new(build_snapshot(record_id, &rows));
        if snapshot.is_empty() {
            tracing::info!("记录 {} 没有明细", record_id);
        } else {
            tracing::info!(
                "记录 {} 明细加载完成: {} 行, {} 个partida, {} 条中标",
                record_id,
                rows.len(),
                snapshot.partidas.len(),
                snapshot.adjudicados.len()
            );
        }

        match self.cache.store(ticket, Arc::clone(&snapshot)) {
            StoreOutcome::Stored => Ok(snapshot),
            StoreOutcome::Stale => Ok(self.cache.get(record_id).unwrap_or(snapshot)),
        }
    }

    async fn current_snapshot(&self, record_id: i64) -> Result<Arc<DetailSnapshot>, ServiceError> {
        match self.cache.get(record_id) {
            Some(snapshot) => Ok(snapshot),
            None => self.load_detail(record_id).await,
        }
    }

    /// 提交 "Gestión del Rector" 表单 (只做更新)
    pub async fn submit_gestion(
        &self,
        record_id: i64,
        form: &GestionForm,
    ) -> Result<GestionPayload, ServiceError> {
        let payload = build_gestion_payload(form);
        if let Err(e) = self.backend.update_gestion(record_id, &payload).await {
            tracing::error!("记录 {} 提交失败: {}", record_id, e);
            return Err(e.into());
        }
        tracing::info!("记录 {} 提交成功, 状态 {}", record_id, payload.p_r_estatus);
        Ok(payload)
    }

    /// 中标/延期某个 rubro 的供应商, 成功后重新加载明细
    pub async fn adjudicar(
        &self,
        record_id: i64,
        form: &AwardForm,
    ) -> Result<AwardOutcome, ServiceError> {
        let snapshot = self.current_snapshot(record_id).await?;
        if snapshot.is_empty() {
            return Err(ServiceError::NotFound(format!(
                "El seguimiento {} no tiene detalle",
                record_id
            )));
        }

        let request = validate_award(&snapshot, form).map_err(ServiceError::Validation)?;

        let existing_id = match self.backend.find_existing_award(request.provider.id).await {
            Ok(id) => id,
            Err(e) => {
                tracing::warn!("验证已有中标记录失败, 按新记录处理: {}", e);
                None
            }
        };

        let payload = request.into_payload(existing_id);
        let generated_id = match self.backend.post_award(&payload).await {
            Ok(id) => id,
            Err(e) => {
                tracing::error!("记录 {} 中标失败: {}", record_id, e);
                return Err(e.into());
            }
        };
        if generated_id.is_none() {
            tracing::warn!("记录 {} 中标已保存, 但后端没有返回ID", record_id);
        }

        let snapshot = self.load_detail(record_id).await?;
        Ok(AwardOutcome {
            generated_id,
            payload,
            snapshot,
        })
    }

    /// 状态选项、法律依据、公务员 (并发获取)
    pub async fn catalogos(&self, id_ente: Option<i64>) -> Result<Catalogos, ServiceError> {
        let servidores = async {
            match id_ente {
                Some(id) => self.backend.fetch_servidores(id).await,
                None => Ok(Vec::new()),
            }
        };
        let (estatus, fundamentos, servidores) = futures::try_join!(
            self.backend.fetch_estatus_options(),
            self.backend.fetch_fundamentos(),
            servidores,
        )?;
        Ok(Catalogos {
            estatus,
            fundamentos,
            servidores,
        })
    }

    pub async fn search_servidores(
        &self,
        id_ente: i64,
        query: &str,
    ) -> Result<Vec<ServidorPublico>, ServiceError> {
        let servidores = self.backend.fetch_servidores(id_ente).await?;
        Ok(filter_servidores(&servidores, query))
    }
}

/// 按名称模糊查找 (不区分大小写); 空查询不返回任何结果
pub fn filter_servidores(servidores: &[ServidorPublico], query: &str) -> Vec<ServidorPublico> {
    let query = query.trim().to_lowercase();
    if query.is_empty() {
        return Vec::new();
    }
    servidores
        .iter()
        .filter(|s| s.nombre.to_lowercase().contains(&query))
        .cloned()
        .collect()
}
