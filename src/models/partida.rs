use bigdecimal::BigDecimal;
use serde::{Deserialize, Serialize};

/// 预算科目 (partida) - 树的第一层
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Partida {
    pub id: i64,
    pub name: String,
    pub rubros: Vec<Rubro>,
}

impl Partida {
    pub fn new(id: i64, name: String) -> Self {
        Self {
            id,
            name,
            rubros: Vec::new(),
        }
    }

    pub fn find_rubro(&self, rubro_id: i64) -> Option<&Rubro> {
        self.rubros.iter().find(|r| r.id == rubro_id)
    }
}

/// 支出分项 (rubro) - 树的第二层, id 只在所属 partida 内唯一
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Rubro {
    pub id: i64,
    pub name: String,
    pub budget_amount: BigDecimal,
    /// id_seguimiento_partida_rubro
    pub tracking_id: i64,
    pub candidates: Vec<ProviderCandidate>,
}

impl Rubro {
    /// 插入候选供应商, (id, rfc) 已存在时忽略
    ///
    /// 返回是否真正插入
    pub fn insert_candidate(&mut self, candidate: ProviderCandidate) -> bool {
        let exists = self
            .candidates
            .iter()
            .any(|c| c.id == candidate.id && c.rfc == candidate.rfc);
        if exists {
            return false;
        }
        self.candidates.push(candidate);
        true
    }
}

/// 候选供应商 - 树的第三层
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProviderCandidate {
    /// 后端无法解析时为 0
    pub id: i64,
    pub rfc: String,
    pub name: String,
    pub amount_before_tax: BigDecimal,
    pub amount_total: BigDecimal,
}
