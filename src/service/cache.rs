use dashmap::DashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use crate::models::DetailSnapshot;

/// 一次明细加载的序号, 加载开始前领取
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct LoadTicket {
    pub record_id: i64,
    seq: u64,
}

/// 写入结果
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StoreOutcome {
    Stored,
    /// 已有更新的加载结果, 本次丢弃
    Stale,
}

/// 默认最多缓存的记录数
pub const DEFAULT_CAPACITY: usize = 256;

/// 每个跟踪记录最近一次成功构建的快照
///
/// 超过容量时淘汰最早加载的记录。
#[derive(Debug)]
pub struct SnapshotCache {
    capacity: usize,
    next_seq: AtomicU64,
    entries: DashMap<i64, (u64, Arc<DetailSnapshot>)>,
}

impl Default for SnapshotCache {
    fn default() -> Self {
        Self::with_capacity(DEFAULT_CAPACITY)
    }
}

impl SnapshotCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            capacity: capacity.max(1),
            next_seq: AtomicU64::new(0),
            entries: DashMap::new(),
        }
    }

    pub fn begin(&self, record_id: i64) -> LoadTicket {
        let seq = self.next_seq.fetch_add(1, Ordering::SeqCst) + 1;
        LoadTicket { record_id, seq }
    }

    /// 只有比已存快照更新的加载才能写入
    pub fn store(&self, ticket: LoadTicket, snapshot: Arc<DetailSnapshot>) -> StoreOutcome {
        {
            let mut entry = self
                .entries
                .entry(ticket.record_id)
                .or_insert_with(|| (0, Arc::new(DetailSnapshot::empty(ticket.record_id))));
            if entry.0 > ticket.seq {
                tracing::warn!(
                    "记录 {} 的加载 #{} 已过期 (当前 #{}), 丢弃",
                    ticket.record_id,
                    ticket.seq,
                    entry.0
                );
                return StoreOutcome::Stale;
            }
            *entry = (ticket.seq, snapshot);
        }
        // entry 的锁释放后才能遍历
        self.evict_over_capacity(ticket.record_id);
        StoreOutcome::Stored
    }

    fn evict_over_capacity(&self, keep: i64) {
        while self.entries.len() > self.capacity {
            let oldest = self
                .entries
                .iter()
                .filter(|e| *e.key() != keep)
                .min_by_key(|e| e.value().0)
                .map(|e| *e.key());
            match oldest {
                Some(record_id) => {
                    tracing::debug!("缓存已满, 淘汰记录 {}", record_id);
                    self.entries.remove(&record_id);
                }
                None => break,
            }
        }
    }

    pub fn get(&self, record_id: i64) -> Option<Arc<DetailSnapshot>> {
        self.entries
            .get(&record_id)
            .filter(|e| e.0 > 0)
            .map(|e| Arc::clone(&e.1))
    }

    pub fn len(&self) -> usize {
        self.entries.iter().filter(|e| e.0 > 0).count()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn snapshot(record_id: i64, marker: &str) -> Arc<DetailSnapshot> {
        let mut s = DetailSnapshot::empty(record_id);
        s.reunion.date = Some(marker.to_string());
        Arc::new(s)
    }

    #[test]
    fn newer_load_replaces_older() {
        let cache = SnapshotCache::new();
        let first = cache.begin(4);
        assert_eq!(cache.store(first, snapshot(4, "a")), StoreOutcome::Stored);
        let second = cache.begin(4);
        assert_eq!(cache.store(second, snapshot(4, "b")), StoreOutcome::Stored);
        assert_eq!(cache.get(4).unwrap().reunion.date.as_deref(), Some("b"));
    }

    #[test]
    fn late_response_from_older_load_is_discarded() {
        let cache = SnapshotCache::new();
        let older = cache.begin(4);
        let newer = cache.begin(4);
        assert_eq!(cache.store(newer, snapshot(4, "nuevo")), StoreOutcome::Stored);
        assert_eq!(cache.store(older, snapshot(4, "viejo")), StoreOutcome::Stale);
        assert_eq!(cache.get(4).unwrap().reunion.date.as_deref(), Some("nuevo"));
    }

    #[test]
    fn oldest_record_is_evicted_over_capacity() {
        let cache = SnapshotCache::with_capacity(2);
        for record_id in [1, 2, 3] {
            let ticket = cache.begin(record_id);
            cache.store(ticket, snapshot(record_id, "x"));
        }
        assert_eq!(cache.len(), 2);
        assert!(cache.get(1).is_none());
        assert!(cache.get(2).is_some());
        assert!(cache.get(3).is_some());

        // 重新加载 2 之后, 最早的是 3
        let again = cache.begin(2);
        cache.store(again, snapshot(2, "y"));
        let ticket = cache.begin(4);
        cache.store(ticket, snapshot(4, "z"));
        assert!(cache.get(3).is_none());
        assert_eq!(cache.get(2).unwrap().reunion.date.as_deref(), Some("y"));
    }

    #[test]
    fn records_are_independent() {
        let cache = SnapshotCache::new();
        let a = cache.begin(1);
        let b = cache.begin(2);
        cache.store(b, snapshot(2, "b"));
        assert_eq!(cache.store(a, snapshot(1, "a")), StoreOutcome::Stored);
        assert_eq!(cache.len(), 2);
        assert!(cache.get(3).is_none());
    }
}
