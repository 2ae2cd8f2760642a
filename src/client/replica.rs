//! 네임스페이스 컬렉션의 로컬 복제본
//!
//! 서버는 네임스페이스마다 `seq`가 붙은 델타(`<resource>-created|updated|deleted`)와
//! 번호를 소비하지 않는 스냅샷(`<resources>-updated`)을 보냅니다. 복제본은
//!
//! - 이미 반영한 번호의 메시지는 무시하고,
//! - 번호가 건너뛰면 stale 상태가 되어 `sync`가 필요함을 알리며,
//! - 스냅샷을 받으면 그 번호 이후의 최근 델타를 다시 적용합니다.
//!
//! 알 수 없는 이벤트라도 번호가 있으면 순서를 지키기 위해 번호만 전진합니다.

use std::collections::{BTreeMap, VecDeque};

use serde_json::Value;

use crate::realtime::{events, Change, Namespace, SocketMessage};

/// 스냅샷 이후 재적용을 위해 보관하는 최근 메시지 수
pub const RECENT_CAPACITY: usize = 256;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Applied {
    Snapshot,
    Delta,
    /// 첫 스냅샷 전이거나 번호가 비어 있어 보관만 함
    Buffered,
    Duplicate,
    /// 번호가 건너뜀. `sync` 필요
    Gap,
    /// 번호 없는 직접 응답 등 복제본과 무관한 메시지
    Ignored,
}

pub struct NamespaceReplica {
    ns: Namespace,
    items: BTreeMap<String, Value>,
    seq: u64,
    synced: bool,
    stale: bool,
    recent: VecDeque<SocketMessage>,
}

impl NamespaceReplica {
    pub fn new(ns: Namespace) -> Self {
        Self {
            ns,
            items: BTreeMap::new(),
            seq: 0,
            synced: false,
            stale: false,
            recent: VecDeque::new(),
        }
    }

    pub fn namespace(&self) -> Namespace {
        self.ns
    }

    /// 마지막으로 반영한 번호
    pub fn seq(&self) -> u64 {
        self.seq
    }

    pub fn is_stale(&self) -> bool {
        self.stale
    }

    /// 스냅샷을 아직 받지 못했거나 번호가 끊긴 경우
    pub fn needs_sync(&self) -> bool {
        !self.synced || self.stale
    }

    pub fn sync_request(&self) -> SocketMessage {
        SocketMessage::new(events::SYNC, Value::Null)
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn get(&self, id: &str) -> Option<&Value> {
        self.items.get(id)
    }

    /// `_id` 순서의 항목들
    pub fn items(&self) -> impl Iterator<Item = &Value> {
        self.items.values()
    }

    pub fn apply(&mut self, message: &SocketMessage) -> Applied {
        let Some(seq) = message.seq else {
            return Applied::Ignored;
        };

        if Some(message.event.as_str()) == self.ns.snapshot_event() {
            self.apply_snapshot(&message.data, seq);
            return Applied::Snapshot;
        }

        if !self.synced || self.stale {
            if seq > self.seq {
                self.remember(message);
            }
            return Applied::Buffered;
        }

        if seq <= self.seq {
            return Applied::Duplicate;
        }

        self.remember(message);

        if seq > self.seq + 1 {
            log::debug!("{} 번호 누락: {} 다음 {}", self.ns, self.seq, seq);
            self.stale = true;
            return Applied::Gap;
        }

        self.apply_delta(message);
        self.seq = seq;
        Applied::Delta
    }

    fn apply_snapshot(&mut self, data: &Value, seq: u64) {
        self.items = data
            .as_array()
            .map(|list| {
                list.iter()
                    .filter_map(|item| item_id(item).map(|id| (id, item.clone())))
                    .collect()
            })
            .unwrap_or_default();
        self.seq = seq;
        self.synced = true;
        self.stale = false;

        let mut pending: Vec<SocketMessage> =
            self.recent.iter().filter(|m| m.seq.is_some_and(|s| s > seq)).cloned().collect();
        pending.sort_by_key(|m| m.seq);
        pending.dedup_by_key(|m| m.seq);

        for message in pending {
            let Some(next) = message.seq else { continue };
            if next != self.seq + 1 {
                self.stale = true;
                break;
            }
            self.apply_delta(&message);
            self.seq = next;
        }
    }

    fn apply_delta(&mut self, message: &SocketMessage) {
        let Some((resource, change)) = Change::parse_event(&message.event) else {
            return;
        };
        if Some(resource) != self.ns.resource() {
            return;
        }

        match change {
            Change::Created | Change::Updated => {
                if let Some(id) = item_id(&message.data) {
                    self.items.insert(id, message.data.clone());
                }
            }
            Change::Deleted => {
                let id = match &message.data {
                    Value::String(id) => Some(id.clone()),
                    other => other
                        .get("id")
                        .or_else(|| other.get("_id"))
                        .and_then(Value::as_str)
                        .map(str::to_string),
                };
                if let Some(id) = id {
                    self.items.remove(&id);
                }
            }
        }
    }

    fn remember(&mut self, message: &SocketMessage) {
        if self.recent.len() == RECENT_CAPACITY {
            self.recent.pop_front();
        }
        self.recent.push_back(message.clone());
    }
}

fn item_id(item: &Value) -> Option<String> {
    item.get("_id").and_then(Value::as_str).map(str::to_string)
}
