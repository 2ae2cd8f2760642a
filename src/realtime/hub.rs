//! 네임스페이스별 브로드캐스트 허브
//!
//! 서비스 계층은 쓰기가 끝난 뒤 변경된 엔티티를 [`BroadcastHub::publish`]로 내보내고,
//! 각 WebSocket 세션은 자신이 속한 네임스페이스를 구독합니다.
//!
//! ## 순서 보장
//!
//! 네임스페이스마다 단조 증가하는 `seq`를 갖습니다. 번호 부여와 채널 전송을
//! 같은 잠금 안에서 수행하므로 모든 구독자는 `seq` 순서대로 메시지를 받습니다.
//! 구독자가 없어도 번호는 증가하며 오류로 취급하지 않습니다.
//!
//! 스냅샷([`BroadcastHub::broadcast_snapshot`])은 번호를 소비하지 않고,
//! 컬렉션을 읽기 직전에 관측한 번호를 그대로 싣습니다.

use std::collections::HashMap;
use std::sync::Mutex;

use serde::Serialize;
use serde_json::Value;
use tokio::sync::broadcast;

use crate::realtime::message::{Change, SocketMessage};
use crate::realtime::namespace::Namespace;

struct Channel {
    sender: broadcast::Sender<SocketMessage>,
    seq: Mutex<u64>,
}

pub struct BroadcastHub {
    channels: HashMap<Namespace, Channel>,
}

impl BroadcastHub {
    pub fn new(capacity: usize) -> Self {
        let channels = Namespace::ALL
            .into_iter()
            .map(|ns| {
                let (sender, _) = broadcast::channel(capacity);
                (ns, Channel { sender, seq: Mutex::new(0) })
            })
            .collect();

        Self { channels }
    }

    fn channel(&self, ns: Namespace) -> &Channel {
        // ALL의 모든 항목으로 초기화되므로 항상 존재합니다.
        &self.channels[&ns]
    }

    pub fn subscribe(&self, ns: Namespace) -> broadcast::Receiver<SocketMessage> {
        self.channel(ns).sender.subscribe()
    }

    /// 다음 메시지 직전까지 부여된 마지막 번호
    pub fn current_seq(&self, ns: Namespace) -> u64 {
        let seq = self.channel(ns).seq.lock().unwrap_or_else(|p| p.into_inner());
        *seq
    }

    /// 번호를 부여하고 네임스페이스 전체에 전송합니다.
    pub fn publish_value(&self, ns: Namespace, event: &str, data: Value) -> u64 {
        let channel = self.channel(ns);
        let mut seq = channel.seq.lock().unwrap_or_else(|p| p.into_inner());
        *seq += 1;

        let message = SocketMessage::new(event, data).with_seq(*seq);
        match channel.sender.send(message) {
            Ok(receivers) => log::debug!("📡 {} {} #{} → {}명", ns, event, *seq, receivers),
            Err(_) => log::debug!("📡 {} {} #{} (구독자 없음)", ns, event, *seq),
        }

        *seq
    }

    /// 페이로드를 JSON으로 바꿔 전송합니다.
    ///
    /// 직렬화 실패는 쓰기를 되돌리지 않으며 로그만 남깁니다.
    pub fn publish<T: Serialize>(&self, ns: Namespace, event: &str, payload: &T) -> Option<u64> {
        match serde_json::to_value(payload) {
            Ok(data) => Some(self.publish_value(ns, event, data)),
            Err(e) => {
                log::error!("브로드캐스트 페이로드 직렬화 실패 ({} {}): {}", ns, event, e);
                None
            }
        }
    }

    /// `<resource>-created|updated|deleted` 델타
    pub fn publish_change<T: Serialize>(&self, ns: Namespace, change: Change, payload: &T) -> Option<u64> {
        let resource = ns.resource()?;
        self.publish(ns, &change.event_name(resource), payload)
    }

    /// 번호를 소비하지 않는 전체 목록 전송
    pub fn broadcast_snapshot(&self, ns: Namespace, items: Value, observed_seq: u64) {
        let Some(event) = ns.snapshot_event() else {
            return;
        };

        let message = SocketMessage::new(event, items).with_seq(observed_seq);
        if self.channel(ns).sender.send(message).is_err() {
            log::debug!("📡 {} {} (구독자 없음)", ns, event);
        }
    }

    pub fn receiver_count(&self, ns: Namespace) -> usize {
        self.channel(ns).sender.receiver_count()
    }

    /// 모든 네임스페이스의 현재 연결 수
    pub fn connections(&self) -> usize {
        self.channels.values().map(|c| c.sender.receiver_count()).sum()
    }

    pub fn namespaces(&self) -> Vec<&'static str> {
        Namespace::ALL.iter().map(Namespace::path).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use std::sync::Arc;

    #[actix_web::test]
    async fn test_seq_is_per_namespace_and_monotonic() {
        let hub = BroadcastHub::new(16);
        assert_eq!(hub.publish_value(Namespace::Users, "user-created", json!({})), 1);
        assert_eq!(hub.publish_value(Namespace::Users, "user-updated", json!({})), 2);
        assert_eq!(hub.publish_value(Namespace::Guides, "guide-created", json!({})), 1);
        assert_eq!(hub.current_seq(Namespace::Users), 2);
    }

    #[actix_web::test]
    async fn test_subscribers_receive_in_seq_order() {
        let hub = Arc::new(BroadcastHub::new(256));
        let mut rx = hub.subscribe(Namespace::Events);

        let mut tasks = Vec::new();
        for i in 0..8 {
            let hub = hub.clone();
            tasks.push(tokio::spawn(async move {
                for j in 0..10 {
                    hub.publish_value(Namespace::Events, "event-updated", json!({ "t": i, "j": j }));
                }
            }));
        }
        for task in tasks {
            task.await.unwrap();
        }

        let mut last = 0;
        for _ in 0..80 {
            let msg = rx.recv().await.unwrap();
            let seq = msg.seq.unwrap();
            assert_eq!(seq, last + 1);
            last = seq;
        }
    }

    #[actix_web::test]
    async fn test_snapshot_does_not_consume_seq() {
        let hub = BroadcastHub::new(16);
        let mut rx = hub.subscribe(Namespace::Activities);
        hub.publish_change(Namespace::Activities, Change::Deleted, &"abc");
        hub.broadcast_snapshot(Namespace::Activities, json!([]), hub.current_seq(Namespace::Activities));

        let delta = rx.recv().await.unwrap();
        assert_eq!(delta.event, "activity-deleted");
        let snapshot = rx.recv().await.unwrap();
        assert_eq!(snapshot.event, "activities-updated");
        assert_eq!(snapshot.seq, Some(1));
        assert_eq!(hub.current_seq(Namespace::Activities), 1);
    }

    #[test]
    fn test_connections_follow_receivers() {
        let hub = BroadcastHub::new(16);
        let a = hub.subscribe(Namespace::Root);
        let _b = hub.subscribe(Namespace::Instructors);
        assert_eq!(hub.connections(), 2);
        drop(a);
        assert_eq!(hub.connections(), 1);
        assert_eq!(hub.receiver_count(Namespace::Instructors), 1);
    }
}
