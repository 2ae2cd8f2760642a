//! WebSocket 세션
//!
//! 연결 하나당 태스크 하나가 실행되며, 클라이언트 메시지와 네임스페이스
//! 브로드캐스트를 `tokio::select!`로 함께 기다립니다.

use actix_ws::{CloseReason, Message, MessageStream, Session};
use futures_util::StreamExt;
use serde_json::json;
use tokio::sync::broadcast::error::RecvError;

use crate::core::state::AppState;
use crate::realtime::dispatcher::dispatch;
use crate::realtime::message::{events, SocketMessage};
use crate::realtime::namespace::Namespace;

pub async fn run(state: AppState, ns: Namespace, mut session: Session, mut stream: MessageStream) {
    let mut broadcasts = state.hub.subscribe(ns);
    log::debug!("🔌 {} 연결 (현재 {}명)", ns, state.hub.receiver_count(ns));

    let hello = SocketMessage::new(
        events::CONNECTED,
        json!({ "namespace": ns.path(), "seq": state.hub.current_seq(ns) }),
    );
    if session.text(hello.to_text()).await.is_err() {
        return;
    }

    let reason: Option<CloseReason> = loop {
        tokio::select! {
            incoming = stream.next() => match incoming {
                Some(Ok(Message::Text(text))) => {
                    let reply = match SocketMessage::parse(&text) {
                        Ok(message) => dispatch(&state, ns, message).await,
                        Err(e) => Some(SocketMessage::error(e.to_string(), "")),
                    };

                    if let Some(reply) = reply {
                        if session.text(reply.to_text()).await.is_err() {
                            break None;
                        }
                    }
                }
                Some(Ok(Message::Ping(bytes))) => {
                    if session.pong(&bytes).await.is_err() {
                        break None;
                    }
                }
                Some(Ok(Message::Close(reason))) => break reason,
                Some(Ok(_)) => {}
                Some(Err(e)) => {
                    log::warn!("{} WebSocket 프로토콜 오류: {}", ns, e);
                    break None;
                }
                None => break None,
            },
            outgoing = broadcasts.recv() => match outgoing {
                Ok(message) => {
                    if session.text(message.to_text()).await.is_err() {
                        break None;
                    }
                }
                Err(RecvError::Lagged(skipped)) => {
                    // 클라이언트는 seq 공백으로 누락을 감지하고 sync를 요청합니다.
                    log::warn!("{} 구독자가 {}개 메시지를 놓쳤습니다", ns, skipped);
                }
                Err(RecvError::Closed) => break None,
            },
        }
    };

    drop(broadcasts);
    let _ = session.close(reason).await;
    log::debug!("🔌 {} 연결 종료 (현재 {}명)", ns, state.hub.receiver_count(ns));
}
