//! WebSocket 네임스페이스 클라이언트
//!
//! 네임스페이스마다 독립된 연결을 엽니다. 연결 하나에 쓰기 태스크와 읽기 태스크가
//! 하나씩 붙고, 읽기 태스크는 수신한 메시지를 이벤트 이름별 리스너,
//! 한 번만 기다리는 대기자, 전체 메시지 구독자 순서로 전달합니다.

use std::collections::HashMap;
use std::future::Future;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::{Arc, Mutex, MutexGuard};

use futures_util::{SinkExt, StreamExt};
use serde_json::Value;
use tokio::sync::{mpsc, oneshot};
use tokio_tungstenite::tungstenite::Message;

use crate::client::ClientError;
use crate::realtime::{Namespace, SocketMessage};

type Listener = Arc<dyn Fn(&SocketMessage) + Send + Sync>;
type Matcher = Box<dyn Fn(&SocketMessage) -> bool + Send>;

/// [`NamespaceSocket::on`]이 돌려주는 리스너 식별자
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ListenerId(u64);

struct Waiter {
    events: Vec<String>,
    matcher: Matcher,
    reply: oneshot::Sender<SocketMessage>,
}

impl Waiter {
    fn accepts(&self, message: &SocketMessage) -> bool {
        self.events.iter().any(|e| *e == message.event) && (self.matcher)(message)
    }
}

#[derive(Default)]
struct Routing {
    listeners: HashMap<String, Vec<(ListenerId, Listener)>>,
    waiters: Vec<Waiter>,
    taps: Vec<mpsc::UnboundedSender<SocketMessage>>,
}

impl Routing {
    /// 시간 초과 등으로 버려진 대기자 정리
    fn prune_waiters(&mut self) {
        self.waiters.retain(|w| !w.reply.is_closed());
    }

    fn deliver(&mut self, message: &SocketMessage) -> Vec<Listener> {
        self.prune_waiters();

        let mut i = 0;
        while i < self.waiters.len() {
            if self.waiters[i].accepts(message) {
                let waiter = self.waiters.remove(i);
                let _ = waiter.reply.send(message.clone());
            } else {
                i += 1;
            }
        }

        self.taps.retain(|tap| tap.send(message.clone()).is_ok());

        self.listeners
            .get(&message.event)
            .map(|list| list.iter().map(|(_, l)| l.clone()).collect())
            .unwrap_or_default()
    }
}

/// 서버 주소를 기억하고 네임스페이스 연결을 만듭니다.
#[derive(Debug, Clone)]
pub struct SocketClient {
    base_url: String,
}

impl SocketClient {
    /// `ws://host:port` 또는 `host:port`
    pub fn new(base_url: impl Into<String>) -> Self {
        let base_url = base_url.into();
        let base_url = if base_url.starts_with("ws://") || base_url.starts_with("wss://") {
            base_url
        } else {
            format!("ws://{}", base_url)
        };

        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    pub fn namespace_url(&self, ns: Namespace) -> String {
        match ns {
            Namespace::Root => format!("{}/ws", self.base_url),
            other => format!("{}/ws{}", self.base_url, other.path()),
        }
    }

    /// 루트 네임스페이스 연결
    pub async fn connect(&self) -> Result<NamespaceSocket, ClientError> {
        self.connect_to_namespace(Namespace::Root).await
    }

    pub async fn connect_to_namespace(&self, ns: Namespace) -> Result<NamespaceSocket, ClientError> {
        let url = self.namespace_url(ns);
        let (ws, _) = tokio_tungstenite::connect_async(url.as_str()).await?;
        let (mut sink, mut stream) = ws.split();
        log::debug!("🔌 소켓 연결: {}", url);

        let connected = Arc::new(AtomicBool::new(true));
        let routing = Arc::new(Mutex::new(Routing::default()));
        let (outgoing, mut outgoing_rx) = mpsc::unbounded_channel::<Message>();

        let writer_connected = connected.clone();
        tokio::spawn(async move {
            while let Some(frame) = outgoing_rx.recv().await {
                let closing = matches!(frame, Message::Close(_));
                if sink.send(frame).await.is_err() || closing {
                    break;
                }
            }
            writer_connected.store(false, Ordering::SeqCst);
        });

        let reader_connected = connected.clone();
        let reader_routing = routing.clone();
        tokio::spawn(async move {
            while let Some(frame) = stream.next().await {
                let text = match frame {
                    Ok(Message::Text(text)) => text,
                    Ok(Message::Close(_)) | Err(_) => break,
                    Ok(_) => continue,
                };

                let message = match SocketMessage::parse(text.as_str()) {
                    Ok(message) => message,
                    Err(_) => {
                        log::warn!("해석할 수 없는 소켓 메시지 무시: {}", text.as_str());
                        continue;
                    }
                };

                let listeners = lock(&reader_routing).deliver(&message);
                for listener in listeners {
                    listener(&message);
                }
            }

            reader_connected.store(false, Ordering::SeqCst);
            // 대기자와 구독자에게 종료를 알립니다.
            let mut routing = lock(&reader_routing);
            routing.waiters.clear();
            routing.taps.clear();
        });

        Ok(NamespaceSocket {
            ns,
            outgoing,
            connected,
            routing,
            next_listener: AtomicU64::new(1),
        })
    }
}

fn lock(routing: &Mutex<Routing>) -> MutexGuard<'_, Routing> {
    routing.lock().unwrap_or_else(|p| p.into_inner())
}

/// 네임스페이스 하나에 대한 연결
pub struct NamespaceSocket {
    ns: Namespace,
    outgoing: mpsc::UnboundedSender<Message>,
    connected: Arc<AtomicBool>,
    routing: Arc<Mutex<Routing>>,
    next_listener: AtomicU64,
}

impl NamespaceSocket {
    pub fn namespace(&self) -> Namespace {
        self.ns
    }

    pub fn is_connected(&self) -> bool {
        self.connected.load(Ordering::SeqCst) && !self.outgoing.is_closed()
    }

    pub fn emit(&self, event: &str, data: Value) -> Result<(), ClientError> {
        self.send(&SocketMessage::new(event, data))
    }

    pub fn send(&self, message: &SocketMessage) -> Result<(), ClientError> {
        if !self.is_connected() {
            return Err(ClientError::Unavailable(format!("{} desconectado", self.ns)));
        }

        self.outgoing
            .send(Message::Text(message.to_text().into()))
            .map_err(|_| ClientError::Unavailable(format!("{} desconectado", self.ns)))
    }

    pub fn on<F>(&self, event: &str, listener: F) -> ListenerId
    where
        F: Fn(&SocketMessage) + Send + Sync + 'static,
    {
        let id = ListenerId(self.next_listener.fetch_add(1, Ordering::Relaxed));
        lock(&self.routing)
            .listeners
            .entry(event.to_string())
            .or_default()
            .push((id, Arc::new(listener)));
        id
    }

    pub fn off(&self, event: &str, id: ListenerId) {
        let mut routing = lock(&self.routing);
        if let Some(list) = routing.listeners.get_mut(event) {
            list.retain(|(listener_id, _)| *listener_id != id);
            if list.is_empty() {
                routing.listeners.remove(event);
            }
        }
    }

    /// 이벤트의 리스너를 모두 제거합니다.
    pub fn off_all(&self, event: &str) {
        lock(&self.routing).listeners.remove(event);
    }

    /// 주어진 이벤트 중 하나가 처음 도착할 때 완료되는 future
    ///
    /// 대기자는 호출 즉시 등록되므로 `emit` 전에 만들어 두어야 응답을 놓치지 않습니다.
    /// future를 버리면 대기자는 다음 수신 때 정리됩니다.
    pub fn wait_for(
        &self,
        events: &[&str],
    ) -> impl Future<Output = Result<SocketMessage, ClientError>> + Send + use<> {
        self.wait_for_match(events, |_| true)
    }

    /// [`wait_for`](Self::wait_for)와 같지만 `matcher`가 받아들인 메시지로만 완료됩니다.
    pub fn wait_for_match<F>(
        &self,
        events: &[&str],
        matcher: F,
    ) -> impl Future<Output = Result<SocketMessage, ClientError>> + Send + use<F>
    where
        F: Fn(&SocketMessage) -> bool + Send + 'static,
    {
        let (reply, rx) = oneshot::channel();
        let waiter = Waiter {
            events: events.iter().map(|e| e.to_string()).collect(),
            matcher: Box::new(matcher),
            reply,
        };

        let mut routing = lock(&self.routing);
        routing.prune_waiters();
        routing.waiters.push(waiter);
        drop(routing);

        let ns = self.ns;
        async move {
            rx.await
                .map_err(|_| ClientError::Unavailable(format!("{} desconectado", ns)))
        }
    }

    /// 이 연결로 들어오는 모든 메시지의 스트림
    pub fn messages(&self) -> mpsc::UnboundedReceiver<SocketMessage> {
        let (tx, rx) = mpsc::unbounded_channel();
        lock(&self.routing).taps.push(tx);
        rx
    }

    pub fn disconnect(&self) {
        if self.connected.swap(false, Ordering::SeqCst) {
            let _ = self.outgoing.send(Message::Close(None));
            log::debug!("🔌 소켓 종료: {}", self.ns);
        }
    }
}

impl Drop for NamespaceSocket {
    fn drop(&mut self) {
        self.disconnect();
    }
}
