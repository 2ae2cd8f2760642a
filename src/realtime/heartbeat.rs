//! 루트 네임스페이스 `api-status` 주기 발행

use std::time::Duration;

use crate::core::state::AppState;
use crate::realtime::message::events;
use crate::realtime::namespace::Namespace;
use crate::services::system::status_report;

pub async fn run(state: AppState, period: Duration) {
    let mut ticker = tokio::time::interval(period);
    ticker.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Skip);

    loop {
        ticker.tick().await;
        if state.hub.receiver_count(Namespace::Root) > 0 {
            state.hub.publish_value(Namespace::Root, events::API_STATUS, status_report(&state));
        }
    }
}
