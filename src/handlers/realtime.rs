//! WebSocket 업그레이드 핸들러
//!
//! `/ws`는 루트 네임스페이스, `/ws/{namespace}`는 리소스별 네임스페이스입니다.
//! 업그레이드 후의 메시지 처리는 [`crate::realtime::session`]이 담당합니다.

use actix_web::{get, rt, web, HttpRequest, HttpResponse};

use crate::core::errors::AppError;
use crate::core::state::AppState;
use crate::realtime::{session, Namespace};

#[get("/ws")]
pub async fn root_socket(
    req: HttpRequest,
    body: web::Payload,
    state: web::Data<AppState>,
) -> Result<HttpResponse, actix_web::Error> {
    upgrade(req, body, state, Namespace::Root)
}

#[get("/ws/{namespace}")]
pub async fn namespace_socket(
    req: HttpRequest,
    body: web::Payload,
    state: web::Data<AppState>,
    namespace: web::Path<String>,
) -> Result<HttpResponse, actix_web::Error> {
    let ns = Namespace::from_segment(&namespace)
        .filter(|ns| *ns != Namespace::Root)
        .ok_or_else(|| AppError::NotFound(format!("Namespace no encontrado: /{}", namespace)))?;

    upgrade(req, body, state, ns)
}

fn upgrade(
    req: HttpRequest,
    body: web::Payload,
    state: web::Data<AppState>,
    ns: Namespace,
) -> Result<HttpResponse, actix_web::Error> {
    let (response, session, stream) = actix_ws::handle(&req, body)?;
    let state = state.get_ref().clone();

    rt::spawn(session::run(state, ns, session, stream));
    Ok(response)
}
