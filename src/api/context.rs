use crate::identity::ExecutionContext;
use crate::models::GlobalState;
use actix_web::{HttpRequest, http::header};
use tracing_batteries::prelude::*;

/// The execution context for a request, judged by the host the client asked
/// for. `Forwarded` and `X-Forwarded-Host` are honoured, so this holds behind
/// the production reverse proxy too. A request which names no host at all is
/// treated as a server-side render.
pub fn request_context(req: &HttpRequest, state: &GlobalState) -> ExecutionContext {
    let info = req.connection_info();
    let host = names_host(req).then(|| info.host());
    let context = state.environment.resolve(host);

    debug!(
        { http.host = ?host, context.local = ?context.is_local() },
        "Resolved the {} execution context with base {}",
        context.name(),
        context.base_url()
    );

    context
}

// ConnectionInfo falls back to the server's configured host when the client
// names none, which must not be mistaken for a page host.
fn names_host(req: &HttpRequest) -> bool {
    let headers = req.headers();
    req.uri().authority().is_some()
        || headers.contains_key(header::HOST)
        || headers.contains_key(header::FORWARDED)
        || headers.contains_key("x-forwarded-host")
}
