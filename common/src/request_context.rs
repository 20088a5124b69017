//! Request-scoped state, represented as an explicit value rather than
//! threaded through dependency injection (spec.md §9's "Request-scoped
//! handler state" design note).
//!
//! Grounded on `original_source/libs/shared/src/shared/request_context.py`'s
//! `RequestIDMiddleware`: reads (or generates) `x-request-id`, stores it for
//! handlers to read back out of the error path, and echoes it on every
//! response.

use axum::extract::Request;
use axum::http::HeaderValue;
use axum::middleware::Next;
use axum::response::Response;
use uuid::Uuid;

pub const REQUEST_ID_HEADER: &str = "x-request-id";

/// Carried via `req.extensions()`; handlers and error mappers pull
/// `request_id` out of this rather than re-parsing headers.
#[derive(Debug, Clone)]
pub struct RequestContext {
    pub request_id: String,
}

impl RequestContext {
    fn generate() -> Self {
        Self {
            request_id: Uuid::new_v4().to_string(),
        }
    }
}

/// Axum middleware: reads `x-request-id` off the incoming request (or
/// generates one), stores a `RequestContext` in request extensions, runs the
/// handler, then echoes the id on the outgoing response if the handler
/// didn't already set one.
pub async fn request_id_middleware(mut req: Request, next: Next) -> Response {
    let incoming = req
        .headers()
        .get(REQUEST_ID_HEADER)
        .and_then(|value| value.to_str().ok())
        .filter(|value| !value.is_empty())
        .map(str::to_owned);

    let ctx = match incoming {
        Some(request_id) => RequestContext { request_id },
        None => RequestContext::generate(),
    };
    let request_id = ctx.request_id.clone();
    req.extensions_mut().insert(ctx);

    let mut response = next.run(req).await;
    if !response.headers().contains_key(REQUEST_ID_HEADER) {
        if let Ok(value) = HeaderValue::from_str(&request_id) {
            response.headers_mut().insert(REQUEST_ID_HEADER, value);
        }
    }
    response
}
