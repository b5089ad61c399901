//! Request handlers for the issue and redeem endpoints.
//!
//! Both endpoints walk the same validation ladder (preflight, method,
//! embed id, allowlist, origin, secret) and the first failing step
//! determines the outcome. Every branch, success or rejection, responds
//! with JSON, `Cache-Control: no-store`, and cross-origin headers echoing
//! the caller's origin.

use crate::cors;
use crate::error::ApiError;
use crate::state::AppState;
use axum::Json;
use axum::extract::{Query, State};
use axum::http::{HeaderMap, HeaderValue, Method, StatusCode, header};
use axum::response::{IntoResponse, Response};
use embedgate_token::effective_ttl;
use serde::Deserialize;
use serde_json::{Value, json};

/// Query parameters shared by both endpoints.
#[derive(Debug, Deserialize)]
pub struct EmbedQuery {
    #[serde(rename = "embedId")]
    embed_id: Option<String>,
}

/// Handler for the token issue endpoint.
pub async fn issue_token(
    State(state): State<AppState>,
    method: Method,
    headers: HeaderMap,
    Query(query): Query<EmbedQuery>,
) -> Response {
    let origin = request_origin(&headers);
    if method == Method::OPTIONS {
        return cors::preflight_response(origin.as_deref());
    }

    match issue(&state, &method, origin.as_deref(), query.embed_id.as_deref()) {
        Ok(body) => respond(StatusCode::OK, origin.as_deref(), body),
        Err(err) => reject(origin.as_deref(), err),
    }
}

/// Handler for the content redeem endpoint.
pub async fn redeem_content(
    State(state): State<AppState>,
    method: Method,
    headers: HeaderMap,
    Query(query): Query<EmbedQuery>,
) -> Response {
    let origin = request_origin(&headers);
    if method == Method::OPTIONS {
        return cors::preflight_response(origin.as_deref());
    }

    match redeem(
        &state,
        &method,
        origin.as_deref(),
        query.embed_id.as_deref(),
        &headers,
    )
    .await
    {
        Ok(body) => respond(StatusCode::OK, origin.as_deref(), body),
        Err(err) => reject(origin.as_deref(), err),
    }
}

/// Liveness endpoint.
pub async fn healthz() -> Json<Value> {
    Json(json!({
        "ok": true,
        "service": "embedgate",
        "version": env!("CARGO_PKG_VERSION")
    }))
}

fn issue(
    state: &AppState,
    method: &Method,
    origin: Option<&str>,
    embed_id: Option<&str>,
) -> Result<Value, ApiError> {
    let (embed_id, origin) = check_request(state, method, origin, embed_id)?;
    let signer = state.signer().ok_or(ApiError::NotConfigured {
        hint: "set EMBEDGATE_SECRET",
    })?;

    let ttl = effective_ttl(state.config().token_ttl_secs);
    let minted = signer.mint(&embed_id, &origin, ttl);
    tracing::debug!(embed_id = %embed_id, origin = %origin, exp = minted.claims.exp, "token issued");

    Ok(json!({
        "token": minted.token,
        "exp": minted.claims.exp,
        "ttl": ttl,
    }))
}

async fn redeem(
    state: &AppState,
    method: &Method,
    origin: Option<&str>,
    embed_id: Option<&str>,
    headers: &HeaderMap,
) -> Result<Value, ApiError> {
    let (embed_id, origin) = check_request(state, method, origin, embed_id)?;
    let signer = state.signer().ok_or(ApiError::NotConfigured {
        hint: "set EMBEDGATE_SECRET",
    })?;

    let token = bearer_token(headers).ok_or(ApiError::InvalidToken {
        detail: "missing_bearer",
    })?;
    let claims = signer.verify(&token).map_err(|err| {
        tracing::debug!(embed_id = %embed_id, reason = err.reason_code(), "token rejected");
        ApiError::InvalidToken {
            detail: err.reason_code(),
        }
    })?;

    // The claims are already origin-bound; these equality checks guard
    // against a verified token being presented at a different embed's
    // endpoint.
    if claims.embed_id != embed_id {
        return Err(ApiError::EmbedMismatch);
    }
    if claims.origin != origin {
        return Err(ApiError::OriginMismatch);
    }

    let content = state
        .content()
        .fetch(&embed_id)
        .await
        .ok_or(ApiError::NoContent)?;

    Ok(json!({
        "ok": true,
        "embedId": embed_id,
        "content": content,
    }))
}

/// Shared validation ladder up to an authorized (embed id, origin) pair.
fn check_request(
    state: &AppState,
    method: &Method,
    origin: Option<&str>,
    embed_id: Option<&str>,
) -> Result<(String, String), ApiError> {
    if method != Method::GET {
        return Err(ApiError::MethodNotAllowed);
    }

    let embed_id = embed_id
        .map(str::trim)
        .filter(|id| !id.is_empty())
        .ok_or(ApiError::MissingEmbedId)?;

    let allowed = state
        .config()
        .allowed_origins_for(embed_id)
        .ok_or(ApiError::UnknownEmbed)?;

    match origin {
        Some(origin) if allowed.iter().any(|candidate| candidate == origin) => {
            Ok((embed_id.to_string(), origin.to_string()))
        }
        other => Err(ApiError::OriginNotAllowed {
            origin: other.map(str::to_string),
        }),
    }
}

/// The request's originating-page origin, if any.
fn request_origin(headers: &HeaderMap) -> Option<String> {
    headers
        .get(header::ORIGIN)
        .and_then(|value| value.to_str().ok())
        .map(str::trim)
        .filter(|origin| !origin.is_empty())
        .map(str::to_string)
}

/// Bearer credential from the Authorization header.
fn bearer_token(headers: &HeaderMap) -> Option<String> {
    let value = headers.get(header::AUTHORIZATION)?.to_str().ok()?;
    let token = value
        .strip_prefix("Bearer ")
        .or_else(|| value.strip_prefix("bearer "))?
        .trim();
    if token.is_empty() {
        None
    } else {
        Some(token.to_string())
    }
}

fn reject(origin: Option<&str>, err: ApiError) -> Response {
    tracing::debug!(error = %err, "request rejected");
    respond(err.status(), origin, err.body())
}

/// Finalize a response: JSON body, no-store cache directive, and
/// cross-origin headers for the caller's origin.
fn respond(status: StatusCode, origin: Option<&str>, body: Value) -> Response {
    let mut response = (status, Json(body)).into_response();
    response
        .headers_mut()
        .insert(header::CACHE_CONTROL, HeaderValue::from_static("no-store"));
    cors::apply_cors_headers(response.headers_mut(), origin);
    response
}
