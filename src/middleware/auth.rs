use axum::{response::{Response, IntoResponse}};
use axum::http::StatusCode;
use axum::middleware::Next;
use crate::auth::jwt::verify_token;
use crate::error::AppError;
use serde::Serialize;

#[derive(Clone, Debug)]
pub struct AuthContext {
    pub user_id: i64,
    pub email: String,
    pub is_admin: bool,
}

#[derive(Serialize)]
struct ErrorBody { error: String, code: &'static str }

use axum::http::Request;

fn authenticate(req: &Request<axum::body::Body>) -> Result<AuthContext, Response> {
    let auth_header = match req.headers()
        .get("Authorization")
        .and_then(|v| v.to_str().ok()) {
        Some(h) => h,
        None => return Err(unauthorized("Missing Authorization header")),
    };

    // Expect "Bearer <token>"
    let token = match auth_header.strip_prefix("Bearer ") {
        Some(t) => t,
        None => return Err(unauthorized("Invalid Authorization format")),
    };

    let secret = match std::env::var("JWT_SECRET") {
        Ok(s) => s,
        Err(_) => return Err(unauthorized("Server auth misconfiguration")),
    };

    let claims = match verify_token(token, &secret) {
        Ok(c) => c,
        Err(_) => return Err(unauthorized("Invalid or expired token")),
    };

    Ok(AuthContext {
        user_id: claims.sub,
        email: claims.email,
        is_admin: claims.is_admin,
    })
}

pub async fn require_auth(mut req: Request<axum::body::Body>, next: Next) -> Response {
    let ctx = match authenticate(&req) {
        Ok(c) => c,
        Err(resp) => return resp,
    };

    req.extensions_mut().insert(ctx);
    next.run(req).await
}

pub async fn require_admin(mut req: Request<axum::body::Body>, next: Next) -> Response {
    let ctx = match authenticate(&req) {
        Ok(c) => c,
        Err(resp) => return resp,
    };

    if !ctx.is_admin {
        return AppError::forbidden("Admin access required").into_response();
    }

    req.extensions_mut().insert(ctx);
    next.run(req).await
}

fn unauthorized(msg: &str) -> Response {
    let body = axum::Json(ErrorBody { error: msg.to_string(), code: "unauthorized" });
    (StatusCode::UNAUTHORIZED, body).into_response()
}
