//! 系统 API 中间件

use std::sync::Arc;

use axum::{
    body::Body,
    extract::State,
    http::{Request, StatusCode},
    middleware::Next,
    response::{IntoResponse, Json, Response},
};

use super::captcha::CaptchaStore;
use super::service::UserService;
use super::types::ApiErrorResponse;
use crate::common::auth;

/// 系统 API 共享状态
#[derive(Clone)]
pub struct SystemState {
    pub service: Arc<UserService>,
    pub captcha: Arc<CaptchaStore>,
}

impl SystemState {
    pub fn new(service: UserService, captcha: Arc<CaptchaStore>) -> Self {
        Self {
            service: Arc::new(service),
            captcha,
        }
    }
}

/// 登录认证中间件
///
/// 验证通过后将 `Claims` 写入请求扩展，供处理器通过 `Extension<Claims>` 读取
pub async fn auth_middleware(
    State(state): State<SystemState>,
    mut request: Request<Body>,
    next: Next,
) -> Response {
    let Some(token) = auth::extract_token(request.headers()) else {
        let error = ApiErrorResponse::authentication_error("Missing authorization token");
        return (StatusCode::UNAUTHORIZED, Json(error)).into_response();
    };

    match state.service.jwt().verify_token(&token) {
        Ok(claims) => {
            request.extensions_mut().insert(claims);
            next.run(request).await
        }
        Err(e) => {
            tracing::debug!("Token 校验失败: {}", e);
            let error = ApiErrorResponse::authentication_error("Invalid or expired token");
            (StatusCode::UNAUTHORIZED, Json(error)).into_response()
        }
    }
}
