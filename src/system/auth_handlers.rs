//! 登录认证相关处理器
//!
//! 提供验证码、登录、刷新 Token 和退出登录端点

use std::net::SocketAddr;

use axum::{
    Extension,
    extract::{ConnectInfo, State},
    http::{HeaderMap, StatusCode, header},
    response::Json,
};

use super::{
    captcha::CaptchaError,
    entity::LogLogin,
    error::ServiceError,
    jwt::Claims,
    middleware::SystemState,
    service::UserService,
    types::{
        ApiErrorResponse, CaptchaResponse, LoginRequest, LoginResponse, SuccessResponse,
        TokenResponse,
    },
};
use crate::common::auth;

type ApiError = (StatusCode, Json<ApiErrorResponse>);

/// GET /system/user/getCaptcha
///
/// 生成验证码图像
pub async fn get_captcha(
    State(state): State<SystemState>,
) -> Result<Json<CaptchaResponse>, ApiError> {
    let (captcha_id, image) = state.captcha.generate().map_err(handle_captcha_error)?;

    Ok(Json(CaptchaResponse {
        base64_captcha: image,
        captcha_id,
    }))
}

/// POST /system/user/login
///
/// 校验验证码和账号密码，返回 Token、权限和前端路由
pub async fn login(
    State(state): State<SystemState>,
    ConnectInfo(addr): ConnectInfo<SocketAddr>,
    headers: HeaderMap,
    Json(payload): Json<LoginRequest>,
) -> Result<Json<LoginResponse>, ApiError> {
    let ip = addr.ip();
    let ip_str = ip.to_string();
    let user_agent = user_agent(&headers);

    // 1. 检查速率限制
    state
        .captcha
        .check_rate_limit(&ip_str)
        .map_err(handle_captcha_error)?;

    // 2. 验证码
    state
        .captcha
        .verify(&payload.captcha_id, &payload.captcha)
        .map_err(handle_captcha_error)?;

    // 3. 账号密码
    let username = payload.username.clone();
    match state.service.login(payload.username, payload.password).await {
        Ok(response) => {
            state.captcha.reset_rate_limit(&ip_str);
            let log = UserService::login_log(&username, "登录成功", &ip, user_agent);
            record_log(&state, log).await;
            Ok(Json(response))
        }
        Err(e) => {
            let mut log = UserService::login_log(&username, &e.to_string(), &ip, user_agent);
            log.status = "1".to_string();
            record_log(&state, log).await;
            Err((e.status_code(), Json(e.error_body())))
        }
    }
}

/// GET /system/user/refreshToken
///
/// 使用 `X-TOKEN` 中的旧 Token 换取新 Token
pub async fn refresh_token(
    State(state): State<SystemState>,
    headers: HeaderMap,
) -> Result<Json<TokenResponse>, ServiceError> {
    let token = auth::extract_token(&headers)
        .ok_or_else(|| ServiceError::InvalidRequest("缺少 X-TOKEN 请求头".to_string()))?;
    Ok(Json(state.service.refresh_token(&token)?))
}

/// POST /system/user/logout
pub async fn logout(
    State(state): State<SystemState>,
    ConnectInfo(addr): ConnectInfo<SocketAddr>,
    Extension(claims): Extension<Claims>,
    headers: HeaderMap,
) -> Json<SuccessResponse> {
    let log = UserService::login_log(
        &claims.user_name,
        "退出成功",
        &addr.ip(),
        user_agent(&headers),
    );
    record_log(&state, log).await;
    Json(SuccessResponse::new("退出成功"))
}

fn user_agent(headers: &HeaderMap) -> &str {
    headers
        .get(header::USER_AGENT)
        .and_then(|v| v.to_str().ok())
        .unwrap_or_default()
}

/// 写入登录日志，失败只记录告警，不影响请求结果
async fn record_log(state: &SystemState, log: LogLogin) {
    if let Err(e) = state.service.record_login_log(log).await {
        tracing::warn!("写入登录日志失败: {}", e);
    }
}

/// 处理验证码错误
fn handle_captcha_error(error: CaptchaError) -> ApiError {
    match error {
        CaptchaError::TooManyAttempts => (
            StatusCode::TOO_MANY_REQUESTS,
            Json(ApiErrorResponse::new("rate_limit_exceeded", error.to_string())),
        ),
        CaptchaError::TokenNotFound | CaptchaError::AnswerIncorrect => (
            StatusCode::BAD_REQUEST,
            Json(ApiErrorResponse::new("invalid_captcha", "验证码认证失败")),
        ),
        CaptchaError::GenerateFailed => (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(ApiErrorResponse::internal_error(error.to_string())),
        ),
    }
}
