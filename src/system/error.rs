//! 系统模块业务错误

use axum::http::StatusCode;

use super::types::ApiErrorResponse;

/// 用户服务错误
#[derive(Debug)]
pub enum ServiceError {
    /// 用户名或密码错误
    InvalidCredentials,
    /// 账号已停用
    Forbidden(String),
    /// 资源不存在
    NotFound(String),
    /// 请求参数不合法
    InvalidRequest(String),
    /// 唯一性冲突
    Conflict(String),
    /// 内部错误（数据库、IO 等）
    InternalError(String),
}

impl std::fmt::Display for ServiceError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ServiceError::InvalidCredentials => write!(f, "用户名或密码错误"),
            ServiceError::Forbidden(msg)
            | ServiceError::NotFound(msg)
            | ServiceError::InvalidRequest(msg)
            | ServiceError::Conflict(msg)
            | ServiceError::InternalError(msg) => write!(f, "{}", msg),
        }
    }
}

impl std::error::Error for ServiceError {}

impl From<anyhow::Error> for ServiceError {
    fn from(e: anyhow::Error) -> Self {
        ServiceError::InternalError(e.to_string())
    }
}

impl From<tokio::task::JoinError> for ServiceError {
    fn from(e: tokio::task::JoinError) -> Self {
        ServiceError::InternalError(format!("后台任务失败: {}", e))
    }
}

impl ServiceError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            ServiceError::InvalidCredentials => StatusCode::UNAUTHORIZED,
            ServiceError::Forbidden(_) => StatusCode::FORBIDDEN,
            ServiceError::NotFound(_) => StatusCode::NOT_FOUND,
            ServiceError::InvalidRequest(_) => StatusCode::BAD_REQUEST,
            ServiceError::Conflict(_) => StatusCode::CONFLICT,
            ServiceError::InternalError(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    pub fn error_body(&self) -> ApiErrorResponse {
        match self {
            ServiceError::InvalidCredentials => {
                ApiErrorResponse::new("invalid_credentials", self.to_string())
            }
            ServiceError::Forbidden(_) => ApiErrorResponse::new("forbidden", self.to_string()),
            ServiceError::NotFound(_) => ApiErrorResponse::not_found(self.to_string()),
            ServiceError::InvalidRequest(_) => ApiErrorResponse::invalid_request(self.to_string()),
            ServiceError::Conflict(_) => ApiErrorResponse::new("conflict", self.to_string()),
            ServiceError::InternalError(msg) => {
                tracing::error!("内部错误: {}", msg);
                ApiErrorResponse::internal_error(self.to_string())
            }
        }
    }
}

impl axum::response::IntoResponse for ServiceError {
    fn into_response(self) -> axum::response::Response {
        let status = self.status_code();
        (status, axum::Json(self.error_body())).into_response()
    }
}
