//! 请求认证公共工具

use axum::http::HeaderMap;

/// 前端携带 Token 的请求头
pub const TOKEN_HEADER: &str = "X-TOKEN";

/// 从请求头中提取 Token
///
/// 优先读取 `X-TOKEN`，其次 `Authorization: Bearer <token>`
pub fn extract_token(headers: &HeaderMap) -> Option<String> {
    if let Some(token) = headers
        .get(TOKEN_HEADER)
        .and_then(|v| v.to_str().ok())
        .map(str::trim)
        .filter(|v| !v.is_empty())
    {
        return Some(token.to_string());
    }

    headers
        .get("authorization")
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.strip_prefix("Bearer "))
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extract_token_prefers_x_token() {
        let mut headers = HeaderMap::new();
        headers.insert("x-token", "abc".parse().unwrap());
        headers.insert("authorization", "Bearer def".parse().unwrap());
        assert_eq!(extract_token(&headers).as_deref(), Some("abc"));
    }

    #[test]
    fn test_extract_token_from_bearer() {
        let mut headers = HeaderMap::new();
        headers.insert("authorization", "Bearer def".parse().unwrap());
        assert_eq!(extract_token(&headers).as_deref(), Some("def"));

        headers.insert("authorization", "Basic xyz".parse().unwrap());
        assert!(extract_token(&headers).is_none());
        assert!(extract_token(&HeaderMap::new()).is_none());
    }
}
