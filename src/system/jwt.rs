//! JWT Token 管理模块
//!
//! 提供登录 Token 的生成、验证和刷新

use anyhow::{Result, anyhow};
use jsonwebtoken::{DecodingKey, EncodingKey, Header, Validation, decode, encode};
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

/// Token 签发者
pub const ISSUER: &str = "PandaX";

/// 生效时间相对签发时刻的回拨秒数（容忍时钟偏差）
const NOT_BEFORE_SKEW: i64 = 1000;

/// JWT Claims 结构
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Claims {
    pub user_id: i64,
    pub user_name: String,
    pub role_id: i64,
    pub role_key: String,
    pub dept_id: i64,
    pub post_id: i64,
    /// 签发者
    pub iss: String,
    /// 生效时间 (Unix timestamp)
    pub nbf: i64,
    /// 过期时间 (Unix timestamp)
    pub exp: i64,
}

/// 登录账号信息（写入 Token 的业务字段）
#[derive(Debug, Clone, Default)]
pub struct LoginAccount {
    pub user_id: i64,
    pub user_name: String,
    pub role_id: i64,
    pub role_key: String,
    pub dept_id: i64,
    pub post_id: i64,
}

impl From<&Claims> for LoginAccount {
    fn from(claims: &Claims) -> Self {
        Self {
            user_id: claims.user_id,
            user_name: claims.user_name.clone(),
            role_id: claims.role_id,
            role_key: claims.role_key.clone(),
            dept_id: claims.dept_id,
            post_id: claims.post_id,
        }
    }
}

/// JWT 管理器
#[derive(Clone)]
pub struct JwtManager {
    secret: Vec<u8>,
    expire_secs: i64,
}

impl JwtManager {
    /// 使用 SHA256 哈希配置密钥作为 HMAC 签名密钥
    pub fn new(secret: &str, expire_secs: i64) -> Self {
        let mut hasher = Sha256::new();
        hasher.update(secret.as_bytes());
        Self {
            secret: hasher.finalize().to_vec(),
            expire_secs,
        }
    }

    /// 生成 Token
    ///
    /// # Returns
    /// * `Ok((token, expire))` - Token 字符串和过期时间戳
    pub fn create_token(&self, account: &LoginAccount) -> Result<(String, i64)> {
        let now = chrono::Utc::now().timestamp();
        let expire = now + self.expire_secs;

        let claims = Claims {
            user_id: account.user_id,
            user_name: account.user_name.clone(),
            role_id: account.role_id,
            role_key: account.role_key.clone(),
            dept_id: account.dept_id,
            post_id: account.post_id,
            iss: ISSUER.to_string(),
            nbf: now - NOT_BEFORE_SKEW,
            exp: expire,
        };

        let token = encode(
            &Header::default(),
            &claims,
            &EncodingKey::from_secret(&self.secret),
        )?;
        Ok((token, expire))
    }

    /// 验证 Token（签名、签发者与过期时间）
    pub fn verify_token(&self, token: &str) -> Result<Claims> {
        self.decode(token, true)
    }

    /// 刷新 Token
    ///
    /// 已过期但签名有效的 Token 也可刷新
    pub fn refresh_token(&self, token: &str) -> Result<(String, i64)> {
        let claims = self.decode(token, false)?;
        self.create_token(&LoginAccount::from(&claims))
    }

    fn decode(&self, token: &str, validate_exp: bool) -> Result<Claims> {
        let mut validation = Validation::default();
        validation.validate_exp = validate_exp;
        validation.validate_nbf = true;
        validation.set_issuer(&[ISSUER]);
        if !validate_exp {
            validation.required_spec_claims.remove("exp");
        }

        let data = decode::<Claims>(token, &DecodingKey::from_secret(&self.secret), &validation)
            .map_err(|e| anyhow!("Invalid token: {}", e))?;
        Ok(data.claims)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn account() -> LoginAccount {
        LoginAccount {
            user_id: 1,
            user_name: "admin".to_string(),
            role_id: 1,
            role_key: "admin".to_string(),
            dept_id: 2,
            post_id: 3,
        }
    }

    #[test]
    fn test_create_and_verify_token() {
        let jwt = JwtManager::new("test-secret", 3600);

        let (token, expire) = jwt.create_token(&account()).unwrap();
        assert!(!token.is_empty());

        let claims = jwt.verify_token(&token).unwrap();
        assert_eq!(claims.user_id, 1);
        assert_eq!(claims.role_key, "admin");
        assert_eq!(claims.post_id, 3);
        assert_eq!(claims.iss, ISSUER);
        assert_eq!(claims.exp, expire);
        assert!(claims.nbf < claims.exp);
    }

    #[test]
    fn test_verify_token_with_wrong_secret() {
        let (token, _) = JwtManager::new("secret-a", 3600)
            .create_token(&account())
            .unwrap();

        assert!(JwtManager::new("secret-b", 3600).verify_token(&token).is_err());
    }

    #[test]
    fn test_verify_invalid_token() {
        let jwt = JwtManager::new("test-secret", 3600);
        assert!(jwt.verify_token("invalid.token.here").is_err());
    }

    #[test]
    fn test_expired_token_can_be_refreshed() {
        // 过期时间早于默认 60 秒的 leeway
        let expired = JwtManager::new("test-secret", -3600);
        let (token, _) = expired.create_token(&account()).unwrap();

        let jwt = JwtManager::new("test-secret", 3600);
        assert!(jwt.verify_token(&token).is_err());

        let (fresh, expire) = jwt.refresh_token(&token).unwrap();
        let claims = jwt.verify_token(&fresh).unwrap();
        assert_eq!(claims.user_name, "admin");
        assert_eq!(claims.exp, expire);
        assert!(expire > chrono::Utc::now().timestamp());
    }

    #[test]
    fn test_refresh_rejects_foreign_token() {
        let (token, _) = JwtManager::new("other", 3600)
            .create_token(&account())
            .unwrap();
        assert!(JwtManager::new("test-secret", 3600).refresh_token(&token).is_err());
    }
}
