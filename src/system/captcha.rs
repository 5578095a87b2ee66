//! 图形验证码模块
//!
//! 登录前需先获取验证码，验证码一次性使用；同时提供按 IP 的登录限流

use std::collections::HashMap;
use std::time::{Duration, Instant};

use base64::{Engine as _, engine::general_purpose};
use parking_lot::RwLock;
use subtle::ConstantTimeEq;
use uuid::Uuid;

/// 验证码有效期
const SESSION_TTL: Duration = Duration::from_secs(5 * 60);
/// 单个验证码最多验证次数
const MAX_VERIFY_ATTEMPTS: u8 = 3;
/// 限流窗口内最多登录次数
const MAX_LOGIN_ATTEMPTS: u8 = 5;
/// 限流时间窗口
const RATE_LIMIT_WINDOW: Duration = Duration::from_secs(15 * 60);

#[derive(Debug, Clone)]
struct CaptchaSession {
    /// 正确答案(小写)
    answer: String,
    created_at: Instant,
    attempts: u8,
}

#[derive(Debug, Clone)]
struct RateLimitEntry {
    attempts: u8,
    window_start: Instant,
}

/// 验证码存储
#[derive(Default)]
pub struct CaptchaStore {
    /// captchaId -> session
    sessions: RwLock<HashMap<String, CaptchaSession>>,
    /// IP -> limit entry
    rate_limits: RwLock<HashMap<String, RateLimitEntry>>,
}

impl CaptchaStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// 生成验证码
    ///
    /// 返回 (captchaId, base64 data URL)
    pub fn generate(&self) -> Result<(String, String), CaptchaError> {
        let (answer, png_bytes) = generate_captcha_image()?;
        let id = self.insert(&answer);

        let image = format!(
            "data:image/png;base64,{}",
            general_purpose::STANDARD.encode(&png_bytes)
        );
        Ok((id, image))
    }

    fn insert(&self, answer: &str) -> String {
        let id = Uuid::new_v4().simple().to_string();
        self.sessions.write().insert(
            id.clone(),
            CaptchaSession {
                answer: answer.to_lowercase(),
                created_at: Instant::now(),
                attempts: 0,
            },
        );
        id
    }

    /// 验证答案（不区分大小写）
    pub fn verify(&self, id: &str, answer: &str) -> Result<(), CaptchaError> {
        let mut sessions = self.sessions.write();

        let session = sessions.get_mut(id).ok_or(CaptchaError::TokenNotFound)?;

        if session.created_at.elapsed() > SESSION_TTL {
            sessions.remove(id);
            return Err(CaptchaError::TokenNotFound);
        }

        if session.attempts >= MAX_VERIFY_ATTEMPTS {
            sessions.remove(id);
            return Err(CaptchaError::TooManyAttempts);
        }

        session.attempts += 1;

        let expected = session.answer.as_bytes();
        let given = answer.to_lowercase();
        if bool::from(expected.ct_eq(given.as_bytes())) {
            sessions.remove(id);
            Ok(())
        } else {
            Err(CaptchaError::AnswerIncorrect)
        }
    }

    /// 检查登录限流
    pub fn check_rate_limit(&self, ip: &str) -> Result<(), CaptchaError> {
        let mut rate_limits = self.rate_limits.write();
        let now = Instant::now();

        let entry = rate_limits.entry(ip.to_string()).or_insert(RateLimitEntry {
            attempts: 0,
            window_start: now,
        });

        if now.duration_since(entry.window_start) > RATE_LIMIT_WINDOW {
            entry.attempts = 0;
            entry.window_start = now;
        }

        if entry.attempts >= MAX_LOGIN_ATTEMPTS {
            return Err(CaptchaError::TooManyAttempts);
        }

        entry.attempts += 1;
        Ok(())
    }

    /// 登录成功后清除该 IP 的限流计数
    pub fn reset_rate_limit(&self, ip: &str) {
        self.rate_limits.write().remove(ip);
    }

    /// 清理过期的验证码会话和限流条目
    pub fn cleanup_expired(&self) {
        let now = Instant::now();

        self.sessions
            .write()
            .retain(|_, session| now.duration_since(session.created_at) < SESSION_TTL);

        self.rate_limits
            .write()
            .retain(|_, entry| now.duration_since(entry.window_start) < RATE_LIMIT_WINDOW);
    }

    #[cfg(test)]
    pub(crate) fn insert_known(&self, answer: &str) -> String {
        self.insert(answer)
    }
}

/// 启动后台清理任务
pub fn spawn_cleanup_task(store: std::sync::Arc<CaptchaStore>, interval: Duration) {
    tokio::spawn(async move {
        let mut ticker = tokio::time::interval(interval);
        loop {
            ticker.tick().await;
            store.cleanup_expired();
            tracing::debug!("已清理过期验证码");
        }
    });
}

/// 验证码错误类型
#[derive(Debug, Clone)]
pub enum CaptchaError {
    /// 验证码不存在或已过期
    TokenNotFound,
    /// 答案错误
    AnswerIncorrect,
    /// 尝试次数过多
    TooManyAttempts,
    /// 图像生成失败
    GenerateFailed,
}

impl std::fmt::Display for CaptchaError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CaptchaError::TokenNotFound => write!(f, "验证码不存在或已过期"),
            CaptchaError::AnswerIncorrect => write!(f, "验证码认证失败"),
            CaptchaError::TooManyAttempts => write!(f, "尝试次数过多，请稍后再试"),
            CaptchaError::GenerateFailed => write!(f, "验证码生成失败"),
        }
    }
}

impl std::error::Error for CaptchaError {}

/// 生成验证码图像
///
/// 返回 (答案字符串, PNG 图像字节)
fn generate_captcha_image() -> Result<(String, Vec<u8>), CaptchaError> {
    use captcha::Captcha;
    use captcha::filters::{Noise, Wave};

    let mut captcha = Captcha::new();
    captcha
        .add_chars(4)
        .apply_filter(Noise::new(0.1))
        .apply_filter(Wave::new(2.0, 10.0))
        .view(160, 60);

    let answer = captcha.chars_as_string();
    let png = captcha.as_png().ok_or(CaptchaError::GenerateFailed)?;
    Ok((answer, png))
}
