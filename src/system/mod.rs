//! 系统用户管理模块
//!
//! 提供登录认证、用户增删改查、头像上传和导出等 API

mod auth_handlers;
mod captcha;
mod db;
mod entity;
mod error;
mod handlers;
mod jwt;
mod menu;
mod middleware;
mod router;
mod service;
mod types;
mod user_agent;

pub use captcha::{CaptchaStore, spawn_cleanup_task};
pub use db::Database;
pub use jwt::JwtManager;
pub use middleware::SystemState;
pub use router::create_system_router;
pub use service::UserService;
