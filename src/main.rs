mod common;
mod model;
mod system;

use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use axum::{Router, http::HeaderValue};
use clap::Parser;
use tower_http::{
    cors::{Any, CorsLayer},
    services::ServeDir,
};
use tracing_subscriber::EnvFilter;

use model::config::Config;
use system::{CaptchaStore, Database, JwtManager, SystemState, UserService};

/// 验证码过期清理间隔
const CAPTCHA_CLEANUP_INTERVAL: Duration = Duration::from_secs(60);

/// 系统用户管理服务
#[derive(Parser, Debug)]
#[command(version, about)]
struct Args {
    /// 配置文件路径
    #[arg(short, long, default_value = Config::default_config_path())]
    config: String,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let args = Args::parse();
    let config = Config::load(&args.config)?;
    tracing::info!(path = ?config.config_path(), "已加载配置");

    let db = Database::open(&config.db_path)?;
    let secret = match &config.jwt_secret {
        Some(secret) if !secret.is_empty() => secret.clone(),
        _ => {
            tracing::warn!("未配置 jwtSecret，已随机生成（重启后 Token 失效）");
            uuid::Uuid::new_v4().simple().to_string()
        }
    };
    let jwt = JwtManager::new(&secret, config.jwt_expire_time);
    let service = UserService::new(db, jwt, &config.static_dir);

    let captcha = Arc::new(CaptchaStore::new());
    system::spawn_cleanup_task(captcha.clone(), CAPTCHA_CLEANUP_INTERVAL);

    let state = SystemState::new(service, captcha);
    let app = Router::new()
        .nest("/system/user", system::create_system_router(state))
        .nest_service("/static", ServeDir::new(&config.static_dir))
        .layer(cors_layer(&config.cors_origins));

    let addr = format!("{}:{}", config.host, config.port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!("服务已启动: http://{}", addr);
    axum::serve(
        listener,
        app.into_make_service_with_connect_info::<SocketAddr>(),
    )
    .await?;
    Ok(())
}

/// CORS 中间件层
///
/// 未配置来源时允许任意来源；Token 通过请求头传递，无需携带凭据
fn cors_layer(origins: &[String]) -> CorsLayer {
    let layer = CorsLayer::new().allow_methods(Any).allow_headers(Any);
    if origins.is_empty() {
        return layer.allow_origin(Any);
    }

    let origins: Vec<HeaderValue> = origins
        .iter()
        .filter_map(|origin| match origin.parse::<HeaderValue>() {
            Ok(value) => Some(value),
            Err(_) => {
                tracing::warn!(origin = %origin, "忽略无效的 CORS 来源");
                None
            }
        })
        .collect();
    layer.allow_origin(origins)
}
