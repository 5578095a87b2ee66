use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// 服务配置
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Config {
    #[serde(default = "default_host")]
    pub host: String,

    #[serde(default = "default_port")]
    pub port: u16,

    /// JWT 签名密钥（可选，未配置时启动随机生成，重启后旧 Token 全部失效）
    #[serde(default)]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub jwt_secret: Option<String>,

    /// Token 有效期（秒）
    #[serde(default = "default_jwt_expire_time")]
    pub jwt_expire_time: i64,

    /// SQLite 数据库文件路径
    #[serde(default = "default_db_path")]
    pub db_path: String,

    /// 静态文件目录，通过 `/static` 对外提供（头像上传到其下的 uploadfile 目录）
    #[serde(default = "default_static_dir")]
    pub static_dir: String,

    /// 允许跨域的来源，为空时允许任意来源
    #[serde(default)]
    pub cors_origins: Vec<String>,

    /// 配置文件路径（运行时元数据，不写入 JSON）
    #[serde(skip)]
    config_path: Option<PathBuf>,
}

fn default_host() -> String {
    "127.0.0.1".to_string()
}

fn default_port() -> u16 {
    7788
}

fn default_jwt_expire_time() -> i64 {
    7 * 24 * 3600
}

fn default_db_path() -> String {
    "sysadmin.db".to_string()
}

fn default_static_dir() -> String {
    "static".to_string()
}

impl Default for Config {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            jwt_secret: None,
            jwt_expire_time: default_jwt_expire_time(),
            db_path: default_db_path(),
            static_dir: default_static_dir(),
            cors_origins: Vec::new(),
            config_path: None,
        }
    }
}

impl Config {
    /// 获取默认配置文件路径
    pub fn default_config_path() -> &'static str {
        "config.json"
    }

    /// 从文件加载配置，文件不存在时使用默认配置
    pub fn load<P: AsRef<Path>>(path: P) -> anyhow::Result<Self> {
        let path = path.as_ref();
        if !path.exists() {
            let mut config = Self::default();
            config.config_path = Some(path.to_path_buf());
            return Ok(config);
        }

        let content = fs::read_to_string(path)?;
        let mut config: Config = serde_json::from_str(&content)?;
        config.config_path = Some(path.to_path_buf());
        Ok(config)
    }

    pub fn config_path(&self) -> Option<&Path> {
        self.config_path.as_deref()
    }
}
