//! 登录日志的客户端信息解析

use std::net::IpAddr;

use woothee::parser::Parser;

/// 无法识别时的占位值
const UNKNOWN: &str = "未知";
const INTERNAL_IP: &str = "内网IP";

/// 从 User-Agent 解析出的客户端信息
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientInfo {
    /// "<浏览器> <版本>"
    pub browser: String,
    pub os: String,
    pub platform: String,
}

impl ClientInfo {
    pub fn parse(user_agent: &str) -> Self {
        match Parser::new().parse(user_agent) {
            Some(result) => Self {
                browser: format!("{} {}", result.name, result.version)
                    .trim()
                    .to_string(),
                os: result.os.to_string(),
                platform: result.category.to_string(),
            },
            None => Self {
                browser: UNKNOWN.to_string(),
                os: UNKNOWN.to_string(),
                platform: UNKNOWN.to_string(),
            },
        }
    }
}

/// 根据 IP 获取登录地点
///
/// 只区分内网地址，公网归属地查询不在本服务内进行
pub fn login_location(ip: &IpAddr) -> String {
    let internal = match ip {
        IpAddr::V4(v4) => v4.is_loopback() || v4.is_private() || v4.is_link_local(),
        IpAddr::V6(v6) => v6.is_loopback() || (v6.segments()[0] & 0xfe00) == 0xfc00,
    };
    if internal {
        INTERNAL_IP.to_string()
    } else {
        UNKNOWN.to_string()
    }
}
