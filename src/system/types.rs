//! 系统用户 API 类型定义

use serde::{Deserialize, Serialize};

use super::entity::{SysDept, SysPost, SysRole, SysUser, UserFilter};
use super::menu::RouteDescriptor;

// ============ 认证 ============

/// 验证码响应
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CaptchaResponse {
    /// PNG 图像的 data URL
    pub base64_captcha: String,
    pub captcha_id: String,
}

/// 登录请求
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
    /// 验证码答案
    pub captcha: String,
    pub captcha_id: String,
}

/// 登录响应
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginResponse {
    pub user: SysUser,
    /// 前端权限标识
    pub permissions: Vec<String>,
    /// 前端路由
    pub menus: Vec<RouteDescriptor>,
    pub token: String,
    /// 过期时间（Unix 时间戳）
    pub expire: i64,
}

/// 刷新 Token 响应
#[derive(Debug, Serialize)]
pub struct TokenResponse {
    pub token: String,
    pub expire: i64,
}

// ============ 用户查询 ============

/// 单页最多返回的用户数
pub const MAX_PAGE_SIZE: u32 = 1000;

/// 用户列表查询参数
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserListQuery {
    pub page_num: Option<u32>,
    pub page_size: Option<u32>,
    #[serde(default)]
    pub status: String,
    #[serde(default)]
    pub username: String,
    #[serde(default)]
    pub phone: String,
    pub dept_id: Option<i64>,
}

impl UserListQuery {
    pub fn filter(&self) -> UserFilter {
        UserFilter {
            status: self.status.clone(),
            username: self.username.clone(),
            phone: self.phone.clone(),
            dept_id: self.dept_id.unwrap_or(0),
        }
    }

    /// 页码（默认 1）
    pub fn page_num(&self) -> u32 {
        self.page_num.unwrap_or(1).max(1)
    }

    /// 每页条数（默认 10，最大 MAX_PAGE_SIZE）
    pub fn page_size(&self) -> u32 {
        self.page_size.unwrap_or(10).clamp(1, MAX_PAGE_SIZE)
    }
}

/// 用户导出查询参数
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ExportQuery {
    pub status: String,
    pub username: String,
    pub phone: String,
}

impl ExportQuery {
    pub fn filter(&self) -> UserFilter {
        UserFilter {
            status: self.status.clone(),
            username: self.username.clone(),
            phone: self.phone.clone(),
            dept_id: 0,
        }
    }
}

/// 用户分页响应
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UserPageResponse {
    pub data: Vec<SysUser>,
    pub total: u64,
    pub page_num: u32,
    pub page_size: u32,
}

/// 个人中心响应
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProfileResponse {
    pub data: SysUser,
    pub post_ids: Vec<i64>,
    pub role_ids: Vec<i64>,
    pub roles: Vec<SysRole>,
    pub posts: Vec<SysPost>,
    pub dept: Vec<SysDept>,
}

/// 用户详情响应
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UserDetailResponse {
    pub data: SysUser,
    /// 逗号分隔的岗位 ID
    pub post_ids: String,
    /// 逗号分隔的角色 ID
    pub role_ids: String,
    pub roles: Vec<SysRole>,
    pub posts: Vec<SysPost>,
}

/// 角色与岗位
#[derive(Debug, Serialize)]
pub struct RolePostResponse {
    pub roles: Vec<SysRole>,
    pub posts: Vec<SysPost>,
}

// ============ 用户修改 ============

/// 修改密码请求
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdatePasswordRequest {
    pub old_password: String,
    pub new_password: String,
}

/// 头像上传响应
#[derive(Debug, Serialize)]
pub struct AvatarResponse {
    pub avatar: String,
}

// ============ 通用响应 ============

/// 操作成功响应
#[derive(Debug, Serialize)]
pub struct SuccessResponse {
    pub success: bool,
    pub message: String,
}

impl SuccessResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            success: true,
            message: message.into(),
        }
    }
}

/// 错误响应
#[derive(Debug, Serialize)]
pub struct ApiErrorResponse {
    pub error: ApiError,
}

#[derive(Debug, Serialize)]
pub struct ApiError {
    #[serde(rename = "type")]
    pub error_type: String,
    pub message: String,
}

impl ApiErrorResponse {
    pub fn new(error_type: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            error: ApiError {
                error_type: error_type.into(),
                message: message.into(),
            },
        }
    }

    pub fn invalid_request(message: impl Into<String>) -> Self {
        Self::new("invalid_request", message)
    }

    pub fn authentication_error(message: impl Into<String>) -> Self {
        Self::new("authentication_error", message)
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        Self::new("not_found", message)
    }

    pub fn internal_error(message: impl Into<String>) -> Self {
        Self::new("internal_error", message)
    }
}
