//! 系统模块数据实体

use serde::{Deserialize, Serialize};

/// 系统用户
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SysUser {
    pub user_id: i64,
    pub username: String,
    pub nick_name: String,
    /// 密码哈希，不返回给前端
    #[serde(skip_serializing)]
    pub password: String,
    pub phone: String,
    pub email: String,
    /// 0 男 / 1 女 / 2 未知
    pub sex: String,
    pub avatar: String,
    /// 0 正常 / 1 停用
    pub status: String,
    pub dept_id: i64,
    pub post_id: i64,
    pub role_id: i64,
    /// 逗号分隔的角色 ID
    pub role_ids: String,
    /// 逗号分隔的岗位 ID
    pub post_ids: String,
    pub remark: String,
    pub create_by: String,
    pub update_by: String,
    pub create_time: String,
    pub update_time: String,
}

/// 用户列表过滤条件
#[derive(Debug, Clone, Default)]
pub struct UserFilter {
    pub status: String,
    pub username: String,
    pub phone: String,
    pub dept_id: i64,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SysRole {
    pub role_id: i64,
    pub role_name: String,
    pub role_key: String,
    pub role_sort: i64,
    pub status: String,
    pub remark: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SysPost {
    pub post_id: i64,
    pub post_name: String,
    pub post_code: String,
    pub sort: i64,
    pub status: String,
    pub remark: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SysDept {
    pub dept_id: i64,
    pub parent_id: i64,
    pub dept_name: String,
    pub leader: String,
    pub phone: String,
    pub email: String,
    pub sort: i64,
    pub status: String,
}

/// 登录日志
#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LogLogin {
    pub info_id: i64,
    pub username: String,
    /// 0 成功 / 1 失败
    pub status: String,
    pub ipaddr: String,
    pub login_location: String,
    pub browser: String,
    pub os: String,
    pub platform: String,
    pub login_time: String,
    pub remark: String,
    pub msg: String,
    pub create_by: String,
}
