//! 系统用户 API 路由配置

use axum::{
    Router, middleware,
    routing::{get, post, put},
};

use super::{
    auth_handlers::{get_captcha, login, logout, refresh_token},
    handlers::{
        delete_users, export_users, get_init, get_profile, get_role_post, get_user,
        insert_user, list_users, update_password, update_user, update_user_status,
        upload_avatar,
    },
    middleware::{SystemState, auth_middleware},
};

/// 创建系统用户路由（挂载到 `/system/user`）
///
/// # 公开端点
/// - `GET /getCaptcha` - 获取验证码
/// - `POST /login` - 用户登录
/// - `GET /refreshToken` - 刷新 Token
///
/// # 认证端点
/// 需要 `X-TOKEN` 或 `Authorization: Bearer <token>`：
/// - `POST /logout`
/// - `GET /sysUserList`
/// - `GET /profile`、`POST /profileAvatar`、`POST /updatePwd`
/// - `GET /sysUser/{id}`、`DELETE /sysUser/{ids}`
/// - `POST /sysUser`、`PUT /sysUser`、`PUT /sysUser/status`
/// - `GET /getInit`、`GET /getRoPo`
/// - `GET /export`
pub fn create_system_router(state: SystemState) -> Router {
    let public = Router::new()
        .route("/getCaptcha", get(get_captcha))
        .route("/login", post(login))
        .route("/refreshToken", get(refresh_token));

    let protected = Router::new()
        .route("/logout", post(logout))
        .route("/sysUserList", get(list_users))
        .route("/profile", get(get_profile))
        .route("/profileAvatar", post(upload_avatar))
        .route("/updatePwd", post(update_password))
        .route("/sysUser", post(insert_user).put(update_user))
        .route("/sysUser/status", put(update_user_status))
        .route("/sysUser/{user_id}", get(get_user).delete(delete_users))
        .route("/getInit", get(get_init))
        .route("/getRoPo", get(get_role_post))
        .route("/export", get(export_users))
        .layer(middleware::from_fn_with_state(state.clone(), auth_middleware));

    public.merge(protected).with_state(state)
}
