//! 系统用户 HTTP 处理器

use axum::{
    Extension, Json,
    extract::{Multipart, Path, Query, State},
    http::header,
    response::{IntoResponse, Response},
};

use super::{
    entity::SysUser,
    error::ServiceError,
    jwt::{Claims, LoginAccount},
    middleware::SystemState,
    types::{
        AvatarResponse, ExportQuery, ProfileResponse, RolePostResponse, SuccessResponse,
        UpdatePasswordRequest, UserDetailResponse, UserListQuery, UserPageResponse,
    },
};

/// 头像上传的表单字段名
const AVATAR_FIELD: &str = "upload[]";

/// GET /system/user/sysUserList
/// 分页查询用户列表
pub async fn list_users(
    State(state): State<SystemState>,
    Query(query): Query<UserListQuery>,
) -> Result<Json<UserPageResponse>, ServiceError> {
    Ok(Json(state.service.list_users_page(query).await?))
}

/// GET /system/user/profile
/// 获取当前登录用户
pub async fn get_profile(
    State(state): State<SystemState>,
    Extension(claims): Extension<Claims>,
) -> Result<Json<ProfileResponse>, ServiceError> {
    let account = LoginAccount::from(&claims);
    Ok(Json(state.service.profile(account).await?))
}

/// POST /system/user/profileAvatar
/// 修改头像
pub async fn upload_avatar(
    State(state): State<SystemState>,
    Extension(claims): Extension<Claims>,
    mut multipart: Multipart,
) -> Result<Json<AvatarResponse>, ServiceError> {
    let mut image = None;
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| ServiceError::InvalidRequest(format!("头像上传失败: {}", e)))?
    {
        if field.name() != Some(AVATAR_FIELD) {
            continue;
        }
        tracing::info!(file = field.file_name().unwrap_or_default(), "收到头像上传");
        let bytes = field
            .bytes()
            .await
            .map_err(|e| ServiceError::InvalidRequest(format!("头像上传失败: {}", e)))?;
        image = Some(bytes.to_vec());
    }

    let image = image.ok_or_else(|| ServiceError::InvalidRequest("头像上传失败".to_string()))?;
    let avatar = state
        .service
        .update_avatar(&LoginAccount::from(&claims), image)
        .await?;
    Ok(Json(AvatarResponse { avatar }))
}

/// POST /system/user/updatePwd
/// 修改密码
pub async fn update_password(
    State(state): State<SystemState>,
    Extension(claims): Extension<Claims>,
    Json(payload): Json<UpdatePasswordRequest>,
) -> Result<Json<SuccessResponse>, ServiceError> {
    state
        .service
        .set_password(claims.user_id, payload.old_password, payload.new_password)
        .await?;
    Ok(Json(SuccessResponse::new("密码修改成功")))
}

/// GET /system/user/sysUser/:userId
/// 获取用户
pub async fn get_user(
    State(state): State<SystemState>,
    Path(user_id): Path<i64>,
) -> Result<Json<UserDetailResponse>, ServiceError> {
    Ok(Json(state.service.user_detail(user_id).await?))
}

/// GET /system/user/getInit
/// 获取添加用户可选的角色和岗位
pub async fn get_init(
    State(state): State<SystemState>,
) -> Result<Json<RolePostResponse>, ServiceError> {
    Ok(Json(state.service.init_options().await?))
}

/// GET /system/user/getRoPo
/// 获取当前用户的角色和岗位
pub async fn get_role_post(
    State(state): State<SystemState>,
    Extension(claims): Extension<Claims>,
) -> Result<Json<RolePostResponse>, ServiceError> {
    Ok(Json(state.service.role_post_of(claims.user_id).await?))
}

/// POST /system/user/sysUser
/// 创建用户
pub async fn insert_user(
    State(state): State<SystemState>,
    Extension(claims): Extension<Claims>,
    Json(payload): Json<SysUser>,
) -> Result<Json<SuccessResponse>, ServiceError> {
    let id = state
        .service
        .insert_user(payload, &claims.user_name)
        .await?;
    Ok(Json(SuccessResponse::new(format!("用户 #{} 添加成功", id))))
}

/// PUT /system/user/sysUser
/// 修改用户数据
pub async fn update_user(
    State(state): State<SystemState>,
    Extension(claims): Extension<Claims>,
    Json(payload): Json<SysUser>,
) -> Result<Json<SuccessResponse>, ServiceError> {
    let id = payload.user_id;
    state
        .service
        .update_user(payload, &claims.user_name)
        .await?;
    Ok(Json(SuccessResponse::new(format!("用户 #{} 修改成功", id))))
}

/// PUT /system/user/sysUser/status
/// 修改用户状态
pub async fn update_user_status(
    State(state): State<SystemState>,
    Extension(claims): Extension<Claims>,
    Json(payload): Json<SysUser>,
) -> Result<Json<SuccessResponse>, ServiceError> {
    let id = payload.user_id;
    state
        .service
        .update_status(id, payload.status, &claims.user_name)
        .await?;
    Ok(Json(SuccessResponse::new(format!("用户 #{} 状态已修改", id))))
}

/// DELETE /system/user/sysUser/:userIds
/// 删除用户（多个 ID 使用逗号隔开）
pub async fn delete_users(
    State(state): State<SystemState>,
    Path(user_ids): Path<String>,
) -> Result<Json<SuccessResponse>, ServiceError> {
    let count = state.service.delete_users(&user_ids).await?;
    Ok(Json(SuccessResponse::new(format!("已删除 {} 个用户", count))))
}

/// GET /system/user/export
/// 导出用户
pub async fn export_users(
    State(state): State<SystemState>,
    Query(query): Query<ExportQuery>,
) -> Result<Response, ServiceError> {
    let (file_name, content) = state.service.export_users(query.filter()).await?;

    let disposition = format!(
        "attachment; filename*=UTF-8''{}",
        urlencoding::encode(&file_name)
    );
    Ok((
        [
            (header::CONTENT_TYPE, "text/csv; charset=utf-8".to_string()),
            (header::CONTENT_DISPOSITION, disposition),
        ],
        content,
    )
        .into_response())
}
