//! 系统用户业务逻辑服务

use std::path::PathBuf;

use crate::common::truncate_str_safe;

use super::db::{Database, now_str};
use super::entity::{LogLogin, SysUser, UserFilter};
use super::error::ServiceError;
use super::jwt::{JwtManager, LoginAccount};
use super::menu::build_routes;
use super::types::{
    LoginResponse, ProfileResponse, RolePostResponse, TokenResponse, UserDetailResponse,
    UserListQuery, UserPageResponse,
};

/// 导出文件的 CSV 表头
const EXPORT_HEADER: [&str; 10] = [
    "用户ID", "用户名", "昵称", "手机号", "邮箱", "性别", "状态", "部门ID", "备注", "创建时间",
];

/// 登录日志 remark（原始 User-Agent）的最大字节数
const MAX_REMARK_BYTES: usize = 512;

/// 用户服务
///
/// 封装用户相关 API 的业务逻辑；数据库访问均在阻塞线程池中执行
pub struct UserService {
    db: Database,
    jwt: JwtManager,
    /// 静态文件根目录（头像保存在其下的 uploadfile 目录）
    static_dir: PathBuf,
}

impl UserService {
    pub fn new(db: Database, jwt: JwtManager, static_dir: impl Into<PathBuf>) -> Self {
        Self {
            db,
            jwt,
            static_dir: static_dir.into(),
        }
    }

    pub fn jwt(&self) -> &JwtManager {
        &self.jwt
    }

    async fn blocking<T, F>(&self, f: F) -> Result<T, ServiceError>
    where
        F: FnOnce(&Database) -> Result<T, ServiceError> + Send + 'static,
        T: Send + 'static,
    {
        let db = self.db.clone();
        tokio::task::spawn_blocking(move || f(&db)).await?
    }

    // ============ 认证 ============

    /// 用户登录
    ///
    /// 校验密码后签发 Token，并返回前端权限和路由
    pub async fn login(
        &self,
        username: String,
        password: String,
    ) -> Result<LoginResponse, ServiceError> {
        let (user, role, permissions, menus) = self
            .blocking(move |db| {
                let user = db
                    .find_user_by_username(&username)?
                    .ok_or(ServiceError::InvalidCredentials)?;
                let matched = bcrypt::verify(&password, &user.password)
                    .map_err(|e| ServiceError::InternalError(format!("密码校验失败: {}", e)))?;
                if !matched {
                    return Err(ServiceError::InvalidCredentials);
                }
                if user.status == "1" {
                    return Err(ServiceError::Forbidden("账号已停用".to_string()));
                }

                let role = db
                    .find_role(user.role_id)?
                    .ok_or_else(|| ServiceError::Forbidden("用户未分配角色".to_string()))?;
                let permissions = db.permissions_for_role(role.role_id)?;
                let menus = db.menu_tree_for_role(&role.role_key)?;
                Ok((user, role, permissions, menus))
            })
            .await?;

        let account = LoginAccount {
            user_id: user.user_id,
            user_name: user.username.clone(),
            role_id: user.role_id,
            role_key: role.role_key,
            dept_id: user.dept_id,
            post_id: user.post_id,
        };
        let (token, expire) = self
            .jwt
            .create_token(&account)
            .map_err(|e| ServiceError::InternalError(format!("生成Token失败: {}", e)))?;

        tracing::info!(user = %user.username, "用户登录成功");

        Ok(LoginResponse {
            user,
            permissions,
            menus: build_routes(&menus),
            token,
            expire,
        })
    }

    /// 刷新 Token
    pub fn refresh_token(&self, token: &str) -> Result<TokenResponse, ServiceError> {
        let (token, expire) = self
            .jwt
            .refresh_token(token)
            .map_err(|e| ServiceError::InvalidRequest(format!("刷新token失败: {}", e)))?;
        Ok(TokenResponse { token, expire })
    }

    /// 写入登录日志
    pub async fn record_login_log(&self, log: LogLogin) -> Result<(), ServiceError> {
        self.blocking(move |db| {
            db.insert_login_log(&log)?;
            Ok(())
        })
        .await
    }

    // ============ 查询 ============

    pub async fn list_users_page(
        &self,
        query: UserListQuery,
    ) -> Result<UserPageResponse, ServiceError> {
        let page_num = query.page_num();
        let page_size = query.page_size();
        let filter = query.filter();

        let (data, total) = self
            .blocking(move |db| Ok(db.list_users_page(&filter, page_num, page_size)?))
            .await?;

        Ok(UserPageResponse {
            data,
            total,
            page_num,
            page_size,
        })
    }

    /// 当前登录用户的个人信息
    pub async fn profile(&self, account: LoginAccount) -> Result<ProfileResponse, ServiceError> {
        self.blocking(move |db| {
            let data = db
                .find_user(account.user_id)?
                .ok_or_else(|| ServiceError::NotFound("用户不存在".to_string()))?;

            Ok(ProfileResponse {
                data,
                post_ids: vec![account.post_id],
                role_ids: vec![account.role_id],
                roles: db.list_roles(account.role_id)?,
                posts: db.list_posts(account.post_id)?,
                dept: db.list_depts(account.dept_id)?,
            })
        })
        .await
    }

    pub async fn user_detail(&self, user_id: i64) -> Result<UserDetailResponse, ServiceError> {
        self.blocking(move |db| {
            let data = db
                .find_user(user_id)?
                .ok_or_else(|| ServiceError::NotFound(format!("用户 #{} 不存在", user_id)))?;

            Ok(UserDetailResponse {
                post_ids: data.post_ids.clone(),
                role_ids: data.role_ids.clone(),
                data,
                roles: db.list_roles(0)?,
                posts: db.list_posts(0)?,
            })
        })
        .await
    }

    /// 新增用户时可选的角色和岗位
    pub async fn init_options(&self) -> Result<RolePostResponse, ServiceError> {
        self.blocking(|db| {
            Ok(RolePostResponse {
                roles: db.list_roles(0)?,
                posts: db.list_posts(0)?,
            })
        })
        .await
    }

    /// 用户所属的全部角色和岗位
    ///
    /// 无法解析或已不存在的 ID 会被跳过
    pub async fn role_post_of(&self, user_id: i64) -> Result<RolePostResponse, ServiceError> {
        self.blocking(move |db| {
            let user = db
                .find_user(user_id)?
                .ok_or_else(|| ServiceError::NotFound("用户不存在".to_string()))?;

            let mut roles = Vec::new();
            for id in split_ids(&user.role_ids) {
                if let Some(role) = db.find_role(id)? {
                    roles.push(role);
                }
            }
            let mut posts = Vec::new();
            for id in split_ids(&user.post_ids) {
                if let Some(post) = db.find_post(id)? {
                    posts.push(post);
                }
            }
            Ok(RolePostResponse { roles, posts })
        })
        .await
    }

    // ============ 修改 ============

    pub async fn insert_user(
        &self,
        mut user: SysUser,
        create_by: &str,
    ) -> Result<i64, ServiceError> {
        if user.username.trim().is_empty() {
            return Err(ServiceError::InvalidRequest("用户名不能为空".to_string()));
        }
        if user.password.is_empty() {
            return Err(ServiceError::InvalidRequest("密码不能为空".to_string()));
        }
        user.create_by = create_by.to_string();
        fill_primary_ids(&mut user);

        let id = self
            .blocking(move |db| {
                if db.find_user_by_username(&user.username)?.is_some() {
                    return Err(ServiceError::Conflict(format!(
                        "用户名 {} 已存在",
                        user.username
                    )));
                }
                user.password = hash_password(&user.password)?;
                Ok(db.insert_user(&user)?)
            })
            .await?;

        tracing::info!(user_id = id, by = create_by, "新增用户");
        Ok(id)
    }

    pub async fn update_user(&self, mut user: SysUser, update_by: &str) -> Result<(), ServiceError> {
        if user.user_id == 0 {
            return Err(ServiceError::InvalidRequest("缺少用户ID".to_string()));
        }
        if !user.status.is_empty() {
            check_status(&user.status)?;
        }
        user.update_by = update_by.to_string();
        fill_primary_ids(&mut user);

        self.blocking(move |db| {
            if !user.username.is_empty() {
                if let Some(other) = db.find_user_by_username(&user.username)? {
                    if other.user_id != user.user_id {
                        return Err(ServiceError::Conflict(format!(
                            "用户名 {} 已存在",
                            user.username
                        )));
                    }
                }
            }
            if !user.password.is_empty() {
                user.password = hash_password(&user.password)?;
            }
            match db.update_user(&user)? {
                0 => Err(ServiceError::NotFound(format!("用户 #{} 不存在", user.user_id))),
                _ => Ok(()),
            }
        })
        .await
    }

    /// 修改用户状态（0 正常 / 1 停用）
    pub async fn update_status(
        &self,
        user_id: i64,
        status: String,
        update_by: &str,
    ) -> Result<(), ServiceError> {
        check_status(&status)?;
        let patch = SysUser {
            user_id,
            status,
            ..Default::default()
        };
        self.update_user(patch, update_by).await
    }

    pub async fn update_avatar(
        &self,
        account: &LoginAccount,
        image: Vec<u8>,
    ) -> Result<String, ServiceError> {
        if image.is_empty() {
            return Err(ServiceError::InvalidRequest("头像上传失败".to_string()));
        }

        let upload_dir = self.static_dir.join("uploadfile");
        tokio::fs::create_dir_all(&upload_dir)
            .await
            .map_err(|e| ServiceError::InternalError(format!("创建上传目录失败: {}", e)))?;

        let file_name = format!("{}.jpg", uuid::Uuid::new_v4());
        tokio::fs::write(upload_dir.join(&file_name), &image)
            .await
            .map_err(|e| ServiceError::InternalError(format!("保存头像失败: {}", e)))?;

        let avatar = format!("/static/uploadfile/{}", file_name);
        let patch = SysUser {
            user_id: account.user_id,
            avatar: avatar.clone(),
            ..Default::default()
        };
        if let Err(e) = self.update_user(patch, &account.user_name).await {
            // 用户更新失败时不保留无人引用的文件
            if let Err(io) = tokio::fs::remove_file(upload_dir.join(&file_name)).await {
                tracing::warn!("清理头像文件失败: {}", io);
            }
            return Err(e);
        }
        Ok(avatar)
    }

    /// 修改密码，需提供正确的旧密码
    pub async fn set_password(
        &self,
        user_id: i64,
        old_password: String,
        new_password: String,
    ) -> Result<(), ServiceError> {
        if new_password.is_empty() {
            return Err(ServiceError::InvalidRequest("新密码不能为空".to_string()));
        }

        self.blocking(move |db| {
            let user = db
                .find_user(user_id)?
                .ok_or_else(|| ServiceError::NotFound("用户不存在".to_string()))?;
            let matched = bcrypt::verify(&old_password, &user.password)
                .map_err(|e| ServiceError::InternalError(format!("密码校验失败: {}", e)))?;
            if !matched {
                return Err(ServiceError::InvalidRequest("旧密码错误".to_string()));
            }
            db.set_password(user_id, &hash_password(&new_password)?)?;
            Ok(())
        })
        .await
    }

    /// 删除用户，`user_ids` 为逗号分隔的 ID 列表
    pub async fn delete_users(&self, user_ids: &str) -> Result<usize, ServiceError> {
        let ids = parse_ids(user_ids)?;
        let count = self.blocking(move |db| Ok(db.delete_users(&ids)?)).await?;
        tracing::info!(count, ids = user_ids, "删除用户");
        Ok(count)
    }

    // ============ 导出 ============

    /// 导出用户为 CSV
    ///
    /// 返回 (文件名, 文件内容)
    pub async fn export_users(&self, filter: UserFilter) -> Result<(String, Vec<u8>), ServiceError> {
        let users = self.blocking(move |db| Ok(db.list_users(&filter)?)).await?;

        let mut content = String::from("\u{feff}");
        content.push_str(&EXPORT_HEADER.join(","));
        content.push('\n');
        for user in &users {
            let row = [
                user.user_id.to_string(),
                user.username.clone(),
                user.nick_name.clone(),
                user.phone.clone(),
                user.email.clone(),
                user.sex.clone(),
                user.status.clone(),
                user.dept_id.to_string(),
                user.remark.clone(),
                user.create_time.clone(),
            ];
            let line: Vec<String> = row.iter().map(|f| csv_field(f)).collect();
            content.push_str(&line.join(","));
            content.push('\n');
        }

        let file_name = format!(
            "用户_{}.csv",
            chrono::Local::now().format("%Y%m%d%H%M%S")
        );
        Ok((file_name, content.into_bytes()))
    }

    /// 组装登录日志
    pub fn login_log(
        username: &str,
        msg: &str,
        ip: &std::net::IpAddr,
        user_agent: &str,
    ) -> LogLogin {
        let client = super::user_agent::ClientInfo::parse(user_agent);
        LogLogin {
            username: username.to_string(),
            status: "0".to_string(),
            ipaddr: ip.to_string(),
            login_location: super::user_agent::login_location(ip),
            browser: client.browser,
            os: client.os,
            platform: client.platform,
            login_time: now_str(),
            remark: truncate_str_safe(user_agent, MAX_REMARK_BYTES).to_string(),
            msg: msg.to_string(),
            create_by: username.to_string(),
            ..Default::default()
        }
    }
}

/// 用户状态只允许 0（正常）和 1（停用）
fn check_status(status: &str) -> Result<(), ServiceError> {
    match status {
        "0" | "1" => Ok(()),
        _ => Err(ServiceError::InvalidRequest(format!("无效的状态值: {}", status))),
    }
}

fn hash_password(password: &str) -> Result<String, ServiceError> {
    bcrypt::hash(password, bcrypt::DEFAULT_COST)
        .map_err(|e| ServiceError::InternalError(format!("密码加密失败: {}", e)))
}

/// role_id / post_id 未指定时取 role_ids / post_ids 的第一个
fn fill_primary_ids(user: &mut SysUser) {
    if user.role_id == 0 {
        user.role_id = split_ids(&user.role_ids).next().unwrap_or(0);
    }
    if user.post_id == 0 {
        user.post_id = split_ids(&user.post_ids).next().unwrap_or(0);
    }
}

/// 宽松解析逗号分隔的 ID，跳过无法解析的项
fn split_ids(raw: &str) -> impl Iterator<Item = i64> + '_ {
    raw.split(',').filter_map(|s| s.trim().parse().ok())
}

/// 严格解析逗号分隔的 ID
fn parse_ids(raw: &str) -> Result<Vec<i64>, ServiceError> {
    let ids = raw
        .split(',')
        .map(|s| s.trim())
        .filter(|s| !s.is_empty())
        .map(|s| {
            s.parse::<i64>()
                .map_err(|_| ServiceError::InvalidRequest(format!("无效的用户ID: {}", s)))
        })
        .collect::<Result<Vec<_>, _>>()?;

    if ids.is_empty() {
        return Err(ServiceError::InvalidRequest("用户ID不能为空".to_string()));
    }
    Ok(ids)
}

fn csv_field(value: &str) -> String {
    if value.contains([',', '"', '\n', '\r']) {
        format!("\"{}\"", value.replace('"', "\"\""))
    } else {
        value.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::system::db::DEFAULT_ADMIN_PASSWORD;

    fn service() -> UserService {
        let db = Database::open_in_memory().unwrap();
        let dir = std::env::temp_dir().join(format!("sysadmin-test-{}", uuid::Uuid::new_v4()));
        UserService::new(db, JwtManager::new("test-secret", 3600), dir)
    }

    fn admin() -> LoginAccount {
        LoginAccount {
            user_id: 1,
            user_name: "admin".to_string(),
            role_id: 1,
            role_key: "admin".to_string(),
            dept_id: 1,
            post_id: 1,
        }
    }

    fn new_user(username: &str) -> SysUser {
        SysUser {
            username: username.to_string(),
            password: "secret".to_string(),
            nick_name: format!("{} nick", username),
            role_ids: "1".to_string(),
            post_ids: "1".to_string(),
            dept_id: 1,
            ..Default::default()
        }
    }

    #[test]
    fn test_parse_ids() {
        assert_eq!(parse_ids("1,2, 3").unwrap(), [1, 2, 3]);
        assert_eq!(parse_ids("7,").unwrap(), [7]);
        assert!(parse_ids("").is_err());
        assert!(parse_ids("1,x").is_err());
    }

    #[test]
    fn test_split_ids_skips_garbage() {
        let ids: Vec<_> = split_ids("1,,abc,4").collect();
        assert_eq!(ids, [1, 4]);
    }

    #[test]
    fn test_csv_field() {
        assert_eq!(csv_field("plain"), "plain");
        assert_eq!(csv_field("a,b"), "\"a,b\"");
        assert_eq!(csv_field("say \"hi\""), "\"say \"\"hi\"\"\"");
    }

    #[tokio::test]
    async fn test_login_returns_menus_and_token() {
        let svc = service();
        let resp = svc
            .login("admin".to_string(), DEFAULT_ADMIN_PASSWORD.to_string())
            .await
            .unwrap();

        assert_eq!(resp.user.username, "admin");
        assert_eq!(resp.menus.len(), 1);
        assert_eq!(resp.menus[0].path, "/system");
        assert_eq!(resp.menus[0].children.len(), 3);
        assert_eq!(resp.menus[0].children[0].meta.auth, ["system:user:list"]);
        assert!(resp.permissions.contains(&"system:user:add".to_string()));

        let claims = svc.jwt().verify_token(&resp.token).unwrap();
        assert_eq!(claims.role_key, "admin");
        assert_eq!(claims.exp, resp.expire);
    }

    #[tokio::test]
    async fn test_login_failures() {
        let svc = service();

        let wrong = svc.login("admin".to_string(), "nope".to_string()).await;
        assert!(matches!(wrong, Err(ServiceError::InvalidCredentials)));

        let unknown = svc.login("ghost".to_string(), "x".to_string()).await;
        assert!(matches!(unknown, Err(ServiceError::InvalidCredentials)));

        let id = svc.insert_user(new_user("bob"), "admin").await.unwrap();
        svc.update_status(id, "1".to_string(), "admin").await.unwrap();
        let disabled = svc.login("bob".to_string(), "secret".to_string()).await;
        assert!(matches!(disabled, Err(ServiceError::Forbidden(_))));
    }

    #[tokio::test]
    async fn test_insert_user_rules() {
        let svc = service();

        let id = svc.insert_user(new_user("carol"), "admin").await.unwrap();
        let detail = svc.user_detail(id).await.unwrap();
        assert_eq!(detail.data.create_by, "admin");
        assert_eq!(detail.data.role_id, 1);
        assert_eq!(detail.role_ids, "1");
        assert_ne!(detail.data.password, "secret");

        let dup = svc.insert_user(new_user("carol"), "admin").await;
        assert!(matches!(dup, Err(ServiceError::Conflict(_))));

        let mut no_pwd = new_user("dave");
        no_pwd.password.clear();
        assert!(matches!(
            svc.insert_user(no_pwd, "admin").await,
            Err(ServiceError::InvalidRequest(_))
        ));
    }

    #[tokio::test]
    async fn test_update_user() {
        let svc = service();
        let id = svc.insert_user(new_user("erin"), "admin").await.unwrap();

        let patch = SysUser {
            user_id: id,
            phone: "13900000000".to_string(),
            ..Default::default()
        };
        svc.update_user(patch, "admin").await.unwrap();
        let detail = svc.user_detail(id).await.unwrap();
        assert_eq!(detail.data.phone, "13900000000");
        assert_eq!(detail.data.nick_name, "erin nick");
        assert_eq!(detail.data.update_by, "admin");

        let missing = SysUser {
            user_id: 999,
            phone: "1".to_string(),
            ..Default::default()
        };
        assert!(matches!(
            svc.update_user(missing, "admin").await,
            Err(ServiceError::NotFound(_))
        ));

        let rename = SysUser {
            user_id: id,
            username: "admin".to_string(),
            ..Default::default()
        };
        assert!(matches!(
            svc.update_user(rename, "admin").await,
            Err(ServiceError::Conflict(_))
        ));

        assert!(svc.update_status(id, "9".to_string(), "admin").await.is_err());
    }

    #[tokio::test]
    async fn test_update_user_rejects_unknown_status() {
        let svc = service();
        let id = svc.insert_user(new_user("ivan"), "admin").await.unwrap();

        let patch = SysUser {
            user_id: id,
            status: "9".to_string(),
            ..Default::default()
        };
        assert!(matches!(
            svc.update_user(patch, "admin").await,
            Err(ServiceError::InvalidRequest(_))
        ));
        assert_eq!(svc.user_detail(id).await.unwrap().data.status, "0");
    }

    #[tokio::test]
    async fn test_list_users_page_with_huge_paging() {
        let svc = service();
        let query = UserListQuery {
            page_num: Some(u32::MAX),
            page_size: Some(u32::MAX),
            ..Default::default()
        };

        let page = svc.list_users_page(query).await.unwrap();
        assert!(page.data.is_empty());
        assert_eq!(page.total, 1);
        assert_eq!(page.page_size, crate::system::types::MAX_PAGE_SIZE);
    }

    #[tokio::test]
    async fn test_set_password() {
        let svc = service();

        let wrong = svc
            .set_password(1, "bad".to_string(), "newpass".to_string())
            .await;
        assert!(matches!(wrong, Err(ServiceError::InvalidRequest(_))));

        svc.set_password(1, DEFAULT_ADMIN_PASSWORD.to_string(), "newpass".to_string())
            .await
            .unwrap();
        assert!(svc.login("admin".to_string(), "newpass".to_string()).await.is_ok());
    }

    #[tokio::test]
    async fn test_role_post_of_and_profile() {
        let svc = service();
        let mut user = new_user("frank");
        user.role_ids = "1,42,x".to_string();
        let id = svc.insert_user(user, "admin").await.unwrap();

        let rp = svc.role_post_of(id).await.unwrap();
        assert_eq!(rp.roles.len(), 1);
        assert_eq!(rp.posts.len(), 1);

        let profile = svc.profile(admin()).await.unwrap();
        assert_eq!(profile.data.username, "admin");
        assert_eq!(profile.role_ids, [1]);
        assert_eq!(profile.post_ids, [1]);
        assert_eq!(profile.dept.len(), 1);
    }

    #[tokio::test]
    async fn test_delete_and_export() {
        let svc = service();
        let a = svc.insert_user(new_user("gina"), "admin").await.unwrap();
        let mut b = new_user("hank");
        b.remark = "temp, remove".to_string();
        let b = svc.insert_user(b, "admin").await.unwrap();

        let (name, bytes) = svc.export_users(UserFilter::default()).await.unwrap();
        assert!(name.ends_with(".csv"));
        let text = String::from_utf8(bytes).unwrap();
        let lines: Vec<_> = text.lines().collect();
        assert_eq!(lines.len(), 4);
        assert!(lines[0].starts_with("\u{feff}用户ID,用户名"));
        assert!(lines[3].contains("\"temp, remove\""));

        assert_eq!(svc.delete_users(&format!("{},{}", a, b)).await.unwrap(), 2);
        assert!(svc.delete_users("").await.is_err());
        let page = svc.list_users_page(UserListQuery::default()).await.unwrap();
        assert_eq!(page.total, 1);
        assert_eq!(page.page_num, 1);
        assert_eq!(page.page_size, 10);
    }

    #[tokio::test]
    async fn test_update_avatar() {
        let svc = service();
        let avatar = svc.update_avatar(&admin(), vec![0xff, 0xd8, 0xff]).await.unwrap();
        assert!(avatar.starts_with("/static/uploadfile/"));

        let file = svc
            .static_dir
            .join("uploadfile")
            .join(avatar.trim_start_matches("/static/uploadfile/"));
        assert_eq!(tokio::fs::read(&file).await.unwrap(), [0xff, 0xd8, 0xff]);
        assert_eq!(svc.user_detail(1).await.unwrap().data.avatar, avatar);

        let _ = tokio::fs::remove_dir_all(&svc.static_dir).await;
    }

    #[tokio::test]
    async fn test_update_avatar_for_missing_user_leaves_no_file() {
        let svc = service();
        let ghost = LoginAccount {
            user_id: 999,
            ..admin()
        };

        let result = svc.update_avatar(&ghost, vec![1, 2, 3]).await;
        assert!(matches!(result, Err(ServiceError::NotFound(_))));

        let mut entries = tokio::fs::read_dir(svc.static_dir.join("uploadfile"))
            .await
            .unwrap();
        assert!(entries.next_entry().await.unwrap().is_none());

        let _ = tokio::fs::remove_dir_all(&svc.static_dir).await;
    }

    #[test]
    fn test_login_log_fields() {
        let ip: std::net::IpAddr = "127.0.0.1".parse().unwrap();
        let log = UserService::login_log("admin", "登录成功", &ip, "Mozilla/5.0 (Windows NT 10.0) Chrome/120.0.0.0");
        assert_eq!(log.ipaddr, "127.0.0.1");
        assert_eq!(log.login_location, "内网IP");
        assert_eq!(log.msg, "登录成功");
        assert_eq!(log.status, "0");
        assert!(log.remark.contains("Chrome"));
    }
}
