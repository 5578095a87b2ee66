//! 系统模块数据访问层（SQLite）
//!
//! 所有方法均为同步调用，异步上下文中应通过 `spawn_blocking` 使用

use std::sync::Arc;

use anyhow::{Context, Result};
use parking_lot::Mutex;
use rusqlite::{Connection, OptionalExtension, Row, params};

use super::entity::{LogLogin, SysDept, SysPost, SysRole, SysUser, UserFilter};
use super::menu::{MenuRecord, nest_menus};

const SCHEMA: &str = "
CREATE TABLE IF NOT EXISTS sys_user (
    user_id INTEGER PRIMARY KEY AUTOINCREMENT,
    username TEXT NOT NULL UNIQUE,
    nick_name TEXT NOT NULL DEFAULT '',
    password TEXT NOT NULL,
    phone TEXT NOT NULL DEFAULT '',
    email TEXT NOT NULL DEFAULT '',
    sex TEXT NOT NULL DEFAULT '0',
    avatar TEXT NOT NULL DEFAULT '',
    status TEXT NOT NULL DEFAULT '0',
    dept_id INTEGER NOT NULL DEFAULT 0,
    post_id INTEGER NOT NULL DEFAULT 0,
    role_id INTEGER NOT NULL DEFAULT 0,
    role_ids TEXT NOT NULL DEFAULT '',
    post_ids TEXT NOT NULL DEFAULT '',
    remark TEXT NOT NULL DEFAULT '',
    create_by TEXT NOT NULL DEFAULT '',
    update_by TEXT NOT NULL DEFAULT '',
    create_time TEXT NOT NULL,
    update_time TEXT NOT NULL
);
CREATE TABLE IF NOT EXISTS sys_role (
    role_id INTEGER PRIMARY KEY AUTOINCREMENT,
    role_name TEXT NOT NULL,
    role_key TEXT NOT NULL UNIQUE,
    role_sort INTEGER NOT NULL DEFAULT 0,
    status TEXT NOT NULL DEFAULT '0',
    remark TEXT NOT NULL DEFAULT ''
);
CREATE TABLE IF NOT EXISTS sys_post (
    post_id INTEGER PRIMARY KEY AUTOINCREMENT,
    post_name TEXT NOT NULL,
    post_code TEXT NOT NULL,
    sort INTEGER NOT NULL DEFAULT 0,
    status TEXT NOT NULL DEFAULT '0',
    remark TEXT NOT NULL DEFAULT ''
);
CREATE TABLE IF NOT EXISTS sys_dept (
    dept_id INTEGER PRIMARY KEY AUTOINCREMENT,
    parent_id INTEGER NOT NULL DEFAULT 0,
    dept_name TEXT NOT NULL,
    leader TEXT NOT NULL DEFAULT '',
    phone TEXT NOT NULL DEFAULT '',
    email TEXT NOT NULL DEFAULT '',
    sort INTEGER NOT NULL DEFAULT 0,
    status TEXT NOT NULL DEFAULT '0'
);
CREATE TABLE IF NOT EXISTS sys_menu (
    menu_id INTEGER PRIMARY KEY AUTOINCREMENT,
    parent_id INTEGER NOT NULL DEFAULT 0,
    menu_name TEXT NOT NULL,
    menu_type TEXT NOT NULL,
    path TEXT NOT NULL DEFAULT '',
    component TEXT NOT NULL DEFAULT '',
    permission TEXT NOT NULL DEFAULT '',
    is_link TEXT NOT NULL DEFAULT '',
    is_hide TEXT NOT NULL DEFAULT '0',
    is_keep_alive TEXT NOT NULL DEFAULT '0',
    is_affix TEXT NOT NULL DEFAULT '1',
    is_frame TEXT NOT NULL DEFAULT '1',
    icon TEXT NOT NULL DEFAULT '',
    sort INTEGER NOT NULL DEFAULT 0,
    status TEXT NOT NULL DEFAULT '0'
);
CREATE TABLE IF NOT EXISTS sys_role_menu (
    role_id INTEGER NOT NULL,
    menu_id INTEGER NOT NULL,
    PRIMARY KEY (role_id, menu_id)
);
CREATE TABLE IF NOT EXISTS log_login (
    info_id INTEGER PRIMARY KEY AUTOINCREMENT,
    username TEXT NOT NULL,
    status TEXT NOT NULL,
    ipaddr TEXT NOT NULL,
    login_location TEXT NOT NULL,
    browser TEXT NOT NULL,
    os TEXT NOT NULL,
    platform TEXT NOT NULL,
    login_time TEXT NOT NULL,
    remark TEXT NOT NULL,
    msg TEXT NOT NULL,
    create_by TEXT NOT NULL DEFAULT ''
);
CREATE INDEX IF NOT EXISTS idx_log_login_time ON log_login(login_time);
";

const USER_COLUMNS: &str = "user_id, username, nick_name, password, phone, email, sex, avatar, \
     status, dept_id, post_id, role_id, role_ids, post_ids, remark, create_by, update_by, \
     create_time, update_time";

const MENU_COLUMNS: &str = "m.menu_id, m.parent_id, m.menu_name, m.menu_type, m.path, \
     m.component, m.permission, m.is_link, m.is_hide, m.is_keep_alive, m.is_affix, m.is_frame, \
     m.icon, m.sort";

/// 初始管理员密码
pub const DEFAULT_ADMIN_PASSWORD: &str = "123456";

/// 当前本地时间（数据库时间字段格式）
pub fn now_str() -> String {
    chrono::Local::now().format("%Y-%m-%d %H:%M:%S").to_string()
}

/// SQLite 数据库句柄
#[derive(Clone)]
pub struct Database {
    conn: Arc<Mutex<Connection>>,
}

impl Database {
    /// 打开（或创建）数据库文件
    pub fn open(path: &str) -> Result<Self> {
        let conn =
            Connection::open(path).with_context(|| format!("打开数据库失败: {}", path))?;
        Self::init(conn)
    }

    /// 内存数据库（测试使用）
    pub fn open_in_memory() -> Result<Self> {
        Self::init(Connection::open_in_memory()?)
    }

    fn init(conn: Connection) -> Result<Self> {
        conn.execute_batch(SCHEMA).context("初始化数据表失败")?;
        let db = Self {
            conn: Arc::new(Mutex::new(conn)),
        };
        db.seed()?;
        Ok(db)
    }

    /// 空库时写入初始数据：管理员角色、部门、岗位、系统菜单和 admin 用户
    fn seed(&self) -> Result<()> {
        let conn = self.conn.lock();
        let users: i64 = conn.query_row("SELECT COUNT(*) FROM sys_user", [], |row| row.get(0))?;
        if users > 0 {
            return Ok(());
        }

        let password = bcrypt::hash(DEFAULT_ADMIN_PASSWORD, bcrypt::DEFAULT_COST)?;
        let now = now_str();

        let tx = conn.unchecked_transaction()?;
        tx.execute_batch(
            "INSERT INTO sys_role (role_id, role_name, role_key, role_sort, remark)
                 VALUES (1, '超级管理员', 'admin', 1, '内置角色');
             INSERT INTO sys_dept (dept_id, parent_id, dept_name, leader, sort)
                 VALUES (1, 0, '总公司', 'admin', 0);
             INSERT INTO sys_post (post_id, post_name, post_code, sort)
                 VALUES (1, '首席执行官', 'CEO', 0);
             INSERT INTO sys_menu (menu_id, parent_id, menu_name, menu_type, path, component, permission, icon, sort)
                 VALUES (1, 0, '系统管理', 'M', '/system', 'Layout', '', 'iconfont icon-xitongshezhi', 1),
                        (2, 1, '用户管理', 'C', '/system/user', '/system/user/index', 'system:user:list', 'iconfont icon-icon-', 1),
                        (3, 1, '角色管理', 'C', '/system/role', '/system/role/index', 'system:role:list', 'iconfont icon-gerenzhongxin', 2),
                        (4, 1, '菜单管理', 'C', '/system/menu', '/system/menu/index', 'system:menu:list', 'iconfont icon-caidan', 3),
                        (5, 2, '新增用户', 'F', '', '', 'system:user:add', '', 1),
                        (6, 2, '删除用户', 'F', '', '', 'system:user:delete', '', 2),
                        (7, 2, '导出用户', 'F', '', '', 'system:user:export', '', 3);
             INSERT INTO sys_role_menu (role_id, menu_id)
                 SELECT 1, menu_id FROM sys_menu;",
        )?;
        tx.execute(
            "INSERT INTO sys_user (user_id, username, nick_name, password, status, dept_id, post_id,
                 role_id, role_ids, post_ids, create_by, create_time, update_time)
             VALUES (1, 'admin', '管理员', ?1, '0', 1, 1, 1, '1', '1', 'admin', ?2, ?2)",
            params![password, now],
        )?;
        tx.commit()?;

        tracing::info!("已写入系统初始数据（admin / {}）", DEFAULT_ADMIN_PASSWORD);
        Ok(())
    }

    // ============ 用户 ============

    pub fn find_user(&self, user_id: i64) -> Result<Option<SysUser>> {
        let conn = self.conn.lock();
        let sql = format!("SELECT {} FROM sys_user WHERE user_id = ?1", USER_COLUMNS);
        Ok(conn.query_row(&sql, [user_id], user_from_row).optional()?)
    }

    pub fn find_user_by_username(&self, username: &str) -> Result<Option<SysUser>> {
        let conn = self.conn.lock();
        let sql = format!("SELECT {} FROM sys_user WHERE username = ?1", USER_COLUMNS);
        Ok(conn.query_row(&sql, [username], user_from_row).optional()?)
    }

    /// 分页查询用户，返回 (当前页数据, 总数)
    pub fn list_users_page(
        &self,
        filter: &UserFilter,
        page_num: u32,
        page_size: u32,
    ) -> Result<(Vec<SysUser>, u64)> {
        let conn = self.conn.lock();
        let (where_sql, mut params) = user_where(filter);

        let count_sql = format!("SELECT COUNT(*) FROM sys_user {}", where_sql);
        let total: i64 = conn.query_row(
            &count_sql,
            rusqlite::params_from_iter(params.iter().map(|p| p.as_ref())),
            |row| row.get(0),
        )?;

        let query_sql = format!(
            "SELECT {} FROM sys_user {} ORDER BY user_id LIMIT ?{} OFFSET ?{}",
            USER_COLUMNS,
            where_sql,
            params.len() + 1,
            params.len() + 2
        );
        let offset = (i64::from(page_num.max(1)) - 1).saturating_mul(i64::from(page_size));
        params.push(Box::new(page_size as i64));
        params.push(Box::new(offset));

        let mut stmt = conn.prepare(&query_sql)?;
        let users = stmt
            .query_map(
                rusqlite::params_from_iter(params.iter().map(|p| p.as_ref())),
                user_from_row,
            )?
            .collect::<std::result::Result<Vec<_>, _>>()?;

        Ok((users, total as u64))
    }

    pub fn list_users(&self, filter: &UserFilter) -> Result<Vec<SysUser>> {
        let conn = self.conn.lock();
        let (where_sql, params) = user_where(filter);
        let sql = format!(
            "SELECT {} FROM sys_user {} ORDER BY user_id",
            USER_COLUMNS, where_sql
        );

        let mut stmt = conn.prepare(&sql)?;
        let users = stmt
            .query_map(
                rusqlite::params_from_iter(params.iter().map(|p| p.as_ref())),
                user_from_row,
            )?
            .collect::<std::result::Result<Vec<_>, _>>()?;
        Ok(users)
    }

    /// 插入用户，`user.password` 须为已哈希的密码
    pub fn insert_user(&self, user: &SysUser) -> Result<i64> {
        let conn = self.conn.lock();
        let now = now_str();
        conn.execute(
            "INSERT INTO sys_user (username, nick_name, password, phone, email, sex, avatar, status,
                 dept_id, post_id, role_id, role_ids, post_ids, remark, create_by, update_by,
                 create_time, update_time)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12, ?13, ?14, ?15, '', ?16, ?16)",
            params![
                user.username,
                user.nick_name,
                user.password,
                user.phone,
                user.email,
                if user.sex.is_empty() { "0" } else { user.sex.as_str() },
                user.avatar,
                if user.status.is_empty() { "0" } else { user.status.as_str() },
                user.dept_id,
                user.post_id,
                user.role_id,
                user.role_ids,
                user.post_ids,
                user.remark,
                user.create_by,
                now,
            ],
        )?;
        Ok(conn.last_insert_rowid())
    }

    /// 更新用户
    ///
    /// 只覆盖非空字符串和非零 ID 字段；返回受影响行数
    pub fn update_user(&self, user: &SysUser) -> Result<usize> {
        let conn = self.conn.lock();

        let mut sets = Vec::new();
        let mut params: Vec<Box<dyn rusqlite::types::ToSql>> = Vec::new();

        let text_fields = [
            ("username", &user.username),
            ("nick_name", &user.nick_name),
            ("password", &user.password),
            ("phone", &user.phone),
            ("email", &user.email),
            ("sex", &user.sex),
            ("avatar", &user.avatar),
            ("status", &user.status),
            ("role_ids", &user.role_ids),
            ("post_ids", &user.post_ids),
            ("remark", &user.remark),
        ];
        for (column, value) in text_fields {
            if !value.is_empty() {
                sets.push(format!("{} = ?{}", column, params.len() + 1));
                params.push(Box::new(value.clone()));
            }
        }

        let id_fields = [
            ("dept_id", user.dept_id),
            ("post_id", user.post_id),
            ("role_id", user.role_id),
        ];
        for (column, value) in id_fields {
            if value != 0 {
                sets.push(format!("{} = ?{}", column, params.len() + 1));
                params.push(Box::new(value));
            }
        }

        sets.push(format!("update_by = ?{}", params.len() + 1));
        params.push(Box::new(user.update_by.clone()));
        sets.push(format!("update_time = ?{}", params.len() + 1));
        params.push(Box::new(now_str()));

        let sql = format!(
            "UPDATE sys_user SET {} WHERE user_id = ?{}",
            sets.join(", "),
            params.len() + 1
        );
        params.push(Box::new(user.user_id));

        let count = conn.execute(
            &sql,
            rusqlite::params_from_iter(params.iter().map(|p| p.as_ref())),
        )?;
        Ok(count)
    }

    pub fn set_password(&self, user_id: i64, password_hash: &str) -> Result<usize> {
        let conn = self.conn.lock();
        let count = conn.execute(
            "UPDATE sys_user SET password = ?1, update_time = ?2 WHERE user_id = ?3",
            params![password_hash, now_str(), user_id],
        )?;
        Ok(count)
    }

    pub fn delete_users(&self, user_ids: &[i64]) -> Result<usize> {
        if user_ids.is_empty() {
            return Ok(0);
        }
        let conn = self.conn.lock();
        let placeholders: Vec<String> = (1..=user_ids.len()).map(|i| format!("?{}", i)).collect();
        let sql = format!(
            "DELETE FROM sys_user WHERE user_id IN ({})",
            placeholders.join(", ")
        );
        let count = conn.execute(&sql, rusqlite::params_from_iter(user_ids.iter()))?;
        Ok(count)
    }

    // ============ 角色 / 岗位 / 部门 ============

    pub fn find_role(&self, role_id: i64) -> Result<Option<SysRole>> {
        let conn = self.conn.lock();
        Ok(conn
            .query_row(
                "SELECT role_id, role_name, role_key, role_sort, status, remark
                 FROM sys_role WHERE role_id = ?1",
                [role_id],
                role_from_row,
            )
            .optional()?)
    }

    /// 查询角色列表，`role_id` 为 0 时返回全部
    pub fn list_roles(&self, role_id: i64) -> Result<Vec<SysRole>> {
        let conn = self.conn.lock();
        let mut stmt = conn.prepare(
            "SELECT role_id, role_name, role_key, role_sort, status, remark
             FROM sys_role WHERE (?1 = 0 OR role_id = ?1) ORDER BY role_sort, role_id",
        )?;
        let roles = stmt
            .query_map([role_id], role_from_row)?
            .collect::<std::result::Result<Vec<_>, _>>()?;
        Ok(roles)
    }

    pub fn find_post(&self, post_id: i64) -> Result<Option<SysPost>> {
        let conn = self.conn.lock();
        Ok(conn
            .query_row(
                "SELECT post_id, post_name, post_code, sort, status, remark
                 FROM sys_post WHERE post_id = ?1",
                [post_id],
                post_from_row,
            )
            .optional()?)
    }

    /// 查询岗位列表，`post_id` 为 0 时返回全部
    pub fn list_posts(&self, post_id: i64) -> Result<Vec<SysPost>> {
        let conn = self.conn.lock();
        let mut stmt = conn.prepare(
            "SELECT post_id, post_name, post_code, sort, status, remark
             FROM sys_post WHERE (?1 = 0 OR post_id = ?1) ORDER BY sort, post_id",
        )?;
        let posts = stmt
            .query_map([post_id], post_from_row)?
            .collect::<std::result::Result<Vec<_>, _>>()?;
        Ok(posts)
    }

    /// 查询部门列表，`dept_id` 为 0 时返回全部
    pub fn list_depts(&self, dept_id: i64) -> Result<Vec<SysDept>> {
        let conn = self.conn.lock();
        let mut stmt = conn.prepare(
            "SELECT dept_id, parent_id, dept_name, leader, phone, email, sort, status
             FROM sys_dept WHERE (?1 = 0 OR dept_id = ?1) ORDER BY sort, dept_id",
        )?;
        let depts = stmt
            .query_map([dept_id], |row| {
                Ok(SysDept {
                    dept_id: row.get(0)?,
                    parent_id: row.get(1)?,
                    dept_name: row.get(2)?,
                    leader: row.get(3)?,
                    phone: row.get(4)?,
                    email: row.get(5)?,
                    sort: row.get(6)?,
                    status: row.get(7)?,
                })
            })?
            .collect::<std::result::Result<Vec<_>, _>>()?;
        Ok(depts)
    }

    // ============ 菜单 ============

    /// 角色可见的菜单树（目录和菜单，不含按钮；仅启用状态）
    pub fn menu_tree_for_role(&self, role_key: &str) -> Result<Vec<MenuRecord>> {
        let conn = self.conn.lock();
        let sql = format!(
            "SELECT {} FROM sys_menu m
             JOIN sys_role_menu rm ON rm.menu_id = m.menu_id
             JOIN sys_role r ON r.role_id = rm.role_id
             WHERE r.role_key = ?1 AND m.menu_type IN ('M', 'C') AND m.status = '0'
             ORDER BY m.sort, m.menu_id",
            MENU_COLUMNS
        );
        let mut stmt = conn.prepare(&sql)?;
        let rows = stmt
            .query_map([role_key], |row| {
                Ok(MenuRecord {
                    menu_id: row.get(0)?,
                    parent_id: row.get(1)?,
                    menu_name: row.get(2)?,
                    menu_type: row.get(3)?,
                    path: row.get(4)?,
                    component: row.get(5)?,
                    permission: row.get(6)?,
                    is_link: row.get(7)?,
                    is_hide: row.get(8)?,
                    is_keep_alive: row.get(9)?,
                    is_affix: row.get(10)?,
                    is_frame: row.get(11)?,
                    icon: row.get(12)?,
                    sort: row.get(13)?,
                    children: Vec::new(),
                })
            })?
            .collect::<std::result::Result<Vec<_>, _>>()?;

        Ok(nest_menus(rows))
    }

    /// 角色拥有的权限标识（含按钮权限）
    pub fn permissions_for_role(&self, role_id: i64) -> Result<Vec<String>> {
        let conn = self.conn.lock();
        let mut stmt = conn.prepare(
            "SELECT m.permission FROM sys_menu m
             JOIN sys_role_menu rm ON rm.menu_id = m.menu_id
             WHERE rm.role_id = ?1 AND m.permission != '' AND m.status = '0'
             ORDER BY m.menu_id",
        )?;
        let raw = stmt
            .query_map([role_id], |row| row.get::<_, String>(0))?
            .collect::<std::result::Result<Vec<_>, _>>()?;

        let mut permissions: Vec<String> = Vec::new();
        for code in raw.iter().flat_map(|p| p.split(',')) {
            if !code.is_empty() && !permissions.iter().any(|p| p == code) {
                permissions.push(code.to_string());
            }
        }
        Ok(permissions)
    }

    // ============ 登录日志 ============

    pub fn insert_login_log(&self, log: &LogLogin) -> Result<i64> {
        let conn = self.conn.lock();
        conn.execute(
            "INSERT INTO log_login (username, status, ipaddr, login_location, browser, os, platform,
                 login_time, remark, msg, create_by)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11)",
            params![
                log.username,
                log.status,
                log.ipaddr,
                log.login_location,
                log.browser,
                log.os,
                log.platform,
                log.login_time,
                log.remark,
                log.msg,
                log.create_by,
            ],
        )?;
        Ok(conn.last_insert_rowid())
    }

    #[cfg(test)]
    pub(crate) fn login_logs(&self) -> Result<Vec<LogLogin>> {
        let conn = self.conn.lock();
        let mut stmt = conn.prepare(
            "SELECT info_id, username, status, ipaddr, login_location, browser, os, platform,
                    login_time, remark, msg, create_by
             FROM log_login ORDER BY info_id",
        )?;
        let logs = stmt
            .query_map([], |row| {
                Ok(LogLogin {
                    info_id: row.get(0)?,
                    username: row.get(1)?,
                    status: row.get(2)?,
                    ipaddr: row.get(3)?,
                    login_location: row.get(4)?,
                    browser: row.get(5)?,
                    os: row.get(6)?,
                    platform: row.get(7)?,
                    login_time: row.get(8)?,
                    remark: row.get(9)?,
                    msg: row.get(10)?,
                    create_by: row.get(11)?,
                })
            })?
            .collect::<std::result::Result<Vec<_>, _>>()?;
        Ok(logs)
    }
}

fn user_where(filter: &UserFilter) -> (String, Vec<Box<dyn rusqlite::types::ToSql>>) {
    let mut clauses = Vec::new();
    let mut params: Vec<Box<dyn rusqlite::types::ToSql>> = Vec::new();

    if !filter.status.is_empty() {
        clauses.push(format!("status = ?{}", params.len() + 1));
        params.push(Box::new(filter.status.clone()));
    }
    if !filter.username.is_empty() {
        clauses.push(format!("username LIKE ?{}", params.len() + 1));
        params.push(Box::new(format!("%{}%", filter.username)));
    }
    if !filter.phone.is_empty() {
        clauses.push(format!("phone LIKE ?{}", params.len() + 1));
        params.push(Box::new(format!("%{}%", filter.phone)));
    }
    if filter.dept_id != 0 {
        clauses.push(format!("dept_id = ?{}", params.len() + 1));
        params.push(Box::new(filter.dept_id));
    }

    let where_sql = if clauses.is_empty() {
        String::new()
    } else {
        format!("WHERE {}", clauses.join(" AND "))
    };
    (where_sql, params)
}

fn user_from_row(row: &Row<'_>) -> rusqlite::Result<SysUser> {
    Ok(SysUser {
        user_id: row.get(0)?,
        username: row.get(1)?,
        nick_name: row.get(2)?,
        password: row.get(3)?,
        phone: row.get(4)?,
        email: row.get(5)?,
        sex: row.get(6)?,
        avatar: row.get(7)?,
        status: row.get(8)?,
        dept_id: row.get(9)?,
        post_id: row.get(10)?,
        role_id: row.get(11)?,
        role_ids: row.get(12)?,
        post_ids: row.get(13)?,
        remark: row.get(14)?,
        create_by: row.get(15)?,
        update_by: row.get(16)?,
        create_time: row.get(17)?,
        update_time: row.get(18)?,
    })
}

fn role_from_row(row: &Row<'_>) -> rusqlite::Result<SysRole> {
    Ok(SysRole {
        role_id: row.get(0)?,
        role_name: row.get(1)?,
        role_key: row.get(2)?,
        role_sort: row.get(3)?,
        status: row.get(4)?,
        remark: row.get(5)?,
    })
}

fn post_from_row(row: &Row<'_>) -> rusqlite::Result<SysPost> {
    Ok(SysPost {
        post_id: row.get(0)?,
        post_name: row.get(1)?,
        post_code: row.get(2)?,
        sort: row.get(3)?,
        status: row.get(4)?,
        remark: row.get(5)?,
    })
}
