//! 前端路由构建
//!
//! 将数据层返回的菜单树转换为前端路由描述

use serde::{Deserialize, Serialize};

/// 菜单记录（sys_menu 行，children 由数据层嵌套）
///
/// 布尔类标记以字符串存储，取值 "0" / "1"
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MenuRecord {
    pub menu_id: i64,
    pub parent_id: i64,
    pub menu_name: String,
    /// 菜单类型：M 目录 / C 菜单 / F 按钮
    pub menu_type: String,
    pub path: String,
    pub component: String,
    /// 逗号分隔的权限标识
    pub permission: String,
    /// 外链地址（原样透传）
    pub is_link: String,
    pub is_hide: String,
    pub is_keep_alive: String,
    pub is_affix: String,
    pub is_frame: String,
    pub icon: String,
    pub sort: i64,
    #[serde(default)]
    pub children: Vec<MenuRecord>,
}

/// 前端路由描述
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RouteDescriptor {
    pub name: String,
    pub path: String,
    pub component: String,
    pub meta: RouteMeta,
    pub children: Vec<RouteDescriptor>,
}

/// 路由元信息
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RouteMeta {
    pub title: String,
    pub is_link: String,
    pub is_hide: bool,
    pub is_keep_alive: bool,
    pub is_affix: bool,
    pub is_frame: bool,
    /// 权限标识列表（保持原顺序，不去重）
    pub auth: Vec<String>,
    pub icon: String,
}

/// 构建前端路由
///
/// 结构保持不变：输出与输入的层级、顺序、节点数完全一致。
/// 注意 isHide 以 "1" 为真，而 isKeepAlive / isAffix / isFrame 以 "0" 为真。
pub fn build_routes(menus: &[MenuRecord]) -> Vec<RouteDescriptor> {
    menus
        .iter()
        .map(|menu| RouteDescriptor {
            name: menu.path.clone(),
            path: menu.path.clone(),
            component: menu.component.clone(),
            meta: RouteMeta {
                title: menu.menu_name.clone(),
                is_link: menu.is_link.clone(),
                is_hide: menu.is_hide == "1",
                is_keep_alive: menu.is_keep_alive == "0",
                is_affix: menu.is_affix == "0",
                is_frame: menu.is_frame == "0",
                auth: split_permission(&menu.permission),
                icon: menu.icon.clone(),
            },
            children: build_routes(&menu.children),
        })
        .collect()
}

fn split_permission(permission: &str) -> Vec<String> {
    if permission.is_empty() {
        return Vec::new();
    }
    permission.split(',').map(str::to_string).collect()
}

/// 将扁平菜单行嵌套为菜单树
///
/// parent_id 为 0 或父节点不在列表中的行作为根；同级顺序沿用输入顺序。
/// 父子关系成环（含以自身为父）的行无法从根到达，按输入顺序追加为根
pub fn nest_menus(rows: Vec<MenuRecord>) -> Vec<MenuRecord> {
    let ids: std::collections::HashSet<i64> = rows.iter().map(|m| m.menu_id).collect();
    let (roots, mut rest): (Vec<_>, Vec<_>) = rows
        .into_iter()
        .partition(|m| m.parent_id == 0 || !ids.contains(&m.parent_id));

    let mut tree: Vec<MenuRecord> = roots
        .into_iter()
        .map(|root| attach_children(root, &mut rest))
        .collect();

    while !rest.is_empty() {
        let cyclic = rest.remove(0);
        tree.push(attach_children(cyclic, &mut rest));
    }
    tree
}

fn attach_children(mut node: MenuRecord, pool: &mut Vec<MenuRecord>) -> MenuRecord {
    let (mine, others): (Vec<_>, Vec<_>) = std::mem::take(pool)
        .into_iter()
        .partition(|m| m.parent_id == node.menu_id);
    *pool = others;

    node.children = mine
        .into_iter()
        .map(|child| attach_children(child, pool))
        .collect();
    node
}

#[cfg(test)]
mod tests {
    use super::*;

    fn menu(path: &str, permission: &str, children: Vec<MenuRecord>) -> MenuRecord {
        MenuRecord {
            path: path.to_string(),
            component: "Layout".to_string(),
            menu_name: path.to_string(),
            permission: permission.to_string(),
            is_hide: "0".to_string(),
            is_keep_alive: "1".to_string(),
            is_affix: "1".to_string(),
            is_frame: "1".to_string(),
            children,
            ..Default::default()
        }
    }

    fn count(routes: &[RouteDescriptor]) -> usize {
        routes.iter().map(|r| 1 + count(&r.children)).sum()
    }

    fn depth(routes: &[RouteDescriptor]) -> usize {
        routes.iter().map(|r| 1 + depth(&r.children)).max().unwrap_or(0)
    }

    #[test]
    fn test_empty_forest() {
        assert!(build_routes(&[]).is_empty());
    }

    #[test]
    fn test_shape_is_preserved() {
        let input = vec![
            menu("/a", "", vec![menu("/a/1", "", vec![]), menu("/a/2", "", vec![menu("/a/2/x", "", vec![])])]),
            menu("/b", "", vec![]),
            menu("/c", "", vec![menu("/c/1", "", vec![])]),
        ];

        let routes = build_routes(&input);

        assert_eq!(routes.len(), 3);
        assert_eq!(count(&routes), 7);
        assert_eq!(depth(&routes), 3);
        let paths: Vec<_> = routes.iter().map(|r| r.path.as_str()).collect();
        assert_eq!(paths, ["/a", "/b", "/c"]);
        let children: Vec<_> = routes[0].children.iter().map(|r| r.path.as_str()).collect();
        assert_eq!(children, ["/a/1", "/a/2"]);
        assert!(routes[1].children.is_empty());
    }

    #[test]
    fn test_name_and_path_both_take_menu_path() {
        let routes = build_routes(&[menu("/sys/user", "", vec![])]);
        assert_eq!(routes[0].name, "/sys/user");
        assert_eq!(routes[0].path, "/sys/user");
    }

    #[test]
    fn test_permission_split() {
        let routes = build_routes(&[
            menu("/a", "a,b,c", vec![]),
            menu("/b", "", vec![]),
            menu("/c", "x, y,x", vec![]),
        ]);

        assert_eq!(routes[0].meta.auth, ["a", "b", "c"]);
        assert!(routes[1].meta.auth.is_empty());
        // 不去除空白，不去重
        assert_eq!(routes[2].meta.auth, ["x", " y", "x"]);
    }

    #[test]
    fn test_flag_sentinels() {
        let mut m = menu("/a", "", vec![]);
        m.is_hide = "1".to_string();
        m.is_keep_alive = "0".to_string();
        m.is_affix = "0".to_string();
        m.is_frame = "0".to_string();
        let meta = &build_routes(&[m])[0].meta;
        assert!(meta.is_hide && meta.is_keep_alive && meta.is_affix && meta.is_frame);

        let meta = &build_routes(&[menu("/b", "", vec![])])[0].meta;
        assert!(!meta.is_hide && !meta.is_keep_alive && !meta.is_affix && !meta.is_frame);

        // 非哨兵值一律为 false
        let mut m = menu("/c", "", vec![]);
        m.is_hide = "true".to_string();
        m.is_keep_alive = String::new();
        assert!(!build_routes(&[m])[0].meta.is_hide);
    }

    #[test]
    fn test_is_link_passes_through() {
        let mut m = menu("/docs", "", vec![]);
        m.is_link = "https://example.com/docs".to_string();
        assert_eq!(build_routes(&[m])[0].meta.is_link, "https://example.com/docs");
    }

    #[test]
    fn test_system_menu_scenario() {
        let input = vec![MenuRecord {
            path: "/sys".to_string(),
            component: "Layout".to_string(),
            menu_name: "System".to_string(),
            permission: "sys:view,sys:edit".to_string(),
            is_hide: "1".to_string(),
            is_keep_alive: "0".to_string(),
            is_affix: "0".to_string(),
            is_frame: "0".to_string(),
            icon: "setting".to_string(),
            children: vec![MenuRecord {
                path: "/sys/user".to_string(),
                component: "UserPage".to_string(),
                menu_name: "Users".to_string(),
                permission: String::new(),
                is_hide: "0".to_string(),
                is_keep_alive: "1".to_string(),
                is_affix: "1".to_string(),
                is_frame: "1".to_string(),
                icon: String::new(),
                children: vec![],
                ..Default::default()
            }],
            ..Default::default()
        }];

        let routes = build_routes(&input);
        assert_eq!(routes.len(), 1);

        let sys = &routes[0];
        assert_eq!(sys.name, "/sys");
        assert_eq!(sys.path, "/sys");
        assert_eq!(sys.component, "Layout");
        assert_eq!(sys.meta.title, "System");
        assert_eq!(sys.meta.icon, "setting");
        assert!(sys.meta.is_hide);
        assert!(sys.meta.is_keep_alive);
        assert!(sys.meta.is_affix);
        assert!(sys.meta.is_frame);
        assert_eq!(sys.meta.auth, ["sys:view", "sys:edit"]);
        assert_eq!(sys.children.len(), 1);

        let user = &sys.children[0];
        assert_eq!(user.name, "/sys/user");
        assert_eq!(user.path, "/sys/user");
        assert_eq!(user.component, "UserPage");
        assert!(user.meta.auth.is_empty());
        assert!(!user.meta.is_hide);
        assert!(!user.meta.is_keep_alive);
        assert!(!user.meta.is_affix);
        assert!(!user.meta.is_frame);
        assert!(user.children.is_empty());
    }

    #[test]
    fn test_serialized_children_is_empty_array() {
        let json = serde_json::to_value(build_routes(&[menu("/a", "", vec![])])).unwrap();
        assert_eq!(json[0]["children"], serde_json::json!([]));
        assert_eq!(json[0]["meta"]["isKeepAlive"], false);
        assert_eq!(json[0]["meta"]["auth"], serde_json::json!([]));
    }

    #[test]
    fn test_nest_menus() {
        let row = |id: i64, parent: i64| MenuRecord {
            menu_id: id,
            parent_id: parent,
            path: format!("/{}", id),
            ..Default::default()
        };
        // 子节点出现在父节点之前也能正确挂载
        let rows = vec![row(3, 1), row(1, 0), row(2, 0), row(4, 3), row(5, 1), row(6, 99)];

        let tree = nest_menus(rows);

        let roots: Vec<_> = tree.iter().map(|m| m.menu_id).collect();
        assert_eq!(roots, [1, 2, 6]);
        let kids: Vec<_> = tree[0].children.iter().map(|m| m.menu_id).collect();
        assert_eq!(kids, [3, 5]);
        assert_eq!(tree[0].children[0].children[0].menu_id, 4);
        assert!(tree[1].children.is_empty());
    }

    #[test]
    fn test_nest_menus_keeps_cyclic_rows() {
        let row = |id: i64, parent: i64| MenuRecord {
            menu_id: id,
            parent_id: parent,
            ..Default::default()
        };
        // 7 以自身为父；8 和 9 互为父节点；10 挂在 9 下
        let rows = vec![row(1, 0), row(7, 7), row(8, 9), row(9, 8), row(10, 9)];

        let tree = nest_menus(rows);

        let roots: Vec<_> = tree.iter().map(|m| m.menu_id).collect();
        assert_eq!(roots, [1, 7, 8]);
        assert!(tree[1].children.is_empty());
        assert_eq!(tree[2].children.len(), 1);
        assert_eq!(tree[2].children[0].menu_id, 9);
        assert_eq!(tree[2].children[0].children[0].menu_id, 10);
    }
}
