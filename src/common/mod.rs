//! 公共工具模块

pub mod auth;

/// 安全地截断 UTF-8 字符串，确保不会在多字节字符中间截断
///
/// 返回不超过 `max_bytes` 字节的最长有效 UTF-8 子串
pub fn truncate_str_safe(s: &str, max_bytes: usize) -> &str {
    if s.len() <= max_bytes {
        return s;
    }

    let mut end = max_bytes;
    while end > 0 && !s.is_char_boundary(end) {
        end -= 1;
    }

    &s[..end]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_truncate_str_safe() {
        assert_eq!(truncate_str_safe("abc", 10), "abc");
        assert_eq!(truncate_str_safe("abcdef", 3), "abc");
        // "用" 占 3 字节，不能从中间截断
        assert_eq!(truncate_str_safe("用户", 4), "用");
        assert_eq!(truncate_str_safe("用户", 2), "");
    }
}
