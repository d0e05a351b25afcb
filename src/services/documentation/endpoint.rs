//! 生成服务 URL 构建工具

/// 生成端点路径
pub const GENERATE_PATH: &str = "/generate-docs";

/// 只读文档端点路径
pub const DOCUMENTATION_PATH: &str = "/api/documentation";

/// 修复 base_url
///
/// - 移除首尾空白和末尾斜杠
/// - 修复双斜杠（保留协议部分）
pub fn fix_base_url(base_url: &str) -> String {
    let mut url = base_url.trim().trim_end_matches('/').to_string();

    if let Some(pos) = url.find("://") {
        let (protocol, rest) = url.split_at(pos + 3);
        let mut fixed_rest = rest.to_string();
        while fixed_rest.contains("//") {
            fixed_rest = fixed_rest.replace("//", "/");
        }
        url = format!("{}{}", protocol, fixed_rest);
    }

    url
}

/// 构建完整端点 URL
///
/// 如果 base_url 已经以该路径结尾则不重复追加。
pub fn build_endpoint(base_url: &str, path: &str) -> String {
    let base = fix_base_url(base_url);
    if base.ends_with(path) {
        base
    } else {
        format!("{}{}", base, path)
    }
}

pub fn build_generate_endpoint(base_url: &str) -> String {
    build_endpoint(base_url, GENERATE_PATH)
}

pub fn build_documentation_endpoint(base_url: &str) -> String {
    build_endpoint(base_url, DOCUMENTATION_PATH)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fix_base_url() {
        assert_eq!(fix_base_url("http://localhost:4000/"), "http://localhost:4000");
        assert_eq!(fix_base_url(" http://localhost:4000//svc "), "http://localhost:4000/svc");
        assert_eq!(fix_base_url("http://host///a"), "http://host/a");
    }

    #[test]
    fn test_build_generate_endpoint() {
        assert_eq!(
            build_generate_endpoint("http://localhost:4000"),
            "http://localhost:4000/generate-docs"
        );
        assert_eq!(
            build_generate_endpoint("http://localhost:4000/generate-docs/"),
            "http://localhost:4000/generate-docs"
        );
    }

    #[test]
    fn test_build_documentation_endpoint() {
        assert_eq!(
            build_documentation_endpoint("https://docs.example.com/"),
            "https://docs.example.com/api/documentation"
        );
    }
}
