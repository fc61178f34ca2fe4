//! 运行时配置
//!
//! 后端地址可以在登录页修改并持久化到 LocalStorage。
//! 读取顺序：LocalStorage -> 编译期 `BUGBOARD_API_URL` -> 本地默认地址。

use crate::web::KeyValueStore;

pub const STORAGE_BASE_URL_KEY: &str = "api_base_url";
const DEFAULT_BASE_URL: &str = "http://localhost:8000";

/// 编译期默认后端地址
pub fn default_base_url() -> &'static str {
    option_env!("BUGBOARD_API_URL").unwrap_or(DEFAULT_BASE_URL)
}

/// 去掉首尾空白和末尾的 `/`
fn normalize(url: &str) -> String {
    url.trim().trim_end_matches('/').to_string()
}

/// 配置访问器，不持有任何状态，每次都从存储中读取
pub struct AppConfig;

impl AppConfig {
    /// 当前生效的后端地址
    pub fn base_url<S: KeyValueStore>(store: &S) -> String {
        store
            .get(STORAGE_BASE_URL_KEY)
            .map(|url| normalize(&url))
            .filter(|url| !url.is_empty())
            .unwrap_or_else(|| normalize(default_base_url()))
    }

    /// 保存后端地址；传入空字符串时恢复默认值
    pub fn set_base_url<S: KeyValueStore>(store: &S, url: &str) -> bool {
        let url = normalize(url);
        if url.is_empty() {
            store.delete(STORAGE_BASE_URL_KEY)
        } else {
            store.set(STORAGE_BASE_URL_KEY, &url)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::web::MemoryStore;

    #[test]
    fn test_falls_back_to_default() {
        let store = MemoryStore::new();
        assert_eq!(AppConfig::base_url(&store), normalize(default_base_url()));
    }

    #[test]
    fn test_persisted_url_is_normalized() {
        let store = MemoryStore::new();
        assert!(AppConfig::set_base_url(&store, "  https://bugs.example.com/api/ "));
        assert_eq!(AppConfig::base_url(&store), "https://bugs.example.com/api");
    }

    #[test]
    fn test_empty_url_resets_to_default() {
        let store = MemoryStore::with(&[(STORAGE_BASE_URL_KEY, "https://old.example.com")]);
        AppConfig::set_base_url(&store, "   ");
        assert_eq!(store.get(STORAGE_BASE_URL_KEY), None);
        assert_eq!(AppConfig::base_url(&store), normalize(default_base_url()));
    }
}
