use serde::Deserialize;

#[derive(Debug, Deserialize, Clone, PartialEq)]
pub struct ClientConfig {
    pub api: ApiConfig,
    pub list: ListDefaults,
}

#[derive(Debug, Deserialize, Clone, PartialEq)]
pub struct ApiConfig {
    /// Явный адрес API; если не задан — берётся из window.location
    #[serde(default)]
    pub base_url: Option<String>,
    pub port: u16,
    pub timeout_ms: u32,
}

#[derive(Debug, Deserialize, Clone, PartialEq)]
pub struct ListDefaults {
    pub page_sizes: Vec<u32>,
    pub default_limit: u32,
}

/// Default configuration embedded in the binary
const DEFAULT_CONFIG: &str = r#"
[api]
port = 3000
timeout_ms = 15000

[list]
page_sizes = [10, 20, 50, 100]
default_limit = 20
"#;

#[derive(Debug, Deserialize, Default)]
struct Overrides {
    #[serde(default)]
    api: ApiOverrides,
    #[serde(default)]
    list: ListOverrides,
}

#[derive(Debug, Deserialize, Default)]
struct ApiOverrides {
    base_url: Option<String>,
    port: Option<u16>,
    timeout_ms: Option<u32>,
}

#[derive(Debug, Deserialize, Default)]
struct ListOverrides {
    page_sizes: Option<Vec<u32>>,
    default_limit: Option<u32>,
}

/// Load the embedded defaults, optionally overlaid with a partial TOML
/// document (e.g. served next to the bundle).
pub fn load_config(overrides: Option<&str>) -> anyhow::Result<ClientConfig> {
    let mut config: ClientConfig = toml::from_str(DEFAULT_CONFIG)?;

    if let Some(text) = overrides {
        let o: Overrides = toml::from_str(text)?;
        if o.api.base_url.is_some() {
            config.api.base_url = o.api.base_url;
        }
        if let Some(port) = o.api.port {
            config.api.port = port;
        }
        if let Some(timeout) = o.api.timeout_ms {
            config.api.timeout_ms = timeout;
        }
        if let Some(sizes) = o.list.page_sizes {
            config.list.page_sizes = sizes;
        }
        if let Some(limit) = o.list.default_limit {
            config.list.default_limit = limit;
        }
        log::info!("Client config overrides applied");
    }

    config.validate()?;
    Ok(config)
}

impl ClientConfig {
    pub fn validate(&self) -> anyhow::Result<()> {
        if self.api.timeout_ms == 0 {
            anyhow::bail!("api.timeout_ms must be positive");
        }
        if self.list.page_sizes.is_empty() || self.list.page_sizes.contains(&0) {
            anyhow::bail!("list.page_sizes must be a non-empty list of positive sizes");
        }
        if !self.list.page_sizes.contains(&self.list.default_limit) {
            anyhow::bail!(
                "list.default_limit {} is not one of {:?}",
                self.list.default_limit,
                self.list.page_sizes
            );
        }
        Ok(())
    }
}

impl ApiConfig {
    /// Base URL for API requests.
    ///
    /// In the browser the backend is assumed on the same host at `port`.
    pub fn resolve_base(&self) -> String {
        if let Some(url) = self.base_url.as_deref().filter(|u| !u.trim().is_empty()) {
            return url.trim_end_matches('/').to_string();
        }
        self.location_base()
            .unwrap_or_else(|| format!("http://127.0.0.1:{}", self.port))
    }

    #[cfg(target_arch = "wasm32")]
    fn location_base(&self) -> Option<String> {
        let location = web_sys::window()?.location();
        let protocol = location.protocol().unwrap_or_else(|_| "http:".to_string());
        let hostname = location
            .hostname()
            .unwrap_or_else(|_| "127.0.0.1".to_string());
        Some(format!("{}//{}:{}", protocol, hostname, self.port))
    }

    #[cfg(not(target_arch = "wasm32"))]
    fn location_base(&self) -> Option<String> {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_loads() {
        let config = load_config(None).unwrap();
        assert_eq!(config.api.port, 3000);
        assert_eq!(config.api.timeout_ms, 15000);
        assert_eq!(config.list.page_sizes, vec![10, 20, 50, 100]);
        assert_eq!(config.list.default_limit, 20);
        assert_eq!(config.api.resolve_base(), "http://127.0.0.1:3000");
    }

    #[test]
    fn test_overrides() {
        let config = load_config(Some(
            r#"
            [api]
            base_url = "https://pms.example.com/"
            [list]
            default_limit = 50
            "#,
        ))
        .unwrap();
        assert_eq!(config.api.resolve_base(), "https://pms.example.com");
        assert_eq!(config.api.timeout_ms, 15000);
        assert_eq!(config.list.default_limit, 50);
    }

    #[test]
    fn test_invalid_overrides_rejected() {
        assert!(load_config(Some("[list]\ndefault_limit = 15")).is_err());
        assert!(load_config(Some("[api]\ntimeout_ms = 0")).is_err());
        assert!(load_config(Some("[list]\npage_sizes = []")).is_err());
        assert!(load_config(Some("not toml at all [")).is_err());
    }
}
