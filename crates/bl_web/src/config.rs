use std::path::PathBuf;

pub const DEFAULT_HOST: &str = "0.0.0.0";
pub const DEFAULT_PORT: u16 = 8000;
pub const DEFAULT_STATIC_DIR: &str = "static";

/// Origins allowed to call the API from a browser.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum CorsOrigins {
    #[default]
    Any,
    List(Vec<String>),
}

impl CorsOrigins {
    /// Parses a comma-separated allow-list. Unset, blank or `*` means any origin.
    pub fn parse(raw: Option<&str>) -> Self {
        let origins: Vec<String> = raw
            .unwrap_or_default()
            .split(',')
            .map(str::trim)
            .filter(|o| !o.is_empty())
            .map(str::to_string)
            .collect();

        if origins.is_empty() || origins.iter().any(|o| o == "*") {
            CorsOrigins::Any
        } else {
            CorsOrigins::List(origins)
        }
    }
}

#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    pub frontend_origins: CorsOrigins,
    pub static_dir: PathBuf,
}

impl ServerConfig {
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: DEFAULT_HOST.to_string(),
            port: DEFAULT_PORT,
            frontend_origins: CorsOrigins::Any,
            static_dir: PathBuf::from(DEFAULT_STATIC_DIR),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unset_or_blank_allows_any() {
        assert_eq!(CorsOrigins::parse(None), CorsOrigins::Any);
        assert_eq!(CorsOrigins::parse(Some("")), CorsOrigins::Any);
        assert_eq!(CorsOrigins::parse(Some(" , ")), CorsOrigins::Any);
    }

    #[test]
    fn test_list_is_trimmed() {
        assert_eq!(
            CorsOrigins::parse(Some("https://biaslab.app, http://localhost:5173 ,")),
            CorsOrigins::List(vec![
                "https://biaslab.app".to_string(),
                "http://localhost:5173".to_string(),
            ])
        );
    }

    #[test]
    fn test_wildcard_entry_allows_any() {
        assert_eq!(CorsOrigins::parse(Some("https://biaslab.app,*")), CorsOrigins::Any);
    }

    #[test]
    fn test_bind_address() {
        let config = ServerConfig {
            port: 9000,
            ..ServerConfig::default()
        };
        assert_eq!(config.bind_address(), "0.0.0.0:9000");
    }
}
