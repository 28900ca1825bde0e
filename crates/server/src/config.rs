use std::path::PathBuf;

use melolo_scraper::UpstreamConfig;
use melolo_scraper::config::DEFAULT_ORIGIN;

pub const DEFAULT_BIND: &str = "0.0.0.0:3000";

/// Process configuration read once from the environment.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub bind_addr: String,
    pub upstream: UpstreamConfig,
    pub static_dir: Option<PathBuf>,
}

impl ServerConfig {
    /// `MELOLO_BIND`, `MELOLO_UPSTREAM`, `MELOLO_STATIC_DIR`.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let non_empty = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let bind_addr = non_empty("MELOLO_BIND").unwrap_or_else(|| DEFAULT_BIND.to_string());
        let origin = non_empty("MELOLO_UPSTREAM").unwrap_or_else(|| DEFAULT_ORIGIN.to_string());
        let static_dir = non_empty("MELOLO_STATIC_DIR").map(PathBuf::from);

        Self {
            bind_addr,
            upstream: UpstreamConfig::with_origin(origin),
            static_dir,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn defaults_when_unset() {
        let cfg = ServerConfig::from_lookup(lookup(&[]));
        assert_eq!(cfg.bind_addr, "0.0.0.0:3000");
        assert_eq!(cfg.upstream, UpstreamConfig::default());
        assert!(cfg.static_dir.is_none());
    }

    #[test]
    fn overrides_from_env() {
        let cfg = ServerConfig::from_lookup(lookup(&[
            ("MELOLO_BIND", "127.0.0.1:8080"),
            ("MELOLO_UPSTREAM", "http://localhost:9999/"),
            ("MELOLO_STATIC_DIR", "public"),
        ]));
        assert_eq!(cfg.bind_addr, "127.0.0.1:8080");
        assert_eq!(cfg.upstream.origin, "http://localhost:9999");
        assert_eq!(cfg.upstream.referer, "http://localhost:9999/");
        assert_eq!(cfg.static_dir, Some(PathBuf::from("public")));
    }

    #[test]
    fn blank_values_fall_back() {
        let cfg = ServerConfig::from_lookup(lookup(&[
            ("MELOLO_BIND", "  "),
            ("MELOLO_STATIC_DIR", ""),
        ]));
        assert_eq!(cfg.bind_addr, DEFAULT_BIND);
        assert!(cfg.static_dir.is_none());
    }
}
