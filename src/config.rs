//! Configuration for org-capture

use std::path::PathBuf;

use crate::error::{Error, Result};

/// Default TCP port
pub const DEFAULT_PORT: u16 = 8080;

/// Default capture file name inside the org directory
pub const DEFAULT_CAPTURE_FILE: &str = "web-captures.org";

/// Process-wide settings, read once at startup
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Bind address; empty means all interfaces
    pub host: String,

    /// HTTP server port
    pub port: u16,

    /// Directory holding the capture file
    pub org_dir: PathBuf,

    /// Name of the file captures are appended to
    pub capture_file: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            host: String::new(),
            port: DEFAULT_PORT,
            org_dir: home_dir(None).join("org"),
            capture_file: DEFAULT_CAPTURE_FILE.to_string(),
        }
    }
}

impl Config {
    /// Load configuration from the process environment
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load configuration through an arbitrary variable lookup.
    ///
    /// Unset and empty variables both fall back to their defaults.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|value| !value.is_empty());

        let port = match get("PORT") {
            Some(raw) => raw
                .parse()
                .map_err(|_| Error::config(format!("PORT must be a port number, got {raw:?}")))?,
            None => DEFAULT_PORT,
        };

        let org_dir = get("ORG_DIR")
            .map(PathBuf::from)
            .unwrap_or_else(|| home_dir(get("HOME")).join("org"));

        Ok(Self {
            host: get("HOST").unwrap_or_default(),
            port,
            org_dir,
            capture_file: get("ORG_DEFAULT_CAPTURE_FILE")
                .unwrap_or_else(|| DEFAULT_CAPTURE_FILE.to_string()),
        })
    }

    /// Create a config that writes to the given directory and file
    pub fn with_target(org_dir: impl Into<PathBuf>, capture_file: impl Into<String>) -> Self {
        Self {
            org_dir: org_dir.into(),
            capture_file: capture_file.into(),
            ..Default::default()
        }
    }

    /// Full path of the capture file.
    ///
    /// The file name always resolves inside `org_dir`, even when it starts
    /// with `/`.
    pub fn capture_path(&self) -> PathBuf {
        self.org_dir.join(self.capture_file.trim_start_matches('/'))
    }

    /// Listener addresses to try, in order.
    ///
    /// An empty host means every interface: IPv6 `[::]` first (dual-stack on
    /// most systems), then IPv4 `0.0.0.0` for hosts without IPv6. A bare IPv6
    /// literal host is bracketed.
    pub fn bind_addrs(&self) -> Vec<String> {
        if self.host.is_empty() {
            return vec![
                format!("[::]:{}", self.port),
                format!("0.0.0.0:{}", self.port),
            ];
        }

        let host = if self.host.contains(':') && !self.host.starts_with('[') {
            format!("[{}]", self.host)
        } else {
            self.host.clone()
        };
        vec![format!("{}:{}", host, self.port)]
    }
}

fn home_dir(from_env: Option<String>) -> PathBuf {
    from_env
        .map(PathBuf::from)
        .or_else(dirs::home_dir)
        .unwrap_or_else(|| PathBuf::from("/tmp"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| vars.get(key).cloned()
    }

    #[test]
    fn defaults_when_unset() {
        let config = Config::from_lookup(lookup(&[("HOME", "/home/ada")])).unwrap();

        assert_eq!(config.host, "");
        assert_eq!(config.port, 8080);
        assert_eq!(config.org_dir, PathBuf::from("/home/ada/org"));
        assert_eq!(config.capture_file, "web-captures.org");
        assert_eq!(
            config.capture_path(),
            PathBuf::from("/home/ada/org/web-captures.org")
        );
        assert_eq!(config.bind_addrs(), vec!["[::]:8080", "0.0.0.0:8080"]);
    }

    #[test]
    fn empty_values_fall_back_to_defaults() {
        let config = Config::from_lookup(lookup(&[
            ("HOME", "/h"),
            ("PORT", ""),
            ("ORG_DIR", ""),
            ("ORG_DEFAULT_CAPTURE_FILE", ""),
        ]))
        .unwrap();

        assert_eq!(config.port, 8080);
        assert_eq!(config.org_dir, PathBuf::from("/h/org"));
        assert_eq!(config.capture_file, "web-captures.org");
    }

    #[test]
    fn explicit_values_win() {
        let config = Config::from_lookup(lookup(&[
            ("HOST", "127.0.0.1"),
            ("PORT", "9000"),
            ("ORG_DIR", "/srv/org"),
            ("ORG_DEFAULT_CAPTURE_FILE", "inbox.org"),
        ]))
        .unwrap();

        assert_eq!(config.bind_addrs(), vec!["127.0.0.1:9000"]);
        assert_eq!(config.capture_path(), PathBuf::from("/srv/org/inbox.org"));
    }

    #[test]
    fn ipv6_host_is_bracketed() {
        let config = Config::from_lookup(lookup(&[("HOST", "::1")])).unwrap();
        assert_eq!(config.bind_addrs(), vec!["[::1]:8080"]);
    }

    #[test]
    fn absolute_capture_file_stays_inside_org_dir() {
        let config = Config::with_target("/srv/org", "/etc/passwd");
        assert_eq!(config.capture_path(), PathBuf::from("/srv/org/etc/passwd"));
    }

    #[test]
    fn bad_port_is_an_error() {
        let err = Config::from_lookup(lookup(&[("PORT", "http")])).unwrap_err();
        assert!(matches!(err, Error::Config(_)));
    }
}
