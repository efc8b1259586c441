use std::time::Duration;

const DEFAULT_BIND: &str = "0.0.0.0:8000";
const DEFAULT_USER_AGENT: &str = "post-media-api/1.0";
const DEFAULT_ALLOWED_HOST: &str = "instagram.com";
const DEFAULT_CONNECT_TIMEOUT_SECS: u64 = 5;
const DEFAULT_TIMEOUT_SECS: u64 = 10;

#[derive(Debug, Clone)]
pub struct Config {
    pub bind_addr: String,
    pub user_agent: String,
    /// Hosts a post URL may point at. Each entry also admits its subdomains;
    /// `*` admits everything.
    pub allowed_hosts: Vec<String>,
    pub connect_timeout: Duration,
    pub request_timeout: Duration,
    pub insecure_ssl: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            bind_addr: DEFAULT_BIND.to_string(),
            user_agent: DEFAULT_USER_AGENT.to_string(),
            allowed_hosts: vec![DEFAULT_ALLOWED_HOST.to_string()],
            connect_timeout: Duration::from_secs(DEFAULT_CONNECT_TIMEOUT_SECS),
            request_timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            insecure_ssl: false,
        }
    }
}

impl Config {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = Self::default();
        let get = |key: &str| lookup(key).map(|v| v.trim().to_string()).filter(|v| !v.is_empty());

        let allowed_hosts = get("POST_MEDIA_API_ALLOWED_HOSTS")
            .map(|v| {
                v.split(',')
                    .map(|h| h.trim().trim_start_matches('.').to_lowercase())
                    .filter(|h| !h.is_empty())
                    .collect::<Vec<_>>()
            })
            .filter(|hosts| !hosts.is_empty())
            .unwrap_or(defaults.allowed_hosts);

        Self {
            bind_addr: get("POST_MEDIA_API_BIND").unwrap_or(defaults.bind_addr),
            user_agent: get("POST_MEDIA_API_USER_AGENT").unwrap_or(defaults.user_agent),
            allowed_hosts,
            connect_timeout: seconds(
                "POST_MEDIA_API_CONNECT_TIMEOUT_SECS",
                get("POST_MEDIA_API_CONNECT_TIMEOUT_SECS"),
                defaults.connect_timeout,
            ),
            request_timeout: seconds(
                "POST_MEDIA_API_TIMEOUT_SECS",
                get("POST_MEDIA_API_TIMEOUT_SECS"),
                defaults.request_timeout,
            ),
            insecure_ssl: get("POST_MEDIA_API_INSECURE_SSL").as_deref() == Some("1"),
        }
    }

    pub fn host_allowed(&self, host: &str) -> bool {
        let host = host.to_lowercase();
        self.allowed_hosts.iter().any(|allowed| {
            allowed == "*"
                || host == *allowed
                || host
                    .strip_suffix(allowed.as_str())
                    .is_some_and(|prefix| prefix.ends_with('.'))
        })
    }
}

fn seconds(key: &str, raw: Option<String>, default: Duration) -> Duration {
    let Some(raw) = raw else {
        return default;
    };
    match raw.parse::<u64>() {
        Ok(secs) if secs > 0 => Duration::from_secs(secs),
        _ => {
            tracing::warn!("ignoring {}={:?}, expected a positive number of seconds", key, raw);
            default
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn config(vars: &[(&str, &str)]) -> Config {
        let map: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        Config::from_lookup(|key| map.get(key).cloned())
    }

    #[test]
    fn test_defaults() {
        let cfg = config(&[]);
        assert_eq!(cfg.bind_addr, "0.0.0.0:8000");
        assert_eq!(cfg.allowed_hosts, vec!["instagram.com"]);
        assert_eq!(cfg.request_timeout, Duration::from_secs(10));
        assert!(!cfg.insecure_ssl);
    }

    #[test]
    fn test_overrides() {
        let cfg = config(&[
            ("POST_MEDIA_API_BIND", "127.0.0.1:9000"),
            ("POST_MEDIA_API_ALLOWED_HOSTS", " Instagram.com , .instagr.am ,"),
            ("POST_MEDIA_API_TIMEOUT_SECS", "30"),
            ("POST_MEDIA_API_INSECURE_SSL", "1"),
        ]);
        assert_eq!(cfg.bind_addr, "127.0.0.1:9000");
        assert_eq!(cfg.allowed_hosts, vec!["instagram.com", "instagr.am"]);
        assert_eq!(cfg.request_timeout, Duration::from_secs(30));
        assert!(cfg.insecure_ssl);
    }

    #[test]
    fn test_invalid_timeout_uses_default() {
        let cfg = config(&[
            ("POST_MEDIA_API_CONNECT_TIMEOUT_SECS", "soon"),
            ("POST_MEDIA_API_TIMEOUT_SECS", "0"),
        ]);
        assert_eq!(cfg.connect_timeout, Duration::from_secs(5));
        assert_eq!(cfg.request_timeout, Duration::from_secs(10));
    }

    #[test]
    fn test_host_allowed() {
        let cfg = Config::default();
        assert!(cfg.host_allowed("instagram.com"));
        assert!(cfg.host_allowed("www.Instagram.com"));
        assert!(!cfg.host_allowed("notinstagram.com"));
        assert!(!cfg.host_allowed("instagram.com.evil.net"));

        let open = config(&[("POST_MEDIA_API_ALLOWED_HOSTS", "*")]);
        assert!(open.host_allowed("example.org"));
    }
}
