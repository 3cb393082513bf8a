pub const DEFAULT_LOCAL_URL: &str = "http://localhost:8000";
pub const DEFAULT_PRODUCTION_URL: &str = "https://boganto.com";

const LOCAL_HOSTNAMES: [&str; 2] = ["localhost", "127.0.0.1"];

/// The deployment addresses known to this instance.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Environment {
    /// An explicitly configured base address which always wins when present.
    pub override_url: Option<String>,
    pub local_url: String,
    pub production_url: String,
}

impl Default for Environment {
    fn default() -> Self {
        Self {
            override_url: None,
            local_url: DEFAULT_LOCAL_URL.to_string(),
            production_url: DEFAULT_PRODUCTION_URL.to_string(),
        }
    }
}

impl Environment {
    /// Determines the execution context for a single request or render.
    ///
    /// `host` is the hostname of the page being served, when one is known. A
    /// missing host means we are rendering without a page (server side), in
    /// which case the production address is used.
    pub fn resolve(&self, host: Option<&str>) -> ExecutionContext {
        if let Some(url) = self.override_url.as_deref().filter(|u| !u.is_empty()) {
            return ExecutionContext::Override(url.to_string());
        }

        match host.map(hostname) {
            Some(name) if LOCAL_HOSTNAMES.iter().any(|l| l.eq_ignore_ascii_case(name)) => {
                ExecutionContext::Local(self.local_url.clone())
            }
            _ => ExecutionContext::Production(self.production_url.clone()),
        }
    }
}

/// The deployment context that a request is being served in, along with the
/// base address that API calls and assets are resolved against.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ExecutionContext {
    Local(String),
    Production(String),
    Override(String),
}

impl ExecutionContext {
    pub fn base_url(&self) -> &str {
        match self {
            ExecutionContext::Local(base)
            | ExecutionContext::Production(base)
            | ExecutionContext::Override(base) => base,
        }
    }

    /// Whether this is the local development context. An override address
    /// could point anywhere, so it is neither.
    pub fn is_local(&self) -> Option<bool> {
        match self {
            ExecutionContext::Local(_) => Some(true),
            ExecutionContext::Production(_) => Some(false),
            ExecutionContext::Override(_) => None,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            ExecutionContext::Local(_) => "local",
            ExecutionContext::Production(_) => "production",
            ExecutionContext::Override(_) => "override",
        }
    }

    /// Joins a route path (`/blog/one-piece`) onto this context's base address.
    pub fn absolute_url(&self, route: &str) -> String {
        format!(
            "{}/{}",
            self.base_url().trim_end_matches('/'),
            route.trim_start_matches('/')
        )
    }
}

fn hostname(host: &str) -> &str {
    let host = host.trim();
    if let Some(rest) = host.strip_prefix('[') {
        return rest.split(']').next().unwrap_or_default();
    }

    host.split(':').next().unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn override_wins() {
        let env = Environment {
            override_url: Some("https://staging.boganto.com".into()),
            ..Default::default()
        };

        for host in [None, Some("localhost"), Some("boganto.com")] {
            let ctx = env.resolve(host);
            assert_eq!(ctx, ExecutionContext::Override("https://staging.boganto.com".into()));
            assert_eq!(ctx.is_local(), None);
        }
    }

    #[test]
    fn empty_override_is_ignored() {
        let env = Environment {
            override_url: Some(String::new()),
            ..Default::default()
        };

        assert_eq!(env.resolve(None).name(), "production");
    }

    #[test]
    fn local_hosts() {
        let env = Environment::default();

        for host in ["localhost", "127.0.0.1", "localhost:3000", "LOCALHOST", "127.0.0.1:8000"] {
            let ctx = env.resolve(Some(host));
            assert_eq!(ctx.is_local(), Some(true), "{host} should be local");
            assert_eq!(ctx.base_url(), DEFAULT_LOCAL_URL);
        }
    }

    #[test]
    fn remote_hosts() {
        let env = Environment::default();

        for host in ["boganto.com", "www.boganto.com:443", "localhost.example.com", "[::1]:8000"] {
            let ctx = env.resolve(Some(host));
            assert_eq!(ctx.is_local(), Some(false), "{host} should not be local");
            assert_eq!(ctx.base_url(), DEFAULT_PRODUCTION_URL);
        }
    }

    #[test]
    fn no_host_falls_back_to_production() {
        let ctx = Environment::default().resolve(None);
        assert_eq!(ctx, ExecutionContext::Production(DEFAULT_PRODUCTION_URL.into()));
    }

    #[test]
    fn absolute_url() {
        let ctx = ExecutionContext::Production("https://boganto.com/".into());
        assert_eq!(
            ctx.absolute_url("/blog/jujutsu-kaisen"),
            "https://boganto.com/blog/jujutsu-kaisen"
        );

        let ctx = ExecutionContext::Local("http://localhost:8000".into());
        assert_eq!(ctx.absolute_url("tag/manga"), "http://localhost:8000/tag/manga");
    }
}
