use serde::{Deserialize, Serialize};

#[derive(Serialize, Deserialize, Debug)]
pub struct HealthResponse {
    pub status: String,
    pub message: String,
}

/// Body of a `POST /login` request
#[derive(Deserialize, Debug, Default)]
pub struct LoginPayload {
    pub login_link: Option<String>,
    /// Bare authorization code, accepted when no link is sent
    pub code: Option<String>,
    pub proxy: Option<String>,
}

impl LoginPayload {
    /// The deep link to log in with, synthesizing one from a bare code if needed
    #[must_use]
    pub fn resolve_link(&self, deeplink_url: &str) -> Option<String> {
        non_empty(self.login_link.as_deref())
            .map(str::to_string)
            .or_else(|| {
                non_empty(self.code.as_deref())
                    .map(|code| crate::login::deeplink_for_code(deeplink_url, code))
            })
    }

    /// The request proxy, falling back to the process-wide default
    #[must_use]
    pub fn resolve_proxy<'a>(&'a self, default_proxy: Option<&'a str>) -> Option<&'a str> {
        non_empty(self.proxy.as_deref()).or(default_proxy)
    }
}

fn non_empty(value: Option<&str>) -> Option<&str> {
    value.filter(|v| !v.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    const DEEPLINK: &str = "https://highlightai.com/deeplink";

    #[test]
    fn test_link_preferred_over_code() {
        let payload = LoginPayload {
            login_link: Some("https://x/deeplink?code=LINK".to_string()),
            code: Some("CODE".to_string()),
            proxy: None,
        };
        assert_eq!(
            payload.resolve_link(DEEPLINK),
            Some("https://x/deeplink?code=LINK".to_string())
        );
    }

    #[test]
    fn test_bare_code_synthesizes_link() {
        let payload = LoginPayload {
            login_link: Some(String::new()),
            code: Some("CODE".to_string()),
            proxy: None,
        };
        assert_eq!(
            payload.resolve_link(DEEPLINK),
            Some("https://highlightai.com/deeplink?code=CODE".to_string())
        );
        assert_eq!(LoginPayload::default().resolve_link(DEEPLINK), None);
    }

    #[test]
    fn test_proxy_fallback() {
        let payload = LoginPayload {
            proxy: Some(String::new()),
            ..LoginPayload::default()
        };
        assert_eq!(payload.resolve_proxy(Some("10.0.0.1:8080")), Some("10.0.0.1:8080"));
        assert_eq!(payload.resolve_proxy(None), None);

        let payload = LoginPayload {
            proxy: Some("127.0.0.1:3128".to_string()),
            ..LoginPayload::default()
        };
        assert_eq!(payload.resolve_proxy(Some("10.0.0.1:8080")), Some("127.0.0.1:3128"));
    }
}
