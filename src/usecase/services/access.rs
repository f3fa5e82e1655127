use tracing::{debug, warn};

pub const DEFAULT_ALLOWED_DOMAINS: &[&str] = &["pointofrental.com", "record360.com"];

/// Static email-domain allowlist in front of the dashboard.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AccessGate {
    allowed_domains: Vec<String>,
}

impl Default for AccessGate {
    fn default() -> Self {
        Self::new(DEFAULT_ALLOWED_DOMAINS.iter().copied())
    }
}

impl AccessGate {
    pub fn new<I, S>(domains: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self {
            allowed_domains: domains
                .into_iter()
                .map(|domain| domain.as_ref().trim().to_lowercase())
                .filter(|domain| !domain.is_empty())
                .collect(),
        }
    }

    pub fn allowed_domains(&self) -> &[String] {
        &self.allowed_domains
    }

    pub fn is_allowed(&self, email: Option<&str>) -> bool {
        let Some(email) = email else {
            debug!("access denied: no email");
            return false;
        };
        match email_domain(email) {
            Some(domain) if self.allowed_domains.contains(&domain) => true,
            Some(domain) => {
                warn!(%domain, "access denied: domain not allowed");
                false
            }
            None => {
                warn!(email, "access denied: malformed email");
                false
            }
        }
    }
}

/// Lower-cased text after the last `@`; `None` when there is nothing there.
pub fn email_domain(email: &str) -> Option<String> {
    let (_, domain) = email.trim().rsplit_once('@')?;
    if domain.is_empty() {
        None
    } else {
        Some(domain.to_lowercase())
    }
}
