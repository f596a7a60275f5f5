//! Static allow-list gate for write requests.
//!
//! This only checks that the email a caller claims is on the configured
//! list. It does not verify sessions or tokens.

use std::sync::Arc;

use tracing::{debug, warn};

#[derive(Debug, Clone)]
pub struct AuthService {
    allowed_emails: Arc<Vec<String>>,
    case_sensitive: bool,
}

impl AuthService {
    /// Blank entries are dropped and surrounding whitespace is trimmed.
    pub fn new<I, S>(allowed_emails: I, case_sensitive: bool) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let allowed_emails: Vec<String> = allowed_emails
            .into_iter()
            .map(|email| email.as_ref().trim().to_string())
            .filter(|email| !email.is_empty())
            .collect();

        if allowed_emails.is_empty() {
            warn!("Authorized email list is empty; every write request will be rejected");
        }

        Self {
            allowed_emails: Arc::new(allowed_emails),
            case_sensitive,
        }
    }

    pub fn allowed_count(&self) -> usize {
        self.allowed_emails.len()
    }

    /// True iff the claimed email matches an allow-list entry exactly
    /// (ignoring ASCII case unless configured otherwise). A missing claim
    /// never matches.
    pub fn is_authorized(&self, claimed_email: Option<&str>) -> bool {
        let Some(claimed) = claimed_email.map(str::trim).filter(|e| !e.is_empty()) else {
            debug!("Authorization denied: no email claimed");
            return false;
        };

        let authorized = self.allowed_emails.iter().any(|allowed| {
            if self.case_sensitive {
                allowed == claimed
            } else {
                allowed.eq_ignore_ascii_case(claimed)
            }
        });

        if !authorized {
            warn!("Authorization denied for {}", claimed);
        }
        authorized
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_listed_email_is_authorized() {
        let auth = AuthService::new(["parent@example.com", "other@example.com"], false);
        assert!(auth.is_authorized(Some("parent@example.com")));
        assert!(auth.is_authorized(Some("  other@example.com ")));
    }

    #[test]
    fn test_unlisted_or_missing_email_is_rejected() {
        let auth = AuthService::new(["parent@example.com"], false);
        assert!(!auth.is_authorized(Some("kid@example.com")));
        assert!(!auth.is_authorized(Some("parent@example.com.evil")));
        assert!(!auth.is_authorized(Some("")));
        assert!(!auth.is_authorized(None));
    }

    #[test]
    fn test_empty_allow_list_rejects_everyone() {
        let auth = AuthService::new(Vec::<String>::new(), false);
        assert_eq!(auth.allowed_count(), 0);
        assert!(!auth.is_authorized(Some("parent@example.com")));

        let blanks = AuthService::new([" ", ""], true);
        assert_eq!(blanks.allowed_count(), 0);
        assert!(!blanks.is_authorized(Some("")));
    }

    #[test]
    fn test_case_sensitivity_is_configurable() {
        let insensitive = AuthService::new(["Parent@Example.com"], false);
        assert!(insensitive.is_authorized(Some("parent@example.com")));

        let sensitive = AuthService::new(["Parent@Example.com"], true);
        assert!(!sensitive.is_authorized(Some("parent@example.com")));
        assert!(sensitive.is_authorized(Some("Parent@Example.com")));
    }
}
