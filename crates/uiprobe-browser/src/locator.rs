//! Element location for the interactive probe
//!
//! Targets are resolved the way a user would describe them: first by
//! accessible role and name, then by visible text as a fallback.

use std::fmt;
use std::time::Duration;

use headless_chrome::Element;
use tracing::debug;
use uiprobe_core::{ProbeError, Result};

use crate::session::BrowserSession;

/// Interactive element roles the locator understands
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TargetRole {
    Link,
    Button,
}

impl TargetRole {
    /// Native HTML tag carrying this role implicitly
    pub fn native_tag(&self) -> &'static str {
        match self {
            TargetRole::Link => "a",
            TargetRole::Button => "button",
        }
    }

    /// ARIA role name
    pub fn role_name(&self) -> &'static str {
        match self {
            TargetRole::Link => "link",
            TargetRole::Button => "button",
        }
    }
}

impl fmt::Display for TargetRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.role_name())
    }
}

/// Wait until an element containing the sentinel text is present
///
/// The sentinel is text known to render only once the application has
/// finished loading. Absence within the timeout is reported as
/// `ElementNotFound` so callers can treat it as a soft outcome.
pub async fn wait_for_sentinel(
    session: &BrowserSession,
    sentinel: &str,
    timeout: Duration,
) -> Result<()> {
    debug!("Waiting for sentinel text '{}' ({:?})", sentinel, timeout);
    session
        .tab()
        .wait_for_xpath_with_custom_timeout(&text_xpath(sentinel), timeout)
        .map_err(|_| ProbeError::ElementNotFound(format!("sentinel text '{}'", sentinel)))?;
    debug!("Sentinel text '{}' is visible", sentinel);
    Ok(())
}

/// Locate the target element by accessible role and name, falling back to
/// visible text
///
/// Returns `Ok(None)` when neither query matches anything.
pub fn find_target<'a>(
    session: &'a BrowserSession,
    role: TargetRole,
    label: &str,
) -> Result<Option<Element<'a>>> {
    let tab = session.tab();

    if let Ok(mut elements) = tab.find_elements_by_xpath(&role_xpath(role, label)) {
        if !elements.is_empty() {
            debug!("Found '{}' by role {}", label, role);
            return Ok(Some(elements.remove(0)));
        }
    }

    if let Ok(mut elements) = tab.find_elements_by_xpath(&text_xpath(label)) {
        if !elements.is_empty() {
            debug!("Found '{}' by visible text", label);
            return Ok(Some(elements.remove(0)));
        }
    }

    debug!("Target '{}' not present", label);
    Ok(None)
}

/// XPath matching elements with the given role and accessible name
///
/// Covers the native tag and any element with an explicit `role`
/// attribute; the name matches the normalized text content or an
/// `aria-label`.
pub fn role_xpath(role: TargetRole, name: &str) -> String {
    let literal = xpath_literal(name);
    format!(
        "//{tag}[normalize-space(.)={literal} or @aria-label={literal}] \
         | //*[@role='{role}'][normalize-space(.)={literal} or @aria-label={literal}]",
        tag = role.native_tag(),
        role = role.role_name(),
        literal = literal,
    )
}

/// XPath matching any element whose text contains the given string
pub fn text_xpath(text: &str) -> String {
    format!("//*[contains(text(), {})]", xpath_literal(text))
}

/// Quote an arbitrary string as an XPath literal
///
/// XPath 1.0 has no escape sequences inside string literals, so strings
/// containing both quote kinds are built with `concat()`.
fn xpath_literal(text: &str) -> String {
    if !text.contains('\'') {
        format!("'{}'", text)
    } else if !text.contains('"') {
        format!("\"{}\"", text)
    } else {
        let parts = text
            .split('\'')
            .map(|part| format!("'{}'", part))
            .collect::<Vec<_>>()
            .join(r#", "'", "#);
        format!("concat({})", parts)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_target_role_mapping() {
        assert_eq!(TargetRole::Link.native_tag(), "a");
        assert_eq!(TargetRole::Link.role_name(), "link");
        assert_eq!(TargetRole::Button.native_tag(), "button");
        assert_eq!(TargetRole::Button.to_string(), "button");
    }

    #[test]
    fn test_xpath_literal_plain() {
        assert_eq!(xpath_literal("Dump"), "'Dump'");
    }

    #[test]
    fn test_xpath_literal_with_single_quote() {
        assert_eq!(xpath_literal("it's"), "\"it's\"");
    }

    #[test]
    fn test_xpath_literal_with_both_quotes() {
        assert_eq!(
            xpath_literal(r#"a'b"c"#),
            r#"concat('a', "'", 'b"c')"#
        );
    }

    #[test]
    fn test_role_xpath_covers_native_tag_and_aria_role() {
        let xpath = role_xpath(TargetRole::Link, "Dump");
        assert!(xpath.contains("//a[normalize-space(.)='Dump'"));
        assert!(xpath.contains("//*[@role='link']"));
        assert!(xpath.contains("@aria-label='Dump'"));
    }

    #[test]
    fn test_text_xpath() {
        assert_eq!(
            text_xpath("Schedule"),
            "//*[contains(text(), 'Schedule')]"
        );
    }
}
