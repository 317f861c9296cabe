//! Page and element abstractions over a live browser session.
//!
//! The harness only ever talks to these traits, so test suites can swap the
//! WebDriver-backed implementation for an instrumented stub.

use async_trait::async_trait;
use std::fmt;
use std::time::Duration;

/// How to locate an element on the current page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Target {
    Id(String),
    Name(String),
    ClassName(String),
    Css(String),
    Tag(String),
}

impl Target {
    pub fn id(value: impl Into<String>) -> Self {
        Target::Id(value.into())
    }

    pub fn name(value: impl Into<String>) -> Self {
        Target::Name(value.into())
    }

    pub fn class_name(value: impl Into<String>) -> Self {
        Target::ClassName(value.into())
    }

    pub fn css(value: impl Into<String>) -> Self {
        Target::Css(value.into())
    }

    pub fn tag(value: impl Into<String>) -> Self {
        Target::Tag(value.into())
    }
}

impl fmt::Display for Target {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Target::Id(v) => write!(f, "id={}", v),
            Target::Name(v) => write!(f, "name={}", v),
            Target::ClassName(v) => write!(f, "class={}", v),
            Target::Css(v) => write!(f, "css={}", v),
            Target::Tag(v) => write!(f, "tag={}", v),
        }
    }
}

/// Errors raised by page and element operations.
#[derive(Debug, thiserror::Error)]
pub enum UiError {
    #[error("element not found: {0}")]
    NotFound(String),

    #[error("timeout waiting for: {0}")]
    Timeout(String),

    #[error("navigation error: {0}")]
    Navigation(String),

    #[error("session error: {0}")]
    Session(String),
}

/// A single element on the page.
#[async_trait]
pub trait Element: Send + Sync {
    /// Visible text content of the element.
    async fn text(&self) -> Result<String, UiError>;

    /// Value of the named attribute, if set.
    async fn attr(&self, name: &str) -> Result<Option<String>, UiError>;

    async fn click(&self) -> Result<(), UiError>;

    async fn send_keys(&self, keys: &str) -> Result<(), UiError>;

    /// Submit the form this element belongs to.
    async fn submit(&self) -> Result<(), UiError>;

    /// Block until the element is clickable, bounded by `timeout`.
    async fn wait_clickable(&self, timeout: Duration) -> Result<(), UiError>;

    /// Descendant elements matching `target`.
    async fn find_all(&self, target: &Target) -> Result<Vec<Box<dyn Element>>, UiError>;
}

/// A controllable browser page.
#[async_trait]
pub trait Page: Send + Sync {
    /// Navigate to the given URL.
    async fn open(&self, url: &str) -> Result<(), UiError>;

    /// Navigate back in session history.
    async fn back(&self) -> Result<(), UiError>;

    /// First element matching `target`, or `None` when absent.
    async fn find(&self, target: &Target) -> Result<Option<Box<dyn Element>>, UiError>;

    /// All elements matching `target`; empty when none match.
    async fn find_all(&self, target: &Target) -> Result<Vec<Box<dyn Element>>, UiError>;

    /// Block until an element matching `target` is present, bounded by `timeout`.
    async fn wait_for(&self, target: &Target, timeout: Duration) -> Result<(), UiError>;

    /// Current frame of the page as PNG bytes.
    async fn screenshot_png(&self) -> Result<Vec<u8>, UiError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_target_display() {
        assert_eq!(Target::id("searchbar").to_string(), "id=searchbar");
        assert_eq!(Target::name("action").to_string(), "name=action");
        assert_eq!(Target::class_name("addlink").to_string(), "class=addlink");
        assert_eq!(Target::css("th.sortable").to_string(), "css=th.sortable");
        assert_eq!(Target::tag("a").to_string(), "tag=a");
    }

    #[test]
    fn test_ui_error_messages() {
        let err = UiError::NotFound(Target::name("username").to_string());
        assert_eq!(err.to_string(), "element not found: name=username");

        let err = UiError::Timeout("css=#result_list".to_string());
        assert!(err.to_string().starts_with("timeout waiting for"));
    }
}
