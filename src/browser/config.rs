use std::fmt;
use std::time::Duration;

use crate::config::Config;

/// Supported browser kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BrowserKind {
    Chrome,
    Firefox,
}

impl BrowserKind {
    /// Parse a browser identifier, case-insensitively.
    pub fn parse(name: &str) -> Option<Self> {
        match name.to_lowercase().as_str() {
            "chrome" => Some(Self::Chrome),
            "firefox" => Some(Self::Firefox),
            _ => None,
        }
    }

    /// Conventional local WebDriver endpoint for this browser
    /// (chromedriver and geckodriver defaults).
    pub fn default_webdriver_url(&self) -> &'static str {
        match self {
            Self::Chrome => "http://localhost:9515",
            Self::Firefox => "http://localhost:4444",
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Chrome => "chrome",
            Self::Firefox => "firefox",
        }
    }
}

impl fmt::Display for BrowserKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Configuration for browser sessions
#[derive(Debug, Clone)]
pub struct BrowserConfig {
    /// Browser identifier used when the caller does not pick one
    pub kind: String,

    /// Run browser in headless mode
    pub headless: bool,

    /// Browser window size
    pub window_width: u32,
    pub window_height: u32,

    /// Bound for explicit element waits
    pub wait_timeout: Duration,

    /// Implicit wait applied to the session's element lookups
    pub implicit_wait: Duration,

    /// WebDriver endpoint override; per-kind default when unset
    pub webdriver_url: Option<String>,

    /// Additional browser arguments
    pub extra_args: Vec<String>,
}

impl Default for BrowserConfig {
    fn default() -> Self {
        Self {
            kind: "chrome".to_string(),
            headless: true,
            window_width: 1920,
            window_height: 1080,
            wait_timeout: Duration::from_secs(10),
            implicit_wait: Duration::from_secs(10),
            webdriver_url: None,
            extra_args: vec![],
        }
    }
}

impl BrowserConfig {
    /// Build a browser configuration from the crate settings.
    pub fn from_settings(config: &Config) -> Self {
        let browser = &config.browser;
        Self {
            kind: browser.kind.clone(),
            headless: browser.headless,
            window_width: browser.window_width,
            window_height: browser.window_height,
            wait_timeout: Duration::from_secs(browser.wait_timeout_secs),
            implicit_wait: Duration::from_secs(browser.implicit_wait_secs),
            webdriver_url: browser.webdriver_url.clone(),
            extra_args: browser.extra_args.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = BrowserConfig::default();
        assert_eq!(config.kind, "chrome");
        assert!(config.headless);
        assert_eq!(config.window_width, 1920);
        assert_eq!(config.window_height, 1080);
        assert_eq!(config.wait_timeout, Duration::from_secs(10));
        assert_eq!(config.implicit_wait, Duration::from_secs(10));
    }

    #[test]
    fn test_kind_parse_is_case_insensitive() {
        assert_eq!(BrowserKind::parse("chrome"), Some(BrowserKind::Chrome));
        assert_eq!(BrowserKind::parse("CHROME"), Some(BrowserKind::Chrome));
        assert_eq!(BrowserKind::parse("FireFox"), Some(BrowserKind::Firefox));
        assert_eq!(BrowserKind::parse("safari"), None);
        assert_eq!(BrowserKind::parse(""), None);
    }

    #[test]
    fn test_default_webdriver_urls() {
        assert_eq!(
            BrowserKind::Chrome.default_webdriver_url(),
            "http://localhost:9515"
        );
        assert_eq!(
            BrowserKind::Firefox.default_webdriver_url(),
            "http://localhost:4444"
        );
    }

    #[test]
    fn test_from_settings() {
        let mut settings = Config::default();
        settings.browser.kind = "firefox".to_string();
        settings.browser.headless = false;
        settings.browser.wait_timeout_secs = 3;
        settings.browser.extra_args = vec!["--lang=en".to_string()];

        let config = BrowserConfig::from_settings(&settings);
        assert_eq!(config.kind, "firefox");
        assert!(!config.headless);
        assert_eq!(config.wait_timeout, Duration::from_secs(3));
        assert_eq!(config.extra_args, vec!["--lang=en".to_string()]);
    }
}
