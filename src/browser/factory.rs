use thirtyfour::common::capabilities::desiredcapabilities::Capabilities;
use thirtyfour::prelude::*;

use super::config::{BrowserConfig, BrowserKind};

/// Errors that can occur while constructing a browser session
#[derive(Debug, thiserror::Error)]
pub enum BrowserError {
    #[error("Unsupported browser kind: {0}")]
    Unsupported(String),

    #[error("Browser configuration error: {0}")]
    Configuration(String),

    #[error("Failed to start {kind} session at {url}: {source}")]
    Startup {
        kind: BrowserKind,
        url: String,
        source: WebDriverError,
    },
}

/// Factory for WebDriver sessions
pub struct BrowserFactory {
    config: BrowserConfig,
}

impl BrowserFactory {
    pub fn new(config: BrowserConfig) -> Self {
        Self { config }
    }

    /// Get the browser configuration
    pub fn config(&self) -> &BrowserConfig {
        &self.config
    }

    /// Start a new browser session.
    ///
    /// `kind` overrides the configured browser identifier; identifiers other
    /// than "chrome" and "firefox" (case-insensitive) are rejected before any
    /// session attempt. A single startup attempt is made, no retry.
    pub async fn create(&self, kind: Option<&str>) -> Result<WebDriver, BrowserError> {
        let requested = kind.unwrap_or(&self.config.kind);
        let kind = BrowserKind::parse(requested)
            .ok_or_else(|| BrowserError::Unsupported(requested.to_string()))?;

        let caps = self.build_capabilities(kind)?;
        let url = self
            .config
            .webdriver_url
            .clone()
            .unwrap_or_else(|| kind.default_webdriver_url().to_string());

        log::info!("Starting {} session via {}", kind, url);

        let driver = WebDriver::new(&url, caps)
            .await
            .map_err(|source| BrowserError::Startup {
                kind,
                url: url.clone(),
                source,
            })?;

        if let Err(e) = driver.set_implicit_wait_timeout(self.config.implicit_wait).await {
            log::warn!("Failed to set implicit wait: {}", e);
        }
        if let Err(e) = driver
            .set_window_rect(0, 0, self.config.window_width, self.config.window_height)
            .await
        {
            log::warn!("Failed to set window size: {}", e);
        }

        Ok(driver)
    }

    fn build_capabilities(&self, kind: BrowserKind) -> Result<Capabilities, BrowserError> {
        match kind {
            BrowserKind::Chrome => self.chrome_capabilities(),
            BrowserKind::Firefox => self.firefox_capabilities(),
        }
    }

    fn chrome_capabilities(&self) -> Result<Capabilities, BrowserError> {
        let mut caps = DesiredCapabilities::chrome();

        let mut args: Vec<String> = Vec::new();
        if self.config.headless {
            args.push("--headless".to_string());
        }
        args.push("--no-sandbox".to_string());
        args.push("--disable-dev-shm-usage".to_string());
        args.push(format!(
            "--window-size={},{}",
            self.config.window_width, self.config.window_height
        ));
        args.extend(self.config.extra_args.iter().cloned());

        for arg in &args {
            caps.add_arg(arg).map_err(|e| {
                BrowserError::Configuration(format!("invalid Chrome arg '{}': {}", arg, e))
            })?;
        }

        Ok(caps.into())
    }

    fn firefox_capabilities(&self) -> Result<Capabilities, BrowserError> {
        let mut caps = DesiredCapabilities::firefox();

        let mut args: Vec<String> = Vec::new();
        if self.config.headless {
            args.push("-headless".to_string());
        }
        args.extend(self.config.extra_args.iter().cloned());

        for arg in &args {
            caps.add_arg(arg).map_err(|e| {
                BrowserError::Configuration(format!("invalid Firefox arg '{}': {}", arg, e))
            })?;
        }

        Ok(caps.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_unsupported_kind_is_rejected() {
        let factory = BrowserFactory::new(BrowserConfig::default());

        let err = factory.create(Some("safari")).await.unwrap_err();
        assert!(matches!(err, BrowserError::Unsupported(_)));
        assert!(err.to_string().contains("safari"));

        let err = factory.create(Some("edge")).await.unwrap_err();
        assert!(matches!(err, BrowserError::Unsupported(_)));
    }

    #[tokio::test]
    async fn test_unsupported_kind_from_settings() {
        let mut config = BrowserConfig::default();
        config.kind = "opera".to_string();
        let factory = BrowserFactory::new(config);

        let err = factory.create(None).await.unwrap_err();
        assert!(matches!(err, BrowserError::Unsupported(_)));
    }

    #[test]
    fn test_chrome_capabilities_args() {
        let mut config = BrowserConfig::default();
        config.extra_args = vec!["--lang=en".to_string()];
        let factory = BrowserFactory::new(config);

        let caps = factory.chrome_capabilities().unwrap();
        let json = serde_json::to_string(&caps).unwrap();
        assert!(json.contains("--headless"));
        assert!(json.contains("--no-sandbox"));
        assert!(json.contains("--disable-dev-shm-usage"));
        assert!(json.contains("--window-size=1920,1080"));
        assert!(json.contains("--lang=en"));
    }

    #[test]
    fn test_chrome_capabilities_headed() {
        let mut config = BrowserConfig::default();
        config.headless = false;
        let factory = BrowserFactory::new(config);

        let caps = factory.chrome_capabilities().unwrap();
        let json = serde_json::to_string(&caps).unwrap();
        assert!(!json.contains("--headless"));
        assert!(json.contains("--no-sandbox"));
    }

    #[test]
    fn test_firefox_capabilities_args() {
        let factory = BrowserFactory::new(BrowserConfig::default());

        let caps = factory.firefox_capabilities().unwrap();
        let json = serde_json::to_string(&caps).unwrap();
        assert!(json.contains("-headless"));
        assert!(!json.contains("--no-sandbox"));
    }
}
