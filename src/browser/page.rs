use async_trait::async_trait;
use std::time::Duration;
use thirtyfour::prelude::*;

use crate::page::{Element, Page, Target, UiError};

const POLL_INTERVAL: Duration = Duration::from_millis(100);

// WebDriver codepoint for the Enter key
const ENTER_KEY: &str = "\u{E007}";

fn to_by(target: &Target) -> By {
    match target {
        Target::Id(v) => By::Id(v.as_str()),
        Target::Name(v) => By::Name(v.as_str()),
        Target::ClassName(v) => By::ClassName(v.as_str()),
        Target::Css(v) => By::Css(v.as_str()),
        Target::Tag(v) => By::Tag(v.as_str()),
    }
}

/// [`Page`] implementation backed by a live WebDriver session.
pub struct WebDriverPage {
    driver: WebDriver,
}

impl WebDriverPage {
    pub fn new(driver: WebDriver) -> Self {
        Self { driver }
    }

    /// Get a reference to the underlying session
    pub fn driver(&self) -> &WebDriver {
        &self.driver
    }

    /// Terminate the browser session.
    pub async fn quit(self) -> Result<(), UiError> {
        self.driver
            .quit()
            .await
            .map_err(|e| UiError::Session(e.to_string()))
    }
}

#[async_trait]
impl Page for WebDriverPage {
    async fn open(&self, url: &str) -> Result<(), UiError> {
        self.driver
            .goto(url)
            .await
            .map_err(|e| UiError::Navigation(format!("failed to open {}: {}", url, e)))
    }

    async fn back(&self) -> Result<(), UiError> {
        self.driver
            .back()
            .await
            .map_err(|e| UiError::Navigation(e.to_string()))
    }

    async fn find(&self, target: &Target) -> Result<Option<Box<dyn Element>>, UiError> {
        match self.driver.find(to_by(target)).await {
            Ok(elem) => Ok(Some(Box::new(WebDriverElement { elem }))),
            Err(WebDriverError::NoSuchElement(_)) => Ok(None),
            Err(e) => Err(UiError::Session(e.to_string())),
        }
    }

    async fn find_all(&self, target: &Target) -> Result<Vec<Box<dyn Element>>, UiError> {
        let elems = self
            .driver
            .find_all(to_by(target))
            .await
            .map_err(|e| UiError::Session(e.to_string()))?;
        Ok(elems
            .into_iter()
            .map(|elem| Box::new(WebDriverElement { elem }) as Box<dyn Element>)
            .collect())
    }

    async fn wait_for(&self, target: &Target, timeout: Duration) -> Result<(), UiError> {
        self.driver
            .query(to_by(target))
            .wait(timeout, POLL_INTERVAL)
            .first()
            .await
            .map(|_| ())
            .map_err(|_| UiError::Timeout(target.to_string()))
    }

    async fn screenshot_png(&self) -> Result<Vec<u8>, UiError> {
        self.driver
            .screenshot_as_png()
            .await
            .map_err(|e| UiError::Session(e.to_string()))
    }
}

/// [`Element`] implementation over a WebDriver element handle.
pub struct WebDriverElement {
    elem: WebElement,
}

#[async_trait]
impl Element for WebDriverElement {
    async fn text(&self) -> Result<String, UiError> {
        self.elem
            .text()
            .await
            .map_err(|e| UiError::Session(e.to_string()))
    }

    async fn attr(&self, name: &str) -> Result<Option<String>, UiError> {
        self.elem
            .attr(name)
            .await
            .map_err(|e| UiError::Session(e.to_string()))
    }

    async fn click(&self) -> Result<(), UiError> {
        self.elem
            .click()
            .await
            .map_err(|e| UiError::Session(e.to_string()))
    }

    async fn send_keys(&self, keys: &str) -> Result<(), UiError> {
        self.elem
            .send_keys(keys)
            .await
            .map_err(|e| UiError::Session(e.to_string()))
    }

    async fn submit(&self) -> Result<(), UiError> {
        self.elem
            .send_keys(ENTER_KEY)
            .await
            .map_err(|e| UiError::Session(e.to_string()))
    }

    async fn wait_clickable(&self, timeout: Duration) -> Result<(), UiError> {
        self.elem
            .wait_until()
            .wait(timeout, POLL_INTERVAL)
            .clickable()
            .await
            .map_err(|e| UiError::Timeout(e.to_string()))
    }

    async fn find_all(&self, target: &Target) -> Result<Vec<Box<dyn Element>>, UiError> {
        let elems = self
            .elem
            .find_all(to_by(target))
            .await
            .map_err(|e| UiError::Session(e.to_string()))?;
        Ok(elems
            .into_iter()
            .map(|elem| Box::new(WebDriverElement { elem }) as Box<dyn Element>)
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::browser::{BrowserConfig, BrowserFactory};

    #[tokio::test]
    #[ignore] // Requires a running chromedriver
    async fn test_basic_navigation() {
        let factory = BrowserFactory::new(BrowserConfig::default());
        let driver = factory.create(None).await.unwrap();
        let page = WebDriverPage::new(driver);

        assert!(page.open("https://example.com").await.is_ok());
        assert!(page
            .find(&Target::tag("h1"))
            .await
            .unwrap()
            .is_some());

        page.quit().await.unwrap();
    }
}
