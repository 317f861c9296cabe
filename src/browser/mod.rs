//! Browser session construction for the admin harness.
//!
//! This module builds WebDriver sessions (Chrome or Firefox) from the
//! crate configuration and adapts them to the [`Page`](crate::page::Page)
//! abstraction the harness drives.
//!
//! # Example
//!
//! ```no_run
//! use admin_ui_tester::browser::{BrowserConfig, BrowserFactory, WebDriverPage};
//! use admin_ui_tester::config::Config;
//! use admin_ui_tester::harness::AdminPageHarness;
//!
//! # async fn run() -> Result<(), Box<dyn std::error::Error>> {
//! let config = Config::load();
//!
//! // Start a browser session using the configured kind
//! let factory = BrowserFactory::new(BrowserConfig::from_settings(&config));
//! let driver = factory.create(None).await?;
//!
//! // Exercise one admin listing page
//! let page = WebDriverPage::new(driver.clone());
//! let harness = AdminPageHarness::new(page, &config, "http://localhost:8000", "shop", "product");
//! harness.run().await?;
//!
//! driver.quit().await?;
//! # Ok(())
//! # }
//! ```

pub mod config;
pub mod factory;
pub mod page;

// Re-export main types for convenience
pub use config::{BrowserConfig, BrowserKind};
pub use factory::{BrowserError, BrowserFactory};
pub use page::WebDriverPage;
