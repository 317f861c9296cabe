use chrono::Local;
use std::fs;
use std::path::PathBuf;

use crate::config::ScreenshotSettings;
use crate::page::{Page, UiError};

const DEFAULT_DIR: &str = "screenshots";

/// Errors that can occur while saving a screenshot
#[derive(Debug, thiserror::Error)]
pub enum ScreenshotError {
    #[error("screenshot capture failed: {0}")]
    Capture(#[from] UiError),

    #[error("screenshot io error: {0}")]
    Io(#[from] std::io::Error),
}

/// Screenshot capture policy and output location.
#[derive(Debug, Clone)]
pub struct Screenshots {
    enabled: bool,
    dir: Option<PathBuf>,
}

impl Screenshots {
    pub fn new(enabled: bool, dir: Option<PathBuf>) -> Self {
        Self { enabled, dir }
    }

    pub fn disabled() -> Self {
        Self {
            enabled: false,
            dir: None,
        }
    }

    pub fn from_settings(settings: &ScreenshotSettings) -> Self {
        Self {
            enabled: settings.on_failure,
            dir: settings.dir.as_ref().map(PathBuf::from),
        }
    }

    pub fn enabled(&self) -> bool {
        self.enabled
    }

    /// Save the page's current frame to the configured directory.
    ///
    /// A no-op returning `Ok(None)` when capture is disabled; the directory is
    /// only created when a shot is actually taken. Files are named
    /// `{label}_{YYYYMMDD-HHMMSS}.png`; collisions within the same second
    /// under the same label overwrite.
    pub async fn capture(
        &self,
        page: &dyn Page,
        label: Option<&str>,
    ) -> Result<Option<PathBuf>, ScreenshotError> {
        if !self.enabled {
            return Ok(None);
        }

        let dir = self
            .dir
            .clone()
            .unwrap_or_else(|| PathBuf::from(DEFAULT_DIR));
        fs::create_dir_all(&dir)?;

        let timestamp = Local::now().format("%Y%m%d-%H%M%S");
        let filename = format!("{}_{}.png", label.unwrap_or("screenshot"), timestamp);
        let path = dir.join(filename);

        let png = page.screenshot_png().await?;
        fs::write(&path, png)?;

        log::info!("Screenshot saved to {}", path.display());
        Ok(Some(path))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::page::{Element, Target};
    use async_trait::async_trait;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::time::Duration;

    /// Minimal page stub; only screenshot capture is meaningful here.
    #[derive(Default)]
    struct FramePage {
        captures: AtomicUsize,
    }

    #[async_trait]
    impl Page for FramePage {
        async fn open(&self, _url: &str) -> Result<(), UiError> {
            Ok(())
        }

        async fn back(&self) -> Result<(), UiError> {
            Ok(())
        }

        async fn find(&self, _target: &Target) -> Result<Option<Box<dyn Element>>, UiError> {
            Ok(None)
        }

        async fn find_all(&self, _target: &Target) -> Result<Vec<Box<dyn Element>>, UiError> {
            Ok(vec![])
        }

        async fn wait_for(&self, _target: &Target, _timeout: Duration) -> Result<(), UiError> {
            Ok(())
        }

        async fn screenshot_png(&self) -> Result<Vec<u8>, UiError> {
            self.captures.fetch_add(1, Ordering::SeqCst);
            Ok(vec![0x89, b'P', b'N', b'G'])
        }
    }

    #[tokio::test]
    async fn test_disabled_capture_touches_nothing() {
        let tmp = tempfile::tempdir().unwrap();
        let dir = tmp.path().join("never_created");

        let page = FramePage::default();
        let shots = Screenshots::new(false, Some(dir.clone()));

        let path = shots.capture(&page, Some("login")).await.unwrap();
        assert!(path.is_none());
        assert!(!dir.exists());
        assert_eq!(page.captures.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_capture_writes_labelled_file() {
        let tmp = tempfile::tempdir().unwrap();
        let dir = tmp.path().join("shots");

        let page = FramePage::default();
        let shots = Screenshots::new(true, Some(dir.clone()));

        let path = shots.capture(&page, Some("shop_product")).await.unwrap().unwrap();
        assert!(path.exists());
        let name = path.file_name().unwrap().to_string_lossy().to_string();
        assert!(name.starts_with("shop_product_"));
        assert!(name.ends_with(".png"));
        assert_eq!(page.captures.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_capture_without_label_uses_fallback_name() {
        let tmp = tempfile::tempdir().unwrap();
        let dir = tmp.path().join("shots");

        let page = FramePage::default();
        let shots = Screenshots::new(true, Some(dir));

        let path = shots.capture(&page, None).await.unwrap().unwrap();
        let name = path.file_name().unwrap().to_string_lossy().to_string();
        assert!(name.starts_with("screenshot_"));
    }
}
