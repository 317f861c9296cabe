use serde::Deserialize;
use std::collections::HashMap;
use std::fs;
use std::path::Path;

#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    #[serde(default)]
    pub browser: BrowserSettings,
    #[serde(default)]
    pub admin: AdminAccount,
    #[serde(default)]
    pub screenshots: ScreenshotSettings,
    /// Named CSS selectors waited for after the listing page opens
    #[serde(default)]
    pub custom_wait_conditions: HashMap<String, String>,
}

#[derive(Debug, Deserialize, Clone)]
pub struct BrowserSettings {
    /// Browser to drive ("chrome" or "firefox")
    #[serde(default = "default_browser_kind")]
    pub kind: String,

    /// Run the browser without a visible window
    #[serde(default = "default_true")]
    pub headless: bool,

    /// Browser window width in pixels
    #[serde(default = "default_window_width")]
    pub window_width: u32,

    /// Browser window height in pixels
    #[serde(default = "default_window_height")]
    pub window_height: u32,

    /// Timeout for explicit element waits in seconds
    #[serde(default = "default_wait_timeout")]
    pub wait_timeout_secs: u64,

    /// Implicit wait applied to every element lookup in seconds
    #[serde(default = "default_implicit_wait")]
    pub implicit_wait_secs: u64,

    /// WebDriver endpoint; when unset, a per-browser default is used
    #[serde(default)]
    pub webdriver_url: Option<String>,

    /// Extra arguments passed through to the browser process
    #[serde(default)]
    pub extra_args: Vec<String>,
}

/// Credentials of the administrative account the harness signs in with.
/// Provisioning the account itself is the host test suite's job.
#[derive(Debug, Deserialize, Clone)]
pub struct AdminAccount {
    #[serde(default = "default_admin_username")]
    pub username: String,
    #[serde(default = "default_admin_email")]
    pub email: String,
    #[serde(default = "default_admin_password")]
    pub password: String,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ScreenshotSettings {
    /// Capture a screenshot when a run fails
    #[serde(default = "default_true")]
    pub on_failure: bool,

    /// Output directory; falls back to "screenshots" when unset
    #[serde(default)]
    pub dir: Option<String>,
}

fn default_true() -> bool { true }
fn default_browser_kind() -> String { "chrome".to_string() }
fn default_window_width() -> u32 { 1920 }
fn default_window_height() -> u32 { 1080 }
fn default_wait_timeout() -> u64 { 10 }
fn default_implicit_wait() -> u64 { 10 }
fn default_admin_username() -> String { "admin".to_string() }
fn default_admin_email() -> String { "admin@example.com".to_string() }
fn default_admin_password() -> String { "admin123".to_string() }

impl Default for BrowserSettings {
    fn default() -> Self {
        Self {
            kind: "chrome".to_string(),
            headless: true,
            window_width: 1920,
            window_height: 1080,
            wait_timeout_secs: 10,
            implicit_wait_secs: 10,
            webdriver_url: None,
            extra_args: vec![],
        }
    }
}

impl Default for AdminAccount {
    fn default() -> Self {
        Self {
            username: "admin".to_string(),
            email: "admin@example.com".to_string(),
            password: "admin123".to_string(),
        }
    }
}

impl Default for ScreenshotSettings {
    fn default() -> Self {
        Self {
            on_failure: true,
            dir: None,
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            browser: BrowserSettings::default(),
            admin: AdminAccount::default(),
            screenshots: ScreenshotSettings::default(),
            custom_wait_conditions: HashMap::new(),
        }
    }
}

impl Config {
    pub fn load() -> Self {
        let path = Path::new("config.toml");
        if path.exists() {
            if let Ok(content) = fs::read_to_string(path) {
                if let Ok(cfg) = toml::from_str::<Config>(&content) {
                    return cfg;
                }
            }
        }
        Self::default()
    }
}
