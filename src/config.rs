use std::path::PathBuf;
use std::time::Duration;

use crate::browser::PermitBrowser;
use crate::error::Result;

/// Visitor permit request page.
pub const PERMIT_FORM_URL: &str =
    "https://www.parkitrightpermit.com/park-it-right-contact-visitor-permit-request/";

pub struct BrowserConfig {
    pub headless: bool,
    pub viewport_width: u32,
    pub viewport_height: u32,
    pub chrome_path: Option<String>,
    /// Default timeout for `wait_for_visible` (default: 30s).
    pub default_timeout: Duration,
}

impl Default for BrowserConfig {
    fn default() -> Self {
        Self {
            headless: false,
            viewport_width: 1920,
            viewport_height: 1080,
            chrome_path: None,
            default_timeout: Duration::from_secs(30),
        }
    }
}

/// What to submit where, and how long to give the page between steps.
#[derive(Debug, Clone)]
pub struct PermitConfig {
    pub form_url: String,
    /// `name` of the `<form>` element that gets submitted.
    pub form_name: String,
    /// Input whose visibility means the form is ready for typing.
    pub ready_field: String,
    /// Pause after the form becomes visible, before typing.
    pub settle_delay: Duration,
    /// Pause after submitting, before the capture.
    pub submit_delay: Duration,
    pub screenshot_quality: i64,
    pub output_dir: PathBuf,
}

impl Default for PermitConfig {
    fn default() -> Self {
        Self {
            form_url: PERMIT_FORM_URL.to_string(),
            form_name: "visitors".to_string(),
            ready_field: "property-name".to_string(),
            settle_delay: Duration::from_secs(2),
            submit_delay: Duration::from_secs(2),
            screenshot_quality: 90,
            output_dir: PathBuf::from("."),
        }
    }
}

pub struct BrowserBuilder {
    config: BrowserConfig,
}

impl BrowserBuilder {
    pub fn new() -> Self {
        Self {
            config: BrowserConfig::default(),
        }
    }

    pub fn headless(mut self, headless: bool) -> Self {
        self.config.headless = headless;
        self
    }

    pub fn viewport(mut self, width: u32, height: u32) -> Self {
        self.config.viewport_width = width;
        self.config.viewport_height = height;
        self
    }

    pub fn chrome_path(mut self, path: impl Into<String>) -> Self {
        self.config.chrome_path = Some(path.into());
        self
    }

    /// Set the default timeout for `wait_for_visible`.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.config.default_timeout = timeout;
        self
    }

    pub fn build_config(self) -> BrowserConfig {
        self.config
    }

    pub async fn build(self) -> Result<PermitBrowser> {
        PermitBrowser::launch(self.build_config()).await
    }
}

impl Default for BrowserBuilder {
    fn default() -> Self {
        Self::new()
    }
}
