use std::time::Duration;

use chromiumoxide::cdp::browser_protocol::emulation::{
    ScreenOrientation, ScreenOrientationType, SetDeviceMetricsOverrideParams,
};
use chromiumoxide::cdp::browser_protocol::page::{CaptureScreenshotFormat, Viewport};
use chromiumoxide::page::Page as CrPage;
use chromiumoxide::page::ScreenshotParams;
use tracing::debug;

use crate::capture::{ContentBox, PageCapture};
use crate::element::Element;
use crate::error::{Error, Result};
use crate::form::FormDriver;

/// Wrapper around a chromiumoxide Page exposing the steps a permit run needs.
pub struct Page {
    inner: CrPage,
    default_timeout: Duration,
}

impl Page {
    pub(crate) fn new(inner: CrPage, default_timeout: Duration) -> Self {
        Self { inner, default_timeout }
    }

    // ── Navigation ──────────────────────────────────────────────────

    /// Navigate to the given URL and wait for the page to load.
    pub async fn goto(&self, url: &str) -> Result<()> {
        self.inner
            .goto(url)
            .await
            .map_err(|e| Error::NavigationError(e.to_string()))?;
        Ok(())
    }

    /// Get the current page URL.
    pub async fn url(&self) -> Result<String> {
        self.inner
            .url()
            .await
            .map_err(|e| Error::NavigationError(e.to_string()))?
            .ok_or_else(|| Error::NavigationError("No URL found".into()))
    }

    // ── Actions ─────────────────────────────────────────────────────

    /// Focus the element at `xpath` and type `text` into it.
    pub async fn type_into(&self, xpath: &str, text: &str) -> Result<()> {
        let el = self.find_xpath(xpath).await?;
        el.click().await?;
        el.type_text(text).await
    }

    /// Submit the `<form>` whose `name` attribute is `form_name`.
    pub async fn submit_form(&self, form_name: &str) -> Result<()> {
        let name_js =
            serde_json::to_string(form_name).map_err(|e| Error::JsError(e.to_string()))?;
        let js = format!(
            r#"
            (() => {{
                const form = document.forms.namedItem({name_js});
                if (!form) return false;
                form.submit();
                return true;
            }})()
            "#,
        );
        let submitted: bool = self
            .inner
            .evaluate(js)
            .await
            .map_err(|e| Error::JsError(e.to_string()))?
            .into_value()
            .map_err(|e| Error::JsError(e.to_string()))?;
        if !submitted {
            return Err(Error::ElementNotFound(format!("form named {form_name}")));
        }
        Ok(())
    }

    /// Wait until the element at `xpath` exists and is rendered visibly.
    /// Polls every 100ms up to the configured default timeout.
    pub async fn wait_for_visible(&self, xpath: &str) -> Result<()> {
        let timeout = self.default_timeout;
        let interval = Duration::from_millis(100);
        let start = std::time::Instant::now();

        loop {
            match self.is_visible(xpath).await {
                Ok(true) => return Ok(()),
                Ok(false) | Err(_) if start.elapsed() < timeout => {
                    tokio::time::sleep(interval).await;
                }
                Ok(false) | Err(_) => {
                    return Err(Error::Timeout(format!(
                        "Timed out waiting for visible element: {}",
                        xpath
                    )));
                }
            }
        }
    }

    async fn is_visible(&self, xpath: &str) -> Result<bool> {
        let xpath_js = serde_json::to_string(xpath).map_err(|e| Error::JsError(e.to_string()))?;
        let js = format!(
            r#"
            (() => {{
                const el = document.evaluate({xpath_js}, document, null,
                    XPathResult.FIRST_ORDERED_NODE_TYPE, null).singleNodeValue;
                if (!el) return false;
                const style = window.getComputedStyle(el);
                if (style.display === 'none' || style.visibility === 'hidden') return false;
                const rect = el.getBoundingClientRect();
                return rect.width > 0 || rect.height > 0;
            }})()
            "#,
        );
        self.inner
            .evaluate(js)
            .await
            .map_err(|e| Error::JsError(e.to_string()))?
            .into_value()
            .map_err(|e| Error::JsError(e.to_string()))
    }

    /// Evaluate a JavaScript expression and return the result as a string.
    pub async fn evaluate(&self, expression: &str) -> Result<String> {
        let result = self
            .inner
            .evaluate(expression)
            .await
            .map_err(|e| Error::JsError(e.to_string()))?;
        match result.value() {
            Some(val) => Ok(val.to_string()),
            None => Ok(String::new()),
        }
    }

    // ── Element Queries ─────────────────────────────────────────────

    /// Find the first element matching an XPath expression.
    pub async fn find_xpath(&self, xpath: &str) -> Result<Element> {
        let el = self
            .inner
            .find_xpath(xpath)
            .await
            .map_err(|e| Error::ElementNotFound(e.to_string()))?;
        Ok(Element::new(el))
    }
}

impl FormDriver for Page {
    async fn navigate(&self, url: &str) -> Result<()> {
        self.goto(url).await
    }

    async fn wait_visible(&self, xpath: &str) -> Result<()> {
        self.wait_for_visible(xpath).await
    }

    async fn send_text(&self, xpath: &str, value: &str) -> Result<()> {
        self.type_into(xpath, value).await
    }

    async fn submit(&self, form_name: &str) -> Result<()> {
        self.submit_form(form_name).await
    }
}

impl PageCapture for Page {
    async fn content_box(&self) -> Result<ContentBox> {
        let metrics = self
            .inner
            .layout_metrics()
            .await
            .map_err(|e| Error::ScreenshotError(format!("layout metrics: {e}")))?;
        let size = metrics.css_content_size;
        Ok(ContentBox {
            x: size.x,
            y: size.y,
            width: size.width,
            height: size.height,
        })
    }

    async fn override_viewport(&self, width: i64, height: i64) -> Result<()> {
        let params = SetDeviceMetricsOverrideParams::builder()
            .width(width)
            .height(height)
            .device_scale_factor(1.0)
            .mobile(false)
            .screen_orientation(ScreenOrientation {
                r#type: ScreenOrientationType::PortraitPrimary,
                angle: 0,
            })
            .build()
            .map_err(Error::ScreenshotError)?;
        self.inner
            .execute(params)
            .await
            .map_err(|e| Error::ScreenshotError(format!("viewport override: {e}")))?;
        debug!(width, height, "viewport overridden");
        Ok(())
    }

    async fn screenshot_clip(&self, clip: &ContentBox, quality: i64) -> Result<Vec<u8>> {
        let params = ScreenshotParams::builder()
            .format(CaptureScreenshotFormat::Png)
            .quality(quality)
            .clip(Viewport {
                x: clip.x,
                y: clip.y,
                width: clip.width,
                height: clip.height,
                scale: 1.0,
            })
            .build();
        self.inner
            .screenshot(params)
            .await
            .map_err(|e| Error::ScreenshotError(e.to_string()))
    }
}
