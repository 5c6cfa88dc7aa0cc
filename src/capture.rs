//! Screenshot of the submitted form, sized to the page content.

use std::path::{Path, PathBuf};

use chrono::NaiveDate;
use tracing::info;

use crate::error::{Error, Result};
use crate::records::Visitor;

/// Page content bounds in CSS pixels.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ContentBox {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl ContentBox {
    /// Width and height rounded up to whole pixels.
    pub fn pixel_size(&self) -> (i64, i64) {
        (self.width.ceil() as i64, self.height.ceil() as i64)
    }
}

/// Browser operations needed to capture the page.
#[allow(async_fn_in_trait)]
pub trait PageCapture {
    async fn content_box(&self) -> Result<ContentBox>;
    async fn override_viewport(&self, width: i64, height: i64) -> Result<()>;
    async fn screenshot_clip(&self, clip: &ContentBox, quality: i64) -> Result<Vec<u8>>;
}

/// Force the viewport to the full content size and capture all of it.
pub async fn capture_content<C: PageCapture>(page: &C, quality: i64) -> Result<Vec<u8>> {
    let content = page.content_box().await?;
    let (width, height) = content.pixel_size();
    page.override_viewport(width, height).await?;
    page.screenshot_clip(&content, quality).await
}

/// `{first}-{last}-{YYYYMMDD}-registration.png`
pub fn registration_file_name(visitor: &Visitor, date: NaiveDate) -> String {
    format!(
        "{}-{}-{}-registration.png",
        visitor.first_name,
        visitor.last_name,
        date.format("%Y%m%d")
    )
}

/// Write the screenshot into `dir` and return the path written.
pub async fn save_registration(
    image: &[u8],
    dir: &Path,
    visitor: &Visitor,
    date: NaiveDate,
) -> Result<PathBuf> {
    let path = dir.join(registration_file_name(visitor, date));
    tokio::fs::write(&path, image)
        .await
        .map_err(|source| Error::WriteError {
            path: path.clone(),
            source,
        })?;
    info!(path = %path.display(), bytes = image.len(), "screenshot saved");
    Ok(path)
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;

    use super::*;
    use crate::error::ErrorKind;

    struct FakePage {
        content: ContentBox,
        viewport: RefCell<Option<(i64, i64)>>,
        fail_screenshot: bool,
    }

    impl FakePage {
        fn new(content: ContentBox) -> Self {
            Self {
                content,
                viewport: RefCell::new(None),
                fail_screenshot: false,
            }
        }
    }

    impl PageCapture for FakePage {
        async fn content_box(&self) -> Result<ContentBox> {
            Ok(self.content)
        }

        async fn override_viewport(&self, width: i64, height: i64) -> Result<()> {
            *self.viewport.borrow_mut() = Some((width, height));
            Ok(())
        }

        async fn screenshot_clip(&self, clip: &ContentBox, quality: i64) -> Result<Vec<u8>> {
            if self.fail_screenshot {
                return Err(Error::ScreenshotError("no target".into()));
            }
            assert_eq!(*clip, self.content);
            assert_eq!(quality, 90);
            Ok(vec![0x89, b'P', b'N', b'G'])
        }
    }

    fn visitor() -> Visitor {
        Visitor {
            first_name: "Jane".into(),
            last_name: "Doe".into(),
            ..Visitor::default()
        }
    }

    #[test]
    fn pixel_size_rounds_up() {
        let content = ContentBox {
            x: 0.0,
            y: 0.0,
            width: 1280.2,
            height: 3000.0,
        };
        assert_eq!(content.pixel_size(), (1281, 3000));
    }

    #[test]
    fn file_name_uses_visitor_and_date() {
        let date = NaiveDate::from_ymd_opt(2024, 3, 7).unwrap();
        assert_eq!(
            registration_file_name(&visitor(), date),
            "Jane-Doe-20240307-registration.png"
        );
    }

    #[tokio::test]
    async fn viewport_is_forced_to_content_size() {
        let page = FakePage::new(ContentBox {
            x: 0.0,
            y: 0.0,
            width: 799.5,
            height: 2048.01,
        });
        let png = capture_content(&page, 90).await.unwrap();
        assert_eq!(&png[..2], &[0x89, b'P']);
        assert_eq!(*page.viewport.borrow(), Some((800, 2049)));
    }

    #[tokio::test]
    async fn screenshot_failure_is_a_capture_error() {
        let mut page = FakePage::new(ContentBox {
            x: 0.0,
            y: 0.0,
            width: 10.0,
            height: 10.0,
        });
        page.fail_screenshot = true;
        let err = capture_content(&page, 90).await.unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Capture);
    }

    #[tokio::test]
    async fn save_writes_named_file() {
        let dir = tempfile::tempdir().unwrap();
        let date = NaiveDate::from_ymd_opt(2025, 12, 31).unwrap();
        let path = save_registration(b"png-bytes", dir.path(), &visitor(), date)
            .await
            .unwrap();
        assert_eq!(path, dir.path().join("Jane-Doe-20251231-registration.png"));
        assert_eq!(std::fs::read(&path).unwrap(), b"png-bytes");
    }

    #[tokio::test]
    async fn save_into_missing_dir_fails() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("nope");
        let date = NaiveDate::from_ymd_opt(2025, 1, 1).unwrap();
        let err = save_registration(b"x", &missing, &visitor(), date)
            .await
            .unwrap_err();
        assert!(matches!(err, Error::WriteError { .. }));
    }
}
