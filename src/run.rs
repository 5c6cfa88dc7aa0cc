//! The permit request, phase by phase.

use std::path::{Path, PathBuf};

use chrono::Local;
use tracing::{info, warn};

use crate::browser::PermitBrowser;
use crate::capture::{capture_content, save_registration};
use crate::config::{BrowserConfig, PermitConfig};
use crate::error::Result;
use crate::form::submit_permit;
use crate::page::Page;
use crate::records::{load_resident, load_visitor, Resident, Visitor};
use crate::validate::Validate;

pub struct RunOptions {
    pub resident_path: PathBuf,
    pub visitor_path: PathBuf,
    pub browser: BrowserConfig,
    pub permit: PermitConfig,
    /// Stop after validation, without starting a browser.
    pub dry_run: bool,
}

/// Load, normalize and validate both records. Nothing touches the browser
/// until this has succeeded.
pub fn prepare_records(resident_path: &Path, visitor_path: &Path) -> Result<(Resident, Visitor)> {
    let resident = load_resident(resident_path)?;
    resident.validate()?;
    let visitor = load_visitor(visitor_path)?;
    visitor.validate()?;
    info!(
        resident = %format!("{} {}", resident.first_name, resident.last_name),
        visitor = %format!("{} {}", visitor.first_name, visitor.last_name),
        "records validated"
    );
    Ok((resident, visitor))
}

/// Run the whole request. Returns the screenshot path, or `None` on a dry run.
///
/// The browser is closed whether or not the form steps succeed.
pub async fn run(options: RunOptions) -> Result<Option<PathBuf>> {
    let (resident, visitor) = prepare_records(&options.resident_path, &options.visitor_path)?;
    if options.dry_run {
        info!("dry run, not opening a browser");
        return Ok(None);
    }

    let browser = PermitBrowser::launch(options.browser).await?;
    let outcome = match browser.new_page().await {
        Ok(page) => session(&page, &options.permit, &resident, &visitor).await,
        Err(e) => Err(e),
    };
    browser.close().await;
    outcome.map(Some)
}

async fn session(
    page: &Page,
    config: &PermitConfig,
    resident: &Resident,
    visitor: &Visitor,
) -> Result<PathBuf> {
    submit_permit(page, config, resident, visitor).await?;
    match page.url().await {
        Ok(url) => info!(%url, "form submitted"),
        Err(e) => warn!("form submitted, current url unavailable: {e}"),
    }

    let image = capture_content(page, config.screenshot_quality).await?;
    save_registration(&image, &config.output_dir, visitor, Local::now().date_naive()).await
}
