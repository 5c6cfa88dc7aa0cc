pub mod browser;
pub mod capture;
pub mod config;
pub mod element;
pub mod error;
pub mod form;
pub mod page;
pub mod records;
pub mod run;
pub mod validate;

pub use browser::PermitBrowser;
pub use config::{BrowserConfig, PermitConfig};
pub use error::{Error, ErrorKind, Result};
pub use page::Page;
pub use records::{Resident, Vehicle, Visitor};
pub use run::{run, RunOptions};
pub use validate::Validate;
