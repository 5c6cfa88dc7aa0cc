//! Resident and visitor records, and loading them from JSON files.

use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{Error, Result};

/// Placeholder sent to the form when no apartment number is given.
pub const APARTMENT_SENTINEL: &str = "N/A";

/// The tenant requesting the permit.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Resident {
    pub property_name: String,
    pub first_name: String,
    pub last_name: String,
    pub street_address: String,
    pub apartment_number: String,
    pub city: String,
    pub state: String,
    pub zipcode: String,
}

/// The guest being registered.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Visitor {
    pub first_name: String,
    pub last_name: String,
    pub email_address: String,
    pub phone_number: String,
    pub street_address: String,
    pub apartment_number: String,
    pub city: String,
    pub zipcode: String,
    pub vehicle: Vehicle,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Vehicle {
    pub year: String,
    pub make: String,
    pub model: String,
    pub color: String,
    pub licence_plate_number: String,
    pub license_plate_state_issuer: String,
}

impl Resident {
    pub fn normalize(&mut self) {
        normalize_apartment(&mut self.apartment_number);
    }
}

impl Visitor {
    pub fn normalize(&mut self) {
        normalize_apartment(&mut self.apartment_number);
    }
}

/// Replace an empty apartment number with [`APARTMENT_SENTINEL`].
pub fn normalize_apartment(value: &mut String) {
    if value.is_empty() {
        *value = APARTMENT_SENTINEL.to_string();
    }
}

/// Decode a JSON file into `T`.
///
/// The path is made absolute first so errors report where the file was
/// actually looked for. The file handle is dropped before returning on every
/// path, including decode failures.
pub fn load_record<T: DeserializeOwned>(path: impl AsRef<Path>) -> Result<T> {
    let path = path.as_ref();
    let absolute = std::path::absolute(path).map_err(|source| Error::ReadError {
        path: path.to_path_buf(),
        source,
    })?;

    debug!(path = %absolute.display(), "loading record");
    let file = File::open(&absolute).map_err(|source| Error::ReadError {
        path: absolute.clone(),
        source,
    })?;

    serde_json::from_reader(BufReader::new(file)).map_err(|source| {
        if source.is_io() {
            Error::ReadError {
                path: absolute.clone(),
                source: source.into(),
            }
        } else {
            Error::DecodeError {
                path: absolute.clone(),
                source,
            }
        }
    })
}

/// Load and normalize the resident record.
pub fn load_resident(path: impl AsRef<Path>) -> Result<Resident> {
    let mut resident: Resident = load_record(path)?;
    resident.normalize();
    Ok(resident)
}

/// Load and normalize the visitor record.
pub fn load_visitor(path: impl AsRef<Path>) -> Result<Visitor> {
    let mut visitor: Visitor = load_record(path)?;
    visitor.normalize();
    Ok(visitor)
}
