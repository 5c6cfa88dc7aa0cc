use crate::error::{Error, Result};
use crate::records::{Resident, Visitor};

/// A record with an ordered list of fields that must not be empty.
pub trait Validate {
    /// Name used as the prefix of error messages.
    const RECORD: &'static str;

    /// `(label, value)` pairs in the order they are checked.
    fn required_fields(&self) -> Vec<(&'static str, &str)>;

    /// Fails on the first empty field, in `required_fields` order.
    fn validate(&self) -> Result<()> {
        match self
            .required_fields()
            .into_iter()
            .find(|(_, value)| value.is_empty())
        {
            Some((field, _)) => Err(Error::MissingField {
                record: Self::RECORD,
                field,
            }),
            None => Ok(()),
        }
    }
}

impl Validate for Resident {
    const RECORD: &'static str = "resident";

    fn required_fields(&self) -> Vec<(&'static str, &str)> {
        vec![
            ("first name", self.first_name.as_str()),
            ("last name", self.last_name.as_str()),
            ("property name", self.property_name.as_str()),
            ("street address", self.street_address.as_str()),
            ("apartment number", self.apartment_number.as_str()),
            ("city", self.city.as_str()),
            ("state", self.state.as_str()),
            ("zipcode", self.zipcode.as_str()),
        ]
    }
}

impl Validate for Visitor {
    const RECORD: &'static str = "visitor";

    fn required_fields(&self) -> Vec<(&'static str, &str)> {
        let vehicle = &self.vehicle;
        vec![
            ("first name", self.first_name.as_str()),
            ("last name", self.last_name.as_str()),
            ("street address", self.street_address.as_str()),
            ("apartment number", self.apartment_number.as_str()),
            ("city", self.city.as_str()),
            ("zipcode", self.zipcode.as_str()),
            ("email address", self.email_address.as_str()),
            ("phone number", self.phone_number.as_str()),
            ("vehicle year", vehicle.year.as_str()),
            ("vehicle make", vehicle.make.as_str()),
            ("vehicle model", vehicle.model.as_str()),
            ("vehicle color", vehicle.color.as_str()),
            ("vehicle license plate number", vehicle.licence_plate_number.as_str()),
            ("vehicle license plate state issuer", vehicle.license_plate_state_issuer.as_str()),
        ]
    }
}
