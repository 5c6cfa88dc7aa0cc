//! Mapping records onto the permit form and driving it.

use tracing::{debug, info};

use crate::config::PermitConfig;
use crate::error::Result;
use crate::records::{Resident, Visitor};

/// Browser operations needed to fill and submit the form.
#[allow(async_fn_in_trait)]
pub trait FormDriver {
    async fn navigate(&self, url: &str) -> Result<()>;
    async fn wait_visible(&self, xpath: &str) -> Result<()>;
    async fn send_text(&self, xpath: &str, value: &str) -> Result<()>;
    async fn submit(&self, form_name: &str) -> Result<()>;
}

/// One input to fill: its `name` attribute and the text to type.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FormEntry<'a> {
    pub name: &'static str,
    pub value: &'a str,
}

impl<'a> FormEntry<'a> {
    fn new(name: &'static str, value: &'a str) -> Self {
        Self { name, value }
    }
}

/// XPath locating the `<input>` whose `name` attribute is exactly `name`.
pub fn input_xpath(name: &str) -> String {
    format!(r#"//input[@name="{name}"]"#)
}

pub fn resident_entries(resident: &Resident) -> Vec<FormEntry<'_>> {
    vec![
        FormEntry::new("property-name", &resident.property_name),
        FormEntry::new("first-name-of-resident", &resident.first_name),
        FormEntry::new("last-name-of-resident", &resident.last_name),
        FormEntry::new("resident-address", &resident.street_address),
        FormEntry::new("resident-apartment", &resident.apartment_number),
        FormEntry::new("resident-city", &resident.city),
        FormEntry::new("resident-state", &resident.state),
        FormEntry::new("resident-zip", &resident.zipcode),
    ]
}

pub fn visitor_entries(visitor: &Visitor) -> Vec<FormEntry<'_>> {
    let vehicle = &visitor.vehicle;
    vec![
        FormEntry::new("visitor-first-name", &visitor.first_name),
        FormEntry::new("visitor-last-name", &visitor.last_name),
        FormEntry::new("visitor-email", &visitor.email_address),
        FormEntry::new("visitor-phone", &visitor.phone_number),
        FormEntry::new("visitor-address", &visitor.street_address),
        FormEntry::new("visitor-apt-number", &visitor.apartment_number),
        FormEntry::new("visitor-city", &visitor.city),
        FormEntry::new("visitor-zip", &visitor.zipcode),
        FormEntry::new("visitor-year", &vehicle.year),
        FormEntry::new("visitor-make", &vehicle.make),
        FormEntry::new("visitor-model", &vehicle.model),
        FormEntry::new("visitor-color", &vehicle.color),
        FormEntry::new("visitor-license-plate-number", &vehicle.licence_plate_number),
        FormEntry::new("visitor-state-of-issuance", &vehicle.license_plate_state_issuer),
    ]
}

/// Type every entry into its input, in order. Stops at the first failure.
pub async fn fill_form<D: FormDriver>(driver: &D, entries: &[FormEntry<'_>]) -> Result<()> {
    for entry in entries {
        debug!(field = entry.name, "filling");
        driver.send_text(&input_xpath(entry.name), entry.value).await?;
    }
    Ok(())
}

/// Run the full request: open the form, fill resident then visitor fields,
/// submit, and give the page time to respond.
pub async fn submit_permit<D: FormDriver>(
    driver: &D,
    config: &PermitConfig,
    resident: &Resident,
    visitor: &Visitor,
) -> Result<()> {
    info!(url = %config.form_url, "opening permit form");
    driver.navigate(&config.form_url).await?;
    driver.wait_visible(&input_xpath(&config.ready_field)).await?;
    tokio::time::sleep(config.settle_delay).await;

    fill_form(driver, &resident_entries(resident)).await?;
    fill_form(driver, &visitor_entries(visitor)).await?;

    info!(form = %config.form_name, "submitting");
    driver.submit(&config.form_name).await?;
    tokio::time::sleep(config.submit_delay).await;
    Ok(())
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;
    use std::time::Duration;

    use super::*;
    use crate::error::Error;
    use crate::records::Vehicle;

    #[derive(Default)]
    struct Recorder {
        calls: RefCell<Vec<String>>,
        fail_on: Option<&'static str>,
    }

    impl Recorder {
        fn record(&self, call: String) -> Result<()> {
            let fail = self.fail_on.is_some_and(|needle| call.contains(needle));
            self.calls.borrow_mut().push(call);
            if fail {
                return Err(Error::ElementNotFound("scripted failure".into()));
            }
            Ok(())
        }
    }

    impl FormDriver for Recorder {
        async fn navigate(&self, url: &str) -> Result<()> {
            self.record(format!("navigate {url}"))
        }

        async fn wait_visible(&self, xpath: &str) -> Result<()> {
            self.record(format!("wait {xpath}"))
        }

        async fn send_text(&self, xpath: &str, value: &str) -> Result<()> {
            self.record(format!("send {xpath} {value}"))
        }

        async fn submit(&self, form_name: &str) -> Result<()> {
            self.record(format!("submit {form_name}"))
        }
    }

    fn quick_config() -> PermitConfig {
        PermitConfig {
            settle_delay: Duration::ZERO,
            submit_delay: Duration::ZERO,
            ..PermitConfig::default()
        }
    }

    fn resident() -> Resident {
        Resident {
            property_name: "Oak Court".into(),
            first_name: "Ann".into(),
            last_name: "Lee".into(),
            street_address: "10 Oak St".into(),
            apartment_number: "N/A".into(),
            city: "Fresno".into(),
            state: "CA".into(),
            zipcode: "93701".into(),
        }
    }

    fn visitor() -> Visitor {
        Visitor {
            first_name: "Bo".into(),
            last_name: "Chen".into(),
            email_address: "bo@example.com".into(),
            phone_number: "555-0101".into(),
            street_address: "2 Elm St".into(),
            apartment_number: "3".into(),
            city: "Clovis".into(),
            zipcode: "93611".into(),
            vehicle: Vehicle {
                year: "2020".into(),
                make: "Toyota".into(),
                model: "Prius".into(),
                color: "White".into(),
                licence_plate_number: "8ABC123".into(),
                license_plate_state_issuer: "CA".into(),
            },
        }
    }

    #[test]
    fn xpath_matches_input_by_exact_name() {
        assert_eq!(input_xpath("resident-zip"), r#"//input[@name="resident-zip"]"#);
    }

    #[test]
    fn resident_entries_follow_form_order() {
        let r = resident();
        let names: Vec<_> = resident_entries(&r).iter().map(|e| e.name).collect();
        assert_eq!(
            names,
            [
                "property-name",
                "first-name-of-resident",
                "last-name-of-resident",
                "resident-address",
                "resident-apartment",
                "resident-city",
                "resident-state",
                "resident-zip",
            ]
        );
    }

    #[test]
    fn visitor_entries_include_vehicle() {
        let v = visitor();
        let entries = visitor_entries(&v);
        assert_eq!(entries.len(), 14);
        assert_eq!(entries[0], FormEntry::new("visitor-first-name", "Bo"));
        assert_eq!(entries[5], FormEntry::new("visitor-apt-number", "3"));
        assert_eq!(entries[8], FormEntry::new("visitor-year", "2020"));
        assert_eq!(
            entries[12],
            FormEntry::new("visitor-license-plate-number", "8ABC123")
        );
        assert_eq!(entries[13], FormEntry::new("visitor-state-of-issuance", "CA"));
    }

    #[tokio::test]
    async fn submit_permit_issues_steps_in_order() {
        let driver = Recorder::default();
        let (r, v) = (resident(), visitor());
        submit_permit(&driver, &quick_config(), &r, &v).await.unwrap();

        let calls = driver.calls.into_inner();
        assert_eq!(calls.len(), 2 + 8 + 14 + 1);
        assert_eq!(
            calls[0],
            format!("navigate {}", crate::config::PERMIT_FORM_URL)
        );
        assert_eq!(calls[1], r#"wait //input[@name="property-name"]"#);
        assert_eq!(calls[2], r#"send //input[@name="property-name"] Oak Court"#);
        assert_eq!(calls[9], r#"send //input[@name="resident-zip"] 93701"#);
        assert_eq!(calls[10], r#"send //input[@name="visitor-first-name"] Bo"#);
        assert_eq!(
            calls[23],
            r#"send //input[@name="visitor-state-of-issuance"] CA"#
        );
        assert_eq!(calls[24], "submit visitors");
    }

    #[tokio::test]
    async fn failure_stops_the_sequence() {
        let driver = Recorder {
            fail_on: Some("resident-city"),
            ..Recorder::default()
        };
        let (r, v) = (resident(), visitor());
        let err = submit_permit(&driver, &quick_config(), &r, &v)
            .await
            .unwrap_err();
        assert!(matches!(err, Error::ElementNotFound(_)));

        let calls = driver.calls.into_inner();
        assert!(calls.last().unwrap().contains("resident-city"));
        assert!(!calls.iter().any(|c| c.starts_with("submit")));
        assert!(!calls.iter().any(|c| c.contains("visitor-")));
    }
}
