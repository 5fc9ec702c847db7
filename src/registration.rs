//! Form validation and record construction.
//!
//! [`Registrar::register`] turns an [`OfficerForm`] into a
//! [`HouseOfficerRecord`] or a list of field-scoped errors. It never touches
//! the store; appending the record is the caller's next step.

use std::fmt;

use chrono::{Local, NaiveDate};
use serde::Serialize;

use crate::{
    officer::{HouseOfficerRecord, OfficerForm, derive_sign_out},
    types::{Gender, OfficerId, Unit},
};

/// Minimum character count for a full name.
pub const MIN_NAME_LEN: usize = 2;
/// Minimum character count for a presentation topic.
pub const MIN_TOPIC_LEN: usize = 5;

/// Source of "today" for date validation.
pub trait Clock: Send {
    /// Current calendar date.
    fn today(&self) -> NaiveDate;
}

/// Wall clock in the local time zone.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn today(&self) -> NaiveDate {
        Local::now().date_naive()
    }
}

/// Clock pinned to one date.
#[derive(Debug, Clone, Copy)]
pub struct FixedClock(pub NaiveDate);

impl Clock for FixedClock {
    fn today(&self) -> NaiveDate {
        self.0
    }
}

/// Form field a validation error refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum Field {
    /// Full name input.
    FullName,
    /// Gender select.
    Gender,
    /// Sign-in date picker.
    DateSignedIn,
    /// Unit select.
    UnitAssigned,
    /// Presentation topic input.
    ClinicalPresentationTopic,
    /// Presentation date picker.
    ClinicalPresentationDate,
}

impl Field {
    /// Form field name as submitted.
    pub fn as_str(&self) -> &'static str {
        match self {
            Field::FullName => "fullName",
            Field::Gender => "gender",
            Field::DateSignedIn => "dateSignedIn",
            Field::UnitAssigned => "unitAssigned",
            Field::ClinicalPresentationTopic => "clinicalPresentationTopic",
            Field::ClinicalPresentationDate => "clinicalPresentationDate",
        }
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One rejected field and the message to show beside it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, thiserror::Error)]
#[error("{field}: {message}")]
pub struct FieldError {
    /// Offending field.
    pub field: Field,
    /// User-facing message.
    pub message: String,
}

impl FieldError {
    fn new(field: Field, message: impl Into<String>) -> Self {
        Self {
            field,
            message: message.into(),
        }
    }
}

/// Every field-scoped failure from one submission, in form order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ValidationErrors {
    errors: Vec<FieldError>,
}

impl ValidationErrors {
    /// All field errors.
    pub fn errors(&self) -> &[FieldError] {
        &self.errors
    }

    /// First error reported for `field`, if any.
    pub fn get(&self, field: Field) -> Option<&FieldError> {
        self.errors.iter().find(|e| e.field == field)
    }

    /// True when `field` was rejected.
    pub fn has(&self, field: Field) -> bool {
        self.get(field).is_some()
    }

    /// Fields that failed, in form order.
    pub fn fields(&self) -> Vec<Field> {
        self.errors.iter().map(|e| e.field).collect()
    }
}

impl fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} invalid field(s)", self.errors.len())?;
        for err in &self.errors {
            write!(f, "; {err}")?;
        }
        Ok(())
    }
}

impl std::error::Error for ValidationErrors {}

/// Validates submissions against a [`Clock`] and builds records.
pub struct Registrar<C: Clock = SystemClock> {
    clock: C,
}

impl Default for Registrar<SystemClock> {
    fn default() -> Self {
        Self::new(SystemClock)
    }
}

impl<C: Clock> Registrar<C> {
    /// Creates a registrar that treats `clock.today()` as "now".
    pub fn new(clock: C) -> Self {
        Self { clock }
    }

    /// Validates `form` and, when every field passes, returns a new record
    /// with a fresh id and derived sign-out date.
    pub fn register(&self, form: &OfficerForm) -> Result<HouseOfficerRecord, ValidationErrors> {
        let today = self.clock.today();
        let mut errors = Vec::new();

        if form.full_name.chars().count() < MIN_NAME_LEN {
            errors.push(FieldError::new(
                Field::FullName,
                "Full name must be at least 2 characters",
            ));
        }

        let gender = match form.gender.as_deref() {
            None => {
                errors.push(FieldError::new(Field::Gender, "Please select a gender"));
                None
            }
            Some(raw) => match raw.parse::<Gender>() {
                Ok(g) => Some(g),
                Err(_) => {
                    errors.push(FieldError::new(
                        Field::Gender,
                        "Gender must be either Male or Female",
                    ));
                    None
                }
            },
        };

        let signed_in = match form.date_signed_in {
            None => {
                errors.push(FieldError::new(
                    Field::DateSignedIn,
                    "Please pick the date signed in",
                ));
                None
            }
            Some(date) if date > today => {
                errors.push(FieldError::new(
                    Field::DateSignedIn,
                    "Date signed in cannot be in the future",
                ));
                None
            }
            Some(date) => match derive_sign_out(date) {
                Some(sign_out) => Some((date, sign_out)),
                None => {
                    errors.push(FieldError::new(
                        Field::DateSignedIn,
                        "Expected sign-out date is out of range",
                    ));
                    None
                }
            },
        };

        let unit = match form.unit_assigned.as_deref() {
            None | Some("") => {
                errors.push(FieldError::new(Field::UnitAssigned, "Please select a unit"));
                None
            }
            Some(raw) => match raw.parse::<Unit>() {
                Ok(u) => Some(u),
                Err(_) => {
                    errors.push(FieldError::new(
                        Field::UnitAssigned,
                        format!("Unknown unit: {raw}"),
                    ));
                    None
                }
            },
        };

        if form.clinical_presentation_topic.chars().count() < MIN_TOPIC_LEN {
            errors.push(FieldError::new(
                Field::ClinicalPresentationTopic,
                "Topic must be at least 5 characters",
            ));
        }

        let presentation = match form.clinical_presentation_date {
            None => {
                errors.push(FieldError::new(
                    Field::ClinicalPresentationDate,
                    "Please pick the clinical presentation date",
                ));
                None
            }
            // Compared against the picked sign-in date even when that date
            // itself was rejected; only a missing sign-in falls back to today.
            Some(date) => match form.date_signed_in {
                Some(sign_in) if date < sign_in => {
                    errors.push(FieldError::new(
                        Field::ClinicalPresentationDate,
                        "Presentation date cannot be before the date signed in",
                    ));
                    None
                }
                None if date < today => {
                    errors.push(FieldError::new(
                        Field::ClinicalPresentationDate,
                        "Presentation date cannot be in the past",
                    ));
                    None
                }
                _ => Some(date),
            },
        };

        match (gender, signed_in, unit, presentation) {
            (Some(gender), Some((date_signed_in, sign_out)), Some(unit_assigned), Some(presentation_date))
                if errors.is_empty() =>
            {
                let record = HouseOfficerRecord {
                    id: OfficerId::new_v4(),
                    full_name: form.full_name.clone(),
                    gender,
                    date_signed_in,
                    unit_assigned,
                    clinical_presentation_topic: form.clinical_presentation_topic.clone(),
                    clinical_presentation_date: presentation_date,
                    expected_sign_out_date: sign_out,
                };
                tracing::debug!(id = %record.id, unit = %record.unit_assigned, "registration accepted");
                Ok(record)
            }
            _ => {
                tracing::debug!(failed = errors.len(), "registration rejected");
                Err(ValidationErrors { errors })
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn d(y: i32, m: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, day).expect("valid date")
    }

    fn registrar() -> Registrar<FixedClock> {
        Registrar::new(FixedClock(d(2025, 3, 1)))
    }

    fn valid_form() -> OfficerForm {
        OfficerForm {
            full_name: "Jane Okoye".to_string(),
            gender: Some("Female".to_string()),
            date_signed_in: Some(d(2025, 1, 15)),
            unit_assigned: Some("Nephrology".to_string()),
            clinical_presentation_topic: "Acute Kidney Injury Review".to_string(),
            clinical_presentation_date: Some(d(2025, 2, 1)),
        }
    }

    #[test]
    fn valid_form_builds_record_with_derived_sign_out() {
        let rec = registrar().register(&valid_form()).expect("valid");
        assert_eq!(rec.full_name, "Jane Okoye");
        assert_eq!(rec.gender, Gender::Female);
        assert_eq!(rec.unit_assigned, Unit::Nephrology);
        assert_eq!(rec.expected_sign_out_date, d(2025, 4, 15));
    }

    #[test]
    fn each_registration_gets_a_fresh_id() {
        let r = registrar();
        let a = r.register(&valid_form()).expect("a");
        let b = r.register(&valid_form()).expect("b");
        assert_ne!(a.id, b.id);
    }

    #[test]
    fn empty_form_reports_every_field() {
        let errs = registrar().register(&OfficerForm::default()).unwrap_err();
        assert_eq!(
            errs.fields(),
            vec![
                Field::FullName,
                Field::Gender,
                Field::DateSignedIn,
                Field::UnitAssigned,
                Field::ClinicalPresentationTopic,
                Field::ClinicalPresentationDate,
            ]
        );
    }

    #[test]
    fn short_name_and_topic_are_rejected() {
        let form = OfficerForm {
            full_name: "J".to_string(),
            clinical_presentation_topic: "AKI".to_string(),
            ..valid_form()
        };
        let errs = registrar().register(&form).unwrap_err();
        assert_eq!(
            errs.fields(),
            vec![Field::FullName, Field::ClinicalPresentationTopic]
        );
    }

    #[test]
    fn future_sign_in_is_rejected() {
        let form = OfficerForm {
            date_signed_in: Some(d(2025, 3, 2)),
            clinical_presentation_date: Some(d(2025, 3, 10)),
            ..valid_form()
        };
        let errs = registrar().register(&form).unwrap_err();
        assert_eq!(errs.fields(), vec![Field::DateSignedIn]);
    }

    #[test]
    fn sign_in_too_late_for_a_sign_out_date_is_a_field_error() {
        let last = NaiveDate::MAX - chrono::Days::new(10);
        let form = OfficerForm {
            date_signed_in: Some(last),
            clinical_presentation_date: Some(last),
            ..valid_form()
        };
        let errs = Registrar::new(FixedClock(last)).register(&form).unwrap_err();
        assert_eq!(errs.fields(), vec![Field::DateSignedIn]);
    }

    #[test]
    fn sign_in_today_is_accepted() {
        let form = OfficerForm {
            date_signed_in: Some(d(2025, 3, 1)),
            clinical_presentation_date: Some(d(2025, 3, 1)),
            ..valid_form()
        };
        assert!(registrar().register(&form).is_ok());
    }

    #[test]
    fn presentation_before_sign_in_is_rejected() {
        let form = OfficerForm {
            clinical_presentation_date: Some(d(2025, 1, 14)),
            ..valid_form()
        };
        let errs = registrar().register(&form).unwrap_err();
        assert!(errs.has(Field::ClinicalPresentationDate));
        assert_eq!(errs.errors().len(), 1);
    }

    #[test]
    fn presentation_in_past_is_allowed_when_after_sign_in() {
        // Today is 2025-03-01; the presentation already happened.
        let rec = registrar().register(&valid_form()).expect("valid");
        assert_eq!(rec.clinical_presentation_date, d(2025, 2, 1));
    }

    #[test]
    fn without_sign_in_presentation_is_checked_against_today() {
        let form = OfficerForm {
            date_signed_in: None,
            clinical_presentation_date: Some(d(2025, 2, 1)),
            ..valid_form()
        };
        let errs = registrar().register(&form).unwrap_err();
        assert_eq!(
            errs.fields(),
            vec![Field::DateSignedIn, Field::ClinicalPresentationDate]
        );
    }

    #[test]
    fn unknown_unit_and_gender_are_rejected() {
        let form = OfficerForm {
            gender: Some("male".to_string()),
            unit_assigned: Some("Cardiology 3".to_string()),
            ..valid_form()
        };
        let errs = registrar().register(&form).unwrap_err();
        assert_eq!(errs.fields(), vec![Field::Gender, Field::UnitAssigned]);
        assert_eq!(
            errs.get(Field::UnitAssigned).map(|e| e.message.as_str()),
            Some("Unknown unit: Cardiology 3")
        );
    }
}
