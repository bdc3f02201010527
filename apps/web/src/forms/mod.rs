//! Form validation and model binding for the three user-editable entities.
//!
//! Each form deserializes raw string fields and derives `validator::Validate`
//! for its per-field rules. `clean` trims the input, runs those rules plus
//! any checks that need outside data, and yields either the cleaned data for
//! the store or a `FieldErrors` map. Handlers keep the raw input next to its
//! errors in a `BoundForm` so an invalid submission is re-rendered with what
//! the user typed.

pub mod application;
pub mod company;
pub mod vacancy;

use std::borrow::Cow;
use std::collections::BTreeMap;

use serde::Serialize;
use serde_json::Value;
use validator::{ValidationError, ValidationErrors};

pub use application::ApplicationInput;
pub use company::{CompanyInput, CompanySubmission, LogoFormat, LogoUpload};
pub use vacancy::VacancyInput;

pub const REQUIRED: &str = "Обязательное поле.";
pub const INVALID_CHOICE: &str = "Выберите корректный вариант.";

/// Params key naming the field a struct-level error belongs to.
const FIELD_PARAM: &str = "field";

/// Field name → messages, serialized as a plain map for templates.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct FieldErrors(BTreeMap<String, Vec<String>>);

impl FieldErrors {
    pub fn add(&mut self, field: impl Into<String>, message: impl Into<String>) {
        self.0.entry(field.into()).or_default().push(message.into());
    }

    #[cfg(test)]
    pub fn get(&self, field: &str) -> Option<&[String]> {
        self.0.get(field).map(Vec::as_slice)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Ok when nothing was recorded, otherwise the collected errors.
    pub fn into_result<T>(self, value: impl FnOnce() -> T) -> Result<T, FieldErrors> {
        if self.is_empty() {
            Ok(value())
        } else {
            Err(self)
        }
    }
}

/// Raw submitted values plus their validation errors, as handed to templates.
#[derive(Debug, Clone, Default, Serialize)]
pub struct BoundForm<I> {
    pub values: I,
    pub errors: FieldErrors,
}

impl<I> BoundForm<I> {
    pub fn unbound(values: I) -> Self {
        Self {
            values,
            errors: FieldErrors::default(),
        }
    }

    pub fn with_errors(values: I, errors: FieldErrors) -> Self {
        Self { values, errors }
    }
}

impl From<ValidationErrors> for FieldErrors {
    fn from(errors: ValidationErrors) -> Self {
        let mut out = FieldErrors::default();
        for (field, field_errors) in errors.field_errors() {
            for error in field_errors {
                // Struct-level (schema) errors name their target field in params.
                let target = error
                    .params
                    .get(FIELD_PARAM)
                    .and_then(Value::as_str)
                    .map(str::to_string)
                    .unwrap_or_else(|| field.to_string());
                out.add(target, message_for(error));
            }
        }
        out
    }
}

/// Runs the derived rules, collecting failures as `FieldErrors`.
fn run_rules<T: validator::Validate>(input: &T) -> FieldErrors {
    match input.validate() {
        Ok(()) => FieldErrors::default(),
        Err(errors) => errors.into(),
    }
}

fn message_for(error: &ValidationError) -> String {
    if let Some(message) = &error.message {
        return message.to_string();
    }

    match error.code.as_ref() {
        "length" => {
            let value = error
                .params
                .get("value")
                .and_then(Value::as_str)
                .unwrap_or_default();
            if value.is_empty() {
                return REQUIRED.to_string();
            }
            let len = value.chars().count();
            match error.params.get("max").and_then(Value::as_u64) {
                Some(max) => format!(
                    "Убедитесь, что это значение содержит не более {max} символов (сейчас {len})."
                ),
                None => REQUIRED.to_string(),
            }
        }
        _ => "Введите правильное значение.".to_string(),
    }
}

/// A validation error carrying its display message.
fn invalid(code: &'static str, message: &'static str) -> ValidationError {
    let mut error = ValidationError::new(code);
    error.message = Some(Cow::Borrowed(message));
    error
}

/// A struct-level error attached to `field`.
fn invalid_field(field: &'static str, code: &'static str, message: &'static str) -> ValidationError {
    let mut error = invalid(code, message);
    error.add_param(Cow::Borrowed(FIELD_PARAM), &field);
    error
}

/// Custom rule for integer fields held as text. Blank values are left to the
/// `length` rule.
fn non_negative_int(raw: &str) -> Result<(), ValidationError> {
    if raw.is_empty() {
        return Ok(());
    }
    match raw.parse::<i32>() {
        Ok(n) if n >= 0 => Ok(()),
        Ok(_) => Err(invalid(
            "negative",
            "Убедитесь, что это значение больше либо равно 0.",
        )),
        Err(_) => Err(invalid("not_integer", "Введите целое число.")),
    }
}

/// Parses a value that already passed `non_negative_int`.
fn parsed_int(raw: &str) -> Option<i32> {
    raw.parse::<i32>().ok().filter(|n| *n >= 0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use validator::Validate;

    #[derive(Validate)]
    struct Sample {
        #[validate(length(min = 1, max = 10))]
        name: String,
        #[validate(length(min = 1), custom(function = "non_negative_int"))]
        count: String,
    }

    fn sample(name: &str, count: &str) -> FieldErrors {
        run_rules(&Sample {
            name: name.to_string(),
            count: count.to_string(),
        })
    }

    #[test]
    fn test_field_errors_accumulate_per_field() {
        let mut errors = FieldErrors::default();
        errors.add("name", "first");
        errors.add("name", "second");
        errors.add("location", "third");
        assert_eq!(errors.get("name").map(<[String]>::len), Some(2));
        assert_eq!(errors.get("location").map(<[String]>::len), Some(1));
        assert!(errors.get("logo").is_none());
    }

    #[test]
    fn test_into_result_ok_when_empty() {
        let result = FieldErrors::default().into_result(|| 7);
        assert_eq!(result, Ok(7));
    }

    #[test]
    fn test_blank_field_reports_required() {
        let errors = sample("", "");
        assert_eq!(errors.get("name"), Some(&[REQUIRED.to_string()][..]));
        assert_eq!(errors.get("count"), Some(&[REQUIRED.to_string()][..]));
    }

    #[test]
    fn test_length_counts_characters_not_bytes() {
        // Ten characters, eighteen bytes.
        assert!(sample("Компания12", "1").is_empty());

        let errors = sample("Компания123", "1");
        assert_eq!(
            errors.get("name"),
            Some(
                &["Убедитесь, что это значение содержит не более 10 символов (сейчас 11).".to_string()][..]
            )
        );
    }

    #[test]
    fn test_non_negative_int() {
        assert!(sample("n", "42").is_empty());
        assert_eq!(
            sample("n", "-1").get("count"),
            Some(&["Убедитесь, что это значение больше либо равно 0.".to_string()][..])
        );
        assert_eq!(
            sample("n", "many").get("count"),
            Some(&["Введите целое число.".to_string()][..])
        );
        assert_eq!(parsed_int("42"), Some(42));
        assert_eq!(parsed_int("-1"), None);
    }

    #[test]
    fn test_struct_level_error_lands_on_named_field() {
        let mut errors = ValidationErrors::new();
        errors.add("__all__", invalid_field("salary_max", "order", "bad order"));
        let errors = FieldErrors::from(errors);
        assert_eq!(errors.get("salary_max"), Some(&["bad order".to_string()][..]));
        assert!(errors.get("__all__").is_none());
    }

    #[test]
    fn test_errors_serialize_as_map() {
        let mut errors = FieldErrors::default();
        errors.add("title", REQUIRED);
        let json = serde_json::to_value(&errors).expect("serializes");
        assert_eq!(json, serde_json::json!({ "title": [REQUIRED] }));
    }
}
