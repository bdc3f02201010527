use serde::{Deserialize, Serialize};
use validator::{Validate, ValidationError};

use super::{invalid, run_rules, FieldErrors};
use crate::models::ApplicationData;

const MIN_PHONE_DIGITS: usize = 5;

/// Response form posted from the vacancy detail page.
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
#[serde(default)]
pub struct ApplicationInput {
    #[validate(length(min = 1, max = 100))]
    pub written_username: String,
    #[validate(length(min = 1, max = 30), custom(function = "validate_phone"))]
    pub written_phone: String,
    #[validate(length(min = 1))]
    pub written_cover_letter: String,
}

impl ApplicationInput {
    pub fn clean(&self) -> Result<ApplicationData, FieldErrors> {
        let input = Self {
            written_username: self.written_username.trim().to_string(),
            written_phone: self.written_phone.trim().to_string(),
            written_cover_letter: self.written_cover_letter.trim().to_string(),
        };

        run_rules(&input).into_result(|| ApplicationData {
            written_username: input.written_username,
            written_phone: input.written_phone,
            written_cover_letter: input.written_cover_letter,
        })
    }
}

fn validate_phone(phone: &str) -> Result<(), ValidationError> {
    if phone.is_empty() {
        return Ok(());
    }
    let allowed = phone
        .chars()
        .all(|c| c.is_ascii_digit() || matches!(c, ' ' | '+' | '-' | '(' | ')'));
    let digits = phone.chars().filter(char::is_ascii_digit).count();
    if allowed && digits >= MIN_PHONE_DIGITS {
        Ok(())
    } else {
        Err(invalid("phone", "Введите корректный номер телефона."))
    }
}
