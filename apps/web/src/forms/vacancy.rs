use serde::{Deserialize, Serialize};
use validator::{Validate, ValidationError};

use super::{
    invalid_field, non_negative_int, parsed_int, run_rules, FieldErrors, INVALID_CHOICE,
};
use crate::models::{Specialty, Vacancy, VacancyData};

/// Vacancy form fields. `specialty` holds the selected specialty id, or is
/// empty when no specialty was chosen.
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
#[serde(default)]
#[validate(schema(function = "validate_salary_range", skip_on_field_errors = false))]
pub struct VacancyInput {
    #[validate(length(min = 1, max = 100))]
    pub title: String,
    pub specialty: String,
    pub skills: String,
    #[validate(length(min = 1))]
    pub description: String,
    #[validate(length(min = 1), custom(function = "non_negative_int"))]
    pub salary_min: String,
    #[validate(length(min = 1), custom(function = "non_negative_int"))]
    pub salary_max: String,
}

impl VacancyInput {
    pub fn from_vacancy(vacancy: &Vacancy) -> Self {
        Self {
            title: vacancy.title.clone(),
            specialty: vacancy
                .specialty_id
                .map(|id| id.to_string())
                .unwrap_or_default(),
            skills: vacancy.skills.clone(),
            description: vacancy.description.clone(),
            salary_min: vacancy.salary_min.to_string(),
            salary_max: vacancy.salary_max.to_string(),
        }
    }

    /// Validates against the specialties offered in the select box.
    pub fn clean(&self, choices: &[Specialty]) -> Result<VacancyData, FieldErrors> {
        let input = Self {
            title: self.title.trim().to_string(),
            specialty: self.specialty.trim().to_string(),
            skills: self.skills.trim().to_string(),
            description: self.description.trim().to_string(),
            salary_min: self.salary_min.trim().to_string(),
            salary_max: self.salary_max.trim().to_string(),
        };
        let mut errors = run_rules(&input);

        let specialty_id = match input.specialty.as_str() {
            "" => None,
            raw => match raw.parse::<i64>() {
                Ok(id) if choices.iter().any(|s| s.id == id) => Some(id),
                _ => {
                    errors.add("specialty", INVALID_CHOICE);
                    None
                }
            },
        };

        errors.into_result(|| VacancyData {
            specialty_id,
            salary_min: parsed_int(&input.salary_min).unwrap_or_default(),
            salary_max: parsed_int(&input.salary_max).unwrap_or_default(),
            title: input.title,
            skills: input.skills,
            description: input.description,
        })
    }
}

fn validate_salary_range(input: &VacancyInput) -> Result<(), ValidationError> {
    match (parsed_int(&input.salary_min), parsed_int(&input.salary_max)) {
        (Some(min), Some(max)) if min > max => Err(invalid_field(
            "salary_max",
            "salary_range",
            "Максимальная зарплата не может быть меньше минимальной.",
        )),
        _ => Ok(()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::forms::REQUIRED;

    fn specialties() -> Vec<Specialty> {
        vec![
            Specialty {
                id: 1,
                code: "backend".to_string(),
                title: "Бэкенд".to_string(),
                picture: None,
            },
            Specialty {
                id: 2,
                code: "frontend".to_string(),
                title: "Фронтенд".to_string(),
                picture: None,
            },
        ]
    }

    fn input(specialty: &str, min: &str, max: &str) -> VacancyInput {
        VacancyInput {
            title: "Rust developer".to_string(),
            specialty: specialty.to_string(),
            skills: "Rust, SQL".to_string(),
            description: "Build the job board".to_string(),
            salary_min: min.to_string(),
            salary_max: max.to_string(),
        }
    }

    #[test]
    fn test_valid_vacancy_with_specialty() {
        let data = input("1", "100000", "150000")
            .clean(&specialties())
            .expect("valid");
        assert_eq!(data.specialty_id, Some(1));
        assert_eq!(data.salary_min, 100000);
        assert_eq!(data.salary_max, 150000);
    }

    #[test]
    fn test_specialty_is_optional() {
        let data = input("", "0", "0").clean(&specialties()).expect("valid");
        assert_eq!(data.specialty_id, None);
    }

    #[test]
    fn test_unknown_specialty_rejected() {
        let errors = input("99", "1", "2").clean(&specialties()).unwrap_err();
        assert_eq!(errors.get("specialty"), Some(&[INVALID_CHOICE.to_string()][..]));

        let errors = input("backend", "1", "2").clean(&specialties()).unwrap_err();
        assert!(errors.get("specialty").is_some());
    }

    #[test]
    fn test_salary_range_order() {
        let errors = input("", "200", "100").clean(&specialties()).unwrap_err();
        assert_eq!(
            errors.get("salary_max"),
            Some(&["Максимальная зарплата не может быть меньше минимальной.".to_string()][..])
        );
        assert!(errors.get("salary_min").is_none());
        assert!(input("", "100", "100").clean(&specialties()).is_ok());
    }

    #[test]
    fn test_required_fields() {
        let errors = VacancyInput::default().clean(&specialties()).unwrap_err();
        for field in ["title", "description", "salary_min", "salary_max"] {
            assert_eq!(errors.get(field), Some(&[REQUIRED.to_string()][..]), "{field}");
        }
        assert!(errors.get("skills").is_none());
        assert!(errors.get("specialty").is_none());
    }
}
