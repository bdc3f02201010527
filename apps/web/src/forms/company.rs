use axum::extract::Multipart;
use bytes::Bytes;
use serde::{Deserialize, Serialize};
use validator::Validate;

use super::{non_negative_int, parsed_int, run_rules, FieldErrors};
use crate::errors::AppError;
use crate::models::{Company, CompanyData};

/// Text fields of the company profile form.
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
#[serde(default)]
pub struct CompanyInput {
    #[validate(length(min = 1, max = 64))]
    pub name: String,
    #[validate(length(min = 1, max = 64))]
    pub location: String,
    pub description: String,
    #[validate(length(min = 1), custom(function = "non_negative_int"))]
    pub employee_count: String,
}

impl CompanyInput {
    /// Pre-fills the edit form from the stored record.
    pub fn from_company(company: &Company) -> Self {
        Self {
            name: company.name.clone(),
            location: company.location.clone(),
            description: company.description.clone(),
            employee_count: company.employee_count.to_string(),
        }
    }

    fn trimmed(&self) -> Self {
        Self {
            name: self.name.trim().to_string(),
            location: self.location.trim().to_string(),
            description: self.description.trim().to_string(),
            employee_count: self.employee_count.trim().to_string(),
        }
    }
}

/// Raster image formats accepted as logos. The format is read from the file
/// signature; the client-declared content type is ignored.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogoFormat {
    Png,
    Jpeg,
    Gif,
    Webp,
}

impl LogoFormat {
    pub fn detect(data: &[u8]) -> Option<Self> {
        if data.starts_with(b"\x89PNG\r\n\x1a\n") {
            Some(Self::Png)
        } else if data.starts_with(&[0xFF, 0xD8, 0xFF]) {
            Some(Self::Jpeg)
        } else if data.starts_with(b"GIF87a") || data.starts_with(b"GIF89a") {
            Some(Self::Gif)
        } else if data.len() >= 12 && &data[..4] == b"RIFF" && &data[8..12] == b"WEBP" {
            Some(Self::Webp)
        } else {
            None
        }
    }

    pub fn content_type(self) -> &'static str {
        match self {
            Self::Png => "image/png",
            Self::Jpeg => "image/jpeg",
            Self::Gif => "image/gif",
            Self::Webp => "image/webp",
        }
    }

    pub fn extension(self) -> &'static str {
        match self {
            Self::Png => "png",
            Self::Jpeg => "jpg",
            Self::Gif => "gif",
            Self::Webp => "webp",
        }
    }
}

/// An uploaded logo file, held in memory until it is stored.
#[derive(Debug, Clone)]
pub struct LogoUpload {
    pub file_name: String,
    pub data: Bytes,
}

impl LogoUpload {
    pub fn format(&self) -> Option<LogoFormat> {
        LogoFormat::detect(&self.data)
    }
}

/// A multipart company form: the text fields plus an optional logo file.
#[derive(Debug, Clone, Default)]
pub struct CompanySubmission {
    pub input: CompanyInput,
    pub logo: Option<LogoUpload>,
}

impl CompanySubmission {
    pub async fn from_multipart(mut multipart: Multipart) -> Result<Self, AppError> {
        let mut submission = CompanySubmission::default();

        while let Some(field) = multipart
            .next_field()
            .await
            .map_err(|e| AppError::BadRequest(format!("Malformed form data: {e}")))?
        {
            let Some(name) = field.name().map(str::to_owned) else {
                continue;
            };

            if name == "logo" {
                let file_name = field.file_name().unwrap_or_default().to_string();
                let data = field
                    .bytes()
                    .await
                    .map_err(|e| AppError::BadRequest(format!("Failed to read logo: {e}")))?;
                // Browsers send an empty part when no file was chosen.
                if !file_name.is_empty() && !data.is_empty() {
                    submission.logo = Some(LogoUpload { file_name, data });
                }
                continue;
            }

            let value = field
                .text()
                .await
                .map_err(|e| AppError::BadRequest(format!("Failed to read field '{name}': {e}")))?;
            match name.as_str() {
                "name" => submission.input.name = value,
                "location" => submission.input.location = value,
                "description" => submission.input.description = value,
                "employee_count" => submission.input.employee_count = value,
                _ => {}
            }
        }

        Ok(submission)
    }

    /// Validates the submission. The returned data never carries a logo key;
    /// the handler sets it once the upload has been stored.
    pub fn clean(&self, max_logo_bytes: usize) -> Result<CompanyData, FieldErrors> {
        let input = self.input.trimmed();
        let mut errors = run_rules(&input);

        if let Some(logo) = &self.logo {
            if logo.format().is_none() {
                errors.add(
                    "logo",
                    "Загрузите правильное изображение. Файл, который вы загрузили, поврежден или не является изображением.",
                );
            }
            if logo.data.len() > max_logo_bytes {
                errors.add(
                    "logo",
                    format!("Размер файла не должен превышать {max_logo_bytes} байт."),
                );
            }
        }

        errors.into_result(|| CompanyData {
            employee_count: parsed_int(&input.employee_count).unwrap_or_default(),
            name: input.name,
            location: input.location,
            description: input.description,
            logo: None,
        })
    }
}
