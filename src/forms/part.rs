use serde::Deserialize;

use super::ValidationErrors;
use crate::catalog::media::{embeddable_video_url, is_web_url};
use crate::domain::DramaId;

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct PartForm {
    pub drama_id: String,
    pub part_number: Option<i64>,
    pub title: String,
    pub video_url: String,
    pub duration: String,
    pub description: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PartFields {
    pub drama_id: DramaId,
    pub part_number: i32,
    pub title: String,
    /// Already rewritten to an embeddable link.
    pub video_url: String,
    pub duration: String,
    pub description: String,
}

impl PartForm {
    pub fn validate(self) -> Result<PartFields, ValidationErrors> {
        let mut errors = ValidationErrors::default();

        let drama_id = errors.required("dramaId", &self.drama_id, "Drama is required");

        let part_number = match self.part_number {
            None => {
                errors.push("partNumber", "Part number is required");
                0
            }
            Some(n) => match i32::try_from(n) {
                Ok(n) if n >= 1 => n,
                _ => {
                    errors.push("partNumber", "Part number must be at least 1");
                    0
                }
            },
        };

        let title = errors.required("title", &self.title, "Title is required");

        let video_url = self.video_url.trim();
        if !is_web_url(video_url) {
            errors.push("videoUrl", "Must be a valid URL");
        }

        let duration = errors.required("duration", &self.duration, "Duration is required");
        let description =
            errors.required("description", &self.description, "Description is required");

        errors.finish(PartFields {
            drama_id: DramaId::new(drama_id),
            part_number,
            title,
            video_url: embeddable_video_url(video_url),
            duration,
            description,
        })
    }
}
