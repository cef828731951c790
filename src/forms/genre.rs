use serde::Deserialize;

use super::ValidationErrors;

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct GenreForm {
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenreFields {
    pub name: String,
}

impl GenreForm {
    pub fn validate(self) -> Result<GenreFields, ValidationErrors> {
        let mut errors = ValidationErrors::default();
        let name = errors.required("name", &self.name, "Name is required");
        errors.finish(GenreFields { name })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn name_required() {
        assert!(GenreForm::default().validate().unwrap_err().has("name"));
        let fields = GenreForm {
            name: " Romance ".to_string(),
        }
        .validate()
        .unwrap();
        assert_eq!(fields.name, "Romance");
    }
}
