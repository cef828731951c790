use serde::{Deserialize, Deserializer};

use super::ValidationErrors;
use crate::catalog::media::extract_poster_url;
use crate::domain::GenreId;

pub const MIN_RATING: f64 = 0.0;
pub const MAX_RATING: f64 = 10.0;

/// Keeps "field absent" (`None`) apart from "field sent as null" (`Some(None)`).
fn nullable<'de, D, T>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Option::<T>::deserialize(deserializer).map(Some)
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct DramaForm {
    pub title: String,
    /// Either a plain URL or an image-host embed snippet.
    pub poster_url: String,
    #[serde(deserialize_with = "nullable")]
    pub synopsis: Option<Option<String>>,
    #[serde(deserialize_with = "nullable")]
    pub rating: Option<Option<f64>>,
    pub is_trending: Option<bool>,
    pub is_hot: Option<bool>,
    pub genre_ids: Option<Vec<GenreId>>,
}

/// Validated drama fields ready for the store.
///
/// On update, `None` leaves the stored column alone and `Some(None)` clears
/// it. On create, missing values are stored empty and missing flags as
/// `false`.
#[derive(Debug, Clone, PartialEq)]
pub struct DramaFields {
    pub title: String,
    pub poster_url: String,
    pub synopsis: Option<Option<String>>,
    pub rating: Option<Option<f64>>,
    pub is_trending: Option<bool>,
    pub is_hot: Option<bool>,
    pub genre_ids: Option<Vec<GenreId>>,
}

impl DramaForm {
    pub fn validate(self) -> Result<DramaFields, ValidationErrors> {
        let mut errors = ValidationErrors::default();

        let title = errors.required("title", &self.title, "Title is required");
        let poster = errors.required("posterUrl", &self.poster_url, "Poster URL is required");
        let poster_url = extract_poster_url(&poster);

        if let Some(Some(rating)) = self.rating
            && !(rating.is_finite() && (MIN_RATING..=MAX_RATING).contains(&rating))
        {
            errors.push("rating", "Rating must be between 0 and 10");
        }

        let genre_ids = self.genre_ids.map(|ids| {
            let mut unique: Vec<GenreId> = Vec::with_capacity(ids.len());
            for id in ids {
                if !id.as_str().trim().is_empty() && !unique.contains(&id) {
                    unique.push(id);
                }
            }
            unique
        });

        errors.finish(DramaFields {
            title,
            poster_url,
            // A blank synopsis clears the stored one.
            synopsis: self.synopsis.map(|synopsis| {
                synopsis
                    .map(|s| s.trim().to_string())
                    .filter(|s| !s.is_empty())
            }),
            rating: self.rating,
            is_trending: self.is_trending,
            is_hot: self.is_hot,
            genre_ids,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn form() -> DramaForm {
        DramaForm {
            title: "Moonlight Vow".to_string(),
            poster_url: "https://i.ibb.co/p.jpg".to_string(),
            ..Default::default()
        }
    }

    #[test]
    fn blank_title_and_poster_reported_together() {
        let err = DramaForm::default().validate().unwrap_err();
        assert!(err.has("title"));
        assert!(err.has("posterUrl"));
        assert_eq!(err.len(), 2);
    }

    #[test]
    fn rating_bounds() {
        for ok in [0.0, 7.5, 10.0] {
            let mut f = form();
            f.rating = Some(Some(ok));
            assert!(f.validate().is_ok(), "rating {ok} should pass");
        }
        for bad in [-0.1, 10.5, f64::NAN] {
            let mut f = form();
            f.rating = Some(Some(bad));
            assert!(f.validate().unwrap_err().has("rating"));
        }
    }

    #[test]
    fn embed_snippet_is_reduced() {
        let mut f = form();
        f.poster_url =
            r#"<a href="https://ibb.co/x"><img src="https://i.ibb.co/x/p.jpg" alt="p"></a>"#
                .to_string();
        assert_eq!(f.validate().unwrap().poster_url, "https://i.ibb.co/x/p.jpg");
    }

    #[test]
    fn genre_ids_deduplicated_in_order() {
        let mut f = form();
        f.genre_ids = Some(vec!["b".into(), "a".into(), "b".into(), "".into()]);
        let fields = f.validate().unwrap();
        assert_eq!(fields.genre_ids, Some(vec![GenreId::new("b"), GenreId::new("a")]));
    }

    #[test]
    fn missing_fields_deserialize_to_defaults() {
        let f: DramaForm = serde_json::from_str(r#"{"title":"X"}"#).unwrap();
        assert!(f.is_trending.is_none());
        assert!(f.is_hot.is_none());
        assert!(f.rating.is_none());
        assert!(f.genre_ids.is_none());
        assert!(f.validate().unwrap_err().has("posterUrl"));
    }

    #[test]
    fn null_is_distinct_from_absent() {
        let f: DramaForm = serde_json::from_str(
            r#"{"title":"X","posterUrl":"https://i.ibb.co/p.jpg","rating":null,"synopsis":"  "}"#,
        )
        .unwrap();
        assert_eq!(f.rating, Some(None));

        let fields = f.validate().unwrap();
        assert_eq!(fields.rating, Some(None));
        assert_eq!(fields.synopsis, Some(None));
        assert_eq!(fields.is_trending, None);

        let f: DramaForm =
            serde_json::from_str(r#"{"title":"X","posterUrl":"p","rating":9,"isHot":true}"#)
                .unwrap();
        let fields = f.validate().unwrap();
        assert_eq!(fields.rating, Some(Some(9.0)));
        assert_eq!(fields.is_hot, Some(true));
    }
}
