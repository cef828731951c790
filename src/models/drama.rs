use serde::{Deserialize, Serialize};

use crate::catalog::listing::Titled;
use crate::domain::{DramaId, GenreId};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Drama {
    pub id: DramaId,
    pub title: String,
    pub poster_url: String,
    pub synopsis: Option<String>,
    pub rating: Option<f64>,
    pub is_trending: bool,
    pub is_hot: bool,
    #[serde(default)]
    pub genre_ids: Vec<GenreId>,
    pub created_at: String,
}

impl Drama {
    #[must_use]
    pub fn has_genre(&self, genre: &GenreId) -> bool {
        self.genre_ids.contains(genre)
    }
}

impl Titled for Drama {
    fn title(&self) -> &str {
        &self.title
    }
}
