use serde::{Deserialize, Serialize};

use crate::catalog::grouping::Child;
use crate::catalog::listing::Titled;
use crate::domain::{DramaId, PartId};

/// A video entry belonging to one drama, ordered by `part_number`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Part {
    pub id: PartId,
    pub drama_id: DramaId,
    pub part_number: i32,
    pub title: String,
    pub video_url: String,
    pub duration: String,
    pub description: String,
    pub created_at: String,
}

impl Child for Part {
    type ParentId = DramaId;

    fn parent_id(&self) -> &DramaId {
        &self.drama_id
    }

    fn sequence_number(&self) -> i32 {
        self.part_number
    }
}

impl Titled for Part {
    fn title(&self) -> &str {
        &self.title
    }
}
