//! Pure catalog transformations: search and paging, grouping parts under
//! dramas, and link normalization.

pub mod grouping;
pub mod listing;
pub mod media;

pub use grouping::{Child, Group, group_by_parent, sort_by_sequence};
pub use listing::{EmptyState, ListingState, Page, Titled, search_page};
