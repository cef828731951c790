pub use super::dramas::Entity as Dramas;
pub use super::genres::Entity as Genres;
pub use super::parts::Entity as Parts;
pub use super::users::Entity as Users;
