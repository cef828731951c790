pub mod prelude;

pub mod dramas;
pub mod genres;
pub mod parts;
pub mod users;
