pub mod drama;
pub mod genre;
pub mod part;
pub mod user;
