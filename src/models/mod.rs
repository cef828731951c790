pub mod drama;
pub mod genre;
pub mod part;

pub use drama::Drama;
pub use genre::Genre;
pub use part::Part;
