//! Domain types for the drama catalog with strong typing.
//!
//! Record ids are opaque strings assigned by the store. Each collection gets
//! its own newtype so a part id can never be passed where a drama id is
//! expected.

pub mod events;

use serde::{Deserialize, Serialize};
use std::fmt;

macro_rules! string_id {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(String);

        impl $name {
            #[must_use]
            pub fn new(id: impl Into<String>) -> Self {
                Self(id.into())
            }

            /// Generates a fresh random id for a record about to be created.
            #[must_use]
            pub fn generate() -> Self {
                Self(uuid::Uuid::new_v4().to_string())
            }

            #[must_use]
            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(&self.0)
            }
        }

        impl From<String> for $name {
            fn from(id: String) -> Self {
                Self(id)
            }
        }

        impl From<&str> for $name {
            fn from(id: &str) -> Self {
                Self(id.to_string())
            }
        }

        impl From<$name> for String {
            fn from(id: $name) -> Self {
                id.0
            }
        }
    };
}

string_id!(
    /// Unique identifier of a drama in the `dramas` collection.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use cdrama::domain::DramaId;
    ///
    /// let id = DramaId::new("abc");
    /// assert_eq!(id.as_str(), "abc");
    /// assert_eq!(id.to_string(), "abc");
    /// ```
    DramaId
);

string_id!(
    /// Unique identifier of a genre in the `genres` collection.
    GenreId
);

string_id!(
    /// Unique identifier of a part in the `parts` collection.
    PartId
);

/// The named collections of the catalog store.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Collection {
    Dramas,
    Genres,
    Parts,
}

impl Collection {
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Dramas => "dramas",
            Self::Genres => "genres",
            Self::Parts => "parts",
        }
    }

    /// Singular, human readable name used in notifications.
    #[must_use]
    pub const fn label(&self) -> &'static str {
        match self {
            Self::Dramas => "Drama",
            Self::Genres => "Genre",
            Self::Parts => "Part",
        }
    }
}

impl fmt::Display for Collection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Kind of mutation applied to a collection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WriteKind {
    Create,
    Update,
    Delete,
}

impl WriteKind {
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Create => "create",
            Self::Update => "update",
            Self::Delete => "delete",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn drama_id_conversions() {
        let id = DramaId::new("d-1");
        assert_eq!(id.as_str(), "d-1");
        assert_eq!(id.to_string(), "d-1");
        assert_eq!(String::from(id.clone()), "d-1");
        assert_eq!(DramaId::from("d-1"), id);
    }

    #[test]
    fn generated_ids_are_unique() {
        let a = PartId::generate();
        let b = PartId::generate();
        assert_ne!(a, b);
        assert_eq!(a.as_str().len(), 36);
    }

    #[test]
    fn ids_serialize_as_plain_strings() {
        let id = GenreId::new("romance");
        let json = serde_json::to_string(&id).unwrap();
        assert_eq!(json, "\"romance\"");
        let back: GenreId = serde_json::from_str(&json).unwrap();
        assert_eq!(back, id);
    }

    #[test]
    fn collection_names_match_store() {
        assert_eq!(Collection::Dramas.as_str(), "dramas");
        assert_eq!(Collection::Genres.to_string(), "genres");
        assert_eq!(Collection::Parts.label(), "Part");
    }
}
