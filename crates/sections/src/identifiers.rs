//! Type-safe identifiers for subway entities.
//!
//! Identifiers wrap the numeric ids handed over by the persistence layer.
//! They are `Copy`, so passing them around never allocates.

use std::fmt;

macro_rules! impl_identifier {
    ($name:ident) => {
        #[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
        #[cfg_attr(
            feature = "serde",
            derive(serde::Serialize, serde::Deserialize),
            serde(transparent)
        )]
        pub struct $name(u64);

        impl $name {
            pub const fn new(id: u64) -> Self {
                Self(id)
            }

            pub const fn get(self) -> u64 {
                self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl From<u64> for $name {
            fn from(id: u64) -> Self {
                Self::new(id)
            }
        }

        impl From<$name> for u64 {
            fn from(id: $name) -> Self {
                id.0
            }
        }
    };
}

impl_identifier!(StationIdentifier);
impl_identifier!(LineIdentifier);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_identifier_equality() {
        let id1 = StationIdentifier::new(123);
        let id2 = StationIdentifier::new(123);
        let id3 = id1;

        assert_eq!(id1, id2);
        assert_eq!(id1, id3);
        assert_ne!(id1, StationIdentifier::new(124));
    }

    #[test]
    fn test_identifier_hash() {
        use std::collections::HashMap;

        let mut map = HashMap::new();
        map.insert(LineIdentifier::new(7), 42);

        assert_eq!(map.get(&LineIdentifier::new(7)), Some(&42));
    }

    #[test]
    fn test_identifier_display() {
        let id = LineIdentifier::new(2);
        assert_eq!(format!("{}", id), "2");
    }

    #[test]
    fn test_identifier_conversions() {
        let id: StationIdentifier = 5.into();
        assert_eq!(u64::from(id), 5);
        assert_eq!(id.get(), 5);
    }
}
