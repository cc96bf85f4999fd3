//! City identifier type.

use std::fmt;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

/// A city named in a flight schedule.
///
/// Cities are opaque: two values name the same city exactly when their
/// strings are equal. No normalisation or validation is applied, so the
/// empty string is a city like any other.
///
/// `City` is ordered so that sets of cities have a canonical form, and is
/// cheap to clone: the name is shared, not copied.
///
/// # Examples
///
/// ```
/// use flight_server::domain::City;
///
/// let delhi = City::new("Delhi");
/// assert_eq!(delhi.as_str(), "Delhi");
///
/// // Case matters
/// assert_ne!(City::new("delhi"), delhi);
/// ```
#[derive(Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct City(Arc<str>);

impl City {
    /// Create a city from its name.
    pub fn new(name: impl Into<Arc<str>>) -> Self {
        City(name.into())
    }

    /// Returns the city name as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for City {
    fn from(name: &str) -> Self {
        City::new(name)
    }
}

impl From<String> for City {
    fn from(name: String) -> Self {
        City::new(name)
    }
}

impl fmt::Debug for City {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "City({})", self.0)
    }
}

impl fmt::Display for City {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn as_str_returns_name() {
        assert_eq!(City::new("Mumbai").as_str(), "Mumbai");
    }

    #[test]
    fn empty_name_is_allowed() {
        assert_eq!(City::new("").as_str(), "");
    }

    #[test]
    fn display() {
        assert_eq!(format!("{}", City::new("Chennai")), "Chennai");
    }

    #[test]
    fn debug() {
        assert_eq!(format!("{:?}", City::new("Chennai")), "City(Chennai)");
    }

    #[test]
    fn equality_is_case_sensitive() {
        assert_eq!(City::new("Goa"), City::from("Goa"));
        assert_ne!(City::new("Goa"), City::new("GOA"));
    }

    #[test]
    fn serializes_as_plain_string() {
        let json = serde_json::to_string(&City::new("Pune")).unwrap();
        assert_eq!(json, "\"Pune\"");

        let city: City = serde_json::from_str("\"Pune\"").unwrap();
        assert_eq!(city, City::new("Pune"));
    }

    #[test]
    fn clones_share_the_name() {
        let city = City::new("Kochi");
        let copy = city.clone();
        assert!(Arc::ptr_eq(&city.0, &copy.0));
    }

    #[test]
    fn hash_consistent_with_eq() {
        use std::collections::HashSet;
        let mut set = HashSet::new();
        set.insert(City::new("Delhi"));
        assert!(set.contains(&City::from(String::from("Delhi"))));
        assert!(!set.contains(&City::new("Mumbai")));
    }
}

#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        /// Any string survives construction unchanged
        #[test]
        fn roundtrip(s in ".*") {
            let city = City::new(s.clone());
            prop_assert_eq!(city.as_str(), s.as_str());
        }

        /// Ordering follows the underlying string ordering
        #[test]
        fn ordering_matches_strings(a in "[A-Za-z]{0,6}", b in "[A-Za-z]{0,6}") {
            prop_assert_eq!(City::new(a.clone()).cmp(&City::new(b.clone())), a.cmp(&b));
        }
    }
}
