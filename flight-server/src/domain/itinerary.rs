//! Itinerary types.
//!
//! An `Itinerary` is a complete route from an origin to a destination as a
//! sequence of hops. Every hop but the last records when the traveller
//! leaves that city; the last hop records arrival at the destination.
//!
//! Hops are stored as a shared singly linked list, so `prepend` is O(1)
//! and every itinerary built on the same tail shares it.

use std::fmt;
use std::iter;
use std::sync::Arc;

use serde::{Serialize, Serializer};

use super::Stop;

/// One hop and the rest of the route after it.
struct Hop {
    stop: Stop,
    next: Option<Arc<Hop>>,
}

impl Drop for Hop {
    // Unlink iteratively; the default drop recurses once per hop.
    fn drop(&mut self) {
        let mut next = self.next.take();
        while let Some(hop) = next {
            match Arc::try_unwrap(hop) {
                Ok(mut hop) => next = hop.next.take(),
                Err(_) => break,
            }
        }
    }
}

/// A complete route from origin to destination.
///
/// # Invariants
///
/// - At least one hop
/// - Never mutated once built; extending an itinerary produces a new one
///
/// Serializes as a bare JSON array of `{city, timestamp}` objects.
#[derive(Clone)]
pub struct Itinerary {
    head: Arc<Hop>,
    arrival: Stop,
    len: usize,
}

impl Itinerary {
    /// The itinerary of a traveller already at their destination.
    pub fn arrived(stop: Stop) -> Self {
        Self {
            head: Arc::new(Hop {
                stop: stop.clone(),
                next: None,
            }),
            arrival: stop,
            len: 1,
        }
    }

    /// Returns a new itinerary with `head` in front of this one.
    ///
    /// The tail is shared, not copied.
    pub fn prepend(&self, head: Stop) -> Self {
        Self {
            head: Arc::new(Hop {
                stop: head,
                next: Some(Arc::clone(&self.head)),
            }),
            arrival: self.arrival.clone(),
            len: self.len + 1,
        }
    }

    /// Returns the last hop: arrival at the destination.
    pub fn arrival(&self) -> &Stop {
        &self.arrival
    }

    /// Returns all hops in travel order.
    pub fn stops(&self) -> impl Iterator<Item = &Stop> + '_ {
        iter::successors(Some(&*self.head), |hop| hop.next.as_deref()).map(|hop| &hop.stop)
    }

    /// Returns the number of hops.
    pub fn hop_count(&self) -> usize {
        self.len
    }

    /// Returns the number of flights taken.
    pub fn flight_count(&self) -> usize {
        self.len - 1
    }
}

impl PartialEq for Itinerary {
    fn eq(&self, other: &Self) -> bool {
        self.hop_count() == other.hop_count() && self.stops().eq(other.stops())
    }
}

impl Eq for Itinerary {}

impl fmt::Debug for Itinerary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.stops()).finish()
    }
}

impl Serialize for Itinerary {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_seq(self.stops())
    }
}
