/// A single cell of the table's backing array.
///
/// Deleted entries leave a [`Slot::Tombstone`] behind instead of reverting to
/// [`Slot::Empty`], so lookups for keys that were probed past the deleted
/// entry keep walking until they reach them.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub enum Slot<K, V> {
    /// Never written since the last resize or clear. Terminates a probe.
    #[default]
    Empty,
    /// Lazily deleted. Probes continue past it.
    Tombstone,
    /// Holds a live entry.
    Occupied {
        /// The stored key.
        key: K,
        /// The value associated with `key`.
        value: V,
    },
}

impl<K, V> Slot<K, V> {
    /// Returns `true` for slots that count towards the load factor, i.e.
    /// occupied or tombstoned slots.
    #[inline]
    pub fn is_used(&self) -> bool {
        !matches!(self, Slot::Empty)
    }

    #[inline]
    pub(crate) fn as_pair(&self) -> Option<(&K, &V)> {
        match self {
            Slot::Occupied { key, value } => Some((key, value)),
            _ => None,
        }
    }

    #[inline]
    pub(crate) fn into_pair(self) -> Option<(K, V)> {
        match self {
            Slot::Occupied { key, value } => Some((key, value)),
            _ => None,
        }
    }
}

/// An owned `(key, value)` snapshot of an occupied slot.
///
/// Produced by [`HashTable::pairs`](crate::HashTable::pairs). Changing a
/// `Pair` never affects the table it was taken from.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Pair<K, V> {
    /// The key of the entry.
    pub key: K,
    /// The value of the entry.
    pub value: V,
}

impl<K, V> From<(K, V)> for Pair<K, V> {
    fn from((key, value): (K, V)) -> Self {
        Pair { key, value }
    }
}

impl<K, V> From<Pair<K, V>> for (K, V) {
    fn from(pair: Pair<K, V>) -> Self {
        (pair.key, pair.value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn used_slots() {
        assert!(!Slot::<u8, u8>::Empty.is_used());
        assert!(Slot::<u8, u8>::Tombstone.is_used());
        assert!(Slot::Occupied { key: 1u8, value: 2u8 }.is_used());
        assert_eq!(Slot::<u8, u8>::default(), Slot::Empty);
    }

    #[test]
    fn only_occupied_slots_yield_pairs() {
        assert_eq!(Slot::<u8, u8>::Tombstone.as_pair(), None);
        assert_eq!(Slot::<u8, u8>::Empty.into_pair(), None);

        let slot = Slot::Occupied {
            key: "k",
            value: None::<u8>,
        };
        assert_eq!(slot.as_pair(), Some((&"k", &None)));
        assert_eq!(slot.into_pair(), Some(("k", None)));
    }

    #[test]
    fn pair_tuple_conversions() {
        let pair = Pair::from(("key", 3));
        assert_eq!(pair.key, "key");
        assert_eq!(pair.value, 3);
        assert_eq!(<(&str, i32)>::from(pair), ("key", 3));
    }
}
