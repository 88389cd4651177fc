use alloc::vec::Vec;
use core::borrow::Borrow;
use core::fmt::Debug;
use core::hash::BuildHasher;
use core::hash::Hash;

use crate::error::ConfigError;
use crate::error::Error;
use crate::error::Result;
use crate::probe::ProbeSequence;
#[cfg(any(test, feature = "stats"))]
use crate::probe::home_index;
use crate::slot::Pair;
use crate::slot::Slot;

cfg_if::cfg_if! {
    if #[cfg(feature = "foldhash")] {
        /// The hasher builder used when none is supplied.
        pub type DefaultHashBuilder = foldhash::fast::RandomState;
    } else if #[cfg(feature = "std")] {
        /// The hasher builder used when none is supplied.
        pub type DefaultHashBuilder = std::hash::RandomState;
    } else {
        compile_error!("either the `foldhash` or the `std` feature must be enabled");
    }
}

const DEFAULT_CAPACITY: usize = 8;
const DEFAULT_LOAD_FACTOR_THRESHOLD: f64 = 0.6;

fn empty_slots<K, V>(capacity: usize) -> Vec<Slot<K, V>> {
    core::iter::repeat_with(|| Slot::Empty)
        .take(capacity)
        .collect()
}

/// Construction parameters for a [`HashTable`].
///
/// # Examples
///
/// ```rust
/// use probe_table::TableConfig;
///
/// let config = TableConfig::default()
///     .with_capacity(32)
///     .with_load_factor_threshold(0.75);
/// assert!(config.validate().is_ok());
///
/// assert!(TableConfig::default().with_capacity(0).validate().is_err());
/// ```
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TableConfig {
    /// Number of slots in the backing array. Must be at least 1.
    pub capacity: usize,
    /// Fraction of used (occupied or tombstoned) slots at which the table
    /// grows. Must lie in `(0, 1]`.
    pub load_factor_threshold: f64,
}

impl Default for TableConfig {
    fn default() -> Self {
        TableConfig {
            capacity: DEFAULT_CAPACITY,
            load_factor_threshold: DEFAULT_LOAD_FACTOR_THRESHOLD,
        }
    }
}

impl TableConfig {
    /// Creates a configuration from explicit values. Nothing is checked until
    /// [`validate`](Self::validate) or construction.
    pub const fn new(capacity: usize, load_factor_threshold: f64) -> Self {
        TableConfig {
            capacity,
            load_factor_threshold,
        }
    }

    /// Sets the initial slot count.
    pub fn with_capacity(mut self, capacity: usize) -> Self {
        self.capacity = capacity;
        self
    }

    /// Sets the load factor threshold.
    pub fn with_load_factor_threshold(mut self, load_factor_threshold: f64) -> Self {
        self.load_factor_threshold = load_factor_threshold;
        self
    }

    /// Checks that the capacity is positive and the threshold lies in
    /// `(0, 1]`.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.capacity == 0 {
            return Err(ConfigError::ZeroCapacity);
        }
        // Written so that NaN is rejected as well.
        if !(self.load_factor_threshold > 0.0 && self.load_factor_threshold <= 1.0) {
            return Err(ConfigError::LoadFactorThreshold(self.load_factor_threshold));
        }
        Ok(())
    }
}

/// Snapshot of the table's internal slot usage.
///
/// Requires the `stats` feature outside of tests.
#[cfg(any(test, feature = "stats"))]
#[derive(Debug, Clone, PartialEq)]
pub struct DebugStats {
    /// Number of live entries.
    pub len: usize,
    /// Number of tombstoned slots.
    pub tombstones: usize,
    /// Number of empty slots.
    pub empty_slots: usize,
    /// Total number of slots.
    pub capacity: usize,
    /// `(len + tombstones) / capacity`
    pub load_factor: f64,
    /// The threshold at which the table grows.
    pub load_factor_threshold: f64,
    /// Largest distance between an entry's slot and its home index.
    pub longest_probe: usize,
}

#[cfg(any(test, feature = "stats"))]
impl DebugStats {
    /// Pretty-print the debug statistics.
    #[cfg(feature = "std")]
    pub fn print(&self) {
        println!("=== Hash Table Debug Statistics ===");
        println!(
            "Entries: {} live, {} tombstoned, {} empty ({} slots)",
            self.len, self.tombstones, self.empty_slots, self.capacity
        );
        println!(
            "Load factor: {:.2}% (grows at {:.2}%)",
            self.load_factor * 100.0,
            self.load_factor_threshold * 100.0
        );
        println!("Longest probe: {}", self.longest_probe);
    }
}

/// An open-addressed hash table using linear probing and lazy deletion.
///
/// Every key hashes to a home index (`hash mod capacity`). Lookups walk
/// forward from there, wrapping at the end of the slot array, until they find
/// the key or an empty slot. Deleting an entry leaves a tombstone so that
/// entries stored further along the probe sequence remain reachable.
///
/// Tombstones are never reused by [`set`](Self::set); they are only cleared
/// out when the table grows. Because they still occupy a slot, they count
/// towards the [`load_factor`](Self::load_factor) but not towards
/// [`len`](Self::len).
///
/// Growth doubles the slot count and reinserts every live entry. It happens
/// inside the `set` call that would otherwise bring the load factor to the
/// configured threshold or above, before the new entry is written.
///
/// The table performs no synchronization. Sharing it between threads
/// requires external locking, as with the `std` collections.
///
/// ## Example
///
/// ```rust
/// use probe_table::Error;
/// use probe_table::HashTable;
///
/// let mut table = HashTable::new();
/// table.set("hello", "world");
/// table.set("answer", "42");
///
/// assert_eq!(table.get("hello"), Ok(&"world"));
/// assert_eq!(table.delete("answer"), Ok("42"));
/// assert_eq!(table.get("answer"), Err(Error::KeyNotFound));
/// ```
#[derive(Clone)]
pub struct HashTable<K, V, S = DefaultHashBuilder> {
    slots: Vec<Slot<K, V>>,
    len: usize,
    tombstones: usize,
    load_factor_threshold: f64,
    hash_builder: S,
}

impl<K, V, S> Debug for HashTable<K, V, S>
where
    K: Debug,
    V: Debug,
{
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_map().entries(self.iter()).finish()
    }
}

impl<K, V> HashTable<K, V, DefaultHashBuilder> {
    /// Creates an empty table with 8 slots and a load factor threshold of
    /// 0.6.
    ///
    /// # Examples
    ///
    /// ```rust
    /// # use probe_table::HashTable;
    /// #
    /// let table: HashTable<u32, String> = HashTable::new();
    /// assert_eq!(table.capacity(), 8);
    /// assert_eq!(table.load_factor_threshold(), 0.6);
    /// ```
    pub fn new() -> Self {
        Self::from_parts(TableConfig::default(), DefaultHashBuilder::default())
    }

    /// Creates an empty table from `config`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidConfiguration`] if the capacity is zero or the
    /// threshold is outside `(0, 1]`.
    ///
    /// # Examples
    ///
    /// ```rust
    /// # use probe_table::HashTable;
    /// # use probe_table::TableConfig;
    /// #
    /// let table: HashTable<u32, u32> = HashTable::with_config(TableConfig::new(100, 0.5))?;
    /// assert_eq!(table.capacity(), 100);
    ///
    /// assert!(HashTable::<u32, u32>::with_config(TableConfig::new(8, 1.5)).is_err());
    /// # Ok::<(), probe_table::Error>(())
    /// ```
    pub fn with_config(config: TableConfig) -> Result<Self> {
        Self::with_config_and_hasher(config, DefaultHashBuilder::default())
    }
}

impl<K, V> HashTable<K, V, DefaultHashBuilder>
where
    K: Hash + Eq,
{
    /// Builds a table from existing entries.
    ///
    /// The capacity defaults to twice the number of entries. Later entries
    /// overwrite earlier ones with an equal key.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidConfiguration`] if the resulting capacity is
    /// zero, which is the case for an empty input without an explicit
    /// capacity.
    ///
    /// # Examples
    ///
    /// ```rust
    /// # use probe_table::HashTable;
    /// #
    /// let table = HashTable::from_mapping([("a", 1), ("b", 2), ("c", 3)], None)?;
    /// assert_eq!(table.capacity(), 6);
    /// assert_eq!(table.get("b"), Ok(&2));
    ///
    /// let table = HashTable::from_mapping([("a", 1)], Some(50))?;
    /// assert_eq!(table.capacity(), 50);
    /// # Ok::<(), probe_table::Error>(())
    /// ```
    pub fn from_mapping<I>(entries: I, capacity: Option<usize>) -> Result<Self>
    where
        I: IntoIterator<Item = (K, V)>,
    {
        Self::from_mapping_with_hasher(entries, capacity, DefaultHashBuilder::default())
    }
}

impl<K, V, S> HashTable<K, V, S> {
    fn from_parts(config: TableConfig, hash_builder: S) -> Self {
        debug_assert!(config.validate().is_ok());
        HashTable {
            slots: empty_slots(config.capacity),
            len: 0,
            tombstones: 0,
            load_factor_threshold: config.load_factor_threshold,
            hash_builder,
        }
    }

    /// Creates an empty table with the default configuration and the given
    /// hasher builder.
    pub fn with_hasher(hash_builder: S) -> Self {
        Self::from_parts(TableConfig::default(), hash_builder)
    }

    /// Creates an empty table from `config` with the given hasher builder.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidConfiguration`] if `config` does not
    /// [`validate`](TableConfig::validate).
    pub fn with_config_and_hasher(config: TableConfig, hash_builder: S) -> Result<Self> {
        config.validate()?;
        Ok(Self::from_parts(config, hash_builder))
    }

    /// Returns the number of live entries.
    ///
    /// Tombstones are not counted, so this can be smaller than the number of
    /// used slots reflected in [`load_factor`](Self::load_factor).
    #[doc(alias = "size")]
    pub fn len(&self) -> usize {
        self.len
    }

    /// Returns `true` if the table holds no live entries.
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Returns the number of slots in the backing array.
    pub fn capacity(&self) -> usize {
        self.slots.len()
    }

    /// Returns the fraction of slots that are occupied or tombstoned.
    ///
    /// # Examples
    ///
    /// ```rust
    /// # use probe_table::HashTable;
    /// #
    /// let mut table = HashTable::new();
    /// table.set(1, "one");
    /// table.set(2, "two");
    /// assert_eq!(table.load_factor(), 0.25);
    ///
    /// // The deleted slot still counts.
    /// table.delete(&1)?;
    /// assert_eq!(table.load_factor(), 0.25);
    /// assert_eq!(table.len(), 1);
    /// # Ok::<(), probe_table::Error>(())
    /// ```
    pub fn load_factor(&self) -> f64 {
        (self.len + self.tombstones) as f64 / self.slots.len() as f64
    }

    /// Returns the load factor at which the table grows.
    pub fn load_factor_threshold(&self) -> f64 {
        self.load_factor_threshold
    }

    /// Returns a reference to the table's hasher builder.
    pub fn hasher(&self) -> &S {
        &self.hash_builder
    }

    /// Removes every entry and tombstone, keeping the current capacity.
    pub fn clear(&mut self) {
        tracing::trace!(capacity = self.slots.len(), live = self.len, "clearing table");
        self.slots.fill_with(|| Slot::Empty);
        self.len = 0;
        self.tombstones = 0;
    }

    /// Returns an iterator over the live entries, in slot order.
    ///
    /// # Examples
    ///
    /// ```rust
    /// # use probe_table::HashTable;
    /// #
    /// let mut table = HashTable::new();
    /// table.set("a", 1);
    /// table.set("b", 2);
    ///
    /// let sum: i32 = table.iter().map(|(_, v)| v).sum();
    /// assert_eq!(sum, 3);
    /// ```
    pub fn iter(&self) -> Iter<'_, K, V> {
        Iter {
            slots: self.slots.iter(),
            remaining: self.len,
        }
    }

    /// Returns a snapshot of every key.
    ///
    /// The order is unspecified.
    pub fn keys(&self) -> Vec<K>
    where
        K: Clone,
    {
        self.iter().map(|(k, _)| k.clone()).collect()
    }

    /// Returns a snapshot of every value.
    ///
    /// The order is unspecified.
    pub fn values(&self) -> Vec<V>
    where
        V: Clone,
    {
        self.iter().map(|(_, v)| v.clone()).collect()
    }

    /// Returns a snapshot of every live entry.
    ///
    /// The order is unspecified.
    ///
    /// # Examples
    ///
    /// ```rust
    /// # use probe_table::HashTable;
    /// # use probe_table::Pair;
    /// #
    /// let mut table = HashTable::new();
    /// table.set("key", 7);
    /// assert_eq!(table.pairs(), vec![Pair { key: "key", value: 7 }]);
    /// ```
    pub fn pairs(&self) -> Vec<Pair<K, V>>
    where
        K: Clone,
        V: Clone,
    {
        self.iter()
            .map(|(k, v)| Pair {
                key: k.clone(),
                value: v.clone(),
            })
            .collect()
    }
}

impl<K, V, S> HashTable<K, V, S>
where
    K: Hash + Eq,
    S: BuildHasher,
{
    /// Builds a table from existing entries using the given hasher builder.
    ///
    /// See [`HashTable::from_mapping`].
    pub fn from_mapping_with_hasher<I>(
        entries: I,
        capacity: Option<usize>,
        hash_builder: S,
    ) -> Result<Self>
    where
        I: IntoIterator<Item = (K, V)>,
    {
        let entries: Vec<(K, V)> = entries.into_iter().collect();
        let capacity = capacity.unwrap_or_else(|| entries.len().saturating_mul(2));

        let mut table = Self::with_config_and_hasher(
            TableConfig::default().with_capacity(capacity),
            hash_builder,
        )?;
        table.extend(entries);
        Ok(table)
    }

    /// Inserts `value` under `key`, overwriting the value of an existing
    /// entry with an equal key.
    ///
    /// If adding a new entry would bring the load factor to the threshold or
    /// above, the table first doubles its capacity and reinserts every live
    /// entry, discarding all tombstones. Updating an existing key never
    /// grows the table.
    ///
    /// # Examples
    ///
    /// ```rust
    /// # use probe_table::HashTable;
    /// #
    /// let mut table = HashTable::new();
    /// for i in 0..4 {
    ///     table.set(i, i * 10);
    /// }
    /// assert_eq!(table.capacity(), 8);
    ///
    /// // 5 of 8 slots would reach the 0.6 threshold.
    /// table.set(4, 40);
    /// assert_eq!(table.capacity(), 16);
    /// assert_eq!(table.load_factor(), 5.0 / 16.0);
    ///
    /// table.set(4, 41);
    /// assert_eq!(table.len(), 5);
    /// assert_eq!(table.get(&4), Ok(&41));
    /// ```
    pub fn set(&mut self, key: K, value: V) {
        let hash = self.hash_builder.hash_one(&key);

        let mut index = self.find_insert_slot(hash, &key);
        if let Some(i) = index
            && matches!(self.slots[i], Slot::Empty)
            && self.would_reach_threshold()
        {
            self.resize_rehash();
            index = self.find_insert_slot(hash, &key);
        }

        let index = loop {
            match index {
                Some(i) => break i,
                None => {
                    // Every slot is used, which the threshold check prevents
                    // for thresholds of at most 1.
                    self.resize_rehash();
                    index = self.find_insert_slot(hash, &key);
                }
            }
        };

        match &mut self.slots[index] {
            Slot::Occupied { value: existing, .. } => *existing = value,
            slot => {
                *slot = Slot::Occupied { key, value };
                self.len += 1;
            }
        }
    }

    /// Returns the value stored under `key`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::KeyNotFound`] if the table holds no entry for `key`.
    ///
    /// # Examples
    ///
    /// ```rust
    /// # use probe_table::Error;
    /// # use probe_table::HashTable;
    /// #
    /// let mut table = HashTable::new();
    /// table.set(String::from("present"), None);
    ///
    /// // A stored `None` is still a hit.
    /// assert_eq!(table.get("present"), Ok(&None::<u32>));
    /// assert_eq!(table.get("absent"), Err(Error::KeyNotFound));
    /// ```
    pub fn get<Q>(&self, key: &Q) -> Result<&V>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.find(key).ok_or(Error::KeyNotFound)
    }

    /// Returns the value stored under `key`, or `default` if there is none.
    pub fn get_or_default<'a, Q>(&'a self, key: &Q, default: &'a V) -> &'a V
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.find(key).unwrap_or(default)
    }

    /// Returns a mutable reference to the value stored under `key`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::KeyNotFound`] if the table holds no entry for `key`.
    pub fn get_mut<Q>(&mut self, key: &Q) -> Result<&mut V>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        let index = self.find_index(key).ok_or(Error::KeyNotFound)?;
        match &mut self.slots[index] {
            Slot::Occupied { value, .. } => Ok(value),
            _ => Err(Error::KeyNotFound),
        }
    }

    /// Returns `true` if the table holds an entry for `key`.
    pub fn contains<Q>(&self, key: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.find_index(key).is_some()
    }

    /// Removes the entry for `key`, returning its value.
    ///
    /// The slot becomes a tombstone, so [`load_factor`](Self::load_factor)
    /// does not drop until the next time the table grows or is cleared.
    ///
    /// # Errors
    ///
    /// Returns [`Error::KeyNotFound`] if the table holds no entry for `key`.
    pub fn delete<Q>(&mut self, key: &Q) -> Result<V>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        let index = self.find_index(key).ok_or(Error::KeyNotFound)?;
        match core::mem::replace(&mut self.slots[index], Slot::Tombstone) {
            Slot::Occupied { value, .. } => {
                self.len -= 1;
                self.tombstones += 1;
                Ok(value)
            }
            other => {
                self.slots[index] = other;
                Err(Error::KeyNotFound)
            }
        }
    }

    /// Returns an independent table with the same entries, capacity and
    /// threshold.
    ///
    /// Unlike [`Clone`], the copy is rebuilt from the live entries, so it
    /// carries no tombstones.
    ///
    /// # Examples
    ///
    /// ```rust
    /// # use probe_table::HashTable;
    /// #
    /// let mut table = HashTable::new();
    /// table.set("a", 1);
    /// table.set("b", 2);
    /// table.delete("b")?;
    ///
    /// let copy = table.copy();
    /// assert_eq!(copy, table);
    /// assert_eq!(copy.capacity(), table.capacity());
    /// assert_eq!(copy.load_factor(), 1.0 / 8.0);
    /// # Ok::<(), probe_table::Error>(())
    /// ```
    pub fn copy(&self) -> Self
    where
        K: Clone,
        V: Clone,
        S: Clone,
    {
        let config = TableConfig::new(self.slots.len(), self.load_factor_threshold);
        let mut table = Self::from_parts(config, self.hash_builder.clone());
        table.extend(self.iter().map(|(k, v)| (k.clone(), v.clone())));
        table
    }

    fn find<Q>(&self, key: &Q) -> Option<&V>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        let index = self.find_index(key)?;
        self.slots[index].as_pair().map(|(_, v)| v)
    }

    fn find_index<Q>(&self, key: &Q) -> Option<usize>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        let hash = self.hash_builder.hash_one(key);
        for index in ProbeSequence::new(hash, self.slots.len()) {
            match &self.slots[index] {
                Slot::Empty => return None,
                Slot::Occupied { key: k, .. } if k.borrow() == key => return Some(index),
                Slot::Occupied { .. } | Slot::Tombstone => {}
            }
        }
        None
    }

    /// Finds the slot `set` writes to: the entry with an equal key, or the
    /// first empty slot. Tombstones are skipped, not reused.
    fn find_insert_slot(&self, hash: u64, key: &K) -> Option<usize> {
        for index in ProbeSequence::new(hash, self.slots.len()) {
            match &self.slots[index] {
                Slot::Empty => return Some(index),
                Slot::Occupied { key: k, .. } if k == key => return Some(index),
                Slot::Occupied { .. } | Slot::Tombstone => {}
            }
        }
        None
    }

    #[inline]
    fn would_reach_threshold(&self) -> bool {
        let used = self.len + self.tombstones + 1;
        used as f64 / self.slots.len() as f64 >= self.load_factor_threshold
    }

    #[cold]
    fn resize_rehash(&mut self) {
        let old_capacity = self.slots.len();
        let Some(new_capacity) = old_capacity.checked_mul(2) else {
            panic!("capacity overflow");
        };

        // Hash everything before touching the table, so a panicking hasher
        // leaves the old contents in place.
        let hashes: Vec<u64> = self
            .iter()
            .map(|(k, _)| self.hash_builder.hash_one(k))
            .collect();

        tracing::debug!(
            old_capacity,
            new_capacity,
            live = self.len,
            tombstones = self.tombstones,
            "growing table"
        );

        let mut slots = empty_slots(new_capacity);
        let old_slots = core::mem::take(&mut self.slots);
        for ((key, value), hash) in old_slots
            .into_iter()
            .filter_map(Slot::into_pair)
            .zip(hashes)
        {
            place(&mut slots, hash, key, value);
        }

        self.slots = slots;
        self.tombstones = 0;
    }

    /// Returns a histogram of probe distances: entry `d` counts the live
    /// entries stored `d` slots past their home index.
    ///
    /// Requires the `stats` feature outside of tests.
    #[cfg(any(test, feature = "stats"))]
    pub fn probe_histogram(&self) -> Vec<usize> {
        let capacity = self.slots.len();
        let mut hist = Vec::new();
        for (index, slot) in self.slots.iter().enumerate() {
            if let Some((key, _)) = slot.as_pair() {
                let home = home_index(self.hash_builder.hash_one(key), capacity);
                let distance = (index + capacity - home) % capacity;
                if hist.len() <= distance {
                    hist.resize(distance + 1, 0);
                }
                hist[distance] += 1;
            }
        }
        hist
    }

    /// Returns slot usage statistics for debugging.
    ///
    /// Requires the `stats` feature outside of tests.
    #[cfg(any(test, feature = "stats"))]
    pub fn debug_stats(&self) -> DebugStats {
        let capacity = self.slots.len();
        DebugStats {
            len: self.len,
            tombstones: self.tombstones,
            empty_slots: capacity - self.len - self.tombstones,
            capacity,
            load_factor: self.load_factor(),
            load_factor_threshold: self.load_factor_threshold,
            longest_probe: self.probe_histogram().len().saturating_sub(1),
        }
    }

    /// Pretty-prints the probe distance histogram horizontally using stdout.
    ///
    /// Requires the `std` feature, and the `stats` feature outside of tests.
    #[cfg(all(any(test, feature = "stats"), feature = "std"))]
    pub fn print_probe_histogram(&self) {
        let hist = self.probe_histogram();
        let max = hist.iter().copied().max().unwrap_or(0);
        if max == 0 {
            println!("probe histogram: empty");
            return;
        }

        let max_bar = 60usize;
        let total_units = max_bar * 8;
        println!("probe histogram ({} entries):", self.len);

        let make_bar = |count: usize| -> alloc::string::String {
            if count == 0 {
                return alloc::string::String::new();
            }
            let units = ((count as u128 * total_units as u128).div_ceil(max as u128)) as usize;
            let mut bar = "█".repeat(units / 8);
            let partial = match units % 8 {
                1 => Some('▏'),
                2 => Some('▎'),
                3 => Some('▍'),
                4 => Some('▌'),
                5 => Some('▋'),
                6 => Some('▊'),
                7 => Some('▉'),
                _ => None,
            };
            bar.extend(partial);
            bar
        };

        for (distance, &count) in hist.iter().enumerate() {
            println!("{:>3} | {} ({})", distance, make_bar(count), count);
        }
    }
}

/// Writes an entry into the first empty slot of its probe sequence.
///
/// Only used while rehashing, where keys are known to be unique and the
/// target has at least one empty slot.
fn place<K, V>(slots: &mut [Slot<K, V>], hash: u64, key: K, value: V) {
    for index in ProbeSequence::new(hash, slots.len()) {
        if matches!(slots[index], Slot::Empty) {
            slots[index] = Slot::Occupied { key, value };
            return;
        }
    }
    unreachable!("rehash target has no empty slot");
}

impl<K, V, S> PartialEq for HashTable<K, V, S>
where
    K: Hash + Eq,
    V: PartialEq,
    S: BuildHasher,
{
    fn eq(&self, other: &Self) -> bool {
        if self.len() != other.len() {
            return false;
        }
        self.iter()
            .all(|(k, v)| other.find(k).is_some_and(|other_v| v == other_v))
    }
}

impl<K, V, S> Eq for HashTable<K, V, S>
where
    K: Hash + Eq,
    V: Eq,
    S: BuildHasher,
{
}

impl<K, V, S> Default for HashTable<K, V, S>
where
    S: Default,
{
    fn default() -> Self {
        Self::with_hasher(S::default())
    }
}

impl<K, V, S> Extend<(K, V)> for HashTable<K, V, S>
where
    K: Hash + Eq,
    S: BuildHasher,
{
    fn extend<I: IntoIterator<Item = (K, V)>>(&mut self, iter: I) {
        for (key, value) in iter {
            self.set(key, value);
        }
    }
}

impl<K, V, S> FromIterator<(K, V)> for HashTable<K, V, S>
where
    K: Hash + Eq,
    S: BuildHasher + Default,
{
    /// Sizes the table like [`HashTable::from_mapping`], falling back to the
    /// default capacity for an empty iterator.
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let entries: Vec<(K, V)> = iter.into_iter().collect();
        let mut config = TableConfig::default();
        if !entries.is_empty() {
            config.capacity = entries.len().saturating_mul(2);
        }

        let mut table = Self::from_parts(config, S::default());
        table.extend(entries);
        table
    }
}

impl<'a, K, V, S> IntoIterator for &'a HashTable<K, V, S> {
    type Item = (&'a K, &'a V);
    type IntoIter = Iter<'a, K, V>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<K, V, S> IntoIterator for HashTable<K, V, S> {
    type Item = (K, V);
    type IntoIter = IntoIter<K, V>;

    fn into_iter(self) -> Self::IntoIter {
        IntoIter {
            slots: self.slots.into_iter(),
            remaining: self.len,
        }
    }
}

/// An iterator over the entries of a [`HashTable`].
///
/// This struct is created by the [`iter`] method on [`HashTable`].
///
/// [`iter`]: HashTable::iter
pub struct Iter<'a, K, V> {
    slots: core::slice::Iter<'a, Slot<K, V>>,
    remaining: usize,
}

impl<K, V> Clone for Iter<'_, K, V> {
    fn clone(&self) -> Self {
        Iter {
            slots: self.slots.clone(),
            remaining: self.remaining,
        }
    }
}

impl<'a, K, V> Iterator for Iter<'a, K, V> {
    type Item = (&'a K, &'a V);

    fn next(&mut self) -> Option<Self::Item> {
        if self.remaining == 0 {
            return None;
        }
        let pair = self.slots.find_map(Slot::as_pair)?;
        self.remaining -= 1;
        Some(pair)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<K, V> ExactSizeIterator for Iter<'_, K, V> {}

/// An owning iterator over the entries of a [`HashTable`].
pub struct IntoIter<K, V> {
    slots: alloc::vec::IntoIter<Slot<K, V>>,
    remaining: usize,
}

impl<K, V> Iterator for IntoIter<K, V> {
    type Item = (K, V);

    fn next(&mut self) -> Option<Self::Item> {
        if self.remaining == 0 {
            return None;
        }
        let pair = self.slots.find_map(Slot::into_pair)?;
        self.remaining -= 1;
        Some(pair)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<K, V> ExactSizeIterator for IntoIter<K, V> {}


#[cfg(all(test, feature = "std"))]
mod proptests {
    use std::collections::BTreeMap;
    use std::collections::HashMap as ModelMap;

    use proptest::collection::vec;
    use proptest::prelude::*;

    use super::*;

    #[derive(Clone, Debug)]
    enum Op {
        Set(u8, u32),
        Delete(u8),
    }

    fn op() -> impl Strategy<Value = Op> {
        prop_oneof![
            3 => (any::<u8>(), any::<u32>()).prop_map(|(k, v)| Op::Set(k, v)),
            1 => any::<u8>().prop_map(Op::Delete),
        ]
    }

    fn sorted(table: &HashTable<u8, u32>) -> Vec<(u8, u32)> {
        let mut pairs: Vec<(u8, u32)> = table.iter().map(|(k, v)| (*k, *v)).collect();
        pairs.sort_unstable();
        pairs
    }

    proptest! {
        #[test]
        fn behaves_like_a_map(
            ops in vec(op(), 0..300),
            capacity in 1usize..16,
            threshold in 0.05f64..=1.0,
        ) {
            let mut table = HashTable::with_config(TableConfig::new(capacity, threshold)).unwrap();
            let mut model = ModelMap::new();

            for op in ops {
                match op {
                    Op::Set(k, v) => {
                        table.set(k, v);
                        model.insert(k, v);
                        prop_assert_eq!(table.get(&k), Ok(&v));
                    }
                    Op::Delete(k) => {
                        let expected = model.remove(&k).ok_or(Error::KeyNotFound);
                        prop_assert_eq!(table.delete(&k), expected);
                        prop_assert!(!table.contains(&k));
                        prop_assert_eq!(table.get(&k), Err(Error::KeyNotFound));
                    }
                }
                prop_assert_eq!(table.len(), model.len());
            }

            for (k, v) in &model {
                prop_assert_eq!(table.get(k), Ok(v));
            }
        }

        #[test]
        fn resize_preserves_pairs(
            ops in vec(op(), 0..300),
            capacity in 1usize..16,
        ) {
            let mut table = HashTable::with_config(TableConfig::new(capacity, 0.6)).unwrap();

            for op in ops {
                match op {
                    Op::Set(k, v) => {
                        let before_capacity = table.capacity();
                        let mut expected: BTreeMap<u8, u32> = sorted(&table).into_iter().collect();
                        expected.insert(k, v);

                        table.set(k, v);

                        let after: Vec<(u8, u32)> = sorted(&table);
                        prop_assert_eq!(after, expected.into_iter().collect::<Vec<_>>());
                        prop_assert!(
                            table.capacity() == before_capacity
                                || table.capacity() == before_capacity * 2
                        );
                        prop_assert!(table.load_factor() < 0.6 || table.capacity() > before_capacity);
                    }
                    Op::Delete(k) => {
                        let _ = table.delete(&k);
                    }
                }
            }
        }

        #[test]
        fn equality_ignores_insertion_order(
            entries in proptest::collection::btree_map(any::<u16>(), any::<u32>(), 0..100),
            first_capacity in 1usize..64,
            second_capacity in 1usize..64,
        ) {
            let mut forward = HashTable::with_config(TableConfig::new(first_capacity, 0.6)).unwrap();
            let mut backward = HashTable::with_config(TableConfig::new(second_capacity, 0.75)).unwrap();
            forward.extend(entries.iter().map(|(k, v)| (*k, *v)));
            backward.extend(entries.iter().rev().map(|(k, v)| (*k, *v)));

            prop_assert_eq!(&forward, &backward);
            prop_assert_eq!(forward.copy(), backward);
        }
    }
}
