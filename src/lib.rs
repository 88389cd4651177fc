#![warn(missing_docs)]
#![doc = include_str!("../README.md")]
#![cfg_attr(not(feature = "std"), no_std)]

extern crate alloc;

/// Error types returned by table construction and key lookups.
pub mod error;

/// The linear-probing [`HashTable`], its configuration and iterators.
pub mod hash_table;

/// The tri-state slot stored in the table's backing array, and the [`Pair`]
/// snapshot type extracted from occupied slots.
///
/// [`Pair`]: slot::Pair
pub mod slot;

mod probe;

pub use error::ConfigError;
pub use error::Error;
pub use error::Result;
pub use hash_table::DefaultHashBuilder;
pub use hash_table::HashTable;
pub use hash_table::TableConfig;
pub use slot::Pair;
