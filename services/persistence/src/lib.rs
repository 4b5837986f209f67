//! Table cache persistence
//!
//! Stores the assembled statistics rows in a single file so later runs can
//! skip rebuilding from captures. Files carry a format version and a
//! SHA-256 checksum over the serialized rows, may be zstd-compressed, and
//! are replaced atomically.

pub mod table_cache;

pub use table_cache::{CacheError, TableCache, TableCacheLoader, TableCacheWriter, TABLE_CACHE_VERSION};
