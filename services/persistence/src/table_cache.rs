//! Table cache: statistics rows with integrity and optional compression
//!
//! On-disk layout is a bincode-encoded [`TableCache`] envelope, optionally
//! wrapped in a single zstd frame. The loader detects compression from the
//! zstd frame magic, so a cache written with either setting can be read
//! back without extra configuration.
//!
//! Features:
//! - Format version checked on load
//! - SHA-256 integrity hash over the serialized rows
//! - Optional zstd compression
//! - Atomic replace (tmp file, fsync, rename)
//! - Verbatim restore: bincode keeps every f64 bit pattern

use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use std::fs::{self, File};
use std::io::{self, Read, Write};
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{debug, info};
use types::row::SnapshotRow;

// ── Errors ──────────────────────────────────────────────────────────

#[derive(Error, Debug)]
pub enum CacheError {
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    #[error("Serialization error: {0}")]
    Serialization(String),

    #[error("Integrity check failed: expected {expected}, got {actual}")]
    IntegrityFailure { expected: String, actual: String },

    #[error("Row count mismatch: header says {expected}, found {actual}")]
    RowCountMismatch { expected: u64, actual: u64 },

    #[error("Unsupported table cache version: {0}")]
    UnsupportedVersion(u32),

    #[error("Compression error: {0}")]
    Compression(String),
}

// ── Envelope ────────────────────────────────────────────────────────

/// Current table cache format version.
pub const TABLE_CACHE_VERSION: u32 = 1;

const ZSTD_MAGIC: [u8; 4] = [0x28, 0xB5, 0x2F, 0xFD];
const ZSTD_LEVEL: i32 = 3;

/// Hex SHA-256 of the bincode encoding of `rows`.
pub fn rows_checksum(rows: &[SnapshotRow]) -> Result<String, CacheError> {
    let bytes =
        bincode::serialize(rows).map_err(|e| CacheError::Serialization(e.to_string()))?;
    let mut hasher = Sha256::new();
    hasher.update(&bytes);
    Ok(format!("{:x}", hasher.finalize()))
}

/// Persisted form of a statistics table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TableCache {
    pub version: u32,
    pub row_count: u64,
    pub checksum: String,
    /// Whether the file was written zstd-compressed.
    pub compressed: bool,
    pub rows: Vec<SnapshotRow>,
}

impl TableCache {
    pub fn new(rows: Vec<SnapshotRow>, compressed: bool) -> Result<Self, CacheError> {
        let checksum = rows_checksum(&rows)?;
        Ok(Self {
            version: TABLE_CACHE_VERSION,
            row_count: rows.len() as u64,
            checksum,
            compressed,
            rows,
        })
    }

    /// Check header fields against the carried rows.
    pub fn verify(&self) -> Result<(), CacheError> {
        if self.version > TABLE_CACHE_VERSION {
            return Err(CacheError::UnsupportedVersion(self.version));
        }
        let actual_count = self.rows.len() as u64;
        if actual_count != self.row_count {
            return Err(CacheError::RowCountMismatch {
                expected: self.row_count,
                actual: actual_count,
            });
        }
        let actual = rows_checksum(&self.rows)?;
        if actual != self.checksum {
            return Err(CacheError::IntegrityFailure {
                expected: self.checksum.clone(),
                actual,
            });
        }
        Ok(())
    }
}

// ── Writer ──────────────────────────────────────────────────────────

/// Writes the table cache file.
pub struct TableCacheWriter {
    path: PathBuf,
    compress: bool,
}

impl TableCacheWriter {
    pub fn new(path: impl Into<PathBuf>, compress: bool) -> Self {
        Self {
            path: path.into(),
            compress,
        }
    }

    /// Serialize, optionally compress, then atomically replace the cache file.
    pub fn write(&self, rows: &[SnapshotRow]) -> Result<&Path, CacheError> {
        let cache = TableCache::new(rows.to_vec(), self.compress)?;
        let data =
            bincode::serialize(&cache).map_err(|e| CacheError::Serialization(e.to_string()))?;

        let payload = if self.compress {
            zstd::encode_all(data.as_slice(), ZSTD_LEVEL)
                .map_err(|e| CacheError::Compression(e.to_string()))?
        } else {
            data
        };

        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)?;
        }

        let mut tmp_name = self.path.as_os_str().to_owned();
        tmp_name.push(".tmp");
        let tmp_path = PathBuf::from(tmp_name);

        {
            let mut file = File::create(&tmp_path)?;
            file.write_all(&payload)?;
            file.sync_all()?;
        }
        fs::rename(&tmp_path, &self.path)?;

        info!(
            path = %self.path.display(),
            rows = cache.row_count,
            bytes = payload.len(),
            compressed = self.compress,
            "Table cache written"
        );
        Ok(&self.path)
    }
}

// ── Loader ──────────────────────────────────────────────────────────

/// Restores rows from a table cache file, verifying integrity.
pub struct TableCacheLoader {
    path: PathBuf,
}

impl TableCacheLoader {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn exists(&self) -> bool {
        self.path.is_file()
    }

    /// Load and verify the full envelope.
    pub fn load(&self) -> Result<TableCache, CacheError> {
        let mut data = Vec::new();
        File::open(&self.path)?.read_to_end(&mut data)?;

        let decoded = if data.starts_with(&ZSTD_MAGIC) {
            zstd::decode_all(data.as_slice()).map_err(|e| CacheError::Compression(e.to_string()))?
        } else {
            data
        };

        let cache: TableCache = bincode::deserialize(&decoded)
            .map_err(|e| CacheError::Serialization(e.to_string()))?;
        cache.verify()?;

        debug!(
            path = %self.path.display(),
            rows = cache.row_count,
            version = cache.version,
            "Table cache loaded"
        );
        Ok(cache)
    }

    /// Load just the rows.
    pub fn load_rows(&self) -> Result<Vec<SnapshotRow>, CacheError> {
        Ok(self.load()?.rows)
    }
}

// ── Tests ───────────────────────────────────────────────────────────
