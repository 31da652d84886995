//! Data model
//!
//! A run compresses each file as it is collected into a `Collection`, turns the
//! compressed bytes into a `FileMap` of encoded text, and records an `Outcome`
//! for every entry it touched.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::PathBuf;

use crate::core::codec::compress;
use crate::core::error::SkipReason;

/// Where a source item came from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Origin {
    /// Found while walking the directory root
    Directory,
    /// Named on the command line
    Explicit,
}

/// One file resolved by the collector
#[derive(Debug, Clone)]
pub struct SourceItem {
    pub identifier: String,
    pub path: PathBuf,
    pub origin: Origin,
    pub content: Vec<u8>,
}

/// What happened to a single visited entry
#[derive(Debug)]
pub enum Outcome {
    Included {
        identifier: String,
        path: PathBuf,
        origin: Origin,
        /// An earlier item with the same identifier was overwritten
        replaced: bool,
    },
    Skipped(SkipReason),
}

impl Outcome {
    pub fn is_skipped(&self) -> bool {
        matches!(self, Outcome::Skipped(_))
    }
}

/// A collected file, already compressed
#[derive(Debug, Clone)]
pub struct Packed {
    pub raw_len: u64,
    pub compressed: Vec<u8>,
}

/// Compressed bytes per identifier, plus the outcome log in processing order
#[derive(Debug, Default)]
pub struct Collection {
    pub items: BTreeMap<String, Packed>,
    pub outcomes: Vec<Outcome>,
}

impl Collection {
    pub fn new() -> Self {
        Self::default()
    }

    /// Compress and insert an item; the raw bytes are dropped here.
    ///
    /// A later item silently overwrites an earlier one with the same identifier.
    /// If compression fails the item is skipped and any earlier entry stays.
    pub fn collect(&mut self, item: SourceItem) {
        let SourceItem {
            identifier,
            path,
            origin,
            content,
        } = item;

        let compressed = match compress(&content) {
            Ok(compressed) => compressed,
            Err(source) => {
                self.skip(SkipReason::Compress { identifier, source });
                return;
            }
        };

        let packed = Packed {
            raw_len: content.len() as u64,
            compressed,
        };
        let replaced = self.items.insert(identifier.clone(), packed).is_some();
        self.outcomes.push(Outcome::Included {
            identifier,
            path,
            origin,
            replaced,
        });
    }

    pub fn skip(&mut self, reason: SkipReason) {
        self.outcomes.push(Outcome::Skipped(reason));
    }

    #[allow(dead_code)]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    #[allow(dead_code)]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

/// Identifier -> base64 of the zlib-compressed content.
///
/// Serializes as a plain JSON object. Keys come out in lexicographic order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FileMap(BTreeMap<String, String>);

impl FileMap {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, identifier: String, encoded: String) {
        self.0.insert(identifier, encoded);
    }

    #[allow(dead_code)]
    pub fn get(&self, identifier: &str) -> Option<&str> {
        self.0.get(identifier).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    #[allow(dead_code)]
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.0.keys().map(String::as_str)
    }

    #[allow(dead_code)]
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }
}

/// Totals for one run
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct EncodeStats {
    pub included: usize,
    pub skipped: usize,
    pub replaced: usize,
    pub raw_bytes: u64,
    pub compressed_bytes: u64,
    pub envelope_bytes: u64,
}

#[cfg(test)]
impl Packed {
    /// Decompress back to the original bytes
    pub fn inflate(&self) -> Vec<u8> {
        use std::io::Read;

        let mut out = Vec::new();
        flate2::read::ZlibDecoder::new(self.compressed.as_slice())
            .read_to_end(&mut out)
            .unwrap();
        out
    }
}
