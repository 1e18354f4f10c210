use crc32fast::Hasher;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Opaque block identifier, stable for the lifetime of a block
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct BlockId(String);

impl BlockId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Display for BlockId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for BlockId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

impl From<String> for BlockId {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl AsRef<str> for BlockId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl PartialEq<str> for BlockId {
    fn eq(&self, other: &str) -> bool {
        self.0 == other
    }
}

impl PartialEq<&str> for BlockId {
    fn eq(&self, other: &&str) -> bool {
        self.0 == *other
    }
}

/// Source of fresh block ids.
///
/// The tree trusts the generator: uniqueness across documents is the
/// generator's job. Duplication additionally skips ids already present in the
/// tree it is inserting into.
pub trait IdGenerator {
    fn next_id(&mut self) -> BlockId;
}

impl<G: IdGenerator + ?Sized> IdGenerator for Box<G> {
    fn next_id(&mut self) -> BlockId {
        (**self).next_id()
    }
}

fn crc32_hex(input: &[u8]) -> String {
    let mut hasher = Hasher::new();
    hasher.update(input);
    format!("{:x}", hasher.finalize())
}

/// Deterministic generator: `<crc32(seed)>-<n>`.
///
/// Same seed, same sequence. Used by tests and by the CLI where
/// reproducible output matters.
#[derive(Debug, Clone)]
pub struct SequentialIdGenerator {
    seed: String,
    count: u32,
}

impl SequentialIdGenerator {
    pub fn new(seed: &str) -> Self {
        Self {
            seed: crc32_hex(seed.as_bytes()),
            count: 0,
        }
    }

    /// Use `seed` verbatim as the prefix
    pub fn from_prefix(prefix: impl Into<String>) -> Self {
        Self {
            seed: prefix.into(),
            count: 0,
        }
    }

    pub fn seed(&self) -> &str {
        &self.seed
    }
}

impl IdGenerator for SequentialIdGenerator {
    fn next_id(&mut self) -> BlockId {
        self.count += 1;
        BlockId(format!("{}-{}", self.seed, self.count))
    }
}

/// Collision-resistant generator: `<millis>-<suffix>`.
///
/// The suffix is a CRC32 over the nanosecond clock, a per-generator salt and
/// a running counter, so two ids minted in the same millisecond still differ.
#[derive(Debug, Clone)]
pub struct TimestampIdGenerator {
    salt: String,
    count: u64,
}

impl TimestampIdGenerator {
    pub fn new() -> Self {
        let started = chrono::Utc::now().timestamp_nanos_opt().unwrap_or_default();
        Self::with_salt(&format!("{}-{}", std::process::id(), started))
    }

    pub fn with_salt(salt: &str) -> Self {
        Self {
            salt: salt.to_string(),
            count: 0,
        }
    }
}

impl Default for TimestampIdGenerator {
    fn default() -> Self {
        Self::new()
    }
}

impl IdGenerator for TimestampIdGenerator {
    fn next_id(&mut self) -> BlockId {
        self.count += 1;
        let now = chrono::Utc::now();
        let nanos = now.timestamp_nanos_opt().unwrap_or_default();
        let suffix = crc32_hex(format!("{}:{}:{}", self.salt, nanos, self.count).as_bytes());
        BlockId(format!("{}-{}{}", now.timestamp_millis(), suffix, self.count))
    }
}
