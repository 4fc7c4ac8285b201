//! Subprotocol identities and the version table.

use {
    crate::error::{ProtocolError, Result},
    std::{
        collections::{BTreeMap, BTreeSet},
        fmt,
    },
};

/// Name of the BFT consensus subprotocol.
pub const ISTANBUL: &str = "istanbul";
/// Name of the proof-of-authority subprotocol.
pub const CLIQUE: &str = "clique";
/// Name of the general chain-sync subprotocol.
pub const ETH: &str = "eth";

/// A named, versioned subprotocol and the number of message codes it uses.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ProtocolSpec {
    pub name: String,
    pub version: u32,
    pub length: u64,
}

impl ProtocolSpec {
    pub fn new(name: impl Into<String>, version: u32, length: u64) -> Self {
        Self {
            name: name.into(),
            version,
            length,
        }
    }

    /// `eth/66` with its 17 message codes.
    pub fn eth66() -> Self {
        Self::new(ETH, 66, 17)
    }
}

impl fmt::Display for ProtocolSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.name, self.version)
    }
}

/// Message counts per `(name, version)` and the set of legacy versions that
/// replace the chain-sync protocol instead of running beside it.
///
/// Built once at startup and read-only afterwards.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ProtocolVersionTable {
    lengths: BTreeMap<(String, u32), u64>,
    legacy: BTreeSet<(String, u32)>,
}

impl ProtocolVersionTable {
    /// Build a table. Every legacy pair must have a message count.
    pub fn new<N, L>(
        lengths: impl IntoIterator<Item = (N, u32, u64)>,
        legacy: impl IntoIterator<Item = (L, u32)>,
    ) -> Result<Self>
    where
        N: Into<String>,
        L: Into<String>,
    {
        let lengths: BTreeMap<_, _> = lengths
            .into_iter()
            .map(|(name, version, length)| ((name.into(), version), length))
            .collect();
        let legacy: BTreeSet<_> = legacy
            .into_iter()
            .map(|(name, version)| (name.into(), version))
            .collect();

        if let Some((name, version)) = legacy.iter().find(|key| !lengths.contains_key(*key)) {
            return Err(ProtocolError::LegacyVersionWithoutLength {
                name: name.clone(),
                version: *version,
            });
        }
        Ok(Self { lengths, legacy })
    }

    /// The standard profile: `istanbul/64`, `istanbul/99` and `clique/63`,
    /// `clique/64` are legacy; `istanbul/100` runs beside `eth`.
    pub fn quorum() -> Self {
        let lengths = [
            ((ISTANBUL.to_string(), 64), 18),
            ((ISTANBUL.to_string(), 99), 18),
            ((ISTANBUL.to_string(), 100), 22),
            ((CLIQUE.to_string(), 63), 17),
            ((CLIQUE.to_string(), 64), 17),
        ];
        let legacy = [
            (ISTANBUL.to_string(), 64),
            (ISTANBUL.to_string(), 99),
            (CLIQUE.to_string(), 63),
            (CLIQUE.to_string(), 64),
        ];
        Self {
            lengths: lengths.into_iter().collect(),
            legacy: legacy.into_iter().collect(),
        }
    }

    pub fn message_count(&self, name: &str, version: u32) -> Result<u64> {
        self.lengths
            .get(&(name.to_string(), version))
            .copied()
            .ok_or_else(|| ProtocolError::UnknownProtocolVersion {
                name: name.to_string(),
                version,
            })
    }

    /// Exact `(name, version)` membership; the name alone is not enough.
    pub fn is_legacy(&self, name: &str, version: u32) -> bool {
        self.legacy.contains(&(name.to_string(), version))
    }

    /// Full spec for `name/version`.
    pub fn spec(&self, name: &str, version: u32) -> Result<ProtocolSpec> {
        self.message_count(name, version)
            .map(|length| ProtocolSpec::new(name, version, length))
    }
}
