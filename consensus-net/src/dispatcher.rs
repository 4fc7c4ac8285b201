//! Decide which subprotocols a node registers for each consensus version.
//!
//! ```text
//!  legacy (istanbul/99):   [ istanbul/99  eth + consensus messages ]
//!
//!  split  (istanbul/100):  [ eth/66       chain-sync messages      ]
//!                          [ istanbul/100 consensus messages       ]
//! ```

use {
    crate::{
        error::Result,
        protocol::{ProtocolSpec, ProtocolVersionTable},
    },
    log::debug,
};

/// Which message families a registered protocol carries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HandleRole {
    /// Chain-sync and consensus messages on one multiplexed channel.
    Combined,
    /// Chain-sync messages only.
    Base,
    /// Consensus messages only.
    Consensus,
}

/// A subprotocol to register with the p2p server.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ProtocolHandle {
    pub spec: ProtocolSpec,
    pub role: HandleRole,
}

/// Outcome of dispatching one consensus version.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Dispatch {
    /// A legacy version replaces the base protocol.
    Combined(ProtocolHandle),
    /// The base protocol and the consensus protocol run side by side.
    Split {
        base: ProtocolHandle,
        consensus: ProtocolHandle,
    },
}

impl Dispatch {
    pub fn handles(&self) -> Vec<&ProtocolHandle> {
        match self {
            Dispatch::Combined(handle) => vec![handle],
            Dispatch::Split { base, consensus } => vec![base, consensus],
        }
    }

    pub fn is_combined(&self) -> bool {
        matches!(self, Dispatch::Combined(_))
    }
}

/// Maps negotiated consensus versions to protocol handles.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProtocolDispatcher {
    table: ProtocolVersionTable,
    base: ProtocolSpec,
}

impl Default for ProtocolDispatcher {
    fn default() -> Self {
        Self::new(ProtocolVersionTable::quorum(), ProtocolSpec::eth66())
    }
}

impl ProtocolDispatcher {
    pub fn new(table: ProtocolVersionTable, base: ProtocolSpec) -> Self {
        Self { table, base }
    }

    pub fn table(&self) -> &ProtocolVersionTable {
        &self.table
    }

    pub fn base(&self) -> &ProtocolSpec {
        &self.base
    }

    /// Dispatch a single version. An unknown version is an error.
    pub fn dispatch(&self, name: &str, version: u32) -> Result<Dispatch> {
        let spec = self.table.spec(name, version)?;
        let dispatch = if self.table.is_legacy(name, version) {
            Dispatch::Combined(ProtocolHandle {
                spec,
                role: HandleRole::Combined,
            })
        } else {
            Dispatch::Split {
                base: ProtocolHandle {
                    spec: self.base.clone(),
                    role: HandleRole::Base,
                },
                consensus: ProtocolHandle {
                    spec,
                    role: HandleRole::Consensus,
                },
            }
        };
        Ok(dispatch)
    }

    /// Handles to register for every version in `versions`, in order. The
    /// base protocol appears once however many split versions need it.
    pub fn protocols_for(&self, name: &str, versions: &[u32]) -> Result<Vec<ProtocolHandle>> {
        let mut handles: Vec<ProtocolHandle> = Vec::with_capacity(versions.len().saturating_add(1));
        for &version in versions {
            for handle in self.dispatch(name, version)?.handles() {
                if handle.role == HandleRole::Base && handles.contains(handle) {
                    continue;
                }
                debug!(
                    "registering {} ({:?}, {} messages)",
                    handle.spec, handle.role, handle.spec.length
                );
                handles.push(handle.clone());
            }
        }
        Ok(handles)
    }
}
