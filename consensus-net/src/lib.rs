//! QBFT subprotocol dispatch
//!
//! A node always speaks the general chain-sync protocol (`eth`). Older
//! consensus versions (`istanbul/64`, `istanbul/99`, `clique/63`,
//! `clique/64`) replace it with one multiplexed channel that carries both
//! chain-sync and consensus messages; newer ones (`istanbul/100`) run as a
//! second protocol beside it.
//!
//! ```text
//!  negotiated versions ──► ProtocolDispatcher ──► ProtocolVersionTable
//!                                │                 (message counts, legacy set)
//!                                ▼
//!                  Dispatch::Combined | Dispatch::Split
//! ```
//!
//! The table is built once at startup and only read afterwards, so the
//! dispatcher can be shared between sessions without locking.
//!
//! ## Crate modules
//!
//! | Module | Purpose |
//! |--------|---------|
//! | [`protocol`]   | `ProtocolSpec` and `ProtocolVersionTable` |
//! | [`dispatcher`] | Legacy vs split dispatch |
//! | [`error`]      | Crate-wide error enum |

pub mod dispatcher;
pub mod error;
pub mod protocol;

pub use {
    dispatcher::{Dispatch, HandleRole, ProtocolDispatcher, ProtocolHandle},
    error::{ProtocolError, Result},
    protocol::{ProtocolSpec, ProtocolVersionTable, CLIQUE, ETH, ISTANBUL},
};
