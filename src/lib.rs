//! # ice-cand - ICE Candidate Core
//!
//! `ice-cand` manages the set of network-address candidates an ICE-style
//! NAT-traversal protocol negotiates a usable path from. It stores,
//! classifies and ranks candidates once told about them; gathering policy,
//! connectivity checks, socket I/O and SDP encoding live in the layers
//! around it.
//!
//! ## Features
//!
//! - **Candidate Records**: host, server-reflexive, peer-reflexive and
//!   relayed candidates with their component, transport and address metadata
//! - **Base Derivation**: reflexive/relayed candidates share ownership of the
//!   host candidate they were derived from
//! - **Foundation Computation**: deterministic grouping key over the
//!   candidate's network path
//! - **Priority Assignment**: the wire-visible 32-bit ranking value peers
//!   exchange
//! - **Lookup & Enumeration**: stable insertion-order access for the pairing
//!   layer
//!
//! ## Architecture
//!
//! - [`candidate`] - candidate records, foundation and priority computation
//! - [`registry`] - per-session local/remote collections and lookup
//!
//! ## Quick Start
//!
//! ```rust
//! use ice_cand::{CandidateType, Collection, ComponentLookup, Registry, Transport};
//!
//! struct Session;
//! impl ComponentLookup for Session {
//!     fn bound_port(&self, component_id: u8) -> Option<u16> {
//!         (component_id == 1).then_some(4000)
//!     }
//! }
//!
//! # fn main() -> ice_cand::Result<()> {
//! let mut registry = Registry::new();
//!
//! // gathered host candidate, anchored to the bound socket of component 1
//! let host = registry.add_host(
//!     &Session,
//!     1,
//!     65535,
//!     Transport::Udp,
//!     "192.0.2.1:0".parse().unwrap(),
//!     Some("eth0"),
//! )?;
//!
//! // STUN-discovered mapped address, derived from the host base
//! let srflx = registry.add_derived(
//!     &host,
//!     CandidateType::ServerReflexive,
//!     "203.0.113.5:4000".parse().unwrap(),
//! )?;
//! assert_eq!(srflx.related_addr(), Some(host.addr()));
//!
//! // peer-advertised candidate, priority and foundation taken verbatim
//! registry.add_remote(
//!     CandidateType::Host,
//!     1,
//!     0x7eff_fffe,
//!     "198.51.100.9:5000".parse().unwrap(),
//!     None,
//!     "5c8f9e2a",
//! )?;
//!
//! assert_eq!(registry.iter(Collection::Local).count(), 2);
//! # Ok(())
//! # }
//! ```
//!
//! ## Concurrency
//!
//! The registry is single-threaded and synchronous. It is owned by the
//! session that embeds it; callers needing concurrent access serialize
//! externally.

pub mod candidate;
mod error;
pub mod registry;

pub use candidate::{Candidate, CandidateType, Transport};
pub use error::{Error, Result};
pub use registry::{Collection, ComponentLookup, Registry, COMPONENT_ANY};
