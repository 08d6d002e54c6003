//! Candidate registry.
//!
//! One [`Registry`] per negotiation session owns the local and remote
//! candidate collections. Insertion computes foundation and priority for
//! local candidates, links derived candidates to their host base, and keeps
//! both collections in stable insertion order for the pairing layer to
//! enumerate.
//!
//! Every insertion is all-or-nothing: a failed call leaves both collections
//! exactly as they were.
//!
//! # Examples
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
//! let host = registry.add_host(
//!     &Session,
//!     1,
//!     65535,
//!     Transport::Udp,
//!     "192.0.2.1:0".parse().unwrap(),
//!     Some("eth0"),
//! )?;
//! registry.add_derived(
//!     &host,
//!     CandidateType::ServerReflexive,
//!     "203.0.113.5:4000".parse().unwrap(),
//! )?;
//! println!("local candidates:{}", registry.display(Collection::Local));
//! # Ok(())
//! # }
//! ```

use std::fmt;
use std::net::SocketAddr;
use std::sync::Arc;

use rand::Rng;

use crate::candidate::{
    compute_foundation, priority, random_foundation, Base, Candidate, CandidateType, Transport,
};
use crate::error::{Error, Result};

/// Matches any component id in [`Registry::find`] queries.
pub const COMPONENT_ANY: u8 = 0;

/// Lookup of the local port a media component is bound to.
///
/// Supplied by the socket-binding layer. Host candidates are anchored to an
/// already bound socket, so the bound port always overrides the port the
/// caller passed in.
pub trait ComponentLookup {
    /// The bound local port of the component, or `None` if the component id
    /// is unknown to the session.
    fn bound_port(&self, component_id: u8) -> Option<u16>;
}

/// Which of the two candidate collections an operation targets.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum Collection {
    Local,
    Remote,
}

/// Owns the local and remote candidate collections of one session.
///
/// Single-threaded by design; callers needing concurrent access serialize
/// externally.
#[derive(Debug, Default)]
pub struct Registry {
    local: Vec<Arc<Candidate>>,
    remote: Vec<Arc<Candidate>>,
}

impl Registry {
    pub fn new() -> Registry {
        Registry::default()
    }

    /// Adds a local host candidate anchored to the component's bound socket.
    ///
    /// The supplied address carries the advertised IP; its port is replaced
    /// with the component's actual bound port.
    pub fn add_host(
        &mut self,
        components: &dyn ComponentLookup,
        component_id: u8,
        local_preference: u16,
        transport: Transport,
        addr: SocketAddr,
        interface_name: Option<&str>,
    ) -> Result<Arc<Candidate>> {
        if component_id == COMPONENT_ANY {
            return Err(Error::InvalidArgument("component id 0 is reserved".into()));
        }
        let port = components
            .bound_port(component_id)
            .ok_or(Error::ComponentNotFound(component_id))?;
        let mut addr = addr;
        addr.set_port(port);
        self.push(
            Collection::Local,
            Candidate {
                kind: CandidateType::Host,
                component_id,
                transport,
                addr,
                related_addr: None,
                priority: priority(CandidateType::Host, local_preference, component_id),
                foundation: compute_foundation(&addr, CandidateType::Host),
                base: Base::SelfBased,
                interface_name: interface_name.map(str::to_owned),
            },
        )
    }

    /// Derives a reflexive or relayed candidate from a host base.
    ///
    /// The new candidate inherits the base's component id, transport and
    /// interface name, records the base's address as its related address,
    /// and holds shared ownership of the base so the base outlives it.
    pub fn add_derived(
        &mut self,
        base: &Arc<Candidate>,
        kind: CandidateType,
        addr: SocketAddr,
    ) -> Result<Arc<Candidate>> {
        if !base.is_self_based() {
            return Err(Error::InvalidArgument("base must be a host candidate".into()));
        }
        self.push(
            Collection::Local,
            Candidate {
                kind,
                component_id: base.component_id,
                transport: base.transport,
                addr,
                related_addr: Some(base.addr),
                // rank is dominated by the type, not the base's preference
                priority: priority(kind, 0, base.component_id),
                foundation: compute_foundation(&addr, kind),
                base: Base::DerivedFrom(base.clone()),
                interface_name: base.interface_name.clone(),
            },
        )
    }

    /// Adds a peer-advertised candidate to the remote collection.
    ///
    /// Priority and foundation originate from the peer and are stored
    /// verbatim, never recomputed.
    pub fn add_remote(
        &mut self,
        kind: CandidateType,
        component_id: u8,
        priority: u32,
        addr: SocketAddr,
        related_addr: Option<SocketAddr>,
        foundation: &str,
    ) -> Result<Arc<Candidate>> {
        if foundation.is_empty() {
            return Err(Error::InvalidArgument("empty foundation".into()));
        }
        if component_id == COMPONENT_ANY {
            return Err(Error::InvalidArgument("component id 0 is reserved".into()));
        }
        self.push(
            Collection::Remote,
            Candidate {
                kind,
                component_id,
                // the advertised transport is not carried here; remote
                // candidates compare by address only
                transport: Transport::Udp,
                addr,
                related_addr,
                priority,
                foundation: foundation.to_owned(),
                base: Base::Remote,
                interface_name: None,
            },
        )
    }

    /// Adds a remote peer-reflexive candidate revealed by an incoming check
    /// from an address the peer never advertised.
    ///
    /// The foundation is a fresh random token drawn from the caller's rng;
    /// such candidates cannot be grouped by topology yet.
    pub fn add_remote_peer_reflexive(
        &mut self,
        rng: &mut impl Rng,
        component_id: u8,
        priority: u32,
        addr: SocketAddr,
    ) -> Result<Arc<Candidate>> {
        if component_id == COMPONENT_ANY {
            return Err(Error::InvalidArgument("component id 0 is reserved".into()));
        }
        self.push(
            Collection::Remote,
            Candidate {
                kind: CandidateType::PeerReflexive,
                component_id,
                transport: Transport::Udp,
                addr,
                related_addr: None,
                priority,
                foundation: random_foundation(rng),
                base: Base::Remote,
                interface_name: None,
            },
        )
    }

    /// First candidate matching the query, scanning in insertion order.
    ///
    /// [`COMPONENT_ANY`] matches every component id; a `None` address
    /// matches every address. An address match requires exact equality of
    /// IP, port and family.
    pub fn find(
        &self,
        collection: Collection,
        component_id: u8,
        addr: Option<SocketAddr>,
    ) -> Option<&Arc<Candidate>> {
        self.list(collection).iter().find(|cand| {
            (component_id == COMPONENT_ANY || cand.component_id == component_id)
                && addr.map_or(true, |addr| cand.addr == addr)
        })
    }

    /// Iterates a collection in stable insertion order.
    ///
    /// The iterator is a live view; callers must not mutate the collection
    /// while iterating.
    pub fn iter(&self, collection: Collection) -> std::slice::Iter<'_, Arc<Candidate>> {
        self.list(collection).iter()
    }

    /// Returns the local collection in insertion order.
    #[inline]
    pub fn local(&self) -> &[Arc<Candidate>] {
        &self.local
    }

    /// Returns the remote collection in insertion order.
    #[inline]
    pub fn remote(&self) -> &[Arc<Candidate>] {
        &self.remote
    }

    /// Unlinks a candidate from its collection, identified by handle
    /// identity rather than address equality.
    ///
    /// The relative order of the remaining candidates is unchanged. Returns
    /// false if the candidate is not in the collection. A removed base stays
    /// alive while any derived candidate still holds it.
    pub fn remove(&mut self, collection: Collection, cand: &Arc<Candidate>) -> bool {
        let list = self.list_mut(collection);
        match list.iter().position(|c| Arc::ptr_eq(c, cand)) {
            Some(index) => {
                list.remove(index);
                log::trace!("{collection:?} candidate removed: {cand}");
                true
            }
            None => false,
        }
    }

    /// Removes every candidate from a collection.
    pub fn clear(&mut self, collection: Collection) {
        self.list_mut(collection).clear();
    }

    /// Diagnostic view of a collection, one line per candidate.
    pub fn display(&self, collection: Collection) -> CandidateList<'_> {
        CandidateList(self.list(collection))
    }

    fn push(&mut self, collection: Collection, cand: Candidate) -> Result<Arc<Candidate>> {
        debug_assert!(!cand.foundation.is_empty());
        let list = self.list_mut(collection);
        list.try_reserve(1)?;
        let cand = Arc::new(cand);
        log::trace!("{collection:?} candidate added: {cand} prio={:08x}", cand.priority);
        list.push(cand.clone());
        Ok(cand)
    }

    fn list(&self, collection: Collection) -> &Vec<Arc<Candidate>> {
        match collection {
            Collection::Local => &self.local,
            Collection::Remote => &self.remote,
        }
    }

    fn list_mut(&mut self, collection: Collection) -> &mut Vec<Arc<Candidate>> {
        match collection {
            Collection::Local => &mut self.local,
            Collection::Remote => &mut self.remote,
        }
    }
}

/// Diagnostic formatting of a candidate collection.
///
/// Prints the candidate count followed by one line per candidate with
/// component id, foundation and priority in fixed hex width.
pub struct CandidateList<'a>(&'a [Arc<Candidate>]);

impl fmt::Display for CandidateList<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, " ({})", self.0.len())?;
        for cand in self.0 {
            writeln!(
                f,
                "  {{{}}} fnd={:<8} prio={:08x} {}",
                cand.component_id, cand.foundation, cand.priority, cand
            )?;
        }
        Ok(())
    }
}
