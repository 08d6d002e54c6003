//! ICE candidate records.
//!
//! A [`Candidate`] is one transport address a peer offers as a potential
//! connectivity endpoint, together with the metadata the pairing layer ranks
//! and groups it by: type, component id, priority and foundation.
//!
//! Candidates are immutable once inserted into a registry collection. Local
//! candidates always carry a base: a host candidate is its own base, while a
//! derived (reflexive/relayed) candidate shares ownership of the host
//! candidate it was obtained from, so the base outlives every candidate that
//! points at it.

mod foundation;
mod priority;

pub use foundation::{compute_foundation, random_foundation};
pub use priority::priority;

use std::fmt;
use std::net::SocketAddr;
use std::sync::Arc;

/// Type of ICE candidate.
///
/// # Examples
///
/// ```rust
/// use ice_cand::CandidateType;
///
/// assert!(CandidateType::Host.preference() > CandidateType::Relayed.preference());
/// assert_eq!(CandidateType::ServerReflexive.to_string(), "srflx");
/// ```
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
#[repr(u8)]
pub enum CandidateType {
    Host = 0,
    ServerReflexive = 1,
    PeerReflexive = 2,
    Relayed = 3,
}

/// Transport protocol of a candidate.
///
/// Opaque to the candidate core beyond identity comparison.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum Transport {
    Udp,
    Tcp,
}

impl Transport {
    /// Returns true if this is UDP.
    #[inline]
    pub fn is_udp(&self) -> bool {
        self == &Transport::Udp
    }

    /// Returns true if this is TCP.
    #[inline]
    pub fn is_tcp(&self) -> bool {
        self == &Transport::Tcp
    }
}

/// Ownership link from a candidate to its base.
///
/// Modelled as a tagged state instead of a nullable self-pointer: a host
/// candidate is its own base without holding a reference to itself, so
/// teardown never releases a value it is part of.
#[derive(Debug, Clone)]
pub enum Base {
    /// Host candidates are their own base.
    SelfBased,
    /// Derived candidates share ownership of the host candidate that
    /// produced them.
    DerivedFrom(Arc<Candidate>),
    /// Remote candidates carry no base.
    Remote,
}

/// One transport-address endpoint offered for connectivity checks.
///
/// Constructed only through the registry insertion operations; all fields are
/// fixed after construction.
#[derive(Debug)]
pub struct Candidate {
    pub(crate) kind: CandidateType,
    pub(crate) component_id: u8,
    pub(crate) transport: Transport,
    pub(crate) addr: SocketAddr,
    pub(crate) related_addr: Option<SocketAddr>,
    pub(crate) priority: u32,
    pub(crate) foundation: String,
    pub(crate) base: Base,
    pub(crate) interface_name: Option<String>,
}

impl Candidate {
    /// Returns the candidate type.
    #[inline]
    pub fn kind(&self) -> CandidateType {
        self.kind
    }

    /// Returns the media component id (1 = RTP, 2 = RTCP).
    #[inline]
    pub fn component_id(&self) -> u8 {
        self.component_id
    }

    /// Returns the transport protocol.
    #[inline]
    pub fn transport(&self) -> Transport {
        self.transport
    }

    /// Returns the advertised reachable endpoint.
    #[inline]
    pub fn addr(&self) -> SocketAddr {
        self.addr
    }

    /// The mapped/base address that produced this candidate.
    ///
    /// Set for derived and remote candidates, `None` for host candidates.
    #[inline]
    pub fn related_addr(&self) -> Option<SocketAddr> {
        self.related_addr
    }

    /// Returns the 32-bit ranking value; higher is preferred.
    #[inline]
    pub fn priority(&self) -> u32 {
        self.priority
    }

    /// Grouping key shared by candidates considered topologically equivalent.
    #[inline]
    pub fn foundation(&self) -> &str {
        &self.foundation
    }

    /// Human-readable origin label, local candidates only.
    #[inline]
    pub fn interface_name(&self) -> Option<&str> {
        self.interface_name.as_deref()
    }

    /// The host candidate this candidate was derived from.
    ///
    /// A host candidate is its own base; remote candidates have none.
    pub fn base(&self) -> Option<&Candidate> {
        match &self.base {
            Base::SelfBased => Some(self),
            Base::DerivedFrom(base) => Some(base),
            Base::Remote => None,
        }
    }

    /// Returns true if this is a host candidate acting as its own base.
    #[inline]
    pub fn is_self_based(&self) -> bool {
        matches!(self.base, Base::SelfBased)
    }
}

impl fmt::Display for CandidateType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CandidateType::Host => write!(f, "host"),
            CandidateType::ServerReflexive => write!(f, "srflx"),
            CandidateType::PeerReflexive => write!(f, "prflx"),
            CandidateType::Relayed => write!(f, "relay"),
        }
    }
}

impl fmt::Display for Transport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Transport::Udp => write!(f, "udp"),
            Transport::Tcp => write!(f, "tcp"),
        }
    }
}

impl fmt::Display for Candidate {
    /// Formats as `[interface:]type:address` with ` (rel-addr=address)`
    /// appended when a related address is set.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(ifname) = &self.interface_name {
            write!(f, "{ifname}:")?;
        }
        write!(f, "{}:{}", self.kind, self.addr)?;
        if let Some(rel) = &self.related_addr {
            write!(f, " (rel-addr={rel})")?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod test {
    use super::*;

    fn host(addr: SocketAddr, ifname: Option<&str>) -> Candidate {
        Candidate {
            kind: CandidateType::Host,
            component_id: 1,
            transport: Transport::Udp,
            addr,
            related_addr: None,
            priority: priority(CandidateType::Host, 65535, 1),
            foundation: compute_foundation(&addr, CandidateType::Host),
            base: Base::SelfBased,
            interface_name: ifname.map(str::to_owned),
        }
    }

    #[test]
    fn test_host_is_its_own_base() {
        let cand = host("192.0.2.1:4000".parse().unwrap(), None);
        let base = cand.base().unwrap();
        assert!(std::ptr::eq(base, &cand));
        assert!(cand.is_self_based());
    }

    #[test]
    fn test_derived_base_is_distinct() {
        let base = Arc::new(host("192.0.2.1:4000".parse().unwrap(), None));
        let cand = Candidate {
            kind: CandidateType::ServerReflexive,
            component_id: base.component_id,
            transport: base.transport,
            addr: "203.0.113.5:4000".parse().unwrap(),
            related_addr: Some(base.addr),
            priority: priority(CandidateType::ServerReflexive, 0, 1),
            foundation: compute_foundation(&"203.0.113.5:4000".parse().unwrap(), CandidateType::ServerReflexive),
            base: Base::DerivedFrom(base.clone()),
            interface_name: None,
        };
        let linked = cand.base().unwrap();
        assert!(!std::ptr::eq(linked, &cand));
        assert!(std::ptr::eq(linked, &*base));
    }

    #[test]
    fn test_display() {
        let addr = "192.0.2.1:4000".parse().unwrap();
        assert_eq!(host(addr, None).to_string(), "host:192.0.2.1:4000");
        assert_eq!(host(addr, Some("eth0")).to_string(), "eth0:host:192.0.2.1:4000");

        let mut cand = host(addr, Some("eth0"));
        cand.kind = CandidateType::ServerReflexive;
        cand.addr = "203.0.113.5:4000".parse().unwrap();
        cand.related_addr = Some(addr);
        assert_eq!(
            cand.to_string(),
            "eth0:srflx:203.0.113.5:4000 (rel-addr=192.0.2.1:4000)"
        );
    }
}
