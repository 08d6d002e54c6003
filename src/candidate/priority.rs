//! Candidate priority computation.

use super::CandidateType;

impl CandidateType {
    /// Recommended type preference from RFC 8445 section 5.1.2.2.
    ///
    /// Host candidates rank highest, then peer reflexive, then server
    /// reflexive, with relayed candidates last.
    pub fn preference(&self) -> u8 {
        match self {
            CandidateType::Host => 126,
            CandidateType::PeerReflexive => 110,
            CandidateType::ServerReflexive => 100,
            CandidateType::Relayed => 0,
        }
    }
}

/// Computes the 32-bit candidate priority.
///
/// `(type_preference << 24) | (local_preference << 8) | (256 - component_id)`
///
/// The result is exchanged with peers on the wire, so the formula and the
/// type-preference constants must match what remote implementations compute.
///
/// `component_id` must be in 1..=255; 0 is the lookup wildcard and would
/// overflow the low byte into the local-preference field.
pub fn priority(kind: CandidateType, local_preference: u16, component_id: u8) -> u32 {
    debug_assert!(component_id != 0);
    (u32::from(kind.preference()) << 24)
        | (u32::from(local_preference) << 8)
        | (256 - u32::from(component_id))
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_host_max_preference() {
        assert_eq!(priority(CandidateType::Host, 65535, 1), 0x7eff_ffff);
    }

    #[test]
    fn test_component_low_byte() {
        assert_eq!(priority(CandidateType::Host, 65535, 1) & 0xff, 255);
        assert_eq!(priority(CandidateType::Host, 65535, 2) & 0xff, 254);
    }

    #[test]
    #[should_panic]
    fn test_component_zero_rejected() {
        priority(CandidateType::Host, 65535, 0);
    }

    #[test]
    fn test_type_ordering() {
        let host = priority(CandidateType::Host, 1000, 1);
        let prflx = priority(CandidateType::PeerReflexive, 1000, 1);
        let srflx = priority(CandidateType::ServerReflexive, 1000, 1);
        let relay = priority(CandidateType::Relayed, 1000, 1);
        assert!(host > prflx);
        assert!(prflx > srflx);
        assert!(srflx > relay);
    }
}
