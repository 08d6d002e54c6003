//! Foundation computation.
//!
//! The foundation groups candidates that resolve to the same underlying
//! network path so the pairing layer can prune redundant checks without
//! knowing anything about topology itself.

use std::net::{IpAddr, SocketAddr};

use rand::Rng;

use super::CandidateType;

const FNV_OFFSET: u32 = 0x811c_9dc5;
const FNV_PRIME: u32 = 0x0100_0193;

fn fnv1a(bytes: &[u8]) -> u32 {
    bytes
        .iter()
        .fold(FNV_OFFSET, |hash, byte| (hash ^ u32::from(*byte)).wrapping_mul(FNV_PRIME))
}

/// Foundation is a hash of the IP address and the candidate type, rendered
/// as eight lowercase hex digits.
///
/// The port is deliberately excluded: candidates on the same network path
/// share a foundation regardless of which port they are bound to.
pub fn compute_foundation(addr: &SocketAddr, kind: CandidateType) -> String {
    let mut v = match addr.ip() {
        IpAddr::V4(ip) => fnv1a(&ip.octets()),
        IpAddr::V6(ip) => fnv1a(&ip.octets()),
    };
    v ^= kind as u32;
    format!("{v:08x}")
}

/// Random foundation token for peer-reflexive candidates.
///
/// Candidates discovered mid-negotiation cannot be grouped by topology yet,
/// so uniqueness is preferred over grouping.
pub fn random_foundation<R: Rng>(rng: &mut R) -> String {
    format!("{:08x}", rng.gen::<u32>())
}

#[cfg(test)]
mod test {
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    use super::*;

    #[test]
    fn test_deterministic() {
        let addr = "192.0.2.1:4000".parse().unwrap();
        let a = compute_foundation(&addr, CandidateType::Host);
        let b = compute_foundation(&addr, CandidateType::Host);
        assert_eq!(a, b);
        assert_eq!(a.len(), 8);
        assert!(a.chars().all(|c| c.is_ascii_hexdigit() && !c.is_ascii_uppercase()));
    }

    #[test]
    fn test_port_excluded() {
        let a = compute_foundation(&"192.0.2.1:4000".parse().unwrap(), CandidateType::Host);
        let b = compute_foundation(&"192.0.2.1:9999".parse().unwrap(), CandidateType::Host);
        assert_eq!(a, b);
    }

    #[test]
    fn test_type_changes_foundation() {
        let addr = "192.0.2.1:4000".parse().unwrap();
        let host = compute_foundation(&addr, CandidateType::Host);
        let srflx = compute_foundation(&addr, CandidateType::ServerReflexive);
        assert_ne!(host, srflx);
    }

    #[test]
    fn test_ip_changes_foundation() {
        let a = compute_foundation(&"192.0.2.1:4000".parse().unwrap(), CandidateType::Host);
        let b = compute_foundation(&"192.0.2.2:4000".parse().unwrap(), CandidateType::Host);
        assert_ne!(a, b);
    }

    #[test]
    fn test_random_token() {
        let mut rng = StdRng::seed_from_u64(7);
        let a = random_foundation(&mut rng);
        let b = random_foundation(&mut rng);
        assert_ne!(a, b);
        assert_eq!(a.len(), 8);
    }
}
