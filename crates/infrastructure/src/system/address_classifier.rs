use dns_pin_application::ports::AddressClassifier;
use std::net::{IpAddr, Ipv4Addr, Ipv6Addr};

/// Treats every non-globally-routable range as local.
#[derive(Debug, Clone, Copy, Default)]
pub struct PrivateRangeClassifier;

impl PrivateRangeClassifier {
    pub fn new() -> Self {
        Self
    }
}

impl AddressClassifier for PrivateRangeClassifier {
    fn is_local_address(&self, address: &IpAddr) -> bool {
        match address {
            IpAddr::V4(v4) => is_local_ipv4(v4),
            IpAddr::V6(v6) => is_local_ipv6(v6),
        }
    }
}

fn is_local_ipv4(ip: &Ipv4Addr) -> bool {
    let octets = ip.octets();
    // 0.0.0.0/8
    if octets[0] == 0 {
        return true;
    }
    // 10.0.0.0/8, 172.16.0.0/12, 192.168.0.0/16
    if ip.is_private() {
        return true;
    }
    // 127.0.0.0/8
    if ip.is_loopback() {
        return true;
    }
    // 169.254.0.0/16
    if ip.is_link_local() {
        return true;
    }
    // 100.64.0.0/10 (CGNAT)
    if octets[0] == 100 && (64..=127).contains(&octets[1]) {
        return true;
    }
    // 192.0.0.0/24 (IETF protocol assignments)
    if octets[0] == 192 && octets[1] == 0 && octets[2] == 0 {
        return true;
    }
    // 198.18.0.0/15 (benchmarking)
    if octets[0] == 198 && (18..=19).contains(&octets[1]) {
        return true;
    }
    // 224.0.0.0/4 multicast, 240.0.0.0/4 reserved, broadcast
    octets[0] >= 224
}

fn is_local_ipv6(ip: &Ipv6Addr) -> bool {
    if ip.is_loopback() || ip.is_unspecified() || ip.is_multicast() {
        return true;
    }
    let segments = ip.segments();
    // fc00::/7 (ULA)
    if segments[0] & 0xfe00 == 0xfc00 {
        return true;
    }
    // fe80::/10 (link-local)
    if segments[0] & 0xffc0 == 0xfe80 {
        return true;
    }
    // ::ffff:a.b.c.d
    if let Some(v4) = ip.to_ipv4_mapped() {
        return is_local_ipv4(&v4);
    }
    // ::a.b.c.d (deprecated IPv4-compatible)
    if segments[..6].iter().all(|&s| s == 0) {
        let [_, _, _, _, _, _, hi, lo] = segments;
        let v4 = Ipv4Addr::from((u32::from(hi) << 16) | u32::from(lo));
        return is_local_ipv4(&v4);
    }
    false
}
