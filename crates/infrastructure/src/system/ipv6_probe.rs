use std::net::{Ipv6Addr, SocketAddr, UdpSocket};
use std::sync::OnceLock;
use tracing::debug;

static IPV6_SUPPORTED: OnceLock<bool> = OnceLock::new();

/// Whether this host can open an IPv6 socket. Probed once per process.
pub fn ipv6_supported() -> bool {
    *IPV6_SUPPORTED.get_or_init(|| {
        let supported = probe_ipv6();
        debug!(supported, "IPv6 support probed");
        supported
    })
}

fn probe_ipv6() -> bool {
    UdpSocket::bind(SocketAddr::from((Ipv6Addr::LOCALHOST, 0))).is_ok()
}
