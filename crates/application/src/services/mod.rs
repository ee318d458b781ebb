mod dns_pin_middleware;
mod recursive_resolver;

pub use dns_pin_middleware::{candidate_ports, DnsPinMiddleware, DEFAULT_PORTS};
pub use recursive_resolver::{registrable_parent, RecursiveResolver, MAX_RECURSION_DEPTH};
