//! dns-pin Application Layer
//!
//! Ports for the collaborators the pinning policy depends on, plus the
//! recursive resolver and the pinning middleware built on top of them.
pub mod ports;
pub mod services;
