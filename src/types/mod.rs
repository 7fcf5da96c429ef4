//! Core type definitions using newtype patterns for type safety.
//!
//! Targets are validated once at the edge; everything downstream works with
//! normalized values.

mod port;
mod session_id;
mod target;

pub use port::Port;
pub use session_id::SessionId;
pub use target::{
    normalize_domain, parse_ipv4, EmailAddress, IpClass, Mode, PhoneNumber, Target,
};
