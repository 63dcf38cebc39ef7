#![warn(missing_docs)]

//! Checked, panic-free byte extraction over untrusted buffers.
//!
//! Authenticator data and DER signatures arrive as attacker-controlled
//! blobs; every read here checks its range against the remaining buffer
//! before touching it, so parsing cannot read out of bounds or panic.

mod cursor;
pub use cursor::*;

mod error;
pub use error::*;
