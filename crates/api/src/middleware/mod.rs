//! Request extractors shared by handlers.
//!
//! - [`identity::ActingUser`] -- who is performing a mutation.

pub mod identity;
