//! Ownership guard for user-owned resources
//!
//! This module contains ONLY pure functions. No HTTP framework dependencies
//! (Axum, etc.) - those are in service-specific code.
//!
//! User ids are opaque strings issued by the external identity provider.
//! Ownership is soft: a value-equality check at this boundary, not a
//! storage-level constraint.

use crate::{Error, Result};

/// Check that the caller may act on a resource owned by `owner`.
///
/// Passes when no caller identity is attached (unauthenticated-but-permitted
/// routes) or when the caller is the owner. Fails with `Forbidden` otherwise.
/// An empty caller id counts as absent.
pub fn authorize_owner(caller: Option<&str>, owner: &str) -> Result<()> {
    match caller {
        Some(caller) if !caller.is_empty() && caller != owner => Err(Error::Forbidden(format!(
            "resource belongs to another user (caller {})",
            caller
        ))),
        _ => Ok(()),
    }
}
