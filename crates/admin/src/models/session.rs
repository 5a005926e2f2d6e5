//! Session-related types.
//!
//! Types stored in the session for authentication state.

use serde::{Deserialize, Serialize};

use cordwain_core::{AdminRole, AdminUserId, Email};

use crate::api::AdminProfile;

/// Session-stored operator identity.
///
/// Minimal data stored in the session to identify the logged-in operator.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CurrentAdmin {
    /// Operator's id in the commerce API.
    pub id: AdminUserId,
    /// Operator's email address.
    pub email: Email,
    /// Display name.
    pub name: String,
    /// Permission level.
    pub role: AdminRole,
}

impl From<AdminProfile> for CurrentAdmin {
    fn from(profile: AdminProfile) -> Self {
        Self {
            id: profile.id,
            email: profile.email,
            name: profile.name,
            role: profile.role,
        }
    }
}

/// Session keys for authentication data.
pub mod keys {
    /// Key for storing the current logged-in operator.
    pub const CURRENT_ADMIN: &str = "current_admin";
}
