//! User domain types.

use serde::{Deserialize, Serialize};

/// User role.
///
/// Wire format: `u8` (0 = Staff, 1 = Chef). Names preserved from the legacy
/// CRM, where "Chef" is the owner/manager role.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UserRole {
    Staff = 0,
    Chef = 1,
}

impl UserRole {
    /// Convert from `u8` wire value. Returns `None` for unknown values.
    pub fn from_u8(v: u8) -> Option<Self> {
        match v {
            0 => Some(Self::Staff),
            1 => Some(Self::Chef),
            _ => None,
        }
    }

    /// Convert to `u8` wire value.
    pub fn as_u8(self) -> u8 {
        self as u8
    }

    pub fn is_chef(self) -> bool {
        matches!(self, Self::Chef)
    }
}

impl Default for UserRole {
    fn default() -> Self {
        Self::Staff
    }
}
