//! Permission data-transfer object
//!
//! A plain attribute bag describing CRUD access on an entity/target pair.
//! It carries no logic of its own; the gatekeeper turns it into a request.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::{BitOr, BitOrAssign};

/// Set of CRUD access flags
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AccessTypes(u8);

impl AccessTypes {
    /// No access
    pub const NONE: Self = Self(0);
    /// Create access
    pub const CREATE: Self = Self(1);
    /// Read access
    pub const READ: Self = Self(1 << 1);
    /// Update access
    pub const UPDATE: Self = Self(1 << 2);
    /// Delete access
    pub const DELETE: Self = Self(1 << 3);
    /// Every flag set
    pub const ALL: Self = Self(0b1111);

    /// Raw flag bits
    pub fn bits(&self) -> u8 {
        self.0
    }

    /// Build from raw bits, dropping unknown flags
    pub fn from_bits_truncate(bits: u8) -> Self {
        Self(bits & Self::ALL.0)
    }

    /// True if every flag in `other` is set
    pub fn contains(&self, other: Self) -> bool {
        self.0 & other.0 == other.0
    }

    /// True if no flag is set
    pub fn is_empty(&self) -> bool {
        self.0 == 0
    }

    /// Atom naming a single access kind
    ///
    /// Returns `None` for the empty set and for combined flags, which have no
    /// single-atom form.
    pub fn as_atom(&self) -> Option<&'static str> {
        match *self {
            Self::CREATE => Some("create"),
            Self::READ => Some("read"),
            Self::UPDATE => Some("update"),
            Self::DELETE => Some("delete"),
            _ => None,
        }
    }

    /// Parse a single access kind from its atom
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "create" => Some(Self::CREATE),
            "read" => Some(Self::READ),
            "update" => Some(Self::UPDATE),
            "delete" => Some(Self::DELETE),
            _ => None,
        }
    }
}

impl BitOr for AccessTypes {
    type Output = Self;

    fn bitor(self, rhs: Self) -> Self {
        Self(self.0 | rhs.0)
    }
}

impl BitOrAssign for AccessTypes {
    fn bitor_assign(&mut self, rhs: Self) {
        self.0 |= rhs.0;
    }
}

impl fmt::Display for AccessTypes {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let names: Vec<&str> = [Self::CREATE, Self::READ, Self::UPDATE, Self::DELETE]
            .into_iter()
            .filter(|flag| self.contains(*flag))
            .filter_map(|flag| flag.as_atom())
            .collect();

        if names.is_empty() {
            f.write_str("none")
        } else {
            f.write_str(&names.join("|"))
        }
    }
}

/// CRUD permission on an entity/target pair
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(into = "PermissionWire", from = "PermissionWire")]
pub struct Permission {
    /// Entity (resource type)
    pub entity: Option<String>,

    /// Specific target within the entity
    pub target: Option<String>,

    /// Granted access kinds
    pub access_types: AccessTypes,
}

impl Permission {
    /// Create access flag
    pub fn has_create_access(&self) -> bool {
        self.access_types.contains(AccessTypes::CREATE)
    }

    /// Read access flag
    pub fn has_read_access(&self) -> bool {
        self.access_types.contains(AccessTypes::READ)
    }

    /// Update access flag
    pub fn has_update_access(&self) -> bool {
        self.access_types.contains(AccessTypes::UPDATE)
    }

    /// Delete access flag
    pub fn has_delete_access(&self) -> bool {
        self.access_types.contains(AccessTypes::DELETE)
    }
}

// Wire shape: the derived flags are emitted for clients but ignored on input.
#[derive(Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct PermissionWire {
    entity: Option<String>,
    target: Option<String>,
    access_types: AccessTypes,
    #[serde(default, skip_deserializing)]
    has_create_access: bool,
    #[serde(default, skip_deserializing)]
    has_read_access: bool,
    #[serde(default, skip_deserializing)]
    has_update_access: bool,
    #[serde(default, skip_deserializing)]
    has_delete_access: bool,
}

impl From<Permission> for PermissionWire {
    fn from(p: Permission) -> Self {
        Self {
            has_create_access: p.has_create_access(),
            has_read_access: p.has_read_access(),
            has_update_access: p.has_update_access(),
            has_delete_access: p.has_delete_access(),
            entity: p.entity,
            target: p.target,
            access_types: p.access_types,
        }
    }
}

impl From<PermissionWire> for Permission {
    fn from(w: PermissionWire) -> Self {
        Self {
            entity: w.entity,
            target: w.target,
            access_types: w.access_types,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_flags() {
        let access = AccessTypes::READ | AccessTypes::UPDATE;
        assert!(access.contains(AccessTypes::READ));
        assert!(!access.contains(AccessTypes::DELETE));
        assert_eq!(access.to_string(), "read|update");
        assert_eq!(AccessTypes::NONE.to_string(), "none");
    }

    #[test]
    fn test_single_flag_atoms() {
        assert_eq!(AccessTypes::DELETE.as_atom(), Some("delete"));
        assert_eq!((AccessTypes::READ | AccessTypes::CREATE).as_atom(), None);
        assert_eq!(AccessTypes::parse("Update"), Some(AccessTypes::UPDATE));
        assert_eq!(AccessTypes::from_bits_truncate(0xff), AccessTypes::ALL);
    }

    #[test]
    fn test_derived_access_flags() {
        let permission = Permission {
            entity: Some("document".to_string()),
            target: None,
            access_types: AccessTypes::CREATE | AccessTypes::DELETE,
        };
        assert!(permission.has_create_access());
        assert!(!permission.has_read_access());
        assert!(!permission.has_update_access());
        assert!(permission.has_delete_access());
    }

    #[test]
    fn test_wire_format() {
        let permission = Permission {
            entity: Some("document".to_string()),
            target: Some("report".to_string()),
            access_types: AccessTypes::READ,
        };

        let json = serde_json::to_value(&permission).unwrap();
        assert_eq!(json["entity"], "document");
        assert_eq!(json["accessTypes"], 2);
        assert_eq!(json["hasReadAccess"], true);
        assert_eq!(json["hasCreateAccess"], false);

        let parsed: Permission = serde_json::from_value(json).unwrap();
        assert_eq!(parsed, permission);
    }
}
