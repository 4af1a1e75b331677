//! Team role domain type.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::UnknownVariant;

/// Team role of a user, also used to assign tools to audiences.
///
/// Wire and storage format: lowercase string (`"owner"`, `"backend"`, ...).
/// Always compare roles as `Role` values, never as raw strings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Owner,
    Backend,
    Frontend,
    Pm,
    Qa,
    Designer,
}

impl Role {
    /// All roles in declaration order.
    pub const ALL: [Role; 6] = [
        Role::Owner,
        Role::Backend,
        Role::Frontend,
        Role::Pm,
        Role::Qa,
        Role::Designer,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Owner => "owner",
            Self::Backend => "backend",
            Self::Frontend => "frontend",
            Self::Pm => "pm",
            Self::Qa => "qa",
            Self::Designer => "designer",
        }
    }

    /// The owner role moderates submissions and is exempt from role-scoped visibility.
    pub fn is_owner(self) -> bool {
        self == Self::Owner
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Role {
    type Err = UnknownVariant;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|role| role.as_str() == s)
            .ok_or_else(|| UnknownVariant {
                kind: "role",
                value: s.to_owned(),
            })
    }
}
