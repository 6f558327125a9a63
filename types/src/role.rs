//! The fixed set of permission roles.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::TypesError;

/// A permission role. ADMIN governs membership of every role, itself included.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Role {
    /// Grants and revokes roles.
    Admin,
    /// Mints new supply up to the cap.
    Minter,
    /// Pauses and unpauses balance movements.
    Pauser,
    /// Edits the rescue whitelist and blacklist.
    Params,
    /// Rescues misdirected assets.
    Operator,
}

impl Role {
    pub const ALL: [Role; 5] = [
        Role::Admin,
        Role::Minter,
        Role::Pauser,
        Role::Params,
        Role::Operator,
    ];

    /// Canonical role name.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Admin => "ADMIN_ROLE",
            Self::Minter => "MINTER_ROLE",
            Self::Pauser => "PAUSER_ROLE",
            Self::Params => "PARAMS_ROLE",
            Self::Operator => "OPERATOR_ROLE",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Role {
    type Err = TypesError;

    /// Accepts the canonical name or the short form (`minter`, `MINTER`, ...).
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let upper = s.to_ascii_uppercase();
        let short = upper.strip_suffix("_ROLE").unwrap_or(&upper);
        match short {
            "ADMIN" => Ok(Self::Admin),
            "MINTER" => Ok(Self::Minter),
            "PAUSER" => Ok(Self::Pauser),
            "PARAMS" => Ok(Self::Params),
            "OPERATOR" => Ok(Self::Operator),
            _ => Err(TypesError::UnknownRole(s.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn name_round_trips_through_parse() {
        for role in Role::ALL {
            assert_eq!(role.name().parse::<Role>().unwrap(), role);
        }
    }

    #[test]
    fn short_names_parse() {
        assert_eq!("minter".parse::<Role>().unwrap(), Role::Minter);
        assert_eq!("Operator".parse::<Role>().unwrap(), Role::Operator);
    }

    #[test]
    fn unknown_role_rejected() {
        assert!(matches!(
            "burner".parse::<Role>(),
            Err(TypesError::UnknownRole(name)) if name == "burner"
        ));
    }
}
