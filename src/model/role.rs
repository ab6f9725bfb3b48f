use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

/// Closed role set. Tokens carry the string form; anything else is
/// rejected before a handler runs.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Serialize, Deserialize, Display, EnumString)]
pub enum Role {
    Faculty,
    #[serde(rename = "HOD")]
    #[strum(serialize = "HOD")]
    Hod,
    Admin,
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn role_literals_round_trip() {
        assert_eq!(Role::Hod.to_string(), "HOD");
        assert_eq!(Role::from_str("HOD").unwrap(), Role::Hod);
        assert_eq!(Role::from_str("Faculty").unwrap(), Role::Faculty);
        assert_eq!(Role::from_str("Admin").unwrap(), Role::Admin);
        assert!(Role::from_str("Hr").is_err());
    }
}
