//! IEEE 802.15.6 user priorities.

use super::error::CatalogError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// User priority tag identifying a protocol class.
///
/// The standard defines eight priorities. A catalog registers parameters
/// for any subset of them.
///
/// # Example
///
/// ```rust
/// use aloha_dtmc::catalog::UserPriority;
///
/// let up5: UserPriority = "UP5".parse().unwrap();
/// assert_eq!(up5, UserPriority::Up5);
/// assert_eq!(up5.to_string(), "UP5");
/// assert!("UP9".parse::<UserPriority>().is_err());
/// ```
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Debug, Serialize, Deserialize)]
pub enum UserPriority {
    #[serde(rename = "UP0")]
    Up0,
    #[serde(rename = "UP1")]
    Up1,
    #[serde(rename = "UP2")]
    Up2,
    #[serde(rename = "UP3")]
    Up3,
    #[serde(rename = "UP4")]
    Up4,
    #[serde(rename = "UP5")]
    Up5,
    #[serde(rename = "UP6")]
    Up6,
    #[serde(rename = "UP7")]
    Up7,
}

impl UserPriority {
    pub const ALL: [UserPriority; 8] = [
        UserPriority::Up0,
        UserPriority::Up1,
        UserPriority::Up2,
        UserPriority::Up3,
        UserPriority::Up4,
        UserPriority::Up5,
        UserPriority::Up6,
        UserPriority::Up7,
    ];

    /// Canonical textual tag, e.g. `"UP0"`.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Up0 => "UP0",
            Self::Up1 => "UP1",
            Self::Up2 => "UP2",
            Self::Up3 => "UP3",
            Self::Up4 => "UP4",
            Self::Up5 => "UP5",
            Self::Up6 => "UP6",
            Self::Up7 => "UP7",
        }
    }
}

impl fmt::Display for UserPriority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for UserPriority {
    type Err = CatalogError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|p| p.as_str() == s)
            .ok_or_else(|| CatalogError::UnknownClass { id: s.to_string() })
    }
}
