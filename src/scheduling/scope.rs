use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Projection of an assignment used to test slot exclusivity.
///
/// The scope key always contains the day and the time slot. Whether the
/// class-section discriminator participates is deployment configuration:
/// under `Section` two sessions may share a laboratory slot as long as their
/// sections differ, under `SlotOnly` the slot alone decides.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ConflictScope {
    /// Day and time slot only; the section tag is ignored.
    SlotOnly,
    /// Day, time slot and section tag.
    #[default]
    Section,
}

impl ConflictScope {
    pub fn as_str(&self) -> &'static str {
        match self {
            ConflictScope::SlotOnly => "slot_only",
            ConflictScope::Section => "section",
        }
    }
}

impl fmt::Display for ConflictScope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ConflictScope {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "slot_only" | "slot" => Ok(ConflictScope::SlotOnly),
            "section" => Ok(ConflictScope::Section),
            other => Err(format!("Unknown conflict scope: {}", other)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::ConflictScope;
    use std::str::FromStr;

    #[test]
    fn test_parse_variants() {
        assert_eq!(
            ConflictScope::from_str("slot_only").unwrap(),
            ConflictScope::SlotOnly
        );
        assert_eq!(
            ConflictScope::from_str("slot").unwrap(),
            ConflictScope::SlotOnly
        );
        assert_eq!(
            ConflictScope::from_str("Section").unwrap(),
            ConflictScope::Section
        );
        assert!(ConflictScope::from_str("term").is_err());
    }

    #[test]
    fn test_default_includes_section() {
        assert_eq!(ConflictScope::default(), ConflictScope::Section);
    }
}
