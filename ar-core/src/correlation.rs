//! Typed wrapper for the id that ties every event in a turn together.

use std::fmt;

/// Opaque identifier shared by every event appended during a single turn.
///
/// Typed so it can't be confused with an agent name or a tool name at a
/// call site — it's just a string underneath, same as the teacher's
/// `AgentId`/`SessionId` wrappers.
#[derive(Debug, Clone, Hash, Eq, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct CorrelationId(pub String);

impl CorrelationId {
    /// Generate a fresh id: `"CID-"` followed by 12 lowercase hex digits.
    pub fn generate() -> Self {
        let hex = uuid::Uuid::new_v4().simple().to_string();
        Self(format!("CID-{}", &hex[..12]))
    }

    /// Borrow the inner string.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for CorrelationId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for CorrelationId {
    fn from(s: &str) -> Self {
        Self(s.to_owned())
    }
}

impl From<String> for CorrelationId {
    fn from(s: String) -> Self {
        Self(s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn generate_has_cid_prefix_and_12_hex_digits() {
        let id = CorrelationId::generate();
        assert!(id.0.starts_with("CID-"));
        assert_eq!(id.0.len(), "CID-".len() + 12);
        assert!(id.0[4..].chars().all(|c| c.is_ascii_hexdigit()));
    }

    #[test]
    fn generate_is_not_constant() {
        assert_ne!(CorrelationId::generate(), CorrelationId::generate());
    }
}
