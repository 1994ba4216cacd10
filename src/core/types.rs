//! Core type definitions used throughout the codebase

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Unique identifier for a duel match
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct MatchId(pub Uuid);

impl MatchId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for MatchId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for MatchId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// External chat-platform identity of a live participant
///
/// Opaque to the core: the platform adapter hands these out and the ledger
/// keys wallets by them. Policy-controlled participants have none.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ActorId(pub String);

impl ActorId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }
}

impl std::fmt::Display for ActorId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for ActorId {
    fn from(id: &str) -> Self {
        Self(id.to_string())
    }
}

/// Currency unit (chips)
pub type Chips = u64;

/// Experience points
pub type Xp = u64;

/// Milliseconds since the unix epoch, as the ledger stamps records
pub type TimestampMs = u64;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_match_id_unique() {
        let a = MatchId::new();
        let b = MatchId::new();
        assert_ne!(a, b);
    }

    #[test]
    fn test_actor_id_equality_and_hash() {
        use std::collections::HashMap;
        let a = ActorId::from("1234");
        let b = ActorId::new("1234");
        assert_eq!(a, b);

        let mut map: HashMap<ActorId, Chips> = HashMap::new();
        map.insert(a, 5000);
        assert_eq!(map.get(&b), Some(&5000));
    }
}
