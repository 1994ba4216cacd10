//! Live-actor lookup for opponent resolution
//!
//! The chat-platform adapter supplies the directory; the arena only asks it
//! one question. A name that resolves binds the opponent slot to that actor;
//! a name that does not silently falls back to policy control.

use crate::core::types::ActorId;

/// A live actor the directory knows about
#[derive(Debug, Clone)]
pub struct ActorProfile {
    pub id: ActorId,
    /// Account name
    pub username: String,
    /// Server-local display name, preferred for rendering
    pub display_name: String,
}

/// Name-to-actor resolution, injected into the arena
pub trait ActorDirectory: Send + Sync {
    /// Case-insensitive exact match on username or display name
    fn resolve(&self, name: &str) -> Option<ActorProfile>;
}

/// Directory over a fixed roster
#[derive(Debug, Default)]
pub struct StaticDirectory {
    actors: Vec<ActorProfile>,
}

impl StaticDirectory {
    pub fn new(actors: Vec<ActorProfile>) -> Self {
        Self { actors }
    }
}

impl ActorDirectory for StaticDirectory {
    fn resolve(&self, name: &str) -> Option<ActorProfile> {
        let lowered = name.to_lowercase();
        self.actors
            .iter()
            .find(|a| {
                a.username.to_lowercase() == lowered || a.display_name.to_lowercase() == lowered
            })
            .cloned()
    }
}

/// Directory that resolves nothing; every opponent becomes policy-controlled
#[derive(Debug, Default, Clone, Copy)]
pub struct EmptyDirectory;

impl ActorDirectory for EmptyDirectory {
    fn resolve(&self, _name: &str) -> Option<ActorProfile> {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn directory() -> StaticDirectory {
        StaticDirectory::new(vec![ActorProfile {
            id: ActorId::from("42"),
            username: "elena_v".into(),
            display_name: "Elena".into(),
        }])
    }

    #[test]
    fn test_resolves_either_name_field_case_insensitively() {
        let dir = directory();
        assert!(dir.resolve("ELENA").is_some());
        assert!(dir.resolve("Elena_V").is_some());
        assert!(dir.resolve("unknown").is_none());
    }

    #[test]
    fn test_no_partial_matches() {
        let dir = directory();
        assert!(dir.resolve("Elen").is_none());
    }
}
