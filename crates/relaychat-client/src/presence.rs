//! Online presence.
//!
//! The server broadcasts the full roster whenever anyone joins or leaves.
//! The tracker holds only the latest snapshot; there is no incremental
//! join/leave tracking.

use std::collections::HashSet;

/// Latest known set of online users.
///
/// Stores the server's snapshot verbatim, including the local user.
/// Filtering the local user out is a presentation concern.
#[derive(Debug, Clone, Default)]
pub struct PresenceTracker {
    roster: Vec<String>,
    online: HashSet<String>,
}

impl PresenceTracker {
    /// Create an empty tracker.
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the roster wholesale with a new snapshot.
    pub fn replace_roster(&mut self, roster: Vec<String>) {
        self.online = roster.iter().cloned().collect();
        self.roster = roster;
    }

    /// Whether `username` appears in the latest snapshot.
    pub fn is_online(&self, username: &str) -> bool {
        self.online.contains(username)
    }

    /// Latest snapshot, in server order.
    pub fn roster(&self) -> &[String] {
        &self.roster
    }

    /// Forget the roster.
    pub fn clear(&mut self) {
        self.roster.clear();
        self.online.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn replace_is_wholesale() {
        let mut presence = PresenceTracker::new();
        presence.replace_roster(vec!["alice".into(), "bob".into()]);
        presence.replace_roster(vec!["alice".into(), "carol".into()]);

        assert_eq!(presence.roster(), ["alice", "carol"]);
        assert!(!presence.is_online("bob"));
        assert!(presence.is_online("carol"));
    }

    #[test]
    fn empty_snapshot_clears_roster() {
        let mut presence = PresenceTracker::new();
        presence.replace_roster(vec!["alice".into()]);
        presence.replace_roster(Vec::new());

        assert!(presence.roster().is_empty());
        assert!(!presence.is_online("alice"));
    }
}
