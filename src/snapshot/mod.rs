//! Control-position snapshots for state machines.
//!
//! A machine's states are live trait objects and cannot be serialized;
//! what can is its control position: the start/current/end handles and
//! the set of registered identifiers. A [`Snapshot`] captures exactly
//! that, so a long-running application can persist where each machine
//! stands and re-apply it to an identically configured machine after a
//! restart.
//!
//! Applying a snapshot moves handles only: no lifecycle hook fires and no
//! volatile store is cleared beyond what the handle setters already do.

use crate::machine::StateMachine;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

pub mod error;

pub use error::SnapshotError;

/// Version identifier for the snapshot format
pub const SNAPSHOT_VERSION: u32 = 1;

/// Serializable capture of a machine's control position.
///
/// # Example
///
/// ```rust
/// use excitable::builder::StateMachineBuilder;
/// use excitable::machine::GuardedTransitionGroup;
/// use excitable::snapshot::Snapshot;
/// use excitable::state;
///
/// state! {
///     struct Menu => "menu";
///     struct Playing => "playing";
/// }
///
/// fn fresh_machine() -> excitable::machine::StateMachine<&'static str> {
///     StateMachineBuilder::new()
///         .state(Menu::default())
///         .state(Playing::default())
///         .group(
///             "menu",
///             GuardedTransitionGroup::new().when("playing", |x: &&str| *x == "start"),
///         )
///         .start("menu")
///         .build()
///         .unwrap()
/// }
///
/// let mut machine = fresh_machine();
/// machine.reset(false).unwrap();
/// machine.next(&"start").unwrap();
///
/// let json = Snapshot::capture(&machine).to_json().unwrap();
///
/// // later, in a new process, on an identically configured machine
/// let mut restored = fresh_machine();
/// Snapshot::from_json(&json).unwrap().apply(&mut restored).unwrap();
/// assert_eq!(restored.current_state_id(), Some("playing"));
/// ```
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Snapshot {
    /// Snapshot format version
    pub version: u32,

    /// Unique snapshot identifier
    pub id: String,

    /// When the snapshot was taken
    pub timestamp: DateTime<Utc>,

    /// Start handle at capture time
    pub start_state: Option<String>,

    /// Current handle at capture time
    pub current_state: Option<String>,

    /// End handle at capture time
    pub end_state: Option<String>,

    /// Identifiers registered at capture time, sorted
    pub states: Vec<String>,
}

impl Snapshot {
    /// Capture the control position of `machine`.
    pub fn capture<X>(machine: &StateMachine<X>) -> Self {
        let mut states: Vec<String> = machine.state_ids().map(str::to_string).collect();
        states.sort_unstable();
        Self {
            version: SNAPSHOT_VERSION,
            id: Uuid::new_v4().to_string(),
            timestamp: Utc::now(),
            start_state: machine.start_state_id().map(str::to_string),
            current_state: machine.current_state_id().map(str::to_string),
            end_state: machine.end_state_id().map(str::to_string),
            states,
        }
    }

    /// Re-apply this position onto `machine`.
    ///
    /// Every handle carried by the snapshot must resolve in the target
    /// machine's registry; nothing is mutated on failure. The snapshot is
    /// validated against the live registry rather than trusted, since the
    /// machine may have been configured differently than at capture time.
    pub fn apply<X>(&self, machine: &mut StateMachine<X>) -> Result<(), SnapshotError> {
        if self.version != SNAPSHOT_VERSION {
            return Err(SnapshotError::UnsupportedVersion {
                found: self.version,
                supported: SNAPSHOT_VERSION,
            });
        }
        for (role, handle) in [
            ("start", &self.start_state),
            ("current", &self.current_state),
            ("end", &self.end_state),
        ] {
            if let Some(identifier) = handle {
                if !machine.contains(identifier) {
                    return Err(SnapshotError::UnresolvedHandle {
                        role,
                        identifier: identifier.clone(),
                    });
                }
            }
        }

        if let Some(start) = &self.start_state {
            machine
                .set_start_state_id(start)
                .expect("handle was validated above");
        }
        if let Some(current) = &self.current_state {
            machine
                .set_current_state_id(current)
                .expect("handle was validated above");
        }
        if let Some(end) = &self.end_state {
            machine
                .set_end_state_id(end)
                .expect("handle was validated above");
        }
        Ok(())
    }

    /// Encode as JSON.
    pub fn to_json(&self) -> Result<String, SnapshotError> {
        serde_json::to_string_pretty(self)
            .map_err(|e| SnapshotError::SerializationFailed(e.to_string()))
    }

    /// Decode from JSON.
    pub fn from_json(json: &str) -> Result<Self, SnapshotError> {
        serde_json::from_str(json).map_err(|e| SnapshotError::DeserializationFailed(e.to_string()))
    }

    /// Encode as compact binary.
    pub fn to_binary(&self) -> Result<Vec<u8>, SnapshotError> {
        bincode::serialize(self).map_err(|e| SnapshotError::SerializationFailed(e.to_string()))
    }

    /// Decode from binary.
    pub fn from_binary(bytes: &[u8]) -> Result<Self, SnapshotError> {
        bincode::deserialize(bytes)
            .map_err(|e| SnapshotError::DeserializationFailed(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::builder::StateMachineBuilder;
    use crate::machine::GuardedTransitionGroup;
    use crate::state;

    state! {
        struct Menu => "menu";
        struct Playing => "playing";
        struct GameOver => "game-over";
    }

    fn flow_machine() -> StateMachine<&'static str> {
        StateMachineBuilder::new()
            .state(Menu::default())
            .state(Playing::default())
            .state(GameOver::default())
            .group(
                "menu",
                GuardedTransitionGroup::new().when("playing", |x: &&str| *x == "start"),
            )
            .group(
                "playing",
                GuardedTransitionGroup::new().when("game-over", |x: &&str| *x == "died"),
            )
            .start("menu")
            .end("game-over")
            .build()
            .unwrap()
    }

    #[test]
    fn capture_records_the_position() {
        let mut machine = flow_machine();
        machine.reset(false).unwrap();
        machine.next(&"start").unwrap();

        let snapshot = Snapshot::capture(&machine);

        assert_eq!(snapshot.version, SNAPSHOT_VERSION);
        assert_eq!(snapshot.start_state.as_deref(), Some("menu"));
        assert_eq!(snapshot.current_state.as_deref(), Some("playing"));
        assert_eq!(snapshot.end_state.as_deref(), Some("game-over"));
        assert_eq!(snapshot.states, vec!["game-over", "menu", "playing"]);
    }

    #[test]
    fn apply_restores_the_position_without_hooks() {
        let mut machine = flow_machine();
        machine.reset(false).unwrap();
        machine.next(&"start").unwrap();
        let snapshot = Snapshot::capture(&machine);

        let mut restored = flow_machine();
        snapshot.apply(&mut restored).unwrap();

        assert_eq!(restored.current_state_id(), Some("playing"));
        assert_eq!(restored.start_state_id(), Some("menu"));
        assert_eq!(restored.end_state_id(), Some("game-over"));
        assert!(!restored.halted());

        // the restored machine keeps driving from where it stood
        assert!(restored.next(&"died").unwrap());
        assert!(restored.halted());
    }

    #[test]
    fn apply_rejects_unknown_handles() {
        let mut machine = flow_machine();
        machine.reset(false).unwrap();
        let snapshot = Snapshot::capture(&machine);

        let mut sparse: StateMachine<&str> = StateMachine::new();
        let err = snapshot.apply(&mut sparse).unwrap_err();

        assert!(matches!(
            err,
            SnapshotError::UnresolvedHandle { role: "start", .. }
        ));
        // nothing was applied
        assert!(sparse.start_state_id().is_none());
        assert!(sparse.current_state_id().is_none());
    }

    #[test]
    fn apply_rejects_a_foreign_version() {
        let machine = flow_machine();
        let mut snapshot = Snapshot::capture(&machine);
        snapshot.version = 99;

        let mut target = flow_machine();
        let err = snapshot.apply(&mut target).unwrap_err();

        assert!(matches!(
            err,
            SnapshotError::UnsupportedVersion { found: 99, supported: SNAPSHOT_VERSION }
        ));
    }

    #[test]
    fn json_round_trip_preserves_the_snapshot() {
        let mut machine = flow_machine();
        machine.reset(false).unwrap();
        let snapshot = Snapshot::capture(&machine);

        let decoded = Snapshot::from_json(&snapshot.to_json().unwrap()).unwrap();

        assert_eq!(decoded.id, snapshot.id);
        assert_eq!(decoded.current_state, snapshot.current_state);
        assert_eq!(decoded.states, snapshot.states);
    }

    #[test]
    fn binary_round_trip_preserves_the_snapshot() {
        let machine = flow_machine();
        let snapshot = Snapshot::capture(&machine);

        let decoded = Snapshot::from_binary(&snapshot.to_binary().unwrap()).unwrap();

        assert_eq!(decoded.id, snapshot.id);
        assert_eq!(decoded.states, snapshot.states);
    }

    #[test]
    fn malformed_json_is_a_decode_error() {
        assert!(matches!(
            Snapshot::from_json("{not json"),
            Err(SnapshotError::DeserializationFailed(_))
        ));
    }

    #[test]
    fn snapshot_ids_are_unique() {
        let machine = flow_machine();
        let a = Snapshot::capture(&machine);
        let b = Snapshot::capture(&machine);
        assert_ne!(a.id, b.id);
    }
}
