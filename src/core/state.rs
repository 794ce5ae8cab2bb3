//! Core State trait for machine-owned states.
//!
//! A state is a named unit of behavior with lifecycle hooks and an
//! ephemeral per-visit scratch store. Concrete states are supplied by the
//! embedding application; the engine depends only on this trait.

use crate::core::store::VolatileStore;

/// Capability trait for a state registered in a [`StateMachine`].
///
/// The machine addresses states by [`identifier`] and drives the four
/// lifecycle operations; everything else about a state is the embedding
/// application's business. All hooks default to no-ops, so a trivial state
/// only has to supply its identifier and volatile-store accessors (or use
/// the [`state!`] macro, which generates exactly that).
///
/// A state instance belongs to exactly one machine: entry and exit mutate
/// its volatile store, so sharing an instance across machines is not
/// meaningful. The `Send` bound lets a machine be moved onto the dedicated
/// thread that drives it.
///
/// [`StateMachine`]: crate::machine::StateMachine
/// [`identifier`]: State::identifier
/// [`state!`]: crate::state!
///
/// # Example
///
/// ```rust
/// use excitable::core::{State, VolatileStore};
///
/// /// Splash screen that counts down before handing over to the menu.
/// #[derive(Default)]
/// struct Splash {
///     ticks_left: u32,
///     volatile: VolatileStore,
/// }
///
/// impl State for Splash {
///     fn identifier(&self) -> &str {
///         "splash"
///     }
///
///     fn before_entry(&mut self) {
///         self.ticks_left = 120;
///     }
///
///     fn update(&mut self) {
///         self.ticks_left = self.ticks_left.saturating_sub(1);
///     }
///
///     fn reset(&mut self) {
///         self.ticks_left = 0;
///     }
///
///     fn volatile(&self) -> &VolatileStore {
///         &self.volatile
///     }
///
///     fn volatile_mut(&mut self) -> &mut VolatileStore {
///         &mut self.volatile
///     }
/// }
/// ```
pub trait State: Send {
    /// The state's identifier, unique within one machine.
    ///
    /// Used as the registry key and as the transition-group key. Must be
    /// stable for the lifetime of the state.
    fn identifier(&self) -> &str;

    /// Invoked exactly once per visit, immediately after the machine adopts
    /// this state as current and after the volatile store has been cleared.
    fn before_entry(&mut self) {}

    /// Invoked exactly once per visit, immediately before the machine
    /// abandons this state as current. Must not assume any particular
    /// successor.
    fn before_leave(&mut self) {}

    /// Per-tick work while this state is current. Invoked zero or more
    /// times between entry and leave; transitions are driven only through
    /// [`StateMachine::next`], never from here.
    ///
    /// [`StateMachine::next`]: crate::machine::StateMachine::next
    fn update(&mut self) {}

    /// Clears persistent fields back to their initial values.
    ///
    /// Not invoked automatically except by
    /// [`StateMachine::reset`](crate::machine::StateMachine::reset) with
    /// `reset_states = true`. The volatile store is not this method's
    /// concern; the machine clears it on every entry.
    fn reset(&mut self) {}

    /// The per-visit scratch store.
    fn volatile(&self) -> &VolatileStore;

    /// Mutable access to the per-visit scratch store.
    fn volatile_mut(&mut self) -> &mut VolatileStore;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Default)]
    struct Splash {
        ticks_left: u32,
        volatile: VolatileStore,
    }

    impl State for Splash {
        fn identifier(&self) -> &str {
            "splash"
        }

        fn before_entry(&mut self) {
            self.ticks_left = 120;
        }

        fn update(&mut self) {
            self.ticks_left = self.ticks_left.saturating_sub(1);
        }

        fn reset(&mut self) {
            self.ticks_left = 0;
        }

        fn volatile(&self) -> &VolatileStore {
            &self.volatile
        }

        fn volatile_mut(&mut self) -> &mut VolatileStore {
            &mut self.volatile
        }
    }

    #[derive(Default)]
    struct Inert {
        volatile: VolatileStore,
    }

    impl State for Inert {
        fn identifier(&self) -> &str {
            "inert"
        }

        fn volatile(&self) -> &VolatileStore {
            &self.volatile
        }

        fn volatile_mut(&mut self) -> &mut VolatileStore {
            &mut self.volatile
        }
    }

    #[test]
    fn identifier_is_stable() {
        let state = Splash::default();
        assert_eq!(state.identifier(), "splash");
        assert_eq!(state.identifier(), "splash");
    }

    #[test]
    fn hooks_drive_persistent_fields() {
        let mut state = Splash::default();
        state.before_entry();
        assert_eq!(state.ticks_left, 120);

        state.update();
        state.update();
        assert_eq!(state.ticks_left, 118);

        state.reset();
        assert_eq!(state.ticks_left, 0);
    }

    #[test]
    fn default_hooks_are_no_ops() {
        let mut state = Inert::default();
        state.before_entry();
        state.before_leave();
        state.update();
        state.reset();
        assert!(state.volatile().is_empty());
    }

    #[test]
    fn reset_leaves_volatile_store_alone() {
        let mut state = Splash::default();
        state.volatile_mut().set("score", 17u32).unwrap();

        state.reset();
        assert_eq!(state.volatile().get::<u32>("score").unwrap(), Some(17));
    }
}
