//! Macros for ergonomic state declaration.

/// Declare plain states: a struct with an embedded volatile store, a fixed
/// identifier, and default (no-op) lifecycle hooks.
///
/// States that carry persistent fields or override hooks implement
/// [`State`](crate::core::State) by hand instead.
///
/// # Example
///
/// ```
/// use excitable::core::State;
/// use excitable::state;
///
/// state! {
///     /// Title screen.
///     pub struct Title => "title";
///     struct Credits => "credits";
/// }
///
/// let title = Title::default();
/// assert_eq!(title.identifier(), "title");
/// ```
#[macro_export]
macro_rules! state {
    (
        $(
            $(#[$meta:meta])*
            $vis:vis struct $name:ident => $identifier:literal;
        )+
    ) => {
        $(
            $(#[$meta])*
            #[derive(Default)]
            $vis struct $name {
                volatile: $crate::core::VolatileStore,
            }

            impl $crate::core::State for $name {
                fn identifier(&self) -> &str {
                    $identifier
                }

                fn volatile(&self) -> &$crate::core::VolatileStore {
                    &self.volatile
                }

                fn volatile_mut(&mut self) -> &mut $crate::core::VolatileStore {
                    &mut self.volatile
                }
            }
        )+
    };
}

#[cfg(test)]
mod tests {
    use crate::core::State;

    state! {
        /// A doc-commented state.
        pub struct Lobby => "lobby";
        struct Arena => "arena";
    }

    #[test]
    fn generated_states_report_their_identifier() {
        assert_eq!(Lobby::default().identifier(), "lobby");
        assert_eq!(Arena::default().identifier(), "arena");
    }

    #[test]
    fn generated_hooks_default_to_no_ops() {
        let mut lobby = Lobby::default();
        lobby.before_entry();
        lobby.before_leave();
        lobby.update();
        lobby.reset();
        assert!(lobby.volatile().is_empty());
    }

    #[test]
    fn generated_states_carry_a_working_store() {
        let mut arena = Arena::default();
        arena.volatile_mut().set("round", 2u8).unwrap();
        assert_eq!(arena.volatile().get::<u8>("round").unwrap(), Some(2));
    }
}
