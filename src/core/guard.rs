//! Guard predicates over exciters.
//!
//! A guard decides whether one edge of a transition group is eligible for
//! a given stimulus. Guards see only the exciter; state inspection belongs
//! in the states themselves.

/// Boolean predicate over an exciter.
///
/// The engine treats the exciter as opaque and hands it to every guard of
/// the current state's transition group unchanged. Guards should be cheap
/// and deterministic; they may run many times for stimuli that end up
/// rejected.
///
/// # Example
///
/// ```rust
/// use excitable::core::Guard;
///
/// #[derive(PartialEq)]
/// enum Input {
///     Coin,
///     Push,
/// }
///
/// let on_coin = Guard::equals(Input::Coin);
/// assert!(on_coin.check(&Input::Coin));
/// assert!(!on_coin.check(&Input::Push));
///
/// let threshold = Guard::new(|hp: &i32| *hp <= 0);
/// assert!(threshold.check(&-3));
/// assert!(!threshold.check(&10));
/// ```
pub struct Guard<X> {
    predicate: Box<dyn Fn(&X) -> bool + Send + Sync>,
}

impl<X> Guard<X> {
    /// Create a guard from a predicate function.
    pub fn new<F>(predicate: F) -> Self
    where
        F: Fn(&X) -> bool + Send + Sync + 'static,
    {
        Guard {
            predicate: Box::new(predicate),
        }
    }

    /// A guard that holds for every exciter.
    ///
    /// The usual choice for the single unconditional edge out of a state.
    pub fn always() -> Self {
        Guard::new(|_| true)
    }

    /// A guard that holds exactly when the exciter equals `expected`.
    pub fn equals(expected: X) -> Self
    where
        X: PartialEq + Send + Sync + 'static,
    {
        Guard::new(move |exciter| *exciter == expected)
    }

    /// Evaluate the guard against an exciter.
    pub fn check(&self, exciter: &X) -> bool {
        (self.predicate)(exciter)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn custom_predicate_is_applied() {
        let guard = Guard::new(|exciter: &&str| exciter.starts_with("go"));

        assert!(guard.check(&"go"));
        assert!(guard.check(&"go-left"));
        assert!(!guard.check(&"stop"));
    }

    #[test]
    fn always_holds_for_anything() {
        let guard: Guard<u32> = Guard::always();

        assert!(guard.check(&0));
        assert!(guard.check(&u32::MAX));
    }

    #[test]
    fn equals_matches_only_the_expected_value() {
        let guard = Guard::equals(String::from("finish"));

        assert!(guard.check(&String::from("finish")));
        assert!(!guard.check(&String::from("finish-line")));
    }

    #[test]
    fn guard_is_deterministic() {
        let guard = Guard::new(|n: &i32| n % 2 == 0);

        assert_eq!(guard.check(&4), guard.check(&4));
        assert_eq!(guard.check(&5), guard.check(&5));
    }
}
