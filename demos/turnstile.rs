//! Turnstile State Machine
//!
//! This example demonstrates a minimal cyclic machine driven by exciters.
//!
//! Key concepts:
//! - Exciters as plain enum values
//! - Equality guards
//! - Silent rejection of stimuli no guard accepts
//!
//! Run with: cargo run --example turnstile

use excitable::builder::StateMachineBuilder;
use excitable::core::Guard;
use excitable::machine::GuardedTransitionGroup;
use excitable::state;

state! {
    struct Locked => "locked";
    struct Unlocked => "unlocked";
}

#[derive(Clone, Copy, Debug, PartialEq)]
enum Input {
    Coin,
    Push,
}

fn main() {
    println!("=== Turnstile State Machine ===\n");

    let mut turnstile = StateMachineBuilder::new()
        .state(Locked::default())
        .state(Unlocked::default())
        .group(
            "locked",
            GuardedTransitionGroup::new().edge("unlocked", Guard::equals(Input::Coin)),
        )
        .group(
            "unlocked",
            GuardedTransitionGroup::new().edge("locked", Guard::equals(Input::Push)),
        )
        .start("locked")
        .build()
        .unwrap();

    turnstile.reset(false).unwrap();
    println!("Initial state: {:?}\n", turnstile.current_state_id().unwrap());

    for input in [Input::Push, Input::Coin, Input::Coin, Input::Push] {
        let moved = turnstile.next(&input).unwrap();
        println!(
            "{:?}: {} -> now {:?}",
            input,
            if moved { "accepted" } else { "rejected" },
            turnstile.current_state_id().unwrap()
        );
    }

    println!("\nNo end state is configured, so the turnstile cycles forever.");
    println!("Rejected inputs are silent: no hook fires, nothing changes.");

    println!("\n=== Example Complete ===");
}
