//! Game Flow State Machine
//!
//! This example demonstrates the engine driving a game's screen flow.
//!
//! Key concepts:
//! - Custom states with persistent fields and lifecycle hooks
//! - Per-visit volatile storage, cleared on every entry
//! - Per-tick work through update()
//! - Halt on reaching the end state; reset() to revive
//!
//! Run with: cargo run --example game_flow

use excitable::builder::StateMachineBuilder;
use excitable::core::{Guard, State, VolatileStore};
use excitable::machine::GuardedTransitionGroup;
use excitable::state;

state! {
    struct Menu => "menu";
    struct GameOver => "game-over";
}

/// The actual play session: counts frames across visits, keeps the
/// running score in volatile storage so every new session starts at zero.
#[derive(Default)]
struct Playing {
    total_frames: u64,
    volatile: VolatileStore,
}

impl State for Playing {
    fn identifier(&self) -> &str {
        "playing"
    }

    fn before_entry(&mut self) {
        self.volatile.set("score", 0u32).unwrap();
    }

    fn update(&mut self) {
        self.total_frames += 1;
        let score: u32 = self.volatile.get("score").unwrap().unwrap_or(0);
        self.volatile.set("score", score + 10).unwrap();
    }

    fn reset(&mut self) {
        self.total_frames = 0;
    }

    fn volatile(&self) -> &VolatileStore {
        &self.volatile
    }

    fn volatile_mut(&mut self) -> &mut VolatileStore {
        &mut self.volatile
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
enum GameEvent {
    StartPressed,
    PlayerDied,
}

fn main() {
    println!("=== Game Flow State Machine ===\n");

    let mut flow = StateMachineBuilder::new()
        .state(Menu::default())
        .state(Playing::default())
        .state(GameOver::default())
        .group(
            "menu",
            GuardedTransitionGroup::new().edge("playing", Guard::equals(GameEvent::StartPressed)),
        )
        .group(
            "playing",
            GuardedTransitionGroup::new().edge("game-over", Guard::equals(GameEvent::PlayerDied)),
        )
        .start("menu")
        .end("game-over")
        .build()
        .unwrap();

    flow.reset(false).unwrap();
    println!("Booted into: {}", flow.current_state_id().unwrap());

    flow.next(&GameEvent::StartPressed).unwrap();
    println!("Start pressed -> {}", flow.current_state_id().unwrap());

    // the driving loop ticks the current state between stimuli
    for _ in 0..5 {
        flow.update();
    }
    let score: u32 = flow
        .get("playing")
        .unwrap()
        .volatile()
        .get("score")
        .unwrap()
        .unwrap();
    println!("After 5 ticks the session score is {score}");

    flow.next(&GameEvent::PlayerDied).unwrap();
    println!("Player died -> {}", flow.current_state_id().unwrap());
    println!("Machine halted: {}", flow.halted());

    // stimuli bounce off a halted machine; only reset revives it
    assert!(!flow.next(&GameEvent::StartPressed).unwrap());
    flow.reset(false).unwrap();
    println!("\nreset() -> back at {}", flow.current_state_id().unwrap());

    flow.next(&GameEvent::StartPressed).unwrap();
    let fresh_score: u32 = flow
        .get("playing")
        .unwrap()
        .volatile()
        .get("score")
        .unwrap()
        .unwrap();
    println!("New session starts with score {fresh_score} (volatile store was cleared on entry)");

    println!("\n=== Example Complete ===");
}
