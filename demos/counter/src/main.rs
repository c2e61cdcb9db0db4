//! Counter demo binary
//!
//! Walks a counter through its handler map and prints every transition.

use counter::{counter_creators, counter_reducer};
use foldux_core::{Action, ConfigError};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

fn main() -> Result<(), ConfigError> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "counter=debug,foldux_core=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    println!("=== Counter Demo: Declarative Handler Maps ===\n");

    let reducer = counter_reducer()?;
    let creators = counter_creators()?;
    tracing::info!("counter reducer ready");

    println!("Initial count: {}", reducer.default_state().counter);

    println!("\n>>> Sending: increment (payload 7)");
    let mut state = reducer.reduce(None, &Action::new("increment").with_payload(7));
    println!("Count: {}", state.counter);

    println!("\n>>> Sending: decrement (default amount)");
    state = reducer.reduce(Some(state), &Action::new("decrement"));
    println!("Count: {}", state.counter);

    if let Some(set) = creators.get("counter/set") {
        println!("\n>>> Sending: counter/set to 41 (minted by a creator)");
        state = reducer.reduce(Some(state), &set.of(41));
        println!("Count: {}", state.counter);

        println!("\n>>> Sending: failed counter/set (failure path is a no-op)");
        state = reducer.reduce(Some(state), &set.failure(503));
        println!("Count: {}", state.counter);
    }

    println!("\n>>> Sending: counter/reset");
    state = reducer.reduce(Some(state), &Action::new("counter/reset"));
    println!("Count: {}", state.counter);

    println!("\n>>> Sending: unknown (no handler, state passes through)");
    state = reducer.reduce(Some(state), &Action::new("unknown"));
    println!("Count: {}", state.counter);

    println!("\n=== Demo Complete ===");
    println!("\nKey concepts demonstrated:");
    println!("  • HandlerMap: transitions declared as key => handler entries");
    println!("  • Flattening: nested keys join into `counter/reset`, `counter/set`");
    println!("  • Failure routing: pair handlers split success and failure paths");
    println!("  • Creators: minted actions match string keys by canonical form");

    Ok(())
}
