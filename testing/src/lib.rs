//! # Foldux Testing
//!
//! Testing utilities and helpers for foldux reducers.
//!
//! This crate provides:
//! - A fluent Given-When-Then harness for reducer scenarios
//! - Assertion helpers for transitions and default-state behavior
//! - Property-based testing strategies for keys and actions
//! - Tracing setup for test runs
//!
//! ## Example
//!
//! ```
//! use foldux_core::{create_reducer, Action, HandlerMap};
//! use foldux_testing::ReducerTest;
//!
//! #[derive(Clone, Debug, PartialEq)]
//! struct CounterState {
//!     counter: i64,
//! }
//!
//! let reducer = create_reducer(
//!     HandlerMap::new().on("increment", |state: CounterState, action: &Action<i64>| {
//!         CounterState {
//!             counter: state.counter + action.payload().copied().unwrap_or(0),
//!         }
//!     }),
//!     CounterState { counter: 0 },
//! )?;
//!
//! ReducerTest::new(reducer)
//!     .given_state(CounterState { counter: 3 })
//!     .when_action(Action::new("increment").with_payload(7))
//!     .then_state(|state| assert_eq!(state.counter, 10))
//!     .run();
//! # Ok::<(), foldux_core::ConfigError>(())
//! ```


/// Property-based testing strategies for keys and actions.
///
/// The strategies here generate the raw material of reducer scenarios:
/// short key segments, divider-joined paths, and payload-carrying actions
/// over a fixed set of type names.
pub mod properties {
    use foldux_core::action::Action;
    use proptest::prelude::*;

    /// Strategy producing short lowercase key segments.
    pub fn arb_segment() -> impl Strategy<Value = String> {
        "[a-z]{1,8}"
    }

    /// Strategy producing key paths of one to `depth` slash-joined
    /// segments.
    pub fn arb_path(depth: usize) -> impl Strategy<Value = String> {
        prop::collection::vec(arb_segment(), 1..=depth.max(1))
            .prop_map(|segments| segments.join("/"))
    }

    /// Strategy producing payload-carrying actions over the given type
    /// names, marking roughly half of them as failures.
    ///
    /// # Panics
    ///
    /// Panics when `names` is empty.
    pub fn arb_action(names: Vec<String>) -> impl Strategy<Value = Action<i64>> {
        let len = names.len();
        assert!(!names.is_empty(), "arb_action needs at least one type name");
        (0..len, any::<i64>(), any::<bool>()).prop_map(move |(index, payload, failed)| {
            let action = Action::new(names[index].as_str()).with_payload(payload);
            if failed {
                action.with_failure()
            } else {
                action
            }
        })
    }
}

/// Install a compact tracing subscriber for test runs.
///
/// Respects `RUST_LOG` when set and captures output per test. Repeated
/// calls are a no-op, so every test can call this without coordination.
pub fn init_test_logging() {
    use tracing_subscriber::layer::SubscriberExt;
    use tracing_subscriber::util::SubscriberInitExt;
    use tracing_subscriber::EnvFilter;

    let _ = tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("debug")))
        .with(tracing_subscriber::fmt::layer().with_test_writer())
        .try_init();
}

// Re-export commonly used items
pub use reducer_test::{assertions, reduce_sequence, ReducerTest};
