//! # Counter Demo
//!
//! A counter whose transitions are described as a declarative handler map
//! instead of a hand-written `match`.
//!
//! This demo showcases:
//! - Flat string keys with payload-carrying actions
//! - A nested namespace joined with the default divider
//! - A success/failure handler pair
//! - Action creators whose type strings line up with the map's keys
//!
//! ## Example
//!
//! ```
//! use counter::{counter_reducer, CounterState};
//! use foldux_core::Action;
//!
//! let reducer = counter_reducer()?;
//! let state = reducer.reduce(
//!     Some(CounterState { counter: 3 }),
//!     &Action::new("increment").with_payload(7),
//! );
//! assert_eq!(state.counter, 10);
//! # Ok::<(), foldux_core::ConfigError>(())
//! ```

use foldux_core::{
    create_reducer, handler_map, Action, ActionCreators, ActionNames, ConfigError, HandlerMap,
    Reducer,
};

/// Counter state
///
/// The state is just a simple count. In a real application, this might
/// contain more complex domain data.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CounterState {
    /// Current count value
    pub counter: i64,
}

/// Payload type for counter actions: amounts for arithmetic, error codes
/// on failures.
pub type Amount = i64;

/// The handler map describing every counter transition.
///
/// `increment` and `decrement` take an optional amount and default to 1.
/// The `counter` namespace nests `reset` and a `set` pair whose failure
/// path leaves the state untouched.
#[must_use]
pub fn counter_handlers() -> HandlerMap<CounterState, Amount> {
    handler_map! {
        "increment" => |state: CounterState, action: &Action<Amount>| CounterState {
            counter: state.counter + action.payload().copied().unwrap_or(1),
        },
        "decrement" => |state, action| CounterState {
            counter: state.counter - action.payload().copied().unwrap_or(1),
        },
        "counter" => {
            "reset" => |_state, _action| CounterState::default(),
            "set" => (
                |state: CounterState, action: &Action<Amount>| CounterState {
                    counter: action.payload().copied().unwrap_or(state.counter),
                },
                |state, _action| state,
            ),
        },
    }
}

/// Build the counter reducer with a zeroed default state.
///
/// # Errors
///
/// Returns [`ConfigError`] when the handler map fails to flatten; the map
/// here is static and well formed, so callers can treat this as
/// infallible setup.
pub fn counter_reducer() -> Result<Reducer<CounterState, Amount>, ConfigError> {
    create_reducer(counter_handlers(), CounterState::default())
}

/// Creators minting counter actions by name.
///
/// The type strings line up with [`counter_handlers`]' flattened keys, so
/// minted actions match the string-keyed handlers through their canonical
/// form.
///
/// # Errors
///
/// Returns [`ConfigError`] when two names collide; the names here are
/// static and distinct.
pub fn counter_creators() -> Result<ActionCreators, ConfigError> {
    ActionCreators::builder()
        .action("increment")
        .action("decrement")
        .namespace("counter", ActionNames::new().action("reset").action("set"))
        .build()
}
