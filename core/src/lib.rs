//! # Foldux Core
//!
//! Build state-transition functions from declarative maps of action
//! handlers.
//!
//! Instead of writing one reducer as a `match` over every action it
//! understands, describe the reactions as a map from action types to
//! handler functions. Construction flattens nested maps into
//! divider-joined paths, normalizes every handler into an explicit
//! success/failure pair, and folds the entries into a single transition
//! function that applies every matching handler in map order.
//!
//! ## Core Concepts
//!
//! - **Action**: one event driving one transition, with a type, an
//!   optional payload, and a failure flag
//! - **`ActionType`**: the closed set of key shapes (strings, symbols,
//!   creator identities) shared by actions and handler maps
//! - **`HandlerMap`**: an ordered, possibly nested map from action types
//!   to handler definitions
//! - **Reducer**: the assembled transition function
//!   `(Option<State>, &Action) -> State` with a required default state
//! - **`ActionCreators`**: hierarchically namespaced factories minting
//!   actions that match by identity rather than by spelling
//!
//! ## Example
//!
//! ```
//! use foldux_core::{create_reducer, Action, HandlerMap};
//!
//! #[derive(Clone, Debug, PartialEq)]
//! struct CounterState {
//!     counter: i64,
//! }
//!
//! let reducer = create_reducer(
//!     HandlerMap::new()
//!         .on("increment", |state: CounterState, action: &Action<i64>| CounterState {
//!             counter: state.counter + action.payload().copied().unwrap_or(0),
//!         })
//!         .on("decrement", |state, action| CounterState {
//!             counter: state.counter - action.payload().copied().unwrap_or(0),
//!         }),
//!     CounterState { counter: 0 },
//! )?;
//!
//! let state = reducer.reduce(
//!     Some(CounterState { counter: 3 }),
//!     &Action::new("increment").with_payload(7),
//! );
//! assert_eq!(state, CounterState { counter: 10 });
//! # Ok::<(), foldux_core::ConfigError>(())
//! ```

/// Actions and the identities that address them.
pub mod action;
/// Action creators and their namespaced registries.
pub mod creator;
/// Construction-time error types.
pub mod error;
/// Handler definitions and their normalized form.
pub mod handler;
/// Nested handler maps, options, and flattening.
pub mod handler_map;
/// Declarative construction macros.
pub mod map_macros;
/// Reducer assembly from flattened maps.
pub mod reducer;

pub use action::{Action, ActionType, Symbol};
pub use creator::{ActionCreator, ActionCreators, ActionNames};
pub use error::ConfigError;
pub use handler::{Handler, HandlerFn, NormalizedHandler};
pub use handler_map::{flatten_handler_map, FlatHandlerMap, HandlerMap, MapOptions};
pub use reducer::{create_reducer, FailurePredicate, Reducer, ReducerBuilder};
