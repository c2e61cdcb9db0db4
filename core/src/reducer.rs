//! Assembling guarded transitions into a single reducer.
//!
//! Construction flattens a [`HandlerMap`], normalizes every leaf, and
//! wraps each `(key, handler)` pair into a guard that applies only to
//! matching actions. The assembled [`Reducer`] folds the current state
//! through every guard in map order, so an action matched by several keys
//! runs every matching handler in sequence.

use std::fmt;

use crate::action::{Action, ActionType};
use crate::error::ConfigError;
use crate::handler::NormalizedHandler;
use crate::handler_map::{flatten_handler_map, HandlerMap, MapOptions};

/// Predicate deciding whether an action takes a handler's failure path.
pub type FailurePredicate<P> = Box<dyn Fn(&Action<P>) -> bool + Send + Sync>;

/// One guarded transition: applies its handler only to matching actions
/// and passes state through otherwise.
struct Guard<S, P> {
    key: ActionType,
    handler: NormalizedHandler<S, P>,
}

impl<S, P> Guard<S, P> {
    fn apply(&self, state: S, action: &Action<P>, failed: bool) -> S {
        if self.key.matches(action.action_type()) {
            self.handler.apply(state, action, failed)
        } else {
            state
        }
    }
}

impl<S, P> fmt::Debug for Guard<S, P> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Guard")
            .field("key", &self.key)
            .field("handler", &self.handler)
            .finish()
    }
}

/// An assembled state-transition function.
///
/// Immutable after construction and safe to share across threads when its
/// state and payload types allow it. Build one with [`create_reducer`] or
/// [`Reducer::builder`].
///
/// # Examples
///
/// ```
/// use foldux_core::action::Action;
/// use foldux_core::handler_map::HandlerMap;
/// use foldux_core::reducer::Reducer;
///
/// let reducer = Reducer::builder(
///     HandlerMap::new().namespace(
///         "app",
///         HandlerMap::new().on_split(
///             "notify",
///             |mut state: Vec<String>, action: &Action<String>| {
///                 state.push(format!(
///                     "notified: {}",
///                     action.payload().cloned().unwrap_or_default()
///                 ));
///                 state
///             },
///             |mut state, action| {
///                 state.push(format!(
///                     "failed: {}",
///                     action.payload().cloned().unwrap_or_default()
///                 ));
///                 state
///             },
///         ),
///     ),
/// )
/// .default_state(Vec::new())
/// .build()?;
///
/// let ok = reducer.reduce(None, &Action::new("app/notify").with_payload("hi".to_owned()));
/// assert_eq!(ok, ["notified: hi"]);
///
/// let err = reducer.reduce(None, &Action::failure("app/notify", "boom".to_owned()));
/// assert_eq!(err, ["failed: boom"]);
/// # Ok::<(), foldux_core::ConfigError>(())
/// ```
pub struct Reducer<S, P> {
    default_state: S,
    guards: Vec<Guard<S, P>>,
    is_failure: FailurePredicate<P>,
}

impl<S, P> Reducer<S, P> {
    /// Start building a reducer over `handlers`.
    #[must_use]
    pub fn builder(handlers: HandlerMap<S, P>) -> ReducerBuilder<S, P> {
        ReducerBuilder {
            handlers,
            default_state: None,
            options: MapOptions::new(),
            is_failure: None,
        }
    }

    /// Apply one action to the given state.
    ///
    /// `None` substitutes a clone of the default state before any guard
    /// runs, so reducing from nothing behaves exactly like reducing from
    /// the baseline. Actions matched by no key return the state unchanged;
    /// the failure predicate is evaluated once and shared by every guard.
    #[must_use]
    pub fn reduce(&self, state: Option<S>, action: &Action<P>) -> S
    where
        S: Clone,
    {
        let state = state.unwrap_or_else(|| self.default_state.clone());
        let failed = (self.is_failure)(action);
        tracing::trace!(action = %action.action_type(), failed, "reducing action");
        self.guards
            .iter()
            .fold(state, |state, guard| guard.apply(state, action, failed))
    }

    /// The baseline state substituted when reducing from `None`.
    #[must_use]
    pub const fn default_state(&self) -> &S {
        &self.default_state
    }
}

impl<S: fmt::Debug, P> fmt::Debug for Reducer<S, P> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Reducer")
            .field("default_state", &self.default_state)
            .field("guards", &self.guards)
            .finish_non_exhaustive()
    }
}

/// Build a reducer from a handler map and a required default state.
///
/// The one-call form of [`Reducer::builder`] with default options; reach
/// for the builder when a custom divider, prefix, or failure predicate is
/// needed.
///
/// # Errors
///
/// Returns [`ConfigError::DuplicateKey`] when the map flattens two entries
/// to the same key.
///
/// # Examples
///
/// ```
/// use foldux_core::{create_reducer, Action, HandlerMap};
///
/// #[derive(Clone, Debug, PartialEq)]
/// struct CounterState {
///     counter: i64,
/// }
///
/// let reducer = create_reducer(
///     HandlerMap::new()
///         .on("increment", |state: CounterState, action: &Action<i64>| CounterState {
///             counter: state.counter + action.payload().copied().unwrap_or(0),
///         })
///         .on("decrement", |state, action| CounterState {
///             counter: state.counter - action.payload().copied().unwrap_or(0),
///         }),
///     CounterState { counter: 0 },
/// )?;
///
/// let state = reducer.reduce(
///     Some(CounterState { counter: 3 }),
///     &Action::new("increment").with_payload(7),
/// );
/// assert_eq!(state, CounterState { counter: 10 });
///
/// let state = reducer.reduce(Some(state), &Action::new("decrement").with_payload(7));
/// assert_eq!(state, CounterState { counter: 3 });
/// # Ok::<(), foldux_core::ConfigError>(())
/// ```
pub fn create_reducer<S, P>(
    handlers: HandlerMap<S, P>,
    default_state: S,
) -> Result<Reducer<S, P>, ConfigError> {
    Reducer::builder(handlers)
        .default_state(default_state)
        .build()
}

/// Builder for [`Reducer`]: the handler map plus the default state,
/// key-joining options, and the failure predicate.
pub struct ReducerBuilder<S, P> {
    handlers: HandlerMap<S, P>,
    default_state: Option<S>,
    options: MapOptions,
    is_failure: Option<FailurePredicate<P>>,
}

impl<S, P> ReducerBuilder<S, P> {
    /// Set the baseline state substituted when reducing from `None`.
    #[must_use]
    pub fn default_state(mut self, state: S) -> Self {
        self.default_state = Some(state);
        self
    }

    /// Set the divider joining nested keys (default `"/"`).
    #[must_use]
    pub fn divider(mut self, divider: impl Into<String>) -> Self {
        self.options = self.options.with_divider(divider);
        self
    }

    /// Set the prefix applied ahead of every joined path.
    #[must_use]
    pub fn prefix(mut self, prefix: impl Into<String>) -> Self {
        self.options = self.options.with_prefix(prefix);
        self
    }

    /// Replace the failure predicate.
    ///
    /// The default predicate is [`Action::is_failure`], so only actions
    /// explicitly marked as failures take a handler's failure path.
    #[must_use]
    pub fn failure_predicate<F>(mut self, predicate: F) -> Self
    where
        F: Fn(&Action<P>) -> bool + Send + Sync + 'static,
    {
        self.is_failure = Some(Box::new(predicate));
        self
    }

    /// Flatten the map, normalize every handler, and assemble the reducer.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::DuplicateKey`] when flattening collides, and
    /// [`ConfigError::MissingDefaultState`] when no default state was
    /// supplied. The missing default fails here, at construction, rather
    /// than at first invocation.
    pub fn build(self) -> Result<Reducer<S, P>, ConfigError> {
        let flat = flatten_handler_map(self.handlers, &self.options)?;
        let Some(default_state) = self.default_state else {
            return Err(ConfigError::MissingDefaultState {
                first_key: flat.keys().next().map(|key| key.canonical().into_owned()),
            });
        };
        let guards: Vec<Guard<S, P>> = flat
            .into_entries()
            .into_iter()
            .map(|(key, handler)| Guard {
                key,
                handler: handler.normalize(),
            })
            .collect();
        tracing::debug!(guards = guards.len(), "assembled reducer");
        Ok(Reducer {
            default_state,
            guards,
            is_failure: self
                .is_failure
                .unwrap_or_else(|| Box::new(|action: &Action<P>| action.is_failure())),
        })
    }
}

impl<S: fmt::Debug, P> fmt::Debug for ReducerBuilder<S, P> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ReducerBuilder")
            .field("handlers", &self.handlers)
            .field("default_state", &self.default_state)
            .field("options", &self.options)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    use super::*;
    use crate::action::Symbol;
    use crate::creator::ActionCreator;
    use crate::handler::Handler;

    #[derive(Clone, Debug, PartialEq, Eq)]
    struct CounterState {
        counter: i64,
    }

    fn counter_map() -> HandlerMap<CounterState, i64> {
        HandlerMap::new()
            .on("increment", |state: CounterState, action: &Action<i64>| {
                CounterState {
                    counter: state.counter + action.payload().copied().unwrap_or(0),
                }
            })
            .on("decrement", |state, action| CounterState {
                counter: state.counter - action.payload().copied().unwrap_or(0),
            })
    }

    fn build(map: HandlerMap<CounterState, i64>) -> Reducer<CounterState, i64> {
        #[allow(clippy::expect_used)] // test assertion on a valid map
        let reducer = create_reducer(map, CounterState { counter: 0 }).expect("reducer builds");
        reducer
    }

    #[test]
    fn matching_actions_run_their_handler() {
        let reducer = build(counter_map());

        let state = reducer.reduce(
            Some(CounterState { counter: 3 }),
            &Action::new("increment").with_payload(7),
        );
        assert_eq!(state, CounterState { counter: 10 });

        let state = reducer.reduce(Some(state), &Action::new("decrement").with_payload(7));
        assert_eq!(state, CounterState { counter: 3 });
    }

    #[test]
    fn missing_state_substitutes_the_default_before_handlers_run() {
        let reducer = build(counter_map());
        let state = reducer.reduce(None, &Action::new("increment").with_payload(5));
        assert_eq!(state, CounterState { counter: 5 });
    }

    #[test]
    fn unmatched_actions_are_a_no_op() {
        let reducer = build(counter_map());

        let state = reducer.reduce(None, &Action::new("reset"));
        assert_eq!(state, CounterState { counter: 0 });

        let state = reducer.reduce(
            Some(CounterState { counter: 9 }),
            &Action::new("reset").with_payload(1),
        );
        assert_eq!(state, CounterState { counter: 9 });
    }

    #[test]
    fn empty_map_reduces_to_default_or_passthrough() {
        let reducer = build(HandlerMap::new());

        assert_eq!(
            reducer.reduce(None, &Action::new("anything")),
            CounterState { counter: 0 }
        );
        assert_eq!(
            reducer.reduce(Some(CounterState { counter: 4 }), &Action::new("anything")),
            CounterState { counter: 4 }
        );
    }

    #[test]
    fn every_matching_guard_fires_in_map_order() {
        let creator = ActionCreator::new("inc");
        let map = HandlerMap::new()
            .on("inc", |state: CounterState, _action: &Action<i64>| {
                CounterState {
                    counter: state.counter + 1,
                }
            })
            .on(&creator, |state, _action| CounterState {
                counter: state.counter * 2,
            });
        let reducer = build(map);

        // The creator's canonical form satisfies the string key and its
        // identity satisfies the creator key, so both run in order.
        let state = reducer.reduce(Some(CounterState { counter: 3 }), &creator.empty());
        assert_eq!(state, CounterState { counter: 8 });
    }

    #[test]
    fn creator_keys_ignore_spelled_out_strings() {
        let creator = ActionCreator::new("increment");
        let map = HandlerMap::new().on(&creator, |state: CounterState, _action: &Action<i64>| {
            CounterState {
                counter: state.counter + 1,
            }
        });
        let reducer = build(map);

        let state = reducer.reduce(None, &Action::new("increment"));
        assert_eq!(state, CounterState { counter: 0 });

        let state = reducer.reduce(None, &creator.empty());
        assert_eq!(state, CounterState { counter: 1 });
    }

    #[test]
    fn symbol_keys_match_by_identity_only() {
        let flash = Symbol::new("flash");
        let imposter = Symbol::new("flash");
        let map = HandlerMap::new().on(&flash, |state: CounterState, _action: &Action<i64>| {
            CounterState {
                counter: state.counter + 1,
            }
        });
        let reducer = build(map);

        let state = reducer.reduce(None, &Action::new(&flash));
        assert_eq!(state, CounterState { counter: 1 });

        let state = reducer.reduce(None, &Action::new(&imposter));
        assert_eq!(state, CounterState { counter: 0 });

        let state = reducer.reduce(None, &Action::new("Symbol(flash)"));
        assert_eq!(state, CounterState { counter: 0 });
    }

    #[test]
    fn failure_flag_routes_to_the_failure_path() {
        let map = HandlerMap::new().on_handler(
            "notify",
            Handler::pair(
                |state: CounterState, _action: &Action<i64>| CounterState {
                    counter: state.counter + 1,
                },
                |state, _action| CounterState {
                    counter: state.counter - 1,
                },
            ),
        );
        let reducer = build(map);

        let state = reducer.reduce(None, &Action::new("notify"));
        assert_eq!(state, CounterState { counter: 1 });

        let state = reducer.reduce(None, &Action::failure("notify", 500));
        assert_eq!(state, CounterState { counter: -1 });
    }

    #[test]
    fn single_handlers_pass_failures_through() {
        let reducer = build(counter_map());

        let state = reducer.reduce(
            Some(CounterState { counter: 3 }),
            &Action::failure("increment", 7),
        );
        assert_eq!(state, CounterState { counter: 3 });
    }

    #[test]
    fn custom_failure_predicate_replaces_the_flag() {
        let map = HandlerMap::new().on_handler(
            "adjust",
            Handler::pair(
                |state: CounterState, action: &Action<i64>| CounterState {
                    counter: state.counter + action.payload().copied().unwrap_or(0),
                },
                |state, _action| state,
            ),
        );
        #[allow(clippy::expect_used)] // test assertion on a valid map
        let reducer = Reducer::builder(map)
            .default_state(CounterState { counter: 0 })
            .failure_predicate(|action| action.payload().copied().unwrap_or(0) < 0)
            .build()
            .expect("reducer builds");

        let state = reducer.reduce(None, &Action::new("adjust").with_payload(5));
        assert_eq!(state, CounterState { counter: 5 });

        let state = reducer.reduce(None, &Action::new("adjust").with_payload(-5));
        assert_eq!(state, CounterState { counter: 0 });
    }

    #[test]
    fn failure_predicate_is_evaluated_once_per_reduce() {
        let calls = Arc::new(AtomicUsize::new(0));
        let seen = Arc::clone(&calls);

        // Both guards match the creator's actions, yet the predicate runs
        // once for the whole pass.
        let creator = ActionCreator::new("tick");
        let map = HandlerMap::new()
            .on("tick", |state: CounterState, _action: &Action<i64>| state)
            .on(&creator, |state, _action| state);
        #[allow(clippy::expect_used)] // test assertion on a valid map
        let reducer = Reducer::builder(map)
            .default_state(CounterState { counter: 0 })
            .failure_predicate(move |_action| {
                seen.fetch_add(1, Ordering::Relaxed);
                false
            })
            .build()
            .expect("reducer builds");

        let _state = reducer.reduce(None, &creator.empty());
        assert_eq!(calls.load(Ordering::Relaxed), 1);
    }

    #[test]
    fn nested_maps_build_with_joined_guards() {
        let map = HandlerMap::new().namespace(
            "app",
            HandlerMap::new().namespace(
                "counter",
                HandlerMap::new().on("increment", |state: CounterState, _action: &Action<i64>| {
                    CounterState {
                        counter: state.counter + 1,
                    }
                }),
            ),
        );
        let reducer = build(map);

        let state = reducer.reduce(None, &Action::new("app/counter/increment"));
        assert_eq!(state, CounterState { counter: 1 });

        let state = reducer.reduce(None, &Action::new("increment"));
        assert_eq!(state, CounterState { counter: 0 });
    }

    #[test]
    fn builder_divider_changes_joined_guards() {
        let map = HandlerMap::new().namespace(
            "app",
            HandlerMap::new().on("increment", |state: CounterState, _action: &Action<i64>| {
                CounterState {
                    counter: state.counter + 1,
                }
            }),
        );
        #[allow(clippy::expect_used)] // test assertion on a valid map
        let reducer = Reducer::builder(map)
            .default_state(CounterState { counter: 0 })
            .divider(":")
            .build()
            .expect("reducer builds");

        let state = reducer.reduce(None, &Action::new("app:increment"));
        assert_eq!(state, CounterState { counter: 1 });
    }

    #[test]
    fn missing_default_state_fails_at_construction() {
        let result = Reducer::builder(counter_map()).build();
        let message = match result {
            Err(error) => error.to_string(),
            Ok(_) => String::new(),
        };
        assert_eq!(
            message,
            "default state for reducer handling `increment` should be defined"
        );
    }

    #[test]
    fn missing_default_state_on_empty_map_still_fails() {
        let result = Reducer::builder(HandlerMap::<CounterState, i64>::new()).build();
        assert!(matches!(
            result,
            Err(ConfigError::MissingDefaultState { first_key: None })
        ));
    }

    #[test]
    fn reducers_are_send_and_sync() {
        fn assert_send_sync<T: Send + Sync>(_value: &T) {}
        let reducer = build(counter_map());
        assert_send_sync(&reducer);
    }
}
