//! Declarative construction macros.
//!
//! [`handler_map!`](crate::handler_map!) builds a nested
//! [`HandlerMap`](crate::handler_map::HandlerMap) from `key => handler`
//! entries, and [`action_names!`](crate::action_names!) builds the nested
//! [`ActionNames`](crate::creator::ActionNames) tree consumed by
//! [`ActionCreators`](crate::creator::ActionCreators).

/// Build a [`HandlerMap`](crate::handler_map::HandlerMap) from
/// `key => handler` entries.
///
/// Three entry forms exist:
///
/// - `key => handler` adds a single-function handler,
/// - `key => (on_success, on_failure)` adds a success/failure pair,
/// - `key => { entries }` nests a sub-map under `key`.
///
/// Entries keep their written order through flattening and into the
/// assembled reducer's guard order.
///
/// # Examples
///
/// ```
/// use foldux_core::{create_reducer, handler_map, Action};
///
/// #[derive(Clone, Debug, PartialEq)]
/// struct CounterState {
///     counter: i64,
/// }
///
/// let map = handler_map! {
///     "increment" => |state: CounterState, action: &Action<i64>| CounterState {
///         counter: state.counter + action.payload().copied().unwrap_or(0),
///     },
///     "app" => {
///         "reset" => |_state, _action| CounterState { counter: 0 },
///         "notify" => (
///             |state, _action| state,
///             |_state, _action| CounterState { counter: -1 },
///         ),
///     },
/// };
///
/// let reducer = create_reducer(map, CounterState { counter: 0 })?;
/// let state = reducer.reduce(None, &Action::new("increment").with_payload(2));
/// assert_eq!(state, CounterState { counter: 2 });
///
/// let state = reducer.reduce(Some(state), &Action::new("app/reset"));
/// assert_eq!(state, CounterState { counter: 0 });
/// # Ok::<(), foldux_core::ConfigError>(())
/// ```
#[macro_export]
macro_rules! handler_map {
    (@map $map:expr, ) => { $map };
    (@map $map:expr, $key:expr => { $($inner:tt)* } $(, $($rest:tt)*)?) => {
        $crate::handler_map!(
            @map $map.namespace($key, $crate::handler_map!($($inner)*)),
            $($($rest)*)?
        )
    };
    (@map $map:expr, $key:expr => ($on_success:expr, $on_failure:expr $(,)?) $(, $($rest:tt)*)?) => {
        $crate::handler_map!(
            @map $map.on_split($key, $on_success, $on_failure),
            $($($rest)*)?
        )
    };
    (@map $map:expr, $key:expr => $handler:expr $(, $($rest:tt)*)?) => {
        $crate::handler_map!(
            @map $map.on($key, $handler),
            $($($rest)*)?
        )
    };
    () => { $crate::handler_map::HandlerMap::new() };
    ($($body:tt)+) => {
        $crate::handler_map!(@map $crate::handler_map::HandlerMap::new(), $($body)+)
    };
}

/// Build an [`ActionNames`](crate::creator::ActionNames) tree from a list
/// of names and `name => { names }` namespaces.
///
/// # Examples
///
/// ```
/// use foldux_core::{action_names, ActionCreators};
///
/// let creators = ActionCreators::builder()
///     .names(action_names! {
///         "login",
///         "app" => {
///             "counter" => { "increment", "decrement" },
///             "notify",
///         },
///     })
///     .divider(":")
///     .build()?;
///
/// assert!(creators.get("app:counter:increment").is_some());
/// assert!(creators.get("login").is_some());
/// # Ok::<(), foldux_core::ConfigError>(())
/// ```
#[macro_export]
macro_rules! action_names {
    (@tree $tree:expr, ) => { $tree };
    (@tree $tree:expr, $name:expr => { $($inner:tt)* } $(, $($rest:tt)*)?) => {
        $crate::action_names!(
            @tree $tree.namespace($name, $crate::action_names!($($inner)*)),
            $($($rest)*)?
        )
    };
    (@tree $tree:expr, $name:expr $(, $($rest:tt)*)?) => {
        $crate::action_names!(
            @tree $tree.action($name),
            $($($rest)*)?
        )
    };
    () => { $crate::creator::ActionNames::new() };
    ($($body:tt)+) => {
        $crate::action_names!(@tree $crate::creator::ActionNames::new(), $($body)+)
    };
}
