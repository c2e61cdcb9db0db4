//! Nested handler maps and their flattening into canonical keys.
//!
//! A [`HandlerMap`] is the declarative input to reducer construction: an
//! ordered map from action-type keys to either leaf handlers or nested
//! sub-maps. [`flatten_handler_map`] walks the nesting depth-first and
//! joins string keys into divider-separated paths, producing the
//! [`FlatHandlerMap`] the reducer assembler consumes.

use std::fmt;

use crate::action::{Action, ActionType};
use crate::error::ConfigError;
use crate::handler::Handler;

/// Key-joining options for flattening.
///
/// The divider separates nested path segments and the prefix, when
/// non-empty, is applied ahead of every joined path. Options affect only
/// how keys are spelled, never how handlers resolve.
///
/// # Examples
///
/// ```
/// use foldux_core::handler_map::MapOptions;
///
/// let options = MapOptions::new().with_divider(":").with_prefix("app");
/// assert_eq!(options.divider(), ":");
/// assert_eq!(options.prefix(), "app");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MapOptions {
    divider: String,
    prefix: String,
}

impl MapOptions {
    /// Options with the default divider (`"/"`) and no prefix.
    #[must_use]
    pub fn new() -> Self {
        Self {
            divider: "/".to_owned(),
            prefix: String::new(),
        }
    }

    /// Set the divider joining nested key segments.
    #[must_use]
    pub fn with_divider(mut self, divider: impl Into<String>) -> Self {
        self.divider = divider.into();
        self
    }

    /// Set the prefix applied ahead of every joined path.
    #[must_use]
    pub fn with_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.prefix = prefix.into();
        self
    }

    /// The divider joining nested key segments.
    #[must_use]
    pub fn divider(&self) -> &str {
        &self.divider
    }

    /// The prefix applied ahead of every joined path.
    #[must_use]
    pub fn prefix(&self) -> &str {
        &self.prefix
    }
}

impl Default for MapOptions {
    fn default() -> Self {
        Self::new()
    }
}

/// A value held under one key: either a leaf handler or a nested sub-map.
pub enum MapValue<S, P> {
    /// Leaf handler definition.
    Handler(Handler<S, P>),
    /// Nested sub-map; its children's string paths join onto this entry's
    /// path.
    Map(HandlerMap<S, P>),
}

impl<S, P> fmt::Debug for MapValue<S, P> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Handler(handler) => write!(f, "{handler:?}"),
            Self::Map(map) => write!(f, "{map:?}"),
        }
    }
}

/// An ordered, possibly nested map from action-type keys to handlers.
///
/// Entries keep insertion order; flattening and the assembled reducer's
/// guard order both preserve it. Keys may be plain strings, [`Symbol`]s,
/// or action creators, and nested maps namespace their children's string
/// paths.
///
/// [`Symbol`]: crate::action::Symbol
///
/// # Examples
///
/// ```
/// use foldux_core::action::Action;
/// use foldux_core::handler_map::HandlerMap;
///
/// #[derive(Clone, Debug, PartialEq)]
/// struct CounterState {
///     counter: i64,
/// }
///
/// let map = HandlerMap::new()
///     .on("increment", |state: CounterState, action: &Action<i64>| CounterState {
///         counter: state.counter + action.payload().copied().unwrap_or(0),
///     })
///     .namespace(
///         "app",
///         HandlerMap::new().on("reset", |_state, _action| CounterState { counter: 0 }),
///     );
///
/// assert_eq!(map.len(), 2);
/// ```
pub struct HandlerMap<S, P> {
    entries: Vec<(ActionType, MapValue<S, P>)>,
}

impl<S, P> HandlerMap<S, P> {
    /// Start an empty map.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    /// Add a single-function handler under `key`.
    ///
    /// Sugar for [`on_handler`](Self::on_handler) with [`Handler::single`].
    #[must_use]
    pub fn on<K, F>(self, key: K, on_success: F) -> Self
    where
        K: Into<ActionType>,
        F: Fn(S, &Action<P>) -> S + Send + Sync + 'static,
    {
        self.on_handler(key, Handler::single(on_success))
    }

    /// Add distinct success and failure handlers under `key`.
    ///
    /// Sugar for [`on_handler`](Self::on_handler) with [`Handler::pair`].
    #[must_use]
    pub fn on_split<K, F, G>(self, key: K, on_success: F, on_failure: G) -> Self
    where
        K: Into<ActionType>,
        F: Fn(S, &Action<P>) -> S + Send + Sync + 'static,
        G: Fn(S, &Action<P>) -> S + Send + Sync + 'static,
    {
        self.on_handler(key, Handler::pair(on_success, on_failure))
    }

    /// Add any handler shape under `key`, including [`Handler::Identity`].
    #[must_use]
    pub fn on_handler<K>(mut self, key: K, handler: Handler<S, P>) -> Self
    where
        K: Into<ActionType>,
    {
        self.entries
            .push((key.into(), MapValue::Handler(handler)));
        self
    }

    /// Nest a sub-map under `key`.
    ///
    /// The children's string paths join onto `key`'s canonical form when
    /// the map is flattened.
    #[must_use]
    pub fn namespace<K>(mut self, key: K, map: HandlerMap<S, P>) -> Self
    where
        K: Into<ActionType>,
    {
        self.entries.push((key.into(), MapValue::Map(map)));
        self
    }

    /// Number of entries at this nesting level.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether this nesting level has no entries.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub(crate) fn into_entries(self) -> Vec<(ActionType, MapValue<S, P>)> {
        self.entries
    }
}

impl<S, P> Default for HandlerMap<S, P> {
    fn default() -> Self {
        Self::new()
    }
}

impl<S, P> fmt::Debug for HandlerMap<S, P> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map()
            .entries(self.entries.iter().map(|(key, value)| (key, value)))
            .finish()
    }
}

/// The flattened form of a handler map: ordered canonical keys to leaf
/// handlers.
///
/// No two entries share an equal key; [`flatten_handler_map`] rejects
/// collisions instead of overwriting.
pub struct FlatHandlerMap<S, P> {
    entries: Vec<(ActionType, Handler<S, P>)>,
}

impl<S, P> FlatHandlerMap<S, P> {
    pub(crate) const fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    pub(crate) fn insert(
        &mut self,
        key: ActionType,
        handler: Handler<S, P>,
    ) -> Result<(), ConfigError> {
        if self.entries.iter().any(|(existing, _)| *existing == key) {
            return Err(ConfigError::DuplicateKey {
                key: key.canonical().into_owned(),
            });
        }
        self.entries.push((key, handler));
        Ok(())
    }

    /// Iterate entries in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&ActionType, &Handler<S, P>)> {
        self.entries.iter().map(|(key, handler)| (key, handler))
    }

    /// Keys in insertion order.
    pub fn keys(&self) -> impl Iterator<Item = &ActionType> {
        self.entries.iter().map(|(key, _)| key)
    }

    /// Look up the handler stored under a key equal to `key`.
    ///
    /// Lookup is by key equality, not by the looser matching the assembled
    /// reducer applies to incoming actions.
    #[must_use]
    pub fn get(&self, key: &ActionType) -> Option<&Handler<S, P>> {
        self.entries
            .iter()
            .find(|(existing, _)| existing == key)
            .map(|(_, handler)| handler)
    }

    /// Number of flattened entries.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the flattened map has no entries.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub(crate) fn into_entries(self) -> Vec<(ActionType, Handler<S, P>)> {
        self.entries
    }
}

impl<S, P> fmt::Debug for FlatHandlerMap<S, P> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map()
            .entries(self.entries.iter().map(|(key, handler)| (key, handler)))
            .finish()
    }
}

/// Flatten a nested handler map into canonical keys.
///
/// String keys join depth-first onto their parents' paths with the
/// divider, with the prefix (when non-empty) ahead of the first segment.
/// Symbol- and creator-keyed leaves keep their original identity as the
/// flat key: the joined path exists only to extend their children, never
/// to replace identity matching with a spelled-out string. An already-flat
/// map passes through with its keys and order intact.
///
/// # Errors
///
/// Returns [`ConfigError::DuplicateKey`] when two entries flatten to the
/// same key.
///
/// # Examples
///
/// ```
/// use foldux_core::handler_map::{flatten_handler_map, HandlerMap, MapOptions};
///
/// let map = HandlerMap::new()
///     .namespace(
///         "app",
///         HandlerMap::new()
///             .namespace(
///                 "counter",
///                 HandlerMap::new()
///                     .on("increment", |state: i64, _action: &foldux_core::Action<i64>| state + 1)
///                     .on("decrement", |state, _action| state - 1),
///             )
///             .on("notify", |state, _action| state),
///     )
///     .on("login", |state, _action| state);
///
/// let flat = flatten_handler_map(map, &MapOptions::new())?;
/// let keys: Vec<String> = flat.keys().map(ToString::to_string).collect();
/// assert_eq!(
///     keys,
///     ["app/counter/increment", "app/counter/decrement", "app/notify", "login"]
/// );
/// # Ok::<(), foldux_core::ConfigError>(())
/// ```
pub fn flatten_handler_map<S, P>(
    map: HandlerMap<S, P>,
    options: &MapOptions,
) -> Result<FlatHandlerMap<S, P>, ConfigError> {
    let mut flat = FlatHandlerMap::new();
    flatten_into(map, options.prefix(), options, &mut flat)?;
    tracing::debug!(entries = flat.len(), "flattened handler map");
    Ok(flat)
}

fn flatten_into<S, P>(
    map: HandlerMap<S, P>,
    prefix: &str,
    options: &MapOptions,
    flat: &mut FlatHandlerMap<S, P>,
) -> Result<(), ConfigError> {
    for (key, value) in map.into_entries() {
        let path = if prefix.is_empty() {
            key.canonical().into_owned()
        } else {
            format!("{prefix}{}{}", options.divider(), key.canonical())
        };
        match value {
            MapValue::Map(sub) => flatten_into(sub, &path, options, flat)?,
            MapValue::Handler(handler) => {
                // Identity-shaped keys survive flattening untouched.
                let flat_key = match key {
                    ActionType::Named(_) => ActionType::Named(path),
                    identity => identity,
                };
                flat.insert(flat_key, handler)?;
            }
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::action::Symbol;

    type State = Vec<&'static str>;

    fn tag(name: &'static str) -> impl Fn(State, &Action<i64>) -> State + Send + Sync + 'static {
        move |mut state: State, _action: &Action<i64>| {
            state.push(name);
            state
        }
    }

    /// Runs the single-function leaf stored under `key` against an empty
    /// state, or returns an empty state when the key is absent.
    fn apply(flat: &FlatHandlerMap<State, i64>, key: &ActionType) -> State {
        match flat.get(key) {
            Some(Handler::Single(f)) => f(Vec::new(), &Action::new("probe")),
            _ => Vec::new(),
        }
    }

    #[test]
    fn flat_maps_pass_through_unchanged() {
        let map = HandlerMap::new()
            .on("increment", tag("increment"))
            .on("decrement", tag("decrement"));

        #[allow(clippy::expect_used)] // test assertion on a valid map
        let flat = flatten_handler_map(map, &MapOptions::new()).expect("flat map flattens");

        let keys: Vec<String> = flat.keys().map(ToString::to_string).collect();
        assert_eq!(keys, ["increment", "decrement"]);
        assert_eq!(
            apply(&flat, &ActionType::from("increment")),
            vec!["increment"]
        );
        assert_eq!(
            apply(&flat, &ActionType::from("decrement")),
            vec!["decrement"]
        );
    }

    #[test]
    fn nested_keys_join_depth_first_with_the_divider() {
        let map = HandlerMap::new()
            .namespace(
                "app",
                HandlerMap::new()
                    .namespace(
                        "counter",
                        HandlerMap::new()
                            .on("increment", tag("inc"))
                            .on("decrement", tag("dec")),
                    )
                    .on("notify", tag("notify")),
            )
            .on("login", tag("login"));

        #[allow(clippy::expect_used)] // test assertion on a valid map
        let flat = flatten_handler_map(map, &MapOptions::new()).expect("nested map flattens");

        let keys: Vec<String> = flat.keys().map(ToString::to_string).collect();
        assert_eq!(
            keys,
            [
                "app/counter/increment",
                "app/counter/decrement",
                "app/notify",
                "login"
            ]
        );
        assert_eq!(
            apply(&flat, &ActionType::from("app/counter/increment")),
            vec!["inc"]
        );
    }

    #[test]
    fn keys_are_case_sensitive() {
        let map = HandlerMap::new().namespace(
            "APP",
            HandlerMap::new()
                .namespace("Counter", HandlerMap::new().on("increment", tag("inc"))),
        );

        #[allow(clippy::expect_used)] // test assertion on a valid map
        let flat = flatten_handler_map(map, &MapOptions::new()).expect("nested map flattens");

        assert!(flat.get(&ActionType::from("APP/Counter/increment")).is_some());
        assert!(flat.get(&ActionType::from("app/counter/increment")).is_none());
    }

    #[test]
    fn custom_divider_joins_every_level() {
        let map = HandlerMap::new().namespace(
            "app",
            HandlerMap::new().namespace("counter", HandlerMap::new().on("increment", tag("inc"))),
        );

        #[allow(clippy::expect_used)] // test assertion on a valid map
        let flat = flatten_handler_map(map, &MapOptions::new().with_divider(":"))
            .expect("nested map flattens");

        let keys: Vec<String> = flat.keys().map(ToString::to_string).collect();
        assert_eq!(keys, ["app:counter:increment"]);
    }

    #[test]
    fn prefix_applies_ahead_of_every_path() {
        let map = HandlerMap::new()
            .on("login", tag("login"))
            .namespace("counter", HandlerMap::new().on("increment", tag("inc")));

        #[allow(clippy::expect_used)] // test assertion on a valid map
        let flat = flatten_handler_map(
            map,
            &MapOptions::new().with_prefix("app").with_divider("--"),
        )
        .expect("nested map flattens");

        let keys: Vec<String> = flat.keys().map(ToString::to_string).collect();
        assert_eq!(keys, ["app--login", "app--counter--increment"]);
    }

    #[test]
    fn paths_shape_is_a_leaf_not_a_namespace() {
        let map = HandlerMap::new().namespace(
            "app",
            HandlerMap::new().on_handler(
                "notify",
                Handler::pair(tag("success"), tag("failure")),
            ),
        );

        #[allow(clippy::expect_used)] // test assertion on a valid map
        let flat = flatten_handler_map(map, &MapOptions::new()).expect("nested map flattens");

        let keys: Vec<String> = flat.keys().map(ToString::to_string).collect();
        assert_eq!(keys, ["app/notify"]);
        assert!(matches!(
            flat.get(&ActionType::from("app/notify")),
            Some(Handler::Pair(..))
        ));
    }

    #[test]
    fn symbol_leaves_keep_their_identity_key() {
        let flash = Symbol::new("flash");
        let map = HandlerMap::new().namespace(
            "app",
            HandlerMap::new().on(&flash, tag("flash")),
        );

        #[allow(clippy::expect_used)] // test assertion on a valid map
        let flat = flatten_handler_map(map, &MapOptions::new()).expect("nested map flattens");

        // The joined path is discarded for identity keys.
        assert!(flat.get(&ActionType::from(&flash)).is_some());
        assert!(flat.get(&ActionType::from("app/Symbol(flash)")).is_none());
    }

    #[test]
    fn colliding_paths_are_rejected() {
        let map = HandlerMap::new()
            .namespace("app", HandlerMap::new().on("notify", tag("nested")))
            .on("app/notify", tag("flat"));

        let error = flatten_handler_map(map, &MapOptions::new());
        assert!(matches!(
            error,
            Err(ConfigError::DuplicateKey { key }) if key == "app/notify"
        ));
    }

    #[test]
    fn identity_leaves_survive_flattening() {
        let map = HandlerMap::<State, i64>::new()
            .on_handler("noop", Handler::identity())
            .on("real", tag("real"));

        #[allow(clippy::expect_used)] // test assertion on a valid map
        let flat = flatten_handler_map(map, &MapOptions::new()).expect("map flattens");

        assert_eq!(flat.len(), 2);
        assert!(matches!(
            flat.get(&ActionType::from("noop")),
            Some(Handler::Identity)
        ));
    }

    #[test]
    fn empty_map_flattens_to_empty() {
        let flat = flatten_handler_map(
            HandlerMap::<State, i64>::new(),
            &MapOptions::new(),
        );
        #[allow(clippy::expect_used)] // test assertion on a valid map
        let flat = flat.expect("empty map flattens");
        assert!(flat.is_empty());
    }
}
