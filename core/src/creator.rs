//! Action creators: identity-carrying factories for actions.
//!
//! An [`ActionCreator`] couples a type string with a unique identity.
//! Handler-map entries keyed by a creator match only actions minted by
//! that creator, never actions that merely spell the same string.
//! [`ActionCreators`] builds a whole registry of creators from a nested
//! name tree, joining names with a divider exactly like handler-map
//! flattening joins nested keys.

use std::fmt;

use crate::action::{next_identity, Action, ActionType};
use crate::error::ConfigError;
use crate::handler_map::MapOptions;

/// An identity-carrying factory for actions of one fixed type.
///
/// Cloning a creator keeps its identity, so a clone mints actions that
/// still match handlers keyed by the original.
///
/// # Examples
///
/// ```
/// use foldux_core::creator::ActionCreator;
///
/// let increment = ActionCreator::new("increment");
/// let action = increment.of(7);
/// assert_eq!(action.payload(), Some(&7));
/// assert_eq!(action.action_type(), &increment.action_type());
/// assert_eq!(increment.to_string(), "increment");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActionCreator {
    id: u64,
    name: String,
}

impl ActionCreator {
    /// Create a creator with a fresh identity and the given type string.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            id: next_identity(),
            name: name.into(),
        }
    }

    /// The embedded type string.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The action type carrying this creator's identity.
    #[must_use]
    pub fn action_type(&self) -> ActionType {
        ActionType::Creator {
            id: self.id,
            name: self.name.clone(),
        }
    }

    /// Mint an action carrying `payload`.
    #[must_use]
    pub fn of<P>(&self, payload: P) -> Action<P> {
        Action::new(self.action_type()).with_payload(payload)
    }

    /// Mint a failure action carrying an error-describing payload.
    #[must_use]
    pub fn failure<P>(&self, payload: P) -> Action<P> {
        Action::failure(self.action_type(), payload)
    }

    /// Mint an action with no payload.
    #[must_use]
    pub fn empty<P>(&self) -> Action<P> {
        Action::new(self.action_type())
    }
}

impl fmt::Display for ActionCreator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name)
    }
}

impl From<&ActionCreator> for ActionType {
    fn from(creator: &ActionCreator) -> Self {
        creator.action_type()
    }
}

impl From<ActionCreator> for ActionType {
    fn from(creator: ActionCreator) -> Self {
        ActionType::Creator {
            id: creator.id,
            name: creator.name,
        }
    }
}

/// Declarative tree of action names for [`ActionCreators`].
///
/// Leaves become creators; namespaces join onto their children's paths.
#[derive(Debug, Clone, Default)]
pub struct ActionNames {
    entries: Vec<(String, NameNode)>,
}

#[derive(Debug, Clone)]
enum NameNode {
    Leaf,
    Nested(ActionNames),
}

impl ActionNames {
    /// Start an empty name tree.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    /// Add a leaf action name.
    #[must_use]
    pub fn action(mut self, name: impl Into<String>) -> Self {
        self.entries.push((name.into(), NameNode::Leaf));
        self
    }

    /// Add a nested namespace of names.
    #[must_use]
    pub fn namespace(mut self, name: impl Into<String>, inner: ActionNames) -> Self {
        self.entries.push((name.into(), NameNode::Nested(inner)));
        self
    }
}

/// Creators for a whole namespace of actions, addressable by their full
/// type string.
///
/// # Examples
///
/// ```
/// use foldux_core::creator::{ActionCreators, ActionNames};
///
/// let creators = ActionCreators::builder()
///     .namespace(
///         "app",
///         ActionNames::new()
///             .namespace(
///                 "counter",
///                 ActionNames::new().action("increment").action("decrement"),
///             )
///             .action("notify"),
///     )
///     .action("login")
///     .divider(":")
///     .build()?;
///
/// let increment = creators.get("app:counter:increment").ok_or("missing creator")?;
/// assert_eq!(increment.name(), "app:counter:increment");
/// assert_eq!(increment.of(7).payload(), Some(&7));
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
#[derive(Debug, Clone)]
pub struct ActionCreators {
    creators: Vec<ActionCreator>,
}

impl ActionCreators {
    /// Start building a registry.
    #[must_use]
    pub fn builder() -> ActionCreatorsBuilder {
        ActionCreatorsBuilder {
            names: ActionNames::new(),
            options: MapOptions::new(),
        }
    }

    /// Build creators for a flat list of names with default options.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::DuplicateKey`] when a name repeats.
    pub fn from_names<I, S>(names: I) -> Result<Self, ConfigError>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut builder = Self::builder();
        for name in names {
            builder = builder.action(name);
        }
        builder.build()
    }

    /// The creator whose type string equals `path`, if any.
    #[must_use]
    pub fn get(&self, path: &str) -> Option<&ActionCreator> {
        self.creators.iter().find(|creator| creator.name() == path)
    }

    /// Creators in declaration order.
    pub fn iter(&self) -> impl Iterator<Item = &ActionCreator> {
        self.creators.iter()
    }

    /// Number of creators.
    #[must_use]
    pub fn len(&self) -> usize {
        self.creators.len()
    }

    /// Whether the registry is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.creators.is_empty()
    }
}

/// Builder for [`ActionCreators`]: a name tree plus key-joining options.
#[derive(Debug, Clone)]
pub struct ActionCreatorsBuilder {
    names: ActionNames,
    options: MapOptions,
}

impl ActionCreatorsBuilder {
    /// Replace the whole name tree at once.
    ///
    /// Useful together with the
    /// [`action_names!`](crate::action_names!) macro.
    #[must_use]
    pub fn names(mut self, names: ActionNames) -> Self {
        self.names = names;
        self
    }

    /// Add a top-level action name.
    #[must_use]
    pub fn action(mut self, name: impl Into<String>) -> Self {
        self.names = self.names.action(name);
        self
    }

    /// Add a top-level namespace of names.
    #[must_use]
    pub fn namespace(mut self, name: impl Into<String>, inner: ActionNames) -> Self {
        self.names = self.names.namespace(name, inner);
        self
    }

    /// Set the divider joining nested names (default `"/"`).
    #[must_use]
    pub fn divider(mut self, divider: impl Into<String>) -> Self {
        self.options = self.options.with_divider(divider);
        self
    }

    /// Set the prefix applied ahead of every name.
    #[must_use]
    pub fn prefix(mut self, prefix: impl Into<String>) -> Self {
        self.options = self.options.with_prefix(prefix);
        self
    }

    /// Walk the name tree and mint one creator per leaf.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::DuplicateKey`] when two leaves join to the
    /// same type string.
    pub fn build(self) -> Result<ActionCreators, ConfigError> {
        let Self { names, options } = self;
        let mut creators = Vec::new();
        collect(names, options.prefix(), options.divider(), &mut creators)?;
        tracing::debug!(creators = creators.len(), "built action creators");
        Ok(ActionCreators { creators })
    }
}

fn collect(
    names: ActionNames,
    prefix: &str,
    divider: &str,
    out: &mut Vec<ActionCreator>,
) -> Result<(), ConfigError> {
    for (name, node) in names.entries {
        let path = if prefix.is_empty() {
            name
        } else {
            format!("{prefix}{divider}{name}")
        };
        match node {
            NameNode::Leaf => {
                if out.iter().any(|creator| creator.name() == path) {
                    return Err(ConfigError::DuplicateKey { key: path });
                }
                out.push(ActionCreator::new(path));
            }
            NameNode::Nested(inner) => collect(inner, &path, divider, out)?,
        }
    }
    Ok(())
}
