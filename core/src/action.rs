//! Actions and the identities that address them.
//!
//! An [`Action`] is one event driving one state transition: an
//! [`ActionType`], an optional payload, and a failure flag. `ActionType`
//! doubles as the key type of handler maps, so the same value describes
//! both "what happened" and "which handler reacts".

use std::borrow::Cow;
use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};

/// Monotonic source of symbol and creator identities.
static NEXT_IDENTITY: AtomicU64 = AtomicU64::new(1);

/// Mint a fresh identity.
pub(crate) fn next_identity() -> u64 {
    NEXT_IDENTITY.fetch_add(1, Ordering::Relaxed)
}

/// A unique token usable as an action type or handler-map key.
///
/// Two symbols are equal only when one is a clone of the other. Equal
/// descriptions never make equal symbols, so symbol-keyed handlers cannot
/// be reached by spelling out a matching string.
///
/// # Examples
///
/// ```
/// use foldux_core::action::Symbol;
///
/// let a = Symbol::new("increment");
/// let b = Symbol::new("increment");
/// assert_ne!(a, b);
/// assert_eq!(a, a.clone());
/// assert_eq!(a.to_string(), "Symbol(increment)");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Symbol {
    id: u64,
    description: String,
}

impl Symbol {
    /// Create a fresh symbol. Every call mints a new identity.
    #[must_use]
    pub fn new(description: impl Into<String>) -> Self {
        Self {
            id: next_identity(),
            description: description.into(),
        }
    }

    /// The description this symbol was created with.
    #[must_use]
    pub fn description(&self) -> &str {
        &self.description
    }
}

impl fmt::Display for Symbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Symbol({})", self.description)
    }
}

/// The type of an action, and simultaneously the key shape of handler maps.
///
/// Three shapes exist:
///
/// - [`ActionType::Named`]: a plain string, matched against the canonical
///   form of incoming action types.
/// - [`ActionType::Symbol`]: a unique [`Symbol`], matched by identity.
/// - [`ActionType::Creator`]: the identity of an
///   [`ActionCreator`](crate::creator::ActionCreator), matched by identity.
///
/// Matching is asymmetric on purpose: a `Named` key matches any action
/// whose canonical string equals it, including symbol or creator actions,
/// while identity-shaped keys never match a merely equal spelling.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum ActionType {
    /// Plain string type.
    Named(String),
    /// Unique symbol token.
    Symbol(Symbol),
    /// Action-creator identity.
    Creator {
        /// Identity minted when the creator was built.
        id: u64,
        /// The creator's embedded type string.
        name: String,
    },
}

impl ActionType {
    /// Canonical string form of this type.
    ///
    /// The string itself for [`Named`](Self::Named), the
    /// description-qualified form for [`Symbol`](Self::Symbol), and the
    /// embedded type string for [`Creator`](Self::Creator). Flattening uses
    /// this form to join nested paths, and [`matches`](Self::matches) uses
    /// it for the string-equality side of key matching.
    #[must_use]
    pub fn canonical(&self) -> Cow<'_, str> {
        match self {
            Self::Named(name) | Self::Creator { name, .. } => Cow::Borrowed(name),
            Self::Symbol(symbol) => Cow::Owned(symbol.to_string()),
        }
    }

    /// Whether an action carrying `action_type` is addressed by this key.
    ///
    /// `Named` keys compare against the action type's canonical string;
    /// `Symbol` and `Creator` keys require the same identity. One action
    /// can therefore satisfy several keys at once, and every satisfied
    /// handler fires in map order.
    #[must_use]
    pub fn matches(&self, action_type: &ActionType) -> bool {
        match self {
            Self::Named(name) => action_type.canonical() == name.as_str(),
            key => key == action_type,
        }
    }
}

impl fmt::Display for ActionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.canonical())
    }
}

impl From<&str> for ActionType {
    fn from(name: &str) -> Self {
        Self::Named(name.to_owned())
    }
}

impl From<String> for ActionType {
    fn from(name: String) -> Self {
        Self::Named(name)
    }
}

impl From<Symbol> for ActionType {
    fn from(symbol: Symbol) -> Self {
        Self::Symbol(symbol)
    }
}

impl From<&Symbol> for ActionType {
    fn from(symbol: &Symbol) -> Self {
        Self::Symbol(symbol.clone())
    }
}

/// One event driving one state transition.
///
/// Payloads are optional. The failure flag marks actions whose payload
/// describes an error rather than a result, and is what the default
/// failure predicate of an assembled reducer inspects when choosing
/// between a handler's success and failure paths.
///
/// # Examples
///
/// ```
/// use foldux_core::action::Action;
///
/// let plain = Action::<i64>::new("increment");
/// assert!(plain.payload().is_none());
/// assert!(!plain.is_failure());
///
/// let with_amount = Action::new("increment").with_payload(7);
/// assert_eq!(with_amount.payload(), Some(&7));
///
/// let failed = Action::failure("notify", 404);
/// assert!(failed.is_failure());
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Action<P> {
    action_type: ActionType,
    payload: Option<P>,
    failure: bool,
}

impl<P> Action<P> {
    /// Create an action with no payload.
    #[must_use]
    pub fn new(action_type: impl Into<ActionType>) -> Self {
        Self {
            action_type: action_type.into(),
            payload: None,
            failure: false,
        }
    }

    /// Create a failure action carrying an error-describing payload.
    #[must_use]
    pub fn failure(action_type: impl Into<ActionType>, payload: P) -> Self {
        Self {
            action_type: action_type.into(),
            payload: Some(payload),
            failure: true,
        }
    }

    /// Attach a payload.
    #[must_use]
    pub fn with_payload(mut self, payload: P) -> Self {
        self.payload = Some(payload);
        self
    }

    /// Mark this action as a failure.
    #[must_use]
    pub const fn with_failure(mut self) -> Self {
        self.failure = true;
        self
    }

    /// The action's type.
    #[must_use]
    pub const fn action_type(&self) -> &ActionType {
        &self.action_type
    }

    /// The payload, if any.
    #[must_use]
    pub const fn payload(&self) -> Option<&P> {
        self.payload.as_ref()
    }

    /// Whether this action was marked as a failure.
    #[must_use]
    pub const fn is_failure(&self) -> bool {
        self.failure
    }
}
