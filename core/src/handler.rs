//! Handler definitions and their normalized two-path form.
//!
//! A handler map may declare a reaction in several shapes: a single
//! function, an ordered success/failure pair, an explicit pair of optional
//! paths, or nothing at all. [`Handler`] closes over those shapes as
//! variants, and [`Handler::normalize`] resolves any of them into a
//! [`NormalizedHandler`] with exactly one optional function per path.

use std::fmt;

use crate::action::Action;

/// State-transition function stored in handler maps.
///
/// Takes the current state by value together with the triggering action
/// and returns the next state.
pub type HandlerFn<S, P> = Box<dyn Fn(S, &Action<P>) -> S + Send + Sync>;

/// One handler definition: how to react to a single action type.
///
/// A `Paths` value sitting inside a nested map is a leaf by construction
/// and is never mistaken for a sub-map, so the success/failure shape needs
/// no field-name sniffing to be told apart from a namespace.
pub enum Handler<S, P> {
    /// A single function handling the success path; failure actions pass
    /// through unchanged.
    Single(HandlerFn<S, P>),
    /// Success and failure handlers, in that order.
    Pair(HandlerFn<S, P>, HandlerFn<S, P>),
    /// Explicit optional paths; an absent path passes state through.
    Paths {
        /// Handler for success actions.
        on_success: Option<HandlerFn<S, P>>,
        /// Handler for failure actions.
        on_failure: Option<HandlerFn<S, P>>,
    },
    /// No handler: state passes through unchanged on both paths.
    Identity,
}

impl<S, P> Handler<S, P> {
    /// Wrap a single success-path function.
    pub fn single<F>(on_success: F) -> Self
    where
        F: Fn(S, &Action<P>) -> S + Send + Sync + 'static,
    {
        Self::Single(Box::new(on_success))
    }

    /// Wrap a success function and a failure function.
    pub fn pair<F, G>(on_success: F, on_failure: G) -> Self
    where
        F: Fn(S, &Action<P>) -> S + Send + Sync + 'static,
        G: Fn(S, &Action<P>) -> S + Send + Sync + 'static,
    {
        Self::Pair(Box::new(on_success), Box::new(on_failure))
    }

    /// Wrap a failure-path-only function.
    pub fn on_failure<G>(on_failure: G) -> Self
    where
        G: Fn(S, &Action<P>) -> S + Send + Sync + 'static,
    {
        Self::Paths {
            on_success: None,
            on_failure: Some(Box::new(on_failure)),
        }
    }

    /// Build the explicit-paths shape from optional boxed handlers.
    #[must_use]
    pub const fn paths(
        on_success: Option<HandlerFn<S, P>>,
        on_failure: Option<HandlerFn<S, P>>,
    ) -> Self {
        Self::Paths {
            on_success,
            on_failure,
        }
    }

    /// The absent handler.
    #[must_use]
    pub const fn identity() -> Self {
        Self::Identity
    }

    /// Resolve this definition into its two-path normalized form.
    ///
    /// `Single` keeps its function on the success path and leaves the
    /// failure path absent, `Pair` fills both, `Paths` passes its options
    /// through, and `Identity` resolves to two absent paths.
    #[must_use]
    pub fn normalize(self) -> NormalizedHandler<S, P> {
        match self {
            Self::Single(on_success) => NormalizedHandler {
                on_success: Some(on_success),
                on_failure: None,
            },
            Self::Pair(on_success, on_failure) => NormalizedHandler {
                on_success: Some(on_success),
                on_failure: Some(on_failure),
            },
            Self::Paths {
                on_success,
                on_failure,
            } => NormalizedHandler {
                on_success,
                on_failure,
            },
            Self::Identity => NormalizedHandler {
                on_success: None,
                on_failure: None,
            },
        }
    }
}

impl<S, P> fmt::Debug for Handler<S, P> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Single(_) => f.write_str("Handler::Single(<fn>)"),
            Self::Pair(..) => f.write_str("Handler::Pair(<fn>, <fn>)"),
            Self::Paths {
                on_success,
                on_failure,
            } => f
                .debug_struct("Handler::Paths")
                .field("on_success", &on_success.is_some())
                .field("on_failure", &on_failure.is_some())
                .finish(),
            Self::Identity => f.write_str("Handler::Identity"),
        }
    }
}

/// A handler resolved to its success and failure paths.
///
/// Produced by [`Handler::normalize`]. An absent path applies as the
/// identity transition: the state flows through unchanged without any
/// placeholder closure being allocated.
pub struct NormalizedHandler<S, P> {
    on_success: Option<HandlerFn<S, P>>,
    on_failure: Option<HandlerFn<S, P>>,
}

impl<S, P> NormalizedHandler<S, P> {
    /// Run the path selected by `failed`, passing state through when that
    /// path is absent.
    #[must_use]
    pub fn apply(&self, state: S, action: &Action<P>, failed: bool) -> S {
        let path = if failed {
            &self.on_failure
        } else {
            &self.on_success
        };
        match path {
            Some(handler) => handler(state, action),
            None => state,
        }
    }

    /// Whether the success path is present.
    #[must_use]
    pub const fn handles_success(&self) -> bool {
        self.on_success.is_some()
    }

    /// Whether the failure path is present.
    #[must_use]
    pub const fn handles_failure(&self) -> bool {
        self.on_failure.is_some()
    }
}

impl<S, P> fmt::Debug for NormalizedHandler<S, P> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("NormalizedHandler")
            .field("on_success", &self.on_success.is_some())
            .field("on_failure", &self.on_failure.is_some())
            .finish()
    }
}
