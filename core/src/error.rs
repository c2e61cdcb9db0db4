//! Construction-time error types.
//!
//! Everything that can go wrong here goes wrong while *building* a reducer
//! or flattening a handler map. The assembled reducer itself never returns
//! errors: unmatched actions are silent no-ops, and a panicking handler
//! propagates to the caller unmodified.

use thiserror::Error;

/// Errors surfaced while flattening a handler map or building a reducer.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// A reducer was built without a default state.
    ///
    /// A transition function without a defined baseline is meaningless for
    /// any caller driving it from a fresh store, so the absence fails at
    /// construction rather than at first invocation. Carries the first
    /// flattened handler key, when one exists, so the offending map is easy
    /// to locate.
    #[error(
        "default state for reducer handling `{}` should be defined",
        .first_key.as_deref().unwrap_or("<empty handler map>")
    )]
    MissingDefaultState {
        /// Canonical form of the first key in the flattened map, if any.
        first_key: Option<String>,
    },

    /// Two entries flattened to the same canonical key.
    ///
    /// Distinct nested paths can join to the same divider-separated string.
    /// Keeping the last writer would leave the earlier handler silently
    /// unreachable, so the collision is rejected instead.
    #[error("handler map flattens to duplicate key `{key}`")]
    DuplicateKey {
        /// Canonical form of the colliding key.
        key: String,
    },
}
