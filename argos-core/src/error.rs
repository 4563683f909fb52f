//! Error types for argos-core.

use thiserror::Error;

/// Result type alias for argos-core operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Core error types for config tree and editor operations.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum Error {
    /// A value could not be coerced into the type stored by a config tree item.
    #[error("cannot convert {value} to {expected}")]
    TypeCoercion {
        /// Debug representation of the rejected value.
        value: String,
        /// Name of the target type.
        expected: &'static str,
    },

    /// The user data list of a choice item does not match its choices.
    #[error("size mismatch: {user_data} user data items for {choices} choices")]
    ChoiceSizeMismatch { choices: usize, user_data: usize },

    /// A choice index lies outside the list of choices.
    #[error("choice index {index} out of range (0..{len})")]
    ChoiceIndexOutOfRange { index: usize, len: usize },

    /// No config tree item exists at the given path.
    #[error("no config tree item found at path: {0:?}")]
    PathNotFound(String),

    /// A sibling with the same node name already exists.
    #[error("duplicate child {child:?} in {parent:?}")]
    DuplicateChild { parent: String, child: String },

    /// Node names are used as path segments and may not contain slashes.
    #[error("invalid node name: {0:?}")]
    InvalidNodeName(String),

    /// The config tree item has no editor (e.g. group nodes).
    #[error("config tree item {0:?} is not editable")]
    NotEditable(String),

    /// The config value at a path has a different type than requested.
    #[error("config value at {path:?} is not a {expected}")]
    UnexpectedValueType { path: String, expected: &'static str },

    /// An editor was used after it was finalized.
    #[error("editor has been finalized")]
    EditorFinalized,
}
