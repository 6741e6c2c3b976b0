use thiserror::Error;

/// Misuse of a [`Registry`](crate::Registry).
///
/// A call that returns one of these leaves the registry exactly as it was.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RegistryError {
    /// The factory produced a bare scalar instead of an object-like value.
    #[error("factory must return an object, got `{type_name}`")]
    InvalidValue { type_name: &'static str },

    /// `remember` without `force` for a name that already has an entry.
    #[error("instance with name '{name}' already exists")]
    DuplicateName { name: String },

    /// `make` with no name while nothing is remembered.
    #[error("no instance name provided")]
    MissingName,

    /// `make_as` found the entry but it holds a different type.
    #[error("instance '{name}' is not a `{expected}`")]
    TypeMismatch { name: String, expected: &'static str },
}
