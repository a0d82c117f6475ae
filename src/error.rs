use thiserror::Error;

/// Errors raised when an accessor cannot reach its provider.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ContextError {
    /// The accessor was called outside every provider of its kind.
    #[error("{accessor} must be used within a {provider}")]
    MissingProvider {
        accessor: &'static str,
        provider: &'static str,
    },
}

/// A theme name outside `light`, `dark` and `custom`.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown theme `{0}`")]
pub struct ParseThemeError(pub String);
