use thiserror::Error;

/// Failures raised by geometric construction.
///
/// Everything else in the crate is total: degenerate splines, coincident
/// points and collapsed scalings all produce a defined value.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum GeometryError {
    #[error("Cannot build a direction from a near-zero vector (squared length {length_squared:e})")]
    ZeroVector { length_squared: f64 },

    #[error("Cannot build a direction from a vector with infinite or NaN components")]
    NonFiniteVector,

    #[error("Invalid operation `{operation}` on a direction: {reason}")]
    InvalidOperation {
        operation: &'static str,
        reason: String,
    },
}

pub type Result<T> = std::result::Result<T, GeometryError>;
