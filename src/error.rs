/// Classification of every error the core can surface.
///
/// The HTTP status mapping lives outside the core; callers only need the
/// kind and the human-readable message carried by the error itself.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Missing entity or out-of-range page.
    NotFound,
    /// Invalid state transition, e.g. re-delivering or deleting an
    /// in-flight order, or reserving more stock than is available.
    Conflict,
    /// Missing, malformed, or disallowed input.
    Validation,
    /// Unexpected store failure (actor gone, channel dropped).
    Internal,
}

/// Implemented by every domain error enum so callers can map errors
/// uniformly without matching on aggregate-specific variants.
pub trait Fault {
    fn kind(&self) -> ErrorKind;
}
