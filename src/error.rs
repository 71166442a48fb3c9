//! Registration error types for Switchyard.
//!
//! Defines [`RouteError`], returned by route registration. All variants
//! are fatal to the single registration call that produced them and
//! leave the route table in a consistent state: no handler is attached
//! and no node is left half-built. Lookups never error — a miss is a
//! normal result, not a failure.

/// An error raised while registering a route pattern.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[non_exhaustive]
pub enum RouteError {
    /// The pattern itself is malformed: missing leading `/`, an unnamed
    /// wildcard, two wildcards in one segment, or a catch-all that is
    /// not the final element.
    #[error("invalid route pattern '{pattern}': {reason}")]
    InvalidPattern { pattern: String, reason: String },

    /// The pattern would make an existing route ambiguous: a wildcard
    /// and a static segment (or two differently named wildcards) at the
    /// same position.
    #[error(
        "segment '{segment}' in pattern '{pattern}' conflicts with existing route segment '{existing}'"
    )]
    ConflictingRoute {
        pattern: String,
        segment: String,
        existing: String,
    },

    /// The exact pattern already has a handler for this method.
    #[error("a handler is already registered for pattern '{pattern}'")]
    DuplicateRoute { pattern: String },
}

impl RouteError {
    pub(crate) fn invalid(pattern: &str, reason: &str) -> Self {
        Self::InvalidPattern {
            pattern: pattern.to_owned(),
            reason: reason.to_owned(),
        }
    }

    pub(crate) fn conflict(pattern: &str, segment: &str, existing: &str) -> Self {
        Self::ConflictingRoute {
            pattern: pattern.to_owned(),
            segment: segment.to_owned(),
            existing: existing.to_owned(),
        }
    }

    pub(crate) fn duplicate(pattern: &str) -> Self {
        Self::DuplicateRoute {
            pattern: pattern.to_owned(),
        }
    }
}
