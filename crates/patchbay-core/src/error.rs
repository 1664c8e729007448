//! Error types for routing lookups.

use core::fmt;

use thiserror::Error;

use crate::identity::{OwnerId, PortIdentity};

/// Which side of a port a neighbour lookup walks.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Endpoint {
    /// Edges pointing at the port.
    Source,
    /// Edges leaving the port.
    Destination,
}

impl Endpoint {
    /// Maps the `sources` flag used by the manager's query API.
    #[inline]
    pub fn from_sources(sources: bool) -> Self {
        if sources {
            Self::Source
        } else {
            Self::Destination
        }
    }
}

impl fmt::Display for Endpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Source => "source",
            Self::Destination => "destination",
        })
    }
}

/// Errors raised by routing lookups.
#[derive(Debug, Error)]
pub enum RoutingError {
    /// An identity no longer resolves to a live port
    #[error("port not registered: {0}")]
    MissingPort(PortIdentity),

    /// A track id no longer resolves
    #[error("track not registered: {0}")]
    MissingTrack(OwnerId),

    /// A plugin id no longer resolves
    #[error("plugin not registered: {0}")]
    MissingPlugin(OwnerId),

    /// A port expected to have exactly one neighbour has a different count
    #[error("expected 1 {direction} for {port}, found {found} connections")]
    UnexpectedConnectionCount {
        /// Port whose neighbours were counted.
        port: PortIdentity,
        /// Side of the port that was walked.
        direction: Endpoint,
        /// Number of matching edges.
        found: usize,
    },
}

impl RoutingError {
    /// Create an unexpected-count error.
    pub fn unexpected_count(port: &PortIdentity, sources: bool, found: usize) -> Self {
        RoutingError::UnexpectedConnectionCount {
            port: port.clone(),
            direction: Endpoint::from_sources(sources),
            found,
        }
    }
}
