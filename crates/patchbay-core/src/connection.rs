//! Port connection: one directed, weighted, enableable edge.

use core::fmt;

use serde::{Deserialize, Serialize};

use crate::identity::PortIdentity;

/// A directed edge from a source port to a destination port.
///
/// Owned exclusively by a [`PortConnectionsManager`](crate::PortConnectionsManager);
/// the endpoints are fixed at creation and only the weight and the two flags
/// change afterwards, through [`update`](Self::update).
///
/// Serializes as the persistence tuple `{src, dest, multiplier, locked, enabled}`.
/// The modulation base value is scratch state and is not persisted.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PortConnection {
    src: PortIdentity,
    dest: PortIdentity,
    #[serde(default = "unity")]
    multiplier: f32,
    #[serde(default)]
    locked: bool,
    #[serde(default = "enabled_default")]
    enabled: bool,
    #[serde(skip)]
    base_value: f32,
}

fn unity() -> f32 {
    1.0
}

fn enabled_default() -> bool {
    true
}

impl PortConnection {
    /// Creates an edge.
    pub fn new(
        src: PortIdentity,
        dest: PortIdentity,
        multiplier: f32,
        locked: bool,
        enabled: bool,
    ) -> Self {
        Self {
            src,
            dest,
            multiplier,
            locked,
            enabled,
            base_value: 0.0,
        }
    }

    /// Overwrites the mutable fields. Touches nothing outside this edge.
    pub fn update(&mut self, multiplier: f32, locked: bool, enabled: bool) {
        self.multiplier = multiplier;
        self.locked = locked;
        self.enabled = enabled;
    }

    /// Returns `true` if this edge runs `src -> dest`.
    #[inline]
    pub fn matches(&self, src: &PortIdentity, dest: &PortIdentity) -> bool {
        self.src == *src && self.dest == *dest
    }

    /// Returns `true` if `id` is either endpoint.
    #[inline]
    pub fn touches(&self, id: &PortIdentity) -> bool {
        self.src == *id || self.dest == *id
    }

    /// Source endpoint.
    #[inline]
    pub fn src(&self) -> &PortIdentity {
        &self.src
    }

    /// Destination endpoint.
    #[inline]
    pub fn dest(&self) -> &PortIdentity {
        &self.dest
    }

    /// Gain applied along this edge, conceptually in `[0, 1]`.
    #[inline]
    pub fn multiplier(&self) -> f32 {
        self.multiplier
    }

    /// Locked edges are internal routing the user may not delete.
    #[inline]
    pub fn locked(&self) -> bool {
        self.locked
    }

    /// Disabled edges stay in the graph but carry no signal.
    #[inline]
    pub fn enabled(&self) -> bool {
        self.enabled
    }

    /// Scratch value used by control/CV modulation.
    #[inline]
    pub fn base_value(&self) -> f32 {
        self.base_value
    }

    /// Sets the modulation scratch value.
    #[inline]
    pub fn set_base_value(&mut self, value: f32) {
        self.base_value = value;
    }
}

impl fmt::Display for PortConnection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "PortConnection{{src: {}, dest: {}, mult: {:.2}, locked: {}, enabled: {}}}",
            self.src, self.dest, self.multiplier, self.locked, self.enabled
        )
    }
}
