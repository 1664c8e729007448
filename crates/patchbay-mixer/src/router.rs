//! Router notification seam.
//!
//! The execution-order scheduler lives outside this crate. Send operations
//! only need to tell it that topology changed; [`GraphRouter`] is that call.

use patchbay_core::{PortConnectionsManager, PortRegistry, RoutingError};

/// Receives "topology changed, recalculate" notifications.
pub trait GraphRouter {
    /// Re-derives the schedule from `connections`.
    ///
    /// A `soft` recalculation only refreshes edge weights and flags; a hard
    /// one may also reorder nodes. Either way the router must republish the
    /// per-port route caches before returning.
    fn recalc_graph(
        &mut self,
        connections: &PortConnectionsManager,
        registry: &PortRegistry,
        soft: bool,
    ) -> Result<(), RoutingError>;
}

/// Minimal router: checks every edge endpoint still resolves, then
/// publishes route caches.
#[derive(Debug, Default)]
pub struct PublishingRouter {
    hard: usize,
    soft: usize,
}

impl PublishingRouter {
    /// Creates a router with zeroed counters.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of hard recalculations performed.
    pub fn hard_recalcs(&self) -> usize {
        self.hard
    }

    /// Number of soft recalculations performed.
    pub fn soft_recalcs(&self) -> usize {
        self.soft
    }
}

impl GraphRouter for PublishingRouter {
    fn recalc_graph(
        &mut self,
        connections: &PortConnectionsManager,
        registry: &PortRegistry,
        soft: bool,
    ) -> Result<(), RoutingError> {
        if let Err(err) = connections.verify_ports(registry) {
            tracing::error!("router_recalc: inconsistent topology: {err}");
            return Err(err);
        }
        let ports = connections.publish_routes(registry);
        if soft {
            self.soft += 1;
        } else {
            self.hard += 1;
        }
        tracing::debug!(
            "router_recalc: {} edges published to {ports} ports (soft: {soft})",
            connections.len()
        );
        Ok(())
    }
}
