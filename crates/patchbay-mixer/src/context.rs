//! Bundle of the collaborators a topology-changing send operation needs.

use patchbay_core::{PortConnectionsManager, PortRegistry, RoutingError};

use crate::router::GraphRouter;
use crate::validate::ConnectionValidator;

/// Borrowed handles to the project's manager, registry, router and
/// compatibility check.
///
/// Built per operation by whoever owns the project; nothing here is global.
pub struct RoutingContext<'a> {
    /// The project's connections.
    pub connections: &'a mut PortConnectionsManager,
    /// Live ports, tracks and plugins.
    pub registry: &'a PortRegistry,
    /// Receives recalculation requests.
    pub router: &'a mut dyn GraphRouter,
    /// Decides whether a target is connectable.
    pub validator: &'a dyn ConnectionValidator,
}

impl<'a> RoutingContext<'a> {
    /// Bundles the collaborators.
    pub fn new(
        connections: &'a mut PortConnectionsManager,
        registry: &'a PortRegistry,
        router: &'a mut dyn GraphRouter,
        validator: &'a dyn ConnectionValidator,
    ) -> Self {
        Self {
            connections,
            registry,
            router,
            validator,
        }
    }

    /// Asks the router to recalculate from the current topology.
    pub fn recalc(&mut self, soft: bool) -> Result<(), RoutingError> {
        self.router
            .recalc_graph(&*self.connections, self.registry, soft)
    }
}
