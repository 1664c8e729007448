//! Connection compatibility seam.

use patchbay_core::PortIdentity;

/// Decides whether a `src -> dest` edge may be created.
pub trait ConnectionValidator {
    /// Returns `true` if `src` may feed `dest`.
    fn can_connect(&self, src: &PortIdentity, dest: &PortIdentity) -> bool;
}

/// Default validator: the type rules of [`PortIdentity::can_connect_to`].
#[derive(Clone, Copy, Debug, Default)]
pub struct TypeCompatibility;

impl ConnectionValidator for TypeCompatibility {
    fn can_connect(&self, src: &PortIdentity, dest: &PortIdentity) -> bool {
        src.can_connect_to(dest)
    }
}

impl<F> ConnectionValidator for F
where
    F: Fn(&PortIdentity, &PortIdentity) -> bool,
{
    fn can_connect(&self, src: &PortIdentity, dest: &PortIdentity) -> bool {
        self(src, dest)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use patchbay_core::{OwnerId, PortFlow, PortOwner, PortType};

    #[test]
    fn test_closure_validator() {
        let a = PortIdentity::new(
            PortOwner::Fader(OwnerId(1)),
            PortType::Audio,
            PortFlow::Output,
            0,
        );
        let b = PortIdentity::new(
            PortOwner::TrackProcessor(OwnerId(2)),
            PortType::Audio,
            PortFlow::Input,
            0,
        );
        assert!(TypeCompatibility.can_connect(&a, &b));
        let deny_all = |_: &PortIdentity, _: &PortIdentity| false;
        assert!(!deny_all.can_connect(&a, &b));
    }
}
