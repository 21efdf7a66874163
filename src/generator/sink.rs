//! Placement sink: the outward contract toward mesh/visual instantiation
//!
//! The generator reports every commit and clear to a sink. Visual placement
//! is entirely the sink's concern; the generator only consults the returned
//! bool for the initial seed placement.

use crate::catalog::BlockDefinition;
use crate::rotation::Rotation;
use glam::IVec3;

pub trait PlacementSink {
    /// A block was committed. The return value is only honored for the seed
    /// placement; later placements ignore it.
    fn place(&mut self, position: IVec3, block: &BlockDefinition, rotation: Rotation) -> bool;

    /// A previously committed position was cleared
    fn clear(&mut self, position: IVec3);
}

/// Headless sink: accepts everything, does nothing
#[derive(Debug, Default)]
pub struct NullSink;

impl PlacementSink for NullSink {
    fn place(&mut self, _position: IVec3, _block: &BlockDefinition, _rotation: Rotation) -> bool {
        true
    }

    fn clear(&mut self, _position: IVec3) {}
}

// Lets callers keep a handle on a sink they hand to the generator
impl<S: PlacementSink> PlacementSink for std::rc::Rc<std::cell::RefCell<S>> {
    fn place(&mut self, position: IVec3, block: &BlockDefinition, rotation: Rotation) -> bool {
        self.borrow_mut().place(position, block, rotation)
    }

    fn clear(&mut self, position: IVec3) {
        self.borrow_mut().clear(position)
    }
}

/// Test/debug sink that records every event it sees
#[derive(Debug, Default)]
pub struct RecordingSink {
    pub placed: Vec<(IVec3, String, Rotation)>,
    pub cleared: Vec<IVec3>,
}

impl PlacementSink for RecordingSink {
    fn place(&mut self, position: IVec3, block: &BlockDefinition, rotation: Rotation) -> bool {
        self.placed.push((position, block.name.clone(), rotation));
        true
    }

    fn clear(&mut self, position: IVec3) {
        self.cleared.push(position);
    }
}
