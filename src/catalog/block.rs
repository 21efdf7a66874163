//! Building block definitions
//!
//! A building block is a named template with one socket label per face.
//! Blocks are authored once and read-only afterwards; rotation never mutates
//! a definition, it produces a new `SocketSet` (see `rotation`).

use glam::IVec3;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Label on one face of a block. Two faces connect only if their labels are
/// mutually compatible (see `SocketCompatibilityTable`).
///
/// The empty label means "no socket": that face imposes no constraint and
/// matches anything. The ground label is ordinary data chosen by grid
/// configuration, not special-cased here.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SocketLabel(String);

impl SocketLabel {
    pub fn new(label: impl Into<String>) -> Self {
        SocketLabel(label.into())
    }

    /// The empty "no socket" label
    pub fn none() -> Self {
        SocketLabel(String::new())
    }

    /// True for the empty "no socket" label
    pub fn is_none(&self) -> bool {
        self.0.is_empty()
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for SocketLabel {
    fn from(label: &str) -> Self {
        SocketLabel(label.to_string())
    }
}

impl fmt::Display for SocketLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_none() {
            write!(f, "<none>")
        } else {
            write!(f, "{}", self.0)
        }
    }
}

/// One of the six axis-aligned face directions
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Direction {
    Up,
    Down,
    Front,
    Back,
    Left,
    Right,
}

impl Direction {
    pub const ALL: [Direction; 6] = [
        Direction::Up,
        Direction::Down,
        Direction::Front,
        Direction::Back,
        Direction::Left,
        Direction::Right,
    ];

    /// The direction facing back toward this one
    pub const fn opposite(self) -> Direction {
        match self {
            Direction::Up => Direction::Down,
            Direction::Down => Direction::Up,
            Direction::Front => Direction::Back,
            Direction::Back => Direction::Front,
            Direction::Left => Direction::Right,
            Direction::Right => Direction::Left,
        }
    }

    /// Unit cell offset: Up = +Y, Front = +Z, Right = +X
    pub const fn offset(self) -> IVec3 {
        match self {
            Direction::Up => IVec3::new(0, 1, 0),
            Direction::Down => IVec3::new(0, -1, 0),
            Direction::Front => IVec3::new(0, 0, 1),
            Direction::Back => IVec3::new(0, 0, -1),
            Direction::Left => IVec3::new(-1, 0, 0),
            Direction::Right => IVec3::new(1, 0, 0),
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Direction::Up => "up",
            Direction::Down => "down",
            Direction::Front => "front",
            Direction::Back => "back",
            Direction::Left => "left",
            Direction::Right => "right",
        };
        write!(f, "{}", name)
    }
}

/// The six socket labels of a block, one per face
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct SocketSet {
    #[serde(default)]
    pub up: SocketLabel,
    #[serde(default)]
    pub down: SocketLabel,
    #[serde(default)]
    pub front: SocketLabel,
    #[serde(default)]
    pub back: SocketLabel,
    #[serde(default)]
    pub left: SocketLabel,
    #[serde(default)]
    pub right: SocketLabel,
}

impl SocketSet {
    pub fn new(
        up: SocketLabel,
        down: SocketLabel,
        front: SocketLabel,
        back: SocketLabel,
        left: SocketLabel,
        right: SocketLabel,
    ) -> Self {
        SocketSet {
            up,
            down,
            front,
            back,
            left,
            right,
        }
    }

    /// All six faces empty
    pub fn empty() -> Self {
        SocketSet::default()
    }

    pub fn get(&self, direction: Direction) -> &SocketLabel {
        match direction {
            Direction::Up => &self.up,
            Direction::Down => &self.down,
            Direction::Front => &self.front,
            Direction::Back => &self.back,
            Direction::Left => &self.left,
            Direction::Right => &self.right,
        }
    }

    pub fn set(&mut self, direction: Direction, label: SocketLabel) {
        match direction {
            Direction::Up => self.up = label,
            Direction::Down => self.down = label,
            Direction::Front => self.front = label,
            Direction::Back => self.back = label,
            Direction::Left => self.left = label,
            Direction::Right => self.right = label,
        }
    }
}

/// Immutable template for a placeable building block
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BlockDefinition {
    /// Unique name, used as the catalog lookup key
    pub name: String,
    /// Opaque mesh/visual reference, passed through to the placement sink
    #[serde(default)]
    pub visual: Option<String>,
    /// Socket labels in the block's authored orientation
    pub sockets: SocketSet,
}

impl BlockDefinition {
    pub fn new(name: impl Into<String>, sockets: SocketSet) -> Self {
        BlockDefinition {
            name: name.into(),
            visual: None,
            sockets,
        }
    }

    pub fn with_visual(mut self, visual: impl Into<String>) -> Self {
        self.visual = Some(visual.into());
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_direction_opposites() {
        for dir in Direction::ALL {
            assert_eq!(dir.opposite().opposite(), dir);
            assert_eq!(dir.offset() + dir.opposite().offset(), IVec3::ZERO);
        }
    }

    #[test]
    fn test_empty_label_is_none() {
        assert!(SocketLabel::none().is_none());
        assert!(SocketLabel::default().is_none());
        assert!(!SocketLabel::from("wall").is_none());
    }

    #[test]
    fn test_socket_set_accessors() {
        let mut sockets = SocketSet::empty();
        sockets.set(Direction::Front, SocketLabel::from("door"));
        assert_eq!(sockets.get(Direction::Front).as_str(), "door");
        assert!(sockets.get(Direction::Back).is_none());
    }

    #[test]
    fn test_block_definition_json() {
        let json = r#"{
            "name": "Wall",
            "sockets": { "down": "floor", "left": "wall", "right": "wall" }
        }"#;
        let block: BlockDefinition = serde_json::from_str(json).unwrap();
        assert_eq!(block.name, "Wall");
        assert_eq!(block.sockets.down.as_str(), "floor");
        assert!(block.sockets.up.is_none());
        assert!(block.visual.is_none());
    }
}
