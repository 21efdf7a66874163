//! Rotation algebra for socket sets
//!
//! Blocks rotate about the vertical axis in 90 degree steps. Up and Down are
//! invariant; the four horizontal faces permute cyclically. The permutation
//! here is for blocks authored with Down as the physical bottom, the only
//! orientation the generation pipeline produces. Blocks authored lying on a
//! side face would need a different permutation per side and are deliberately
//! not supported.

use crate::catalog::SocketSet;
use crate::error::{ForgeError, ForgeResult};
use serde::{Deserialize, Serialize};

/// Rotation about the vertical axis, clockwise viewed from above
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Rotation {
    #[default]
    R0,
    R90,
    R180,
    R270,
}

impl Rotation {
    pub const ALL: [Rotation; 4] = [Rotation::R0, Rotation::R90, Rotation::R180, Rotation::R270];

    /// Parse a degree value; rejects anything that is not a multiple of 90.
    /// Negative values and values beyond 360 are normalized first.
    pub fn from_degrees(degrees: i32) -> ForgeResult<Self> {
        let normalized = degrees.rem_euclid(360);
        match normalized {
            0 => Ok(Rotation::R0),
            90 => Ok(Rotation::R90),
            180 => Ok(Rotation::R180),
            270 => Ok(Rotation::R270),
            _ => Err(ForgeError::InvalidRotation(degrees)),
        }
    }

    pub const fn degrees(self) -> i32 {
        match self {
            Rotation::R0 => 0,
            Rotation::R90 => 90,
            Rotation::R180 => 180,
            Rotation::R270 => 270,
        }
    }

    /// The next rotation in +90 degree order, wrapping around
    pub const fn next(self) -> Rotation {
        match self {
            Rotation::R0 => Rotation::R90,
            Rotation::R90 => Rotation::R180,
            Rotation::R180 => Rotation::R270,
            Rotation::R270 => Rotation::R0,
        }
    }

    /// Composition: `a.then(b)` is rotating by `a`, then by `b`
    pub const fn then(self, other: Rotation) -> Rotation {
        let mut result = self;
        let mut steps = other as u8;
        while steps > 0 {
            result = result.next();
            steps -= 1;
        }
        result
    }
}

impl SocketSet {
    /// Socket labels after rotating the block about the vertical axis.
    ///
    /// Pure: returns a new set, never mutates the definition it came from.
    pub fn rotated(&self, rotation: Rotation) -> SocketSet {
        let (front, back, left, right) = match rotation {
            Rotation::R0 => (
                self.front.clone(),
                self.back.clone(),
                self.left.clone(),
                self.right.clone(),
            ),
            // 90 clockwise from above: Front<-Right, Right<-Back, Back<-Left, Left<-Front
            Rotation::R90 => (
                self.right.clone(),
                self.left.clone(),
                self.front.clone(),
                self.back.clone(),
            ),
            Rotation::R180 => (
                self.back.clone(),
                self.front.clone(),
                self.right.clone(),
                self.left.clone(),
            ),
            // Inverse of 90: Front<-Left, Left<-Back, Back<-Right, Right<-Front
            Rotation::R270 => (
                self.left.clone(),
                self.right.clone(),
                self.back.clone(),
                self.front.clone(),
            ),
        };
        SocketSet {
            up: self.up.clone(),
            down: self.down.clone(),
            front,
            back,
            left,
            right,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::SocketLabel;

    fn sample() -> SocketSet {
        SocketSet::new(
            SocketLabel::from("u"),
            SocketLabel::from("d"),
            SocketLabel::from("f"),
            SocketLabel::from("b"),
            SocketLabel::from("l"),
            SocketLabel::from("r"),
        )
    }

    #[test]
    fn test_vertical_faces_invariant() {
        for rotation in Rotation::ALL {
            let rotated = sample().rotated(rotation);
            assert_eq!(rotated.up.as_str(), "u");
            assert_eq!(rotated.down.as_str(), "d");
        }
    }

    #[test]
    fn test_quarter_turn_permutation() {
        let rotated = sample().rotated(Rotation::R90);
        assert_eq!(rotated.front.as_str(), "r");
        assert_eq!(rotated.right.as_str(), "b");
        assert_eq!(rotated.back.as_str(), "l");
        assert_eq!(rotated.left.as_str(), "f");
    }

    #[test]
    fn test_two_quarter_turns_equal_half_turn() {
        let twice = sample().rotated(Rotation::R90).rotated(Rotation::R90);
        assert_eq!(twice, sample().rotated(Rotation::R180));
    }

    #[test]
    fn test_four_quarter_turns_are_identity() {
        let mut sockets = sample();
        for _ in 0..4 {
            sockets = sockets.rotated(Rotation::R90);
        }
        assert_eq!(sockets, sample());
    }

    #[test]
    fn test_r270_inverts_r90() {
        let back = sample().rotated(Rotation::R90).rotated(Rotation::R270);
        assert_eq!(back, sample());
    }

    #[test]
    fn test_composition_matches_rotation() {
        for a in Rotation::ALL {
            for b in Rotation::ALL {
                let composed = sample().rotated(a).rotated(b);
                let direct = sample().rotated(a.then(b));
                assert_eq!(composed, direct, "composing {:?} then {:?}", a, b);
            }
        }
    }

    #[test]
    fn test_from_degrees() {
        assert_eq!(Rotation::from_degrees(90).unwrap(), Rotation::R90);
        assert_eq!(Rotation::from_degrees(450).unwrap(), Rotation::R90);
        assert_eq!(Rotation::from_degrees(-90).unwrap(), Rotation::R270);
        assert!(Rotation::from_degrees(45).is_err());
    }
}
