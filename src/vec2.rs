//! 2D vector built from the fixed-point scalar.
//!
//! A mechanical composition of scalar ops that doubles as the in-tree
//! consumer of the unchecked square-root path: `length` feeds a sum of
//! squares, which is non-negative by construction. Field order and size
//! are part of the contract — two consecutive scalar slots — so vectors
//! can be embedded in snapshot buffers and hashed byte-for-byte.

use serde::{Deserialize, Serialize};

use crate::scalar::Fixed;

#[derive(
    Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[repr(C)]
pub struct FixedVec2 {
    pub x: Fixed,
    pub y: Fixed,
}

impl FixedVec2 {
    pub const ZERO: FixedVec2 = FixedVec2 {
        x: Fixed::ZERO,
        y: Fixed::ZERO,
    };

    pub fn new(x: Fixed, y: Fixed) -> FixedVec2 {
        FixedVec2 { x, y }
    }

    /// Deterministic construction from floats, through the bit-exact
    /// conversion path.
    pub fn from_f32(x: f32, y: f32) -> FixedVec2 {
        FixedVec2 {
            x: Fixed::from_f32(x),
            y: Fixed::from_f32(y),
        }
    }

    pub fn length_squared(self) -> Fixed {
        self.x * self.x + self.y * self.y
    }

    pub fn length(self) -> Fixed {
        let len_sq = self.length_squared();
        if len_sq == Fixed::ZERO {
            return Fixed::ZERO;
        }
        len_sq.sqrt_unchecked()
    }

    pub fn normalize(self) -> FixedVec2 {
        let len = self.length();
        if len == Fixed::ZERO {
            FixedVec2::ZERO
        } else {
            FixedVec2 {
                x: self.x / len,
                y: self.y / len,
            }
        }
    }

    pub fn dot(self, other: FixedVec2) -> Fixed {
        self.x * other.x + self.y * other.y
    }

    pub fn cross(self, other: FixedVec2) -> Fixed {
        self.x * other.y - self.y * other.x
    }

    /// Angle of the vector against the positive x axis, in radians.
    pub fn angle(self) -> Fixed {
        self.y.atan2(self.x)
    }
}

impl std::ops::Add for FixedVec2 {
    type Output = FixedVec2;
    fn add(self, rhs: FixedVec2) -> FixedVec2 {
        FixedVec2 {
            x: self.x + rhs.x,
            y: self.y + rhs.y,
        }
    }
}

impl std::ops::Sub for FixedVec2 {
    type Output = FixedVec2;
    fn sub(self, rhs: FixedVec2) -> FixedVec2 {
        FixedVec2 {
            x: self.x - rhs.x,
            y: self.y - rhs.y,
        }
    }
}

impl std::ops::Mul<Fixed> for FixedVec2 {
    type Output = FixedVec2;
    fn mul(self, rhs: Fixed) -> FixedVec2 {
        FixedVec2 {
            x: self.x * rhs,
            y: self.y * rhs,
        }
    }
}

impl std::ops::Div<Fixed> for FixedVec2 {
    type Output = FixedVec2;
    fn div(self, rhs: Fixed) -> FixedVec2 {
        FixedVec2 {
            x: self.x / rhs,
            y: self.y / rhs,
        }
    }
}

impl std::ops::Neg for FixedVec2 {
    type Output = FixedVec2;
    fn neg(self) -> FixedVec2 {
        FixedVec2 {
            x: -self.x,
            y: -self.y,
        }
    }
}
