use crate::{
    curve::{LatticeCurve, MAX_ORDER},
    error::{Error, Result},
    point::GridPoint,
};

/// Binary reflected Gray code, limited to the low two bits.
#[inline]
fn gray2(word: u32) -> u32 {
    (word ^ (word >> 1)) & 3
}

/// Swap the two bits of a 2-bit label.
#[inline]
fn rot2(label: u32) -> u32 {
    match label & 3 {
        1 => 2,
        2 => 1,
        l => l,
    }
}

/// Walk the Hilbert state machine from the most significant quadrant down,
/// returning the lattice cell for `index`.
fn hilbert_point(order: u32, index: u32) -> GridPoint {
    let mut entry = 0;
    let mut flipped = false;
    let mut x = 0;
    let mut y = 0;
    for level in (0..order).rev() {
        let word = (index >> (2 * level)) & 3;
        let label = if flipped {
            gray2(word) ^ entry
        } else {
            rot2(gray2(word)) ^ entry
        };
        x |= ((label >> 1) & 1) << level;
        y |= (label & 1) << level;
        if word == 3 {
            entry = 3 - entry;
        }
        if word == 0 || word == 3 {
            flipped = !flipped;
        }
    }
    GridPoint::new(x, y)
}

/// Inverse of [`hilbert_point`].
fn hilbert_index(order: u32, p: GridPoint) -> u32 {
    let mut entry = 0;
    let mut flipped = false;
    let mut index = 0;
    for level in (0..order).rev() {
        let label = ((((p.x >> level) & 1) << 1) | ((p.y >> level) & 1)) ^ entry;
        let word = if flipped {
            gray2(label)
        } else {
            gray2(rot2(label))
        };
        if word == 3 {
            entry = 3 - entry;
        }
        if word == 0 || word == 3 {
            flipped = !flipped;
        }
        index = (index << 2) | word;
    }
    index
}

/// The 2D Hilbert curve of a given order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Hilbert {
    /// Recursion depth.
    order: u32,
}

impl Hilbert {
    /// A Hilbert curve over a `2^order × 2^order` lattice.
    pub fn new(order: u32) -> Result<Self> {
        if order > MAX_ORDER {
            return Err(Error::OrderTooLarge {
                order,
                max: MAX_ORDER,
            });
        }
        Ok(Self { order })
    }
}

impl LatticeCurve for Hilbert {
    fn order(&self) -> u32 {
        self.order
    }

    fn point_at(&self, index: u32) -> GridPoint {
        debug_assert!(index < self.point_count(), "index out of bounds");
        hilbert_point(self.order, index)
    }

    fn index_of(&self, p: GridPoint) -> u32 {
        debug_assert!(
            p.x < self.side() && p.y < self.side(),
            "point coordinate out of bounds"
        );
        hilbert_index(self.order, p)
    }
}
