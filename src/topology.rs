//! Static line geometry of the 15-spot triangle.
//!
//! Jump legality depends on exact line membership, so the lines are spelled
//! out literally rather than derived at runtime. Every spot lies on exactly
//! one line of each kind.

use crate::board::Spot;

/// Direction family of a line.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Hash)]
pub enum LineKind {
    /// Horizontal row.
    Row,
    /// Parallel to the right edge (0, 2, 5, 9, 14).
    Rising,
    /// Parallel to the left edge (0, 1, 3, 6, 10).
    Falling,
}

/// An ordered straight run of spots.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub struct Line {
    kind: LineKind,
    spots: &'static [Spot],
}

impl Line {
    #[inline]
    pub fn kind(&self) -> LineKind {
        self.kind
    }

    #[inline]
    pub fn spots(&self) -> &'static [Spot] {
        self.spots
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.spots.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.spots.is_empty()
    }

    /// Index of `spot` along the line.
    #[inline]
    pub fn position(&self, spot: Spot) -> Option<usize> {
        self.spots.iter().position(|&s| s == spot)
    }

    #[inline]
    pub fn contains(&self, spot: Spot) -> bool {
        self.position(spot).is_some()
    }
}

/// All straight lines on the board.
///
/// ```text
///         0
///       1   2
///     3   4   5
///   6   7   8   9
/// 10  11  12  13  14
/// ```
pub static LINES: [Line; 15] = [
    Line {
        kind: LineKind::Row,
        spots: &[Spot(0)],
    },
    Line {
        kind: LineKind::Row,
        spots: &[Spot(1), Spot(2)],
    },
    Line {
        kind: LineKind::Row,
        spots: &[Spot(3), Spot(4), Spot(5)],
    },
    Line {
        kind: LineKind::Row,
        spots: &[Spot(6), Spot(7), Spot(8), Spot(9)],
    },
    Line {
        kind: LineKind::Row,
        spots: &[Spot(10), Spot(11), Spot(12), Spot(13), Spot(14)],
    },
    Line {
        kind: LineKind::Rising,
        spots: &[Spot(0), Spot(2), Spot(5), Spot(9), Spot(14)],
    },
    Line {
        kind: LineKind::Rising,
        spots: &[Spot(1), Spot(4), Spot(8), Spot(13)],
    },
    Line {
        kind: LineKind::Rising,
        spots: &[Spot(3), Spot(7), Spot(12)],
    },
    Line {
        kind: LineKind::Rising,
        spots: &[Spot(6), Spot(11)],
    },
    Line {
        kind: LineKind::Rising,
        spots: &[Spot(10)],
    },
    Line {
        kind: LineKind::Falling,
        spots: &[Spot(0), Spot(1), Spot(3), Spot(6), Spot(10)],
    },
    Line {
        kind: LineKind::Falling,
        spots: &[Spot(2), Spot(4), Spot(7), Spot(11)],
    },
    Line {
        kind: LineKind::Falling,
        spots: &[Spot(5), Spot(8), Spot(12)],
    },
    Line {
        kind: LineKind::Falling,
        spots: &[Spot(9), Spot(13)],
    },
    Line {
        kind: LineKind::Falling,
        spots: &[Spot(14)],
    },
];

/// Lines passing through `spot`, one of each kind.
pub fn lines_containing(spot: Spot) -> impl Iterator<Item = &'static Line> {
    LINES.iter().filter(move |line| line.contains(spot))
}

/// Spots one step away from `spot` along any line, ascending.
pub fn adjacent(spot: Spot) -> Vec<Spot> {
    let mut neighbors: Vec<Spot> = lines_containing(spot)
        .flat_map(|line| {
            let spots = line.spots();
            let at = line.position(spot).unwrap_or_default();
            let before = at.checked_sub(1).and_then(|i| spots.get(i));
            let after = spots.get(at + 1);
            before.into_iter().chain(after).copied()
        })
        .collect();
    neighbors.sort();
    neighbors
}
