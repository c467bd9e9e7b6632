/// Compass directions in which a node can be linked to its neighbors.
///
/// Rows grow southwards and columns grow eastwards, so `North` is a
/// row delta of -1 and `East` a column delta of +1.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Link {
    North,
    NorthEast,
    East,
    SouthEast,
    South,
    SouthWest,
    West,
    NorthWest,
}

impl Link {
    /// All directions in canonical order, clockwise from north.
    pub const ALL: [Link; 8] = [
        Link::North,
        Link::NorthEast,
        Link::East,
        Link::SouthEast,
        Link::South,
        Link::SouthWest,
        Link::West,
        Link::NorthWest,
    ];

    pub fn opposite(self) -> Link {
        match self {
            Link::North => Link::South,
            Link::NorthEast => Link::SouthWest,
            Link::East => Link::West,
            Link::SouthEast => Link::NorthWest,
            Link::South => Link::North,
            Link::SouthWest => Link::NorthEast,
            Link::West => Link::East,
            Link::NorthWest => Link::SouthEast,
        }
    }

    /// Row and column offset of the neighbor in this direction.
    pub fn delta(self) -> (i64, i64) {
        match self {
            Link::North => (-1, 0),
            Link::NorthEast => (-1, 1),
            Link::East => (0, 1),
            Link::SouthEast => (1, 1),
            Link::South => (1, 0),
            Link::SouthWest => (1, -1),
            Link::West => (0, -1),
            Link::NorthWest => (-1, -1),
        }
    }

    /// The direction matching a row/column offset, if it is one of the 8.
    pub fn from_delta(d_row: i64, d_col: i64) -> Option<Link> {
        Link::ALL
            .into_iter()
            .find(|link| link.delta() == (d_row, d_col))
    }

    fn bit(self) -> u8 {
        1 << (self as u8)
    }
}

/// Set of links drawn from a single node, stored as a bitmask.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LinkSet(u8);

impl LinkSet {
    pub fn contains(self, link: Link) -> bool {
        self.0 & link.bit() != 0
    }

    /// Add a link. Returns false if it was already present.
    pub fn insert(&mut self, link: Link) -> bool {
        if self.contains(link) {
            return false;
        }
        self.0 |= link.bit();
        true
    }

    pub fn len(self) -> usize {
        self.0.count_ones() as usize
    }

    pub fn is_empty(self) -> bool {
        self.0 == 0
    }

    pub fn is_full(self) -> bool {
        self.0 == u8::MAX
    }

    /// Drawn links in canonical order.
    pub fn iter(self) -> impl Iterator<Item = Link> {
        Link::ALL.into_iter().filter(move |link| self.contains(*link))
    }
}
