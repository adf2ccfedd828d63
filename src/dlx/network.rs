//! The dancing-links constraint network.
//!
//! The exact-cover matrix for a 9x9 Sudoku has 729 candidate rows (one per
//! (row, col, value) triple) and 324 constraint columns in four families:
//!
//! 1. cell `(r, c)` is occupied,
//! 2. row `r` contains value `v`,
//! 3. column `c` contains value `v`,
//! 4. box `b` contains value `v`.
//!
//! Rather than a cyclic graph of mutually referencing pointers, the network is
//! an arena: every node lives in one `Vec` and all four neighbour links, plus
//! the column back-reference, are `usize` indices into it. Index 0 is the
//! permanent root sentinel, indices `1..=324` are the column headers, and
//! entries follow. Links express adjacency only; the arena owns all nodes.
//!
//! `cover`/`uncover` are the two primitives of Knuth's dancing links: removal
//! of a column (and every row incompatible with it) in O(touched links), and
//! its exact inverse. `uncover` traverses in the reverse order of `cover`,
//! which is what makes the restoration bit-identical.

use crate::grid::{CELLS, Grid, SIZE};
use smallvec::SmallVec;

/// Number of constraint columns: four families of 81.
pub(crate) const COLUMNS: usize = 4 * CELLS;

/// Arena index of the root sentinel.
const ROOT: usize = 0;

/// One (row, col, value) placement hypothesis. Each candidate owns one
/// four-entry row of the matrix.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub(crate) struct Candidate {
    pub row: usize,
    pub col: usize,
    pub value: u8,
}

/// A node of the network. The root and the column headers only use the link
/// fields (plus `size` for headers); entries additionally carry their column
/// back-reference and candidate.
#[derive(Debug, Clone, PartialEq, Eq)]
struct Node {
    left: usize,
    right: usize,
    up: usize,
    down: usize,
    /// Column header of an entry; self for headers and the root.
    header: usize,
    /// Count of live entries in the column. Meaningful on headers only.
    size: usize,
    candidate: Candidate,
}

impl Node {
    /// A node linked only to itself.
    const fn detached(id: usize) -> Self {
        Self {
            left: id,
            right: id,
            up: id,
            down: id,
            header: id,
            size: 0,
            candidate: Candidate {
                row: 0,
                col: 0,
                value: 0,
            },
        }
    }
}

/// The sparse constraint matrix, owned as a single node arena.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct Network {
    nodes: Vec<Node>,
}

impl Network {
    /// Builds the full 729x324 network and returns it together with the entry
    /// ids of the prefilled cells' candidate rows, in row-major grid order.
    ///
    /// Nothing is covered yet; the caller decides how to apply the givens so
    /// that it can notice clue contradictions along the way.
    pub(crate) fn build(puzzle: &Grid) -> (Self, Vec<usize>) {
        let mut nodes = Vec::with_capacity(1 + COLUMNS + CELLS * SIZE * 4);
        for id in 0..=COLUMNS {
            nodes.push(Node::detached(id));
        }
        let mut network = Self { nodes };

        // Header ring around the root, in canonical column order.
        for column in 0..COLUMNS {
            let header = column + 1;
            let previous = if column == 0 { ROOT } else { column };
            network.nodes[header].left = previous;
            network.nodes[previous].right = header;
        }
        network.nodes[ROOT].left = COLUMNS;
        network.nodes[COLUMNS].right = ROOT;

        let mut givens = Vec::with_capacity(puzzle.clue_count());
        for row in 0..SIZE {
            for col in 0..SIZE {
                let boxi = Grid::box_of(row, col);
                for value in 1..=SIZE as u8 {
                    let v = usize::from(value - 1);
                    let columns = [
                        row * SIZE + col,
                        CELLS + row * SIZE + v,
                        2 * CELLS + col * SIZE + v,
                        3 * CELLS + boxi * SIZE + v,
                    ];
                    let candidate = Candidate { row, col, value };

                    // One entry per constraint family, linked into a row ring
                    // and appended to the bottom of its column ring.
                    let first = network.nodes.len();
                    for (i, &column) in columns.iter().enumerate() {
                        let id = first + i;
                        network.nodes.push(Node {
                            left: if i == 0 { first + 3 } else { id - 1 },
                            right: if i == 3 { first } else { id + 1 },
                            up: id,
                            down: id,
                            header: column + 1,
                            size: 0,
                            candidate,
                        });
                        network.append_to_column(id);
                    }

                    if puzzle.get(row, col) == value {
                        givens.push(first);
                    }
                }
            }
        }

        (network, givens)
    }

    /// Links `entry` in at the bottom of its column's ring.
    fn append_to_column(&mut self, entry: usize) {
        let header = self.nodes[entry].header;
        let bottom = self.nodes[header].up;
        self.nodes[entry].up = bottom;
        self.nodes[entry].down = header;
        self.nodes[bottom].down = entry;
        self.nodes[header].up = entry;
        self.nodes[header].size += 1;
    }

    /// Removes `header`'s column from the header ring, and every row with an
    /// entry in that column from all *other* columns those rows touch. The
    /// covered column's own ring is left intact so that [`Self::uncover`] can
    /// rebuild from it.
    pub(crate) fn cover(&mut self, header: usize) {
        debug_assert!((1..=COLUMNS).contains(&header));

        let (left, right) = (self.nodes[header].left, self.nodes[header].right);
        self.nodes[left].right = right;
        self.nodes[right].left = left;

        let mut row = self.nodes[header].down;
        while row != header {
            let mut entry = self.nodes[row].right;
            while entry != row {
                let (up, down) = (self.nodes[entry].up, self.nodes[entry].down);
                self.nodes[up].down = down;
                self.nodes[down].up = up;

                let column = self.nodes[entry].header;
                debug_assert!(self.nodes[column].size > 0, "live count underflow");
                self.nodes[column].size -= 1;

                entry = self.nodes[entry].right;
            }
            row = self.nodes[row].down;
        }
    }

    /// Exact inverse of [`Self::cover`]: relinks in the reverse traversal
    /// order (up instead of down, left instead of right), restoring every
    /// link and every live count to its pre-cover state, then relinks the
    /// header into the header ring.
    pub(crate) fn uncover(&mut self, header: usize) {
        debug_assert!((1..=COLUMNS).contains(&header));

        let mut row = self.nodes[header].up;
        while row != header {
            let mut entry = self.nodes[row].left;
            while entry != row {
                let column = self.nodes[entry].header;
                self.nodes[column].size += 1;

                let (up, down) = (self.nodes[entry].up, self.nodes[entry].down);
                self.nodes[up].down = entry;
                self.nodes[down].up = entry;

                entry = self.nodes[entry].left;
            }
            row = self.nodes[row].up;
        }

        let (left, right) = (self.nodes[header].left, self.nodes[header].right);
        self.nodes[left].right = header;
        self.nodes[right].left = header;
    }

    /// Covers every column of `entry`'s candidate row, starting with its own.
    /// Used to apply a prefilled cell.
    pub(crate) fn cover_row(&mut self, entry: usize) {
        let mut headers = SmallVec::<[usize; 4]>::new();
        headers.push(self.nodes[entry].header);
        let mut node = self.nodes[entry].right;
        while node != entry {
            headers.push(self.nodes[node].header);
            node = self.nodes[node].right;
        }
        for header in headers {
            self.cover(header);
        }
    }

    /// Covers the columns of `entry`'s row siblings (every entry in the row
    /// except `entry` itself), in row-ring order.
    pub(crate) fn cover_siblings(&mut self, entry: usize) {
        let mut node = self.nodes[entry].right;
        while node != entry {
            self.cover(self.nodes[node].header);
            node = self.nodes[node].right;
        }
    }

    /// Uncovers what [`Self::cover_siblings`] covered, in reverse order.
    pub(crate) fn uncover_siblings(&mut self, entry: usize) {
        let mut node = self.nodes[entry].left;
        while node != entry {
            self.uncover(self.nodes[node].header);
            node = self.nodes[node].left;
        }
    }

    /// Returns `true` if `entry`'s candidate row is still fully live: all of
    /// its column headers remain in the header ring and all of its entries
    /// remain vertically linked. A prefilled row failing this check was
    /// eliminated by an earlier given, i.e. the clues contradict each other.
    pub(crate) fn row_is_live(&self, entry: usize) -> bool {
        let mut node = entry;
        loop {
            let header = self.nodes[node].header;
            if self.nodes[self.nodes[header].left].right != header {
                return false;
            }
            if self.nodes[self.nodes[node].up].down != node {
                return false;
            }
            node = self.nodes[node].right;
            if node == entry {
                return true;
            }
        }
    }

    /// Selects the next column to satisfy: the active header with the fewest
    /// live entries, ties broken by header-ring order. `None` means every
    /// constraint is satisfied.
    pub(crate) fn select_column(&self) -> Option<usize> {
        let first = self.nodes[ROOT].right;
        if first == ROOT {
            return None;
        }

        let mut best = first;
        let mut header = self.nodes[first].right;
        while header != ROOT {
            if self.nodes[header].size < self.nodes[best].size {
                best = header;
            }
            header = self.nodes[header].right;
        }
        Some(best)
    }

    /// Next entry downward in `node`'s column ring.
    pub(crate) fn down(&self, node: usize) -> usize {
        self.nodes[node].down
    }

    /// The candidate of an entry.
    pub(crate) fn candidate(&self, entry: usize) -> Candidate {
        debug_assert!(entry > COLUMNS, "candidates live on entries only");
        self.nodes[entry].candidate
    }
}
