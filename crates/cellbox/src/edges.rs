//! Per-edge values (top, right, bottom, left).

use crate::line_style::LineStyle;

/// A value for each of the four edges of a box.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Edges<T> {
    pub top: T,
    pub right: T,
    pub bottom: T,
    pub left: T,
}

impl<T: Copy> Edges<T> {
    pub const fn new(top: T, right: T, bottom: T, left: T) -> Self {
        Self {
            top,
            right,
            bottom,
            left,
        }
    }

    /// The same value on every edge.
    pub const fn all(value: T) -> Self {
        Self::new(value, value, value, value)
    }

    pub fn map<U: Copy>(self, mut f: impl FnMut(T) -> U) -> Edges<U> {
        Edges::new(f(self.top), f(self.right), f(self.bottom), f(self.left))
    }

    /// Combines each edge with the matching edge of `other`.
    pub fn zip_with<U: Copy, V: Copy>(self, other: Edges<U>, mut f: impl FnMut(T, U) -> V) -> Edges<V> {
        Edges::new(
            f(self.top, other.top),
            f(self.right, other.right),
            f(self.bottom, other.bottom),
            f(self.left, other.left),
        )
    }
}

impl Edges<usize> {
    /// Left plus right.
    pub fn horizontal(&self) -> usize {
        self.left + self.right
    }

    /// Top plus bottom.
    pub fn vertical(&self) -> usize {
        self.top + self.bottom
    }

    /// Whether any edge is non-zero.
    pub fn any(&self) -> bool {
        self.horizontal() + self.vertical() > 0
    }
}

impl Edges<bool> {
    pub fn any(&self) -> bool {
        self.top || self.right || self.bottom || self.left
    }
}

/// The line drawn along each edge of a box.
pub type EdgeLines = Edges<LineStyle>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_all_and_map() {
        let edges = Edges::all(2usize).map(|v| v * 3);
        assert_eq!(edges, Edges::new(6, 6, 6, 6));
        assert_eq!(edges.horizontal(), 12);
    }

    #[test]
    fn test_zip_with_takes_max() {
        let a = Edges::new(1usize, 0, 3, 0);
        let b = Edges::new(0usize, 2, 1, 0);
        assert_eq!(a.zip_with(b, usize::max), Edges::new(1, 2, 3, 0));
    }
}
