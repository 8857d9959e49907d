//! One side of the double-buffered height grid.

/// An R×R grid of `(current, previous)` pairs, row-major, interleaved.
///
/// The layout matches a two-channel float image: cell `(x, y)` occupies
/// `data[2 * (y * R + x)..][..2]`.
#[derive(Debug, Clone, PartialEq)]
pub struct HeightBuffer {
    resolution: usize,
    data: Vec<f32>,
}

impl HeightBuffer {
    /// A zeroed grid.
    pub fn new(resolution: usize) -> Self {
        Self {
            resolution,
            data: vec![0.0; 2 * resolution * resolution],
        }
    }

    /// Cells per side.
    #[inline]
    pub fn resolution(&self) -> usize {
        self.resolution
    }

    #[inline]
    fn offset(&self, x: usize, y: usize) -> usize {
        2 * (y * self.resolution + x)
    }

    /// Current-channel height of cell `(x, y)`.
    #[inline]
    pub fn current(&self, x: usize, y: usize) -> f32 {
        self.data[self.offset(x, y)]
    }

    /// Previous-channel height of cell `(x, y)`.
    #[inline]
    pub fn previous(&self, x: usize, y: usize) -> f32 {
        self.data[self.offset(x, y) + 1]
    }

    /// Overwrites both channels of one cell.
    pub fn set(&mut self, x: usize, y: usize, current: f32, previous: f32) {
        let o = self.offset(x, y);
        self.data[o] = current;
        self.data[o + 1] = previous;
    }

    /// Flat `[current, previous, current, previous, ...]` view.
    #[inline]
    pub fn as_interleaved(&self) -> &[f32] {
        &self.data
    }

    pub(crate) fn as_interleaved_mut(&mut self) -> &mut [f32] {
        &mut self.data
    }

    /// Zeros both channels everywhere.
    pub fn clear(&mut self) {
        self.data.fill(0.0);
    }

    /// Iterator over the current channel.
    pub fn currents(&self) -> impl Iterator<Item = f32> + '_ {
        self.data.iter().step_by(2).copied()
    }

    /// Iterator over the previous channel.
    pub fn previouses(&self) -> impl Iterator<Item = f32> + '_ {
        self.data.iter().skip(1).step_by(2).copied()
    }
}
