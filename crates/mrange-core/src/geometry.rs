#![forbid(unsafe_code)]

//! Track geometry.

/// Horizontal extent of the slider track in client coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct TrackBounds {
    /// Left edge (inclusive).
    pub left: f64,
    /// Width of the track.
    pub width: f64,
}

impl TrackBounds {
    /// Create new track bounds.
    #[inline]
    #[must_use]
    pub const fn new(left: f64, width: f64) -> Self {
        Self { left, width }
    }

    /// Right edge.
    #[inline]
    #[must_use]
    pub fn right(&self) -> f64 {
        self.left + self.width
    }

    /// Check if the track has no usable width.
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        !(self.width > 0.0)
    }

    /// Fraction of the track at `client_x`, clamped to `[0, 1]`.
    ///
    /// The pointer offset is clamped to the track width first, so a drag
    /// that leaves the widget pins the thumb to the nearest end. An empty
    /// track yields `0`.
    #[must_use]
    pub fn fraction_at(&self, client_x: f64) -> f64 {
        if self.is_empty() || client_x.is_nan() {
            return 0.0;
        }
        let x = (client_x - self.left).max(0.0).min(self.width);
        x / self.width
    }
}
