//! Data-to-pixel mapping shared by both charts.
//!
//! The mapping is kept in plain `f32` arithmetic and separated from drawing
//! so it can be checked exactly. Drawing code rounds to whole pixels at the
//! last moment with [`px`].
//!
//! # Line Chart
//!
//! ```text
//! x(i) = LEFT_MARGIN + i / (n - 1) * width         width = canvas_w - 40
//! y(v) = h - (v - min) / range * (h - 10) - 5      range = max(max - min, 1)
//! ```
//!
//! # Bar Chart
//!
//! ```text
//! bar_w     = canvas_w / 24
//! plot_h    = canvas_h - 20
//! height(v) = (v - min) / range * plot_h           measured up from plot_h
//! ```

use embedded_graphics::geometry::Size;

use crate::history::{HOURS_PER_DAY, HourlyStat};

// =============================================================================
// Constants
// =============================================================================

/// Left margin of the line plot, leaving room for the min/max labels.
pub const LEFT_MARGIN: f32 = 35.0;

/// Horizontal space not used by the line plot (left margin plus right gutter).
pub const HORIZONTAL_RESERVE: f32 = 40.0;

/// Vertical space not used by the line plot's value range.
pub const VERTICAL_MARGIN: f32 = 10.0;

/// Gap between the lowest value and the bottom edge.
pub const BOTTOM_PADDING: f32 = 5.0;

/// Space below the bars for hour labels.
pub const BAR_LABEL_SPACE: f32 = 20.0;

/// Smallest value range used for scaling. Keeps flat series finite.
pub const MIN_RANGE: f32 = 1.0;

/// Round a coordinate to the nearest pixel.
#[inline]
pub fn px(value: f32) -> i32 { value.round() as i32 }

// =============================================================================
// Value Scale
// =============================================================================

/// Linear value domain: `[min, min + range]`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ValueScale {
    pub min: f32,
    pub max: f32,
    /// `max(max - min, 1.0)`, never zero.
    pub range: f32,
}

impl ValueScale {
    /// Scale over all values, or `None` for an empty input.
    pub fn from_values<I: IntoIterator<Item = f32>>(values: I) -> Option<Self> {
        let mut iter = values.into_iter();
        let first = iter.next()?;
        let (min, max) = iter.fold((first, first), |(lo, hi), v| (lo.min(v), hi.max(v)));
        Some(Self {
            min,
            max,
            range: (max - min).max(MIN_RANGE),
        })
    }

    /// Scale over every `min` and `max` of the hourly records.
    pub fn from_hourly(stats: &[HourlyStat]) -> Option<Self> {
        Self::from_values(stats.iter().flat_map(|s| [s.min, s.max]))
    }

    /// Position of `value` in the domain, 0.0 at `min`.
    #[inline]
    pub fn fraction(
        &self,
        value: f32,
    ) -> f32 {
        (value - self.min) / self.range
    }
}

// =============================================================================
// Line Chart Geometry
// =============================================================================

/// Pixel mapping of the line chart for one canvas size.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct LineGeometry {
    /// x of the first sample.
    pub left: f32,
    /// Horizontal distance from the first to the last sample.
    pub width: f32,
    /// Canvas height.
    pub height: f32,
}

impl LineGeometry {
    pub fn for_canvas(size: Size) -> Self {
        Self {
            left: LEFT_MARGIN,
            width: (size.width as f32 - HORIZONTAL_RESERVE).max(0.0),
            height: size.height as f32,
        }
    }

    /// x of sample `index` out of `count`. A single sample sits at the left margin.
    #[inline]
    pub fn x(
        &self,
        index: usize,
        count: usize,
    ) -> f32 {
        if count <= 1 {
            return self.left;
        }
        self.left + index as f32 / (count - 1) as f32 * self.width
    }

    /// y of `value`; larger values map to smaller y.
    #[inline]
    pub fn y(
        &self,
        value: f32,
        scale: &ValueScale,
    ) -> f32 {
        self.height - scale.fraction(value) * (self.height - VERTICAL_MARGIN) - BOTTOM_PADDING
    }

    /// y of the polyline at column `x`, interpolated between neighbouring samples.
    ///
    /// Returns `None` left of the first or right of the last sample.
    pub fn y_at(
        &self,
        x: f32,
        values: &[f32],
        scale: &ValueScale,
    ) -> Option<f32> {
        let count = values.len();
        let last = self.x(count.checked_sub(1)?, count);
        if x < self.left || x > last {
            return None;
        }
        if count == 1 || self.width <= 0.0 {
            return Some(self.y(values[0], scale));
        }

        let step = self.width / (count - 1) as f32;
        let position = (x - self.left) / step;
        let index = (position.floor() as usize).min(count - 2);
        let t = position - index as f32;
        let y0 = self.y(values[index], scale);
        let y1 = self.y(values[index + 1], scale);
        Some((y1 - y0).mul_add(t, y0))
    }
}

// =============================================================================
// Bar Chart Geometry
// =============================================================================

/// Pixel mapping of the bar chart for one canvas size.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct BarGeometry {
    pub bar_width: f32,
    /// Height of the bar area; hour labels sit below it.
    pub plot_height: f32,
}

/// Vertical extent of one bar in canvas pixels.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct BarSpan {
    /// y of the top edge.
    pub top: f32,
    /// Height in pixels (never negative).
    pub height: f32,
    /// y of the average marker center.
    pub avg_y: f32,
}

impl BarGeometry {
    pub fn for_canvas(size: Size) -> Self {
        Self {
            bar_width: size.width as f32 / HOURS_PER_DAY as f32,
            plot_height: (size.height as f32 - BAR_LABEL_SPACE).max(0.0),
        }
    }

    /// Left edge of bar `index`.
    #[inline]
    pub fn x(
        &self,
        index: usize,
    ) -> f32 {
        index as f32 * self.bar_width
    }

    /// y of `value`, measured from the top of the canvas.
    #[inline]
    pub fn y(
        &self,
        value: f32,
        scale: &ValueScale,
    ) -> f32 {
        self.plot_height - scale.fraction(value) * self.plot_height
    }

    /// Extent of the min-max bar of one record.
    ///
    /// A record with `max < min` still yields a positive height spanning
    /// both values.
    pub fn span(
        &self,
        stat: &HourlyStat,
        scale: &ValueScale,
    ) -> BarSpan {
        let y_max = self.y(stat.max, scale);
        let y_min = self.y(stat.min, scale);
        BarSpan {
            top: y_max.min(y_min),
            height: (y_min - y_max).abs(),
            avg_y: self.y(stat.avg, scale),
        }
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
