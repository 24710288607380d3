//! Frame composition and redraw tracking.
//!
//! # Update Strategy
//!
//! | Element | Update Frequency | Strategy |
//! |---------|------------------|----------|
//! | Background | First frame / page switch / palette change | Full clear |
//! | Header | Every frame | Always redraw (clock, blink) |
//! | Panels | Every frame | Always redraw (card covers old text) |
//! | Caption | Every frame | Always redraw (trend, night marker) |
//! | Chart | When its inputs change | Dirty flag |
//!
//! # Why the Chart Is Tracked
//!
//! The chart is the only element whose drawing cost scales with its data
//! (gradient fill touches every pixel under the curve). It is re-rendered only
//! when [`RenderState::mark_chart_dirty`] was called since the last frame, or
//! when a full clear wiped it.

use embedded_graphics::{pixelcolor::Rgb565, prelude::*};
use tracing::trace;

use crate::{
    chart::{draw_bar_chart, draw_line_chart},
    colors::Palette,
    pages::Page,
    station::StationSnapshot,
    widgets::{
        CHART_AREA,
        draw_chart_caption,
        draw_daily_panel,
        draw_exterior_panel,
        draw_header,
        draw_interior_panel,
        draw_pressure_panel,
        draw_system_panel,
    },
};

/// What a call to [`draw_frame`] actually redrew.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct FrameReport {
    /// The whole display was cleared first.
    pub full_redraw: bool,
    /// The chart canvas was re-rendered.
    pub chart_drawn: bool,
}

/// Tracks what must be redrawn on the next frame.
#[derive(Debug)]
pub struct RenderState {
    /// Whether this is the first frame (need full redraw).
    first_frame: bool,

    /// Chart inputs changed since the chart was last drawn.
    chart_dirty: bool,

    /// Page shown on the previous frame.
    prev_page: Page,

    /// Palette mode of the previous frame.
    prev_night_mode: bool,
}

impl Default for RenderState {
    fn default() -> Self { Self::new() }
}

impl RenderState {
    /// Create a render state for the first frame.
    pub const fn new() -> Self {
        Self {
            first_frame: true,
            chart_dirty: true,
            prev_page: Page::Main,
            prev_night_mode: false,
        }
    }

    /// Request a chart re-render on the next frame.
    #[inline]
    pub const fn mark_chart_dirty(&mut self) { self.chart_dirty = true; }

    #[inline]
    pub const fn is_chart_dirty(&self) -> bool { self.chart_dirty }

    /// Whether the whole display must be cleared for `snapshot`.
    ///
    /// Page and palette switches change every pixel of the background.
    fn check_full_redraw(
        &mut self,
        snapshot: &StationSnapshot,
    ) -> bool {
        let full = self.first_frame || snapshot.page != self.prev_page || snapshot.night_mode != self.prev_night_mode;
        self.first_frame = false;
        self.prev_page = snapshot.page;
        self.prev_night_mode = snapshot.night_mode;
        full
    }
}

/// Compose one frame of the panel from a snapshot.
///
/// # Parameters
/// - `display`: Full-screen target (320×240)
/// - `snapshot`: Station state to show
/// - `render_state`: Redraw tracking, updated in place
pub fn draw_frame<D>(
    display: &mut D,
    snapshot: &StationSnapshot,
    render_state: &mut RenderState,
) -> FrameReport
where
    D: DrawTarget<Color = Rgb565>,
{
    let palette = Palette::for_mode(snapshot.night_mode);

    let full_redraw = render_state.check_full_redraw(snapshot);
    if full_redraw {
        display.clear(palette.background).ok();
        render_state.mark_chart_dirty();
    }

    draw_header(display, snapshot, palette);

    match snapshot.page {
        Page::Main => {
            draw_interior_panel(display, &snapshot.state.interior, palette);
            draw_pressure_panel(display, &snapshot.state.exterior, palette);
            draw_exterior_panel(display, &snapshot.state.exterior, snapshot.alarm_active, palette);
        }
        Page::History => {
            draw_daily_panel(display, &snapshot.daily, snapshot.overall_trend, palette);
            draw_system_panel(display, &snapshot.state.system, palette);
        }
    }

    draw_chart_caption(display, snapshot, palette);

    let chart_drawn = render_state.chart_dirty;
    if chart_drawn {
        let mut canvas = display.cropped(&CHART_AREA);
        match snapshot.page {
            Page::Main => {
                draw_line_chart(&mut canvas, snapshot.state.history.as_slice(), palette, snapshot.night_mode);
            }
            Page::History => draw_bar_chart(&mut canvas, &snapshot.hourly, snapshot.current_hour(), palette),
        }
        render_state.chart_dirty = false;
        trace!(page = snapshot.page.name(), "Chart redrawn");
    }

    FrameReport {
        full_redraw,
        chart_drawn,
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;
    use embedded_graphics_simulator::SimulatorDisplay;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    use super::*;
    use crate::colors::{DAY, NIGHT};
    use crate::config::{Config, SCREEN_HEIGHT, SCREEN_WIDTH};
    use crate::station::Station;

    fn snapshot(hour: u32) -> StationSnapshot {
        let start = NaiveDate::from_ymd_opt(2026, 10, 19)
            .and_then(|d| d.and_hms_opt(hour, 0, 0))
            .unwrap();
        Station::with_rng(&Config::default(), start, StdRng::seed_from_u64(9)).snapshot()
    }

    fn display() -> SimulatorDisplay<Rgb565> { SimulatorDisplay::new(Size::new(SCREEN_WIDTH, SCREEN_HEIGHT)) }

    #[test]
    fn test_first_frame_is_full() {
        let mut display = display();
        let mut state = RenderState::new();
        let report = draw_frame(&mut display, &snapshot(12), &mut state);
        assert!(report.full_redraw, "First frame clears the display");
        assert!(report.chart_drawn, "First frame draws the chart");
        assert!(!state.is_chart_dirty());
    }

    #[test]
    fn test_chart_only_redrawn_when_dirty() {
        let mut display = display();
        let mut state = RenderState::new();
        let snap = snapshot(12);
        draw_frame(&mut display, &snap, &mut state);

        let report = draw_frame(&mut display, &snap, &mut state);
        assert_eq!(report, FrameReport::default(), "Unchanged inputs redraw neither");

        state.mark_chart_dirty();
        let report = draw_frame(&mut display, &snap, &mut state);
        assert!(report.chart_drawn);
        assert!(!report.full_redraw);
    }

    #[test]
    fn test_page_switch_forces_full_redraw() {
        let mut display = display();
        let mut state = RenderState::new();
        let mut snap = snapshot(12);
        draw_frame(&mut display, &snap, &mut state);

        snap.page = Page::History;
        let report = draw_frame(&mut display, &snap, &mut state);
        assert!(report.full_redraw && report.chart_drawn, "Page switch redraws everything");
    }

    #[test]
    fn test_palette_follows_night_mode() {
        let mut display = display();
        let mut state = RenderState::new();

        let day = snapshot(12);
        assert!(!day.night_mode);
        draw_frame(&mut display, &day, &mut state);
        assert_eq!(display.get_pixel(Point::new(SCREEN_WIDTH as i32 - 1, SCREEN_HEIGHT as i32 - 1)), DAY.background);

        let night = snapshot(22);
        assert!(night.night_mode);
        let report = draw_frame(&mut display, &night, &mut state);
        assert!(report.full_redraw, "Palette change clears the display");
        assert_eq!(display.get_pixel(Point::new(SCREEN_WIDTH as i32 - 1, SCREEN_HEIGHT as i32 - 1)), NIGHT.background);
    }

    #[test]
    fn test_chart_lands_in_canvas() {
        let mut display = display();
        let mut state = RenderState::new();
        draw_frame(&mut display, &snapshot(12), &mut state);

        // Top-right canvas corner sits above the curve: card background
        let corner = CHART_AREA.top_left + Point::new(CHART_AREA.size.width as i32 - 1, 0);
        assert_eq!(display.get_pixel(corner), DAY.card);
        // Pixel just right of the canvas stays panel background
        assert_eq!(display.get_pixel(corner + Point::new(1, 0)), DAY.background);
    }
}
