//! Reading panels for both pages, plus the caption strip above the chart.
//!
//! # Main Page
//!
//! ```text
//! ┌ INTERIOR ─── ↑┐┌ PRESSURE ─────┐┌ EXTERIOR ─── ↑┐
//! │ 23.2 °C       ││ 1013 hPa      ││ 18.7 °C       │
//! │ HUM 58%       ││ NORMAL        ││ HUM 72%       │
//! │ STABLE        ││ FEELS 16.3°C  ││ MILD          │
//! │ [█████     ]  ││               ││ ● ONLINE      │
//! └───────────────┘└───────────────┘└───────────────┘
//! ```
//!
//! # History Page
//!
//! ```text
//! ┌ TODAY ────────────────┐┌ SYSTEM ───────────────┐
//! │ MAX            23.4°C ││ CPU               23% │
//! │ MIN             6.1°C ││ RAM               67% │
//! │ AVG            15.2°C ││ TEMP           45.2°C │
//! │ VAR            17.3°C ││ WIFI              85% │
//! │ TREND        ↓ FALLING││ UP         2d 14h 32m │
//! └───────────────────────┘└───────────────────────┘
//! ```
//!
//! Every panel draws its own card first, so values never leave traces when
//! they shrink between frames.

use embedded_graphics::{
    mono_font::MonoTextStyle,
    pixelcolor::Rgb565,
    prelude::*,
    primitives::{Circle, PrimitiveStyle, Rectangle},
    text::Text,
};

use super::primitives::{
    draw_card,
    draw_trend_arrow,
    draw_value_with_unit,
    format_labeled,
    format_temp,
    trend_color,
};
use crate::{
    analytics::DailyStats,
    colors::Palette,
    config::{CHART_HEIGHT, CHART_WIDTH, CHART_X, CHART_Y, CONTENT_HEIGHT, CONTENT_Y, SCREEN_WIDTH},
    pages::Page,
    state::{ClimateReading, ExteriorReading, SystemHealth, Trend},
    station::StationSnapshot,
    styles::{LABEL_FONT, LEFT_ALIGNED, RIGHT_ALIGNED, VALUE_FONT, VALUE_FONT_MEDIUM},
    thresholds::{PressureClass, WeatherBand, cpu_temp_level, usage_level, wifi_level},
};

// =============================================================================
// Layout Constants
// =============================================================================

/// Outer margin and gap between panels.
const GAP: i32 = 4;

/// Width of one of the three main-page panels.
const MAIN_PANEL_WIDTH: u32 = 102;

/// Width of one of the two history-page panels.
const HISTORY_PANEL_WIDTH: u32 = 154;

/// Main page: interior, pressure, exterior.
pub const INTERIOR_AREA: Rectangle = main_area(0);
pub const PRESSURE_AREA: Rectangle = main_area(1);
pub const EXTERIOR_AREA: Rectangle = main_area(2);

/// History page: daily statistics, system health.
pub const DAILY_AREA: Rectangle = history_area(0);
pub const SYSTEM_AREA: Rectangle = history_area(1);

/// Strip between the panels and the chart canvas.
pub const CAPTION_AREA: Rectangle = Rectangle::new(
    Point::new(0, CONTENT_Y + CONTENT_HEIGHT as i32),
    Size::new(SCREEN_WIDTH, (CHART_Y - CONTENT_Y - CONTENT_HEIGHT as i32) as u32),
);

/// The chart canvas inside the panel.
pub const CHART_AREA: Rectangle = Rectangle::new(Point::new(CHART_X, CHART_Y), Size::new(CHART_WIDTH, CHART_HEIGHT));

const fn main_area(column: i32) -> Rectangle {
    Rectangle::new(
        Point::new(GAP + column * (MAIN_PANEL_WIDTH as i32 + GAP - 1), CONTENT_Y),
        Size::new(MAIN_PANEL_WIDTH, CONTENT_HEIGHT),
    )
}

const fn history_area(column: i32) -> Rectangle {
    Rectangle::new(
        Point::new(GAP + column * (HISTORY_PANEL_WIDTH as i32 + GAP), CONTENT_Y),
        Size::new(HISTORY_PANEL_WIDTH, CONTENT_HEIGHT),
    )
}

/// Offsets inside a panel, relative to its top-left corner.
const PAD_X: i32 = 6;
const TITLE_Y: i32 = 14;
const VALUE_Y: i32 = 46;
const LINE_1_Y: i32 = 68;
const LINE_2_Y: i32 = 86;
const LINE_3_Y: i32 = 106;

/// First table row and row pitch on the history page.
const ROW_START_Y: i32 = 34;
const ROW_PITCH: i32 = 18;

// =============================================================================
// Helpers
// =============================================================================

fn text<D>(
    display: &mut D,
    content: &str,
    position: Point,
    color: Rgb565,
) where
    D: DrawTarget<Color = Rgb565>,
{
    Text::with_text_style(content, position, MonoTextStyle::new(LABEL_FONT, color), LEFT_ALIGNED)
        .draw(display)
        .ok();
}

fn text_right<D>(
    display: &mut D,
    content: &str,
    position: Point,
    color: Rgb565,
) where
    D: DrawTarget<Color = Rgb565>,
{
    Text::with_text_style(content, position, MonoTextStyle::new(LABEL_FONT, color), RIGHT_ALIGNED)
        .draw(display)
        .ok();
}

/// Card with its title in the top-left corner.
fn draw_panel_frame<D>(
    display: &mut D,
    area: Rectangle,
    title: &str,
    title_color: Rgb565,
    palette: &Palette,
) where
    D: DrawTarget<Color = Rgb565>,
{
    draw_card(display, area, palette);
    text(display, title, area.top_left + Point::new(PAD_X, TITLE_Y), title_color);
}

fn top_right_arrow(area: Rectangle) -> Point {
    area.top_left + Point::new(area.size.width as i32 - 10, TITLE_Y - 4)
}

/// One `LABEL ........ value` row of a table panel.
fn draw_row<D>(
    display: &mut D,
    area: Rectangle,
    row: i32,
    label: &str,
    value: &str,
    value_color: Rgb565,
    palette: &Palette,
) where
    D: DrawTarget<Color = Rgb565>,
{
    let y = area.top_left.y + ROW_START_Y + row * ROW_PITCH;
    text(display, label, Point::new(area.top_left.x + PAD_X, y), palette.text_secondary);
    text_right(
        display,
        value,
        Point::new(area.top_left.x + area.size.width as i32 - PAD_X, y),
        value_color,
    );
}

fn degrees(value: f32) -> heapless::String<24> { format_labeled("", format_temp(value), "°C") }

// =============================================================================
// Main Page Panels
// =============================================================================

/// Interior panel: temperature, humidity, trend and a humidity gauge.
pub fn draw_interior_panel<D>(
    display: &mut D,
    reading: &ClimateReading,
    palette: &Palette,
) where
    D: DrawTarget<Color = Rgb565>,
{
    let area = INTERIOR_AREA;
    let origin = area.top_left;
    draw_panel_frame(display, area, "INTERIOR", palette.text_secondary, palette);
    draw_trend_arrow(display, top_right_arrow(area), reading.trend, trend_color(reading.trend, palette));

    draw_value_with_unit(
        display,
        origin + Point::new(PAD_X, VALUE_Y),
        &format_temp(reading.temperature),
        VALUE_FONT,
        "°C",
        palette.text,
        palette.text_secondary,
    );
    text(
        display,
        &format_labeled("HUM ", reading.humidity, "%"),
        origin + Point::new(PAD_X, LINE_1_Y),
        palette.text,
    );
    text(
        display,
        reading.trend.label(),
        origin + Point::new(PAD_X, LINE_2_Y),
        trend_color(reading.trend, palette),
    );

    // Humidity gauge: 0-100% across the panel width
    let gauge_width = area.size.width - 2 * PAD_X as u32;
    let gauge = Rectangle::new(origin + Point::new(PAD_X, LINE_3_Y - 6), Size::new(gauge_width, 6));
    gauge.into_styled(PrimitiveStyle::with_stroke(palette.border, 1)).draw(display).ok();
    let filled = gauge_width * reading.humidity.clamp(0, 100) as u32 / 100;
    Rectangle::new(gauge.top_left, Size::new(filled, gauge.size.height))
        .into_styled(PrimitiveStyle::with_fill(palette.primary))
        .draw(display)
        .ok();
}

/// Color of the pressure class label.
pub const fn pressure_color(
    class: PressureClass,
    palette: &Palette,
) -> Rgb565 {
    match class {
        PressureClass::High => palette.success,
        PressureClass::Normal => palette.warning,
        PressureClass::Low => palette.danger,
    }
}

/// Pressure panel: pressure, pressure class and feels-like temperature.
///
/// Values come from the exterior module and are dimmed while it is offline.
pub fn draw_pressure_panel<D>(
    display: &mut D,
    exterior: &ExteriorReading,
    palette: &Palette,
) where
    D: DrawTarget<Color = Rgb565>,
{
    let area = PRESSURE_AREA;
    let origin = area.top_left;
    draw_panel_frame(display, area, "PRESSURE", palette.text_secondary, palette);

    let value_color = if exterior.is_online { palette.text } else { palette.text_secondary };
    draw_value_with_unit(
        display,
        origin + Point::new(PAD_X, VALUE_Y),
        &format_labeled("", exterior.pressure, ""),
        VALUE_FONT_MEDIUM,
        "hPa",
        value_color,
        palette.text_secondary,
    );

    let class = PressureClass::classify(exterior.pressure);
    text(display, class.label(), origin + Point::new(PAD_X, LINE_1_Y), pressure_color(class, palette));
    text(
        display,
        &format_labeled("FEELS ", format_temp(exterior.feels_like), "°C"),
        origin + Point::new(PAD_X, LINE_2_Y),
        value_color,
    );
}

/// Color of the weather band label.
pub const fn band_color(
    band: WeatherBand,
    palette: &Palette,
) -> Rgb565 {
    match band {
        WeatherBand::Extreme | WeatherBand::Hot => palette.danger,
        WeatherBand::Warm => palette.warning,
        WeatherBand::Optimal | WeatherBand::Mild => palette.success,
        WeatherBand::Cold | WeatherBand::VeryCold | WeatherBand::Frost | WeatherBand::SevereFrost => palette.primary,
    }
}

/// Exterior temperature color: danger while the swing alarm is raised,
/// dimmed while the module is offline.
pub const fn exterior_temp_color(
    exterior: &ExteriorReading,
    alarm_active: bool,
    palette: &Palette,
) -> Rgb565 {
    if alarm_active {
        palette.danger
    } else if exterior.is_online {
        palette.text
    } else {
        palette.text_secondary
    }
}

/// Exterior panel: temperature, humidity, weather band and link status.
pub fn draw_exterior_panel<D>(
    display: &mut D,
    exterior: &ExteriorReading,
    alarm_active: bool,
    palette: &Palette,
) where
    D: DrawTarget<Color = Rgb565>,
{
    let area = EXTERIOR_AREA;
    let origin = area.top_left;
    let climate = &exterior.climate;
    draw_panel_frame(display, area, "EXTERIOR", palette.text_secondary, palette);
    draw_trend_arrow(display, top_right_arrow(area), climate.trend, trend_color(climate.trend, palette));

    draw_value_with_unit(
        display,
        origin + Point::new(PAD_X, VALUE_Y),
        &format_temp(climate.temperature),
        VALUE_FONT,
        "°C",
        exterior_temp_color(exterior, alarm_active, palette),
        palette.text_secondary,
    );

    text(
        display,
        &format_labeled("HUM ", climate.humidity, "%"),
        origin + Point::new(PAD_X, LINE_1_Y),
        palette.text,
    );

    let band = WeatherBand::classify(climate.temperature);
    text(display, band.label(), origin + Point::new(PAD_X, LINE_2_Y), band_color(band, palette));

    let (status, status_color) = if exterior.is_online {
        ("ONLINE", palette.success)
    } else {
        ("OFFLINE", palette.danger)
    };
    Circle::with_center(origin + Point::new(PAD_X + 3, LINE_3_Y - 3), 6)
        .into_styled(PrimitiveStyle::with_fill(status_color))
        .draw(display)
        .ok();
    text(display, status, origin + Point::new(PAD_X + 10, LINE_3_Y), status_color);
}

// =============================================================================
// History Page Panels
// =============================================================================

/// Daily statistics of the hourly snapshot and the overall history trend.
pub fn draw_daily_panel<D>(
    display: &mut D,
    daily: &DailyStats,
    overall_trend: Trend,
    palette: &Palette,
) where
    D: DrawTarget<Color = Rgb565>,
{
    let area = DAILY_AREA;
    draw_panel_frame(display, area, "TODAY", palette.accent, palette);

    draw_row(display, area, 0, "MAX", &degrees(daily.max), palette.warning, palette);
    draw_row(display, area, 1, "MIN", &degrees(daily.min), palette.primary, palette);
    draw_row(display, area, 2, "AVG", &degrees(daily.avg), palette.text, palette);
    draw_row(display, area, 3, "VAR", &degrees(daily.variation), palette.text, palette);

    let color = trend_color(overall_trend, palette);
    draw_row(display, area, 4, "TREND", overall_trend.label(), color, palette);
    let label_width = (overall_trend.label().len() as u32 * LABEL_FONT.character_size.width) as i32;
    let arrow = Point::new(
        area.top_left.x + area.size.width as i32 - PAD_X - label_width - 8,
        area.top_left.y + ROW_START_Y + 4 * ROW_PITCH - 4,
    );
    draw_trend_arrow(display, arrow, overall_trend, color);
}

/// Board health with each value colored by its threshold level.
pub fn draw_system_panel<D>(
    display: &mut D,
    system: &SystemHealth,
    palette: &Palette,
) where
    D: DrawTarget<Color = Rgb565>,
{
    let area = SYSTEM_AREA;
    draw_panel_frame(display, area, "SYSTEM", palette.accent, palette);

    let rows = [
        (
            "CPU",
            format_labeled("", system.cpu_usage_pct, "%"),
            usage_level(system.cpu_usage_pct),
        ),
        (
            "RAM",
            format_labeled("", system.ram_usage_pct, "%"),
            usage_level(system.ram_usage_pct),
        ),
        ("TEMP", degrees(system.cpu_temp_c), cpu_temp_level(system.cpu_temp_c)),
        (
            "WIFI",
            format_labeled("", system.wifi_signal_pct, "%"),
            wifi_level(system.wifi_signal_pct),
        ),
    ];
    for (row, (label, value, level)) in rows.iter().enumerate() {
        draw_row(display, area, row as i32, label, value, palette.level(*level), palette);
    }
    draw_row(display, area, 4, "UP", &system.uptime_label(), palette.text, palette);
}

// =============================================================================
// Chart Caption
// =============================================================================

/// Caption above the chart: chart title, night marker, and either the
/// overall trend (main page) or the highlighted hour (history page).
pub fn draw_chart_caption<D>(
    display: &mut D,
    snapshot: &StationSnapshot,
    palette: &Palette,
) where
    D: DrawTarget<Color = Rgb565>,
{
    let area = CAPTION_AREA;
    area.into_styled(PrimitiveStyle::with_fill(palette.background)).draw(display).ok();

    let baseline = area.top_left.y + area.size.height as i32 - 3;
    let title = match snapshot.page {
        Page::Main => "EXTERIOR 24H",
        Page::History => "HOURLY MIN/MAX/AVG",
    };
    text(display, title, Point::new(CHART_X, baseline), palette.text_secondary);

    if snapshot.night_mode {
        text_right(display, "NIGHT", Point::new(220, baseline), palette.accent);
    }

    let right = CHART_X + CHART_WIDTH as i32;
    match snapshot.page {
        Page::Main => {
            let trend = snapshot.overall_trend;
            let color = trend_color(trend, palette);
            draw_trend_arrow(display, Point::new(right - 4, baseline - 4), trend, color);
            text_right(display, trend.label(), Point::new(right - 12, baseline), color);
        }
        Page::History => {
            let label = format_labeled("NOW ", snapshot.current_hour(), "h");
            text_right(display, &label, Point::new(right, baseline), palette.warning);
        }
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use embedded_graphics_simulator::SimulatorDisplay;

    use super::*;
    use crate::colors::{DAY, NIGHT};
    use crate::config::{HEADER_HEIGHT, SCREEN_HEIGHT};
    use crate::state::StationState;

    fn display() -> SimulatorDisplay<Rgb565> { SimulatorDisplay::new(Size::new(SCREEN_WIDTH, SCREEN_HEIGHT)) }

    fn count_in(
        display: &SimulatorDisplay<Rgb565>,
        area: Rectangle,
        color: Rgb565,
    ) -> usize {
        area.points().filter(|p| display.get_pixel(*p) == color).count()
    }

    // -------------------------------------------------------------------------
    // Layout Tests
    // -------------------------------------------------------------------------

    #[test]
    fn test_panels_fit_between_header_and_caption() {
        for area in [INTERIOR_AREA, PRESSURE_AREA, EXTERIOR_AREA, DAILY_AREA, SYSTEM_AREA] {
            let bottom_right = area.bottom_right().unwrap();
            assert!(area.top_left.y >= HEADER_HEIGHT as i32, "Below the header");
            assert!(bottom_right.x < SCREEN_WIDTH as i32, "Inside the screen: {area:?}");
            assert!(bottom_right.y < CAPTION_AREA.top_left.y, "Above the caption");
        }
    }

    #[test]
    fn test_main_panels_do_not_overlap() {
        assert!(INTERIOR_AREA.intersection(&PRESSURE_AREA).is_zero_sized());
        assert!(PRESSURE_AREA.intersection(&EXTERIOR_AREA).is_zero_sized());
        assert!(DAILY_AREA.intersection(&SYSTEM_AREA).is_zero_sized());
    }

    #[test]
    fn test_caption_ends_at_chart() {
        assert_eq!(CAPTION_AREA.top_left.y + CAPTION_AREA.size.height as i32, CHART_AREA.top_left.y);
        assert_eq!(CHART_AREA.size, Size::new(308, 65));
    }

    // -------------------------------------------------------------------------
    // Color Rule Tests
    // -------------------------------------------------------------------------

    #[test]
    fn test_exterior_temp_color_rules() {
        let mut exterior = StationState::default().exterior;
        assert_eq!(exterior_temp_color(&exterior, false, &NIGHT), NIGHT.text);
        assert_eq!(exterior_temp_color(&exterior, true, &NIGHT), NIGHT.danger, "Alarm wins");
        exterior.is_online = false;
        assert_eq!(exterior_temp_color(&exterior, false, &NIGHT), NIGHT.text_secondary, "Offline is dimmed");
    }

    #[test]
    fn test_band_and_pressure_colors() {
        assert_eq!(band_color(WeatherBand::Extreme, &DAY), DAY.danger);
        assert_eq!(band_color(WeatherBand::Optimal, &DAY), DAY.success);
        assert_eq!(band_color(WeatherBand::Frost, &DAY), DAY.primary);
        assert_eq!(pressure_color(PressureClass::High, &DAY), DAY.success);
        assert_eq!(pressure_color(PressureClass::Normal, &DAY), DAY.warning);
        assert_eq!(pressure_color(PressureClass::Low, &DAY), DAY.danger);
    }

    // -------------------------------------------------------------------------
    // Drawing Tests
    // -------------------------------------------------------------------------

    #[test]
    fn test_exterior_status_color() {
        let mut exterior = StationState::default().exterior;
        let mut display = display();

        draw_exterior_panel(&mut display, &exterior, false, &NIGHT);
        assert!(count_in(&display, EXTERIOR_AREA, NIGHT.success) > 20, "ONLINE in success color");
        assert_eq!(count_in(&display, EXTERIOR_AREA, NIGHT.danger), 0);

        exterior.is_online = false;
        draw_exterior_panel(&mut display, &exterior, false, &NIGHT);
        assert!(count_in(&display, EXTERIOR_AREA, NIGHT.danger) > 20, "OFFLINE in danger color");
    }

    #[test]
    fn test_panels_stay_inside_their_cards() {
        let state = StationState::default();
        let mut display = display();
        draw_interior_panel(&mut display, &state.interior, &DAY);
        draw_pressure_panel(&mut display, &state.exterior, &DAY);
        draw_exterior_panel(&mut display, &state.exterior, true, &DAY);

        let header = Rectangle::new(Point::zero(), Size::new(SCREEN_WIDTH, HEADER_HEIGHT));
        let untouched = display.get_pixel(Point::new(0, 0));
        assert!(header.points().all(|p| display.get_pixel(p) == untouched), "Header band untouched");
        assert!(CHART_AREA.points().all(|p| display.get_pixel(p) == untouched), "Chart canvas untouched");
    }

    #[test]
    fn test_system_panel_levels() {
        let mut system = StationState::default().system;
        system.cpu_usage_pct = 90;
        let mut display = display();
        draw_system_panel(&mut display, &system, &NIGHT);
        assert!(count_in(&display, SYSTEM_AREA, NIGHT.danger) > 5, "CPU 90% drawn in danger");
    }

    #[test]
    fn test_caption_clears_its_strip() {
        let snapshot = {
            let config = crate::config::Config::default();
            let start = chrono::NaiveDate::from_ymd_opt(2026, 10, 19)
                .and_then(|d| d.and_hms_opt(12, 0, 0))
                .unwrap();
            crate::station::Station::with_rng(&config, start, rand::SeedableRng::seed_from_u64(3)).snapshot()
        };
        let mut display = display();
        display.clear(Rgb565::new(31, 0, 0)).ok();
        draw_chart_caption(&mut display, &snapshot, &DAY);

        assert_eq!(display.get_pixel(CAPTION_AREA.top_left), DAY.background);
        assert_eq!(count_in(&display, CAPTION_AREA, Rgb565::new(31, 0, 0)), 0);
    }
}
