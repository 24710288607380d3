//! Page navigation for the two-page panel.
//!
//! A single discrete "advance" input (Space in the window, a hardware button
//! on a real unit) flips between the two pages.
//!
//! # Pages
//!
//! - [`Page::Main`]: Interior, pressure and exterior panels plus the 24-sample line chart
//! - [`Page::History`]: Daily statistics, system health and the 24-hour bar chart

/// Available pages of the station panel.
#[derive(Clone, Copy, PartialEq, Eq, Default, Debug, clap::ValueEnum)]
pub enum Page {
    /// Live readings and the rolling temperature chart.
    #[default]
    Main,

    /// Daily statistics, system health and the hourly min/max/avg chart.
    History,
}

impl Page {
    /// Advance to the next page (cycles between Main and History).
    #[inline]
    pub const fn advance(self) -> Self {
        match self {
            Self::Main => Self::History,
            Self::History => Self::Main,
        }
    }

    /// Short name used in logs.
    pub const fn name(self) -> &'static str {
        match self {
            Self::Main => "main",
            Self::History => "history",
        }
    }

    /// Name shown in the header bar.
    pub const fn title(self) -> &'static str {
        match self {
            Self::Main => "LIVE",
            Self::History => "HISTORY",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_page_default() {
        assert_eq!(Page::default(), Page::Main);
    }

    #[test]
    fn test_page_advance() {
        assert_eq!(Page::Main.advance(), Page::History);
        assert_eq!(Page::History.advance(), Page::Main);
    }

    #[test]
    fn test_page_advance_cycle() {
        let page = Page::Main;
        let page = page.advance(); // -> History
        let page = page.advance(); // -> Main
        assert_eq!(page, Page::Main);
    }

    #[test]
    fn test_page_names() {
        assert_eq!(Page::Main.name(), "main");
        assert_eq!(Page::History.name(), "history");
        assert_eq!(Page::Main.title(), "LIVE");
        assert_eq!(Page::History.title(), "HISTORY");
    }
}
