//! Header appearance, the mobile menu and in-page anchor jumps.

use crate::config::NavConfig;
use crate::scroll::{ScrollOptions, SmoothScroll};

pub const HEADER_ID: &str = "header";
pub const MOBILE_TOGGLE_ID: &str = "mobile-toggle";
pub const NAV_MENU_SELECTOR: &str = ".nav-menu";
pub const MOBILE_MENU_CLASS: &str = "mobile-nav-menu";
pub const MOBILE_TOGGLE_ACTIVE_CLASS: &str = "active";
pub const ANCHOR_SELECTOR: &str = "a[href^=\"#\"]";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HeaderAppearance {
    /// Near the top of the page: theme background, no blur.
    Resting,
    /// Scrolled down: translucent dark background with backdrop blur.
    Condensed,
}

impl HeaderAppearance {
    pub fn for_scroll(scroll_y: f64, config: &NavConfig) -> Self {
        if scroll_y > config.condense_after_px {
            HeaderAppearance::Condensed
        } else {
            HeaderAppearance::Resting
        }
    }

    pub fn background(self) -> &'static str {
        match self {
            HeaderAppearance::Resting => "var(--color-bg)",
            HeaderAppearance::Condensed => "rgba(10, 10, 10, 0.95)",
        }
    }

    pub fn backdrop_filter(self) -> &'static str {
        match self {
            HeaderAppearance::Resting => "none",
            HeaderAppearance::Condensed => "blur(10px)",
        }
    }
}

/// Remembers the header's current look so scroll events only restyle it on
/// an actual change.
#[derive(Debug)]
pub struct HeaderTracker {
    config: NavConfig,
    current: Option<HeaderAppearance>,
}

impl HeaderTracker {
    pub fn new(config: &NavConfig) -> Self {
        Self {
            config: config.clone(),
            current: None,
        }
    }

    pub fn on_scroll(&mut self, scroll_y: f64) -> Option<HeaderAppearance> {
        let next = HeaderAppearance::for_scroll(scroll_y, &self.config);
        if self.current == Some(next) {
            return None;
        }
        self.current = Some(next);
        Some(next)
    }
}

/// What the DOM needs after a mobile menu action.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MenuUpdate {
    /// The menu element does not exist yet and must be built first.
    pub build: bool,
    pub open: bool,
}

impl MenuUpdate {
    pub fn display(self) -> &'static str {
        if self.open {
            "flex"
        } else {
            "none"
        }
    }
}

/// The mobile menu is built from the desktop menu on first use.
#[derive(Debug, Default)]
pub struct MobileMenu {
    built: bool,
    open: bool,
}

impl MobileMenu {
    pub fn toggle(&mut self) -> MenuUpdate {
        let build = !self.built;
        self.built = true;
        self.open = !self.open;
        MenuUpdate {
            build,
            open: self.open,
        }
    }

    /// Returns `None` while the menu has never been built.
    pub fn close(&mut self) -> Option<MenuUpdate> {
        if !self.built {
            return None;
        }
        self.open = false;
        Some(MenuUpdate {
            build: false,
            open: false,
        })
    }
}

/// Selector for an in-page link target; bare `#` and external links yield `None`.
pub fn anchor_selector(href: &str) -> Option<&str> {
    if href.len() > 1 && href.starts_with('#') {
        Some(href)
    } else {
        None
    }
}

/// Scrolls so the target sits just below the fixed header.
pub fn jump_to_anchor<S: SmoothScroll + ?Sized>(
    scroller: &S,
    target_top: f64,
    header_height: f64,
    config: &NavConfig,
) {
    scroller.scroll_to(
        target_top,
        ScrollOptions {
            offset: -header_height,
            duration: config.anchor_scroll_duration(),
        },
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scroll::MockSmoothScroll;
    use mockall::predicate::eq;
    use std::time::Duration;

    #[test]
    fn header_condenses_past_threshold() {
        let config = NavConfig::default();
        assert_eq!(HeaderAppearance::for_scroll(100.0, &config), HeaderAppearance::Resting);
        assert_eq!(HeaderAppearance::for_scroll(100.5, &config), HeaderAppearance::Condensed);
        assert_eq!(HeaderAppearance::Condensed.backdrop_filter(), "blur(10px)");
    }

    #[test]
    fn tracker_reports_only_changes() {
        let mut tracker = HeaderTracker::new(&NavConfig::default());
        assert_eq!(tracker.on_scroll(0.0), Some(HeaderAppearance::Resting));
        assert_eq!(tracker.on_scroll(40.0), None);
        assert_eq!(tracker.on_scroll(400.0), Some(HeaderAppearance::Condensed));
        assert_eq!(tracker.on_scroll(800.0), None);
        assert_eq!(tracker.on_scroll(10.0), Some(HeaderAppearance::Resting));
    }

    fn update(build: bool, open: bool) -> MenuUpdate {
        MenuUpdate { build, open }
    }

    #[test]
    fn mobile_menu_builds_once_and_flips() {
        let mut menu = MobileMenu::default();
        assert_eq!(menu.close(), None);

        let first = menu.toggle();
        assert_eq!(first, update(true, true));
        assert_eq!(first.display(), "flex");

        let second = menu.toggle();
        assert_eq!(second, update(false, false));
        assert_eq!(second.display(), "none");

        menu.toggle();
        assert_eq!(menu.close(), Some(update(false, false)));
        assert_eq!(menu.toggle(), update(false, true));
    }

    #[test]
    fn anchor_selector_skips_bare_hash() {
        assert_eq!(anchor_selector("#"), None);
        assert_eq!(anchor_selector("/pricing"), None);
        assert_eq!(anchor_selector("#pricing"), Some("#pricing"));
    }

    #[test]
    fn anchor_jump_offsets_by_header() {
        let mut scroller = MockSmoothScroll::new();
        scroller
            .expect_scroll_to()
            .with(
                eq(1200.0),
                eq(ScrollOptions {
                    offset: -70.0,
                    duration: Duration::from_millis(1500),
                }),
            )
            .times(1)
            .return_const(());

        jump_to_anchor(&scroller, 1200.0, 70.0, &NavConfig::default());
    }
}
