//! Keyboard and click handling for the header's dropdown menus.

pub const DROPDOWN_SELECTOR: &str = ".nav-dropdown";
pub const TRIGGER_SELECTOR: &str = ".dropdown-trigger";
pub const MENU_SELECTOR: &str = ".dropdown-menu";
pub const LINK_SELECTOR: &str = ".dropdown-link";
pub const ACTIVE_CLASS: &str = "active";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DropdownKey {
    /// Enter or Space.
    Activate,
    /// Escape.
    Dismiss,
}

impl DropdownKey {
    /// Maps a `KeyboardEvent.key` value.
    pub fn from_key(key: &str) -> Option<Self> {
        match key {
            "Enter" | " " => Some(DropdownKey::Activate),
            "Escape" => Some(DropdownKey::Dismiss),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KeyOutcome {
    pub prevent_default: bool,
    pub active: bool,
}

/// Open state of one dropdown. Every handler returns the state to apply.
#[derive(Debug, Default)]
pub struct Dropdown {
    active: bool,
}

impl Dropdown {
    /// Returns `None` for keys the trigger does not handle.
    pub fn on_key(&mut self, key: &str) -> Option<KeyOutcome> {
        match DropdownKey::from_key(key)? {
            DropdownKey::Activate => {
                self.active = !self.active;
                Some(KeyOutcome {
                    prevent_default: true,
                    active: self.active,
                })
            }
            DropdownKey::Dismiss => {
                self.active = false;
                Some(KeyOutcome {
                    prevent_default: false,
                    active: false,
                })
            }
        }
    }

    /// Clicks anywhere outside the dropdown close it.
    pub fn on_document_click(&mut self, inside: bool) -> bool {
        if !inside {
            self.active = false;
        }
        self.active
    }

    pub fn on_link_click(&mut self) -> bool {
        self.active = false;
        self.active
    }
}
