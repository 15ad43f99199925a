//! Single-open accordion.

pub const ITEM_SELECTOR: &str = ".accordion-item";
pub const HEADER_SELECTOR: &str = ".accordion-header";
pub const TOGGLE_SELECTOR: &str = ".accordion-toggle";
pub const ACTIVE_CLASS: &str = "active";

pub const OPEN_GLYPH: &str = "\u{2212}";
pub const CLOSED_GLYPH: &str = "+";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ItemState {
    pub index: usize,
    pub open: bool,
}

impl ItemState {
    pub fn glyph(self) -> &'static str {
        if self.open {
            OPEN_GLYPH
        } else {
            CLOSED_GLYPH
        }
    }
}

#[derive(Debug)]
pub struct Accordion {
    len: usize,
    open: Option<usize>,
}

impl Accordion {
    pub fn new(len: usize) -> Self {
        Self { len, open: None }
    }

    /// Starts from the item the markup already shows open, if any.
    pub fn with_open(len: usize, open: Option<usize>) -> Self {
        Self {
            len,
            open: open.filter(|&index| index < len),
        }
    }

    pub fn open_item(&self) -> Option<usize> {
        self.open
    }

    /// Clicking an item closes every other one and flips the clicked one.
    ///
    /// Returns the state of every item, in order.
    pub fn on_header_click(&mut self, index: usize) -> Vec<ItemState> {
        if index < self.len {
            self.open = if self.open == Some(index) {
                None
            } else {
                Some(index)
            };
        }
        (0..self.len)
            .map(|i| ItemState {
                index: i,
                open: self.open == Some(i),
            })
            .collect()
    }
}
