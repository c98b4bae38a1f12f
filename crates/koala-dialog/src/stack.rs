//! Stacking order for simultaneously open dialogs.
//!
//! [CSS 2.1 § 9.9.1](https://www.w3.org/TR/CSS2/visuren.html#z-index)
//!
//! Every dialog sits in the root stacking context, so a single increasing
//! counter is enough to put the most recently opened dialog in front.

use std::cell::Cell;
use std::rc::Rc;

/// First value handed out is one above this, clearing typical page content.
pub const BASE_Z_INDEX: u32 = 3000;

thread_local! {
    static SHARED: Rc<StackManager> = Rc::new(StackManager::new());
}

/// Hands out strictly increasing `z-index` values.
///
/// UI work happens on one thread, so the counter lives in a [`Cell`]; share
/// the manager between dialogs with an [`Rc`].
#[derive(Debug)]
pub struct StackManager {
    current: Cell<u32>,
}

impl StackManager {
    /// A manager starting at [`BASE_Z_INDEX`].
    #[must_use]
    pub const fn new() -> Self {
        Self::with_base(BASE_Z_INDEX)
    }

    /// A manager whose first allocation is `base + 1`.
    #[must_use]
    pub const fn with_base(base: u32) -> Self {
        Self {
            current: Cell::new(base),
        }
    }

    /// The manager used by dialogs on this thread unless one is injected.
    /// Created on first use and never reset.
    #[must_use]
    pub fn shared() -> Rc<Self> {
        SHARED.with(Rc::clone)
    }

    /// The most recently allocated value (or the base, before any allocation).
    #[must_use]
    pub fn current(&self) -> u32 {
        self.current.get()
    }

    /// Allocate the next value. Every call returns more than the last.
    #[must_use]
    pub fn allocate(&self) -> u32 {
        let next = self.current.get() + 1;
        self.current.set(next);
        next
    }
}

impl Default for StackManager {
    fn default() -> Self {
        Self::new()
    }
}
