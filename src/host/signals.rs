//! Read-only broadcast inputs (tab visibility, reduced motion, intersection).
//!
//! A [`SignalSource`] is owned by whoever observes the platform; every hero gets
//! a [`Signal`] reader. Readers poll: [`Signal::take_change`] reports a value once
//! per change of the source's version counter.

use std::cell::Cell;
use std::fmt;
use std::rc::Rc;

#[derive(Debug)]
struct Slot<T: Copy> {
    value: Cell<T>,
    version: Cell<u64>,
}

/// Writable end of a broadcast value.
#[derive(Debug)]
pub struct SignalSource<T: Copy> {
    slot: Rc<Slot<T>>,
}

impl<T: Copy + PartialEq> SignalSource<T> {
    /// Create a source holding `initial`.
    pub fn new(initial: T) -> Self {
        Self {
            slot: Rc::new(Slot {
                value: Cell::new(initial),
                version: Cell::new(0),
            }),
        }
    }

    /// Publish a value; setting the current value again is not a change.
    pub fn set(&self, value: T) {
        if self.slot.value.get() == value {
            return;
        }
        self.slot.value.set(value);
        self.slot.version.set(self.slot.version.get().wrapping_add(1));
    }

    /// Current value.
    pub fn get(&self) -> T {
        self.slot.value.get()
    }

    /// A new reader that has already seen the current value.
    pub fn subscribe(&self) -> Signal<T> {
        Signal {
            slot: Rc::clone(&self.slot),
            seen: Cell::new(self.slot.version.get()),
        }
    }
}

/// Read-only end of a broadcast value.
pub struct Signal<T: Copy> {
    slot: Rc<Slot<T>>,
    seen: Cell<u64>,
}

impl<T: Copy> Signal<T> {
    /// Current value.
    pub fn get(&self) -> T {
        self.slot.value.get()
    }

    /// The current value if it changed since the last call, else `None`.
    pub fn take_change(&self) -> Option<T> {
        let v = self.slot.version.get();
        if v == self.seen.get() {
            return None;
        }
        self.seen.set(v);
        Some(self.slot.value.get())
    }
}

impl<T: Copy + fmt::Debug> fmt::Debug for Signal<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Signal")
            .field("value", &self.get())
            .field("seen", &self.seen.get())
            .finish()
    }
}

/// Page-wide signals shared by every hero on a page.
#[derive(Debug)]
pub struct PageSignals {
    /// `true` while the document is visible.
    pub tab_visible: SignalSource<bool>,
    /// `true` while the user prefers reduced motion.
    pub reduced_motion: SignalSource<bool>,
}

impl PageSignals {
    /// Visible tab, full motion.
    pub fn new() -> Self {
        Self {
            tab_visible: SignalSource::new(true),
            reduced_motion: SignalSource::new(false),
        }
    }
}

impl Default for PageSignals {
    fn default() -> Self {
        Self::new()
    }
}

/// Readers one hero consumes.
#[derive(Debug)]
pub struct HeroSignals {
    /// Host intersects the viewport.
    pub intersecting: Signal<bool>,
    /// Document is visible.
    pub tab_visible: Signal<bool>,
    /// Reduced motion preference.
    pub reduced_motion: Signal<bool>,
}

impl HeroSignals {
    /// Subscribe to the page signals plus this host's own intersection source.
    pub fn new(page: &PageSignals, intersecting: &SignalSource<bool>) -> Self {
        Self {
            intersecting: intersecting.subscribe(),
            tab_visible: page.tab_visible.subscribe(),
            reduced_motion: page.reduced_motion.subscribe(),
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/host/signals.rs"]
mod tests;
