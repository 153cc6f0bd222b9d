//! Index arithmetic for the two carousels.
//!
//! Both cursors assume a non-empty item list; the controllers refuse to bind
//! when there is nothing to show.

/// Index that stops at either end.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ClampedCursor {
    index: usize,
    len: usize,
}

impl ClampedCursor {
    pub fn new(len: usize) -> Self {
        Self { index: 0, len: len.max(1) }
    }

    pub fn index(&self) -> usize {
        self.index
    }

    pub fn at_start(&self) -> bool {
        self.index == 0
    }

    pub fn at_end(&self) -> bool {
        self.index == self.len - 1
    }

    pub fn prev(&mut self) {
        self.index = self.index.saturating_sub(1);
    }

    pub fn next(&mut self) {
        self.index = (self.index + 1).min(self.len - 1);
    }
}

/// Index that wraps around in both directions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WrappingCursor {
    index: usize,
    len: usize,
}

impl WrappingCursor {
    pub fn new(len: usize) -> Self {
        Self { index: 0, len: len.max(1) }
    }

    pub fn index(&self) -> usize {
        self.index
    }

    pub fn following(&self) -> usize {
        (self.index + 1) % self.len
    }

    pub fn preceding(&self) -> usize {
        (self.index + self.len - 1) % self.len
    }

    /// Out-of-range targets are ignored.
    pub fn go_to(&mut self, index: usize) -> bool {
        if index >= self.len {
            return false;
        }
        self.index = index;
        true
    }
}
