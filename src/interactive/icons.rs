//! Icon materialization.

/// External icon library that turns placeholder elements into icons.
pub trait IconRenderer {
    fn create_icons(&mut self);
}

/// For hosts without an icon library.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoIcons;

impl IconRenderer for NoIcons {
    fn create_icons(&mut self) {}
}

/// Counts how often icons were requested.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CountingIcons {
    pub calls: usize,
}

impl IconRenderer for CountingIcons {
    fn create_icons(&mut self) {
        self.calls += 1;
    }
}
