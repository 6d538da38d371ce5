/// Compact or expanded presentation, flipped on every click.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub struct ExpansionToggle {
    expanded: bool,
}

impl ExpansionToggle {
    pub const fn is_expanded(self) -> bool {
        self.expanded
    }

    /// Returns the new value.
    pub const fn toggle(&mut self) -> bool {
        self.expanded = !self.expanded;
        self.expanded
    }
}
