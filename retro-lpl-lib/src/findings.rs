/// Messages accumulated over one run, reported together at the end.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Findings {
    pub warnings: Vec<String>,
    pub errors: Vec<String>,
    /// Notes for each rewrite made in update mode
    pub changes: Vec<String>,
}

impl Findings {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn warn(&mut self, msg: impl Into<String>) {
        let msg = msg.into();
        log::debug!("warning: {}", msg);
        self.warnings.push(msg);
    }

    pub fn error(&mut self, msg: impl Into<String>) {
        let msg = msg.into();
        log::debug!("error: {}", msg);
        self.errors.push(msg);
    }

    pub fn change(&mut self, msg: impl Into<String>) {
        self.changes.push(msg.into());
    }

    pub fn has_errors(&self) -> bool {
        !self.errors.is_empty()
    }

    pub fn is_empty(&self) -> bool {
        self.warnings.is_empty() && self.errors.is_empty() && self.changes.is_empty()
    }

    /// Append another run's findings after this one's.
    pub fn extend(&mut self, other: Findings) {
        self.warnings.extend(other.warnings);
        self.errors.extend(other.errors);
        self.changes.extend(other.changes);
    }
}
