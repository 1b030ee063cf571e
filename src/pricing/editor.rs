//! Interactive proposal editing state.
//!
//! Holds the raw text of each line exactly as typed and recomputes totals on
//! demand. Nothing here ever fails; see [`calculate_totals`].

use super::calculators::{calculate_totals, TotalsLineInput, TotalsResult};

/// Lines and margin of a proposal form being edited
#[derive(Debug, Clone, Default)]
pub struct ProposalEditor {
    lines: Vec<TotalsLineInput>,
    margin_percent: String,
}

impl ProposalEditor {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append an inactive, empty line and return its index
    pub fn add_line(&mut self) -> usize {
        self.lines.push(TotalsLineInput::default());
        self.lines.len() - 1
    }

    /// Activate or deactivate a line.
    ///
    /// Deactivating clears the line's inputs, so re-activating starts empty.
    pub fn toggle_line(&mut self, index: usize, active: bool) {
        if let Some(line) = self.lines.get_mut(index) {
            line.active = active;
            if !active {
                line.hours.clear();
                line.hourly_rate.clear();
            }
        }
    }

    /// Ignored for inactive lines, whose inputs are disabled
    pub fn set_hours(&mut self, index: usize, raw: &str) {
        if let Some(line) = self.lines.get_mut(index).filter(|l| l.active) {
            line.hours = raw.to_string();
        }
    }

    /// Ignored for inactive lines, whose inputs are disabled
    pub fn set_hourly_rate(&mut self, index: usize, raw: &str) {
        if let Some(line) = self.lines.get_mut(index).filter(|l| l.active) {
            line.hourly_rate = raw.to_string();
        }
    }

    pub fn set_margin_percent(&mut self, raw: &str) {
        self.margin_percent = raw.to_string();
    }

    pub fn lines(&self) -> &[TotalsLineInput] {
        &self.lines
    }

    pub fn totals(&self) -> TotalsResult {
        calculate_totals(&self.lines, &self.margin_percent)
    }
}
