//! Select and Option state
//!
//! Selectedness lives in the `selected` attribute of each `<option>`, so a
//! select's value is always derived from its options rather than cached.

use crate::operations::DomResult;
use crate::{DomTree, NodeId};

impl DomTree {
    /// `<option>` descendants of a select, in document order
    pub fn options(&self, select: NodeId) -> Vec<NodeId> {
        self.find_all_by(select, |e| e.is("option"))
    }

    /// Effective value of an option: its `value` attribute, else its text
    pub fn option_value(&self, option: NodeId) -> String {
        match self.attr(option, "value") {
            Some(value) => value.to_string(),
            None => self.text_content(option),
        }
    }

    /// Value of the first selected option, falling back to the first option
    pub fn selected_value(&self, select: NodeId) -> String {
        let options = self.options(select);
        options
            .iter()
            .copied()
            .find(|&option| self.has_attr(option, "selected"))
            .or_else(|| options.first().copied())
            .map(|option| self.option_value(option))
            .unwrap_or_default()
    }

    /// Select the option whose value equals `requested`, deselecting the rest
    ///
    /// Returns whether an option matched. With no match every option ends up
    /// deselected.
    pub fn select_value(&mut self, select: NodeId, requested: &str) -> DomResult<bool> {
        let mut matched = false;
        for option in self.options(select) {
            if !matched && self.option_value(option) == requested {
                self.set_attr(option, "selected", "selected")?;
                matched = true;
            } else {
                self.remove_attr(option, "selected")?;
            }
        }
        if !matched {
            tracing::trace!("select {:?}: no option for {:?}", select, requested);
        }
        Ok(matched)
    }

    /// Select option 0 and clear selection on its siblings
    pub fn select_first(&mut self, select: NodeId) -> DomResult<()> {
        for (index, option) in self.options(select).into_iter().enumerate() {
            if index == 0 {
                self.set_attr(option, "selected", "selected")?;
            } else {
                self.remove_attr(option, "selected")?;
            }
        }
        Ok(())
    }
}
