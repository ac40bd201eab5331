//! Form submission encoding
//!
//! Collects the successful controls of a form and encodes them the way a
//! browser encodes an `application/x-www-form-urlencoded` submission.

use crate::url::Query;
use crate::{DomTree, NodeId};

impl DomTree {
    /// Name/value pairs of the successful controls under `form`
    pub fn form_entries(&self, form: NodeId) -> Query {
        let mut entries = Query::new();
        for control in self.descendants(form) {
            if let Some(value) = self.successful_value(control) {
                let name = self.attr(control, "name").unwrap_or_default();
                entries.append(name, &value);
            }
        }
        entries
    }

    /// The form's encoded body, e.g. `a=1&b%5B0%5D%5Bx%5D=foo`
    pub fn encode_form(&self, form: NodeId) -> String {
        let body = self.form_entries(form).to_string();
        tracing::trace!("encoded form {:?}: {}", form, body);
        body
    }

    /// Submission value of a control, or `None` if it does not take part
    fn successful_value(&self, control: NodeId) -> Option<String> {
        let element = self.element(control)?;
        if element.has_attr("disabled") {
            return None;
        }
        if element.get_attr("name").is_none_or(str::is_empty) {
            return None;
        }

        match element.name.as_str() {
            "select" => Some(self.selected_value(control)),
            "textarea" => Some(self.text_content(control)),
            "input" => match element.input_type().as_str() {
                "button" | "submit" | "reset" | "file" | "image" => None,
                "checkbox" | "radio" => element.checked.then(|| {
                    if element.value.is_empty() {
                        "on".to_string()
                    } else {
                        element.value.clone()
                    }
                }),
                _ => Some(element.value.clone()),
            },
            _ => None,
        }
    }
}
