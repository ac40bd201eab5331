//! Widget adapter
//!
//! How a value is read from and written to one element depends on what the
//! element is. Writes never fail on an unknown element; they fall back to
//! replacing its text.

use crate::BindConfig;
use crate::value::{is_truthy, scalar_text};
use fieldbind_dom::{DomResult, DomTree, NodeId};
use serde_json::Value;
use tracing::trace;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WidgetKind {
    /// `<select>`
    Choice,
    /// `<textarea>`
    LongText,
    /// `<input type=radio>`
    Radio,
    /// Any other `<input>`
    ShortText,
    /// `<img>`
    Image,
    /// Anything else; shows the value as text
    Fallback,
}

impl WidgetKind {
    pub fn of(tree: &DomTree, node: NodeId) -> Self {
        let Some(element) = tree.element(node) else {
            return Self::Fallback;
        };
        match element.name.as_str() {
            "select" => Self::Choice,
            "textarea" => Self::LongText,
            "input" if element.input_type() == "radio" => Self::Radio,
            "input" => Self::ShortText,
            "img" => Self::Image,
            _ => Self::Fallback,
        }
    }
}

/// Reads and writes element values under a [`BindConfig`]
#[derive(Debug, Clone, Copy)]
pub struct Widget<'c> {
    config: &'c BindConfig,
}

impl<'c> Widget<'c> {
    pub fn new(config: &'c BindConfig) -> Self {
        Self { config }
    }

    /// Current value of `node`; radios have none
    pub fn read(&self, tree: &DomTree, node: NodeId) -> Option<String> {
        match WidgetKind::of(tree, node) {
            WidgetKind::Choice => Some(tree.selected_value(node)),
            WidgetKind::ShortText => tree.value(node).map(str::to_string),
            WidgetKind::Radio => None,
            WidgetKind::Image => tree.attr(node, "src").map(str::to_string),
            WidgetKind::LongText | WidgetKind::Fallback => Some(tree.text_content(node)),
        }
    }

    /// Write `value` into `node`
    pub fn write(&self, tree: &mut DomTree, node: NodeId, value: &Value) -> DomResult<()> {
        let kind = WidgetKind::of(tree, node);
        let text = scalar_text(value);
        let placeholder = self.config.placeholder.as_str();
        trace!("write {:?} {:?} <- {:?}", kind, node, text);

        match kind {
            WidgetKind::Choice => {
                if text.is_empty() || text == placeholder {
                    tree.select_first(node)
                } else {
                    tree.select_value(node, &text).map(|_| ())
                }
            }
            WidgetKind::LongText => {
                let text = if text == placeholder { "" } else { text.as_str() };
                tree.set_text_content(node, text)
            }
            WidgetKind::Radio => {
                if tree.value(node) == Some(text.as_str()) {
                    tree.set_checked(node, true)
                } else if text.is_empty() || text == placeholder {
                    tree.set_checked(node, false)
                } else {
                    Ok(())
                }
            }
            WidgetKind::ShortText => {
                let text = if text == placeholder { "" } else { text.as_str() };
                tree.set_value(node, text)
            }
            WidgetKind::Image => self.write_image(tree, node, value, &text),
            WidgetKind::Fallback => {
                if !is_truthy(value) || text.is_empty() {
                    tree.set_text_content(node, placeholder)
                } else {
                    tree.set_text_content(node, &text)
                }
            }
        }
    }

    fn write_image(
        &self,
        tree: &mut DomTree,
        node: NodeId,
        value: &Value,
        text: &str,
    ) -> DomResult<()> {
        let origin_attr = self.config.origin_src_attr.as_str();
        if is_truthy(value) && text != self.config.placeholder {
            if !tree.has_attr(node, origin_attr) {
                let original = tree.attr(node, "src").unwrap_or_default().to_string();
                tree.set_attr(node, origin_attr, &original)?;
            }
            return tree.set_attr(node, "src", text);
        }

        let original = tree
            .attr(node, origin_attr)
            .filter(|src| !src.is_empty())
            .map(str::to_string);
        match original {
            Some(src) => tree.set_attr(node, "src", &src),
            None => Ok(()),
        }
    }
}
