//! Tree binder
//!
//! Walks a nested record and writes every leaf into the nodes tagged with its
//! dotted path. Empty sub-values blank the whole subtree of paths below them;
//! arrays go to a list region of the same name when one exists.

use crate::path::{KeyPath, Resolver};
use crate::value::BoundValue;
use crate::widget::Widget;
use crate::{BindConfig, BindResult};
use fieldbind_dom::{AttrSelector, DomTree, NodeId};
use serde_json::Value;
use tracing::{debug, trace};

/// Where and under which path to bind
#[derive(Debug, Clone, Default)]
pub struct BindOptions {
    /// Subtree to search; the whole document when unset
    pub scope: Option<NodeId>,
    /// Path the bound value lives at
    pub prefix: Option<KeyPath>,
}

impl BindOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn scope(mut self, scope: NodeId) -> Self {
        self.scope = Some(scope);
        self
    }

    pub fn prefix(mut self, prefix: impl Into<KeyPath>) -> Self {
        self.prefix = Some(prefix.into());
        self
    }
}

/// Binds records to a document and reads them back
#[derive(Debug, Clone, Default)]
pub struct Binder {
    pub(crate) config: BindConfig,
}

impl Binder {
    pub fn new(config: BindConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &BindConfig {
        &self.config
    }

    pub fn widget(&self) -> Widget<'_> {
        Widget::new(&self.config)
    }

    pub fn resolver(&self) -> Resolver<'_> {
        Resolver::new(&self.config.field_attr)
    }

    /// Project `value` onto the document
    pub fn bind(&self, tree: &mut DomTree, value: &Value, options: &BindOptions) -> BindResult<()> {
        let scope = options.scope.unwrap_or(tree.root());
        let prefix = options.prefix.clone().unwrap_or_default();
        self.bind_at(tree, scope, &prefix, value)
    }

    fn bind_at(
        &self,
        tree: &mut DomTree,
        scope: NodeId,
        prefix: &KeyPath,
        value: &Value,
    ) -> BindResult<()> {
        match BoundValue::classify(value) {
            BoundValue::Empty => {
                debug!("bind {:?}: nothing to bind", prefix.joined());
                Ok(())
            }
            BoundValue::Nested(map) => {
                for (key, sub) in map {
                    self.bind_entry(tree, scope, &prefix.child(key), sub)?;
                }
                Ok(())
            }
            BoundValue::List(items) => {
                for (index, sub) in items.iter().enumerate() {
                    self.bind_entry(tree, scope, &prefix.child(&index.to_string()), sub)?;
                }
                Ok(())
            }
            BoundValue::Scalar(scalar) if !prefix.is_root() => {
                self.write_exact(tree, Some(scope), prefix, scalar)?;
                Ok(())
            }
            BoundValue::Scalar(_) => {
                debug!("bind: ignoring bare scalar without a path");
                Ok(())
            }
        }
    }

    fn bind_entry(
        &self,
        tree: &mut DomTree,
        scope: NodeId,
        path: &KeyPath,
        value: &Value,
    ) -> BindResult<()> {
        match BoundValue::classify(value) {
            BoundValue::Empty => {
                self.blank(tree, Some(scope), path)?;
            }
            BoundValue::Nested(_) => self.bind_at(tree, scope, path, value)?,
            BoundValue::List(rows) => {
                let name = path.joined();
                if self.has_list(tree, scope, &name) {
                    self.render_list(tree, &name, rows, Some(scope))?;
                } else {
                    debug!("no list region {:?}, binding by index", name);
                    self.bind_at(tree, scope, path, value)?;
                }
            }
            BoundValue::Scalar(scalar) => {
                self.write_exact(tree, Some(scope), path, scalar)?;
            }
        }
        Ok(())
    }

    fn has_list(&self, tree: &DomTree, scope: NodeId, name: &str) -> bool {
        tree.find_first(scope, &AttrSelector::equals(&self.config.list_attr, name))
            .is_some()
    }

    fn write_exact(
        &self,
        tree: &mut DomTree,
        scope: Option<NodeId>,
        path: &KeyPath,
        value: &Value,
    ) -> BindResult<usize> {
        let nodes = self.resolver().exact(tree, scope, path);
        trace!("{} -> {} node(s)", path, nodes.len());
        let widget = self.widget();
        for &node in &nodes {
            widget.write(tree, node, value)?;
        }
        Ok(nodes.len())
    }

    /// Write the empty value to every node at or below `path`
    pub fn blank(
        &self,
        tree: &mut DomTree,
        scope: Option<NodeId>,
        path: &KeyPath,
    ) -> BindResult<usize> {
        let nodes = self.resolver().prefix(tree, scope, path);
        debug!("blank {}: {} node(s)", path, nodes.len());
        let widget = self.widget();
        let empty = Value::String(String::new());
        for &node in &nodes {
            widget.write(tree, node, &empty)?;
        }
        Ok(nodes.len())
    }

    /// Write `value` to every node tagged exactly `field`
    ///
    /// Returns how many nodes were written; a missing target is not an error.
    pub fn set_field(
        &self,
        tree: &mut DomTree,
        scope: Option<NodeId>,
        field: &str,
        value: &Value,
    ) -> BindResult<usize> {
        self.write_exact(tree, scope, &KeyPath::parse(field), value)
    }

    /// [`Binder::set_field`] for several fields at once
    pub fn set_fields(
        &self,
        tree: &mut DomTree,
        scope: Option<NodeId>,
        fields: &[&str],
        value: &Value,
    ) -> BindResult<usize> {
        let mut written = 0;
        for field in fields {
            written += self.set_field(tree, scope, field, value)?;
        }
        Ok(written)
    }

    /// Reset every tagged node in `container` to `default` (or "")
    pub fn set_default_fields(
        &self,
        tree: &mut DomTree,
        container: NodeId,
        default: Option<&Value>,
    ) -> BindResult<usize> {
        let empty = Value::String(String::new());
        let value = default.unwrap_or(&empty);
        let nodes = tree.find_all(container, &AttrSelector::exists(&self.config.field_attr));
        let widget = self.widget();
        for &node in &nodes {
            widget.write(tree, node, value)?;
        }
        Ok(nodes.len())
    }

    /// Check the radio of group `name` whose value is `value`, uncheck the rest
    pub fn check_radio(&self, tree: &mut DomTree, name: &str, value: &str) -> BindResult<usize> {
        let radios = tree.find_all(tree.root(), &AttrSelector::equals("name", name));
        for &radio in &radios {
            let checked = tree.value(radio) == Some(value);
            tree.set_checked(radio, checked)?;
        }
        Ok(radios.len())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn field(tree: &mut DomTree, parent: NodeId, tag: &str, path: &str) -> NodeId {
        tree.append_element(parent, tag, &[("data-field", path)]).unwrap()
    }

    #[test]
    fn test_bind_nested_exact() {
        let mut tree = DomTree::new();
        let root = tree.root();
        let name = field(&mut tree, root, "span", "user.name");
        let city = field(&mut tree, root, "input", "user.address.city");
        let other = field(&mut tree, root, "span", "user.nameplate");
        tree.set_text_content(other, "keep").unwrap();

        let binder = Binder::default();
        binder
            .bind(
                &mut tree,
                &json!({"user": {"name": "Ada", "address": {"city": "London"}}}),
                &BindOptions::new(),
            )
            .unwrap();

        assert_eq!(tree.text_content(name), "Ada");
        assert_eq!(tree.value(city), Some("London"));
        assert_eq!(tree.text_content(other), "keep");
    }

    #[test]
    fn test_bind_with_prefix_and_scope() {
        let mut tree = DomTree::new();
        let root = tree.root();
        let card = tree.append_element(root, "div", &[]).unwrap();
        let inside = field(&mut tree, card, "span", "order.id");
        let outside = field(&mut tree, root, "span", "order.id");

        let binder = Binder::default();
        binder
            .bind(
                &mut tree,
                &json!({"id": 7}),
                &BindOptions::new().scope(card).prefix("order"),
            )
            .unwrap();

        assert_eq!(tree.text_content(inside), "7");
        assert_eq!(tree.text_content(outside), "");
    }

    #[test]
    fn test_empty_subobject_blanks_prefix() {
        let mut tree = DomTree::new();
        let root = tree.root();
        let a = field(&mut tree, root, "input", "profile.a");
        let b = field(&mut tree, root, "input", "profile.b.c");
        let other = field(&mut tree, root, "input", "account.a");
        for node in [a, b, other] {
            tree.set_value(node, "old").unwrap();
        }

        Binder::default()
            .bind(&mut tree, &json!({"profile": {}}), &BindOptions::new())
            .unwrap();

        assert_eq!(tree.value(a), Some(""));
        assert_eq!(tree.value(b), Some(""));
        assert_eq!(tree.value(other), Some("old"));
    }

    #[test]
    fn test_array_without_region_binds_by_index() {
        let mut tree = DomTree::new();
        let root = tree.root();
        let first = field(&mut tree, root, "span", "items.0.name");
        let second = field(&mut tree, root, "span", "items.1.name");

        Binder::default()
            .bind(
                &mut tree,
                &json!({"items": [{"name": "a"}, {"name": "b"}]}),
                &BindOptions::new(),
            )
            .unwrap();

        assert_eq!(tree.text_content(first), "a");
        assert_eq!(tree.text_content(second), "b");
    }

    #[test]
    fn test_empty_value_is_noop() {
        let mut tree = DomTree::new();
        let root = tree.root();
        let span = field(&mut tree, root, "span", "x");
        tree.set_text_content(span, "keep").unwrap();

        let binder = Binder::default();
        binder.bind(&mut tree, &Value::Null, &BindOptions::new()).unwrap();
        binder.bind(&mut tree, &json!({}), &BindOptions::new()).unwrap();
        assert_eq!(tree.text_content(span), "keep");
    }

    #[test]
    fn test_set_fields_and_defaults() {
        let mut tree = DomTree::new();
        let root = tree.root();
        let form = tree.append_element(root, "form", &[]).unwrap();
        let a = field(&mut tree, form, "input", "a");
        let b = field(&mut tree, form, "input", "b");

        let binder = Binder::default();
        let written = binder
            .set_fields(&mut tree, None, &["a", "b", "missing"], &json!("x"))
            .unwrap();
        assert_eq!(written, 2);
        assert_eq!(tree.value(b), Some("x"));

        binder.set_default_fields(&mut tree, form, None).unwrap();
        assert_eq!(tree.value(a), Some(""));

        binder
            .set_default_fields(&mut tree, form, Some(&json!("0")))
            .unwrap();
        assert_eq!(tree.value(b), Some("0"));
    }

    #[test]
    fn test_check_radio() {
        let mut tree = DomTree::new();
        let root = tree.root();
        let radios: Vec<NodeId> = ["red", "green", "blue"]
            .iter()
            .map(|v| {
                tree.append_element(
                    root,
                    "input",
                    &[("type", "radio"), ("name", "color"), ("value", *v)],
                )
                .unwrap()
            })
            .collect();
        tree.set_checked(radios[2], true).unwrap();

        let count = Binder::default().check_radio(&mut tree, "color", "red").unwrap();
        assert_eq!(count, 3);
        assert!(tree.checked(radios[0]));
        assert!(!tree.checked(radios[1]));
        assert!(!tree.checked(radios[2]));
    }
}
