//! Template fragments
//!
//! A template is an ordinary subtree, usually detached, filled key by key:
//! arrays render into list regions, everything else binds under its key.

use crate::{BindOptions, BindResult, Binder};
use fieldbind_dom::{DomTree, NodeId, NodeOperations};
use serde_json::Value;
use tracing::debug;

impl Binder {
    /// Fill `fragment` from the top-level keys of `data`
    pub fn render_template(
        &self,
        tree: &mut DomTree,
        fragment: NodeId,
        data: &Value,
    ) -> BindResult<()> {
        let Value::Object(map) = data else {
            debug!("template data is not an object, nothing to render");
            return Ok(());
        };

        for (key, value) in map {
            match value {
                Value::Array(rows) => {
                    self.render_list(tree, key, rows, Some(fragment))?;
                }
                other => {
                    let options = BindOptions::new().scope(fragment).prefix(key.as_str());
                    self.bind(tree, other, &options)?;
                }
            }
        }
        Ok(())
    }

    /// Deep-clone `template` and fill the copy, leaving the original untouched
    ///
    /// The copy is detached; the caller decides where it goes.
    pub fn instantiate(
        &self,
        tree: &mut DomTree,
        template: NodeId,
        data: &Value,
    ) -> BindResult<NodeId> {
        let fragment = tree.clone_node(template, true)?;
        tree.set_hidden(fragment, false)?;
        self.render_template(tree, fragment, data)?;
        Ok(fragment)
    }
}
