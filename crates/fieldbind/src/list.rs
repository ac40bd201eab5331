//! List regions
//!
//! A region (`data-list=name`) is one template row. Rendering replaces the
//! region's parent content with a header, if any, plus one filled clone per
//! row. Every clone starts with its item slots blanked. With no rows a single
//! hidden clone stays behind, so the region can be found and rendered again
//! later.

use crate::value::Record;
use crate::{BindResult, Binder};
use fieldbind_dom::{AttrSelector, DomTree, NodeId, NodeOperations};
use serde_json::Value;
use tracing::{debug, trace};

impl Binder {
    /// Render `rows` into every region named `name`
    ///
    /// Returns the number of regions rendered. The rows this replaces are
    /// released back to the tree, so ids held into them go stale.
    pub fn render_list(
        &self,
        tree: &mut DomTree,
        name: &str,
        rows: &[Value],
        scope: Option<NodeId>,
    ) -> BindResult<usize> {
        let scope = scope.unwrap_or(tree.root());
        let regions = tree.find_all(scope, &self.list_selector(name));
        let list_attr = self.config.list_attr.as_str();

        let mut rendered = 0;
        let mut spent = Vec::new();
        for region in regions {
            // A previous region of this pass may have cleared this one away
            let Some(surface) = tree.parent(region) else {
                trace!("list {:?}: region {:?} detached, skipping", name, region);
                continue;
            };

            let header = tree
                .previous_element_sibling(region)
                .filter(|&node| !tree.has_attr(node, list_attr));
            // The region may be a filled row from an earlier render
            let template = tree.clone_node(region, true)?;
            tree.set_hidden(template, false)?;
            self.blank_row(tree, template)?;

            spent.extend(tree.child_ids(surface));
            tree.clear_children(surface)?;
            if let Some(header) = header {
                tree.append_child(surface, header)?;
            }

            for row in rows {
                let instance = tree.clone_node(template, true)?;
                self.fill_row(tree, instance, row)?;
                tree.append_child(surface, instance)?;
            }

            if tree
                .find_first(surface, &AttrSelector::exists(list_attr))
                .is_none()
            {
                let placeholder = tree.clone_node(template, true)?;
                tree.set_hidden(placeholder, true)?;
                tree.append_child(surface, placeholder)?;
            }
            spent.push(template);
            rendered += 1;
        }

        // Rows from the previous render are garbage once every region is done
        for node in spent {
            if tree.parent(node).is_none() {
                tree.release(node)?;
            }
        }

        debug!("list {:?}: {} row(s) into {} region(s)", name, rows.len(), rendered);
        Ok(rendered)
    }

    /// One record per visible region named `name`
    pub fn scrape_list(&self, tree: &DomTree, name: &str, scope: Option<NodeId>) -> Vec<Record> {
        let scope = scope.unwrap_or(tree.root());
        tree.find_all(scope, &self.list_selector(name))
            .into_iter()
            .filter(|&region| tree.is_visible(region))
            .map(|region| self.scrape_row(tree, region))
            .collect()
    }

    fn list_selector(&self, name: &str) -> AttrSelector {
        AttrSelector::equals(&self.config.list_attr, name)
    }

    fn item_nodes(&self, tree: &DomTree, row: NodeId) -> Vec<(NodeId, String)> {
        let item_attr = self.config.item_attr.as_str();
        tree.find_all(row, &AttrSelector::exists(item_attr))
            .into_iter()
            .filter_map(|node| tree.attr(node, item_attr).map(|key| (node, key.to_string())))
            .collect()
    }

    fn blank_row(&self, tree: &mut DomTree, row: NodeId) -> BindResult<()> {
        let widget = self.widget();
        let empty = Value::String(String::new());
        for (node, _) in self.item_nodes(tree, row) {
            widget.write(tree, node, &empty)?;
        }
        Ok(())
    }

    fn fill_row(&self, tree: &mut DomTree, row: NodeId, data: &Value) -> BindResult<()> {
        let Value::Object(data) = data else {
            debug!("list row is not an object, leaving template as is");
            return Ok(());
        };
        let widget = self.widget();
        for (node, key) in self.item_nodes(tree, row) {
            if let Some(value) = data.get(&key) {
                widget.write(tree, node, value)?;
            }
        }
        Ok(())
    }

    fn scrape_row(&self, tree: &DomTree, row: NodeId) -> Record {
        let widget = self.widget();
        let mut record = Record::new();
        for (node, key) in self.item_nodes(tree, row) {
            if let Some(value) = widget.read(tree, node) {
                record.insert(key, Value::String(value));
            }
        }
        record
    }
}
