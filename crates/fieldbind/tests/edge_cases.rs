//! Edge case tests for fieldbind
//!
//! Odd shapes of data and documents that should bind quietly.

use fieldbind::{BindConfig, BindError, BindOptions, Binder, DomTree, FormError, KeyPath, parse_form_body};
use fieldbind_dom::NodeOperations;
use serde_json::{Value, json};

#[test]
fn test_missing_target_is_noop() {
    let mut tree = DomTree::new();
    let span = tree
        .append_element(tree.root(), "span", &[("data-field", "a")])
        .unwrap();
    let binder = Binder::default();
    binder
        .bind(&mut tree, &json!({"nope": 1, "deep": {"x": 2}}), &BindOptions::new())
        .unwrap();
    assert_eq!(tree.text_content(span), "");
    assert_eq!(binder.set_field(&mut tree, None, "nope", &json!(1)).unwrap(), 0);
}

#[test]
fn test_top_level_array_binds_by_index() {
    let mut tree = DomTree::new();
    let root = tree.root();
    let first = tree.append_element(root, "b", &[("data-field", "0")]).unwrap();
    let second = tree.append_element(root, "b", &[("data-field", "1.k")]).unwrap();

    Binder::default()
        .bind(&mut tree, &json!(["x", {"k": "y"}]), &BindOptions::new())
        .unwrap();
    assert_eq!(tree.text_content(first), "x");
    assert_eq!(tree.text_content(second), "y");
}

#[test]
fn test_bare_scalar_with_prefix() {
    let mut tree = DomTree::new();
    let span = tree
        .append_element(tree.root(), "span", &[("data-field", "total")])
        .unwrap();
    let binder = Binder::default();

    binder
        .bind(&mut tree, &json!(42), &BindOptions::new())
        .unwrap();
    assert_eq!(tree.text_content(span), "");

    binder
        .bind(&mut tree, &json!(42), &BindOptions::new().prefix("total"))
        .unwrap();
    assert_eq!(tree.text_content(span), "42");
}

#[test]
fn test_empty_array_with_region_blanks_but_keeps_region() {
    let mut tree = DomTree::new();
    let ul = tree.append_element(tree.root(), "ul", &[]).unwrap();
    let li = tree.append_element(ul, "li", &[("data-list", "tags")]).unwrap();
    tree.append_element(li, "b", &[("data-item", "t")]).unwrap();

    Binder::default()
        .bind(&mut tree, &json!({"tags": []}), &BindOptions::new())
        .unwrap();
    // an empty array is an empty value: the region is left as it was
    assert_eq!(tree.child_ids(ul), vec![li]);
    assert!(tree.is_visible(li));
}

#[test]
fn test_non_object_rows_render_blank_template() {
    let mut tree = DomTree::new();
    let ul = tree.append_element(tree.root(), "ul", &[]).unwrap();
    let li = tree.append_element(ul, "li", &[("data-list", "n")]).unwrap();
    let slot = tree.append_element(li, "b", &[("data-item", "v")]).unwrap();
    tree.set_text_content(slot, "tpl").unwrap();

    let binder = Binder::default();
    binder
        .render_list(&mut tree, "n", &[json!(1), json!("two")], None)
        .unwrap();
    assert_eq!(tree.text_content(ul), "----");
}

#[test]
fn test_list_in_detached_region_skipped() {
    let mut tree = DomTree::new();
    let li = tree.create_element("li");
    tree.set_attr(li, "data-list", "orphans").unwrap();
    let holder = tree.create_element("div");
    tree.append_child(holder, li).unwrap();
    tree.remove_child(holder, li).unwrap();

    let rendered = Binder::default()
        .render_list(&mut tree, "orphans", &[json!({})], Some(holder))
        .unwrap();
    assert_eq!(rendered, 0);
}

#[test]
fn test_keys_with_dots_match_joined_tags() {
    let mut tree = DomTree::new();
    let span = tree
        .append_element(tree.root(), "span", &[("data-field", "a.b")])
        .unwrap();
    Binder::default()
        .bind(&mut tree, &json!({"a.b": "flat"}), &BindOptions::new())
        .unwrap();
    assert_eq!(tree.text_content(span), "flat");
    assert_eq!(KeyPath::root().child("a.b").joined(), "a.b");
}

#[test]
fn test_form_body_edge_cases() {
    assert!(parse_form_body("").unwrap().is_empty());
    assert!(parse_form_body("&&&").unwrap().is_empty());

    let data = parse_form_body("k=%E2%9C%93&plus=a%2Bb").unwrap();
    assert_eq!(data["k"], json!("✓"));
    assert_eq!(data["plus"], json!("a+b"));

    let data = parse_form_body("r[1][a]=x&r[0][b]=y").unwrap();
    assert_eq!(Value::Object(data), json!({"r": [{"b": "y"}, {"a": "x"}]}));
}

#[test]
fn test_form_out_of_range_index_skipped() {
    let data = parse_form_body("keep=1&r[99999999][a]=x&r[-1][a]=y").unwrap();
    assert_eq!(Value::Object(data), json!({"keep": "1"}));
}

#[test]
fn test_form_error_converts() {
    let err: BindError = parse_form_body("a[0][b][c]=1").unwrap_err().into();
    assert!(matches!(err, BindError::Form(FormError::UnsupportedArrayKey(_))));
    assert!(err.user_message().contains("a[0][b][c]"));
}

#[test]
fn test_mixed_case_attribute_names() {
    let config = BindConfig::from_json(
        r#"{"field_attr": "bindField", "list_attr": "bindList", "item_attr": "bindItem"}"#,
    )
    .unwrap();
    let mut tree = DomTree::new();
    let root = tree.root();
    let span = tree
        .append_element(root, "span", &[("bindField", "name")])
        .unwrap();
    let ul = tree.append_element(root, "ul", &[]).unwrap();
    let li = tree.append_element(ul, "li", &[("BINDLIST", "tags")]).unwrap();
    tree.append_element(li, "b", &[("bindItem", "t")]).unwrap();

    let binder = Binder::new(config);
    binder
        .bind(
            &mut tree,
            &json!({"name": "Ada", "tags": [{"t": "x"}, {"t": "y"}]}),
            &BindOptions::new(),
        )
        .unwrap();
    assert_eq!(tree.attr(span, "bindField"), Some("name"));
    assert_eq!(tree.text_content(span), "Ada");
    assert_eq!(tree.text_content(ul), "xy");
}
