//! Project relation trees.
//!
//! Relations are stored as JSON: a list of `{"id": .., "s": [..]}` nodes
//! where `s` holds the children.

use serde::{Deserialize, Serialize};

use crate::error::{BujoError, Result};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HierarchyItem {
    pub id: i64,
    #[serde(default)]
    pub s: Vec<HierarchyItem>,
}

impl HierarchyItem {
    pub fn leaf(id: i64) -> Self {
        Self { id, s: Vec::new() }
    }

    fn find(&self, target: i64) -> Option<&HierarchyItem> {
        if self.id == target {
            return Some(self);
        }
        self.s.iter().find_map(|child| child.find(target))
    }

    fn collect_ids(&self, out: &mut Vec<i64>) {
        out.push(self.id);
        for child in &self.s {
            child.collect_ids(out);
        }
    }
}

/// Parse a relations document.
///
/// # Errors
///
/// Returns [`BujoError::Hierarchy`] if the JSON is malformed.
pub fn parse_relations(json: &str) -> Result<Vec<HierarchyItem>> {
    serde_json::from_str(json).map_err(|e| BujoError::Hierarchy(format!("bad relations: {e}")))
}

/// Remove `target` and all its descendants, wherever it sits in the tree.
///
/// # Errors
///
/// Returns [`BujoError::Hierarchy`] if `target` is not in the tree.
pub fn remove_target_item(
    mut items: Vec<HierarchyItem>,
    target: i64,
) -> Result<Vec<HierarchyItem>> {
    if remove_from(&mut items, target) {
        Ok(items)
    } else {
        Err(not_found(target))
    }
}

fn remove_from(items: &mut Vec<HierarchyItem>, target: i64) -> bool {
    if let Some(pos) = items.iter().position(|item| item.id == target) {
        items.remove(pos);
        return true;
    }
    items.iter_mut().any(|item| remove_from(&mut item.s, target))
}

/// Ids of `target` and all its descendants, in pre-order.
///
/// # Errors
///
/// Returns [`BujoError::Hierarchy`] if `target` is not in the tree.
pub fn sub_items(items: &[HierarchyItem], target: i64) -> Result<Vec<i64>> {
    let found = items
        .iter()
        .find_map(|item| item.find(target))
        .ok_or_else(|| not_found(target))?;
    let mut ids = Vec::new();
    found.collect_ids(&mut ids);
    Ok(ids)
}

fn not_found(target: i64) -> BujoError {
    BujoError::Hierarchy(format!("Target {target} not found"))
}

#[cfg(test)]
mod tests {
    use super::*;

    const RELATIONS: &str = r#"[
        {"id": 1, "s": [
            {"id": 2, "s": [{"id": 4}, {"id": 5}]},
            {"id": 3}
        ]},
        {"id": 6}
    ]"#;

    fn ids(items: &[HierarchyItem]) -> Vec<i64> {
        let mut out = Vec::new();
        for item in items {
            item.collect_ids(&mut out);
        }
        out
    }

    #[test]
    fn parses_nodes_without_children() {
        let items = parse_relations(RELATIONS).expect("parse");
        assert_eq!(items.len(), 2);
        assert_eq!(items[1], HierarchyItem::leaf(6));
    }

    #[test]
    fn malformed_relations_rejected() {
        assert!(matches!(
            parse_relations("[{\"s\": []}]"),
            Err(BujoError::Hierarchy(_))
        ));
    }

    #[test]
    fn remove_root_level_item() {
        let items = parse_relations(RELATIONS).expect("parse");
        let items = remove_target_item(items, 6).expect("remove");
        assert_eq!(ids(&items), vec![1, 2, 4, 5, 3]);
    }

    #[test]
    fn remove_nested_item_takes_descendants() {
        let items = parse_relations(RELATIONS).expect("parse");
        let items = remove_target_item(items, 2).expect("remove");
        assert_eq!(ids(&items), vec![1, 3, 6]);
    }

    #[test]
    fn remove_deep_leaf() {
        let items = parse_relations(RELATIONS).expect("parse");
        let items = remove_target_item(items, 5).expect("remove");
        assert_eq!(ids(&items), vec![1, 2, 4, 3, 6]);
    }

    #[test]
    fn remove_missing_target_fails() {
        let items = parse_relations(RELATIONS).expect("parse");
        let err = remove_target_item(items, 99).unwrap_err();
        assert_eq!(err.to_string(), "hierarchy error: Target 99 not found");
    }

    #[test]
    fn sub_items_in_pre_order() {
        let items = parse_relations(RELATIONS).expect("parse");
        assert_eq!(sub_items(&items, 1).expect("sub items"), vec![1, 2, 4, 5, 3]);
        assert_eq!(sub_items(&items, 2).expect("sub items"), vec![2, 4, 5]);
        assert_eq!(sub_items(&items, 6).expect("sub items"), vec![6]);
        assert!(sub_items(&items, 42).is_err());
    }
}
