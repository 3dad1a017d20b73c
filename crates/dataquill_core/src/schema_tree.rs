//! Schema tree model: a snapshot plus per-node expansion state.
//!
//! Rendering walks [`SchemaTree::visible_rows`], a lazy depth-first iterator
//! that never descends into collapsed subtrees. Expansion is keyed by node id
//! and survives collapsing an ancestor; it is reseeded whenever a new snapshot
//! is loaded.

use std::collections::HashMap;

use crate::models::{IndexType, SchemaKind, SchemaNode, SchemaSnapshot};

/// Placeholder shown when a snapshot has no roots.
pub const EMPTY_SCHEMA_TEXT: &str = "No schema data available.";

/// Default number of levels below the roots that start expanded.
pub const DEFAULT_SEED_DEPTH: usize = 2;

/// Icon shown next to a tree row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SchemaIcon {
    /// Database.
    Database,
    /// Table.
    Table,
    /// Grouping folder.
    Folder,
    /// Plain column.
    Column,
    /// Primary key column or primary index.
    Key,
    /// Foreign key column.
    Link,
    /// Non-primary index.
    Index,
}

impl SchemaIcon {
    /// Pick the icon for a node.
    ///
    /// Columns: primary key wins over foreign key. Indexes: only `PRIMARY`
    /// gets the key icon.
    pub fn for_node(node: &SchemaNode) -> Self {
        match node.kind {
            SchemaKind::Database => Self::Database,
            SchemaKind::Table => Self::Table,
            SchemaKind::Folder => Self::Folder,
            SchemaKind::Column if node.is_primary_key => Self::Key,
            SchemaKind::Column if node.is_foreign_key => Self::Link,
            SchemaKind::Column => Self::Column,
            SchemaKind::Index => match node.index_type {
                Some(IndexType::Primary) => Self::Key,
                _ => Self::Index,
            },
        }
    }
}

/// Per-node expansion flags. Absent ids are collapsed.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExpansionState {
    expanded: HashMap<String, bool>,
}

impl ExpansionState {
    /// Seed expansion for a snapshot.
    ///
    /// Database, table and folder nodes at depth `0..=seed_depth` start
    /// expanded. Leaf kinds are never recorded.
    pub fn seeded(snapshot: &SchemaSnapshot, seed_depth: usize) -> Self {
        let mut state = Self::default();
        state.seed(snapshot.roots(), 0, seed_depth);
        state
    }

    fn seed(&mut self, nodes: &[SchemaNode], depth: usize, seed_depth: usize) {
        for node in nodes {
            if node.kind.is_seed_expandable() {
                self.expanded.insert(node.id.clone(), true);
            }
            if depth < seed_depth && !node.children.is_empty() {
                self.seed(&node.children, depth + 1, seed_depth);
            }
        }
    }

    /// Whether `id` is expanded.
    pub fn is_expanded(&self, id: &str) -> bool {
        self.expanded.get(id).copied().unwrap_or(false)
    }

    /// Set an explicit flag for `id`.
    pub fn set(&mut self, id: impl Into<String>, expanded: bool) {
        self.expanded.insert(id.into(), expanded);
    }

    /// Flip `id` and return the new value.
    pub fn flip(&mut self, id: &str) -> bool {
        let entry = self.expanded.entry(id.to_string()).or_insert(false);
        *entry = !*entry;
        *entry
    }

    /// Number of ids currently expanded.
    pub fn expanded_count(&self) -> usize {
        self.expanded.values().filter(|v| **v).count()
    }

    /// Whether a flag (true or false) is recorded for `id`.
    pub fn contains(&self, id: &str) -> bool {
        self.expanded.contains_key(id)
    }
}

/// A row produced by [`SchemaTree::visible_rows`].
#[derive(Debug, Clone, Copy)]
pub struct VisibleRow<'a> {
    /// The node.
    pub node: &'a SchemaNode,
    /// Nesting depth (roots are 0).
    pub depth: usize,
    /// Whether a disclosure control is shown.
    pub has_children: bool,
    /// Whether the node's children are visible.
    pub is_expanded: bool,
    /// Row icon.
    pub icon: SchemaIcon,
}

/// Lazy depth-first walk over visible nodes.
pub struct VisibleRows<'a> {
    stack: Vec<(std::slice::Iter<'a, SchemaNode>, usize)>,
    expansion: &'a ExpansionState,
}

impl<'a> Iterator for VisibleRows<'a> {
    type Item = VisibleRow<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            let (iter, depth) = self.stack.last_mut()?;
            let depth = *depth;
            let Some(node) = iter.next() else {
                self.stack.pop();
                continue;
            };

            let has_children = node.has_children();
            let is_expanded = self.expansion.is_expanded(&node.id);
            if has_children && is_expanded {
                self.stack.push((node.children.iter(), depth + 1));
            }

            return Some(VisibleRow {
                node,
                depth,
                has_children,
                is_expanded,
                icon: SchemaIcon::for_node(node),
            });
        }
    }
}

/// The schema browser's model.
#[derive(Debug, Clone)]
pub struct SchemaTree {
    snapshot: SchemaSnapshot,
    expansion: ExpansionState,
    seed_depth: usize,
}

impl SchemaTree {
    /// Create a tree and seed its expansion.
    pub fn new(snapshot: SchemaSnapshot, seed_depth: usize) -> Self {
        let expansion = ExpansionState::seeded(&snapshot, seed_depth);
        Self { snapshot, expansion, seed_depth }
    }

    /// Current snapshot.
    pub fn snapshot(&self) -> &SchemaSnapshot {
        &self.snapshot
    }

    /// Current expansion state.
    pub fn expansion(&self) -> &ExpansionState {
        &self.expansion
    }

    /// Swap in a new snapshot and reseed expansion.
    pub fn replace(&mut self, snapshot: SchemaSnapshot) {
        self.expansion = ExpansionState::seeded(&snapshot, self.seed_depth);
        self.snapshot = snapshot;
        tracing::debug!(
            nodes = self.snapshot.node_count(),
            expanded = self.expansion.expanded_count(),
            "Schema tree replaced"
        );
    }

    /// Flip expansion of `id`.
    ///
    /// Returns `false` without changing anything when `id` is unknown or
    /// names a leaf.
    pub fn toggle(&mut self, id: &str) -> bool {
        match self.snapshot.find(id) {
            Some(node) if !node.kind.is_leaf() => {
                let expanded = self.expansion.flip(id);
                tracing::trace!(id, expanded, "Schema node toggled");
                true
            }
            _ => false,
        }
    }

    /// Whether `id` is expanded.
    pub fn is_expanded(&self, id: &str) -> bool {
        self.expansion.is_expanded(id)
    }

    /// Expand every non-leaf node.
    pub fn expand_all(&mut self) {
        self.set_all(true);
    }

    /// Collapse every non-leaf node.
    pub fn collapse_all(&mut self) {
        self.set_all(false);
    }

    fn set_all(&mut self, expanded: bool) {
        fn walk(nodes: &[SchemaNode], state: &mut ExpansionState, expanded: bool) {
            for node in nodes {
                if !node.kind.is_leaf() {
                    state.set(node.id.clone(), expanded);
                }
                walk(&node.children, state, expanded);
            }
        }
        walk(self.snapshot.roots(), &mut self.expansion, expanded);
    }

    /// Find a node by id.
    pub fn find(&self, id: &str) -> Option<&SchemaNode> {
        self.snapshot.find(id)
    }

    /// Visible rows in display order.
    pub fn visible_rows(&self) -> VisibleRows<'_> {
        VisibleRows {
            stack: vec![(self.snapshot.roots().iter(), 0)],
            expansion: &self.expansion,
        }
    }

    /// Whether there is nothing to render.
    pub fn is_empty(&self) -> bool {
        self.snapshot.is_empty()
    }
}

impl Default for SchemaTree {
    fn default() -> Self {
        Self::new(SchemaSnapshot::empty(), DEFAULT_SEED_DEPTH)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::schema::sample_catalog;

    fn sample_tree() -> SchemaTree {
        let snapshot = SchemaSnapshot::new(sample_catalog()).unwrap();
        SchemaTree::new(snapshot, DEFAULT_SEED_DEPTH)
    }

    fn visible_ids(tree: &SchemaTree) -> Vec<String> {
        tree.visible_rows().map(|row| row.node.id.clone()).collect()
    }

    #[test]
    fn test_seeding_three_levels() {
        let tree = sample_tree();
        for id in ["db_sales", "tbl_customers", "fld_cols_customers", "db_inventory", "fld_idx_products"] {
            assert!(tree.is_expanded(id), "{id} should start expanded");
        }
        // Leaves are never recorded.
        assert!(!tree.expansion().contains("col_cust_id"));
        assert!(!tree.expansion().contains("idx_pk_orders"));
        // Everything is visible with the default seed.
        assert_eq!(tree.visible_rows().count(), sample_tree().snapshot().node_count());
    }

    #[test]
    fn test_seeding_stops_at_depth() {
        let deep = vec![SchemaNode::database(
            "d",
            "D",
            vec![SchemaNode::folder(
                "f1",
                "F1",
                vec![SchemaNode::folder("f2", "F2", vec![SchemaNode::folder("f3", "F3", vec![])])],
            )],
        )];
        let tree = SchemaTree::new(SchemaSnapshot::new(deep).unwrap(), 2);
        assert!(tree.is_expanded("d"));
        assert!(tree.is_expanded("f1"));
        assert!(tree.is_expanded("f2"));
        assert!(!tree.is_expanded("f3"));
        assert!(!tree.expansion().contains("f3"));

        let shallow = SchemaTree::new(tree.snapshot().clone(), 0);
        assert!(shallow.is_expanded("d"));
        assert!(!shallow.is_expanded("f1"));
    }

    #[test]
    fn test_toggle_twice_restores_rows() {
        let mut tree = sample_tree();
        let before = visible_ids(&tree);

        assert!(tree.toggle("tbl_customers"));
        let collapsed = visible_ids(&tree);
        assert!(collapsed.len() < before.len());
        assert!(!collapsed.contains(&"col_cust_id".to_string()));

        assert!(tree.toggle("tbl_customers"));
        assert_eq!(visible_ids(&tree), before);
    }

    #[test]
    fn test_descendant_state_is_sticky() {
        let mut tree = sample_tree();
        tree.toggle("fld_idx_customers");
        tree.toggle("tbl_customers");
        tree.toggle("tbl_customers");
        assert!(!tree.is_expanded("fld_idx_customers"));
        let ids = visible_ids(&tree);
        assert!(ids.contains(&"fld_idx_customers".to_string()));
        assert!(!ids.contains(&"idx_pk_customers".to_string()));
    }

    #[test]
    fn test_toggle_unknown_or_leaf_is_noop() {
        let mut tree = sample_tree();
        let before = tree.expansion().clone();
        assert!(!tree.toggle("does_not_exist"));
        assert!(!tree.toggle("col_cust_id"));
        assert_eq!(tree.expansion(), &before);
    }

    #[test]
    fn test_visible_rows_depth_and_icons() {
        let tree = sample_tree();
        let rows: Vec<_> = tree.visible_rows().collect();

        assert_eq!(rows[0].node.id, "db_sales");
        assert_eq!(rows[0].depth, 0);
        assert_eq!(rows[0].icon, SchemaIcon::Database);
        assert!(rows[0].has_children && rows[0].is_expanded);

        let pk = rows.iter().find(|r| r.node.id == "col_cust_id").unwrap();
        assert_eq!(pk.depth, 3);
        assert_eq!(pk.icon, SchemaIcon::Key);
        assert!(!pk.has_children);

        let fk = rows.iter().find(|r| r.node.id == "col_order_cust_id").unwrap();
        assert_eq!(fk.icon, SchemaIcon::Link);

        let plain = rows.iter().find(|r| r.node.id == "col_country").unwrap();
        assert_eq!(plain.icon, SchemaIcon::Column);

        let primary = rows.iter().find(|r| r.node.id == "idx_pk_orders").unwrap();
        assert_eq!(primary.icon, SchemaIcon::Key);

        let secondary = rows.iter().find(|r| r.node.id == "idx_country_customers").unwrap();
        assert_eq!(secondary.icon, SchemaIcon::Index);
    }

    #[test]
    fn test_pk_wins_over_fk() {
        let node = SchemaNode::column("c", "C", "INT").primary_key().foreign_key();
        assert_eq!(SchemaIcon::for_node(&node), SchemaIcon::Key);
    }

    #[test]
    fn test_collapse_and_expand_all() {
        let mut tree = sample_tree();
        tree.collapse_all();
        assert_eq!(visible_ids(&tree), vec!["db_sales", "db_inventory"]);

        tree.expand_all();
        assert_eq!(tree.visible_rows().count(), tree.snapshot().node_count());
    }

    #[test]
    fn test_replace_reseeds_expansion() {
        let mut tree = sample_tree();
        tree.collapse_all();
        let old = tree.snapshot().clone();

        tree.replace(SchemaSnapshot::new(sample_catalog()).unwrap());
        assert!(!tree.snapshot().same_snapshot(&old));
        assert!(tree.is_expanded("db_sales"));
        assert!(tree.is_expanded("fld_cols_orders"));
    }

    #[test]
    fn test_empty_tree() {
        let tree = SchemaTree::default();
        assert!(tree.is_empty());
        assert_eq!(tree.visible_rows().count(), 0);
    }
}
