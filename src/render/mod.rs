//! Tree rendering: expansion state and the flattened, indented row list.
//!
//! Rendering performs no I/O. Each row carries the node itself as a
//! `NodeTarget`, which is what add-child, edit and delete actions hand back to
//! the mutator.

use std::collections::HashSet;
use std::sync::Arc;

use crate::models::{Category, CategoryStatus, NodeTarget, Subtitle, TreeRow, TreeStats};
use crate::store::count_descendants;

/// Indentation per depth level.
pub const INDENT_WIDTH: usize = 4;

/// Set of expanded node ids, at any depth.
#[derive(Debug, Clone, Default)]
pub struct Expansion {
    expanded: HashSet<String>,
}

impl Expansion {
    pub fn new() -> Self {
        Self::default()
    }

    /// Flip a node's state. Returns whether it is now expanded.
    pub fn toggle(&mut self, id: &str) -> bool {
        if self.expanded.remove(id) {
            false
        } else {
            self.expanded.insert(id.to_string());
            true
        }
    }

    pub fn is_expanded(&self, id: &str) -> bool {
        self.expanded.contains(id)
    }

    /// Seed with every root id.
    pub fn expand_all(&mut self, categories: &[Arc<Category>]) {
        self.expanded
            .extend(categories.iter().map(|c| c.id.clone()));
    }

    pub fn collapse_all(&mut self) {
        self.expanded.clear();
    }

    /// Drop ids that no longer exist in the store.
    pub fn retain_known(&mut self, categories: &[Arc<Category>]) {
        let mut known = HashSet::new();
        for category in categories {
            known.insert(category.id.as_str());
            collect_ids(&category.subtitles, &mut known);
        }
        self.expanded.retain(|id| known.contains(id.as_str()));
    }

    pub fn len(&self) -> usize {
        self.expanded.len()
    }
}

fn collect_ids<'a>(subtitles: &'a [Subtitle], into: &mut HashSet<&'a str>) {
    for sub in subtitles {
        into.insert(sub.id.as_str());
        collect_ids(&sub.subtitles, into);
    }
}

/// Flatten the visible part of the tree, depth first.
///
/// Children appear only below expanded nodes. With a filter, a node is shown
/// when its name or any descendant's name contains the filter
/// (case-insensitive), and ancestors of matches are shown expanded.
pub fn render_rows(
    categories: &[Arc<Category>],
    expansion: &Expansion,
    filter: Option<&str>,
) -> Vec<TreeRow> {
    let filter = filter
        .map(|f| f.trim().to_lowercase())
        .filter(|f| !f.is_empty());
    let walk = Walk {
        expansion,
        filter: filter.as_deref(),
    };

    let mut rows = Vec::new();
    for category in categories {
        walk.root(category, &mut rows);
    }
    rows
}

struct Walk<'a> {
    expansion: &'a Expansion,
    filter: Option<&'a str>,
}

impl Walk<'_> {
    fn root(&self, category: &Category, rows: &mut Vec<TreeRow>) {
        if !self.visible(&category.name, &category.subtitles) {
            return;
        }

        let children = self.visible_children(&category.subtitles);
        let expanded = self.expanded(&category.id, &children);

        rows.push(TreeRow {
            target: NodeTarget::root(category.id.clone()),
            name: category.name.clone(),
            description: category.description.clone(),
            depth: 0,
            indent: 0,
            has_children: !category.subtitles.is_empty(),
            expanded,
            child_count: category.subtitles.len(),
            product_count: Some(category.product_count()),
            status: Some(category.status),
        });

        if expanded {
            for child in children {
                self.subtitle(&category.id, child, 1, rows);
            }
        }
    }

    fn subtitle(&self, root_id: &str, subtitle: &Subtitle, depth: usize, rows: &mut Vec<TreeRow>) {
        let children = self.visible_children(&subtitle.subtitles);
        let expanded = self.expanded(&subtitle.id, &children);
        let owner = subtitle.category_id.as_deref().unwrap_or(root_id);

        rows.push(TreeRow {
            target: NodeTarget::subtitle(owner, subtitle.id.clone()),
            name: subtitle.name.clone(),
            description: subtitle.description.clone(),
            depth,
            indent: depth * INDENT_WIDTH,
            has_children: !subtitle.subtitles.is_empty(),
            expanded,
            child_count: subtitle.subtitles.len(),
            product_count: None,
            status: None,
        });

        if expanded {
            for child in children {
                self.subtitle(root_id, child, depth + 1, rows);
            }
        }
    }

    fn expanded(&self, id: &str, visible_children: &[&Subtitle]) -> bool {
        match self.filter {
            Some(_) => !visible_children.is_empty(),
            None => !visible_children.is_empty() && self.expansion.is_expanded(id),
        }
    }

    fn visible_children<'s>(&self, subtitles: &'s [Subtitle]) -> Vec<&'s Subtitle> {
        subtitles
            .iter()
            .filter(|s| self.visible(&s.name, &s.subtitles))
            .collect()
    }

    fn visible(&self, name: &str, subtitles: &[Subtitle]) -> bool {
        match self.filter {
            None => true,
            Some(filter) => subtree_matches(name, subtitles, filter),
        }
    }
}

fn subtree_matches(name: &str, subtitles: &[Subtitle], filter: &str) -> bool {
    name.to_lowercase().contains(filter)
        || subtitles
            .iter()
            .any(|s| subtree_matches(&s.name, &s.subtitles, filter))
}

/// Plain-text outline of rendered rows.
pub fn render_outline(rows: &[TreeRow]) -> String {
    let mut out = String::new();
    for row in rows {
        let marker = match (row.has_children, row.expanded) {
            (false, _) => '*',
            (true, true) => '-',
            (true, false) => '+',
        };
        out.push_str(&" ".repeat(row.indent));
        out.push(marker);
        out.push(' ');
        out.push_str(&row.name);
        if row.has_children && !row.expanded {
            out.push_str(&format!(" ({})", row.child_count));
        }
        out.push('\n');
    }
    out
}

/// Summary statistics over the whole store.
pub fn tree_stats(categories: &[Arc<Category>]) -> TreeStats {
    let active = categories
        .iter()
        .filter(|c| c.status == CategoryStatus::Active)
        .count();

    TreeStats {
        categories: categories.len(),
        active,
        inactive: categories.len() - active,
        subtitles: count_descendants(categories.iter().map(|c| &**c)),
        products: categories.iter().map(|c| c.product_count()).sum(),
    }
}
