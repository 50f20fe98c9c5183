//! In-memory category store.
//!
//! Holds the ordered root categories exactly as the storefront last returned
//! them. Roots are reference counted so replacing one entry leaves every other
//! entry's identity untouched. The revision increases on every change.

use std::sync::Arc;

use crate::models::{Category, NodeDraft, Subtitle};

#[derive(Debug, Default)]
pub struct CategoryStore {
    categories: Vec<Arc<Category>>,
    revision: u64,
}

impl CategoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn categories(&self) -> &[Arc<Category>] {
        &self.categories
    }

    /// Owned copy of the roots, for responses.
    pub fn snapshot(&self) -> Vec<Category> {
        self.categories.iter().map(|c| Category::clone(c)).collect()
    }

    pub fn revision(&self) -> u64 {
        self.revision
    }

    pub fn len(&self) -> usize {
        self.categories.len()
    }

    pub fn is_empty(&self) -> bool {
        self.categories.is_empty()
    }

    pub fn get(&self, id: &str) -> Option<&Arc<Category>> {
        self.categories.iter().find(|c| c.id == id)
    }

    /// Replace every root with a freshly listed set.
    pub fn replace_all(&mut self, categories: Vec<Category>) {
        self.categories = categories.into_iter().map(Arc::new).collect();
        self.bump();
    }

    /// Append a newly created root at the end.
    pub fn append(&mut self, category: Category) {
        self.categories.push(Arc::new(category));
        self.bump();
    }

    /// Replace the root whose id matches `category.id` with the server's
    /// authoritative copy. Returns false when no root matched.
    pub fn replace_root(&mut self, category: Category) -> bool {
        match self.categories.iter_mut().find(|c| c.id == category.id) {
            Some(slot) => {
                *slot = Arc::new(category);
                self.bump();
                true
            }
            None => {
                tracing::warn!(
                    "Authoritative subtree for unknown category {} ignored",
                    category.id
                );
                false
            }
        }
    }

    /// Remove a root by id. Returns false when no root matched.
    pub fn remove_root(&mut self, id: &str) -> bool {
        let before = self.categories.len();
        self.categories.retain(|c| c.id != id);
        let removed = self.categories.len() != before;
        if removed {
            self.bump();
        }
        removed
    }

    /// Total subtitles under every root.
    pub fn count_descendants(&self) -> usize {
        count_descendants(self.categories.iter().map(|c| &**c))
    }

    /// Edit draft populated from the node with this id.
    pub fn draft_for(&self, id: &str) -> Option<NodeDraft> {
        self.locate(id).map(|found| match found {
            Located::Root(category) => NodeDraft::from_category(category),
            Located::Subtitle(root, subtitle) => NodeDraft::from_subtitle(subtitle, &root.id),
        })
    }

    fn locate(&self, id: &str) -> Option<Located<'_>> {
        if let Some(root) = self.get(id) {
            return Some(Located::Root(&**root));
        }
        self.categories.iter().find_map(|root| {
            root.find_subtitle(id)
                .map(|subtitle| Located::Subtitle(&**root, subtitle))
        })
    }

    fn bump(&mut self) {
        self.revision += 1;
    }
}

enum Located<'a> {
    Root(&'a Category),
    Subtitle(&'a Category, &'a Subtitle),
}

/// Count every subtitle, at any depth, under the given roots.
pub fn count_descendants<'a>(categories: impl IntoIterator<Item = &'a Category>) -> usize {
    categories
        .into_iter()
        .map(Category::descendant_count)
        .sum()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn category(value: serde_json::Value) -> Category {
        serde_json::from_value(value).unwrap()
    }

    fn store_of(categories: Vec<Category>) -> CategoryStore {
        let mut store = CategoryStore::new();
        store.replace_all(categories);
        store
    }

    fn two_roots() -> CategoryStore {
        store_of(vec![
            category(json!({
                "_id": "cat1",
                "name": "Sarees",
                "subtitles": [
                    { "_id": "sub1", "categoryId": "cat1", "name": "Silk",
                      "subtitles": [{ "_id": "sub2", "categoryId": "cat1", "name": "Banarasi" }] }
                ]
            })),
            category(json!({ "_id": "cat2", "name": "Kurtis" })),
        ])
    }

    #[test]
    fn test_count_descendants_empty() {
        let empty = category(json!({ "_id": "c", "subtitles": [] }));
        assert_eq!(count_descendants([&empty]), 0);
    }

    #[test]
    fn test_count_descendants_across_roots() {
        let store = two_roots();
        assert_eq!(store.count_descendants(), 2);

        let store = store_of(vec![
            category(json!({ "_id": "a", "subtitles": [{ "_id": "x" }, { "_id": "y" }] })),
            category(json!({ "_id": "b", "subtitles": [{ "_id": "z", "subtitles": [{ "_id": "w" }] }] })),
        ]);
        assert_eq!(store.count_descendants(), 4);
    }

    #[test]
    fn test_replace_root_preserves_siblings() {
        let mut store = two_roots();
        let sibling_before = Arc::clone(&store.categories()[1]);
        let revision = store.revision();

        let replacement = category(json!({ "_id": "cat1", "subtitles": [] }));
        assert!(store.replace_root(replacement.clone()));

        assert_eq!(*store.categories()[0], replacement);
        assert!(Arc::ptr_eq(&store.categories()[1], &sibling_before));
        assert_eq!(store.revision(), revision + 1);
    }

    #[test]
    fn test_replace_unknown_root_is_noop() {
        let mut store = two_roots();
        let revision = store.revision();
        assert!(!store.replace_root(category(json!({ "_id": "nope" }))));
        assert_eq!(store.len(), 2);
        assert_eq!(store.revision(), revision);
    }

    #[test]
    fn test_append_and_remove() {
        let mut store = two_roots();
        store.append(category(json!({ "_id": "cat3", "name": "Dupattas" })));
        assert_eq!(store.categories()[2].name, "Dupattas");

        assert!(store.remove_root("cat1"));
        assert!(!store.remove_root("cat1"));
        let ids: Vec<_> = store.categories().iter().map(|c| c.id.as_str()).collect();
        assert_eq!(ids, vec!["cat2", "cat3"]);
    }

    #[test]
    fn test_draft_for_subtitle() {
        let store = two_roots();
        let draft = store.draft_for("sub1").unwrap();
        assert_eq!(draft.id.as_deref(), Some("sub1"));
        assert_eq!(draft.category_id.as_deref(), Some("cat1"));
        assert_eq!(draft.name, "Silk");
    }
}
