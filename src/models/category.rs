//! Category and subtitle models matching the storefront's category documents.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Publication status of a root category.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum CategoryStatus {
    #[default]
    Active,
    Inactive,
}

/// A top-level taxonomy node.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Category {
    #[serde(rename = "_id")]
    pub id: String,
    #[serde(default)]
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default)]
    pub subtitles: Vec<Subtitle>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub product_count: Option<u64>,
    #[serde(default)]
    pub status: CategoryStatus,
    /// Server fields this service does not interpret (slug, image, timestamps...)
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// A child taxonomy node at any depth.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Subtitle {
    #[serde(rename = "_id")]
    pub id: String,
    /// Id of the root category owning the whole chain, not the immediate parent.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category_id: Option<String>,
    #[serde(default)]
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default)]
    pub subtitles: Vec<Subtitle>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Category {
    /// Products filed under this category; a missing or null count reads as zero.
    pub fn product_count(&self) -> u64 {
        self.product_count.unwrap_or_default()
    }

    /// Number of subtitles below this category at every depth.
    pub fn descendant_count(&self) -> usize {
        count_subtitles(&self.subtitles)
    }

    /// Find a subtitle anywhere below this category.
    pub fn find_subtitle(&self, id: &str) -> Option<&Subtitle> {
        find_in(&self.subtitles, id)
    }
}

fn count_subtitles(subtitles: &[Subtitle]) -> usize {
    subtitles
        .iter()
        .map(|s| 1 + count_subtitles(&s.subtitles))
        .sum()
}

fn find_in<'a>(subtitles: &'a [Subtitle], id: &str) -> Option<&'a Subtitle> {
    for sub in subtitles {
        if sub.id == id {
            return Some(sub);
        }
        if let Some(found) = find_in(&sub.subtitles, id) {
            return Some(found);
        }
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn sample() -> Category {
        serde_json::from_value(json!({
            "_id": "cat1",
            "name": "Sarees",
            "productCount": 12,
            "status": "inactive",
            "slug": "sarees",
            "subtitles": [
                {
                    "_id": "sub1",
                    "categoryId": "cat1",
                    "name": "Silk",
                    "subtitles": [
                        { "_id": "sub2", "categoryId": "cat1", "name": "Banarasi" },
                        { "_id": "sub3", "categoryId": "cat1", "name": "Kanjivaram" }
                    ]
                },
                { "_id": "sub4", "categoryId": "cat1", "name": "Cotton" }
            ]
        }))
        .unwrap()
    }

    #[test]
    fn test_deserialize_storefront_document() {
        let cat = sample();
        assert_eq!(cat.id, "cat1");
        assert_eq!(cat.status, CategoryStatus::Inactive);
        assert_eq!(cat.product_count(), 12);
        assert_eq!(cat.subtitles[0].subtitles.len(), 2);
        assert_eq!(cat.extra["slug"], "sarees");
    }

    #[test]
    fn test_null_product_count_reads_as_zero() {
        let cat: Category = serde_json::from_value(json!({
            "_id": "cat7",
            "name": "Dupattas",
            "productCount": null
        }))
        .unwrap();
        assert_eq!(cat.product_count(), 0);
        assert!(serde_json::to_value(&cat)
            .unwrap()
            .get("productCount")
            .is_none());
    }

    #[test]
    fn test_unknown_fields_survive_serialization() {
        let value = serde_json::to_value(sample()).unwrap();
        assert_eq!(value["slug"], "sarees");
        assert_eq!(value["_id"], "cat1");
        assert_eq!(value["subtitles"][0]["categoryId"], "cat1");
    }

    #[test]
    fn test_descendant_count() {
        let cat = sample();
        assert_eq!(cat.descendant_count(), 4);
        assert_eq!(count_subtitles(&cat.subtitles[0].subtitles), 2);
        assert_eq!(count_subtitles(&cat.subtitles[1].subtitles), 0);
    }

    #[test]
    fn test_find_subtitle_at_depth() {
        let cat = sample();
        assert_eq!(cat.find_subtitle("sub3").unwrap().name, "Kanjivaram");
        assert!(cat.find_subtitle("cat1").is_none());
        assert!(cat.find_subtitle("missing").is_none());
    }
}
