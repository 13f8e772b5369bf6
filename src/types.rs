use serde::{Deserialize, Serialize};

/// Default maximum score admitted into ranked output
pub const DEFAULT_CUTOFF: u64 = 500;

/// One linkable entity in the search index artifact
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchableRecord {
    pub name: String,
    pub image: String,
    pub href: String,
    /// Lower-cased `name`, fixed when the record is built
    pub search_text: String,
    /// Display grouping only, never matched against
    #[serde(rename = "type")]
    pub kind: Option<String>,
}

/// Search result with record info and match cost (lower is better)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoredResult {
    pub name: String,
    pub image: String,
    pub href: String,
    #[serde(rename = "type")]
    pub kind: Option<String>,
    pub score: u64,
}

impl ScoredResult {
    pub fn from_record(record: &SearchableRecord, score: u64) -> Self {
        ScoredResult {
            name: record.name.clone(),
            image: record.image.clone(),
            href: record.href.clone(),
            kind: record.kind.clone(),
            score,
        }
    }
}

/// Search index: records in build order
pub type SearchIndex = Vec<SearchableRecord>;

/// Entity as handed over by the content pipeline
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContentEntity {
    pub name: String,
    pub image: String,
    /// Resolved page path, when the pipeline already has one
    #[serde(default)]
    pub path: Option<String>,
    pub category: String,
    /// "explore" or "fishing", locations only
    #[serde(default)]
    pub location_type: Option<String>,
}

/// Content pipeline output: category -> entities
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ContentBundle {
    pub items: Vec<ContentEntity>,
    pub locations: Vec<ContentEntity>,
    pub pets: Vec<ContentEntity>,
    pub quests: Vec<ContentEntity>,
    pub questlines: Vec<ContentEntity>,
    pub tools: Vec<ContentEntity>,
}

impl ContentBundle {
    /// All entities in index order, each with the category its key implies
    pub fn entities(&self) -> impl Iterator<Item = (&'static str, &ContentEntity)> {
        [
            ("item", &self.items),
            ("location", &self.locations),
            ("pet", &self.pets),
            ("quest", &self.quests),
            ("questline", &self.questlines),
            ("tool", &self.tools),
        ]
        .into_iter()
        .flat_map(|(category, list)| list.iter().map(move |e| (category, e)))
    }
}

/// Search config handed over from JavaScript
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SearchConfig {
    pub cutoff: u64,
    /// Max results returned, 0 = unlimited
    pub limit: usize,
}

impl Default for SearchConfig {
    fn default() -> Self {
        SearchConfig {
            cutoff: DEFAULT_CUTOFF,
            limit: 0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_record_json_shape() {
        let record = SearchableRecord {
            name: "Stone".to_string(),
            image: "/img/items/stone.png".to_string(),
            href: "/items/stone/".to_string(),
            search_text: "stone".to_string(),
            kind: None,
        };
        let json = serde_json::to_value(&record).unwrap();
        assert_eq!(json["searchText"], "stone");
        assert!(json["type"].is_null());
    }

    #[test]
    fn test_bundle_missing_keys_are_empty() {
        let bundle: ContentBundle =
            serde_json::from_str(r#"{"items": [{"name": "Wood", "image": "/w.png", "category": "item"}]}"#)
                .unwrap();
        assert_eq!(bundle.items.len(), 1);
        assert!(bundle.locations.is_empty());
        assert_eq!(bundle.entities().next().map(|(c, e)| (c, e.name.as_str())), Some(("item", "Wood")));
    }

    #[test]
    fn test_config_defaults() {
        let config: SearchConfig = serde_json::from_str("{}").unwrap();
        assert_eq!(config.cutoff, 500);
        assert_eq!(config.limit, 0);
    }
}
