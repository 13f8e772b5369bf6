use serde_json::{Map, Value};
use std::cell::RefCell;
use wasm_bindgen::prelude::*;

pub mod build;
pub mod calc;
pub mod error;
pub mod parse;
pub mod perf;
pub mod rank;
pub mod types;

use crate::error::{EngineError, Result};
use types::{ScoredResult, SearchConfig, SearchIndex};

/// Search engine state: the loaded index and its config
struct SearchEngine {
    records: SearchIndex,
    config: SearchConfig,
}

impl SearchEngine {
    /// Create a search engine from a serialized index and config
    fn from_json(index_json: &str, config_json: &str) -> Result<Self> {
        let start = perf::now_ms();
        let records = build::index_from_json(index_json)?;
        let config: SearchConfig = if config_json.trim().is_empty() {
            SearchConfig::default()
        } else {
            serde_json::from_str(config_json)?
        };

        perf::log(&format!(
            "[perf] loaded {} records in {:.1}ms (cutoff={} limit={})",
            records.len(),
            perf::now_ms() - start,
            config.cutoff,
            config.limit
        ));

        Ok(SearchEngine { records, config })
    }

    fn search(&self, query: &str, n: usize) -> Vec<ScoredResult> {
        let start = perf::now_ms();

        // caller's n overrides the configured limit
        let config = if n > 0 {
            SearchConfig { limit: n, ..self.config }
        } else {
            self.config
        };
        let results = rank::search(query, &self.records, &config);

        perf::log(&format!(
            "[perf] query='{}' records={} hits={} | total={:.1}ms",
            query,
            self.records.len(),
            results.len(),
            perf::now_ms() - start
        ));

        results
    }
}

// Use thread_local with RefCell for lazy initialization from JS
thread_local! {
    static ENGINE: RefCell<Option<SearchEngine>> = const { RefCell::new(None) };
}

fn with_engine<T>(f: impl FnOnce(&SearchEngine) -> T) -> Result<T> {
    ENGINE.with(|engine| match engine.borrow().as_ref() {
        Some(eng) => Ok(f(eng)),
        None => Err(EngineError::NotInitialized),
    })
}

/// Load the search index artifact and config
pub fn load_engine(index_json: &str, config_json: &str) -> Result<()> {
    let engine = SearchEngine::from_json(index_json, config_json)?;
    ENGINE.with(|slot| {
        *slot.borrow_mut() = Some(engine);
    });
    Ok(())
}

/// Ranked results for a raw query, serialized
pub fn search_json(query: &str, n: usize) -> Result<String> {
    let results = with_engine(|eng| eng.search(query, n))?;
    Ok(serde_json::to_string(&results)?)
}

fn parse_object(json: &str) -> Result<Map<String, Value>> {
    if json.trim().is_empty() {
        return Ok(Map::new());
    }
    Ok(serde_json::from_str(json)?)
}

/// Result table of a calculator given the preference store, serialized
pub fn calculate_json(name: &str, prefs_json: &str) -> Result<String> {
    let prefs = parse_object(prefs_json)?;
    let table = calc::run(name, &prefs)?;
    Ok(serde_json::to_string(&table)?)
}

/// Preference store with the calculator's persisted fields written back
pub fn persist_json(name: &str, params_json: &str, prefs_json: &str) -> Result<String> {
    let params = parse_object(params_json)?;
    let mut prefs = parse_object(prefs_json)?;
    calc::persist(name, &params, &mut prefs)?;
    Ok(serde_json::to_string(&prefs)?)
}

/// Initialize the search engine with the index and config from JavaScript
/// index_json: JSON array of SearchableRecord
/// config_json: JSON SearchConfig, or "" for defaults
#[wasm_bindgen]
pub fn init_engine(index_json: &str, config_json: &str) -> std::result::Result<(), JsError> {
    Ok(load_engine(index_json, config_json)?)
}

/// Check if the engine has been initialized
#[wasm_bindgen]
pub fn is_engine_ready() -> bool {
    ENGINE.with(|engine| engine.borrow().is_some())
}

/// Search the index and return JSON results
#[wasm_bindgen]
pub fn search_docs(query: &str, n: usize) -> std::result::Result<String, JsError> {
    Ok(search_json(query, n)?)
}

/// Get total number of indexed records
#[wasm_bindgen]
pub fn get_doc_count() -> std::result::Result<usize, JsError> {
    Ok(with_engine(|eng| eng.records.len())?)
}

/// Run a calculator against the user's stored preferences
#[wasm_bindgen]
pub fn run_calculator(name: &str, prefs_json: &str) -> std::result::Result<String, JsError> {
    Ok(calculate_json(name, prefs_json)?)
}

/// Default parameters of a calculator
#[wasm_bindgen]
pub fn calculator_defaults(name: &str) -> std::result::Result<String, JsError> {
    let defaults = calc::defaults(name)?;
    Ok(serde_json::to_string(&defaults)?)
}

/// Return the preference store with a calculator's persisted fields updated
#[wasm_bindgen]
pub fn persist_calculator(name: &str, params_json: &str, prefs_json: &str) -> std::result::Result<String, JsError> {
    Ok(persist_json(name, params_json, prefs_json)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::calc::ResultTable;

    fn setup_test_engine() {
        let test_index = r#"[
            {"name": "Stone", "image": "/img/items/stone.png", "href": "/items/stone/", "searchText": "stone", "type": null},
            {"name": "Stonehenge", "image": "/img/items/stonehenge.png", "href": "/items/stonehenge/", "searchText": "stonehenge", "type": null},
            {"name": "Cooking", "image": "/img/ql/cooking.png", "href": "/questlines/cooking/", "searchText": "cooking", "type": "Questline"}
        ]"#;

        load_engine(test_index, "").expect("Failed to initialize test engine");
    }

    #[test]
    fn test_search_docs() {
        setup_test_engine();
        let results: Vec<ScoredResult> = serde_json::from_str(&search_json("SN", 5).unwrap()).unwrap();

        let names: Vec<&str> = results.iter().map(|r| r.name.as_str()).collect();
        assert_eq!(names, vec!["Stone", "Stonehenge"]);
        assert!(results.iter().all(|r| r.score <= 500));
    }

    #[test]
    fn test_search_limit() {
        setup_test_engine();
        let results: Vec<ScoredResult> = serde_json::from_str(&search_json("s", 1).unwrap()).unwrap();
        assert_eq!(results.len(), 1);
    }

    #[test]
    fn test_result_keeps_type_label() {
        setup_test_engine();
        let results: Vec<ScoredResult> = serde_json::from_str(&search_json("cook", 0).unwrap()).unwrap();
        assert_eq!(results[0].kind.as_deref(), Some("Questline"));
    }

    #[test]
    fn test_doc_count() {
        setup_test_engine();
        assert!(is_engine_ready());
        assert_eq!(with_engine(|eng| eng.records.len()).unwrap(), 3);
    }

    #[test]
    fn test_bad_index_is_rejected() {
        assert!(matches!(load_engine("{not json", ""), Err(EngineError::Json(_))));
    }

    #[test]
    fn test_calculate_json() {
        let json = calculate_json("tower", r#"{"tower.toLevel": 104}"#).unwrap();
        let table: ResultTable = serde_json::from_str(&json).unwrap();
        assert_eq!(table.rows[0].values[5].as_f64(), Some(1.0));
        assert!(matches!(calculate_json("slots", ""), Err(EngineError::UnknownCategory(_))));
    }

    #[test]
    fn test_persist_json() {
        let json = persist_json("orchard", r#"{"appleTrees": 40, "applePrice": 1}"#, r#"{"theme": "dark"}"#).unwrap();
        let prefs: Map<String, Value> = serde_json::from_str(&json).unwrap();
        assert_eq!(prefs["orchard.appleTrees"], 40);
        assert_eq!(prefs["theme"], "dark");
        assert!(!prefs.contains_key("orchard.applePrice"));
    }
}
