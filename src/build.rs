use crate::error::{EngineError, Result};
use crate::parse::{search_text, slugify};
use crate::types::{ContentBundle, ContentEntity, SearchableRecord};
use std::fs;
use std::io::Write;
use std::path::Path;

#[cfg(feature = "native")]
use rayon::prelude::*;

/// Kinds of linkable entity the index knows how to route
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Category {
    Item,
    Location,
    Pet,
    Quest,
    Questline,
    Tool,
}

impl Category {
    /// Display label stored in the record's `type` field
    pub fn label(self) -> Option<&'static str> {
        match self {
            Category::Questline => Some("Questline"),
            Category::Tool => Some("Tool"),
            _ => None,
        }
    }
}

/// Map a content pipeline category label to a Category
pub fn category_of(label: &str) -> Result<Category> {
    match label {
        "item" => Ok(Category::Item),
        "location" => Ok(Category::Location),
        "pet" => Ok(Category::Pet),
        "quest" => Ok(Category::Quest),
        "questline" => Ok(Category::Questline),
        "tool" => Ok(Category::Tool),
        other => Err(EngineError::UnknownCategory(other.to_string())),
    }
}

/// Page path for an entity: the pipeline's path if given, else derived from the name
pub fn route_for(entity: &ContentEntity) -> Result<String> {
    if let Some(path) = &entity.path {
        return Ok(path.clone());
    }

    let slug = slugify(&entity.name);
    let route = match category_of(&entity.category)? {
        Category::Item => format!("/items/{}/", slug),
        Category::Pet => format!("/pets/{}/", slug),
        Category::Quest => format!("/quests/{}/", slug),
        Category::Questline => format!("/questlines/{}/", slug),
        Category::Location => match entity.location_type.as_deref() {
            Some(kind @ ("explore" | "fishing")) => format!("/locations/{}/{}/", kind, slug),
            Some(other) => return Err(EngineError::UnknownCategory(format!("location type {}", other))),
            None => return Err(EngineError::UnknownCategory(format!("location type for {}", entity.name))),
        },
        Category::Tool => return Err(EngineError::MissingPath(entity.name.clone())),
    };
    Ok(route)
}

/// Build one searchable record from a content entity
pub fn make_record(entity: &ContentEntity) -> Result<SearchableRecord> {
    let category = category_of(&entity.category)?;
    let href = route_for(entity)?;
    if !href.starts_with('/') {
        return Err(EngineError::InvalidHref(href));
    }

    Ok(SearchableRecord {
        name: entity.name.clone(),
        image: entity.image.clone(),
        href,
        search_text: search_text(&entity.name),
        kind: category.label().map(str::to_string),
    })
}

/// Record for an entity taken from the bundle key for `category`
fn bundled_record(category: &str, entity: &ContentEntity) -> Result<SearchableRecord> {
    if entity.category != category {
        return Err(EngineError::CategoryMismatch {
            name: entity.name.clone(),
            expected: category.to_string(),
            found: entity.category.clone(),
        });
    }
    make_record(entity)
}

/// Build the full record list, in bundle order
/// The first bad entity fails the whole build
pub fn build_records(bundle: &ContentBundle) -> Result<Vec<SearchableRecord>> {
    let entities: Vec<(&str, &ContentEntity)> = bundle.entities().collect();

    #[cfg(feature = "native")]
    let records = entities
        .par_iter()
        .map(|&(category, e)| bundled_record(category, e))
        .collect::<Result<Vec<_>>>()?;
    #[cfg(not(feature = "native"))]
    let records = entities
        .iter()
        .map(|&(category, e)| bundled_record(category, e))
        .collect::<Result<Vec<_>>>()?;

    tracing::info!("Built {} searchable records", records.len());
    Ok(records)
}

/// Serialize records as the index artifact
pub fn index_to_json(records: &[SearchableRecord]) -> Result<String> {
    Ok(serde_json::to_string(records)?)
}

/// Parse an index artifact
pub fn index_from_json(json: &str) -> Result<Vec<SearchableRecord>> {
    Ok(serde_json::from_str(json)?)
}

/// Write the index artifact, replacing any previous file in one rename
/// The temporary file is removed on every failure path
pub fn write_index(path: &Path, records: &[SearchableRecord]) -> Result<()> {
    let json = index_to_json(records)?;

    let mut tmp_name = path.file_name().map(|n| n.to_os_string()).unwrap_or_default();
    tmp_name.push(".tmp");
    let tmp_path = path.with_file_name(tmp_name);

    let replace = || -> std::io::Result<()> {
        let mut file = fs::File::create(&tmp_path)?;
        file.write_all(json.as_bytes())?;
        file.sync_all()?;
        fs::rename(&tmp_path, path)
    };
    if let Err(e) = replace() {
        let _ = fs::remove_file(&tmp_path);
        return Err(e.into());
    }

    tracing::info!("Wrote {} records to {}", records.len(), path.display());
    Ok(())
}

/// Build records from a bundle and write them to `path`
/// Nothing is written if any entity fails
pub fn build_index_file(bundle: &ContentBundle, path: &Path) -> Result<Vec<SearchableRecord>> {
    let records = build_records(bundle)?;
    write_index(path, &records)?;
    Ok(records)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entity(name: &str, category: &str) -> ContentEntity {
        ContentEntity {
            name: name.to_string(),
            image: format!("/img/{}.png", slugify(name)),
            path: None,
            category: category.to_string(),
            location_type: None,
        }
    }

    #[test]
    fn test_route_derivation() {
        assert_eq!(route_for(&entity("Iron Ring", "item")).unwrap(), "/items/iron-ring/");
        assert_eq!(route_for(&entity("Cat", "pet")).unwrap(), "/pets/cat/");

        let mut forest = entity("Forest", "location");
        forest.location_type = Some("explore".to_string());
        assert_eq!(route_for(&forest).unwrap(), "/locations/explore/forest/");
    }

    #[test]
    fn test_explicit_path_wins() {
        let mut tower = entity("Tower Calculator", "tool");
        tower.path = Some("/tower/".to_string());
        let record = make_record(&tower).unwrap();
        assert_eq!(record.href, "/tower/");
        assert_eq!(record.kind.as_deref(), Some("Tool"));
    }

    #[test]
    fn test_record_fields() {
        let record = make_record(&entity("Farmer's Market", "questline")).unwrap();
        assert_eq!(record.search_text, "farmer's market");
        assert_eq!(record.href, "/questlines/farmers-market/");
        assert_eq!(record.kind.as_deref(), Some("Questline"));

        let item = make_record(&entity("Wood", "item")).unwrap();
        assert_eq!(item.kind, None);
    }

    #[test]
    fn test_unknown_category() {
        let err = make_record(&entity("Mystery", "recipe")).unwrap_err();
        assert!(matches!(err, EngineError::UnknownCategory(ref c) if c == "recipe"));
    }

    #[test]
    fn test_unknown_location_type() {
        let mut lake = entity("Lake", "location");
        lake.location_type = Some("mining".to_string());
        assert!(matches!(route_for(&lake), Err(EngineError::UnknownCategory(_))));
        lake.location_type = None;
        assert!(matches!(route_for(&lake), Err(EngineError::UnknownCategory(_))));
    }

    #[test]
    fn test_tool_without_path() {
        assert!(matches!(route_for(&entity("Wheel", "tool")), Err(EngineError::MissingPath(_))));
    }

    #[test]
    fn test_relative_href_rejected() {
        let mut item = entity("Wood", "item");
        item.path = Some("items/wood/".to_string());
        assert!(matches!(make_record(&item), Err(EngineError::InvalidHref(_))));
    }

    #[test]
    fn test_build_records_order_and_failure() {
        let mut bundle = ContentBundle::default();
        bundle.questlines.push(entity("Cooking", "questline"));
        bundle.items.push(entity("Wood", "item"));
        bundle.items.push(entity("Stone", "item"));

        let records = build_records(&bundle).unwrap();
        let names: Vec<&str> = records.iter().map(|r| r.name.as_str()).collect();
        assert_eq!(names, vec!["Wood", "Stone", "Cooking"]);

        bundle.pets.push(entity("Ghost", "spirit"));
        assert!(build_records(&bundle).is_err());
    }

    #[test]
    fn test_bundle_key_must_match_category() {
        let mut bundle = ContentBundle::default();
        bundle.items.push(entity("Wood", "item"));
        bundle.items.push(entity("Cat", "pet"));

        let err = build_records(&bundle).unwrap_err();
        assert!(matches!(
            err,
            EngineError::CategoryMismatch { ref name, ref expected, ref found }
                if name == "Cat" && expected == "item" && found == "pet"
        ));

        bundle.items.pop();
        bundle.pets.push(entity("Cat", "pet"));
        let records = build_records(&bundle).unwrap();
        assert_eq!(records[1].href, "/pets/cat/");
    }
}
