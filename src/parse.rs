/// Lower-cased form of a display name used for matching
pub fn search_text(name: &str) -> String {
    name.to_lowercase()
}

/// Normalize a raw query before it reaches the scorer
/// The scorer itself never folds case, so this must run first
pub fn normalize_query(query: &str) -> String {
    query.trim().to_lowercase()
}

/// Page slug for a display name (e.g., "Farmer's Market" -> "farmers-market")
pub fn slugify(name: &str) -> String {
    let mut slug = String::with_capacity(name.len());
    let mut pending_dash = false;

    for c in name.chars().filter(|c| *c != '\'') {
        if c.is_ascii_alphanumeric() {
            if pending_dash && !slug.is_empty() {
                slug.push('-');
            }
            pending_dash = false;
            slug.push(c.to_ascii_lowercase());
        } else {
            pending_dash = true;
        }
    }

    slug
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_search_text() {
        assert_eq!(search_text("Iron Ring"), "iron ring");
    }

    #[test]
    fn test_normalize_query() {
        assert_eq!(normalize_query("  StOne "), "stone");
        assert_eq!(normalize_query("   "), "");
    }

    #[test]
    fn test_slugify() {
        assert_eq!(slugify("Farmer's Market"), "farmers-market");
        assert_eq!(slugify("  Mount Banon!! "), "mount-banon");
        assert_eq!(slugify("Whispering Creek (Night)"), "whispering-creek-night");
        assert_eq!(slugify("???"), "");
    }
}
