use std::collections::HashSet;
use std::path::Path;

use fh_types::ContentId;
use tracing::debug;

use crate::error::{CatalogError, CatalogResult};
use crate::model::{CategoryEntry, ContentKind, ContentRecord, ContentSummary};

/// Maximum number of entries returned by the trending and featured lists.
pub const LIST_LIMIT: usize = 20;

const SEED: &str = include_str!("../seed/catalog.json");

/// Read-only view of the content catalog.
///
/// Lookups never fail: unknown ids yield `None` or an empty list.
pub trait ContentCatalog: Send + Sync {
    /// Every content, in seed order.
    fn all(&self) -> Vec<ContentSummary>;

    fn by_id(&self, id: &ContentId) -> Option<ContentSummary>;

    fn by_type(&self, kind: ContentKind) -> Vec<ContentSummary>;

    /// Up to [`LIST_LIMIT`] contents with a positive trending rank, ordered
    /// by rank. Equal ranks keep seed order.
    fn trending(&self) -> Vec<ContentSummary>;

    /// Up to [`LIST_LIMIT`] featured contents, in seed order.
    fn featured(&self) -> Vec<ContentSummary>;

    /// Contents whose title, description or type contains `query`,
    /// ignoring case.
    fn search(&self, query: &str) -> Vec<ContentSummary>;

    /// Every category item of a content, flattened. Empty for unknown ids.
    fn categories_of(&self, id: &ContentId) -> Vec<CategoryEntry>;

    /// First category item with this id across the whole catalog.
    fn category(&self, id: &str) -> Option<CategoryEntry>;
}

/// Catalog held entirely in memory, loaded once at startup.
#[derive(Clone, Debug)]
pub struct InMemoryCatalog {
    records: Vec<ContentRecord>,
}

impl InMemoryCatalog {
    pub fn new(records: Vec<ContentRecord>) -> CatalogResult<Self> {
        let mut seen = HashSet::new();
        for record in &records {
            if !seen.insert(&record.id) {
                return Err(CatalogError::DuplicateContent(record.id.clone()));
            }
        }
        Ok(Self { records })
    }

    /// The catalog bundled with the crate.
    pub fn seeded() -> CatalogResult<Self> {
        Self::from_json_str(SEED)
    }

    /// Parse a JSON array of content records.
    pub fn from_json_str(json: &str) -> CatalogResult<Self> {
        let records: Vec<ContentRecord> = serde_json::from_str(json)?;
        let catalog = Self::new(records)?;
        debug!(contents = catalog.len(), "catalog loaded");
        Ok(catalog)
    }

    /// Read and parse a catalog file.
    pub fn load(path: impl AsRef<Path>) -> CatalogResult<Self> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path).map_err(|source| CatalogError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json_str(&json)
    }

    pub fn records(&self) -> &[ContentRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    fn record(&self, id: &ContentId) -> Option<&ContentRecord> {
        self.records.iter().find(|r| &r.id == id)
    }

    fn summaries<'a>(
        &'a self,
        filter: impl Fn(&ContentRecord) -> bool + 'a,
    ) -> impl Iterator<Item = ContentSummary> + 'a {
        self.records
            .iter()
            .filter(move |r| filter(*r))
            .map(ContentRecord::summary)
    }
}

impl ContentCatalog for InMemoryCatalog {
    fn all(&self) -> Vec<ContentSummary> {
        self.summaries(|_| true).collect()
    }

    fn by_id(&self, id: &ContentId) -> Option<ContentSummary> {
        self.record(id).map(ContentRecord::summary)
    }

    fn by_type(&self, kind: ContentKind) -> Vec<ContentSummary> {
        self.summaries(move |r| r.kind == kind).collect()
    }

    fn trending(&self) -> Vec<ContentSummary> {
        let mut trending: Vec<ContentSummary> = self.summaries(|r| r.trending > 0).collect();
        // sort_by_key is stable
        trending.sort_by_key(|s| s.trending);
        trending.truncate(LIST_LIMIT);
        trending
    }

    fn featured(&self) -> Vec<ContentSummary> {
        self.summaries(|r| r.featured).take(LIST_LIMIT).collect()
    }

    fn search(&self, query: &str) -> Vec<ContentSummary> {
        let needle = query.to_lowercase();
        self.summaries(move |r| r.matches(&needle)).collect()
    }

    fn categories_of(&self, id: &ContentId) -> Vec<CategoryEntry> {
        self.record(id)
            .map(|r| r.entries().collect())
            .unwrap_or_default()
    }

    fn category(&self, id: &str) -> Option<CategoryEntry> {
        self.records
            .iter()
            .flat_map(|r| r.entries())
            .find(|e| e.id == id)
    }
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use super::*;
    use crate::model::CategoryData;

    fn seeded() -> InMemoryCatalog {
        InMemoryCatalog::seeded().unwrap()
    }

    fn record(id: &str, trending: u32, featured: bool) -> String {
        format!(
            r#"{{"id":"{id}","title":"{id}","type":"game","trending":{trending},"featured":{featured}}}"#
        )
    }

    fn catalog_of(records: &[String]) -> InMemoryCatalog {
        InMemoryCatalog::from_json_str(&format!("[{}]", records.join(","))).unwrap()
    }

    fn ids(list: &[ContentSummary]) -> Vec<&str> {
        list.iter().map(|s| s.id.as_str()).collect()
    }

    // -----------------------------------------------------------------------
    // Seed
    // -----------------------------------------------------------------------

    #[test]
    fn seed_loads() {
        let catalog = seeded();
        assert_eq!(catalog.len(), 15);
        assert_eq!(catalog.all()[0].id.as_str(), "the-last-of-us");
    }

    #[test]
    fn seed_has_each_kind() {
        let catalog = seeded();
        for kind in ContentKind::ALL {
            assert!(!catalog.by_type(kind).is_empty(), "no {kind} in seed");
        }
    }

    #[test]
    fn by_id_known_and_unknown() {
        let catalog = seeded();
        let matrix = catalog.by_id(&ContentId::new("matrix")).unwrap();
        assert_eq!(matrix.kind, ContentKind::Movie);
        assert!(catalog.by_id(&ContentId::new("nope")).is_none());
    }

    // -----------------------------------------------------------------------
    // Lists
    // -----------------------------------------------------------------------

    #[test]
    fn trending_orders_by_rank_and_skips_zero() {
        let catalog = catalog_of(&[
            record("c", 3, false),
            record("none", 0, false),
            record("a", 1, false),
            record("b1", 2, false),
            record("b2", 2, false),
        ]);
        assert_eq!(ids(&catalog.trending()), vec!["a", "b1", "b2", "c"]);
    }

    #[test]
    fn trending_and_featured_cap_at_limit() {
        let many: Vec<String> = (1..=25).map(|i| record(&format!("c{i}"), i, true)).collect();
        let catalog = catalog_of(&many);
        assert_eq!(catalog.trending().len(), LIST_LIMIT);
        assert_eq!(catalog.featured().len(), LIST_LIMIT);
        assert_eq!(catalog.featured()[0].id.as_str(), "c1");
    }

    #[test]
    fn seed_trending_starts_at_rank_one() {
        let trending = seeded().trending();
        assert_eq!(trending[0].id.as_str(), "the-last-of-us");
        assert!(trending.windows(2).all(|w| w[0].trending <= w[1].trending));
    }

    // -----------------------------------------------------------------------
    // Search
    // -----------------------------------------------------------------------

    #[test]
    fn search_is_case_insensitive() {
        let catalog = seeded();
        assert_eq!(ids(&catalog.search("MATRIX")), vec!["matrix"]);
    }

    #[test]
    fn search_matches_type() {
        let catalog = seeded();
        let hits = catalog.search("series");
        for series in catalog.by_type(ContentKind::Series) {
            assert!(hits.contains(&series), "{} missing", series.id);
        }
    }

    #[test]
    fn search_without_match_is_empty() {
        assert!(seeded().search("zzzz-no-such-title").is_empty());
    }

    // -----------------------------------------------------------------------
    // Categories
    // -----------------------------------------------------------------------

    #[test]
    fn categories_are_flattened_in_bucket_order() {
        let entries = seeded().categories_of(&ContentId::new("the-last-of-us"));
        let buckets: Vec<_> = entries.iter().map(|e| e.bucket.as_str()).collect();
        assert_eq!(buckets, vec!["characters", "characters", "weapons", "locations"]);
        assert!(entries.iter().all(|e| e.content_id.as_str() == "the-last-of-us"));
        assert!(matches!(entries[0].data, CategoryData::Character(_)));
        assert!(matches!(entries[2].data, CategoryData::Weapon(_)));
        assert!(matches!(entries[3].data, CategoryData::Location(_)));
    }

    #[test]
    fn categories_of_unknown_content_is_empty() {
        assert!(seeded().categories_of(&ContentId::new("nope")).is_empty());
    }

    #[test]
    fn category_lookup_across_contents() {
        let catalog = seeded();
        let entry = catalog.category("revolver").unwrap();
        assert_eq!(entry.content_id.as_str(), "the-last-of-us");
        assert_eq!(entry.bucket, "weapons");
        assert!(catalog.category("nope").is_none());
    }

    #[test]
    fn open_buckets_stay_open() {
        let entries = seeded().categories_of(&ContentId::new("doors-roblox"));
        assert!(!entries.is_empty());
        assert!(entries.iter().all(|e| matches!(e.data, CategoryData::Other(_))));
    }

    // -----------------------------------------------------------------------
    // Loading
    // -----------------------------------------------------------------------

    #[test]
    fn duplicate_ids_are_rejected() {
        let err = InMemoryCatalog::from_json_str(&format!(
            "[{},{}]",
            record("x", 0, false),
            record("x", 1, false)
        ))
        .unwrap_err();
        assert!(matches!(err, CatalogError::DuplicateContent(id) if id.as_str() == "x"));
    }

    #[test]
    fn malformed_document_is_rejected() {
        assert!(matches!(
            InMemoryCatalog::from_json_str("{"),
            Err(CatalogError::Parse(_))
        ));
    }

    #[test]
    fn load_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "[{}]", record("solo", 1, true)).unwrap();
        let catalog = InMemoryCatalog::load(file.path()).unwrap();
        assert_eq!(ids(&catalog.featured()), vec!["solo"]);
    }

    #[test]
    fn load_missing_file_is_io_error() {
        let dir = tempfile::tempdir().unwrap();
        assert!(matches!(
            InMemoryCatalog::load(dir.path().join("absent.json")),
            Err(CatalogError::Io { .. })
        ));
    }
}
