use std::fmt;
use std::str::FromStr;

use fh_types::ContentId;
use indexmap::IndexMap;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Open, ordered attribute bag.
pub type Attributes = IndexMap<String, Value>;

/// Kind of a catalog entry.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ContentKind {
    Game,
    Movie,
    Series,
}

impl ContentKind {
    pub const ALL: [ContentKind; 3] = [Self::Game, Self::Movie, Self::Series];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Game => "game",
            Self::Movie => "movie",
            Self::Series => "series",
        }
    }
}

impl fmt::Display for ContentKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ContentKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|k| k.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| format!("unknown content type: {s}"))
    }
}

/// A catalog entry as seeded, including its category buckets.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ContentRecord {
    pub id: ContentId,
    pub title: String,
    #[serde(rename = "type")]
    pub kind: ContentKind,
    #[serde(default)]
    pub year: Option<String>,
    /// Editorial rating text such as `"9.2/10"`. Unrelated to viewer votes.
    #[serde(default)]
    pub rating: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub poster: Option<String>,
    #[serde(default)]
    pub background: Option<String>,
    #[serde(default)]
    pub metadata: Attributes,
    /// Bucket name (`characters`, `weapons`, ...) to items, in seed order.
    #[serde(default)]
    pub categories: IndexMap<String, Vec<CategoryItem>>,
    /// Trending rank; 0 means not trending, lower ranks come first.
    #[serde(default)]
    pub trending: u32,
    #[serde(default)]
    pub featured: bool,
}

impl ContentRecord {
    pub fn summary(&self) -> ContentSummary {
        ContentSummary {
            id: self.id.clone(),
            title: self.title.clone(),
            kind: self.kind,
            year: self.year.clone(),
            rating: self.rating.clone(),
            description: self.description.clone(),
            poster: self.poster.clone(),
            background: self.background.clone(),
            metadata: self.metadata.clone(),
            trending: self.trending,
            featured: self.featured,
        }
    }

    /// Case-insensitive substring match over title, description and type.
    pub fn matches(&self, needle_lower: &str) -> bool {
        self.title.to_lowercase().contains(needle_lower)
            || self
                .description
                .as_deref()
                .is_some_and(|d| d.to_lowercase().contains(needle_lower))
            || self.kind.as_str().contains(needle_lower)
    }

    /// Every category item flattened into entries, bucket by bucket.
    pub fn entries(&self) -> impl Iterator<Item = CategoryEntry> + '_ {
        self.categories.iter().flat_map(move |(bucket, items)| {
            items.iter().map(move |item| CategoryEntry {
                id: item.id.clone(),
                name: item.name.clone(),
                bucket: bucket.clone(),
                content_id: self.id.clone(),
                data: item.data.clone(),
            })
        })
    }
}

/// Catalog entry without its category buckets, as served by listing routes.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ContentSummary {
    pub id: ContentId,
    pub title: String,
    #[serde(rename = "type")]
    pub kind: ContentKind,
    pub year: Option<String>,
    pub rating: Option<String>,
    pub description: Option<String>,
    pub poster: Option<String>,
    pub background: Option<String>,
    pub metadata: Attributes,
    pub trending: u32,
    pub featured: bool,
}

/// An item inside a category bucket.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(from = "RawCategoryItem")]
pub struct CategoryItem {
    pub id: String,
    pub name: String,
    /// Category type; names the bucket the item belongs to.
    #[serde(rename = "type")]
    pub kind: String,
    pub data: CategoryData,
}

#[derive(Deserialize)]
struct RawCategoryItem {
    id: String,
    name: String,
    #[serde(rename = "type")]
    kind: String,
    #[serde(default)]
    data: Attributes,
}

impl From<RawCategoryItem> for CategoryItem {
    fn from(raw: RawCategoryItem) -> Self {
        let data = CategoryData::from_attributes(&raw.kind, raw.data);
        Self {
            id: raw.id,
            name: raw.name,
            kind: raw.kind,
            data,
        }
    }
}

/// A category item flattened out of its content, with the owning content id.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct CategoryEntry {
    pub id: String,
    pub name: String,
    /// Name of the bucket the item was found in.
    #[serde(rename = "type")]
    pub bucket: String,
    #[serde(rename = "contentId")]
    pub content_id: ContentId,
    pub data: CategoryData,
}

/// Display attributes of a category item.
///
/// Buckets with a known shape decode into a typed variant; anything else,
/// including a known bucket whose fields do not fit or would not serialize
/// back unchanged (empty lists, nulls), stays an open bag.
/// Every variant serializes as the flat attribute bag.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(untagged)]
pub enum CategoryData {
    Character(CharacterData),
    Weapon(WeaponData),
    Location(LocationData),
    Other(Attributes),
}

impl CategoryData {
    pub fn from_attributes(category_type: &str, bag: Attributes) -> Self {
        let typed = match category_type {
            "characters" => decode(&bag).map(Self::Character),
            "weapons" => decode(&bag).map(Self::Weapon),
            "locations" => decode(&bag).map(Self::Location),
            _ => None,
        };
        typed.unwrap_or(Self::Other(bag))
    }

    /// The attributes as `(name, display text)` pairs, sorted by name.
    ///
    /// Arrays are joined with `", "`; nested objects fall back to JSON text.
    pub fn display_pairs(&self) -> Vec<(String, String)> {
        let Ok(Value::Object(map)) = serde_json::to_value(self) else {
            return Vec::new();
        };
        map.into_iter()
            .map(|(k, v)| (k, display_value(&v)))
            .collect()
    }
}

/// Decode `bag` into `T` only if `T` serializes back to the same attributes.
fn decode<T: DeserializeOwned + Serialize>(bag: &Attributes) -> Option<T> {
    let object = Value::Object(bag.iter().map(|(k, v)| (k.clone(), v.clone())).collect());
    let typed: T = serde_json::from_value(object.clone()).ok()?;
    let lossless = serde_json::to_value(&typed).is_ok_and(|back| back == object);
    lossless.then_some(typed)
}

/// Display text of one attribute value. Strings print bare, arrays are joined
/// with `", "` and anything else prints as JSON.
pub fn display_value(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Array(items) => items
            .iter()
            .map(display_value)
            .collect::<Vec<_>>()
            .join(", "),
        other => other.to_string(),
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CharacterData {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub role: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub age: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub tags: Vec<String>,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct WeaponData {
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub kind: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub damage: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rarity: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct LocationData {
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub kind: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
}
