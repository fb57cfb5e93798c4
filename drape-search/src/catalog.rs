//! Product catalog loading and summary statistics.
//!
//! The catalog is a JSON array of product records. Attribute columns may
//! arrive either as a JSON object or as Python dict-like text
//! (`"{'Occasion': 'Festive', 'Top Shape': 'Anarkali'}"`).

use std::collections::{BTreeMap, HashMap};
use std::path::Path;

use drape_core::Product;
use serde::{Deserialize, Deserializer, Serialize};

use crate::errors::CatalogError;

/// Single product record as stored in the catalog file.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CatalogItem {
    /// Product display name
    #[serde(default, deserialize_with = "null_as_default")]
    pub name: String,
    /// Brand name
    #[serde(default, deserialize_with = "null_as_default")]
    pub brand: String,
    /// Primary colour
    #[serde(default, deserialize_with = "null_as_default")]
    pub colour: String,
    /// Free-text description
    #[serde(default, deserialize_with = "null_as_default")]
    pub description: String,
    /// Structured attributes such as occasion or pattern
    #[serde(
        default,
        alias = "p_attributes",
        deserialize_with = "deserialize_attributes"
    )]
    pub attributes: BTreeMap<String, String>,
    /// Price in rupees
    #[serde(default, deserialize_with = "null_as_default")]
    pub price: f64,
    /// Image URL
    #[serde(default, alias = "image_url", deserialize_with = "null_as_default")]
    pub img: String,
}

impl CatalogItem {
    /// Text used for similarity ranking.
    ///
    /// Name, colour, brand, description and every meaningful attribute
    /// joined by spaces. Blank fields and `NA` attribute values are skipped.
    pub fn combined_features(&self) -> String {
        let mut features = Vec::new();

        if !self.name.trim().is_empty() {
            features.push(self.name.clone());
        }
        if !self.colour.trim().is_empty() {
            features.push(format!("color {}", self.colour));
        }
        if !self.brand.trim().is_empty() {
            features.push(format!("brand {}", self.brand));
        }
        if !self.description.trim().is_empty() {
            features.push(self.description.clone());
        }
        for (key, value) in &self.attributes {
            let value = value.trim();
            if !value.is_empty() && value != "NA" {
                features.push(format!("{key} {value}"));
            }
        }

        features.join(" ")
    }

    /// Converts the record into a search result with the given score.
    pub fn to_product(&self, similarity_score: f64) -> Product {
        Product {
            name: self.name.clone(),
            price: self.price,
            brand: self.brand.clone(),
            description: self.description.clone(),
            image_url: self.img.clone(),
            similarity_score,
        }
    }
}

/// In-memory product catalog.
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    items: Vec<CatalogItem>,
}

impl Catalog {
    /// Wraps already loaded records.
    pub fn from_items(items: Vec<CatalogItem>) -> Self {
        Self { items }
    }

    /// Loads a catalog from a JSON array file.
    ///
    /// # Errors
    /// - `CatalogError::Io` - File could not be read
    /// - `CatalogError::Parse` - File is not a JSON array of products
    pub fn load(path: &Path) -> Result<Self, CatalogError> {
        let data = std::fs::read_to_string(path).map_err(|source| CatalogError::Io {
            path: path.to_path_buf(),
            source,
        })?;

        let items: Vec<CatalogItem> =
            serde_json::from_str(&data).map_err(|e| CatalogError::Parse {
                path: path.to_path_buf(),
                reason: e.to_string(),
            })?;

        tracing::info!("Loaded {} catalog items from {}", items.len(), path.display());
        Ok(Self { items })
    }

    /// All records in file order.
    pub fn items(&self) -> &[CatalogItem] {
        &self.items
    }

    /// Number of records.
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Whether the catalog holds no records.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Summary statistics over the catalog.
    pub fn stats(&self, top_brand_count: usize) -> CatalogStats {
        let mut prices: Vec<f64> = self
            .items
            .iter()
            .map(|item| item.price)
            .filter(|price| price.is_finite())
            .collect();
        prices.sort_by(f64::total_cmp);

        let price = if prices.is_empty() {
            None
        } else {
            let mid = prices.len() / 2;
            let median = if prices.len() % 2 == 0 {
                (prices[mid - 1] + prices[mid]) / 2.0
            } else {
                prices[mid]
            };
            Some(PriceStats {
                min: prices[0],
                max: prices[prices.len() - 1],
                mean: prices.iter().sum::<f64>() / prices.len() as f64,
                median,
            })
        };

        let mut brand_counts: HashMap<&str, usize> = HashMap::new();
        for item in &self.items {
            if !item.brand.trim().is_empty() {
                *brand_counts.entry(item.brand.as_str()).or_default() += 1;
            }
        }
        let unique_brands = brand_counts.len();
        let mut top_brands: Vec<(String, usize)> = brand_counts
            .into_iter()
            .map(|(brand, count)| (brand.to_string(), count))
            .collect();
        top_brands.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(&b.0)));
        top_brands.truncate(top_brand_count);

        CatalogStats {
            total_products: self.items.len(),
            unique_brands,
            price,
            top_brands,
        }
    }
}

/// Price distribution summary.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct PriceStats {
    /// Lowest price
    pub min: f64,
    /// Highest price
    pub max: f64,
    /// Arithmetic mean
    pub mean: f64,
    /// Median price
    pub median: f64,
}

/// Catalog summary printed by `drape catalog-stats`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CatalogStats {
    /// Number of records
    pub total_products: usize,
    /// Number of distinct non-blank brands
    pub unique_brands: usize,
    /// Price summary, absent for an empty catalog
    pub price: Option<PriceStats>,
    /// Most frequent brands with their product counts
    pub top_brands: Vec<(String, usize)>,
}

fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

#[derive(Deserialize)]
#[serde(untagged)]
enum RawAttributes {
    Map(BTreeMap<String, serde_json::Value>),
    Text(String),
}

fn deserialize_attributes<'de, D>(deserializer: D) -> Result<BTreeMap<String, String>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<RawAttributes>::deserialize(deserializer)?;
    Ok(match raw {
        None => BTreeMap::new(),
        Some(RawAttributes::Map(map)) => map
            .into_iter()
            .map(|(key, value)| match value {
                serde_json::Value::String(s) => (key, s),
                serde_json::Value::Null => (key, String::new()),
                other => (key, other.to_string()),
            })
            .collect(),
        Some(RawAttributes::Text(text)) => parse_attribute_text(&text),
    })
}

/// Extracts `'key': 'value'` pairs from dict-like attribute text.
///
/// Malformed text yields whatever pairs could be recognised, possibly none.
fn parse_attribute_text(text: &str) -> BTreeMap<String, String> {
    let mut attributes = BTreeMap::new();

    if let Ok(re) = regex::Regex::new(r#"['"]([^'"]*)['"]\s*:\s*['"]([^'"]*)['"]"#) {
        for capture in re.captures_iter(text) {
            attributes.insert(capture[1].to_string(), capture[2].to_string());
        }
    }

    attributes
}
