use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// 試算表原始資料：列 × 欄，全部為字串
pub type SheetRows = Vec<Vec<String>>;

/// The three ranges the site build consumes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RangeNames {
    pub ranging: String,
    pub deals: String,
    pub store_locations: String,
}

impl Default for RangeNames {
    fn default() -> Self {
        Self {
            ranging: "Ranging".to_string(),
            deals: "Deals".to_string(),
            store_locations: "StoreLocations".to_string(),
        }
    }
}

/// Raw rows as returned by the extract phase.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SheetExtract {
    pub ranging: SheetRows,
    pub deals: SheetRows,
    pub store_locations: SheetRows,
}

/// One Deals row keyed by normalized header.
///
/// Backed by an insertion-ordered `serde_json::Map`: setting an existing key
/// replaces its value and keeps its first position.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Deal(Map<String, Value>);

impl Deal {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, key: String, value: String) {
        self.0.insert(key, Value::String(value));
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.0.get(key).and_then(Value::as_str)
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.0.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for Deal {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut deal = Deal::new();
        for (k, v) in iter {
            deal.insert(k.into(), v.into());
        }
        deal
    }
}

/// 門市位置，欄位缺值時不輸出該鍵
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoreLocation {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub store: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub latitude: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub longitude: Option<String>,
}

/// The document written for the static site build.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SiteData {
    pub ranging_data: SheetRows,
    pub deals_data: Vec<Deal>,
    pub store_locations: Vec<StoreLocation>,
}
