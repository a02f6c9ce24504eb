//! Core data types for the trade catalogue.
//!
//! The serialized form is the JSON shape consumed by the cache and the
//! query boundary: kebab-case keys, item names as bare strings.

use serde::{Deserialize, Serialize};

/// Reference to a Minecraft item by name.
///
/// Names are trimmed, lower-cased and free of footnote markers.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub struct ItemRef {
    name: String,
}

impl ItemRef {
    /// Create an item reference, trimming and lower-casing the name.
    #[must_use]
    pub fn new(name: impl AsRef<str>) -> Self {
        Self {
            name: name.as_ref().trim().to_lowercase(),
        }
    }

    /// The normalized item name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Check whether the item name contains `query` as a substring.
    #[must_use]
    pub fn contains(&self, query: &str) -> bool {
        self.name.contains(query)
    }
}

impl From<String> for ItemRef {
    fn from(name: String) -> Self {
        Self::new(name)
    }
}

impl From<ItemRef> for String {
    fn from(item: ItemRef) -> Self {
        item.name
    }
}

impl std::fmt::Display for ItemRef {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.name)
    }
}

/// What the villager wants in an exchange.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct WantedSide {
    /// Wanted items, usually one or two.
    #[serde(rename = "item")]
    pub items: Vec<ItemRef>,

    /// Default quantity per wanted item, matching `items` one to one.
    #[serde(rename = "default-quantity")]
    pub default_quantities: Vec<String>,

    /// Price multiplier applied by demand and reputation.
    pub price_multiplier: String,
}

impl WantedSide {
    /// Pair each wanted item with its default quantity.
    pub fn pairs(&self) -> impl Iterator<Item = (&ItemRef, &str)> {
        self.items
            .iter()
            .zip(self.default_quantities.iter().map(String::as_str))
    }
}

/// What the villager gives in an exchange.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GivenSide {
    pub item: ItemRef,
    pub quantity: String,
}

/// One purchasable offer within a trade level.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct Exchange {
    pub wanted: WantedSide,
    pub given: GivenSide,
    pub trades_until_disabled: String,
    pub xp_to_villager: String,
}

/// All exchanges a profession offers at one level (novice .. master).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TradeLevel {
    #[serde(rename = "level")]
    pub level_name: String,
    pub exchanges: Vec<Exchange>,
}

/// Trades of a single villager profession.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct ProfessionRecord {
    pub profession: String,
    pub job_site_block: String,
    pub trades: Vec<TradeLevel>,
}

impl ProfessionRecord {
    /// Total number of exchanges across all levels.
    #[must_use]
    pub fn exchange_count(&self) -> usize {
        self.trades.iter().map(|t| t.exchanges.len()).sum()
    }
}

/// Ordered collection of profession records, in source table order.
///
/// A catalogue is never patched in place; a refresh builds a new one and
/// compares it wholesale against the previous value.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Catalogue {
    professions: Vec<ProfessionRecord>,
}

impl Catalogue {
    #[must_use]
    pub fn new(professions: Vec<ProfessionRecord>) -> Self {
        Self { professions }
    }

    #[must_use]
    pub fn professions(&self) -> &[ProfessionRecord] {
        &self.professions
    }

    pub fn iter(&self) -> std::slice::Iter<'_, ProfessionRecord> {
        self.professions.iter()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.professions.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.professions.is_empty()
    }

    /// Find a profession by its exact (lower-case) label.
    #[must_use]
    pub fn profession(&self, label: &str) -> Option<&ProfessionRecord> {
        self.professions.iter().find(|p| p.profession == label)
    }

    /// Serialize to the pretty-printed JSON document shape.
    pub fn to_json_pretty(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }

    /// Deserialize from the JSON document shape.
    pub fn from_json(json: &str) -> serde_json::Result<Self> {
        serde_json::from_str(json)
    }
}

impl FromIterator<ProfessionRecord> for Catalogue {
    fn from_iter<I: IntoIterator<Item = ProfessionRecord>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}

impl IntoIterator for Catalogue {
    type Item = ProfessionRecord;
    type IntoIter = std::vec::IntoIter<ProfessionRecord>;

    fn into_iter(self) -> Self::IntoIter {
        self.professions.into_iter()
    }
}

impl<'a> IntoIterator for &'a Catalogue {
    type Item = &'a ProfessionRecord;
    type IntoIter = std::slice::Iter<'a, ProfessionRecord>;

    fn into_iter(self) -> Self::IntoIter {
        self.professions.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn sample_exchange() -> Exchange {
        Exchange {
            wanted: WantedSide {
                items: vec![ItemRef::new("Stick"), ItemRef::new("emerald")],
                default_quantities: vec!["32".to_string(), "1".to_string()],
                price_multiplier: "0.05".to_string(),
            },
            given: GivenSide {
                item: ItemRef::new("emerald"),
                quantity: "1".to_string(),
            },
            trades_until_disabled: "16".to_string(),
            xp_to_villager: "2".to_string(),
        }
    }

    fn sample_catalogue() -> Catalogue {
        Catalogue::new(vec![ProfessionRecord {
            profession: "fletcher".to_string(),
            job_site_block: "fletching table".to_string(),
            trades: vec![TradeLevel {
                level_name: "novice".to_string(),
                exchanges: vec![sample_exchange()],
            }],
        }])
    }

    #[test]
    fn test_item_ref_normalizes_name() {
        let item = ItemRef::new("  Oak Log ");
        assert_eq!(item.name(), "oak log");
        assert_eq!(item.to_string(), "oak log");
    }

    #[test]
    fn test_item_ref_contains_substring() {
        let item = ItemRef::new("sticky piston");
        assert!(item.contains("stick"));
        assert!(!item.contains("slime"));
    }

    #[test]
    fn test_deserialized_item_names_are_normalized() {
        let item: ItemRef = serde_json::from_str("\"  Oak Log \"").unwrap();
        assert_eq!(item, ItemRef::new("oak log"));
        assert!(item.contains("oak"));
    }

    #[test]
    fn test_wanted_pairs() {
        let exchange = sample_exchange();
        let pairs: Vec<_> = exchange.wanted.pairs().map(|(i, q)| (i.name(), q)).collect();
        assert_eq!(pairs, vec![("stick", "32"), ("emerald", "1")]);
    }

    #[test]
    fn test_json_shape_uses_kebab_case_keys() {
        let json = serde_json::to_value(sample_catalogue()).unwrap();
        let record = &json[0];
        assert_eq!(record["profession"], "fletcher");
        assert_eq!(record["job-site-block"], "fletching table");

        let exchange = &record["trades"][0]["exchanges"][0];
        assert_eq!(record["trades"][0]["level"], "novice");
        assert_eq!(exchange["wanted"]["item"][0], "stick");
        assert_eq!(exchange["wanted"]["default-quantity"][1], "1");
        assert_eq!(exchange["wanted"]["price-multiplier"], "0.05");
        assert_eq!(exchange["given"]["item"], "emerald");
        assert_eq!(exchange["given"]["quantity"], "1");
        assert_eq!(exchange["trades-until-disabled"], "16");
        assert_eq!(exchange["xp-to-villager"], "2");
    }

    #[test]
    fn test_json_round_trip_is_structural_identity() {
        let catalogue = sample_catalogue();
        let json = catalogue.to_json_pretty().unwrap();
        let restored = Catalogue::from_json(&json).unwrap();
        assert_eq!(restored, catalogue);
    }

    #[test]
    fn test_catalogue_lookup_and_counts() {
        let catalogue = sample_catalogue();
        assert_eq!(catalogue.len(), 1);
        assert!(!catalogue.is_empty());
        assert!(catalogue.profession("fletcher").is_some());
        assert!(catalogue.profession("farmer").is_none());
        assert_eq!(catalogue.professions()[0].exchange_count(), 1);
    }

    #[test]
    fn test_empty_catalogue_serializes_as_empty_array() {
        assert_eq!(serde_json::to_string(&Catalogue::default()).unwrap(), "[]");
    }
}
