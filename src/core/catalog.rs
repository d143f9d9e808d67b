//! Price catalog types and the provider abstraction

use anyhow::Result;
use async_trait::async_trait;
use serde::Deserialize;
use std::collections::HashMap;

/// A single price quote as reported by the remote catalog endpoint.
///
/// `date` is kept verbatim for display; the conversion math never reads it.
#[derive(Debug, Clone, Deserialize)]
pub struct PriceRecord {
    pub currency: String,
    pub date: String,
    pub price: f64,
}

/// Deduplicated view of the remote price list for one invocation.
///
/// The source feed may quote the same currency several times. The catalog
/// keeps the last quote per code while remembering the order in which codes
/// first appeared, so default selections stay stable.
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    entries: HashMap<String, PriceRecord>,
    order: Vec<String>,
}

impl Catalog {
    /// Builds a catalog from records in feed order. Last occurrence wins for
    /// the quote, first occurrence wins for the position.
    pub fn from_records(records: impl IntoIterator<Item = PriceRecord>) -> Self {
        let mut catalog = Catalog::default();
        for record in records {
            if !catalog.entries.contains_key(&record.currency) {
                catalog.order.push(record.currency.clone());
            }
            catalog.entries.insert(record.currency.clone(), record);
        }
        catalog
    }

    pub fn get(&self, code: &str) -> Option<&PriceRecord> {
        self.entries.get(code)
    }

    pub fn unit_price(&self, code: &str) -> Option<f64> {
        self.entries.get(code).map(|r| r.price)
    }

    /// Currency codes in first-seen feed order.
    pub fn codes(&self) -> impl Iterator<Item = &str> {
        self.order.iter().map(String::as_str)
    }

    /// The first two distinct codes, used as default source and target when
    /// the user does not pick a pair.
    pub fn default_pair(&self) -> Option<(&str, &str)> {
        match self.order.as_slice() {
            [first, second, ..] => Some((first.as_str(), second.as_str())),
            _ => None,
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Options a selector should offer on one side of a swap, given what is
/// already picked on the other side.
pub fn visible_options<'a>(
    codes: impl IntoIterator<Item = &'a str>,
    excluded: Option<&str>,
) -> Vec<&'a str> {
    codes
        .into_iter()
        .filter(|&code| excluded != Some(code))
        .collect()
}

#[async_trait]
pub trait CatalogProvider: Send + Sync {
    async fn fetch_catalog(&self) -> Result<Catalog>;
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(currency: &str, price: f64) -> PriceRecord {
        PriceRecord {
            currency: currency.to_string(),
            date: "2024-01-01T00:00:00.000Z".to_string(),
            price,
        }
    }

    #[test]
    fn test_dedup_keeps_last_quote_and_first_position() {
        let catalog = Catalog::from_records([
            record("BTC", 60000.0),
            record("ETH", 2900.0),
            record("BTC", 61000.0),
            record("USD", 1.0),
        ]);

        assert_eq!(catalog.len(), 3);
        assert_eq!(catalog.unit_price("BTC"), Some(61000.0));
        assert_eq!(
            catalog.codes().collect::<Vec<_>>(),
            vec!["BTC", "ETH", "USD"]
        );
    }

    #[test]
    fn test_dedup_is_idempotent() {
        let noisy = [
            record("BTC", 60000.0),
            record("ETH", 2900.0),
            record("BTC", 61000.0),
            record("ETH", 3000.0),
        ];
        let clean = [record("BTC", 61000.0), record("ETH", 3000.0)];

        let from_noisy = Catalog::from_records(noisy.clone());
        let from_noisy_twice =
            Catalog::from_records(noisy.iter().chain(noisy.iter()).cloned());
        let from_clean = Catalog::from_records(clean);

        for catalog in [&from_noisy_twice, &from_clean] {
            assert_eq!(catalog.len(), from_noisy.len());
            for code in from_noisy.codes() {
                assert_eq!(catalog.unit_price(code), from_noisy.unit_price(code));
            }
        }
    }

    #[test]
    fn test_default_pair_follows_feed_order() {
        let catalog = Catalog::from_records([
            record("ETH", 3000.0),
            record("ETH", 3010.0),
            record("BTC", 60000.0),
        ]);
        assert_eq!(catalog.default_pair(), Some(("ETH", "BTC")));

        let single = Catalog::from_records([record("ETH", 3000.0)]);
        assert_eq!(single.default_pair(), None);
        assert_eq!(Catalog::default().default_pair(), None);
    }

    #[test]
    fn test_visible_options_hides_opposite_selection() {
        let codes = ["BTC", "ETH", "USD"];
        assert_eq!(
            visible_options(codes, Some("ETH")),
            vec!["BTC", "USD"]
        );
        assert_eq!(
            visible_options(codes, None),
            vec!["BTC", "ETH", "USD"]
        );
        assert_eq!(
            visible_options(codes, Some("XRP")),
            vec!["BTC", "ETH", "USD"]
        );
    }
}
