// Static reference tables served alongside the live price lookup
use serde::Serialize;

pub const SOIL_TYPES: &[(&str, &str)] = &[
    ("sandy", "Light, well-draining soil suitable for root vegetables"),
    ("clay", "Heavy, nutrient-rich soil good for many crops"),
    ("loam", "Ideal soil with good drainage and nutrient retention"),
    ("silt", "Fertile soil good for vegetable gardening"),
];

pub const CLIMATE_ZONES: &[(&str, &str)] = &[
    ("tropical", "Hot and humid year-round"),
    ("subtropical", "Hot summers and mild winters"),
    ("temperate", "Moderate temperatures with distinct seasons"),
    ("arid", "Hot and dry with minimal rainfall"),
];

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct SampleMarketEntry {
    pub crop: &'static str,
    pub price_per_kg: f64,
    pub link: &'static str,
}

pub const SAMPLE_MARKET: &[SampleMarketEntry] = &[
    SampleMarketEntry {
        crop: "rice",
        price_per_kg: 25.0,
        link: "https://example.com/market/rice",
    },
    SampleMarketEntry {
        crop: "wheat",
        price_per_kg: 22.5,
        link: "https://example.com/market/wheat",
    },
    SampleMarketEntry {
        crop: "cotton",
        price_per_kg: 120.0,
        link: "https://example.com/market/cotton",
    },
    SampleMarketEntry {
        crop: "banana",
        price_per_kg: 18.0,
        link: "https://example.com/market/banana",
    },
    SampleMarketEntry {
        crop: "mango",
        price_per_kg: 60.0,
        link: "https://example.com/market/mango",
    },
];

/// Exact (case-insensitive) lookup in the sample market table.
pub fn sample_price(crop: &str) -> Option<&'static SampleMarketEntry> {
    let crop = crop.trim();
    SAMPLE_MARKET.iter().find(|e| e.crop.eq_ignore_ascii_case(crop))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sample_lookup_is_exact() {
        assert_eq!(sample_price("Wheat").map(|e| e.price_per_kg), Some(22.5));
        assert!(sample_price("whe").is_none());
    }

    #[test]
    fn tables_are_keyed_by_lowercase_name() {
        assert!(SOIL_TYPES.iter().any(|(k, _)| *k == "loam"));
        assert!(CLIMATE_ZONES.iter().all(|(k, _)| *k == k.to_lowercase()));
    }
}
