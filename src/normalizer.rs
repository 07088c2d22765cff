// Price coercion and conversion to a per-kilogram value
use crate::model::PriceUnit;
use crate::utils::round2;

/// Above this, a price without a recognised unit is taken as per-quintal.
/// Best-effort: holds for mandi and MSP data where quintal pricing dominates.
pub const QUINTAL_INFERENCE_THRESHOLD: f64 = 1000.0;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Conversion {
    pub price_per_kg: Option<f64>,
    pub unit: PriceUnit,
    pub inferred: bool,
}

/// Strips thousands separators and rupee markers, then parses.
/// Negative and non-finite values count as unparseable.
pub fn coerce_price(raw: &str) -> Option<f64> {
    let mut text = raw.trim().replace([',', '₹'], "");
    for marker in ["Rs.", "rs.", "RS.", "Rs", "INR"] {
        text = text.replace(marker, "");
    }
    let value = text.trim().parse::<f64>().ok()?;
    (value.is_finite() && value >= 0.0).then_some(value)
}

pub fn detect_unit(raw_unit: &str) -> PriceUnit {
    let unit = raw_unit.to_lowercase();
    if unit.contains("quintal") {
        PriceUnit::PerQuintal
    } else if unit.contains("kg") || unit.contains("kilogram") {
        PriceUnit::PerKilogram
    } else if unit.contains("ton") {
        PriceUnit::PerTonne
    } else {
        PriceUnit::Unknown
    }
}

fn infer_unit(value: f64) -> PriceUnit {
    if value > QUINTAL_INFERENCE_THRESHOLD {
        PriceUnit::PerQuintal
    } else {
        PriceUnit::PerKilogram
    }
}

/// Converts a raw price and optional unit text into a rounded per-kg price.
pub fn to_price_per_kg(raw_value: &str, raw_unit: Option<&str>) -> Conversion {
    let Some(value) = coerce_price(raw_value) else {
        return Conversion {
            price_per_kg: None,
            unit: PriceUnit::Unknown,
            inferred: false,
        };
    };

    let detected = raw_unit.map(detect_unit).unwrap_or(PriceUnit::Unknown);
    let (unit, inferred) = match detected {
        PriceUnit::Unknown => (infer_unit(value), true),
        unit => (unit, false),
    };

    let per_kg = match unit {
        PriceUnit::PerQuintal => value / 100.0,
        PriceUnit::PerTonne => value / 1000.0,
        PriceUnit::PerKilogram | PriceUnit::Unknown => value,
    };

    // Rounding can overflow huge inputs to infinity.
    let per_kg = round2(per_kg);
    Conversion {
        price_per_kg: per_kg.is_finite().then_some(per_kg),
        unit,
        inferred,
    }
}
