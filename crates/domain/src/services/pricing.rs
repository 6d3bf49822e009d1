//! Pricing snapshot derivation.
//!
//! The effective price shown for an application is derived from the price
//! snapshot taken at submission time and the administrator's optional
//! discounted-price override. The derivation is pure and recomputed on every
//! read; it is never persisted.

use serde::Serialize;

/// Derived pricing for display.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EffectivePrice {
    /// The amount to show. `None` when the course had no price at submission
    /// time and no override has been set.
    pub displayed: Option<i64>,
    /// The original price, shown struck through next to a discount.
    pub struck_through: Option<i64>,
    /// Rounded percentage badge for a genuine discount.
    pub discount_percent: Option<i64>,
}

/// Derives the effective price from a snapshot and an optional override.
///
/// A discount badge appears only when both amounts are present and the
/// override is strictly below the snapshot; an override at or above the
/// snapshot is displayed plainly.
pub fn effective_price(price: Option<i64>, discounted_price: Option<i64>) -> EffectivePrice {
    match (price, discounted_price) {
        (price, None) => EffectivePrice {
            displayed: price,
            struck_through: None,
            discount_percent: None,
        },
        (Some(price), Some(discounted)) if discounted < price => {
            let percent = ((1.0 - discounted as f64 / price as f64) * 100.0).round() as i64;
            EffectivePrice {
                displayed: Some(discounted),
                struck_through: Some(price),
                discount_percent: Some(percent),
            }
        }
        (_, Some(discounted)) => EffectivePrice {
            displayed: Some(discounted),
            struck_through: None,
            discount_percent: None,
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_discounted_below_price() {
        let pricing = effective_price(Some(100_000), Some(80_000));
        assert_eq!(pricing.displayed, Some(80_000));
        assert_eq!(pricing.struck_through, Some(100_000));
        assert_eq!(pricing.discount_percent, Some(20));
    }

    #[test]
    fn test_ten_percent_badge() {
        let pricing = effective_price(Some(100_000), Some(90_000));
        assert_eq!(pricing.discount_percent, Some(10));
    }

    #[test]
    fn test_percent_rounding() {
        // 20000/30000 -> 33.33% off -> rounds to 33.
        let pricing = effective_price(Some(30_000), Some(20_000));
        assert_eq!(pricing.discount_percent, Some(33));
        // 10000/15000 -> 33.33...; 5000/15000 kept -> 66.67 -> 67.
        let pricing = effective_price(Some(15_000), Some(5_000));
        assert_eq!(pricing.discount_percent, Some(67));
    }

    #[test]
    fn test_no_override() {
        let pricing = effective_price(Some(100_000), None);
        assert_eq!(pricing.displayed, Some(100_000));
        assert_eq!(pricing.struck_through, None);
        assert_eq!(pricing.discount_percent, None);
    }

    #[test]
    fn test_never_priced() {
        let pricing = effective_price(None, None);
        assert_eq!(pricing.displayed, None);
        assert_eq!(pricing.struck_through, None);
        assert_eq!(pricing.discount_percent, None);
    }

    #[test]
    fn test_override_without_snapshot() {
        let pricing = effective_price(None, Some(50_000));
        assert_eq!(pricing.displayed, Some(50_000));
        assert_eq!(pricing.struck_through, None);
        assert_eq!(pricing.discount_percent, None);
    }

    #[test]
    fn test_override_at_price_shows_no_badge() {
        let pricing = effective_price(Some(100_000), Some(100_000));
        assert_eq!(pricing.displayed, Some(100_000));
        assert_eq!(pricing.struck_through, None);
        assert_eq!(pricing.discount_percent, None);
    }

    #[test]
    fn test_override_above_price_shows_no_badge() {
        // Permitted: the override is not bounded by the snapshot.
        let pricing = effective_price(Some(100_000), Some(120_000));
        assert_eq!(pricing.displayed, Some(120_000));
        assert_eq!(pricing.struck_through, None);
        assert_eq!(pricing.discount_percent, None);
    }

    #[test]
    fn test_free_override() {
        let pricing = effective_price(Some(100_000), Some(0));
        assert_eq!(pricing.displayed, Some(0));
        assert_eq!(pricing.struck_through, Some(100_000));
        assert_eq!(pricing.discount_percent, Some(100));
    }

    #[test]
    fn test_serializes_camel_case() {
        let json = serde_json::to_string(&effective_price(Some(100_000), Some(80_000))).unwrap();
        assert!(json.contains("\"displayed\":80000"));
        assert!(json.contains("\"struckThrough\":100000"));
        assert!(json.contains("\"discountPercent\":20"));
    }
}
