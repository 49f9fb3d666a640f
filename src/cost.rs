//! Cost per 100 g derived from a user-entered price per kilogram.

/// Shown instead of a number whenever the price is unusable.
pub const UNAVAILABLE: &str = "—";

/// `price_per_kg × 0.1`, or `None` when the input is missing, not a number,
/// or not strictly positive.
pub fn cost_per_100g(price_per_kg: &str) -> Option<f64> {
    price_per_kg
        .trim()
        .parse::<f64>()
        .ok()
        .filter(|price| price.is_finite() && *price > 0.0)
        .map(|price| price * 0.1)
}

pub fn format_cost(price_per_kg: &str) -> String {
    cost_per_100g(price_per_kg)
        .map(|cost| format!("{cost:.2}"))
        .unwrap_or_else(|| UNAVAILABLE.to_string())
}
