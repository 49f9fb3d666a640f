use super::RelayFailure;
use crate::{
    classify::NormalizedResult,
    cost::{self, UNAVAILABLE},
};
use std::fmt::Write;

#[derive(Debug, Clone, PartialEq)]
enum Outcome {
    Pending,
    Classified(NormalizedResult),
    Failed(RelayFailure),
}

/// The most recent classification for one user. A newer outcome always
/// replaces the previous one.
#[derive(Debug, Clone)]
pub struct Session {
    outcome: Outcome,
    price_per_kg: String,
}

impl Default for Session {
    fn default() -> Self {
        Self::new()
    }
}

impl Session {
    pub fn new() -> Self {
        Self {
            outcome: Outcome::Pending,
            price_per_kg: String::new(),
        }
    }

    pub fn record(&mut self, outcome: Result<NormalizedResult, RelayFailure>) {
        self.outcome = match outcome {
            Ok(result) => Outcome::Classified(result),
            Err(failure) => Outcome::Failed(failure),
        };
    }

    pub fn set_price(&mut self, price_per_kg: impl Into<String>) {
        self.price_per_kg = price_per_kg.into();
    }

    pub fn last(&self) -> Option<&NormalizedResult> {
        match &self.outcome {
            Outcome::Classified(result) => Some(result),
            _ => None,
        }
    }

    pub fn failure(&self) -> Option<&RelayFailure> {
        match &self.outcome {
            Outcome::Failed(failure) => Some(failure),
            _ => None,
        }
    }

    pub fn render(&self) -> String {
        let mut out = String::new();

        match &self.outcome {
            Outcome::Pending => out.push_str("No classification yet\n"),
            Outcome::Failed(failure) => {
                let _ = writeln!(out, "Classification failed");
                let _ = writeln!(out, "Reason: {} ({})", failure.message, failure.kind);
            }
            Outcome::Classified(result) => {
                let _ = writeln!(out, "Label: {} ({})", result.label_ar, result.label);
                let _ = writeln!(out, "Confidence: {:.1}%", result.score * 100.0);
                let _ = writeln!(
                    out,
                    "Calories (100g): {}",
                    result
                        .calories_100g
                        .map(|c| c.to_string())
                        .unwrap_or_else(|| UNAVAILABLE.to_string())
                );
                for (name, value) in [
                    ("Protein", result.protein_100g),
                    ("Carbs", result.carbs_100g),
                    ("Fat", result.fat_100g),
                    ("Fiber", result.fiber_100g),
                ] {
                    let _ = writeln!(out, "{} (100g): {}", name, one_decimal(value));
                }
            }
        }

        let _ = writeln!(out, "Cost (100g): {}", cost::format_cost(&self.price_per_kg));
        out
    }
}

fn one_decimal(value: Option<f64>) -> String {
    value
        .map(|v| format!("{v:.1}"))
        .unwrap_or_else(|| UNAVAILABLE.to_string())
}
