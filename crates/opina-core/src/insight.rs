//! Classification of a user's position against the crowd on one topic.

/// Thresholds are percentage points of agreement with the user's own choice.
const MAJORITY_THRESHOLD: f64 = 62.0;
const MINORITY_THRESHOLD: f64 = 38.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InsightKind {
    Majority,
    Minority,
    Balanced,
    Unknown,
}

#[derive(Debug, Clone)]
pub struct SignalInsight {
    pub kind: InsightKind,
    pub text: &'static str,
}

/// Classify `my_pct` (share of the crowd agreeing with the user, 0..=100).
/// `None` or a non-finite value yields `Unknown`.
pub fn signal_insight(my_pct: Option<f64>) -> SignalInsight {
    let pct = match my_pct {
        Some(p) if p.is_finite() => p,
        Some(_) => {
            return SignalInsight {
                kind: InsightKind::Unknown,
                text: "Sin datos suficientes para estimar tu posición.",
            }
        }
        None => 50.0,
    };

    if pct >= MAJORITY_THRESHOLD {
        SignalInsight {
            kind: InsightKind::Majority,
            text: "Estás alineado con la mayoría en este tema.",
        }
    } else if pct <= MINORITY_THRESHOLD {
        SignalInsight {
            kind: InsightKind::Minority,
            text: "Tu postura es minoritaria en este tema.",
        }
    } else {
        SignalInsight {
            kind: InsightKind::Balanced,
            text: "Tu postura está bastante balanceada respecto al resto.",
        }
    }
}
