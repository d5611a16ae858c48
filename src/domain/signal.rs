//! Trading signal classification.
//!
//! Combines the crossover state with the fear/greed bucket into a graded
//! recommendation. Pure function, no I/O; thresholds are inclusive at the
//! stated boundaries.

use crate::domain::cross::CrossState;
use crate::domain::sentiment::SentimentReading;
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SignalStrength {
    None,
    Weak,
    Moderate,
    Strong,
}

impl fmt::Display for SignalStrength {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SignalStrength::None => write!(f, "none"),
            SignalStrength::Weak => write!(f, "weak"),
            SignalStrength::Moderate => write!(f, "moderate"),
            SignalStrength::Strong => write!(f, "strong"),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct TradingSignal {
    pub label: String,
    pub strength: SignalStrength,
    pub rationale: Option<String>,
}

/// Signal ladder:
/// bullish cross + fear buys (deeper fear, stronger buy); bearish cross +
/// greed sells (deeper greed, stronger sell). Insufficient cross states fall
/// through to "No signal".
pub fn classify(cross: &CrossState, sentiment: &SentimentReading) -> TradingSignal {
    let Some(v) = sentiment.value else {
        return TradingSignal {
            label: "No sentiment data".to_string(),
            strength: SignalStrength::None,
            rationale: None,
        };
    };

    if cross.is_bullish() {
        if v <= 20 {
            TradingSignal {
                label: "Strong buy".to_string(),
                strength: SignalStrength::Strong,
                rationale: Some(format!("golden cross + extreme fear ({v})")),
            }
        } else if v <= 40 {
            TradingSignal {
                label: "Moderate buy".to_string(),
                strength: SignalStrength::Moderate,
                rationale: Some(format!("golden cross + fear ({v})")),
            }
        } else {
            TradingSignal {
                label: "Golden cross state only".to_string(),
                strength: SignalStrength::Weak,
                rationale: Some(format!("golden cross + greed ({v})")),
            }
        }
    } else if cross.is_bearish() {
        if v >= 80 {
            TradingSignal {
                label: "Strong sell".to_string(),
                strength: SignalStrength::Strong,
                rationale: Some(format!("dead cross + extreme greed ({v})")),
            }
        } else if v >= 60 {
            TradingSignal {
                label: "Moderate sell".to_string(),
                strength: SignalStrength::Moderate,
                rationale: Some(format!("dead cross + greed ({v})")),
            }
        } else {
            TradingSignal {
                label: "Dead cross state only".to_string(),
                strength: SignalStrength::Weak,
                rationale: Some(format!("dead cross + fear ({v})")),
            }
        }
    } else {
        TradingSignal {
            label: "No signal".to_string(),
            strength: SignalStrength::None,
            rationale: Some("no clear signal".to_string()),
        }
    }
}
