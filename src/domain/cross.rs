//! Golden/dead cross detection over the last two frame rows.

use crate::domain::moving_average::MaFrame;

/// Crossover state of the short average relative to the long average.
///
/// `InsufficientData` and `InsufficientMa` are representable states, not
/// errors; they degrade to "no signal" downstream.
#[derive(Debug, Clone, PartialEq)]
pub enum CrossState {
    /// Fewer than two rows in the frame.
    InsufficientData,
    /// One of the four MA values in the last two rows is still in warmup.
    InsufficientMa,
    /// Short average crossed above the long average this period.
    GoldenCross { short_ma: f64, long_ma: f64 },
    /// Short average crossed below the long average this period.
    DeadCross { short_ma: f64, long_ma: f64 },
    /// Already above, no new cross.
    GoldenHold { short_ma: f64, long_ma: f64 },
    /// Already below, no new cross.
    DeadHold { short_ma: f64, long_ma: f64 },
}

impl CrossState {
    pub fn is_bullish(&self) -> bool {
        matches!(self, CrossState::GoldenCross { .. } | CrossState::GoldenHold { .. })
    }

    pub fn is_bearish(&self) -> bool {
        matches!(self, CrossState::DeadCross { .. } | CrossState::DeadHold { .. })
    }

    /// Latest (short, long) MA pair, when determinable.
    pub fn ma_values(&self) -> Option<(f64, f64)> {
        match self {
            CrossState::GoldenCross { short_ma, long_ma }
            | CrossState::DeadCross { short_ma, long_ma }
            | CrossState::GoldenHold { short_ma, long_ma }
            | CrossState::DeadHold { short_ma, long_ma } => Some((*short_ma, *long_ma)),
            _ => None,
        }
    }

    pub fn describe(&self) -> &'static str {
        match self {
            CrossState::InsufficientData => "insufficient data",
            CrossState::InsufficientMa => "insufficient moving average data",
            CrossState::GoldenCross { .. } => "golden cross",
            CrossState::DeadCross { .. } => "dead cross",
            CrossState::GoldenHold { .. } => "golden cross holding",
            CrossState::DeadHold { .. } => "dead cross holding",
        }
    }
}

/// Classifies the latest two rows of the frame. Evaluated fresh each call;
/// no state is carried between runs.
///
/// Equality at the previous step counts toward a crossing in either
/// direction, so a transition from exact equality is a cross, not a hold.
pub fn detect_cross(frame: &MaFrame) -> CrossState {
    if frame.rows.len() < 2 {
        return CrossState::InsufficientData;
    }

    let previous = &frame.rows[frame.rows.len() - 2];
    let latest = &frame.rows[frame.rows.len() - 1];

    let (Some(p_s), Some(p_l), Some(l_s), Some(l_l)) = (
        previous.short_ma,
        previous.long_ma,
        latest.short_ma,
        latest.long_ma,
    ) else {
        return CrossState::InsufficientMa;
    };

    if p_s <= p_l && l_s > l_l {
        CrossState::GoldenCross { short_ma: l_s, long_ma: l_l }
    } else if p_s >= p_l && l_s < l_l {
        CrossState::DeadCross { short_ma: l_s, long_ma: l_l }
    } else if l_s > l_l {
        CrossState::GoldenHold { short_ma: l_s, long_ma: l_l }
    } else {
        CrossState::DeadHold { short_ma: l_s, long_ma: l_l }
    }
}
