//! Rolling-mean computation over closing prices.
//!
//! O(n) sliding window using a running sum. Warmup: the first (window - 1)
//! rows of each average are `None`.

use crate::domain::candle::Candle;
use crate::domain::series::CandleSeries;
use chrono::NaiveDateTime;

/// One series row with its derived short/long averages.
#[derive(Debug, Clone)]
pub struct MaRow {
    pub timestamp: NaiveDateTime,
    pub close: f64,
    pub short_ma: Option<f64>,
    pub long_ma: Option<f64>,
}

/// Candle series augmented with the two moving averages, computed once per
/// analysis run.
#[derive(Debug, Clone)]
pub struct MaFrame {
    pub rows: Vec<MaRow>,
}

/// Computes short/long simple moving averages over closing prices.
///
/// Windows must be >= 1. `long_window` is expected to exceed `short_window`;
/// this is a caller precondition and is not checked here.
pub fn compute_moving_averages(
    series: &CandleSeries,
    short_window: usize,
    long_window: usize,
) -> MaFrame {
    let candles = series.candles();
    let short = rolling_mean(candles, short_window);
    let long = rolling_mean(candles, long_window);

    let rows = candles
        .iter()
        .enumerate()
        .map(|(i, c)| MaRow {
            timestamp: c.timestamp,
            close: c.close,
            short_ma: short[i],
            long_ma: long[i],
        })
        .collect();

    MaFrame { rows }
}

fn rolling_mean(candles: &[Candle], window: usize) -> Vec<Option<f64>> {
    let mut out = Vec::with_capacity(candles.len());
    let mut sum = 0.0;

    for (i, candle) in candles.iter().enumerate() {
        sum += candle.close;
        if i >= window {
            sum -= candles[i - window].close;
        }
        if i + 1 >= window {
            out.push(Some(sum / window as f64));
        } else {
            out.push(None);
        }
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use chrono::NaiveDate;

    fn make_series(closes: &[f64]) -> CandleSeries {
        let candles: Vec<Candle> = closes
            .iter()
            .enumerate()
            .map(|(i, &close)| Candle {
                market: "KRW-BTC".into(),
                timestamp: NaiveDate::from_ymd_opt(2024, 1, 1)
                    .unwrap()
                    .and_hms_opt(9, 0, 0)
                    .unwrap()
                    + chrono::Duration::days(i as i64),
                open: close,
                high: close,
                low: close,
                close,
                volume: 1.0,
            })
            .collect();
        CandleSeries::build(vec![candles], "KRW-BTC").unwrap()
    }

    #[test]
    fn warmup_rows_are_none() {
        let frame = compute_moving_averages(&make_series(&[10.0, 20.0, 30.0, 40.0]), 2, 3);

        assert!(frame.rows[0].short_ma.is_none());
        assert!(frame.rows[1].short_ma.is_some());
        assert!(frame.rows[1].long_ma.is_none());
        assert!(frame.rows[2].long_ma.is_some());
    }

    #[test]
    fn simple_mean_values() {
        let frame = compute_moving_averages(&make_series(&[10.0, 20.0, 30.0, 40.0]), 2, 3);

        assert_relative_eq!(frame.rows[1].short_ma.unwrap(), 15.0);
        assert_relative_eq!(frame.rows[2].short_ma.unwrap(), 25.0);
        assert_relative_eq!(frame.rows[3].short_ma.unwrap(), 35.0);
        assert_relative_eq!(frame.rows[2].long_ma.unwrap(), 20.0);
        assert_relative_eq!(frame.rows[3].long_ma.unwrap(), 30.0);
    }

    #[test]
    fn uniform_closes_give_ma_equal_to_close() {
        let frame = compute_moving_averages(&make_series(&[100.0; 10]), 3, 5);

        for row in &frame.rows {
            if let Some(ma) = row.short_ma {
                assert_relative_eq!(ma, 100.0, epsilon = 1e-9);
            }
            if let Some(ma) = row.long_ma {
                assert_relative_eq!(ma, 100.0, epsilon = 1e-9);
            }
        }
    }

    #[test]
    fn window_one_is_identity() {
        let frame = compute_moving_averages(&make_series(&[10.0, 20.0, 30.0]), 1, 1);
        for row in &frame.rows {
            assert_relative_eq!(row.short_ma.unwrap(), row.close);
        }
    }

    #[test]
    fn deterministic() {
        let series = make_series(&[5.0, 7.0, 11.0, 13.0, 17.0]);
        let a = compute_moving_averages(&series, 2, 4);
        let b = compute_moving_averages(&series, 2, 4);
        for (x, y) in a.rows.iter().zip(b.rows.iter()) {
            assert_eq!(x.short_ma, y.short_ma);
            assert_eq!(x.long_ma, y.long_ma);
        }
    }
}
