//! Console report adapter.
//!
//! Report body goes to stdout; progress and diagnostics stay on stderr.

use crate::domain::analysis::AnalysisResult;
use crate::domain::error::FearcrossError;
use crate::domain::signal::SignalStrength;
use crate::ports::report_port::ReportPort;

pub struct ConsoleReportAdapter;

impl ReportPort for ConsoleReportAdapter {
    fn write(&self, result: &AnalysisResult) -> Result<(), FearcrossError> {
        let rule = "=".repeat(60);

        println!("{rule}");
        println!("Trading signal report: {}", result.market);
        println!("{rule}");
        println!("Run time:      {}", result.run_timestamp.format("%Y-%m-%d %H:%M:%S"));
        println!("Latest price:  {}", format_price(result.latest_price));
        println!("Latest date:   {}", result.latest_date.format("%Y-%m-%d"));
        println!("Data source:   {}", result.data_source);

        println!("\nMoving averages:");
        match result.cross.ma_values() {
            Some((short_ma, long_ma)) => {
                println!("  short: {}", format_price(short_ma));
                println!("  long:  {}", format_price(long_ma));
            }
            None => println!("  not yet available"),
        }
        println!("  state: {}", result.cross.describe());

        println!("\nFear & greed index:");
        match result.sentiment.value {
            Some(v) => println!("  value: {v} ({})", result.sentiment.classification),
            None => println!("  unavailable"),
        }

        println!("\nSignal:");
        println!("  {} [{}]", result.signal.label, result.signal.strength);
        if let Some(rationale) = &result.signal.rationale {
            println!("  rationale: {rationale}");
        }
        println!("{rule}");

        if matches!(
            result.signal.strength,
            SignalStrength::Moderate | SignalStrength::Strong
        ) {
            println!("\n*** ALERT: {} ***", result.signal.label);
            if let Some(rationale) = &result.signal.rationale {
                println!("    {rationale}");
            }
            println!("    price {}", format_price(result.latest_price));
            if let Some(v) = result.sentiment.value {
                println!("    fear/greed {v} ({})", result.sentiment.classification);
            }
        }

        Ok(())
    }
}

fn format_price(value: f64) -> String {
    // At 100 and above the value rounds to a whole grouped amount and the
    // fraction is dropped; only sub-100 prices keep two decimals.
    if value >= 100.0 {
        let whole = value.round() as i64;
        let mut digits = whole.abs().to_string();
        let mut grouped = String::new();
        while digits.len() > 3 {
            let rest = digits.split_off(digits.len() - 3);
            grouped = format!(",{}{}", rest, grouped);
        }
        let sign = if whole < 0 { "-" } else { "" };
        format!("{sign}{digits}{grouped}")
    } else {
        format!("{value:.2}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn groups_thousands_for_large_prices() {
        assert_eq!(format_price(57_123_456.0), "57,123,456");
        assert_eq!(format_price(1_000.0), "1,000");
        assert_eq!(format_price(999.4), "999");
    }

    #[test]
    fn small_prices_keep_decimals() {
        assert_eq!(format_price(99.25), "99.25");
        assert_eq!(format_price(0.5), "0.50");
    }
}
