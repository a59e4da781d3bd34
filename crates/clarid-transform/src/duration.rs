//! Day-count to ISO 8601 duration bin encoding.

use clarid_model::{DurationBinOptions, DurationUnit, Rounding};

/// Encode a day count as a three-character `P<digit><unit>` bin.
///
/// Units are tried greedily in D, W, M, Y priority order against the allowed
/// set; the first unit whose value lands in range wins and later units are
/// never revisited (70 days skips a 10-week result and becomes `P2M`). The D
/// branch truncates and covers 0..=9 days; W and M accept 1..=9 under the
/// configured rounding; Y clamps into 1..=9 and therefore always produces a
/// bin when allowed. Blank input yields `None`; unparseable or negative
/// input yields the configured `on_error` value.
pub fn days_to_iso8601_bin(value: &str, options: &DurationBinOptions) -> Option<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return None;
    }
    let Ok(days) = trimmed.parse::<f64>() else {
        return options.on_error.clone();
    };
    if !days.is_finite() || days < 0.0 {
        return options.on_error.clone();
    }

    if options.allows(DurationUnit::D) && days <= 9.0 {
        return Some(format!("P{}D", days.trunc() as i64));
    }
    if options.allows(DurationUnit::W) {
        let weeks = apply_rounding(days / 7.0, options.rounding);
        if (1..=9).contains(&weeks) {
            return Some(format!("P{weeks}W"));
        }
    }
    if options.allows(DurationUnit::M) {
        let months = apply_rounding(days / 30.0, options.rounding);
        if (1..=9).contains(&months) {
            return Some(format!("P{months}M"));
        }
    }
    if options.allows(DurationUnit::Y) {
        let years = apply_rounding(days / 365.0, options.rounding).clamp(1, 9);
        return Some(format!("P{years}Y"));
    }

    options.on_error.clone()
}

fn apply_rounding(value: f64, rounding: Rounding) -> i64 {
    match rounding {
        Rounding::Floor => value.floor() as i64,
        Rounding::Round => value.round() as i64,
        Rounding::Ceil => value.ceil() as i64,
    }
}
