//! Point amounts and price rounding.
//!
//! Balances are float-backed but must behave like fixed two-decimal currency.
//! Every externally supplied amount is truncated on input and every computed
//! balance is rounded on write, so representation noise does not compound
//! across repeated fund/take cycles.

/// Point amount. Points can be traded for goods and represent value like
/// real money, with two-decimal-place semantics.
pub type Points = f32;

/// Rounds `value` at `precision` decimal digits, using `unit` as the
/// fractional threshold for rounding away from zero.
///
/// For positive values the scaled fraction is rounded up when it reaches
/// `unit` and down otherwise; for negative values the comparison runs on the
/// fraction's magnitude with the directions swapped, so rounding is
/// symmetric around zero.
pub fn round(value: f64, unit: f64, precision: i32) -> f64 {
    let pow = 10f64.powi(precision);
    let digit = pow * value;
    let frac = digit.fract();

    let rounded = if value > 0.0 {
        if frac >= unit { digit.ceil() } else { digit.floor() }
    } else if frac.abs() >= unit {
        digit.floor()
    } else {
        digit.ceil()
    };

    rounded / pow
}

/// Half-up rounding to two decimal places, applied whenever a balance is
/// written back after arithmetic.
pub fn round_price(price: Points) -> Points {
    round(f64::from(price), 0.5, 2) as Points
}

/// Truncates a price to two decimal places, discarding the sub-cent
/// remainder toward zero.
pub fn truncate_price(value: Points) -> Points {
    ((value * 100.0) as i64) as Points / 100.0
}
