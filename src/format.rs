//! Display formatting and mortgage payment math shared by the listing and
//! calculator endpoints.

use serde::Serialize;
use utoipa::ToSchema;

/// Format a dollar amount in en-US style without cents, e.g. `$1,216`.
pub fn format_currency(amount: f64) -> String {
    let rounded = amount.round();
    let digits = group_thousands(&format!("{:.0}", rounded.abs()));

    if rounded < 0.0 {
        format!("-${}", digits)
    } else {
        format!("${}", digits)
    }
}

/// Format a number with en-US digit grouping and at most three fraction digits.
pub fn format_number(value: f64) -> String {
    let fixed = format!("{:.3}", value.abs());
    let (integer, fraction) = fixed.split_once('.').unwrap_or((fixed.as_str(), ""));
    let fraction = fraction.trim_end_matches('0');

    let mut formatted = group_thousands(integer);
    if !fraction.is_empty() {
        formatted.push('.');
        formatted.push_str(fraction);
    }

    let is_zero = integer.bytes().all(|b| b == b'0') && fraction.is_empty();
    if value < 0.0 && !is_zero {
        formatted.insert(0, '-');
    }

    formatted
}

fn group_thousands(digits: &str) -> String {
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (index, ch) in digits.chars().enumerate() {
        if index > 0 && (digits.len() - index) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }
    grouped
}

/// Fixed monthly payment for an amortized loan, rounded to whole dollars.
///
/// The financed amount is `price - down_payment`, floored at zero. A zero
/// interest rate spreads the principal evenly over the term; a zero term
/// makes the whole principal due at once.
pub fn calculate_mortgage(price: f64, down_payment: f64, annual_rate_percent: f64, years: u32) -> f64 {
    let principal = (price - down_payment).max(0.0);
    let monthly_rate = annual_rate_percent / 100.0 / 12.0;
    let payments = f64::from(years) * 12.0;

    if payments == 0.0 {
        return principal.round();
    }

    if monthly_rate == 0.0 {
        return (principal / payments).round();
    }

    let growth = (1.0 + monthly_rate).powf(payments);
    (principal * (monthly_rate * growth) / (growth - 1.0)).round()
}

/// Loan summary produced by the mortgage calculator.
#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct MortgageEstimate {
    pub price: f64,
    pub down_payment: f64,
    pub interest_rate: f64,
    pub years: u32,
    pub loan_amount: f64,
    pub monthly_payment: f64,
    /// Interest paid over the full term at the rounded monthly payment
    pub total_interest: f64,
    pub display: MortgageDisplay,
}

/// Pre-formatted currency strings for [`MortgageEstimate`].
#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct MortgageDisplay {
    pub loan_amount: String,
    pub monthly_payment: String,
    pub total_interest: String,
}

impl MortgageEstimate {
    pub fn compute(price: f64, down_payment: f64, interest_rate: f64, years: u32) -> Self {
        let loan_amount = (price - down_payment).max(0.0);
        let monthly_payment = calculate_mortgage(price, down_payment, interest_rate, years);
        let total_interest = monthly_payment * f64::from(years) * 12.0 - loan_amount;

        Self {
            price,
            down_payment,
            interest_rate,
            years,
            loan_amount,
            monthly_payment,
            total_interest,
            display: MortgageDisplay {
                loan_amount: format_currency(loan_amount),
                monthly_payment: format_currency(monthly_payment),
                total_interest: format_currency(total_interest),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn thirty_year_fixed_matches_amortization_table() {
        assert_eq!(calculate_mortgage(300_000.0, 60_000.0, 4.5, 30), 1216.0);
    }

    #[test]
    fn fifteen_year_loan() {
        // 200k at 6% over 15 years is 1687.71/month
        assert_eq!(calculate_mortgage(250_000.0, 50_000.0, 6.0, 15), 1688.0);
    }

    #[test]
    fn zero_rate_is_linear_over_term() {
        assert_eq!(calculate_mortgage(120_000.0, 0.0, 0.0, 10), 1000.0);
    }

    #[test]
    fn zero_term_makes_principal_due() {
        assert_eq!(calculate_mortgage(100_000.0, 25_000.0, 5.0, 0), 75_000.0);
    }

    #[test]
    fn down_payment_above_price_finances_nothing() {
        assert_eq!(calculate_mortgage(100_000.0, 150_000.0, 5.0, 30), 0.0);
    }

    #[test]
    fn currency_formatting() {
        assert_eq!(format_currency(1216.0), "$1,216");
        assert_eq!(format_currency(1_000_000.0), "$1,000,000");
        assert_eq!(format_currency(999.5), "$1,000");
        assert_eq!(format_currency(0.0), "$0");
        assert_eq!(format_currency(-5000.0), "-$5,000");
        assert_eq!(format_currency(100.0), "$100");
    }

    #[test]
    fn number_formatting() {
        assert_eq!(format_number(2500.0), "2,500");
        assert_eq!(format_number(1234.5678), "1,234.568");
        assert_eq!(format_number(2.5), "2.5");
        assert_eq!(format_number(-1_234_567.0), "-1,234,567");
        assert_eq!(format_number(0.0), "0");
    }

    #[test]
    fn estimate_reports_interest_over_term() {
        let estimate = MortgageEstimate::compute(300_000.0, 60_000.0, 4.5, 30);

        assert_eq!(estimate.loan_amount, 240_000.0);
        assert_eq!(estimate.monthly_payment, 1216.0);
        assert_eq!(estimate.total_interest, 1216.0 * 360.0 - 240_000.0);
        assert_eq!(estimate.display.monthly_payment, "$1,216");
        assert_eq!(estimate.display.loan_amount, "$240,000");
    }
}
