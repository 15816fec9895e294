/// Format an amount in Indian digit grouping with two decimals.
///
/// ```
/// use contracts::shared::money::format_amount;
/// assert_eq!(format_amount(1234567.5), "12,34,567.50");
/// ```
pub fn format_amount(value: f64) -> String {
    let cents = (value.abs() * 100.0).round() as u64;
    let whole = cents / 100;
    let frac = cents % 100;

    let digits = whole.to_string();
    let grouped = if digits.len() <= 3 {
        digits
    } else {
        let (head, tail) = digits.split_at(digits.len() - 3);
        // Lakh/crore grouping: pairs before the last three digits.
        let mut parts: Vec<&str> = Vec::new();
        let mut rest = head;
        while rest.len() > 2 {
            let (a, b) = rest.split_at(rest.len() - 2);
            parts.push(b);
            rest = a;
        }
        if !rest.is_empty() {
            parts.push(rest);
        }
        parts.reverse();
        format!("{},{}", parts.join(","), tail)
    };

    let sign = if value < 0.0 && cents != 0 { "-" } else { "" };
    format!("{sign}{grouped}.{frac:02}")
}

/// Amount with the rupee sign, e.g. `₹1,250.00`.
pub fn format_rupees(value: f64) -> String {
    let formatted = format_amount(value);
    match formatted.strip_prefix('-') {
        Some(rest) => format!("-₹{rest}"),
        None => format!("₹{formatted}"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_amount() {
        assert_eq!(format_amount(0.0), "0.00");
        assert_eq!(format_amount(999.0), "999.00");
        assert_eq!(format_amount(1000.0), "1,000.00");
        assert_eq!(format_amount(100000.0), "1,00,000.00");
        assert_eq!(format_amount(12345678.9), "1,23,45,678.90");
        assert_eq!(format_amount(-2500.456), "-2,500.46");
    }

    #[test]
    fn test_format_rupees() {
        assert_eq!(format_rupees(0.0), "₹0.00");
        assert_eq!(format_rupees(-0.001), "₹0.00");
        assert_eq!(format_rupees(1500.0), "₹1,500.00");
        assert_eq!(format_rupees(-20.0), "-₹20.00");
    }
}
