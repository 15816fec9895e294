//! Client-side form checks. A failure here means no request is sent.

use thiserror::Error;

use super::period;

#[derive(Debug, Clone, Error, PartialEq)]
pub enum ValidationError {
    #[error("{0} is required")]
    Required(&'static str),
    #[error("{0} must be a number")]
    NotANumber(&'static str),
    #[error("{0} must be greater than zero")]
    NotPositive(&'static str),
    #[error("{0} cannot be negative")]
    Negative(&'static str),
    #[error("{0} is not a valid date")]
    BadDate(&'static str),
    #[error("{0} is not a valid time (HH:MM)")]
    BadTime(&'static str),
    #[error("Select a bank account for {0} payments")]
    BankAccountRequired(&'static str),
    #[error("Mobile number must have 10 digits")]
    BadMobile,
    #[error("Out time cannot be earlier than in time")]
    OutBeforeIn,
}

pub fn required(field: &'static str, value: &str) -> Result<String, ValidationError> {
    let v = value.trim();
    if v.is_empty() {
        Err(ValidationError::Required(field))
    } else {
        Ok(v.to_string())
    }
}

pub fn required_id(field: &'static str, value: Option<i64>) -> Result<i64, ValidationError> {
    value.ok_or(ValidationError::Required(field))
}

fn parse_number(field: &'static str, value: &str) -> Result<f64, ValidationError> {
    let v = required(field, value)?;
    let n = v
        .replace(',', "")
        .parse::<f64>()
        .map_err(|_| ValidationError::NotANumber(field))?;
    if n.is_finite() {
        Ok(n)
    } else {
        Err(ValidationError::NotANumber(field))
    }
}

/// Numeric and strictly greater than zero.
pub fn positive_amount(field: &'static str, value: &str) -> Result<f64, ValidationError> {
    let n = parse_number(field, value)?;
    if n <= 0.0 {
        return Err(ValidationError::NotPositive(field));
    }
    Ok(n)
}

/// Numeric and zero or more.
pub fn non_negative(field: &'static str, value: &str) -> Result<f64, ValidationError> {
    let n = parse_number(field, value)?;
    if n < 0.0 {
        return Err(ValidationError::Negative(field));
    }
    Ok(n)
}

/// Any accepted date layout, returned as `YYYY-MM-DD`.
pub fn date(field: &'static str, value: &str) -> Result<String, ValidationError> {
    let v = required(field, value)?;
    period::to_iso(&v).ok_or(ValidationError::BadDate(field))
}

/// Optional `HH:MM` (seconds tolerated and dropped).
pub fn optional_time(field: &'static str, value: &str) -> Result<Option<String>, ValidationError> {
    let v = value.trim();
    if v.is_empty() {
        return Ok(None);
    }
    chrono::NaiveTime::parse_from_str(v, "%H:%M")
        .or_else(|_| chrono::NaiveTime::parse_from_str(v, "%H:%M:%S"))
        .map(|t| Some(t.format("%H:%M").to_string()))
        .map_err(|_| ValidationError::BadTime(field))
}

pub fn mobile(value: &str) -> Result<String, ValidationError> {
    let digits: String = value.chars().filter(|c| c.is_ascii_digit()).collect();
    let digits = match digits.len() {
        12 if digits.starts_with("91") => digits[2..].to_string(),
        _ => digits,
    };
    if value.trim().is_empty() {
        return Err(ValidationError::Required("Mobile"));
    }
    if digits.len() != 10 {
        return Err(ValidationError::BadMobile);
    }
    Ok(digits)
}

pub fn optional_text(value: &str) -> Option<String> {
    let v = value.trim();
    (!v.is_empty()).then(|| v.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_positive_amount() {
        assert_eq!(positive_amount("Amount", "150.50"), Ok(150.5));
        assert_eq!(positive_amount("Amount", "1,200"), Ok(1200.0));
        assert_eq!(
            positive_amount("Amount", "0"),
            Err(ValidationError::NotPositive("Amount"))
        );
        assert_eq!(
            positive_amount("Amount", "-5"),
            Err(ValidationError::NotPositive("Amount"))
        );
        assert_eq!(
            positive_amount("Amount", "abc"),
            Err(ValidationError::NotANumber("Amount"))
        );
        assert_eq!(
            positive_amount("Amount", "  "),
            Err(ValidationError::Required("Amount"))
        );
    }

    #[test]
    fn test_date_normalizes() {
        assert_eq!(date("Date", "15-03-2024").as_deref(), Ok("2024-03-15"));
        assert_eq!(date("Date", "31-02-2024"), Err(ValidationError::BadDate("Date")));
    }

    #[test]
    fn test_optional_time() {
        assert_eq!(optional_time("In", ""), Ok(None));
        assert_eq!(optional_time("In", "09:05:00"), Ok(Some("09:05".into())));
        assert_eq!(optional_time("In", "25:00"), Err(ValidationError::BadTime("In")));
    }

    #[test]
    fn test_mobile() {
        assert_eq!(mobile("98765 43210").as_deref(), Ok("9876543210"));
        assert_eq!(mobile("+91 98765 43210").as_deref(), Ok("9876543210"));
        assert_eq!(mobile("12345"), Err(ValidationError::BadMobile));
        assert_eq!(mobile(""), Err(ValidationError::Required("Mobile")));
    }
}
