use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;

pub const PASSPORT_LENGTH: usize = 8;
pub const PHONE_LENGTH: usize = 10;

/// Letters barred from the leading position of an Indian passport number.
const PASSPORT_EXCLUDED_LETTERS: [char; 3] = ['Q', 'X', 'Z'];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Field {
    Name,
    Passport,
    Email,
    Phone,
    TravelDate,
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Field::Name => "passenger name",
            Field::Passport => "passport number",
            Field::Email => "email address",
            Field::Phone => "mobile number",
            Field::TravelDate => "travel date",
        };
        write!(f, "{}", name)
    }
}

/// Field-level format failure. Recoverable by re-entry; never consults
/// inventory state.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error, Serialize, Deserialize)]
#[error("invalid {field}: {reason}")]
pub struct FieldError {
    pub field: Field,
    pub reason: String,
}

impl FieldError {
    fn new(field: Field, reason: impl Into<String>) -> Self {
        Self {
            field,
            reason: reason.into(),
        }
    }
}

/// Letters and spaces only, non-empty.
pub fn validate_name(name: &str) -> Result<(), FieldError> {
    let trimmed = name.trim();
    if trimmed.is_empty() {
        return Err(FieldError::new(Field::Name, "passenger name is required"));
    }
    if !trimmed
        .chars()
        .all(|c| c.is_ascii_alphabetic() || c == ' ')
    {
        return Err(FieldError::new(
            Field::Name,
            "only alphabets and spaces allowed",
        ));
    }
    Ok(())
}

/// One uppercase letter (Q, X and Z are not issued) followed by seven digits.
pub fn validate_passport(passport: &str) -> Result<(), FieldError> {
    let invalid = || {
        FieldError::new(
            Field::Passport,
            "expected one uppercase letter followed by seven digits (e.g. A1234567)",
        )
    };

    if passport.chars().count() != PASSPORT_LENGTH {
        return Err(invalid());
    }
    let mut chars = passport.chars();
    let first = chars.next().ok_or_else(invalid)?;
    if !first.is_ascii_uppercase() || PASSPORT_EXCLUDED_LETTERS.contains(&first) {
        return Err(invalid());
    }
    if !chars.all(|c| c.is_ascii_digit()) {
        return Err(invalid());
    }
    Ok(())
}

/// An `@` with a `.` somewhere after it.
pub fn validate_email(email: &str) -> Result<(), FieldError> {
    let at = email.find('@');
    let dot = email.rfind('.');
    match (at, dot) {
        (Some(at), Some(dot)) if at < dot => Ok(()),
        _ => Err(FieldError::new(Field::Email, "invalid email format")),
    }
}

/// Exactly ten digits, leading digit 6-9, rejecting degenerate sequences
/// (all one digit, or a straight ascending/descending run).
pub fn validate_phone(phone: &str) -> Result<(), FieldError> {
    let digits: Vec<u8> = phone
        .chars()
        .filter_map(|c| c.to_digit(10).map(|d| d as u8))
        .collect();
    if digits.len() != PHONE_LENGTH || phone.chars().count() != PHONE_LENGTH {
        return Err(FieldError::new(
            Field::Phone,
            "expected exactly ten digits",
        ));
    }
    if !(6..=9).contains(&digits[0]) {
        return Err(FieldError::new(
            Field::Phone,
            "mobile numbers start with 6, 7, 8 or 9",
        ));
    }
    if digits.iter().all(|&d| d == digits[0]) {
        return Err(FieldError::new(Field::Phone, "not a real mobile number"));
    }
    // Runs wrap at 10, so 8-9-0-1 still counts as consecutive.
    let ascending = digits.windows(2).all(|w| w[1] == (w[0] + 1) % 10);
    let descending = digits.windows(2).all(|w| w[0] == (w[1] + 1) % 10);
    if ascending || descending {
        return Err(FieldError::new(Field::Phone, "not a real mobile number"));
    }
    Ok(())
}

/// Travel date must not lie before `today`.
pub fn validate_travel_date(date: NaiveDate, today: NaiveDate) -> Result<(), FieldError> {
    if date < today {
        return Err(FieldError::new(
            Field::TravelDate,
            "departure date cannot be in the past",
        ));
    }
    Ok(())
}

/// Run every per-field check and collect all failures, mirroring the
/// per-field reporting a form layer expects.
pub fn validate_passenger_fields(
    name: &str,
    passport: &str,
    email: &str,
    phone: &str,
) -> Result<(), Vec<FieldError>> {
    let errors: Vec<FieldError> = [
        validate_name(name),
        validate_passport(passport),
        validate_email(email),
        validate_phone(phone),
    ]
    .into_iter()
    .filter_map(Result::err)
    .collect();

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}
