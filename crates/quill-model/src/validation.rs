//! Form-level validation rules shared by registration and profile
//! editing.
use chrono::NaiveDate;
use regex::Regex;
use std::sync::LazyLock;
use thiserror::Error;

/// Good enough to catch typos; deliverability is the mail server's
/// problem.
static EMAIL_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    #[allow(clippy::unwrap_used)]
    let regex = Regex::new(r"^[^@\s]+@[^@\s]+\.[^@\s]+$").unwrap();
    regex
});

pub const MIN_PASSWORD_LENGTH: usize = 8;

const MIN_AGE_YEARS: u32 = 1;
const MAX_AGE_YEARS: u32 = 120;

#[derive(Debug, PartialEq, Eq, Error)]
#[error("Expected an age between 1 and 120 years")]
pub struct InvalidBirthday;

/// Validates that the birthday corresponds to an age between 1 and
/// 120 years as of `today`.
pub fn validate_birthday(birthday: NaiveDate, today: NaiveDate) -> Result<(), InvalidBirthday> {
    let Some(age) = today.years_since(birthday) else {
        // birthday in the future
        return Err(InvalidBirthday);
    };

    if (MIN_AGE_YEARS..=MAX_AGE_YEARS).contains(&age) {
        Ok(())
    } else {
        Err(InvalidBirthday)
    }
}

#[must_use]
pub fn is_valid_email(email: &str) -> bool {
    email.len() <= 254 && EMAIL_REGEX.is_match(email)
}

#[must_use]
pub fn is_valid_password(password: &str) -> bool {
    password.chars().count() >= MIN_PASSWORD_LENGTH
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(year: i32, month: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(year, month, day).unwrap()
    }

    #[test]
    fn accepts_ages_between_one_and_hundred_twenty() {
        let today = date(2024, 5, 14);
        assert_eq!(validate_birthday(date(2023, 5, 14), today), Ok(()));
        assert_eq!(validate_birthday(date(1990, 1, 1), today), Ok(()));
        assert_eq!(validate_birthday(date(1904, 5, 14), today), Ok(()));
    }

    #[test]
    fn rejects_newborns_and_methuselahs() {
        let today = date(2024, 5, 14);
        // not a full year old yet
        assert_eq!(
            validate_birthday(date(2023, 12, 1), today),
            Err(InvalidBirthday)
        );
        assert_eq!(
            validate_birthday(date(1900, 1, 1), today),
            Err(InvalidBirthday)
        );
    }

    #[test]
    fn rejects_birthdays_in_the_future() {
        let today = date(2024, 5, 14);
        assert_eq!(
            validate_birthday(date(2025, 1, 1), today),
            Err(InvalidBirthday)
        );
    }

    #[test]
    fn email_validation() {
        assert!(is_valid_email("alice@example.com"));
        assert!(!is_valid_email("alice"));
        assert!(!is_valid_email("alice@example"));
        assert!(!is_valid_email("a lice@example.com"));
    }

    #[test]
    fn password_length() {
        assert!(is_valid_password("longenough"));
        assert!(!is_valid_password("short"));
    }
}
