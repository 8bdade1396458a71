//! Reference string generation.
//!
//! Booking references are `AV<millis><5 uppercase alphanumerics>`,
//! payment references are `pay_<millis><9 lowercase alphanumerics>`.
//! The millisecond prefix plus random suffix keeps collisions
//! improbable; the database's unique constraint on `reference` is the
//! final arbiter.

use chrono::Utc;
use rand::Rng;
use rand::distr::Alphanumeric;

/// Generate a fresh booking reference.
pub fn booking_reference() -> String {
    format!("AV{}{}", Utc::now().timestamp_millis(), random_suffix(5).to_uppercase())
}

/// Generate a fresh payment reference.
pub fn payment_reference() -> String {
    format!(
        "pay_{}{}",
        Utc::now().timestamp_millis(),
        random_suffix(9).to_lowercase()
    )
}

fn random_suffix(len: usize) -> String {
    rand::rng()
        .sample_iter(&Alphanumeric)
        .take(len)
        .map(char::from)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_booking_reference_format() {
        let reference = booking_reference();
        assert!(reference.starts_with("AV"));
        assert!(reference.len() > 15);
        assert!(
            reference[2..]
                .chars()
                .all(|c| c.is_ascii_digit() || c.is_ascii_uppercase())
        );
    }

    #[test]
    fn test_payment_reference_format() {
        let reference = payment_reference();
        assert!(reference.starts_with("pay_"));
        assert!(
            reference[4..]
                .chars()
                .all(|c| c.is_ascii_digit() || c.is_ascii_lowercase())
        );
    }

    #[test]
    fn test_references_are_unique() {
        let a = booking_reference();
        let b = booking_reference();
        assert_ne!(a, b);
    }
}
