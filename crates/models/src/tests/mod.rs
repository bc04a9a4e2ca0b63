/// CRUD operations tests for all models
pub mod crud_tests;

/// Pure validation helpers (no database required)
pub mod validation_tests {
    use crate::{account, appointment, service};

    #[test]
    fn email_normalization_lowercases_and_trims() {
        assert_eq!(account::normalize_email("  A@B.Com "), "a@b.com");
    }

    #[test]
    fn email_validation_accepts_plain_addresses() {
        assert!(account::validate_email("owner@example.com").is_ok());
        assert!(account::validate_email("a.b+c@sub.example.org").is_ok());
    }

    #[test]
    fn email_validation_rejects_malformed() {
        for bad in ["", "no-at.example.com", "x@", "@example.com", "a b@c.de", "x@nodot"] {
            assert!(account::validate_email(bad).is_err(), "accepted {bad:?}");
        }
    }

    #[test]
    fn password_minimum_length_is_six() {
        assert!(account::validate_password("12345").is_err());
        assert!(account::validate_password("123456").is_ok());
    }

    #[test]
    fn business_name_needs_two_chars_after_trim() {
        assert!(account::validate_business_name(" a ").is_err());
        assert!(account::validate_business_name("Jo").is_ok());
    }

    #[test]
    fn price_rejects_negative_and_non_finite() {
        assert!(service::validate_price(-0.01).is_err());
        assert!(service::validate_price(f64::NAN).is_err());
        assert!(service::validate_price(0.0).is_ok());
        assert!(service::validate_price(25.0).is_ok());
    }

    #[test]
    fn duration_must_be_positive() {
        assert!(appointment::validate_duration(0).is_err());
        assert!(appointment::validate_duration(-5).is_err());
        assert!(appointment::validate_duration(30).is_ok());
    }
}
