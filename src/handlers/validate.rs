use validator::ValidationError;

/// Phone numbers are stored as bare digit strings, no separators.
pub fn digits_only(value: &str) -> Result<(), ValidationError> {
    if !value.is_empty() && value.chars().all(|c| c.is_ascii_digit()) {
        Ok(())
    } else {
        let mut error = ValidationError::new("digits_only");
        error.message = Some("must contain only digits".into());
        Err(error)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_digit_strings() {
        assert!(digits_only("987654321").is_ok());
    }

    #[test]
    fn rejects_separators_and_empty_values() {
        assert!(digits_only("987-654-321").is_err());
        assert!(digits_only("+51987654321").is_err());
        assert!(digits_only("").is_err());
    }
}
