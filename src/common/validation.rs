// src/common/validation.rs

use validator::ValidationError;

// ---
// Validações Customizadas
// ---

/// `length(min = 1)` aceita "   "; o nome é gravado já com trim, então é esse que conta.
pub fn validate_not_blank(value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        let mut err = ValidationError::new("blank");
        err.message = Some("O nome é obrigatório.".into());
        return Err(err);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_empty_and_whitespace_only() {
        assert!(validate_not_blank("").is_err());
        assert!(validate_not_blank("   ").is_err());
        assert!(validate_not_blank("\t\n").is_err());
    }

    #[test]
    fn accepts_text_with_surrounding_spaces() {
        assert!(validate_not_blank("  Ana ").is_ok());
    }
}
