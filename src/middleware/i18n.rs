// src/middleware/i18n.rs

use axum::extract::FromRequestParts;
use axum::http::{header, request::Parts};

const DEFAULT_LANG: &str = "en";

// Extrator de idioma (a partir do Accept-Language)
#[derive(Debug, Clone, PartialEq)]
pub struct Locale(pub String);

impl Default for Locale {
    fn default() -> Self {
        Locale(DEFAULT_LANG.to_string())
    }
}

impl Locale {
    /// "pt-BR,pt;q=0.9,en;q=0.8" -> "pt"
    pub fn from_header(header_str: &str) -> Self {
        accept_language::parse(header_str)
            .first()
            .and_then(|tag| tag.split('-').next())
            .filter(|lang| !lang.is_empty())
            .map(|lang| Locale(lang.to_lowercase()))
            .unwrap_or_default()
    }
}

impl<S> FromRequestParts<S> for Locale
where
    S: Send + Sync,
{
    type Rejection = std::convert::Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let locale = parts
            .headers
            .get(header::ACCEPT_LANGUAGE)
            .and_then(|value| value.to_str().ok())
            .map(Locale::from_header)
            .unwrap_or_default();

        Ok(locale)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn picks_primary_subtag_of_preferred_language() {
        assert_eq!(Locale::from_header("pt-BR,pt;q=0.9,en;q=0.8"), Locale("pt".into()));
        assert_eq!(Locale::from_header("en;q=0.5, pt;q=0.9"), Locale("pt".into()));
    }

    #[test]
    fn empty_header_defaults_to_english() {
        assert_eq!(Locale::from_header(""), Locale::default());
    }
}
