// src/common/i18n.rs

use std::collections::HashMap;

const DEFAULT_LANG: &str = "en";

// (chave, inglês, português)
const MESSAGES: &[(&str, &str, &str)] = &[
    ("validation", "One or more fields are invalid.", "Um ou mais campos são inválidos."),
    ("invalid_bbox", "Malformed bbox: expected west,south,east,north.", "Bbox malformada: esperado west,south,east,north."),
    ("email_exists", "This e-mail is already in use.", "Este e-mail já está em uso."),
    ("invalid_credentials", "Invalid e-mail or password.", "E-mail ou senha inválidos."),
    ("invalid_token", "Missing or invalid authentication token.", "Token de autenticação inválido ou ausente."),
    ("internal_key_rejected", "Admin registration requires a valid internal API key.", "O registro de admin exige uma chave interna válida."),
    ("cross_tenant", "This resource belongs to another institution.", "Este recurso pertence a outra instituição."),
    ("not_found", "Resource not found.", "Recurso não encontrado."),
    ("internal", "An unexpected error occurred.", "Ocorreu um erro inesperado."),
];

/// Mensagens de erro por idioma, carregadas uma vez no start.
#[derive(Debug, Clone)]
pub struct I18nStore {
    messages: HashMap<&'static str, HashMap<&'static str, &'static str>>,
}

impl Default for I18nStore {
    fn default() -> Self {
        let mut en = HashMap::new();
        let mut pt = HashMap::new();
        for (key, en_msg, pt_msg) in MESSAGES {
            en.insert(*key, *en_msg);
            pt.insert(*key, *pt_msg);
        }

        let mut messages = HashMap::new();
        messages.insert("en", en);
        messages.insert("pt", pt);
        Self { messages }
    }
}

impl I18nStore {
    /// Idioma desconhecido ou chave ausente caem para o inglês.
    pub fn translate(&self, lang: &str, key: &str) -> String {
        self.messages
            .get(lang)
            .and_then(|table| table.get(key))
            .or_else(|| self.messages.get(DEFAULT_LANG).and_then(|table| table.get(key)))
            .map(|msg| msg.to_string())
            .unwrap_or_else(|| key.to_string())
    }
}
