//! Language context
//!
//! Keeps the active UI language, its text direction and the string tables.
//! Table contents are supplied by the caller.

use std::collections::HashMap;

use serde::Deserialize;

use crate::persistence::Gateway;
use crate::platform::KeyValueStore;

/// UI language
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    #[default]
    En,
    Ar,
}

/// Text direction of a language
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextDirection {
    Ltr,
    Rtl,
}

impl TextDirection {
    /// Value for the HTML `dir` attribute
    pub fn as_str(&self) -> &'static str {
        match self {
            TextDirection::Ltr => "ltr",
            TextDirection::Rtl => "rtl",
        }
    }
}

impl Language {
    pub const ALL: [Language; 2] = [Language::En, Language::Ar];

    /// Two-letter code, also the HTML `lang` attribute
    pub fn code(&self) -> &'static str {
        match self {
            Language::En => "en",
            Language::Ar => "ar",
        }
    }

    pub fn from_code(code: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|l| l.code() == code)
    }

    pub fn direction(&self) -> TextDirection {
        match self {
            Language::En => TextDirection::Ltr,
            Language::Ar => TextDirection::Rtl,
        }
    }
}

/// Per-language string tables
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(transparent)]
pub struct Translations {
    tables: HashMap<Language, HashMap<String, String>>,
}

impl Translations {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse `{"en": {"key": "text", ...}, "ar": {...}}`
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    pub fn insert(&mut self, language: Language, key: impl Into<String>, text: impl Into<String>) {
        self.tables
            .entry(language)
            .or_default()
            .insert(key.into(), text.into());
    }

    /// Text for `key` in `language`, or the key itself when there is none
    pub fn translate<'a>(&'a self, language: Language, key: &'a str) -> &'a str {
        self.tables
            .get(&language)
            .and_then(|table| table.get(key))
            .map(String::as_str)
            .unwrap_or(key)
    }
}

/// Active language plus tables
#[derive(Debug, Clone, Default)]
pub struct LanguageContext {
    language: Language,
    translations: Translations,
}

impl LanguageContext {
    pub fn new(translations: Translations) -> Self {
        Self {
            language: Language::default(),
            translations,
        }
    }

    /// Start from the saved preference (English when none)
    pub fn restore<S: KeyValueStore>(translations: Translations, gateway: &Gateway<S>) -> Self {
        Self {
            language: gateway.get_language(),
            translations,
        }
    }

    pub fn language(&self) -> Language {
        self.language
    }

    pub fn direction(&self) -> TextDirection {
        self.language.direction()
    }

    /// Switch language and persist the choice
    pub fn set_language<S: KeyValueStore>(&mut self, language: Language, gateway: &Gateway<S>) {
        self.language = language;
        gateway.save_language(language);
        log::info!("Language set to {}", language.code());
    }

    pub fn t<'a>(&'a self, key: &'a str) -> &'a str {
        self.translations.translate(self.language, key)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::platform::MemoryStore;

    fn tables() -> Translations {
        Translations::from_json(
            r#"{
                "en": {"nav.notes": "Notes", "priority.high": "High"},
                "ar": {"nav.notes": "ملاحظات"}
            }"#,
        )
        .unwrap()
    }

    #[test]
    fn test_direction() {
        assert_eq!(Language::En.direction(), TextDirection::Ltr);
        assert_eq!(Language::Ar.direction().as_str(), "rtl");
    }

    #[test]
    fn test_from_code() {
        assert_eq!(Language::from_code("ar"), Some(Language::Ar));
        assert_eq!(Language::from_code("AR"), None);
        assert_eq!(Language::from_code("fr"), None);
    }

    #[test]
    fn test_translate_falls_back_to_key() {
        let t = tables();
        assert_eq!(t.translate(Language::Ar, "nav.notes"), "ملاحظات");
        assert_eq!(t.translate(Language::Ar, "priority.high"), "priority.high");
        assert_eq!(t.translate(Language::En, "missing.key"), "missing.key");
    }

    #[test]
    fn test_translations_reject_unknown_language() {
        assert!(Translations::from_json(r#"{"fr": {}}"#).is_err());
    }

    #[test]
    fn test_insert() {
        let mut t = Translations::new();
        t.insert(Language::En, "app.title", "Muslim Task Manager");
        assert_eq!(t.translate(Language::En, "app.title"), "Muslim Task Manager");
    }

    #[test]
    fn test_set_language_persists() {
        let gateway = Gateway::new(MemoryStore::new());
        let mut ctx = LanguageContext::restore(tables(), &gateway);
        assert_eq!(ctx.language(), Language::En);
        assert_eq!(ctx.t("nav.notes"), "Notes");

        ctx.set_language(Language::Ar, &gateway);
        assert_eq!(ctx.direction(), TextDirection::Rtl);
        assert_eq!(ctx.t("nav.notes"), "ملاحظات");

        let restored = LanguageContext::restore(tables(), &gateway);
        assert_eq!(restored.language(), Language::Ar);
    }
}
