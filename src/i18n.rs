use std::collections::HashMap;

/// Key of the phrase shown when something happened less than a minute ago.
pub const TIME_RECENTLY: &str = "time.recently";

/// Supplies translated UI phrases.
pub trait Translate: Send + Sync {
    /// Returns the phrase for `key` in `language`, if one is known.
    fn translate(&self, language: &str, key: &str) -> Option<String>;
}

/// Built-in phrase catalog keyed by language and then by message key.
#[derive(Debug, Clone)]
pub struct Catalog {
    messages: HashMap<&'static str, HashMap<&'static str, &'static str>>,
}

impl Catalog {
    pub fn new() -> Self {
        let recently = [
            ("en", "recently"),
            ("de", "kürzlich"),
            ("fr", "récemment"),
            ("es", "recientemente"),
            ("nl", "recent"),
            ("pt", "recentemente"),
            ("it", "di recente"),
        ];

        let mut messages: HashMap<&'static str, HashMap<&'static str, &'static str>> =
            HashMap::new();
        for (language, phrase) in recently {
            messages
                .entry(language)
                .or_default()
                .insert(TIME_RECENTLY, phrase);
        }

        Self { messages }
    }
}

impl Default for Catalog {
    fn default() -> Self {
        Self::new()
    }
}

impl Translate for Catalog {
    fn translate(&self, language: &str, key: &str) -> Option<String> {
        self.messages
            .get(language)
            .and_then(|keys| keys.get(key))
            .map(|phrase| (*phrase).to_string())
    }
}

/// Looks up `key` in `language`, then English, then returns the key itself.
pub fn translate_or_key(translator: &dyn Translate, language: &str, key: &str) -> String {
    translator
        .translate(language, key)
        .or_else(|| translator.translate("en", key))
        .unwrap_or_else(|| key.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_catalog_translates_recently() {
        let catalog = Catalog::new();
        assert_eq!(
            catalog.translate("de", TIME_RECENTLY),
            Some("kürzlich".to_string())
        );
        assert_eq!(catalog.translate("de", "time.unknown"), None);
    }

    #[test]
    fn test_translate_or_key_falls_back_to_english() {
        let catalog = Catalog::new();
        assert_eq!(translate_or_key(&catalog, "sv", TIME_RECENTLY), "recently");
    }

    #[test]
    fn test_translate_or_key_falls_back_to_key() {
        let catalog = Catalog::new();
        assert_eq!(translate_or_key(&catalog, "en", "time.never"), "time.never");
    }
}
