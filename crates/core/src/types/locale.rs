//! Explicit localization types.
//!
//! The storefront serves Arabic and English. The active [`Language`] is
//! configuration passed through component construction rather than an
//! ambient global, so any piece of logic that produces customer-facing text
//! takes it as an argument.

use serde::{Deserialize, Serialize};

/// Display language for customer-facing text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    #[default]
    En,
    Ar,
}

impl Language {
    /// Text layout direction for this language.
    #[must_use]
    pub const fn direction(&self) -> Direction {
        match self {
            Self::En => Direction::Ltr,
            Self::Ar => Direction::Rtl,
        }
    }

    /// BCP 47 language tag.
    #[must_use]
    pub const fn tag(&self) -> &'static str {
        match self {
            Self::En => "en",
            Self::Ar => "ar",
        }
    }
}

impl std::str::FromStr for Language {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "en" => Ok(Self::En),
            "ar" => Ok(Self::Ar),
            _ => Err(format!("invalid language: {s}")),
        }
    }
}

/// Text layout direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    Ltr,
    Rtl,
}

/// A bilingual text pair as stored by the remote collections
/// (`name_en`/`name_ar`, `description_en`/`description_ar`, ...).
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct LocalizedText {
    pub en: String,
    pub ar: String,
}

impl LocalizedText {
    /// Build a pair from both translations.
    #[must_use]
    pub fn new(en: impl Into<String>, ar: impl Into<String>) -> Self {
        Self {
            en: en.into(),
            ar: ar.into(),
        }
    }

    /// Resolve the text for a language.
    #[must_use]
    pub fn get(&self, language: Language) -> &str {
        match language {
            Language::En => &self.en,
            Language::Ar => &self.ar,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_direction() {
        assert_eq!(Language::En.direction(), Direction::Ltr);
        assert_eq!(Language::Ar.direction(), Direction::Rtl);
    }

    #[test]
    fn test_localized_text_resolution() {
        let name = LocalizedText::new("T-Shirt", "قميص");
        assert_eq!(name.get(Language::En), "T-Shirt");
        assert_eq!(name.get(Language::Ar), "قميص");
    }

    #[test]
    fn test_language_from_str() {
        assert_eq!("ar".parse::<Language>(), Ok(Language::Ar));
        assert!("fr".parse::<Language>().is_err());
    }
}
