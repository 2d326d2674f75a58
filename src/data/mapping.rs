//! Category / Language Mapping Module
//! Fixed table linking each review category to its per-language spreadsheet column.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum MappingError {
    #[error("Unknown language code: {0} (expected TR or EN)")]
    UnknownLanguage(String),
}

/// Language in which a category column is written.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Language {
    #[default]
    #[serde(rename = "TR")]
    Turkish,
    #[serde(rename = "EN")]
    English,
}

impl Language {
    pub const ALL: [Language; 2] = [Language::Turkish, Language::English];

    /// Two-letter code used in the spreadsheet headers.
    pub fn code(self) -> &'static str {
        match self {
            Language::Turkish => "TR",
            Language::English => "EN",
        }
    }

    /// Human readable label for selectors.
    pub fn label(self) -> &'static str {
        match self {
            Language::Turkish => "Turkish",
            Language::English => "English",
        }
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

impl FromStr for Language {
    type Err = MappingError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "TR" => Ok(Language::Turkish),
            "EN" => Ok(Language::English),
            other => Err(MappingError::UnknownLanguage(other.to_string())),
        }
    }
}

/// One row of the mapping: a logical category and its two column names.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CategoryColumns {
    pub category: &'static str,
    pub turkish: &'static str,
    pub english: &'static str,
}

impl CategoryColumns {
    pub fn column(&self, language: Language) -> &'static str {
        match language {
            Language::Turkish => self.turkish,
            Language::English => self.english,
        }
    }
}

/// Category mapping in display order. Ties in rankings resolve to the earlier entry.
pub const CATEGORY_LANGUAGE_MAP: [CategoryColumns; 8] = [
    CategoryColumns {
        category: "User Interface Issues",
        turkish: "Kullanıcı Arayüzü Sorunları (TR)",
        english: "User Interface Issues (EN)",
    },
    CategoryColumns {
        category: "Performance Problems",
        turkish: "Performans Sorunları (TR)",
        english: "Performance Problems (EN)",
    },
    CategoryColumns {
        category: "Job Search Functionality",
        turkish: "İş Arama İşlevselliği (TR)",
        english: "Job Search Functionality (EN)",
    },
    CategoryColumns {
        category: "Notification Issues",
        turkish: "Bildirim Sorunları (TR)",
        english: "Notification Issues (EN)",
    },
    CategoryColumns {
        category: "Application Process",
        turkish: "Başvuru Süreci (TR)",
        english: "Application Process (EN)",
    },
    CategoryColumns {
        category: "Profile Management",
        turkish: "Profil Yönetimi (TR)",
        english: "Profile Management (EN)",
    },
    CategoryColumns {
        category: "Customer Support",
        turkish: "Müşteri Desteği (TR)",
        english: "Customer Support (EN)",
    },
    CategoryColumns {
        category: "Account Management",
        turkish: "Hesap Yönetimi (TR)",
        english: "Account Management (EN)",
    },
];

/// Category names in display order.
pub fn categories() -> impl Iterator<Item = &'static str> {
    CATEGORY_LANGUAGE_MAP.iter().map(|entry| entry.category)
}

/// Look up the mapping entry for a category name.
pub fn find_category(category: &str) -> Option<&'static CategoryColumns> {
    CATEGORY_LANGUAGE_MAP
        .iter()
        .find(|entry| entry.category == category)
}

/// Resolve a category and language code pair to its column name.
///
/// Returns `None` for anything outside the table; callers treat that as an
/// empty selection.
pub fn resolve_column(category: &str, language: &str) -> Option<&'static str> {
    let language = language.parse::<Language>().ok()?;
    find_category(category).map(|entry| entry.column(language))
}

/// Reverse lookup from a column name to its category.
pub fn category_for_column(column: &str) -> Option<&'static str> {
    flattened().find(|(col, _)| *col == column).map(|(_, cat)| cat)
}

/// Every (column, category) pair, Turkish column before English per category.
pub fn flattened() -> impl Iterator<Item = (&'static str, &'static str)> {
    CATEGORY_LANGUAGE_MAP.iter().flat_map(|entry| {
        Language::ALL
            .into_iter()
            .map(move |lang| (entry.column(lang), entry.category))
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn every_pair_resolves() {
        for category in categories() {
            for lang in Language::ALL {
                let column = resolve_column(category, lang.code()).unwrap();
                assert!(column.ends_with(&format!("({})", lang.code())));
                assert_eq!(category_for_column(column), Some(category));
            }
        }
    }

    #[test]
    fn unknown_pairs_do_not_resolve() {
        assert_eq!(resolve_column("Billing", "EN"), None);
        assert_eq!(resolve_column("Customer Support", "DE"), None);
        assert_eq!(resolve_column("customer support", "EN"), None);
        assert_eq!(resolve_column("Customer Support", "en"), None);
    }

    #[test]
    fn flattened_covers_sixteen_unique_columns() {
        let columns: HashSet<_> = flattened().map(|(col, _)| col).collect();
        assert_eq!(columns.len(), 16);
        assert_eq!(
            flattened().next(),
            Some(("Kullanıcı Arayüzü Sorunları (TR)", "User Interface Issues"))
        );
    }

    #[test]
    fn language_codes_round_trip_through_serde() {
        assert_eq!(serde_json::to_string(&Language::English).unwrap(), "\"EN\"");
        let lang: Language = serde_json::from_str("\"TR\"").unwrap();
        assert_eq!(lang, Language::Turkish);
        assert!("tr".parse::<Language>().is_err());
    }

    #[test]
    fn language_defaults_to_turkish_and_rejects_unknown_codes() {
        assert_eq!(Language::default(), Language::Turkish);
        assert_eq!(
            "DE".parse::<Language>(),
            Err(MappingError::UnknownLanguage("DE".to_string()))
        );
        assert_eq!(find_category("Billing"), None);
    }
}
