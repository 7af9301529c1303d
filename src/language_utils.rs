use anyhow::{anyhow, Result};
use isolang::Language;
use once_cell::sync::Lazy;
use regex::Regex;

/// Language utilities for locale tag handling
///
/// The recognizer receives the tag exactly as given by the user; these helpers
/// only check that it names a real language so typos fail before any audio is
/// processed.
static TAG_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^([A-Za-z]{2,3})(?:[-_]([A-Za-z]{4}))?(?:[-_]([A-Za-z]{2}|\d{3}))?$").unwrap()
});

/// A parsed `language[-Script][-REGION]` tag
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LanguageTag {
    /// Lowercase ISO 639-1 or 639-3 code
    pub language: String,
    /// Titlecase ISO 15924 script, as in `cmn-Hans-CN`
    pub script: Option<String>,
    /// Uppercase ISO 3166 alpha-2 or UN M.49 numeric region
    pub region: Option<String>,
}

impl LanguageTag {
    /// The isolang language for the primary subtag
    pub fn iso_language(&self) -> Option<Language> {
        match self.language.len() {
            2 => Language::from_639_1(&self.language),
            3 => Language::from_639_3(&self.language),
            _ => None,
        }
    }
}

impl std::fmt::Display for LanguageTag {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.language)?;
        if let Some(script) = &self.script {
            write!(f, "-{}", script)?;
        }
        if let Some(region) = &self.region {
            write!(f, "-{}", region)?;
        }
        Ok(())
    }
}

/// Parse and validate a locale tag such as `en`, `en-US`, `es-419` or `yue-Hant-HK`.
///
/// Only the primary subtag is checked against ISO 639.
pub fn parse_language_tag(tag: &str) -> Result<LanguageTag> {
    let trimmed = tag.trim();
    let caps = TAG_REGEX
        .captures(trimmed)
        .ok_or_else(|| anyhow!("Invalid language tag: {}", tag))?;

    let parsed = LanguageTag {
        language: caps[1].to_lowercase(),
        script: caps.get(2).map(|m| titlecase(m.as_str())),
        region: caps.get(3).map(|m| m.as_str().to_uppercase()),
    };

    if parsed.iso_language().is_none() {
        return Err(anyhow!("Unknown language code '{}' in tag: {}", parsed.language, tag));
    }

    Ok(parsed)
}

fn titlecase(subtag: &str) -> String {
    let lower = subtag.to_lowercase();
    let mut chars = lower.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// Get the English language name for a tag
pub fn get_language_name(tag: &str) -> Result<String> {
    let parsed = parse_language_tag(tag)?;
    let lang = parsed
        .iso_language()
        .ok_or_else(|| anyhow!("Failed to get language from tag: {}", tag))?;

    Ok(lang.to_name().to_string())
}
