//! Language preference resolution
//!
//! Turns the locale hints of a process (`LANG`, `LANGUAGE`) and an optional
//! explicit override into the ordered list of language codes to search.
//! The resolver is pure: callers snapshot the environment with
//! [`Locale::from_env`] and pass the values in.

use std::env;

/// Base language, always the final fallback
pub const DEFAULT_LANGUAGE: &str = "en";

/// Region-qualified codes that have their own page set
const REGIONAL_CODES: &[&str] = &["pt_BR", "pt_PT", "zh_TW"];

/// Snapshot of the locale environment variables
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Locale {
    pub lang: String,
    pub language: String,
}

impl Locale {
    pub fn new(lang: impl Into<String>, language: impl Into<String>) -> Self {
        Self {
            lang: lang.into(),
            language: language.into(),
        }
    }

    /// Read `LANG` and `LANGUAGE` once
    pub fn from_env() -> Self {
        Self {
            lang: env::var("LANG").unwrap_or_default(),
            language: env::var("LANGUAGE").unwrap_or_default(),
        }
    }
}

/// Resolve the ordered, de-duplicated list of candidate languages
pub fn resolve(option_override: &str, raw_lang: &str, raw_language: &str) -> Vec<String> {
    if !option_override.is_empty() {
        return vec![option_override.to_string()];
    }

    let lang = extract_language_code(raw_lang);
    if lang.is_empty() {
        return vec![DEFAULT_LANGUAGE.to_string()];
    }

    let mut languages: Vec<String> = Vec::new();
    for code in raw_language.split(':').map(extract_language_code) {
        push_unique(&mut languages, code);
    }
    push_unique(&mut languages, lang);

    // "en" must be last, even when LANGUAGE listed it earlier
    languages.retain(|code| code != DEFAULT_LANGUAGE);
    languages.push(DEFAULT_LANGUAGE.to_string());

    languages
}

/// Convenience wrapper over [`resolve`] for a locale snapshot
pub fn resolve_locale(option_override: Option<&str>, locale: &Locale) -> Vec<String> {
    resolve(
        option_override.unwrap_or_default(),
        &locale.lang,
        &locale.language,
    )
}

/// Normalize a locale string such as `ja_JP.UTF-8` into a page language code
///
/// `C`, `POSIX` and the empty string carry no language and yield `""`.
pub fn extract_language_code(raw: &str) -> String {
    let code = raw
        .split(['.', '@'])
        .next()
        .unwrap_or_default()
        .trim();

    if code.is_empty() || code == "C" || code == "POSIX" {
        return String::new();
    }

    if REGIONAL_CODES.contains(&code) {
        return code.to_string();
    }

    let base = code.split('_').next().unwrap_or(code);
    match base {
        // Portuguese pages only exist per region
        "pt" => "pt_PT".to_string(),
        _ => base.to_string(),
    }
}

fn push_unique(languages: &mut Vec<String>, code: String) {
    if !code.is_empty() && !languages.contains(&code) {
        languages.push(code);
    }
}
