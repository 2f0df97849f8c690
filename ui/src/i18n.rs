//! Localization for `moodtrack-ui`.
//!
//! Fluent bundles live under `i18n/<lang>/moodtrack_ui.ftl` and are embedded
//! with `rust-embed`; `i18n-embed` picks the best match for the OS (desktop,
//! mobile) or `navigator.languages` (web), falling back to `en-US`.
//!
//! ```ignore
//! crate::i18n::init(); // idempotent
//! let label = crate::t!("nav-history");
//! let saved = crate::t!("history-count", count = 12);
//! ```
//!
//! Adding a locale: copy `en-US/moodtrack_ui.ftl` into a new folder, translate
//! the values (keep the ids and placeholders), and register it in the
//! completeness tests.
use std::sync::Once;

use api::Metric;
use dioxus::prelude::{try_use_context, Signal};
use i18n_embed::fluent::FluentLanguageLoader;
use once_cell::sync::Lazy;
use rust_embed::Embed;
use tracing::{debug, warn};
use unic_langid::LanguageIdentifier;

use crate::entry::Period;

pub use i18n_embed_fl::fl; // Re-export for convenience.

/// `fl!` against the shared [`LOADER`]: `t!("nav-entry")`,
/// `t!("history-count", count = 3)`.
#[macro_export]
macro_rules! t {
    ($key:literal) => {
        $crate::i18n::fl!(&*$crate::i18n::LOADER, $key)
    };
    ($key:literal, $( $arg:ident = $value:expr ),+ $(,)?) => {
        $crate::i18n::fl!(&*$crate::i18n::LOADER, $key, $( $arg = $value ),+ )
    };
}

/// Fluent domain; every locale folder holds `{DOMAIN}.ftl`.
const DOMAIN: &str = "moodtrack_ui";

#[derive(Embed)]
#[folder = "i18n"]
struct Localizations;

/// Global language loader used with the `fl!` macro.
pub static LOADER: Lazy<FluentLanguageLoader> = Lazy::new(|| {
    let fallback: LanguageIdentifier = "en-US".parse().unwrap_or_default();
    FluentLanguageLoader::new(DOMAIN, fallback)
});

static INIT: Once = Once::new();

/// Initialize i18n (idempotent).
pub fn init() {
    INIT.call_once(|| {
        let requested = requested_languages();
        match i18n_embed::select(&*LOADER, &Localizations, &requested) {
            Ok(selected) => debug!(?selected, "localization ready"),
            Err(err) => warn!(error = %err, "language selection failed; keeping fallback"),
        }
    });
}

/// Switch language at runtime. If `tag` cannot be parsed it is ignored (Ok returned).
pub fn set_language(tag: &str) -> Result<(), i18n_embed::I18nEmbedError> {
    let lang: LanguageIdentifier = match tag.parse() {
        Ok(l) => l,
        Err(_) => return Ok(()), // Silently ignore invalid tags.
    };
    i18n_embed::select(&*LOADER, &Localizations, &[lang]).map(|_| ())
}

/// Subscribe the calling component to the shell's language signal (if any)
/// and return the current tag. Render it into a hidden node so a language
/// switch re-renders the page.
pub fn use_language_marker() -> String {
    try_use_context::<Signal<String>>()
        .map(|code| code())
        .unwrap_or_default()
}

/// Embedded language tags, sorted.
pub fn available_languages() -> Vec<String> {
    let mut langs = Localizations::iter()
        .filter_map(|path| path.split('/').next().map(|s| s.to_string()))
        .collect::<Vec<_>>();
    langs.sort();
    langs.dedup();
    langs
}

/// Native name of a language tag for the picker; unknown tags show as-is.
pub fn language_name(tag: &str) -> String {
    match tag {
        "en-US" => "English".to_string(),
        "es-ES" => "Español".to_string(),
        "fr-FR" => "Français".to_string(),
        other => other.to_string(),
    }
}

pub fn tr_metric(metric: Metric) -> String {
    match metric {
        Metric::Mood => crate::t!("metric-mood"),
        Metric::Energy => crate::t!("metric-energy"),
        Metric::Anxiety => crate::t!("metric-anxiety"),
    }
}

pub fn tr_period(period: Period) -> String {
    match period {
        Period::Morning => crate::t!("period-morning"),
        Period::Noon => crate::t!("period-noon"),
        Period::Afternoon => crate::t!("period-afternoon"),
        Period::Evening => crate::t!("period-evening"),
    }
}

#[cfg(target_arch = "wasm32")]
fn requested_languages() -> Vec<LanguageIdentifier> {
    i18n_embed::WebLanguageRequester::requested_languages()
}

#[cfg(not(target_arch = "wasm32"))]
fn requested_languages() -> Vec<LanguageIdentifier> {
    i18n_embed::DesktopLanguageRequester::requested_languages()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::i18n::fl;

    #[test]
    fn shipped_languages_are_embedded() {
        let langs = available_languages();
        for tag in ["en-US", "es-ES", "fr-FR"] {
            assert!(langs.iter().any(|l| l == tag), "{tag} missing");
            assert_ne!(language_name(tag), tag);
        }
    }

    #[test]
    fn basic_lookup_works() {
        init();
        let s = fl!(&*LOADER, "nav-history");
        assert_eq!(s, "History");
    }

    #[test]
    fn dynamic_language_switch_reverts_on_failure() {
        init();
        let before = fl!(&*LOADER, "nav-entry");
        let _ = set_language("not a tag!");
        let after = fl!(&*LOADER, "nav-entry");
        assert_eq!(before, after);
    }
}
