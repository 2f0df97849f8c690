use std::collections::{BTreeMap, BTreeSet};
use std::fs;
use std::path::{Path, PathBuf};

const FTL_FILENAME: &str = "moodtrack_ui.ftl";
const FALLBACK: &str = "en-US";

fn crate_root() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
}

fn is_message_id(id: &str) -> bool {
    !id.is_empty() && id.chars().all(|c| matches!(c, 'a'..='z' | '0'..='9' | '-'))
}

/// Message id → set of `$variables` used in its value. Terms (`-id`),
/// comments and attribute lines are ignored.
fn parse_messages(content: &str) -> BTreeMap<String, BTreeSet<String>> {
    content
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && !line.starts_with('#') && !line.starts_with('-'))
        .filter_map(|line| line.split_once('='))
        .filter(|(id, _)| is_message_id(id.trim()))
        .map(|(id, value)| (id.trim().to_string(), variables(value)))
        .collect()
}

fn variables(value: &str) -> BTreeSet<String> {
    value
        .split('$')
        .skip(1)
        .map(|rest| {
            rest.chars()
                .take_while(|c| c.is_ascii_alphanumeric() || *c == '_' || *c == '-')
                .collect::<String>()
        })
        .filter(|name| !name.is_empty())
        .collect()
}

fn load_locale(locale: &str) -> BTreeMap<String, BTreeSet<String>> {
    let path = crate_root().join("i18n").join(locale).join(FTL_FILENAME);
    let content = fs::read_to_string(&path)
        .unwrap_or_else(|err| panic!("cannot read {}: {err}", path.display()));
    parse_messages(&content)
}

fn locales() -> Vec<String> {
    let mut found: Vec<String> = fs::read_dir(crate_root().join("i18n"))
        .map(|dir| {
            dir.flatten()
                .filter(|entry| entry.path().is_dir())
                .filter_map(|entry| entry.file_name().to_str().map(str::to_string))
                .filter(|name| name.contains('-'))
                .collect()
        })
        .unwrap_or_default();
    found.sort();
    found
}

/// Literal first arguments of `t!(...)` in every `.rs` file below `dir`.
/// Computed ids and direct `fl!` calls are not seen.
fn referenced_ids(dir: &Path, out: &mut BTreeSet<String>) {
    let Ok(entries) = fs::read_dir(dir) else {
        return;
    };
    for entry in entries.flatten() {
        let path = entry.path();
        if path.is_dir() {
            referenced_ids(&path, out);
            continue;
        }
        if path.extension().and_then(|ext| ext.to_str()) != Some("rs") {
            continue;
        }
        let Ok(source) = fs::read_to_string(&path) else {
            continue;
        };
        for chunk in source.split("t!(\"").skip(1) {
            if let Some((id, _)) = chunk.split_once('"') {
                if is_message_id(id) {
                    out.insert(id.to_string());
                }
            }
        }
    }
}

#[test]
fn referenced_ids_exist_in_fallback() {
    let fallback = load_locale(FALLBACK);
    assert!(!fallback.is_empty(), "no messages parsed from {FALLBACK}");

    let mut referenced = BTreeSet::new();
    referenced_ids(&crate_root().join("src"), &mut referenced);
    assert!(referenced.contains("nav-entry"), "source scan found nothing");

    let missing: Vec<&String> = referenced
        .iter()
        .filter(|id| !fallback.contains_key(*id))
        .collect();
    assert!(missing.is_empty(), "ids missing from {FALLBACK}: {missing:?}");

    let unused: Vec<&String> = fallback
        .keys()
        .filter(|id| !referenced.contains(*id))
        .collect();
    if !unused.is_empty() {
        eprintln!("[i18n] {} fallback ids unused in sources: {unused:?}", unused.len());
    }
}

#[test]
fn bundles_are_named_after_the_crate() {
    // `fl!` looks up `<locale>/<crate name with underscores>.ftl`.
    let expected = format!("{}.ftl", env!("CARGO_PKG_NAME").replace('-', "_"));
    assert_eq!(FTL_FILENAME, expected);
    for locale in locales() {
        let path = crate_root().join("i18n").join(&locale).join(&expected);
        assert!(path.is_file(), "{} missing", path.display());
    }
}

#[test]
fn every_locale_matches_fallback() {
    let fallback = load_locale(FALLBACK);
    let mut report = Vec::new();

    for locale in locales().iter().filter(|l| l.as_str() != FALLBACK) {
        let messages = load_locale(locale);
        for (id, vars) in &fallback {
            match messages.get(id) {
                None => report.push(format!("{locale}: missing {id}")),
                Some(theirs) if theirs != vars => {
                    report.push(format!("{locale}: {id} uses {theirs:?}, expected {vars:?}"))
                }
                Some(_) => {}
            }
        }
    }

    assert!(report.is_empty(), "locale mismatches:\n{}", report.join("\n"));
}

#[test]
fn no_locale_defines_an_id_twice() {
    for locale in locales() {
        let path = crate_root().join("i18n").join(&locale).join(FTL_FILENAME);
        let content = fs::read_to_string(&path).unwrap_or_default();
        let mut seen = BTreeSet::new();
        for line in content.lines().map(str::trim) {
            if let Some((id, _)) = line.split_once('=') {
                let id = id.trim();
                if is_message_id(id) {
                    assert!(seen.insert(id.to_string()), "{locale}: {id} defined twice");
                }
            }
        }
    }
}

#[test]
fn dial_and_chart_labels_are_translated() {
    let fallback = load_locale(FALLBACK);
    for id in [
        "metric-mood",
        "metric-energy",
        "metric-anxiety",
        "period-morning",
        "period-noon",
        "period-afternoon",
        "period-evening",
        "chart-placeholder",
    ] {
        assert!(fallback.contains_key(id), "{id} missing from {FALLBACK}");
    }
}

#[test]
fn parser_reads_variables() {
    let parsed = parse_messages("# c\nentry-filled = { $filled } of { $total }\n-term = x\n");
    assert_eq!(parsed.len(), 1);
    let vars: Vec<&str> = parsed["entry-filled"].iter().map(String::as_str).collect();
    assert_eq!(vars, ["filled", "total"]);
}
