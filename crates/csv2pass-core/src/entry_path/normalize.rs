//! Path segment normalization.

use serde::{Deserialize, Serialize};

/// Whether punctuation survives in derived path segments.
///
/// `Preserve` only lowercases and folds whitespace, which is what existing
/// stores imported by this tool look like. `StripPunctuation` additionally
/// drops everything except ASCII letters, digits and `_`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum NormalizeMode {
    #[default]
    Preserve,
    StripPunctuation,
}

/// Lowercase `name` and replace each run of whitespace with one `_`.
///
/// Idempotent: the output has no whitespace and no uppercase left to fold.
pub fn normalize(name: &str, mode: NormalizeMode) -> String {
    let mut out = String::with_capacity(name.len());
    let mut in_space = false;

    for c in name.chars() {
        if c.is_whitespace() {
            if !in_space {
                out.push('_');
            }
            in_space = true;
            continue;
        }
        in_space = false;
        out.extend(c.to_lowercase());
    }

    match mode {
        NormalizeMode::Preserve => out,
        NormalizeMode::StripPunctuation => out
            .chars()
            .filter(|c| c.is_ascii_alphanumeric() || *c == '_')
            .collect(),
    }
}
