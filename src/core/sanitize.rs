// src/core/sanitize.rs
// String-level cleanup. Everything here is pure and idempotent.

use crate::config::consts::PLACEHOLDERS;

/// Collapse sequences of whitespace into a single space and trim.
pub fn normalize_ws(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let mut prev_space = false;
    for ch in s.chars() {
        if ch.is_whitespace() {
            if !prev_space { out.push(' '); prev_space = true; }
        } else { out.push(ch); prev_space = false; }
    }
    out.trim().to_string()
}

/// Normalize every line on its own, keep the line structure, trim the whole.
pub fn clean_text(s: &str) -> String {
    let lines: Vec<String> = s.split('\n').map(normalize_ws).collect();
    lines.join("\n").trim().to_string()
}

/// Case-folded alphanumerics only: "Tail Tip" → "tailtip".
pub fn fold(s: &str) -> String {
    s.chars()
        .filter(|c| c.is_alphanumeric())
        .flat_map(char::to_lowercase)
        .collect()
}

/// Canonical token form: "Tail Tip" → "tailTip", "HEAD" → "head".
/// Existing tokens are fixed points.
pub fn to_token(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for (i, word) in s.split(|c: char| !c.is_alphanumeric()).filter(|w| !w.is_empty()).enumerate() {
        let shouting = word.chars().count() > 1
            && word.chars().all(|c| !c.is_alphabetic() || c.is_uppercase());
        let word = if shouting { word.to_lowercase() } else { word.to_string() };

        let mut chars = word.chars();
        if let Some(first) = chars.next() {
            if i == 0 {
                out.extend(first.to_lowercase());
            } else {
                out.extend(first.to_uppercase());
            }
            out.push_str(chars.as_str());
        }
    }
    out
}

/// First whitespace-delimited word.
pub fn first_word(s: &str) -> &str {
    s.split_whitespace().next().unwrap_or("")
}

/// True for empty cells and for the site's "no value" glyphs.
pub fn is_placeholder(s: &str) -> bool {
    let t = s.trim();
    t.is_empty() || PLACEHOLDERS.iter().any(|p| t.eq_ignore_ascii_case(p))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clean_text_keeps_lines() {
        assert_eq!(clean_text("  Head \n\t Tail   Tip  \n"), "Head\nTail Tip");
        assert_eq!(clean_text("\n\nA\n\nB\n"), "A\n\nB");
    }

    #[test]
    fn clean_text_is_idempotent() {
        for s in ["  a  b \n c ", "x", "", "\u{a0}Fire\u{a0}\n Water"] {
            let once = clean_text(s);
            assert_eq!(clean_text(&once), once);
        }
    }

    #[test]
    fn fold_strips_delimiters() {
        assert_eq!(fold("Tail-Tip (L)"), "tailtipl");
        assert_eq!(fold("Ice"), "ice");
        assert_eq!(fold(" - "), "");
    }

    #[test]
    fn to_token_variants() {
        assert_eq!(to_token("Head"), "head");
        assert_eq!(to_token("Tail Tip"), "tailTip");
        assert_eq!(to_token("left wing"), "leftWing");
        assert_eq!(to_token("HEAD"), "head");
        assert_eq!(to_token("Fore-leg (R)"), "foreLegR");
        assert_eq!(to_token("Tail 2"), "tail2");
        assert_eq!(to_token("  "), "");
    }

    #[test]
    fn to_token_is_idempotent() {
        for s in ["Tail Tip", "HEAD", "Fore-leg (R)", "overall", "partBreak"] {
            let once = to_token(s);
            assert_eq!(to_token(&once), once);
        }
    }

    #[test]
    fn placeholders() {
        assert!(is_placeholder("-"));
        assert!(is_placeholder(" – "));
        assert!(is_placeholder("n/a"));
        assert!(is_placeholder(""));
        assert!(!is_placeholder("0"));
        assert!(!is_placeholder("-5"));
    }
}
