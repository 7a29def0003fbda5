// src/engine/fields.rs
//! Field parser registry.
//!
//! Every logical field maps to one pure `fn(&str) -> FieldValue`. Parsers never
//! fail: unparseable text becomes the field's default or [`FieldValue::Absent`],
//! and placeholder glyphs are always `Absent`.

use std::collections::BTreeMap;

use crate::config::consts::{DEFAULT_THREAT_LEVEL, RATING_EMPTY, RATING_FILLED, RATING_NONE};
use crate::config::vocab::{ELEMENTS, MONSTER_STATUS_EFFECTS};
use crate::core::sanitize::{is_placeholder, to_token};
use crate::model::{MaterialChance, ScopedChance};
use super::matcher::match_many;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Field {
    // info box
    Name,
    Description,
    Class,
    ThreatLevel,
    MajorWeakness,
    OtherWeakness,
    Element,
    AbnormalStatus,
    // weakness / status tables
    Multiplier,
    Effectiveness,
    // kinsect table
    KinsectParts,
    // materials table
    MaterialName,
    Target,
    Carve,
    Capture,
    PartBreak,
    Drop,
    Palico,
}

pub type ParseFn = fn(&str) -> FieldValue;

impl Field {
    pub const ALL: [Field; 18] = [
        Field::Name, Field::Description, Field::Class, Field::ThreatLevel,
        Field::MajorWeakness, Field::OtherWeakness, Field::Element, Field::AbnormalStatus,
        Field::Multiplier, Field::Effectiveness, Field::KinsectParts, Field::MaterialName,
        Field::Target, Field::Carve, Field::Capture, Field::PartBreak, Field::Drop, Field::Palico,
    ];

    /// The registry.
    pub fn parser(self) -> ParseFn {
        match self {
            Field::Name | Field::Description | Field::Class => parse_text,
            Field::ThreatLevel => parse_threat_level,
            Field::MajorWeakness | Field::OtherWeakness | Field::Element => parse_elements,
            Field::AbnormalStatus => parse_statuses,
            Field::Multiplier => parse_multiplier,
            Field::Effectiveness => parse_effectiveness,
            Field::KinsectParts => parse_part_list,
            Field::MaterialName => parse_lines,
            Field::Target | Field::Capture | Field::Palico => parse_chance,
            Field::Carve | Field::PartBreak | Field::Drop => parse_scoped_chance,
        }
    }
}

/// Run the registered parser for `field`.
pub fn parse(field: Field, text: &str) -> FieldValue {
    (field.parser())(text)
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldValue {
    Absent,
    Text(String),
    Int(i32),
    Lines(Vec<String>),
    Tokens(Vec<&'static str>),
    Chance(MaterialChance),
    Scoped(ScopedChance),
}

impl FieldValue {
    pub fn is_absent(&self) -> bool {
        matches!(self, FieldValue::Absent)
    }

    pub fn into_text(self) -> Option<String> {
        match self { FieldValue::Text(s) => Some(s), _ => None }
    }

    pub fn into_int(self) -> Option<i32> {
        match self { FieldValue::Int(n) => Some(n), _ => None }
    }

    pub fn into_lines(self) -> Option<Vec<String>> {
        match self { FieldValue::Lines(v) => Some(v), _ => None }
    }

    pub fn into_tokens(self) -> Option<Vec<String>> {
        match self {
            FieldValue::Tokens(v) => Some(v.into_iter().map(String::from).collect()),
            _ => None,
        }
    }

    pub fn into_chance(self) -> Option<MaterialChance> {
        match self { FieldValue::Chance(c) => Some(c), _ => None }
    }

    pub fn into_scoped(self) -> Option<ScopedChance> {
        match self { FieldValue::Scoped(m) => Some(m), _ => None }
    }
}

/* ---------- registered parsers ---------- */

fn parse_text(s: &str) -> FieldValue {
    if is_placeholder(s) { FieldValue::Absent } else { FieldValue::Text(s.trim().to_string()) }
}

fn parse_threat_level(s: &str) -> FieldValue {
    if is_placeholder(s) { FieldValue::Absent } else { FieldValue::Int(int_or(s, DEFAULT_THREAT_LEVEL)) }
}

fn parse_elements(s: &str) -> FieldValue {
    if is_placeholder(s) { return FieldValue::Absent; }
    FieldValue::Tokens(match_many(&ELEMENTS, &lines(s)))
}

fn parse_statuses(s: &str) -> FieldValue {
    if is_placeholder(s) { return FieldValue::Absent; }
    FieldValue::Tokens(match_many(&MONSTER_STATUS_EFFECTS, &lines(s)))
}

fn parse_multiplier(s: &str) -> FieldValue {
    multiplier(s).map_or(FieldValue::Absent, FieldValue::Int)
}

fn parse_effectiveness(s: &str) -> FieldValue {
    effectiveness(s).map_or(FieldValue::Absent, FieldValue::Int)
}

fn parse_lines(s: &str) -> FieldValue {
    let v = lines(s);
    if v.is_empty() || (v.len() == 1 && is_placeholder(&v[0])) { FieldValue::Absent } else { FieldValue::Lines(v) }
}

fn parse_part_list(s: &str) -> FieldValue {
    match parse_lines(s) {
        FieldValue::Lines(v) => FieldValue::Lines(v.iter().map(|l| to_token(l)).filter(|t| !t.is_empty()).collect()),
        other => other,
    }
}

fn parse_chance(s: &str) -> FieldValue {
    chance(s).map_or(FieldValue::Absent, FieldValue::Chance)
}

fn parse_scoped_chance(s: &str) -> FieldValue {
    scoped_chance(s).map_or(FieldValue::Absent, FieldValue::Scoped)
}

/* ---------- transforms ---------- */

/// Split on newlines, trim, drop empty lines.
pub fn lines(s: &str) -> Vec<String> {
    s.split('\n')
        .map(str::trim)
        .filter(|l| !l.is_empty())
        .map(String::from)
        .collect()
}

/// Leading integer of the part before " / " ("5 / 10" → 5).
fn leading_int(s: &str) -> Option<i32> {
    let head = s.split(" / ").next().unwrap_or("").trim();
    let end = head
        .char_indices()
        .find(|&(i, c)| !(c.is_ascii_digit() || (i == 0 && (c == '-' || c == '+'))))
        .map_or(head.len(), |(i, _)| i);
    head[..end].parse().ok()
}

/// Leading integer as in `leading_int`, else `default`.
pub fn int_or(s: &str, default: i32) -> i32 {
    leading_int(s).unwrap_or(default)
}

/// Weakness multiplier. Placeholders and text without a leading integer are
/// absent, never zero.
pub fn multiplier(s: &str) -> Option<i32> {
    if is_placeholder(s) { None } else { leading_int(s) }
}

/// Status effectiveness: a rating made of star glyphs counts the filled ones
/// (`☆☆☆` is 0), a cross is 0, anything else is read as an integer.
pub fn effectiveness(s: &str) -> Option<i32> {
    let t = s.trim();
    if is_placeholder(t) {
        return None;
    }
    if t.chars().any(|c| RATING_NONE.contains(&c)) {
        return Some(0);
    }
    let is_rating = t
        .chars()
        .filter(|c| !c.is_whitespace())
        .all(|c| c == RATING_FILLED || c == RATING_EMPTY);
    if is_rating {
        return Some(t.chars().filter(|&c| c == RATING_FILLED).count() as i32);
    }
    leading_int(t)
}

/// Repetition marker: "x2" / "×2", not glued to a preceding letter.
pub fn repetition(s: &str) -> Option<u32> {
    let mut prev: Option<char> = None;
    for (i, c) in s.char_indices() {
        if matches!(c, 'x' | 'X' | '×') && !prev.is_some_and(char::is_alphanumeric) {
            let rest = &s[i + c.len_utf8()..];
            let digits: String = rest.trim_start().chars().take_while(char::is_ascii_digit).collect();
            if let Ok(n) = digits.parse() {
                return Some(n);
            }
        }
        prev = Some(c);
    }
    None
}

/// "45%" → 45, "80% x2" → 80 ×2. No '%' or a value over 100 → `None`.
pub fn chance(s: &str) -> Option<MaterialChance> {
    let t = s.trim();
    if is_placeholder(t) {
        return None;
    }
    let (pct, rest) = t.split_once('%')?;
    let percentage: u8 = pct.trim().parse().ok().filter(|p| *p <= 100)?;
    Some(MaterialChance { percentage, amount: repetition(rest) })
}

/// One chance per line, scoped by a parenthesised label:
/// "45%(Head)\n30% x2 (Tail)" → {head: 45, tail: 30 ×2}.
/// Lines without a chance or a scope are skipped; nothing left → `None`.
pub fn scoped_chance(s: &str) -> Option<ScopedChance> {
    let mut out = BTreeMap::new();
    for line in lines(s) {
        let Some((pct, rest)) = line.split_once('%') else { continue };
        let Some(percentage) = pct.trim().parse::<u8>().ok().filter(|p| *p <= 100) else { continue };
        let Some(scope) = scope_label(rest) else { continue };
        let amount = repetition(&without_scope(rest));
        out.insert(scope, MaterialChance { percentage, amount });
    }
    (!out.is_empty()).then_some(out)
}

fn scope_label(s: &str) -> Option<String> {
    let open = s.find('(')?;
    let close = s.rfind(')').filter(|c| *c > open)?;
    let token = to_token(&s[open + 1..close]);
    (!token.is_empty()).then_some(token)
}

fn without_scope(s: &str) -> String {
    match (s.find('('), s.rfind(')')) {
        (Some(o), Some(c)) if c > o => format!("{} {}", &s[..o], &s[c + 1..]),
        _ => s!(s),
    }
}
