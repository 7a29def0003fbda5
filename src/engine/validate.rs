// src/engine/validate.rs
// Structural invariants for the composite fields. A record is only built from
// values that pass these.

use std::collections::BTreeMap;

use super::error::ValidationError;
use crate::config::vocab::{Vocabulary, ATTACK_TYPES, MONSTER_STATUS_EFFECTS};
use crate::model::{StatusEffectTable, WeaknessBreakdown, OVERALL};

/// Breakdown as parsed: a multiplier may still be absent.
pub type RawBreakdown = BTreeMap<String, BTreeMap<String, Option<i32>>>;

/// Check a parsed breakdown and strip the `Option`s.
pub fn validate_weakness(raw: RawBreakdown) -> Result<WeaknessBreakdown, ValidationError> {
    if !raw.contains_key(OVERALL) {
        return Err(ValidationError::MissingOverall);
    }

    let mut out = WeaknessBreakdown::new();
    for (part, values) in raw {
        let (missing, extra) = key_diff(&ATTACK_TYPES, values.keys());
        if !missing.is_empty() || !extra.is_empty() {
            return Err(ValidationError::AttackTypes { part, missing, extra });
        }

        let mut checked = BTreeMap::new();
        for (attack, value) in values {
            match value {
                None => return Err(ValidationError::NonInteger { part, attack }),
                Some(v) if v < 0 => {
                    return Err(ValidationError::NegativeMultiplier { part, attack, value: v });
                }
                Some(v) => {
                    checked.insert(attack, v);
                }
            }
        }
        out.insert(part, checked);
    }
    Ok(out)
}

/// Same checks on an already-typed breakdown.
pub fn check_weakness(breakdown: &WeaknessBreakdown) -> Result<(), ValidationError> {
    let raw: RawBreakdown = breakdown
        .iter()
        .map(|(p, m)| (p.clone(), m.iter().map(|(k, v)| (k.clone(), Some(*v))).collect()))
        .collect();
    validate_weakness(raw).map(|_| ())
}

/// Status table as parsed: a rank may still be absent.
pub type RawStatusTable = BTreeMap<String, Option<i32>>;

pub fn validate_status(raw: RawStatusTable) -> Result<StatusEffectTable, ValidationError> {
    let (missing, extra) = key_diff(&MONSTER_STATUS_EFFECTS, raw.keys());
    if !missing.is_empty() || !extra.is_empty() {
        return Err(ValidationError::StatusKeys { missing, extra });
    }

    let mut out = StatusEffectTable::new();
    for (status, value) in raw {
        match value {
            None => return Err(ValidationError::StatusNonInteger { status }),
            Some(v) if !(0..=3).contains(&v) => {
                return Err(ValidationError::StatusRange { status, value: v });
            }
            Some(v) => {
                out.insert(status, v);
            }
        }
    }
    Ok(out)
}

pub fn check_status(table: &StatusEffectTable) -> Result<(), ValidationError> {
    let raw: RawStatusTable = table.iter().map(|(k, v)| (k.clone(), Some(*v))).collect();
    validate_status(raw).map(|_| ())
}

/// (vocabulary tokens not in keys, keys not in vocabulary)
fn key_diff<'k>(vocab: &Vocabulary, keys: impl Iterator<Item = &'k String> + Clone) -> (Vec<String>, Vec<String>) {
    let missing = vocab
        .tokens()
        .iter()
        .filter(|t| !keys.clone().any(|k| k == *t))
        .map(|t| s!(*t))
        .collect();
    let extra = keys.filter(|k| !vocab.contains(k)).cloned().collect();
    (missing, extra)
}
