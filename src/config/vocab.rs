// src/config/vocab.rs
//! Reference vocabularies.
//!
//! Each vocabulary is an **ordered** list of canonical tokens. Order is part of
//! the contract: the matcher returns the first token a label is a prefix of, so
//! when two tokens share a prefix the intended one must come first.

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Vocabulary {
    name: &'static str,
    tokens: &'static [&'static str],
}

impl Vocabulary {
    pub const fn new(name: &'static str, tokens: &'static [&'static str]) -> Self {
        Self { name, tokens }
    }

    pub fn name(&self) -> &'static str { self.name }

    pub fn tokens(&self) -> &'static [&'static str] { self.tokens }

    pub fn len(&self) -> usize { self.tokens.len() }

    pub fn is_empty(&self) -> bool { self.tokens.is_empty() }

    pub fn contains(&self, token: &str) -> bool {
        self.tokens.iter().any(|t| *t == token)
    }
}

vocab!(pub ELEMENTS, "elements", ["fire", "water", "thunder", "ice", "dragon"]);

vocab!(pub WEAPON_DAMAGE, "weapon damage types", ["sever", "blunt", "ammo"]);

// WEAPON_DAMAGE followed by ELEMENTS
vocab!(pub ATTACK_TYPES, "attack types", [
    "sever", "blunt", "ammo",
    "fire", "water", "thunder", "ice", "dragon",
]);

vocab!(pub ELEMENTAL_BLIGHTS, "elemental blights", [
    "fireblight", "waterblight", "thunderblight", "iceblight",
]);

vocab!(pub ABNORMAL_STATUSES, "abnormal statuses", [
    "poison", "stun", "paralysis", "sleep", "blast", "exhaust",
]);

// ELEMENTAL_BLIGHTS followed by ABNORMAL_STATUSES
vocab!(pub MONSTER_STATUS_EFFECTS, "monster status effects", [
    "fireblight", "waterblight", "thunderblight", "iceblight",
    "poison", "stun", "paralysis", "sleep", "blast", "exhaust",
]);

vocab!(pub KINSECT_EXTRACTS, "kinsect extracts", ["white", "orange", "red"]);

vocab!(pub DROP_KINDS, "drop kinds", ["normal", "riding"]);
