// src/config/lookup.rs
//! Substring lookup tables.
//!
//! Every table is `(needle, value)` in priority order. A needle is lowercase and
//! matches when the (lowercased) haystack contains it; the first hit wins.

use crate::engine::fields::Field;
use crate::model::Rank;

/// Logical regions of a monster page.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Section {
    Info,
    WeaponWeakness,
    ElementWeakness,
    StatusEffects,
    KinsectExtracts,
    Materials,
}

impl Section {
    pub fn label(&self) -> &'static str {
        match self {
            Section::Info => "info",
            Section::WeaponWeakness => "weapon weakness",
            Section::ElementWeakness => "elemental weakness",
            Section::StatusEffects => "status effects",
            Section::KinsectExtracts => "kinsect extracts",
            Section::Materials => "materials",
        }
    }
}

impl std::fmt::Display for Section {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// Heading text → logical section.
pub const SECTIONS: &[(&str, Section)] = &[
    ("weakness and notes", Section::Info),
    ("weapon damage breakdown", Section::WeaponWeakness),
    ("elemental damage breakdown", Section::ElementWeakness),
    ("status effect", Section::StatusEffects),
    ("kinsect", Section::KinsectExtracts),
    ("material", Section::Materials),
];

/// Info box row label → field.
pub const INFO_ROWS: &[(&str, Field)] = &[
    ("name", Field::Name),
    ("description", Field::Description),
    ("class", Field::Class),
    ("threat", Field::ThreatLevel),
    ("major weak", Field::MajorWeakness),
    ("other weak", Field::OtherWeakness),
    ("weak", Field::MajorWeakness),
    ("abnormal", Field::AbnormalStatus),
    ("status", Field::AbnormalStatus),
    ("element", Field::Element),
];

/// Materials table column name → field. The first column is the material itself.
pub const MATERIAL_COLUMNS: &[(&str, Field)] = &[
    ("target", Field::Target),
    ("carve", Field::Carve),
    ("capture", Field::Capture),
    ("break", Field::PartBreak),
    ("drop", Field::Drop),
    ("palico", Field::Palico),
];

/// Tab label or heading → rank.
pub const RANKS: &[(&str, Rank)] = &[
    ("low", Rank::Low),
    ("master", Rank::Master),
    ("high", Rank::High),
];
