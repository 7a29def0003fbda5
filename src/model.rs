// src/model.rs
//! Monster record and its nested structures.
//!
//! Records are built once by `engine::assemble` and never mutated afterwards.
//! Map keys are canonical tokens (see `core::sanitize::to_token`); maps are
//! `BTreeMap` so serialized output is stable.

use std::collections::BTreeMap;

use serde::Serialize;

/// Body part → attack type → multiplier. Always carries an `overall` part.
pub type WeaknessBreakdown = BTreeMap<String, BTreeMap<String, i32>>;

/// Status effect → effectiveness rank in `0..=3`.
pub type StatusEffectTable = BTreeMap<String, i32>;

/// Extract colour → body parts that yield it.
pub type KinsectExtracts = BTreeMap<String, Vec<String>>;

/// Scope (body part, drop kind, ...) → chance.
pub type ScopedChance = BTreeMap<String, MaterialChance>;

pub const OVERALL: &str = "overall";

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MaterialChance {
    pub percentage: u8,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub amount: Option<u32>,
}

impl MaterialChance {
    pub fn new(percentage: u8) -> Self {
        Self { percentage, amount: None }
    }

    pub fn with_amount(percentage: u8, amount: u32) -> Self {
        Self { percentage, amount: Some(amount) }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct DropChance {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub normal: Option<MaterialChance>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub riding: Option<MaterialChance>,
}

impl DropChance {
    pub fn is_empty(&self) -> bool {
        self.normal.is_none() && self.riding.is_none()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Material {
    pub material_name: String,
    pub name_ja_zh: Vec<String>,
    pub emblem: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub target: Option<MaterialChance>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub carve: Option<ScopedChance>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub capture: Option<MaterialChance>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub part_break: Option<ScopedChance>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub drop: Option<DropChance>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub palico: Option<MaterialChance>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub enum Rank {
    #[serde(rename = "LR")]
    Low,
    #[serde(rename = "HR")]
    High,
    #[serde(rename = "MR")]
    Master,
}

pub type MaterialsByRank = BTreeMap<Rank, Vec<Material>>;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MonsterInfo {
    pub name: String,
    pub description: String,
    pub class: String,
    pub threat_level: i32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub major_weakness: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub other_weakness: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub element: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub abnormal_status: Option<Vec<String>>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MonsterRecord {
    #[serde(flatten)]
    pub info: MonsterInfo,
    pub weakness_breakdown: WeaknessBreakdown,
    pub status_effects: StatusEffectTable,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub kinsect_extracts: Option<KinsectExtracts>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub materials: Option<MaterialsByRank>,
}
