// src/engine/assemble.rs
//! Record assembler.
//!
//! One pass per document: locate sections, normalize their tables, parse cells
//! through the field registry, validate the composite fields, build the
//! record. The first failing step ends the pass; no partial record escapes.
//!
//! Required sections: info, weapon weakness, elemental weakness, status
//! effects. Kinsect extracts and materials are optional, but a present and
//! malformed optional section still fails the document.

use std::collections::BTreeMap;
use std::sync::LazyLock;

use scraper::{Html, Selector};
use tracing::{debug, warn};

use super::error::ExtractError;
use super::fields::{self, Field, FieldValue};
use super::locate::{find_sections, optional, required, SectionBody, SectionMap};
use super::matcher::{lookup_contains, match_one};
use super::table::{key_values, merge_rows, named_tables, primary_table, NormalizedTable, Row};
use super::validate::{validate_status, validate_weakness, RawBreakdown, RawStatusTable};
use crate::config::lookup::{Section, INFO_ROWS, MATERIAL_COLUMNS, RANKS, SECTIONS};
use crate::config::vocab::{ATTACK_TYPES, DROP_KINDS, KINSECT_EXTRACTS, MONSTER_STATUS_EFFECTS};
use crate::core::html::normalize;
use crate::core::sanitize::first_word;
use crate::model::{
    DropChance, KinsectExtracts, Material, MaterialsByRank, MonsterInfo, MonsterRecord,
    StatusEffectTable, WeaknessBreakdown,
};

static TITLE: LazyLock<Selector> = LazyLock::new(|| {
    Selector::parse("h1").expect("BUG: hardcoded selector 'h1' is statically valid")
});

/// Parse raw markup and extract.
pub fn extract_from_str(html: &str) -> Result<MonsterRecord, ExtractError> {
    let doc = Html::parse_document(html);
    extract_monster(&doc)
}

pub fn extract_monster(doc: &Html) -> Result<MonsterRecord, ExtractError> {
    let sections = find_sections(doc, SECTIONS);
    debug!(found = ?sections.keys().collect::<Vec<_>>(), "sections");

    let info = read_info(&sections, doc)?;
    let weakness_breakdown = read_weakness(&sections)?;
    let status_effects = read_status(&sections)?;
    let kinsect_extracts = read_kinsect(&sections)?;
    let materials = read_materials(&sections)?;

    Ok(MonsterRecord { info, weakness_breakdown, status_effects, kinsect_extracts, materials })
}

fn table_of(section: Section, body: SectionBody<'_>) -> Result<NormalizedTable, ExtractError> {
    let table = primary_table(body)
        .and_then(NormalizedTable::from_table)
        .map_err(ExtractError::shape(section))?;
    debug!(%section, key = table.key_column(), columns = ?table.columns(), rows = table.rows().len(), "table normalized");
    Ok(table)
}

/* ---------- info ---------- */

fn read_info(sections: &SectionMap<'_>, doc: &Html) -> Result<MonsterInfo, ExtractError> {
    let (_, body) = required(sections, Section::Info)?;
    let table = primary_table(body).map_err(ExtractError::shape(Section::Info))?;

    // First label wins when the box repeats a field.
    let mut parsed: BTreeMap<Field, FieldValue> = BTreeMap::new();
    for (label, value) in key_values(table) {
        let Some(field) = lookup_contains(INFO_ROWS, &label) else {
            debug!(%label, "unused info row");
            continue;
        };
        parsed.entry(field).or_insert_with(|| fields::parse(field, &value));
    }

    let mut take = |field: Field| parsed.remove(&field).unwrap_or(FieldValue::Absent);

    let name = take(Field::Name)
        .into_text()
        .or_else(|| page_title(doc))
        .ok_or(ExtractError::MissingField("name"))?;

    Ok(MonsterInfo {
        name,
        description: take(Field::Description).into_text().unwrap_or_default(),
        class: take(Field::Class).into_text().unwrap_or_default(),
        threat_level: take(Field::ThreatLevel)
            .into_int()
            .unwrap_or(crate::config::consts::DEFAULT_THREAT_LEVEL),
        major_weakness: take(Field::MajorWeakness).into_tokens(),
        other_weakness: take(Field::OtherWeakness).into_tokens(),
        element: take(Field::Element).into_tokens(),
        abnormal_status: take(Field::AbnormalStatus).into_tokens(),
    })
}

/// Monster name from the page title: "Rathalos Weakness and Drops | ..." → "Rathalos".
fn page_title(doc: &Html) -> Option<String> {
    let title = normalize(doc.select(&TITLE).next()?);
    let head = title.split('|').next().unwrap_or("");
    let head = match find_ignore_case(head, " weakness") {
        Some(i) => &head[..i],
        None => head,
    };
    let name = head.trim();
    (!name.is_empty()).then(|| s!(name))
}

/// Byte offset of `needle` in `haystack`, ASCII case-insensitive.
fn find_ignore_case(haystack: &str, needle: &str) -> Option<usize> {
    haystack
        .char_indices()
        .map(|(i, _)| i)
        .find(|&i| haystack[i..].get(..needle.len()).is_some_and(|w| w.eq_ignore_ascii_case(needle)))
}

/* ---------- weakness ---------- */

fn read_weakness(sections: &SectionMap<'_>) -> Result<WeaknessBreakdown, ExtractError> {
    let (_, weapon) = required(sections, Section::WeaponWeakness)?;
    let (_, element) = required(sections, Section::ElementWeakness)?;
    let weapon = table_of(Section::WeaponWeakness, weapon)?;
    let element = table_of(Section::ElementWeakness, element)?;

    let merged = merge_rows(&[weapon, element]).map_err(ExtractError::shape(Section::WeaponWeakness))?;

    let mut raw = RawBreakdown::new();
    for (part, columns) in merged {
        let mut values = BTreeMap::new();
        for (column, text) in columns {
            let Some(attack) = match_one(&ATTACK_TYPES, &column) else {
                debug!(%part, %column, "column is not an attack type");
                continue;
            };
            values.insert(s!(attack), fields::parse(Field::Multiplier, &text).into_int());
        }
        raw.insert(part, values);
    }

    validate_weakness(raw).map_err(ExtractError::invalid(Section::WeaponWeakness))
}

/* ---------- status effects ---------- */

fn read_status(sections: &SectionMap<'_>) -> Result<StatusEffectTable, ExtractError> {
    let (_, body) = required(sections, Section::StatusEffects)?;
    let table = table_of(Section::StatusEffects, body)?;

    let mut raw = RawStatusTable::new();
    for row in table.rows() {
        let Some(status) = match_one(&MONSTER_STATUS_EFFECTS, &row.key) else {
            warn!(label = %row.key, "unknown status effect row");
            continue;
        };
        let value = first_value(&table, row)
            .and_then(|text| fields::parse(Field::Effectiveness, text).into_int());
        raw.insert(s!(status), value);
    }

    validate_status(raw).map_err(ExtractError::invalid(Section::StatusEffects))
}

fn first_value<'t>(table: &NormalizedTable, row: &'t Row) -> Option<&'t str> {
    table.columns().first().and_then(|c| row.get(c))
}

/* ---------- kinsect ---------- */

fn read_kinsect(sections: &SectionMap<'_>) -> Result<Option<KinsectExtracts>, ExtractError> {
    let Some((_, body)) = optional(sections, Section::KinsectExtracts)? else {
        debug!("no kinsect section");
        return Ok(None);
    };
    let table = table_of(Section::KinsectExtracts, body)?;

    let mut out: KinsectExtracts = KINSECT_EXTRACTS
        .tokens()
        .iter()
        .map(|c| (s!(*c), Vec::new()))
        .collect();

    let color_of = |label: &str| match_one(&KINSECT_EXTRACTS, first_word(label));
    let by_column: Vec<(&String, &'static str)> = table
        .columns()
        .iter()
        .filter_map(|c| color_of(c.as_str()).map(|color| (c, color)))
        .collect();

    let mut push = |color: &str, text: &str| {
        if let Some(parts) = fields::parse(Field::KinsectParts, text).into_lines() {
            if let Some(list) = out.get_mut(color) {
                list.extend(parts);
            }
        }
    };

    if by_column.is_empty() {
        // one row per colour
        for row in table.rows() {
            match color_of(row.key.as_str()) {
                Some(color) => {
                    if let Some(text) = first_value(&table, row) {
                        push(color, text);
                    }
                }
                None => warn!(label = %row.key, "unknown kinsect extract row"),
            }
        }
    } else {
        // one column per colour
        for row in table.rows() {
            for (column, color) in &by_column {
                if let Some(text) = row.get(column.as_str()) {
                    push(*color, text);
                }
            }
        }
    }

    Ok(Some(out))
}

/* ---------- materials ---------- */

fn read_materials(sections: &SectionMap<'_>) -> Result<Option<MaterialsByRank>, ExtractError> {
    let Some((heading, body)) = optional(sections, Section::Materials)? else {
        debug!("no materials section");
        return Ok(None);
    };
    let shape = ExtractError::shape;

    let mut out = MaterialsByRank::new();
    for (name, table) in named_tables(&heading, body).map_err(shape(Section::Materials))? {
        let Some(rank) = lookup_contains(RANKS, &name) else {
            warn!(tab = %name, "materials table with unknown rank");
            continue;
        };
        let table = NormalizedTable::from_table(table).map_err(shape(Section::Materials))?;
        let materials = read_material_rows(&table);
        out.entry(rank).or_default().extend(materials);
    }
    Ok(Some(out))
}

fn read_material_rows(table: &NormalizedTable) -> Vec<Material> {
    let columns: Vec<(&String, Field)> = table
        .columns()
        .iter()
        .filter_map(|c| lookup_contains(MATERIAL_COLUMNS, c).map(|f| (c, f)))
        .collect();

    let mut out = Vec::with_capacity(table.rows().len());
    for row in table.rows() {
        let Some(mut names) = fields::parse(Field::MaterialName, &row.key).into_lines() else {
            continue;
        };
        let material_name = names.remove(0);
        let mut m = Material {
            material_name,
            name_ja_zh: names,
            emblem: row.key_icon.clone().unwrap_or_default(),
            target: None,
            carve: None,
            capture: None,
            part_break: None,
            drop: None,
            palico: None,
        };

        for (column, field) in &columns {
            let text = row.get(column).unwrap_or_default();
            let value = fields::parse(*field, text);
            match field {
                Field::Target => m.target = value.into_chance(),
                Field::Capture => m.capture = value.into_chance(),
                Field::Palico => m.palico = value.into_chance(),
                Field::Carve => m.carve = value.into_scoped(),
                Field::PartBreak => m.part_break = value.into_scoped(),
                Field::Drop => m.drop = read_drop(value, text),
                _ => {}
            }
        }
        out.push(m);
    }
    out
}

/// Scoped drop cell → normal/riding; a bare chance counts as the normal drop.
fn read_drop(value: FieldValue, text: &str) -> Option<DropChance> {
    let mut drop = DropChance::default();
    match value {
        FieldValue::Scoped(scoped) => {
            for (scope, chance) in scoped {
                match match_one(&DROP_KINDS, &scope) {
                    Some("normal") => drop.normal = Some(chance),
                    Some("riding") => drop.riding = Some(chance),
                    _ => debug!(%scope, "unknown drop kind"),
                }
            }
        }
        _ => drop.normal = fields::chance(text),
    }
    (!drop.is_empty()).then_some(drop)
}
