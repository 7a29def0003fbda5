// tests/extract_e2e.rs
use std::collections::BTreeMap;

use mhr_scrape::config::vocab::{ATTACK_TYPES, MONSTER_STATUS_EFFECTS};
use mhr_scrape::engine::validate::{check_status, check_weakness};
use mhr_scrape::model::{MaterialChance, Rank};
use mhr_scrape::{extract_from_str, ExtractError, MonsterRecord};

const PAGE: &str = include_str!("fixtures/monster_page.html");

fn record() -> MonsterRecord {
    extract_from_str(PAGE).expect("fixture page extracts")
}

fn strings(v: &[&str]) -> Vec<String> {
    v.iter().map(|s| s.to_string()).collect()
}

#[test]
fn info_box() {
    let info = record().info;
    assert_eq!(info.name, "Rathalos");
    assert_eq!(info.class, "Flying Wyvern");
    assert_eq!(info.threat_level, 5);
    assert_eq!(info.element, Some(strings(&["fire"])));
    assert_eq!(info.major_weakness, Some(strings(&["dragon", "thunder"])));
    assert_eq!(info.other_weakness, None);
    assert_eq!(info.abnormal_status, Some(strings(&["fireblight", "poison"])));
    assert_eq!(
        info.description,
        "A fearsome wyvern known as the \"King of the Skies.\" It dives at prey from above.\nIts tail is venomous."
    );
}

#[test]
fn weakness_breakdown_is_complete() {
    let rec = record();
    let w = &rec.weakness_breakdown;
    assert!(check_weakness(w).is_ok());

    let parts: Vec<&str> = w.keys().map(String::as_str).collect();
    assert_eq!(parts, vec!["head", "overall", "tailTip", "wings"]);
    for attacks in w.values() {
        assert_eq!(attacks.len(), ATTACK_TYPES.len());
    }
    assert_eq!(w["overall"]["sever"], 45);
    assert_eq!(w["overall"]["fire"], 0);
    assert_eq!(w["head"]["dragon"], 30);
    assert_eq!(w["tailTip"]["ammo"], 15);
}

#[test]
fn status_effects_ranks() {
    let rec = record();
    assert!(check_status(&rec.status_effects).is_ok());
    assert_eq!(rec.status_effects.len(), MONSTER_STATUS_EFFECTS.len());
    assert_eq!(rec.status_effects["fireblight"], 0);
    assert_eq!(rec.status_effects["sleep"], 3);
    assert_eq!(rec.status_effects["blast"], 1);
}

#[test]
fn kinsect_extracts_by_colour() {
    let kinsect = record().kinsect_extracts.expect("kinsect section present");
    assert_eq!(kinsect["red"], strings(&["head"]));
    assert_eq!(kinsect["white"], strings(&["wings", "tail"]));
    assert_eq!(kinsect["orange"], strings(&["legs", "body"]));
}

#[test]
fn materials_per_rank() {
    let materials = record().materials.expect("materials section present");
    assert_eq!(materials.keys().copied().collect::<Vec<_>>(), vec![Rank::Low, Rank::High, Rank::Master]);

    let low = &materials[&Rank::Low];
    assert_eq!(low.len(), 2);
    let scale = &low[0];
    assert_eq!(scale.material_name, "Rathalos Scale");
    assert_eq!(scale.name_ja_zh, strings(&["火竜の鱗"]));
    assert_eq!(scale.emblem, "https://img.game8.co/rath_scale.png");
    assert_eq!(scale.target, Some(MaterialChance::new(35)));
    assert_eq!(
        scale.carve,
        Some(BTreeMap::from([
            ("body".to_string(), MaterialChance::new(38)),
            ("tail".to_string(), MaterialChance::with_amount(20, 2)),
        ]))
    );
    assert_eq!(scale.part_break, None);
    let drop = scale.drop.as_ref().expect("scale drops");
    assert_eq!(drop.normal, Some(MaterialChance::new(14)));
    assert_eq!(drop.riding, Some(MaterialChance::new(30)));
    assert_eq!(scale.palico, Some(MaterialChance::new(12)));

    let plate = &low[1];
    let breaks = plate.part_break.as_ref().expect("plate breaks");
    assert_eq!(breaks["tailTip"], MaterialChance::new(3));
    assert_eq!(plate.drop, None);

    let carapace = &materials[&Rank::High][0];
    assert_eq!(carapace.drop.as_ref().and_then(|d| d.normal.clone()), Some(MaterialChance::new(10)));

    let master = &materials[&Rank::Master][0];
    assert_eq!(master.material_name, "Rathalos Scale+");
    assert_eq!(master.emblem, "");
    assert_eq!(master.target, None);
}

#[test]
fn json_shape() {
    let v = serde_json::to_value(record()).unwrap();
    assert_eq!(v["name"], "Rathalos");
    assert_eq!(v["threatLevel"], 5);
    assert!(v.get("otherWeakness").is_none());
    assert_eq!(v["weaknessBreakdown"]["overall"]["thunder"], 20);
    assert_eq!(v["statusEffects"]["exhaust"], 2);
    assert_eq!(v["materials"]["LR"][0]["materialName"], "Rathalos Scale");
    assert_eq!(v["materials"]["LR"][0]["drop"]["riding"]["percentage"], 30);
    assert_eq!(v["materials"]["LR"][0]["carve"]["tail"]["amount"], 2);
}

#[test]
fn extraction_is_deterministic() {
    assert_eq!(record(), record());
}

#[test]
fn removing_a_required_table_fails_the_page() {
    let start = PAGE.find("<h3 class=\"a-header--3\">Status Effect").unwrap();
    let end = PAGE.find("<h3 class=\"a-header--3\">Kinsect").unwrap();
    let page = format!("{}{}", &PAGE[..start], &PAGE[end..]);
    assert!(matches!(extract_from_str(&page), Err(ExtractError::SectionNotFound(_))));
}

#[test]
fn kinsect_heading_over_prose_keeps_the_record() {
    let start = PAGE.find("<h3 class=\"a-header--3\">Kinsect").unwrap();
    let end = PAGE.find("<h2 class=\"a-header--2\">Rathalos Materials").unwrap();
    let page = format!(
        "{}<h2>Best Kinsect for Insect Glaive</h2><p>See our guide.</p>{}",
        &PAGE[..start],
        &PAGE[end..]
    );
    let rec = extract_from_str(&page).unwrap();
    assert!(rec.kinsect_extracts.is_none());
    assert!(rec.materials.is_some());
}

#[test]
fn empty_rating_is_rank_zero() {
    let page = PAGE.replace("<td>Fireblight</td><td>✕</td>", "<td>Fireblight</td><td>☆☆☆</td>");
    assert_ne!(page, PAGE);
    let rec = extract_from_str(&page).unwrap();
    assert_eq!(rec.status_effects["fireblight"], 0);
}

#[test]
fn removing_optional_sections_keeps_the_record() {
    let start = PAGE.find("<h3 class=\"a-header--3\">Kinsect").unwrap();
    let end = PAGE.find("<h2 class=\"a-header--2\">Related Guides").unwrap();
    let page = format!("{}{}", &PAGE[..start], &PAGE[end..]);
    let rec = extract_from_str(&page).unwrap();
    assert!(rec.kinsect_extracts.is_none());
    assert!(rec.materials.is_none());
    assert_eq!(rec.weakness_breakdown, record().weakness_breakdown);
}
