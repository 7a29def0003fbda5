// src/engine/locate.rs
//! Section locator.
//!
//! Walks every heading in document order and looks at the element right after
//! it. Headings whose text hits the lookup table claim that element for their
//! logical section.
//!
//! Duplicates: the first *recognised* body wins. A later heading for the same
//! section only replaces an earlier one whose body had an unrecognised shape.

use std::collections::BTreeMap;
use std::sync::LazyLock;

use scraper::{ElementRef, Html, Selector};
use tracing::{debug, warn};

use super::error::{ExtractError, TableError};
use super::matcher::lookup_contains;
use crate::config::lookup::Section;
use crate::core::html::{is_tab_group, is_table, next_element_sibling, normalize};

static HEADINGS: LazyLock<Selector> = LazyLock::new(|| {
    Selector::parse("h1, h2, h3, h4, h5, h6")
        .expect("BUG: hardcoded heading selector is statically valid")
});

#[derive(Debug, Clone, Copy)]
pub enum SectionBody<'a> {
    Table(ElementRef<'a>),
    TabGroup(ElementRef<'a>),
}

impl<'a> SectionBody<'a> {
    fn classify(el: ElementRef<'a>) -> Option<Self> {
        if is_table(el) {
            Some(SectionBody::Table(el))
        } else if is_tab_group(el) {
            Some(SectionBody::TabGroup(el))
        } else {
            None
        }
    }
}

#[derive(Debug, Clone)]
pub struct Located<'a> {
    pub heading: String,
    /// `Err` holds the tag name of an element that is neither table nor tab-group.
    pub body: Result<SectionBody<'a>, String>,
}

impl<'a> Located<'a> {
    pub fn body(&self) -> Result<SectionBody<'a>, TableError> {
        self.body.clone().map_err(TableError::NotATable)
    }
}

pub type SectionMap<'a> = BTreeMap<Section, Located<'a>>;

pub fn find_sections<'a>(doc: &'a Html, lookup: &[(&str, Section)]) -> SectionMap<'a> {
    let mut found: SectionMap<'a> = BTreeMap::new();

    for heading in doc.select(&HEADINGS) {
        let text = normalize(heading);
        let Some(section) = lookup_contains(lookup, &text) else { continue };
        let body = match next_element_sibling(heading) {
            Some(el) => SectionBody::classify(el).ok_or_else(|| s!(el.value().name())),
            None => Err(s!("nothing")),
        };

        let keep_existing = match found.get(&section) {
            Some(prev) if prev.body.is_ok() => {
                warn!(%section, first = %prev.heading, ignored = %text, "duplicate section heading");
                true
            }
            Some(_) => body.is_err(),
            None => false,
        };
        if keep_existing {
            continue;
        }
        debug!(%section, heading = %text, recognised = body.is_ok(), "section located");
        found.insert(section, Located { heading: text, body });
    }
    found
}

/// The section's body, or the error that explains why there isn't one.
pub fn required<'a>(map: &SectionMap<'a>, section: Section) -> Result<(String, SectionBody<'a>), ExtractError> {
    let located = map.get(&section).ok_or(ExtractError::SectionNotFound(section))?;
    let body = located.body().map_err(ExtractError::shape(section))?;
    Ok((located.heading.clone(), body))
}

/// Like `required`, but a missing heading, or one followed by something other
/// than a table or tab-group, is `Ok(None)`.
pub fn optional<'a>(map: &SectionMap<'a>, section: Section) -> Result<Option<(String, SectionBody<'a>)>, ExtractError> {
    match required(map, section) {
        Ok(found) => Ok(Some(found)),
        Err(ExtractError::SectionNotFound(_)) => Ok(None),
        Err(ExtractError::UnrecognizedTableShape { source: TableError::NotATable(tag), .. }) => {
            debug!(%section, %tag, "heading without a table, treated as absent");
            Ok(None)
        }
        Err(e) => Err(e),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::lookup::SECTIONS;

    #[test]
    fn finds_table_and_tab_group() {
        let doc = Html::parse_document(r#"
            <h2>Rathalos Weapon Damage Breakdown</h2>
            <table><tr><th>Part</th></tr></table>
            <h3>Kinsect Extracts</h3>
            <div class="a-tabContainer"></div>
            <h2>Related Guides</h2>
            <table></table>
        "#);
        let map = find_sections(&doc, SECTIONS);
        assert_eq!(map.len(), 2);
        assert!(matches!(map[&Section::WeaponWeakness].body, Ok(SectionBody::Table(_))));
        assert!(matches!(map[&Section::KinsectExtracts].body, Ok(SectionBody::TabGroup(_))));
        assert_eq!(map[&Section::WeaponWeakness].heading, "Rathalos Weapon Damage Breakdown");
    }

    #[test]
    fn whitespace_between_heading_and_table_is_skipped() {
        let doc = Html::parse_document("<h2>Kinsect</h2>\n<!-- c -->\n  <table></table>");
        let map = find_sections(&doc, SECTIONS);
        assert!(map[&Section::KinsectExtracts].body.is_ok());
    }

    #[test]
    fn first_recognised_match_wins() {
        let doc = Html::parse_document(r#"
            <h2>Kinsect Extracts</h2><table id="a"></table>
            <h2>Kinsect Tips</h2><table id="b"></table>
        "#);
        let map = find_sections(&doc, SECTIONS);
        let Ok(SectionBody::Table(t)) = &map[&Section::KinsectExtracts].body else { panic!() };
        assert_eq!(t.value().attr("id"), Some("a"));
    }

    #[test]
    fn recognised_body_replaces_unrecognised() {
        let doc = Html::parse_document(r#"
            <h2>Kinsect Extracts</h2><p>see below</p>
            <h2>Kinsect Extracts</h2><table id="b"></table>
        "#);
        let map = find_sections(&doc, SECTIONS);
        let Ok(SectionBody::Table(t)) = &map[&Section::KinsectExtracts].body else { panic!() };
        assert_eq!(t.value().attr("id"), Some("b"));
    }

    #[test]
    fn required_distinguishes_missing_from_misshapen() {
        let doc = Html::parse_document("<h2>Kinsect Extracts</h2><p>text</p>");
        let map = find_sections(&doc, SECTIONS);
        assert_eq!(
            required(&map, Section::WeaponWeakness).unwrap_err(),
            ExtractError::SectionNotFound(Section::WeaponWeakness)
        );
        assert_eq!(
            required(&map, Section::KinsectExtracts).unwrap_err(),
            ExtractError::UnrecognizedTableShape {
                section: Section::KinsectExtracts,
                source: TableError::NotATable(s!("p")),
            }
        );
        assert!(optional(&map, Section::Materials).unwrap().is_none());
    }

    #[test]
    fn optional_heading_over_prose_is_absent() {
        let doc = Html::parse_document("<h2>Best Kinsect for Insect Glaive</h2><p>See our guide.</p>");
        let map = find_sections(&doc, SECTIONS);
        assert!(map[&Section::KinsectExtracts].body.is_err());
        assert!(optional(&map, Section::KinsectExtracts).unwrap().is_none());
    }
}
