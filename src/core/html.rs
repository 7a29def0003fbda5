// src/core/html.rs
// Element-level helpers on top of the `scraper` DOM.
// Nothing here mutates the document; text is collected into fresh strings.

use std::sync::LazyLock;

use scraper::{ElementRef, Node, Selector};

use super::sanitize::{clean_text, first_word};
use crate::config::consts::TAB_GROUP_CLASS;

static IMG: LazyLock<Selector> = LazyLock::new(|| {
    Selector::parse("img").expect("BUG: hardcoded selector 'img' is statically valid")
});

/// Text content of an element with every `<br>` read as a newline.
/// Source newlines inside text nodes are plain whitespace.
pub fn normalize(el: ElementRef<'_>) -> String {
    let mut raw = String::new();
    for node in el.descendants() {
        match node.value() {
            Node::Text(text) => {
                raw.extend(text.chars().map(|c| if c == '\n' || c == '\r' { ' ' } else { c }));
            }
            Node::Element(e) if e.name().eq_ignore_ascii_case("br") => raw.push('\n'),
            _ => {}
        }
    }
    clean_text(&raw)
}

/// Cell text, or the icon labels (one per line) when the cell is icon-only.
pub fn text_or_icons(el: ElementRef<'_>) -> String {
    let text = normalize(el);
    if !text.is_empty() {
        return text;
    }
    icon_labels(el).join("\n")
}

/// First word of every icon's alt text, in document order.
pub fn icon_labels(el: ElementRef<'_>) -> Vec<String> {
    el.select(&IMG)
        .filter_map(|img| img.value().attr("alt"))
        .map(|alt| s!(first_word(alt)))
        .filter(|w| !w.is_empty())
        .collect()
}

/// Label of a lone icon; `None` when there are zero or several.
pub fn single_icon_label(el: ElementRef<'_>) -> Option<String> {
    let mut imgs = el.select(&IMG);
    let img = imgs.next()?;
    if imgs.next().is_some() {
        return None;
    }
    let word = first_word(img.value().attr("alt")?);
    (!word.is_empty()).then(|| s!(word))
}

/// Source of the first icon (lazy-loaded images keep it in `data-src`).
pub fn icon_src(el: ElementRef<'_>) -> Option<String> {
    let img = el.select(&IMG).next()?;
    let v = img.value();
    v.attr("data-src").or_else(|| v.attr("src")).map(String::from)
}

pub fn is_named(el: ElementRef<'_>, name: &str) -> bool {
    el.value().name().eq_ignore_ascii_case(name)
}

pub fn has_class(el: ElementRef<'_>, class: &str) -> bool {
    el.value().classes().any(|c| c.eq_ignore_ascii_case(class))
}

pub fn is_table(el: ElementRef<'_>) -> bool {
    is_named(el, "table")
}

pub fn is_tab_group(el: ElementRef<'_>) -> bool {
    has_class(el, TAB_GROUP_CLASS)
}

pub fn child_elements<'a>(el: ElementRef<'a>) -> impl Iterator<Item = ElementRef<'a>> {
    el.children().filter_map(ElementRef::wrap)
}

/// The next sibling that is an element (text and comments skipped).
pub fn next_element_sibling<'a>(el: ElementRef<'a>) -> Option<ElementRef<'a>> {
    el.next_siblings().filter_map(ElementRef::wrap).next()
}

/// Rows of this table only; rows of nested tables are not included.
pub fn table_rows<'a>(table: ElementRef<'a>) -> Vec<ElementRef<'a>> {
    let mut rows = Vec::new();
    for child in child_elements(table) {
        match child.value().name() {
            "tr" => rows.push(child),
            "thead" | "tbody" | "tfoot" => {
                rows.extend(child_elements(child).filter(|c| is_named(*c, "tr")));
            }
            _ => {}
        }
    }
    rows
}

pub fn row_cells<'a>(tr: ElementRef<'a>) -> Vec<ElementRef<'a>> {
    child_elements(tr)
        .filter(|c| matches!(c.value().name(), "td" | "th"))
        .collect()
}
