// src/engine/table.rs
//! Table normalizer.
//!
//! Turns a `<table>` into a [`NormalizedTable`]: the first row is the header,
//! every later row is keyed by its first cell and the remaining cells are
//! aligned to the header **by position**. Header names are canonical tokens,
//! taken from the cell text or, for icon-only cells, from the icon's alt text.
//!
//! Tab-groups are unpacked with [`extract_tabs`]; parallel tables describing
//! the same rows are combined with [`merge_rows`].

use std::collections::BTreeMap;
use std::sync::LazyLock;

use scraper::{ElementRef, Selector};
use tracing::debug;

use super::error::TableError;
use super::locate::SectionBody;
use crate::config::consts::{TAB_INDEX_ATTR, TAB_PANEL_ATTR};
use crate::core::html::{
    icon_src, is_table, normalize, row_cells, single_icon_label, table_rows, text_or_icons,
};
use crate::core::sanitize::to_token;

static TAB_LABELS: LazyLock<Selector> = LazyLock::new(|| {
    Selector::parse(&format!("[{TAB_INDEX_ATTR}]"))
        .expect("BUG: tab label selector is statically valid")
});

static TAB_PANELS: LazyLock<Selector> = LazyLock::new(|| {
    Selector::parse(&format!("[{TAB_PANEL_ATTR}]"))
        .expect("BUG: tab panel selector is statically valid")
});

static TABLE: LazyLock<Selector> = LazyLock::new(|| {
    Selector::parse("table").expect("BUG: hardcoded selector 'table' is statically valid")
});

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Row {
    /// Cleaned text of the first cell.
    pub key: String,
    /// Icon source in the first cell, if any.
    pub key_icon: Option<String>,
    pub cells: BTreeMap<String, String>,
}

impl Row {
    pub fn get(&self, column: &str) -> Option<&str> {
        self.cells.get(column).map(String::as_str)
    }

    /// Row key as a canonical token.
    pub fn token(&self) -> String {
        to_token(&self.key)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NormalizedTable {
    key_column: String,
    columns: Vec<String>,
    rows: Vec<Row>,
}

impl NormalizedTable {
    pub fn from_table(table: ElementRef<'_>) -> Result<Self, TableError> {
        let rows = table_rows(table);
        let (header, body) = rows.split_first().ok_or(TableError::NoHeader)?;

        let header_cells = row_cells(*header);
        if header_cells.is_empty() {
            return Err(TableError::NoHeader);
        }

        let mut names: Vec<String> = Vec::with_capacity(header_cells.len());
        for (i, cell) in header_cells.iter().enumerate() {
            let name = header_name(*cell, i);
            if names.contains(&name) {
                return Err(TableError::DuplicateColumn(name));
            }
            names.push(name);
        }

        let mut out = Vec::with_capacity(body.len());
        for (i, tr) in body.iter().enumerate() {
            let cells = row_cells(*tr);
            if cells.is_empty() || is_divider(&cells) {
                debug!(row = i + 1, "skipping divider row");
                continue;
            }
            if cells.len() != names.len() {
                return Err(TableError::CellCount { row: i + 1, expected: names.len(), found: cells.len() });
            }

            let key = text_or_icons(cells[0]);
            let key_icon = icon_src(cells[0]);
            let cells = names[1..]
                .iter()
                .cloned()
                .zip(cells[1..].iter().map(|c| text_or_icons(*c)))
                .collect();
            out.push(Row { key, key_icon, cells });
        }

        let mut names = names.into_iter();
        let key_column = names.next().unwrap_or_default();
        Ok(Self { key_column, columns: names.collect(), rows: out })
    }

    pub fn key_column(&self) -> &str { &self.key_column }

    /// Data columns, left to right (the key column excluded).
    pub fn columns(&self) -> &[String] { &self.columns }

    pub fn rows(&self) -> &[Row] { &self.rows }
}

fn header_name(cell: ElementRef<'_>, index: usize) -> String {
    let text = normalize(cell);
    let name = if text.is_empty() {
        single_icon_label(cell).map(|l| to_token(&l)).unwrap_or_default()
    } else {
        to_token(&text)
    };
    if name.is_empty() { format!("column{index}") } else { name }
}

/// A lone cell spanning several columns (sub-heading rows).
fn is_divider(cells: &[ElementRef<'_>]) -> bool {
    cells.len() == 1
        && cells[0]
            .value()
            .attr("colspan")
            .and_then(|v| v.trim().parse::<usize>().ok())
            .is_some_and(|n| n > 1)
}

/// Label/value pairs of a vertical info box: `<th>Label</th><td>Value</td>`,
/// possibly several pairs per row. Rows without a pair are skipped.
pub fn key_values(table: ElementRef<'_>) -> Vec<(String, String)> {
    let mut out = Vec::new();
    for tr in table_rows(table) {
        for pair in row_cells(tr).chunks_exact(2) {
            let key = normalize(pair[0]);
            if key.is_empty() {
                continue;
            }
            out.push((key, text_or_icons(pair[1])));
        }
    }
    out
}

#[derive(Debug, Clone, Copy)]
pub struct Tab<'a> {
    pub index: usize,
    pub table: ElementRef<'a>,
}

#[derive(Debug, Clone)]
pub struct NamedTab<'a> {
    pub name: String,
    pub tab: Tab<'a>,
}

/// Tabs of a tab-group, ordered by their index attribute.
pub fn extract_tabs<'a>(container: ElementRef<'a>) -> Result<Vec<NamedTab<'a>>, TableError> {
    let panels: Vec<ElementRef<'a>> = container.select(&TAB_PANELS).collect();

    let mut tabs = Vec::new();
    for label in container.select(&TAB_LABELS) {
        let raw = label.value().attr(TAB_INDEX_ATTR).unwrap_or_default();
        let index: usize = raw.trim().parse().map_err(|_| TableError::TabIndex(s!(raw)))?;
        let name = normalize(label);

        let table = panels
            .iter()
            .filter(|p| p.value().attr(TAB_PANEL_ATTR).map(str::trim) == Some(raw.trim()))
            .find_map(|p| if is_table(*p) { Some(*p) } else { p.select(&TABLE).next() })
            .ok_or_else(|| TableError::MissingTabPanel { index, name: name.clone() })?;

        tabs.push(NamedTab { name, tab: Tab { index, table } });
    }

    if tabs.is_empty() {
        return Err(TableError::NoTabs);
    }
    tabs.sort_by_key(|t| t.tab.index);
    Ok(tabs)
}

/// The table itself, or the first tab's table.
pub fn primary_table<'a>(body: SectionBody<'a>) -> Result<ElementRef<'a>, TableError> {
    match body {
        SectionBody::Table(t) => Ok(t),
        SectionBody::TabGroup(c) => Ok(extract_tabs(c)?[0].tab.table),
    }
}

/// `(name, table)` pairs: one per tab, or the plain table under `heading`.
pub fn named_tables<'a>(heading: &str, body: SectionBody<'a>) -> Result<Vec<(String, ElementRef<'a>)>, TableError> {
    match body {
        SectionBody::Table(t) => Ok(vec![(s!(heading), t)]),
        SectionBody::TabGroup(c) => {
            Ok(extract_tabs(c)?.into_iter().map(|t| (t.name, t.tab.table)).collect())
        }
    }
}

/// Row token → column → text.
pub type RowMap = BTreeMap<String, BTreeMap<String, String>>;

/// Deep-merge tables that describe the same rows with (normally) disjoint
/// columns. Equal values under the same key are fine; differing ones are a
/// conflict rather than an overwrite.
pub fn merge_rows(tables: &[NormalizedTable]) -> Result<RowMap, TableError> {
    let mut merged = RowMap::new();
    for table in tables {
        for row in table.rows() {
            let key = row.token();
            let entry = merged.entry(key.clone()).or_default();
            for (column, value) in &row.cells {
                match entry.get(column) {
                    Some(existing) if existing != value => {
                        return Err(TableError::MergeConflict { row: key, column: column.clone() });
                    }
                    _ => {
                        entry.insert(column.clone(), value.clone());
                    }
                }
            }
        }
    }
    Ok(merged)
}
