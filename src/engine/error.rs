// src/engine/error.rs
use thiserror::Error;

use crate::config::lookup::Section;

/// Shape problems inside a single table or tab-group.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TableError {
    #[error("expected a table or tab-group, found <{0}>")]
    NotATable(String),
    #[error("table has no header row")]
    NoHeader,
    #[error("duplicate column '{0}'")]
    DuplicateColumn(String),
    #[error("row {row} has {found} cells, header has {expected}")]
    CellCount { row: usize, expected: usize, found: usize },
    #[error("tab label has no usable index: {0:?}")]
    TabIndex(String),
    #[error("no table for tab {index} ('{name}')")]
    MissingTabPanel { index: usize, name: String },
    #[error("tab-group has no tabs")]
    NoTabs,
    #[error("conflicting values for row '{row}', column '{column}'")]
    MergeConflict { row: String, column: String },
}

/// One variant per structural invariant of a composite field.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("weakness breakdown has no 'overall' entry")]
    MissingOverall,
    #[error("part '{part}' attack types: missing {missing:?}, unexpected {extra:?}")]
    AttackTypes { part: String, missing: Vec<String>, extra: Vec<String> },
    #[error("part '{part}' has no integer value for '{attack}'")]
    NonInteger { part: String, attack: String },
    #[error("part '{part}' has negative multiplier {value} for '{attack}'")]
    NegativeMultiplier { part: String, attack: String, value: i32 },
    #[error("status effects: missing {missing:?}, unexpected {extra:?}")]
    StatusKeys { missing: Vec<String>, extra: Vec<String> },
    #[error("status effect '{status}' rank {value} is outside 0..=3")]
    StatusRange { status: String, value: i32 },
    #[error("status effect '{status}' has no integer rank")]
    StatusNonInteger { status: String },
}

/// Why a single document produced no record.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ExtractError {
    #[error("section not found: {0}")]
    SectionNotFound(Section),
    #[error("unrecognized table shape in {section}: {source}")]
    UnrecognizedTableShape {
        section: Section,
        #[source]
        source: TableError,
    },
    #[error("invalid {section}: {source}")]
    Validation {
        section: Section,
        #[source]
        source: ValidationError,
    },
    #[error("missing field '{0}'")]
    MissingField(&'static str),
}

impl ExtractError {
    pub fn shape(section: Section) -> impl FnOnce(TableError) -> ExtractError {
        move |source| ExtractError::UnrecognizedTableShape { section, source }
    }

    pub fn invalid(section: Section) -> impl FnOnce(ValidationError) -> ExtractError {
        move |source| ExtractError::Validation { section, source }
    }

    /// Stable kind name for reports.
    pub fn label(&self) -> &'static str {
        match self {
            ExtractError::SectionNotFound(_) => "section-not-found",
            ExtractError::UnrecognizedTableShape { .. } => "table-shape",
            ExtractError::Validation { .. } => "validation",
            ExtractError::MissingField(_) => "missing-field",
        }
    }
}
