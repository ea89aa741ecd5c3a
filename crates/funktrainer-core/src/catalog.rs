//! Question catalog loading and flattening.
//!
//! Parses the JSON question bank (a recursively nested tree of sections)
//! and flattens it into a list of questions annotated with their category
//! path. The catalog is read once, fully materialized, before any
//! simulation starts.

use std::collections::{HashMap, HashSet};
use std::path::Path;

use crate::error::CatalogError;
use crate::model::{Catalog, CategorizedQuestion, Section};

/// Load and parse a catalog file.
pub fn load(path: &Path) -> Result<Catalog, CatalogError> {
    let content = std::fs::read_to_string(path).map_err(|source| CatalogError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    parse(&content).map_err(|source| CatalogError::Parse {
        path: path.to_path_buf(),
        source,
    })
}

/// Parse catalog JSON from a string (useful for testing).
pub fn parse(content: &str) -> Result<Catalog, serde_json::Error> {
    serde_json::from_str(content)
}

/// Flatten the section tree into questions tagged with their category path.
///
/// Questions may be attached at any nesting depth; the path of each is the
/// chain of titles from the root section down to its own.
pub fn flatten(catalog: &Catalog) -> Vec<CategorizedQuestion> {
    let mut list = Vec::new();
    let mut path = Vec::new();
    for section in &catalog.sections {
        walk(section, &mut path, &mut list);
    }
    tracing::debug!(questions = list.len(), "flattened catalog");
    list
}

fn walk(section: &Section, path: &mut Vec<String>, out: &mut Vec<CategorizedQuestion>) {
    path.push(section.title.clone());
    for question in &section.questions {
        out.push(CategorizedQuestion {
            question: question.clone(),
            category_path: path.clone(),
        });
    }
    for sub in &section.sections {
        walk(sub, path, out);
    }
    path.pop();
}

/// One entry of the indented category listing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CategoryEntry {
    /// Last element of the category path.
    pub title: String,
    /// Nesting depth, 0 for top-level categories.
    pub depth: usize,
    /// Number of questions at or below this category.
    pub count: usize,
}

/// Distinct category path prefixes in first-seen order, with question
/// counts. Drives the category selector of practice mode.
pub fn categories(questions: &[CategorizedQuestion]) -> Vec<CategoryEntry> {
    let mut order: Vec<Vec<String>> = Vec::new();
    let mut counts: HashMap<Vec<String>, usize> = HashMap::new();

    for q in questions {
        for depth in 0..q.category_path.len() {
            let prefix = q.category_path[..=depth].to_vec();
            if !counts.contains_key(&prefix) {
                order.push(prefix.clone());
            }
            *counts.entry(prefix).or_insert(0) += 1;
        }
    }

    order
        .into_iter()
        .map(|prefix| CategoryEntry {
            title: prefix.last().cloned().unwrap_or_default(),
            depth: prefix.len() - 1,
            count: counts[&prefix],
        })
        .collect()
}

/// A content problem detected in the catalog.
#[derive(Debug, Clone)]
pub struct ValidationWarning {
    /// Question number the warning refers to, if any.
    pub number: Option<String>,
    pub message: String,
}

/// Check the flattened catalog for content inconsistencies.
///
/// Warnings are advisory; a catalog with warnings still loads and runs.
pub fn validate(questions: &[CategorizedQuestion]) -> Vec<ValidationWarning> {
    let mut warnings = Vec::new();
    let mut seen: HashSet<&str> = HashSet::new();

    for q in questions {
        let question = &q.question;
        if !seen.insert(question.number.as_str()) {
            warnings.push(ValidationWarning {
                number: Some(question.number.clone()),
                message: "duplicate question number".to_string(),
            });
        }
        let answers = [
            &question.answer_a,
            &question.answer_b,
            &question.answer_c,
            &question.answer_d,
        ];
        if answers.iter().any(|a| a.trim().is_empty()) {
            warnings.push(ValidationWarning {
                number: Some(question.number.clone()),
                message: "empty answer text".to_string(),
            });
        }
        if !matches!(question.class.as_str(), "1" | "2" | "3") {
            warnings.push(ValidationWarning {
                number: Some(question.number.clone()),
                message: format!("unknown class '{}'", question.class),
            });
        }
    }

    warnings
}
