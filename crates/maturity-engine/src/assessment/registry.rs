//! Data-driven question-group registry.
//!
//! One registry replaces the per-(dimension, bracket, group) branching the
//! legacy assessment pages carried: every group is a row of required keys and
//! expected shapes, and a single validator consults it.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::bracket::Bracket;
use super::domain::Dimension;

/// Groups served per bracket. Every (dimension, bracket) pair owns exactly
/// this many ordered groups in a well-formed catalog.
pub const GROUPS_PER_BRACKET: usize = 3;

/// A catalog or lookup fault. Treated as fatal at startup; a request that
/// reaches an unknown entry afterwards indicates a bug upstream.
#[derive(Debug, thiserror::Error)]
pub enum CatalogError {
    #[error("unknown dimension identifier '{0}'")]
    UnknownDimension(String),
    #[error("unknown bracket label '{0}'")]
    UnknownBracket(String),
    #[error("no question groups registered for {dimension} at {bracket}")]
    MissingGroups {
        dimension: &'static str,
        bracket: &'static str,
    },
    #[error("group index {index} out of range for {dimension} at {bracket}")]
    GroupIndexOutOfRange {
        dimension: &'static str,
        bracket: &'static str,
        index: usize,
    },
    #[error("{dimension} at {bracket} registers {found} groups, expected {GROUPS_PER_BRACKET}")]
    WrongGroupCount {
        dimension: &'static str,
        bracket: &'static str,
        found: usize,
    },
    #[error("invalid catalog document: {0}")]
    Document(#[from] serde_json::Error),
}

/// Expected shape of a required answer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AnswerShape {
    /// Single string, non-empty after trimming.
    Text,
    /// Array of strings, non-empty.
    MultiSelect,
}

/// One required answer key with its expected shape.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldSpec {
    pub key: String,
    pub shape: AnswerShape,
}

/// One page/step of questions within a bracket.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GroupSpec {
    pub id: String,
    pub required: Vec<FieldSpec>,
}

/// Registry keyed by (dimension, bracket) holding each pair's ordered groups.
#[derive(Debug, Clone, Default)]
pub struct GroupRegistry {
    groups: BTreeMap<(Dimension, Bracket), Vec<GroupSpec>>,
}

impl GroupRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// The built-in standard catalog covering every dimension and bracket.
    pub fn standard() -> Self {
        super::catalog::standard_registry()
    }

    pub fn insert(&mut self, dimension: Dimension, bracket: Bracket, groups: Vec<GroupSpec>) {
        self.groups.insert((dimension, bracket), groups);
    }

    pub fn groups(
        &self,
        dimension: Dimension,
        bracket: Bracket,
    ) -> Result<&[GroupSpec], CatalogError> {
        self.groups
            .get(&(dimension, bracket))
            .map(Vec::as_slice)
            .ok_or(CatalogError::MissingGroups {
                dimension: dimension.key(),
                bracket: bracket.label(),
            })
    }

    pub fn group(
        &self,
        dimension: Dimension,
        bracket: Bracket,
        index: usize,
    ) -> Result<&GroupSpec, CatalogError> {
        let groups = self.groups(dimension, bracket)?;
        groups
            .get(index)
            .ok_or(CatalogError::GroupIndexOutOfRange {
                dimension: dimension.key(),
                bracket: bracket.label(),
                index,
            })
    }

    /// Startup check: every dimension/bracket pair must carry exactly
    /// [`GROUPS_PER_BRACKET`] groups and every group at least one field.
    pub fn validate(&self) -> Result<(), CatalogError> {
        for dimension in Dimension::ALL {
            for bracket in Bracket::ALL {
                let groups = self.groups(dimension, bracket)?;
                if groups.len() != GROUPS_PER_BRACKET {
                    return Err(CatalogError::WrongGroupCount {
                        dimension: dimension.key(),
                        bracket: bracket.label(),
                        found: groups.len(),
                    });
                }
            }
        }
        Ok(())
    }

    /// Load a registry from a JSON catalog document.
    pub fn from_json(document: &str) -> Result<Self, CatalogError> {
        let catalog: CatalogDocument = serde_json::from_str(document)?;
        let mut registry = Self::new();
        for entry in catalog.dimensions {
            for bracket_entry in entry.brackets {
                registry.insert(entry.dimension, bracket_entry.bracket, bracket_entry.groups);
            }
        }
        Ok(registry)
    }

    /// Serialize the registry back into a catalog document.
    pub fn to_json(&self) -> Result<String, CatalogError> {
        let mut dimensions: BTreeMap<Dimension, Vec<CatalogBracket>> = BTreeMap::new();
        for ((dimension, bracket), groups) in &self.groups {
            dimensions.entry(*dimension).or_default().push(CatalogBracket {
                bracket: *bracket,
                groups: groups.clone(),
            });
        }
        let document = CatalogDocument {
            dimensions: dimensions
                .into_iter()
                .map(|(dimension, brackets)| CatalogDimension {
                    dimension,
                    brackets,
                })
                .collect(),
        };
        Ok(serde_json::to_string_pretty(&document)?)
    }
}

/// On-disk catalog shape, mirroring how the legacy system kept its question
/// and scoring maps as JSON data files.
#[derive(Debug, Serialize, Deserialize)]
struct CatalogDocument {
    dimensions: Vec<CatalogDimension>,
}

#[derive(Debug, Serialize, Deserialize)]
struct CatalogDimension {
    dimension: Dimension,
    brackets: Vec<CatalogBracket>,
}

#[derive(Debug, Serialize, Deserialize)]
struct CatalogBracket {
    bracket: Bracket,
    groups: Vec<GroupSpec>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_group(id: &str) -> GroupSpec {
        GroupSpec {
            id: id.to_string(),
            required: vec![
                FieldSpec {
                    key: format!("{id}_answer"),
                    shape: AnswerShape::Text,
                },
                FieldSpec {
                    key: format!("{id}_tools"),
                    shape: AnswerShape::MultiSelect,
                },
            ],
        }
    }

    #[test]
    fn lookup_reports_missing_and_out_of_range_entries() {
        let mut registry = GroupRegistry::new();
        registry.insert(
            Dimension::Operations,
            Bracket::B1_0,
            vec![sample_group("ops_g1")],
        );

        assert!(registry.group(Dimension::Operations, Bracket::B1_0, 0).is_ok());
        assert!(matches!(
            registry.group(Dimension::Operations, Bracket::B1_0, 3),
            Err(CatalogError::GroupIndexOutOfRange { index: 3, .. })
        ));
        assert!(matches!(
            registry.groups(Dimension::Sales, Bracket::B1_0),
            Err(CatalogError::MissingGroups { .. })
        ));
    }

    #[test]
    fn standard_catalog_is_well_formed() {
        let registry = GroupRegistry::standard();
        registry.validate().expect("standard catalog validates");
        for dimension in Dimension::ALL {
            for bracket in Bracket::ALL {
                for group in registry.groups(dimension, bracket).unwrap() {
                    assert!(!group.required.is_empty(), "{}", group.id);
                }
            }
        }
    }

    #[test]
    fn standard_catalog_keys_are_unique() {
        let registry = GroupRegistry::standard();
        let mut seen = std::collections::BTreeSet::new();
        for dimension in Dimension::ALL {
            for bracket in Bracket::ALL {
                for group in registry.groups(dimension, bracket).unwrap() {
                    for field in &group.required {
                        assert!(seen.insert(field.key.clone()), "duplicate key {}", field.key);
                    }
                }
            }
        }
    }

    #[test]
    fn catalog_documents_round_trip() {
        let mut registry = GroupRegistry::new();
        registry.insert(
            Dimension::Strategy,
            Bracket::B3_0,
            vec![sample_group("strat_g1"), sample_group("strat_g2")],
        );

        let json = registry.to_json().expect("serializes");
        let reloaded = GroupRegistry::from_json(&json).expect("parses");
        assert_eq!(
            reloaded.groups(Dimension::Strategy, Bracket::B3_0).unwrap(),
            registry.groups(Dimension::Strategy, Bracket::B3_0).unwrap()
        );
    }

    #[test]
    fn validate_rejects_partial_catalogs() {
        let mut registry = GroupRegistry::standard();
        registry.insert(Dimension::Leadership, Bracket::B4_0, vec![sample_group("x")]);
        assert!(matches!(
            registry.validate(),
            Err(CatalogError::WrongGroupCount { found: 1, .. })
        ));
    }
}
