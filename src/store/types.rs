// This file is part of the product Tagstore.
// SPDX-FileCopyrightText: 2026 Tagstore Contributors
// SPDX-License-Identifier: AGPL-3.0-or-later
// The code and documentation in this repository is licensed under the GNU Affero General Public License v3.0 or later (AGPL-3.0-or-later). See LICENSE.

use serde::{Deserialize, Serialize};
use std::fmt;

pub type TaxonomyId = u32;
pub type TagId = u32;
pub type EntityId = u32;

pub const MAX_FIELD_CHARS: usize = 255;
pub const MAX_TAG_COUNT: usize = 10000;

/// Separator used in materialized tag paths; excluded from tag names.
pub const PATH_SEPARATOR: char = '/';

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct TaxonomyRecord {
    pub name: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct TagRecord {
    pub taxonomy_id: TaxonomyId,
    pub name: String,
    #[serde(default)]
    pub parent_id: Option<TagId>,
    pub path: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct EntityRecord {
    pub entity_type: String,
    pub external_id: String,
}

#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct Taxonomy {
    pub id: TaxonomyId,
    pub name: String,
}

#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct Tag {
    pub id: TagId,
    pub taxonomy_id: TaxonomyId,
    pub name: String,
    pub parent_id: Option<TagId>,
    pub path: String,
}

#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct Entity {
    pub id: EntityId,
    pub entity_type: String,
    pub external_id: String,
}

#[derive(Debug)]
pub struct FieldValidationError {
    message: String,
}

impl FieldValidationError {
    pub(crate) fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

impl fmt::Display for FieldValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::error::Error for FieldValidationError {}

pub fn validate_taxonomy_name(name: &str) -> Result<(), FieldValidationError> {
    validate_required_field("Taxonomy name", name)
}

pub fn validate_tag_name(name: &str) -> Result<(), FieldValidationError> {
    validate_required_field("Tag name", name)?;
    if name.contains(PATH_SEPARATOR) {
        return Err(FieldValidationError::new(format!(
            "Tag name must not contain '{}'",
            PATH_SEPARATOR
        )));
    }
    Ok(())
}

pub fn validate_entity_field(label: &str, value: &str) -> Result<(), FieldValidationError> {
    validate_required_field(label, value)
}

fn validate_required_field(label: &str, value: &str) -> Result<(), FieldValidationError> {
    if value.is_empty() {
        return Err(FieldValidationError::new(format!("{} is required", label)));
    }
    if value.chars().count() > MAX_FIELD_CHARS {
        return Err(FieldValidationError::new(format!(
            "{} must be at most {} characters",
            label, MAX_FIELD_CHARS
        )));
    }
    Ok(())
}
