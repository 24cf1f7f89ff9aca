// This file is part of the product Tagstore.
// SPDX-FileCopyrightText: 2026 Tagstore Contributors
// SPDX-License-Identifier: AGPL-3.0-or-later
// The code and documentation in this repository is licensed under the GNU Affero General Public License v3.0 or later (AGPL-3.0-or-later). See LICENSE.

use std::collections::BTreeMap;
use std::fmt;
use std::path::{Path, PathBuf};
use std::sync::RwLock;

pub mod types;
mod yaml_store;

pub use types::{
    Entity, EntityId, EntityRecord, MAX_FIELD_CHARS, MAX_TAG_COUNT, Tag, TagId, TagRecord,
    Taxonomy, TaxonomyId, TaxonomyRecord, validate_entity_field, validate_tag_name,
    validate_taxonomy_name,
};

pub const TAXONOMIES_FILE_NAME: &str = "taxonomies.yaml";
pub const TAGS_FILE_NAME: &str = "tags.yaml";
pub const ENTITIES_FILE_NAME: &str = "entities.yaml";

#[derive(Debug)]
pub enum TagstoreError {
    Validation(String),
    NotFound(String),
    Conflict(String),
    Storage(String),
}

impl TagstoreError {
    fn lock_poisoned() -> Self {
        TagstoreError::Storage("Tagstore lock poisoned".to_string())
    }
}

impl fmt::Display for TagstoreError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TagstoreError::Validation(msg) => write!(f, "{}", msg),
            TagstoreError::NotFound(msg) => write!(f, "{}", msg),
            TagstoreError::Conflict(msg) => write!(f, "{}", msg),
            TagstoreError::Storage(msg) => write!(f, "{}", msg),
        }
    }
}

impl std::error::Error for TagstoreError {}

impl From<types::FieldValidationError> for TagstoreError {
    fn from(err: types::FieldValidationError) -> Self {
        TagstoreError::Validation(err.to_string())
    }
}

#[derive(Debug, Default, Clone)]
struct StoreState {
    taxonomies: BTreeMap<TaxonomyId, TaxonomyRecord>,
    tags: BTreeMap<TagId, TagRecord>,
    entities: BTreeMap<EntityId, EntityRecord>,
}

/// Persistent store for taxonomies, tags, and entities.
///
/// Each concern lives in its own YAML file under `state/sys/`, written
/// atomically. Tags are append-only through this API: `add_tag` is the only
/// way a tag comes into existence, so materialized paths never go stale.
#[derive(Debug)]
pub struct Tagstore {
    taxonomies_file: PathBuf,
    tags_file: PathBuf,
    entities_file: PathBuf,
    state: RwLock<StoreState>,
}

impl Tagstore {
    pub fn open(state_sys_dir: &Path) -> Result<Self, TagstoreError> {
        let taxonomies_file = state_sys_dir.join(TAXONOMIES_FILE_NAME);
        let tags_file = state_sys_dir.join(TAGS_FILE_NAME);
        let entities_file = state_sys_dir.join(ENTITIES_FILE_NAME);

        let taxonomies = yaml_store::read_yaml_file(&taxonomies_file, "taxonomies")
            .map_err(|err| TagstoreError::Storage(err.to_string()))?
            .unwrap_or_default();
        let tags = yaml_store::read_yaml_file(&tags_file, "tags")
            .map_err(|err| TagstoreError::Storage(err.to_string()))?
            .unwrap_or_default();
        let entities = yaml_store::read_yaml_file(&entities_file, "entities")
            .map_err(|err| TagstoreError::Storage(err.to_string()))?
            .unwrap_or_default();

        let state = StoreState {
            taxonomies,
            tags,
            entities,
        };
        validate_state(&state)?;

        Ok(Self {
            taxonomies_file,
            tags_file,
            entities_file,
            state: RwLock::new(state),
        })
    }

    pub fn create_taxonomy(&self, name: &str) -> Result<Taxonomy, TagstoreError> {
        validate_taxonomy_name(name)?;
        let mut guard = self
            .state
            .write()
            .map_err(|_| TagstoreError::lock_poisoned())?;
        if guard
            .taxonomies
            .values()
            .any(|taxonomy| taxonomy.name == name)
        {
            return Err(TagstoreError::Conflict("Taxonomy already exists".to_string()));
        }

        let id = next_id(&guard.taxonomies);
        let mut taxonomies = guard.taxonomies.clone();
        taxonomies.insert(
            id,
            TaxonomyRecord {
                name: name.to_string(),
            },
        );
        yaml_store::write_yaml_file(&self.taxonomies_file, "taxonomies", &taxonomies)
            .map_err(|err| TagstoreError::Storage(err.to_string()))?;
        guard.taxonomies = taxonomies;

        Ok(Taxonomy {
            id,
            name: name.to_string(),
        })
    }

    /// Removes a taxonomy and every tag it owns.
    pub fn delete_taxonomy(&self, id: TaxonomyId) -> Result<(), TagstoreError> {
        let mut guard = self
            .state
            .write()
            .map_err(|_| TagstoreError::lock_poisoned())?;
        if !guard.taxonomies.contains_key(&id) {
            return Err(TagstoreError::NotFound("Taxonomy not found".to_string()));
        }

        let mut tags = guard.tags.clone();
        tags.retain(|_, tag| tag.taxonomy_id != id);
        let mut taxonomies = guard.taxonomies.clone();
        taxonomies.remove(&id);

        yaml_store::write_yaml_file(&self.tags_file, "tags", &tags)
            .map_err(|err| TagstoreError::Storage(err.to_string()))?;
        guard.tags = tags;
        yaml_store::write_yaml_file(&self.taxonomies_file, "taxonomies", &taxonomies)
            .map_err(|err| TagstoreError::Storage(err.to_string()))?;
        guard.taxonomies = taxonomies;

        Ok(())
    }

    /// Creates a new tag in the taxonomy, deriving its path from the parent.
    ///
    /// All semantic validation lives here: the taxonomy must exist, the name
    /// must be unique within it, and the parent (when given) must be an
    /// existing tag of the same taxonomy. Cycles cannot arise because only
    /// new leaf tags are created and existing tags are immutable.
    pub fn add_tag(
        &self,
        taxonomy_id: TaxonomyId,
        name: &str,
        parent_id: Option<TagId>,
    ) -> Result<Tag, TagstoreError> {
        validate_tag_name(name)?;
        let mut guard = self
            .state
            .write()
            .map_err(|_| TagstoreError::lock_poisoned())?;
        if !guard.taxonomies.contains_key(&taxonomy_id) {
            return Err(TagstoreError::NotFound("Taxonomy not found".to_string()));
        }
        if guard.tags.len() >= MAX_TAG_COUNT {
            return Err(TagstoreError::Validation(format!(
                "Tags must be at most {} entries",
                MAX_TAG_COUNT
            )));
        }
        if guard
            .tags
            .values()
            .any(|tag| tag.taxonomy_id == taxonomy_id && tag.name == name)
        {
            return Err(TagstoreError::Conflict(
                "Tag already exists in taxonomy".to_string(),
            ));
        }

        let path = match parent_id {
            Some(parent_id) => {
                let parent = guard
                    .tags
                    .get(&parent_id)
                    .ok_or_else(|| TagstoreError::NotFound("Parent tag not found".to_string()))?;
                if parent.taxonomy_id != taxonomy_id {
                    return Err(TagstoreError::Validation(
                        "Parent tag belongs to a different taxonomy".to_string(),
                    ));
                }
                format!("{}{}{}", parent.path, types::PATH_SEPARATOR, name)
            }
            None => name.to_string(),
        };

        let id = next_id(&guard.tags);
        let mut tags = guard.tags.clone();
        tags.insert(
            id,
            TagRecord {
                taxonomy_id,
                name: name.to_string(),
                parent_id,
                path: path.clone(),
            },
        );
        yaml_store::write_yaml_file(&self.tags_file, "tags", &tags)
            .map_err(|err| TagstoreError::Storage(err.to_string()))?;
        guard.tags = tags;

        Ok(Tag {
            id,
            taxonomy_id,
            name: name.to_string(),
            parent_id,
            path,
        })
    }

    pub fn add_entity(
        &self,
        entity_type: &str,
        external_id: &str,
    ) -> Result<Entity, TagstoreError> {
        validate_entity_field("Entity type", entity_type)?;
        validate_entity_field("External id", external_id)?;
        let mut guard = self
            .state
            .write()
            .map_err(|_| TagstoreError::lock_poisoned())?;
        if guard
            .entities
            .values()
            .any(|entity| entity.entity_type == entity_type && entity.external_id == external_id)
        {
            return Err(TagstoreError::Conflict("Entity already exists".to_string()));
        }

        let id = next_id(&guard.entities);
        let mut entities = guard.entities.clone();
        entities.insert(
            id,
            EntityRecord {
                entity_type: entity_type.to_string(),
                external_id: external_id.to_string(),
            },
        );
        yaml_store::write_yaml_file(&self.entities_file, "entities", &entities)
            .map_err(|err| TagstoreError::Storage(err.to_string()))?;
        guard.entities = entities;

        Ok(Entity {
            id,
            entity_type: entity_type.to_string(),
            external_id: external_id.to_string(),
        })
    }

    pub fn taxonomy(&self, id: TaxonomyId) -> Result<Option<Taxonomy>, TagstoreError> {
        let guard = self
            .state
            .read()
            .map_err(|_| TagstoreError::lock_poisoned())?;
        Ok(guard
            .taxonomies
            .get(&id)
            .map(|record| Taxonomy {
                id,
                name: record.name.clone(),
            }))
    }

    pub fn tag(&self, id: TagId) -> Result<Option<Tag>, TagstoreError> {
        let guard = self
            .state
            .read()
            .map_err(|_| TagstoreError::lock_poisoned())?;
        Ok(guard.tags.get(&id).map(|record| to_tag(id, record)))
    }

    /// Exact-match tag lookup by name, scoped to one taxonomy.
    pub fn tag_by_name(
        &self,
        taxonomy_id: TaxonomyId,
        name: &str,
    ) -> Result<Option<Tag>, TagstoreError> {
        let guard = self
            .state
            .read()
            .map_err(|_| TagstoreError::lock_poisoned())?;
        Ok(guard
            .tags
            .iter()
            .find(|(_, record)| record.taxonomy_id == taxonomy_id && record.name == name)
            .map(|(id, record)| to_tag(*id, record)))
    }

    pub fn list_taxonomies(&self) -> Result<Vec<Taxonomy>, TagstoreError> {
        let guard = self
            .state
            .read()
            .map_err(|_| TagstoreError::lock_poisoned())?;
        Ok(guard
            .taxonomies
            .iter()
            .map(|(id, record)| Taxonomy {
                id: *id,
                name: record.name.clone(),
            })
            .collect())
    }

    /// Lists tags sorted by path, optionally limited to one taxonomy and
    /// filtered by a case-insensitive substring match on the path.
    pub fn list_tags(
        &self,
        taxonomy_id: Option<TaxonomyId>,
        query: Option<&str>,
    ) -> Result<Vec<Tag>, TagstoreError> {
        let guard = self
            .state
            .read()
            .map_err(|_| TagstoreError::lock_poisoned())?;
        let needle = query.map(|value| value.to_lowercase());
        let mut tags: Vec<Tag> = guard
            .tags
            .iter()
            .filter(|(_, record)| {
                taxonomy_id.is_none_or(|wanted| record.taxonomy_id == wanted)
            })
            .filter(|(_, record)| {
                needle
                    .as_deref()
                    .is_none_or(|needle| record.path.to_lowercase().contains(needle))
            })
            .map(|(id, record)| to_tag(*id, record))
            .collect();
        tags.sort_by(|a, b| a.path.cmp(&b.path));
        Ok(tags)
    }

    /// Lists entities, filtered by a case-insensitive substring match against
    /// either `entity_type` or `external_id`.
    pub fn list_entities(&self, query: Option<&str>) -> Result<Vec<Entity>, TagstoreError> {
        let guard = self
            .state
            .read()
            .map_err(|_| TagstoreError::lock_poisoned())?;
        let needle = query.map(|value| value.to_lowercase());
        let mut entities: Vec<Entity> = guard
            .entities
            .iter()
            .filter(|(_, record)| {
                needle.as_deref().is_none_or(|needle| {
                    record.entity_type.to_lowercase().contains(needle)
                        || record.external_id.to_lowercase().contains(needle)
                })
            })
            .map(|(id, record)| Entity {
                id: *id,
                entity_type: record.entity_type.clone(),
                external_id: record.external_id.clone(),
            })
            .collect();
        entities.sort_by(|a, b| {
            (&a.entity_type, &a.external_id).cmp(&(&b.entity_type, &b.external_id))
        });
        Ok(entities)
    }
}

fn to_tag(id: TagId, record: &TagRecord) -> Tag {
    Tag {
        id,
        taxonomy_id: record.taxonomy_id,
        name: record.name.clone(),
        parent_id: record.parent_id,
        path: record.path.clone(),
    }
}

fn next_id<T>(map: &BTreeMap<u32, T>) -> u32 {
    map.keys().next_back().map(|id| id + 1).unwrap_or(1)
}

/// Cross-checks loaded records; an inconsistent store file aborts startup.
fn validate_state(state: &StoreState) -> Result<(), TagstoreError> {
    if state.tags.len() > MAX_TAG_COUNT {
        return Err(TagstoreError::Storage(format!(
            "Tags file holds more than {} entries",
            MAX_TAG_COUNT
        )));
    }
    for record in state.taxonomies.values() {
        validate_taxonomy_name(&record.name)
            .map_err(|err| TagstoreError::Storage(err.to_string()))?;
    }
    for (id, record) in &state.tags {
        validate_tag_name(&record.name).map_err(|err| TagstoreError::Storage(err.to_string()))?;
        if !state.taxonomies.contains_key(&record.taxonomy_id) {
            return Err(TagstoreError::Storage(format!(
                "Tag {} references missing taxonomy {}",
                id, record.taxonomy_id
            )));
        }
        let expected_path = match record.parent_id {
            Some(parent_id) => {
                let parent = state.tags.get(&parent_id).ok_or_else(|| {
                    TagstoreError::Storage(format!(
                        "Tag {} references missing parent {}",
                        id, parent_id
                    ))
                })?;
                if parent.taxonomy_id != record.taxonomy_id {
                    return Err(TagstoreError::Storage(format!(
                        "Tag {} has parent from a different taxonomy",
                        id
                    )));
                }
                format!("{}{}{}", parent.path, types::PATH_SEPARATOR, record.name)
            }
            None => record.name.clone(),
        };
        if record.path != expected_path {
            return Err(TagstoreError::Storage(format!(
                "Tag {} path '{}' does not match derived path '{}'",
                id, record.path, expected_path
            )));
        }
    }
    for record in state.entities.values() {
        validate_entity_field("Entity type", &record.entity_type)
            .map_err(|err| TagstoreError::Storage(err.to_string()))?;
        validate_entity_field("External id", &record.external_id)
            .map_err(|err| TagstoreError::Storage(err.to_string()))?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    fn open_store(dir: &Path) -> Tagstore {
        Tagstore::open(dir).expect("open store")
    }

    #[test]
    fn root_tag_path_is_its_name() {
        let temp = tempfile::tempdir().expect("tempdir");
        let store = open_store(temp.path());
        let taxonomy = store.create_taxonomy("science").expect("taxonomy");

        let tag = store.add_tag(taxonomy.id, "physics", None).expect("tag");
        assert_eq!(tag.path, "physics");
        assert_eq!(tag.parent_id, None);
    }

    #[test]
    fn child_tag_path_extends_parent_path() {
        let temp = tempfile::tempdir().expect("tempdir");
        let store = open_store(temp.path());
        let taxonomy = store.create_taxonomy("science").expect("taxonomy");

        let physics = store.add_tag(taxonomy.id, "physics", None).expect("parent");
        let quantum = store
            .add_tag(taxonomy.id, "quantum", Some(physics.id))
            .expect("child");
        let chromo = store
            .add_tag(taxonomy.id, "chromodynamics", Some(quantum.id))
            .expect("grandchild");

        assert_eq!(quantum.path, "physics/quantum");
        assert_eq!(chromo.path, "physics/quantum/chromodynamics");
        assert_eq!(chromo.parent_id, Some(quantum.id));
    }

    #[test]
    fn duplicate_name_within_taxonomy_rejected() {
        let temp = tempfile::tempdir().expect("tempdir");
        let store = open_store(temp.path());
        let taxonomy = store.create_taxonomy("science").expect("taxonomy");

        store.add_tag(taxonomy.id, "physics", None).expect("first");
        let error = store
            .add_tag(taxonomy.id, "physics", None)
            .expect_err("duplicate");
        assert!(matches!(error, TagstoreError::Conflict(_)));
    }

    #[test]
    fn same_name_allowed_across_taxonomies() {
        let temp = tempfile::tempdir().expect("tempdir");
        let store = open_store(temp.path());
        let science = store.create_taxonomy("science").expect("taxonomy");
        let library = store.create_taxonomy("library").expect("taxonomy");

        store.add_tag(science.id, "physics", None).expect("first");
        store.add_tag(library.id, "physics", None).expect("second");
    }

    #[test]
    fn parent_from_other_taxonomy_rejected() {
        let temp = tempfile::tempdir().expect("tempdir");
        let store = open_store(temp.path());
        let science = store.create_taxonomy("science").expect("taxonomy");
        let library = store.create_taxonomy("library").expect("taxonomy");
        let physics = store.add_tag(science.id, "physics", None).expect("parent");

        let error = store
            .add_tag(library.id, "quantum", Some(physics.id))
            .expect_err("cross-taxonomy parent");
        assert!(matches!(error, TagstoreError::Validation(_)));
    }

    #[test]
    fn unknown_parent_rejected() {
        let temp = tempfile::tempdir().expect("tempdir");
        let store = open_store(temp.path());
        let taxonomy = store.create_taxonomy("science").expect("taxonomy");

        let error = store
            .add_tag(taxonomy.id, "quantum", Some(999))
            .expect_err("missing parent");
        assert!(matches!(error, TagstoreError::NotFound(_)));
    }

    #[test]
    fn unknown_taxonomy_rejected() {
        let temp = tempfile::tempdir().expect("tempdir");
        let store = open_store(temp.path());

        let error = store.add_tag(7, "physics", None).expect_err("missing taxonomy");
        assert!(matches!(error, TagstoreError::NotFound(_)));
    }

    #[test]
    fn tag_by_name_is_exact_and_taxonomy_scoped() {
        let temp = tempfile::tempdir().expect("tempdir");
        let store = open_store(temp.path());
        let science = store.create_taxonomy("science").expect("taxonomy");
        let library = store.create_taxonomy("library").expect("taxonomy");
        let physics = store.add_tag(science.id, "physics", None).expect("tag");

        let found = store
            .tag_by_name(science.id, "physics")
            .expect("lookup")
            .expect("present");
        assert_eq!(found.id, physics.id);

        assert!(store.tag_by_name(science.id, "Physics").expect("lookup").is_none());
        assert!(store.tag_by_name(library.id, "physics").expect("lookup").is_none());
    }

    #[test]
    fn store_persists_across_reopen() {
        let temp = tempfile::tempdir().expect("tempdir");
        let taxonomy_id;
        let child_id;
        {
            let store = open_store(temp.path());
            let taxonomy = store.create_taxonomy("science").expect("taxonomy");
            taxonomy_id = taxonomy.id;
            let physics = store.add_tag(taxonomy.id, "physics", None).expect("parent");
            let quantum = store
                .add_tag(taxonomy.id, "quantum", Some(physics.id))
                .expect("child");
            child_id = quantum.id;
            store.add_entity("xblock", "block-v1:demo").expect("entity");
        }

        let reopened = open_store(temp.path());
        let quantum = reopened.tag(child_id).expect("lookup").expect("present");
        assert_eq!(quantum.path, "physics/quantum");
        assert_eq!(quantum.taxonomy_id, taxonomy_id);
        let entities = reopened.list_entities(None).expect("entities");
        assert_eq!(entities.len(), 1);
        assert_eq!(entities[0].entity_type, "xblock");
    }

    #[test]
    fn delete_taxonomy_cascades_to_tags() {
        let temp = tempfile::tempdir().expect("tempdir");
        let store = open_store(temp.path());
        let science = store.create_taxonomy("science").expect("taxonomy");
        let library = store.create_taxonomy("library").expect("taxonomy");
        store.add_tag(science.id, "physics", None).expect("tag");
        store.add_tag(library.id, "fiction", None).expect("tag");

        store.delete_taxonomy(science.id).expect("delete");

        assert!(store.taxonomy(science.id).expect("lookup").is_none());
        let remaining = store.list_tags(None, None).expect("tags");
        assert_eq!(remaining.len(), 1);
        assert_eq!(remaining[0].name, "fiction");
    }

    #[test]
    fn entity_pair_must_be_unique() {
        let temp = tempfile::tempdir().expect("tempdir");
        let store = open_store(temp.path());

        store.add_entity("xblock", "block-v1:demo").expect("first");
        let error = store
            .add_entity("xblock", "block-v1:demo")
            .expect_err("duplicate");
        assert!(matches!(error, TagstoreError::Conflict(_)));

        store.add_entity("course", "block-v1:demo").expect("other type");
    }

    #[test]
    fn list_tags_filters_by_path_substring() {
        let temp = tempfile::tempdir().expect("tempdir");
        let store = open_store(temp.path());
        let taxonomy = store.create_taxonomy("science").expect("taxonomy");
        let physics = store.add_tag(taxonomy.id, "physics", None).expect("tag");
        store
            .add_tag(taxonomy.id, "quantum", Some(physics.id))
            .expect("tag");
        store.add_tag(taxonomy.id, "biology", None).expect("tag");

        let matched = store.list_tags(None, Some("PHYS")).expect("search");
        let paths: Vec<&str> = matched.iter().map(|tag| tag.path.as_str()).collect();
        assert_eq!(paths, vec!["physics", "physics/quantum"]);
    }

    #[test]
    fn list_entities_matches_either_field() {
        let temp = tempfile::tempdir().expect("tempdir");
        let store = open_store(temp.path());
        store.add_entity("xblock", "block-v1:demoX").expect("entity");
        store.add_entity("course", "course-v1:intro").expect("entity");

        let by_type = store.list_entities(Some("xblock")).expect("search");
        assert_eq!(by_type.len(), 1);
        assert_eq!(by_type[0].external_id, "block-v1:demoX");

        let by_external = store.list_entities(Some("intro")).expect("search");
        assert_eq!(by_external.len(), 1);
        assert_eq!(by_external[0].entity_type, "course");

        let none = store.list_entities(Some("missing")).expect("search");
        assert!(none.is_empty());
    }

    #[test]
    fn open_rejects_inconsistent_tags_file() {
        let temp = tempfile::tempdir().expect("tempdir");
        let tags_yaml = r#"1:
  taxonomy_id: 1
  name: "orphan"
  parent_id: 99
  path: "orphan"
"#;
        fs::write(temp.path().join(TAGS_FILE_NAME), tags_yaml).expect("write tags");
        fs::write(temp.path().join(TAXONOMIES_FILE_NAME), "1:\n  name: \"science\"\n")
            .expect("write taxonomies");

        let error = Tagstore::open(temp.path()).expect_err("should fail");
        assert!(error.to_string().contains("missing parent"));
    }

    #[test]
    fn open_rejects_stale_path() {
        let temp = tempfile::tempdir().expect("tempdir");
        let tags_yaml = r#"1:
  taxonomy_id: 1
  name: "physics"
  path: "renamed"
"#;
        fs::write(temp.path().join(TAGS_FILE_NAME), tags_yaml).expect("write tags");
        fs::write(temp.path().join(TAXONOMIES_FILE_NAME), "1:\n  name: \"science\"\n")
            .expect("write taxonomies");

        let error = Tagstore::open(temp.path()).expect_err("should fail");
        assert!(error.to_string().contains("derived path"));
    }
}
