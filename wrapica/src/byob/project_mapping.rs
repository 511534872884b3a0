use crate::errors::ResolveError;
use crate::models::ProjectStorageMapping;
use crate::types::{is_uuid_format, Lookup, ProjectId, ProjectIdRef, ProjectName, ProjectNameRef};
use std::collections::HashMap;

/// Project storage mappings by project ID, and project IDs by name.
#[derive(Debug, Default)]
pub struct ProjectMappingIndex {
    by_id: HashMap<ProjectId, ProjectStorageMapping>,
    by_name: HashMap<ProjectName, ProjectId>,
}

impl ProjectMappingIndex {
    /// If a project appears more than once, the entry loaded last wins.
    pub fn new(project_mappings: Vec<ProjectStorageMapping>) -> Self {
        let mut index = Self::default();
        for mapping in project_mappings {
            index.add(mapping);
        }
        index
    }

    fn add(&mut self, mapping: ProjectStorageMapping) {
        if let Some(name) = &mapping.project_name {
            if let Some(previous) = self.by_name.insert(name.clone(), mapping.project_id.clone()) {
                if previous.as_str() != mapping.project_id.as_str() {
                    log::warn!(
                        "Project name \"{}\" now refers to \"{}\" instead of \"{}\"",
                        name,
                        mapping.project_id,
                        previous
                    );
                }
            }
        }
        let project_id = mapping.project_id.clone();
        if let Some(previous) = self.by_id.insert(project_id, mapping) {
            log::warn!(
                "Project \"{}\" is mapped more than once, ignoring the mapping to \"{}\"",
                previous.project_id,
                previous.storage_configuration_id
            );
            if let Some(name) = previous.project_name {
                self.forget_name(&name, &previous.project_id);
            }
        }
    }

    /// Remove a name left behind by a replaced mapping, unless the replacement re-added it.
    fn forget_name(&mut self, name: &ProjectNameRef, project_id: &ProjectIdRef) {
        let still_named = self
            .by_id
            .get(project_id)
            .and_then(|m| m.project_name.as_deref())
            == Some(name);
        let named_project = self.by_name.get(name).map(|id| id.as_str());
        if !still_named && named_project == Some(project_id.as_str()) {
            self.by_name.remove(name);
        }
    }

    /// Get the mapping of a project. [ResolveError::NotFound] means BYOB is not
    /// configured for the project.
    pub fn lookup(&self, project_id: &ProjectIdRef) -> Result<&ProjectStorageMapping, ResolveError> {
        self.by_id
            .get(project_id)
            .ok_or_else(|| ResolveError::not_found(Lookup::ProjectMapping, project_id))
    }

    /// Get a project ID from the optional `projectName` of the mappings.
    pub fn project_id_from_name(&self, name: &ProjectNameRef) -> Result<&ProjectIdRef, ResolveError> {
        self.by_name
            .get(name)
            .map(|id| &**id)
            .ok_or_else(|| ResolveError::not_found(Lookup::ProjectName, name))
    }

    /// Interpret a string which is either a project ID or a project name.
    ///
    /// 1. A known project ID is returned as-is.
    /// 2. A known project name is converted to its ID.
    /// 3. Anything else in UUID format is assumed to be an (unmapped) project ID.
    pub fn coerce_project_id(&self, id_or_name: &str) -> Result<ProjectId, ResolveError> {
        if self.by_id.contains_key(ProjectIdRef::from_str(id_or_name)) {
            return Ok(ProjectId::from(id_or_name));
        }
        match self.project_id_from_name(ProjectNameRef::from_str(id_or_name)) {
            Ok(id) => Ok(id.to_owned()),
            Err(_) if is_uuid_format(id_or_name) => Ok(ProjectId::from(id_or_name)),
            Err(e) => Err(e),
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = &ProjectStorageMapping> {
        self.by_id.values()
    }

    pub fn len(&self) -> usize {
        self.by_id.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_id.is_empty()
    }
}
