//! TeamHierarchy aggregate.
//!
//! One hierarchy per organisation: a forest of teams where every team has at
//! most one parent. Operations return a new hierarchy, the input is never
//! modified.
//!
//! # Invariants
//!
//! - `parent_id` is `None` or names a team in the hierarchy
//! - following `parent_id` from any team reaches a root
//! - `children` of a team lists exactly the teams whose parent it is

use std::collections::{BTreeMap, HashSet};

use super::{NewTeam, Team, TeamHierarchyError, TeamPatch, MAX_TEAM_NAME_LENGTH};
use crate::domain::foundation::{validation, FieldViolation, OrganisationId, TeamId};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TeamHierarchy {
    organisation_id: OrganisationId,
    teams: BTreeMap<TeamId, Team>,
    /// Team ids in the order they were added.
    order: Vec<TeamId>,
}

impl TeamHierarchy {
    /// Creates an empty hierarchy.
    pub fn new(organisation_id: OrganisationId) -> Self {
        Self {
            organisation_id,
            teams: BTreeMap::new(),
            order: Vec::new(),
        }
    }

    /// Rebuilds a hierarchy from teams listed in insertion order.
    ///
    /// # Errors
    ///
    /// - `Invalid` listing every structural violation found
    pub fn from_teams(
        organisation_id: OrganisationId,
        teams: Vec<Team>,
    ) -> Result<Self, TeamHierarchyError> {
        let mut hierarchy = Self::new(organisation_id);
        let mut violations = Vec::new();
        for (i, team) in teams.into_iter().enumerate() {
            if hierarchy.teams.contains_key(&team.id) {
                violations.push(FieldViolation::new(
                    format!("teams[{}].id", i),
                    format!("duplicate team id {}", team.id),
                ));
                continue;
            }
            hierarchy.order.push(team.id.clone());
            hierarchy.teams.insert(team.id.clone(), team);
        }
        violations.extend(hierarchy.validate());
        if violations.is_empty() {
            Ok(hierarchy)
        } else {
            Err(TeamHierarchyError::Invalid(violations))
        }
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Queries
    // ─────────────────────────────────────────────────────────────────────────

    pub fn organisation_id(&self) -> &OrganisationId {
        &self.organisation_id
    }

    pub fn get(&self, id: &TeamId) -> Option<&Team> {
        self.teams.get(id)
    }

    pub fn contains(&self, id: &TeamId) -> bool {
        self.teams.contains_key(id)
    }

    pub fn len(&self) -> usize {
        self.teams.len()
    }

    pub fn is_empty(&self) -> bool {
        self.teams.is_empty()
    }

    /// Iterates all teams in insertion order.
    pub fn teams(&self) -> impl Iterator<Item = &Team> {
        self.order.iter().filter_map(|id| self.teams.get(id))
    }

    /// Returns the teams without a parent, in insertion order.
    pub fn find_roots(&self) -> Vec<&Team> {
        self.teams().filter(|t| t.is_root()).collect()
    }

    /// Returns the direct children of a team, in attachment order.
    pub fn children_of(&self, id: &TeamId) -> Result<Vec<&Team>, TeamHierarchyError> {
        let team = self.require(id)?;
        Ok(team
            .children
            .iter()
            .filter_map(|c| self.teams.get(c))
            .collect())
    }

    /// Returns the chain of parents, nearest first.
    pub fn ancestors_of(&self, id: &TeamId) -> Result<Vec<&Team>, TeamHierarchyError> {
        self.require(id)?;
        Ok(self
            .ancestor_ids(id)
            .iter()
            .filter_map(|a| self.teams.get(a))
            .collect())
    }

    /// Returns every team below `id`, depth first.
    pub fn descendants_of(&self, id: &TeamId) -> Result<Vec<&Team>, TeamHierarchyError> {
        self.require(id)?;
        Ok(self
            .descendant_ids(id)
            .iter()
            .filter_map(|d| self.teams.get(d))
            .collect())
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Mutations
    // ─────────────────────────────────────────────────────────────────────────

    /// Adds a team, as a root or under an existing parent.
    ///
    /// # Errors
    ///
    /// - `Validation` if the name is blank or too long
    /// - `DuplicateId` if a team with the same id exists
    /// - `ParentNotFound` if `parent_id` names no team
    pub fn add_team(&self, new_team: NewTeam) -> Result<Self, TeamHierarchyError> {
        validation::require_text("name", &new_team.name, MAX_TEAM_NAME_LENGTH)?;
        if self.teams.contains_key(&new_team.id) {
            return Err(TeamHierarchyError::DuplicateId(new_team.id));
        }
        if let Some(parent_id) = &new_team.parent_id {
            if !self.teams.contains_key(parent_id) {
                return Err(TeamHierarchyError::ParentNotFound(parent_id.clone()));
            }
        }

        let mut next = self.clone();
        let id = new_team.id;
        next.teams.insert(
            id.clone(),
            Team {
                id: id.clone(),
                name: new_team.name.trim().to_string(),
                parent_id: None,
                children: Vec::new(),
            },
        );
        next.order.push(id.clone());
        next.set_parent(&id, new_team.parent_id);
        Ok(next)
    }

    /// Renames and/or reparents a team.
    ///
    /// # Errors
    ///
    /// - `TeamNotFound` if `id` names no team
    /// - `Validation` for a bad name
    /// - the errors of [`move_team`](Self::move_team) when reparenting
    pub fn update_team(&self, id: &TeamId, patch: TeamPatch) -> Result<Self, TeamHierarchyError> {
        self.require(id)?;
        let mut next = match patch.parent_id {
            Some(parent_id) => self.move_team(id, parent_id)?,
            None => self.clone(),
        };
        if let Some(name) = patch.name {
            validation::require_text("name", &name, MAX_TEAM_NAME_LENGTH)?;
            if let Some(team) = next.teams.get_mut(id) {
                team.name = name.trim().to_string();
            }
        }
        Ok(next)
    }

    /// Moves a team (with its subtree) under a new parent, or to the roots.
    ///
    /// # Errors
    ///
    /// - `TeamNotFound` if `id` names no team
    /// - `ParentNotFound` if the new parent names no team
    /// - `CycleDetected` if the new parent is the team itself or one of its descendants
    pub fn move_team(
        &self,
        id: &TeamId,
        new_parent_id: Option<TeamId>,
    ) -> Result<Self, TeamHierarchyError> {
        let team = self.require(id)?;
        if let Some(parent_id) = &new_parent_id {
            if !self.teams.contains_key(parent_id) {
                return Err(TeamHierarchyError::ParentNotFound(parent_id.clone()));
            }
            if parent_id == id || self.ancestor_ids(parent_id).contains(id) {
                return Err(TeamHierarchyError::CycleDetected {
                    team_id: id.clone(),
                    parent_id: parent_id.clone(),
                });
            }
        }
        if team.parent_id == new_parent_id {
            return Ok(self.clone());
        }

        let mut next = self.clone();
        next.set_parent(id, new_parent_id);
        Ok(next)
    }

    /// Removes a team and everything below it.
    ///
    /// # Errors
    ///
    /// - `TeamNotFound` if `id` names no team
    pub fn remove_team(&self, id: &TeamId) -> Result<Self, TeamHierarchyError> {
        self.require(id)?;
        let mut removed: HashSet<TeamId> = self.descendant_ids(id).into_iter().collect();
        removed.insert(id.clone());

        let mut next = self.clone();
        next.set_parent(id, None);
        next.teams.retain(|team_id, _| !removed.contains(team_id));
        next.order.retain(|team_id| !removed.contains(team_id));
        Ok(next)
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Validation
    // ─────────────────────────────────────────────────────────────────────────

    /// Collects every structural violation. Empty for any hierarchy built
    /// through the operations above.
    pub fn validate(&self) -> Vec<FieldViolation> {
        let mut violations = Vec::new();
        for (i, team) in self.teams().enumerate() {
            let field = |name: &str| format!("teams[{}].{}", i, name);

            if let Err(err) = validation::require_text("name", &team.name, MAX_TEAM_NAME_LENGTH) {
                violations.push(FieldViolation::new(field("name"), err.to_string()));
            }
            if let Some(parent_id) = &team.parent_id {
                if !self.teams.contains_key(parent_id) {
                    violations.push(FieldViolation::new(
                        field("parentId"),
                        format!("parent team {} not found", parent_id),
                    ));
                } else if self.walks_into_cycle(&team.id) {
                    violations.push(FieldViolation::new(
                        field("parentId"),
                        "parent chain contains a cycle",
                    ));
                }
            }

            let expected: HashSet<&TeamId> = self
                .teams
                .values()
                .filter(|t| t.parent_id.as_ref() == Some(&team.id))
                .map(|t| &t.id)
                .collect();
            let actual: HashSet<&TeamId> = team.children.iter().collect();
            if actual != expected || actual.len() != team.children.len() {
                violations.push(FieldViolation::new(
                    field("children"),
                    "children do not match the teams that name this team as parent",
                ));
            }
        }
        violations
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Private helpers
    // ─────────────────────────────────────────────────────────────────────────

    fn require(&self, id: &TeamId) -> Result<&Team, TeamHierarchyError> {
        self.teams
            .get(id)
            .ok_or_else(|| TeamHierarchyError::TeamNotFound(id.clone()))
    }

    /// Parent chain of `id`, nearest first. Bounded by the team count.
    fn ancestor_ids(&self, id: &TeamId) -> Vec<TeamId> {
        let mut ancestors = Vec::new();
        let mut current = self.teams.get(id).and_then(|t| t.parent_id.clone());
        while let Some(parent_id) = current {
            if ancestors.len() >= self.teams.len() {
                break;
            }
            current = self.teams.get(&parent_id).and_then(|t| t.parent_id.clone());
            ancestors.push(parent_id);
        }
        ancestors
    }

    fn walks_into_cycle(&self, id: &TeamId) -> bool {
        let mut seen = HashSet::new();
        seen.insert(id);
        let mut current = self.teams.get(id).and_then(|t| t.parent_id.as_ref());
        while let Some(parent_id) = current {
            if !seen.insert(parent_id) {
                return true;
            }
            current = self.teams.get(parent_id).and_then(|t| t.parent_id.as_ref());
        }
        false
    }

    /// Ids below `id`, depth-first pre-order.
    fn descendant_ids(&self, id: &TeamId) -> Vec<TeamId> {
        let mut descendants = Vec::new();
        let mut seen = HashSet::new();
        let mut stack: Vec<TeamId> = self
            .teams
            .get(id)
            .map(|t| t.children.iter().rev().cloned().collect())
            .unwrap_or_default();
        while let Some(next) = stack.pop() {
            if &next == id || !seen.insert(next.clone()) {
                continue;
            }
            if let Some(team) = self.teams.get(&next) {
                stack.extend(team.children.iter().rev().cloned());
            }
            descendants.push(next);
        }
        descendants
    }

    /// Detaches `id` from its current parent and attaches it to `parent_id`.
    fn set_parent(&mut self, id: &TeamId, parent_id: Option<TeamId>) {
        let old_parent = self.teams.get(id).and_then(|t| t.parent_id.clone());
        if let Some(old) = old_parent {
            if let Some(parent) = self.teams.get_mut(&old) {
                parent.children.retain(|c| c != id);
            }
        }
        if let Some(new) = &parent_id {
            if let Some(parent) = self.teams.get_mut(new) {
                parent.children.push(id.clone());
            }
        }
        if let Some(team) = self.teams.get_mut(id) {
            team.parent_id = parent_id;
        }
    }
}
