//! ChangeTeamHierarchyHandler - Command handler for team hierarchy edits.
//!
//! An organisation without a stored hierarchy starts from an empty one, so
//! the first `AddTeam` creates it.

use std::sync::Arc;

use crate::application::handlers::envelope_for;
use crate::domain::foundation::{CommandMetadata, EventId, OrganisationId, TeamId, Timestamp};
use crate::domain::team::{
    NewTeam, TeamChange, TeamHierarchy, TeamHierarchyChanged, TeamHierarchyError, TeamPatch,
};
use crate::ports::{EventPublisher, TeamHierarchyStore};

/// One edit to an organisation's hierarchy.
#[derive(Debug, Clone)]
pub enum TeamHierarchyCommand {
    AddTeam(NewTeam),
    UpdateTeam { team_id: TeamId, patch: TeamPatch },
    MoveTeam { team_id: TeamId, new_parent_id: Option<TeamId> },
    RemoveTeam { team_id: TeamId },
}

impl TeamHierarchyCommand {
    fn team_id(&self) -> &TeamId {
        match self {
            TeamHierarchyCommand::AddTeam(new_team) => &new_team.id,
            TeamHierarchyCommand::UpdateTeam { team_id, .. }
            | TeamHierarchyCommand::MoveTeam { team_id, .. }
            | TeamHierarchyCommand::RemoveTeam { team_id } => team_id,
        }
    }

    fn change(&self) -> TeamChange {
        match self {
            TeamHierarchyCommand::AddTeam(_) => TeamChange::Added,
            TeamHierarchyCommand::UpdateTeam { .. } => TeamChange::Updated,
            TeamHierarchyCommand::MoveTeam { .. } => TeamChange::Moved,
            TeamHierarchyCommand::RemoveTeam { .. } => TeamChange::Removed,
        }
    }
}

#[derive(Debug, Clone)]
pub struct ChangeTeamHierarchyResult {
    pub hierarchy: TeamHierarchy,
    pub event: TeamHierarchyChanged,
}

pub struct ChangeTeamHierarchyHandler {
    hierarchies: Arc<dyn TeamHierarchyStore>,
    event_publisher: Arc<dyn EventPublisher>,
}

impl ChangeTeamHierarchyHandler {
    pub fn new(
        hierarchies: Arc<dyn TeamHierarchyStore>,
        event_publisher: Arc<dyn EventPublisher>,
    ) -> Self {
        Self {
            hierarchies,
            event_publisher,
        }
    }

    pub async fn handle(
        &self,
        organisation_id: OrganisationId,
        cmd: TeamHierarchyCommand,
        metadata: CommandMetadata,
    ) -> Result<ChangeTeamHierarchyResult, TeamHierarchyError> {
        // 1. Load (or start empty)
        let current = self
            .hierarchies
            .get_by_organisation_id(&organisation_id)
            .await?
            .unwrap_or_else(|| TeamHierarchy::new(organisation_id.clone()));

        // 2. Apply (pure)
        let team_id = cmd.team_id().clone();
        let change = cmd.change();
        let mut removed_team_ids = Vec::new();
        let result = match cmd {
            TeamHierarchyCommand::AddTeam(new_team) => current.add_team(new_team),
            TeamHierarchyCommand::UpdateTeam { team_id, patch } => {
                current.update_team(&team_id, patch)
            }
            TeamHierarchyCommand::MoveTeam {
                team_id,
                new_parent_id,
            } => current.move_team(&team_id, new_parent_id),
            TeamHierarchyCommand::RemoveTeam { team_id } => {
                if let Ok(descendants) = current.descendants_of(&team_id) {
                    removed_team_ids.push(team_id.clone());
                    removed_team_ids.extend(descendants.into_iter().map(|t| t.id.clone()));
                }
                current.remove_team(&team_id)
            }
        };
        let hierarchy = result.map_err(|err| {
            tracing::warn!(
                organisation_id = %organisation_id,
                team_id = %team_id,
                error = %err,
                "Team hierarchy change rejected"
            );
            err
        })?;

        // 3. Persist
        self.hierarchies.save(&organisation_id, &hierarchy).await?;

        // 4. Publish event
        let event = TeamHierarchyChanged {
            event_id: EventId::new(),
            organisation_id: organisation_id.clone(),
            change,
            team_id: team_id.clone(),
            removed_team_ids,
            changed_at: Timestamp::now(),
        };
        self.event_publisher
            .publish(envelope_for(&event, &metadata)?)
            .await?;

        tracing::info!(
            organisation_id = %organisation_id,
            team_id = %team_id,
            change = ?change,
            "Team hierarchy changed"
        );
        Ok(ChangeTeamHierarchyResult { hierarchy, event })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::{InMemoryEventBus, InMemoryTeamHierarchyStore};
    use crate::application::handlers::test_support::{metadata, org};

    fn tid(id: &str) -> TeamId {
        TeamId::new(id).unwrap()
    }

    struct Fixture {
        store: Arc<InMemoryTeamHierarchyStore>,
        events: Arc<InMemoryEventBus>,
        handler: ChangeTeamHierarchyHandler,
    }

    fn fixture() -> Fixture {
        let store = Arc::new(InMemoryTeamHierarchyStore::new());
        let events = Arc::new(InMemoryEventBus::new());
        let handler = ChangeTeamHierarchyHandler::new(store.clone(), events.clone());
        Fixture {
            store,
            events,
            handler,
        }
    }

    async fn run(f: &Fixture, cmd: TeamHierarchyCommand) -> Result<TeamHierarchy, TeamHierarchyError> {
        f.handler
            .handle(org(), cmd, metadata())
            .await
            .map(|r| r.hierarchy)
    }

    #[tokio::test]
    async fn first_add_creates_the_hierarchy() {
        let f = fixture();
        run(&f, TeamHierarchyCommand::AddTeam(NewTeam::root(tid("eng"), "Engineering")))
            .await
            .unwrap();

        let stored = f.store.get_by_organisation_id(&org()).await.unwrap().unwrap();
        assert_eq!(stored.len(), 1);
        assert!(f.events.has_event("team_hierarchy.changed"));
    }

    #[tokio::test]
    async fn remove_reports_every_removed_team() {
        let f = fixture();
        run(&f, TeamHierarchyCommand::AddTeam(NewTeam::root(tid("a"), "A")))
            .await
            .unwrap();
        run(&f, TeamHierarchyCommand::AddTeam(NewTeam::child_of(tid("a"), tid("b"), "B")))
            .await
            .unwrap();

        let result = f
            .handler
            .handle(
                org(),
                TeamHierarchyCommand::RemoveTeam { team_id: tid("a") },
                metadata(),
            )
            .await
            .unwrap();

        assert!(result.hierarchy.is_empty());
        assert_eq!(result.event.removed_team_ids, vec![tid("a"), tid("b")]);
    }

    #[tokio::test]
    async fn cycle_is_rejected_and_nothing_is_saved() {
        let f = fixture();
        run(&f, TeamHierarchyCommand::AddTeam(NewTeam::root(tid("a"), "A")))
            .await
            .unwrap();
        run(&f, TeamHierarchyCommand::AddTeam(NewTeam::child_of(tid("a"), tid("b"), "B")))
            .await
            .unwrap();
        let events_before = f.events.event_count();

        let result = run(
            &f,
            TeamHierarchyCommand::MoveTeam {
                team_id: tid("a"),
                new_parent_id: Some(tid("b")),
            },
        )
        .await;

        assert!(matches!(result, Err(TeamHierarchyError::CycleDetected { .. })));
        let stored = f.store.get_by_organisation_id(&org()).await.unwrap().unwrap();
        assert!(stored.get(&tid("a")).unwrap().is_root());
        assert_eq!(f.events.event_count(), events_before);
    }

    #[tokio::test]
    async fn update_on_missing_hierarchy_is_team_not_found() {
        let f = fixture();
        let result = run(
            &f,
            TeamHierarchyCommand::UpdateTeam {
                team_id: tid("x"),
                patch: TeamPatch::rename("X"),
            },
        )
        .await;
        assert_eq!(result, Err(TeamHierarchyError::TeamNotFound(tid("x"))));
    }
}
