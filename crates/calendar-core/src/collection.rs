//! The client's in-memory event collection.
//!
//! Mutations apply locally right away and leave a pending entry behind. The
//! shell sends each pending [`StoreCommand`] to the backend and reports the
//! outcome through [`EventCollection::settle`]: success drops the entry,
//! failure rolls the local change back.

use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

use crate::event::{CalendarEvent, EventDraft};

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CollectionError {
    #[error("event title must not be empty")]
    EmptyTitle,

    #[error("event {0} not found")]
    NotFound(String),
}

/// Handle for one local mutation awaiting store acknowledgement.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct MutationId(pub u64);

/// What the backend has to do to persist a local mutation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StoreCommand {
    Create(CalendarEvent),
    Update(CalendarEvent),
    Delete { id: String },
}

impl StoreCommand {
    pub fn event_id(&self) -> &str {
        match self {
            StoreCommand::Create(event) | StoreCommand::Update(event) => &event.id,
            StoreCommand::Delete { id } => id,
        }
    }

    fn rekey(&mut self, from: &str, to: &str) {
        match self {
            StoreCommand::Create(event) | StoreCommand::Update(event) if event.id == from => {
                event.id = to.to_string();
            }
            StoreCommand::Delete { id } if id == from => *id = to.to_string(),
            _ => {}
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum Undo {
    Remove { id: String },
    Restore(CalendarEvent),
    Reinsert { index: usize, event: CalendarEvent },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PendingMutation {
    pub id: MutationId,
    pub command: StoreCommand,
    /// Set once the shell has handed the command to the store client.
    pub dispatched: bool,
    undo: Undo,
}

/// Successful store outcome.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StoreAck {
    Accepted,
    /// The store assigned its own id to a created event.
    Created { id: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Settlement {
    Confirmed,
    RolledBack,
    /// No pending mutation with that id.
    Unknown,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EventCollection {
    events: Vec<CalendarEvent>,
    pending: Vec<PendingMutation>,
    next_mutation: u64,
}

impl EventCollection {
    pub fn new(events: Vec<CalendarEvent>) -> Self {
        EventCollection {
            events,
            pending: Vec::new(),
            next_mutation: 0,
        }
    }

    pub fn events(&self) -> &[CalendarEvent] {
        &self.events
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    pub fn get(&self, id: &str) -> Option<&CalendarEvent> {
        self.events.iter().find(|event| event.id == id)
    }

    pub fn pending(&self) -> &[PendingMutation] {
        &self.pending
    }

    /// Pending commands the shell has not sent yet.
    pub fn undispatched(&self) -> impl Iterator<Item = &PendingMutation> {
        self.pending.iter().filter(|p| !p.dispatched)
    }

    /// Undispatched commands that can go out now.
    ///
    /// A command waits while an earlier mutation of the same event is still
    /// pending, so it carries the id the store assigned on create.
    pub fn ready(&self) -> Vec<&PendingMutation> {
        self.pending
            .iter()
            .enumerate()
            .filter(|(i, p)| {
                !p.dispatched
                    && !self.pending[..*i]
                        .iter()
                        .any(|earlier| earlier.command.event_id() == p.command.event_id())
            })
            .map(|(_, p)| p)
            .collect()
    }

    /// Whether the event has a mutation the store has not confirmed.
    pub fn is_pending(&self, event_id: &str) -> bool {
        self.pending
            .iter()
            .any(|p| p.command.event_id() == event_id)
    }

    /// Replace the whole collection, dropping anything still pending.
    pub fn replace_all(&mut self, events: Vec<CalendarEvent>) {
        self.events = events;
        self.pending.clear();
    }

    /// Append a new event with a fresh id.
    pub fn create(&mut self, draft: EventDraft) -> Result<MutationId, CollectionError> {
        if !draft.has_title() {
            return Err(CollectionError::EmptyTitle);
        }

        let event = CalendarEvent::from_draft(Uuid::new_v4().to_string(), draft);
        let undo = Undo::Remove {
            id: event.id.clone(),
        };
        self.events.push(event.clone());
        Ok(self.enqueue(StoreCommand::Create(event), undo))
    }

    /// Overwrite every field but the id of an existing event.
    pub fn update(&mut self, id: &str, draft: EventDraft) -> Result<MutationId, CollectionError> {
        if !draft.has_title() {
            return Err(CollectionError::EmptyTitle);
        }

        let event = self
            .events
            .iter_mut()
            .find(|event| event.id == id)
            .ok_or_else(|| CollectionError::NotFound(id.to_string()))?;

        let previous = event.clone();
        event.apply(draft);
        let updated = event.clone();
        Ok(self.enqueue(StoreCommand::Update(updated), Undo::Restore(previous)))
    }

    pub fn delete(&mut self, id: &str) -> Result<MutationId, CollectionError> {
        let index = self
            .events
            .iter()
            .position(|event| event.id == id)
            .ok_or_else(|| CollectionError::NotFound(id.to_string()))?;

        let event = self.events.remove(index);
        Ok(self.enqueue(
            StoreCommand::Delete { id: id.to_string() },
            Undo::Reinsert { index, event },
        ))
    }

    pub fn mark_dispatched(&mut self, mutation: MutationId) {
        if let Some(pending) = self.pending.iter_mut().find(|p| p.id == mutation) {
            pending.dispatched = true;
        }
    }

    /// Resolve a pending mutation with the store's answer.
    pub fn settle(
        &mut self,
        mutation: MutationId,
        outcome: Result<StoreAck, String>,
    ) -> Settlement {
        let Some(position) = self.pending.iter().position(|p| p.id == mutation) else {
            return Settlement::Unknown;
        };
        let pending = self.pending.remove(position);

        match outcome {
            Ok(StoreAck::Accepted) => Settlement::Confirmed,
            Ok(StoreAck::Created { id }) => {
                let local_id = pending.command.event_id().to_string();
                self.rekey(&local_id, &id);
                Settlement::Confirmed
            }
            Err(reason) => {
                tracing::warn!(
                    "rolling back mutation {:?} on {}: {}",
                    mutation,
                    pending.command.event_id(),
                    reason
                );

                // Later changes to the same event were made on top of this
                // one; they go too, undone newest first.
                let event_id = pending.command.event_id().to_string();
                let mut undos = vec![pending.undo];
                let mut index = position;
                while index < self.pending.len() {
                    if self.pending[index].command.event_id() == event_id {
                        undos.push(self.pending.remove(index).undo);
                    } else {
                        index += 1;
                    }
                }
                for undo in undos.into_iter().rev() {
                    self.undo(undo);
                }
                Settlement::RolledBack
            }
        }
    }

    fn enqueue(&mut self, command: StoreCommand, undo: Undo) -> MutationId {
        let id = MutationId(self.next_mutation);
        self.next_mutation += 1;
        self.pending.push(PendingMutation {
            id,
            command,
            dispatched: false,
            undo,
        });
        id
    }

    fn undo(&mut self, undo: Undo) {
        match undo {
            Undo::Remove { id } => self.events.retain(|event| event.id != id),
            Undo::Restore(previous) => {
                if let Some(event) = self.events.iter_mut().find(|e| e.id == previous.id) {
                    *event = previous;
                }
            }
            Undo::Reinsert { index, event } => {
                let index = index.min(self.events.len());
                self.events.insert(index, event);
            }
        }
    }

    /// Switch a local id to the one the store assigned, including in any
    /// commands and undo records still waiting on it.
    fn rekey(&mut self, from: &str, to: &str) {
        if from == to {
            return;
        }
        for event in self.events.iter_mut().filter(|e| e.id == from) {
            event.id = to.to_string();
        }
        for pending in &mut self.pending {
            pending.command.rekey(from, to);
            match &mut pending.undo {
                Undo::Remove { id } if id == from => *id = to.to_string(),
                Undo::Restore(event) | Undo::Reinsert { event, .. } if event.id == from => {
                    event.id = to.to_string();
                }
                _ => {}
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::event::sample_events;
    use chrono::NaiveDate;

    fn day() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 3, 15).unwrap()
    }

    fn draft(title: &str) -> EventDraft {
        let mut draft = EventDraft::blank(day());
        draft.title = title.to_string();
        draft
    }

    fn seeded() -> EventCollection {
        EventCollection::new(sample_events(day()))
    }

    #[test]
    fn test_create_appends_with_new_id() {
        let mut events = seeded();
        let mutation = events.create(draft("Gym")).unwrap();

        assert_eq!(events.len(), 3);
        let created = &events.events()[2];
        assert_eq!(created.title, "Gym");
        assert!(Uuid::parse_str(&created.id).is_ok());
        assert_eq!(events.pending().len(), 1);
        assert_eq!(events.pending()[0].id, mutation);
        assert!(matches!(events.pending()[0].command, StoreCommand::Create(_)));
    }

    #[test]
    fn test_create_blank_title_is_rejected() {
        let mut events = seeded();
        let before = events.clone();

        assert_eq!(events.create(draft("   ")), Err(CollectionError::EmptyTitle));
        assert_eq!(events, before);
        assert!(events.pending().is_empty());
    }

    #[test]
    fn test_ids_are_unique() {
        let mut events = EventCollection::default();
        for i in 0..50 {
            events.create(draft(&format!("event {}", i))).unwrap();
        }
        let mut ids: Vec<_> = events.events().iter().map(|e| e.id.clone()).collect();
        ids.sort();
        ids.dedup();
        assert_eq!(ids.len(), 50);
    }

    #[test]
    fn test_update_replaces_fields() {
        let mut events = seeded();
        let mut changed = draft("Team Retro");
        changed.location = Some("Room B".to_string());
        events.update("1", changed).unwrap();

        let event = events.get("1").unwrap();
        assert_eq!(event.title, "Team Retro");
        assert_eq!(event.location.as_deref(), Some("Room B"));
        assert_eq!(event.description, None);
    }

    #[test]
    fn test_update_and_delete_unknown_id() {
        let mut events = seeded();
        let before = events.clone();

        assert_eq!(
            events.update("missing", draft("x")),
            Err(CollectionError::NotFound("missing".to_string()))
        );
        assert_eq!(
            events.delete("missing"),
            Err(CollectionError::NotFound("missing".to_string()))
        );
        assert_eq!(events, before);
    }

    #[test]
    fn test_confirmed_create_is_rekeyed() {
        let mut events = seeded();
        let mutation = events.create(draft("Gym")).unwrap();
        let local_id = events.events()[2].id.clone();

        // Edit again before the store answers
        let follow_up = events.update(&local_id, draft("Gym (legs)")).unwrap();

        let server_id = Uuid::new_v4().to_string();
        let settled = events.settle(
            mutation,
            Ok(StoreAck::Created {
                id: server_id.clone(),
            }),
        );
        assert_eq!(settled, Settlement::Confirmed);
        assert!(events.get(&local_id).is_none());
        assert_eq!(events.get(&server_id).unwrap().title, "Gym (legs)");

        let pending = &events.pending()[0];
        assert_eq!(pending.id, follow_up);
        assert_eq!(pending.command.event_id(), server_id);
    }

    #[test]
    fn test_failed_create_rolls_back() {
        let mut events = seeded();
        let before = events.events().to_vec();
        let mutation = events.create(draft("Gym")).unwrap();

        let settled = events.settle(mutation, Err("offline".to_string()));
        assert_eq!(settled, Settlement::RolledBack);
        assert_eq!(events.events(), before.as_slice());
        assert!(events.pending().is_empty());
    }

    #[test]
    fn test_failed_update_restores_previous() {
        let mut events = seeded();
        let before = events.events().to_vec();
        let mutation = events.update("2", draft("Dinner")).unwrap();

        events.settle(mutation, Err("500".to_string()));
        assert_eq!(events.events(), before.as_slice());
    }

    #[test]
    fn test_failed_delete_reinserts_in_place() {
        let mut events = seeded();
        events.create(draft("Third")).unwrap();
        let before = events.events().to_vec();

        let mutation = events.delete("2").unwrap();
        assert_eq!(events.len(), 2);
        events.settle(mutation, Err("timeout".to_string()));
        assert_eq!(events.events(), before.as_slice());
    }

    #[test]
    fn test_settle_unknown_mutation() {
        let mut events = seeded();
        assert_eq!(
            events.settle(MutationId(99), Ok(StoreAck::Accepted)),
            Settlement::Unknown
        );
    }

    #[test]
    fn test_dispatch_tracking() {
        let mut events = seeded();
        let first = events.create(draft("a")).unwrap();
        let second = events.delete("1").unwrap();

        events.mark_dispatched(first);
        let waiting: Vec<_> = events.undispatched().map(|p| p.id).collect();
        assert_eq!(waiting, [second]);

        events.settle(first, Ok(StoreAck::Accepted));
        assert_eq!(events.pending().len(), 1);
    }

    #[test]
    fn test_failed_create_drops_follow_up_delete() {
        let mut events = seeded();
        let before = events.events().to_vec();
        let create = events.create(draft("Gym")).unwrap();
        let local_id = events.pending()[0].command.event_id().to_string();
        events.delete(&local_id).unwrap();

        assert_eq!(events.settle(create, Err("offline".to_string())), Settlement::RolledBack);
        assert_eq!(events.events(), before.as_slice());
        assert!(events.pending().is_empty());
        assert!(events.ready().is_empty());
    }

    #[test]
    fn test_failed_update_drops_later_update() {
        let mut events = seeded();
        let before = events.events().to_vec();
        let first = events.update("1", draft("A1")).unwrap();
        let second = events.update("1", draft("A2")).unwrap();
        let unrelated = events.delete("2").unwrap();

        events.settle(first, Err("500".to_string()));
        assert_eq!(events.get("1"), Some(&before[0]));
        assert_eq!(events.settle(second, Ok(StoreAck::Accepted)), Settlement::Unknown);

        let ready: Vec<_> = events.ready().iter().map(|p| p.id).collect();
        assert_eq!(ready, [unrelated]);
        assert!(events.get("2").is_none());
    }

    #[test]
    fn test_follow_up_waits_for_create() {
        let mut events = seeded();
        let create = events.create(draft("Gym")).unwrap();
        let local_id = events.pending()[0].command.event_id().to_string();
        let update = events.update(&local_id, draft("Gym (legs)")).unwrap();
        let other = events.delete("1").unwrap();

        let ready: Vec<_> = events.ready().iter().map(|p| p.id).collect();
        assert_eq!(ready, [create, other]);
        assert!(events.is_pending(&local_id));
        assert!(!events.is_pending("2"));

        events.mark_dispatched(create);
        events.mark_dispatched(other);
        assert!(events.ready().is_empty());

        events.settle(
            create,
            Ok(StoreAck::Created {
                id: "server-7".to_string(),
            }),
        );
        let ready = events.ready();
        assert_eq!(ready.len(), 1);
        assert_eq!(ready[0].id, update);
        assert_eq!(ready[0].command.event_id(), "server-7");
    }
}
