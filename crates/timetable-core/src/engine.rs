//! The engine facade.
//!
//! One constructible object owning the work registry, the progress ledger
//! and the gamification state, wired to an id generator and a state store
//! chosen by the caller. Every mutator runs synchronously to completion,
//! applies in call order, then snapshots the whole state to the
//! "timetable" blob. Snapshotting is fire-and-forget: a failed write is
//! logged and the mutation stands.

use chrono::NaiveDate;
use tracing::{debug, warn};

use crate::backcast;
use crate::error::{StorageError, ValidationError};
use crate::gamification::{FitnessProfile, GamificationEngine, ProfilePatch};
use crate::ids::{IdGenerator, SequentialIds, UuidIds};
use crate::progress::{LogOutcome, Mood, ProgressLedger, ProgressLog};
use crate::projector::DayProjector;
use crate::report::{daily_report, DailyReport};
use crate::storage::snapshot::{self, TimetableSnapshot};
use crate::storage::{JsonFileStore, MemoryStore, StateStore, TIMETABLE_STORE};
use crate::work::registry::WorkRegistry;
use crate::work::{WorkDraft, WorkItem, WorkPatch};

/// Owns all schedule and progress state for one running instance.
///
/// Single-writer by construction: the engine holds no locks and assumes
/// it is the only mutator of its blob within this process. Two instances
/// over the same store race on snapshots, last writer wins.
pub struct TimetableEngine {
    registry: WorkRegistry,
    ledger: ProgressLedger,
    gamification: GamificationEngine,
    ids: Box<dyn IdGenerator>,
    store: Box<dyn StateStore>,
}

impl TimetableEngine {
    /// Build an engine over the given store and id source, loading the
    /// persisted snapshot when one exists.
    pub fn new(
        store: Box<dyn StateStore>,
        ids: Box<dyn IdGenerator>,
    ) -> Result<Self, StorageError> {
        let (registry, ledger, gamification) = match store.load(TIMETABLE_STORE)? {
            Some(bytes) => {
                let snap: TimetableSnapshot = snapshot::decode(TIMETABLE_STORE, &bytes)?;
                debug!(
                    works = snap.works.len(),
                    logs = snap.progress_logs.len(),
                    "loaded timetable snapshot"
                );
                (
                    WorkRegistry::from_items(snap.works),
                    ProgressLedger::from_logs(snap.progress_logs),
                    GamificationEngine::from_profile(snap.fitness_profile),
                )
            }
            None => (
                WorkRegistry::new(),
                ProgressLedger::new(),
                GamificationEngine::new(),
            ),
        };
        Ok(TimetableEngine {
            registry,
            ledger,
            gamification,
            ids,
            store,
        })
    }

    /// Engine over the user data directory with random ids.
    pub fn open_default() -> Result<Self, StorageError> {
        Self::new(Box::new(JsonFileStore::open_default()?), Box::new(UuidIds))
    }

    /// Ephemeral engine with deterministic ids, for tests and dry runs.
    pub fn in_memory() -> Self {
        TimetableEngine {
            registry: WorkRegistry::new(),
            ledger: ProgressLedger::new(),
            gamification: GamificationEngine::new(),
            ids: Box::new(SequentialIds::new()),
            store: Box::new(MemoryStore::new()),
        }
    }

    // --- work registry ---

    /// Register a work item. See [`WorkRegistry::add`].
    pub fn add_work(&mut self, draft: WorkDraft) -> Result<WorkItem, ValidationError> {
        let item = self.registry.add(draft, self.ids.as_mut())?;
        self.snapshot();
        Ok(item)
    }

    /// Remove a work item; unknown ids are a no-op. Progress logs for the
    /// id are kept as history.
    pub fn remove_work(&mut self, id: &str) -> bool {
        let removed = self.registry.remove(id);
        if removed {
            self.snapshot();
        }
        removed
    }

    /// Merge a patch into a work item; unknown ids are a no-op.
    pub fn update_work(
        &mut self,
        id: &str,
        patch: &WorkPatch,
    ) -> Result<Option<WorkItem>, ValidationError> {
        let updated = self.registry.update(id, patch)?;
        if updated.is_some() {
            self.snapshot();
        }
        Ok(updated)
    }

    /// Remove every plan step back-cast from the given deadline.
    pub fn remove_backcast(&mut self, deadline: NaiveDate) -> usize {
        let removed = self.registry.remove_by_deadline(deadline);
        if removed > 0 {
            self.snapshot();
        }
        removed
    }

    pub fn works(&self) -> &[WorkItem] {
        self.registry.works()
    }

    pub fn get_work(&self, id: &str) -> Option<&WorkItem> {
        self.registry.get(id)
    }

    // --- progress ledger ---

    /// Upsert a completion log. The first log for a (work item, day) pair
    /// feeds its experience reward into the profile before the snapshot.
    pub fn log_progress(
        &mut self,
        work_id: &str,
        date: NaiveDate,
        completed_percent: i32,
        focus_quality: Option<u8>,
        mood: Option<Mood>,
    ) -> LogOutcome {
        let outcome = self
            .ledger
            .log(work_id, date, completed_percent, focus_quality, mood);
        if outcome.xp_gained > 0 {
            self.gamification.add_xp(outcome.xp_gained);
        }
        self.snapshot();
        outcome
    }

    pub fn find_log(&self, work_id: &str, date: NaiveDate) -> Option<&ProgressLog> {
        self.ledger.find(work_id, date)
    }

    pub fn logs(&self) -> &[ProgressLog] {
        self.ledger.logs()
    }

    // --- gamification ---

    /// Add experience directly (challenge bonuses, corrections).
    pub fn add_xp(&mut self, amount: i64) -> FitnessProfile {
        let profile = self.gamification.add_xp(amount).clone();
        self.snapshot();
        profile
    }

    /// Merge a profile patch.
    pub fn update_profile(&mut self, patch: &ProfilePatch) -> FitnessProfile {
        let profile = self.gamification.update_profile(patch).clone();
        self.snapshot();
        profile
    }

    pub fn profile(&self) -> &FitnessProfile {
        self.gamification.profile()
    }

    // --- projections ---

    /// Items recurring on the given weekday, parked items excluded.
    pub fn due_on(&self, weekday: u8) -> Vec<&WorkItem> {
        DayProjector::new(&self.registry).due_on(weekday)
    }

    /// Items due on a concrete date, honoring plan-step pinning.
    pub fn due_on_date(&self, date: NaiveDate) -> Vec<&WorkItem> {
        DayProjector::new(&self.registry).due_on_date(date)
    }

    /// Every parked item.
    pub fn parking_lot(&self) -> Vec<&WorkItem> {
        DayProjector::new(&self.registry).parking_lot()
    }

    /// The aggregate report for one explicit day.
    pub fn daily_report(&self, date: NaiveDate) -> DailyReport {
        daily_report(&self.registry, &self.ledger, date)
    }

    // --- back-casting ---

    /// Expand a deadline goal into daily plan steps and register them in
    /// one batch. A deadline on or before `today` registers nothing and
    /// leaves the state untouched.
    pub fn backcast(
        &mut self,
        name: &str,
        deadline: NaiveDate,
        base_intensity: u8,
        today: NaiveDate,
    ) -> Result<Vec<WorkItem>, ValidationError> {
        let drafts = backcast::plan(name, deadline, base_intensity, today);
        if drafts.is_empty() {
            return Ok(Vec::new());
        }
        let created = self.registry.add_batch(drafts, self.ids.as_mut())?;
        self.snapshot();
        Ok(created)
    }

    /// Persist the whole state. Failures are logged, never surfaced.
    fn snapshot(&self) {
        let snap = TimetableSnapshot {
            works: self.registry.works().to_vec(),
            progress_logs: self.ledger.logs().to_vec(),
            fitness_profile: self.gamification.profile().clone(),
            ..Default::default()
        };
        let result = snapshot::encode(TIMETABLE_STORE, &snap)
            .and_then(|bytes| self.store.save(TIMETABLE_STORE, &bytes));
        if let Err(e) = result {
            warn!(error = %e, "timetable snapshot failed; in-memory state is ahead of disk");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::work::Category;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn add_and_remove_through_the_facade() {
        let mut engine = TimetableEngine::in_memory();
        let item = engine
            .add_work(WorkDraft::new("Deep work", Category::Work))
            .unwrap();
        assert_eq!(item.id, "work-1");
        assert_eq!(engine.works().len(), 1);

        assert!(engine.remove_work(&item.id));
        assert!(!engine.remove_work(&item.id));
        assert!(engine.works().is_empty());
    }

    #[test]
    fn first_log_levels_the_profile() {
        let mut engine = TimetableEngine::in_memory();
        let item = engine
            .add_work(WorkDraft::new("Stretching", Category::Fitness))
            .unwrap();

        let outcome = engine.log_progress(&item.id, date(2025, 3, 3), 100, Some(10), None);
        assert!(outcome.created);
        assert_eq!(outcome.xp_gained, 100);
        assert_eq!(engine.profile().xp, 100);

        // editing the same day earns nothing more
        let repeat = engine.log_progress(&item.id, date(2025, 3, 3), 80, Some(4), None);
        assert_eq!(repeat.xp_gained, 0);
        assert_eq!(engine.profile().xp, 100);
        assert_eq!(engine.find_log(&item.id, date(2025, 3, 3)).unwrap().completed_percent, 80);
    }

    #[test]
    fn removing_a_work_item_keeps_its_logs() {
        let mut engine = TimetableEngine::in_memory();
        let item = engine
            .add_work(WorkDraft::new("History", Category::Learning))
            .unwrap();
        engine.log_progress(&item.id, date(2025, 3, 3), 100, None, None);
        engine.remove_work(&item.id);

        assert!(engine.works().is_empty());
        assert_eq!(engine.logs().len(), 1);
    }

    #[test]
    fn backcast_registers_the_whole_plan() {
        let mut engine = TimetableEngine::in_memory();
        let today = date(2025, 3, 3);
        let created = engine.backcast("Finals", date(2025, 3, 6), 2, today).unwrap();
        assert_eq!(created.len(), 3);
        assert_eq!(engine.works().len(), 3);
        assert_eq!(created[0].name, "Finals (Day 1/3)");

        // only the first step is due today; the rest are pinned ahead
        assert_eq!(engine.due_on_date(today).len(), 1);

        assert_eq!(engine.remove_backcast(date(2025, 3, 6)), 3);
        assert!(engine.works().is_empty());
    }

    #[test]
    fn backcast_past_deadline_is_a_noop() {
        let mut engine = TimetableEngine::in_memory();
        let today = date(2025, 3, 3);
        assert!(engine.backcast("Late", today, 2, today).unwrap().is_empty());
        assert!(engine.backcast("Later", date(2025, 1, 1), 2, today).unwrap().is_empty());
        assert!(engine.works().is_empty());
    }

    #[test]
    fn profile_patch_through_the_facade() {
        let mut engine = TimetableEngine::in_memory();
        engine.add_xp(700);
        let profile = engine.update_profile(&ProfilePatch {
            xp: Some(2100),
            ..Default::default()
        });
        assert_eq!(profile.level, 3);
        assert_eq!(engine.profile().xp, 2100);
    }

    #[test]
    fn projections_reflect_current_state() {
        let mut engine = TimetableEngine::in_memory();
        let mut draft = WorkDraft::new("Thursday review", Category::Work);
        draft.frequency_days = vec![4];
        engine.add_work(draft).unwrap();
        engine.add_work(WorkDraft::parked("Someday")).unwrap();

        assert_eq!(engine.due_on(4).len(), 1);
        assert_eq!(engine.due_on(5).len(), 0);
        assert_eq!(engine.parking_lot().len(), 1);

        engine.remove_work("work-1");
        assert!(engine.due_on(4).is_empty());
    }
}
