//! The work registry: owns every registered work item.
//!
//! Mutations validate at this boundary; a rejected call leaves the
//! collection exactly as it was.

use crate::error::ValidationError;
use crate::ids::IdGenerator;
use crate::work::{WorkDraft, WorkItem, WorkPatch};

/// Ordered collection of work items. Insertion order is preserved.
#[derive(Debug, Clone, Default)]
pub struct WorkRegistry {
    works: Vec<WorkItem>,
}

impl WorkRegistry {
    /// Empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Rebuild a registry from previously stored items.
    pub fn from_items(works: Vec<WorkItem>) -> Self {
        WorkRegistry { works }
    }

    /// All items, in insertion order.
    pub fn works(&self) -> &[WorkItem] {
        &self.works
    }

    pub fn iter(&self) -> std::slice::Iter<'_, WorkItem> {
        self.works.iter()
    }

    pub fn len(&self) -> usize {
        self.works.len()
    }

    pub fn is_empty(&self) -> bool {
        self.works.is_empty()
    }

    /// Look up an item by id.
    pub fn get(&self, id: &str) -> Option<&WorkItem> {
        self.works.iter().find(|w| w.id == id)
    }

    /// Validate a draft, stamp identity and creation time, and append it.
    ///
    /// Returns the stored item.
    pub fn add(
        &mut self,
        draft: WorkDraft,
        ids: &mut dyn IdGenerator,
    ) -> Result<WorkItem, ValidationError> {
        draft.validate()?;
        let item = draft.into_item(ids.next_id());
        self.works.push(item.clone());
        Ok(item)
    }

    /// Append a batch of drafts atomically.
    ///
    /// Every draft is validated up front; if any fails, nothing is added.
    pub fn add_batch(
        &mut self,
        drafts: Vec<WorkDraft>,
        ids: &mut dyn IdGenerator,
    ) -> Result<Vec<WorkItem>, ValidationError> {
        for draft in &drafts {
            draft.validate()?;
        }
        let mut created = Vec::with_capacity(drafts.len());
        for draft in drafts {
            let item = draft.into_item(ids.next_id());
            self.works.push(item.clone());
            created.push(item);
        }
        Ok(created)
    }

    /// Remove the item with the given id. Unknown ids are a no-op.
    ///
    /// Returns whether an item was removed. Progress logs referencing the
    /// id are left in place; they become orphans by design of the ledger.
    pub fn remove(&mut self, id: &str) -> bool {
        let before = self.works.len();
        self.works.retain(|w| w.id != id);
        self.works.len() != before
    }

    /// Remove every item back-cast from the given deadline.
    ///
    /// Returns how many items were removed.
    pub fn remove_by_deadline(&mut self, deadline: chrono::NaiveDate) -> usize {
        let before = self.works.len();
        self.works.retain(|w| w.deadline != Some(deadline));
        before - self.works.len()
    }

    /// Merge a patch into the item with the given id.
    ///
    /// The merged result is re-validated before it replaces the stored
    /// item, so a bad patch cannot corrupt an existing entry. Unknown ids
    /// are a no-op and return `Ok(None)`.
    pub fn update(
        &mut self,
        id: &str,
        patch: &WorkPatch,
    ) -> Result<Option<WorkItem>, ValidationError> {
        let Some(index) = self.works.iter().position(|w| w.id == id) else {
            return Ok(None);
        };
        let mut updated = self.works[index].clone();
        patch.apply(&mut updated);
        updated.validate()?;
        self.works[index] = updated.clone();
        Ok(Some(updated))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ids::SequentialIds;
    use crate::work::Category;

    fn registry_with(names: &[&str]) -> (WorkRegistry, SequentialIds) {
        let mut registry = WorkRegistry::new();
        let mut ids = SequentialIds::new();
        for name in names {
            registry
                .add(WorkDraft::new(*name, Category::Work), &mut ids)
                .unwrap();
        }
        (registry, ids)
    }

    #[test]
    fn add_stamps_identity() {
        let (registry, _) = registry_with(&["Deep work", "Email triage"]);
        assert_eq!(registry.len(), 2);
        assert_eq!(registry.works()[0].id, "work-1");
        assert_eq!(registry.works()[1].id, "work-2");
        assert!(registry.get("work-2").is_some());
    }

    #[test]
    fn add_rejects_invalid_draft() {
        let mut registry = WorkRegistry::new();
        let mut ids = SequentialIds::new();
        let mut draft = WorkDraft::new("Lifting", Category::Fitness);
        draft.intensity = 42;
        assert!(registry.add(draft, &mut ids).is_err());
        assert!(registry.is_empty());
    }

    #[test]
    fn remove_unknown_id_is_noop() {
        let (mut registry, _) = registry_with(&["A"]);
        assert!(!registry.remove("missing"));
        assert_eq!(registry.len(), 1);
        assert!(registry.remove("work-1"));
        assert!(registry.is_empty());
    }

    #[test]
    fn update_merges_and_keeps_rest() {
        let (mut registry, _) = registry_with(&["A"]);
        let patch = WorkPatch {
            intensity: Some(9),
            ..Default::default()
        };
        let updated = registry.update("work-1", &patch).unwrap().unwrap();
        assert_eq!(updated.intensity, 9);
        assert_eq!(updated.name, "A");
        assert_eq!(registry.get("work-1").unwrap().intensity, 9);
    }

    #[test]
    fn update_unknown_id_is_noop() {
        let (mut registry, _) = registry_with(&["A"]);
        let patch = WorkPatch {
            intensity: Some(9),
            ..Default::default()
        };
        assert!(registry.update("nope", &patch).unwrap().is_none());
        assert_eq!(registry.get("work-1").unwrap().intensity, 5);
    }

    #[test]
    fn invalid_patch_leaves_item_unchanged() {
        let (mut registry, _) = registry_with(&["A"]);
        let patch = WorkPatch {
            name: Some(String::new()),
            intensity: Some(7),
            ..Default::default()
        };
        assert!(registry.update("work-1", &patch).is_err());
        let item = registry.get("work-1").unwrap();
        assert_eq!(item.name, "A");
        assert_eq!(item.intensity, 5);
    }

    #[test]
    fn add_batch_is_all_or_nothing() {
        let mut registry = WorkRegistry::new();
        let mut ids = SequentialIds::new();
        let good = WorkDraft::new("ok", Category::Work);
        let mut bad = WorkDraft::new("bad", Category::Work);
        bad.start_time = "99:99".to_string();
        assert!(registry
            .add_batch(vec![good.clone(), bad], &mut ids)
            .is_err());
        assert!(registry.is_empty());

        let created = registry
            .add_batch(vec![good.clone(), good], &mut ids)
            .unwrap();
        assert_eq!(created.len(), 2);
        assert_eq!(registry.len(), 2);
    }

    #[test]
    fn remove_by_deadline_only_hits_matching_items() {
        let mut registry = WorkRegistry::new();
        let mut ids = SequentialIds::new();
        let deadline = chrono::NaiveDate::from_ymd_opt(2025, 6, 1).unwrap();
        let mut planned = WorkDraft::new("Exam prep", Category::Learning);
        planned.deadline = Some(deadline);
        registry.add(planned.clone(), &mut ids).unwrap();
        registry.add(planned, &mut ids).unwrap();
        registry
            .add(WorkDraft::new("Unrelated", Category::Work), &mut ids)
            .unwrap();

        assert_eq!(registry.remove_by_deadline(deadline), 2);
        assert_eq!(registry.len(), 1);
        assert_eq!(registry.works()[0].name, "Unrelated");
    }
}
