//! Single-capacity resource queue: each production stage (machine or
//! workcenter) can run one stage instance at a time, so the planner tracks
//! only the next moment each resource is free (spec §5).

use chrono::{DateTime, Utc};
use std::collections::HashMap;
use uuid::Uuid;

/// Tracks the earliest free moment of every production stage (resource).
/// A resource absent from the map has never been booked and is free at any
/// requested floor time.
#[derive(Debug, Clone, Default)]
pub struct ResourceQueue {
    free_at: HashMap<Uuid, DateTime<Utc>>,
}

impl ResourceQueue {
    pub fn new() -> Self {
        Self::default()
    }

    /// The earliest a stage instance could start on `resource`, given it
    /// also can't start before `floor` (the job/predecessor constraint).
    pub fn earliest_available(&self, resource: Uuid, floor: DateTime<Utc>) -> DateTime<Utc> {
        match self.free_at.get(&resource) {
            Some(&free) if free > floor => free,
            _ => floor,
        }
    }

    /// Books `resource` through `new_end`, never moving it earlier than
    /// whatever it already held (placements are applied in ascending start
    /// order, but this keeps the queue monotonic regardless of call order).
    pub fn advance(&mut self, resource: Uuid, new_end: DateTime<Utc>) {
        self.free_at
            .entry(resource)
            .and_modify(|free| *free = (*free).max(new_end))
            .or_insert(new_end);
    }

    /// Pins one resource to `base_start`, used by nuclear-wipe reschedules so
    /// every resource shares a single anchor for the run (spec §4.5, §9).
    pub fn seed(&mut self, resource: Uuid, base_start: DateTime<Utc>) {
        self.free_at.insert(resource, base_start);
    }

    /// Pins every resource in `resources` to the same `base_start`.
    pub fn seed_all(&mut self, resources: impl IntoIterator<Item = Uuid>, base_start: DateTime<Utc>) {
        for resource in resources {
            self.seed(resource, base_start);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use pretty_assertions::assert_eq;

    fn at(hour: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 1, 6, hour, 0, 0).unwrap()
    }

    #[test]
    fn unbooked_resource_is_free_at_the_floor() {
        let queue = ResourceQueue::new();
        let resource = Uuid::new_v4();
        assert_eq!(queue.earliest_available(resource, at(8)), at(8));
    }

    #[test]
    fn booked_resource_is_free_only_after_its_last_end() {
        let mut queue = ResourceQueue::new();
        let resource = Uuid::new_v4();
        queue.advance(resource, at(10));
        assert_eq!(queue.earliest_available(resource, at(8)), at(10));
        assert_eq!(queue.earliest_available(resource, at(12)), at(12));
    }

    #[test]
    fn advance_never_moves_a_resource_earlier() {
        let mut queue = ResourceQueue::new();
        let resource = Uuid::new_v4();
        queue.advance(resource, at(12));
        queue.advance(resource, at(10));
        assert_eq!(queue.earliest_available(resource, at(0)), at(12));
    }

    #[test]
    fn seed_all_pins_every_resource_to_one_anchor() {
        let mut queue = ResourceQueue::new();
        let (a, b) = (Uuid::new_v4(), Uuid::new_v4());
        queue.seed_all([a, b], at(8));
        assert_eq!(queue.earliest_available(a, at(0)), at(8));
        assert_eq!(queue.earliest_available(b, at(0)), at(8));
    }
}
