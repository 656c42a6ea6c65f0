//! # printsched-planner
//!
//! Calendar arithmetic, dependency barriers, resource contention, and the
//! planning algorithm itself. Everything here is pure and synchronous;
//! callers own all I/O (spec §4.4: "single-threaded, deterministic, and free
//! of I/O").

mod calendar;
mod dependency;
mod planner;
mod resource_queue;

pub use calendar::{Calendar, CalendarError, Interval};
pub use dependency::{check_predecessor_group, is_barrier};
pub use planner::{plan, PlannerInput, PlannerOutput};
pub use resource_queue::ResourceQueue;
