//! Cover/text parallel-assembly barrier rules and the `dependency_group`
//! synchronization override (spec §4.2).

use printsched_core::{PartAssignment, PlannerIssue, StageInstance};

/// True if `candidate` must wait for `predecessor` to finish before it can
/// start, given they belong to the same job and `predecessor` sorts earlier
/// by `effective_order` (the caller is expected to have checked both).
///
/// Implements the five OR'd conditions from spec §4.2:
/// 1. The predecessor covers both parts (a merge point for everything after it).
/// 2. The candidate covers both parts and the predecessor covers a single part
///    or is unassigned (every contributing part must finish first).
/// 3. Candidate and predecessor are assigned to the same single part.
/// 4. Either side is unassigned (unassigned stages run in strict stage order).
/// 5. Both share a non-null `dependency_group`, overriding part independence.
pub fn is_barrier(predecessor: &StageInstance, candidate: &StageInstance) -> bool {
    if predecessor.effective_order() >= candidate.effective_order() {
        return false;
    }

    let p = predecessor.part_assignment;
    let c = candidate.part_assignment;

    if p == Some(PartAssignment::Both) {
        return true;
    }
    if c == Some(PartAssignment::Both) && matches!(p, None | Some(PartAssignment::Cover) | Some(PartAssignment::Text)) {
        return true;
    }
    if let (Some(cp), Some(pp)) = (c, p) {
        if cp == pp && cp != PartAssignment::Both {
            return true;
        }
    }
    if c.is_none() || p.is_none() {
        return true;
    }
    if let (Some(cg), Some(pg)) = (&candidate.dependency_group, &predecessor.dependency_group) {
        if cg == pg {
            return true;
        }
    }
    false
}

/// Flags a `dependency_group` that names no other stage in the job — a
/// label that can never synchronize anything, which the planner reports as
/// a non-fatal finding rather than silently ignoring (spec §7,
/// `PredecessorMissing`).
pub fn check_predecessor_group(candidate: &StageInstance, job_stages: &[&StageInstance]) -> Option<PlannerIssue> {
    let group = candidate.dependency_group.as_ref()?;
    let has_partner = job_stages
        .iter()
        .any(|other| other.id != candidate.id && other.dependency_group.as_ref() == Some(group));
    if has_partner {
        return None;
    }
    Some(PlannerIssue::PredecessorMissing {
        stage_id: candidate.id,
        job_id: candidate.job_id,
        reference: group.clone(),
    })
}
