//! Schedule graph construction from a flat activity list.

use crate::config::{ReferencePolicy, ScheduleOptions};
use crate::error::ScheduleError;
use crate::interner::{ActivityIdx, NameInterner};
use crate::log_detail;
use crate::models::Activity;

/// Name-keyed dependency graph, built fresh for every recalculation.
///
/// All per-activity vectors are indexed by [`ActivityIdx`], which equals the
/// activity's position in the input slice.
pub struct ScheduleGraph<'a> {
    /// Activity name <-> index mapping.
    pub index: NameInterner,
    /// Source activities, in input order.
    pub activities: &'a [Activity],
    /// Duration used by the timing passes (rounded when configured).
    pub durations: Vec<f64>,
    /// Resolved predecessors, in the order they were listed.
    pub preds: Vec<Vec<ActivityIdx>>,
    /// Reverse edges: activities that list this one as a predecessor.
    pub dependents: Vec<Vec<ActivityIdx>>,
    /// Predecessor references dropped under `ReferencePolicy::Ignore`.
    pub ignored_references: Vec<(ActivityIdx, String)>,
}

impl<'a> ScheduleGraph<'a> {
    /// Build the graph, validating names, estimates and references.
    pub fn build(
        activities: &'a [Activity],
        options: &ScheduleOptions,
    ) -> Result<Self, ScheduleError> {
        let n = activities.len();
        let mut index = NameInterner::with_capacity(n);
        let mut durations = Vec::with_capacity(n);

        for act in activities {
            validate_estimates(act)?;
            if index.intern_unique(&act.name).is_none() {
                return Err(ScheduleError::DuplicateActivityName {
                    name: act.name.clone(),
                });
            }
            let te = act.te();
            durations.push(if options.round_durations { te.round() } else { te });
        }

        let mut preds: Vec<Vec<ActivityIdx>> = vec![Vec::new(); n];
        let mut dependents: Vec<Vec<ActivityIdx>> = vec![Vec::new(); n];
        let mut ignored_references = Vec::new();

        for (idx, act) in activities.iter().enumerate() {
            let idx = idx as ActivityIdx;
            for pred_name in act.predecessor_names() {
                let Some(pred) = index.get(&pred_name) else {
                    match options.reference_policy {
                        ReferencePolicy::Reject => {
                            return Err(ScheduleError::InvalidActivityReference {
                                activity: act.name.clone(),
                                predecessor: pred_name,
                            });
                        }
                        ReferencePolicy::Ignore => {
                            log_detail!(
                                options.verbosity,
                                "[graph] {}: ignoring unknown predecessor {:?}",
                                act.name,
                                pred_name
                            );
                            ignored_references.push((idx, pred_name));
                            continue;
                        }
                    }
                };

                if !preds[idx as usize].contains(&pred) {
                    preds[idx as usize].push(pred);
                    dependents[pred as usize].push(idx);
                }
            }
        }

        Ok(Self {
            index,
            activities,
            durations,
            preds,
            dependents,
            ignored_references,
        })
    }

    pub fn len(&self) -> usize {
        self.activities.len()
    }

    pub fn is_empty(&self) -> bool {
        self.activities.is_empty()
    }

    /// Name of the activity at `idx`.
    pub fn name(&self, idx: ActivityIdx) -> &str {
        self.index.resolve(idx).unwrap_or_default()
    }
}

fn validate_estimates(act: &Activity) -> Result<(), ScheduleError> {
    for (field, value) in [("a", act.a), ("m", act.m), ("b", act.b)] {
        if !value.is_finite() || value < 0.0 {
            return Err(ScheduleError::InvalidEstimate {
                activity: act.name.clone(),
                field,
                value,
            });
        }
    }
    Ok(())
}
