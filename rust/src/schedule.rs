//! Schedule recalculation: graph, timing passes, critical path and aggregation.

use crate::config::ScheduleOptions;
use crate::critical_path::{
    backward_pass, forward_pass, project_duration, select_critical, ActivityTiming, ScheduleGraph,
};
use crate::error::ScheduleError;
use crate::interner::ActivityIdx;
use crate::models::{Activity, ActivityResult, ScheduleResult};
use crate::{log_detail, log_summary};

/// Compute a complete schedule snapshot for `activities`.
///
/// Pure function of its input: nothing is retained between calls. An empty
/// list yields an empty result; structural problems (cycles, duplicate names,
/// rejected references, invalid estimates) fail the whole recalculation.
pub fn compute(
    activities: &[Activity],
    options: &ScheduleOptions,
) -> Result<ScheduleResult, ScheduleError> {
    if activities.is_empty() {
        log_summary!(options.verbosity, "[schedule] no activities");
        return Ok(ScheduleResult::default());
    }

    let graph = ScheduleGraph::build(activities, options)?;
    let forward = forward_pass(&graph, options.verbosity)?;
    let duration = project_duration(&forward);
    let timings = backward_pass(&graph, &forward, duration, options.verbosity);
    let critical = select_critical(&timings);

    let result = aggregate(&graph, &timings, &critical, duration);

    for row in &result.activities {
        log_detail!(
            options.verbosity,
            "[schedule] {}: te={:.3} es={} ef={} ls={} lf={} slack={}{}",
            row.name,
            row.te,
            row.es,
            row.ef,
            row.ls,
            row.lf,
            row.slack,
            if row.is_critical { " (critical)" } else { "" }
        );
    }
    log_summary!(
        options.verbosity,
        "[schedule] {} activities, duration={}, sigma={:.4}, critical path={:?}",
        result.activities.len(),
        result.project_duration,
        result.project_sigma,
        result.critical_path
    );

    Ok(result)
}

/// Merge statistics and timings into the result snapshot.
///
/// Statistics come from the unrounded estimates regardless of the duration
/// rounding policy; project variance sums exactly the critical activities.
fn aggregate(
    graph: &ScheduleGraph,
    timings: &[ActivityTiming],
    critical: &[ActivityIdx],
    duration: f64,
) -> ScheduleResult {
    let mut is_critical = vec![false; graph.len()];
    for &idx in critical {
        is_critical[idx as usize] = true;
    }

    let activities: Vec<ActivityResult> = graph
        .activities
        .iter()
        .zip(timings)
        .enumerate()
        .map(|(idx, (act, timing))| ActivityResult {
            id: act.id,
            name: act.name.clone(),
            predecessors: graph.preds[idx]
                .iter()
                .map(|&pred| graph.name(pred).to_string())
                .collect(),
            te: act.te(),
            variance: act.variance(),
            sigma: act.sigma(),
            duration: graph.durations[idx],
            es: timing.earliest_start,
            ef: timing.earliest_finish,
            ls: timing.latest_start,
            lf: timing.latest_finish,
            slack: timing.slack,
            is_critical: is_critical[idx],
        })
        .collect();

    let project_variance: f64 = critical
        .iter()
        .map(|&idx| graph.activities[idx as usize].variance())
        .sum();
    let project_sigma = if project_variance >= 0.0 {
        project_variance.sqrt()
    } else {
        0.0
    };

    ScheduleResult {
        activities,
        project_duration: duration,
        project_variance,
        project_sigma,
        critical_path: critical
            .iter()
            .map(|&idx| graph.name(idx).to_string())
            .collect(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ReferencePolicy;
    use crate::critical_path::CRITICAL_SLACK_EPSILON;
    use crate::probability::probability_for_days;
    use proptest::prelude::*;

    fn make_activity(id: i64, name: &str, preds: &str, a: f64, m: f64, b: f64) -> Activity {
        Activity::new(id, name.to_string(), preds.to_string(), a, m, b)
    }

    fn fixed(id: i64, name: &str, preds: &str, duration: f64) -> Activity {
        make_activity(id, name, preds, duration, duration, duration)
    }

    /// Nine-activity network with two start activities and a single sink.
    fn sample_network() -> Vec<Activity> {
        vec![
            fixed(1, "A", "", 5.0),
            fixed(2, "B", "", 4.0),
            fixed(3, "C", "A,B", 6.0),
            fixed(4, "D", "A,B", 5.0),
            fixed(5, "E", "B", 4.0),
            fixed(6, "F", "C", 2.0),
            fixed(7, "G", "D", 8.0),
            fixed(8, "H", "D,E", 4.0),
            fixed(9, "I", "F,G,H", 4.0),
        ]
    }

    fn row<'a>(result: &'a ScheduleResult, name: &str) -> &'a ActivityResult {
        result.activities.iter().find(|a| a.name == name).unwrap()
    }

    #[test]
    fn test_sample_network() {
        for options in [ScheduleOptions::default(), ScheduleOptions::rounded_permissive()] {
            let result = compute(&sample_network(), &options).unwrap();

            // A(5) -> D(5) -> G(8) -> I(4); D waits for A, not B.
            assert_eq!(result.project_duration, 22.0);
            assert_eq!(result.critical_path, vec!["A", "D", "G", "I"]);
            assert_eq!(result.project_variance, 0.0);
            assert_eq!(result.project_sigma, 0.0);

            let b = row(&result, "B");
            assert_eq!(b.lf, 5.0);
            assert!((b.slack - 1.0).abs() < 1e-9);
            assert!((row(&result, "C").slack - 5.0).abs() < 1e-9);
            assert!((row(&result, "E").slack - 6.0).abs() < 1e-9);
            assert!((row(&result, "H").slack - 4.0).abs() < 1e-9);
            assert_eq!(row(&result, "G").es, 10.0);
            assert_eq!(row(&result, "I").es, 18.0);
        }
    }

    #[test]
    fn test_results_keep_input_order() {
        let result = compute(&sample_network(), &ScheduleOptions::default()).unwrap();
        let names: Vec<&str> = result.activities.iter().map(|a| a.name.as_str()).collect();
        assert_eq!(names, vec!["A", "B", "C", "D", "E", "F", "G", "H", "I"]);
        assert_eq!(result.activities[8].id, 9);
    }

    #[test]
    fn test_empty_activity_set() {
        let result = compute(&[], &ScheduleOptions::default()).unwrap();
        assert_eq!(result.project_duration, 0.0);
        assert!(result.critical_path.is_empty());
        assert!(result.activities.is_empty());
        assert_eq!(result.project_sigma, 0.0);
    }

    #[test]
    fn test_single_deterministic_activity() {
        let result = compute(&[fixed(1, "A", "", 1.0)], &ScheduleOptions::default()).unwrap();
        assert_eq!(result.project_duration, 1.0);
        assert_eq!(result.critical_path, vec!["A"]);
        assert_eq!(result.project_sigma, 0.0);
        assert_eq!(result.probability_for_days(1.0), 100.0);
        assert_eq!(result.probability_for_days(0.9), 0.0);
        assert_eq!(probability_for_days(1.0, 1.0, 0.0), 100.0);
    }

    #[test]
    fn test_unknown_predecessor_rejected_by_default() {
        let activities = vec![fixed(1, "A", "", 2.0), fixed(2, "B", "A, Ghost", 3.0)];
        let err = compute(&activities, &ScheduleOptions::default()).unwrap_err();
        assert_eq!(
            err,
            ScheduleError::InvalidActivityReference {
                activity: "B".to_string(),
                predecessor: "Ghost".to_string(),
            }
        );
    }

    #[test]
    fn test_unknown_predecessor_ignored_when_permissive() {
        let activities = vec![fixed(1, "A", "", 2.0), fixed(2, "B", "Ghost", 3.0)];
        let options = ScheduleOptions {
            reference_policy: ReferencePolicy::Ignore,
            ..Default::default()
        };
        let result = compute(&activities, &options).unwrap();

        // Ghost contributes EF = 0, so B starts at time zero.
        assert_eq!(row(&result, "B").es, 0.0);
        assert_eq!(result.project_duration, 3.0);
        assert_eq!(result.critical_path, vec!["B"]);
    }

    #[test]
    fn test_cycle_rejected() {
        let activities = vec![
            fixed(1, "A", "C", 1.0),
            fixed(2, "B", "A", 1.0),
            fixed(3, "C", "B", 1.0),
        ];
        let err = compute(&activities, &ScheduleOptions::default()).unwrap_err();
        assert!(matches!(err, ScheduleError::CyclicDependency { .. }));
    }

    #[test]
    fn test_duplicate_names_rejected() {
        let activities = vec![fixed(1, "A", "", 1.0), fixed(2, "A", "", 1.0)];
        let err = compute(&activities, &ScheduleOptions::default()).unwrap_err();
        assert!(matches!(err, ScheduleError::DuplicateActivityName { .. }));
    }

    #[test]
    fn test_rounding_policy() {
        // te(X) = 13/6, te(Y) = 7/6
        let activities = vec![
            make_activity(1, "X", "", 1.0, 2.0, 4.0),
            make_activity(2, "Y", "X", 1.0, 1.0, 2.0),
        ];

        let exact = compute(&activities, &ScheduleOptions::default()).unwrap();
        assert!((exact.project_duration - 20.0 / 6.0).abs() < 1e-12);
        assert!((row(&exact, "Y").es - 13.0 / 6.0).abs() < 1e-12);

        let options = ScheduleOptions {
            round_durations: true,
            ..Default::default()
        };
        let rounded = compute(&activities, &options).unwrap();
        assert_eq!(rounded.project_duration, 3.0);
        assert_eq!(row(&rounded, "Y").es, 2.0);
        assert_eq!(row(&rounded, "X").duration, 2.0);

        // Statistics are identical under both policies.
        for result in [&exact, &rounded] {
            let x = row(result, "X");
            assert!((x.te - 13.0 / 6.0).abs() < 1e-12);
            assert!((x.variance - 0.25).abs() < 1e-12);
            assert!((result.project_variance - (0.25 + 1.0 / 36.0)).abs() < 1e-12);
        }
    }

    #[test]
    fn test_exact_half_rounds_up() {
        let activities = vec![make_activity(1, "A", "", 2.5, 2.5, 2.5)];
        let options = ScheduleOptions {
            round_durations: true,
            ..Default::default()
        };
        let result = compute(&activities, &options).unwrap();

        let a = row(&result, "A");
        assert_eq!(a.te, 2.5);
        assert_eq!(a.duration, 3.0);
        assert_eq!(a.ef, 3.0);
        assert_eq!(result.project_duration, 3.0);
    }

    #[test]
    fn test_result_rows_carry_resolved_predecessors() {
        let result = compute(&sample_network(), &ScheduleOptions::default()).unwrap();
        assert!(row(&result, "A").predecessors.is_empty());
        assert_eq!(row(&result, "C").predecessors, vec!["A", "B"]);
        assert_eq!(row(&result, "I").predecessors, vec!["F", "G", "H"]);

        let activities = vec![fixed(1, "A", "", 2.0), fixed(2, "B", "A, Ghost, A", 3.0)];
        let err = compute(&activities, &ScheduleOptions::default()).unwrap_err();
        assert!(matches!(err, ScheduleError::InvalidActivityReference { .. }));

        let options = ScheduleOptions {
            reference_policy: ReferencePolicy::Ignore,
            ..Default::default()
        };
        let result = compute(&activities, &options).unwrap();
        assert_eq!(row(&result, "B").predecessors, vec!["A"]);
        assert_eq!(row(&result, "B").es, 2.0);
    }

    #[test]
    fn test_project_variance_sums_critical_only() {
        // Long path L is critical; short path S has slack and its own variance.
        let activities = vec![
            make_activity(1, "L", "", 4.0, 10.0, 16.0),
            make_activity(2, "S", "", 0.0, 1.0, 8.0),
            make_activity(3, "End", "L,S", 1.0, 1.0, 1.0),
        ];
        let result = compute(&activities, &ScheduleOptions::default()).unwrap();

        assert_eq!(result.critical_path, vec!["L", "End"]);
        assert!((result.project_variance - 4.0).abs() < 1e-12);
        assert!((result.project_sigma - 2.0).abs() < 1e-12);
        assert!((result.probability_for_days(result.project_duration) - 50.0).abs() < 1e-3);
        assert!((result.days_for_probability(50.0) - result.project_duration).abs() < 1e-3);
        assert_eq!(result.z_score(result.project_duration + 4.0), 2.0);
    }

    #[test]
    fn test_parallel_critical_paths() {
        let activities = vec![
            fixed(1, "P", "", 3.0),
            fixed(2, "Q", "", 3.0),
            fixed(3, "R", "P,Q", 2.0),
        ];
        let result = compute(&activities, &ScheduleOptions::default()).unwrap();
        assert_eq!(result.critical_path, vec!["P", "Q", "R"]);
        assert_eq!(result.critical_activities().len(), 3);
    }

    /// Random DAG: each activity may depend on any earlier ones.
    fn dag_strategy() -> impl Strategy<Value = Vec<Activity>> {
        prop::collection::vec(
            (
                0.0f64..10.0,
                0.0f64..10.0,
                0.0f64..10.0,
                prop::collection::vec(any::<prop::sample::Index>(), 0..3),
            ),
            1..15,
        )
        .prop_map(|drafts| {
            drafts
                .into_iter()
                .enumerate()
                .map(|(i, (x, y, z, picks))| {
                    let mut three = [x, y, z];
                    three.sort_by(f64::total_cmp);
                    let preds: Vec<String> = if i == 0 {
                        Vec::new()
                    } else {
                        picks.iter().map(|p| format!("T{}", p.index(i))).collect()
                    };
                    make_activity(
                        i as i64,
                        &format!("T{i}"),
                        &preds.join(","),
                        three[0],
                        three[1],
                        three[2],
                    )
                })
                .collect()
        })
    }

    proptest! {
        #[test]
        fn prop_timing_invariants(activities in dag_strategy(), round in any::<bool>()) {
            let options = ScheduleOptions { round_durations: round, ..Default::default() };
            let result = compute(&activities, &options).unwrap();

            let max_ef = result.activities.iter().map(|a| a.ef).fold(0.0, f64::max);
            prop_assert_eq!(result.project_duration, max_ef);
            prop_assert!(!result.critical_path.is_empty());

            for (act, row) in activities.iter().zip(&result.activities) {
                prop_assert!(row.es <= row.ef);
                prop_assert!(row.ls <= row.lf);
                prop_assert!(row.slack >= -CRITICAL_SLACK_EPSILON);
                if act.predecessor_names().is_empty() {
                    prop_assert_eq!(row.es, 0.0);
                }
            }

            let critical_variance: f64 = result
                .activities
                .iter()
                .filter(|a| result.critical_path.contains(&a.name))
                .map(|a| a.variance)
                .sum();
            prop_assert!((result.project_variance - critical_variance).abs() < 1e-9);
        }

        #[test]
        fn prop_compute_is_deterministic(activities in dag_strategy()) {
            let options = ScheduleOptions::default();
            let first = compute(&activities, &options).unwrap();
            let second = compute(&activities, &options).unwrap();
            prop_assert_eq!(first, second);
        }
    }
}
