//! Critical path calculation using forward and backward passes.

use crate::error::ScheduleError;
use crate::interner::ActivityIdx;
use crate::log_debug;

use super::graph::ScheduleGraph;
use super::types::ActivityTiming;

/// Visit state for the forward-pass traversal.
#[derive(Clone, Copy, PartialEq, Eq)]
enum Mark {
    Unvisited,
    InProgress,
    Done,
}

/// Output of the forward pass.
#[derive(Clone, Debug, Default)]
pub struct ForwardPass {
    pub earliest_start: Vec<f64>,
    pub earliest_finish: Vec<f64>,
    /// Activities in the order their EF became final (a topological order).
    pub finish_order: Vec<ActivityIdx>,
}

/// Compute earliest start/finish for every activity.
///
/// Depth-first over predecessors with an explicit stack, so deep chains do not
/// consume call stack. An activity reached again while still in progress
/// closes a cycle and fails with `CyclicDependency`.
pub fn forward_pass(graph: &ScheduleGraph, verbosity: u8) -> Result<ForwardPass, ScheduleError> {
    let n = graph.len();
    let mut marks = vec![Mark::Unvisited; n];
    let mut earliest_start = vec![0.0; n];
    let mut earliest_finish = vec![0.0; n];
    let mut finish_order: Vec<ActivityIdx> = Vec::with_capacity(n);

    // (activity, index of next predecessor to visit)
    let mut stack: Vec<(ActivityIdx, usize)> = Vec::new();

    for root in 0..n {
        if marks[root] != Mark::Unvisited {
            continue;
        }
        marks[root] = Mark::InProgress;
        stack.push((root as ActivityIdx, 0));

        while let Some(frame) = stack.last_mut() {
            let node = frame.0;
            let next_pred = graph.preds[node as usize].get(frame.1).copied();
            if next_pred.is_some() {
                frame.1 += 1;
            }

            match next_pred {
                Some(pred) => match marks[pred as usize] {
                    Mark::Done => {}
                    Mark::InProgress => {
                        return Err(ScheduleError::CyclicDependency {
                            activity: graph.name(pred).to_string(),
                        });
                    }
                    Mark::Unvisited => {
                        marks[pred as usize] = Mark::InProgress;
                        stack.push((pred, 0));
                    }
                },
                None => {
                    let idx = node as usize;
                    // Every predecessor is Done here, so its EF is final.
                    let start = graph.preds[idx]
                        .iter()
                        .map(|&p| earliest_finish[p as usize])
                        .fold(0.0, f64::max);
                    earliest_start[idx] = start;
                    earliest_finish[idx] = start + graph.durations[idx];
                    marks[idx] = Mark::Done;
                    finish_order.push(node);
                    stack.pop();
                }
            }
        }
    }

    log_debug!(
        verbosity,
        "[forward] finish order: {:?}",
        finish_order
            .iter()
            .map(|&i| graph.name(i))
            .collect::<Vec<_>>()
    );

    Ok(ForwardPass {
        earliest_start,
        earliest_finish,
        finish_order,
    })
}

/// Project duration: the largest earliest finish, 0 for an empty graph.
pub fn project_duration(forward: &ForwardPass) -> f64 {
    forward.earliest_finish.iter().copied().fold(0.0, f64::max)
}

/// Compute latest start/finish and slack for every activity.
///
/// Activities are processed by descending EF. Ties (zero-duration activities)
/// fall back to reverse finish order, so every dependent's LS is known before
/// any of its predecessors is processed.
pub fn backward_pass(
    graph: &ScheduleGraph,
    forward: &ForwardPass,
    project_duration: f64,
    verbosity: u8,
) -> Vec<ActivityTiming> {
    let n = graph.len();
    let mut finish_rank = vec![0usize; n];
    for (rank, &idx) in forward.finish_order.iter().enumerate() {
        finish_rank[idx as usize] = rank;
    }

    let mut order: Vec<usize> = (0..n).collect();
    order.sort_by(|&x, &y| {
        forward.earliest_finish[y]
            .total_cmp(&forward.earliest_finish[x])
            .then(finish_rank[y].cmp(&finish_rank[x]))
    });

    log_debug!(
        verbosity,
        "[backward] order: {:?}",
        order
            .iter()
            .map(|&i| graph.name(i as ActivityIdx))
            .collect::<Vec<_>>()
    );

    let mut latest_start = vec![0.0; n];
    let mut timings = vec![ActivityTiming::default(); n];

    for idx in order {
        let latest_finish = if graph.dependents[idx].is_empty() {
            project_duration
        } else {
            graph.dependents[idx]
                .iter()
                .map(|&d| latest_start[d as usize])
                .fold(f64::INFINITY, f64::min)
        };
        latest_start[idx] = latest_finish - graph.durations[idx];

        timings[idx] = ActivityTiming {
            earliest_start: forward.earliest_start[idx],
            earliest_finish: forward.earliest_finish[idx],
            latest_start: latest_start[idx],
            latest_finish,
            slack: latest_finish - forward.earliest_finish[idx],
        };
    }

    timings
}
