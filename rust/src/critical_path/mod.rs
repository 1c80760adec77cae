//! Critical path method: graph construction, timing passes and selection.
//!
//! The graph is rebuilt from the activity list on every recalculation. The
//! forward pass resolves earliest times depth-first and rejects cycles; the
//! backward pass derives latest times and slack; activities whose slack is
//! within [`CRITICAL_SLACK_EPSILON`] of zero form the critical path.

mod calculation;
mod graph;
mod selection;
mod types;

pub use calculation::{backward_pass, forward_pass, project_duration, ForwardPass};
pub use graph::ScheduleGraph;
pub use selection::select_critical;
pub use types::{ActivityTiming, CRITICAL_SLACK_EPSILON};
