//! Rule-based admission: may this task be placed in this zone?

use super::{SchedulingMode, Zone};
use crate::task::Task;

/// Decide whether `zone` admits `task`.
///
/// Inactive zones, `None` zones and `NonZone` zones admit nothing.
pub fn is_task_admitted(task: &Task, zone: &Zone) -> bool {
    if !zone.is_active {
        return false;
    }

    match &zone.scheduling {
        SchedulingMode::None | SchedulingMode::NonZone { .. } => false,
        SchedulingMode::Whitelist {
            allowed_categories,
            allowed_types,
        } => {
            (allowed_categories.is_empty() || allowed_categories.contains(&task.category))
                && (allowed_types.is_empty() || allowed_types.contains(&task.task_type))
        }
        SchedulingMode::Blacklist {
            blocked_categories,
            blocked_types,
        } => {
            !blocked_categories.contains(&task.category) && !blocked_types.contains(&task.task_type)
        }
        SchedulingMode::Legacy { allow_scheduling } => *allow_scheduling,
    }
}

/// Tasks from `tasks` that `zone` admits, in input order.
pub fn admitted_tasks<'a>(tasks: &'a [Task], zone: &Zone) -> Vec<&'a Task> {
    tasks.iter().filter(|t| is_task_admitted(t, zone)).collect()
}
