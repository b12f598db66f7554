//! Delayed and repeating scene tasks
//!
//! Tasks use wait-then-run semantics: a task registered with a delay of N
//! ticks first fires on the N-th call to `advance`. Repeating tasks then fire
//! every `interval` ticks forever. There is no cancellation; task handlers
//! check the game phase themselves.

/// What a scheduled task does when it fires
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TaskKind {
    SpawnSpike,
    IncrementScore,
    HideMainLabel,
}

#[derive(Debug, Clone)]
struct Task {
    kind: TaskKind,
    /// Ticks left until the next run
    remaining: u32,
    /// Repeat period in ticks (`None` for one-shot)
    interval: Option<u32>,
}

/// Tick-driven task list
#[derive(Debug, Clone, Default)]
pub struct Scheduler {
    tasks: Vec<Task>,
}

impl Scheduler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Run `kind` once after `delay` ticks
    pub fn once(&mut self, kind: TaskKind, delay: u32) {
        self.tasks.push(Task {
            kind,
            remaining: delay.max(1),
            interval: None,
        });
    }

    /// Run `kind` every `interval` ticks, first after one full interval
    pub fn repeat(&mut self, kind: TaskKind, interval: u32) {
        let interval = interval.max(1);
        self.tasks.push(Task {
            kind,
            remaining: interval,
            interval: Some(interval),
        });
    }

    /// Advance one tick and return the tasks due, in registration order
    pub fn advance(&mut self) -> Vec<TaskKind> {
        let mut due = Vec::new();

        for task in &mut self.tasks {
            task.remaining -= 1;
            if task.remaining == 0 {
                due.push(task.kind);
                if let Some(interval) = task.interval {
                    task.remaining = interval;
                }
            }
        }

        self.tasks.retain(|t| t.remaining > 0);
        due
    }

    /// Number of tasks still pending
    pub fn pending(&self) -> usize {
        self.tasks.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_once_fires_after_delay_then_drops() {
        let mut scheduler = Scheduler::new();
        scheduler.once(TaskKind::HideMainLabel, 3);

        assert!(scheduler.advance().is_empty());
        assert!(scheduler.advance().is_empty());
        assert_eq!(scheduler.advance(), vec![TaskKind::HideMainLabel]);
        assert_eq!(scheduler.pending(), 0);
        assert!(scheduler.advance().is_empty());
    }

    #[test]
    fn test_repeat_waits_then_runs_forever() {
        let mut scheduler = Scheduler::new();
        scheduler.repeat(TaskKind::IncrementScore, 2);

        let fired: Vec<bool> = (0..6).map(|_| !scheduler.advance().is_empty()).collect();
        assert_eq!(fired, vec![false, true, false, true, false, true]);
        assert_eq!(scheduler.pending(), 1);
    }

    #[test]
    fn test_due_tasks_keep_registration_order() {
        let mut scheduler = Scheduler::new();
        scheduler.repeat(TaskKind::SpawnSpike, 1);
        scheduler.repeat(TaskKind::IncrementScore, 1);

        assert_eq!(
            scheduler.advance(),
            vec![TaskKind::SpawnSpike, TaskKind::IncrementScore]
        );
    }
}
