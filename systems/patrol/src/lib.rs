#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Pure system that drives enemy ping-pong patrols.

use nightmare_maze_core::{Command, EnemyView, Event, PatrolStep};

/// Patrol system that turns elapsed time into enemy step commands.
#[derive(Debug, Default)]
pub struct Patrolling {
    scratch: Vec<Command>,
}

impl Patrolling {
    /// Creates a new patrol system with empty scratch buffers.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Emits one step or reversal for every enemy whose step interval elapsed.
    ///
    /// Nothing is emitted unless the event batch contains a clock advance.
    pub fn handle(&mut self, events: &[Event], enemies: &EnemyView, out: &mut Vec<Command>) {
        let time_advanced = events
            .iter()
            .any(|event| matches!(event, Event::TimeAdvanced { .. }));
        if !time_advanced || enemies.is_empty() {
            return;
        }

        self.scratch.clear();
        for enemy in enemies.iter().filter(|enemy| enemy.ready_for_step) {
            let command = match enemy.patrol.next_step(enemy.cell, enemy.room) {
                PatrolStep::Advance { to } => Command::StepEnemy { enemy: enemy.id, to },
                PatrolStep::Reverse => Command::ReversePatrol { enemy: enemy.id },
            };
            self.scratch.push(command);
        }

        out.reserve(self.scratch.len());
        out.append(&mut self.scratch);
    }
}
