//! Move Queue Processor - Runs a session's queued moves
//!
//! One processing pass:
//! 1. Walk the queue front to back
//! 2. Apply every move that is legal from the current position
//! 3. Collect the rest as invalid
//! 4. Compute the residual queue for the next pass
//!
//! This is pure domain logic - no I/O, no sleeping. A pass reports each
//! applied move's time cost; waiting it out is the caller's job (see
//! [`ProcessingPass`]).

use crate::model::direction::{Direction, TimeCost};
use crate::model::grid::Grid;
use crate::model::position::Position;

/// A move that was carried out
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AppliedMove {
    pub direction: Direction,
    pub from: Position,
    pub to: Position,
    pub cost: TimeCost,
}

/// What happened to one queued move
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Step {
    /// Legal from the current position and applied
    Applied(AppliedMove),
    /// Would have left the grid; position unchanged
    Rejected { direction: Direction, at: Position },
}

/// Final result of a processing pass
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PassOutcome {
    pub grid: Grid,
    pub position: Position,
    /// Number of moves applied
    pub processed: usize,
    /// Rejected moves in encounter order, duplicates kept
    pub invalid_moves: Vec<Direction>,
    /// Queue left for the next pass
    pub residual_queue: Vec<Direction>,
    /// Sum of the costs of the applied moves
    pub total_cost: TimeCost,
}

/// A processing pass in progress.
///
/// Iterating yields one [`Step`] per queued move, in queue order. Move *k*
/// is only evaluated once move *k-1* has been yielded, so a caller can
/// wait out an applied move's cost before pulling the next step.
#[derive(Debug, Clone)]
pub struct ProcessingPass {
    queue: Vec<Direction>,
    cursor: usize,
    grid: Grid,
    position: Position,
    processed: usize,
    invalid_moves: Vec<Direction>,
    total_cost: TimeCost,
}

impl ProcessingPass {
    pub fn new(grid: Grid, position: Position, queue: &[Direction]) -> Self {
        Self {
            queue: queue.to_vec(),
            cursor: 0,
            grid,
            position,
            processed: 0,
            invalid_moves: Vec::new(),
            total_cost: 0,
        }
    }

    /// Run any remaining steps and build the outcome
    pub fn finish(mut self) -> PassOutcome {
        for _ in self.by_ref() {}

        let residual_queue = residual_queue(&self.queue, &self.invalid_moves, self.processed);
        PassOutcome {
            grid: self.grid,
            position: self.position,
            processed: self.processed,
            invalid_moves: self.invalid_moves,
            residual_queue,
            total_cost: self.total_cost,
        }
    }
}

impl Iterator for ProcessingPass {
    type Item = Step;

    fn next(&mut self) -> Option<Step> {
        let direction = *self.queue.get(self.cursor)?;
        self.cursor += 1;

        let from = self.position;
        match from.step(direction) {
            Some(to) => {
                self.grid = self.grid.moved(from, to);
                self.position = to;
                self.processed += 1;
                let cost = direction.time_cost();
                self.total_cost = self.total_cost.saturating_add(cost);
                Some(Step::Applied(AppliedMove {
                    direction,
                    from,
                    to,
                    cost,
                }))
            }
            None => {
                self.invalid_moves.push(direction);
                Some(Step::Rejected {
                    direction,
                    at: from,
                })
            }
        }
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.queue.len() - self.cursor;
        (remaining, Some(remaining))
    }
}

impl ExactSizeIterator for ProcessingPass {}

/// The queue carried over to the next pass.
///
/// Drops every entry of `original` whose value appears in `invalid` (by
/// value, wherever it sits in the queue), then skips the first `processed`
/// of what is left.
pub fn residual_queue(
    original: &[Direction],
    invalid: &[Direction],
    processed: usize,
) -> Vec<Direction> {
    original
        .iter()
        .copied()
        .filter(|m| !invalid.contains(m))
        .skip(processed)
        .collect()
}

/// Run a whole pass at once
pub fn process_queue(grid: Grid, position: Position, queue: &[Direction]) -> PassOutcome {
    ProcessingPass::new(grid, position, queue).finish()
}

/// MoveQueueProcessor - Stateless entry point for processing passes
///
/// All state lives in the session; the processor only knows the rules.
#[derive(Debug, Clone, Copy)]
pub struct MoveQueueProcessor;

impl MoveQueueProcessor {
    pub fn new() -> Self {
        Self
    }

    /// Start a pass to be driven step by step
    pub fn begin(&self, grid: Grid, position: Position, queue: &[Direction]) -> ProcessingPass {
        ProcessingPass::new(grid, position, queue)
    }
}

impl Default for MoveQueueProcessor {
    fn default() -> Self {
        Self::new()
    }
}
