//! The cube engine: layer-turn state machine, move queue and history.
//!
//! At most one layer turn animates at a time. Turns requested while one is in
//! flight wait in a FIFO queue. Time only advances through [`RubiksCube::update`],
//! so the engine is deterministic for a given sequence of calls.

use std::collections::VecDeque;

use rand::Rng;
use rustc_hash::FxHashMap;

use crate::animation::ActiveRotation;
use crate::config::{CubeConfig, MAX_SIZE};
use crate::error::{Error, Result};
use crate::geometry::{self, quarter_turns, Axis, Coord};
use crate::moves::{inverse_sequence, Direction, Face, Move};
use crate::pieces::{solved_pieces, Piece};

/// Whether a layer is currently turning.
#[derive(Clone, Debug, Default)]
pub enum RotationState {
    #[default]
    Idle,
    Rotating(ActiveRotation),
}

/// Notifications for the presentation layer, drained with
/// [`RubiksCube::take_events`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CubeEvent {
    MoveStarted(Move),
    MoveFinished(Move),
    HighlightChanged(Option<Face>),
    /// The last queued move finished and left the cube solved.
    Solved,
}

/// Where a piece should be drawn this frame.
#[derive(Clone, Copy, Debug)]
pub struct PieceLayout {
    /// Index into [`RubiksCube::pieces`].
    pub index: usize,
    pub position: Coord,
    /// `position` relative to the cube centre.
    pub centre: [f32; 3],
    /// Animation angle about an axis, if the piece is in the turning layer.
    pub rotation: Option<(Axis, f32)>,
}

impl PieceLayout {
    /// Applies the in-flight rotation to a point given relative to the cube centre.
    pub fn transform(&self, point: [f32; 3]) -> [f32; 3] {
        match self.rotation {
            Some((axis, angle)) => geometry::rotate_point(axis, angle, point),
            None => point,
        }
    }

    /// Centre of the piece after the in-flight rotation.
    pub fn world_centre(&self) -> [f32; 3] {
        self.transform(self.centre)
    }
}

/// A move waiting in the queue. Scripted moves come from [`RubiksCube::solve`]
/// and undo the newest history entry instead of adding one.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
struct QueuedMove {
    mv: Move,
    scripted: bool,
}

/// A `size`-wide cube with animated layer turns.
pub struct RubiksCube {
    size: usize,
    rotation_duration: f32,
    easing: bool,
    pieces: Vec<Piece>,
    /// Piece index by current grid cell.
    cells: FxHashMap<Coord, usize>,
    state: RotationState,
    queue: VecDeque<QueuedMove>,
    history: Vec<Move>,
    /// The turn in flight was queued by a solve.
    active_scripted: bool,
    /// Set once `Solved` has been signalled, cleared when a turn unsolves the cube.
    solved_signaled: bool,
    highlight: Option<Face>,
    events: Vec<CubeEvent>,
}

impl RubiksCube {
    /// Creates a solved cube of the given size with default timing.
    pub fn new(size: usize) -> Result<Self> {
        Self::from_config(&CubeConfig {
            size,
            ..CubeConfig::default()
        })
    }

    /// Creates a solved cube using the size and timing from `config`.
    pub fn from_config(config: &CubeConfig) -> Result<Self> {
        if !(1..=MAX_SIZE).contains(&config.size) {
            return Err(Error::InvalidSize(config.size));
        }
        if !(config.rotation_duration > 0.0) {
            return Err(Error::InvalidConfig(format!(
                "rotation_duration must be positive, got {}",
                config.rotation_duration
            )));
        }

        let mut cube = Self {
            size: config.size,
            rotation_duration: config.rotation_duration,
            easing: config.easing,
            pieces: Vec::new(),
            cells: FxHashMap::default(),
            state: RotationState::Idle,
            queue: VecDeque::new(),
            history: Vec::new(),
            active_scripted: false,
            solved_signaled: true,
            highlight: None,
            events: Vec::new(),
        };
        cube.init_pieces();
        Ok(cube)
    }

    fn init_pieces(&mut self) {
        self.pieces = solved_pieces(self.size);
        self.reindex();
    }

    fn reindex(&mut self) {
        self.cells = self
            .pieces
            .iter()
            .enumerate()
            .map(|(index, piece)| (piece.current_position, index))
            .collect();
    }

    pub fn size(&self) -> usize {
        self.size
    }

    pub fn pieces(&self) -> &[Piece] {
        &self.pieces
    }

    /// The piece currently occupying `cell`, if it is on the shell.
    pub fn piece_at(&self, cell: Coord) -> Option<&Piece> {
        self.cells.get(&cell).map(|&index| &self.pieces[index])
    }

    pub fn state(&self) -> &RotationState {
        &self.state
    }

    pub fn is_rotating(&self) -> bool {
        matches!(self.state, RotationState::Rotating(_))
    }

    /// The turn in flight, if any.
    pub fn active_rotation(&self) -> Option<&ActiveRotation> {
        match &self.state {
            RotationState::Rotating(rotation) => Some(rotation),
            RotationState::Idle => None,
        }
    }

    /// Moves waiting behind the one in flight.
    pub fn queued_moves(&self) -> impl Iterator<Item = &Move> + '_ {
        self.queue.iter().map(|queued| &queued.mv)
    }

    /// The move in flight followed by every queued move.
    pub fn planned_moves(&self) -> Vec<Move> {
        self.active_rotation()
            .map(|rotation| rotation.mv)
            .into_iter()
            .chain(self.queue.iter().map(|queued| queued.mv))
            .collect()
    }

    /// Moves executed and not yet undone by a solve, oldest first.
    pub fn history(&self) -> &[Move] {
        &self.history
    }

    /// A solve replay is in flight or still queued.
    pub fn is_solving(&self) -> bool {
        (self.is_rotating() && self.active_scripted)
            || self.queue.iter().any(|queued| queued.scripted)
    }

    pub fn highlighted_face(&self) -> Option<Face> {
        self.highlight
    }

    /// Drains pending events, oldest first.
    pub fn take_events(&mut self) -> Vec<CubeEvent> {
        std::mem::take(&mut self.events)
    }

    /// Turns `face` in `direction`, or queues the move if a turn is in flight.
    pub fn rotate_face(&mut self, face: Face, direction: Direction) {
        let mv = Move::new(face, direction);
        if self.is_rotating() {
            log::debug!("queueing {mv} behind the active turn");
            self.queue.push_back(QueuedMove { mv, scripted: false });
            return;
        }
        self.start_move(QueuedMove { mv, scripted: false });
    }

    fn start_move(&mut self, QueuedMove { mv, scripted }: QueuedMove) {
        let axis = mv.face.axis();
        let layer = mv.face.layer(self.size);
        let pieces = self
            .pieces
            .iter()
            .enumerate()
            .filter(|(_, piece)| piece.in_layer(axis, layer))
            .map(|(index, _)| index)
            .collect();

        log::debug!("starting {mv}: axis {axis:?}, layer {layer}");
        self.state = RotationState::Rotating(ActiveRotation {
            mv,
            axis,
            layer,
            target_angle: mv.direction.angle(),
            progress: 0.0,
            pieces,
        });
        self.highlight_face(Some(mv.face));
        self.active_scripted = scripted;
        if scripted {
            self.history.pop();
        } else {
            self.history.push(mv);
        }
        self.events.push(CubeEvent::MoveStarted(mv));
    }

    /// Advances the turn in flight by `delta` seconds.
    ///
    /// Finishing a turn starts the next queued move, so at most one turn
    /// completes per call.
    pub fn update(&mut self, delta: f32) {
        let finished = match &mut self.state {
            RotationState::Rotating(rotation) => rotation.advance(delta, self.rotation_duration),
            RotationState::Idle => false,
        };
        if finished {
            self.finish_rotation();
        }
    }

    fn finish_rotation(&mut self) {
        let RotationState::Rotating(rotation) = std::mem::take(&mut self.state) else {
            return;
        };
        let scripted = std::mem::take(&mut self.active_scripted);

        let turns = quarter_turns(rotation.visual_angle(self.easing));
        for &index in &rotation.pieces {
            self.pieces[index].turn(rotation.axis, turns, self.size);
        }
        self.reindex();
        log::debug!("finished {}", rotation.mv);
        self.events.push(CubeEvent::MoveFinished(rotation.mv));

        let solved = self.is_solved();
        if !solved {
            self.solved_signaled = false;
        }

        if let Some(next) = self.queue.pop_front() {
            self.start_move(next);
            return;
        }

        self.highlight_face(None);
        if solved && !self.solved_signaled {
            self.solved_signaled = true;
            if !scripted {
                log::info!("cube solved");
                self.events.push(CubeEvent::Solved);
            }
        }
    }

    /// Replaces the queue with `count` random moves and starts the first one
    /// if no turn is in flight.
    pub fn scramble<R: Rng + ?Sized>(&mut self, count: usize, rng: &mut R) {
        self.queue = (0..count)
            .map(|_| QueuedMove {
                mv: Move::random(rng),
                scripted: false,
            })
            .collect();
        log::info!("scrambling with {count} moves");
        self.start_next_if_idle();
    }

    /// Queues the inverse of the move history, newest move first.
    ///
    /// Does nothing if the history is empty or a solve is already running.
    /// Moves still waiting in the queue are dropped since they never touched
    /// the cube. Each replayed move removes its entry from the history as it
    /// starts, so an interrupted solve leaves exactly the moves still to undo.
    /// Returns true if a solve was started.
    pub fn solve(&mut self) -> bool {
        if self.history.is_empty() || self.is_solving() {
            return false;
        }
        self.queue = inverse_sequence(&self.history)
            .into_iter()
            .map(|mv| QueuedMove { mv, scripted: true })
            .collect();
        log::info!("solving by replaying {} inverse moves", self.queue.len());
        self.start_next_if_idle();
        true
    }

    fn start_next_if_idle(&mut self) {
        if self.is_rotating() {
            return;
        }
        if let Some(next) = self.queue.pop_front() {
            self.start_move(next);
        }
    }

    /// Restores the solved arrangement and forgets all queued and past moves.
    pub fn reset(&mut self) {
        self.state = RotationState::Idle;
        self.queue.clear();
        self.history.clear();
        self.active_scripted = false;
        self.solved_signaled = true;
        self.highlight_face(None);
        self.init_pieces();
        log::info!("cube reset");
    }

    /// Returns true if every face shows a single colour.
    pub fn is_solved(&self) -> bool {
        Face::ALL.into_iter().all(|face| {
            let mut colors = self
                .pieces
                .iter()
                .filter_map(|piece| piece.sticker(face))
                .map(|sticker| sticker.color);
            match colors.next() {
                Some(first) => colors.all(|color| color == first),
                None => true,
            }
        })
    }

    /// Highlights `face`, or clears the highlight with `None`.
    ///
    /// Returns true if the highlight changed.
    pub fn highlight_face(&mut self, face: Option<Face>) -> bool {
        if self.highlight == face {
            return false;
        }
        self.highlight = face;
        self.events.push(CubeEvent::HighlightChanged(face));
        true
    }

    /// Per-piece placement for drawing the current frame.
    pub fn layout(&self) -> Vec<PieceLayout> {
        let offset = (self.size as f32 - 1.0) / 2.0;
        let active = self.active_rotation();
        self.pieces
            .iter()
            .enumerate()
            .map(|(index, piece)| {
                let (x, y, z) = piece.current_position;
                let rotation = active
                    .filter(|rotation| piece.in_layer(rotation.axis, rotation.layer))
                    .map(|rotation| (rotation.axis, rotation.visual_angle(self.easing)));
                PieceLayout {
                    index,
                    position: piece.current_position,
                    centre: [x as f32 - offset, y as f32 - offset, z as f32 - offset],
                    rotation,
                }
            })
            .collect()
    }

    /// Seconds one layer turn takes.
    pub fn rotation_duration(&self) -> f32 {
        self.rotation_duration
    }

    /// Runs every in-flight and queued turn to completion.
    ///
    /// Returns the number of turns completed.
    pub fn settle(&mut self) -> usize {
        let mut completed = 0;
        while self.is_rotating() {
            self.update(self.rotation_duration);
            completed += 1;
        }
        completed
    }
}
