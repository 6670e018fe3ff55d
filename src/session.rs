//! A play session: the cube plus timer, hints and celebration effects.
//!
//! Input becomes [`Command`]s in the controls module; the session applies
//! them to the cube and reacts to the cube's events.

use rand::rngs::StdRng;
use rand::Rng;

use crate::config::Config;
use crate::controls::Command;
use crate::cube::{CubeEvent, RubiksCube};
use crate::effects::CubeEffects;
use crate::error::Result;
use crate::timer::SolveTimer;

/// Seconds a hint stays on screen.
const HINT_DURATION: f64 = 3.0;
/// Sparkles spawned at a face each time it starts turning.
const SPARKLES_PER_MOVE: usize = 10;

#[derive(Clone, Debug, PartialEq)]
struct Hint {
    text: String,
    expires_at: f64,
}

pub struct Session<R: Rng = StdRng> {
    cube: RubiksCube,
    timer: SolveTimer,
    effects: CubeEffects,
    rng: R,
    scramble_moves: usize,
    hints_enabled: bool,
    hint: Option<Hint>,
    solves: usize,
}

impl<R: Rng> Session<R> {
    pub fn new(config: &Config, rng: R) -> Result<Self> {
        Ok(Self {
            cube: RubiksCube::from_config(&config.cube)?,
            timer: SolveTimer::default(),
            effects: CubeEffects::new(),
            rng,
            scramble_moves: config.cube.scramble_moves,
            hints_enabled: config.viewer.hints,
            hint: None,
            solves: 0,
        })
    }

    pub fn cube(&self) -> &RubiksCube {
        &self.cube
    }

    pub fn effects(&self) -> &CubeEffects {
        &self.effects
    }

    pub fn timer(&self) -> &SolveTimer {
        &self.timer
    }

    /// Times the cube was solved by hand this session.
    pub fn solves(&self) -> usize {
        self.solves
    }

    /// Timer text, `m:ss`.
    pub fn clock(&self, now: f64) -> String {
        self.timer.display(now)
    }

    /// The hint to show at `now`, if any.
    pub fn hint(&self, now: f64) -> Option<&str> {
        self.hint
            .as_ref()
            .filter(|hint| now < hint.expires_at)
            .map(|hint| hint.text.as_str())
    }

    pub fn hints_enabled(&self) -> bool {
        self.hints_enabled
    }

    fn show_hint(&mut self, text: &str, now: f64) {
        if !self.hints_enabled {
            return;
        }
        self.hint = Some(Hint {
            text: text.to_string(),
            expires_at: now + HINT_DURATION,
        });
    }

    /// Applies one command. Camera commands belong to the viewer and are
    /// ignored here.
    pub fn apply(&mut self, command: Command, now: f64) {
        match command {
            Command::Rotate(mv) => {
                if !self.timer.is_running() {
                    self.timer.start(now);
                }
                self.cube.rotate_face(mv.face, mv.direction);
            }
            Command::Highlight(face) => {
                self.cube.highlight_face(face);
            }
            Command::Scramble => {
                self.cube.scramble(self.scramble_moves, &mut self.rng);
                self.timer.start(now);
                self.show_hint("Cube scrambled! Try to solve it.", now);
            }
            Command::Reset => {
                self.cube.reset();
                self.timer.stop();
                self.effects.clear();
                self.show_hint("Cube reset to solved state", now);
            }
            Command::Solve => {
                self.cube.solve();
                self.timer.stop();
                self.show_hint("Watch the cube solve itself!", now);
            }
            Command::ToggleHints => {
                self.hints_enabled = !self.hints_enabled;
                let text = if self.hints_enabled {
                    "Hints enabled"
                } else {
                    "Hints disabled"
                };
                // shown even when hints were just turned off
                self.hint = Some(Hint {
                    text: text.to_string(),
                    expires_at: now + HINT_DURATION,
                });
            }
            Command::Hint(text) => self.show_hint(text, now),
            Command::ResetCamera => {}
        }
    }

    /// Advances the cube and effects by `delta` seconds and returns the cube
    /// events raised during this frame.
    pub fn update(&mut self, delta: f32, now: f64) -> Vec<CubeEvent> {
        self.cube.update(delta);
        self.effects.update(delta);

        let events = self.cube.take_events();
        for event in &events {
            match *event {
                CubeEvent::MoveStarted(mv) => {
                    let half = self.cube.size() as f32 / 2.0;
                    let (x, y, z) = mv.face.normal();
                    let centre = [x as f32 * half, y as f32 * half, z as f32 * half];
                    self.effects
                        .spawn_sparkles(centre, SPARKLES_PER_MOVE, &mut self.rng);
                }
                CubeEvent::Solved => {
                    self.solves += 1;
                    log::info!("solved in {}", self.timer.display(now));
                    self.timer.stop();
                    self.effects.victory(&mut self.rng);
                    self.show_hint("Congratulations! You solved the cube!", now);
                }
                CubeEvent::MoveFinished(_) | CubeEvent::HighlightChanged(_) => {}
            }
        }
        events
    }
}
