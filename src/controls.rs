//! Gesture interpretation: pointer, touch and keyboard input to commands.
//!
//! The caller resolves screen positions against the scene and passes in the
//! face under the pointer, so this module only deals with positions in
//! pixels, timestamps in seconds and faces.

use crate::config::ControlsConfig;
use crate::moves::{Direction, Face, Move};

/// Something the session should do in response to input.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Command {
    Rotate(Move),
    Highlight(Option<Face>),
    Scramble,
    Reset,
    Solve,
    ResetCamera,
    ToggleHints,
    Hint(&'static str),
}

/// What a drag currently does.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum ControlMode {
    /// Dragging on the cube turns faces.
    #[default]
    Pieces,
    /// Dragging orbits the camera.
    Orbit,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
enum PointerKind {
    #[default]
    Mouse,
    Touch,
}

/// A mouse button press, already resolved against the scene.
#[derive(Clone, Copy, Debug)]
pub struct PointerPress {
    pub position: [f32; 2],
    pub time: f64,
    /// Face of the piece under the pointer, if any.
    pub hit: Option<Face>,
    /// Right button or another non-primary button.
    pub secondary: bool,
    pub ctrl: bool,
}

/// Picks the turn direction for a drag across `face`.
///
/// Camera orientation is not consulted; the table assumes the default view.
pub fn drag_direction(face: Face, horizontal: bool, positive: bool) -> Direction {
    let clockwise_when_positive = match (face, horizontal) {
        (Face::Front | Face::Up | Face::Left, true) => true,
        (Face::Back | Face::Down | Face::Right, false) => true,
        _ => false,
    };
    if positive == clockwise_when_positive {
        Direction::Clockwise
    } else {
        Direction::Counterclockwise
    }
}

/// Fixed keyboard bindings. Shift turns counterclockwise.
pub fn key_command(key: char, shift: bool) -> Option<Command> {
    let key = key.to_ascii_lowercase();
    if let Some(face) = Face::from_letter(key) {
        let direction = if shift {
            Direction::Counterclockwise
        } else {
            Direction::Clockwise
        };
        return Some(Command::Rotate(Move::new(face, direction)));
    }
    match key {
        ' ' => Some(Command::Scramble),
        'v' => Some(Command::ResetCamera),
        'h' => Some(Command::ToggleHints),
        _ => None,
    }
}

/// Tracks one pointer or touch interaction at a time.
#[derive(Debug, Default)]
pub struct CubeControls {
    config: ControlsConfig,
    mode: ControlMode,
    kind: PointerKind,
    /// A press landed on a piece and may still turn a face.
    selected: bool,
    hover_face: Option<Face>,
    drag_mode: bool,
    /// A face was turned by dragging during the current press.
    turned: bool,
    start_point: [f32; 2],
    last_point: [f32; 2],
    last_sample: f64,
    touch_started: f64,
    velocity: Option<[f32; 2]>,
    last_interaction: f64,
}

impl CubeControls {
    pub fn new(config: ControlsConfig) -> Self {
        Self {
            config,
            ..Self::default()
        }
    }

    pub fn mode(&self) -> ControlMode {
        self.mode
    }

    pub fn is_orbiting(&self) -> bool {
        self.mode == ControlMode::Orbit
    }

    pub fn hover_face(&self) -> Option<Face> {
        self.hover_face
    }

    pub fn is_dragging(&self) -> bool {
        self.drag_mode
    }

    pub fn pointer_down(&mut self, press: PointerPress) -> Vec<Command> {
        self.last_interaction = press.time;
        if press.secondary || press.ctrl {
            self.mode = ControlMode::Orbit;
            return Vec::new();
        }

        self.mode = ControlMode::Pieces;
        self.kind = PointerKind::Mouse;
        self.begin_press(press.position, press.time);
        self.select(press.hit).into_iter().collect()
    }

    pub fn pointer_move(&mut self, position: [f32; 2], time: f64, hit: Option<Face>) -> Vec<Command> {
        self.last_interaction = time;
        let mut commands = Vec::new();
        if !self.drag_mode && self.mode == ControlMode::Pieces {
            commands.extend(self.hover(hit));
        }
        if self.selected && self.mode == ControlMode::Pieces {
            self.sample_velocity(position, time);
            commands.extend(self.handle_drag(position));
        }
        commands
    }

    pub fn pointer_up(&mut self, _time: f64) -> Vec<Command> {
        let command = self.release(self.config.mouse_momentum);
        command.into_iter().collect()
    }

    /// A touch began; `touches` holds every finger currently down.
    pub fn touch_start(&mut self, touches: &[[f32; 2]], time: f64, hit: Option<Face>) -> Vec<Command> {
        self.last_interaction = time;
        self.touch_started = time;
        match touches {
            [position] => {
                self.mode = ControlMode::Pieces;
                self.kind = PointerKind::Touch;
                self.begin_press(*position, time);
                self.select(hit).into_iter().collect()
            }
            [] => Vec::new(),
            _ => {
                self.mode = ControlMode::Orbit;
                self.selected = false;
                Vec::new()
            }
        }
    }

    pub fn touch_move(&mut self, touches: &[[f32; 2]], time: f64) -> Vec<Command> {
        self.last_interaction = time;
        let [position] = touches else {
            return Vec::new();
        };

        if !self.drag_mode
            && self.mode == ControlMode::Pieces
            && time - self.touch_started > self.config.long_press
        {
            log::debug!("long press, switching to camera orbit");
            self.mode = ControlMode::Orbit;
            self.selected = false;
            return vec![Command::Hint("Use two fingers to zoom, drag to orbit")];
        }

        if self.selected && self.mode == ControlMode::Pieces {
            self.sample_velocity(*position, time);
            return self.handle_drag(*position).into_iter().collect();
        }
        Vec::new()
    }

    pub fn touch_end(&mut self, _time: f64) -> Vec<Command> {
        let command = self.release(self.config.touch_momentum);
        command.into_iter().collect()
    }

    pub fn key_down(&mut self, key: char, shift: bool, time: f64) -> Option<Command> {
        self.last_interaction = time;
        key_command(key, shift)
    }

    pub fn double_click(&mut self, time: f64) -> Command {
        self.last_interaction = time;
        Command::ResetCamera
    }

    /// Yaw in radians the idle view should spin by this frame.
    pub fn auto_rotate(&self, now: f64, delta: f32, cube_rotating: bool) -> f32 {
        let idle = now - self.last_interaction > self.config.idle_timeout;
        if idle && !cube_rotating && self.mode != ControlMode::Orbit {
            delta * self.config.auto_rotate_speed * 0.5
        } else {
            0.0
        }
    }

    fn begin_press(&mut self, position: [f32; 2], time: f64) {
        self.start_point = position;
        self.last_point = position;
        self.last_sample = time;
        self.turned = false;
        self.velocity = None;
    }

    fn select(&mut self, hit: Option<Face>) -> Option<Command> {
        let face = hit?;
        self.selected = true;
        self.hover_face = Some(face);
        Some(Command::Highlight(Some(face)))
    }

    fn hover(&mut self, hit: Option<Face>) -> Option<Command> {
        if self.hover_face == hit {
            return None;
        }
        self.hover_face = hit;
        Some(Command::Highlight(hit))
    }

    fn sample_velocity(&mut self, position: [f32; 2], time: f64) {
        let elapsed = (time - self.last_sample) as f32;
        if elapsed > 0.0 {
            self.velocity = Some([
                (position[0] - self.last_point[0]) / elapsed,
                (position[1] - self.last_point[1]) / elapsed,
            ]);
            self.last_point = position;
            self.last_sample = time;
        }
    }

    fn handle_drag(&mut self, position: [f32; 2]) -> Option<Command> {
        let dx = position[0] - self.start_point[0];
        let dy = position[1] - self.start_point[1];
        let exceeds = |threshold: f32| dx.abs() > threshold || dy.abs() > threshold;

        if !self.drag_mode && exceeds(self.config.drag_threshold) {
            self.drag_mode = true;
        }
        if !self.drag_mode || !exceeds(self.config.rotation_delta) {
            return None;
        }

        let face = self.hover_face?;
        let horizontal = dx.abs() > dy.abs();
        let positive = if horizontal { dx > 0.0 } else { dy > 0.0 };
        let direction = drag_direction(face, horizontal, positive);

        self.selected = false;
        self.drag_mode = false;
        self.turned = true;
        self.start_point = position;
        Some(Command::Rotate(Move::new(face, direction)))
    }

    fn release(&mut self, momentum: f32) -> Option<Command> {
        let velocity = self.velocity.take();
        let turned = std::mem::take(&mut self.turned);
        self.selected = false;
        self.drag_mode = false;

        let [vx, vy] = velocity?;
        let face = self.hover_face?;
        if turned || (vx.abs() <= momentum && vy.abs() <= momentum) {
            return None;
        }
        let horizontal = vx.abs() > vy.abs();
        let positive = if horizontal { vx > 0.0 } else { vy > 0.0 };
        Some(Command::Rotate(Move::new(face, drag_direction(face, horizontal, positive))))
    }
}
