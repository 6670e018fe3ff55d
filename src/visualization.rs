//! Interactive 3D cube using kiss3d.
//!
//! Each frame reads [`RubiksCube::layout`] and moves the scene nodes to match.
//! Sticker slabs are rebuilt whenever a turn lands, since their thin axis
//! follows the face they point at.

use std::time::Instant;

use kiss3d::prelude::*;
use rand::rngs::StdRng;
use rand::SeedableRng;

use rubiks::config::Config;
use rubiks::controls::{Command, CubeControls};
use rubiks::cube::RubiksCube;
use rubiks::{CubeEvent, Session};

/// Edge of a piece body (slightly under 1.0 for visible gaps).
const BODY_SIZE: f32 = 0.95;
/// Edge of a sticker on its face plane.
const STICKER_SIZE: f32 = 0.85;
const STICKER_THICKNESS: f32 = 0.02;

fn color([r, g, b]: [f32; 3]) -> Color {
    Color::new(r, g, b, 1.0)
}

fn vec3([x, y, z]: [f32; 3]) -> Vec3 {
    Vec3::new(x, y, z)
}

/// A rendered sticker and where it sits relative to its piece centre.
struct RenderedSticker {
    node: SceneNode3d,
    piece: usize,
    offset: [f32; 3],
}

struct RenderedPiece {
    node: SceneNode3d,
    piece: usize,
}

/// Scene nodes for the whole cube.
#[derive(Default)]
struct CubeScene {
    bodies: Vec<RenderedPiece>,
    stickers: Vec<RenderedSticker>,
}

impl CubeScene {
    fn build(scene: &mut SceneNode3d, cube: &RubiksCube) -> Self {
        let highlight = cube.highlighted_face();
        let mut built = Self::default();

        for (index, piece) in cube.pieces().iter().enumerate() {
            let node = scene
                .add_cube(BODY_SIZE, BODY_SIZE, BODY_SIZE)
                .set_color(Color::new(0.08, 0.08, 0.08, 1.0));
            built.bodies.push(RenderedPiece { node, piece: index });

            for sticker in &piece.stickers {
                let (nx, ny, nz) = sticker.facing.normal();
                let extent = |n: i32| if n == 0 { STICKER_SIZE } else { STICKER_THICKNESS };
                let mut rgb = sticker.color.rgb();
                if highlight == Some(sticker.facing) {
                    rgb = rgb.map(|c| (c + 0.35).min(1.0));
                }
                let node = scene
                    .add_cube(extent(nx), extent(ny), extent(nz))
                    .set_color(color(rgb));
                let depth = BODY_SIZE / 2.0 + STICKER_THICKNESS / 2.0;
                built.stickers.push(RenderedSticker {
                    node,
                    piece: index,
                    offset: [nx as f32 * depth, ny as f32 * depth, nz as f32 * depth],
                });
            }
        }
        built
    }

    fn remove(&mut self) {
        for mut body in self.bodies.drain(..) {
            body.node.remove();
        }
        for mut sticker in self.stickers.drain(..) {
            sticker.node.remove();
        }
    }

    /// Moves every node to this frame's animated position.
    fn place(&mut self, cube: &RubiksCube) {
        let layout = cube.layout();
        for body in &mut self.bodies {
            body.node.set_position(vec3(layout[body.piece].world_centre()));
        }
        for sticker in &mut self.stickers {
            let piece = &layout[sticker.piece];
            let [cx, cy, cz] = piece.centre;
            let [ox, oy, oz] = sticker.offset;
            let point = piece.transform([cx + ox, cy + oy, cz + oz]);
            sticker.node.set_position(vec3(point));
        }
    }
}

/// Small cubes standing in for sparkles and confetti, rebuilt every frame.
#[derive(Default)]
struct ParticleScene {
    nodes: Vec<SceneNode3d>,
}

impl ParticleScene {
    fn sync<R: rand::Rng>(&mut self, scene: &mut SceneNode3d, session: &Session<R>) {
        for mut node in self.nodes.drain(..) {
            node.remove();
        }
        for particle in session.effects().visible() {
            if particle.size <= 0.0 {
                continue;
            }
            let node = scene
                .add_cube(particle.size, particle.size, particle.size)
                .set_color(color(particle.color))
                .set_position(vec3(particle.position));
            self.nodes.push(node);
        }
    }
}

fn key_char(key: kiss3d::event::Key) -> Option<char> {
    use kiss3d::event::Key;
    Some(match key {
        Key::F => 'f',
        Key::B => 'b',
        Key::U => 'u',
        Key::D => 'd',
        Key::R => 'r',
        Key::L => 'l',
        Key::Space => ' ',
        Key::V => 'v',
        Key::H => 'h',
        _ => return None,
    })
}

fn title(session: &Session, now: f64) -> String {
    let mut title = format!("Rubik's Cube  {}", session.clock(now));
    if let Some(hint) = session.hint(now) {
        title.push_str("  ");
        title.push_str(hint);
    }
    title
}

/// Opens the viewer and runs until the window is closed.
pub fn display(config: Config) -> rubiks::Result<()> {
    pollster::block_on(display_async(config))
}

async fn display_async(config: Config) -> rubiks::Result<()> {
    let mut session = Session::new(&config, StdRng::from_entropy())?;
    let mut controls = CubeControls::new(config.controls.clone());

    let mut window = Window::new(&title(&session, 0.0)).await;

    let reset_camera = || {
        let mut camera = OrbitCamera3d::default();
        camera.set_dist(config.viewer.camera_distance);
        camera
    };
    let mut camera = reset_camera();

    let mut scene = SceneNode3d::empty();
    scene
        .add_light(Light::point(100.0))
        .set_position(Vec3::new(5.0, 5.0, 5.0));

    let mut cube_scene = CubeScene::build(&mut scene, session.cube());
    let mut particles = ParticleScene::default();

    let started = Instant::now();
    let mut last_frame = 0.0_f64;
    let mut shown_title = String::new();

    loop {
        let now = started.elapsed().as_secs_f64();
        let delta = (now - last_frame) as f32;
        last_frame = now;

        let mut needs_rebuild = false;
        for event in window.events().iter() {
            use kiss3d::event::{Action, Key, Modifiers, WindowEvent};
            let WindowEvent::Key(key, Action::Press, modifiers) = event.value else {
                continue;
            };
            let command = match key {
                Key::Back => Some(Command::Reset),
                Key::S => Some(Command::Solve),
                _ => key_char(key).and_then(|c| {
                    controls.key_down(c, modifiers.contains(Modifiers::Shift), now)
                }),
            };
            match command {
                Some(Command::ResetCamera) => camera = reset_camera(),
                Some(command) => {
                    if command == Command::Reset {
                        needs_rebuild = true;
                    }
                    session.apply(command, now);
                }
                None => {}
            }
        }

        for event in session.update(delta, now) {
            if matches!(
                event,
                CubeEvent::MoveFinished(_) | CubeEvent::HighlightChanged(_)
            ) {
                needs_rebuild = true;
            }
        }

        if needs_rebuild {
            cube_scene.remove();
            cube_scene = CubeScene::build(&mut scene, session.cube());
        }
        cube_scene.place(session.cube());
        particles.sync(&mut scene, &session);

        let yaw = controls.auto_rotate(now, delta, session.cube().is_rotating());
        if yaw != 0.0 {
            camera.set_yaw(camera.yaw() + yaw);
        }

        let current_title = title(&session, now);
        if current_title != shown_title {
            window.set_title(&current_title);
            shown_title = current_title;
        }

        if !window.render_3d(&mut scene, &mut camera).await {
            break;
        }
    }

    log::info!("viewer closed after {} solves", session.solves());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_turn_keys_map_to_notation_letters() {
        use kiss3d::event::Key;
        for (key, letter) in [
            (Key::F, 'f'),
            (Key::B, 'b'),
            (Key::U, 'u'),
            (Key::D, 'd'),
            (Key::R, 'r'),
            (Key::L, 'l'),
        ] {
            assert_eq!(key_char(key), Some(letter));
        }
        assert_eq!(key_char(Key::Space), Some(' '));
        assert_eq!(key_char(Key::Z), None);
    }
}
