//! Cube pieces, their stickers and the solved arrangement.
//!
//! Only pieces on the outer shell of the grid are modelled. Each piece keeps
//! the stickers it was built with; a turn rotates both its grid position and
//! the direction each sticker faces.

use crate::geometry::{self, remap_position, rotate_vector, Axis, Coord};
use crate::moves::Face;

/// Sticker colours of a standard cube.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Color {
    Red,
    Orange,
    White,
    Yellow,
    Green,
    Blue,
}

impl Color {
    /// The colour a face shows in the solved arrangement.
    pub fn of_face(face: Face) -> Self {
        match face {
            Face::Front => Color::Red,
            Face::Back => Color::Orange,
            Face::Up => Color::White,
            Face::Down => Color::Yellow,
            Face::Right => Color::Green,
            Face::Left => Color::Blue,
        }
    }

    /// Display colour as linear RGB in `0.0..=1.0`.
    pub fn rgb(self) -> [f32; 3] {
        match self {
            Color::Red => [1.0, 0.0, 0.0],
            Color::Orange => [1.0, 0.65, 0.0],
            Color::White => [1.0, 1.0, 1.0],
            Color::Yellow => [1.0, 1.0, 0.0],
            Color::Green => [0.0, 1.0, 0.0],
            Color::Blue => [0.0, 0.0, 1.0],
        }
    }

    /// Single-letter code used in text renderings.
    pub fn letter(self) -> char {
        match self {
            Color::Red => 'R',
            Color::Orange => 'O',
            Color::White => 'W',
            Color::Yellow => 'Y',
            Color::Green => 'G',
            Color::Blue => 'B',
        }
    }
}

/// A coloured face of a piece, pointing at one of the six cube faces.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Sticker {
    pub facing: Face,
    pub color: Color,
}

/// A unit cube on the shell of the grid.
#[derive(Clone, Debug)]
pub struct Piece {
    /// Grid cell the piece currently occupies, each component in `0..size`.
    pub current_position: Coord,
    /// Centred rest position in the solved arrangement. Never changes.
    pub original_position: [f32; 3],
    /// Outward stickers; a corner has three, an edge two, a centre one.
    pub stickers: Vec<Sticker>,
}

impl Piece {
    /// Creates the piece that sits at `cell` in the solved arrangement.
    pub fn solved_at(size: usize, cell: Coord) -> Self {
        let offset = (size as f32 - 1.0) / 2.0;
        let stickers = Face::ALL
            .into_iter()
            .filter(|face| face.axis().component(cell) == face.layer(size))
            .map(|facing| Sticker {
                facing,
                color: Color::of_face(facing),
            })
            .collect();

        Self {
            current_position: cell,
            original_position: [
                cell.0 as f32 - offset,
                cell.1 as f32 - offset,
                cell.2 as f32 - offset,
            ],
            stickers,
        }
    }

    /// Returns true if the piece is in the layer at `layer` along `axis`.
    #[inline]
    pub fn in_layer(&self, axis: Axis, layer: i32) -> bool {
        axis.component(self.current_position) == layer
    }

    /// Applies `turns` positive quarter turns about `axis` to the piece's
    /// position and stickers.
    pub fn turn(&mut self, axis: Axis, turns: usize, size: usize) {
        self.current_position = remap_position(axis, turns, size, self.current_position);
        for sticker in &mut self.stickers {
            let normal = rotate_vector(axis, turns, sticker.facing.normal());
            // quarter turns map axis unit vectors onto axis unit vectors
            if let Some(facing) = Face::from_normal(normal) {
                sticker.facing = facing;
            }
        }
    }

    /// The sticker facing `face`, if any.
    pub fn sticker(&self, face: Face) -> Option<&Sticker> {
        self.stickers.iter().find(|sticker| sticker.facing == face)
    }
}

/// Builds every shell piece of a `size`-wide cube in the solved arrangement.
///
/// Pieces are ordered x-major, then y, then z. Interior cells are skipped.
pub fn solved_pieces(size: usize) -> Vec<Piece> {
    let n = size as i32;
    let mut pieces = Vec::new();
    for x in 0..n {
        for y in 0..n {
            for z in 0..n {
                if geometry::is_boundary(size, (x, y, z)) {
                    pieces.push(Piece::solved_at(size, (x, y, z)));
                }
            }
        }
    }
    pieces
}
