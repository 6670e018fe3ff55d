//! Text rendering of the cube as an unfolded net.
//!
//! ```text
//!     U
//! L F R B
//!     D
//! ```
//!
//! Each face is drawn as seen from outside the cube, with the up face above
//! the front face and the down face below it.

use crate::cube::RubiksCube;
use crate::geometry::Coord;
use crate::moves::Face;
use crate::pieces::Color;

/// Grid cells of `face`, row by row as seen from outside the cube.
pub fn face_cells(face: Face, size: usize) -> Vec<Vec<Coord>> {
    let last = size as i32 - 1;
    let n = size as i32;
    (0..n)
        .map(|row| {
            (0..n)
                .map(|col| match face {
                    Face::Front => (col, last - row, last),
                    Face::Back => (last - col, last - row, 0),
                    Face::Up => (col, last, row),
                    Face::Down => (col, 0, last - row),
                    Face::Right => (last, last - row, last - col),
                    Face::Left => (0, last - row, col),
                })
                .collect()
        })
        .collect()
}

/// Sticker colours of `face`, laid out like [`face_cells`].
pub fn face_colors(cube: &RubiksCube, face: Face) -> Vec<Vec<Option<Color>>> {
    face_cells(face, cube.size())
        .into_iter()
        .map(|row| {
            row.into_iter()
                .map(|cell| {
                    cube.piece_at(cell)
                        .and_then(|piece| piece.sticker(face))
                        .map(|sticker| sticker.color)
                })
                .collect()
        })
        .collect()
}

fn row_string(colors: &[Option<Color>]) -> String {
    colors
        .iter()
        .map(|color| color.map_or('?', Color::letter))
        .collect()
}

/// Formats the whole cube as an unfolded net of colour letters.
pub fn format_net(cube: &RubiksCube) -> String {
    let size = cube.size();
    let indent = " ".repeat(size + 1);
    let mut output = String::new();

    for row in face_colors(cube, Face::Up) {
        output.push_str(&indent);
        output.push_str(&row_string(&row));
        output.push('\n');
    }

    let middle: Vec<_> = [Face::Left, Face::Front, Face::Right, Face::Back]
        .into_iter()
        .map(|face| face_colors(cube, face))
        .collect();
    for row in 0..size {
        let line: Vec<String> = middle.iter().map(|face| row_string(&face[row])).collect();
        output.push_str(&line.join(" "));
        output.push('\n');
    }

    for row in face_colors(cube, Face::Down) {
        output.push_str(&indent);
        output.push_str(&row_string(&row));
        output.push('\n');
    }

    output
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::moves::parse_sequence;

    fn apply(cube: &mut RubiksCube, notation: &str) {
        for mv in parse_sequence(notation).unwrap() {
            cube.rotate_face(mv.face, mv.direction);
        }
        cube.settle();
    }

    #[test]
    fn test_face_cells_lie_on_their_face() {
        for size in 1..=4 {
            for face in Face::ALL {
                let cells = face_cells(face, size);
                assert_eq!(cells.len(), size);
                for cell in cells.iter().flatten() {
                    assert_eq!(face.axis().component(*cell), face.layer(size));
                }
            }
        }
    }

    #[test]
    fn test_solved_net() {
        let cube = RubiksCube::new(3).unwrap();
        let output = format!("Solved 3x3x3:\n{}", format_net(&cube));
        insta::assert_snapshot!("solved_net", output);
    }

    #[test]
    fn test_net_after_right_then_up() {
        let mut cube = RubiksCube::new(3).unwrap();
        apply(&mut cube, "R U");
        let output = format!("After R U:\n{}", format_net(&cube));
        insta::assert_snapshot!("net_after_right_then_up", output);
    }

    #[test]
    fn test_net_after_two_by_two_scramble() {
        let mut cube = RubiksCube::new(2).unwrap();
        apply(&mut cube, "F R' D B L' U");
        let output = format!("After F R' D B L' U on 2x2x2:\n{}", format_net(&cube));
        insta::assert_snapshot!("net_two_by_two", output);
    }

    #[test]
    fn test_right_turn_moves_front_column_up() {
        let mut cube = RubiksCube::new(3).unwrap();
        apply(&mut cube, "R");
        // a clockwise right turn carries the front's right column onto the top
        let up = face_colors(&cube, Face::Up);
        for row in &up {
            assert_eq!(row[2], Some(Color::Red));
            assert_eq!(row[0], Some(Color::White));
        }
        let front = face_colors(&cube, Face::Front);
        for row in &front {
            assert_eq!(row[2], Some(Color::Yellow));
        }
    }
}
