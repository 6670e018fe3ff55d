//! Faces, turn directions and moves, with single-letter notation.
//!
//! Notation: `F B U D R L` turn a face clockwise, a trailing `'` turns it
//! counterclockwise. Clockwise is always a -90 degree rotation about the
//! face's axis, whichever side of the cube the face is on.

use std::f32::consts::FRAC_PI_2;
use std::fmt;
use std::str::FromStr;

use rand::Rng;

use crate::error::Error;
use crate::geometry::{Axis, Coord};

/// One of the six named sides of the cube.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Face {
    Front,
    Back,
    Up,
    Down,
    Right,
    Left,
}

impl Face {
    pub const ALL: [Face; 6] = [
        Face::Front,
        Face::Back,
        Face::Up,
        Face::Down,
        Face::Right,
        Face::Left,
    ];

    /// The axis a turn of this face rotates about.
    pub fn axis(self) -> Axis {
        match self {
            Face::Front | Face::Back => Axis::Z,
            Face::Up | Face::Down => Axis::Y,
            Face::Right | Face::Left => Axis::X,
        }
    }

    /// Index of this face's layer along its axis for a `size`-wide cube.
    pub fn layer(self, size: usize) -> i32 {
        match self {
            Face::Front | Face::Up | Face::Right => size as i32 - 1,
            Face::Back | Face::Down | Face::Left => 0,
        }
    }

    /// Outward unit normal of the face.
    pub fn normal(self) -> Coord {
        match self {
            Face::Right => (1, 0, 0),
            Face::Left => (-1, 0, 0),
            Face::Up => (0, 1, 0),
            Face::Down => (0, -1, 0),
            Face::Front => (0, 0, 1),
            Face::Back => (0, 0, -1),
        }
    }

    /// The face whose outward normal is `normal`, if it is an axis unit vector.
    pub fn from_normal(normal: Coord) -> Option<Face> {
        Face::ALL.into_iter().find(|face| face.normal() == normal)
    }

    /// Notation letter for this face.
    pub fn letter(self) -> char {
        match self {
            Face::Front => 'F',
            Face::Back => 'B',
            Face::Up => 'U',
            Face::Down => 'D',
            Face::Right => 'R',
            Face::Left => 'L',
        }
    }

    /// Parses a face letter, case-insensitively.
    pub fn from_letter(letter: char) -> Option<Face> {
        Face::ALL
            .into_iter()
            .find(|face| face.letter() == letter.to_ascii_uppercase())
    }
}

/// Turn direction of a move.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Direction {
    Clockwise,
    Counterclockwise,
}

impl Direction {
    pub fn inverse(self) -> Self {
        match self {
            Direction::Clockwise => Direction::Counterclockwise,
            Direction::Counterclockwise => Direction::Clockwise,
        }
    }

    /// Signed rotation angle in radians: clockwise is -90 degrees.
    pub fn angle(self) -> f32 {
        match self {
            Direction::Clockwise => -FRAC_PI_2,
            Direction::Counterclockwise => FRAC_PI_2,
        }
    }
}

/// A single quarter turn of one face.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Move {
    pub face: Face,
    pub direction: Direction,
}

impl Move {
    pub const fn new(face: Face, direction: Direction) -> Self {
        Self { face, direction }
    }

    /// The move that undoes this one.
    pub fn inverse(self) -> Self {
        Self::new(self.face, self.direction.inverse())
    }

    /// Draws a move with a uniformly random face and direction.
    pub fn random<R: Rng + ?Sized>(rng: &mut R) -> Self {
        let face = Face::ALL[rng.gen_range(0..Face::ALL.len())];
        let direction = if rng.gen_bool(0.5) {
            Direction::Clockwise
        } else {
            Direction::Counterclockwise
        };
        Self::new(face, direction)
    }
}

impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.face.letter())?;
        if self.direction == Direction::Counterclockwise {
            write!(f, "'")?;
        }
        Ok(())
    }
}

impl FromStr for Move {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut chars = s.trim().chars();
        let face = chars
            .next()
            .and_then(Face::from_letter)
            .ok_or_else(|| Error::InvalidMove(s.to_string()))?;
        let direction = match chars.as_str() {
            "" => Direction::Clockwise,
            "'" => Direction::Counterclockwise,
            _ => return Err(Error::InvalidMove(s.to_string())),
        };
        Ok(Self::new(face, direction))
    }
}

/// Parses a whitespace-separated move sequence such as `"R U R' U'"`.
pub fn parse_sequence(text: &str) -> Result<Vec<Move>, Error> {
    text.split_whitespace().map(str::parse).collect()
}

/// Formats a move sequence in notation, separated by spaces.
pub fn format_sequence(moves: &[Move]) -> String {
    moves
        .iter()
        .map(Move::to_string)
        .collect::<Vec<_>>()
        .join(" ")
}

/// The sequence that undoes `moves`: reversed, each direction inverted.
pub fn inverse_sequence(moves: &[Move]) -> Vec<Move> {
    moves.iter().rev().map(|mv| mv.inverse()).collect()
}

#[cfg(test)]
mod tests {
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    use super::*;

    #[test]
    fn test_face_axis_and_layer() {
        assert_eq!(Face::Front.axis(), Axis::Z);
        assert_eq!(Face::Down.axis(), Axis::Y);
        assert_eq!(Face::Left.axis(), Axis::X);
        assert_eq!(Face::Front.layer(3), 2);
        assert_eq!(Face::Right.layer(4), 3);
        assert_eq!(Face::Up.layer(3), 2);
        assert_eq!(Face::Back.layer(3), 0);
        assert_eq!(Face::Left.layer(3), 0);
        assert_eq!(Face::Down.layer(5), 0);
    }

    #[test]
    fn test_normals_point_at_their_layer() {
        for face in Face::ALL {
            let component = face.axis().component(face.normal());
            let expected = if face.layer(3) == 0 { -1 } else { 1 };
            assert_eq!(component, expected, "{face:?}");
            assert_eq!(Face::from_normal(face.normal()), Some(face));
        }
        assert_eq!(Face::from_normal((1, 1, 0)), None);
    }

    #[test]
    fn test_direction_angles() {
        assert_eq!(Direction::Clockwise.angle(), -FRAC_PI_2);
        assert_eq!(Direction::Counterclockwise.angle(), FRAC_PI_2);
        assert_eq!(Direction::Clockwise.inverse(), Direction::Counterclockwise);
    }

    #[test]
    fn test_parse_and_format_notation() {
        let moves = parse_sequence("R U r' F'  d").unwrap();
        assert_eq!(
            moves,
            vec![
                Move::new(Face::Right, Direction::Clockwise),
                Move::new(Face::Up, Direction::Clockwise),
                Move::new(Face::Right, Direction::Counterclockwise),
                Move::new(Face::Front, Direction::Counterclockwise),
                Move::new(Face::Down, Direction::Clockwise),
            ]
        );
        assert_eq!(format_sequence(&moves), "R U R' F' D");
    }

    #[test]
    fn test_parse_rejects_garbage() {
        assert!(matches!("X".parse::<Move>(), Err(Error::InvalidMove(_))));
        assert!(matches!("R2".parse::<Move>(), Err(Error::InvalidMove(_))));
        assert!(matches!("".parse::<Move>(), Err(Error::InvalidMove(_))));
        assert!(parse_sequence("R Q").is_err());
    }

    #[test]
    fn test_inverse_sequence() {
        let moves = parse_sequence("F U' R").unwrap();
        assert_eq!(format_sequence(&inverse_sequence(&moves)), "R' U F'");
    }

    #[test]
    fn test_random_moves_cover_all_faces_and_directions() {
        let mut rng = StdRng::seed_from_u64(7);
        let moves: Vec<Move> = (0..500).map(|_| Move::random(&mut rng)).collect();
        for face in Face::ALL {
            assert!(moves.iter().any(|mv| mv.face == face), "{face:?} never drawn");
        }
        assert!(moves.iter().any(|mv| mv.direction == Direction::Clockwise));
        assert!(moves
            .iter()
            .any(|mv| mv.direction == Direction::Counterclockwise));
    }
}
