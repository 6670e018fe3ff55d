//! Axes, grid coordinates and exact quarter-turn remapping.
//!
//! A layer turn is a rotation of the grid about one coordinate axis through
//! the centre of the cube. Rotations use the right-hand rule: a positive
//! quarter turn about +Y carries +Z onto +X.

use std::f32::consts::FRAC_PI_2;

/// A 3D integer coordinate, either a grid cell or a unit direction.
pub type Coord = (i32, i32, i32);

/// One of the three rotation axes.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Axis {
    X,
    Y,
    Z,
}

impl Axis {
    pub const ALL: [Axis; 3] = [Axis::X, Axis::Y, Axis::Z];

    /// Returns the component of `coord` along this axis.
    #[inline]
    pub fn component(self, (x, y, z): Coord) -> i32 {
        match self {
            Axis::X => x,
            Axis::Y => y,
            Axis::Z => z,
        }
    }

    /// Unit vector pointing along the positive axis.
    pub fn unit(self) -> [f32; 3] {
        match self {
            Axis::X => [1.0, 0.0, 0.0],
            Axis::Y => [0.0, 1.0, 0.0],
            Axis::Z => [0.0, 0.0, 1.0],
        }
    }
}

/// Positive quarter-turn rotations about each axis, indexed `[axis][turns]`.
///
/// Each row lists 0, 90, 180 and 270 degrees. The formulas act on vectors
/// relative to the rotation centre, so they are used both for sticker normals
/// and (on doubled centred coordinates) for grid cells.
const TURNS: [[fn(Coord) -> Coord; 4]; 3] = [
    // about X: (y, z) -> (-z, y)
    [
        |(x, y, z)| (x, y, z),
        |(x, y, z)| (x, -z, y),
        |(x, y, z)| (x, -y, -z),
        |(x, y, z)| (x, z, -y),
    ],
    // about Y: (z, x) -> (-x, z)
    [
        |(x, y, z)| (x, y, z),
        |(x, y, z)| (z, y, -x),
        |(x, y, z)| (-x, y, -z),
        |(x, y, z)| (-z, y, x),
    ],
    // about Z: (x, y) -> (-y, x)
    [
        |(x, y, z)| (x, y, z),
        |(x, y, z)| (-y, x, z),
        |(x, y, z)| (-x, -y, z),
        |(x, y, z)| (y, -x, z),
    ],
];

/// Normalizes an angle in radians to a count of positive quarter turns.
///
/// Rounds to the nearest multiple of 90 degrees and reduces modulo 360, so
/// -90 degrees becomes 3 and 450 degrees becomes 1.
pub fn quarter_turns(angle: f32) -> usize {
    ((angle / FRAC_PI_2).round() as i32).rem_euclid(4) as usize
}

/// Rotates a direction vector by `turns` positive quarter turns about `axis`.
#[inline]
pub fn rotate_vector(axis: Axis, turns: usize, vector: Coord) -> Coord {
    TURNS[axis as usize][turns % 4](vector)
}

/// Remaps a grid cell of a `size`-wide cube after `turns` positive quarter
/// turns about `axis`.
///
/// Uses doubled centred coordinates so even-sized cubes, whose centre falls
/// between cells, stay in integer arithmetic: `centre_doubled = size - 1`.
pub fn remap_position(axis: Axis, turns: usize, size: usize, (x, y, z): Coord) -> Coord {
    let size_m1 = size as i32 - 1;
    let doubled = (2 * x - size_m1, 2 * y - size_m1, 2 * z - size_m1);
    let (rx, ry, rz) = rotate_vector(axis, turns, doubled);
    ((rx + size_m1) / 2, (ry + size_m1) / 2, (rz + size_m1) / 2)
}

/// Returns true if the cell lies on the outer shell of the grid.
pub fn is_boundary(size: usize, (x, y, z): Coord) -> bool {
    let last = size as i32 - 1;
    [x, y, z].iter().any(|&c| c == 0 || c == last)
}

/// Rotates a float point about `axis` by `angle` radians (right-hand rule).
///
/// Used for the continuous animation; the logical state only ever moves in
/// whole quarter turns through [`remap_position`].
pub fn rotate_point(axis: Axis, angle: f32, [x, y, z]: [f32; 3]) -> [f32; 3] {
    let (sin, cos) = angle.sin_cos();
    match axis {
        Axis::X => [x, y * cos - z * sin, y * sin + z * cos],
        Axis::Y => [x * cos + z * sin, y, -x * sin + z * cos],
        Axis::Z => [x * cos - y * sin, x * sin + y * cos, z],
    }
}
