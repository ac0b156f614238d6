use std::fmt::{Display, Formatter};

/// A position or normal as written in the text grammar. Kept in double precision so that
/// re-serialising an untouched value does not lose digits.
#[derive(Debug, Copy, Clone, PartialEq, Default)]
pub struct Vector3 {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

impl Vector3 {
    pub const fn new(x: f64, y: f64, z: f64) -> Self {
        Vector3 { x, y, z }
    }
}

impl From<[f64; 3]> for Vector3 {
    fn from(value: [f64; 3]) -> Self {
        Vector3::new(value[0], value[1], value[2])
    }
}

impl From<Vector3> for [f64; 3] {
    fn from(value: Vector3) -> Self {
        [value.x, value.y, value.z]
    }
}

impl Display for Vector3 {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} {} {}", self.x, self.y, self.z)
    }
}

/// A `v` record: the point plus whatever follows it on the line (e.g. vertex colours), kept
/// verbatim so that it survives baking and merging.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Position {
    pub point: Vector3,
    pub trailing: String,
}

impl From<Vector3> for Position {
    fn from(point: Vector3) -> Self {
        Position {
            point,
            trailing: String::new(),
        }
    }
}

/// Only plain positions compare equal to a bare point.
impl PartialEq<Vector3> for Position {
    fn eq(&self, other: &Vector3) -> bool {
        self.trailing.is_empty() && self.point == *other
    }
}

impl Display for Position {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        if self.trailing.is_empty() {
            write!(f, "{}", self.point)
        } else {
            write!(f, "{} {}", self.point, self.trailing)
        }
    }
}

#[derive(Debug, Copy, Clone, PartialEq, Default)]
pub struct Vector2 {
    pub x: f64,
    pub y: f64,
}

impl Display for Vector2 {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} {}", self.x, self.y)
    }
}
