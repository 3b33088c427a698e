use crate::enums::{AnatomicalAxis, AxisDirection};

use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Direction cosines, `direction[row][col]`. Column `c` is the world unit
/// vector of voxel axis `c`.
pub type Direction = [[f64; 3]; 3];

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ParseOrientationError {
    #[error("orientation code must have 3 letters, got {0}")]
    WrongLength(usize),

    #[error("unknown orientation letter '{0}'")]
    UnknownLetter(char),

    #[error("orientation code {0} uses an anatomical axis twice")]
    RepeatedAxis(String),
}

/// Anatomical direction each voxel axis points toward, in axis order.
///
/// `RAS` means the first index grows toward the patient's right, the second
/// toward anterior and the third toward superior. A NIfTI file with an
/// identity affine is `RAS`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct OrientationCode([AxisDirection; 3]);

impl OrientationCode {
    pub fn new(directions: [AxisDirection; 3]) -> Option<Self> {
        let [a, b, c] = directions.map(|direction| direction.axis());
        if a == b || b == c || a == c {
            return None;
        }
        Some(Self(directions))
    }

    pub fn directions(&self) -> [AxisDirection; 3] {
        self.0
    }

    /// Packed identifier: `primary | secondary << 8 | tertiary << 16` of the
    /// coordinate term values.
    pub fn id(&self) -> u32 {
        let [primary, secondary, tertiary] = self.0;
        primary.term_code() | (secondary.term_code() << 8) | (tertiary.term_code() << 16)
    }

    /// Closest orientation for a direction cosine matrix.
    ///
    /// Voxel axes are matched to world axes greedily by largest absolute
    /// cosine, so oblique directions resolve to their dominant axes. Equal
    /// cosines are ordered by the column's sign-normalized values and then
    /// by world axis, never by column position, so permuting or negating
    /// columns permutes or negates the resulting code the same way.
    /// Returns `None` when some voxel axis has no non-zero component left.
    pub fn from_direction(direction: &Direction) -> Option<Self> {
        let columns = [0, 1, 2].map(|col| Self::canonical_column(direction, col));
        let mut entries: Vec<(f64, usize, usize)> = (0..3)
            .flat_map(|row| (0..3).map(move |col| (direction[row][col].abs(), row, col)))
            .filter(|(magnitude, _, _)| magnitude.is_finite() && *magnitude > 0.0)
            .collect();
        entries.sort_by(|a, b| {
            b.0.total_cmp(&a.0)
                .then_with(|| Self::compare_columns(&columns[a.2], &columns[b.2]))
                .then(a.1.cmp(&b.1))
        });

        let mut assigned: [Option<AxisDirection>; 3] = [None; 3];
        let mut used_rows = [false; 3];
        for (_, row, col) in entries {
            if assigned[col].is_some() || used_rows[row] {
                continue;
            }
            let axis = AnatomicalAxis::from_index(row)?;
            assigned[col] = Some(AxisDirection::from_axis(axis, direction[row][col] > 0.0));
            used_rows[row] = true;
        }

        let [a, b, c] = assigned;
        Self::new([a?, b?, c?])
    }

    /// Column `col` scaled so its first non-zero component is positive
    fn canonical_column(direction: &Direction, col: usize) -> [f64; 3] {
        let column = [direction[0][col], direction[1][col], direction[2][col]];
        let sign = column
            .iter()
            .find(|value| **value != 0.0)
            .map_or(1.0, |value| value.signum());
        column.map(|value| value * sign)
    }

    fn compare_columns(a: &[f64; 3], b: &[f64; 3]) -> Ordering {
        a.iter()
            .zip(b)
            .map(|(x, y)| x.partial_cmp(y).unwrap_or(Ordering::Equal))
            .find(|ordering| ordering.is_ne())
            .unwrap_or(Ordering::Equal)
    }

    /// Axis mapping that turns data laid out as `self` into `target`.
    ///
    /// For each target axis `t`, returns the source axis along the same
    /// anatomical axis and whether its polarity has to be flipped.
    pub fn mapping_to(&self, target: &OrientationCode) -> ([usize; 3], [bool; 3]) {
        let mut permutation = [0; 3];
        let mut flips = [false; 3];
        for (t, wanted) in target.0.iter().enumerate() {
            // Both codes cover all three anatomical axes exactly once
            let source = self
                .0
                .iter()
                .position(|direction| direction.axis() == wanted.axis())
                .unwrap_or(t);
            permutation[t] = source;
            flips[t] = self.0[source] != *wanted;
        }
        (permutation, flips)
    }
}

impl fmt::Display for OrientationCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let [a, b, c] = self.0;
        write!(f, "{a}{b}{c}")
    }
}

impl FromStr for OrientationCode {
    type Err = ParseOrientationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let letters: Vec<char> = s.chars().collect();
        if letters.len() != 3 {
            return Err(ParseOrientationError::WrongLength(letters.len()));
        }
        let mut directions = [AxisDirection::Right; 3];
        for (slot, letter) in directions.iter_mut().zip(letters) {
            *slot = AxisDirection::from_letter(letter)
                .ok_or(ParseOrientationError::UnknownLetter(letter))?;
        }
        Self::new(directions).ok_or_else(|| ParseOrientationError::RepeatedAxis(s.to_string()))
    }
}

use AxisDirection::{
    Anterior as A, Inferior as I, Left as L, Posterior as P, Right as R, Superior as S,
};

macro_rules! code {
    ($a:ident $b:ident $c:ident) => {
        (
            concat!(stringify!($a), stringify!($b), stringify!($c)),
            OrientationCode([$a, $b, $c]),
        )
    };
}

/// Orientation of a NIfTI volume with an identity affine
pub const RAS: OrientationCode = OrientationCode([R, A, S]);

/// Every valid orientation code with its identifier, in batch order.
pub static ORIENTATION_TABLE: [(&str, OrientationCode); 48] = [
    code!(R I P),
    code!(L I P),
    code!(R S P),
    code!(L S P),
    code!(R I A),
    code!(L I A),
    code!(R S A),
    code!(L S A),
    code!(I R P),
    code!(I L P),
    code!(S R P),
    code!(S L P),
    code!(I R A),
    code!(I L A),
    code!(S R A),
    code!(S L A),
    code!(R P I),
    code!(L P I),
    code!(R A I),
    code!(L A I),
    code!(R P S),
    code!(L P S),
    code!(R A S),
    code!(L A S),
    code!(P R I),
    code!(P L I),
    code!(A R I),
    code!(A L I),
    code!(P R S),
    code!(P L S),
    code!(A R S),
    code!(A L S),
    code!(I P R),
    code!(S P R),
    code!(I A R),
    code!(S A R),
    code!(I P L),
    code!(S P L),
    code!(I A L),
    code!(S A L),
    code!(P I R),
    code!(P S R),
    code!(A I R),
    code!(A S R),
    code!(P I L),
    code!(P S L),
    code!(A I L),
    code!(A S L),
];

/// Identifier for a 3-letter orientation code, `None` for invalid codes.
pub fn lookup(code: &str) -> Option<OrientationCode> {
    ORIENTATION_TABLE
        .iter()
        .find(|(name, _)| *name == code)
        .map(|(_, orientation)| *orientation)
}
