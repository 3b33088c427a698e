use std::fmt;
use std::path::Path;

/// One of the three anatomical axes of NIfTI world space, in world
/// coordinate order (x, y, z).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AnatomicalAxis {
    RightLeft,
    AnteriorPosterior,
    SuperiorInferior,
}

impl AnatomicalAxis {
    /// Axis for a world coordinate index
    pub fn from_index(index: usize) -> Option<Self> {
        match index {
            0 => Some(AnatomicalAxis::RightLeft),
            1 => Some(AnatomicalAxis::AnteriorPosterior),
            2 => Some(AnatomicalAxis::SuperiorInferior),
            _ => None,
        }
    }
}

/// Anatomical direction a voxel axis points toward.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AxisDirection {
    Right,
    Left,
    Posterior,
    Anterior,
    Inferior,
    Superior,
}

impl AxisDirection {
    pub fn axis(&self) -> AnatomicalAxis {
        match self {
            AxisDirection::Right | AxisDirection::Left => AnatomicalAxis::RightLeft,
            AxisDirection::Posterior | AxisDirection::Anterior => {
                AnatomicalAxis::AnteriorPosterior
            }
            AxisDirection::Inferior | AxisDirection::Superior => AnatomicalAxis::SuperiorInferior,
        }
    }

    /// NIfTI world space is RAS+: Right, Anterior and Superior grow the
    /// world coordinate.
    pub fn is_positive(&self) -> bool {
        matches!(
            self,
            AxisDirection::Right | AxisDirection::Anterior | AxisDirection::Superior
        )
    }

    /// Direction along `axis` with the given polarity
    pub fn from_axis(axis: AnatomicalAxis, positive: bool) -> Self {
        match (axis, positive) {
            (AnatomicalAxis::RightLeft, true) => AxisDirection::Right,
            (AnatomicalAxis::RightLeft, false) => AxisDirection::Left,
            (AnatomicalAxis::AnteriorPosterior, true) => AxisDirection::Anterior,
            (AnatomicalAxis::AnteriorPosterior, false) => AxisDirection::Posterior,
            (AnatomicalAxis::SuperiorInferior, true) => AxisDirection::Superior,
            (AnatomicalAxis::SuperiorInferior, false) => AxisDirection::Inferior,
        }
    }

    pub fn opposite(&self) -> Self {
        Self::from_axis(self.axis(), !self.is_positive())
    }

    pub fn letter(&self) -> char {
        match self {
            AxisDirection::Right => 'R',
            AxisDirection::Left => 'L',
            AxisDirection::Posterior => 'P',
            AxisDirection::Anterior => 'A',
            AxisDirection::Inferior => 'I',
            AxisDirection::Superior => 'S',
        }
    }

    pub fn from_letter(letter: char) -> Option<Self> {
        match letter.to_ascii_uppercase() {
            'R' => Some(AxisDirection::Right),
            'L' => Some(AxisDirection::Left),
            'P' => Some(AxisDirection::Posterior),
            'A' => Some(AxisDirection::Anterior),
            'I' => Some(AxisDirection::Inferior),
            'S' => Some(AxisDirection::Superior),
            _ => None,
        }
    }

    /// Coordinate term value used to pack orientation identifiers
    pub(crate) fn term_code(&self) -> u32 {
        match self {
            AxisDirection::Right => 2,
            AxisDirection::Left => 3,
            AxisDirection::Posterior => 4,
            AxisDirection::Anterior => 5,
            AxisDirection::Inferior => 8,
            AxisDirection::Superior => 9,
        }
    }
}

impl fmt::Display for AxisDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.letter())
    }
}

/// On-disk encoding of a volume, inferred from the file name
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum VolumeFormat {
    Nifti,
    #[default]
    NiftiGz,
}

impl VolumeFormat {
    pub fn from_path(path: impl AsRef<Path>) -> Option<Self> {
        let name = path.as_ref().file_name()?.to_str()?.to_ascii_lowercase();
        if name.ends_with(".nii.gz") {
            Some(VolumeFormat::NiftiGz)
        } else if name.ends_with(".nii") {
            Some(VolumeFormat::Nifti)
        } else {
            None
        }
    }

    /// File extension without the leading dot
    pub fn extension(&self) -> &'static str {
        match self {
            VolumeFormat::Nifti => "nii",
            VolumeFormat::NiftiGz => "nii.gz",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(AxisDirection::Right, AxisDirection::Left)]
    #[case(AxisDirection::Anterior, AxisDirection::Posterior)]
    #[case(AxisDirection::Superior, AxisDirection::Inferior)]
    fn test_opposite_directions_share_axis(
        #[case] direction: AxisDirection,
        #[case] expected: AxisDirection,
    ) {
        assert_eq!(direction.opposite(), expected);
        assert_eq!(expected.opposite(), direction);
        assert_eq!(direction.axis(), expected.axis());
        assert_ne!(direction.is_positive(), expected.is_positive());
    }

    #[test]
    fn test_letters_round_trip() {
        for letter in ['R', 'L', 'P', 'A', 'I', 'S'] {
            let direction = AxisDirection::from_letter(letter).unwrap();
            assert_eq!(direction.letter(), letter);
        }
        assert_eq!(AxisDirection::from_letter('r'), Some(AxisDirection::Right));
        assert_eq!(AxisDirection::from_letter('X'), None);
    }

    #[rstest]
    #[case("InputLPS.nii", Some(VolumeFormat::Nifti))]
    #[case("/data/InputLPS.nii.gz", Some(VolumeFormat::NiftiGz))]
    #[case("SCAN.NII.GZ", Some(VolumeFormat::NiftiGz))]
    #[case("InputLPS.nrrd", None)]
    #[case("volume.gz", None)]
    fn test_format_from_path(#[case] path: &str, #[case] expected: Option<VolumeFormat>) {
        assert_eq!(VolumeFormat::from_path(path), expected);
    }
}
