use crate::orientation::Direction;
use crate::volume::{IDENTITY_DIRECTION, Volume};

use nifti::NiftiHeader;

/// NIFTI_XFORM_SCANNER_ANAT
const XFORM_SCANNER_ANAT: i16 = 1;
/// NIFTI_UNITS_MM
const UNITS_MM: u8 = 2;

/// Voxel-to-world placement of a volume, decoded from or encoded into the
/// sform/qform fields of a NIfTI-1 header.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct Geometry {
    pub(crate) spacing: [f64; 3],
    pub(crate) origin: [f64; 3],
    pub(crate) direction: Direction,
}

impl Geometry {
    pub(crate) fn of(volume: &Volume) -> Self {
        Self {
            spacing: volume.spacing,
            origin: volume.origin,
            direction: volume.direction,
        }
    }

    /// Decode the header's placement: sform first, then qform, then plain
    /// `pixdim` scaling. Returns `None` if an axis has zero length.
    pub(crate) fn from_header(header: &NiftiHeader) -> Option<Self> {
        if header.sform_code > 0 {
            let rows = [header.srow_x, header.srow_y, header.srow_z];
            let mut affine = [[0.0; 3]; 3];
            let mut origin = [0.0; 3];
            for (row, values) in rows.iter().enumerate() {
                for col in 0..3 {
                    affine[row][col] = f64::from(values[col]);
                }
                origin[row] = f64::from(values[3]);
            }
            return Self::from_affine(&affine, origin);
        }

        let spacing = [1, 2, 3].map(|axis| f64::from(header.pixdim[axis]).abs());
        if spacing.iter().any(|s| *s == 0.0 || !s.is_finite()) {
            return None;
        }

        if header.qform_code > 0 {
            let mut direction = Self::quaternion_to_matrix(
                f64::from(header.quatern_b),
                f64::from(header.quatern_c),
                f64::from(header.quatern_d),
            );
            if header.pixdim[0] < 0.0 {
                for row in direction.iter_mut() {
                    row[2] = -row[2];
                }
            }
            return Some(Self {
                spacing,
                origin: [
                    f64::from(header.quatern_x),
                    f64::from(header.quatern_y),
                    f64::from(header.quatern_z),
                ],
                direction,
            });
        }

        Some(Self {
            spacing,
            origin: [0.0; 3],
            direction: IDENTITY_DIRECTION,
        })
    }

    fn from_affine(affine: &[[f64; 3]; 3], origin: [f64; 3]) -> Option<Self> {
        let mut spacing = [0.0; 3];
        let mut direction = [[0.0; 3]; 3];
        for col in 0..3 {
            let length = (0..3)
                .map(|row| affine[row][col] * affine[row][col])
                .sum::<f64>()
                .sqrt();
            if length == 0.0 || !length.is_finite() {
                return None;
            }
            spacing[col] = length;
            for row in 0..3 {
                direction[row][col] = affine[row][col] / length;
            }
        }
        Some(Self {
            spacing,
            origin,
            direction,
        })
    }

    /// Write the placement into `header` as both sform and qform.
    pub(crate) fn apply_to_header(&self, header: &mut NiftiHeader) {
        let rows = [
            &mut header.srow_x,
            &mut header.srow_y,
            &mut header.srow_z,
        ];
        for (row, values) in rows.into_iter().enumerate() {
            for col in 0..3 {
                values[col] = (self.direction[row][col] * self.spacing[col]) as f32;
            }
            values[3] = self.origin[row] as f32;
        }
        header.sform_code = XFORM_SCANNER_ANAT;

        let (quaternion, qfac) = Self::matrix_to_quaternion(&self.direction);
        header.qform_code = XFORM_SCANNER_ANAT;
        header.quatern_b = quaternion[0] as f32;
        header.quatern_c = quaternion[1] as f32;
        header.quatern_d = quaternion[2] as f32;
        header.quatern_x = self.origin[0] as f32;
        header.quatern_y = self.origin[1] as f32;
        header.quatern_z = self.origin[2] as f32;

        header.pixdim[0] = qfac as f32;
        for axis in 0..3 {
            header.pixdim[axis + 1] = self.spacing[axis] as f32;
        }
        header.xyzt_units = UNITS_MM;
    }

    fn quaternion_to_matrix(b: f64, c: f64, d: f64) -> Direction {
        let a = (1.0 - (b * b + c * c + d * d)).max(0.0).sqrt();
        [
            [
                a * a + b * b - c * c - d * d,
                2.0 * (b * c - a * d),
                2.0 * (b * d + a * c),
            ],
            [
                2.0 * (b * c + a * d),
                a * a + c * c - b * b - d * d,
                2.0 * (c * d - a * b),
            ],
            [
                2.0 * (b * d - a * c),
                2.0 * (c * d + a * b),
                a * a + d * d - c * c - b * b,
            ],
        ]
    }

    /// Quaternion `(b, c, d)` and `qfac` of an orthonormal direction matrix.
    ///
    /// Left-handed matrices get their third column negated and `qfac = -1`.
    fn matrix_to_quaternion(direction: &Direction) -> ([f64; 3], f64) {
        let mut r = *direction;
        let qfac = if Self::determinant(&r) < 0.0 {
            for row in r.iter_mut() {
                row[2] = -row[2];
            }
            -1.0
        } else {
            1.0
        };

        let trace = r[0][0] + r[1][1] + r[2][2] + 1.0;
        let (a, b, c, d);
        if trace > 0.5 {
            a = 0.5 * trace.sqrt();
            b = 0.25 * (r[2][1] - r[1][2]) / a;
            c = 0.25 * (r[0][2] - r[2][0]) / a;
            d = 0.25 * (r[1][0] - r[0][1]) / a;
        } else {
            let xd = 1.0 + r[0][0] - (r[1][1] + r[2][2]);
            let yd = 1.0 + r[1][1] - (r[0][0] + r[2][2]);
            let zd = 1.0 + r[2][2] - (r[0][0] + r[1][1]);
            if xd > 1.0 {
                b = 0.5 * xd.sqrt();
                c = 0.25 * (r[0][1] + r[1][0]) / b;
                d = 0.25 * (r[0][2] + r[2][0]) / b;
                a = 0.25 * (r[2][1] - r[1][2]) / b;
            } else if yd > 1.0 {
                c = 0.5 * yd.sqrt();
                b = 0.25 * (r[0][1] + r[1][0]) / c;
                d = 0.25 * (r[1][2] + r[2][1]) / c;
                a = 0.25 * (r[0][2] - r[2][0]) / c;
            } else {
                d = 0.5 * zd.sqrt();
                b = 0.25 * (r[0][2] + r[2][0]) / d;
                c = 0.25 * (r[1][2] + r[2][1]) / d;
                a = 0.25 * (r[1][0] - r[0][1]) / d;
            }
        }

        // Only b, c, d are stored, so a must stay non-negative
        if a < 0.0 {
            ([-b, -c, -d], qfac)
        } else {
            ([b, c, d], qfac)
        }
    }

    fn determinant(m: &Direction) -> f64 {
        m[0][0] * (m[1][1] * m[2][2] - m[1][2] * m[2][1])
            - m[0][1] * (m[1][0] * m[2][2] - m[1][2] * m[2][0])
            + m[0][2] * (m[1][0] * m[2][1] - m[1][1] * m[2][0])
    }
}
