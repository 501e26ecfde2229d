//! The size and granularity of the Field of View (FOV) in which images are
//! reconstructed, and the conversions between physical coordinates (mm,
//! centred on the FOV) and the voxel-index units used by the ray tracer.

use crate::{Lengthf32, Point, Vector};
use crate::index::{BoxDim_u, Index1_u, Index3_u, Index3_i, index3_to_1, index1_to_3};

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FOV {
    pub half_width: Vector,
    pub n: BoxDim_u,
    pub voxel_size: Vector,
}

impl FOV {

    pub fn new(
        full_size: (Lengthf32, Lengthf32, Lengthf32),
        (nx, ny, nz): (usize, usize, usize)
    ) -> Self {
        let (dx, dy, dz) = full_size;
        let half_width = Vector::new(dx / 2.0, dy / 2.0, dz / 2.0);
        let n = [nx, ny, nz];
        let voxel_size = Self::voxel_size(n, half_width);
        Self { half_width, n, voxel_size }
    }

    fn voxel_size(n: BoxDim_u, half_width: Vector) -> Vector {
        let full_width = half_width * 2.0;
        Vector::new(full_width[0] / n[0] as f32,
                    full_width[1] / n[1] as f32,
                    full_width[2] / n[2] as f32,
        )
    }

    /// Find centre of voxel with given 3D index, in physical mm
    pub fn voxel_centre(&self, i: Index3_u) -> Point {
        let s = self.voxel_size;
        Point::new((i[0] as Lengthf32 + 0.5) * s.x - self.half_width[0],
                   (i[1] as Lengthf32 + 0.5) * s.y - self.half_width[1],
                   (i[2] as Lengthf32 + 0.5) * s.z - self.half_width[2],)
    }

    /// Find centre of voxel with given 1D index, in physical mm
    pub fn voxel_centre1(&self, i: Index1_u) -> Point {
        self.voxel_centre(index1_to_3(i, self.n))
    }

    /// Express a physical point (mm, FOV-centred) in voxel-index units: the
    /// centre of voxel `i` maps onto coordinate `i`, its faces onto `i ± 0.5`.
    /// This is the coordinate system `trace_lor` expects.
    pub fn physical_to_voxel(&self, p: Point) -> Point {
        let s = self.voxel_size;
        Point::new((p.x + self.half_width[0]) / s.x - 0.5,
                   (p.y + self.half_width[1]) / s.y - 0.5,
                   (p.z + self.half_width[2]) / s.z - 0.5,)
    }

    /// Bounds filter for ray-tracer output: the flat index of the voxel, if
    /// it lies inside this FOV.
    pub fn in_grid(&self, [ix, iy, iz]: Index3_i) -> Option<Index1_u> {
        let [nx, ny, nz] = self.n;
        if ix < 0 || iy < 0 || iz < 0 { return None }
        let (ix, iy, iz) = (ix as usize, iy as usize, iz as usize);
        if ix >= nx || iy >= ny || iz >= nz { return None }
        Some(index3_to_1([ix, iy, iz], self.n))
    }

}

#[cfg(test)]
mod test_fov {
    use super::*;
    use rstest::rstest;
    use float_eq::assert_float_eq;

    #[rstest(/**/ index,   expected_position,
             case([0,0,0], [-1.5, -1.0, -0.5]),
             case([1,0,0], [-0.5, -1.0, -0.5]),
             case([2,0,0], [ 0.5, -1.0, -0.5]),
             case([3,0,0], [ 1.5, -1.0, -0.5]),
             case([0,1,0], [-1.5,  1.0, -0.5]),
             case([3,1,1], [ 1.5,  1.0,  0.5]),
    )]
    fn voxel_centre(index: Index3_u, expected_position: [Lengthf32; 3]) {
        let fov = FOV::new((4.0, 4.0, 2.0), (4, 2, 2));
        let c = fov.voxel_centre(index);
        let c = [c.x, c.y, c.z];
        assert_float_eq!(c, expected_position, ulps <= [1, 1, 1]);
    }

    #[test]
    fn voxel_centres_map_onto_integer_coordinates() {
        let fov = FOV::new((90.0, 100.0, 110.0), (9, 10, 11));
        for index in [[0,0,0], [4,5,6], [8,9,10]] {
            let v = fov.physical_to_voxel(fov.voxel_centre(index));
            let expected = [index[0] as f32, index[1] as f32, index[2] as f32];
            assert_float_eq!([v.x, v.y, v.z], expected, abs <= [1e-4, 1e-4, 1e-4]);
        }
    }

    #[rstest(/**/  index   , expected,
             case([ 0, 0, 0], Some(0)),
             case([ 2, 0, 0], Some(2)),
             case([ 0, 1, 0], Some(3)),
             case([ 0, 0, 1], Some(12)),
             case([ 2, 3, 1], Some(23)),
             case([-1, 0, 0], None),
             case([ 3, 0, 0], None),
             case([ 0, 4, 0], None),
             case([ 0, 0, 2], None),
    )]
    fn in_grid_bounds(index: Index3_i, expected: Option<Index1_u>) {
        let fov = FOV::new((30.0, 40.0, 20.0), (3, 4, 2));
        assert_eq!(fov.in_grid(index), expected);
    }
}
