//! Find the voxels coupled to a single Line Of Response (LOR), and the length
//! of the LOR's intersection with each of them.
//!
//! The line is parametrised as `p = start + a * (stop - start) / d12`, where
//! `d12` is the physical length of the segment times the caller's
//! normalization constant. With this choice a unit step along any grid axis
//! advances `a` by a fixed, precomputed, always-positive increment, so the
//! traversal reduces to repeatedly picking whichever axis crosses its next
//! inter-voxel plane first. The difference between consecutive crossing
//! parameters is the chord length through the voxel just exited, already
//! expressed in physical units and pre-scaled by the normalization constant.
//!
//! Start and stop points are given in voxel-index units: voxel `i` is centred
//! on coordinate `i` and its faces lie at `i - 0.5` and `i + 0.5`. The points
//! need not be grid-aligned, and the voxel coordinates produced are not
//! clipped to any grid: bounds are established later by `FOV::in_grid`.

use crate::{Point, Vector, Lengthf32, Weightf32};
use crate::index::Index3_i;


// ---------------------- Implementation -----------------------------------------

pub type LorContribution = (Index3_i, Weightf32);

/// Sparse, ordered record of one LOR's passage through the grid: one (voxel,
/// chord length) pair per cell crossed, in traversal order, plus an overall
/// scale factor to be applied by the consumer.
#[derive(Clone, Debug)]
pub struct LorContributions {
    elems: Vec<LorContribution>,
    scale: Weightf32,
}

impl LorContributions {
    pub fn new() -> Self { Self::with_capacity(0) }

    pub fn with_capacity(n: usize) -> Self {
        Self { elems: Vec::with_capacity(n), scale: 1.0 }
    }

    pub fn len     (&self) -> usize { self.elems.len() }
    pub fn is_empty(&self) -> bool  { self.elems.is_empty() }

    /// Forget previous contents, keeping the allocation. Resets the scale.
    pub fn clear(&mut self) {
        self.elems.clear();
        self.scale = 1.0;
    }

    pub fn reserve(&mut self, additional: usize) { self.elems.reserve(additional) }

    pub fn push(&mut self, voxel: Index3_i, weight: Weightf32) {
        debug_assert!(weight >= 0.0);
        self.elems.push((voxel, weight));
    }

    pub fn scale(&self) -> Weightf32 { self.scale }

    pub fn scale_by(&mut self, factor: Weightf32) { self.scale *= factor }

    pub fn iter(&self) -> std::slice::Iter<LorContribution> { self.elems.iter() }
}

impl Default for LorContributions {
    fn default() -> Self { Self::new() }
}

impl IntoIterator for LorContributions {
    type Item = LorContribution;
    type IntoIter = std::vec::IntoIter<Self::Item>;
    fn into_iter(self) -> Self::IntoIter { self.elems.into_iter() }
}

impl<'a> IntoIterator for &'a LorContributions {
    type Item = &'a LorContribution;
    type IntoIter = std::slice::Iter<'a, LorContribution>;
    fn into_iter(self) -> Self::IntoIter { self.elems.iter() }
}

/// Axes along which the LOR moves less than this (in voxel-index units) are
/// treated as parallel to the grid planes. Changing this value changes which
/// near-parallel geometries take the special-cased branch, and with it the
/// exact output, so it is part of the traversal contract.
const SMALL_DIFFERENCE: Lengthf32 = 1e-5;

/// Shrink factor applied to the exit parameter. The incremental updates in
/// the main loop can land a tiny bit below the closed-form end value; ending
/// the loop marginally early prevents that round-off from producing a
/// spurious extra step.
const END_SAFETY_FACTOR: Lengthf32 = 0.9999;

/// Append to `lor` one entry per grid cell crossed by the segment from
/// `start` to `stop` (both in voxel-index units), each carrying the physical
/// chord length through that cell multiplied by `normalization_constant`.
///
/// The chord is measured between inter-voxel planes, so the first and last
/// weights extend to the faces of the voxels bounding `start` and `stop`.
/// Coordinates must be finite; this function does not check them.
pub fn trace_lor(
    lor: &mut LorContributions,
    start: Point,
    stop: Point,
    voxel_size: Vector,
    normalization_constant: Weightf32,
) {
    let difference = stop - start;

    // Enough space for the worst case, to avoid both reallocation and
    // over-allocation on push.
    lor.reserve((difference.x.abs().ceil() +
                 difference.y.abs().ceil() +
                 difference.z.abs().ceil()) as usize + 3);

    // d12 is the distance between the two points. Multiplying it by the
    // normalization constant here just rescales the parametrisation, so every
    // weight produced below comes out pre-scaled.
    let d12: Lengthf32 = difference.component_mul(&voxel_size).norm() * normalization_constant;

    let sign_x: i32 = if difference.x >= 0.0 { 1 } else { -1 };
    let sign_y: i32 = if difference.y >= 0.0 { 1 } else { -1 };
    let sign_z: i32 = if difference.z >= 0.0 { 1 } else { -1 };

    // Parametrise the line as p = start + a * difference / d12. A step of one
    // voxel along x advances a by inc_x = d12 / |difference.x|, which is
    // always positive; likewise for y and z. An axis with (nearly) zero
    // difference would make its increment explode: give it an artificially
    // huge one instead, so that it can never fire before the other axes have
    // finished. difference is in voxel-index units, so its natural scale is 1
    // and SMALL_DIFFERENCE is a scale-independent test.
    let zero_diff_in_x = difference.x.abs() <= SMALL_DIFFERENCE;
    let zero_diff_in_y = difference.y.abs() <= SMALL_DIFFERENCE;
    let zero_diff_in_z = difference.z.abs() <= SMALL_DIFFERENCE;

    let inc_x = if zero_diff_in_x { d12 * 1e6 } else { d12 / difference.x.abs() };
    let inc_y = if zero_diff_in_y { d12 * 1e6 } else { d12 / difference.y.abs() };
    let inc_z = if zero_diff_in_z { d12 * 1e6 } else { d12 / difference.z.abs() };

    // Face of the start voxel behind the start point ...
    let xmin = start.x.round() - sign_x as f32 * 0.5;
    let ymin = start.y.round() - sign_y as f32 * 0.5;
    let zmin = start.z.round() - sign_z as f32 * 0.5;
    // ... and face of the stop voxel beyond the stop point.
    let xmax = stop.x.round() + sign_x as f32 * 0.5;
    let ymax = stop.y.round() + sign_y as f32 * 0.5;
    let zmax = stop.z.round() + sign_z as f32 * 0.5;

    // Crossing parameter of the last inter-voxel plane on each axis; the
    // smallest of the three is where the traversal ends. Parallel axes get a
    // value guaranteed to be larger than the others. The loop below detects
    // the end by comparing the running parameter against amax, and the
    // incrementally-updated axis parameters can fall marginally short of
    // their closed-form end values, so amax is shrunk a tiny bit to keep the
    // comparison on the safe side.
    let axend = if zero_diff_in_x { d12 * 1e6 }
                else { (xmax - start.x) * inc_x * sign_x as f32 * END_SAFETY_FACTOR };
    let ayend = if zero_diff_in_y { d12 * 1e6 }
                else { (ymax - start.y) * inc_y * sign_y as f32 * END_SAFETY_FACTOR };
    let azend = if zero_diff_in_z { d12 * 1e6 }
                else { (zmax - start.z) * inc_z * sign_z as f32 * END_SAFETY_FACTOR };

    let amax = axend.min(ayend).min(azend);

    debug_assert!(!zero_diff_in_x || axend >= amax);
    debug_assert!(!zero_diff_in_y || ayend >= amax);
    debug_assert!(!zero_diff_in_z || azend >= amax);

    // The voxel containing the start point.
    let mut current_voxel: Index3_i = [start.x.round() as i32,
                                       start.y.round() as i32,
                                       start.z.round() as i32];

    // Crossing parameters of the previous inter-voxel plane on each axis.
    // For a parallel axis the true value would be -infinity; -inc is low
    // enough, given that the start voxel contains the start point and the
    // parallel increments are huge.
    let mut ax = if zero_diff_in_x { -inc_x } else { (xmin - start.x) * inc_x * sign_x as f32 };
    let mut ay = if zero_diff_in_y { -inc_y } else { (ymin - start.y) * inc_y * sign_y as f32 };
    let mut az = if zero_diff_in_z { -inc_z } else { (zmin - start.z) * inc_z * sign_z as f32 };

    // The largest of the three is the crossing into the start voxel: the
    // traversal parameter starts there.
    let mut a = ax.max(ay).max(az);

    // Advance each axis to its next upcoming plane crossing.
    if zero_diff_in_x { ax = axend } else { ax += inc_x }
    if zero_diff_in_y { ay = ayend } else { ay += inc_y }
    if zero_diff_in_z { az = azend } else { az += inc_z }

    while a < amax {
        if ax < ay {
            if ax < az {
                // leaves voxel through yz-plane
                lor.push(current_voxel, ax - a);
                a = ax;  ax += inc_x;
                current_voxel[0] += sign_x;
            } else {
                // leaves voxel through xy-plane
                lor.push(current_voxel, az - a);
                a = az;  az += inc_z;
                current_voxel[2] += sign_z;
            }
        } else if ay < az {
            // leaves voxel through xz-plane
            lor.push(current_voxel, ay - a);
            a = ay;  ay += inc_y;
            current_voxel[1] += sign_y;
        } else {
            // leaves voxel through xy-plane
            lor.push(current_voxel, az - a);
            a = az;  az += inc_z;
            current_voxel[2] += sign_z;
        }
    }
}
