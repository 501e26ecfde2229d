//! Projection-space addressing: which (segment, view, axial, tangential)
//! bins exist for a given scanner, and where the corresponding line of
//! response lies in space.
//!
//! A segment groups lines by detector-ring difference (span 1: segment `s`
//! pairs rings `(a, a + |s|)`, so its axial range shrinks as `|s|` grows); a
//! view is one angular sampling position; the tangential position is the
//! arc-corrected signed offset of the line from the scanner axis. The valid
//! ranges reported here are the construction contract of `Viewgram`, and the
//! endpoints produced by `bin_to_lor` are what the surrounding projector
//! feeds to the ray tracer.

use std::f32::consts::PI;

use crate::{Lengthf32, Point};
use crate::fov::FOV;
use crate::scanner::Scanner;

/// Coordinates of one projection-space sample
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Bin {
    pub segment: i32,
    pub view: i32,
    pub axial: i32,
    pub tangential: i32,
}

impl Bin {
    pub fn new(segment: i32, view: i32, axial: i32, tangential: i32) -> Self {
        Self { segment, view, axial, tangential }
    }
}

/// Index ranges and geometry of the projection data measured by one scanner.
/// Shared (via `Arc`) and read-only for the duration of a reconstruction run.
#[derive(Clone, Debug, PartialEq)]
pub struct ProjDataInfo {
    pub scanner: Scanner,
    max_segment: i32,
    num_tangential: usize,
}

impl ProjDataInfo {

    pub fn new(scanner: Scanner, max_ring_difference: usize, num_tangential: usize) -> Self {
        assert!(max_ring_difference < scanner.num_rings,
                "max ring difference {} needs more than the {} rings available",
                max_ring_difference, scanner.num_rings);
        assert!(num_tangential > 0);
        Self { scanner, max_segment: max_ring_difference as i32, num_tangential }
    }

    /// All ring differences and the scanner's native tangential sampling
    pub fn from_scanner(scanner: Scanner) -> Self {
        let max_ring_difference = scanner.num_rings - 1;
        let num_tangential = scanner.default_num_tangential();
        Self::new(scanner, max_ring_difference, num_tangential)
    }

    pub fn min_segment_num(&self) -> i32 { -self.max_segment }
    pub fn max_segment_num(&self) -> i32 {  self.max_segment }

    pub fn min_view_num(&self) -> i32 { 0 }
    pub fn max_view_num(&self) -> i32 { self.scanner.num_views() as i32 - 1 }
    pub fn num_views   (&self) -> usize { self.scanner.num_views() }

    pub fn min_axial_pos_num(&self, segment: i32) -> i32 {
        self.assert_segment_in_range(segment);
        0
    }
    pub fn max_axial_pos_num(&self, segment: i32) -> i32 {
        self.num_axial_poss(segment) as i32 - 1
    }
    /// One position per ring pair with the segment's ring difference
    pub fn num_axial_poss(&self, segment: i32) -> usize {
        self.assert_segment_in_range(segment);
        self.scanner.num_rings - segment.unsigned_abs() as usize
    }

    // The tangential range is the same for every segment, roughly centred on
    // zero: for an even number of bins the extra one sits on the negative side.
    pub fn min_tangential_pos_num(&self) -> i32 { -(self.num_tangential as i32 / 2) }
    pub fn max_tangential_pos_num(&self) -> i32 {
        self.min_tangential_pos_num() + self.num_tangential as i32 - 1
    }
    pub fn num_tangential_poss(&self) -> usize { self.num_tangential }

    fn assert_segment_in_range(&self, segment: i32) {
        assert!(segment.abs() <= self.max_segment,
                "segment {} outside supported range {}..={}",
                segment, -self.max_segment, self.max_segment);
    }

    fn assert_bin_in_range(&self, bin: Bin) {
        assert!(bin.view >= self.min_view_num() && bin.view <= self.max_view_num(),
                "view {} outside supported range", bin.view);
        assert!(bin.axial >= self.min_axial_pos_num(bin.segment) &&
                bin.axial <= self.max_axial_pos_num(bin.segment),
                "axial position {} outside range of segment {}", bin.axial, bin.segment);
        assert!(bin.tangential >= self.min_tangential_pos_num() &&
                bin.tangential <= self.max_tangential_pos_num(),
                "tangential position {} outside supported range", bin.tangential);
    }

    /// Physical-space (mm, scanner-centred) endpoints of the LOR measured in
    /// the given bin: the two points where the line meets the detector
    /// cylinder. `None` when the bin's tangential offset reaches outside the
    /// bore, where no line exists. Out-of-range bins are caller bugs and
    /// abort instead.
    pub fn bin_to_lor(&self, bin: Bin) -> Option<(Point, Point)> {
        self.assert_bin_in_range(bin);
        let radius = self.scanner.inner_radius;
        let s: Lengthf32 = bin.tangential as Lengthf32 * self.scanner.bin_size;
        if s.abs() >= radius { return None }

        // In-plane: the line is perpendicular to the unit vector at the view
        // angle, offset by the tangential distance, with half-chord t.
        let phi = bin.view as Lengthf32 * PI / self.num_views() as Lengthf32;
        let (sin, cos) = phi.sin_cos();
        let t = (radius * radius - s * s).sqrt();

        // Axial: the ring pair addressed by (segment, axial position).
        let ring_a = bin.axial;
        let ring_b = bin.axial + bin.segment.abs();
        let (z1, z2) = if bin.segment >= 0 {
            (self.scanner.ring_z(ring_a), self.scanner.ring_z(ring_b))
        } else {
            (self.scanner.ring_z(ring_b), self.scanner.ring_z(ring_a))
        };

        let p1 = Point::new(s * cos - t * sin, s * sin + t * cos, z1);
        let p2 = Point::new(s * cos + t * sin, s * sin - t * cos, z2);
        Some((p1, p2))
    }

    /// LOR endpoints expressed in the voxel-index units of `fov`, ready to be
    /// passed to `trace_lor`.
    pub fn bin_to_voxel_endpoints(&self, bin: Bin, fov: &FOV) -> Option<(Point, Point)> {
        self.bin_to_lor(bin)
            .map(|(p1, p2)| (fov.physical_to_voxel(p1), fov.physical_to_voxel(p2)))
    }

}
