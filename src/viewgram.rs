//! Projection-space container: the 2-d array of samples for one fixed
//! (view, segment) pair, addressed by (axial position, tangential position).
//!
//! A viewgram's index ranges are fixed at construction to exactly those its
//! projection-data descriptor reports; a mismatch is a configuration bug in
//! the caller and aborts. After construction the viewgram is self-describing:
//! its ranges are derived from the stored array's shape and never re-queried
//! from the geometry.

use std::sync::Arc;

use ndarray::Array2;

use crate::Intensityf32;
use crate::projdata::ProjDataInfo;

pub struct Viewgram {
    pub(crate) data: Array2<Intensityf32>,
    // Non-owning in spirit: shared, read-only, used only to validate ranges
    // and to derive LOR endpoints. Many viewgrams reference one descriptor.
    proj_data_info: Arc<ProjDataInfo>,
    view: i32,
    segment: i32,
    min_axial: i32,
    min_tangential: i32,
}

impl Viewgram {

    /// Zero-filled viewgram for (view, segment), with the ranges the
    /// descriptor reports for that segment (axial) and globally (tangential).
    pub fn new(proj_data_info: Arc<ProjDataInfo>, view: i32, segment: i32) -> Self {
        let data = Array2::zeros((proj_data_info.num_axial_poss(segment),
                                  proj_data_info.num_tangential_poss()));
        Self::from_array(data, proj_data_info, view, segment)
    }

    /// Wrap an existing array of samples. The array's shape must match the
    /// ranges the descriptor derives for (view, segment).
    pub fn from_array(data: Array2<Intensityf32>,
                      proj_data_info: Arc<ProjDataInfo>,
                      view: i32, segment: i32) -> Self {
        assert!(view >= proj_data_info.min_view_num() &&
                view <= proj_data_info.max_view_num(),
                "view {} outside supported range", view);
        // segment is range-checked by num_axial_poss
        assert_eq!(data.nrows(), proj_data_info.num_axial_poss(segment),
                   "array has {} axial positions but segment {} requires {}",
                   data.nrows(), segment, proj_data_info.num_axial_poss(segment));
        assert_eq!(data.ncols(), proj_data_info.num_tangential_poss(),
                   "array has {} tangential positions but the scanner requires {}",
                   data.ncols(), proj_data_info.num_tangential_poss());
        let min_axial      = proj_data_info.min_axial_pos_num(segment);
        let min_tangential = proj_data_info.min_tangential_pos_num();
        Self { data, proj_data_info, view, segment, min_axial, min_tangential }
    }

    /// A new viewgram with identical addressing and all samples zeroed: the
    /// output buffer matching this one's shape.
    pub fn empty_copy(&self) -> Self {
        Viewgram::new(self.proj_data_info.clone(), self.view, self.segment)
    }

    pub fn view_num   (&self) -> i32 { self.view }
    pub fn segment_num(&self) -> i32 { self.segment }

    pub fn min_axial_pos(&self) -> i32 { self.min_axial }
    pub fn max_axial_pos(&self) -> i32 { self.min_axial + self.data.nrows() as i32 - 1 }
    pub fn num_axial_poss(&self) -> usize { self.data.nrows() }

    pub fn min_tangential_pos(&self) -> i32 { self.min_tangential }
    pub fn max_tangential_pos(&self) -> i32 { self.min_tangential + self.data.ncols() as i32 - 1 }
    pub fn num_tangential_poss(&self) -> usize { self.data.ncols() }

    pub fn axial_pos_range(&self) -> std::ops::RangeInclusive<i32> {
        self.min_axial_pos()..=self.max_axial_pos()
    }
    pub fn tangential_pos_range(&self) -> std::ops::RangeInclusive<i32> {
        self.min_tangential_pos()..=self.max_tangential_pos()
    }

    pub fn proj_data_info(&self) -> &Arc<ProjDataInfo> { &self.proj_data_info }

    fn flat(&self, axial: i32, tangential: i32) -> [usize; 2] {
        [(axial - self.min_axial) as usize, (tangential - self.min_tangential) as usize]
    }

}

impl core::ops::Index<(i32, i32)> for Viewgram {
    type Output = Intensityf32;
    #[inline]
    fn index(&self, (axial, tangential): (i32, i32)) -> &Self::Output {
        &self.data[self.flat(axial, tangential)]
    }
}

impl core::ops::IndexMut<(i32, i32)> for Viewgram {
    #[inline]
    fn index_mut(&mut self, (axial, tangential): (i32, i32)) -> &mut Self::Output {
        let i = self.flat(axial, tangential);
        &mut self.data[i]
    }
}

#[cfg(test)]
mod test {
    use super::*;
    #[allow(unused)] use pretty_assertions::{assert_eq, assert_ne};
    use itertools::iproduct;

    use crate::scanner::Scanner;

    fn pdi() -> Arc<ProjDataInfo> {
        Arc::new(ProjDataInfo::from_scanner(Scanner {
            num_rings: 4,
            num_detectors_per_ring: 16,
            inner_radius: 60.0,
            ring_spacing: 4.0,
            bin_size: 3.0,
        }))
    }

    #[test]
    fn ranges_match_the_descriptor_for_every_view_and_segment() {
        let pdi = pdi();
        for (segment, view) in iproduct!(pdi.min_segment_num()..=pdi.max_segment_num(),
                                         pdi.min_view_num()..=pdi.max_view_num()) {
            let vg = Viewgram::new(pdi.clone(), view, segment);
            assert_eq!(vg.view_num(), view);
            assert_eq!(vg.segment_num(), segment);
            assert_eq!(vg.min_axial_pos(), pdi.min_axial_pos_num(segment));
            assert_eq!(vg.max_axial_pos(), pdi.max_axial_pos_num(segment));
            assert_eq!(vg.min_tangential_pos(), pdi.min_tangential_pos_num());
            assert_eq!(vg.max_tangential_pos(), pdi.max_tangential_pos_num());
        }
    }

    #[test]
    fn indexing_uses_signed_projection_coordinates() {
        let mut vg = Viewgram::new(pdi(), 2, 1);
        vg[(0, -4)] = 1.5;
        vg[(2,  3)] = 2.5;
        assert_eq!(vg.data[[0, 0]], 1.5);
        assert_eq!(vg.data[[2, 7]], 2.5);
        assert_eq!(vg[(0, -4)], 1.5);
    }

    #[test]
    fn empty_copy_preserves_addressing_and_zeroes_samples() {
        let mut vg = Viewgram::new(pdi(), 5, -2);
        vg[(1, 0)] = 42.0;
        let copy = vg.empty_copy();
        assert_eq!(copy.view_num(), vg.view_num());
        assert_eq!(copy.segment_num(), vg.segment_num());
        assert_eq!(copy.min_axial_pos(), vg.min_axial_pos());
        assert_eq!(copy.max_axial_pos(), vg.max_axial_pos());
        assert_eq!(copy.min_tangential_pos(), vg.min_tangential_pos());
        assert_eq!(copy.max_tangential_pos(), vg.max_tangential_pos());
        assert!(copy.data.iter().all(|&x| x == 0.0));
    }

    #[test]
    fn from_array_accepts_a_matching_shape() {
        let pdi = pdi();
        let data = Array2::from_elem((3, 8), 7.0);
        let vg = Viewgram::from_array(data, pdi, 0, -1);
        assert_eq!(vg[(1, 0)], 7.0);
    }

    #[test]
    #[should_panic(expected = "axial positions")]
    fn from_array_rejects_wrong_axial_extent() {
        Viewgram::from_array(Array2::zeros((4, 8)), pdi(), 0, 1);
    }

    #[test]
    #[should_panic(expected = "tangential positions")]
    fn from_array_rejects_wrong_tangential_extent() {
        Viewgram::from_array(Array2::zeros((3, 9)), pdi(), 0, 1);
    }

    #[test]
    #[should_panic(expected = "view")]
    fn unsupported_view_is_rejected_at_construction() {
        Viewgram::new(pdi(), 8, 0);
    }

    #[test]
    #[should_panic(expected = "segment")]
    fn unsupported_segment_is_rejected_at_construction() {
        Viewgram::new(pdi(), 0, 4);
    }
}
