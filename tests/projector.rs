//! End-to-end checks of the bin -> LOR -> trace -> image pipeline for one
//! viewgram at a time.

use std::sync::Arc;

use float_eq::assert_float_eq;
use itertools::iproduct;

use raygrid::{Bin, FOV, Image, ProjDataInfo, Scanner, Viewgram};
use raygrid::projector::{back_project_viewgram, forward_project_viewgram};

fn test_scanner() -> Scanner {
    Scanner {
        num_rings: 4,
        num_detectors_per_ring: 16,
        inner_radius: 60.0,
        ring_spacing: 4.0,
        bin_size: 3.0,
    }
}

fn test_pdi() -> Arc<ProjDataInfo> {
    Arc::new(ProjDataInfo::from_scanner(test_scanner()))
}

// 5 mm cubic voxels, comfortably inside the 60 mm bore, covering all rings
fn test_fov() -> FOV { FOV::new((100.0, 100.0, 20.0), (20, 20, 4)) }

#[test]
fn forward_projection_of_uniform_image_gives_chord_through_fov() {
    let pdi = test_pdi();
    let image = Image::ones(test_fov());

    // Direct (segment 0) bin through the centre at view angle 0: the LOR runs
    // parallel to the y axis, crossing the full 100 mm of the FOV, and every
    // voxel on the way has value 1.
    let mut viewgram = Viewgram::new(pdi, 0, 0);
    forward_project_viewgram(&mut viewgram, &image);
    assert_float_eq!(viewgram[(1, 0)], 100.0, rel <= 1e-4);
}

#[test]
fn forward_projection_of_zero_image_is_zero_everywhere() {
    let pdi = test_pdi();
    let image = Image::zeros(test_fov());
    for (segment, view) in iproduct!(pdi.min_segment_num()..=pdi.max_segment_num(),
                                     pdi.min_view_num()..=pdi.max_view_num()) {
        let mut viewgram = Viewgram::new(pdi.clone(), view, segment);
        forward_project_viewgram(&mut viewgram, &image);
        for axial in viewgram.axial_pos_range() {
            for tangential in viewgram.tangential_pos_range() {
                assert_eq!(viewgram[(axial, tangential)], 0.0);
            }
        }
    }
}

#[test]
fn forward_projection_is_finite_and_non_negative_for_every_bin() {
    let pdi = test_pdi();
    let image = Image::ones(test_fov());
    for (segment, view) in iproduct!(pdi.min_segment_num()..=pdi.max_segment_num(),
                                     pdi.min_view_num()..=pdi.max_view_num()) {
        let mut viewgram = Viewgram::new(pdi.clone(), view, segment);
        forward_project_viewgram(&mut viewgram, &image);
        for axial in viewgram.axial_pos_range() {
            for tangential in viewgram.tangential_pos_range() {
                let value = viewgram[(axial, tangential)];
                assert!(value.is_finite() && value >= 0.0,
                        "bin ({segment} {view} {axial} {tangential}) has value {value}");
            }
        }
    }
}

// Back-projecting a single measured bin must deposit value * weight into the
// traced voxels, so the image total equals the bin value times the total
// in-grid chord length, which the forward projection of a uniform image
// measures independently.
#[test]
fn back_projection_deposits_the_forward_weight_of_the_bin() {
    let pdi = test_pdi();
    let fov = test_fov();
    let (view, segment) = (3, 1);
    let bin = Bin::new(segment, view, 1, -2);

    let mut reference = Viewgram::new(pdi.clone(), view, segment);
    forward_project_viewgram(&mut reference, &Image::ones(fov));
    let total_chord = reference[(bin.axial, bin.tangential)];
    assert!(total_chord > 0.0);

    let mut measured = reference.empty_copy();
    measured[(bin.axial, bin.tangential)] = 2.5;

    let mut image = Image::zeros(fov);
    back_project_viewgram(&mut image, &measured);
    let deposited: f32 = image.data.iter().sum();
    assert_float_eq!(deposited, 2.5 * total_chord, rel <= 1e-4);
}
