//! Forward and back projection of a single viewgram.
//!
//! This is the staging loop between projection space and image space: each
//! bin of the viewgram is turned into a pair of LOR endpoints by the
//! projection-data descriptor, traced through the grid, and the resulting
//! contributions are applied against the image. Tracing is pure and writes
//! only into its caller's buffers, so the axial rows of a viewgram can be
//! processed on independent threads with no coordination; orchestration
//! across viewgrams is left to the surrounding reconstruction code.

use ndarray::Axis;
use rayon::prelude::*;

use crate::{Intensityf32, trace_lor, LorContributions};
use crate::image::Image;
use crate::projdata::Bin;
use crate::viewgram::Viewgram;

/// Estimate every sample of `viewgram` by projecting `image` along the
/// corresponding LORs. Bins whose LOR misses the detector bore are set to
/// zero. Voxels traced outside the image's FOV contribute nothing.
pub fn forward_project_viewgram(viewgram: &mut Viewgram, image: &Image) {
    let proj_data_info = viewgram.proj_data_info().clone();
    let (view, segment) = (viewgram.view_num(), viewgram.segment_num());
    let min_axial = viewgram.min_axial_pos();
    let tangential_range = viewgram.tangential_pos_range();
    let fov = image.fov;

    viewgram.data
        .axis_iter_mut(Axis(0))
        .into_par_iter()
        .enumerate()
        .for_each(|(row, mut samples)| {
            let axial = min_axial + row as i32;
            // One contribution buffer per row, reused across its bins:
            // allocating it anew for every LOR costs real time in this loop.
            let mut contributions = LorContributions::new();
            for (col, tangential) in tangential_range.clone().enumerate() {
                let bin = Bin::new(segment, view, axial, tangential);
                samples[col] = match proj_data_info.bin_to_voxel_endpoints(bin, &fov) {
                    None => 0.0,
                    Some((p1, p2)) => {
                        contributions.clear();
                        trace_lor(&mut contributions, p1, p2, fov.voxel_size, 1.0);
                        forward_one_lor(&contributions, image)
                    }
                };
            }
        });
}

/// Accumulate every sample of `viewgram` back into `image`, weighted by the
/// per-voxel chord lengths of its LOR. The transpose of the forward step.
pub fn back_project_viewgram(image: &mut Image, viewgram: &Viewgram) {
    let proj_data_info = viewgram.proj_data_info().clone();
    let (view, segment) = (viewgram.view_num(), viewgram.segment_num());
    let fov = image.fov;
    let mut contributions = LorContributions::new();

    for axial in viewgram.axial_pos_range() {
        for tangential in viewgram.tangential_pos_range() {
            let value = viewgram[(axial, tangential)];
            if value == 0.0 { continue }
            let bin = Bin::new(segment, view, axial, tangential);
            if let Some((p1, p2)) = proj_data_info.bin_to_voxel_endpoints(bin, &fov) {
                contributions.clear();
                trace_lor(&mut contributions, p1, p2, fov.voxel_size, 1.0);
                back_one_lor(image, &contributions, value);
            }
        }
    }
}

/// Line integral of the image along one traced LOR
pub fn forward_one_lor(contributions: &LorContributions, image: &Image) -> Intensityf32 {
    let fov = image.fov;
    contributions.iter()
        .filter_map(|&(voxel, weight)| fov.in_grid(voxel).map(|i| weight * image[i]))
        .sum::<Intensityf32>()
        * contributions.scale()
}

/// Deposit `value`, weighted by chord length, into every in-grid voxel of one
/// traced LOR
pub fn back_one_lor(image: &mut Image, contributions: &LorContributions, value: Intensityf32) {
    let fov = image.fov;
    let scale = contributions.scale();
    for &(voxel, weight) in contributions.iter() {
        if let Some(i) = fov.in_grid(voxel) {
            image[i] += value * weight * scale;
        }
    }
}
