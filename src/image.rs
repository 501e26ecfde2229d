use crate::{Intensityf32, Index1_u, Index3_u};
use crate::fov::FOV;
use crate::index::index3_to_1;

pub type ImageData = Vec<Intensityf32>;

/// Reconstruction volume: a flat buffer of voxel values plus the grid
/// geometry describing its layout.
#[derive(Clone)]
pub struct Image {
    pub fov: FOV,
    pub data: ImageData,
}

impl Image {

    pub fn new(fov: FOV, data: ImageData) -> Self {
        let [nx, ny, nz] = fov.n;
        assert_eq!(data.len(), nx * ny * nz,
                   "image data length does not match FOV voxel count");
        Self { fov, data }
    }

    pub fn ones (fov: FOV) -> Self { Self::filled_with(fov, 1.0) }
    pub fn zeros(fov: FOV) -> Self { Self::filled_with(fov, 0.0) }

    fn filled_with(fov: FOV, value: Intensityf32) -> Self {
        let [nx, ny, nz] = fov.n;
        Self { fov, data: vec![value; nx * ny * nz] }
    }

}

impl core::ops::IndexMut<Index1_u> for Image {
    #[inline]
    fn index_mut(&mut self, i: Index1_u) -> &mut Self::Output { &mut self.data[i] }
}

impl core::ops::Index<Index1_u> for Image {
    type Output = Intensityf32;
    #[inline]
    fn index(&self, i: Index1_u) -> &Self::Output { &self.data[i] }
}

impl core::ops::IndexMut<Index3_u> for Image {
    fn index_mut(&mut self, i3: Index3_u) -> &mut Self::Output {
        let i1 = index3_to_1(i3, self.fov.n);
        &mut self.data[i1]
    }
}

impl core::ops::Index<Index3_u> for Image {
    type Output = Intensityf32;
    fn index(&self, i3: Index3_u) -> &Self::Output {
        let i1 = index3_to_1(i3, self.fov.n);
        &self.data[i1]
    }
}
