pub type Lengthf32    = f32;
pub type Weightf32    = f32;
pub type Ratiof32     = f32;
pub type Intensityf32 = f32;

pub type Vector = nalgebra::Vector3<Lengthf32>;
pub type Point  = nalgebra::Point3 <Lengthf32>;

pub use crate::index::{BoxDim_u, Index1_u, Index3_u, Index3_i};
pub use crate::raytrace::{trace_lor, LorContribution, LorContributions};
pub use crate::fov::FOV;
pub use crate::scanner::Scanner;
pub use crate::projdata::{Bin, ProjDataInfo};
pub use crate::viewgram::Viewgram;
pub use crate::image::{Image, ImageData};
