//! Description of a cylindrical scanner: the detector-ring layout from which
//! projection-space addressing derives its bin ranges and LOR endpoints.
//! Loadable from a human-readable TOML file.

use std::error::Error;
use std::fs;
use std::path::Path;

use serde::Deserialize;

use crate::Lengthf32;

#[derive(Deserialize, Debug, Clone, Copy, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct Scanner {

    /// Number of detector rings along the scanner axis
    pub num_rings: usize,

    /// Number of crystals around one ring
    pub num_detectors_per_ring: usize,

    /// Radius of the detector cylinder, in mm
    pub inner_radius: Lengthf32,

    /// Centre-to-centre distance between adjacent rings, in mm
    pub ring_spacing: Lengthf32,

    /// Arc-corrected width of one tangential bin, in mm
    pub bin_size: Lengthf32,

}

impl Scanner {

    pub fn from_config_file(path: &Path) -> Result<Self, Box<dyn Error>> {
        Ok(toml::from_str(&fs::read_to_string(path)?)?)
    }

    /// Number of angular sampling positions: opposite detectors see the same
    /// line, so only half the crystals give distinct views.
    pub fn num_views(&self) -> usize { self.num_detectors_per_ring / 2 }

    pub fn default_num_tangential(&self) -> usize { self.num_detectors_per_ring / 2 }

    /// Axial position of a ring, in mm, with the scanner centred on z = 0
    pub fn ring_z(&self, ring: i32) -> Lengthf32 {
        (ring as Lengthf32 - (self.num_rings as Lengthf32 - 1.0) / 2.0) * self.ring_spacing
    }

}
