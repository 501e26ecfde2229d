use std::error::Error;
use std::path::PathBuf;

use clap::Parser;

use raygrid::{Bin, FOV, Lengthf32, LorContributions, Point, ProjDataInfo, Scanner, trace_lor};
use raygrid::utils::parse_triplet;

fn main() -> Result<(), Box<dyn Error>> {
    let args = Cli::parse();

    let fov = FOV::new(args.size, args.nvoxels);

    let (p1, p2) = if let Some(path) = &args.scanner {
        let scanner = Scanner::from_config_file(path)?;
        let proj_data_info = ProjDataInfo::from_scanner(scanner);
        let bin = Bin::new(args.segment, args.view, args.axial, args.tangential);
        match proj_data_info.bin_to_voxel_endpoints(bin, &fov) {
            Some(endpoints) => endpoints,
            None => {
                println!("{bin:?} lies outside the scanner bore: no LOR to trace");
                return Ok(());
            }
        }
    } else {
        let p1 = args.p1.ok_or("supply either --scanner or both --p1 and --p2")?;
        let p2 = args.p2.ok_or("supply either --scanner or both --p1 and --p2")?;
        (fov.physical_to_voxel(Point::new(p1.0, p1.1, p1.2)),
         fov.physical_to_voxel(Point::new(p2.0, p2.1, p2.2)))
    };

    let mut contributions = LorContributions::new();
    trace_lor(&mut contributions, p1, p2, fov.voxel_size, args.normalization);

    let mut total = 0.0;
    for &([x, y, z], weight) in contributions.iter() {
        let note = if fov.in_grid([x, y, z]).is_some() { "" } else { "   (outside FOV)" };
        println!("({x:4} {y:4} {z:4})   {weight:10.4}{note}");
        total += weight;
    }
    println!("{} voxels, total chord length {total:.4} mm", contributions.len());
    Ok(())
}

#[derive(Parser, Debug, Clone)]
#[clap(name = "tracelor", about = "Trace one LOR through the voxel grid and print its per-voxel chord lengths")]
pub struct Cli {

    /// Field Of View full-widths in mm
    #[clap(short, long, value_parser = parse_triplet::<Lengthf32>, default_value = "300,300,300")]
    size: (Lengthf32, Lengthf32, Lengthf32),

    /// Number of voxels in each dimension
    #[clap(short, long, value_parser = parse_triplet::<usize>, default_value = "60,60,60")]
    nvoxels: (usize, usize, usize),

    /// First LOR endpoint in mm, e.g. '-100,20,5'
    #[clap(long, value_parser = parse_triplet::<Lengthf32>, allow_hyphen_values = true)]
    p1: Option<(Lengthf32, Lengthf32, Lengthf32)>,

    /// Second LOR endpoint in mm
    #[clap(long, value_parser = parse_triplet::<Lengthf32>, allow_hyphen_values = true)]
    p2: Option<(Lengthf32, Lengthf32, Lengthf32)>,

    /// TOML scanner description; the LOR is then taken from
    /// --segment/--view/--axial/--tangential instead of --p1/--p2
    #[clap(long)]
    scanner: Option<PathBuf>,

    #[clap(long, default_value = "0", allow_hyphen_values = true)]
    segment: i32,

    #[clap(long, default_value = "0")]
    view: i32,

    #[clap(long, default_value = "0")]
    axial: i32,

    #[clap(long, default_value = "0", allow_hyphen_values = true)]
    tangential: i32,

    /// Normalization constant multiplied into every weight
    #[clap(long, default_value = "1.0")]
    normalization: f32,
}
