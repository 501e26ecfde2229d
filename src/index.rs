//! Integer index types for the reconstruction grid, and conversion between
//! flat (1-d) and spatial (3-d) indices. x varies fastest in the flat order.

#[allow(non_camel_case_types)] pub type Index1_u = usize;
#[allow(non_camel_case_types)] pub type Index3_u = [usize; 3];
#[allow(non_camel_case_types)] pub type BoxDim_u = [usize; 3];

/// Voxel coordinate as produced by the ray tracer: unbounded, may lie outside
/// any particular grid. Bounds are only established by `FOV::in_grid`.
#[allow(non_camel_case_types)] pub type Index3_i = [i32; 3];

use std::ops::{Add, Div, Mul, Rem};

pub fn index3_to_1<T>([ix, iy, iz]: [T; 3], [nx, ny, _nz]: [T; 3]) -> T
where
    T: Mul<Output = T> + Add<Output = T>
{
    ix + (iy + iz * ny) * nx
}

#[allow(clippy::many_single_char_names)]
pub fn index1_to_3<T>(i: T, [nx, ny, _nz]: [T; 3]) -> [T; 3]
where
    T: Mul<Output = T> +
    Div<Output = T> +
    Rem<Output = T> +
    Copy
{
    let z = i / (nx * ny);
    let r = i % (nx * ny);
    let y = r / nx;
    let x = r % nx;
    [x,y,z]
}

#[cfg(test)]
mod test_index_conversion {
    use super::*;
    use rstest::rstest;

    #[rstest(/**/    size   , index3 , index1,
             // Single voxel along two of the axes
             case([ 1, 1, 1], [0,0,0],   0),
             case([ 6, 1, 1], [2,0,0],   2),
             case([ 1, 6, 1], [0,3,0],   3),
             case([ 1, 1, 6], [0,0,5],   5),
             // x varies fastest, z slowest
             case([ 3, 4, 5], [1,0,0],   1),
             case([ 3, 4, 5], [0,1,0],   3),
             case([ 3, 4, 5], [0,0,1],  12),
             case([ 3, 4, 5], [2,3,4],  59),
             // Relation to decimal digits: note reversal
             case([10,10,10], [4,5,6], 654),
             case([10,10,10], [9,0,2], 209),
    )]
    fn hand_picked(size: Index3_u, index3: Index3_u, index1: usize) {
        assert_eq!(index3_to_1(index3, size), index1);
        assert_eq!(index1_to_3(index1, size), index3);
    }

    use proptest::prelude::*;

    // A strategy that picks 3-d index limits, and a 1-d index guaranteed to lie
    // within those bounds.
    fn size_and_in_range_index() -> impl Strategy<Value = (Index3_u, usize)> {
        [1..150_usize, 1..150_usize, 1..150_usize]
            .prop_flat_map(|i| (Just(i), 0..(i[0] * i[1] * i[2])))
    }

    proptest! {
        #[test]
        fn index_roundtrip((size, index) in size_and_in_range_index()) {
            let there = index1_to_3(index, size);
            let back  = index3_to_1(there, size);
            assert_eq!(back, index)
        }
    }
}
