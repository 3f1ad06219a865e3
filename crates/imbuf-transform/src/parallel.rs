//! Row fan-out.
//!
//! With the `parallel` feature rows are distributed over the rayon pool;
//! otherwise they run in order on the calling thread. Each row is a
//! disjoint `&mut` chunk, so results do not depend on scheduling.
//!
//! The serial path is only compiled into the library without `parallel`;
//! `cargo test -p imbuf-transform --no-default-features` runs the crate's
//! tests on it.

#[cfg(feature = "parallel")]
use rayon::prelude::*;

/// Calls `f(y, row)` for every `row_len`-sized row of `data`.
pub fn for_each_row<T, F>(data: &mut [T], row_len: usize, f: F)
where
    T: Send,
    F: Fn(usize, &mut [T]) + Sync + Send,
{
    if row_len == 0 {
        return;
    }

    #[cfg(feature = "parallel")]
    data.par_chunks_mut(row_len)
        .enumerate()
        .for_each(|(y, row)| f(y, row));

    #[cfg(not(feature = "parallel"))]
    for_each_row_serial(data, row_len, &f);
}

/// In-order row loop on the calling thread.
#[cfg_attr(all(feature = "parallel", not(test)), allow(dead_code))]
fn for_each_row_serial<T, F>(data: &mut [T], row_len: usize, f: &F)
where
    F: Fn(usize, &mut [T]),
{
    for (y, row) in data.chunks_mut(row_len).enumerate() {
        f(y, row);
    }
}
