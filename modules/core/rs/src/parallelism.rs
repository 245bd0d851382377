use std::thread::available_parallelism;

use eyre::Result;
use rayon::{ThreadPool, ThreadPoolBuilder};

// Requested thread counts follow one convention across the toolkits:
// * positive values are capped by the number of cores
// * zero means a single thread
// * negative values count back from the number of cores (-1 = all of them)
fn resolve(requested: isize, cores: isize) -> usize {
    if requested > 0 {
        requested.min(cores) as usize
    } else if requested == 0 {
        1
    } else {
        (cores + requested + 1).max(1) as usize
    }
}

pub fn available(requested: isize) -> Result<usize> {
    let cores = available_parallelism()?.get() as isize;
    Ok(resolve(requested, cores))
}

/// Build a dedicated pool for the requested number of threads.
pub fn pool(requested: isize) -> Result<ThreadPool> {
    let pool = ThreadPoolBuilder::new()
        .num_threads(available(requested)?)
        .build()?;
    Ok(pool)
}
