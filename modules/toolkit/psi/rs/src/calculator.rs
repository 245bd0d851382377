use eyre::Result;
use rayon::prelude::*;
use rayon::ThreadPool;

use splicekit_core_rs::num::{self, Count};

use crate::groups::{Configuration, FixedGroups, PerEventGroups};
use crate::matrix::{CountMatrix, PsiMatrix};
use crate::reads::MinReads;

/// Percent spliced-in calculator.
///
/// Each row is summed left to right by a single task and written to its own output slot, so
/// results with and without a thread pool are bit-identical.
#[derive(Debug, Default)]
pub struct Calculator {
    // If not provided, rows are processed on the calling thread
    pool: Option<ThreadPool>,
    min_reads: MinReads,
}

impl Calculator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_min_reads(&mut self, min_reads: MinReads) -> &mut Self {
        self.min_reads = min_reads;
        self
    }

    pub fn set_thread_pool(&mut self, pool: ThreadPool) -> &mut Self {
        self.pool = Some(pool);
        self
    }

    pub fn min_reads(&self) -> MinReads {
        self.min_reads
    }

    /// Ratios for column groups shared by all rows, one output column per configuration.
    pub fn fixed<C: Count>(
        &self,
        matrix: &CountMatrix<C>,
        groups: &FixedGroups,
    ) -> Result<PsiMatrix> {
        groups.validate(matrix.ncols())?;
        if groups.is_empty() && matrix.nrows() > 0 {
            log::warn!(
                "No event configurations supplied, PSI for {} rows will have no columns",
                matrix.nrows()
            );
        }

        let configurations: Vec<Configuration> = groups.configurations().collect();
        let min_reads = self.min_reads;
        let result = self.fill(matrix, configurations.len(), |_, row, saveto| {
            for (cell, (inc, exc)) in saveto.iter_mut().zip(&configurations) {
                let inclusion = num::sum(inc.iter().flatten().map(|&col| row[col]));
                let exclusion = num::sum(exc.iter().flatten().map(|&col| row[col]));
                *cell = min_reads.ratio(inclusion, exclusion);
            }
        });

        log::debug!(
            "PSI for {}x{} configurations: {} missing values (min reads = {})",
            result.nrows(),
            result.ncols(),
            result.missing(),
            min_reads.get()
        );
        Ok(result)
    }

    /// Ratios for column groups given per row, a single output column.
    pub fn per_event<C: Count>(
        &self,
        matrix: &CountMatrix<C>,
        groups: &PerEventGroups,
    ) -> Result<PsiMatrix> {
        groups.validate(matrix.nrows(), matrix.ncols())?;

        let min_reads = self.min_reads;
        let result = self.fill(matrix, 1, |ind, row, saveto| {
            let (inc, exc) = groups.event(ind);
            let inclusion = num::sum(inc.iter().map(|&col| row[col]));
            let exclusion = num::sum(exc.iter().map(|&col| row[col]));
            saveto[0] = min_reads.ratio(inclusion, exclusion);
        });

        log::debug!(
            "PSI for {} events: {} missing values (min reads = {})",
            result.nrows(),
            result.missing(),
            min_reads.get()
        );
        Ok(result)
    }

    fn fill<C: Count>(
        &self,
        matrix: &CountMatrix<C>,
        ncols: usize,
        calculate: impl Fn(usize, &[C], &mut [Option<f64>]) + Sync,
    ) -> PsiMatrix {
        let mut result = PsiMatrix::missing_filled(matrix.nrows(), ncols);
        if ncols == 0 {
            return result;
        }

        let values = result.values_mut();
        match &self.pool {
            Some(pool) => pool.install(|| {
                values
                    .par_chunks_mut(ncols)
                    .enumerate()
                    .for_each(|(ind, saveto)| calculate(ind, matrix.row(ind), saveto))
            }),
            None => values
                .chunks_mut(ncols)
                .enumerate()
                .for_each(|(ind, saveto)| calculate(ind, matrix.row(ind), saveto)),
        }
        result
    }
}
