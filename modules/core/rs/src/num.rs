use std::fmt::Debug;

/// T values are read counts.
///
/// Counts are summed in f64 regardless of their storage type, so integer and float matrices
/// produce identical ratios. Values that can't be represented as f64 become NaN.
pub trait Count: ::num::Num + ::num::ToPrimitive + Copy + Debug + Default + Send + Sync {
    #[inline(always)]
    fn as_f64(self) -> f64 {
        self.to_f64().unwrap_or(f64::NAN)
    }
}

impl<T: ::num::Num + ::num::ToPrimitive + Copy + Debug + Default + Send + Sync> Count for T {}

/// Sum counts left to right. The order is fixed so that every caller gets bit-identical totals.
#[inline]
pub fn sum<C: Count>(counts: impl IntoIterator<Item = C>) -> f64 {
    counts
        .into_iter()
        .fold(0.0, |total, count| total + count.as_f64())
}
