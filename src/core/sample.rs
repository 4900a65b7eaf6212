use crate::core::types::SampleIndex;

/// Numeric value that can be averaged component by component.
///
/// A sample is a fixed-size vector of `f64` components; scalars are the
/// one-component case. Implementors only provide the size query and the
/// component accessors, the arithmetic is derived from them.
///
/// All samples fed to one accumulator must have the same [`dim`](Sample::dim).
/// Mixing dimensions is a caller bug and is only checked in debug builds.
pub trait Sample: Clone + Default + Send + 'static {
    /// Number of components.
    fn dim(&self) -> usize;

    fn component(&self, i: usize) -> f64;

    fn component_mut(&mut self, i: usize) -> &mut f64;

    /// A sample of the same shape with every component set to zero.
    fn zeroed_like(&self) -> Self {
        let mut zero = self.clone();
        for i in 0..zero.dim() {
            *zero.component_mut(i) = 0.0;
        }
        zero
    }

    /// `self += other`, elementwise.
    fn add_assign(&mut self, other: &Self) {
        debug_assert_eq!(self.dim(), other.dim(), "sample dimension mismatch");
        for i in 0..self.dim() {
            *self.component_mut(i) += other.component(i);
        }
    }

    /// `self -= other`, elementwise.
    fn sub_assign(&mut self, other: &Self) {
        debug_assert_eq!(self.dim(), other.dim(), "sample dimension mismatch");
        for i in 0..self.dim() {
            *self.component_mut(i) -= other.component(i);
        }
    }

    fn div_assign_scalar(&mut self, divisor: f64) {
        for i in 0..self.dim() {
            *self.component_mut(i) /= divisor;
        }
    }

    /// Euclidean inner product.
    fn dot(&self, other: &Self) -> f64 {
        debug_assert_eq!(self.dim(), other.dim(), "sample dimension mismatch");
        (0..self.dim())
            .map(|i| self.component(i) * other.component(i))
            .sum()
    }

    /// Folds `value` into a running average over `n` terms:
    /// `self += (value - self) / n`.
    ///
    /// `n` is the count *including* `value` and must be at least 1.
    fn welford_update(&mut self, value: &Self, n: SampleIndex) {
        debug_assert!(n > 0);
        debug_assert_eq!(self.dim(), value.dim(), "sample dimension mismatch");
        let n = n as f64;
        for i in 0..self.dim() {
            let current = self.component(i);
            *self.component_mut(i) = current + (value.component(i) - current) / n;
        }
    }
}

impl Sample for f64 {
    #[inline]
    fn dim(&self) -> usize {
        1
    }

    #[inline]
    fn component(&self, i: usize) -> f64 {
        debug_assert_eq!(i, 0);
        *self
    }

    #[inline]
    fn component_mut(&mut self, i: usize) -> &mut f64 {
        debug_assert_eq!(i, 0);
        self
    }

    #[inline]
    fn dot(&self, other: &Self) -> f64 {
        self * other
    }

    #[inline]
    fn welford_update(&mut self, value: &Self, n: SampleIndex) {
        debug_assert!(n > 0);
        *self += (value - *self) / n as f64;
    }
}

impl Sample for Vec<f64> {
    #[inline]
    fn dim(&self) -> usize {
        self.len()
    }

    #[inline]
    fn component(&self, i: usize) -> f64 {
        self[i]
    }

    #[inline]
    fn component_mut(&mut self, i: usize) -> &mut f64 {
        &mut self[i]
    }
}
