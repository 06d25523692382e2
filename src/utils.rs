/// Access to the last element of a non-empty slice.
pub trait Back<T> {
    fn back(&self) -> &T;
    fn back_mut(&mut self) -> &mut T;
}

impl<T> Back<T> for [T] {
    #[inline]
    fn back(&self) -> &T {
        &self[self.len() - 1]
    }

    #[inline]
    fn back_mut(&mut self) -> &mut T {
        let i = self.len() - 1;
        &mut self[i]
    }
}

/// Splits out elements `i` and `i + 1`, the second one mutably.
pub fn pair_mut<T>(items: &mut [T], i: usize) -> (&T, &mut T) {
    let (before, after) = items[i..].split_at_mut(1);
    (&before[0], &mut after[0])
}

/// Sum of squared differences, `sum_i (expected_i - actual_i)^2`.
pub fn squared_error<'a, A>(expected: &[f64], actual: A) -> f64
where
    A: IntoIterator<Item = &'a f64>,
{
    expected
        .iter()
        .zip(actual)
        .map(|(e, a)| (e - a) * (e - a))
        .sum()
}
