pub struct StatsHelper;

impl StatsHelper {
    /// Multiplicity-weighted RMS of `(value, weight)` pairs.
    pub fn weighted_rms<I>(samples: I) -> f64
    where
        I: IntoIterator<Item = (f64, u64)>,
    {
        let (sum_sq, weight) = samples
            .into_iter()
            .fold((0.0, 0u64), |(sum, total), (value, w)| {
                (sum + value * value * w as f64, total + w)
            });
        if weight == 0 {
            return 0.0;
        }
        (sum_sq / weight as f64).sqrt()
    }
}
