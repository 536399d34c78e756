/// Running count, mean and variance of one signal (Welford's update).
#[derive(Clone, Debug, Default)]
pub struct FeatureStats {
    mean: f64,
    m2: f64,
    count: u32,
}

impl FeatureStats {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get_count(&self) -> u32 {
        self.count
    }

    pub fn get_mean(&self) -> Option<f64> {
        (self.count > 0).then_some(self.mean)
    }

    /// Sample standard deviation (n - 1 in the denominator), undefined below two values.
    pub fn get_std(&self) -> Option<f64> {
        (self.count > 1).then(|| (self.m2 / (self.count - 1) as f64).sqrt())
    }

    pub fn add_value(&mut self, value: f64) {
        self.count += 1;
        let old_mean = self.mean;
        self.mean += (value - old_mean) / self.count as f64;
        self.m2 += (value - old_mean) * (value - self.mean);
    }
}

impl FromIterator<f64> for FeatureStats {
    fn from_iter<I: IntoIterator<Item = f64>>(iter: I) -> Self {
        let mut stats = FeatureStats::new();
        iter.into_iter().for_each(|value| stats.add_value(value));
        stats
    }
}
