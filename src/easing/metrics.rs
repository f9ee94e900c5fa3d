/// Performance metrics for easing evaluation
#[derive(Debug, Clone)]
pub struct EasingMetrics {
    /// Total number of easing applications
    pub total_applications: u64,
    /// Number of cache hits
    pub cache_hits: u64,
    /// Number of cache misses
    pub cache_misses: u64,
    /// Total time spent easing (in microseconds)
    pub total_time_micros: u64,
    /// Average application time (in microseconds)
    pub average_time_micros: f64,
}

impl EasingMetrics {
    /// Create new metrics
    #[inline]
    pub fn new() -> Self {
        Self {
            total_applications: 0,
            cache_hits: 0,
            cache_misses: 0,
            total_time_micros: 0,
            average_time_micros: 0.0,
        }
    }

    /// Record an easing application
    #[inline]
    pub fn record_application(&mut self, time_micros: u64, cache_hit: bool) {
        self.total_applications += 1;
        self.total_time_micros += time_micros;

        if cache_hit {
            self.cache_hits += 1;
        } else {
            self.cache_misses += 1;
        }

        self.average_time_micros = self.total_time_micros as f64 / self.total_applications as f64;
    }

    /// Get cache hit rate
    #[inline]
    pub fn cache_hit_rate(&self) -> f64 {
        if self.total_applications == 0 {
            0.0
        } else {
            self.cache_hits as f64 / self.total_applications as f64
        }
    }

    /// Reset metrics
    #[inline]
    pub fn reset(&mut self) {
        *self = Self::new();
    }
}

impl Default for EasingMetrics {
    fn default() -> Self {
        Self::new()
    }
}
