use std::collections::HashMap;
use std::num::NonZeroUsize;

use lru::LruCache;

use crate::easing::cache::EasingCacheKey;
use crate::easing::functions::{
    CubicBezierEasing, EaseInOutQuadEasing, EaseInQuadEasing, EaseOutQuadEasing,
    EaseOutQuarticEasing, Easing, LinearEasing,
};
use crate::easing::metrics::EasingMetrics;
use crate::error::EffectError;
use crate::time::Timer;

/// Registry for managing easing functions
pub struct EasingRegistry {
    functions: HashMap<String, Box<dyn Easing>>,
    cache: LruCache<EasingCacheKey, f64>,
    metrics: EasingMetrics,
    enable_caching: bool,
    enable_metrics: bool,
}

impl EasingRegistry {
    /// Create a new easing registry
    #[inline]
    pub fn new(cache_size: usize) -> Self {
        let cache_size = NonZeroUsize::new(cache_size).unwrap_or(NonZeroUsize::new(1).unwrap());
        let mut registry = Self {
            functions: HashMap::new(),
            cache: LruCache::new(cache_size),
            metrics: EasingMetrics::new(),
            enable_caching: true,
            enable_metrics: true,
        };

        // Register built-in easing functions
        registry.register_builtin_functions();
        registry
    }

    /// Register built-in easing functions
    #[inline]
    fn register_builtin_functions(&mut self) {
        self.register_function(Box::new(LinearEasing));
        self.register_function(Box::new(EaseOutQuarticEasing));
        self.register_function(Box::new(EaseInQuadEasing));
        self.register_function(Box::new(EaseOutQuadEasing));
        self.register_function(Box::new(EaseInOutQuadEasing));
        self.register_function(Box::new(CubicBezierEasing::standard()));
    }

    /// Register a new easing function
    #[inline]
    pub fn register_function(&mut self, function: Box<dyn Easing>) {
        self.functions.insert(function.name().to_string(), function);
    }

    /// Get an easing function by name
    #[inline]
    pub fn get_function(&self, name: &str) -> Option<&dyn Easing> {
        self.functions.get(name).map(|f| f.as_ref())
    }

    /// List all available easing functions
    #[inline]
    pub fn list_functions(&self) -> Vec<&str> {
        self.functions.keys().map(|k| k.as_str()).collect()
    }

    /// Apply an easing function to a progress value.
    /// Progress is clamped into [0, 1] before evaluation.
    pub fn apply(&mut self, function_name: &str, t: f64) -> Result<f64, EffectError> {
        let timer = if self.enable_metrics {
            Some(Timer::new())
        } else {
            None
        };

        let t = t.clamp(0.0, 1.0);

        // Check cache first
        if self.enable_caching {
            let cache_key = EasingCacheKey::new(function_name, t);

            if let Some(cached) = self.cache.get(&cache_key) {
                let value = *cached;
                if let Some(timer) = timer {
                    self.metrics
                        .record_application(timer.elapsed_micros() as u64, true);
                }
                return Ok(value);
            }
        }

        let function =
            self.functions
                .get(function_name)
                .ok_or_else(|| EffectError::EasingNotFound {
                    name: function_name.to_string(),
                })?;

        let value = function.ease(t);

        // Cache result
        if self.enable_caching {
            let cache_key = EasingCacheKey::new(function_name, t);
            self.cache.put(cache_key, value);
        }

        // Record metrics
        if let Some(timer) = timer {
            self.metrics
                .record_application(timer.elapsed_micros() as u64, false);
        }

        Ok(value)
    }

    /// Enable or disable caching
    #[inline]
    pub fn set_caching_enabled(&mut self, enabled: bool) {
        self.enable_caching = enabled;
        if !enabled {
            self.cache.clear();
        }
    }

    /// Enable or disable metrics
    #[inline]
    pub fn set_metrics_enabled(&mut self, enabled: bool) {
        self.enable_metrics = enabled;
        if !enabled {
            self.metrics.reset();
        }
    }

    /// Get performance metrics
    #[inline]
    pub fn metrics(&self) -> &EasingMetrics {
        &self.metrics
    }

    /// Clear the easing cache
    #[inline]
    pub fn clear_cache(&mut self) {
        self.cache.clear();
    }

    /// Get cache statistics
    #[inline]
    pub fn cache_len(&self) -> usize {
        self.cache.len()
    }

    /// Get cache capacity
    #[inline]
    pub fn cache_cap(&self) -> usize {
        self.cache.cap().into()
    }
}

impl Default for EasingRegistry {
    fn default() -> Self {
        Self::new(1000) // Default cache size
    }
}
