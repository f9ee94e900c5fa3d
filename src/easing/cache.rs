use std::collections::hash_map::DefaultHasher;
use std::hash::{Hash, Hasher};

/// Cache key for easing results
#[derive(Debug, Clone, Hash, PartialEq, Eq)]
pub struct EasingCacheKey {
    function_hash: u64,
    t_quantized: u32, // Quantized t value for cache efficiency
}

impl EasingCacheKey {
    #[inline]
    pub fn new(function_name: &str, t: f64) -> Self {
        let mut hasher = DefaultHasher::new();
        function_name.hash(&mut hasher);
        let function_hash = hasher.finish();

        // Quantize t to reduce cache entries while maintaining precision
        let t_quantized = (t * 10000.0) as u32;

        Self {
            function_hash,
            t_quantized,
        }
    }
}
