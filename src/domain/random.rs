use std::sync::Arc;

/// Source of uniform random draws for the chaos endpoints.
///
/// Injected through the application state so tests can pin outcomes.
pub trait RandomSource: Send + Sync + 'static {
    // ---
    /// Draw uniformly from `0..upper`. Returns 0 when `upper` is 0.
    fn below(&self, upper: u32) -> u32;
}

pub type RandomSourcePtr = Arc<dyn RandomSource>;
