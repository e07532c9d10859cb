use crate::domain::{RandomSource, RandomSourcePtr};
use rand::Rng;
use std::sync::Arc;

/// Random source backed by the thread-local RNG.
pub struct ThreadRandom;

impl RandomSource for ThreadRandom {
    // ---
    fn below(&self, upper: u32) -> u32 {
        // ---
        if upper == 0 {
            return 0;
        }
        rand::thread_rng().gen_range(0..upper)
    }
}

pub fn create_thread_random() -> RandomSourcePtr {
    // ---
    Arc::new(ThreadRandom)
}
