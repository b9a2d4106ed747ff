//! Random book payloads standing in for uploaded file content.

use rand::{Rng, RngCore, thread_rng};

pub const DEFAULT_MAX_PAYLOAD_BYTES: usize = 1_000_000;

#[derive(Debug, Clone, Copy)]
pub struct PayloadGenerator {
    max_bytes: usize,
}

impl PayloadGenerator {
    /// A zero maximum is bumped to one so every book carries data.
    pub fn new(max_bytes: usize) -> Self {
        Self {
            max_bytes: max_bytes.max(1),
        }
    }

    pub fn max_bytes(&self) -> usize {
        self.max_bytes
    }

    /// Random bytes of random length in `1..=max_bytes`.
    pub fn generate(&self) -> Vec<u8> {
        let mut rng = thread_rng();
        let len = rng.gen_range(1..=self.max_bytes);
        let mut data = vec![0u8; len];
        rng.fill_bytes(&mut data);
        data
    }
}

impl Default for PayloadGenerator {
    fn default() -> Self {
        Self::new(DEFAULT_MAX_PAYLOAD_BYTES)
    }
}
