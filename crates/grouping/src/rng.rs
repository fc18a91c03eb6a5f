use rand::RngCore;
use sha2::{Digest, Sha256};

/// Deterministic random stream keyed by a caller-supplied seed string
///
/// The seed is hashed with SHA-256 and the first four bytes (big-endian)
/// become a 32-bit mulberry32 state. The stream is the only randomness the
/// genetic search consumes, so equal seeds and inputs give equal output.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SeededStream {
    state: u32,
}

impl SeededStream {
    pub fn from_seed(seed: &str) -> Self {
        let digest = Sha256::digest(seed.as_bytes());
        let state = u32::from_be_bytes([digest[0], digest[1], digest[2], digest[3]]);
        Self { state }
    }

    #[must_use]
    pub const fn from_state(state: u32) -> Self {
        Self { state }
    }

    #[must_use]
    pub const fn state(&self) -> u32 {
        self.state
    }

    /// Uniform float in [0, 1)
    pub fn next_f64(&mut self) -> f64 {
        f64::from(self.next_u32()) / 4_294_967_296.0
    }
}

impl RngCore for SeededStream {
    fn next_u32(&mut self) -> u32 {
        self.state = self.state.wrapping_add(0x6D2B_79F5);
        let mut t = self.state;
        t = (t ^ (t >> 15)).wrapping_mul(t | 1);
        t ^= t.wrapping_add((t ^ (t >> 7)).wrapping_mul(t | 61));
        t ^ (t >> 14)
    }

    fn next_u64(&mut self) -> u64 {
        let low = u64::from(self.next_u32());
        let high = u64::from(self.next_u32());
        (high << 32) | low
    }

    fn fill_bytes(&mut self, dest: &mut [u8]) {
        for chunk in dest.chunks_mut(4) {
            let bytes = self.next_u32().to_le_bytes();
            chunk.copy_from_slice(&bytes[..chunk.len()]);
        }
    }

    fn try_fill_bytes(&mut self, dest: &mut [u8]) -> Result<(), rand::Error> {
        self.fill_bytes(dest);
        Ok(())
    }
}
