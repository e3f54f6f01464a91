//! Domain-separated RNG streams derived from one user-visible seed.
//!
//! Each random command draws from its own stream so the rail pick for a
//! fallen man never perturbs which carriage a later breakage selects.

use hmac::{Hmac, Mac};
use rand::SeedableRng;
use rand_chacha::ChaCha20Rng;
use sha2::Sha256;

/// Seedable randomness injected into the engine's two random commands.
#[derive(Debug, Clone)]
pub struct RngStreams {
    rail: ChaCha20Rng,
    breakage: ChaCha20Rng,
}

impl RngStreams {
    /// Construct both streams from a user-visible seed.
    #[must_use]
    pub fn from_user_seed(seed: u64) -> Self {
        Self {
            rail: ChaCha20Rng::seed_from_u64(derive_stream_seed(seed, b"rail")),
            breakage: ChaCha20Rng::seed_from_u64(derive_stream_seed(seed, b"breakage")),
        }
    }

    /// Stream deciding which rail a man falls on.
    pub fn rail(&mut self) -> &mut ChaCha20Rng {
        &mut self.rail
    }

    /// Stream deciding which carriage breaks.
    pub fn breakage(&mut self) -> &mut ChaCha20Rng {
        &mut self.breakage
    }
}

fn derive_stream_seed(user_seed: u64, domain_tag: &[u8]) -> u64 {
    let mut mac = Hmac::<Sha256>::new_from_slice(&user_seed.to_le_bytes())
        .expect("64-bit seed is valid key");
    mac.update(domain_tag);
    let digest = mac.finalize().into_bytes();
    let seed_bytes: [u8; 8] = digest[..8].try_into().expect("digest slice length");
    u64::from_le_bytes(seed_bytes)
}
