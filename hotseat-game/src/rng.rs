//! Deterministic session randomness, split by domain.
//!
//! Each gameplay domain draws from its own seeded stream so that, for a
//! given session seed, shuffle order stays stable no matter how many
//! lifeline or friend draws happen in between.

use rand::SeedableRng;
use rand_chacha::ChaCha20Rng;

fn fnv1a64(bytes: &[u8]) -> u64 {
    const FNV_OFFSET: u64 = 0xcbf2_9ce4_8422_2325;
    const FNV_PRIME: u64 = 0x0100_0000_01b3;
    let mut hash = FNV_OFFSET;
    for b in bytes {
        hash = (hash ^ u64::from(*b)).wrapping_mul(FNV_PRIME);
    }
    hash
}

fn derive_stream_seed(user_seed: u64, domain_tag: &[u8]) -> u64 {
    let mut buf = Vec::with_capacity(8 + domain_tag.len());
    buf.extend_from_slice(&user_seed.to_le_bytes());
    buf.extend_from_slice(domain_tag);
    fnv1a64(&buf)
}

/// Bundle of RNG streams segregated by gameplay domain.
#[derive(Debug, Clone)]
pub struct SessionRng {
    shuffle: ChaCha20Rng,
    lifeline: ChaCha20Rng,
    friend: ChaCha20Rng,
}

impl SessionRng {
    /// Construct the bundle from a user-visible seed.
    #[must_use]
    pub fn from_user_seed(seed: u64) -> Self {
        Self {
            shuffle: ChaCha20Rng::seed_from_u64(derive_stream_seed(seed, b"shuffle")),
            lifeline: ChaCha20Rng::seed_from_u64(derive_stream_seed(seed, b"lifeline")),
            friend: ChaCha20Rng::seed_from_u64(derive_stream_seed(seed, b"friend")),
        }
    }

    /// Stream used for choice-order shuffles at question creation.
    pub fn shuffle(&mut self) -> &mut ChaCha20Rng {
        &mut self.shuffle
    }

    /// Stream used for fifty-fifty removal draws.
    pub fn lifeline(&mut self) -> &mut ChaCha20Rng {
        &mut self.lifeline
    }

    /// Stream used for ask-a-friend advice rolls.
    pub fn friend(&mut self) -> &mut ChaCha20Rng {
        &mut self.friend
    }
}
