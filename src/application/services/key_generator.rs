//! Short key generation with collision checks.

use std::sync::Arc;

use futures::future::join_all;
use rand::Rng;
use serde_json::json;
use tracing::debug;

use crate::application::services::tiered_cache::TieredCache;
use crate::domain::short_key::ShortKey;
use crate::error::AppError;

/// Base-36 alphabet used for bare tokens.
pub const ALPHABET: &[u8] = b"0123456789abcdefghijklmnopqrstuvwxyz";

/// Length of each of the two random parts of a token.
const PART_LENGTH: usize = 3;

/// Total bare token length.
pub const TOKEN_LENGTH: usize = PART_LENGTH * 2;

/// Rounds of candidate batches before giving up.
const MAX_ROUNDS: usize = 10;

/// Draws a random base-36 string of `len` characters.
fn random_part<R: Rng + ?Sized>(rng: &mut R, len: usize) -> String {
    (0..len)
        .map(|_| ALPHABET[rng.random_range(0..ALPHABET.len())] as char)
        .collect()
}

/// Draws a bare token made of two independent 3-character parts.
pub fn random_token<R: Rng + ?Sized>(rng: &mut R) -> String {
    let mut token = random_part(rng, PART_LENGTH);
    token.push_str(&random_part(rng, PART_LENGTH));
    token
}

/// Produces short keys whose bare token is absent from the cache.
///
/// Each round draws `batch_size` candidates, looks them all up
/// concurrently and keeps the first free one. A batch size of 1 is the
/// plain draw-check-repeat loop.
///
/// The check is not atomic with the later write. Callers that need a hard
/// guarantee use [`TieredCache::insert_new`] and retry on `false`.
pub struct KeyGenerator {
    cache: Arc<TieredCache>,
    batch_size: usize,
}

impl KeyGenerator {
    pub fn new(cache: Arc<TieredCache>, batch_size: usize) -> Self {
        Self {
            cache,
            batch_size: batch_size.max(1),
        }
    }

    /// Generates a key, suffixed with `$password` when a non-empty password
    /// is given.
    ///
    /// Uniqueness is checked against the bare token only.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Conflict`] if every candidate of every round was
    /// already taken.
    pub async fn generate(&self, password: Option<&str>) -> Result<ShortKey, AppError> {
        for round in 0..MAX_ROUNDS {
            // ThreadRng is not Send; draw everything before the first await.
            let candidates: Vec<String> = {
                let mut rng = rand::rng();
                (0..self.batch_size)
                    .map(|_| random_token(&mut rng))
                    .collect()
            };

            let lookups = join_all(candidates.iter().map(|c| self.cache.get(c))).await;

            if let Some((token, _)) = candidates
                .into_iter()
                .zip(lookups)
                .find(|(_, existing)| existing.is_none())
            {
                return Ok(ShortKey::new(token, password));
            }

            debug!("All {} candidates taken in round {}", self.batch_size, round);
        }

        Err(AppError::conflict(
            "Failed to generate a unique key",
            json!({ "reason": "Too many collisions", "rounds": MAX_ROUNDS }),
        ))
    }
}
