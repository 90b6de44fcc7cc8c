//! Random selection of the candidate cards offered in a draw.

use std::collections::HashSet;

use rand::Rng;
use rand::seq::SliceRandom;

use crate::catalog::CatalogItem;
use crate::error::{OracleError, OracleResult};

/// Pick `k` distinct items from `catalog` in random order.
///
/// The catalog is uniformly permuted and the first `k` items are returned,
/// so every item is equally likely to appear and to appear at any position.
/// Items repeating an earlier ID are ignored. Fails with
/// [`OracleError::InsufficientCatalog`] when fewer than `k` distinct items
/// exist.
pub fn draw<R: Rng + ?Sized>(
    catalog: &[CatalogItem],
    k: usize,
    rng: &mut R,
) -> OracleResult<Vec<CatalogItem>> {
    let mut seen = HashSet::with_capacity(catalog.len());
    let mut pool: Vec<CatalogItem> = catalog
        .iter()
        .filter(|item| seen.insert(item.id))
        .cloned()
        .collect();

    if pool.len() < k {
        return Err(OracleError::InsufficientCatalog {
            required: k,
            available: pool.len(),
        });
    }

    pool.shuffle(rng);
    pool.truncate(k);
    tracing::debug!(candidates = pool.len(), universe = seen.len(), "drew candidates");
    Ok(pool)
}
