//! Selection stage: per-class sampling without replacement.
//!
//! The policy is greedy, order-dependent and independent per class: each
//! class draws `min(target, available)` images uniformly from its own
//! candidate pool, and the draws union into one selected set. Earlier
//! classes' selections are never revisited, and a class's realized coverage
//! in the final set can exceed its nominal target when other classes' draws
//! happen to include it. This matches the statistical behavior of the
//! balancing workflow this tool replaces and must not be "improved" into a
//! joint optimization.

use std::collections::BTreeSet;

use rand::seq::SliceRandom;
use rand::{rngs::StdRng, RngExt, SeedableRng};
use serde::Serialize;

use crate::catalog::ImageCatalog;
use crate::config::SamplingTargets;

/// Per-class draw summary.
#[derive(Clone, Debug, Serialize)]
pub struct ClassDraw {
    /// The class name from the targets configuration.
    pub class: String,
    /// Images in the catalog containing this class.
    pub available: usize,
    /// Images drawn for this class.
    pub drawn: usize,
}

/// The result of the selection stage.
#[derive(Clone, Debug, Serialize)]
pub struct SelectionOutcome {
    /// Unique image stems chosen across all class passes.
    pub selected: BTreeSet<String>,
    /// The seed the draws were made with. Recording it makes every run
    /// reproducible from its own report.
    pub seed: u64,
    /// One row per targets entry, in targets order.
    pub draws: Vec<ClassDraw>,
}

/// Select a balanced subset of the catalog according to the targets.
///
/// When `seed` is `None`, an entropy seed is drawn once and recorded in the
/// outcome. Given the same catalog, targets and seed, the selected set is
/// identical across runs.
pub fn select_balanced(
    catalog: &ImageCatalog,
    targets: &SamplingTargets,
    seed: Option<u64>,
) -> SelectionOutcome {
    let seed = seed.unwrap_or_else(|| rand::rng().random());
    let mut rng = StdRng::seed_from_u64(seed);

    let mut selected: BTreeSet<String> = BTreeSet::new();
    let mut draws = Vec::with_capacity(targets.len());

    for (class, target) in targets.iter() {
        // BTreeMap iteration keeps the candidate order deterministic, so the
        // shuffle below is the only source of randomness.
        let mut candidates: Vec<&String> = catalog
            .iter()
            .filter(|(_, classes)| classes.contains(class))
            .map(|(stem, _)| stem)
            .collect();

        let available = candidates.len();
        let drawn = if target == 0 {
            0
        } else if target >= available {
            // Take every candidate; asking the sampler for more than exists
            // is the classic failure mode this guards against.
            available
        } else {
            candidates.shuffle(&mut rng);
            target
        };

        for stem in candidates.into_iter().take(drawn) {
            selected.insert(stem.clone());
        }

        draws.push(ClassDraw {
            class: class.to_string(),
            available,
            drawn,
        });
    }

    SelectionOutcome {
        selected,
        seed,
        draws,
    }
}
