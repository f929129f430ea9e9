//! Mock dataset generation.
//!
//! Produces people records with random names and metrics. Generation is
//! deterministic for a given seed, which keeps tests and demos reproducible.

use log::debug;
use rand::Rng;
use rand::SeedableRng;
use rand::rngs::StdRng;

use crate::model::Record;
use crate::model::Status;

const FIRST_NAMES: &[&str] = &[
    "Ada", "Alan", "Alice", "Amir", "Ana", "Ben", "Bruno", "Carla", "Chen", "Chloe", "Dana",
    "David", "Elena", "Emil", "Fatima", "Felix", "Grace", "Hana", "Hugo", "Ines", "Ivan",
    "Jonas", "Julia", "Kai", "Lara", "Leo", "Lina", "Marco", "Maya", "Nadia", "Noah", "Omar",
    "Priya", "Rosa", "Sam", "Sofia", "Tariq", "Vera", "Yuki", "Zoe",
];

const LAST_NAMES: &[&str] = &[
    "Abbott", "Baker", "Castro", "Dubois", "Eriksen", "Fischer", "Garcia", "Hansen", "Ito",
    "Jensen", "Kowalski", "Lopez", "Moreau", "Nakamura", "Novak", "Okafor", "Petrov", "Quinn",
    "Rossi", "Schmidt", "Silva", "Tanaka", "Usman", "Varga", "Weber", "Xu", "Yilmaz", "Zhang",
];

/// Shape and seed of a generated dataset.
///
/// # Example
///
/// ```
/// use datagrid_lib::dataset::{generate, DatasetConfig};
///
/// let rows = generate(&DatasetConfig::new(100).with_seed(7));
/// assert_eq!(rows.len(), 100);
/// ```
#[derive(Debug, Clone)]
pub struct DatasetConfig {
    /// Number of top-level rows.
    ///
    /// Default: 100 000
    pub rows: usize,

    /// Number of nested rows under each top-level row.
    ///
    /// Default: 0
    pub sub_rows: usize,

    /// RNG seed. `None` seeds from the operating system.
    pub seed: Option<u64>,
}

impl Default for DatasetConfig {
    fn default() -> Self {
        Self {
            rows: 100_000,
            sub_rows: 0,
            seed: None,
        }
    }
}

impl DatasetConfig {
    pub fn new(rows: usize) -> Self {
        Self {
            rows,
            ..Default::default()
        }
    }

    pub fn with_sub_rows(mut self, sub_rows: usize) -> Self {
        self.sub_rows = sub_rows;
        self
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }
}

/// Generates a dataset.
///
/// Ids are assigned sequentially from 1 in depth-first order, so nested rows
/// get ids too and every id is unique.
pub fn generate(config: &DatasetConfig) -> Vec<Record> {
    let mut rng = match config.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_os_rng(),
    };
    let mut next_id = 1u64;

    let rows: Vec<Record> = (0..config.rows)
        .map(|_| {
            let parent = person(&mut rng, &mut next_id);
            let children = (0..config.sub_rows)
                .map(|_| person(&mut rng, &mut next_id))
                .collect();
            parent.with_sub_rows(children)
        })
        .collect();

    debug!(
        "Generated {} rows ({} nested each, seed {:?})",
        rows.len(),
        config.sub_rows,
        config.seed
    );
    rows
}

fn person(rng: &mut StdRng, next_id: &mut u64) -> Record {
    let id = *next_id;
    *next_id += 1;

    let first_name = FIRST_NAMES[rng.random_range(0..FIRST_NAMES.len())];
    let last_name = LAST_NAMES[rng.random_range(0..LAST_NAMES.len())];
    let status = match rng.random_range(0..100) {
        67.. => Status::Relationship,
        34.. => Status::Complicated,
        _ => Status::Single,
    };

    Record::new(id, first_name, last_name)
        .with_age(rng.random_range(0..30))
        .with_visits(rng.random_range(0..100))
        .with_progress(rng.random_range(0..100))
        .with_status(status)
}
