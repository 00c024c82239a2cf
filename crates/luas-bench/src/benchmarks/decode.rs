// SPDX-License-Identifier: MIT OR Apache-2.0
//! Tagged vs columnar decode
//!
//! The core experiment: the same freshly-encoded message batch is decoded
//! once by the schema-specialized [`ColumnStore`] and once by the
//! general-purpose tag-driven reference codec. The store and its columns
//! are allocated at construction and reused across every run, keeping the
//! columnar path allocation-free.

use crate::definition::{BenchConfig, BenchReport, Benchmark, ImplementationRun, RunOptions};
use crate::sampler::time_pass;
use luas_codec::{ColumnStore, wire};
use luas_core::{Record, Result, stats};
use rand::Rng;

/// Messages per iteration when none are configured.
pub const DEFAULT_NUM_MESSAGES: usize = 10_000;
/// Arena byte budget for the columnar store.
pub const ARENA_BYTES: usize = 20 * 1024 * 1024;

/// The decode-strategy benchmark definition.
#[derive(Debug)]
pub struct DecodeBenchmark {
    store: ColumnStore,
}

impl DecodeBenchmark {
    /// Build the definition together with its 20 MiB columnar store.
    #[must_use]
    pub fn new() -> Self {
        Self {
            store: ColumnStore::new(ARENA_BYTES),
        }
    }

    fn resolve_num_messages(&self, config: BenchConfig) -> usize {
        match config {
            BenchConfig::Decode { num_messages }
                if num_messages > 0 && num_messages <= self.store.max_messages() =>
            {
                num_messages
            }
            BenchConfig::Default => DEFAULT_NUM_MESSAGES,
            other => {
                tracing::warn!(
                    config = ?other,
                    default = DEFAULT_NUM_MESSAGES,
                    "invalid decode config, using default"
                );
                DEFAULT_NUM_MESSAGES
            }
        }
    }
}

impl Default for DecodeBenchmark {
    fn default() -> Self {
        Self::new()
    }
}

impl Benchmark for DecodeBenchmark {
    fn id(&self) -> &'static str {
        "decode"
    }

    fn label(&self) -> &'static str {
        "Tagged vs Columnar Decode"
    }

    fn description(&self) -> &'static str {
        "Compares the general-purpose tag-driven decoder against the pre-allocated structure-of-arrays decoder."
    }

    fn default_config(&self) -> BenchConfig {
        BenchConfig::Decode {
            num_messages: DEFAULT_NUM_MESSAGES,
        }
    }

    fn run(&mut self, options: &RunOptions) -> Result<BenchReport> {
        let num_messages = self.resolve_num_messages(options.config);
        let iterations = options.effective_iterations();
        tracing::debug!(num_messages, iterations, "starting decode benchmark");

        let mut columnar_samples = Vec::with_capacity(iterations);
        let mut tagged_samples = Vec::with_capacity(iterations);
        let mut rng = rand::thread_rng();

        for _ in 0..iterations {
            // Fresh batch every iteration; both implementations then time
            // against this identical snapshot.
            let messages = generate_batch(num_messages, &mut rng);

            let (columnar_ms, columnar_count) =
                time_pass(|| self.store.decode_from_list(&messages).map(|b| b.count));
            let columnar_count = columnar_count?;
            debug_assert_eq!(columnar_count, num_messages);
            columnar_samples.push(columnar_ms);

            let (tagged_ms, tagged_records) = time_pass(|| wire::decode_batch(&messages));
            let tagged_records = tagged_records?;
            debug_assert_eq!(tagged_records.len(), num_messages);
            tagged_samples.push(tagged_ms);
        }

        Ok(BenchReport {
            implementations: vec![
                ImplementationRun {
                    name: "tagged",
                    label: "Tagged decode",
                    stats: stats::compute(&tagged_samples),
                },
                ImplementationRun {
                    name: "columnar",
                    label: "Columnar (DOD) decode",
                    stats: stats::compute(&columnar_samples),
                },
            ],
            items_processed: num_messages as u64,
        })
    }
}

/// Encode `num_messages` synthetic records as independently-allocated wire
/// messages. Ids are sequential; values are uniform in `[1, 100)`.
#[allow(clippy::cast_possible_truncation)]
fn generate_batch<R: Rng>(num_messages: usize, rng: &mut R) -> Vec<Vec<u8>> {
    (0..num_messages)
        .map(|i| {
            let record = Record::new(i as u32, rng.gen_range(1.0..100.0));
            wire::encode_record(&record).to_vec()
        })
        .collect()
}
