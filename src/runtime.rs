use parking_lot::Mutex;
use rand::rngs::StdRng;
use rand::SeedableRng;

use crate::config::SimulationConfig;
use crate::discipline::DisciplineConfig;
use crate::error::ConfigError;
use crate::flow::AdmissionStream;
use crate::network::{CompletionRecord, CompletionSink, LinkSimulator, RunSummary};
use crate::stats::Statistics;

/// Result of running one discipline
#[derive(Debug, Clone)]
pub struct Outcome {
    pub summary: RunSummary,
    pub records: Vec<CompletionRecord>,
}

impl Outcome {
    /// Aggregate the records of this run
    pub fn statistics(&self) -> Statistics {
        let mut stats = Statistics::new();
        for record in self.records.iter() {
            stats.packet_completed(record.clone());
        }
        stats
    }
}

/// Compares disciplines over one set of pre-generated packets
///
/// Packets are generated once, so every discipline sees the exact same input.
pub struct Experiment {
    config: SimulationConfig,
    stream: AdmissionStream,
}

impl Experiment {
    pub fn new(config: SimulationConfig) -> Result<Self, ConfigError> {
        config.validate()?;

        let mut rng = StdRng::seed_from_u64(config.seed);
        let stream = AdmissionStream::generate(&config.flows, config.duration, &mut rng)?;

        log::info!(
            "Generated {} packets from {} flows",
            stream.len(),
            config.flows.len()
        );

        Ok(Self { config, stream })
    }

    pub fn get_config(&self) -> &SimulationConfig {
        &self.config
    }

    pub fn get_stream(&self) -> &AdmissionStream {
        &self.stream
    }

    /// Run a fresh instance of the given discipline
    pub fn run_discipline(&self, discipline: &DisciplineConfig) -> Result<Outcome, ConfigError> {
        let simulator = LinkSimulator::new(self.config.link_bandwidth, discipline.build()?)?;

        let mut records = Vec::with_capacity(self.stream.len());
        let summary = simulator.run(&self.stream, &mut records);

        log::info!("{summary}");
        Ok(Outcome { summary, records })
    }

    /// Run all configured disciplines one after another
    pub fn run(&self) -> Result<Vec<Outcome>, ConfigError> {
        self.config
            .disciplines
            .iter()
            .map(|discipline| self.run_discipline(discipline))
            .collect()
    }

    /// Same as [`Self::run`], but every discipline runs on its own thread
    ///
    /// Runs share no mutable state, so the outcomes are identical.
    pub fn run_parallel(&self) -> Result<Vec<Outcome>, ConfigError> {
        let results = Mutex::new(Vec::with_capacity(self.config.disciplines.len()));

        std::thread::scope(|scope| {
            for (idx, discipline) in self.config.disciplines.iter().enumerate() {
                let results = &results;
                scope.spawn(move || {
                    let outcome = self.run_discipline(discipline);
                    results.lock().push((idx, outcome));
                });
            }
        });

        let mut results = results.into_inner();
        results.sort_by_key(|(idx, _)| *idx);
        results.into_iter().map(|(_, outcome)| outcome).collect()
    }
}
