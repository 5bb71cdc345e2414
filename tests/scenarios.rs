use rand::rngs::StdRng;
use rand::SeedableRng;

use linkqos::discipline::{Classifier, DisciplineConfig, QueueDiscipline};
use linkqos::flow::{AdmissionStream, ConstantBitRate, Flow};
use linkqos::network::{Bandwidth, CompletionRecord, FlowType, LinkSimulator};
use linkqos::time::{Duration, Time};
use linkqos::{Experiment, Outcome, SimulationConfig};

fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}

fn congestion() -> (Time, Time) {
    (Time::from_seconds(5), Time::from_seconds(25))
}

/// Steady state of the congested period, away from its edges
fn steady() -> (Time, Time) {
    (Time::from_seconds(6), Time::from_seconds(24))
}

fn reference_outcomes() -> (SimulationConfig, Vec<Outcome>) {
    let config = SimulationConfig::reference().unwrap();
    let outcomes = Experiment::new(config.clone()).unwrap().run().unwrap();
    (config, outcomes)
}

fn assert_causal(records: &[CompletionRecord]) {
    let mut previous = Time::from_seconds(0);

    for record in records {
        assert!(record.finish >= record.arrival.max(previous));
        previous = record.finish;
    }
}

#[test]
fn uncontended_video_has_no_queuing_delay() {
    init_logging();

    let video = ConstantBitRate::new(
        "video_1",
        FlowType::VIDEO,
        Bandwidth::from_megabits_per_second(5),
        1200,
    )
    .unwrap();
    let flows: Vec<Flow> = vec![video.into()];

    let stream = AdmissionStream::generate(
        &flows,
        Duration::from_seconds(1),
        &mut StdRng::seed_from_u64(0),
    )
    .unwrap();
    assert_eq!(521, stream.len());

    let mut records = vec![];
    let summary = LinkSimulator::new(Bandwidth::from_megabits_per_second(10), QueueDiscipline::fifo())
        .unwrap()
        .run(&stream, &mut records);

    assert_eq!(521, records.len());
    assert_eq!(1, summary.peak_backlog);
    assert_causal(&records);

    for record in records.iter() {
        let latency = record.latency().as_millis_f64();
        assert!((latency - 0.96).abs() < 1e-6, "latency was {latency}ms");
    }
}

#[test]
fn fifo_delays_video_during_congestion() {
    init_logging();

    let (config, outcomes) = reference_outcomes();
    assert!(matches!(config.disciplines[0], DisciplineConfig::Fifo));

    let stats = outcomes[0].statistics();
    let (from, until) = congestion();

    // Before the download starts, video only pays its transmission time
    let calm = stats
        .mean_latency_between(&FlowType::VIDEO, Time::from_seconds(0), from)
        .unwrap();
    assert!((calm.as_millis_f64() - 0.96).abs() < 1e-6);

    let worst = stats
        .max_latency_between(&FlowType::VIDEO, from, until)
        .unwrap();
    let mean = stats
        .mean_latency_between(&FlowType::VIDEO, from, until)
        .unwrap();
    assert!(worst.as_millis_f64() > 100.0, "worst was {worst}");
    assert!(mean.as_millis_f64() > 100.0, "mean was {mean}");
}

#[test]
fn priority_protects_video() {
    init_logging();

    let (config, outcomes) = reference_outcomes();
    let fifo = outcomes[0].statistics();
    let priority = outcomes[1].statistics();
    let (from, until) = congestion();

    let worst = priority
        .max_latency_between(&FlowType::VIDEO, from, until)
        .unwrap();
    assert!(worst.as_millis_f64() < 10.0, "worst was {worst}");

    // Best-effort only gets what video leaves over
    let (from, until) = steady();
    let download = priority.link_share_between(
        &FlowType::DOWNLOAD,
        from,
        until,
        config.link_bandwidth,
    );
    let fifo_download =
        fifo.link_share_between(&FlowType::DOWNLOAD, from, until, config.link_bandwidth);

    assert!(download > 0.4 && download < 0.6, "share was {download}");
    assert!(download < fifo_download);
}

#[test]
fn round_robin_protects_video_and_serves_download() {
    init_logging();

    let (config, outcomes) = reference_outcomes();
    assert_eq!("WRR", outcomes[2].summary.discipline);

    let stats = outcomes[2].statistics();
    let (from, until) = congestion();

    let worst = stats
        .max_latency_between(&FlowType::VIDEO, from, until)
        .unwrap();
    assert!(worst.as_millis_f64() < 10.0, "worst was {worst}");

    let (from, until) = steady();
    let download =
        stats.link_share_between(&FlowType::DOWNLOAD, from, until, config.link_bandwidth);
    assert!(download > 0.25, "share was {download}");

    // Video keeps its full rate
    let video = stats.link_share_between(&FlowType::VIDEO, from, until, config.link_bandwidth);
    assert!((video - 0.5).abs() < 0.01, "share was {video}");
}

#[test]
fn every_discipline_is_causal() {
    init_logging();

    let (_, outcomes) = reference_outcomes();
    for outcome in outcomes.iter() {
        assert_causal(&outcome.records);
    }
}

#[test]
fn runs_are_deterministic() {
    init_logging();

    let config = SimulationConfig::reference().unwrap();
    let experiment = Experiment::new(config.clone()).unwrap();

    let wrr = DisciplineConfig::WeightedRoundRobin {
        classifier: Classifier::default(),
        realtime_weight: 7,
        best_effort_weight: 3,
    };

    let first = experiment.run_discipline(&wrr).unwrap();
    let second = experiment.run_discipline(&wrr).unwrap();
    assert_eq!(first.records, second.records);

    // A second experiment with the same seed regenerates identical jitter
    let other = Experiment::new(config).unwrap();
    let third = other.run_discipline(&wrr).unwrap();
    assert_eq!(first.records, third.records);
}
