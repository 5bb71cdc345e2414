//! Compare Disciplines Example
//!
//! A 5Mbps video call shares a 10Mbps link with a greedy download that is
//! active from 5s to 25s. The same packets are replayed through FIFO, strict
//! priority and weighted round robin (7:3), and the video latency during the
//! congested period is printed for each.
//!
//! Run with `RUST_LOG=debug` to see per-run summaries.

use linkqos::network::FlowType;
use linkqos::time::Time;
use linkqos::{ConfigError, Experiment, SimulationConfig};

fn main() -> Result<(), ConfigError> {
    env_logger::init();

    let config = SimulationConfig::reference()?;
    let link = config.link_bandwidth;
    let experiment = Experiment::new(config)?;

    println!(
        "Replaying {} packets over a {link} link",
        experiment.get_stream().len()
    );

    let congestion = (Time::from_seconds(5), Time::from_seconds(25));

    for outcome in experiment.run_parallel()? {
        let stats = outcome.statistics();
        let (from, until) = congestion;

        let mean = stats.mean_latency_between(&FlowType::VIDEO, from, until);
        let worst = stats.max_latency_between(&FlowType::VIDEO, from, until);
        let jitter = stats.mean_jitter(&FlowType::VIDEO);
        let download = stats.link_share_between(&FlowType::DOWNLOAD, from, until, link);

        println!("--- {} ---", outcome.summary.discipline);
        if let (Some(mean), Some(worst), Some(jitter)) = (mean, worst, jitter) {
            println!("Video latency: mean {mean}, worst {worst}, jitter {jitter}");
        }
        println!("Download share of the link: {:.1}%", download * 100.0);
    }

    Ok(())
}
