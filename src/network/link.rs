use std::collections::HashSet;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::discipline::{Discipline, QueueDiscipline};
use crate::error::ConfigError;
use crate::flow::AdmissionStream;
use crate::network::{get_size_delay, Bandwidth, FlowType, Packet};
use crate::time::{Duration, Time, START_TIME};

/// Emitted once for every packet that left the link
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, PartialEq)]
pub struct CompletionRecord {
    pub packet_id: String,
    pub flow_type: FlowType,
    pub size_bytes: u64,
    pub arrival: Time,
    pub finish: Time,
}

impl CompletionRecord {
    fn new(packet: Packet, finish: Time) -> Self {
        Self {
            arrival: packet.get_arrival(),
            size_bytes: packet.get_size(),
            flow_type: packet.get_flow_type().clone(),
            packet_id: packet.get_id().to_string(),
            finish,
        }
    }

    /// Time spent queued plus time spent on the wire
    pub fn latency(&self) -> Duration {
        self.finish - self.arrival
    }
}

/// Receives the output of a simulation run
///
/// Filtering by flow type is up to the sink, the link reports every packet.
pub trait CompletionSink {
    fn packet_completed(&mut self, record: CompletionRecord);

    /// Nothing was buffered, so the link skipped ahead to the next arrival
    fn link_idle(&mut self, _from: Time, _until: Time) {}
}

impl CompletionSink for Vec<CompletionRecord> {
    fn packet_completed(&mut self, record: CompletionRecord) {
        self.push(record);
    }
}

/// Bookkeeping of a single run
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, PartialEq)]
pub struct RunSummary {
    pub discipline: String,
    pub packets_sent: usize,
    pub time_jumps: usize,
    pub peak_backlog: usize,
    pub busy_time: Duration,
    pub final_time: Time,
}

impl std::fmt::Display for RunSummary {
    fn fmt(&self, fmt: &mut std::fmt::Formatter<'_>) -> Result<(), std::fmt::Error> {
        write!(
            fmt,
            "{}: sent {} packets, link busy for {}, {} idle periods, peak backlog {}, done at {}",
            self.discipline,
            self.packets_sent,
            self.busy_time,
            self.time_jumps,
            self.peak_backlog,
            self.final_time
        )
    }
}

/// The discrete event engine driving one discipline over one packet sequence
///
/// Packets only become visible to the discipline once the link is free at or
/// after their arrival. If nothing is buffered, the clock jumps straight to
/// the next arrival instead of stepping through idle time.
pub struct LinkSimulator<D: Discipline = QueueDiscipline> {
    bandwidth: Bandwidth,
    discipline: D,

    /// The simulated clock, only moves forward
    link_free_at: Time,
    /// Index of the next packet to admit
    cursor: usize,
    last_admission: Time,
    /// Ids of packets admitted but not yet selected
    buffered: HashSet<String>,
}

impl<D: Discipline> LinkSimulator<D> {
    pub fn new(bandwidth: Bandwidth, discipline: D) -> Result<Self, ConfigError> {
        if bandwidth.is_zero() {
            return Err(ConfigError::NonPositiveBandwidth);
        }

        if !discipline.is_empty() {
            return Err(ConfigError::DisciplineNotEmpty(discipline.len()));
        }

        Ok(Self {
            bandwidth,
            discipline,
            link_free_at: START_TIME,
            cursor: 0,
            last_admission: START_TIME,
            buffered: HashSet::new(),
        })
    }

    pub fn get_bandwidth(&self) -> Bandwidth {
        self.bandwidth
    }

    /// Run until every packet of the stream has left the link
    pub fn run(mut self, stream: &AdmissionStream, sink: &mut dyn CompletionSink) -> RunSummary {
        let packets = stream.as_slice();
        let mut summary = RunSummary {
            discipline: self.discipline.name().to_string(),
            packets_sent: 0,
            time_jumps: 0,
            peak_backlog: 0,
            busy_time: Duration::ZERO,
            final_time: START_TIME,
        };

        log::debug!(
            "Starting {} run over {} packets at {}",
            summary.discipline,
            packets.len(),
            self.bandwidth
        );

        loop {
            self.admit_arrived(packets);
            summary.peak_backlog = summary.peak_backlog.max(self.buffered.len());

            if let Some(packet) = self.discipline.select_next() {
                self.check_selected(&packet);

                let start = packet.get_arrival().max(self.link_free_at);
                let transmit = get_size_delay(packet.get_size(), self.bandwidth);
                let finish = start + transmit;

                log::trace!("Sending {packet} from {start} until {finish}");

                self.link_free_at = finish;
                summary.busy_time += transmit;
                summary.packets_sent += 1;
                sink.packet_completed(CompletionRecord::new(packet, finish));
            } else if let Some(next) = packets.get(self.cursor) {
                let until = next.get_arrival();
                assert!(until > self.link_free_at, "Invalid state");

                log::trace!("Link idle from {} until {until}", self.link_free_at);

                sink.link_idle(self.link_free_at, until);
                self.link_free_at = until;
                summary.time_jumps += 1;
            } else {
                break;
            }
        }

        assert!(
            self.buffered.is_empty(),
            "Discipline lost {} packets",
            self.buffered.len()
        );

        summary.final_time = self.link_free_at;
        log::debug!("{summary}");

        summary
    }

    /// Hand every packet that has arrived by now to the discipline
    fn admit_arrived(&mut self, packets: &[Packet]) {
        while let Some(packet) = packets.get(self.cursor) {
            let arrival = packet.get_arrival();
            if arrival > self.link_free_at {
                break;
            }

            assert!(
                arrival >= self.last_admission,
                "Packet {} admitted out of arrival order",
                packet.get_id()
            );

            self.last_admission = arrival;
            self.cursor += 1;
            self.buffered.insert(packet.get_id().to_string());
            self.discipline.admit(packet.clone());
        }
    }

    /// Every admitted packet must be selected exactly once
    fn check_selected(&mut self, packet: &Packet) {
        assert!(
            self.buffered.remove(packet.get_id()),
            "Discipline returned packet {} that was never admitted or already sent",
            packet.get_id()
        );

        assert_eq!(
            self.buffered.len(),
            self.discipline.len(),
            "Discipline length disagrees with admitted packets"
        );
    }
}
