//! Aggregates completion records into latency and throughput figures

use std::collections::BTreeMap;

use crate::network::{Bandwidth, CompletionRecord, CompletionSink, FlowType};
use crate::time::{Duration, Time};

#[derive(Debug, Clone, Copy)]
struct Sample {
    arrival: Time,
    finish: Time,
    size_bytes: u64,
}

impl Sample {
    fn latency(&self) -> Duration {
        self.finish - self.arrival
    }
}

/// A sink that keeps per flow type samples
#[derive(Debug, Default, Clone)]
pub struct Statistics {
    samples: BTreeMap<FlowType, Vec<Sample>>,
    idle_time: Duration,
}

impl Statistics {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn count(&self, flow_type: &FlowType) -> usize {
        self.samples.get(flow_type).map_or(0, |s| s.len())
    }

    /// (arrival, latency) of every packet of the given type, in completion order
    pub fn latencies<'a>(
        &'a self,
        flow_type: &FlowType,
    ) -> impl Iterator<Item = (Time, Duration)> + 'a {
        self.get(flow_type)
            .iter()
            .map(|sample| (sample.arrival, sample.latency()))
    }

    pub fn mean_latency(&self, flow_type: &FlowType) -> Option<Duration> {
        mean(self.get(flow_type).iter().map(|s| s.latency()))
    }

    /// Mean latency of packets arriving in `[from, until)`
    pub fn mean_latency_between(
        &self,
        flow_type: &FlowType,
        from: Time,
        until: Time,
    ) -> Option<Duration> {
        mean(
            self.arrived_between(flow_type, from, until)
                .map(|s| s.latency()),
        )
    }

    /// Worst latency of packets arriving in `[from, until)`
    pub fn max_latency_between(
        &self,
        flow_type: &FlowType,
        from: Time,
        until: Time,
    ) -> Option<Duration> {
        self.arrived_between(flow_type, from, until)
            .map(|s| s.latency())
            .fold(None, |max, latency| match max {
                Some(max) if max >= latency => Some(max),
                _ => Some(latency),
            })
    }

    /// Mean absolute latency change between consecutive packets
    pub fn mean_jitter(&self, flow_type: &FlowType) -> Option<Duration> {
        let samples = self.get(flow_type);
        mean(samples.windows(2).map(|pair| {
            let delta = pair[1].latency().as_seconds_f64() - pair[0].latency().as_seconds_f64();
            Duration::from_seconds_f64(delta.abs())
        }))
    }

    /// Bytes of the given type that left the link during `[from, until)`
    pub fn delivered_bytes_between(&self, flow_type: &FlowType, from: Time, until: Time) -> u64 {
        self.get(flow_type)
            .iter()
            .filter(|s| s.finish >= from && s.finish < until)
            .map(|s| s.size_bytes)
            .sum()
    }

    /// Fraction of the link capacity used by the given type during `[from, until)`
    pub fn link_share_between(
        &self,
        flow_type: &FlowType,
        from: Time,
        until: Time,
        link: Bandwidth,
    ) -> f64 {
        let span = (until - from).as_seconds_f64();
        if span <= 0.0 {
            return 0.0;
        }

        let bytes = self.delivered_bytes_between(flow_type, from, until) as f64;
        bytes / (link.bytes_per_second() * span)
    }

    /// Total time the link spent without anything to send
    pub fn idle_time(&self) -> Duration {
        self.idle_time
    }

    fn get(&self, flow_type: &FlowType) -> &[Sample] {
        self.samples
            .get(flow_type)
            .map(|s| s.as_slice())
            .unwrap_or(&[])
    }

    fn arrived_between<'a>(
        &'a self,
        flow_type: &FlowType,
        from: Time,
        until: Time,
    ) -> impl Iterator<Item = &'a Sample> + 'a {
        self.get(flow_type)
            .iter()
            .filter(move |s| s.arrival >= from && s.arrival < until)
    }
}

impl CompletionSink for Statistics {
    fn packet_completed(&mut self, record: CompletionRecord) {
        let sample = Sample {
            arrival: record.arrival,
            finish: record.finish,
            size_bytes: record.size_bytes,
        };

        self.samples.entry(record.flow_type).or_default().push(sample);
    }

    fn link_idle(&mut self, from: Time, until: Time) {
        self.idle_time += until - from;
    }
}

fn mean(values: impl Iterator<Item = Duration>) -> Option<Duration> {
    let (count, total) = values.fold((0usize, 0.0), |(count, total), value| {
        (count + 1, total + value.as_seconds_f64())
    });

    if count == 0 {
        None
    } else {
        Some(Duration::from_seconds_f64(total / count as f64))
    }
}
