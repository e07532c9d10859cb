//! Fakes shared by unit tests: a recording metrics backend and a scripted random source.

use crate::domain::{Metrics, RandomSource};
use std::collections::VecDeque;
use std::sync::Mutex;
use std::time::Instant;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MetricsEvent {
    Opened(String),
    Closed(String),
    Request {
        service: String,
        path: String,
        method: String,
        status: u16,
    },
}

/// Metrics backend that remembers every call in order.
#[derive(Default)]
pub struct RecordingMetrics {
    events: Mutex<Vec<MetricsEvent>>,
}

impl RecordingMetrics {
    pub fn events(&self) -> Vec<MetricsEvent> {
        self.events.lock().unwrap().clone()
    }

    /// Current gauge value for `service`.
    pub fn active(&self, service: &str) -> i64 {
        self.events().iter().fold(0, |acc, event| match event {
            MetricsEvent::Opened(s) if s == service => acc + 1,
            MetricsEvent::Closed(s) if s == service => acc - 1,
            _ => acc,
        })
    }

    /// Recorded statuses for requests to `path`, in completion order.
    pub fn request_statuses(&self, path: &str) -> Vec<u16> {
        self.events()
            .into_iter()
            .filter_map(|event| match event {
                MetricsEvent::Request { path: p, status, .. } if p == path => Some(status),
                _ => None,
            })
            .collect()
    }

    fn push(&self, event: MetricsEvent) {
        self.events.lock().unwrap().push(event);
    }
}

impl Metrics for RecordingMetrics {
    fn render(&self) -> String {
        format!("# recorded events: {}\n", self.events().len())
    }

    fn connection_opened(&self, service: &str) {
        self.push(MetricsEvent::Opened(service.to_string()));
    }

    fn connection_closed(&self, service: &str) {
        self.push(MetricsEvent::Closed(service.to_string()));
    }

    fn record_http_request(
        &self,
        _start: Instant,
        service: &str,
        path: &str,
        method: &str,
        status: u16,
    ) {
        self.push(MetricsEvent::Request {
            service: service.to_string(),
            path: path.to_string(),
            method: method.to_string(),
            status,
        });
    }
}

/// Random source replaying a fixed script; repeats the last value once exhausted.
pub struct FixedRandom {
    script: Mutex<VecDeque<u32>>,
    last: Mutex<u32>,
}

impl FixedRandom {
    pub fn new(values: impl IntoIterator<Item = u32>) -> Self {
        Self {
            script: Mutex::new(values.into_iter().collect()),
            last: Mutex::new(0),
        }
    }
}

impl RandomSource for FixedRandom {
    fn below(&self, upper: u32) -> u32 {
        let mut last = self.last.lock().unwrap();
        if let Some(next) = self.script.lock().unwrap().pop_front() {
            *last = next;
        }
        if upper == 0 {
            0
        } else {
            *last % upper
        }
    }
}
