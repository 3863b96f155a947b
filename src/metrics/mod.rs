// Metrics module - Prometheus-compatible metrics tracking
// Provides counters for requests, generated mockups, skips, and store uploads

use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Mutex;

/// Metrics struct tracks service counters for Prometheus export
/// Thread-safe via atomic operations and mutexes
pub struct Metrics {
    // Request counters
    request_count: AtomicU64,

    // Status code counters (e.g., 200, 400, 500)
    status_counts: Mutex<HashMap<u16, u64>>,

    // Mockup pipeline counters
    mockups_generated: AtomicU64,
    products_skipped: Mutex<HashMap<&'static str, u64>>,

    // Store upload counters
    store_uploads: AtomicU64,
    store_failures: AtomicU64,

    // Batch duration tracking (microseconds)
    batch_count: AtomicU64,
    batch_duration_us_sum: AtomicU64,
}

impl Metrics {
    pub fn new() -> Self {
        Self {
            request_count: AtomicU64::new(0),
            status_counts: Mutex::new(HashMap::new()),
            mockups_generated: AtomicU64::new(0),
            products_skipped: Mutex::new(HashMap::new()),
            store_uploads: AtomicU64::new(0),
            store_failures: AtomicU64::new(0),
            batch_count: AtomicU64::new(0),
            batch_duration_us_sum: AtomicU64::new(0),
        }
    }

    /// Record an HTTP request and its response status
    pub fn record_request(&self, status: u16) {
        self.request_count.fetch_add(1, Ordering::Relaxed);
        if let Ok(mut counts) = self.status_counts.lock() {
            *counts.entry(status).or_insert(0) += 1;
        }
    }

    /// Record successfully generated mockups
    pub fn record_mockups(&self, count: u64) {
        self.mockups_generated.fetch_add(count, Ordering::Relaxed);
    }

    /// Record a skipped product by reason label
    pub fn record_skip(&self, reason: &'static str) {
        if let Ok(mut counts) = self.products_skipped.lock() {
            *counts.entry(reason).or_insert(0) += 1;
        }
    }

    /// Record a successful store upload
    pub fn record_store_upload(&self) {
        self.store_uploads.fetch_add(1, Ordering::Relaxed);
    }

    /// Record a failed store upload
    pub fn record_store_failure(&self) {
        self.store_failures.fetch_add(1, Ordering::Relaxed);
    }

    /// Record the duration of one batch in microseconds
    pub fn record_batch_duration(&self, micros: u64) {
        self.batch_count.fetch_add(1, Ordering::Relaxed);
        self.batch_duration_us_sum.fetch_add(micros, Ordering::Relaxed);
    }

    pub fn request_count(&self) -> u64 {
        self.request_count.load(Ordering::Relaxed)
    }

    pub fn mockups_generated(&self) -> u64 {
        self.mockups_generated.load(Ordering::Relaxed)
    }

    pub fn store_uploads(&self) -> u64 {
        self.store_uploads.load(Ordering::Relaxed)
    }

    pub fn store_failures(&self) -> u64 {
        self.store_failures.load(Ordering::Relaxed)
    }

    pub fn skip_count(&self, reason: &str) -> u64 {
        self.products_skipped
            .lock()
            .ok()
            .and_then(|counts| counts.get(reason).copied())
            .unwrap_or(0)
    }

    /// Export metrics in Prometheus text format
    /// Returns metrics as text/plain content for /metrics endpoint
    pub fn export_prometheus(&self) -> String {
        let mut output = String::new();

        // Request metrics
        output.push_str("# HELP http_requests_total Total number of HTTP requests received\n");
        output.push_str("# TYPE http_requests_total counter\n");
        output.push_str(&format!(
            "http_requests_total {}\n",
            self.request_count.load(Ordering::Relaxed)
        ));

        // Status code metrics
        output.push_str("\n# HELP http_requests_by_status_total HTTP requests by status code\n");
        output.push_str("# TYPE http_requests_by_status_total counter\n");
        if let Ok(counts) = self.status_counts.lock() {
            for (status, count) in counts.iter() {
                output.push_str(&format!(
                    "http_requests_by_status_total{{status=\"{}\"}} {}\n",
                    status, count
                ));
            }
        }

        // Mockup pipeline metrics
        output.push_str("\n# HELP mockups_generated_total Composites successfully generated\n");
        output.push_str("# TYPE mockups_generated_total counter\n");
        output.push_str(&format!(
            "mockups_generated_total {}\n",
            self.mockups_generated.load(Ordering::Relaxed)
        ));

        output.push_str("\n# HELP products_skipped_total Products skipped during batches, by reason\n");
        output.push_str("# TYPE products_skipped_total counter\n");
        if let Ok(counts) = self.products_skipped.lock() {
            for (reason, count) in counts.iter() {
                output.push_str(&format!(
                    "products_skipped_total{{reason=\"{}\"}} {}\n",
                    reason, count
                ));
            }
        }

        // Store metrics
        output.push_str("\n# HELP store_uploads_total Successful image store uploads\n");
        output.push_str("# TYPE store_uploads_total counter\n");
        output.push_str(&format!(
            "store_uploads_total {}\n",
            self.store_uploads.load(Ordering::Relaxed)
        ));

        output.push_str("\n# HELP store_upload_failures_total Failed image store uploads\n");
        output.push_str("# TYPE store_upload_failures_total counter\n");
        output.push_str(&format!(
            "store_upload_failures_total {}\n",
            self.store_failures.load(Ordering::Relaxed)
        ));

        // Batch duration metrics
        output.push_str("\n# HELP mockup_batches_total Mockup batches processed\n");
        output.push_str("# TYPE mockup_batches_total counter\n");
        output.push_str(&format!(
            "mockup_batches_total {}\n",
            self.batch_count.load(Ordering::Relaxed)
        ));

        output.push_str(
            "\n# HELP mockup_batch_duration_microseconds_sum Cumulative batch processing time\n",
        );
        output.push_str("# TYPE mockup_batch_duration_microseconds_sum counter\n");
        output.push_str(&format!(
            "mockup_batch_duration_microseconds_sum {}\n",
            self.batch_duration_us_sum.load(Ordering::Relaxed)
        ));

        output
    }
}

impl Default for Metrics {
    fn default() -> Self {
        Self::new()
    }
}
