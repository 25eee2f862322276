//! Product catalogue metrics.

use metrics::{counter, histogram};
use std::time::Duration;

/// Product metrics recorder
pub struct ProductMetrics;

impl ProductMetrics {
    /// Record one finished service operation.
    ///
    /// `outcome` is `"ok"`, `"not_found"` or `"error"`.
    pub fn record_operation(operation: &'static str, outcome: &'static str, elapsed: Duration) {
        counter!(
            "product_operations_total",
            "operation" => operation,
            "outcome" => outcome
        )
        .increment(1);
        histogram!("product_operation_duration_seconds", "operation" => operation)
            .record(elapsed.as_secs_f64());

        if outcome == "not_found" {
            counter!("product_not_found_total", "operation" => operation).increment(1);
        }

        tracing::debug!(
            operation,
            outcome,
            duration_ms = elapsed.as_millis() as u64,
            "Product operation finished"
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use metrics_exporter_prometheus::PrometheusBuilder;

    #[test]
    fn test_record_operation_counts_not_found() {
        let recorder = PrometheusBuilder::new().build_recorder();
        let handle = recorder.handle();

        metrics::with_local_recorder(&recorder, || {
            ProductMetrics::record_operation("get", "ok", Duration::from_millis(3));
            ProductMetrics::record_operation("get", "not_found", Duration::from_millis(1));
        });

        let rendered = handle.render();
        assert!(rendered.contains(r#"product_operations_total{operation="get",outcome="ok"} 1"#));
        assert!(rendered.contains(r#"product_not_found_total{operation="get"} 1"#));
        assert!(rendered.contains("product_operation_duration_seconds"));
    }
}
