use std::fmt::Debug;
use tracing::{
  field::{Field, Visit},
  Event,
  Subscriber
};
use tracing_subscriber::{
  Layer,
  layer::Context,
  registry::LookupSpan
};

use super::get_global_logging_threshold;

/// A layer that only lets through events whose `threshold` field is at most the global logging threshold. Events
/// without a threshold are treated as threshold 0 and are always logged.
pub(crate) struct ThresholdFilterLayer;

impl<S> Layer<S> for ThresholdFilterLayer
where
    S: Subscriber + for<'lookup> LookupSpan<'lookup>,
{
  fn event_enabled(&self, event: &Event<'_>, _ctx: Context<'_, S>) -> bool {
    let mut visitor = ThresholdVisitor { threshold: None };
    event.record(&mut visitor);

    match visitor.threshold {
      Some(threshold) => threshold <= get_global_logging_threshold(),
      None            => true,
    }
  }
}

/// Extracts the threshold from an event. Out-of-range or non-numeric thresholds saturate to `u8::MAX`, so such an
/// event is only shown at maximum verbosity.
struct ThresholdVisitor {
  threshold: Option<u8>,
}

impl ThresholdVisitor {
  fn clamp(value: i128) -> u8 {
    value.clamp(0, u8::MAX as i128) as u8
  }
}

impl Visit for ThresholdVisitor {
  fn record_i64(&mut self, field: &Field, value: i64) {
    if field.name() == "threshold" {
      self.threshold = Some(Self::clamp(value as i128));
    }
  }

  fn record_u64(&mut self, field: &Field, value: u64) {
    if field.name() == "threshold" {
      self.threshold = Some(Self::clamp(value as i128));
    }
  }

  fn record_debug(&mut self, field: &Field, _value: &dyn Debug) {
    if field.name() == "threshold" {
      self.threshold = Some(u8::MAX);
    }
  }
}

#[cfg(test)]
mod tests {
  use super::ThresholdVisitor;

  #[test]
  fn thresholds_saturate() {
    assert_eq!(ThresholdVisitor::clamp(-3), 0);
    assert_eq!(ThresholdVisitor::clamp(7), 7);
    assert_eq!(ThresholdVisitor::clamp(1_000), u8::MAX);
  }
}
