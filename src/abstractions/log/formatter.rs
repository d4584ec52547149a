use std::fmt::Debug;

use tracing::field::{Field, Visit};
use tracing_subscriber::{
  field::RecordFields,
  fmt::{
    format::Writer,
    FormatFields
  }
};

/// Field names that steer the logger itself and are never printed verbatim.
const THRESHOLD_FIELD: &str = "threshold";
const CRITICAL_FIELD : &str = "critical";
const MESSAGE_FIELD  : &str = "message";

/// Prints the message of an event, prefixed by `[CRITICAL]` for contract violations, followed by any extra fields as
/// `name=value` pairs. The threshold is consumed by `ThresholdFilterLayer` and is suppressed here.
pub(crate) struct CustomFieldFormatter;

impl<'writer> FormatFields<'writer> for CustomFieldFormatter {
  fn format_fields<R: RecordFields>(
    &self,
    writer: Writer<'writer>,
    fields: R,
  ) -> std::fmt::Result {
    let mut visitor = FieldFilterVisitor { writer, result: Ok(()) };
    fields.record(&mut visitor);
    visitor.result
  }
}

struct FieldFilterVisitor<'writer> {
  writer: Writer<'writer>,
  result: std::fmt::Result,
}

impl<'writer> FieldFilterVisitor<'writer> {
  fn write_pair(&mut self, name: &str, value: &dyn Debug) {
    if self.result.is_ok() {
      self.result = write!(self.writer, "{}={:?} ", name, value);
    }
  }
}

impl<'writer> Visit for FieldFilterVisitor<'writer> {
  fn record_i64(&mut self, field: &Field, value: i64) {
    if field.name() != THRESHOLD_FIELD {
      self.write_pair(field.name(), &value);
    }
  }

  fn record_u64(&mut self, field: &Field, value: u64) {
    if field.name() != THRESHOLD_FIELD {
      self.write_pair(field.name(), &value);
    }
  }

  fn record_bool(&mut self, field: &Field, value: bool) {
    match field.name() {
      CRITICAL_FIELD if value => {
        if self.result.is_ok() {
          self.result = write!(self.writer, "[CRITICAL] ");
        }
      }
      CRITICAL_FIELD => {}
      name => self.write_pair(name, &value),
    }
  }

  fn record_debug(&mut self, field: &Field, value: &dyn Debug) {
    match field.name() {

      MESSAGE_FIELD => {
        if self.result.is_ok() {
          self.result = write!(self.writer, "{:?}", value);
        }
      }

      THRESHOLD_FIELD | CRITICAL_FIELD => {
        // Do not print.
      }

      name => self.write_pair(name, value),

    }
  }
}
