/*!
 * Monitoring
 * Debug channel setup
 */

mod tracer;

pub use tracer::{default_filter, init_tracing, span_command};
