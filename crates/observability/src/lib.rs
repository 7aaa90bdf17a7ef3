//! Process-wide tracing setup shared by warden binaries.

/// Initialize tracing for the process.
///
/// This is safe to call multiple times; subsequent calls become no-ops.
pub fn init() {
    tracing::init(tracing::Format::Json);
}

/// Initialize tracing with human-readable output (for interactive tools).
pub fn init_compact() {
    tracing::init(tracing::Format::Compact);
}

/// Tracing configuration (filters, layers).
pub mod tracing;
