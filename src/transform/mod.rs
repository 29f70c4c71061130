//! Reference-system transformation
//!
//! Transform math stays external: every conversion is delegated to an
//! ordered list of [`TransformProvider`]s and the first one that succeeds
//! wins. The widget installs three providers: the host's own transform
//! utility when it offers one, the built-in EPSG definitions, and any
//! projection definitions registered through configuration.

pub mod providers;

pub use providers::HostTransformFn;

use crate::core::config::LogLevel;
use crate::core::geo::CoordinatePair;
use crate::macros::gated_log;
use crate::Result;
use log::Level;

/// A single transform capability
pub trait TransformProvider: Send + Sync {
    /// Short name used in log output
    fn name(&self) -> &str;

    /// Converts `pair` from the `from` system to the `to` system
    fn transform(&self, pair: CoordinatePair, from: &str, to: &str) -> Result<CoordinatePair>;
}

/// Ordered chain of transform capabilities.
///
/// Providers are tried in insertion order. A provider that errors or yields
/// non-finite output is logged at warn level and skipped; exhausting the
/// chain logs at error level and returns `None`. Callers must treat `None`
/// as an abort signal, never as a panic.
pub struct TransformChain {
    providers: Vec<Box<dyn TransformProvider>>,
    log_level: LogLevel,
}

impl TransformChain {
    pub fn new(log_level: LogLevel) -> Self {
        Self {
            providers: Vec::new(),
            log_level,
        }
    }

    pub fn with_provider(mut self, provider: impl TransformProvider + 'static) -> Self {
        self.providers.push(Box::new(provider));
        self
    }

    pub fn len(&self) -> usize {
        self.providers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.providers.is_empty()
    }

    /// Converts `pair` between systems through the first capable provider
    pub fn transform(&self, pair: CoordinatePair, from: &str, to: &str) -> Option<CoordinatePair> {
        for provider in &self.providers {
            match provider.transform(pair, from, to) {
                Ok(out) if out.is_finite() => {
                    gated_log!(
                        self.log_level,
                        Level::Trace,
                        "converted {from} -> {to} via {}",
                        provider.name()
                    );
                    return Some(out);
                }
                Ok(out) => {
                    gated_log!(
                        self.log_level,
                        Level::Warn,
                        "{} produced non-finite output for {from} -> {to}: ({}, {})",
                        provider.name(),
                        out.x,
                        out.y
                    );
                }
                Err(e) => {
                    gated_log!(
                        self.log_level,
                        Level::Warn,
                        "{} failed converting {from} -> {to}: {e}",
                        provider.name()
                    );
                }
            }
        }
        gated_log!(
            self.log_level,
            Level::Error,
            "no transform available from {from} to {to}"
        );
        None
    }
}
