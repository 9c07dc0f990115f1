//! Subscriber setup with a filter that can be switched at runtime.
//!
//! [`init`] installs a `tracing-subscriber` registry with an `EnvFilter`
//! (honouring `RUST_LOG`) behind a `reload` layer, plus the `fmt` layer.
//! The returned [`LogHandle`] flips the filter between `debug` and `info`
//! for the `set-debug-logging` command.

use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::{SubscriberInitExt, TryInitError};
use tracing_subscriber::{fmt, reload, EnvFilter, Registry};

/// Failures setting up or changing the log filter.
#[derive(Debug, thiserror::Error)]
pub enum LoggingError {
    /// A global subscriber is already installed.
    #[error("failed to install subscriber: {0}")]
    Init(#[from] TryInitError),

    /// The subscriber behind a handle is gone.
    #[error("failed to reload log filter: {0}")]
    Reload(#[from] reload::Error),
}

/// The filter layer type [`init`] installs.
pub type FilterLayer = reload::Layer<EnvFilter, Registry>;

/// Changes the active log filter after [`init`].
#[derive(Clone)]
pub struct LogHandle {
    handle: reload::Handle<EnvFilter, Registry>,
}

impl std::fmt::Debug for LogHandle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LogHandle")
            .field("filter", &self.current_filter())
            .finish()
    }
}

impl LogHandle {
    /// `true` selects `debug`, `false` selects `info`.
    pub fn set_debug(&self, enabled: bool) -> Result<(), LoggingError> {
        let directive = if enabled { "debug" } else { "info" };
        self.handle.reload(EnvFilter::new(directive))?;
        tracing::info!(directive, "log filter changed");
        Ok(())
    }

    /// The active filter as text, `None` once the subscriber is dropped.
    pub fn current_filter(&self) -> Option<String> {
        self.handle.with_current(|filter| filter.to_string()).ok()
    }
}

/// Builds the reloadable filter layer without installing anything.
///
/// `RUST_LOG` wins over `default_directive` when set.
pub fn filter_layer(default_directive: &str) -> (FilterLayer, LogHandle) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_directive));
    let (layer, handle) = reload::Layer::new(filter);
    (layer, LogHandle { handle })
}

/// Installs the global subscriber.
///
/// # Errors
/// Returns [`LoggingError::Init`] if a global subscriber already exists.
/// Calling this twice is safe; the second call just fails.
pub fn init(default_directive: &str) -> Result<LogHandle, LoggingError> {
    let (layer, handle) = filter_layer(default_directive);
    tracing_subscriber::registry()
        .with(layer)
        .with(fmt::layer())
        .try_init()?;
    Ok(handle)
}
