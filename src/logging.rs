//! Logging initialisation.

use tracing_subscriber::EnvFilter;

/// Directives used when `RUST_LOG` is unset.
pub const DEFAULT_FILTER: &str = "eclstub=info,ecl_library=info,ecl_metadata=info";

/// Directives used when `RUST_LOG` is unset and verbose output is requested.
pub const VERBOSE_FILTER: &str = "eclstub=debug,ecl_library=debug,ecl_metadata=debug,ecl_core=debug";

/// Install a global fmt subscriber.
///
/// `RUST_LOG` takes precedence over the built-in directives. Installing a
/// second subscriber is a no-op, so hosts that already configured tracing
/// are left alone.
pub fn init(verbose: bool) {
    let env_filter = std::env::var("RUST_LOG").unwrap_or_else(|_| {
        if verbose {
            VERBOSE_FILTER.to_string()
        } else {
            DEFAULT_FILTER.to_string()
        }
    });

    let filter = EnvFilter::try_new(&env_filter).unwrap_or_else(|e| {
        eprintln!("Invalid log filter '{env_filter}': {e}; falling back to defaults");
        EnvFilter::new(DEFAULT_FILTER)
    });

    let _ = tracing_subscriber::fmt().with_env_filter(filter).try_init();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_filters_parse() {
        assert!(EnvFilter::try_new(DEFAULT_FILTER).is_ok());
        assert!(EnvFilter::try_new(VERBOSE_FILTER).is_ok());
    }

    #[test]
    fn init_twice_is_harmless() {
        init(false);
        init(true);
        tracing::debug!("logging initialised");
    }
}
