use std::io;

use tracing::Level;

/// Verbosity flag count (`-v`, `-vv`, ...) to a maximum log level.
pub fn level_for_verbosity(verbosity: u8) -> Level {
    match verbosity {
        0 => Level::WARN,
        1 => Level::INFO,
        2 => Level::DEBUG,
        _ => Level::TRACE,
    }
}

/// Initialize a compact tracing subscriber writing to stderr, leaving stdout
/// for command output. Safe to call multiple times; subsequent calls are
/// no-ops for the global subscriber.
pub fn init_default(max_level: Level) {
    let _ = tracing_subscriber::fmt()
        .with_max_level(max_level)
        .with_writer(io::stderr)
        .with_target(false)
        .with_thread_names(false)
        .compact()
        .try_init();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn verbosity_maps_to_levels() {
        assert_eq!(level_for_verbosity(0), Level::WARN);
        assert_eq!(level_for_verbosity(2), Level::DEBUG);
        assert_eq!(level_for_verbosity(9), Level::TRACE);
    }

    #[test]
    fn init_twice_is_harmless() {
        init_default(Level::DEBUG);
        init_default(Level::TRACE);
    }
}
