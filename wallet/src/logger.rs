//! Logger initialization.

use mona_config::Config;

/// Crates whose records are filtered at the configured level. Everything else is logged from
/// `Info` up.
const OWN_MODULES: [&str; 4] = [
    "mona_wallet",
    "mona_storage",
    "mona_data_structures",
    "mona_config",
];

/// Install a global `env_logger` logger for the level in `config`.
///
/// `RUST_LOG` still takes precedence for the modules it names. Fails if a logger was already
/// installed.
pub fn init(config: &Config) -> Result<(), log::SetLoggerError> {
    builder(config.log_level()).try_init()
}

fn builder(level: log::LevelFilter) -> env_logger::Builder {
    let mut builder = env_logger::Builder::new();
    builder.filter_level(log::LevelFilter::Info);
    for module in OWN_MODULES {
        builder.filter_module(module, level);
    }
    builder.parse_env(env_logger::Env::default());

    builder
}
