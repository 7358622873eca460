//! Logger setup for the command-line tools.
//!
//! Library code logs through the `log` facade; binaries call [`init`] once so
//! records reach stderr. `RUST_LOG` overrides the default `warn` level.

use env_logger::Env;

pub fn init() {
    let _ = env_logger::Builder::from_env(Env::default().default_filter_or("warn"))
        .format_timestamp(None)
        .try_init();
}
