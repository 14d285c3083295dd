pub mod formats;

use flexi_logger::{Logger, LoggerHandle};

use crate::Error;

/// Starts logging to stderr so stdout stays reserved for the chat.
///
/// Level comes from `RUST_LOG`, default `warn`.
pub fn init() -> Result<LoggerHandle, Error> {
    let handle = Logger::try_with_env_or_str("warn")?
        .format(formats::cli_format)
        .log_to_stderr()
        .start()?;

    Ok(handle)
}
