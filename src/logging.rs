// src/logging.rs

use log::LevelFilter;

/// Wires `log` output to stdout. `verbose` turns on debug lines; ureq's
/// own chatter stays at warn either way.
pub fn init(verbose: bool) -> Result<(), fern::InitError> {
    let level = if verbose {
        LevelFilter::Debug
    } else {
        LevelFilter::Info
    };

    fern::Dispatch::new()
        .format(|out, message, record| {
            out.finish(format_args!(
                "[{}][{}] {}",
                chrono::Local::now().format("%H:%M:%S"),
                record.level(),
                message
            ))
        })
        .level(level)
        .level_for("ureq", LevelFilter::Warn)
        .chain(std::io::stdout())
        .apply()?;

    Ok(())
}
