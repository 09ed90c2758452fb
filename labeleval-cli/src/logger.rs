use anyhow::Result;
use log::LevelFilter;
use log4rs::{
    append::console::{ConsoleAppender, Target},
    config::{Appender, Root},
    encode::pattern::PatternEncoder,
    Config,
};

pub(crate) fn level_from_flags(quiet: bool, verbose: u8) -> LevelFilter {
    match (quiet, verbose) {
        (true, _) => LevelFilter::Off,
        (false, 0) => LevelFilter::Warn,
        (false, 1) => LevelFilter::Info,
        (false, _) => LevelFilter::Debug,
    }
}

/// Logs go to stderr so stdout only carries command output.
pub(crate) fn init_log(level: LevelFilter) -> Result<()> {
    let stderr = ConsoleAppender::builder()
        .target(Target::Stderr)
        .encoder(Box::new(PatternEncoder::new("[{h({l})} {t}] {m}{n}")))
        .build();
    let appender = Appender::builder().build("stderr", Box::new(stderr));

    let config = Config::builder()
        .appender(appender)
        .build(Root::builder().appender("stderr").build(level))?;
    log4rs::init_config(config)?;
    update_panic_hook();

    Ok(())
}

fn update_panic_hook() {
    let hook = std::panic::take_hook();

    std::panic::set_hook(Box::new(move |info| {
        log::error!("PANIC => {}", info);
        hook(info);
    }));
}
