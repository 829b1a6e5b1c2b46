use anyhow::Result;
use clap::{crate_version, App as ClapApp, Arg};
use issues_tui::app::App;
use issues_tui::config::{parse_log_level, Config};
use issues_tui::logger::CustomLogger;

fn main() -> Result<()> {
    let matches = ClapApp::new("issues-tui")
        .version(crate_version!())
        .about("A terminal user interface for tracking issues")
        .arg(
            Arg::with_name("config")
                .short("c")
                .long("config")
                .value_name("DIR")
                .help("Use a custom configuration directory")
                .takes_value(true),
        )
        .arg(
            Arg::with_name("theme")
                .short("t")
                .long("theme")
                .value_name("NAME")
                .help("Override the configured theme")
                .takes_value(true),
        )
        .arg(
            Arg::with_name("log-level")
                .short("l")
                .long("log-level")
                .value_name("LEVEL")
                .help("Override the configured log level (error, warn, info, debug, trace)")
                .takes_value(true),
        )
        .get_matches();

    let mut config = Config::new();
    config.load(matches.value_of("config"))?;
    if let Some(theme) = matches.value_of("theme") {
        config.theme_name = theme.to_string();
    }
    let level = match matches.value_of("log-level") {
        Some(level) => parse_log_level(level)?,
        None => config.log_level_filter()?,
    };

    let log_buffer = CustomLogger::init(level)?;
    App::start(config, log_buffer)
}
