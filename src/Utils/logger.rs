use crate::settings::BalancerConfig;
use log::info;
use simplelog::{
    ColorChoice, CombinedLogger, ConfigBuilder, SharedLogger, TermLogger, TerminalMode,
    WriteLogger,
};
use std::fs::File;

/// terminal logger plus a file logger when `log_file` is set
pub fn build_loggers(config: &BalancerConfig) -> Result<Vec<Box<dyn SharedLogger>>, String> {
    let level = config.level_filter();
    let log_config = ConfigBuilder::new().set_time_level(log::LevelFilter::Off).build();
    let mut loggers: Vec<Box<dyn SharedLogger>> = vec![TermLogger::new(
        level,
        log_config.clone(),
        TerminalMode::Mixed,
        ColorChoice::Auto,
    )];
    if let Some(log_file) = &config.log_file {
        let file = File::create(log_file)
            .map_err(|e| format!("Failed to create log file '{}': {}", log_file, e))?;
        loggers.push(WriteLogger::new(level, log_config, file));
    }
    Ok(loggers)
}

/// installs the global logger, may be called once per process
pub fn init_logger(config: &BalancerConfig) -> Result<(), String> {
    let loggers = build_loggers(config)?;
    CombinedLogger::init(loggers).map_err(|e| format!("Logger is already set: {}", e))?;
    info!("logging at level {}", config.level_filter());
    Ok(())
}
