use KiBalance::Utils::logger::init_logger;
use KiBalance::cli::cli_main::run_with_args;
use KiBalance::settings::BalancerSettings;
use log::error;

pub fn main() {
    let mut settings = BalancerSettings::new();
    if let Err(e) = init_logger(settings.get_config()) {
        eprintln!("{}", e);
    }
    let args: Vec<String> = std::env::args().skip(1).collect();
    if let Err(e) = run_with_args(&args, &mut settings) {
        error!("{}", e);
        std::process::exit(1);
    }
}
