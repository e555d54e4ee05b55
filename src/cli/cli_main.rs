use super::cli_batch::{balance_line, print_reports, run_batch};
use crate::Examples::balancing_examples::{balancing_examples, run_demo_list};
use crate::settings::BalancerSettings;
use log::error;
use std::io::{self, Write};

/// what the program was asked to do on the command line
#[derive(Debug, Clone, PartialEq)]
pub enum CliCommand {
    Menu,
    Batch(String),
    Demo,
    Equations(Vec<String>),
}

#[derive(Debug, Clone, PartialEq)]
pub struct CliOptions {
    pub command: CliCommand,
    pub json: bool,
    pub matrix: bool,
}

/// `--batch <file>`, `--demo`, `--json`, `--matrix`; everything else is an equation
pub fn parse_args(args: &[String]) -> Result<CliOptions, String> {
    let mut options = CliOptions {
        command: CliCommand::Menu,
        json: false,
        matrix: false,
    };
    let mut equations = Vec::new();
    let mut iter = args.iter();
    while let Some(arg) = iter.next() {
        match arg.as_str() {
            "--batch" => match iter.next() {
                Some(file) => options.command = CliCommand::Batch(file.clone()),
                None => return Err("--batch needs a file name".to_string()),
            },
            "--demo" => options.command = CliCommand::Demo,
            "--json" => options.json = true,
            "--matrix" => options.matrix = true,
            _ => equations.push(arg.clone()),
        }
    }
    if !equations.is_empty() {
        if options.command != CliCommand::Menu {
            return Err("equations cannot be combined with --batch or --demo".to_string());
        }
        options.command = CliCommand::Equations(equations);
    }
    Ok(options)
}

/// runs the command given by the arguments; no command opens the menu
pub fn run_with_args(args: &[String], settings: &mut BalancerSettings) -> Result<(), String> {
    let options = parse_args(args)?;
    let mut config = settings.get_config().clone();
    config.json_output |= options.json;
    config.print_matrix |= options.matrix;
    let reports = match options.command {
        CliCommand::Menu => {
            run_interactive_menu(settings);
            return Ok(());
        }
        CliCommand::Batch(file) => run_batch(&file, &config)?,
        CliCommand::Demo => run_demo_list(),
        CliCommand::Equations(equations) => equations
            .iter()
            .map(|text| balance_line(text, &config))
            .collect(),
    };
    print_reports(&reports, &config)
}

pub fn run_interactive_menu(settings: &mut BalancerSettings) {
    loop {
        show_main_menu();
        let choice = get_user_input();

        match choice.trim() {
            "1" => balance_menu(settings),
            "2" => batch_menu(settings),
            "3" => {
                let reports = run_demo_list();
                if let Err(e) = print_reports(&reports, settings.get_config()) {
                    error!("{}", e);
                }
            }
            "4" => examples_menu(),
            "5" => settings_menu(settings),
            "0" => {
                println!("Goodbye!");
                break;
            }
            _ => println!("Invalid choice. Please try again."),
        }
    }
}
/* colors
Blue (\x1b[34m) - Welcome header text

Yellow (\x1b[33m) - Menu options

Cyan (\x1b[36m) - prompts

Reset (\x1b[0m) - Returns to normal color after each colored section
*/
fn show_main_menu() {
    println!(
        "\x1b[34m\n Wellcome to KiBalance: integer balancing of chemical equations\n
    write equations as  reactants > products, e.g. Fe2O3 + C > FeO + CO \n
    (c) Gleb E. Zaslavsky, 2024 \n \x1b[0m"
    );
    println!("\x1b[33m1. Balance an equation\x1b[0m");
    println!("\x1b[33m2. Balance equations from file\x1b[0m");
    println!("\x1b[33m3. Demonstration list\x1b[0m");
    println!("\x1b[33m4. Examples\x1b[0m");
    println!("\x1b[33m5. Settings\x1b[0m");
    println!("\x1b[33m0. Exit\x1b[0m");
    prompt("Enter your choice: ");
}

fn balance_menu(settings: &BalancerSettings) {
    loop {
        prompt("Equation (empty line to go back): ");
        let text = get_user_input();
        if text.trim().is_empty() {
            break;
        }
        let report = balance_line(&text, settings.get_config());
        if let Err(e) = print_reports(&[report], settings.get_config()) {
            error!("{}", e);
        }
    }
}

fn batch_menu(settings: &BalancerSettings) {
    prompt("File with equations: ");
    let file_name = get_user_input();
    match run_batch(file_name.trim(), settings.get_config()) {
        Ok(reports) => {
            if let Err(e) = print_reports(&reports, settings.get_config()) {
                error!("{}", e);
            }
        }
        Err(e) => {
            error!("{}", e);
            println!("\x1b[31m{}\x1b[0m", e);
        }
    }
}

fn examples_menu() {
    loop {
        println!("\n=== Examples ===");
        println!("1. Formula parsing");
        println!("2. Matrix of the equation");
        println!("3. Report with tables and JSON");
        println!("0. Back to main menu");
        prompt("Enter your choice: ");

        let choice = get_user_input();
        match choice.trim() {
            "1" => balancing_examples(1),
            "2" => balancing_examples(2),
            "3" => balancing_examples(3),
            "0" => break,
            _ => println!("Invalid choice. Please try again."),
        }
    }
}

fn settings_menu(settings: &mut BalancerSettings) {
    loop {
        println!("\n=== Settings ===");
        settings.settings_table().printstd();
        println!("1. Log level");
        println!("2. Log file");
        println!("3. Toggle arrow aliases");
        println!("4. Toggle matrix output");
        println!("5. Toggle JSON output");
        println!("6. Reset to defaults");
        println!("0. Back to main menu");
        prompt("Enter your choice: ");

        let choice = get_user_input();
        let config = settings.get_config().clone();
        let result = match choice.trim() {
            "1" => {
                prompt("off, error, warn, info, debug or trace: ");
                settings.set_log_level(&get_user_input())
            }
            "2" => {
                prompt("Log file (empty to disable, applies after restart): ");
                settings.set_log_file(&get_user_input())
            }
            "3" => settings.set_flag("accept_arrow_aliases", !config.accept_arrow_aliases),
            "4" => settings.set_flag("print_matrix", !config.print_matrix),
            "5" => settings.set_flag("json_output", !config.json_output),
            "6" => settings.reset_to_defaults(),
            "0" => break,
            _ => {
                println!("Invalid choice. Please try again.");
                Ok(())
            }
        };
        if let Err(e) = result {
            println!("\x1b[31m{}\x1b[0m", e);
        }
    }
}

fn prompt(text: &str) {
    print!("\x1b[36m{}\x1b[0m", text);
    let _ = io::stdout().flush();
}

/// line from stdin; end of input reads as "0" so every menu can be left
fn get_user_input() -> String {
    let mut input = String::new();
    match io::stdin().read_line(&mut input) {
        Ok(0) => "0".to_string(),
        Ok(_) => input,
        Err(e) => {
            error!("Failed to read input: {}", e);
            "0".to_string()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_no_args_is_menu() {
        let options = parse_args(&[]).unwrap();
        assert_eq!(options.command, CliCommand::Menu);
        assert!(!options.json);
    }

    #[test]
    fn test_parse_args() {
        let options = parse_args(&args(&["--batch", "list.txt", "--json"])).unwrap();
        assert_eq!(options.command, CliCommand::Batch("list.txt".to_string()));
        assert!(options.json);
        assert!(!options.matrix);

        let options = parse_args(&args(&["--matrix", "H2+O2>H2O", "N2+H2>NH3"])).unwrap();
        assert_eq!(
            options.command,
            CliCommand::Equations(args(&["H2+O2>H2O", "N2+H2>NH3"]))
        );
        assert!(options.matrix);

        assert_eq!(
            parse_args(&args(&["--demo"])).unwrap().command,
            CliCommand::Demo
        );
    }

    #[test]
    fn test_bad_args() {
        assert!(parse_args(&args(&["--batch"])).is_err());
        assert!(parse_args(&args(&["--demo", "H2+O2>H2O"])).is_err());
    }

    #[test]
    fn test_run_equations_from_args() {
        let mut settings = BalancerSettings::with_config_file("not_written_in_tests.json");
        assert!(run_with_args(&args(&["H2 + O2 -> H2O", "--json"]), &mut settings).is_ok());
        assert!(run_with_args(&args(&["--demo"]), &mut settings).is_ok());
        assert!(run_with_args(&args(&["--batch", "no_such_file.txt"]), &mut settings).is_err());
        // command line flags do not change stored settings
        assert!(!settings.get_config().json_output);
    }
}
