use crate::Stoichiometry::report::{BalanceReport, reports_to_json, summary_table};
use crate::Utils::load_from_file::load_equation_list;
use crate::settings::BalancerConfig;
use log::{info, warn};
use regex::Regex;

/// arrow spellings read as the side marker, longest first
const ARROW_ALIASES: &str = r"<=>|->|=>|=";

/// rewrites `->`, `=>`, `<=>` and `=` into `>`
pub fn normalize_arrows(text: &str) -> String {
    match Regex::new(ARROW_ALIASES) {
        Ok(re) => re.replace_all(text, ">").into_owned(),
        Err(e) => {
            warn!("arrow aliases are not replaced: {}", e);
            text.to_string()
        }
    }
}

/// equation text as the balancer should see it under the current settings
pub fn prepare_equation(text: &str, config: &BalancerConfig) -> String {
    if config.accept_arrow_aliases {
        normalize_arrows(text)
    } else {
        text.to_string()
    }
}

/// balances one line of user input
pub fn balance_line(text: &str, config: &BalancerConfig) -> BalanceReport {
    let prepared = prepare_equation(text, config);
    let mut report = BalanceReport::from_text(&prepared);
    report.input = text.trim().to_string();
    report
}

/// balances every equation of the file
pub fn run_batch(file_name: &str, config: &BalancerConfig) -> Result<Vec<BalanceReport>, String> {
    let equations = load_equation_list(file_name)?;
    let reports: Vec<BalanceReport> = equations
        .iter()
        .map(|text| balance_line(text, config))
        .collect();
    let failed = reports.iter().filter(|r| !r.is_success()).count();
    info!(
        "{}: {} equations, {} balanced, {} failed",
        file_name,
        reports.len(),
        reports.len() - failed,
        failed
    );
    Ok(reports)
}

/// prints reports as JSON or as tables
pub fn print_reports(reports: &[BalanceReport], config: &BalancerConfig) -> Result<(), String> {
    if config.json_output {
        let json = reports_to_json(reports).map_err(|e| format!("Failed to write JSON: {}", e))?;
        println!("{}", json);
        return Ok(());
    }
    if reports.len() == 1 {
        reports[0].print(config.print_matrix);
        return Ok(());
    }
    summary_table(reports).printstd();
    if config.print_matrix {
        for report in reports {
            report.print(true);
        }
    }
    Ok(())
}
