use log::{info, warn};
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

pub struct LoadData {
    pub file_name: String,
}

impl LoadData {
    pub fn new(file_name: String) -> Self {
        LoadData { file_name }
    }
    pub fn load_equations(&self) -> Result<Vec<String>, String> {
        load_equation_list(&self.file_name)
    }
}

/// Reads a list of equations, one per line. Blank lines and lines starting with `#` are skipped,
/// the rest is trimmed and returned in file order.
pub fn load_equation_list(file_name: &str) -> Result<Vec<String>, String> {
    let path = Path::new(file_name);
    if !path.exists() {
        return Err(format!("File '{}' does not exist", file_name));
    }

    let file = match File::open(path) {
        Ok(file) => file,
        Err(e) => return Err(format!("Failed to open file '{}': {}", file_name, e)),
    };

    let reader = BufReader::new(file);
    let mut equations = Vec::new();
    for (i, line) in reader.lines().enumerate() {
        let line = line.map_err(|e| format!("Failed to read line {} of '{}': {}", i + 1, file_name, e))?;
        let trimmed = line.trim();
        if trimmed.is_empty() || trimmed.starts_with('#') {
            continue;
        }
        equations.push(trimmed.to_string());
    }

    if equations.is_empty() {
        warn!("File '{}' contains no equations", file_name);
    }
    info!("Loaded {} equations from file '{}'", equations.len(), file_name);
    Ok(equations)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_load_equation_list() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "# combustion").unwrap();
        writeln!(file, "CH4 + O2 > CO2 + H2O").unwrap();
        writeln!(file).unwrap();
        writeln!(file, "   ").unwrap();
        writeln!(file, "  H2+O2>H2O  ").unwrap();
        writeln!(file, "   # indented comment").unwrap();
        let data = LoadData::new(file.path().to_str().unwrap().to_string());
        let equations = data.load_equations().unwrap();
        assert_eq!(equations, vec!["CH4 + O2 > CO2 + H2O", "H2+O2>H2O"]);
    }

    #[test]
    fn test_empty_file() {
        let file = NamedTempFile::new().unwrap();
        let equations = load_equation_list(file.path().to_str().unwrap()).unwrap();
        assert!(equations.is_empty());
    }

    #[test]
    fn test_missing_file() {
        let result = load_equation_list("definitely_missing_equations.txt");
        assert_eq!(
            result,
            Err("File 'definitely_missing_equations.txt' does not exist".to_string())
        );
    }
}
