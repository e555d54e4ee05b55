/// batch runner, arrow aliases and printing of results
pub mod cli_batch;
/// terminal menu and command line arguments
pub mod cli_main;
