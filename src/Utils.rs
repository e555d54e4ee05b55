/// reading of equation lists from text files
pub mod load_from_file;
/// terminal and file logging
pub mod logger;
