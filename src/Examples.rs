/// balancing examples: demonstration list, formula parsing, matrix reduction, reports
pub mod balancing_examples;
