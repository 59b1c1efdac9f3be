/// runnable examples on the sample dictionaries in `data/`
pub mod closures_examples;
