pub mod digipics_core;
