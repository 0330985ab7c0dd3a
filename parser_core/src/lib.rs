//! Parser core - Voice transcript fuel-price parser
//!
//! Turns noisy speech-to-text output such as
//! "E10 three seventy nine and diesel four twenty nine" into (fuel type, price)
//! candidates with confidence scores. Pure and synchronous: no I/O, no shared
//! mutable state.

pub mod config;
pub mod error;
pub mod types;
pub mod normalizer;
pub mod numbers;
pub mod matcher;
pub mod price;
pub mod scanner;
pub mod parser;
pub mod review;

pub use config::ParserConfig;
pub use error::{ConfigError, ReviewError};
pub use types::*;
pub use normalizer::{normalize_text, tokenize};
pub use matcher::{FuelBucket, FuelMatcher};
pub use price::PriceExtractor;
pub use parser::*;
pub use review::*;

// Python bindings
#[cfg(feature = "python")]
pub mod py;

#[cfg(feature = "python")]
use pyo3::prelude::*;

#[cfg(feature = "python")]
#[pymodule]
fn price_parser_core(m: &Bound<'_, PyModule>) -> PyResult<()> {
    use py::*;
    m.add_class::<PyVoiceParser>()?;
    m.add_function(wrap_pyfunction!(py_parse_spoken_price, m)?)?;
    m.add_function(wrap_pyfunction!(py_normalize_text, m)?)?;
    Ok(())
}
