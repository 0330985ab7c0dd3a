//! Python bindings for the price parser using PyO3

use pyo3::prelude::*;
use crate::types::FuelTypeDescriptor;
use crate::parser::VoiceParser;
use crate::normalizer::normalize_text;

/// Decode a spoken price with the default configuration (Python function)
#[pyfunction]
#[pyo3(name = "parse_spoken_price")]
pub fn py_parse_spoken_price(text: &str) -> Option<f64> {
    crate::parser::parse_spoken_price(text)
}

/// Normalize transcript text (Python function)
#[pyfunction]
#[pyo3(name = "normalize_text")]
pub fn py_normalize_text(text: &str) -> String {
    normalize_text(text)
}

/// Python wrapper holding a parser and the station's known fuel types
#[pyclass(name = "VoiceParser")]
pub struct PyVoiceParser {
    parser: VoiceParser,
    fuel_types: Vec<FuelTypeDescriptor>,
}

#[pymethods]
impl PyVoiceParser {
    #[new]
    fn new() -> Self {
        Self {
            parser: VoiceParser::new(),
            fuel_types: Vec::new(),
        }
    }

    /// Register a known fuel type
    #[pyo3(signature = (id, name, display_name=None))]
    fn add_fuel_type(&mut self, id: String, name: String, display_name: Option<String>) {
        self.fuel_types.push(FuelTypeDescriptor {
            id,
            name,
            display_name,
        });
    }

    /// Parse a transcript; returns the result as a JSON string
    fn parse_transcript(&self, transcript: &str) -> PyResult<String> {
        let result = self.parser.parse_transcript(transcript, &self.fuel_types);
        serde_json::to_string(&result)
            .map_err(|e| PyErr::new::<pyo3::exceptions::PyValueError, _>(format!("Failed to serialize parse result: {}", e)))
    }

    fn parse_spoken_price(&self, text: &str) -> Option<f64> {
        self.parser.parse_spoken_price(text)
    }

    /// Match a single token against the registered fuel types; returns JSON
    /// with the same field naming as `parse_transcript`
    fn normalize_fuel_token(&self, token: &str) -> PyResult<String> {
        let m = self.parser.normalize_fuel_token(token, &self.fuel_types);
        serde_json::to_string(&m)
            .map_err(|e| PyErr::new::<pyo3::exceptions::PyValueError, _>(format!("Failed to serialize fuel match: {}", e)))
    }

    /// Clear all fuel types
    fn clear(&mut self) {
        self.fuel_types.clear();
    }

    /// Get number of fuel types
    fn len(&self) -> usize {
        self.fuel_types.len()
    }
}
