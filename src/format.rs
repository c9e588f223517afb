//! Output formatting for the ezyVet CLI client.
//!
//! Records come back from the API as opaque JSON objects. They are printed
//! as compact JSON by default, indented JSON with `--pretty`, YAML, or as a
//! flattened CSV table.

use csv::Writer;
use serde_json::{Map, Value};
use std::collections::BTreeSet;
use std::str::FromStr;
use strum::EnumIter;

pub const JSON: &str = "json";
pub const CSV: &str = "csv";
pub const YAML: &str = "yaml";

/// Error types that can occur during formatting operations
#[derive(Debug, thiserror::Error)]
pub enum FormattingError {
    /// Error when an unsupported output format is requested
    #[error("invalid output format {0}")]
    UnsupportedOutputFormat(String),
    /// General error when formatting fails
    #[error("failed to format output due to: {cause}")]
    FormatFailure {
        cause: Box<dyn std::error::Error + Send + Sync>,
    },
    #[error("CSV error: {0}")]
    CsvError(#[from] csv::Error),
    #[error("UTF-8 conversion error: {0}")]
    Utf8Error(#[from] std::string::FromUtf8Error),
    #[error("JSON serialization error: {0}")]
    JsonSerializationError(#[from] serde_json::Error),
    #[error("CSV writer into inner error: {0}")]
    CsvIntoInnerError(#[from] csv::IntoInnerError<csv::Writer<Vec<u8>>>),
}

#[derive(Debug, Clone, Default, PartialEq, PartialOrd)]
pub struct OutputFormatOptions {
    pub with_headers: bool,
    pub pretty: bool,
}

/// Enum representing the supported output formats
#[derive(Debug, Clone, PartialEq, PartialOrd, EnumIter)]
pub enum OutputFormat {
    Json(OutputFormatOptions),
    Csv(OutputFormatOptions),
    Yaml(OutputFormatOptions),
}

impl OutputFormat {
    /// Returns all supported format names
    pub fn names() -> Vec<&'static str> {
        vec![JSON, CSV, YAML]
    }

    pub fn from_string_with_options(
        format_str: &str,
        options: OutputFormatOptions,
    ) -> Result<OutputFormat, FormattingError> {
        let normalized_format = format_str.to_lowercase();
        match normalized_format.as_str() {
            JSON => Ok(OutputFormat::Json(options)),
            CSV => Ok(OutputFormat::Csv(options)),
            YAML => Ok(OutputFormat::Yaml(options)),
            _ => Err(FormattingError::UnsupportedOutputFormat(normalized_format)),
        }
    }
}

impl Default for OutputFormat {
    fn default() -> Self {
        OutputFormat::Json(OutputFormatOptions::default())
    }
}

impl std::fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        match self {
            OutputFormat::Json(_) => write!(f, "{}", JSON),
            OutputFormat::Csv(_) => write!(f, "{}", CSV),
            OutputFormat::Yaml(_) => write!(f, "{}", YAML),
        }
    }
}

impl FromStr for OutputFormat {
    type Err = FormattingError;

    fn from_str(format_str: &str) -> Result<OutputFormat, FormattingError> {
        Self::from_string_with_options(format_str, OutputFormatOptions::default())
    }
}

pub trait Formattable {
    fn format(&self, f: &OutputFormat) -> Result<String, FormattingError>;
}

/// Trait for producing CSV records from data
pub trait CsvRecordProducer {
    /// Returns the header row for the CSV output
    fn csv_header(&self) -> Vec<String>;

    /// Converts the data into CSV records
    fn as_csv_records(&self) -> Vec<Vec<String>>;

    /// Produces CSV output with or without a header row
    fn to_csv(&self, with_header: bool) -> Result<String, FormattingError> {
        let mut wtr = Writer::from_writer(vec![]);
        if with_header {
            wtr.write_record(self.csv_header())?;
        }
        for record in self.as_csv_records() {
            wtr.write_record(&record)?;
        }
        wtr.flush()
            .map_err(|e| FormattingError::FormatFailure { cause: Box::new(e) })?;
        Ok(String::from_utf8(wtr.into_inner()?)?)
    }
}

/// The flattened list of items returned by a paginated fetch
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RecordList {
    items: Vec<Value>,
}

impl RecordList {
    pub fn new(items: Vec<Value>) -> Self {
        Self { items }
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// ezyVet wraps each record in an object keyed by the resource name,
    /// e.g. `{"animal": {...}}`. Strip that wrapper for tabular output.
    fn unwrapped(item: &Value) -> Option<&Map<String, Value>> {
        let object = item.as_object()?;
        if object.len() == 1 {
            if let Some(Value::Object(inner)) = object.values().next() {
                return Some(inner);
            }
        }
        Some(object)
    }

    fn cell(value: Option<&Value>) -> String {
        match value {
            None | Some(Value::Null) => String::new(),
            Some(Value::String(s)) => s.clone(),
            Some(Value::Bool(b)) => b.to_string(),
            Some(Value::Number(n)) => n.to_string(),
            Some(nested) => nested.to_string(),
        }
    }
}

impl From<Vec<Value>> for RecordList {
    fn from(items: Vec<Value>) -> Self {
        Self::new(items)
    }
}

impl CsvRecordProducer for RecordList {
    fn csv_header(&self) -> Vec<String> {
        let columns: BTreeSet<&String> = self
            .items
            .iter()
            .filter_map(Self::unwrapped)
            .flat_map(|record| record.keys())
            .collect();
        columns.into_iter().cloned().collect()
    }

    fn as_csv_records(&self) -> Vec<Vec<String>> {
        let header = self.csv_header();
        self.items
            .iter()
            .map(|item| match Self::unwrapped(item) {
                Some(record) => header
                    .iter()
                    .map(|column| Self::cell(record.get(column)))
                    .collect(),
                // scalars have no columns to spread over
                None => vec![Self::cell(Some(item))],
            })
            .collect()
    }
}

impl Formattable for RecordList {
    fn format(&self, f: &OutputFormat) -> Result<String, FormattingError> {
        match f {
            OutputFormat::Json(options) => {
                if options.pretty {
                    Ok(serde_json::to_string_pretty(&self.items)?)
                } else {
                    Ok(serde_json::to_string(&self.items)?)
                }
            }
            OutputFormat::Csv(options) => self.to_csv(options.with_headers),
            OutputFormat::Yaml(_) => serde_yaml::to_string(&self.items)
                .map_err(|e| FormattingError::FormatFailure { cause: Box::new(e) }),
        }
    }
}

impl Formattable for Value {
    fn format(&self, f: &OutputFormat) -> Result<String, FormattingError> {
        match f {
            OutputFormat::Json(options) => {
                if options.pretty {
                    Ok(serde_json::to_string_pretty(self)?)
                } else {
                    Ok(serde_json::to_string(self)?)
                }
            }
            OutputFormat::Csv(options) => match self {
                Value::Array(items) => RecordList::new(items.clone()).to_csv(options.with_headers),
                other => RecordList::new(vec![other.clone()]).to_csv(options.with_headers),
            },
            OutputFormat::Yaml(_) => serde_yaml::to_string(self)
                .map_err(|e| FormattingError::FormatFailure { cause: Box::new(e) }),
        }
    }
}
