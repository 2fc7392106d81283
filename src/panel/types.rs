//! Core data types for the control panel

use std::fmt;
use std::io;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use serde_json::ser::{CompactFormatter, Formatter, Serializer};
use serde_json::{Map, Value};

use super::errors::PanelError;

/// One of the four input elements on the grid configuration form
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FormField {
    PriceRangeLow,
    PriceRangeHigh,
    NumberOfGrids,
    Margin,
}

impl FormField {
    /// All fields in form order
    pub const ALL: [FormField; 4] = [
        FormField::PriceRangeLow,
        FormField::PriceRangeHigh,
        FormField::NumberOfGrids,
        FormField::Margin,
    ];

    /// Element id, which is also the JSON key in the submit body
    pub fn id(&self) -> &'static str {
        match self {
            FormField::PriceRangeLow => "priceRangeLow",
            FormField::PriceRangeHigh => "priceRangeHigh",
            FormField::NumberOfGrids => "numberOfGrids",
            FormField::Margin => "margin",
        }
    }

    /// Kebab-case spelling used for command line flags
    pub fn flag(&self) -> &'static str {
        match self {
            FormField::PriceRangeLow => "price-range-low",
            FormField::PriceRangeHigh => "price-range-high",
            FormField::NumberOfGrids => "number-of-grids",
            FormField::Margin => "margin",
        }
    }
}

impl fmt::Display for FormField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.id())
    }
}

impl FromStr for FormField {
    type Err = PanelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        FormField::ALL
            .into_iter()
            .find(|field| field.id() == s || field.flag() == s)
            .ok_or_else(|| PanelError::UnknownField(s.to_string()))
    }
}

/// Values read from the form at submission time
///
/// Everything stays a string: the panel does not coerce or validate input,
/// the backend decides what a valid grid is.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FormInput {
    pub price_range_low: String,
    pub price_range_high: String,
    pub number_of_grids: String,
    pub margin: String,
}

impl FormInput {
    pub fn new(
        price_range_low: impl Into<String>,
        price_range_high: impl Into<String>,
        number_of_grids: impl Into<String>,
        margin: impl Into<String>,
    ) -> Self {
        Self {
            price_range_low: price_range_low.into(),
            price_range_high: price_range_high.into(),
            number_of_grids: number_of_grids.into(),
            margin: margin.into(),
        }
    }

    /// Get the value of a single field
    pub fn get(&self, field: FormField) -> &str {
        match field {
            FormField::PriceRangeLow => &self.price_range_low,
            FormField::PriceRangeHigh => &self.price_range_high,
            FormField::NumberOfGrids => &self.number_of_grids,
            FormField::Margin => &self.margin,
        }
    }

    /// Set the value of a single field
    pub fn set(&mut self, field: FormField, value: impl Into<String>) {
        let slot = match field {
            FormField::PriceRangeLow => &mut self.price_range_low,
            FormField::PriceRangeHigh => &mut self.price_range_high,
            FormField::NumberOfGrids => &mut self.number_of_grids,
            FormField::Margin => &mut self.margin,
        };
        *slot = value.into();
    }
}

/// Reply from the submit endpoint
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SubmitResponse {
    /// Text shown to the user
    pub message: String,
    /// Anything else the server sent back; kept but never rendered
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl SubmitResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            extra: Map::new(),
        }
    }
}

/// Reply from the order history endpoint, shape defined by the server
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct HistoryResponse(pub Value);

impl HistoryResponse {
    /// Compact serialization of the whole payload, keys in server order
    ///
    /// Integral floats print without a fraction (`2000.0` renders as `2000`),
    /// matching how a browser stringifies the same payload.
    pub fn render(&self) -> String {
        let mut buf = Vec::new();
        let mut ser = Serializer::with_formatter(&mut buf, JsNumberFormatter);
        if self.0.serialize(&mut ser).is_err() {
            return self.0.to_string();
        }
        String::from_utf8(buf).unwrap_or_else(|_| self.0.to_string())
    }
}

/// Largest magnitude a browser still prints in plain decimal notation
const JS_EXPONENT_THRESHOLD: f64 = 1e21;

/// Compact formatter that writes whole-valued floats as integers
struct JsNumberFormatter;

impl Formatter for JsNumberFormatter {
    fn write_f64<W>(&mut self, writer: &mut W, value: f64) -> io::Result<()>
    where
        W: ?Sized + io::Write,
    {
        if value == 0.0 {
            return writer.write_all(b"0");
        }
        if value.is_finite() && value.fract() == 0.0 && value.abs() < JS_EXPONENT_THRESHOLD {
            return write!(writer, "{:.0}", value);
        }
        CompactFormatter.write_f64(writer, value)
    }
}

impl From<Value> for HistoryResponse {
    fn from(value: Value) -> Self {
        Self(value)
    }
}
