//! Type definitions for filterable fields

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

/// Semantic type of a field, as far as filtering is concerned
///
/// Warehouse types collapse into four families; the family decides which
/// operators a rule may use and what its default values look like.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FilterType {
    /// Text values
    String,
    /// Integers, floats and decimals
    Number,
    /// Dates and timestamps
    Date,
    /// Boolean
    Boolean,
}

impl Default for FilterType {
    fn default() -> Self {
        FilterType::String
    }
}

impl fmt::Display for FilterType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FilterType::String => write!(f, "string"),
            FilterType::Number => write!(f, "number"),
            FilterType::Date => write!(f, "date"),
            FilterType::Boolean => write!(f, "boolean"),
        }
    }
}

/// Error when parsing a filter type string
#[derive(Debug, Clone)]
pub struct ParseFilterTypeError {
    pub input: String,
}

impl fmt::Display for ParseFilterTypeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Unknown field type '{}'. Valid options: string, number, date, boolean", self.input)
    }
}

impl std::error::Error for ParseFilterTypeError {}

impl FromStr for FilterType {
    type Err = ParseFilterTypeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "string" | "text" | "varchar" => Ok(FilterType::String),
            "number" | "int" | "integer" | "bigint" | "float" | "double" | "decimal" | "numeric" => {
                Ok(FilterType::Number)
            }
            "date" | "timestamp" | "datetime" => Ok(FilterType::Date),
            "boolean" | "bool" => Ok(FilterType::Boolean),
            _ => Err(ParseFilterTypeError { input: s.to_string() }),
        }
    }
}

impl<'de> Deserialize<'de> for FilterType {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        FilterType::from_str(&s).map_err(serde::de::Error::custom)
    }
}

impl Serialize for FilterType {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&self.to_string())
    }
}

// ============================================================================
// FieldClass
// ============================================================================

/// Coarse category of a queryable field
///
/// OR groups may only combine rules over fields of a single class.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum FieldClass {
    /// Dimension, including custom SQL dimensions
    Dimension,
    /// Aggregated metric
    Metric,
    /// Table calculation evaluated over query results
    TableCalculation,
}

impl FieldClass {
    /// All classes, in the order fields are offered to users
    pub const ALL: [FieldClass; 3] = [
        FieldClass::Dimension,
        FieldClass::Metric,
        FieldClass::TableCalculation,
    ];

    /// Human readable label ("dimension", "metric", "table calculation")
    pub fn label(&self) -> &'static str {
        match self {
            FieldClass::Dimension => "dimension",
            FieldClass::Metric => "metric",
            FieldClass::TableCalculation => "table calculation",
        }
    }
}

impl fmt::Display for FieldClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FieldClass::Dimension => write!(f, "dimension"),
            FieldClass::Metric => write!(f, "metric"),
            FieldClass::TableCalculation => write!(f, "table_calculation"),
        }
    }
}

/// Error when parsing a field class string
#[derive(Debug, Clone)]
pub struct ParseFieldClassError {
    pub input: String,
}

impl fmt::Display for ParseFieldClassError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Unknown field class '{}'. Valid options: dimension, metric, table_calculation",
            self.input
        )
    }
}

impl std::error::Error for ParseFieldClassError {}

impl FromStr for FieldClass {
    type Err = ParseFieldClassError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "dimension" | "custom_sql_dimension" | "customsqldimension" => Ok(FieldClass::Dimension),
            "metric" => Ok(FieldClass::Metric),
            "table_calculation" | "tablecalculation" | "table calculation" => {
                Ok(FieldClass::TableCalculation)
            }
            _ => Err(ParseFieldClassError { input: s.to_string() }),
        }
    }
}

impl<'de> Deserialize<'de> for FieldClass {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        FieldClass::from_str(&s).map_err(serde::de::Error::custom)
    }
}

impl Serialize for FieldClass {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&self.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_filter_types() {
        assert_eq!("string".parse::<FilterType>().unwrap(), FilterType::String);
        assert_eq!("NUMBER".parse::<FilterType>().unwrap(), FilterType::Number);
        assert_eq!("date".parse::<FilterType>().unwrap(), FilterType::Date);
        assert_eq!("boolean".parse::<FilterType>().unwrap(), FilterType::Boolean);
    }

    #[test]
    fn test_parse_filter_type_aliases() {
        assert_eq!("varchar".parse::<FilterType>().unwrap(), FilterType::String);
        assert_eq!("bigint".parse::<FilterType>().unwrap(), FilterType::Number);
        assert_eq!("decimal".parse::<FilterType>().unwrap(), FilterType::Number);
        assert_eq!("timestamp".parse::<FilterType>().unwrap(), FilterType::Date);
        assert_eq!("bool".parse::<FilterType>().unwrap(), FilterType::Boolean);
    }

    #[test]
    fn test_parse_filter_type_unknown() {
        assert!("geography".parse::<FilterType>().is_err());
    }

    #[test]
    fn test_parse_field_class() {
        assert_eq!("dimension".parse::<FieldClass>().unwrap(), FieldClass::Dimension);
        assert_eq!("custom_sql_dimension".parse::<FieldClass>().unwrap(), FieldClass::Dimension);
        assert_eq!("metric".parse::<FieldClass>().unwrap(), FieldClass::Metric);
        assert_eq!("table_calculation".parse::<FieldClass>().unwrap(), FieldClass::TableCalculation);
        assert!("measure".parse::<FieldClass>().is_err());
    }

    #[test]
    fn test_field_class_serde() {
        let json = serde_json::to_string(&FieldClass::TableCalculation).unwrap();
        assert_eq!(json, "\"table_calculation\"");
        let parsed: FieldClass = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, FieldClass::TableCalculation);
    }

    #[test]
    fn test_labels() {
        assert_eq!(FieldClass::TableCalculation.label(), "table calculation");
        assert_eq!(FilterType::Number.to_string(), "number");
    }
}
