//! Fetcher strategies and the registry that selects them.
//!
//! One fetcher per supported type. Each reads its environment variable,
//! substitutes the default when the value is empty, and converts the
//! string. Wrapping into `Option` is left to the generated setter.

use crate::annotation::FieldAnnotation;
use crate::duration::parse_duration;
use crate::error::PopulateError;
use crate::value::Value;
use chrono::{DateTime, FixedOffset, NaiveDate, NaiveDateTime, NaiveTime, Utc};
use fluent_uri::UriRef;
use rand::Rng;
use std::env::{self, VarError};
use std::fmt;

/// Literal that makes a float fetcher produce a random value in `[0, 1)`.
pub const RANDOM_LITERAL: &str = "random";

/// Literal that makes a timestamp fetcher produce the current time.
pub const NOW_LITERAL: &str = "now";

/// Kind of conversion a fetcher performs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TypeTag {
    Text,
    Integer,
    Boolean,
    Float,
    Timestamp,
    Duration,
    Url,
}

/// Type names the registry knows, as they appear in field declarations.
const REGISTRY: [(&str, TypeTag); 7] = [
    ("String", TypeTag::Text),
    ("isize", TypeTag::Integer),
    ("bool", TypeTag::Boolean),
    ("f64", TypeTag::Float),
    ("DateTime", TypeTag::Timestamp),
    ("Duration", TypeTag::Duration),
    ("Url", TypeTag::Url),
];

impl TypeTag {
    /// Look up the fetcher kind registered for a field's type name.
    pub fn from_type_name(type_name: &str) -> Option<Self> {
        REGISTRY
            .iter()
            .find(|(name, _)| *name == type_name)
            .map(|(_, tag)| *tag)
    }

    /// Type name this kind is registered under.
    pub fn type_name(self) -> &'static str {
        REGISTRY
            .iter()
            .find(|(_, tag)| *tag == self)
            .map_or("", |(name, _)| *name)
    }

    /// Build the fetcher for one field.
    pub fn fetcher(self, annotation: &FieldAnnotation) -> Box<dyn Fetcher> {
        let source = EnvSource::from(annotation);
        match self {
            Self::Text => Box::new(TextFetcher { source }),
            Self::Integer => Box::new(IntegerFetcher { source }),
            Self::Boolean => Box::new(BooleanFetcher { source }),
            Self::Float => Box::new(FloatFetcher { source }),
            Self::Timestamp => Box::new(TimestampFetcher {
                source,
                format: annotation.format.clone(),
            }),
            Self::Duration => Box::new(DurationFetcher { source }),
            Self::Url => Box::new(UrlFetcher { source }),
        }
    }
}

impl fmt::Display for TypeTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Text => "text",
            Self::Integer => "integer",
            Self::Boolean => "boolean",
            Self::Float => "float",
            Self::Timestamp => "timestamp",
            Self::Duration => "duration",
            Self::Url => "url",
        };
        f.write_str(name)
    }
}

/// Reads one field's value from the environment.
pub trait Fetcher {
    fn fetch(&self) -> Result<Value, PopulateError>;
}

/// Variable name and default shared by every fetcher.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EnvSource {
    pub variable_name: String,
    pub default: Option<String>,
}

impl EnvSource {
    /// Read the variable, substituting the default when it is unset or empty.
    pub fn read(&self) -> Result<String, PopulateError> {
        let value = match env::var(&self.variable_name) {
            Ok(value) => value,
            Err(VarError::NotPresent) => String::new(),
            Err(VarError::NotUnicode(_)) => {
                return Err(PopulateError::NotUnicode {
                    name: self.variable_name.clone(),
                })
            }
        };

        match &self.default {
            Some(default) if value.is_empty() => {
                tracing::trace!(variable = %self.variable_name, "variable empty, using default");
                Ok(default.clone())
            }
            _ => Ok(value),
        }
    }

    fn parse_error(&self, kind: TypeTag, value: &str, message: impl fmt::Display) -> PopulateError {
        PopulateError::parse_error(&self.variable_name, kind, value, message)
    }
}

impl From<&FieldAnnotation> for EnvSource {
    fn from(annotation: &FieldAnnotation) -> Self {
        Self {
            variable_name: annotation.variable_name.clone(),
            default: annotation.default.clone(),
        }
    }
}

/// Returns the raw string unchanged.
#[derive(Debug, Clone)]
pub struct TextFetcher {
    pub source: EnvSource,
}

impl Fetcher for TextFetcher {
    fn fetch(&self) -> Result<Value, PopulateError> {
        self.source.read().map(Value::Text)
    }
}

/// Base-10 `isize`.
#[derive(Debug, Clone)]
pub struct IntegerFetcher {
    pub source: EnvSource,
}

impl Fetcher for IntegerFetcher {
    fn fetch(&self) -> Result<Value, PopulateError> {
        let raw = self.source.read()?;
        raw.parse::<isize>()
            .map(Value::Integer)
            .map_err(|e| self.source.parse_error(TypeTag::Integer, &raw, e))
    }
}

/// `1 t T TRUE true True` and `0 f F FALSE false False`.
#[derive(Debug, Clone)]
pub struct BooleanFetcher {
    pub source: EnvSource,
}

fn parse_bool(raw: &str) -> Option<bool> {
    match raw {
        "1" | "t" | "T" | "TRUE" | "true" | "True" => Some(true),
        "0" | "f" | "F" | "FALSE" | "false" | "False" => Some(false),
        _ => None,
    }
}

impl Fetcher for BooleanFetcher {
    fn fetch(&self) -> Result<Value, PopulateError> {
        let raw = self.source.read()?;
        parse_bool(&raw).map(Value::Boolean).ok_or_else(|| {
            self.source
                .parse_error(TypeTag::Boolean, &raw, "expected one of 1, t, true, 0, f, false")
        })
    }
}

/// Base-10 `f64`, or a fresh random value for the `random` literal.
#[derive(Debug, Clone)]
pub struct FloatFetcher {
    pub source: EnvSource,
}

impl Fetcher for FloatFetcher {
    fn fetch(&self) -> Result<Value, PopulateError> {
        let raw = self.source.read()?;
        if raw == RANDOM_LITERAL {
            return Ok(Value::Float(rand::rng().random::<f64>()));
        }
        raw.parse::<f64>()
            .map(Value::Float)
            .map_err(|e| self.source.parse_error(TypeTag::Float, &raw, e))
    }
}

/// Timestamp parsed with a chrono `strftime` layout, or the current time for
/// the `now` literal.
#[derive(Debug, Clone)]
pub struct TimestampFetcher {
    pub source: EnvSource,
    pub format: String,
}

/// Parse `raw` with `format`.
///
/// Layouts with an offset specifier keep that offset; layouts without one are
/// read as UTC, and date-only layouts land on midnight UTC. An empty layout
/// means RFC 3339.
pub fn parse_timestamp(raw: &str, format: &str) -> Result<DateTime<FixedOffset>, chrono::ParseError> {
    if format.is_empty() {
        return DateTime::parse_from_rfc3339(raw);
    }
    if let Ok(stamp) = DateTime::parse_from_str(raw, format) {
        return Ok(stamp);
    }
    match NaiveDateTime::parse_from_str(raw, format) {
        Ok(naive) => Ok(naive.and_utc().fixed_offset()),
        Err(err) => NaiveDate::parse_from_str(raw, format)
            .map(|date| date.and_time(NaiveTime::MIN).and_utc().fixed_offset())
            .map_err(|_| err),
    }
}

impl Fetcher for TimestampFetcher {
    fn fetch(&self) -> Result<Value, PopulateError> {
        let raw = self.source.read()?;
        if raw == NOW_LITERAL {
            return Ok(Value::Timestamp(Utc::now().fixed_offset()));
        }
        parse_timestamp(&raw, &self.format)
            .map(Value::Timestamp)
            .map_err(|e| self.source.parse_error(TypeTag::Timestamp, &raw, e))
    }
}

/// Composite duration such as `1h2m30s`.
#[derive(Debug, Clone)]
pub struct DurationFetcher {
    pub source: EnvSource,
}

impl Fetcher for DurationFetcher {
    fn fetch(&self) -> Result<Value, PopulateError> {
        let raw = self.source.read()?;
        parse_duration(&raw)
            .map(Value::Duration)
            .map_err(|e| self.source.parse_error(TypeTag::Duration, &raw, e))
    }
}

/// RFC 3986 URI reference: absolute, relative, or empty.
#[derive(Debug, Clone)]
pub struct UrlFetcher {
    pub source: EnvSource,
}

impl Fetcher for UrlFetcher {
    fn fetch(&self) -> Result<Value, PopulateError> {
        let raw = self.source.read()?;
        raw.parse::<UriRef<String>>()
            .map(Value::Url)
            .map_err(|e| self.source.parse_error(TypeTag::Url, &raw, e))
    }
}
