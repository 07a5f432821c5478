//! Converted values handed from fetchers to generated setters.

use crate::fetch::TypeTag;
use chrono::{DateTime, FixedOffset, Local, Utc};
use fluent_uri::UriRef;
use std::time::Duration;
use url::Url;

/// A converted environment value, one variant per registered fetcher.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Text(String),
    Integer(isize),
    Boolean(bool),
    Float(f64),
    Timestamp(DateTime<FixedOffset>),
    Duration(Duration),
    Url(UriRef<String>),
}

impl Value {
    /// The fetcher kind that produces this variant.
    pub fn type_tag(&self) -> TypeTag {
        match self {
            Self::Text(_) => TypeTag::Text,
            Self::Integer(_) => TypeTag::Integer,
            Self::Boolean(_) => TypeTag::Boolean,
            Self::Float(_) => TypeTag::Float,
            Self::Timestamp(_) => TypeTag::Timestamp,
            Self::Duration(_) => TypeTag::Duration,
            Self::Url(_) => TypeTag::Url,
        }
    }
}

/// Conversion from a [`Value`] into a concrete field type.
///
/// Used by `#[derive(Populate)]` setters. On a kind mismatch the value is
/// handed back unchanged.
pub trait FromValue: Sized {
    fn from_value(value: Value) -> Result<Self, Value>;
}

macro_rules! impl_from_value {
    ( $( $ty:ty => $variant:ident ),* $(,)? ) => {
        $(
            impl FromValue for $ty {
                fn from_value(value: Value) -> Result<Self, Value> {
                    match value {
                        Value::$variant(inner) => Ok(inner),
                        other => Err(other),
                    }
                }
            }
        )*
    };
}

impl_from_value! {
    String => Text,
    isize => Integer,
    bool => Boolean,
    f64 => Float,
    DateTime<FixedOffset> => Timestamp,
    Duration => Duration,
    UriRef<String> => Url,
}

impl FromValue for DateTime<Utc> {
    fn from_value(value: Value) -> Result<Self, Value> {
        DateTime::<FixedOffset>::from_value(value).map(|dt| dt.with_timezone(&Utc))
    }
}

impl FromValue for DateTime<Local> {
    fn from_value(value: Value) -> Result<Self, Value> {
        DateTime::<FixedOffset>::from_value(value).map(|dt| dt.with_timezone(&Local))
    }
}

/// Only absolute references convert; `url::Url` has no relative form.
impl FromValue for Url {
    fn from_value(value: Value) -> Result<Self, Value> {
        match value {
            Value::Url(uri) => Url::parse(uri.as_str()).map_err(|_| Value::Url(uri)),
            other => Err(other),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_matching_variant() {
        assert_eq!(String::from_value(Value::Text("foo".into())), Ok("foo".to_string()));
        assert_eq!(isize::from_value(Value::Integer(-3)), Ok(-3));
        assert_eq!(
            Duration::from_value(Value::Duration(Duration::from_secs(1))),
            Ok(Duration::from_secs(1))
        );
    }

    #[test]
    fn test_mismatch_returns_value() {
        assert_eq!(bool::from_value(Value::Integer(1)), Err(Value::Integer(1)));
    }

    #[test]
    fn test_timestamp_timezones() {
        let offset = FixedOffset::east_opt(2 * 3600).unwrap();
        let stamp = offset.with_ymd_and_hms(2020, 5, 1, 13, 11, 0).unwrap();

        let utc = DateTime::<Utc>::from_value(Value::Timestamp(stamp)).unwrap();
        assert_eq!(utc, Utc.with_ymd_and_hms(2020, 5, 1, 11, 11, 0).unwrap());

        let local = DateTime::<Local>::from_value(Value::Timestamp(stamp)).unwrap();
        assert_eq!(local, stamp);
    }

    #[test]
    fn test_type_tag() {
        assert_eq!(Value::Float(0.5).type_tag(), TypeTag::Float);
        assert_eq!(
            Value::Url(UriRef::parse("/api/v1".to_string()).unwrap()).type_tag(),
            TypeTag::Url
        );
    }

    #[test]
    fn test_url_requires_absolute_reference() {
        let absolute: UriRef<String> = "https://www.linux.org/docs".parse().unwrap();
        let url = Url::from_value(Value::Url(absolute)).unwrap();
        assert_eq!(url.host_str(), Some("www.linux.org"));
        assert_eq!(url.path(), "/docs");

        let relative: UriRef<String> = "/api/v1?x=1".parse().unwrap();
        assert_eq!(
            Url::from_value(Value::Url(relative.clone())),
            Err(Value::Url(relative.clone()))
        );
        assert_eq!(UriRef::<String>::from_value(Value::Url(relative.clone())), Ok(relative));
    }
}
