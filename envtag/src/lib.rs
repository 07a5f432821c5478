//! Populate struct fields from environment variables with tag annotations
//!
//! `envtag` fills in the fields of a struct from process environment variables.
//! Each field carries a `#[conf("...")]` tag naming its variable, an optional
//! default and, for timestamps, a layout. The tag is parsed on every call and
//! a fetcher is picked by the field's type name.
//!
//! # Features
//!
//! - **Declarative**: tag strings on fields, registered with `#[derive(Populate)]`
//! - **Typed**: text, integers, booleans, floats, timestamps, durations and URLs
//! - **Defaults**: used when the variable is unset *or empty*
//! - **Optional fields**: `Option<T>` fields receive `Some(value)`
//! - **Generated values**: `random` for floats, `now` for timestamps
//!
//! # Supported field types
//!
//! | Type | Accepted input |
//! |---|---|
//! | `String` | anything |
//! | `isize` | base-10 integer |
//! | `bool` | `1 t T TRUE true True`, `0 f F FALSE false False` |
//! | `f64` | base-10 float, or `random` for a value in `[0, 1)` |
//! | `chrono::DateTime<Utc \| FixedOffset \| Local>` | `format` layout (strftime), RFC 3339 without one, or `now` |
//! | `std::time::Duration` | `1h2m30s`, `1.5h`, `300ms`, ... |
//! | `envtag::UriRef<String>` | URI reference: absolute, relative or empty |
//! | `url::Url` | absolute URL |
//!
//! Each may also be wrapped in `Option`. Types are recognised by their bare
//! name or full path, so a lookalike such as `chrono::Duration` is reported
//! as [`PopulateError::UnsupportedType`] at runtime.
//!
//! # Example
//!
//! ```rust
//! use envtag::Populate;
//! use std::time::Duration;
//!
//! #[derive(Debug, Default, Populate)]
//! struct Config {
//!     #[conf("APP_NAME,default=foo")]
//!     pub name: String,
//!
//!     #[conf("APP_WORKERS,default=10")]
//!     pub workers: isize,
//!
//!     #[conf("APP_TIMEOUT,default=6m2s")]
//!     pub timeout: Duration,
//!
//!     #[conf("-")]
//!     pub computed: String,
//! }
//!
//! # fn main() -> anyhow::Result<()> {
//! #     std::env::set_var("APP_WORKERS", "888");
//! let mut config = Config::default();
//! envtag::populate(&mut config)?;
//!
//! assert_eq!(config.name, "foo");
//! assert_eq!(config.workers, 888);
//! assert_eq!(config.timeout, Duration::from_secs(362));
//! #     Ok(())
//! # }
//! ```
//!
//! # Tag syntax
//!
//! `"VAR_NAME[,default=<literal>][,format=<layout>]"`
//!
//! - The variable name is trimmed.
//! - `default=` is split at its first `=` only, so defaults may contain `=`.
//! - Unknown options are ignored.
//! - A tag of `"-"` or `""` skips the field.
//!
//! A struct-level `#[conf(prefix = "APP_")]` is prepended to every variable name.
//!
//! Fields must be visible outside the struct (`pub`, `pub(crate)`, ...) to be
//! written; private fields are skipped even when tagged.
//!
//! # Usage errors
//!
//! The target must be borrowed mutably. Passing it by value does not compile:
//!
//! ```compile_fail
//! use envtag::Populate;
//!
//! #[derive(Default, Populate)]
//! struct Config {
//!     #[conf("PORT,default=80")]
//!     pub port: isize,
//! }
//!
//! let config = Config::default();
//! envtag::populate(config).unwrap();
//! ```
//!
//! Only structs with named fields can derive `Populate`:
//!
//! ```compile_fail
//! use envtag::Populate;
//!
//! #[derive(Populate)]
//! struct Port(#[conf("PORT")] isize);
//! ```

pub mod annotation;
pub mod duration;
mod engine;
mod error;
pub mod fetch;
mod value;

pub use engine::{populate, FieldSlot};
pub use envtag_derive::Populate;
pub use error::PopulateError;
pub use fetch::{Fetcher, TypeTag};
pub use value::{FromValue, Value};

pub use fluent_uri::UriRef;

// Re-export for callers that bubble errors up with `anyhow`
#[doc(hidden)]
pub use anyhow;

/// A record whose fields can be populated from the environment.
///
/// Implemented by `#[derive(Populate)]`. The field table and setter are the
/// declarative stand-in for walking the struct at runtime.
pub trait Populate {
    /// Prepended to every variable name.
    const PREFIX: &'static str = "";

    /// One slot per field, in declaration order.
    fn fields() -> &'static [FieldSlot];

    /// Store `value` into the field at `index`, wrapping it in `Some` for
    /// optional fields.
    fn assign(&mut self, index: usize, value: Value) -> Result<(), PopulateError>;

    /// Populate `self` in place. See [`populate`].
    fn populate(&mut self) -> Result<(), PopulateError>
    where
        Self: Sized,
    {
        engine::populate(self)
    }

    /// Start from `Default::default()` and populate it.
    ///
    /// # Errors
    ///
    /// Same as [`populate`].
    fn from_env() -> Result<Self, PopulateError>
    where
        Self: Sized + Default,
    {
        let mut record = Self::default();
        engine::populate(&mut record)?;
        Ok(record)
    }
}
