//! # confview - configuration views and templates
//!
//! Load JSON, YAML, TOML or INI files into a [`Config`] whose nested mappings
//! are themselves `Config`s, read fields by key or by name, and check loaded
//! data against a declarative [`Template`].
//!
//! ## Features
//!
//! - **Recursive views**: every mapping at any depth, including inside lists,
//!   is wrapped in a [`Config`]
//! - **Templates**: presence and type checks per field, recursing into nested
//!   templates, with the full field path in every error
//! - **Example generation**: render a template's placeholder configuration in
//!   any supported format
//! - **Format detection**: [`load`] picks the format from the extension or
//!   the file content
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use confview::{FieldType, Template, load_yaml};
//!
//! let template = Template::builder("Program")
//!     .field("name", FieldType::String)
//!     .field("age", FieldType::Integer)
//!     .build();
//!
//! let config = load_yaml("config.yaml")?;
//! config.validate(&template)?;
//! println!("{}", config.attr("name")?.as_str().unwrap_or_default());
//!
//! println!("{}", template.generate("json")?);
//! # Ok::<(), confview::Error>(())
//! ```
//!
//! ## Cargo features
//!
//! `yaml`, `toml` and `ini` enable the matching adapters and are on by
//! default. JSON is always available.

pub mod config;
pub mod error;
pub mod formats;
pub mod loader;
pub mod template;

pub use config::{Config, Node};
pub use error::{Error, Result};
pub use formats::{Adapter, Format};
pub use loader::{load, load_as, load_ini, load_json, load_toml, load_yaml};
pub use template::{Field, FieldType, Template, TemplateBuilder, ValidationError};

/// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
