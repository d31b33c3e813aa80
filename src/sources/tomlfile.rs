//! TOML document source.
//!
//! This source loads a configuration document written in TOML and serves its
//! sections. The document mirrors the element hierarchy of the web server
//! configuration. Every component of a section name is a nested table. Since
//! components like `system.webServer` contain dots, they have to be quoted:
//!
//! ```toml
//! ["system.webServer".httpPlatform]
//! processPath = "dotnet"
//! arguments = ".\\MyApp.dll"
//! stdoutLogEnabled = false
//! startupTimeLimit = 120
//!
//! [["system.webServer".httpPlatform.environmentVariables.add]]
//! name = "ASPNETCORE_ENVIRONMENT"
//! value = "Development"
//!
//! ["system.webServer".security.requestFiltering.requestLimits]
//! maxAllowedContentLength = 30000000
//! ```
//!
//! Values are mapped onto elements like this:
//!
//! * Strings, booleans, integers, floats and datetimes become attributes. Their
//!   textual form is what the typed getters of
//!   [`ConfigurationSection`](crate::ConfigurationSection) parse.
//! * Tables become child elements.
//! * Arrays of tables become collection items, in document order. Items of an
//!   array named `add` belong to the collection of the enclosing element. An
//!   array with any other name becomes a child element of that name holding
//!   the items, so `[[x.environmentVariables]]` and
//!   `[[x.environmentVariables.add]]` describe the same collection while
//!   `[[x.environmentVariables.remove]]` stays apart from it.
//! * Arrays of plain values can not be represented and are rejected while
//!   loading.
//!
//! ```no_run
//! use iisconfig::sources::tomlfile::TomlSource;
//!
//! let source = TomlSource::open("web.toml").expect("Could not load configuration.");
//! ```
//!
//! The document is parsed once while loading. Lookups walk the parsed element
//! tree and hand out the same section instance every time.
use crate::element::Element;
use crate::section::ConfigurationSection;
use crate::sectionpath::SectionPath;
use crate::source::ConfigurationSource;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use thiserror::Error;
use tracing::{debug, trace};

/// Enumeration containing load errors.
#[derive(Debug, Error)]
pub enum Error {
	/// An I/O error occurred while reading the document.
	#[error("I/O error reading '{}': {}", .path.display(), .source)]
	Io {
		path: PathBuf,
		#[source]
		source: std::io::Error
	},
	/// The document is not valid TOML.
	#[error("Parse error in '{origin}': {source}")]
	Parse {
		origin: String,
		#[source]
		source: ::toml::de::Error
	},
	/// An array at `key` holds something other than tables.
	#[error("Unsupported {kind} in array '{key}' in '{origin}'")]
	UnsupportedValue {
		key: String,
		kind: &'static str,
		origin: String
	}
}

/// Implements the TOML document source.
#[derive(Debug)]
pub struct TomlSource {
	root: Element
}

impl TomlSource {
	/// Parses `text` as a configuration document.
	///
	/// `origin` names the document in error messages, typically the file name.
	///
	/// ```rust
	/// use iisconfig::{ConfigurationSource, ConfigurationSection, ASPNETCORE_SECTION};
	/// use iisconfig::sources::tomlfile::TomlSource;
	///
	/// let source = TomlSource::parse(r#"
	///     ["system.webServer".httpPlatform]
	///     processPath = "dotnet"
	/// "#, "inline").unwrap();
	///
	/// let section = source.get_required_section(ASPNETCORE_SECTION).unwrap();
	/// assert_eq!(section.get_required_string("processPath").unwrap(), "dotnet");
	/// ```
	pub fn parse(text: &str, origin: &str) -> Result<Self, Error> {
		let table: ::toml::Table = text.parse().map_err(|source| Error::Parse {
			origin: origin.to_owned(),
			source
		})?;

		let origin: Arc<str> = Arc::from(origin);
		let root = convert_table(&table, &origin, &SectionPath::default())?;

		debug!(origin = %origin, elements = table.len(), "loaded configuration document");

		Ok(Self {
			root
		})
	}

	/// Reads and parses the document at `path`.
	pub fn open<P: AsRef<Path>>(path: P) -> Result<Self, Error> {
		let path = path.as_ref();
		let text = fs::read_to_string(path).map_err(|source| Error::Io {
			path: path.to_owned(),
			source
		})?;

		Self::parse(&text, &path.to_string_lossy())
	}
}

/// Array key whose items belong to the collection of the enclosing element.
const ADD_KEY: &str = "add";

fn value_kind(value: &::toml::Value) -> &'static str {
	match value {
		::toml::Value::String(_) => "string",
		::toml::Value::Integer(_) => "integer",
		::toml::Value::Float(_) => "float",
		::toml::Value::Boolean(_) => "boolean",
		::toml::Value::Datetime(_) => "datetime",
		::toml::Value::Array(_) => "array of values",
		::toml::Value::Table(_) => "table"
	}
}

fn convert_items(items: &[::toml::Value], origin: &Arc<str>, path: &SectionPath) -> Result<Vec<Element>, Error> {
	items.iter().map(|item| match item {
		::toml::Value::Table(item) => convert_table(item, origin, path),
		other => Err(Error::UnsupportedValue {
			key: path.to_string(),
			kind: value_kind(other),
			origin: origin.to_string()
		})
	}).collect()
}

fn convert_table(table: &::toml::Table, origin: &Arc<str>, path: &SectionPath) -> Result<Element, Error> {
	let mut element = Element::with_origin(origin.clone());

	for (key, value) in table {
		let key_path = path.push(key);

		match value {
			::toml::Value::String(s) => { element.set_attribute(key, s); },
			::toml::Value::Integer(i) => { element.set_attribute(key, &i.to_string()); },
			::toml::Value::Float(f) => { element.set_attribute(key, &f.to_string()); },
			::toml::Value::Boolean(b) => { element.set_attribute(key, if *b { "true" } else { "false" }); },
			::toml::Value::Datetime(d) => { element.set_attribute(key, &d.to_string()); },
			::toml::Value::Table(child) => { element.set_child(key, convert_table(child, origin, &key_path)?); },
			::toml::Value::Array(items) if key == ADD_KEY => {
				for item in convert_items(items, origin, &key_path)? {
					element.push_item(item);
				}
			},
			::toml::Value::Array(items) => {
				let mut collection = Element::with_origin(origin.clone());
				for item in convert_items(items, origin, &key_path)? {
					collection.push_item(item);
				}
				element.set_child(key, collection);
			}
		}
	}

	Ok(element)
}

impl ConfigurationSource for TomlSource {
	fn get_section(&self, name: &str) -> Option<Arc<dyn ConfigurationSection>> {
		let section = self.root.descend(&SectionPath::from(name));
		trace!(section = name, origin = self.root.origin(), found = section.is_some(), "document section lookup");

		section.map(|s| s as Arc<dyn ConfigurationSection>)
	}
}
