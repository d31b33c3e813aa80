//! Source asking other sources in order
//!
//! A `SourceChain` holds an ordered list of sources. A section lookup returns
//! the section of the first source that knows it. Sections are not merged.
//! If a document contains the section, its content completely hides the same
//! section in later sources.
//!
//! ```text
//! +--------------+--------------------------+
//! | TomlSource   | site configuration       |
//! +--------------+--------------------------+
//! | MemorySource | built-in defaults        |
//! +--------------+--------------------------+
//! ```
//!
//! ## Example
//!
//! ```rust
//! use iisconfig::{ConfigurationSource, ConfigurationSection, Element, ASPNETCORE_SECTION, ANONYMOUS_AUTHENTICATION_SECTION};
//! use iisconfig::sources::chain::SourceChain;
//! use iisconfig::sources::memory::MemorySource;
//! use iisconfig::sources::tomlfile::TomlSource;
//!
//! let site = TomlSource::parse(r#"
//!     ["system.webServer".httpPlatform]
//!     processPath = "MyApp.exe"
//! "#, "site").unwrap();
//!
//! let mut defaults = MemorySource::new();
//! defaults.insert(ANONYMOUS_AUTHENTICATION_SECTION, Element::new("defaults").with_attribute("enabled", "true"));
//!
//! let mut chain = SourceChain::new();
//! chain.add_source(site).add_source(defaults);
//!
//! assert_eq!(chain.get_required_section(ASPNETCORE_SECTION).unwrap().origin(), "site");
//! assert_eq!(chain.get_required_section(ANONYMOUS_AUTHENTICATION_SECTION).unwrap().origin(), "defaults");
//! ```
use crate::section::ConfigurationSection;
use crate::source::ConfigurationSource;
use std::sync::Arc;
use tracing::trace;

/// Implements the ordered source chain.
#[derive(Default)]
pub struct SourceChain {
	sources: Vec<Box<dyn ConfigurationSource>>
}

impl SourceChain {
	/// Creates a chain without any sources.
	pub fn new() -> Self {
		Self::default()
	}

	/// Appends a source. Sources added first are asked first.
	pub fn add_source<S: ConfigurationSource + 'static>(&mut self, source: S) -> &mut Self {
		self.sources.push(Box::new(source));
		self
	}

	/// Number of sources in the chain.
	pub fn len(&self) -> usize {
		self.sources.len()
	}

	pub fn is_empty(&self) -> bool {
		self.sources.is_empty()
	}
}

impl ConfigurationSource for SourceChain {
	fn get_section(&self, name: &str) -> Option<Arc<dyn ConfigurationSection>> {
		self.sources.iter().enumerate().find_map(|(index, source)| {
			let section = source.get_section(name)?;
			trace!(section = name, index, "section found in chained source");
			Some(section)
		})
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::element::Element;
	use crate::error::ConfigError;
	use crate::sources::memory::MemorySource;
	use crate::{ASPNETCORE_SECTION, BASIC_AUTHENTICATION_SECTION, WINDOWS_AUTHENTICATION_SECTION};

	fn prepare_test_chain() -> SourceChain {
		let mut first = MemorySource::new();
		first.insert(ASPNETCORE_SECTION, Element::new("first").with_attribute("processPath", "first.exe"));

		let mut second = MemorySource::new();
		second.insert(ASPNETCORE_SECTION, Element::new("second").with_attribute("processPath", "second.exe").with_attribute("arguments", "--second"));
		second.insert(WINDOWS_AUTHENTICATION_SECTION, Element::new("second").with_attribute("enabled", "true"));

		let mut chain = SourceChain::new();
		chain.add_source(first).add_source(second);
		chain
	}

	#[test]
	fn first_match_wins() {
		let c = prepare_test_chain();
		let section = c.get_required_section(ASPNETCORE_SECTION).unwrap();

		assert_eq!(section.get_string("processPath").unwrap(), "first.exe");
		// No merging with the hidden section of the second source
		assert!(section.get_string("arguments").is_none());
	}

	#[test]
	fn fall_through() {
		let c = prepare_test_chain();

		assert_eq!(c.get_required_section(WINDOWS_AUTHENTICATION_SECTION).unwrap().origin(), "second");
		assert!(c.get_section(BASIC_AUTHENTICATION_SECTION).is_none());
		assert!(matches!(c.get_required_section(BASIC_AUTHENTICATION_SECTION), Err(ConfigError::MissingSection(_))));
	}

	#[test]
	fn empty_chain() {
		let c = SourceChain::new();

		assert!(c.is_empty());
		assert!(c.get_section(ASPNETCORE_SECTION).is_none());
	}

	#[test]
	fn shared_source() {
		let shared = Arc::new(prepare_test_chain());

		let mut c = SourceChain::new();
		c.add_source(shared.clone());

		assert_eq!(c.len(), 1);
		assert!(Arc::ptr_eq(&c.get_section(ASPNETCORE_SECTION).unwrap(), &shared.get_section(ASPNETCORE_SECTION).unwrap()));
	}
}
