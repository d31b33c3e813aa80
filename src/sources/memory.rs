//! Source supplying sections held in memory
//!
//! The `MemorySource` stores complete sections keyed by their section name.
//! It can be used to supply defaults behind a file based source (see
//! [`chain`](crate::sources::chain)) or to stand in for the web server's
//! configuration store in tests.
//!
//! ## Example
//!
//! ```rust
//! use iisconfig::{ConfigurationSource, ConfigurationSection, Element, ASPNETCORE_SECTION};
//! use iisconfig::sources::memory::MemorySource;
//!
//! let mut source = MemorySource::new();
//! source.insert(ASPNETCORE_SECTION, Element::new("memory")
//!     .with_attribute("processPath", "dotnet")
//!     .with_attribute("arguments", ".\\MyApp.dll"));
//!
//! let section = source.get_required_section(ASPNETCORE_SECTION).unwrap();
//! assert_eq!(section.get_required_string("processPath").unwrap(), "dotnet");
//! ```
use crate::element::Element;
use crate::section::ConfigurationSection;
use crate::sectionpath::SectionPath;
use crate::source::ConfigurationSource;
use std::collections::HashMap;
use std::sync::Arc;
use tracing::trace;

/// Implements the in-memory source.
#[derive(Debug, Default)]
pub struct MemorySource {
	sections: HashMap<SectionPath, Arc<Element>>
}

impl MemorySource {
	/// Creates a new memory source without any sections.
	pub fn new() -> Self {
		Self::default()
	}

	/// Stores `section` under `name`, replacing a section previously stored
	/// under the same name.
	///
	/// Sections already handed out keep their old content.
	pub fn insert(&mut self, name: &str, section: Element) -> &mut Self {
		self.sections.insert(SectionPath::from(name), Arc::new(section));
		self
	}

	/// Removes the section `name` and returns it.
	pub fn remove(&mut self, name: &str) -> Option<Arc<Element>> {
		self.sections.remove(&SectionPath::from(name))
	}

	/// Number of stored sections.
	pub fn len(&self) -> usize {
		self.sections.len()
	}

	pub fn is_empty(&self) -> bool {
		self.sections.is_empty()
	}
}

impl ConfigurationSource for MemorySource {
	fn get_section(&self, name: &str) -> Option<Arc<dyn ConfigurationSection>> {
		let section = self.sections.get(&SectionPath::from(name)).cloned();
		trace!(section = name, found = section.is_some(), "memory section lookup");

		section.map(|s| s as Arc<dyn ConfigurationSection>)
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::error::ConfigError;
	use crate::{ASPNETCORE_SECTION, BASIC_AUTHENTICATION_SECTION, WINDOWS_AUTHENTICATION_SECTION};

	fn prepare_test_source() -> MemorySource {
		let mut s = MemorySource::new();

		s.insert(ASPNETCORE_SECTION, Element::new("memory").with_attribute("processPath", "dotnet"));
		s.insert(WINDOWS_AUTHENTICATION_SECTION, Element::new("memory").with_attribute("enabled", "true"));

		s
	}

	#[test]
	fn present_section() {
		let s = prepare_test_source();

		let optional = s.get_section(ASPNETCORE_SECTION).unwrap();
		let required = s.get_required_section(ASPNETCORE_SECTION).unwrap();

		// Every lookup hands out the stored section itself
		assert!(Arc::ptr_eq(&optional, &required));
		assert_eq!(required.get_string("processPath").unwrap(), "dotnet");
	}

	#[test]
	fn absent_section() {
		let s = prepare_test_source();

		assert!(s.get_section(BASIC_AUTHENTICATION_SECTION).is_none());
		assert_eq!(format!("{}", s.get_required_section(BASIC_AUTHENTICATION_SECTION).unwrap_err()), "Unable to get required configuration section 'system.webServer/security/authentication/basicAuthentication'. Possible reason is web.config authoring error.");
	}

	#[test]
	fn name_normalization() {
		let s = prepare_test_source();

		assert!(s.get_section("/system.webServer//httpPlatform/").is_some());
		assert!(s.get_section("system.webserver/httpPlatform").is_none());
	}

	#[test]
	fn replace_and_remove() {
		let mut s = prepare_test_source();
		let old = s.get_required_section(ASPNETCORE_SECTION).unwrap();

		s.insert(ASPNETCORE_SECTION, Element::new("memory").with_attribute("processPath", "app.exe"));
		assert_eq!(s.len(), 2);
		assert_eq!(old.get_string("processPath").unwrap(), "dotnet");
		assert_eq!(s.get_required_section(ASPNETCORE_SECTION).unwrap().get_string("processPath").unwrap(), "app.exe");

		assert!(s.remove(ASPNETCORE_SECTION).is_some());
		assert!(matches!(s.get_required_section(ASPNETCORE_SECTION), Err(ConfigError::MissingSection(_))));
		assert!(s.remove(ASPNETCORE_SECTION).is_none());
	}

	#[test]
	fn concurrent_lookup() {
		let s = prepare_test_source();
		let expected = s.get_required_section(ASPNETCORE_SECTION).unwrap();

		std::thread::scope(|scope| {
			let handles: Vec<_> = (0..4).map(|_| scope.spawn(|| s.get_required_section(ASPNETCORE_SECTION).unwrap())).collect();

			for handle in handles {
				assert!(Arc::ptr_eq(&handle.join().unwrap(), &expected));
			}
		});
	}
}
