//! Contains the ConfigurationSource trait that must be implemented by configuration stores.
use crate::error::ConfigError;
use crate::section::ConfigurationSection;
use std::sync::Arc;
use tracing::warn;

/// Trait that must be implemented by configuration sources.
///
/// A configuration source binds to one configuration store. It is not
/// `Clone`. Share it by reference or behind an `Arc`. Lookups take `&self`
/// and may be issued from several threads at once.
pub trait ConfigurationSource: Send + Sync {
	/// Get a configuration section.
	///
	/// `name` is a hierarchical section name like
	/// `system.webServer/httpPlatform`. The source returns a shared reference
	/// to the section or `None` if the store does not contain it.
	///
	/// Absence is not an error. Use
	/// [`get_required_section`](#method.get_required_section) for sections that
	/// must exist.
	fn get_section(&self, name: &str) -> Option<Arc<dyn ConfigurationSection>>;

	/// Get a configuration section that must exist.
	///
	/// Delegates to [`get_section`](#tymethod.get_section) and returns
	/// [`ConfigError::MissingSection`] if the section is absent.
	///
	/// ## Example
	///
	/// ```rust
	/// use iisconfig::{ConfigurationSource, Element, ASPNETCORE_SECTION, BASIC_AUTHENTICATION_SECTION};
	/// use iisconfig::sources::memory::MemorySource;
	///
	/// let mut source = MemorySource::new();
	/// source.insert(ASPNETCORE_SECTION, Element::new("memory").with_attribute("processPath", "dotnet"));
	///
	/// assert!(source.get_required_section(ASPNETCORE_SECTION).is_ok());
	/// assert!(source.get_required_section(BASIC_AUTHENTICATION_SECTION).unwrap_err().is_missing());
	/// ```
	fn get_required_section(&self, name: &str) -> Result<Arc<dyn ConfigurationSection>, ConfigError> {
		self.get_section(name).ok_or_else(|| {
			warn!(section = name, "required configuration section is missing");
			ConfigError::MissingSection(name.to_owned())
		})
	}
}

impl <S: ConfigurationSource + ?Sized> ConfigurationSource for Arc<S> {
	fn get_section(&self, name: &str) -> Option<Arc<dyn ConfigurationSection>> {
		(**self).get_section(name)
	}
}

impl <S: ConfigurationSource + ?Sized> ConfigurationSource for Box<S> {
	fn get_section(&self, name: &str) -> Option<Arc<dyn ConfigurationSection>> {
		(**self).get_section(name)
	}
}
