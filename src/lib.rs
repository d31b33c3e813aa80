//! Named access to the configuration sections of a web server configuration
//! store, as read by the ASP.NET Core hosting module.
//!
//! The central piece is the [`ConfigurationSource`] trait. It maps a
//! hierarchical section name like `system.webServer/httpPlatform` to a shared
//! [`ConfigurationSection`]:
//!
//! - [`get_section`](ConfigurationSource::get_section) returns `None` if the
//!   section does not exist. Use it for optional configuration.
//! - [`get_required_section`](ConfigurationSource::get_required_section)
//!   turns absence into [`ConfigError::MissingSection`]. Use it for
//!   configuration the caller can not work without.
//!
//! Sections are handed out as `Arc<dyn ConfigurationSection>`. Sources and
//! sections are `Send + Sync`, so lookups can be issued from any worker thread.
//!
//! The [`sources`] module contains the bundled configuration stores and
//! [`options`] reads the module's own settings through them.
//!
//! ```rust
//! use iisconfig::{ConfigurationSource, ConfigurationSection, ASPNETCORE_SECTION, BASIC_AUTHENTICATION_SECTION};
//! use iisconfig::sources::tomlfile::TomlSource;
//!
//! let source = TomlSource::parse(r#"
//!     ["system.webServer".httpPlatform]
//!     processPath = "dotnet"
//!     arguments = ".\\MyApp.dll"
//! "#, "web.toml").unwrap();
//!
//! let platform = source.get_required_section(ASPNETCORE_SECTION).unwrap();
//! assert_eq!(platform.get_required_string("processPath").unwrap(), "dotnet");
//!
//! // Optional sections may be absent
//! assert!(source.get_section(BASIC_AUTHENTICATION_SECTION).is_none());
//! ```
mod sectionpath;
pub use sectionpath::SectionPath;

pub mod error;
pub use error::ConfigError;

pub mod section;
pub use section::{ConfigurationSection, find_element, find_pair};

mod element;
pub use element::Element;

mod source;
pub use source::ConfigurationSource;

pub mod sources;
pub mod options;

/// Module settings (`processPath`, `arguments`, `environmentVariables`, ...).
pub const ASPNETCORE_SECTION: &str = "system.webServer/httpPlatform";
pub const WINDOWS_AUTHENTICATION_SECTION: &str = "system.webServer/security/authentication/windowsAuthentication";
pub const BASIC_AUTHENTICATION_SECTION: &str = "system.webServer/security/authentication/basicAuthentication";
pub const ANONYMOUS_AUTHENTICATION_SECTION: &str = "system.webServer/security/authentication/anonymousAuthentication";
/// Request filtering. Its `requestLimits` element carries the maximum request body size.
pub const MAX_REQUEST_BODY_SIZE_SECTION: &str = "system.webServer/security/requestFiltering";

#[cfg(test)]
mod tests {
	use super::*;
	use crate::sources::memory::MemorySource;
	use crate::sources::tomlfile::TomlSource;
	use std::sync::Arc;

	fn check_contract(source: &dyn ConfigurationSource) {
		// Present: both lookups hand out the stored section
		let optional = source.get_section(ASPNETCORE_SECTION).unwrap();
		let required = source.get_required_section(ASPNETCORE_SECTION).unwrap();
		assert!(Arc::ptr_eq(&optional, &required));
		assert_eq!(required.get_string("processPath").unwrap(), "dotnet");

		// Absent: optional lookup is empty, required lookup fails
		assert!(source.get_section(BASIC_AUTHENTICATION_SECTION).is_none());
		assert_eq!(source.get_required_section(BASIC_AUTHENTICATION_SECTION).unwrap_err(), ConfigError::MissingSection(BASIC_AUTHENTICATION_SECTION.to_owned()));
	}

	#[test]
	fn memory_contract() {
		let mut s = MemorySource::new();
		s.insert(ASPNETCORE_SECTION, Element::new("memory").with_attribute("processPath", "dotnet"));

		check_contract(&s);
	}

	#[test]
	fn document_contract() {
		let s = TomlSource::parse("[\"system.webServer\".httpPlatform]\nprocessPath = \"dotnet\"\n", "web.toml").unwrap();

		check_contract(&s);
	}

	#[test]
	fn section_names() {
		for name in [ASPNETCORE_SECTION, WINDOWS_AUTHENTICATION_SECTION, BASIC_AUTHENTICATION_SECTION, ANONYMOUS_AUTHENTICATION_SECTION, MAX_REQUEST_BODY_SIZE_SECTION].iter() {
			let path = SectionPath::from(*name);

			assert_eq!(path.iter().next(), Some("system.webServer"));
			assert_eq!(path.to_string(), *name);
		}
	}
}
