//! Typed settings of the hosting module.
//!
//! The module reads its own settings from the `httpPlatform` section and the
//! security settings of the web server. [`HostingOptions`] needs the
//! `httpPlatform` section to exist. [`SecurityOptions`] works with whatever
//! subset of the security sections is present and falls back to the web
//! server's defaults.
//!
//! ```rust
//! use iisconfig::{Element, ASPNETCORE_SECTION};
//! use iisconfig::options::{HostingModel, ModuleOptions};
//! use iisconfig::sources::memory::MemorySource;
//!
//! let mut source = MemorySource::new();
//! source.insert(ASPNETCORE_SECTION, Element::new("memory")
//!     .with_attribute("processPath", "dotnet")
//!     .with_attribute("hostingModel", "InProcess"));
//!
//! let options = ModuleOptions::load(&source).unwrap();
//! assert_eq!(options.hosting.hosting_model, HostingModel::InProcess);
//! assert!(!options.security.windows_auth_enabled);
//! ```
use crate::error::ConfigError;
use crate::section::ConfigurationSection;
use crate::source::ConfigurationSource;
use crate::{ANONYMOUS_AUTHENTICATION_SECTION, ASPNETCORE_SECTION, BASIC_AUTHENTICATION_SECTION, MAX_REQUEST_BODY_SIZE_SECTION, WINDOWS_AUTHENTICATION_SECTION};
use std::time::Duration;
use tracing::debug;

/// Executable started for the application. Required.
pub const PROCESS_PATH: &str = "processPath";
/// Command line arguments passed to the process.
pub const ARGUMENTS: &str = "arguments";
/// `inprocess` or `outofprocess`.
pub const HOSTING_MODEL: &str = "hostingModel";
/// Whether stdout and stderr of the process are written to a log file.
pub const STDOUT_LOG_ENABLED: &str = "stdoutLogEnabled";
/// Path prefix of the stdout log file.
pub const STDOUT_LOG_FILE: &str = "stdoutLogFile";
/// Element whose collection lists environment variables for the process.
pub const ENVIRONMENT_VARIABLES: &str = "environmentVariables";
/// Element whose collection lists handler specific settings.
pub const HANDLER_SETTINGS: &str = "handlerSettings";
/// Suppresses the error page shown when the application fails to start.
pub const DISABLE_STARTUP_ERROR_PAGE: &str = "disableStartUpErrorPage";
/// Seconds the process may take to start.
pub const STARTUP_TIME_LIMIT: &str = "startupTimeLimit";
/// Seconds the process may take to shut down.
pub const SHUTDOWN_TIME_LIMIT: &str = "shutdownTimeLimit";
/// Time span a forwarded request may take.
pub const REQUEST_TIMEOUT: &str = "requestTimeout";
/// Flag of the authentication sections.
pub const ENABLED: &str = "enabled";
/// Child element of request filtering holding the limits.
pub const REQUEST_LIMITS: &str = "requestLimits";
/// Maximum request body size in bytes.
pub const MAX_ALLOWED_CONTENT_LENGTH: &str = "maxAllowedContentLength";

/// Default for `stdoutLogFile`.
pub const DEFAULT_STDOUT_LOG_FILE: &str = ".\\logs\\stdout";
/// Default for `startupTimeLimit`, in seconds.
pub const DEFAULT_STARTUP_TIME_LIMIT: u32 = 120;
/// Default for `shutdownTimeLimit`, in seconds.
pub const DEFAULT_SHUTDOWN_TIME_LIMIT: u32 = 10;
/// Default for `requestTimeout`.
pub const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(120);
/// Request body limit used when request filtering does not configure one.
pub const DEFAULT_MAX_REQUEST_BODY_SIZE: u64 = 30_000_000;

/// Where the application runs relative to the web server worker process.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HostingModel {
	InProcess,
	OutOfProcess
}

impl Default for HostingModel {
	fn default() -> Self {
		Self::OutOfProcess
	}
}

impl HostingModel {
	fn read(section: &dyn ConfigurationSection) -> Result<Self, ConfigError> {
		let value = match section.get_string(HOSTING_MODEL) {
			Some(value) => value,
			None => return Ok(Self::default())
		};

		let model = value.trim();
		if model.is_empty() || model.eq_ignore_ascii_case("outofprocess") {
			Ok(Self::OutOfProcess)
		} else if model.eq_ignore_ascii_case("inprocess") {
			Ok(Self::InProcess)
		} else {
			Err(ConfigError::InvalidValue {
				name: HOSTING_MODEL.to_owned(),
				value: value.clone(),
				expected: "'inprocess' or 'outofprocess'",
				origin: section.origin().to_owned()
			})
		}
	}
}

/// Settings of the `httpPlatform` section.
#[derive(Debug, Clone, PartialEq)]
pub struct HostingOptions {
	pub process_path: String,
	pub arguments: String,
	pub hosting_model: HostingModel,
	pub stdout_log_enabled: bool,
	pub stdout_log_file: String,
	pub disable_startup_error_page: bool,
	pub environment_variables: Vec<(String, String)>,
	pub handler_settings: Vec<(String, String)>,
	pub startup_time_limit: Duration,
	pub shutdown_time_limit: Duration,
	pub request_timeout: Duration
}

impl HostingOptions {
	/// Reads the `httpPlatform` section.
	///
	/// Fails with [`ConfigError::MissingSection`] if the section does not
	/// exist and with [`ConfigError::MissingAttribute`] if it has no
	/// `processPath`.
	pub fn load(source: &dyn ConfigurationSource) -> Result<Self, ConfigError> {
		let section = source.get_required_section(ASPNETCORE_SECTION)?;

		let options = Self {
			process_path: section.get_required_string(PROCESS_PATH)?,
			arguments: section.get_string(ARGUMENTS).unwrap_or_default(),
			hosting_model: HostingModel::read(section.as_ref())?,
			stdout_log_enabled: section.get_bool(STDOUT_LOG_ENABLED)?.unwrap_or(false),
			stdout_log_file: section.get_string(STDOUT_LOG_FILE).unwrap_or_else(|| DEFAULT_STDOUT_LOG_FILE.to_owned()),
			disable_startup_error_page: section.get_bool(DISABLE_STARTUP_ERROR_PAGE)?.unwrap_or(false),
			environment_variables: section.get_key_value_pairs(ENVIRONMENT_VARIABLES)?,
			handler_settings: section.get_key_value_pairs(HANDLER_SETTINGS)?,
			startup_time_limit: Duration::from_secs(section.get_uint(STARTUP_TIME_LIMIT)?.unwrap_or(DEFAULT_STARTUP_TIME_LIMIT).into()),
			shutdown_time_limit: Duration::from_secs(section.get_uint(SHUTDOWN_TIME_LIMIT)?.unwrap_or(DEFAULT_SHUTDOWN_TIME_LIMIT).into()),
			request_timeout: section.get_timespan(REQUEST_TIMEOUT)?.unwrap_or(DEFAULT_REQUEST_TIMEOUT)
		};

		debug!(process_path = %options.process_path, hosting_model = ?options.hosting_model, "loaded hosting options");

		Ok(options)
	}
}

/// Authentication and request filtering settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SecurityOptions {
	pub windows_auth_enabled: bool,
	pub basic_auth_enabled: bool,
	pub anonymous_auth_enabled: bool,
	pub max_request_body_size: u64
}

impl SecurityOptions {
	/// Reads the authentication and request filtering sections.
	///
	/// All of the sections are optional. An authentication scheme counts as
	/// enabled only if its section exists and sets `enabled`. The request body
	/// limit falls back to its default unless request filtering has a
	/// `requestLimits` element setting `maxAllowedContentLength`.
	pub fn load(source: &dyn ConfigurationSource) -> Result<Self, ConfigError> {
		let options = Self {
			windows_auth_enabled: auth_enabled(source, WINDOWS_AUTHENTICATION_SECTION)?,
			basic_auth_enabled: auth_enabled(source, BASIC_AUTHENTICATION_SECTION)?,
			anonymous_auth_enabled: auth_enabled(source, ANONYMOUS_AUTHENTICATION_SECTION)?,
			max_request_body_size: max_request_body_size(source)?
		};

		debug!(?options, "loaded security options");

		Ok(options)
	}
}

fn auth_enabled(source: &dyn ConfigurationSource, name: &str) -> Result<bool, ConfigError> {
	match source.get_section(name) {
		Some(section) => Ok(section.get_bool(ENABLED)?.unwrap_or(false)),
		None => Ok(false)
	}
}

fn max_request_body_size(source: &dyn ConfigurationSource) -> Result<u64, ConfigError> {
	match source.get_section(MAX_REQUEST_BODY_SIZE_SECTION).and_then(|s| s.get_section(REQUEST_LIMITS)) {
		Some(limits) => Ok(limits.get_ulong(MAX_ALLOWED_CONTENT_LENGTH)?.unwrap_or(DEFAULT_MAX_REQUEST_BODY_SIZE)),
		None => Ok(DEFAULT_MAX_REQUEST_BODY_SIZE)
	}
}

/// All settings the module reads at startup.
#[derive(Debug, Clone, PartialEq)]
pub struct ModuleOptions {
	pub hosting: HostingOptions,
	pub security: SecurityOptions
}

impl ModuleOptions {
	/// Reads [`HostingOptions`] and [`SecurityOptions`] from `source`.
	pub fn load(source: &dyn ConfigurationSource) -> Result<Self, ConfigError> {
		Ok(Self {
			hosting: HostingOptions::load(source)?,
			security: SecurityOptions::load(source)?
		})
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::element::Element;
	use crate::sources::memory::MemorySource;
	use crate::sources::tomlfile::TomlSource;

	fn platform() -> Element {
		Element::new("memory").with_attribute(PROCESS_PATH, "dotnet")
	}

	#[test]
	fn hosting_defaults() {
		let mut s = MemorySource::new();
		s.insert(ASPNETCORE_SECTION, platform());

		let options = HostingOptions::load(&s).unwrap();

		assert_eq!(options, HostingOptions {
			process_path: "dotnet".to_owned(),
			arguments: String::new(),
			hosting_model: HostingModel::OutOfProcess,
			stdout_log_enabled: false,
			stdout_log_file: DEFAULT_STDOUT_LOG_FILE.to_owned(),
			disable_startup_error_page: false,
			environment_variables: Vec::new(),
			handler_settings: Vec::new(),
			startup_time_limit: Duration::from_secs(120),
			shutdown_time_limit: Duration::from_secs(10),
			request_timeout: Duration::from_secs(120)
		});
	}

	#[test]
	fn hosting_from_document() {
		let s = TomlSource::parse(r#"
["system.webServer".httpPlatform]
processPath = "dotnet"
arguments = ".\\MyApp.dll"
hostingModel = "inprocess"
stdoutLogEnabled = true
stdoutLogFile = "\\\\?\\D:\\logs\\stdout"
startupTimeLimit = 30
shutdownTimeLimit = 5
requestTimeout = "00:00:30"

[["system.webServer".httpPlatform.handlerSettings.add]]
name = "debugLevel"
value = "FILE,TRACE"
"#, "web.toml").unwrap();

		let options = HostingOptions::load(&s).unwrap();

		assert_eq!(options.arguments, ".\\MyApp.dll");
		assert_eq!(options.hosting_model, HostingModel::InProcess);
		assert!(options.stdout_log_enabled);
		assert_eq!(options.stdout_log_file, "\\\\?\\D:\\logs\\stdout");
		assert_eq!(options.startup_time_limit, Duration::from_secs(30));
		assert_eq!(options.shutdown_time_limit, Duration::from_secs(5));
		assert_eq!(options.request_timeout, Duration::from_secs(30));
		assert_eq!(options.handler_settings, [("debugLevel".to_owned(), "FILE,TRACE".to_owned())]);
	}

	#[test]
	fn hosting_requires_section_and_process_path() {
		let mut s = MemorySource::new();
		assert_eq!(HostingOptions::load(&s).unwrap_err(), ConfigError::MissingSection(ASPNETCORE_SECTION.to_owned()));

		s.insert(ASPNETCORE_SECTION, Element::new("memory").with_attribute(ARGUMENTS, "app.dll"));
		assert_eq!(HostingOptions::load(&s).unwrap_err(), ConfigError::MissingAttribute { name: PROCESS_PATH.to_owned(), origin: "memory".to_owned() });
	}

	#[test]
	fn hosting_model_values() {
		for (value, expected) in [("InProcess", HostingModel::InProcess), ("OUTOFPROCESS", HostingModel::OutOfProcess), ("", HostingModel::OutOfProcess)].iter() {
			let mut s = MemorySource::new();
			s.insert(ASPNETCORE_SECTION, platform().with_attribute(HOSTING_MODEL, value));

			assert_eq!(HostingOptions::load(&s).unwrap().hosting_model, *expected);
		}

		let mut s = MemorySource::new();
		s.insert(ASPNETCORE_SECTION, platform().with_attribute(HOSTING_MODEL, "sideways"));
		assert!(matches!(HostingOptions::load(&s).unwrap_err(), ConfigError::InvalidValue { ref name, .. } if name == HOSTING_MODEL));
	}

	#[test]
	fn security_defaults() {
		let s = MemorySource::new();

		assert_eq!(SecurityOptions::load(&s).unwrap(), SecurityOptions {
			windows_auth_enabled: false,
			basic_auth_enabled: false,
			anonymous_auth_enabled: false,
			max_request_body_size: DEFAULT_MAX_REQUEST_BODY_SIZE
		});
	}

	#[test]
	fn security_sections() {
		let mut s = MemorySource::new();
		s.insert(WINDOWS_AUTHENTICATION_SECTION, Element::new("memory").with_attribute(ENABLED, "true"));
		s.insert(BASIC_AUTHENTICATION_SECTION, Element::new("memory"));
		s.insert(ANONYMOUS_AUTHENTICATION_SECTION, Element::new("memory").with_attribute(ENABLED, "false"));
		s.insert(MAX_REQUEST_BODY_SIZE_SECTION, Element::new("memory")
			.with_child(REQUEST_LIMITS, Element::new("memory").with_attribute(MAX_ALLOWED_CONTENT_LENGTH, "4294967296")));

		let options = SecurityOptions::load(&s).unwrap();

		assert!(options.windows_auth_enabled);
		assert!(!options.basic_auth_enabled);
		assert!(!options.anonymous_auth_enabled);
		assert_eq!(options.max_request_body_size, 4_294_967_296);
	}

	#[test]
	fn request_limits_without_length() {
		let mut s = MemorySource::new();

		// Request filtering without request limits keeps the default
		s.insert(MAX_REQUEST_BODY_SIZE_SECTION, Element::new("memory"));
		assert_eq!(SecurityOptions::load(&s).unwrap().max_request_body_size, DEFAULT_MAX_REQUEST_BODY_SIZE);

		// Request limits that only set other limits keep the default, too
		s.insert(MAX_REQUEST_BODY_SIZE_SECTION, Element::new("memory").with_child(REQUEST_LIMITS, Element::new("memory").with_attribute("maxUrl", "4096")));
		assert_eq!(SecurityOptions::load(&s).unwrap().max_request_body_size, DEFAULT_MAX_REQUEST_BODY_SIZE);

		s.insert(MAX_REQUEST_BODY_SIZE_SECTION, Element::new("memory").with_child(REQUEST_LIMITS, Element::new("memory").with_attribute(MAX_ALLOWED_CONTENT_LENGTH, "lots")));
		assert!(matches!(SecurityOptions::load(&s).unwrap_err(), ConfigError::InvalidValue { .. }));
	}

	#[test]
	fn invalid_flag() {
		let mut s = MemorySource::new();
		s.insert(BASIC_AUTHENTICATION_SECTION, Element::new("memory").with_attribute(ENABLED, "maybe"));

		assert!(matches!(SecurityOptions::load(&s).unwrap_err(), ConfigError::InvalidValue { .. }));
	}
}
