//! General error enums.
use thiserror::Error;

/// Enum used to return errors from section lookups and attribute getters.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
	/// A required configuration section was not found in the configuration
	/// store. Returned by
	/// [`get_required_section`](crate::ConfigurationSource::get_required_section).
	#[error("Unable to get required configuration section '{0}'. Possible reason is web.config authoring error.")]
	MissingSection(String),
	/// A required child element of a section was not found.
	#[error("Element '{name}' is required@'{origin}'.")]
	MissingElement {
		name: String,
		origin: String
	},
	/// A required attribute was not found.
	#[error("Attribute '{name}' is required@'{origin}'.")]
	MissingAttribute {
		name: String,
		origin: String
	},
	/// The attribute exists but its value could not be converted into the
	/// requested type. `expected` names that type in a human readable form.
	#[error("Attribute '{name}' has invalid value '{value}', expected {expected}@'{origin}'.")]
	InvalidValue {
		name: String,
		value: String,
		expected: &'static str,
		origin: String
	}
}

impl ConfigError {
	/// Returns true if this error signals missing configuration rather than
	/// malformed configuration.
	pub fn is_missing(&self) -> bool {
		matches!(self, Self::MissingSection(_) | Self::MissingElement { .. } | Self::MissingAttribute { .. })
	}
}
