//! The configuration section contract.
//!
//! A configuration section is a named group of attributes within the
//! configuration store. Sections can contain child elements and an ordered
//! collection of items. Sections are handed out as
//! `Arc<dyn ConfigurationSection>`, every caller holding one keeps it alive.
//!
//! Implementations only supply the raw accessors ([`get_string`],
//! [`get_section`], [`get_collection`] and [`origin`]). All typed getters and
//! the `required` variants are provided on top of them.
//!
//! [`get_string`]: ConfigurationSection::get_string
//! [`get_section`]: ConfigurationSection::get_section
//! [`get_collection`]: ConfigurationSection::get_collection
//! [`origin`]: ConfigurationSection::origin
use crate::error::ConfigError;
use std::convert::TryFrom;
use std::fmt;
use std::sync::Arc;
use std::time::Duration;

/// Attribute holding the key of a key/value collection item.
pub const COLLECTION_ITEM_NAME: &str = "name";
/// Attribute holding the value of a key/value collection item.
pub const COLLECTION_ITEM_VALUE: &str = "value";

/// Trait that must be implemented by configuration section values.
pub trait ConfigurationSection: fmt::Debug + Send + Sync {
	/// Returns the raw value of the attribute `name` or `None` if the section
	/// does not have such an attribute.
	fn get_string(&self, name: &str) -> Option<String>;

	/// Returns the child element `name` or `None` if it does not exist.
	fn get_section(&self, name: &str) -> Option<Arc<dyn ConfigurationSection>>;

	/// Returns the collection items of this section in document order.
	fn get_collection(&self) -> Vec<Arc<dyn ConfigurationSection>>;

	/// Describes where this section was loaded from. Used in error messages.
	fn origin(&self) -> &str;

	/// Reads a boolean attribute. `true` and `false` are accepted in any case.
	fn get_bool(&self, name: &str) -> Result<Option<bool>, ConfigError> {
		parse_attribute(self, name, "a boolean", parse_bool)
	}

	/// Reads an unsigned 32 bit attribute. Only decimal digits are accepted.
	fn get_uint(&self, name: &str) -> Result<Option<u32>, ConfigError> {
		parse_attribute(self, name, "an unsigned 32 bit integer", |v| digits(v).and_then(|n| u32::try_from(n).ok()))
	}

	/// Reads an unsigned 64 bit attribute.
	fn get_ulong(&self, name: &str) -> Result<Option<u64>, ConfigError> {
		parse_attribute(self, name, "an unsigned 64 bit integer", digits)
	}

	/// Reads a time span attribute in the form `[d.]hh:mm:ss[.fffffff]`.
	///
	/// ```
	/// use iisconfig::{ConfigurationSection, Element};
	/// use std::time::Duration;
	///
	/// let element = Element::new("example").with_attribute("requestTimeout", "00:02:00");
	///
	/// assert_eq!(element.get_timespan("requestTimeout").unwrap(), Some(Duration::from_secs(120)));
	/// ```
	fn get_timespan(&self, name: &str) -> Result<Option<Duration>, ConfigError> {
		parse_attribute(self, name, "a time span ([d.]hh:mm:ss[.fffffff])", parse_timespan)
	}

	/// Like [`get_string`](ConfigurationSection::get_string) but fails with `MissingAttribute` if absent.
	fn get_required_string(&self, name: &str) -> Result<String, ConfigError> {
		self.get_string(name).ok_or_else(|| missing_attribute(self, name))
	}

	/// Like [`get_bool`](ConfigurationSection::get_bool) but fails with `MissingAttribute` if absent.
	fn get_required_bool(&self, name: &str) -> Result<bool, ConfigError> {
		self.get_bool(name)?.ok_or_else(|| missing_attribute(self, name))
	}

	/// Like [`get_uint`](ConfigurationSection::get_uint) but fails with `MissingAttribute` if absent.
	fn get_required_uint(&self, name: &str) -> Result<u32, ConfigError> {
		self.get_uint(name)?.ok_or_else(|| missing_attribute(self, name))
	}

	/// Like [`get_ulong`](ConfigurationSection::get_ulong) but fails with `MissingAttribute` if absent.
	fn get_required_ulong(&self, name: &str) -> Result<u64, ConfigError> {
		self.get_ulong(name)?.ok_or_else(|| missing_attribute(self, name))
	}

	/// Like [`get_timespan`](ConfigurationSection::get_timespan) but fails with `MissingAttribute` if absent.
	fn get_required_timespan(&self, name: &str) -> Result<Duration, ConfigError> {
		self.get_timespan(name)?.ok_or_else(|| missing_attribute(self, name))
	}

	/// Returns the child element `name` or a `MissingElement` error.
	fn get_required_section(&self, name: &str) -> Result<Arc<dyn ConfigurationSection>, ConfigError> {
		self.get_section(name).ok_or_else(|| ConfigError::MissingElement {
			name: name.to_owned(),
			origin: self.origin().to_owned()
		})
	}

	/// Reads the collection of the child element `name` as key/value pairs.
	///
	/// Every item must carry a `name` and a `value` attribute. If the child
	/// element does not exist, an empty list is returned.
	///
	/// ```
	/// use iisconfig::{ConfigurationSection, Element};
	///
	/// let element = Element::new("example").with_child("environmentVariables", Element::new("example")
	///     .with_item(Element::new("example").with_attribute("name", "ASPNETCORE_ENVIRONMENT").with_attribute("value", "Development")));
	///
	/// let pairs = element.get_key_value_pairs("environmentVariables").unwrap();
	/// assert_eq!(pairs, [("ASPNETCORE_ENVIRONMENT".to_owned(), "Development".to_owned())]);
	/// ```
	fn get_key_value_pairs(&self, name: &str) -> Result<Vec<(String, String)>, ConfigError> {
		match self.get_section(name) {
			Some(element) => element.get_collection().into_iter()
				.map(|item| -> Result<(String, String), ConfigError> {
					Ok((item.get_required_string(COLLECTION_ITEM_NAME)?, item.get_required_string(COLLECTION_ITEM_VALUE)?))
				})
				.collect(),
			None => Ok(Vec::new())
		}
	}
}

fn missing_attribute<S: ConfigurationSection + ?Sized>(section: &S, name: &str) -> ConfigError {
	ConfigError::MissingAttribute {
		name: name.to_owned(),
		origin: section.origin().to_owned()
	}
}

fn parse_attribute<S, T, F>(section: &S, name: &str, expected: &'static str, parse: F) -> Result<Option<T>, ConfigError>
where
	S: ConfigurationSection + ?Sized,
	F: FnOnce(&str) -> Option<T>
{
	match section.get_string(name) {
		Some(value) => match parse(value.trim()) {
			Some(parsed) => Ok(Some(parsed)),
			None => Err(ConfigError::InvalidValue {
				name: name.to_owned(),
				value,
				expected,
				origin: section.origin().to_owned()
			})
		},
		None => Ok(None)
	}
}

fn parse_bool(value: &str) -> Option<bool> {
	if value.eq_ignore_ascii_case("true") {
		Some(true)
	} else if value.eq_ignore_ascii_case("false") {
		Some(false)
	} else {
		None
	}
}

fn digits(value: &str) -> Option<u64> {
	if !value.is_empty() && value.bytes().all(|b| b.is_ascii_digit()) {
		value.parse().ok()
	} else {
		None
	}
}

fn parse_timespan(value: &str) -> Option<Duration> {
	let mut parts = value.split(':');
	let (head, minutes, seconds) = (parts.next()?, parts.next()?, parts.next()?);
	if parts.next().is_some() {
		return None;
	}

	let (days, hours) = match head.split_once('.') {
		Some((days, hours)) => (digits(days)?, hours),
		None => (0, head)
	};

	let (seconds, fraction) = match seconds.split_once('.') {
		Some((seconds, fraction)) => (seconds, Some(fraction)),
		None => (seconds, None)
	};

	let (hours, minutes, seconds) = (digits(hours)?, digits(minutes)?, digits(seconds)?);
	if hours > 23 || minutes > 59 || seconds > 59 {
		return None;
	}

	// Up to seven fractional digits (100ns ticks)
	let nanos = match fraction {
		Some(fraction) if fraction.len() <= 7 => digits(fraction)? * 10u64.pow(9 - fraction.len() as u32),
		Some(_) => return None,
		None => 0
	};

	let total_seconds = days.checked_mul(86_400)?.checked_add(hours * 3_600 + minutes * 60 + seconds)?;

	Some(Duration::new(total_seconds, nanos as u32))
}

/// Returns the first item of `collection` whose attribute `name` equals
/// `value`, ignoring ASCII case.
pub fn find_element(collection: &[Arc<dyn ConfigurationSection>], name: &str, value: &str) -> Option<Arc<dyn ConfigurationSection>> {
	collection.iter()
		.find(|item| item.get_string(name).map_or(false, |v| v.eq_ignore_ascii_case(value)))
		.cloned()
}

/// Returns the value of the first pair whose key equals `name`, ignoring ASCII
/// case.
pub fn find_pair<'a>(pairs: &'a [(String, String)], name: &str) -> Option<&'a str> {
	pairs.iter()
		.find(|(key, _)| key.eq_ignore_ascii_case(name))
		.map(|(_, value)| value.as_str())
}
