use std::iter::Iterator;
use std::fmt::{self, Display};
use std::ops::Add;
use std::sync::Arc;

/// An owned, immutable configuration section path.
///
/// Section names of the web server configuration are hierarchical. Their
/// components are separated by a slash (`/`), for example
/// `system.webServer/security/requestFiltering`. Dots are part of a component.
///
/// None of the methods visibly modifies `self`. All of them return a new
/// `SectionPath`. The components are stored behind an `Arc`, therefore a path
/// can be cloned and sent to other threads without much overhead.
///
/// # Examples
///
/// ```
/// use iisconfig::SectionPath;
///
/// let sp = SectionPath::from("system.webServer/httpPlatform");
///
/// assert_eq!(sp.len(), 2);
/// assert_eq!(sp.tail_component_name(), Some("httpPlatform"));
/// assert_eq!(sp.to_string(), "system.webServer/httpPlatform");
/// ```
///
/// Modifying a section path always returns a new path.
///
/// ```
/// use iisconfig::SectionPath;
///
/// let sp = SectionPath::default();
/// let sp_a = sp.push("system.webServer");
///
/// assert_eq!(sp, SectionPath::default());
/// assert_eq!(sp_a, SectionPath::from("system.webServer"));
/// ```
///
/// Parsing does not validate the name. It only splits at slashes and drops
/// empty components, so `a//b/` and `a/b` are the same path.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct SectionPath {
	components: Arc<[String]>
}

impl Default for SectionPath {
	fn default() -> Self {
		Self {
			components: Arc::from(Vec::new())
		}
	}
}

impl Add<&str> for SectionPath {
	type Output = Self;

	fn add(self, other: &str) -> Self {
		self.push(other)
	}
}

impl Display for SectionPath {
	fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
		for (i, component) in self.components.iter().enumerate() {
			if i > 0 {
				write!(f, "/")?;
			}

			write!(f, "{}", component)?;
		}

		Ok(())
	}
}

impl From<&str> for SectionPath {
	fn from(name: &str) -> Self {
		Self::from_components(name.split('/'))
	}
}

impl From<&String> for SectionPath {
	fn from(name: &String) -> Self {
		Self::from(name.as_str())
	}
}

impl SectionPath {
	fn from_components<S: AsRef<str>, T: IntoIterator<Item = S>>(components: T) -> Self {
		Self {
			components: components.into_iter()
				.filter(|c| !c.as_ref().is_empty())
				.map(|c| c.as_ref().to_owned())
				.collect()
		}
	}

	/// Append a path component to this section path and return the new path.
	///
	/// The component is taken verbatim. Slashes within `component` are not
	/// interpreted.
	///
	/// # Example
	///
	/// ```
	/// use iisconfig::SectionPath;
	///
	/// let sp = SectionPath::from("system.webServer").push("security");
	///
	/// assert_eq!(sp, SectionPath::from("system.webServer/security"));
	/// ```
	pub fn push(&self, component: &str) -> Self {
		self.push_all(&[component])
	}

	/// Append multiple path components to this section path and return the new path.
	pub fn push_all<S: AsRef<str>, T: IntoIterator<Item = S>>(&self, iter: T) -> Self {
		let mut components: Vec<String> = self.components.to_vec();
		components.extend(iter.into_iter().filter(|c| !c.as_ref().is_empty()).map(|c| c.as_ref().to_owned()));

		Self {
			components: components.into()
		}
	}

	/// Remove the last component from this section path and return it together
	/// with the remaining path.
	///
	/// If the path is empty `None` is returned.
	///
	/// # Example
	///
	/// ```
	/// use iisconfig::SectionPath;
	///
	/// let sp = SectionPath::from("system.webServer/httpPlatform");
	///
	/// let (component, sp) = sp.pop().unwrap();
	/// assert_eq!(component, "httpPlatform");
	///
	/// let (component, sp) = sp.pop().unwrap();
	/// assert_eq!(component, "system.webServer");
	///
	/// assert!(sp.pop().is_none());
	/// ```
	pub fn pop(&self) -> Option<(&str, Self)> {
		let (last, parent) = self.components.split_last()?;

		Some((last.as_str(), Self::from_components(parent)))
	}

	/// Returns true if this path has no components.
	pub fn is_root(&self) -> bool {
		self.components.is_empty()
	}

	/// Number of components of this path.
	pub fn len(&self) -> usize {
		self.components.len()
	}

	pub fn is_empty(&self) -> bool {
		self.is_root()
	}

	/// Returns the name of the last component of this path or `None` for the
	/// empty path.
	pub fn tail_component_name(&self) -> Option<&str> {
		self.components.last().map(String::as_str)
	}

	/// Returns an iterator over the components, first to last.
	pub fn iter(&self) -> impl Iterator<Item = &str> {
		self.components.iter().map(String::as_str)
	}
}
