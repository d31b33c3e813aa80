//! Immutable configuration element shared by the bundled sources.
use crate::section::ConfigurationSection;
use crate::sectionpath::SectionPath;
use std::sync::Arc;

/// A configuration element: attributes, named child elements and an ordered
/// collection of items.
///
/// Attribute names are matched ignoring ASCII case. Child element names are
/// case sensitive, like section names.
///
/// Elements are built by value and frozen once they are handed to a source.
/// Sources return them as `Arc<dyn ConfigurationSection>`.
///
/// ```
/// use iisconfig::{ConfigurationSection, Element};
///
/// let element = Element::new("example")
///     .with_attribute("processPath", "dotnet")
///     .with_attribute("arguments", ".\\app.dll");
///
/// assert_eq!(element.get_string("PROCESSPATH").unwrap(), "dotnet");
/// ```
#[derive(Debug, Clone)]
pub struct Element {
	origin: Arc<str>,
	attributes: Vec<(String, String)>,
	children: Vec<(String, Arc<Element>)>,
	items: Vec<Arc<Element>>
}

impl Element {
	/// Creates an empty element. `origin` names the place the element was
	/// loaded from and shows up in error messages.
	pub fn new(origin: &str) -> Self {
		Self::with_origin(Arc::from(origin))
	}

	pub(crate) fn with_origin(origin: Arc<str>) -> Self {
		Self {
			origin,
			attributes: Vec::new(),
			children: Vec::new(),
			items: Vec::new()
		}
	}

	/// Sets the attribute `name` to `value`, replacing a previous value.
	pub fn set_attribute(&mut self, name: &str, value: &str) -> &mut Self {
		match self.attributes.iter().position(|(n, _)| n.eq_ignore_ascii_case(name)) {
			Some(i) => self.attributes[i].1 = value.to_owned(),
			None => self.attributes.push((name.to_owned(), value.to_owned()))
		}
		self
	}

	/// Sets the child element `name`, replacing a previous child of the same
	/// name.
	pub fn set_child(&mut self, name: &str, child: Element) -> &mut Self {
		let child = Arc::new(child);

		match self.children.iter().position(|(n, _)| n == name) {
			Some(i) => self.children[i].1 = child,
			None => self.children.push((name.to_owned(), child))
		}
		self
	}

	/// Appends an item to the collection of this element.
	pub fn push_item(&mut self, item: Element) -> &mut Self {
		self.items.push(Arc::new(item));
		self
	}

	/// Builder variant of [`set_attribute`](Element::set_attribute).
	pub fn with_attribute(mut self, name: &str, value: &str) -> Self {
		self.set_attribute(name, value);
		self
	}

	/// Builder variant of [`set_child`](Element::set_child).
	pub fn with_child(mut self, name: &str, child: Element) -> Self {
		self.set_child(name, child);
		self
	}

	/// Builder variant of [`push_item`](Element::push_item).
	pub fn with_item(mut self, item: Element) -> Self {
		self.push_item(item);
		self
	}

	/// Iterates over the attributes in insertion order.
	pub fn attributes(&self) -> impl Iterator<Item = (&str, &str)> {
		self.attributes.iter().map(|(n, v)| (n.as_str(), v.as_str()))
	}

	/// Iterates over the child element names in insertion order.
	pub fn child_names(&self) -> impl Iterator<Item = &str> {
		self.children.iter().map(|(n, _)| n.as_str())
	}

	fn child(&self, name: &str) -> Option<&Arc<Element>> {
		self.children.iter().find(|(n, _)| n == name).map(|(_, c)| c)
	}

	/// Walks down the child elements along `path`. The empty path yields `None`.
	pub(crate) fn descend(&self, path: &SectionPath) -> Option<Arc<Element>> {
		let mut components = path.iter();
		let mut current = self.child(components.next()?)?;

		for component in components {
			current = current.child(component)?;
		}

		Some(current.clone())
	}
}

impl ConfigurationSection for Element {
	fn get_string(&self, name: &str) -> Option<String> {
		self.attributes.iter().find(|(n, _)| n.eq_ignore_ascii_case(name)).map(|(_, v)| v.clone())
	}

	fn get_section(&self, name: &str) -> Option<Arc<dyn ConfigurationSection>> {
		self.child(name).map(|c| c.clone() as Arc<dyn ConfigurationSection>)
	}

	fn get_collection(&self) -> Vec<Arc<dyn ConfigurationSection>> {
		self.items.iter().map(|i| i.clone() as Arc<dyn ConfigurationSection>).collect()
	}

	fn origin(&self) -> &str {
		&self.origin
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn attributes() {
		let mut e = Element::new("test").with_attribute("enabled", "false");
		e.set_attribute("Enabled", "true");

		assert_eq!(e.get_string("ENABLED").unwrap(), "true");
		assert_eq!(e.attributes().collect::<Vec<_>>(), [("enabled", "true")]);
		assert!(e.get_string("missing").is_none());
	}

	#[test]
	fn children() {
		let e = Element::new("test")
			.with_child("requestLimits", Element::new("test").with_attribute("maxAllowedContentLength", "1"))
			.with_child("requestLimits", Element::new("test").with_attribute("maxAllowedContentLength", "2"));

		assert_eq!(e.child_names().collect::<Vec<_>>(), ["requestLimits"]);
		assert_eq!(e.get_section("requestLimits").unwrap().get_string("maxAllowedContentLength").unwrap(), "2");

		// Element names are case sensitive
		assert!(e.get_section("RequestLimits").is_none());
	}

	#[test]
	fn collection_order() {
		let e = Element::new("test")
			.with_item(Element::new("test").with_attribute("name", "a"))
			.with_item(Element::new("test").with_attribute("name", "b"));

		let names: Vec<String> = e.get_collection().iter().map(|i| i.get_string("name").unwrap()).collect();
		assert_eq!(names, ["a", "b"]);
	}

	#[test]
	fn descend() {
		let root = Element::new("test")
			.with_child("system.webServer", Element::new("test")
				.with_child("security", Element::new("test")
					.with_child("requestFiltering", Element::new("test").with_attribute("allowDoubleEscaping", "false"))));

		let found = root.descend(&SectionPath::from("system.webServer/security/requestFiltering")).unwrap();
		assert_eq!(found.get_string("allowDoubleEscaping").unwrap(), "false");

		// The same element is returned on every walk
		assert!(Arc::ptr_eq(&found, &root.descend(&SectionPath::from("system.webServer/security/requestFiltering")).unwrap()));

		assert!(root.descend(&SectionPath::from("system.webServer/httpPlatform")).is_none());
		assert!(root.descend(&SectionPath::default()).is_none());
	}
}
