//! In-memory markup tree for icon documents.

/// A parsed icon document.
#[derive(Debug, Clone, PartialEq)]
pub struct Document {
    /// The root `<svg>` element
    pub root: Element,
}

/// An SVG/XML element.
#[derive(Debug, Clone, PartialEq)]
pub struct Element {
    /// Element name with optional prefix (e.g., "svg", "sodipodi:namedview")
    pub name: QName,
    /// Attributes in source order, keys unique
    pub attributes: Vec<Attribute>,
    /// Child nodes
    pub children: Vec<Node>,
}

/// A qualified name (possibly with namespace prefix).
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct QName {
    pub prefix: Option<String>,
    pub local: String,
}

impl QName {
    pub fn new(local: impl Into<String>) -> Self {
        Self {
            prefix: None,
            local: local.into(),
        }
    }

    /// Parse a qualified name from a string like "prefix:local" or just "local".
    pub fn parse(s: &str) -> Self {
        match s.split_once(':') {
            Some((prefix, local)) => Self {
                prefix: Some(prefix.to_string()),
                local: local.to_string(),
            },
            None => Self::new(s),
        }
    }

    /// Check if this is a namespace declaration (xmlns or xmlns:prefix).
    pub fn is_xmlns(&self) -> bool {
        self.prefix.as_deref() == Some("xmlns") || (self.prefix.is_none() && self.local == "xmlns")
    }

    pub fn full_name(&self) -> String {
        match &self.prefix {
            Some(p) => format!("{}:{}", p, self.local),
            None => self.local.clone(),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Attribute {
    pub name: QName,
    pub value: String,
}

impl Attribute {
    pub fn new(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            name: QName::new(name),
            value: value.into(),
        }
    }
}

/// A node in the markup tree.
///
/// Whitespace-only text never makes it into the tree.
#[derive(Debug, Clone, PartialEq)]
pub enum Node {
    Element(Element),
    Text(String),
    CData(String),
    Comment(String),
}

impl Element {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: QName::new(name),
            attributes: Vec::new(),
            children: Vec::new(),
        }
    }

    /// Get an attribute value by unprefixed name.
    ///
    /// `xlink:href` is not found by `get_attr("href")`; presentation
    /// attributes on icons are never prefixed.
    pub fn get_attr(&self, name: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|a| a.name.prefix.is_none() && a.name.local == name)
            .map(|a| a.value.as_str())
    }

    /// Set an attribute value, keeping its position if it already exists.
    pub fn set_attr(&mut self, name: impl Into<String>, value: impl Into<String>) {
        let name = name.into();
        if let Some(attr) = self
            .attributes
            .iter_mut()
            .find(|a| a.name.prefix.is_none() && a.name.local == name)
        {
            attr.value = value.into();
        } else {
            self.attributes.push(Attribute::new(name, value));
        }
    }

    pub fn remove_attr(&mut self, name: &str) {
        self.attributes
            .retain(|a| a.name.prefix.is_some() || a.name.local != name);
    }

    /// Check if this element has a specific local name.
    pub fn is(&self, name: &str) -> bool {
        self.name.local == name
    }

    /// Iterate over child elements only (skip text, comments, etc.).
    pub fn child_elements(&self) -> impl Iterator<Item = &Element> {
        self.children.iter().filter_map(|n| match n {
            Node::Element(e) => Some(e),
            _ => None,
        })
    }

    pub fn child_elements_mut(&mut self) -> impl Iterator<Item = &mut Element> {
        self.children.iter_mut().filter_map(|n| match n {
            Node::Element(e) => Some(e),
            _ => None,
        })
    }

    /// Visit this element and all its descendants, pre-order.
    pub fn for_each_element_mut(&mut self, f: &mut impl FnMut(&mut Element)) {
        f(self);
        for child in self.child_elements_mut() {
            child.for_each_element_mut(f);
        }
    }

    /// Check whether any element in this subtree satisfies `f`.
    pub fn any_element(&self, f: &impl Fn(&Element) -> bool) -> bool {
        f(self) || self.child_elements().any(|child| child.any_element(f))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_set_attr_keeps_position() {
        let mut elem = Element::new("rect");
        elem.set_attr("fill", "#000");
        elem.set_attr("width", "4");
        elem.set_attr("fill", "currentColor");

        let names: Vec<_> = elem.attributes.iter().map(|a| a.name.full_name()).collect();
        assert_eq!(names, ["fill", "width"]);
        assert_eq!(elem.get_attr("fill"), Some("currentColor"));
    }

    #[test]
    fn test_prefixed_attrs_are_distinct() {
        let mut elem = Element::new("use");
        elem.attributes.push(Attribute {
            name: QName::parse("xlink:href"),
            value: "#a".into(),
        });
        assert_eq!(elem.get_attr("href"), None);

        elem.remove_attr("href");
        assert_eq!(elem.attributes.len(), 1);
    }

    #[test]
    fn test_qname_parse() {
        let name = QName::parse("sodipodi:namedview");
        assert_eq!(name.prefix.as_deref(), Some("sodipodi"));
        assert_eq!(name.local, "namedview");
        assert_eq!(name.full_name(), "sodipodi:namedview");
        assert!(QName::parse("xmlns:xlink").is_xmlns());
        assert!(QName::new("xmlns").is_xmlns());
    }
}
