//! Namespace-aware element selection.
//!
//! A [`Selector`] is a small path: a first step matched either at the root or
//! anywhere in the tree, followed by child steps. Each step names an element by
//! namespace URI and local name and may require attribute values.
//!
//! ```
//! use hooksoap_xml::{Document, QName, Selector};
//!
//! const FOO: &str = "https://foo.com/bar/baz";
//! let mut document = Document::parse(
//!     r#"<r xmlns:f="https://foo.com/bar/baz"><f:bar><f:baz qux="stuff"/><f:baz/></f:bar></r>"#,
//! )
//! .unwrap();
//!
//! // //foo:bar/foo:baz[@qux="stuff"]
//! let selector = Selector::descendants(QName::ns(FOO, "bar"))
//!     .child(QName::ns(FOO, "baz"))
//!     .with_attribute("qux", "stuff");
//!
//! let matched = document.select_mut(&selector, |el| el.set_attribute("whatever", "somevalue"));
//! assert_eq!(matched, 1);
//! ```
use crate::builder::Element;

/// An expanded element name: namespace URI plus local name.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct QName {
    pub namespace: Option<String>,
    pub name: String,
}

impl QName {
    /// A name in no namespace.
    pub fn local(name: impl Into<String>) -> Self {
        Self {
            namespace: None,
            name: name.into(),
        }
    }

    pub fn ns(namespace: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            namespace: Some(namespace.into()),
            name: name.into(),
        }
    }

    pub fn matches(&self, element: &Element) -> bool {
        element.is(self.namespace.as_deref(), &self.name)
    }
}

#[derive(Debug, Clone)]
struct Step {
    name: QName,
    attributes: Vec<(String, String)>,
}

impl Step {
    fn matches(&self, element: &Element) -> bool {
        self.name.matches(element)
            && self
                .attributes
                .iter()
                .all(|(name, value)| element.attribute(name) == Some(value.as_str()))
    }
}

#[derive(Debug, Clone)]
pub struct Selector {
    anywhere: bool,
    steps: Vec<Step>,
}

impl Selector {
    /// Starts at the document element, which must match `name`.
    pub fn root(name: QName) -> Self {
        Self {
            anywhere: false,
            steps: vec![Step {
                name,
                attributes: Vec::new(),
            }],
        }
    }

    /// Starts at any element matching `name`, the document element included.
    pub fn descendants(name: QName) -> Self {
        Self {
            anywhere: true,
            ..Self::root(name)
        }
    }

    pub fn child(mut self, name: QName) -> Self {
        self.steps.push(Step {
            name,
            attributes: Vec::new(),
        });
        self
    }

    /// Requires the un-namespaced attribute `name` of the last step to equal `value`.
    pub fn with_attribute(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        if let Some(step) = self.steps.last_mut() {
            step.attributes.push((name.into(), value.into()));
        }
        self
    }

    pub fn select<'a>(&self, root: &'a Element) -> Vec<&'a Element> {
        let mut found = Vec::new();
        if self.anywhere {
            for element in root.descendants() {
                collect(element, &self.steps, &mut found);
            }
        } else {
            collect(root, &self.steps, &mut found);
        }
        found
    }

    pub fn select_mut(&self, root: &mut Element, mut f: impl FnMut(&mut Element)) -> usize {
        if self.anywhere {
            visit_anywhere_mut(root, &self.steps, &mut f)
        } else {
            apply_mut(root, &self.steps, &mut f)
        }
    }
}

fn collect<'a>(element: &'a Element, steps: &[Step], found: &mut Vec<&'a Element>) {
    let Some((step, rest)) = steps.split_first() else {
        return;
    };
    if !step.matches(element) {
        return;
    }
    if rest.is_empty() {
        found.push(element);
        return;
    }
    for child in element.elements() {
        collect(child, rest, found);
    }
}

fn apply_mut(element: &mut Element, steps: &[Step], f: &mut impl FnMut(&mut Element)) -> usize {
    let Some((step, rest)) = steps.split_first() else {
        return 0;
    };
    if !step.matches(element) {
        return 0;
    }
    if rest.is_empty() {
        f(element);
        return 1;
    }
    element
        .elements_mut()
        .map(|child| apply_mut(child, rest, f))
        .sum()
}

fn visit_anywhere_mut(
    element: &mut Element,
    steps: &[Step],
    f: &mut impl FnMut(&mut Element),
) -> usize {
    let here = apply_mut(element, steps, f);
    here + element
        .elements_mut()
        .map(|child| visit_anywhere_mut(child, steps, f))
        .sum::<usize>()
}
