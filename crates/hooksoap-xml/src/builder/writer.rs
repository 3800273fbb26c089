use crate::XML_NAMESPACE;
use crate::builder::{Element, NamespaceDeclaration, Node, escape_attribute, escape_text};

/// In-scope `prefix -> uri` bindings, innermost last.
#[derive(Debug, Default)]
struct Scope {
    bindings: Vec<(Option<String>, String)>,
}

impl Scope {
    fn bind(&mut self, prefix: Option<String>, uri: String) {
        self.bindings.push((prefix, uri));
    }

    /// URI currently bound to `prefix`; `None` asks for the default namespace.
    fn resolve(&self, prefix: Option<&str>) -> Option<&str> {
        self.bindings
            .iter()
            .rev()
            .find(|(bound, _)| bound.as_deref() == prefix)
            .map(|(_, uri)| uri.as_str())
    }

    /// A non-empty prefix bound to `uri` that no inner declaration shadows.
    fn prefix_for(&self, uri: &str) -> Option<&str> {
        self.bindings
            .iter()
            .rev()
            .filter_map(|(prefix, bound)| prefix.as_deref().filter(|_| bound == uri))
            .find(|prefix| self.resolve(Some(*prefix)) == Some(uri))
    }

    fn is_bound(&self, prefix: &str) -> bool {
        self.resolve(Some(prefix)).is_some()
    }

    fn fresh_prefix(&self) -> String {
        (0..)
            .map(|n| format!("ns{n}"))
            .find(|candidate| !self.is_bound(candidate))
            .unwrap_or_default()
    }

    fn truncate(&mut self, len: usize) {
        self.bindings.truncate(len);
    }
}

pub(crate) fn write_element(out: &mut String, element: &Element, indent: Option<usize>) {
    let mut scope = Scope::default();
    write_inner(out, element, &mut scope, indent, 0);
}

fn declare(
    declarations: &mut Vec<NamespaceDeclaration>,
    scope: &mut Scope,
    prefix: Option<String>,
    uri: &str,
) {
    declarations.push(NamespaceDeclaration {
        prefix: prefix.clone(),
        uri: uri.to_owned(),
    });
    scope.bind(prefix, uri.to_owned());
}

fn element_prefix(
    element: &Element,
    uri: &str,
    declarations: &mut Vec<NamespaceDeclaration>,
    scope: &mut Scope,
) -> Option<String> {
    if let Some(prefix) = element.prefix() {
        if scope.resolve(Some(prefix)) == Some(uri) {
            return Some(prefix.to_owned());
        }
    } else if scope.resolve(None) == Some(uri) {
        return None;
    }

    if let Some(prefix) = scope.prefix_for(uri) {
        return Some(prefix.to_owned());
    }
    if scope.resolve(None) == Some(uri) {
        return None;
    }

    // Nothing usable is in scope: declare one on this element, without
    // clobbering a declaration the element already carries.
    let taken = |prefix: Option<&str>| declarations.iter().any(|d| d.prefix.as_deref() == prefix);
    let prefix = match element.prefix() {
        Some(preferred) if !taken(Some(preferred)) => Some(preferred.to_owned()),
        None if !taken(None) => None,
        _ => Some(scope.fresh_prefix()),
    };
    declare(declarations, scope, prefix.clone(), uri);
    prefix
}

fn attribute_prefix(
    preferred: Option<&str>,
    uri: &str,
    declarations: &mut Vec<NamespaceDeclaration>,
    scope: &mut Scope,
) -> String {
    if let Some(prefix) = preferred.filter(|p| scope.resolve(Some(*p)) == Some(uri)) {
        return prefix.to_owned();
    }
    if let Some(prefix) = scope.prefix_for(uri) {
        return prefix.to_owned();
    }

    let prefix = preferred
        .filter(|p| !scope.is_bound(p))
        .map_or_else(|| scope.fresh_prefix(), str::to_owned);
    declare(declarations, scope, Some(prefix.clone()), uri);
    prefix
}

fn qualified(prefix: Option<&str>, name: &str) -> String {
    match prefix {
        Some(prefix) => format!("{prefix}:{name}"),
        None => name.to_owned(),
    }
}

fn push_indent(out: &mut String, width: usize, depth: usize) {
    out.push('\n');
    out.extend(std::iter::repeat_n(' ', width * depth));
}

fn write_inner(
    out: &mut String,
    element: &Element,
    scope: &mut Scope,
    indent: Option<usize>,
    depth: usize,
) {
    let mark = scope.bindings.len();
    let mut declarations = element.namespace_declarations().to_vec();
    for declaration in &declarations {
        scope.bind(declaration.prefix.clone(), declaration.uri.clone());
    }

    let prefix = match element.namespace_uri() {
        Some(uri) => element_prefix(element, uri, &mut declarations, scope),
        None => {
            if scope.resolve(None).is_some_and(|uri| !uri.is_empty()) {
                declare(&mut declarations, scope, None, "");
            }
            None
        }
    };
    let name = qualified(prefix.as_deref(), element.name());

    let attributes: Vec<(String, &str)> = element
        .attributes()
        .iter()
        .map(|attr| {
            let qname = match attr.namespace() {
                None => attr.name().to_owned(),
                Some(ns) if ns.url == XML_NAMESPACE => qualified(Some("xml"), attr.name()),
                Some(ns) => {
                    let prefix = attribute_prefix(attr.prefix(), &ns.url, &mut declarations, scope);
                    qualified(Some(&prefix), attr.name())
                }
            };
            (qname, attr.value())
        })
        .collect();

    out.push('<');
    out.push_str(&name);
    for declaration in &declarations {
        out.push(' ');
        out.push_str(&declaration.to_string());
    }
    for (qname, value) in &attributes {
        out.push(' ');
        out.push_str(qname);
        out.push_str("=\"");
        out.push_str(&escape_attribute(value));
        out.push('"');
    }

    if element.children().is_empty() {
        out.push_str("/>");
        scope.truncate(mark);
        return;
    }

    out.push('>');
    let pretty = indent.filter(|_| {
        element
            .children()
            .iter()
            .all(|node| !matches!(node, Node::Text(_)))
    });
    for child in element.children() {
        if let Some(width) = pretty {
            push_indent(out, width, depth + 1);
        }
        match child {
            Node::Element(child) => write_inner(out, child, scope, indent, depth + 1),
            Node::Text(text) => out.push_str(&escape_text(text)),
            Node::Comment(comment) => {
                out.push_str("<!--");
                out.push_str(comment);
                out.push_str("-->");
            }
            Node::ProcessingInstruction { target, value } => {
                out.push_str("<?");
                out.push_str(target);
                if let Some(value) = value {
                    out.push(' ');
                    out.push_str(value);
                }
                out.push_str("?>");
            }
        }
    }
    if let Some(width) = pretty {
        push_indent(out, width, depth);
    }
    out.push_str("</");
    out.push_str(&name);
    out.push('>');

    scope.truncate(mark);
}
