//! Owned XML tree: build it, parse into it, edit it in place, write it back out.
mod attribute;
mod declaration;
mod document;
mod element;
mod namespace;
mod writer;

pub use self::attribute::*;
pub use self::declaration::*;
pub use self::document::*;
pub use self::element::*;
pub use self::namespace::*;

pub(crate) fn escape_text(value: &str) -> std::borrow::Cow<'_, str> {
    escape(value, false)
}

pub(crate) fn escape_attribute(value: &str) -> std::borrow::Cow<'_, str> {
    escape(value, true)
}

fn escape(value: &str, attribute: bool) -> std::borrow::Cow<'_, str> {
    let needs_escape = |c: char| {
        matches!(c, '&' | '<' | '>') || (attribute && matches!(c, '"' | '\n' | '\r' | '\t'))
    };
    if !value.contains(needs_escape) {
        return std::borrow::Cow::Borrowed(value);
    }

    let mut escaped = String::with_capacity(value.len() + 8);
    for c in value.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' if attribute => escaped.push_str("&quot;"),
            '\n' if attribute => escaped.push_str("&#10;"),
            '\r' if attribute => escaped.push_str("&#13;"),
            '\t' if attribute => escaped.push_str("&#9;"),
            c => escaped.push(c),
        }
    }
    std::borrow::Cow::Owned(escaped)
}

#[cfg(test)]
mod tests {
    use super::*;

    macro_rules! compare_xml {
        ($left:expr, $right:expr) => {{
            let normalize = |s: &str| s.replace('\n', "");
            assert_eq!(normalize($left), normalize($right));
        }};
    }

    #[test]
    fn test_simple_xml() {
        let document = Document::new(Element::new("root"));
        compare_xml!(&document.to_xml_string(), "<root/>");
    }

    #[test]
    fn test_xml_with_attributes() {
        let element = Element::new("root").add_attribute(Attribute::new("attr1", "value1"));
        let document = Document::new(element);
        compare_xml!(&document.to_xml_string(), r#"<root attr1="value1"/>"#);
    }

    #[test]
    fn test_xml_with_child_elements() {
        let element = Element::new("root").add_child(Element::new("child"));
        let document = Document::new(element);
        compare_xml!(&document.to_xml_string(), "<root><child/></root>");
    }

    #[test]
    fn test_xml_with_namespaces() {
        let element = Element::new("root")
            .set_namespace(Namespace::new("http://example.com/ns1"))
            .add_namespace_declaration("http://example.com/ns1", Some("ns1"));

        let document = Document::new(element);
        compare_xml!(
            &document.to_xml_string(),
            r#"<ns1:root xmlns:ns1="http://example.com/ns1"/>"#
        );
    }

    #[test]
    fn test_undeclared_namespace_is_declared_on_the_element() {
        let element = Element::new("root")
            .set_namespace("http://example.com/ns1")
            .add_child(Element::new("child").set_namespace("http://example.com/ns1"));

        let document = Document::new(element);
        compare_xml!(
            &document.to_xml_string(),
            r#"<root xmlns="http://example.com/ns1"><child/></root>"#
        );
    }

    #[test]
    fn test_preferred_prefix_is_declared_when_unbound() {
        let element = Element::new("Envelope")
            .set_namespace("http://schemas.xmlsoap.org/soap/envelope/")
            .with_prefix("soap");

        let document = Document::new(element);
        assert_eq!(
            document.to_xml_string(),
            r#"<soap:Envelope xmlns:soap="http://schemas.xmlsoap.org/soap/envelope/"/>"#
        );
    }

    #[test]
    fn test_unqualified_child_under_default_namespace_is_undeclared() {
        let element = Element::new("root")
            .set_namespace("http://example.com/default")
            .add_child(Element::new("plain"));

        let document = Document::new(element);
        assert_eq!(
            document.to_xml_string(),
            r#"<root xmlns="http://example.com/default"><plain xmlns=""/></root>"#
        );
    }

    #[test]
    fn test_namespaced_attribute_gets_generated_prefix() {
        let element = Element::new("root").add_attribute(Attribute::new_with_namespace(
            "flag",
            "1",
            Some("http://example.com/attrs"),
        ));

        let document = Document::new(element);
        assert_eq!(
            document.to_xml_string(),
            r#"<root xmlns:ns0="http://example.com/attrs" ns0:flag="1"/>"#
        );
    }

    #[test]
    fn test_xml_lang_is_never_declared() {
        let element = Element::new("Locale").add_attribute(Attribute::new_with_namespace(
            "lang",
            "en-US",
            Some(crate::XML_NAMESPACE),
        ));

        let document = Document::new(element);
        assert_eq!(document.to_xml_string(), r#"<Locale xml:lang="en-US"/>"#);
    }

    #[test]
    fn test_full_xml_document() {
        let declaration = Declaration::new("1.0", "UTF-8").with_standalone(true);
        let child = Element::new("child")
            .set_namespace(Namespace::new("http://example.com/ns2"))
            .add_attribute(Attribute::new("attr2", "value2"));
        let element = Element::new("root")
            .set_namespace(Namespace::new("http://example.com/ns1"))
            .add_namespace_declaration("http://example.com/ns1", Some("ns1"))
            .add_namespace_declaration("http://example.com/ns2", Some("ns2"))
            .add_attribute(Attribute::new("attr1", "value1"))
            .add_child(child);

        let xml_string = Document::new(element)
            .with_declaration(declaration)
            .to_xml_string();
        assert!(
            xml_string.starts_with(r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>"#)
        );
        assert!(xml_string.contains(r#"<ns1:root"#));
        assert!(xml_string.contains(r#"xmlns:ns1="http://example.com/ns1""#));
        assert!(xml_string.contains(r#"xmlns:ns2="http://example.com/ns2""#));
        assert!(xml_string.contains(r#"attr1="value1""#));
        assert!(xml_string.contains(r#"<ns2:child attr2="value2"/>"#));
        assert!(xml_string.ends_with(r#"</ns1:root>"#));
    }

    #[test]
    fn test_setting_text_overwrites_children() {
        let element = Element::new("container")
            .add_child(Element::new("item"))
            .set_text("New text");

        let document = Document::new(element);
        assert_eq!(document.to_xml_string(), "<container>New text</container>");
    }

    #[test]
    fn test_special_characters_are_escaped() {
        let element = Element::new("test")
            .add_attribute(Attribute::new("name", "a \"quoted\" <value> & more"))
            .set_text("Text with <>& characters");

        let document = Document::new(element);
        assert_eq!(
            document.to_xml_string(),
            r#"<test name="a &quot;quoted&quot; &lt;value&gt; &amp; more">Text with &lt;&gt;&amp; characters</test>"#
        );
    }

    #[test]
    fn test_unicode_content() {
        let document = Document::new(Element::new("test").set_text("Hello 世界 🌍"));
        assert_eq!(document.to_xml_string(), "<test>Hello 世界 🌍</test>");
    }

    #[test]
    fn test_pretty_output_indents_element_only_content() {
        let element = Element::new("root")
            .add_child(Element::new("a").add_child(Element::new("b").set_text("x")))
            .add_child(Element::new("c"));

        let document = Document::new(element);
        assert_eq!(
            document.to_pretty_string(),
            "<root>\n    <a>\n        <b>x</b>\n    </a>\n    <c/>\n</root>"
        );
    }

    #[test]
    fn test_declaration_with_standalone_false() {
        let declaration = Declaration::new("1.0", "UTF-8").with_standalone(false);
        assert_eq!(
            declaration.to_string(),
            r#"<?xml version="1.0" encoding="UTF-8" standalone="no"?>"#
        );
    }

    #[test]
    fn test_set_attribute_replaces_existing_value() {
        let mut element = Element::new("root").add_attribute(Attribute::new("a", "1"));
        element.set_attribute("a", "2");
        element.set_attribute("b", "3");

        assert_eq!(element.attribute("a"), Some("2"));
        assert_eq!(element.attribute("b"), Some("3"));
        assert_eq!(element.attributes().len(), 2);
    }

    #[test]
    fn test_descendants_are_in_document_order() {
        let element = Element::new("a")
            .add_child(Element::new("b").add_child(Element::new("c")))
            .add_child(Element::new("d"));

        let names: Vec<_> = element.descendants().map(Element::name).collect();
        assert_eq!(names, ["a", "b", "c", "d"]);
    }
}
