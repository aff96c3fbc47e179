//! XML parsing and building over plain JSON value trees.
//!
//! Mapping rules:
//! - an element with only text becomes a string (`""` when empty)
//! - an element with children becomes an object keyed by child name;
//!   repeated children become an array
//! - attributes are collected under `$`, text mixed with children under `_`
//! - a root element named `root` collapses to its contents, and a collapsed
//!   root whose only children are `<item>` elements becomes an array
//!
//! Building is the inverse: a single-key object whose value is not an array
//! becomes the root element itself, anything else is wrapped in `<root>`.

use quick_xml::Reader;
use quick_xml::Writer;
use quick_xml::events::{BytesDecl, BytesEnd, BytesStart, BytesText, Event};
use serde_json::{Map, Value};

use super::error::XmlError;

/// Name of the wrapper element added around values without a natural root.
pub const ROOT_TAG: &str = "root";
/// Name of the element used for entries of an unnamed list.
pub const ITEM_TAG: &str = "item";
/// Object key holding element attributes.
pub const ATTRIBUTES_KEY: &str = "$";
/// Object key holding element text mixed with child elements.
pub const TEXT_KEY: &str = "_";

/// Output options for [`build_xml`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct XmlOptions {
    /// Spaces per nesting level; zero writes everything on one line.
    pub indent: usize,
    /// Whether to start with an XML declaration.
    pub declaration: bool,
}

impl Default for XmlOptions {
    fn default() -> Self {
        Self {
            indent: 2,
            declaration: true,
        }
    }
}

/// Parses an XML document into a value tree.
///
/// # Errors
///
/// Returns an error if the document is malformed or does not have exactly
/// one root element.
pub fn parse_xml(input: &str) -> Result<Value, XmlError> {
    let mut reader = Reader::from_str(input);
    let mut open: Vec<ElementNode> = Vec::new();
    let mut root: Option<(String, Value)> = None;

    loop {
        let event = match reader.read_event() {
            Ok(event) => event,
            Err(e) => {
                return Err(XmlError::Syntax(format!(
                    "{e} (at byte {})",
                    reader.buffer_position()
                )));
            }
        };

        match event {
            Event::Start(start) => {
                if open.is_empty() && root.is_some() {
                    return Err(XmlError::MultipleRoots);
                }
                open.push(ElementNode::open(&start)?);
            }
            Event::Empty(start) => {
                if open.is_empty() && root.is_some() {
                    return Err(XmlError::MultipleRoots);
                }
                let node = ElementNode::open(&start)?;
                close(node, &mut open, &mut root);
            }
            Event::End(_) => {
                // The reader checks that end tags match their start tags.
                let Some(node) = open.pop() else {
                    return Err(XmlError::Syntax("unexpected closing tag".to_string()));
                };
                close(node, &mut open, &mut root);
            }
            Event::Text(text) => {
                let text = text
                    .unescape()
                    .map_err(|e| XmlError::Syntax(e.to_string()))?;
                append_text(&text, &mut open)?;
            }
            Event::CData(cdata) => {
                let text = String::from_utf8_lossy(&cdata.into_inner()).into_owned();
                append_text(&text, &mut open)?;
            }
            Event::Eof => break,
            // Declarations, comments, processing instructions and doctypes
            // carry no data.
            _ => {}
        }
    }

    if let Some(node) = open.pop() {
        return Err(XmlError::Unclosed(node.name));
    }
    let (name, content) = root.ok_or(XmlError::NoRoot)?;

    if name == ROOT_TAG {
        Ok(collapse_items(content))
    } else {
        let mut object = Map::new();
        object.insert(name, content);
        Ok(Value::Object(object))
    }
}

fn close(node: ElementNode, open: &mut [ElementNode], root: &mut Option<(String, Value)>) {
    let (name, value) = node.finish();
    match open.last_mut() {
        Some(parent) => parent.push_child(name, value),
        None => *root = Some((name, value)),
    }
}

fn append_text(text: &str, open: &mut [ElementNode]) -> Result<(), XmlError> {
    match open.last_mut() {
        Some(node) => {
            node.text.push_str(text);
            Ok(())
        }
        None if text.trim().is_empty() => Ok(()),
        None => Err(XmlError::TextOutsideRoot),
    }
}

fn collapse_items(content: Value) -> Value {
    match content {
        Value::Object(mut object) if object.len() == 1 && object.contains_key(ITEM_TAG) => {
            match object.remove(ITEM_TAG) {
                Some(Value::Array(items)) => Value::Array(items),
                Some(single) => Value::Array(vec![single]),
                None => Value::Object(object),
            }
        }
        other => other,
    }
}

/// An element whose end tag has not been read yet.
struct ElementNode {
    name: String,
    attributes: Map<String, Value>,
    children: Map<String, Value>,
    text: String,
}

impl ElementNode {
    fn open(start: &BytesStart<'_>) -> Result<Self, XmlError> {
        let name = utf8(start.name().as_ref())?;

        let mut attributes = Map::new();
        for attribute in start.attributes() {
            let attribute = attribute.map_err(|e| XmlError::Syntax(e.to_string()))?;
            let key = utf8(attribute.key.as_ref())?;
            let value = attribute
                .unescape_value()
                .map_err(|e| XmlError::Syntax(e.to_string()))?;
            attributes.insert(key, Value::String(value.into_owned()));
        }

        Ok(Self {
            name,
            attributes,
            children: Map::new(),
            text: String::new(),
        })
    }

    fn push_child(&mut self, name: String, value: Value) {
        // Element values are strings or objects, never arrays, so an array
        // here always means the name has repeated before.
        match self.children.get_mut(&name) {
            Some(Value::Array(items)) => items.push(value),
            Some(existing) => {
                let first = existing.take();
                *existing = Value::Array(vec![first, value]);
            }
            None => {
                self.children.insert(name, value);
            }
        }
    }

    fn finish(self) -> (String, Value) {
        if self.children.is_empty() && self.attributes.is_empty() {
            return (self.name, Value::String(self.text));
        }

        let mut object = Map::new();
        if !self.attributes.is_empty() {
            object.insert(ATTRIBUTES_KEY.to_string(), Value::Object(self.attributes));
        }
        let text = self.text.trim();
        if !text.is_empty() {
            object.insert(TEXT_KEY.to_string(), Value::String(text.to_string()));
        }
        object.extend(self.children);

        (self.name, Value::Object(object))
    }
}

fn utf8(bytes: &[u8]) -> Result<String, XmlError> {
    std::str::from_utf8(bytes)
        .map(str::to_owned)
        .map_err(|e| XmlError::Syntax(e.to_string()))
}

/// Serializes a value tree as an XML document.
///
/// # Errors
///
/// Returns an error if an object key is not a valid XML name.
pub fn build_xml(value: &Value, options: XmlOptions) -> Result<String, XmlError> {
    let mut writer = if options.indent > 0 {
        Writer::new_with_indent(Vec::new(), b' ', options.indent)
    } else {
        Writer::new(Vec::new())
    };

    if options.declaration {
        emit(
            &mut writer,
            Event::Decl(BytesDecl::new("1.0", Some("UTF-8"), None)),
        )?;
    }

    if is_item_list_object(value) {
        return Err(XmlError::ItemListObject);
    }

    match natural_root(value) {
        Some((name, content)) => write_element(&mut writer, name, content)?,
        None => write_element(&mut writer, ROOT_TAG, value)?,
    }

    String::from_utf8(writer.into_inner()).map_err(|e| XmlError::Write(e.to_string()))
}

fn natural_root(value: &Value) -> Option<(&str, &Value)> {
    let Value::Object(object) = value else {
        return None;
    };
    if object.len() != 1 {
        return None;
    }
    let (name, content) = object.iter().next()?;
    // A document element named `root` would be collapsed when read back.
    (name != ROOT_TAG && !content.is_array() && is_valid_name(name))
        .then_some((name.as_str(), content))
}

/// `{"item": [...]}` would be written exactly like a top-level list.
fn is_item_list_object(value: &Value) -> bool {
    matches!(value, Value::Object(object)
        if object.len() == 1 && object.get(ITEM_TAG).is_some_and(Value::is_array))
}

/// Writes `value` under `name`, repeating the element for array values.
///
/// An empty array still writes one empty element so the key is kept.
fn write_field(writer: &mut Writer<Vec<u8>>, name: &str, value: &Value) -> Result<(), XmlError> {
    match value {
        Value::Array(items) if items.is_empty() => write_element(writer, name, value),
        Value::Array(items) => items
            .iter()
            .try_for_each(|item| write_element(writer, name, item)),
        _ => write_element(writer, name, value),
    }
}

/// Writes exactly one element named `name` holding `value`.
fn write_element(writer: &mut Writer<Vec<u8>>, name: &str, value: &Value) -> Result<(), XmlError> {
    if !is_valid_name(name) {
        return Err(XmlError::InvalidName(name.to_string()));
    }

    match value {
        Value::Null => emit(writer, Event::Empty(BytesStart::new(name))),
        Value::String(s) if s.is_empty() => emit(writer, Event::Empty(BytesStart::new(name))),
        Value::String(_) | Value::Number(_) | Value::Bool(_) => {
            emit(writer, Event::Start(BytesStart::new(name)))?;
            emit(writer, Event::Text(BytesText::new(&scalar_text(value))))?;
            emit(writer, Event::End(BytesEnd::new(name)))
        }
        Value::Array(items) => {
            if items.is_empty() {
                return emit(writer, Event::Empty(BytesStart::new(name)));
            }
            emit(writer, Event::Start(BytesStart::new(name)))?;
            for item in items {
                write_element(writer, ITEM_TAG, item)?;
            }
            emit(writer, Event::End(BytesEnd::new(name)))
        }
        Value::Object(object) => write_object(writer, name, object),
    }
}

fn write_object(
    writer: &mut Writer<Vec<u8>>,
    name: &str,
    object: &Map<String, Value>,
) -> Result<(), XmlError> {
    let mut start = BytesStart::new(name);
    if let Some(attributes) = object.get(ATTRIBUTES_KEY) {
        let Value::Object(attributes) = attributes else {
            return Err(XmlError::InvalidName(ATTRIBUTES_KEY.to_string()));
        };
        for (key, value) in attributes {
            if !is_valid_name(key) {
                return Err(XmlError::InvalidName(key.clone()));
            }
            start.push_attribute((key.as_str(), scalar_text(value).as_str()));
        }
    }

    let text = object.get(TEXT_KEY).map(scalar_text);
    let children: Vec<(&String, &Value)> = object
        .iter()
        .filter(|(key, _)| *key != ATTRIBUTES_KEY && *key != TEXT_KEY)
        .collect();

    if children.is_empty() && text.as_deref().is_none_or(str::is_empty) {
        return emit(writer, Event::Empty(start));
    }

    emit(writer, Event::Start(start))?;
    if let Some(text) = text.filter(|t| !t.is_empty()) {
        emit(writer, Event::Text(BytesText::new(&text)))?;
    }
    for (key, value) in children {
        write_field(writer, key, value)?;
    }
    emit(writer, Event::End(BytesEnd::new(name)))
}

fn scalar_text(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

fn emit(writer: &mut Writer<Vec<u8>>, event: Event<'_>) -> Result<(), XmlError> {
    writer
        .write_event(event)
        .map_err(|e| XmlError::Write(e.to_string()))
}

/// Returns true if `name` can be used as an element or attribute name.
#[must_use]
pub fn is_valid_name(name: &str) -> bool {
    let mut chars = name.chars();
    let Some(first) = chars.next() else {
        return false;
    };
    (first.is_alphabetic() || first == '_')
        && chars.all(|c| c.is_alphanumeric() || matches!(c, '_' | '-' | '.' | ':'))
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    const COMPACT: XmlOptions = XmlOptions {
        indent: 0,
        declaration: false,
    };

    #[test]
    fn test_parse_keeps_named_root() {
        let value = parse_xml("<note><to>Tove</to><from>Jani</from></note>").unwrap();
        assert_eq!(value, json!({"note": {"to": "Tove", "from": "Jani"}}));
    }

    #[test]
    fn test_parse_collapses_root_named_root() {
        let value = parse_xml("<root><a>1</a><b>2</b></root>").unwrap();
        assert_eq!(value, json!({"a": "1", "b": "2"}));
    }

    #[test]
    fn test_parse_repeated_children_become_array() {
        let value = parse_xml("<list><v>1</v><v>2</v><v>3</v></list>").unwrap();
        assert_eq!(value, json!({"list": {"v": ["1", "2", "3"]}}));
    }

    #[test]
    fn test_parse_root_items_become_array() {
        let single = parse_xml("<root><item>a</item></root>").unwrap();
        assert_eq!(single, json!(["a"]));

        let many = parse_xml("<root><item>a</item><item>b</item></root>").unwrap();
        assert_eq!(many, json!(["a", "b"]));
    }

    #[test]
    fn test_parse_attributes_and_mixed_text() {
        let value = parse_xml(r#"<a id="7">hello<b>x</b></a>"#).unwrap();
        assert_eq!(
            value,
            json!({"a": {"$": {"id": "7"}, "_": "hello", "b": "x"}})
        );
    }

    #[test]
    fn test_parse_unescapes_text_and_cdata() {
        let value = parse_xml("<a><b>x &amp; y</b><c><![CDATA[<raw>]]></c></a>").unwrap();
        assert_eq!(value, json!({"a": {"b": "x & y", "c": "<raw>"}}));
    }

    #[test]
    fn test_parse_ignores_prolog_and_comments() {
        let input = "<?xml version=\"1.0\"?>\n<!-- note -->\n<a>1</a>\n";
        assert_eq!(parse_xml(input).unwrap(), json!({"a": "1"}));
    }

    #[test]
    fn test_parse_empty_element() {
        assert_eq!(parse_xml("<root/>").unwrap(), json!(""));
        assert_eq!(parse_xml("<a><b/></a>").unwrap(), json!({"a": {"b": ""}}));
    }

    #[test]
    fn test_parse_errors() {
        assert_eq!(parse_xml("plain text"), Err(XmlError::TextOutsideRoot));
        assert_eq!(parse_xml(""), Err(XmlError::NoRoot));
        assert_eq!(parse_xml("<a/><b/>"), Err(XmlError::MultipleRoots));
        assert!(matches!(parse_xml("<a><b></a>"), Err(XmlError::Syntax(_))));
        assert!(parse_xml("<a>1</a> trailing").is_err());
        assert!(parse_xml("<a>").is_err());
    }

    #[test]
    fn test_build_single_key_object_uses_key_as_root() {
        let xml = build_xml(&json!({"quote": "{{test-quote}}"}), COMPACT).unwrap();
        assert_eq!(xml, "<quote>{{test-quote}}</quote>");
    }

    #[test]
    fn test_build_wraps_other_values_in_root() {
        let xml = build_xml(&json!({"a": 1, "b": true}), COMPACT).unwrap();
        assert_eq!(xml, "<root><a>1</a><b>true</b></root>");

        let xml = build_xml(&json!(["x", "y"]), COMPACT).unwrap();
        assert_eq!(xml, "<root><item>x</item><item>y</item></root>");

        let xml = build_xml(&json!("text"), COMPACT).unwrap();
        assert_eq!(xml, "<root>text</root>");
    }

    #[test]
    fn test_build_wraps_single_root_key() {
        let xml = build_xml(&json!({"root": {"a": "1"}}), COMPACT).unwrap();
        assert_eq!(xml, "<root><root><a>1</a></root></root>");
        assert_eq!(parse_xml(&xml).unwrap(), json!({"root": {"a": "1"}}));

        let xml = build_xml(&json!({"root": "x"}), COMPACT).unwrap();
        assert_eq!(xml, "<root><root>x</root></root>");
    }

    #[test]
    fn test_build_rejects_object_holding_only_an_item_list() {
        assert_eq!(
            build_xml(&json!({"item": ["a", "b"]}), COMPACT),
            Err(XmlError::ItemListObject)
        );
        assert_eq!(
            build_xml(&json!({"item": []}), COMPACT),
            Err(XmlError::ItemListObject)
        );
        assert_eq!(
            build_xml(&json!({"item": "a"}), COMPACT).unwrap(),
            "<item>a</item>"
        );
    }

    #[test]
    fn test_build_keeps_keys_of_empty_arrays() {
        let xml = build_xml(&json!({"a": [], "b": "1"}), COMPACT).unwrap();
        assert_eq!(xml, "<root><a/><b>1</b></root>");
        assert_eq!(parse_xml(&xml).unwrap(), json!({"a": "", "b": "1"}));
    }

    #[test]
    fn test_build_empty_containers_read_back_as_empty_text() {
        for value in [json!({}), json!([]), json!(null), json!("")] {
            let xml = build_xml(&value, COMPACT).unwrap();
            assert_eq!(xml, "<root/>");
            assert_eq!(parse_xml(&xml).unwrap(), json!(""));
        }
    }

    #[test]
    fn test_build_repeats_keyed_arrays() {
        let xml = build_xml(&json!({"list": {"v": [1, 2]}}), COMPACT).unwrap();
        assert_eq!(xml, "<list><v>1</v><v>2</v></list>");
    }

    #[test]
    fn test_build_escapes_text_and_attributes() {
        let xml = build_xml(&json!({"a": {"$": {"q": "\"x\""}, "_": "1 < 2"}}), COMPACT).unwrap();
        assert_eq!(xml, r#"<a q="&quot;x&quot;">1 &lt; 2</a>"#);
    }

    #[test]
    fn test_build_rejects_invalid_names() {
        let result = build_xml(&json!({"a": 1, "not valid": 2}), COMPACT);
        assert_eq!(result, Err(XmlError::InvalidName("not valid".to_string())));
    }

    #[test]
    fn test_build_writes_declaration() {
        let xml = build_xml(&json!({"a": "1"}), XmlOptions::default()).unwrap();
        assert!(xml.starts_with("<?xml version=\"1.0\" encoding=\"UTF-8\"?>"));
        assert!(xml.ends_with("<a>1</a>"));
    }

    #[test]
    fn test_build_then_parse_is_equivalent() {
        let value = json!({"order": {"id": "1", "lines": {"line": [{"sku": "a"}, {"sku": "b"}]}}});
        let xml = build_xml(&value, XmlOptions::default()).unwrap();
        assert_eq!(parse_xml(&xml).unwrap(), value);
    }

    #[test]
    fn test_valid_names() {
        assert!(is_valid_name("a"));
        assert!(is_valid_name("_x-1.y:z"));
        assert!(!is_valid_name(""));
        assert!(!is_valid_name("1a"));
        assert!(!is_valid_name("a b"));
        assert!(!is_valid_name("$"));
    }
}
