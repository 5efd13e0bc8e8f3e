use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Deserializer, Serialize};

static DOMAIN_TYPE_HREF: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"/domain-types/([^/?#]+)").unwrap());

/// HTTP method a link is meant to be followed with.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Method {
    #[default]
    Get,
    Post,
    Put,
    Delete,
}

/// A typed hypermedia reference embedded in a document.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Link {
    pub rel: String,
    pub href: String,

    #[serde(default, deserialize_with = "null_as_default")]
    pub title: String,

    /// Media type of the target representation.
    #[serde(default, rename = "type", deserialize_with = "null_as_default")]
    pub media_type: String,

    #[serde(default, deserialize_with = "null_as_default")]
    pub method: Method,
}

/// Optional link fields sent as `null` take their default.
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

impl Link {
    pub fn new(rel: impl Into<String>, href: impl Into<String>) -> Self {
        Self {
            rel: rel.into(),
            href: href.into(),
            title: String::new(),
            media_type: String::new(),
            method: Method::Get,
        }
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    /// `simple.SimpleObject` for
    /// `http://host/restful/domain-types/simple.SimpleObject/properties/name`.
    pub fn domain_type_id(&self) -> Option<&str> {
        DOMAIN_TYPE_HREF
            .captures(&self.href)
            .and_then(|cap| cap.get(1))
            .map(|m| m.as_str())
    }

    /// Restful Objects relations carry parameters
    /// (`urn:org.restfulobjects:rels/details;action="x"`); this compares the
    /// part before the first `;`.
    pub fn has_rel(&self, rel: &str) -> bool {
        self.rel.split(';').next() == Some(rel)
    }
}

/// Scalar payload of a member value.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Content {
    Null,
    Bool(bool),
    Number(serde_json::Number),
    String(String),
    /// Reference properties hold a link to the referenced object.
    Reference(Link),
}

impl From<bool> for Content {
    fn from(b: bool) -> Self {
        Content::Bool(b)
    }
}

impl From<i32> for Content {
    fn from(n: i32) -> Self {
        Content::Number(n.into())
    }
}

impl From<i64> for Content {
    fn from(n: i64) -> Self {
        Content::Number(n.into())
    }
}

impl From<&str> for Content {
    fn from(s: &str) -> Self {
        Content::String(s.to_string())
    }
}

impl From<String> for Content {
    fn from(s: String) -> Self {
        Content::String(s)
    }
}

/// A single typed value carried by a member.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Value {
    pub content: Content,
}

impl Value {
    pub const NULL: Value = Value {
        content: Content::Null,
    };

    pub fn new(content: impl Into<Content>) -> Self {
        Self {
            content: content.into(),
        }
    }

    /// Returns `None` for shapes a value cannot take (arrays, objects that are not links).
    pub fn from_json(json: &serde_json::Value) -> Option<Self> {
        let content = match json {
            serde_json::Value::Null => Content::Null,
            serde_json::Value::Bool(b) => Content::Bool(*b),
            serde_json::Value::Number(n) => Content::Number(n.clone()),
            serde_json::Value::String(s) => Content::String(s.clone()),
            serde_json::Value::Object(map) if map.contains_key("href") => {
                Content::Reference(Link::deserialize(json).ok()?)
            }
            serde_json::Value::Object(_) | serde_json::Value::Array(_) => return None,
        };
        Some(Self { content })
    }

    pub fn is_null(&self) -> bool {
        matches!(self.content, Content::Null)
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self.content {
            Content::Bool(b) => Some(b),
            _ => None,
        }
    }

    pub fn as_i64(&self) -> Option<i64> {
        match &self.content {
            Content::Number(n) => n.as_i64(),
            _ => None,
        }
    }

    pub fn as_f64(&self) -> Option<f64> {
        match &self.content {
            Content::Number(n) => n.as_f64(),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match &self.content {
            Content::String(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_link(&self) -> Option<&Link> {
        match &self.content {
            Content::Reference(link) => Some(link),
            _ => None,
        }
    }
}

/// Kind of a domain object member.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum MemberType {
    Property,
    Collection,
    Action,
}

impl MemberType {
    /// Accepts both the wire form (`property`) and the upper-case form (`PROPERTY`).
    pub fn parse(raw: &str) -> Option<Self> {
        match raw.to_ascii_lowercase().as_str() {
            "property" => Some(MemberType::Property),
            "collection" => Some(MemberType::Collection),
            "action" => Some(MemberType::Action),
            _ => None,
        }
    }
}

/// A named field of a transfer object.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Member {
    pub name: String,
    pub member_type: MemberType,
    pub value: Option<Value>,
    pub links: Vec<Link>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub disabled_reason: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub format: Option<String>,
}

impl Member {
    pub fn new(name: impl Into<String>, member_type: MemberType) -> Self {
        Self {
            name: name.into(),
            member_type,
            value: None,
            links: Vec::new(),
            disabled_reason: None,
            format: None,
        }
    }

    /// Decode an entry of the shape `{memberType, value?, links?}`.
    ///
    /// Returns `None` when the entry does not have that shape.
    pub fn from_json(name: &str, json: &serde_json::Value) -> Option<Self> {
        let map = json.as_object()?;
        let member_type = MemberType::parse(map.get("memberType")?.as_str()?)?;

        let links = match map.get("links") {
            None | Some(serde_json::Value::Null) => Vec::new(),
            Some(raw) => Vec::<Link>::deserialize(raw).ok()?,
        };

        let value = map.get("value").and_then(|raw| {
            let value = Value::from_json(raw);
            if value.is_none() {
                tracing::trace!(member = name, "member value has no scalar form, dropped");
            }
            value
        });

        let text = |key: &str| map.get(key).and_then(|v| v.as_str()).map(str::to_string);

        Some(Self {
            name: name.to_string(),
            member_type,
            value,
            links,
            disabled_reason: text("disabledReason"),
            format: text("format"),
        })
    }

    pub fn is_property(&self) -> bool {
        self.member_type == MemberType::Property
    }
}

#[cfg(test)]
mod model_tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn link_defaults() {
        let link: Link =
            serde_json::from_value(json!({"rel": "self", "href": "http://x/1"})).unwrap();
        assert_eq!(link.method, Method::Get);
        assert_eq!(link.title, "");
        assert_eq!(link.media_type, "");
    }

    #[test]
    fn link_requires_href() {
        assert!(serde_json::from_value::<Link>(json!({"rel": "self"})).is_err());
    }

    #[test]
    fn domain_type_id_from_href() {
        let link = Link::new(
            "self",
            "http://localhost:8080/restful/domain-types/simple.SimpleObject/properties/name",
        );
        assert_eq!(link.domain_type_id(), Some("simple.SimpleObject"));
        assert_eq!(Link::new("self", "http://x/objects/1").domain_type_id(), None);
    }

    #[test]
    fn rel_parameters_are_ignored() {
        let link = Link::new("urn:org.restfulobjects:rels/details;action=\"delete\"", "x");
        assert!(link.has_rel("urn:org.restfulobjects:rels/details"));
        assert!(!link.has_rel("self"));
    }

    #[test]
    fn value_shapes() {
        assert_eq!(Value::from_json(&json!(0)).unwrap().as_i64(), Some(0));
        assert!(Value::from_json(&json!(null)).unwrap().is_null());
        assert_eq!(Value::from_json(&json!("a")).unwrap().as_str(), Some("a"));
        assert!(Value::from_json(&json!([1, 2])).is_none());
        assert!(Value::from_json(&json!({"x": 1})).is_none());

        let reference = Value::from_json(&json!({
            "rel": "urn:org.restfulobjects:rels/value",
            "href": "http://x/objects/1",
            "title": "Bar"
        }))
        .unwrap();
        assert_eq!(reference.as_link().map(|l| l.title.as_str()), Some("Bar"));
    }

    #[test]
    fn member_type_is_case_insensitive() {
        assert_eq!(MemberType::parse("property"), Some(MemberType::Property));
        assert_eq!(MemberType::parse("ACTION"), Some(MemberType::Action));
        assert_eq!(MemberType::parse("widget"), None);
    }

    #[test]
    fn member_shape() {
        let member = Member::from_json(
            "name",
            &json!({"memberType": "property", "value": "Foo", "format": "string"}),
        )
        .unwrap();
        assert!(member.is_property());
        assert_eq!(member.value, Some(Value::new("Foo")));
        assert_eq!(member.format.as_deref(), Some("string"));

        assert!(Member::from_json("x", &json!({"value": 1})).is_none());
        assert!(Member::from_json("x", &json!("text")).is_none());
    }
}
