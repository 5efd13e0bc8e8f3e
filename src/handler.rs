use serde::Deserialize;
use serde_json::{Map, Value as Json};
use tracing::{debug, trace};

use crate::error::{DecodeError, json_kind};
use crate::model::{Link, Member, MemberType};
use crate::transfer::{DomainType, Property, TObject, TransferObject};

/// Top-level keys of the Restful Objects envelope that are never members.
const ENVELOPE_KEYS: &[&str] = &[
    "links",
    "title",
    "members",
    "extensions",
    "domainType",
    "instanceId",
    "serviceId",
];

#[derive(Debug, Clone)]
pub struct HandlerConfig {
    /// Fail on top-level entries that are neither envelope keys nor members.
    pub strict: bool,
    /// Route documents carrying an `extensions` marker to the metadata decoders.
    pub detect_metadata: bool,
}

impl Default for HandlerConfig {
    fn default() -> Self {
        HandlerConfig {
            strict: false,
            detect_metadata: true,
        }
    }
}

/// Turns raw hypermedia documents into [`TransferObject`]s.
#[derive(Debug, Default)]
pub struct TransferObjectHandler {
    config: HandlerConfig,
}

impl TransferObjectHandler {
    pub fn new() -> Self {
        TransferObjectHandler {
            config: HandlerConfig::default(),
        }
    }

    pub fn with_config(config: HandlerConfig) -> Self {
        TransferObjectHandler { config }
    }

    pub fn config(&self) -> &HandlerConfig {
        &self.config
    }

    pub fn parse(&self, document: &str) -> Result<TransferObject, DecodeError> {
        let root: Json = serde_json::from_str(document)?;
        self.decode(root)
    }

    /// Same as [`parse`](Self::parse) for a document that is already a JSON tree.
    pub fn decode(&self, root: Json) -> Result<TransferObject, DecodeError> {
        let map = match root {
            Json::Object(map) => map,
            other => return Err(DecodeError::NotAnObject(json_kind(&other))),
        };

        let links = decode_links(&map)?;

        if self.config.detect_metadata {
            match metadata_kind(&map) {
                Some(MetadataKind::DomainType) => {
                    let domain_type = DomainType::deserialize(Json::Object(map)).map_err(
                        |source| DecodeError::InvalidMetadata {
                            kind: "domain type",
                            source,
                        },
                    )?;
                    debug!(identity = ?domain_type.identity(), "decoded domain type");
                    return Ok(TransferObject::DomainType(domain_type));
                }
                Some(MetadataKind::Property) => {
                    let property = Property::deserialize(Json::Object(map)).map_err(|source| {
                        DecodeError::InvalidMetadata {
                            kind: "property",
                            source,
                        }
                    })?;
                    debug!(identity = ?property.identity(), "decoded property description");
                    return Ok(TransferObject::Property(property));
                }
                None => {}
            }
        }

        let object = self.decode_object(map, links)?;
        debug!(
            title = %object.title,
            members = object.members().len(),
            properties = object.get_properties().len(),
            "decoded object"
        );
        Ok(TransferObject::Object(object))
    }

    fn decode_object(
        &self,
        map: Map<String, Json>,
        links: Vec<Link>,
    ) -> Result<TObject, DecodeError> {
        let mut members = Vec::new();

        for (name, entry) in &map {
            if ENVELOPE_KEYS.contains(&name.as_str()) {
                continue;
            }
            match Member::from_json(name, entry) {
                Some(member) => members.push(member),
                None if self.config.strict => {
                    return Err(DecodeError::UnrecognizedEntry { name: name.clone() });
                }
                None => trace!(entry = %name, "ignoring top-level entry"),
            }
        }

        if let Some(Json::Object(nested)) = map.get("members") {
            for (name, entry) in nested {
                match Member::from_json(name, entry) {
                    Some(member) => members.push(member),
                    None => trace!(member = %name, "ignoring entry under members"),
                }
            }
        }

        let text = |key: &str| map.get(key).and_then(Json::as_str).map(str::to_string);

        let title = text("title")
            .or_else(|| links.first().map(|l| l.title.clone()))
            .unwrap_or_default();

        let mut object = TObject::new(title, links, members);
        object.domain_type = text("domainType");
        object.instance_id = text("instanceId");
        Ok(object)
    }
}

enum MetadataKind {
    DomainType,
    Property,
}

fn metadata_kind(map: &Map<String, Json>) -> Option<MetadataKind> {
    let extensions = map.get("extensions")?.as_object()?;

    if map.contains_key("canonicalName") || extensions.contains_key("pluralName") {
        return Some(MetadataKind::DomainType);
    }

    let is_property = map
        .get("memberType")
        .and_then(Json::as_str)
        .and_then(MemberType::parse)
        == Some(MemberType::Property);
    if map.contains_key("id") && is_property && !map.contains_key("value") {
        return Some(MetadataKind::Property);
    }

    None
}

fn decode_links(map: &Map<String, Json>) -> Result<Vec<Link>, DecodeError> {
    let raw = map.get("links").ok_or(DecodeError::MissingLinks)?;
    let Json::Array(entries) = raw else {
        return Err(DecodeError::LinksNotArray(json_kind(raw)));
    };

    entries
        .iter()
        .enumerate()
        .map(|(index, entry)| {
            Link::deserialize(entry).map_err(|source| DecodeError::InvalidLink { index, source })
        })
        .collect()
}

#[cfg(test)]
mod handler_tests {
    use super::*;

    #[test]
    fn handler_creation() {
        let handler = TransferObjectHandler::new();
        assert!(!handler.config().strict);
        assert!(handler.config().detect_metadata);
    }

    #[test]
    fn minimal_document() {
        let handler = TransferObjectHandler::new();
        let decoded = handler
            .parse(r#"{"links": [{"rel": "self", "href": "http://x/1", "title": "One"}]}"#)
            .unwrap();
        let object = decoded.as_object().unwrap();
        assert_eq!(object.title, "One");
        assert!(object.members().is_empty());
    }

    #[test]
    fn rejects_syntax_errors() {
        let err = TransferObjectHandler::new().parse("{links: ").unwrap_err();
        assert!(matches!(err, DecodeError::Json(_)));
    }

    #[test]
    fn rejects_missing_links() {
        let err = TransferObjectHandler::new().parse(r#"{"title": "x"}"#).unwrap_err();
        assert!(matches!(err, DecodeError::MissingLinks));
    }
}
