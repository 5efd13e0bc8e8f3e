use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::model::{Link, Member, MemberType};

/// Decoded form of one domain object document.
#[derive(Debug, Clone, Serialize)]
pub struct TObject {
    pub title: String,
    pub links: Vec<Link>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub domain_type: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub instance_id: Option<String>,

    members: Vec<Member>,

    #[serde(skip)]
    index: HashMap<String, usize>,

    /// Positions in `members` making up the properties view.
    #[serde(skip)]
    properties: Vec<usize>,
}

impl TObject {
    /// Members keep the given order; a repeated name keeps its first occurrence.
    pub fn new(title: impl Into<String>, links: Vec<Link>, members: Vec<Member>) -> Self {
        let mut object = TObject {
            title: title.into(),
            links,
            domain_type: None,
            instance_id: None,
            members: Vec::with_capacity(members.len()),
            index: HashMap::new(),
            properties: Vec::new(),
        };
        for member in members {
            if object.index.contains_key(&member.name) {
                continue;
            }
            object.index.insert(member.name.clone(), object.members.len());
            object.members.push(member);
        }
        object.add_members_as_properties();
        object
    }

    pub fn members(&self) -> &[Member] {
        &self.members
    }

    pub fn member(&self, name: &str) -> Option<&Member> {
        self.index.get(name).map(|&i| &self.members[i])
    }

    /// Members currently in the properties view, in member order.
    pub fn get_properties(&self) -> Vec<&Member> {
        self.properties.iter().map(|&i| &self.members[i]).collect()
    }

    /// Rebuild the properties view from the current member classification.
    ///
    /// Calling it again without an intervening `reclassify` yields the same view.
    pub fn add_members_as_properties(&mut self) {
        self.properties = self
            .members
            .iter()
            .enumerate()
            .filter(|(_, m)| m.is_property())
            .map(|(i, _)| i)
            .collect();
    }

    /// Change the kind of a member. The properties view is left as is until
    /// the next `add_members_as_properties`.
    pub fn reclassify(&mut self, name: &str, member_type: MemberType) -> bool {
        match self.index.get(name) {
            Some(&i) => {
                self.members[i].member_type = member_type;
                true
            }
            None => false,
        }
    }

    /// The `self` link, or the first link when none is marked as such.
    pub fn self_link(&self) -> Option<&Link> {
        self_link(&self.links)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DomainTypeExtensions {
    #[serde(default)]
    pub friendly_name: String,
    #[serde(default)]
    pub plural_name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub is_service: bool,
}

/// Class metadata (a `domain-type` document).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DomainType {
    #[serde(default)]
    pub canonical_name: String,
    pub links: Vec<Link>,

    /// Links to the member descriptions of this type.
    #[serde(default)]
    pub members: Vec<Link>,

    #[serde(default)]
    pub type_actions: Vec<Link>,

    #[serde(default)]
    pub extensions: DomainTypeExtensions,
}

impl DomainType {
    pub fn self_link(&self) -> Option<&Link> {
        self_link(&self.links)
    }

    /// Type id as it appears in `/domain-types/{id}` hrefs.
    pub fn domain_type_id(&self) -> Option<&str> {
        self.self_link().and_then(Link::domain_type_id)
    }

    /// Stable key for set membership, `None` when the document names no class.
    pub fn identity(&self) -> Option<String> {
        if !self.canonical_name.is_empty() {
            return Some(self.canonical_name.clone());
        }
        self.domain_type_id()
            .map(str::to_string)
            .or_else(|| self.self_link().map(|l| l.href.clone()))
            .filter(|identity| !identity.is_empty())
    }

    /// Member links that lead to property descriptions.
    pub fn property_links(&self) -> Vec<&Link> {
        self.members
            .iter()
            .filter(|l| l.href.contains("/properties/"))
            .collect()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PropertyExtensions {
    #[serde(default)]
    pub friendly_name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub return_type: Option<String>,
    #[serde(default)]
    pub max_length: Option<u32>,
    /// Number or string depending on the server.
    #[serde(default)]
    pub member_order: Option<serde_json::Value>,
}

/// Property metadata (a `property-description` document).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Property {
    pub id: String,
    pub links: Vec<Link>,

    #[serde(default)]
    pub optional: bool,

    #[serde(default)]
    pub extensions: PropertyExtensions,
}

impl Property {
    pub fn self_link(&self) -> Option<&Link> {
        self_link(&self.links)
    }

    /// The class this property is declared on, read from its self link.
    pub fn domain_type_id(&self) -> Option<&str> {
        self.self_link().and_then(Link::domain_type_id)
    }

    pub fn identity(&self) -> Option<String> {
        self.self_link()
            .map(|l| l.href.clone())
            .filter(|href| !href.is_empty())
            .or_else(|| Some(self.id.clone()).filter(|id| !id.is_empty()))
    }
}

fn self_link(links: &[Link]) -> Option<&Link> {
    links.iter().find(|l| l.has_rel("self")).or_else(|| links.first())
}

/// Everything the handler can produce from one document.
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum TransferObject {
    Object(TObject),
    DomainType(DomainType),
    Property(Property),
}

impl TransferObject {
    pub fn kind(&self) -> &'static str {
        match self {
            TransferObject::Object(_) => "object",
            TransferObject::DomainType(_) => "domainType",
            TransferObject::Property(_) => "property",
        }
    }

    pub fn links(&self) -> &[Link] {
        match self {
            TransferObject::Object(o) => &o.links,
            TransferObject::DomainType(d) => &d.links,
            TransferObject::Property(p) => &p.links,
        }
    }

    pub fn as_object(&self) -> Option<&TObject> {
        match self {
            TransferObject::Object(o) => Some(o),
            _ => None,
        }
    }

    pub fn into_object(self) -> Option<TObject> {
        match self {
            TransferObject::Object(o) => Some(o),
            _ => None,
        }
    }
}
