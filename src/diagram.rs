use std::collections::BTreeMap;

use serde::Serialize;
use tracing::debug;

use crate::transfer::{DomainType, Property, TransferObject};

/// Collects class and property metadata for one diagram session.
///
/// The session is complete once the number of distinct classes received
/// equals the expected class count. Property counts are tracked but do not
/// take part in the completeness check yet.
#[derive(Debug, Clone, Serialize)]
pub struct DiagramAggregator {
    title: String,
    classes: BTreeMap<String, DomainType>,
    properties: BTreeMap<String, Property>,
    /// Expected number of classes, -1 while unknown.
    number_of_classes: i32,
    number_of_properties: i32,
}

impl DiagramAggregator {
    pub fn new(title: impl Into<String>) -> Self {
        DiagramAggregator {
            title: title.into(),
            classes: BTreeMap::new(),
            properties: BTreeMap::new(),
            number_of_classes: -1,
            number_of_properties: 0,
        }
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    /// Fold one decoded document into the session.
    ///
    /// Returns true when it was stored as a new class or property. Plain
    /// objects, metadata without any identity and repeats of an already
    /// known identity are dropped.
    pub fn add_data(&mut self, obj: TransferObject) -> bool {
        debug!(title = %self.title, kind = obj.kind(), "add data");
        match obj {
            TransferObject::DomainType(domain_type) => {
                insert_new(&mut self.classes, domain_type.identity(), domain_type)
            }
            TransferObject::Property(property) => {
                insert_new(&mut self.properties, property.identity(), property)
            }
            TransferObject::Object(object) => {
                debug!(title = %object.title, "object is not diagram data, ignored");
                false
            }
        }
    }

    pub fn can_be_displayed(&self) -> bool {
        debug!(
            title = %self.title,
            expected_classes = self.number_of_classes,
            classes = self.classes.len(),
            expected_properties = self.number_of_properties,
            properties = self.properties.len(),
            "can be displayed?"
        );
        // TODO: also require number_of_properties == properties.len() once the
        // session driver reports property totals reliably.
        usize::try_from(self.number_of_classes).is_ok_and(|n| n == self.classes.len())
    }

    pub fn set_number_of_classes(&mut self, n: i32) {
        self.number_of_classes = n;
    }

    pub fn dec_number_of_classes(&mut self) {
        self.number_of_classes = self.number_of_classes.saturating_sub(1);
    }

    pub fn inc_number_of_properties(&mut self, inc: i32) {
        self.number_of_properties = self.number_of_properties.saturating_add(inc);
    }

    pub fn number_of_classes(&self) -> i32 {
        self.number_of_classes
    }

    pub fn number_of_properties(&self) -> i32 {
        self.number_of_properties
    }

    pub fn classes(&self) -> impl Iterator<Item = &DomainType> {
        self.classes.values()
    }

    pub fn properties(&self) -> impl Iterator<Item = &Property> {
        self.properties.values()
    }

    pub fn class(&self, identity: &str) -> Option<&DomainType> {
        self.classes.get(identity)
    }

    /// Properties whose self link points below the given class.
    pub fn properties_of<'a>(
        &'a self,
        class: &'a DomainType,
    ) -> impl Iterator<Item = &'a Property> {
        let type_id = class.domain_type_id();
        self.properties
            .values()
            .filter(move |p| type_id.is_some() && p.domain_type_id() == type_id)
    }
}

fn insert_new<T>(set: &mut BTreeMap<String, T>, identity: Option<String>, item: T) -> bool {
    let Some(identity) = identity else {
        debug!("metadata has no identity, ignored");
        return false;
    };
    if set.contains_key(&identity) {
        debug!(identity = %identity, "already known, keeping first");
        return false;
    }
    set.insert(identity, item);
    true
}
