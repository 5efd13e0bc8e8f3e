use crate::error::NotFound;
use crate::model::Value;
use crate::transfer::TObject;

static NULL_VALUE: Value = Value::NULL;

/// Read-only lookup of member values by name.
#[derive(Debug, Clone)]
pub struct Revealator {
    object: TObject,
}

impl Revealator {
    pub fn new(mut object: TObject) -> Self {
        object.add_members_as_properties();
        Revealator { object }
    }

    /// Value of the named member.
    ///
    /// `None` means there is no such member. A member without a value (an
    /// action, or a property sent without one) yields [`Value::NULL`].
    pub fn get(&self, name: &str) -> Option<&Value> {
        self.object
            .member(name)
            .map(|m| m.value.as_ref().unwrap_or(&NULL_VALUE))
    }

    pub fn title(&self) -> &str {
        &self.object.title
    }

    pub fn object(&self) -> &TObject {
        &self.object
    }

    pub fn into_object(self) -> TObject {
        self.object
    }
}

impl From<TObject> for Revealator {
    fn from(object: TObject) -> Self {
        Revealator::new(object)
    }
}

/// Append-only list of decoded objects.
#[derive(Debug, Clone, Default)]
pub struct ObjectList {
    list: Vec<Revealator>,
}

impl ObjectList {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, item: Revealator) {
        self.list.push(item);
    }

    pub fn last(&self) -> Result<&Revealator, NotFound> {
        self.list.last().ok_or(NotFound { what: "object list" })
    }

    pub fn get(&self, index: usize) -> Option<&Revealator> {
        self.list.get(index)
    }

    pub fn len(&self) -> usize {
        self.list.len()
    }

    pub fn is_empty(&self) -> bool {
        self.list.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Revealator> {
        self.list.iter()
    }
}

impl std::ops::Index<usize> for ObjectList {
    type Output = Revealator;

    fn index(&self, index: usize) -> &Revealator {
        &self.list[index]
    }
}
