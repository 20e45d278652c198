//! Canonical in-memory model of a family tree.
//!
//! Relationships are not stored as first-class edges: marriage, parent-child
//! and sibling links are all derived from [`FamilyUnit`] membership on each
//! layout pass, so there is no back-reference to keep in sync.

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Sex {
    Male,
    Female,
    Unknown,
}

impl Sex {
    pub fn from_token(token: &str) -> Self {
        match token {
            "male" => Self::Male,
            "female" => Self::Female,
            _ => Self::Unknown,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Male => "male",
            Self::Female => "female",
            Self::Unknown => "unknown",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RelationType {
    #[default]
    Blood,
    Adoption,
}

impl RelationType {
    pub fn from_token(token: &str) -> Self {
        match token {
            "adoption" => Self::Adoption,
            _ => Self::Blood,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Blood => "blood",
            Self::Adoption => "adoption",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct PersonName {
    pub surname: String,
    pub given_name: String,
}

impl PersonName {
    /// "{surname} {given_name}", trimmed. The only place a display name is
    /// ever computed; `Person::display_name` must always equal this.
    pub fn display(&self) -> String {
        format!("{} {}", self.surname, self.given_name)
            .trim()
            .to_string()
    }
}

/// A life event (birth or death): raw source text, normalized partial ISO
/// date, and an optional place. `original_date` is never discarded even when
/// `date` fails normalization.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct EventDate {
    pub original_date: Option<String>,
    pub date: Option<String>,
    pub place: Option<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Person {
    /// Immutable once created; stable across edits.
    pub id: String,
    pub generation: i32,
    pub sex: Sex,
    pub name: PersonName,
    pub birth: EventDate,
    pub death: EventDate,
    /// Derived from `name`; re-derived on every rename, never edited directly.
    pub display_name: String,
    pub x: f32,
    pub y: f32,
    /// Provenance flag: true only for low-confidence extracted records.
    pub is_uncertain: bool,
}

impl Person {
    pub fn new(id: impl Into<String>, generation: i32, sex: Sex, name: PersonName) -> Self {
        let display_name = name.display();
        Self {
            id: id.into(),
            generation,
            sex,
            name,
            birth: EventDate::default(),
            death: EventDate::default(),
            display_name,
            x: 0.0,
            y: 0.0,
            is_uncertain: false,
        }
    }

    pub fn rename(&mut self, name: PersonName) {
        self.display_name = name.display();
        self.name = name;
    }
}

/// The atomic relationship record: 1-2 parents and zero or more children.
/// Children keep input order, used as a birth-order proxy when dates are
/// absent. A unit with zero parents is invalid and never enters a snapshot.
#[derive(Debug, Clone, PartialEq)]
pub struct FamilyUnit {
    pub id: String,
    pub parents: Vec<String>,
    pub children: Vec<String>,
    pub marriage_date: Option<String>,
    pub divorce_date: Option<String>,
    pub relation_type: RelationType,
}

/// One immutable state of the tree. Mutations build a new snapshot; history
/// entries are never edited in place.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Snapshot {
    pub persons: Vec<Person>,
    pub families: Vec<FamilyUnit>,
}

impl Snapshot {
    pub fn person(&self, id: &str) -> Option<&Person> {
        self.persons.iter().find(|p| p.id == id)
    }

    pub fn family(&self, id: &str) -> Option<&FamilyUnit> {
        self.families.iter().find(|f| f.id == id)
    }

    /// (min, max) generation present, or (1, 1) for an empty tree.
    pub fn generation_range(&self) -> (i32, i32) {
        let mut range: Option<(i32, i32)> = None;
        for person in &self.persons {
            range = Some(match range {
                Some((lo, hi)) => (lo.min(person.generation), hi.max(person.generation)),
                None => (person.generation, person.generation),
            });
        }
        range.unwrap_or((1, 1))
    }
}
