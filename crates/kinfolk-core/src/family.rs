//! Family data model.
//!
//! A [`Family`] is one immutable snapshot of a genealogy: a list of
//! [`Person`] records and a list of couple [`Relation`]s. Persons are
//! identified by their position in the person list ([`PersonIndex`]);
//! relations refer to persons only through those indices.
//!
//! Every mutation produces a new `Family` value (`with_*` methods), so a
//! renderer holding a borrowed snapshot always observes consistent data.
//!
//! # Example
//!
//! ```
//! # use kinfolk_core::family::{Family, Gender, NaiveDate, Person, Relation};
//! let date = |y, m, d| NaiveDate::from_ymd_opt(y, m, d).unwrap();
//! let family = Family::new(
//!     vec![
//!         Person::new("John", "Doe", Gender::Male, date(1940, 9, 27)),
//!         Person::new("Jane", "Brennan", Gender::Female, date(1945, 6, 14)),
//!         Person::new("Jack", "Doe", Gender::Male, date(1965, 11, 23)),
//!     ],
//!     vec![Relation::new(0, 1, vec![2])],
//! );
//!
//! let relations = family.relations_of(1);
//! assert_eq!(relations.len(), 1);
//! assert_eq!(relations[0].partner_of(1).unwrap(), 0);
//! assert!(family.relations_of(2).is_empty());
//! ```

use std::{fmt, str::FromStr};

pub use chrono::NaiveDate;
use chrono::format::{Item, StrftimeItems};
use log::{debug, trace};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Position of a person within [`Family::persons`].
pub type PersonIndex = usize;

/// Errors raised by lookups on a [`Family`] snapshot.
///
/// These all describe a corrupt snapshot or a bad index supplied by the
/// caller; none of them is recoverable by the renderer.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FamilyError {
    #[error("person index {index} is out of bounds (family has {len} persons)")]
    PersonOutOfBounds { index: PersonIndex, len: usize },

    #[error("relation #{relation} references person {index}, but the family has {len} persons")]
    RelationOutOfBounds {
        relation: usize,
        index: PersonIndex,
        len: usize,
    },

    #[error("person {person} is not a partner in relation ({male}, {female})")]
    NoPartner {
        person: PersonIndex,
        male: PersonIndex,
        female: PersonIndex,
    },
}

/// Gender of a person, as shown in node labels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Gender {
    Male,
    Female,
    NonBinary,
}

impl Gender {
    /// Returns the short label used in node text (`m`, `f`, `nb`).
    pub fn label(self) -> &'static str {
        match self {
            Self::Male => "m",
            Self::Female => "f",
            Self::NonBinary => "nb",
        }
    }
}

impl fmt::Display for Gender {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for Gender {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "male" | "m" => Ok(Self::Male),
            "female" | "f" => Ok(Self::Female),
            "non-binary" | "nonbinary" | "nb" => Ok(Self::NonBinary),
            _ => Err(format!(
                "invalid gender `{s}`, valid values: male, female, non-binary"
            )),
        }
    }
}

/// A validated `strftime` pattern used to print birth and death dates.
///
/// Validation happens once up front so formatting a date can never fail.
///
/// ```
/// # use kinfolk_core::family::DateFormat;
/// assert!(DateFormat::new("%d.%m.%Y").is_ok());
/// assert!(DateFormat::new("%Q").is_err());
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DateFormat {
    pattern: String,
}

impl DateFormat {
    /// Parses and validates a `strftime` pattern.
    pub fn new(pattern: &str) -> Result<Self, String> {
        if StrftimeItems::new(pattern).any(|item| matches!(item, Item::Error)) {
            return Err(format!("invalid date format `{pattern}`"));
        }
        Ok(Self {
            pattern: pattern.to_string(),
        })
    }

    /// Returns the raw pattern.
    pub fn pattern(&self) -> &str {
        &self.pattern
    }

    /// Formats a date with this pattern.
    pub fn format(&self, date: NaiveDate) -> String {
        date.format(&self.pattern).to_string()
    }
}

impl Default for DateFormat {
    fn default() -> Self {
        Self {
            pattern: String::from("%Y-%m-%d"),
        }
    }
}

/// A single person record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Person {
    first_name: String,
    last_name: String,
    gender: Gender,
    birth_date: NaiveDate,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    death_date: Option<NaiveDate>,
}

impl Person {
    /// Creates a living person.
    pub fn new(
        first_name: impl Into<String>,
        last_name: impl Into<String>,
        gender: Gender,
        birth_date: NaiveDate,
    ) -> Self {
        Self {
            first_name: first_name.into(),
            last_name: last_name.into(),
            gender,
            birth_date,
            death_date: None,
        }
    }

    /// Sets the date of death (builder style).
    pub fn with_death_date(mut self, death_date: NaiveDate) -> Self {
        self.death_date = Some(death_date);
        self
    }

    pub fn first_name(&self) -> &str {
        &self.first_name
    }

    pub fn last_name(&self) -> &str {
        &self.last_name
    }

    pub fn gender(&self) -> Gender {
        self.gender
    }

    pub fn birth_date(&self) -> NaiveDate {
        self.birth_date
    }

    /// Returns the date of death; `None` means the person is living.
    pub fn death_date(&self) -> Option<NaiveDate> {
        self.death_date
    }

    pub fn is_living(&self) -> bool {
        self.death_date.is_none()
    }

    /// Returns the first label line: `"first last (gender)"`.
    pub fn summary(&self) -> String {
        format!("{} {} ({})", self.first_name, self.last_name, self.gender)
    }

    /// Returns the second label line: the birth date, or `"birth - death"`
    /// for a deceased person.
    pub fn lifespan(&self, format: &DateFormat) -> String {
        let born = format.format(self.birth_date);
        match self.death_date {
            Some(died) => format!("{born} - {}", format.format(died)),
            None => born,
        }
    }
}

/// A couple union with an ordered list of children.
///
/// The order of `children` decides their left-to-right placement.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Relation {
    male: PersonIndex,
    female: PersonIndex,
    #[serde(default)]
    children: Vec<PersonIndex>,
}

impl Relation {
    pub fn new(male: PersonIndex, female: PersonIndex, children: Vec<PersonIndex>) -> Self {
        Self {
            male,
            female,
            children,
        }
    }

    pub fn male(&self) -> PersonIndex {
        self.male
    }

    pub fn female(&self) -> PersonIndex {
        self.female
    }

    pub fn children(&self) -> &[PersonIndex] {
        &self.children
    }

    /// Returns true if `person` occupies either partner slot.
    pub fn involves(&self, person: PersonIndex) -> bool {
        self.male == person || self.female == person
    }

    /// Returns the index in the other partner slot.
    ///
    /// # Errors
    ///
    /// Returns [`FamilyError::NoPartner`] if `person` is in neither slot.
    pub fn partner_of(&self, person: PersonIndex) -> Result<PersonIndex, FamilyError> {
        if self.male == person {
            Ok(self.female)
        } else if self.female == person {
            Ok(self.male)
        } else {
            Err(FamilyError::NoPartner {
                person,
                male: self.male,
                female: self.female,
            })
        }
    }

    fn referenced(&self) -> impl Iterator<Item = PersonIndex> + '_ {
        [self.male, self.female]
            .into_iter()
            .chain(self.children.iter().copied())
    }
}

/// An immutable snapshot of persons and relations.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Family {
    #[serde(default)]
    persons: Vec<Person>,
    #[serde(default)]
    relations: Vec<Relation>,
}

impl Family {
    pub fn new(persons: Vec<Person>, relations: Vec<Relation>) -> Self {
        Self { persons, relations }
    }

    pub fn persons(&self) -> &[Person] {
        &self.persons
    }

    pub fn relations(&self) -> &[Relation] {
        &self.relations
    }

    /// Number of persons in the snapshot.
    pub fn len(&self) -> usize {
        self.persons.len()
    }

    pub fn is_empty(&self) -> bool {
        self.persons.is_empty()
    }

    /// Looks up a person by index.
    ///
    /// # Errors
    ///
    /// Returns [`FamilyError::PersonOutOfBounds`] for an index past the end.
    pub fn person(&self, index: PersonIndex) -> Result<&Person, FamilyError> {
        self.persons
            .get(index)
            .ok_or(FamilyError::PersonOutOfBounds {
                index,
                len: self.persons.len(),
            })
    }

    /// Returns every relation in which `person` is a partner, in list order.
    ///
    /// An empty result means the person has no recorded partner.
    pub fn relations_of(&self, person: PersonIndex) -> Vec<&Relation> {
        self.relations
            .iter()
            .filter(|relation| relation.involves(person))
            .collect()
    }

    /// Checks that every index referenced by a relation names an existing person.
    pub fn validate(&self) -> Result<(), FamilyError> {
        let len = self.persons.len();
        for (ordinal, relation) in self.relations.iter().enumerate() {
            if let Some(index) = relation.referenced().find(|&index| index >= len) {
                return Err(FamilyError::RelationOutOfBounds {
                    relation: ordinal,
                    index,
                    len,
                });
            }
        }
        Ok(())
    }

    /// Returns a new snapshot with `person` appended at the end.
    pub fn with_person_added(&self, person: Person) -> Self {
        let mut persons = self.persons.clone();
        persons.push(person);
        Self::new(persons, self.relations.clone())
    }

    /// Returns a new snapshot with the person at `index` replaced.
    pub fn with_person_updated(&self, index: PersonIndex, person: Person) -> Result<Self, FamilyError> {
        self.person(index)?;
        let mut persons = self.persons.clone();
        persons[index] = person;
        Ok(Self::new(persons, self.relations.clone()))
    }

    /// Returns a new snapshot without the person at `index`.
    ///
    /// Relations in which the person is a partner are dropped, the person is
    /// removed from every children list, and all remaining indices above
    /// `index` move down by one so they keep naming the same persons.
    pub fn with_person_removed(&self, index: PersonIndex) -> Result<Self, FamilyError> {
        self.person(index)?;

        let shift = |i: PersonIndex| if i > index { i - 1 } else { i };

        let mut persons = self.persons.clone();
        persons.remove(index);

        let relations: Vec<Relation> = self
            .relations
            .iter()
            .filter(|relation| !relation.involves(index))
            .map(|relation| Relation {
                male: shift(relation.male),
                female: shift(relation.female),
                children: relation
                    .children
                    .iter()
                    .copied()
                    .filter(|&child| child != index)
                    .map(shift)
                    .collect(),
            })
            .collect();

        debug!(
            index,
            dropped_relations = self.relations.len() - relations.len();
            "Removed person from family"
        );
        Ok(Self::new(persons, relations))
    }

    /// Returns a new snapshot with `relation` appended.
    ///
    /// # Errors
    ///
    /// Returns [`FamilyError::RelationOutOfBounds`] if the relation names a
    /// person that does not exist.
    pub fn with_relation_added(&self, relation: Relation) -> Result<Self, FamilyError> {
        let len = self.persons.len();
        if let Some(index) = relation.referenced().find(|&index| index >= len) {
            return Err(FamilyError::RelationOutOfBounds {
                relation: self.relations.len(),
                index,
                len,
            });
        }
        trace!(male = relation.male, female = relation.female; "Adding relation");
        let mut relations = self.relations.clone();
        relations.push(relation);
        Ok(Self::new(self.persons.clone(), relations))
    }

    /// A small three-generation example family.
    ///
    /// Jill (index 3) is recorded in the male slot of her relation with
    /// James, which the renderer must handle like any other couple.
    pub fn sample() -> Self {
        let date = |y, m, d| NaiveDate::from_ymd_opt(y, m, d).unwrap_or_default();
        Self::new(
            vec![
                Person::new("John", "Doe", Gender::Male, date(1940, 9, 27))
                    .with_death_date(date(2010, 10, 17)),
                Person::new("Jane", "Brennan", Gender::Female, date(1945, 6, 14))
                    .with_death_date(date(2013, 7, 28)),
                Person::new("Jack", "Doe", Gender::Male, date(1965, 11, 23)),
                Person::new("Jill", "Doe", Gender::Female, date(1966, 6, 14)),
                Person::new("James", "Brown", Gender::Male, date(1962, 9, 27))
                    .with_death_date(date(2015, 9, 27)),
                Person::new("Jenny", "Brown", Gender::Female, date(1987, 6, 14)),
                Person::new("Joe", "Brown", Gender::Male, date(1991, 6, 14)),
                Person::new("Jade", "Brown", Gender::Female, date(1992, 3, 12)),
                Person::new("Judy", "Boure", Gender::Female, date(1967, 4, 30)),
            ],
            vec![
                Relation::new(0, 1, vec![2, 3]),
                Relation::new(3, 4, vec![5, 6, 7]),
                Relation::new(2, 8, vec![]),
            ],
        )
    }
}
