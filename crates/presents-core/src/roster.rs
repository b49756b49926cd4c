use std::collections::{BTreeMap, BTreeSet};
use std::fmt;

use crate::config::RosterConfig;
use crate::error::{Result, RosterError};
use crate::validation::build_roster;

/// Identifier of an adult, ordered by declaration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct AdultId(pub(crate) usize);

/// Identifier of a child, ordered by declaration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ChildId(pub(crate) usize);

/// Identifier of a family, ordered by declaration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct FamilyId(pub(crate) usize);

impl AdultId {
    pub fn index(self) -> usize {
        self.0
    }
}

impl ChildId {
    pub fn index(self) -> usize {
        self.0
    }
}

impl FamilyId {
    pub fn index(self) -> usize {
        self.0
    }
}

/// Anyone who can receive a present.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Person {
    Adult(AdultId),
    Child(ChildId),
}

impl From<AdultId> for Person {
    fn from(id: AdultId) -> Self {
        Person::Adult(id)
    }
}

impl From<ChildId> for Person {
    fn from(id: ChildId) -> Self {
        Person::Child(id)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Adult {
    pub(crate) key: String,
    pub(crate) first_name: String,
    pub(crate) nickname: Option<String>,
}

impl Adult {
    pub fn key(&self) -> &str {
        &self.key
    }

    pub fn first_name(&self) -> &str {
        &self.first_name
    }

    pub fn nickname(&self) -> Option<&str> {
        self.nickname.as_deref()
    }

    /// Nickname when there is one, first name otherwise.
    pub fn display_name(&self) -> &str {
        self.nickname.as_deref().unwrap_or(&self.first_name)
    }

    /// First letter, plus the letter following the first hyphen of a
    /// compound name (`Louis-Marie` gives `LM`).
    pub fn initials(&self) -> String {
        let mut initials: String = self.first_name.chars().take(1).collect();
        if let Some((_, rest)) = self.first_name.split_once('-') {
            initials.extend(rest.chars().next());
        }
        initials
    }
}

impl fmt::Display for Adult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.first_name)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Child {
    pub(crate) key: String,
    pub(crate) first_name: String,
}

impl Child {
    pub fn key(&self) -> &str {
        &self.key
    }

    pub fn first_name(&self) -> &str {
        &self.first_name
    }
}

impl fmt::Display for Child {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.first_name)
    }
}

/// A couple and their children.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Family {
    pub(crate) id: FamilyId,
    pub(crate) key: String,
    pub(crate) father: AdultId,
    pub(crate) mother: AdultId,
    pub(crate) children: Vec<ChildId>,
}

impl Family {
    pub fn id(&self) -> FamilyId {
        self.id
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    pub fn father(&self) -> AdultId {
        self.father
    }

    pub fn mother(&self) -> AdultId {
        self.mother
    }

    pub fn children(&self) -> &[ChildId] {
        &self.children
    }
}

static NO_GODPARENTS: BTreeSet<AdultId> = BTreeSet::new();

/// Validated, immutable reference data.
///
/// Every adult belongs to exactly one family as father or mother, and every
/// child to exactly one family. Identifiers are only issued by the roster
/// that owns them.
#[derive(Debug, Clone)]
pub struct Roster {
    pub(crate) adults: Vec<Adult>,
    pub(crate) children: Vec<Child>,
    pub(crate) families: Vec<Family>,
    pub(crate) adult_family: Vec<FamilyId>,
    pub(crate) child_family: Vec<FamilyId>,
    pub(crate) godparents: BTreeMap<ChildId, BTreeSet<AdultId>>,
    pub(crate) exempt: BTreeSet<AdultId>,
}

impl Roster {
    /// Validate a raw roster and build the lookup tables.
    pub fn from_config(config: &RosterConfig) -> Result<Self> {
        build_roster(config)
    }

    /// Parse and validate a TOML roster.
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let config = RosterConfig::from_toml_str(content)?;
        Self::from_config(&config)
    }

    /// The roster embedded in the binary.
    pub fn builtin() -> Result<Self> {
        Self::from_toml_str(crate::BUILTIN_ROSTER)
    }

    pub fn adult_count(&self) -> usize {
        self.adults.len()
    }

    pub fn child_count(&self) -> usize {
        self.children.len()
    }

    /// All adults, in declaration order.
    pub fn all_adults(&self) -> Vec<AdultId> {
        (0..self.adults.len()).map(AdultId).collect()
    }

    /// All children, in declaration order.
    pub fn all_children(&self) -> Vec<ChildId> {
        (0..self.children.len()).map(ChildId).collect()
    }

    /// Adults allowed to give to children, in declaration order.
    pub fn child_givers(&self) -> Vec<AdultId> {
        (0..self.adults.len())
            .map(AdultId)
            .filter(|adult| !self.exempt.contains(adult))
            .collect()
    }

    pub fn adults(&self) -> impl Iterator<Item = (AdultId, &Adult)> {
        self.adults
            .iter()
            .enumerate()
            .map(|(index, adult)| (AdultId(index), adult))
    }

    pub fn children(&self) -> impl Iterator<Item = (ChildId, &Child)> {
        self.children
            .iter()
            .enumerate()
            .map(|(index, child)| (ChildId(index), child))
    }

    pub fn families(&self) -> impl Iterator<Item = &Family> {
        self.families.iter()
    }

    pub fn adult(&self, id: AdultId) -> Result<&Adult> {
        self.adults
            .get(id.0)
            .ok_or_else(|| RosterError::UnknownPerson(format!("adult #{}", id.0)))
    }

    pub fn child(&self, id: ChildId) -> Result<&Child> {
        self.children
            .get(id.0)
            .ok_or_else(|| RosterError::UnknownPerson(format!("child #{}", id.0)))
    }

    pub fn adult_by_key(&self, key: &str) -> Option<AdultId> {
        self.adults
            .iter()
            .position(|adult| adult.key == key)
            .map(AdultId)
    }

    pub fn child_by_key(&self, key: &str) -> Option<ChildId> {
        self.children
            .iter()
            .position(|child| child.key == key)
            .map(ChildId)
    }

    /// Family the person belongs to, as parent or as child.
    pub fn family_of(&self, person: impl Into<Person>) -> Result<&Family> {
        let person = person.into();
        self.family_id(person)
            .and_then(|id| self.families.get(id.0))
            .ok_or_else(|| RosterError::UnknownPerson(format!("{person:?}")))
    }

    /// Both adults head the same family. An adult is married to itself.
    pub fn are_married(&self, adult1: AdultId, adult2: AdultId) -> bool {
        self.same_family(Person::Adult(adult1), Person::Adult(adult2))
    }

    pub fn is_parent_of(&self, adult: AdultId, child: ChildId) -> bool {
        self.same_family(Person::Adult(adult), Person::Child(child))
    }

    /// Godparents of a child; empty when none are declared.
    pub fn godparents_of(&self, child: ChildId) -> &BTreeSet<AdultId> {
        self.godparents.get(&child).unwrap_or(&NO_GODPARENTS)
    }

    pub fn is_godparent_of(&self, adult: AdultId, child: ChildId) -> bool {
        self.godparents_of(child).contains(&adult)
    }

    /// Children with at least one godparent, in declaration order.
    pub fn godparents(&self) -> impl Iterator<Item = (ChildId, &BTreeSet<AdultId>)> {
        self.godparents
            .iter()
            .filter(|(_, adults)| !adults.is_empty())
            .map(|(child, adults)| (*child, adults))
    }

    pub fn is_exempt_from_child_gifting(&self, adult: AdultId) -> bool {
        self.exempt.contains(&adult)
    }

    /// `"{father initials}&{mother initials}"`.
    pub fn family_label(&self, family: &Family) -> Result<String> {
        let father = self.adult(family.father)?;
        let mother = self.adult(family.mother)?;
        Ok(format!("{}&{}", father.initials(), mother.initials()))
    }

    fn family_id(&self, person: Person) -> Option<FamilyId> {
        match person {
            Person::Adult(id) => self.adult_family.get(id.0).copied(),
            Person::Child(id) => self.child_family.get(id.0).copied(),
        }
    }

    fn same_family(&self, left: Person, right: Person) -> bool {
        match (self.family_id(left), self.family_id(right)) {
            (Some(left), Some(right)) => left == right,
            _ => false,
        }
    }
}
