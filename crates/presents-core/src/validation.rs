use std::collections::{BTreeMap, BTreeSet};

use crate::config::RosterConfig;
use crate::error::{Result, RosterError};
use crate::roster::{Adult, AdultId, Child, ChildId, Family, FamilyId, Roster};

/// Validate a raw roster and build its lookup tables.
///
/// This checks:
/// - duplicate adult/child/family ids and empty names
/// - family, godparent and exemption references exist
/// - every adult heads exactly one family, every child belongs to exactly one
pub(crate) fn build_roster(config: &RosterConfig) -> Result<Roster> {
    let mut adult_index: BTreeMap<&str, AdultId> = BTreeMap::new();
    let mut adults = Vec::with_capacity(config.adults.len());
    for entry in &config.adults {
        require_name("adult", &entry.id, &entry.first_name)?;
        let id = AdultId(adults.len());
        if adult_index.insert(entry.id.as_str(), id).is_some() {
            return Err(invalid(format!("duplicate adult id: {}", entry.id)));
        }
        adults.push(Adult {
            key: entry.id.clone(),
            first_name: entry.first_name.clone(),
            nickname: entry.nickname.clone().filter(|nickname| !nickname.is_empty()),
        });
    }

    let mut child_index: BTreeMap<&str, ChildId> = BTreeMap::new();
    let mut children = Vec::with_capacity(config.children.len());
    for entry in &config.children {
        require_name("child", &entry.id, &entry.first_name)?;
        let id = ChildId(children.len());
        if child_index.insert(entry.id.as_str(), id).is_some() {
            return Err(invalid(format!("duplicate child id: {}", entry.id)));
        }
        children.push(Child {
            key: entry.id.clone(),
            first_name: entry.first_name.clone(),
        });
    }

    let lookup_adult = |key: &str, context: &str| -> Result<AdultId> {
        adult_index
            .get(key)
            .copied()
            .ok_or_else(|| invalid(format!("{context} references unknown adult: {key}")))
    };
    let lookup_child = |key: &str, context: &str| -> Result<ChildId> {
        child_index
            .get(key)
            .copied()
            .ok_or_else(|| invalid(format!("{context} references unknown child: {key}")))
    };

    let mut family_keys = BTreeSet::new();
    let mut families = Vec::with_capacity(config.families.len());
    let mut adult_family: Vec<Option<FamilyId>> = vec![None; adults.len()];
    let mut child_family: Vec<Option<FamilyId>> = vec![None; children.len()];

    for entry in &config.families {
        if !family_keys.insert(entry.id.as_str()) {
            return Err(invalid(format!("duplicate family id: {}", entry.id)));
        }
        let id = FamilyId(families.len());
        let context = format!("family {}", entry.id);

        let father = lookup_adult(&entry.father, &context)?;
        let mother = lookup_adult(&entry.mother, &context)?;
        if father == mother {
            return Err(invalid(format!(
                "family {} has the same adult as father and mother: {}",
                entry.id, entry.father
            )));
        }

        for (adult, key) in [(father, &entry.father), (mother, &entry.mother)] {
            if adult_family[adult.0].replace(id).is_some() {
                return Err(invalid(format!(
                    "adult belongs to more than one family: {key}"
                )));
            }
        }

        let mut members = Vec::with_capacity(entry.children.len());
        for key in &entry.children {
            let child = lookup_child(key, &context)?;
            if child_family[child.0].replace(id).is_some() {
                return Err(invalid(format!(
                    "child belongs to more than one family: {key}"
                )));
            }
            members.push(child);
        }

        families.push(Family {
            id,
            key: entry.id.clone(),
            father,
            mother,
            children: members,
        });
    }

    let adult_family = adult_family
        .into_iter()
        .zip(&adults)
        .map(|(family, adult)| {
            family.ok_or_else(|| invalid(format!("adult has no family: {}", adult.key)))
        })
        .collect::<Result<Vec<_>>>()?;
    let child_family = child_family
        .into_iter()
        .zip(&children)
        .map(|(family, child)| {
            family.ok_or_else(|| invalid(format!("child has no family: {}", child.key)))
        })
        .collect::<Result<Vec<_>>>()?;

    let mut godparents: BTreeMap<ChildId, BTreeSet<AdultId>> = BTreeMap::new();
    for entry in &config.godparents {
        let child = lookup_child(&entry.child, "godparents")?;
        let context = format!("godparents of {}", entry.child);
        let links = godparents.entry(child).or_default();
        for key in &entry.adults {
            links.insert(lookup_adult(key, &context)?);
        }
    }

    let exempt = config
        .exempt_from_children_gifts
        .iter()
        .map(|key| lookup_adult(key, "exempt_from_children_gifts"))
        .collect::<Result<BTreeSet<_>>>()?;

    Ok(Roster {
        adults,
        children,
        families,
        adult_family,
        child_family,
        godparents,
        exempt,
    })
}

fn require_name(kind: &str, key: &str, first_name: &str) -> Result<()> {
    if key.trim().is_empty() {
        return Err(invalid(format!("{kind} with empty id")));
    }
    if first_name.trim().is_empty() {
        return Err(invalid(format!("{kind} has an empty first name: {key}")));
    }
    Ok(())
}

fn invalid(message: String) -> RosterError {
    RosterError::InvalidRoster(message)
}
