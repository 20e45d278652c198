//! Graph normalization: raw interchange records to the canonical model.
//!
//! Malformed input is a data-quality issue, not a pipeline failure: dangling
//! references are dropped from the unit that holds them, units left with no
//! parent are dropped entirely, and both are logged rather than raised.

use std::collections::HashSet;

use log::warn;

use crate::config::DataConfig;
use crate::dates;
use crate::generation::resolve_generations;
use crate::interchange::{FamilyTreeData, RawEvent};
use crate::ir::{EventDate, FamilyUnit, Person, PersonName, RelationType, Sex, Snapshot};

/// Convert a raw payload into a canonical snapshot: cross-references
/// resolved, missing generations derived (or defaulted for persons in no
/// family unit), display names computed, date fields validated.
pub fn normalize(data: &FamilyTreeData, config: &DataConfig) -> Snapshot {
    let resolved = resolve_generations(&data.people, &data.families);

    let persons: Vec<Person> = data
        .people
        .iter()
        .map(|raw| {
            let generation = raw
                .generation
                .or_else(|| resolved.get(&raw.id).copied())
                .unwrap_or(config.default_generation);
            let name = PersonName {
                surname: raw.name.surname.clone(),
                given_name: raw.name.given_name.clone(),
            };
            let mut person = Person::new(
                raw.id.clone(),
                generation,
                raw.sex.as_deref().map(Sex::from_token).unwrap_or(Sex::Unknown),
                name,
            );
            person.birth = normalize_event(&raw.birth);
            person.death = normalize_event(&raw.death);
            person.is_uncertain = raw.is_uncertain;
            person
        })
        .collect();

    let known_ids: HashSet<&str> = persons.iter().map(|p| p.id.as_str()).collect();

    let mut families = Vec::new();
    for raw in &data.families {
        let parents = retain_known(&raw.parents, &known_ids, &raw.id, "parent");
        let children = retain_known(&raw.children, &known_ids, &raw.id, "child");
        if parents.is_empty() {
            warn!("dropping family unit {} with no resolvable parents", raw.id);
            continue;
        }
        families.push(FamilyUnit {
            id: raw.id.clone(),
            parents,
            children,
            marriage_date: dates::validate(raw.marriage_date.date.clone()),
            divorce_date: dates::validate(raw.divorce_date.date.clone()),
            relation_type: raw
                .relation_type
                .as_deref()
                .map(RelationType::from_token)
                .unwrap_or_default(),
        });
    }

    Snapshot { persons, families }
}

fn normalize_event(raw: &RawEvent) -> EventDate {
    EventDate {
        original_date: raw.original_date.clone(),
        date: dates::validate(raw.date.clone()),
        place: raw.place.clone(),
    }
}

fn retain_known(ids: &[String], known: &HashSet<&str>, family_id: &str, role: &str) -> Vec<String> {
    let mut kept = Vec::with_capacity(ids.len());
    for id in ids {
        if known.contains(id.as_str()) {
            kept.push(id.clone());
        } else {
            warn!("family unit {family_id}: dropping dangling {role} reference {id}");
        }
    }
    kept
}
