//! Generation resolution for raw records that omit an explicit generation.
//!
//! A person's generation is derived from the family unit that lists them as
//! a child: one more than the highest generation among that unit's parents.
//! A person with no parent unit is a root (generation 0). A spouse with no
//! ancestry of their own inherits the generation of a co-parent instead of
//! being recomputed independently. Results are memoized per resolution pass
//! and recursion carries a visited set: a node revisited mid-recursion
//! resolves to 0. That fallback keeps malformed cyclic input from hanging
//! the pipeline but can mask bad data, so it is logged.

use std::collections::{HashMap, HashSet};

use log::warn;

use crate::interchange::{RawFamily, RawPerson};

/// Generation assigned to a node revisited mid-recursion.
const CYCLE_FALLBACK: i32 = 0;

/// Resolve a generation for every person that participates in at least one
/// family unit. Persons with an explicit `generation` pass through
/// unchanged; isolated persons are absent from the result (the normalizer
/// applies its configured default to those).
pub fn resolve_generations(people: &[RawPerson], families: &[RawFamily]) -> HashMap<String, i32> {
    let mut resolver = Resolver::new(people, families);
    let mut resolved = HashMap::new();
    for person in people {
        if !resolver.participates(&person.id) {
            continue;
        }
        let mut visiting = HashSet::new();
        let generation = resolver.resolve(&person.id, &mut visiting);
        resolved.insert(person.id.clone(), generation);
    }
    resolved
}

struct Resolver<'a> {
    explicit: HashMap<&'a str, i32>,
    /// First family unit listing the person as a child.
    parent_unit: HashMap<&'a str, &'a RawFamily>,
    /// Co-parents across all units the person parents in, in unit order.
    partners: HashMap<&'a str, Vec<&'a str>>,
    memo: HashMap<String, i32>,
}

impl<'a> Resolver<'a> {
    fn new(people: &'a [RawPerson], families: &'a [RawFamily]) -> Self {
        let mut explicit = HashMap::new();
        for person in people {
            if let Some(generation) = person.generation {
                explicit.insert(person.id.as_str(), generation);
            }
        }

        let mut parent_unit: HashMap<&str, &RawFamily> = HashMap::new();
        let mut partners: HashMap<&str, Vec<&str>> = HashMap::new();
        for family in families {
            for child in &family.children {
                parent_unit.entry(child.as_str()).or_insert(family);
            }
            for parent in &family.parents {
                let entry = partners.entry(parent.as_str()).or_default();
                for other in &family.parents {
                    if other != parent && !entry.contains(&other.as_str()) {
                        entry.push(other.as_str());
                    }
                }
            }
        }

        Self {
            explicit,
            parent_unit,
            partners,
            memo: HashMap::new(),
        }
    }

    fn participates(&self, id: &str) -> bool {
        self.parent_unit.contains_key(id) || self.partners.contains_key(id)
    }

    fn resolve(&mut self, id: &str, visiting: &mut HashSet<String>) -> i32 {
        if let Some(generation) = self.memo.get(id) {
            return *generation;
        }
        if visiting.contains(id) {
            warn!("ancestor cycle at person {id}; falling back to generation {CYCLE_FALLBACK}");
            return CYCLE_FALLBACK;
        }
        if let Some(generation) = self.explicit.get(id) {
            let generation = *generation;
            self.memo.insert(id.to_string(), generation);
            return generation;
        }

        visiting.insert(id.to_string());
        let generation = if let Some(unit) = self.parent_unit.get(id).copied() {
            let parent_max = unit
                .parents
                .iter()
                .map(|parent| self.resolve(parent, visiting))
                .max();
            match parent_max {
                Some(max) => max + 1,
                None => 0,
            }
        } else if let Some(partner) = self.inheritable_partner(id) {
            self.resolve(&partner, visiting)
        } else {
            // Root: no parent unit, no explicit generation.
            0
        };
        visiting.remove(id);

        self.memo.insert(id.to_string(), generation);
        generation
    }

    /// A co-parent whose generation has an independent source (explicit
    /// value or own ancestry). Inheriting from a partner that would in turn
    /// only inherit back would just trip the cycle guard.
    fn inheritable_partner(&self, id: &str) -> Option<String> {
        let partners = self.partners.get(id)?;
        partners
            .iter()
            .find(|partner| {
                self.explicit.contains_key(**partner) || self.parent_unit.contains_key(**partner)
            })
            .map(|partner| (*partner).to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn person(id: &str, generation: Option<i32>) -> RawPerson {
        RawPerson {
            id: id.to_string(),
            generation,
            sex: None,
            name: Default::default(),
            birth: Default::default(),
            death: Default::default(),
            is_uncertain: false,
        }
    }

    fn family(id: &str, parents: &[&str], children: &[&str]) -> RawFamily {
        RawFamily {
            id: id.to_string(),
            parents: parents.iter().map(|p| p.to_string()).collect(),
            children: children.iter().map(|c| c.to_string()).collect(),
            marriage_date: Default::default(),
            divorce_date: Default::default(),
            relation_type: None,
        }
    }

    #[test]
    fn child_is_one_past_highest_parent() {
        let people = vec![
            person("father", Some(2)),
            person("mother", Some(3)),
            person("child", None),
        ];
        let families = vec![family("f1", &["father", "mother"], &["child"])];
        let resolved = resolve_generations(&people, &families);
        assert_eq!(resolved["child"], 4);
    }

    #[test]
    fn rootless_parent_chain_counts_from_zero() {
        let people = vec![
            person("a", None),
            person("b", None),
            person("c", None),
        ];
        let families = vec![
            family("f1", &["a"], &["b"]),
            family("f2", &["b"], &["c"]),
        ];
        let resolved = resolve_generations(&people, &families);
        assert_eq!(resolved["a"], 0);
        assert_eq!(resolved["b"], 1);
        assert_eq!(resolved["c"], 2);
    }

    #[test]
    fn spouse_inherits_partner_generation() {
        let people = vec![person("husband", Some(2)), person("wife", None)];
        let families = vec![family("f1", &["husband", "wife"], &[])];
        let resolved = resolve_generations(&people, &families);
        assert_eq!(resolved["wife"], 2);
    }

    #[test]
    fn isolated_person_is_left_to_the_default() {
        let people = vec![person("loner", None)];
        let resolved = resolve_generations(&people, &[]);
        assert!(!resolved.contains_key("loner"));
    }

    #[test]
    fn ancestor_cycle_falls_back_to_zero() {
        // a is b's parent and b is a's parent: malformed, but must not hang.
        let people = vec![person("a", None), person("b", None)];
        let families = vec![
            family("f1", &["a"], &["b"]),
            family("f2", &["b"], &["a"]),
        ];
        let resolved = resolve_generations(&people, &families);
        // Whichever side is entered first bottoms out at the fallback.
        assert_eq!(*resolved.values().min().unwrap(), CYCLE_FALLBACK + 1);
    }

    #[test]
    fn resolution_is_memoized_and_deterministic() {
        let people = vec![
            person("root", Some(1)),
            person("x", None),
            person("y", None),
            person("shared_child", None),
        ];
        let families = vec![
            family("f1", &["root"], &["x", "y"]),
            family("f2", &["x", "y"], &["shared_child"]),
        ];
        let first = resolve_generations(&people, &families);
        let second = resolve_generations(&people, &families);
        assert_eq!(first, second);
        assert_eq!(first["shared_child"], 3);
    }
}
