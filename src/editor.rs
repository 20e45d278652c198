//! Snapshot-based editing with undo/redo.
//!
//! Every successful mutation clones the current snapshot, applies the change
//! and pushes the result onto the history, so undo and redo are plain
//! snapshot swaps. Manual position overrides live next to the history, not
//! inside it: undoing an edit never moves a card the user dragged.

use log::warn;

use crate::config::HistoryConfig;
use crate::history::History;
use crate::ir::{EventDate, FamilyUnit, Person, PersonName, RelationType, Sex, Snapshot};
use crate::layout::OverrideMap;

/// Partial update to a person. `None` fields are left unchanged.
#[derive(Debug, Clone, Default)]
pub struct PersonPatch {
    pub generation: Option<i32>,
    pub sex: Option<Sex>,
    pub name: Option<PersonName>,
    pub birth: Option<EventDate>,
    pub death: Option<EventDate>,
    pub is_uncertain: Option<bool>,
}

/// Partial update to a family unit. For the date fields the outer `None`
/// leaves the value unchanged and the inner `None` clears it.
#[derive(Debug, Clone, Default)]
pub struct FamilyPatch {
    pub parents: Option<Vec<String>>,
    pub children: Option<Vec<String>>,
    pub marriage_date: Option<Option<String>>,
    pub divorce_date: Option<Option<String>>,
    pub relation_type: Option<RelationType>,
}

pub struct FamilyTreeEditor {
    history: History<Snapshot>,
    overrides: OverrideMap,
}

impl FamilyTreeEditor {
    pub fn new(initial: Snapshot, config: &HistoryConfig) -> Self {
        Self {
            history: History::new(initial, config.max_entries),
            overrides: OverrideMap::new(),
        }
    }

    pub fn snapshot(&self) -> &Snapshot {
        self.history.current()
    }

    pub fn overrides(&self) -> &OverrideMap {
        &self.overrides
    }

    fn commit(&mut self, snapshot: Snapshot, label: &str) {
        self.history.push_state(snapshot, label);
    }

    /// Add a person. A duplicate id is rejected without touching history.
    pub fn add_person(&mut self, person: Person) -> bool {
        if self.snapshot().person(&person.id).is_some() {
            warn!("edit: person id '{}' already exists, ignoring add", person.id);
            return false;
        }
        let mut next = self.snapshot().clone();
        let label = format!("add person {}", person.id);
        next.persons.push(person);
        self.commit(next, &label);
        true
    }

    /// Apply a partial update. Unknown ids are ignored.
    pub fn update_person(&mut self, id: &str, patch: PersonPatch) -> bool {
        let mut next = self.snapshot().clone();
        let Some(person) = next.persons.iter_mut().find(|p| p.id == id) else {
            warn!("edit: update for unknown person '{id}' ignored");
            return false;
        };
        if let Some(generation) = patch.generation {
            person.generation = generation;
        }
        if let Some(sex) = patch.sex {
            person.sex = sex;
        }
        if let Some(name) = patch.name {
            person.rename(name);
        }
        if let Some(birth) = patch.birth {
            person.birth = birth;
        }
        if let Some(death) = patch.death {
            person.death = death;
        }
        if let Some(is_uncertain) = patch.is_uncertain {
            person.is_uncertain = is_uncertain;
        }
        self.commit(next, &format!("update person {id}"));
        true
    }

    /// Remove a person and every reference to them. Family units left with no
    /// parents are dropped entirely.
    pub fn delete_person(&mut self, id: &str) -> bool {
        if self.snapshot().person(id).is_none() {
            warn!("edit: delete of unknown person '{id}' ignored");
            return false;
        }
        let mut next = self.snapshot().clone();
        next.persons.retain(|p| p.id != id);
        for family in &mut next.families {
            family.parents.retain(|p| p != id);
            family.children.retain(|c| c != id);
        }
        next.families.retain(|f| {
            if f.parents.is_empty() {
                warn!("edit: family '{}' lost its last parent, dropping", f.id);
                false
            } else {
                true
            }
        });
        self.overrides.remove(id);
        self.commit(next, &format!("delete person {id}"));
        true
    }

    /// Add a family unit. Units with no parents or a duplicate id are
    /// rejected.
    pub fn add_family(&mut self, family: FamilyUnit) -> bool {
        if family.parents.is_empty() {
            warn!("edit: family '{}' has no parents, ignoring add", family.id);
            return false;
        }
        if self.snapshot().family(&family.id).is_some() {
            warn!("edit: family id '{}' already exists, ignoring add", family.id);
            return false;
        }
        let mut next = self.snapshot().clone();
        let label = format!("add family {}", family.id);
        next.families.push(family);
        self.commit(next, &label);
        true
    }

    pub fn update_family(&mut self, id: &str, patch: FamilyPatch) -> bool {
        if matches!(&patch.parents, Some(parents) if parents.is_empty()) {
            warn!("edit: update would leave family '{id}' with no parents, ignored");
            return false;
        }
        let mut next = self.snapshot().clone();
        let Some(family) = next.families.iter_mut().find(|f| f.id == id) else {
            warn!("edit: update for unknown family '{id}' ignored");
            return false;
        };
        if let Some(parents) = patch.parents {
            family.parents = parents;
        }
        if let Some(children) = patch.children {
            family.children = children;
        }
        if let Some(marriage_date) = patch.marriage_date {
            family.marriage_date = marriage_date;
        }
        if let Some(divorce_date) = patch.divorce_date {
            family.divorce_date = divorce_date;
        }
        if let Some(relation_type) = patch.relation_type {
            family.relation_type = relation_type;
        }
        self.commit(next, &format!("update family {id}"));
        true
    }

    /// Remove a family unit. The persons it referenced are kept.
    pub fn delete_family(&mut self, id: &str) -> bool {
        if self.snapshot().family(id).is_none() {
            warn!("edit: delete of unknown family '{id}' ignored");
            return false;
        }
        let mut next = self.snapshot().clone();
        next.families.retain(|f| f.id != id);
        self.commit(next, &format!("delete family {id}"));
        true
    }

    /// Pin a person to a manual position. Not a history entry.
    pub fn set_position(&mut self, id: &str, x: f32, y: f32) {
        self.overrides.insert(id.to_string(), (x, y));
    }

    /// Release a manual position so the next layout pass places the person.
    pub fn clear_position(&mut self, id: &str) {
        self.overrides.remove(id);
    }

    /// Release every manual position.
    pub fn reset_layout(&mut self) {
        self.overrides.clear();
    }

    pub fn undo(&mut self) -> bool {
        self.history.undo().is_some()
    }

    pub fn redo(&mut self) -> bool {
        self.history.redo().is_some()
    }

    pub fn can_undo(&self) -> bool {
        self.history.can_undo()
    }

    pub fn can_redo(&self) -> bool {
        self.history.can_redo()
    }

    pub fn history_len(&self) -> usize {
        self.history.len()
    }

    pub fn last_action(&self) -> &str {
        self.history.current_label()
    }
}

/// Case-insensitive substring search over display name, name parts and id.
pub fn search_persons<'a>(snapshot: &'a Snapshot, query: &str) -> Vec<&'a Person> {
    let needle = query.to_lowercase();
    if needle.is_empty() {
        return Vec::new();
    }
    snapshot
        .persons
        .iter()
        .filter(|p| {
            p.display_name.to_lowercase().contains(&needle)
                || p.name.surname.to_lowercase().contains(&needle)
                || p.name.given_name.to_lowercase().contains(&needle)
                || p.id.to_lowercase().contains(&needle)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn named(id: &str, surname: &str, given: &str) -> Person {
        Person::new(
            id,
            1,
            Sex::Unknown,
            PersonName {
                surname: surname.to_string(),
                given_name: given.to_string(),
            },
        )
    }

    fn family(id: &str, parents: &[&str], children: &[&str]) -> FamilyUnit {
        FamilyUnit {
            id: id.to_string(),
            parents: parents.iter().map(|p| p.to_string()).collect(),
            children: children.iter().map(|c| c.to_string()).collect(),
            marriage_date: None,
            divorce_date: None,
            relation_type: RelationType::Blood,
        }
    }

    fn editor() -> FamilyTreeEditor {
        FamilyTreeEditor::new(Snapshot::default(), &HistoryConfig::default())
    }

    #[test]
    fn delete_person_cascades_through_family_units() {
        let mut editor = editor();
        editor.add_person(named("a", "Sato", "Taro"));
        editor.add_person(named("b", "Sato", "Hanako"));
        editor.add_person(named("c", "Sato", "Jiro"));
        editor.add_family(family("f1", &["a", "b"], &["c"]));
        editor.add_family(family("f2", &["a"], &[]));

        assert!(editor.delete_person("a"));
        let snapshot = editor.snapshot();
        assert!(snapshot.person("a").is_none());
        // f1 survives with the remaining parent, f2 lost its only parent.
        let f1 = snapshot.family("f1").unwrap();
        assert_eq!(f1.parents, vec!["b".to_string()]);
        assert_eq!(f1.children, vec!["c".to_string()]);
        assert!(snapshot.family("f2").is_none());
    }

    #[test]
    fn zero_parent_family_is_rejected() {
        let mut editor = editor();
        let before = editor.history_len();
        assert!(!editor.add_family(family("f1", &[], &["c"])));
        assert_eq!(editor.history_len(), before);
        assert!(editor.snapshot().families.is_empty());
    }

    #[test]
    fn undo_redo_round_trips_an_edit() {
        let mut editor = editor();
        editor.add_person(named("a", "Sato", "Taro"));
        let after_add = editor.snapshot().clone();
        editor.update_person(
            "a",
            PersonPatch {
                name: Some(PersonName {
                    surname: "Suzuki".to_string(),
                    given_name: "Taro".to_string(),
                }),
                ..Default::default()
            },
        );
        assert_eq!(editor.snapshot().person("a").unwrap().display_name, "Suzuki Taro");

        assert!(editor.undo());
        assert_eq!(editor.snapshot(), &after_add);
        assert!(editor.redo());
        assert_eq!(editor.snapshot().person("a").unwrap().display_name, "Suzuki Taro");
    }

    #[test]
    fn rename_through_patch_rederives_display_name() {
        let mut editor = editor();
        editor.add_person(named("a", "Sato", "Taro"));
        editor.update_person(
            "a",
            PersonPatch {
                name: Some(PersonName {
                    surname: "Yamada".to_string(),
                    given_name: String::new(),
                }),
                ..Default::default()
            },
        );
        assert_eq!(editor.snapshot().person("a").unwrap().display_name, "Yamada");
    }

    #[test]
    fn unknown_ids_are_ignored_without_history_entries() {
        let mut editor = editor();
        let before = editor.history_len();
        assert!(!editor.update_person("ghost", PersonPatch::default()));
        assert!(!editor.delete_person("ghost"));
        assert!(!editor.delete_family("ghost"));
        assert_eq!(editor.history_len(), before);
    }

    #[test]
    fn overrides_survive_undo() {
        let mut editor = editor();
        editor.add_person(named("a", "Sato", "Taro"));
        editor.set_position("a", 640.0, 320.0);
        editor.undo();
        assert_eq!(editor.overrides().get("a"), Some(&(640.0, 320.0)));
        editor.clear_position("a");
        assert!(editor.overrides().is_empty());
    }

    #[test]
    fn search_is_case_insensitive_over_names_and_ids() {
        let mut editor = editor();
        editor.add_person(named("p-001", "Sato", "Taro"));
        editor.add_person(named("p-002", "Suzuki", "Hanako"));
        let snapshot = editor.snapshot();

        let hits = search_persons(snapshot, "sato");
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].id, "p-001");

        assert_eq!(search_persons(snapshot, "P-00").len(), 2);
        assert!(search_persons(snapshot, "").is_empty());
    }
}
