//! Participant registry.
//!
//! Flattens the configured groups into a deduplicated list of participants
//! with dense identifiers, remembering which identifiers share a group.

use std::collections::HashMap;

use secret_santa_config::GroupsConfig;
use secret_santa_core::{Participant, ParticipantId};

/// A configured group, resolved to participant identifiers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Group {
    pub name: String,
    /// Distinct members in first-appearance order.
    pub members: Vec<ParticipantId>,
}

/// Deduplicated participants of one invocation.
///
/// Identifiers are assigned in first-appearance order while walking groups in
/// declaration order. A name listed in several groups is one participant and
/// keeps the email of its first listing.
///
/// # Example
///
/// ```
/// use secret_santa_config::GroupsConfig;
/// use secret_santa_core::Participant;
/// use secret_santa_solver::ParticipantRegistry;
///
/// let config = GroupsConfig::new()
///     .with_group("smiths", [
///         Participant::new("alice", "alice@example.com"),
///         Participant::new("bob", "bob@example.com"),
///     ])
///     .with_group("book club", [
///         Participant::new("bob", "bob@work.example.com"),
///         Participant::new("carol", "carol@example.com"),
///     ]);
///
/// let registry = ParticipantRegistry::from_config(&config);
/// assert_eq!(registry.len(), 3);
/// assert_eq!(registry.id("carol"), Some(2));
/// assert_eq!(registry.email("bob"), Some("bob@example.com"));
/// ```
#[derive(Debug, Clone, Default)]
pub struct ParticipantRegistry {
    names: Vec<String>,
    ids: HashMap<String, ParticipantId>,
    emails: HashMap<String, String>,
    groups: Vec<Group>,
}

impl ParticipantRegistry {
    pub fn from_config(config: &GroupsConfig) -> Self {
        Self::from_groups(config.iter())
    }

    pub fn from_groups<'a, I>(groups: I) -> Self
    where
        I: IntoIterator<Item = (&'a str, &'a [Participant])>,
    {
        let mut registry = Self::default();
        for (group_name, people) in groups {
            let mut members = Vec::with_capacity(people.len());
            for person in people {
                let id = registry.intern(person);
                if !members.contains(&id) {
                    members.push(id);
                }
            }
            registry.groups.push(Group {
                name: group_name.to_string(),
                members,
            });
        }
        registry
    }

    fn intern(&mut self, person: &Participant) -> ParticipantId {
        if let Some(&id) = self.ids.get(&person.name) {
            return id;
        }
        let id = self.names.len();
        self.names.push(person.name.clone());
        self.ids.insert(person.name.clone(), id);
        self.emails.insert(person.name.clone(), person.email.clone());
        id
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    pub fn id(&self, name: &str) -> Option<ParticipantId> {
        self.ids.get(name).copied()
    }

    /// Returns the name of `id`.
    ///
    /// # Panics
    ///
    /// Panics if `id` was not issued by this registry.
    pub fn name(&self, id: ParticipantId) -> &str {
        &self.names[id]
    }

    /// Names in identifier order.
    pub fn names(&self) -> &[String] {
        &self.names
    }

    pub fn email(&self, name: &str) -> Option<&str> {
        self.emails.get(name).map(String::as_str)
    }

    /// Name to email mapping, first listing wins.
    pub fn emails(&self) -> &HashMap<String, String> {
        &self.emails
    }

    pub fn groups(&self) -> &[Group] {
        &self.groups
    }
}
