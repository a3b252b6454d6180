//! Participant and group builders.

use secret_santa_config::GroupsConfig;
use secret_santa_core::Participant;

/// A participant with an `@example.com` address.
pub fn participant(name: &str) -> Participant {
    Participant::new(name, format!("{name}@example.com"))
}

/// One group per slice, named `g0`, `g1`, ...
pub fn groups_of(groups: &[&[&str]]) -> GroupsConfig {
    groups
        .iter()
        .enumerate()
        .fold(GroupsConfig::new(), |config, (i, members)| {
            config.with_group(format!("g{i}"), members.iter().map(|name| participant(name)))
        })
}

/// Every participant in a group of their own, so nobody is excluded.
pub fn singletons(names: &[&str]) -> GroupsConfig {
    names.iter().fold(GroupsConfig::new(), |config, name| {
        config.with_group(*name, [participant(name)])
    })
}
