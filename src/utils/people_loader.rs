// src/utils/people_loader.rs
// Reads the member directory export used by the batch tools.

use anyhow::{anyhow, Context, Result};
use log::{debug, warn};
use serde::Deserialize;
use std::collections::HashSet;
use std::fs;
use std::path::Path;

use crate::models::core::{Person, PersonId};

/// Accepts a bare array or an object wrapping it under `people` or `users`.
#[derive(Deserialize)]
#[serde(untagged)]
enum PeopleDocument {
    List(Vec<Person>),
    People { people: Vec<Person> },
    Users { users: Vec<Person> },
}

pub fn load_people(path: &Path) -> Result<Vec<Person>> {
    let raw = fs::read_to_string(path)
        .with_context(|| format!("Failed to read people file {}", path.display()))?;
    parse_people(&raw).with_context(|| format!("Failed to parse people file {}", path.display()))
}

pub fn parse_people(raw: &str) -> Result<Vec<Person>> {
    let document: PeopleDocument =
        serde_json::from_str(raw).context("Expected a list of people or {\"people\": [...]}")?;
    let people = match document {
        PeopleDocument::List(people)
        | PeopleDocument::People { people }
        | PeopleDocument::Users { users: people } => people,
    };

    let mut seen = HashSet::new();
    for person in &people {
        if !seen.insert(person.id) {
            warn!("Duplicate person id {} in directory export", person.id);
        }
        if person.age < 18 {
            warn!("Person {} is listed with age {} (< 18)", person.id, person.age);
        }
    }
    debug!("Parsed {} people", people.len());
    Ok(people)
}

pub fn find_person(people: &[Person], id: PersonId) -> Result<&Person> {
    people
        .iter()
        .find(|p| p.id == id)
        .ok_or_else(|| anyhow!("No person with id {} in the directory", id))
}
