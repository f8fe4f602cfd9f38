//! Iterator: walk a collection without exposing how it is stored. Covers a
//! bidirectional word iterator and lazily-fetched social network contacts.

use crate::domain::model::{DemoInfo, PatternCategory};
use crate::domain::ports::{Console, Demo};
use crate::utils::error::Result;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

#[derive(Debug, Clone, Default)]
pub struct WordsCollection {
    items: Vec<String>,
}

impl WordsCollection {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn items(&self) -> &[String] {
        &self.items
    }

    pub fn count(&self) -> usize {
        self.items.len()
    }

    pub fn add_item(&mut self, item: impl Into<String>) {
        self.items.push(item.into());
    }

    pub fn iter(&self) -> AlphabeticalOrderIterator<'_> {
        AlphabeticalOrderIterator::new(self, false)
    }

    pub fn reverse_iter(&self) -> AlphabeticalOrderIterator<'_> {
        AlphabeticalOrderIterator::new(self, true)
    }
}

/// Keeps its own position, so several traversals can run over one collection.
#[derive(Debug, Clone)]
pub struct AlphabeticalOrderIterator<'a> {
    collection: &'a WordsCollection,
    position: isize,
    reverse: bool,
}

impl<'a> AlphabeticalOrderIterator<'a> {
    pub fn new(collection: &'a WordsCollection, reverse: bool) -> Self {
        let mut iterator = Self {
            collection,
            position: 0,
            reverse,
        };
        iterator.rewind();
        iterator
    }

    pub fn rewind(&mut self) {
        self.position = if self.reverse {
            self.collection.count() as isize - 1
        } else {
            0
        };
    }

    pub fn key(&self) -> isize {
        self.position
    }

    pub fn valid(&self) -> bool {
        self.position >= 0 && (self.position as usize) < self.collection.count()
    }

    pub fn current(&self) -> Option<&'a str> {
        if !self.valid() {
            return None;
        }
        self.collection
            .items()
            .get(self.position as usize)
            .map(String::as_str)
    }
}

impl<'a> Iterator for AlphabeticalOrderIterator<'a> {
    type Item = &'a str;

    fn next(&mut self) -> Option<Self::Item> {
        let item = self.current()?;
        self.position += if self.reverse { -1 } else { 1 };
        Some(item)
    }
}

pub fn words_client_code(console: &dyn Console) {
    let mut collection = WordsCollection::new();
    collection.add_item("First");
    collection.add_item("Second");
    collection.add_item("Third");

    console.write_line("Straight traversal:");
    for word in collection.iter() {
        console.write_line(word);
    }
    console.blank_line();

    console.write_line("Reverse traversal:");
    for word in collection.reverse_iter() {
        console.write_line(word);
    }
}

// Social networks

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Profile {
    pub id: String,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
}

impl Profile {
    pub fn new(id: &str, first_name: &str, last_name: &str, email: &str) -> Self {
        Self {
            id: id.to_string(),
            first_name: first_name.to_string(),
            last_name: last_name.to_string(),
            email: email.to_string(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Relation {
    Friends,
    Coworkers,
}

impl Relation {
    pub fn as_str(&self) -> &'static str {
        match self {
            Relation::Friends => "friends",
            Relation::Coworkers => "coworkers",
        }
    }
}

/// In-memory stand-in for a remote social graph.
#[derive(Debug, Clone, Default)]
pub struct SocialGraph {
    profiles: HashMap<String, Profile>,
    relations: HashMap<(String, Relation), Vec<String>>,
}

impl SocialGraph {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_profile(&mut self, profile: Profile) {
        self.profiles.insert(profile.id.clone(), profile);
    }

    pub fn connect(&mut self, from: &str, relation: Relation, to: &str) {
        self.relations
            .entry((from.to_string(), relation))
            .or_default()
            .push(to.to_string());
    }

    /// Related profiles in insertion order; unknown ids are skipped.
    pub fn related(&self, profile_id: &str, relation: Relation) -> Vec<Profile> {
        self.relations
            .get(&(profile_id.to_string(), relation))
            .map(|ids| {
                ids.iter()
                    .filter_map(|id| self.profiles.get(id).cloned())
                    .collect()
            })
            .unwrap_or_default()
    }

    pub fn sample() -> Self {
        let mut graph = Self::new();
        graph.add_profile(Profile::new("1", "Elie", "Bismuth", "elie@gmail.com"));
        graph.add_profile(Profile::new("2", "Ada", "Lovelace", "ada@example.com"));
        graph.add_profile(Profile::new("3", "Alan", "Turing", "alan@example.com"));
        graph.add_profile(Profile::new("4", "Grace", "Hopper", "grace@example.com"));
        graph
    }
}

pub trait ProfileIterator {
    fn has_more(&mut self) -> bool;
    fn next_profile(&mut self) -> Option<Profile>;
}

pub trait SocialNetwork: Send + Sync {
    fn name(&self) -> &'static str;
    fn social_graph_request(&self, profile_id: &str, relation: Relation) -> Vec<Profile>;
    fn create_friends_iterator<'a>(&'a self, profile_id: &str) -> Box<dyn ProfileIterator + 'a>;
    fn create_coworkers_iterator<'a>(&'a self, profile_id: &str) -> Box<dyn ProfileIterator + 'a>;
}

/// Fetches the relation list on first use, then walks the cached copy.
pub struct SocialGraphIterator<'a> {
    network: &'a dyn SocialNetwork,
    profile_id: String,
    relation: Relation,
    position: usize,
    cache: Option<Vec<Profile>>,
}

impl<'a> SocialGraphIterator<'a> {
    pub fn new(network: &'a dyn SocialNetwork, profile_id: &str, relation: Relation) -> Self {
        Self {
            network,
            profile_id: profile_id.to_string(),
            relation,
            position: 0,
            cache: None,
        }
    }

    fn lazy_init(&mut self) -> &[Profile] {
        let network = self.network;
        let profile_id = &self.profile_id;
        let relation = self.relation;
        self.cache
            .get_or_insert_with(|| network.social_graph_request(profile_id, relation))
    }
}

impl ProfileIterator for SocialGraphIterator<'_> {
    fn has_more(&mut self) -> bool {
        let position = self.position;
        position < self.lazy_init().len()
    }

    fn next_profile(&mut self) -> Option<Profile> {
        if !self.has_more() {
            return None;
        }
        let position = self.position;
        let profile = self.lazy_init().get(position).cloned();
        self.position += 1;
        profile
    }
}

macro_rules! social_network {
    ($name:ident, $label:expr) => {
        pub struct $name {
            graph: SocialGraph,
            requests: AtomicUsize,
        }

        impl $name {
            pub fn new(graph: SocialGraph) -> Self {
                Self {
                    graph,
                    requests: AtomicUsize::new(0),
                }
            }

            pub fn requests(&self) -> usize {
                self.requests.load(Ordering::SeqCst)
            }
        }

        impl SocialNetwork for $name {
            fn name(&self) -> &'static str {
                $label
            }

            fn social_graph_request(&self, profile_id: &str, relation: Relation) -> Vec<Profile> {
                self.requests.fetch_add(1, Ordering::SeqCst);
                tracing::debug!("{} request {} {}", $label, profile_id, relation.as_str());
                self.graph.related(profile_id, relation)
            }

            fn create_friends_iterator<'a>(
                &'a self,
                profile_id: &str,
            ) -> Box<dyn ProfileIterator + 'a> {
                Box::new(SocialGraphIterator::new(self, profile_id, Relation::Friends))
            }

            fn create_coworkers_iterator<'a>(
                &'a self,
                profile_id: &str,
            ) -> Box<dyn ProfileIterator + 'a> {
                Box::new(SocialGraphIterator::new(self, profile_id, Relation::Coworkers))
            }
        }
    };
}

social_network!(Facebook, "facebook");
social_network!(LinkedIn, "linkedin");

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NetworkKind {
    #[default]
    Facebook,
    LinkedIn,
}

impl NetworkKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            NetworkKind::Facebook => "facebook",
            NetworkKind::LinkedIn => "linkedin",
        }
    }
}

/// Only sees an iterator, never the network behind it.
#[derive(Debug, Default)]
pub struct SocialSpammer;

impl SocialSpammer {
    pub fn send(&self, iterator: &mut dyn ProfileIterator, message: &str, console: &dyn Console) -> usize {
        let mut sent = 0;
        while let Some(profile) = iterator.next_profile() {
            console.write_line(&format!("Sending message to {}: {}", profile.email, message));
            sent += 1;
        }
        sent
    }
}

pub struct SocialApp {
    network: Box<dyn SocialNetwork>,
    spammer: SocialSpammer,
}

impl SocialApp {
    pub fn configure(kind: NetworkKind, graph: SocialGraph) -> Self {
        let network: Box<dyn SocialNetwork> = match kind {
            NetworkKind::Facebook => Box::new(Facebook::new(graph)),
            NetworkKind::LinkedIn => Box::new(LinkedIn::new(graph)),
        };
        Self {
            network,
            spammer: SocialSpammer,
        }
    }

    pub fn network_name(&self) -> &'static str {
        self.network.name()
    }

    pub fn send_spam_to_friends(&self, profile: &Profile, console: &dyn Console) -> usize {
        let mut iterator = self.network.create_friends_iterator(&profile.id);
        self.spammer
            .send(iterator.as_mut(), "Very important message", console)
    }

    pub fn send_spam_to_coworkers(&self, profile: &Profile, console: &dyn Console) -> usize {
        let mut iterator = self.network.create_coworkers_iterator(&profile.id);
        self.spammer
            .send(iterator.as_mut(), "Very important message", console)
    }
}

/// Sample graph where Elie's contacts differ per network.
pub fn sample_graph(kind: NetworkKind) -> SocialGraph {
    let mut graph = SocialGraph::sample();
    match kind {
        NetworkKind::Facebook => {
            graph.connect("1", Relation::Friends, "2");
            graph.connect("1", Relation::Friends, "3");
            graph.connect("1", Relation::Coworkers, "4");
        }
        NetworkKind::LinkedIn => {
            graph.connect("1", Relation::Coworkers, "3");
            graph.connect("1", Relation::Coworkers, "4");
        }
    }
    graph
}

pub fn social_client_code(kind: NetworkKind, console: &dyn Console) -> usize {
    let app = SocialApp::configure(kind, sample_graph(kind));
    let elie = Profile::new("1", "Elie", "Bismuth", "elie@gmail.com");

    console.write_line(&format!("Network: {}", app.network_name()));
    let friends = app.send_spam_to_friends(&elie, console);
    let coworkers = app.send_spam_to_coworkers(&elie, console);
    console.write_line(&format!(
        "Spammer: reached {} friends and {} coworkers.",
        friends, coworkers
    ));
    friends + coworkers
}

pub struct IteratorDemo {
    network: NetworkKind,
}

impl IteratorDemo {
    pub fn new(network: NetworkKind) -> Self {
        Self { network }
    }
}

#[async_trait]
impl Demo for IteratorDemo {
    fn info(&self) -> DemoInfo {
        DemoInfo {
            name: "iterator",
            title: "Iterator",
            category: PatternCategory::Behavioral,
            summary: "Traverses elements of a collection without exposing its representation",
            complexity: 2,
            popularity: 3,
        }
    }

    async fn run(&self, console: Arc<dyn Console>) -> Result<()> {
        words_client_code(console.as_ref());
        console.blank_line();
        social_client_code(self.network, console.as_ref());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::BufferConsole;

    fn words() -> WordsCollection {
        let mut collection = WordsCollection::new();
        for word in ["First", "Second", "Third"] {
            collection.add_item(word);
        }
        collection
    }

    #[test]
    fn test_straight_and_reverse_traversal() {
        let collection = words();
        assert_eq!(collection.iter().collect::<Vec<_>>(), vec!["First", "Second", "Third"]);
        assert_eq!(
            collection.reverse_iter().collect::<Vec<_>>(),
            vec!["Third", "Second", "First"]
        );
    }

    #[test]
    fn test_key_current_and_rewind() {
        let collection = words();
        let mut iterator = collection.reverse_iter();
        assert_eq!(iterator.key(), 2);
        assert_eq!(iterator.current(), Some("Third"));

        iterator.by_ref().for_each(drop);
        assert!(!iterator.valid());
        assert_eq!(iterator.current(), None);

        iterator.rewind();
        assert_eq!(iterator.next(), Some("Third"));
    }

    #[test]
    fn test_empty_collection_is_never_valid() {
        let collection = WordsCollection::new();
        assert!(!collection.iter().valid());
        assert!(!collection.reverse_iter().valid());
        assert_eq!(collection.reverse_iter().next(), None);
    }

    #[test]
    fn test_single_profile_is_yielded_once() {
        let mut graph = SocialGraph::sample();
        graph.connect("2", Relation::Friends, "1");
        let facebook = Facebook::new(graph);

        let mut iterator = facebook.create_friends_iterator("2");
        assert!(iterator.has_more());
        assert_eq!(iterator.next_profile().unwrap().email, "elie@gmail.com");
        assert!(!iterator.has_more());
        assert!(iterator.next_profile().is_none());
    }

    #[test]
    fn test_next_profile_walks_every_contact_in_order() {
        let facebook = Facebook::new(sample_graph(NetworkKind::Facebook));
        let mut iterator = facebook.create_friends_iterator("1");

        let mut ids = Vec::new();
        while let Some(profile) = iterator.next_profile() {
            ids.push(profile.id);
        }
        assert_eq!(ids, vec!["2", "3"]);
    }

    #[test]
    fn test_graph_is_requested_lazily_and_once() {
        let facebook = Facebook::new(sample_graph(NetworkKind::Facebook));
        let mut iterator = facebook.create_friends_iterator("1");
        assert_eq!(facebook.requests(), 0);

        while iterator.next_profile().is_some() {}
        assert_eq!(facebook.requests(), 1);
    }

    #[test]
    fn test_spammer_counts_messages() {
        let console = BufferConsole::new();
        let linkedin = LinkedIn::new(sample_graph(NetworkKind::LinkedIn));
        let mut iterator = linkedin.create_coworkers_iterator("1");

        let sent = SocialSpammer.send(iterator.as_mut(), "hi", &console);
        assert_eq!(sent, 2);
        assert_eq!(
            console.lines(),
            vec![
                "Sending message to alan@example.com: hi",
                "Sending message to grace@example.com: hi",
            ]
        );
    }

    #[test]
    fn test_social_client_code_per_network() {
        let console = BufferConsole::new();
        assert_eq!(social_client_code(NetworkKind::Facebook, &console), 3);
        assert!(console.contains("reached 2 friends and 1 coworkers"));

        let console = BufferConsole::new();
        assert_eq!(social_client_code(NetworkKind::LinkedIn, &console), 2);
        assert!(console.contains("Network: linkedin"));
    }
}
