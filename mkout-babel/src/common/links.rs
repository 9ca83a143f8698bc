//! Numbered link tables.
//!
//! Both the reference-style markdown output and the plain text autolinks
//! replace inline destinations with a number and print a table of
//! `[n]: destination` lines at the end of the document. Numbers are handed
//! out in first-seen order and a destination seen again reuses its number.

use crate::ast::LinkData;
use std::collections::HashMap;

#[derive(Debug, Clone, Default)]
pub struct LinkCollector {
    links: Vec<LinkData>,
    numbers: HashMap<String, usize>,
}

impl LinkCollector {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a link and return its 1-based number.
    pub fn add(&mut self, link: &LinkData) -> usize {
        if let Some(number) = self.numbers.get(&link.destination) {
            return *number;
        }
        self.links.push(link.clone());
        let number = self.links.len();
        self.numbers.insert(link.destination.clone(), number);
        number
    }

    pub fn number_of(&self, destination: &str) -> Option<usize> {
        self.numbers.get(destination).copied()
    }

    pub fn len(&self) -> usize {
        self.links.len()
    }

    pub fn is_empty(&self) -> bool {
        self.links.is_empty()
    }

    /// Links with their numbers, in first-seen order.
    pub fn iter(&self) -> impl Iterator<Item = (usize, &LinkData)> {
        self.links.iter().enumerate().map(|(i, link)| (i + 1, link))
    }
}
