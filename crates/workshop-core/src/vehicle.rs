//! Vehicle population types: categories, incidents and the vehicles themselves.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Vehicle category. Determines the base service duration and the incident
/// a vehicle of this category arrives with.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum Category {
    A,
    B,
    C,
}

impl Category {
    /// All categories, in population-generation order.
    pub const ALL: [Category; 3] = [Category::A, Category::B, Category::C];

    /// Single-letter label used in event lines.
    pub fn letter(&self) -> &'static str {
        match self {
            Category::A => "A",
            Category::B => "B",
            Category::C => "C",
        }
    }

    /// Incident a vehicle of this category arrives with.
    pub fn incident(&self) -> Incident {
        match self {
            Category::A => Incident::Mechanical,
            Category::B => Incident::Electrical,
            Category::C => Incident::Bodywork,
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.letter())
    }
}

/// Incident type assigned to a vehicle, derived from its category.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum Incident {
    Mechanical,
    Electrical,
    Bodywork,
}

impl Incident {
    /// Label used in event lines.
    pub fn label(&self) -> &'static str {
        match self {
            Incident::Mechanical => "mechanical",
            Incident::Electrical => "electrical",
            Incident::Bodywork => "bodywork",
        }
    }
}

impl fmt::Display for Incident {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// A vehicle flowing through the workshop pipeline.
///
/// Immutable once created; owned by the task that carries it through the
/// four stages, never shared for mutation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Vehicle {
    /// Unique sequential id, starting at 1.
    pub id: u32,

    /// Category the vehicle was generated with.
    pub category: Category,

    /// Incident derived from the category.
    pub incident: Incident,
}

impl Vehicle {
    /// Create a vehicle with the incident derived from its category.
    pub fn new(id: u32, category: Category) -> Self {
        Self {
            id,
            category,
            incident: category.incident(),
        }
    }
}
