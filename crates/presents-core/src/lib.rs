//! Reference data for the family presents draw.
//!
//! This crate defines the roster types (adults, children, families and
//! godparent links), the TOML input format, and the validated, read-only
//! `Roster` that the matchers query.

pub mod config;
pub mod error;
pub mod roster;
mod validation;

pub use config::{AdultEntry, ChildEntry, FamilyEntry, GodparentEntry, RosterConfig};
pub use error::{Result, RosterError};
pub use roster::{Adult, AdultId, Child, ChildId, Family, FamilyId, Person, Roster};

/// Built-in roster shipped with the binary.
pub const BUILTIN_ROSTER: &str = include_str!("../data/family.toml");
