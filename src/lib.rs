//! achdb - a deterministic Analysis of Competing Hypotheses engine
//!
//! An analysis is a matrix of hypotheses against evidence. The engine keeps
//! the matrix consistent as it is edited and derives from it:
//! - a ranking of hypotheses by how much evidence contradicts them
//! - how well each evidence item discriminates between hypotheses
//! - which evidence the leading hypothesis depends on
//! - how much of the matrix has been rated
//!
//! All state lives in a [`repository::Workspace`], which is also the value
//! handed to a [`persistence::StateStore`].

pub mod cli;
pub mod config;
pub mod export;
pub mod labels;
pub mod model;
pub mod observability;
pub mod persistence;
pub mod repository;
pub mod scoring;
pub mod snapshot;
pub mod suggestions;
pub mod workflow;
