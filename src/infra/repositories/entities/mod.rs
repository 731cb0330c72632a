//! SeaORM entity definitions
//!
//! Database-specific models, kept separate from the domain entities.
//! JSON columns carry the nested value objects (salary, eligibility,
//! interview rounds, profile sections).

pub mod announcement;
pub mod application;
pub mod job;
pub mod profile;
pub mod user;
