//! Domain model structs and DTOs.
//!
//! Each submodule contains:
//! - A `FromRow` + `Serialize` entity struct matching the database row
//! - A `Deserialize` create DTO for inserts
//! - A `Deserialize` update DTO (all `Option` fields) for patches

pub mod account;
pub mod club;
pub mod content;
pub mod dashboard;
pub mod document;
pub mod invitation;
pub mod membership;
pub mod photo;
pub mod role;
pub mod session;
pub mod tournament;
pub mod user;
