//! Domain rules for the golf association CMS.
//!
//! Everything in here is pure: validation, slugging, token and signature
//! helpers, and the mapping from mutated entities to public pages. The
//! database, storage, and HTTP crates all build on these functions.

pub mod assets;
pub mod club;
pub mod contact;
pub mod content;
pub mod error;
pub mod hashing;
pub mod invitation;
pub mod membership;
pub mod pagination;
pub mod revalidation;
pub mod roles;
pub mod slug;
pub mod tournament;
pub mod types;
