//! Handlers of the public site app (`clubhouse-site`).

pub mod contact;
pub mod pages;
pub mod revalidate;
pub mod webhooks;
