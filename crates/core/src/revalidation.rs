//! Which public pages go stale when an entity changes.
//!
//! The admin app sends these paths to the public site after every
//! successful mutation. A `page` path drops exactly that page; a `layout`
//! path drops the page and everything nested below it.

use serde::{Deserialize, Serialize};

/// How far an invalidation reaches.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PathKind {
    Page,
    Layout,
}

/// A single public path to revalidate.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RevalidatePath {
    pub path: String,
    pub kind: PathKind,
}

impl RevalidatePath {
    pub fn page(path: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            kind: PathKind::Page,
        }
    }

    pub fn layout(path: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            kind: PathKind::Layout,
        }
    }
}

/// A mutated entity, carrying what is needed to name its public pages.
#[derive(Debug, Clone, Copy)]
pub enum Target<'a> {
    /// Content blocks can appear on any page.
    Content,
    Tournament { slug: &'a str },
    /// A deleted tournament. Its documents and photos lose the association.
    TournamentRemoved { slug: &'a str },
    Club { slug: &'a str },
    /// A deleted club. Its courses, documents and photos lose the association.
    ClubRemoved { slug: &'a str },
    Course,
    /// A document, with the slugs of the tournament/club it is attached to.
    Document {
        tournament_slug: Option<&'a str>,
        club_slug: Option<&'a str>,
    },
    Photo {
        tournament_slug: Option<&'a str>,
        club_slug: Option<&'a str>,
    },
    Membership,
}

/// Public paths affected by a change to `target`.
pub fn paths_for(target: Target<'_>) -> Vec<RevalidatePath> {
    match target {
        Target::Content => vec![RevalidatePath::layout("/")],
        Target::Tournament { slug } => tournament_pages(slug),
        Target::TournamentRemoved { slug } => {
            let mut paths = tournament_pages(slug);
            paths.extend(asset_listings());
            paths
        }
        Target::Club { slug } => club_pages(slug),
        Target::ClubRemoved { slug } => {
            let mut paths = club_pages(slug);
            paths.push(RevalidatePath::page("/courses"));
            paths.extend(asset_listings());
            paths
        }
        Target::Course => vec![
            RevalidatePath::page("/courses"),
            RevalidatePath::layout("/clubs"),
        ],
        Target::Document {
            tournament_slug,
            club_slug,
        } => with_associations("/documents", tournament_slug, club_slug),
        Target::Photo {
            tournament_slug,
            club_slug,
        } => with_associations("/photos", tournament_slug, club_slug),
        Target::Membership => vec![RevalidatePath::page("/members")],
    }
}

fn tournament_pages(slug: &str) -> Vec<RevalidatePath> {
    vec![
        RevalidatePath::page("/tournaments"),
        RevalidatePath::page(format!("/tournaments/{slug}")),
    ]
}

/// The members listing shows club names, slugs and websites.
fn club_pages(slug: &str) -> Vec<RevalidatePath> {
    vec![
        RevalidatePath::page("/clubs"),
        RevalidatePath::page(format!("/clubs/{slug}")),
        RevalidatePath::page("/members"),
    ]
}

fn asset_listings() -> [RevalidatePath; 2] {
    [RevalidatePath::page("/documents"), RevalidatePath::page("/photos")]
}

fn with_associations(
    listing: &str,
    tournament_slug: Option<&str>,
    club_slug: Option<&str>,
) -> Vec<RevalidatePath> {
    let mut paths = vec![RevalidatePath::page(listing)];
    if let Some(slug) = tournament_slug {
        paths.push(RevalidatePath::page(format!("/tournaments/{slug}")));
    }
    if let Some(slug) = club_slug {
        paths.push(RevalidatePath::page(format!("/clubs/{slug}")));
    }
    paths
}

/// Validate a path received by the revalidation endpoint.
pub fn validate_path(path: &str) -> Result<(), crate::error::CoreError> {
    if !path.starts_with('/') || path.contains("..") || path.contains('?') {
        return Err(crate::error::CoreError::Validation(format!(
            "Invalid revalidation path '{path}'"
        )));
    }
    Ok(())
}
