//! Repository layer. One zero-sized struct per table, each method taking a
//! `&PgPool` (or a transaction) and returning `Result<_, sqlx::Error>`.

pub mod account_repo;
pub mod club_repo;
pub mod content_repo;
pub mod dashboard_repo;
pub mod document_repo;
pub mod golf_course_repo;
pub mod invitation_repo;
pub mod membership_repo;
pub mod photo_repo;
pub mod role_repo;
pub mod session_repo;
pub mod tournament_repo;
pub mod user_repo;

pub use account_repo::AccountRepo;
pub use club_repo::{ClubContactRepo, ClubRepo};
pub use content_repo::ContentRepo;
pub use dashboard_repo::DashboardRepo;
pub use document_repo::DocumentRepo;
pub use golf_course_repo::GolfCourseRepo;
pub use invitation_repo::InvitationRepo;
pub use membership_repo::MembershipRepo;
pub use photo_repo::PhotoRepo;
pub use role_repo::RoleRepo;
pub use session_repo::SessionRepo;
pub use tournament_repo::{TournamentInstanceRepo, TournamentRepo};
pub use user_repo::UserRepo;
