pub mod membership;
pub mod role;
pub mod user;

pub use membership::Membership;
pub use role::Role;
pub use user::User;
