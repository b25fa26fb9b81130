pub mod memberships;
pub mod roles;
pub mod users;
