pub mod requests;
pub mod schedule;
pub mod staff;
