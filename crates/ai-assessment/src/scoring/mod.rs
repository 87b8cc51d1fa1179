pub mod adoption;
pub mod prioritization;
pub mod role;
