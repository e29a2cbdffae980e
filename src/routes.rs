pub mod intake;
pub mod students;
