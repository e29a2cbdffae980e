pub mod choices;
pub mod intake;
pub mod student;
pub mod student_filter;
