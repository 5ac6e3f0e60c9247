pub mod academic_years;
pub mod attendance;
pub mod classrooms;
pub mod subjects;
pub mod timetable;
