use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme};
use utoipa::{Modify, OpenApi};

use crate::modules::academic_years::model::AcademicYear;
use crate::modules::attendance::model::{
    AttendanceMark, AttendanceReport, AttendanceSheet, AttendanceStatus, MessageResponse,
    RosterStudent, SaveAttendanceDto, StudentMonthlyReport,
};
use crate::modules::classrooms::model::{ClassRoom, CreateClassroomDto};
use crate::modules::subjects::model::{CreateSubjectDto, Subject};
use crate::modules::timetable::model::{
    CreatePeriodDto, Period, PeriodDescriptor, TeacherListing, TimetableContext, TimetableResponse,
};

#[derive(OpenApi)]
#[openapi(
    paths(
        crate::modules::classrooms::controller::get_classrooms,
        crate::modules::classrooms::controller::create_classroom,
        crate::modules::subjects::controller::get_subjects,
        crate::modules::subjects::controller::create_subject,
        crate::modules::academic_years::controller::get_academic_years,
        crate::modules::timetable::controller::get_timetable,
        crate::modules::timetable::controller::create_period,
        crate::modules::timetable::controller::delete_period,
        crate::modules::attendance::controller::get_attendance,
        crate::modules::attendance::controller::save_attendance,
        crate::modules::attendance::controller::get_attendance_report,
    ),
    components(
        schemas(
            ClassRoom,
            CreateClassroomDto,
            Subject,
            CreateSubjectDto,
            AcademicYear,
            Period,
            PeriodDescriptor,
            TeacherListing,
            TimetableContext,
            TimetableResponse,
            CreatePeriodDto,
            AttendanceStatus,
            RosterStudent,
            AttendanceMark,
            AttendanceSheet,
            SaveAttendanceDto,
            MessageResponse,
            StudentMonthlyReport,
            AttendanceReport,
        )
    ),
    modifiers(&SecurityAddon),
    tags(
        (name = "Classrooms", description = "Classroom management endpoints"),
        (name = "Subjects", description = "Subject management endpoints"),
        (name = "Academic years", description = "Academic year endpoints"),
        (name = "Timetable", description = "Timetable scheduling endpoints"),
        (name = "Attendance", description = "Attendance marking and reporting endpoints")
    ),
    info(
        title = "Rollcall API",
        version = "0.1.0",
        description = "A REST API built with Rust, Axum, and PostgreSQL for classroom timetabling and attendance tracking.",
        license(
            name = "MIT"
        )
    )
)]
pub struct ApiDoc;

struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "bearer_auth",
                SecurityScheme::Http(
                    HttpBuilder::new()
                        .scheme(HttpAuthScheme::Bearer)
                        .bearer_format("JWT")
                        .build(),
                ),
            )
        }
    }
}
