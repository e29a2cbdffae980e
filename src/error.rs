use crate::data::intake::RecordField;
use axum::{
    http::StatusCode,
    response::{Html, IntoResponse, Response},
};
use maud::html;
use snafu::Snafu;
use std::{num::ParseIntError, path::PathBuf};

pub type RosterResult<T> = Result<T, RosterError>;

#[derive(Debug, Snafu)]
#[snafu(visibility(pub))]
pub enum RosterError {
    #[snafu(display("Unable to retrieve env var `{}`", name))]
    BadEnvVar {
        source: dotenvy::Error,
        name: &'static str,
    },
    #[snafu(display("Unable to parse env var `{}` as a number", name))]
    ParseEnvVar {
        source: ParseIntError,
        name: &'static str,
    },
    #[snafu(display("Unable to listen on {}", address))]
    BindListener {
        source: std::io::Error,
        address: String,
    },
    #[snafu(display("Error serving app"))]
    Serve { source: std::io::Error },
    #[snafu(display("Error with multipart form input"))]
    Multipart {
        source: axum::extract::multipart::MultipartError,
    },
    #[snafu(display("Error with CSVs"))]
    Csv { source: csv::Error },
    #[snafu(display("Error finishing CSV output"))]
    WriteCsv { source: std::io::Error },
    #[snafu(display("Unable to read sample students from {:?}", path))]
    ReadSampleData { source: csv::Error, path: PathBuf },
    #[snafu(display("{:?} is not a valid {}", value, field))]
    InvalidChoice { field: &'static str, value: String },
    #[snafu(display("Unknown form field {:?}", name))]
    UnknownField { name: String },
    #[snafu(display("Missing required fields: {}", missing.iter().map(|field| field.label()).collect::<Vec<_>>().join(", ")))]
    IncompleteSubmission { missing: Vec<RecordField> },
}

impl IntoResponse for RosterError {
    #[allow(clippy::match_same_arms)]
    fn into_response(self) -> Response {
        const ISE: StatusCode = StatusCode::INTERNAL_SERVER_ERROR; //internal server error
        const BI: StatusCode = StatusCode::BAD_REQUEST; //bad input

        let basic_error = |desc| {
            html! {
                div class="bg-red-100 border border-red-400 text-red-700 px-4 py-3 rounded relative mb-4" role="alert" {
                    strong class="font-bold" {"Roster Error "}
                    span {(desc)}
                }
            }
        };

        let status_code = match &self {
            Self::BadEnvVar { .. } | Self::ParseEnvVar { .. } => ISE,
            Self::BindListener { .. } | Self::Serve { .. } => ISE,
            Self::Multipart { source } => source.status(),
            Self::Csv { .. } | Self::WriteCsv { .. } => ISE,
            Self::ReadSampleData { .. } => ISE,
            Self::InvalidChoice { .. } => BI,
            Self::UnknownField { .. } => BI,
            Self::IncompleteSubmission { .. } => BI,
        };

        error!(?self, "Error!");
        (status_code, Html(basic_error(self.to_string()))).into_response()
    }
}
