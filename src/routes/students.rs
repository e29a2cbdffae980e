use crate::{
    data::{
        student::StudentRecord,
        student_filter::{FilterField, FilterQuery, StudentFilter},
    },
    error::RosterResult,
    maud_conveniences::{escape, render_table},
    state::RosterState,
};
use axum::{
    extract::{Query, State},
    http::{StatusCode, header},
    response::IntoResponse,
};
use maud::{Markup, html};

pub const CSV_FILE_NAME: &str = "student_data.csv";

pub async fn get_students(
    State(state): State<RosterState>,
    Query(query): Query<FilterQuery>,
) -> RosterResult<Markup> {
    let filter = StudentFilter::try_from(query)?;

    Ok(state.render(html! {
        div class="mx-auto bg-gray-800 p-8 rounded shadow-md max-w-7xl w-full flex flex-col space-y-4" {
            (render_students_panel(state.students(), &filter))
        }
    }))
}

///Both the dropdowns and the reset button land here.
pub async fn internal_get_students(
    State(state): State<RosterState>,
    Query(query): Query<FilterQuery>,
) -> RosterResult<Markup> {
    let filter = StudentFilter::try_from(query)?;
    Ok(render_students_panel(state.students(), &filter))
}

fn render_filter_controls(filter: &StudentFilter) -> Markup {
    html! {
        div class="flex flex-row flex-wrap items-end gap-4" {
            form id="student_filters" hx-get="/internal/students" hx-trigger="change" hx-target="#students_panel" hx-swap="outerHTML" class="flex flex-row gap-4" {
                @for field in FilterField::ALL {
                    @let selected = filter.selected(field);
                    div {
                        label for=(field.param()) class="block text-sm font-bold mb-1 text-gray-300" {(field.label())}
                        select id=(field.param()) name=(field.param()) class="shadow border rounded w-28 py-2 px-3 bg-gray-700 border-gray-600" {
                            option value="" selected[selected.is_empty()] {"All"}
                            @for option in StudentFilter::options(field) {
                                option value=(option) selected[option == selected] {(option)}
                            }
                        }
                    }
                }
            }

            button type="button" hx-get="/internal/students" hx-vals="{\"reset\": true}" hx-target="#students_panel" hx-swap="outerHTML" class="border border-purple-400 text-purple-300 hover:bg-purple-900 font-bold py-2 px-4 rounded" {
                "Reset Filters"
            }

            form action="/students/export_csv" method="get" {
                @for field in FilterField::ALL {
                    @let selected = filter.selected(field);
                    @if !selected.is_empty() {
                        input type="hidden" name=(field.param()) value=(selected);
                    }
                }
                button type="submit" class="border border-blue-400 text-blue-300 hover:bg-blue-900 font-bold py-2 px-4 rounded" {
                    "Download CSV"
                }
            }

            button type="button" hx-post="/internal/students/export_pdf" hx-swap="none" class="border border-green-400 text-green-300 hover:bg-green-900 font-bold py-2 px-4 rounded" {
                "Download PDF"
            }
        }
    }
}

pub fn render_students_panel(students: &[StudentRecord], filter: &StudentFilter) -> Markup {
    let filtered = filter.filtered(students);
    let summary = if filter.is_unconstrained() {
        format!("Showing all {} students", students.len())
    } else {
        format!("{} of {} students match", filtered.len(), students.len())
    };

    let rows = filtered
        .into_iter()
        .map(|student| {
            [
                escape(&student.student_id),
                escape(&student.nick_name),
                escape(&student.full_name),
                escape(student.class.to_string()),
                escape(student.section.to_string()),
                escape(student.version.to_string()),
                escape(student.wing.to_string()),
                escape(student.blood_group.to_string()),
                escape(&student.mobile_no),
                html! {
                    img src=(student.picture_url) alt={(student.full_name) "'s profile"} class="w-12 h-12 rounded-full object-cover";
                },
            ]
        })
        .collect();

    html! {
        div id="students_panel" class="flex flex-col space-y-4" {
            (render_filter_controls(filter))
            p class="italic text-sm text-gray-400" {(summary)}
            (render_table(
                "Student Data",
                [
                    "Student ID",
                    "Nick Name",
                    "Full Name",
                    "Class",
                    "Section",
                    "Version",
                    "Wings",
                    "Blood Group",
                    "Mobile No",
                    "Picture",
                ],
                rows,
            ))
        }
    }
}

pub async fn get_students_csv(
    State(state): State<RosterState>,
    Query(query): Query<FilterQuery>,
) -> RosterResult<impl IntoResponse> {
    let filter = StudentFilter::try_from(query)?;
    let filtered = filter.filtered(state.students());
    let csv = StudentRecord::write_csv(filtered.iter().copied())?;

    debug!(?filter, n = filtered.len(), "Exporting students as CSV");

    Ok((
        [
            (header::CONTENT_TYPE, "text/csv; charset=utf-8".to_string()),
            (
                header::CONTENT_DISPOSITION,
                format!("attachment; filename=\"{CSV_FILE_NAME}\""),
            ),
        ],
        csv,
    ))
}

///The button is on the page, but PDF export isn't implemented.
pub async fn internal_post_students_pdf() -> StatusCode {
    debug!("PDF export requested, nothing to do");
    StatusCode::NO_CONTENT
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::test_helpers::sample_state;
    use axum::body::to_bytes;
    use pretty_assertions::assert_eq;

    fn query(class: &str) -> FilterQuery {
        FilterQuery {
            class: Some(class.to_string()),
            ..FilterQuery::default()
        }
    }

    #[tokio::test]
    async fn unfiltered_panel_lists_everyone() {
        let panel = internal_get_students(State(sample_state()), Query(FilterQuery::default()))
            .await
            .unwrap()
            .into_string();

        assert!(panel.contains("John Doe"));
        assert!(panel.contains("Jane Doe"));
        assert!(!panel.contains("No students match"));
        assert!(panel.contains("Showing all 2 students"));
    }

    #[tokio::test]
    async fn reset_ignores_other_filters() {
        let panel = internal_get_students(
            State(sample_state()),
            Query(FilterQuery {
                reset: true,
                ..query("10")
            }),
        )
        .await
        .unwrap()
        .into_string();

        assert!(panel.contains("Jane Doe"));
        assert!(panel.contains("Showing all 2 students"));
        assert!(panel.contains("<option value=\"\" selected>All</option>"));
    }

    #[tokio::test]
    async fn class_filter_narrows_rows() {
        let ten = internal_get_students(State(sample_state()), Query(query("10")))
            .await
            .unwrap()
            .into_string();
        assert!(ten.contains("S12345"));
        assert!(ten.contains("1 of 2 students match"));
        assert!(!ten.contains("S67890"));

        let nine = internal_get_students(State(sample_state()), Query(query("9")))
            .await
            .unwrap()
            .into_string();
        assert!(nine.contains("S67890"));
        assert!(!nine.contains("S12345"));
    }

    #[tokio::test]
    async fn no_match_renders_placeholder_row() {
        let panel = internal_get_students(State(sample_state()), Query(query("PG")))
            .await
            .unwrap()
            .into_string();
        assert!(panel.contains("No students match"));
        assert!(!panel.contains("S12345"));
    }

    #[tokio::test]
    async fn invalid_filter_is_bad_input() {
        let Err(err) = internal_get_students(State(sample_state()), Query(query("13"))).await
        else {
            panic!("expected an error");
        };
        assert_eq!(err.into_response().status(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn csv_link_keeps_current_filters() {
        let mut filter = StudentFilter::default();
        filter.set(FilterField::BloodGroup, "AB+").unwrap();
        let panel = render_students_panel(&StudentRecord::sample_set(), &filter).into_string();

        assert!(panel.contains("<input type=\"hidden\" name=\"blood_group\" value=\"AB+\">"));
        assert!(!panel.contains("<input type=\"hidden\" name=\"class\""));
    }

    #[tokio::test]
    async fn csv_download_matches_filtered_view() {
        let response = get_students_csv(State(sample_state()), Query(query("9")))
            .await
            .unwrap()
            .into_response();

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(
            response.headers()[header::CONTENT_DISPOSITION],
            "attachment; filename=\"student_data.csv\""
        );

        let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let mut rdr = csv::Reader::from_reader(body.as_ref());
        assert_eq!(
            rdr.headers().unwrap().iter().collect::<Vec<_>>(),
            StudentRecord::CSV_HEADERS
        );
        let rows: Vec<StudentRecord> = rdr.deserialize().map(Result::unwrap).collect();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].full_name, "Jane Doe");
    }

    #[tokio::test]
    async fn pdf_export_does_nothing() {
        assert_eq!(internal_post_students_pdf().await, StatusCode::NO_CONTENT);
    }
}
