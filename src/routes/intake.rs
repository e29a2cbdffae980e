use crate::{
    data::{
        choices::{BloodGroup, Choice, SchoolClass, Section, Version, Wing},
        intake::{IntakeDraft, PictureUpload, RecordField, StudentSubmission},
    },
    error::{MultipartSnafu, RosterError, RosterResult},
    maud_conveniences::{
        errors_list, form_element, form_submit_button, select_form_element, simple_form_element,
        title,
    },
    state::RosterState,
};
use axum::extract::{Multipart, State};
use maud::{Markup, html};
use snafu::ResultExt;

pub async fn get_intake_form(State(state): State<RosterState>) -> Markup {
    state.render(html! {
        div class="bg-gray-800 p-8 rounded shadow-md max-w-xl w-full" {
            (title("Student Information Form"))
            (render_intake_form(&IntakeDraft::default()))
        }
    })
}

fn options<C: Choice>() -> Vec<&'static str> {
    C::ALL.iter().copied().map(C::as_str).collect()
}

///Only `#intake_feedback` is swapped on submission, so whatever was typed stays put.
pub fn render_intake_form(draft: &IntakeDraft) -> Markup {
    let text = |field: RecordField| {
        simple_form_element(
            field.form_name(),
            field.label(),
            true,
            None,
            Some(draft.current_value(field)),
        )
    };
    let select = |field: RecordField, options: &[&'static str]| {
        select_form_element(
            field.form_name(),
            field.label(),
            true,
            "Select an option",
            options,
            draft.current_value(field),
        )
    };

    html! {
        form id="intake_form" hx-post="/intake" hx-encoding="multipart/form-data" hx-target="#intake_feedback" hx-swap="innerHTML" class="p-4" {
            (text(RecordField::NickName))
            (text(RecordField::FullName))
            (text(RecordField::StudentId))
            (select(RecordField::Class, &options::<SchoolClass>()))
            (select(RecordField::Section, &options::<Section>()))
            (select(RecordField::Version, &options::<Version>()))
            (select(RecordField::Wings, &options::<Wing>()))
            (select(RecordField::BloodGroup, &options::<BloodGroup>()))
            (text(RecordField::MobileNo))
            (form_element(RecordField::Picture.form_name(), "Upload Picture", html!{
                input type="file" id=(RecordField::Picture.form_name()) name=(RecordField::Picture.form_name()) accept="image/*" required class="block w-full text-sm text-gray-300 file:mr-4 file:py-2 file:px-4 file:rounded file:border-0 file:text-sm file:font-semibold file:bg-violet-50 file:text-violet-700 hover:file:bg-violet-100";
            }))

            div id="intake_feedback" {}

            (form_submit_button(Some("Submit")))
        }
    }
}

///Stands in for a real submission endpoint: the record is logged, then dropped.
fn emit_submission(submission: &StudentSubmission) {
    info!(?submission, "Student record submitted");
}

pub async fn post_intake(mut multipart: Multipart) -> RosterResult<Markup> {
    let mut draft = IntakeDraft::default();

    loop {
        let Some(field) = multipart.next_field().await.context(MultipartSnafu)? else {
            break;
        };
        let Some(name) = field.name().map(ToString::to_string) else {
            continue;
        };

        match name.parse::<RecordField>()? {
            RecordField::Picture => {
                let file_name = field.file_name().map(ToString::to_string);
                let content_type = field.content_type().map(ToString::to_string);
                let bytes = field.bytes().await.context(MultipartSnafu)?;

                draft.set_picture(PictureUpload::from_parts(
                    file_name.as_deref(),
                    content_type.as_deref(),
                    &bytes,
                ));
            }
            record_field => {
                let value = field.text().await.context(MultipartSnafu)?;
                draft.set_field(record_field, value)?;
            }
        }
    }

    match draft.submit() {
        Ok(submission) => {
            emit_submission(&submission);
            Ok(Markup::default())
        }
        Err(RosterError::IncompleteSubmission { missing }) => {
            warn!(?missing, "Rejected incomplete student record");
            Ok(errors_list(
                Some("Please fill in:"),
                missing.into_iter().map(RecordField::label),
            ))
        }
        Err(e) => Err(e),
    }
}
