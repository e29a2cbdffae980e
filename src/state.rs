use crate::{
    config::RuntimeConfiguration, data::student::StudentRecord, error::RosterResult,
    maud_conveniences::render_nav,
};
use maud::{DOCTYPE, Markup, html};
use std::sync::Arc;

#[derive(Clone, Debug)]
pub struct RosterState {
    config: RuntimeConfiguration,
    students: Arc<[StudentRecord]>,
}

impl RosterState {
    pub fn new(config: RuntimeConfiguration) -> RosterResult<Self> {
        let students = match config.server_config().sample_data_path.as_deref() {
            Some(path) => {
                let students = StudentRecord::read_csv(path)?;
                info!(?path, n = students.len(), "Loaded sample students");
                students
            }
            None => StudentRecord::sample_set(),
        };

        Ok(Self::with_students(config, students))
    }

    pub fn with_students(config: RuntimeConfiguration, students: Vec<StudentRecord>) -> Self {
        Self {
            config,
            students: students.into(),
        }
    }

    #[allow(clippy::unused_self, clippy::needless_pass_by_value)] //in case self is ever needed :), and to allow direct html! usage
    pub fn render(&self, markup: Markup) -> Markup {
        html! {
            (DOCTYPE)
            html {
                head {
                    meta charset="UTF-8" {}
                    meta name="viewport" content="width=device-width, initial-scale=1.0" {}
                    script src="https://unpkg.com/htmx.org@2.0.4" integrity="sha384-HGfztofotfshcF7+8n44JQL2oJmowVChPTg48S+jvZoztPfvwD79OC/LTtG6dMp+" crossorigin="anonymous" {}
                    script src="https://cdn.jsdelivr.net/npm/@tailwindcss/browser@4" {}
                    title { "Roster" }
                }
                body class="bg-gray-900 min-h-screen flex flex-col items-center text-white" {
                    (render_nav())
                    (markup)
                }
            }
        }
    }

    pub const fn config(&self) -> &RuntimeConfiguration {
        &self.config
    }

    ///read-only, shared by every request
    pub fn students(&self) -> &[StudentRecord] {
        &self.students
    }
}
