use crate::{
    data::choices::{BloodGroup, Choice, SchoolClass, Section, Version, Wing},
    error::{IncompleteSubmissionSnafu, RosterError, RosterResult, UnknownFieldSnafu},
};
use jiff::Timestamp;
use std::str::FromStr;
use uuid::Uuid;

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum RecordField {
    NickName,
    FullName,
    StudentId,
    Class,
    Section,
    Version,
    Wings,
    BloodGroup,
    MobileNo,
    Picture,
}

impl RecordField {
    pub const ALL: [Self; 10] = [
        Self::NickName,
        Self::FullName,
        Self::StudentId,
        Self::Class,
        Self::Section,
        Self::Version,
        Self::Wings,
        Self::BloodGroup,
        Self::MobileNo,
        Self::Picture,
    ];

    ///the `name` attribute of the input
    pub const fn form_name(self) -> &'static str {
        match self {
            Self::NickName => "nick_name",
            Self::FullName => "full_name",
            Self::StudentId => "student_id",
            Self::Class => "class",
            Self::Section => "section",
            Self::Version => "version",
            Self::Wings => "wings",
            Self::BloodGroup => "blood_group",
            Self::MobileNo => "mobile_no",
            Self::Picture => "picture",
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::NickName => "Nick Name",
            Self::FullName => "Full Name",
            Self::StudentId => "Student ID",
            Self::Class => "Class",
            Self::Section => "Section",
            Self::Version => "Version",
            Self::Wings => "Wings",
            Self::BloodGroup => "Blood Group",
            Self::MobileNo => "Mobile No",
            Self::Picture => "Picture",
        }
    }
}

impl FromStr for RecordField {
    type Err = RosterError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|field| field.form_name() == s)
            .ok_or_else(|| UnknownFieldSnafu { name: s }.build())
    }
}

///What the browser told us about the chosen file. The bytes themselves are not kept.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PictureUpload {
    pub file_name: String,
    pub content_type: String,
    pub size: usize,
}

impl PictureUpload {
    ///`None` when nothing was picked - browsers still send an empty part for an untouched file input.
    pub fn from_parts(
        file_name: Option<&str>,
        declared_content_type: Option<&str>,
        bytes: &[u8],
    ) -> Option<Self> {
        let file_name = file_name.unwrap_or_default();
        if file_name.is_empty() && bytes.is_empty() {
            return None;
        }

        let content_type = infer::get(bytes).map_or_else(
            || {
                declared_content_type
                    .unwrap_or("application/octet-stream")
                    .to_string()
            },
            |kind| kind.mime_type().to_string(),
        );

        Some(Self {
            file_name: file_name.to_string(),
            content_type,
            size: bytes.len(),
        })
    }
}

///The intake form's working copy. Every field starts empty or unselected.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct IntakeDraft {
    pub nick_name: String,
    pub full_name: String,
    pub student_id: String,
    pub class: Option<SchoolClass>,
    pub section: Option<Section>,
    pub version: Option<Version>,
    pub wings: Option<Wing>,
    pub blood_group: Option<BloodGroup>,
    pub mobile_no: String,
    pub picture: Option<PictureUpload>,
}

#[derive(Clone, Debug)]
#[allow(dead_code)] //only ever logged
pub struct StudentSubmission {
    pub id: Uuid,
    pub received_at: Timestamp,
    pub nick_name: String,
    pub full_name: String,
    pub student_id: String,
    pub class: SchoolClass,
    pub section: Section,
    pub version: Version,
    pub wings: Wing,
    pub blood_group: BloodGroup,
    pub mobile_no: String,
    pub picture: PictureUpload,
}

impl IntakeDraft {
    ///Replaces one text or option field. Text is copied verbatim, options are parsed with `""` meaning unselected.
    ///
    ///The picture goes through [`Self::set_picture`].
    pub fn set_field(&mut self, field: RecordField, value: String) -> RosterResult<()> {
        match field {
            RecordField::NickName => self.nick_name = value,
            RecordField::FullName => self.full_name = value,
            RecordField::StudentId => self.student_id = value,
            RecordField::MobileNo => self.mobile_no = value,
            RecordField::Class => self.class = SchoolClass::parse_optional(&value)?,
            RecordField::Section => self.section = Section::parse_optional(&value)?,
            RecordField::Version => self.version = Version::parse_optional(&value)?,
            RecordField::Wings => self.wings = Wing::parse_optional(&value)?,
            RecordField::BloodGroup => self.blood_group = BloodGroup::parse_optional(&value)?,
            RecordField::Picture => {
                return UnknownFieldSnafu {
                    name: field.form_name(),
                }
                .fail();
            }
        }
        Ok(())
    }

    ///an empty selection keeps whatever was there before
    pub fn set_picture(&mut self, upload: Option<PictureUpload>) {
        if let Some(upload) = upload {
            self.picture = Some(upload);
        }
    }

    ///the value to pre-fill a text input or select with
    pub fn current_value(&self, field: RecordField) -> &str {
        match field {
            RecordField::NickName => &self.nick_name,
            RecordField::FullName => &self.full_name,
            RecordField::StudentId => &self.student_id,
            RecordField::MobileNo => &self.mobile_no,
            RecordField::Class => self.class.map_or("", Choice::as_str),
            RecordField::Section => self.section.map_or("", Choice::as_str),
            RecordField::Version => self.version.map_or("", Choice::as_str),
            RecordField::Wings => self.wings.map_or("", Choice::as_str),
            RecordField::BloodGroup => self.blood_group.map_or("", Choice::as_str),
            RecordField::Picture => self
                .picture
                .as_ref()
                .map_or("", |picture| picture.file_name.as_str()),
        }
    }

    pub fn missing_fields(&self) -> Vec<RecordField> {
        RecordField::ALL
            .into_iter()
            .filter(|field| match field {
                RecordField::Picture => self.picture.is_none(),
                _ => self.current_value(*field).is_empty(),
            })
            .collect()
    }

    pub fn submit(self) -> RosterResult<StudentSubmission> {
        let missing = self.missing_fields();

        let (
            Some(class),
            Some(section),
            Some(version),
            Some(wings),
            Some(blood_group),
            Some(picture),
            true,
        ) = (
            self.class,
            self.section,
            self.version,
            self.wings,
            self.blood_group,
            self.picture,
            missing.is_empty(),
        )
        else {
            return IncompleteSubmissionSnafu { missing }.fail();
        };

        Ok(StudentSubmission {
            id: Uuid::new_v4(),
            received_at: Timestamp::now(),
            nick_name: self.nick_name,
            full_name: self.full_name,
            student_id: self.student_id,
            class,
            section,
            version,
            wings,
            blood_group,
            mobile_no: self.mobile_no,
            picture,
        })
    }
}
