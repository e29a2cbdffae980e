use crate::{
    data::choices::{BloodGroup, SchoolClass, Section, Version, Wing},
    error::{CsvSnafu, ReadSampleDataSnafu, RosterResult, WriteCsvSnafu},
};
use serde::{Deserialize, Serialize};
use snafu::ResultExt;
use std::path::Path;

///One row of the listing. `picture_url` is a URL, unlike the upload handle the intake form collects.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct StudentRecord {
    #[serde(rename = "nickName")]
    pub nick_name: String,
    #[serde(rename = "fullName")]
    pub full_name: String,
    #[serde(rename = "studentID")]
    pub student_id: String,
    pub class: SchoolClass,
    pub section: Section,
    pub version: Version,
    #[serde(rename = "wings")]
    pub wing: Wing,
    #[serde(rename = "bloodGroup")]
    pub blood_group: BloodGroup,
    #[serde(rename = "mobileNo")]
    pub mobile_no: String,
    #[serde(rename = "picture")]
    pub picture_url: String,
}

impl StudentRecord {
    ///CSV headers, in field order
    pub const CSV_HEADERS: [&'static str; 10] = [
        "nickName",
        "fullName",
        "studentID",
        "class",
        "section",
        "version",
        "wings",
        "bloodGroup",
        "mobileNo",
        "picture",
    ];

    pub fn sample_set() -> Vec<Self> {
        const PLACEHOLDER_PICTURE: &str = "https://via.placeholder.com/50";

        vec![
            Self {
                nick_name: "JohnDoe".into(),
                full_name: "John Doe".into(),
                student_id: "S12345".into(),
                class: SchoolClass::Ten,
                section: Section::A,
                version: Version::English,
                wing: Wing::Boys,
                blood_group: BloodGroup::OPositive,
                mobile_no: "123-456-7890".into(),
                picture_url: PLACEHOLDER_PICTURE.into(),
            },
            Self {
                nick_name: "JaneDoe".into(),
                full_name: "Jane Doe".into(),
                student_id: "S67890".into(),
                class: SchoolClass::Nine,
                section: Section::B,
                version: Version::Bangla,
                wing: Wing::Girls,
                blood_group: BloodGroup::AbPositive,
                mobile_no: "098-765-4321".into(),
                picture_url: PLACEHOLDER_PICTURE.into(),
            },
        ]
    }

    pub fn read_csv(path: &Path) -> RosterResult<Vec<Self>> {
        let mut rdr = csv::Reader::from_path(path).context(ReadSampleDataSnafu { path })?;
        rdr.deserialize()
            .collect::<Result<Vec<Self>, _>>()
            .context(ReadSampleDataSnafu { path })
    }

    ///The header row is written even when there are no records.
    pub fn write_csv<'a>(records: impl IntoIterator<Item = &'a Self>) -> RosterResult<Vec<u8>> {
        let mut wtr = csv::WriterBuilder::new()
            .has_headers(false)
            .from_writer(vec![]);

        wtr.write_record(Self::CSV_HEADERS).context(CsvSnafu)?;
        for record in records {
            wtr.serialize(record).context(CsvSnafu)?;
        }

        wtr.into_inner()
            .map_err(csv::IntoInnerError::into_error)
            .context(WriteCsvSnafu)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::io::Write;

    #[test]
    fn csv_has_header_and_one_row_per_record() {
        let records = StudentRecord::sample_set();
        let bytes = StudentRecord::write_csv(&records).unwrap();

        let mut rdr = csv::Reader::from_reader(bytes.as_slice());
        let headers: Vec<String> = rdr
            .headers()
            .unwrap()
            .iter()
            .map(ToString::to_string)
            .collect();
        assert_eq!(headers, StudentRecord::CSV_HEADERS);

        let rows: Vec<csv::StringRecord> = rdr.records().map(Result::unwrap).collect();
        assert_eq!(rows.len(), 2);
        assert_eq!(
            rows[0].iter().collect::<Vec<_>>(),
            [
                "JohnDoe",
                "John Doe",
                "S12345",
                "10",
                "A",
                "English",
                "Boys",
                "O+",
                "123-456-7890",
                "https://via.placeholder.com/50"
            ]
        );
    }

    #[test]
    fn empty_export_still_has_header() {
        let bytes = StudentRecord::write_csv(std::iter::empty()).unwrap();
        let text = String::from_utf8(bytes).unwrap();
        assert_eq!(
            text,
            "nickName,fullName,studentID,class,section,version,wings,bloodGroup,mobileNo,picture\n"
        );
    }

    #[test]
    fn reads_back_an_exported_file() {
        let records = StudentRecord::sample_set();
        let bytes = StudentRecord::write_csv(&records).unwrap();

        let path = std::env::temp_dir().join(format!("roster-{}.csv", uuid::Uuid::new_v4()));
        std::fs::File::create(&path)
            .unwrap()
            .write_all(&bytes)
            .unwrap();

        let read = StudentRecord::read_csv(&path).unwrap();
        std::fs::remove_file(&path).unwrap();
        assert_eq!(read, records);
    }

    #[test]
    fn bad_sample_file_is_reported() {
        let path = std::env::temp_dir().join(format!("roster-{}.csv", uuid::Uuid::new_v4()));
        std::fs::write(
            &path,
            "nickName,fullName,studentID,class,section,version,wings,bloodGroup,mobileNo,picture\nX,Y,Z,13,A,English,Boys,O+,1,u\n",
        )
        .unwrap();

        let err = StudentRecord::read_csv(&path).unwrap_err();
        std::fs::remove_file(&path).unwrap();
        assert!(matches!(err, crate::error::RosterError::ReadSampleData { .. }));
    }
}
