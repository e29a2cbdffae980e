use crate::{
    data::{
        choices::{BloodGroup, Choice, SchoolClass, Section, Version},
        student::StudentRecord,
    },
    error::RosterResult,
};
use serde::Deserialize;

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum FilterField {
    Class,
    Section,
    Version,
    BloodGroup,
}

impl FilterField {
    pub const ALL: [Self; 4] = [Self::Class, Self::Section, Self::Version, Self::BloodGroup];

    ///query parameter name
    pub const fn param(self) -> &'static str {
        match self {
            Self::Class => "class",
            Self::Section => "section",
            Self::Version => "version",
            Self::BloodGroup => "blood_group",
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::Class => "Class",
            Self::Section => "Section",
            Self::Version => "Version",
            Self::BloodGroup => "Blood Group",
        }
    }
}

///`None` everywhere means unconstrained.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct StudentFilter {
    pub class: Option<SchoolClass>,
    pub section: Option<Section>,
    pub version: Option<Version>,
    pub blood_group: Option<BloodGroup>,
}

impl StudentFilter {
    ///An empty `value` clears the constraint rather than matching empty strings.
    pub fn set(&mut self, field: FilterField, value: &str) -> RosterResult<()> {
        match field {
            FilterField::Class => self.class = SchoolClass::parse_optional(value)?,
            FilterField::Section => self.section = Section::parse_optional(value)?,
            FilterField::Version => self.version = Version::parse_optional(value)?,
            FilterField::BloodGroup => self.blood_group = BloodGroup::parse_optional(value)?,
        }
        Ok(())
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }

    pub fn is_unconstrained(&self) -> bool {
        *self == Self::default()
    }

    ///the currently selected option for a field, or `""`
    pub fn selected(&self, field: FilterField) -> &'static str {
        match field {
            FilterField::Class => self.class.map_or("", Choice::as_str),
            FilterField::Section => self.section.map_or("", Choice::as_str),
            FilterField::Version => self.version.map_or("", Choice::as_str),
            FilterField::BloodGroup => self.blood_group.map_or("", Choice::as_str),
        }
    }

    ///every option for a field, for rendering the dropdown
    pub fn options(field: FilterField) -> Vec<&'static str> {
        fn all<C: Choice>() -> Vec<&'static str> {
            C::ALL.iter().copied().map(C::as_str).collect()
        }

        match field {
            FilterField::Class => all::<SchoolClass>(),
            FilterField::Section => all::<Section>(),
            FilterField::Version => all::<Version>(),
            FilterField::BloodGroup => all::<BloodGroup>(),
        }
    }

    pub fn matches(&self, record: &StudentRecord) -> bool {
        self.class.is_none_or(|class| record.class == class)
            && self.section.is_none_or(|section| record.section == section)
            && self.version.is_none_or(|version| record.version == version)
            && self
                .blood_group
                .is_none_or(|blood_group| record.blood_group == blood_group)
    }

    pub fn filtered<'a>(
        &self,
        records: impl IntoIterator<Item = &'a StudentRecord>,
    ) -> Vec<&'a StudentRecord> {
        records
            .into_iter()
            .filter(|record| self.matches(record))
            .collect()
    }
}

///Raw filter query, as sent by the dropdowns. Missing and empty both mean unconstrained.
#[derive(Deserialize, Debug, Default)]
pub struct FilterQuery {
    pub class: Option<String>,
    pub section: Option<String>,
    pub version: Option<String>,
    pub blood_group: Option<String>,
    ///sent by the reset button, wins over everything else
    #[serde(default)]
    pub reset: bool,
}

impl TryFrom<FilterQuery> for StudentFilter {
    type Error = crate::error::RosterError;

    fn try_from(
        FilterQuery {
            class,
            section,
            version,
            blood_group,
            reset,
        }: FilterQuery,
    ) -> Result<Self, Self::Error> {
        let mut filter = Self::default();
        for (field, value) in FilterField::ALL
            .into_iter()
            .zip([class, section, version, blood_group])
        {
            if let Some(value) = value {
                filter.set(field, &value)?;
            }
        }
        if reset {
            filter.reset();
        }
        Ok(filter)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn full_names(records: &[&StudentRecord]) -> Vec<String> {
        records.iter().map(|r| r.full_name.clone()).collect()
    }

    #[test]
    fn unconstrained_keeps_everything() {
        let sample = StudentRecord::sample_set();
        let filter = StudentFilter::default();
        assert!(filter.is_unconstrained());
        assert_eq!(filter.filtered(&sample).len(), sample.len());
    }

    #[test]
    fn filters_by_class() {
        let sample = StudentRecord::sample_set();
        let mut filter = StudentFilter::default();

        filter.set(FilterField::Class, "10").unwrap();
        assert_eq!(full_names(&filter.filtered(&sample)), ["John Doe"]);

        filter.set(FilterField::Class, "9").unwrap();
        assert_eq!(full_names(&filter.filtered(&sample)), ["Jane Doe"]);
    }

    #[test]
    fn absent_values_give_an_empty_view() {
        let sample = StudentRecord::sample_set();
        for (field, value) in [
            (FilterField::Class, "PG"),
            (FilterField::Section, "F"),
            (FilterField::BloodGroup, "O-"),
        ] {
            let mut filter = StudentFilter::default();
            filter.set(field, value).unwrap();
            assert!(filter.filtered(&sample).is_empty(), "{field:?} = {value}");
        }
    }

    #[test]
    fn constraints_are_anded() {
        let sample = StudentRecord::sample_set();
        let mut filter = StudentFilter::default();
        filter.set(FilterField::Class, "10").unwrap();
        filter.set(FilterField::Version, "Bangla").unwrap();
        assert!(filter.filtered(&sample).is_empty());

        filter.set(FilterField::Version, "English").unwrap();
        filter.set(FilterField::BloodGroup, "O+").unwrap();
        assert_eq!(full_names(&filter.filtered(&sample)), ["John Doe"]);
    }

    #[test]
    fn empty_value_clears_one_field_only() {
        let mut filter = StudentFilter::default();
        filter.set(FilterField::Class, "10").unwrap();
        filter.set(FilterField::Section, "A").unwrap();
        filter.set(FilterField::Class, "").unwrap();

        assert_eq!(filter.class, None);
        assert_eq!(filter.section, Some(Section::A));
    }

    #[test]
    fn reset_restores_everything() {
        let sample = StudentRecord::sample_set();
        let mut filter = StudentFilter::default();
        filter.set(FilterField::Class, "PG").unwrap();
        filter.set(FilterField::Section, "C").unwrap();
        filter.set(FilterField::Version, "Bangla").unwrap();
        filter.set(FilterField::BloodGroup, "B-").unwrap();
        assert!(filter.filtered(&sample).is_empty());

        filter.reset();
        assert!(filter.is_unconstrained());
        assert_eq!(filter.filtered(&sample).len(), sample.len());
    }

    #[test]
    fn invalid_value_is_rejected_and_leaves_filter_alone() {
        let mut filter = StudentFilter::default();
        filter.set(FilterField::Section, "B").unwrap();
        assert!(filter.set(FilterField::Section, "Z").is_err());
        assert_eq!(filter.section, Some(Section::B));
    }

    #[test]
    fn from_query() {
        let filter = StudentFilter::try_from(FilterQuery {
            class: Some(String::new()),
            section: Some("B".into()),
            version: None,
            blood_group: Some("AB+".into()),
            reset: false,
        })
        .unwrap();

        assert_eq!(
            filter,
            StudentFilter {
                class: None,
                section: Some(Section::B),
                version: None,
                blood_group: Some(BloodGroup::AbPositive),
            }
        );
        assert_eq!(filter.selected(FilterField::BloodGroup), "AB+");
        assert_eq!(filter.selected(FilterField::Class), "");
    }

    #[test]
    fn reset_in_query_wins() {
        let filter = StudentFilter::try_from(FilterQuery {
            class: Some("10".into()),
            section: Some("A".into()),
            reset: true,
            ..FilterQuery::default()
        })
        .unwrap();
        assert!(filter.is_unconstrained());
    }
}
