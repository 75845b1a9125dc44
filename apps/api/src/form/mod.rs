// Resume Form — typed edit actions and the copy-on-write reducer that turns
// one action plus the current `ResumeData` into the next value.

pub mod handlers;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::models::resume::{Education, Experience, ResumeData};

#[derive(Debug, Error, PartialEq)]
pub enum FormError {
    #[error("No {list} entry at index {index} (list has {len})")]
    IndexOutOfRange {
        list: &'static str,
        index: usize,
        len: usize,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ScalarField {
    FullName,
    Email,
    Phone,
    Location,
    Summary,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ExperienceField {
    Company,
    Position,
    Duration,
    Description,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum EducationField {
    School,
    Degree,
    Year,
}

/// One user edit. Wire form: `{"action": "update_experience", "index": 0, ...}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "action", rename_all = "snake_case")]
pub enum FormAction {
    SetField {
        field: ScalarField,
        value: String,
    },
    AddExperience,
    RemoveExperience {
        index: usize,
    },
    UpdateExperience {
        index: usize,
        field: ExperienceField,
        value: String,
    },
    AddEducation,
    RemoveEducation {
        index: usize,
    },
    UpdateEducation {
        index: usize,
        field: EducationField,
        value: String,
    },
    /// Raw comma-separated skills text as typed by the user.
    SetSkills {
        raw: String,
    },
}

/// Splits comma-separated input, trimming each segment and dropping empties.
/// Order and duplicates are preserved.
pub fn parse_skills(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}

/// Returns the next resume value. `data` is never modified.
pub fn apply_action(data: &ResumeData, action: FormAction) -> Result<ResumeData, FormError> {
    let mut next = data.clone();

    match action {
        FormAction::SetField { field, value } => {
            let slot = match field {
                ScalarField::FullName => &mut next.full_name,
                ScalarField::Email => &mut next.email,
                ScalarField::Phone => &mut next.phone,
                ScalarField::Location => &mut next.location,
                ScalarField::Summary => &mut next.summary,
            };
            *slot = value;
        }
        FormAction::AddExperience => next.experience.push(Experience::default()),
        FormAction::RemoveExperience { index } => remove_at(&mut next.experience, index),
        FormAction::UpdateExperience {
            index,
            field,
            value,
        } => {
            let len = next.experience.len();
            let entry = next
                .experience
                .get_mut(index)
                .ok_or(FormError::IndexOutOfRange {
                    list: "experience",
                    index,
                    len,
                })?;
            match field {
                ExperienceField::Company => entry.company = value,
                ExperienceField::Position => entry.position = value,
                ExperienceField::Duration => entry.duration = value,
                ExperienceField::Description => entry.description = value,
            }
        }
        FormAction::AddEducation => next.education.push(Education::default()),
        FormAction::RemoveEducation { index } => remove_at(&mut next.education, index),
        FormAction::UpdateEducation {
            index,
            field,
            value,
        } => {
            let len = next.education.len();
            let entry = next
                .education
                .get_mut(index)
                .ok_or(FormError::IndexOutOfRange {
                    list: "education",
                    index,
                    len,
                })?;
            match field {
                EducationField::School => entry.school = value,
                EducationField::Degree => entry.degree = value,
                EducationField::Year => entry.year = value,
            }
        }
        FormAction::SetSkills { raw } => next.skills = parse_skills(&raw),
    }

    Ok(next)
}

// Out-of-range removal is a no-op, same as filtering by position.
fn remove_at<T>(list: &mut Vec<T>, index: usize) {
    if index < list.len() {
        list.remove(index);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn experience(company: &str) -> Experience {
        Experience {
            company: company.to_string(),
            position: format!("{company} engineer"),
            duration: "2020 - Present".to_string(),
            description: format!("Worked at {company}"),
        }
    }

    fn with_experience(companies: &[&str]) -> ResumeData {
        ResumeData {
            experience: companies.iter().map(|c| experience(c)).collect(),
            ..Default::default()
        }
    }

    #[test]
    fn test_parse_skills_drops_blank_segments() {
        assert_eq!(parse_skills("Go, Rust,  , C++"), vec!["Go", "Rust", "C++"]);
    }

    #[test]
    fn test_parse_skills_keeps_duplicates_and_order() {
        assert_eq!(parse_skills("Rust,Go,Rust"), vec!["Rust", "Go", "Rust"]);
    }

    #[test]
    fn test_parse_skills_empty_input() {
        assert!(parse_skills("").is_empty());
        assert!(parse_skills(" , ,").is_empty());
    }

    #[test]
    fn test_set_field_does_not_touch_previous_value() {
        let before = ResumeData::default();
        let after = apply_action(
            &before,
            FormAction::SetField {
                field: ScalarField::Location,
                value: "Berlin".to_string(),
            },
        )
        .unwrap();

        assert_eq!(after.location, "Berlin");
        assert_eq!(before.location, "");
    }

    #[test]
    fn test_remove_middle_experience_shifts_later_entries() {
        let before = with_experience(&["A", "B", "C"]);
        let after = apply_action(&before, FormAction::RemoveExperience { index: 1 }).unwrap();

        assert_eq!(after.experience, vec![experience("A"), experience("C")]);
        assert_eq!(before.experience.len(), 3);
    }

    #[test]
    fn test_remove_out_of_range_is_noop() {
        let before = with_experience(&["A"]);
        let after = apply_action(&before, FormAction::RemoveExperience { index: 5 }).unwrap();
        assert_eq!(after, before);
    }

    #[test]
    fn test_add_experience_appends_blank_entry() {
        let before = with_experience(&["A"]);
        let after = apply_action(&before, FormAction::AddExperience).unwrap();
        assert_eq!(after.experience.len(), 2);
        assert_eq!(after.experience[1], Experience::default());
    }

    #[test]
    fn test_update_experience_changes_one_field() {
        let before = with_experience(&["A", "B"]);
        let after = apply_action(
            &before,
            FormAction::UpdateExperience {
                index: 1,
                field: ExperienceField::Duration,
                value: "2019".to_string(),
            },
        )
        .unwrap();

        assert_eq!(after.experience[1].duration, "2019");
        assert_eq!(after.experience[1].company, "B");
        assert_eq!(after.experience[0], before.experience[0]);
    }

    #[test]
    fn test_update_out_of_range_is_rejected() {
        let err = apply_action(
            &ResumeData::default(),
            FormAction::UpdateEducation {
                index: 0,
                field: EducationField::School,
                value: "MIT".to_string(),
            },
        )
        .unwrap_err();

        assert_eq!(
            err,
            FormError::IndexOutOfRange {
                list: "education",
                index: 0,
                len: 0
            }
        );
    }

    #[test]
    fn test_education_lifecycle() {
        let data = apply_action(&ResumeData::default(), FormAction::AddEducation).unwrap();
        let data = apply_action(&data, FormAction::AddEducation).unwrap();
        let data = apply_action(
            &data,
            FormAction::UpdateEducation {
                index: 1,
                field: EducationField::Degree,
                value: "BSc".to_string(),
            },
        )
        .unwrap();
        let data = apply_action(&data, FormAction::RemoveEducation { index: 0 }).unwrap();

        assert_eq!(data.education.len(), 1);
        assert_eq!(data.education[0].degree, "BSc");
    }

    #[test]
    fn test_set_skills_parses_raw_text() {
        let data = apply_action(
            &ResumeData::default(),
            FormAction::SetSkills {
                raw: "Go, Rust,  , C++".to_string(),
            },
        )
        .unwrap();
        assert_eq!(data.skills, vec!["Go", "Rust", "C++"]);
    }

    #[test]
    fn test_action_wire_format() {
        let json = r#"{"action": "update_experience", "index": 2, "field": "position", "value": "Lead"}"#;
        let action: FormAction = serde_json::from_str(json).unwrap();
        assert_eq!(
            action,
            FormAction::UpdateExperience {
                index: 2,
                field: ExperienceField::Position,
                value: "Lead".to_string(),
            }
        );

        let json = r#"{"action": "set_field", "field": "fullName", "value": "Ada"}"#;
        let action: FormAction = serde_json::from_str(json).unwrap();
        assert!(matches!(
            action,
            FormAction::SetField {
                field: ScalarField::FullName,
                ..
            }
        ));
    }
}
