// Stored user profiles. Flows never read from here; clients fetch a profile
// and pass the relevant parts as flow input.

pub mod handlers;
pub mod store;

use crate::dispatch::flow::{require_text, ValidationError};
use crate::models::profile::Profile;

pub fn validate_profile(profile: &Profile) -> Result<(), ValidationError> {
    require_text("fullName", &profile.full_name)?;
    if !profile.email.contains('@') {
        return Err(ValidationError::new("email", "must be an email address"));
    }
    for (i, record) in profile.education.iter().enumerate() {
        require_text(&format!("education[{i}].institution"), &record.institution)?;
        if let (Some(start), Some(end)) = (record.start_year, record.end_year) {
            if end < start {
                return Err(ValidationError::new(
                    format!("education[{i}].endYear"),
                    "must not be before startYear",
                ));
            }
        }
    }
    for (i, job) in profile.work_experience.iter().enumerate() {
        require_text(&format!("workExperience[{i}].company"), &job.company)?;
        require_text(&format!("workExperience[{i}].role"), &job.role)?;
    }
    Ok(())
}
