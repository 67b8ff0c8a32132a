//! Question tables for the service branches.
//!
//! Each branch is one ordered table. The next question is always the first
//! one whose profile field is still unset, so a field answered earlier (for
//! example a preferred location given during the job search) is never asked
//! again in another branch.
use crate::profile::{ProfileField, UserProfile};
use crate::{prompts, Service};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Question {
    pub field: ProfileField,
    pub prompt: &'static str,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Branch {
    pub service: Service,
    pub questions: &'static [Question],
    /// Asked once every field is known; the search starts on the answer.
    /// Without one, the search starts as soon as the last field is set.
    pub closing_prompt: Option<&'static str>,
    pub loading_prompt: &'static str,
    pub loading_steps: &'static [&'static str],
}

/// What the bot does after a branch turn.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BranchStep {
    Ask(&'static str),
    StartSearch,
}

const JOB_BRANCH: Branch = Branch {
    service: Service::Job,
    questions: &[
        Question {
            field: ProfileField::JobType,
            prompt: prompts::JOB_TYPE_QUESTION,
        },
        Question {
            field: ProfileField::Skills,
            prompt: prompts::SKILLS_QUESTION,
        },
        Question {
            field: ProfileField::PreferredLocation,
            prompt: prompts::WORK_LOCATION_QUESTION,
        },
        Question {
            field: ProfileField::SalaryExpectation,
            prompt: prompts::SALARY_QUESTION,
        },
    ],
    closing_prompt: Some(prompts::JOB_CLOSING_QUESTION),
    loading_prompt: prompts::JOB_LOADING,
    loading_steps: prompts::JOB_LOADING_STEPS,
};

const HOUSING_BRANCH: Branch = Branch {
    service: Service::Housing,
    questions: &[
        Question {
            field: ProfileField::HouseholdInfo,
            prompt: prompts::HOUSEHOLD_QUESTION,
        },
        Question {
            field: ProfileField::PreferredLocation,
            prompt: prompts::HOME_LOCATION_QUESTION,
        },
        Question {
            field: ProfileField::HasPets,
            prompt: prompts::PETS_QUESTION,
        },
        Question {
            field: ProfileField::RentBudget,
            prompt: prompts::RENT_QUESTION,
        },
        Question {
            field: ProfileField::HousingPreferences,
            prompt: prompts::HOUSING_PREFERENCES_QUESTION,
        },
    ],
    closing_prompt: None,
    loading_prompt: prompts::HOUSING_LOADING,
    loading_steps: prompts::HOUSING_LOADING_STEPS,
};

pub fn branch(service: Service) -> &'static Branch {
    match service {
        Service::Job => &JOB_BRANCH,
        Service::Housing => &HOUSING_BRANCH,
    }
}

impl Branch {
    /// First question whose field is unset.
    pub fn next_question(&self, profile: &UserProfile) -> Option<&'static Question> {
        self.questions
            .iter()
            .find(|question| !profile.is_set(question.field))
    }

    pub fn is_complete(&self, profile: &UserProfile) -> bool {
        self.next_question(profile).is_none()
    }

    /// What to say given the profile as it stands after this turn's update.
    pub fn step_for(&self, profile: &UserProfile) -> BranchStep {
        match (self.next_question(profile), self.closing_prompt) {
            (Some(question), _) => BranchStep::Ask(question.prompt),
            (None, Some(closing)) => BranchStep::Ask(closing),
            (None, None) => BranchStep::StartSearch,
        }
    }

    /// Handles one free-text answer: the first unset field takes the whole
    /// answer, and nothing else is touched.
    pub fn answer(&self, profile: &UserProfile, input: &str) -> (Option<UserProfile>, BranchStep) {
        let Some(question) = self.next_question(profile) else {
            return (None, BranchStep::StartSearch);
        };
        let update = question.field.answer(input);
        let mut after = profile.clone();
        after.merge(update.clone());
        (Some(update), self.step_for(&after))
    }
}

/// Cards offered in the service-selection step.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ServiceCard {
    JobSearch,
    HousingSearch,
    ChildCare,
    Financial,
    Education,
    CommunityIntegration,
    FormsSubmission,
}

impl ServiceCard {
    pub const ALL: [ServiceCard; 7] = [
        ServiceCard::JobSearch,
        ServiceCard::HousingSearch,
        ServiceCard::ChildCare,
        ServiceCard::Financial,
        ServiceCard::Education,
        ServiceCard::CommunityIntegration,
        ServiceCard::FormsSubmission,
    ];

    pub fn label(self) -> &'static str {
        match self {
            ServiceCard::JobSearch => "Job Search",
            ServiceCard::HousingSearch => "Housing Search",
            ServiceCard::ChildCare => "Child Care",
            ServiceCard::Financial => "Financial",
            ServiceCard::Education => "Education",
            ServiceCard::CommunityIntegration => "Community Integration",
            ServiceCard::FormsSubmission => "Forms Submission",
        }
    }

    /// The branch behind this card, if one exists yet.
    pub fn service(self) -> Option<Service> {
        match self {
            ServiceCard::JobSearch => Some(Service::Job),
            ServiceCard::HousingSearch => Some(Service::Housing),
            _ => None,
        }
    }

    pub fn from_label(label: &str) -> Option<ServiceCard> {
        let label = label.trim();
        ServiceCard::ALL
            .into_iter()
            .find(|card| card.label().eq_ignore_ascii_case(label))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn job_branch_asks_closing_question_before_searching() {
        let job = branch(Service::Job);
        let profile = UserProfile {
            job_type: Some("nurse".into()),
            skills: Some("ICU".into()),
            preferred_location: Some("Chicago".into()),
            ..UserProfile::default()
        };

        let (update, step) = job.answer(&profile, "$80k");
        assert_eq!(update.unwrap().salary_expectation.as_deref(), Some("$80k"));
        assert_eq!(step, BranchStep::Ask(prompts::JOB_CLOSING_QUESTION));

        let mut done = profile.clone();
        done.salary_expectation = Some("$80k".into());
        assert_eq!(job.answer(&done, "no"), (None, BranchStep::StartSearch));
    }

    #[test]
    fn housing_branch_searches_right_after_last_answer() {
        let housing = branch(Service::Housing);
        let profile = UserProfile {
            household_info: Some("two adults".into()),
            preferred_location: Some("Loop".into()),
            has_pets: Some(false),
            rent_budget: Some("$2,000".into()),
            ..UserProfile::default()
        };

        let (update, step) = housing.answer(&profile, "near a park");
        assert_eq!(
            update.unwrap().housing_preferences.as_deref(),
            Some("near a park")
        );
        assert_eq!(step, BranchStep::StartSearch);
    }

    #[test]
    fn shared_location_is_skipped_in_second_branch() {
        let housing = branch(Service::Housing);
        let profile = UserProfile {
            household_info: Some("just me".into()),
            preferred_location: Some("Chicago".into()),
            ..UserProfile::default()
        };

        let question = housing.next_question(&profile).unwrap();
        assert_eq!(question.field, ProfileField::HasPets);
    }

    #[test]
    fn cards_parse_from_labels() {
        assert_eq!(
            ServiceCard::from_label(" housing search "),
            Some(ServiceCard::HousingSearch)
        );
        assert_eq!(ServiceCard::from_label("Child Care").unwrap().service(), None);
        assert_eq!(ServiceCard::from_label("plumbing"), None);
    }
}
