use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Child {
    pub name: String,
    pub age: u32,
}

/// Everything the assistant has learned about the user so far.
///
/// All fields start unset. The same type doubles as a partial update for
/// [`UserProfile::merge`]: only the fields that are `Some` are applied.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct UserProfile {
    pub name: Option<String>,
    pub country: Option<String>,
    pub visa_status: Option<String>,
    pub arrival_date: Option<String>,
    pub spouse: Option<String>,
    pub children: Option<Vec<Child>>,
    pub job_type: Option<String>,
    pub skills: Option<String>,
    pub preferred_location: Option<String>,
    pub salary_expectation: Option<String>,
    pub household_info: Option<String>,
    pub has_pets: Option<bool>,
    pub rent_budget: Option<String>,
    pub housing_preferences: Option<String>,
}

impl UserProfile {
    /// Field-wise overwrite-if-present. Unset fields in `partial` leave the
    /// current value alone, so a merge can never clear a field.
    pub fn merge(&mut self, partial: UserProfile) {
        fn take<T>(slot: &mut Option<T>, value: Option<T>) {
            if value.is_some() {
                *slot = value;
            }
        }

        take(&mut self.name, partial.name);
        take(&mut self.country, partial.country);
        take(&mut self.visa_status, partial.visa_status);
        take(&mut self.arrival_date, partial.arrival_date);
        take(&mut self.spouse, partial.spouse);
        take(&mut self.children, partial.children);
        take(&mut self.job_type, partial.job_type);
        take(&mut self.skills, partial.skills);
        take(&mut self.preferred_location, partial.preferred_location);
        take(&mut self.salary_expectation, partial.salary_expectation);
        take(&mut self.household_info, partial.household_info);
        take(&mut self.has_pets, partial.has_pets);
        take(&mut self.rent_budget, partial.rent_budget);
        take(&mut self.housing_preferences, partial.housing_preferences);
    }

    pub fn is_empty(&self) -> bool {
        *self == UserProfile::default()
    }

    pub fn is_set(&self, field: ProfileField) -> bool {
        match field {
            ProfileField::JobType => self.job_type.is_some(),
            ProfileField::Skills => self.skills.is_some(),
            ProfileField::PreferredLocation => self.preferred_location.is_some(),
            ProfileField::SalaryExpectation => self.salary_expectation.is_some(),
            ProfileField::HouseholdInfo => self.household_info.is_some(),
            // Tri-state: an explicit "no pets" counts as answered.
            ProfileField::HasPets => self.has_pets.is_some(),
            ProfileField::RentBudget => self.rent_budget.is_some(),
            ProfileField::HousingPreferences => self.housing_preferences.is_some(),
        }
    }

    /// Name to address the user by in bot lines.
    pub fn display_name(&self) -> &str {
        self.name.as_deref().unwrap_or("there")
    }
}

/// Profile fields collected by the service branches.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ProfileField {
    JobType,
    Skills,
    PreferredLocation,
    SalaryExpectation,
    HouseholdInfo,
    HasPets,
    RentBudget,
    HousingPreferences,
}

impl ProfileField {
    /// Partial profile that records `answer` as this field's value.
    pub fn answer(self, answer: &str) -> UserProfile {
        let text = Some(answer.to_string());
        match self {
            ProfileField::JobType => UserProfile {
                job_type: text,
                ..UserProfile::default()
            },
            ProfileField::Skills => UserProfile {
                skills: text,
                ..UserProfile::default()
            },
            ProfileField::PreferredLocation => UserProfile {
                preferred_location: text,
                ..UserProfile::default()
            },
            ProfileField::SalaryExpectation => UserProfile {
                salary_expectation: text,
                ..UserProfile::default()
            },
            ProfileField::HouseholdInfo => UserProfile {
                household_info: text,
                ..UserProfile::default()
            },
            ProfileField::HasPets => UserProfile {
                has_pets: Some(is_affirmative(answer)),
                ..UserProfile::default()
            },
            ProfileField::RentBudget => UserProfile {
                rent_budget: text,
                ..UserProfile::default()
            },
            ProfileField::HousingPreferences => UserProfile {
                housing_preferences: text,
                ..UserProfile::default()
            },
        }
    }
}

/// First whitespace-delimited token of the introduction.
pub fn first_name(input: &str) -> Option<&str> {
    input.split_whitespace().next()
}

/// Splits the combined "arrival date. visa status" answer on the first `.`.
///
/// Returns `(arrival_date, visa_status)`. Without a period the whole answer is
/// the visa status and the arrival date stays unknown.
pub fn split_arrival_and_visa(input: &str) -> (Option<String>, String) {
    match input.split_once('.') {
        Some((arrival, visa)) => {
            let arrival = arrival.trim();
            let visa = visa.trim();
            let arrival = (!arrival.is_empty()).then(|| arrival.to_string());
            // "H1B." has nothing after the period; keep the answer rather than
            // recording an empty status.
            let visa = if visa.is_empty() {
                input.trim().to_string()
            } else {
                visa.to_string()
            };
            (arrival, visa)
        }
        None => (None, input.trim().to_string()),
    }
}

/// Yes/no classification used for the pets question and follow-up offers.
pub fn is_affirmative(input: &str) -> bool {
    input.to_lowercase().contains("yes")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn merge_overwrites_only_present_fields() {
        let mut profile = UserProfile {
            name: Some("Maria".into()),
            country: Some("Peru".into()),
            ..UserProfile::default()
        };
        profile.merge(UserProfile {
            country: Some("Chile".into()),
            has_pets: Some(false),
            ..UserProfile::default()
        });

        assert_eq!(profile.name.as_deref(), Some("Maria"));
        assert_eq!(profile.country.as_deref(), Some("Chile"));
        assert_eq!(profile.has_pets, Some(false));
    }

    #[test]
    fn split_uses_first_period_only() {
        let (arrival, visa) = split_arrival_and_visa("Jan. 2023. F1 student");
        assert_eq!(arrival.as_deref(), Some("Jan"));
        assert_eq!(visa, "2023. F1 student");
    }

    #[test]
    fn split_without_period_keeps_whole_answer() {
        let (arrival, visa) = split_arrival_and_visa("H1B visa since March 2022");
        assert_eq!(arrival, None);
        assert_eq!(visa, "H1B visa since March 2022");
    }

    #[test]
    fn pets_answer_is_substring_match() {
        assert!(is_affirmative("Yes, a cat"));
        assert!(is_affirmative("oh YES"));
        assert!(!is_affirmative("No pets for us"));
        assert!(!is_affirmative("a dog"));
    }

    #[test]
    fn has_pets_false_counts_as_set() {
        let mut profile = UserProfile::default();
        assert!(!profile.is_set(ProfileField::HasPets));
        profile.merge(ProfileField::HasPets.answer("nope"));
        assert!(profile.is_set(ProfileField::HasPets));
        assert_eq!(profile.has_pets, Some(false));
    }
}
