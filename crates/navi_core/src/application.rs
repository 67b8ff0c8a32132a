use chrono::NaiveDate;

use crate::catalog::Listing;
use crate::profile::{Child, UserProfile};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Applicant {
    pub name: String,
    pub country: String,
    pub visa_status: String,
    pub arrival_date: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Household {
    pub summary: String,
    pub spouse: Option<String>,
    pub children: Vec<Child>,
    pub has_pets: Option<bool>,
}

/// An application for one listing, filled in from the profile.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApplicationForm {
    pub listing: Listing,
    pub applicant: Applicant,
    pub household: Household,
    /// Salary expectation for jobs, rent budget for housing.
    pub expectation: String,
    pub preferences: String,
    pub signature: String,
    pub prepared_on: NaiveDate,
}

const NOT_PROVIDED: &str = "Not provided";

impl ApplicationForm {
    pub fn autofill(profile: &UserProfile, listing: Listing, prepared_on: NaiveDate) -> Self {
        fn or_blank(value: &Option<String>) -> String {
            value.clone().unwrap_or_else(|| NOT_PROVIDED.to_string())
        }

        let (expectation, preferences) = match listing {
            Listing::Job(_) => (
                or_blank(&profile.salary_expectation),
                or_blank(&profile.skills),
            ),
            Listing::Housing(_) => (
                or_blank(&profile.rent_budget),
                or_blank(&profile.housing_preferences),
            ),
        };

        Self {
            listing,
            applicant: Applicant {
                name: or_blank(&profile.name),
                country: or_blank(&profile.country),
                visa_status: or_blank(&profile.visa_status),
                arrival_date: or_blank(&profile.arrival_date),
            },
            household: Household {
                summary: or_blank(&profile.household_info),
                spouse: profile.spouse.clone(),
                children: profile.children.clone().unwrap_or_default(),
                has_pets: profile.has_pets,
            },
            expectation,
            preferences,
            signature: profile.name.clone().unwrap_or_default(),
            prepared_on,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::{find_listing, ListingKey};
    use crate::Service;

    #[test]
    fn housing_form_uses_rent_budget_and_household() {
        let profile = UserProfile {
            name: Some("Maria".into()),
            spouse: Some("Luis".into()),
            children: Some(vec![Child {
                name: "Ana".into(),
                age: 4,
            }]),
            rent_budget: Some("$2,300".into()),
            ..UserProfile::default()
        };
        let listing = find_listing(ListingKey {
            kind: Service::Housing,
            id: 1,
        })
        .unwrap();
        let date = NaiveDate::from_ymd_opt(2024, 5, 1).unwrap();

        let form = ApplicationForm::autofill(&profile, listing, date);

        assert_eq!(form.expectation, "$2,300");
        assert_eq!(form.applicant.country, NOT_PROVIDED);
        assert_eq!(form.household.spouse.as_deref(), Some("Luis"));
        assert_eq!(form.household.children.len(), 1);
        assert_eq!(form.signature, "Maria");
    }
}
