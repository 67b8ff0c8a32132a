//! Read-only job and housing catalogs shown as search results.
use url::Url;

use crate::Service;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct JobListing {
    pub id: u32,
    pub title: &'static str,
    pub company: &'static str,
    pub location: &'static str,
    pub salary: &'static str,
    pub employment_type: &'static str,
    pub description: &'static str,
    pub benefits: &'static [&'static str],
    pub apply_url: &'static str,
}

impl JobListing {
    pub fn apply_link(&self) -> Result<Url, url::ParseError> {
        Url::parse(self.apply_url)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HousingListing {
    pub id: u32,
    pub name: &'static str,
    pub location: &'static str,
    pub rent_per_month: u32,
    pub bedrooms: u8,
    pub bathrooms: u8,
    pub features: &'static [&'static str],
    pub description: &'static str,
    pub management: &'static str,
    pub address: &'static str,
    pub unit_name: &'static str,
    pub rent_due: &'static str,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Listing {
    Job(JobListing),
    Housing(HousingListing),
}

impl Listing {
    pub fn key(&self) -> ListingKey {
        match self {
            Listing::Job(job) => ListingKey {
                kind: Service::Job,
                id: job.id,
            },
            Listing::Housing(home) => ListingKey {
                kind: Service::Housing,
                id: home.id,
            },
        }
    }

    pub fn title(&self) -> &'static str {
        match self {
            Listing::Job(job) => job.title,
            Listing::Housing(home) => home.name,
        }
    }
}

/// Identifies a catalog entry across both catalogs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ListingKey {
    pub kind: Service,
    pub id: u32,
}

/// The catalog for `kind`, always in the same order.
pub fn listings(kind: Service) -> Vec<Listing> {
    match kind {
        Service::Job => JOBS.iter().copied().map(Listing::Job).collect(),
        Service::Housing => HOMES.iter().copied().map(Listing::Housing).collect(),
    }
}

pub fn find_listing(key: ListingKey) -> Option<Listing> {
    match key.kind {
        Service::Job => JOBS
            .iter()
            .find(|job| job.id == key.id)
            .copied()
            .map(Listing::Job),
        Service::Housing => HOMES
            .iter()
            .find(|home| home.id == key.id)
            .copied()
            .map(Listing::Housing),
    }
}

const JOBS: &[JobListing] = &[
    JobListing {
        id: 1,
        title: "Senior Data Scientist",
        company: "XYZ Company",
        location: "Chicago, IL",
        salary: "$140,000 - $180,000",
        employment_type: "Full-time",
        description: "Join our data science team to build innovative solutions.",
        benefits: &["Health Insurance", "Transportation", "401k"],
        apply_url: "https://linkedin.com/jobs/view/3801234567",
    },
    JobListing {
        id: 2,
        title: "Lead Data Scientist",
        company: "ABC Company",
        location: "Chicago, IL",
        salary: "$160,000 - $200,000",
        employment_type: "Full-time",
        description: "Lead a team of data scientists in cutting-edge projects.",
        benefits: &["Health Insurance", "Remote Work", "Stock Options"],
        apply_url: "https://linkedin.com/jobs/view/3801234568",
    },
    JobListing {
        id: 3,
        title: "Senior Data Scientist",
        company: "Dr Stone LLC",
        location: "Naperville, IL",
        salary: "$135,000 - $175,000",
        employment_type: "Full-time",
        description: "Work on machine learning models for healthcare.",
        benefits: &["Health Insurance", "Transportation", "Flexible Hours"],
        apply_url: "https://linkedin.com/jobs/view/3801234569",
    },
    JobListing {
        id: 4,
        title: "Data Science Manager",
        company: "Mappa Productions",
        location: "Chicago, IL",
        salary: "$170,000 - $220,000",
        employment_type: "Full-time",
        description: "Manage data science initiatives across multiple projects.",
        benefits: &["Health Insurance", "Management Training", "Bonus"],
        apply_url: "https://linkedin.com/jobs/view/3801234570",
    },
    JobListing {
        id: 5,
        title: "Data Scientist",
        company: "Parrot Technologies",
        location: "Chicago, IL",
        salary: "$120,000 - $160,000",
        employment_type: "Full-time",
        description: "Analyze large datasets to drive business decisions.",
        benefits: &["Health Insurance", "Transportation", "Learning Budget"],
        apply_url: "https://linkedin.com/jobs/view/3801234571",
    },
    JobListing {
        id: 6,
        title: "Machine Learning Engineer",
        company: "TechFlow Solutions",
        location: "Chicago, IL",
        salary: "$145,000 - $185,000",
        employment_type: "Full-time",
        description: "Build and deploy machine learning models at scale.",
        benefits: &["Health Insurance", "Flexible Schedule", "Learning Budget"],
        apply_url: "https://linkedin.com/jobs/view/3801234572",
    },
    JobListing {
        id: 7,
        title: "Senior Analytics Specialist",
        company: "DataVision Corp",
        location: "Schaumburg, IL",
        salary: "$125,000 - $165,000",
        employment_type: "Full-time",
        description: "Drive data-driven decision making across the organization.",
        benefits: &["Health Insurance", "Remote Work", "401k Match"],
        apply_url: "https://linkedin.com/jobs/view/3801234573",
    },
    JobListing {
        id: 8,
        title: "AI Research Scientist",
        company: "InnovateLabs",
        location: "Chicago, IL",
        salary: "$155,000 - $195,000",
        employment_type: "Full-time",
        description: "Research and develop next-generation AI algorithms.",
        benefits: &["Health Insurance", "Research Budget", "Publications Support"],
        apply_url: "https://linkedin.com/jobs/view/3801234574",
    },
    JobListing {
        id: 9,
        title: "Business Intelligence Analyst",
        company: "MetroCorp",
        location: "Chicago, IL",
        salary: "$95,000 - $135,000",
        employment_type: "Full-time",
        description: "Create dashboards and reports to support business decisions.",
        benefits: &["Health Insurance", "Training Budget", "Hybrid Work"],
        apply_url: "https://linkedin.com/jobs/view/3801234575",
    },
    JobListing {
        id: 10,
        title: "Data Platform Engineer",
        company: "CloudTech Systems",
        location: "Chicago, IL",
        salary: "$130,000 - $170,000",
        employment_type: "Full-time",
        description: "Build and maintain large-scale data infrastructure.",
        benefits: &["Health Insurance", "Stock Options", "Professional Development"],
        apply_url: "https://linkedin.com/jobs/view/3801234576",
    },
];

const HOMES: &[HousingListing] = &[
    HousingListing {
        id: 1,
        name: "Arcade Apartments",
        location: "Lake, Chicago",
        rent_per_month: 2200,
        bedrooms: 2,
        bathrooms: 2,
        features: &["Furnished", "Near Transit", "Gym", "Pool"],
        description: "Modern apartments with lake views and excellent amenities.",
        management: "Lincoln Park Properties",
        address: "1234 N Lincoln Ave, Chicago, IL 60614",
        unit_name: "Unit 3A",
        rent_due: "1st of every month",
    },
    HousingListing {
        id: 2,
        name: "Lake View Apartments",
        location: "Lake View, Chicago",
        rent_per_month: 2400,
        bedrooms: 2,
        bathrooms: 2,
        features: &["Furnished", "Near Transit", "Pet Friendly", "Rooftop"],
        description: "Beautiful lakefront living with easy access to downtown.",
        management: "Lakeview Living",
        address: "2345 N Clark St, Chicago, IL 60614",
        unit_name: "Unit 8A",
        rent_due: "1st of every month",
    },
    HousingListing {
        id: 3,
        name: "ABC Apartments",
        location: "Loop, Chicago",
        rent_per_month: 2300,
        bedrooms: 2,
        bathrooms: 1,
        features: &["Furnished", "Near Transit", "Gym", "Concierge"],
        description: "Prime downtown location with modern amenities.",
        management: "River North Rentals",
        address: "567 W Grand Ave, Chicago, IL 60654",
        unit_name: "Unit 12B",
        rent_due: "1st of every month",
    },
    HousingListing {
        id: 4,
        name: "1234 N Clark St",
        location: "Chicago",
        rent_per_month: 2100,
        bedrooms: 2,
        bathrooms: 2,
        features: &["Furnished", "Near Transit", "Parking", "Balcony"],
        description: "Spacious apartment with great transportation access.",
        management: "Old Town Estates",
        address: "456 W Division St, Chicago, IL 60610",
        unit_name: "Unit 4D",
        rent_due: "1st of every month",
    },
    HousingListing {
        id: 5,
        name: "1234 W Loop",
        location: "Chicago",
        rent_per_month: 2500,
        bedrooms: 3,
        bathrooms: 2,
        features: &["Furnished", "Near Transit", "Gym", "Storage"],
        description: "Large family-friendly apartment in the heart of the city.",
        management: "Wicker Park Housing",
        address: "890 N Milwaukee Ave, Chicago, IL 60622",
        unit_name: "Unit 5C",
        rent_due: "1st of every month",
    },
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_job_has_a_valid_apply_link() {
        for listing in listings(Service::Job) {
            let Listing::Job(job) = listing else {
                panic!("job catalog returned {listing:?}");
            };
            let link = job.apply_link().expect("valid url");
            assert_eq!(link.scheme(), "https");
        }
    }

    #[test]
    fn find_listing_resolves_keys_from_both_catalogs() {
        let job = find_listing(ListingKey {
            kind: Service::Job,
            id: 4,
        })
        .unwrap();
        assert_eq!(job.title(), "Data Science Manager");

        let home = find_listing(ListingKey {
            kind: Service::Housing,
            id: 2,
        })
        .unwrap();
        assert_eq!(home.title(), "Lake View Apartments");

        assert!(find_listing(ListingKey {
            kind: Service::Housing,
            id: 99,
        })
        .is_none());
    }

    #[test]
    fn keys_round_trip_through_listing() {
        for kind in [Service::Job, Service::Housing] {
            for listing in listings(kind) {
                assert_eq!(find_listing(listing.key()), Some(listing));
            }
        }
    }
}
