//! HTML renditions of autofilled applications.
use navi_core::{ApplicationForm, HousingListing, JobListing, Listing};

const STYLE: &str = "body { font-family: Arial, sans-serif; margin: 20px; }
.header { text-align: center; margin-bottom: 30px; }
.section { margin-bottom: 25px; }
.section-title { background-color: #f0f0f0; padding: 8px; margin-bottom: 15px; font-weight: bold; }
.field { margin-bottom: 10px; }
.field-label { font-weight: bold; margin-right: 10px; }
.family-member { border: 1px solid #ddd; padding: 10px; margin-bottom: 10px; }";

/// Renders the form as a standalone HTML document. All text is escaped.
pub fn render_application(form: &ApplicationForm) -> String {
    let mut page = Page::default();
    match &form.listing {
        Listing::Job(job) => job_application(&mut page, form, job),
        Listing::Housing(home) => rental_application(&mut page, form, home),
    }
    page.finish()
}

fn job_application(page: &mut Page, form: &ApplicationForm, job: &JobListing) {
    page.header("Job Application", job.company, job.title);

    page.section("Position");
    page.field("Title", job.title);
    page.field("Company", job.company);
    page.field("Location", job.location);
    page.field("Salary", job.salary);
    page.field("Employment Type", job.employment_type);
    page.field("Apply At", job.apply_url);
    page.end_section();

    applicant(page, form);

    page.section("Expectations");
    page.field("Salary Expectation", &form.expectation);
    page.field("Skills and Experience", &form.preferences);
    page.end_section();

    declaration(page, form, "the employer to verify my work authorization and references");
}

fn rental_application(page: &mut Page, form: &ApplicationForm, home: &HousingListing) {
    page.header("Housing Rental Application", home.management, "Rental Application");

    page.section("Apartment/Unit Details");
    page.field("Address", home.address);
    page.field("Unit Name", home.unit_name);
    page.field("Rental Amount", &format!("${}/month", home.rent_per_month));
    page.field("Rent Due Date", home.rent_due);
    page.end_section();

    applicant(page, form);

    page.section("Family Details");
    page.field("Household", &form.household.summary);
    if let Some(spouse) = &form.household.spouse {
        page.field("Spouse", spouse);
    }
    for (index, child) in form.household.children.iter().enumerate() {
        page.raw("<div class=\"family-member\">");
        page.raw(&format!("<h4>Family Member {}</h4>", index + 1));
        page.field("Name", &child.name);
        page.field("Age", &child.age.to_string());
        page.raw("</div>");
    }
    let pets = match form.household.has_pets {
        Some(true) => "Yes",
        Some(false) => "No",
        None => "Not provided",
    };
    page.field("Pets", pets);
    page.end_section();

    page.section("Preferences");
    page.field("Maximum Rent", &form.expectation);
    page.field("Housing Preferences", &form.preferences);
    page.end_section();

    declaration(
        page,
        form,
        "the management to pull my credit history and verify the information provided",
    );
}

fn applicant(page: &mut Page, form: &ApplicationForm) {
    page.section("Applicant Details");
    page.field("Name", &form.applicant.name);
    page.field("Country of Origin", &form.applicant.country);
    page.field("Visa Status", &form.applicant.visa_status);
    page.field("Arrival Date", &form.applicant.arrival_date);
    page.end_section();
}

fn declaration(page: &mut Page, form: &ApplicationForm, authority: &str) {
    page.section("Declaration");
    page.raw(&format!(
        "<p>I, {}, hereby declare that all the above information is true to my knowledge. \
I hereby give authority to {}.</p>",
        escape_html(&form.applicant.name),
        escape_html(authority)
    ));
    page.end_section();

    page.raw("<div class=\"section\">");
    page.field("Signature", &form.signature);
    page.field("Date", &form.prepared_on.format("%Y-%m-%d").to_string());
    page.raw("</div>");
}

#[derive(Default)]
struct Page {
    head: String,
    body: String,
}

impl Page {
    fn header(&mut self, title: &str, heading: &str, subheading: &str) {
        self.head = format!(
            "<title>{}</title>\n<style>\n{STYLE}\n</style>",
            escape_html(title)
        );
        self.raw(&format!(
            "<div class=\"header\"><h1>{}</h1><h2>{}</h2></div>",
            escape_html(heading),
            escape_html(subheading)
        ));
    }

    fn section(&mut self, title: &str) {
        self.raw(&format!(
            "<div class=\"section\"><div class=\"section-title\">{}</div>",
            escape_html(title)
        ));
    }

    fn end_section(&mut self) {
        self.raw("</div>");
    }

    fn field(&mut self, label: &str, value: &str) {
        self.raw(&format!(
            "<div class=\"field\"><span class=\"field-label\">{}:</span> {}</div>",
            escape_html(label),
            escape_html(value)
        ));
    }

    fn raw(&mut self, html: &str) {
        self.body.push_str(html);
        self.body.push('\n');
    }

    fn finish(self) -> String {
        format!(
            "<!DOCTYPE html>\n<html>\n<head>\n<meta charset=\"utf-8\">\n{}\n</head>\n<body>\n{}</body>\n</html>\n",
            self.head, self.body
        )
    }
}

pub fn escape_html(input: &str) -> String {
    let mut escaped = String::with_capacity(input.len());
    for c in input.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            _ => escaped.push(c),
        }
    }
    escaped
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn escapes_markup_characters() {
        assert_eq!(
            escape_html(r#"<a href="x">Tom & 'Jerry'</a>"#),
            "&lt;a href=&quot;x&quot;&gt;Tom &amp; &#39;Jerry&#39;&lt;/a&gt;"
        );
    }
}
