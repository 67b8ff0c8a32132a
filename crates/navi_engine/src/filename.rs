use navi_core::{ApplicationForm, Listing};

const NAME_LIMIT: usize = 80;

/// Download name for an application: `{Management}_Application.html` for
/// rentals, `{Company}_Application_{Applicant}.html` for jobs. Whitespace
/// becomes `_` and the result is safe on every desktop file system.
pub fn application_filename(form: &ApplicationForm) -> String {
    let stem = match &form.listing {
        Listing::Housing(home) => format!("{}_Application", home.management),
        Listing::Job(job) => format!("{}_Application_{}", job.company, form.signature),
    };
    format!("{}.html", sanitize_stem(&stem))
}

fn sanitize_stem(input: &str) -> String {
    let replaced: String = input
        .chars()
        .map(|c| {
            if c.is_whitespace() || is_forbidden(c) {
                '_'
            } else {
                c
            }
        })
        .collect();

    let mut compacted = String::with_capacity(replaced.len());
    for c in replaced.chars() {
        if c == '_' && compacted.ends_with('_') {
            continue;
        }
        compacted.push(c);
    }

    let mut name: String = compacted
        .trim_matches(&['_', '.'][..])
        .chars()
        .take(NAME_LIMIT)
        .collect();
    if name.is_empty() {
        name = "Application".to_string();
    }
    if is_reserved_windows_name(&name) {
        name.push('_');
    }
    name
}

fn is_forbidden(c: char) -> bool {
    matches!(c, '\\' | '/' | ':' | '*' | '?' | '"' | '<' | '>' | '|' | '\0'..='\u{1F}')
}

fn is_reserved_windows_name(name: &str) -> bool {
    const RESERVED: &[&str] = &[
        "CON", "PRN", "AUX", "NUL", "COM1", "COM2", "COM3", "COM4", "COM5", "COM6", "COM7", "COM8",
        "COM9", "LPT1", "LPT2", "LPT3", "LPT4", "LPT5", "LPT6", "LPT7", "LPT8", "LPT9",
    ];
    RESERVED.iter().any(|r| r.eq_ignore_ascii_case(name))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stems_collapse_separators() {
        assert_eq!(sanitize_stem("Lakeview  Property Management_Application"), "Lakeview_Property_Management_Application");
        assert_eq!(sanitize_stem("A/B: C?"), "A_B_C");
        assert_eq!(sanitize_stem("  "), "Application");
        assert_eq!(sanitize_stem("nul"), "nul_");
    }
}
