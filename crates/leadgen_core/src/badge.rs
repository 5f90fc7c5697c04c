/// Visual category for a job's source column. Presentation only.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SourceBadge {
    LinkedIn,
    Indeed,
    Glassdoor,
    ZipRecruiter,
    GoogleJobs,
    JSearch,
    Jobright,
    Other,
}

// Checked in order; the first fragment contained in the source name wins.
const BADGE_FRAGMENTS: &[(&str, SourceBadge)] = &[
    ("linkedin", SourceBadge::LinkedIn),
    ("indeed", SourceBadge::Indeed),
    ("glassdoor", SourceBadge::Glassdoor),
    ("ziprecruiter", SourceBadge::ZipRecruiter),
    ("google", SourceBadge::GoogleJobs),
    ("jsearch", SourceBadge::JSearch),
    ("jobright", SourceBadge::Jobright),
];

pub fn classify_source(source: &str) -> SourceBadge {
    let lowered = source.to_lowercase();
    BADGE_FRAGMENTS
        .iter()
        .find(|(fragment, _)| lowered.contains(fragment))
        .map(|(_, badge)| *badge)
        .unwrap_or(SourceBadge::Other)
}

impl SourceBadge {
    pub fn tag(self) -> &'static str {
        match self {
            SourceBadge::LinkedIn => "in",
            SourceBadge::Indeed => "ind",
            SourceBadge::Glassdoor => "gd",
            SourceBadge::ZipRecruiter => "zip",
            SourceBadge::GoogleJobs => "ggl",
            SourceBadge::JSearch => "js",
            SourceBadge::Jobright => "jr",
            SourceBadge::Other => "--",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn match_is_case_insensitive_substring() {
        assert_eq!(classify_source("LinkedIn Jobs"), SourceBadge::LinkedIn);
        assert_eq!(classify_source("via INDEED.com"), SourceBadge::Indeed);
        assert_eq!(classify_source("Google Jobs"), SourceBadge::GoogleJobs);
    }

    #[test]
    fn earlier_fragment_wins() {
        assert_eq!(classify_source("Indeed via LinkedIn"), SourceBadge::LinkedIn);
    }

    #[test]
    fn unknown_sources_get_default() {
        assert_eq!(classify_source("Company Careers Page"), SourceBadge::Other);
        assert_eq!(classify_source(""), SourceBadge::Other);
    }
}
