//! Common regex patterns and keyword sets for business card extraction.

use lazy_static::lazy_static;
use regex::Regex;

/// Words that mark a line as a job title.
pub const JOB_TITLE_KEYWORDS: &[&str] = &[
    "manager", "director", "engineer", "developer", "designer", "analyst",
    "consultant", "specialist", "coordinator", "administrator", "president",
    "vp", "vice president", "ceo", "cto", "cfo", "coo", "cio", "chief",
    "officer", "lead", "head of", "senior", "junior", "associate",
    "architect", "supervisor", "executive", "founder", "co-founder", "partner",
    "assistant", "secretary", "intern", "technician", "representative",
    "accountant", "attorney", "lawyer", "professor", "teacher", "nurse",
    "realtor", "broker", "agent", "planner", "strategist", "advisor",
    "recruiter", "buyer", "owner", "proprietor", "principal",
    "superintendent", "foreman", "captain", "sergeant", "lieutenant",
];

/// Words that mark a line as an organization name.
pub const COMPANY_INDICATORS: &[&str] = &[
    "inc", "inc.", "llc", "ltd", "ltd.", "corp", "corp.", "corporation",
    "company", "co.", "group", "holdings", "solutions", "services",
    "technologies", "technology", "tech", "consulting", "enterprises",
    "associates", "international", "industries", "agency", "studio",
    "studios", "labs", "laboratory", "laboratories", "partners",
    "foundation", "institute", "university", "college", "school",
    "hospital", "clinic", "medical", "dental", "law firm", "firm",
    "bank", "financial", "insurance", "realty", "properties",
    "construction", "builders", "electric", "plumbing", "roofing",
    "landscaping", "automotive", "motors", "church", "ministries",
    "software",
];

/// Words that mark a line as part of a postal address.
pub const ADDRESS_KEYWORDS: &[&str] = &[
    "street", "st.", "ave", "avenue", "blvd", "boulevard", "road", "rd.",
    "drive", "dr.", "lane", "ln.", "way", "suite", "ste.", "ste",
    "floor", "fl.", "#", "box", "p.o.", "po box", "unit", "apt",
    "building", "bldg", "place", "pl.", "court", "ct.", "circle",
    "parkway", "pkwy", "highway", "hwy",
];

lazy_static! {
    // Email: local@domain.tld
    pub static ref EMAIL: Regex = Regex::new(
        r"[a-zA-Z0-9._%+\-]+@[a-zA-Z0-9.\-]+\.[a-zA-Z]{2,}"
    ).unwrap();

    pub static ref EMAIL_EXACT: Regex = Regex::new(
        r"^[a-zA-Z0-9._%+\-]+@[a-zA-Z0-9.\-]+\.[a-zA-Z]{2,}$"
    ).unwrap();

    // Bare phone, finds numbers even when jammed together
    pub static ref PHONE: Regex = Regex::new(
        r"(?:\+\d{1,3}[\s.\-]?)?(?:\(?\d{3}\)?[\s.\-]?)?\d{3}[\s.\-]?\d{4}"
    ).unwrap();

    // Labeled phone ("CO: (608)...", "C: (720)..."), number in group 1
    pub static ref LABELED_PHONE: Regex = Regex::new(
        r"(?i)(?:phone|tel|cell|mobile|fax|office|direct|ph|co|c|m|f|o|d|t)\s*[:.]?\s*(\(?\d{3}\)?[\s.\-]?\d{3}[\s.\-]?\d{4})"
    ).unwrap();

    pub static ref WEBSITE: Regex = Regex::new(
        r"(?:https?://)?(?:www\.)?[a-zA-Z0-9][\w\-]*\.[a-zA-Z]{2,}(?:\.[a-zA-Z]{2,})?(?:/[^\s]*)?"
    ).unwrap();

    // Street number, street name, street-type suffix
    pub static ref ADDRESS_NUMBER_STREET: Regex = Regex::new(
        r"(?i)\d+\s+[\w\s]+(?:street|st|avenue|ave|boulevard|blvd|road|rd|drive|dr|lane|ln|way|place|pl|court|ct|circle|cir|parkway|pkwy)\b"
    ).unwrap();

    pub static ref STATE_ZIP: Regex = Regex::new(
        r"\b[A-Z]{2}[\s,]+\d{5}(?:-\d{4})?\b"
    ).unwrap();

    // "Springfield, IL 62704"
    pub static ref CITY_STATE_ZIP: Regex = Regex::new(
        r"[A-Za-z]+,?\s+[A-Z]{2}\s+\d{5}"
    ).unwrap();

    // Field labels that prefix data ("Email: ...", "Phone. ...")
    pub static ref LABEL: Regex = Regex::new(
        r"(?i)^(?:email|mail|phone|tel|cell|mobile|fax|office|direct|web|website|url|addr|address)\s*[:.]\s*"
    ).unwrap();

    pub static ref JOB_TITLE_WORDS: Regex = keyword_regex(JOB_TITLE_KEYWORDS);
    pub static ref COMPANY_WORDS: Regex = keyword_regex(COMPANY_INDICATORS);
    pub static ref ADDRESS_WORDS: Regex = keyword_regex(ADDRESS_KEYWORDS);
}

/// Build a whole-word alternation from a keyword list.
///
/// Word boundaries are only asserted on sides where the keyword ends in a
/// word character, so entries like `st.` or `#` still match.
fn keyword_regex(keywords: &[&str]) -> Regex {
    let is_word = |c: char| c.is_alphanumeric() || c == '_';
    let alternatives: Vec<String> = keywords
        .iter()
        .map(|keyword| {
            let mut alt = String::new();
            if keyword.starts_with(is_word) {
                alt.push_str(r"\b");
            }
            alt.push_str(&regex::escape(keyword));
            if keyword.ends_with(is_word) {
                alt.push_str(r"\b");
            }
            alt
        })
        .collect();
    Regex::new(&format!("(?:{})", alternatives.join("|"))).unwrap()
}

/// Check whether a line contains a job title keyword.
pub fn is_job_title_line(line: &str) -> bool {
    JOB_TITLE_WORDS.is_match(&line.to_lowercase())
}

/// Check whether a line contains a company indicator.
pub fn is_company_line(line: &str) -> bool {
    COMPANY_WORDS.is_match(&line.to_lowercase())
}

/// Check whether a line looks like part of a postal address.
pub fn is_address_line(line: &str) -> bool {
    ADDRESS_WORDS.is_match(&line.to_lowercase())
        || STATE_ZIP.is_match(line)
        || ADDRESS_NUMBER_STREET.is_match(line)
        || CITY_STATE_ZIP.is_match(line)
}
