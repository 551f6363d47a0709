//! Course catalog.
//!
//! The catalog is static content compiled into the portal. Category
//! summaries drive the course list; full detail pages exist for a subset,
//! and unknown ids fall back to [`DEFAULT_COURSE`].

use pinnacle_types::{CourseId, UserRecord};
use rust_decimal::Decimal;

/// Course shown when a detail page is requested for an unknown id.
pub const DEFAULT_COURSE: &str = "ethical-hacking";

/// A course category on the list page.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CourseSummary {
    /// Catalog slug.
    pub id: &'static str,
    /// Display title.
    pub title: &'static str,
    /// One-line pitch.
    pub summary: &'static str,
}

/// Course categories, in display order.
pub const CATEGORIES: &[CourseSummary] = &[
    CourseSummary {
        id: "cybersecurity-fundamentals",
        title: "Cybersecurity Fundamentals",
        summary: "Start from zero and build strong foundational cybersecurity skills.",
    },
    CourseSummary {
        id: "penetration-testing",
        title: "Penetration Testing & Red Teaming",
        summary: "Hands-on offensive security and real-world attack simulation.",
    },
    CourseSummary {
        id: "ethical-hacking",
        title: "Ethical Hacking (CEH Track)",
        summary: "Master practical hacking and prepare for CEH certification.",
    },
    CourseSummary {
        id: "soc-blue-team",
        title: "SOC / Blue Team Defense",
        summary: "Learn SIEM monitoring, threat detection, and incident response.",
    },
    CourseSummary {
        id: "forensics-malware",
        title: "Forensics & Malware Analysis",
        summary: "Deep dive digital forensics, reverse engineering & malware labs.",
    },
    CourseSummary {
        id: "osint-intelligence",
        title: "OSINT & Cyber Intelligence",
        summary: "Learn reconnaissance, intelligence gathering & investigation.",
    },
];

/// A course detail page.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Course {
    /// Catalog slug.
    pub id: &'static str,
    /// Display title.
    pub title: &'static str,
    /// Long description.
    pub description: &'static str,
    /// Difficulty label.
    pub difficulty: &'static str,
    /// Duration label.
    pub duration: &'static str,
    /// Programme level.
    pub level: &'static str,
    /// Instructor name.
    pub instructor: &'static str,
    /// Tuition in whole naira.
    pub price_naira: u32,
    /// Module titles in teaching order.
    pub modules: &'static [&'static str],
    /// How many leading modules are free to preview.
    pub free_preview_count: usize,
    /// Prerequisites.
    pub requirements: &'static [&'static str],
    /// What the learner walks away with.
    pub outcomes: &'static [&'static str],
}

impl Course {
    /// Catalog id as a typed identifier.
    pub fn course_id(&self) -> CourseId {
        CourseId::from(self.id)
    }

    /// Tuition as a decimal amount in naira.
    pub fn price(&self) -> Decimal {
        Decimal::from(self.price_naira)
    }

    /// Whether module `index` (0-based) may be opened by this learner.
    ///
    /// Free-preview modules are open to everyone, including signed-out
    /// visitors; the rest need the course to be unlocked.
    pub fn module_viewable(&self, index: usize, record: Option<&UserRecord>) -> bool {
        if index >= self.modules.len() {
            return false;
        }
        index < self.free_preview_count
            || record.is_some_and(|r| r.has_unlocked(&self.course_id()))
    }
}

/// Courses with a detail page.
pub const COURSES: &[Course] = &[Course {
    id: "ethical-hacking",
    title: "Ethical Hacking & Penetration Testing",
    description: "Learn real-world Ethical Hacking techniques, web exploitation, wireless \
                  attacks, OSINT, privilege escalation, and full Red Team methodologies \
                  with hands-on labs and CTF challenges.",
    difficulty: "Intermediate",
    duration: "6 Weeks",
    level: "Career Training",
    instructor: "Abdul-Roheem Abdul-Razaq (Sayfullah)",
    price_naira: 15_000,
    modules: &[
        "Introduction to Ethical Hacking & Lab Setup",
        "Information Gathering & OSINT",
        "Scanning & Enumeration Techniques",
        "Exploitation Fundamentals",
        "Web Application Exploitation",
        "Metasploit Framework",
        "Wireless Hacking",
        "Post-Exploitation & Privilege Escalation",
        "CTF Challenges & Practical Projects",
    ],
    free_preview_count: 2,
    requirements: &[
        "Basic computer usage",
        "No prior coding required",
        "Laptop with 8GB RAM recommended",
        "Curiosity and willingness to learn",
    ],
    outcomes: &[
        "Master real-world hacking skills",
        "Become job-ready for cybersecurity roles",
        "Build a professional hacking portfolio",
        "Perform penetration testing legally",
        "Prepare for security certifications",
    ],
}];

/// Look up a course detail page, falling back to [`DEFAULT_COURSE`].
pub fn course_or_default(id: &str) -> Option<&'static Course> {
    COURSES
        .iter()
        .find(|c| c.id == id)
        .or_else(|| COURSES.iter().find(|c| c.id == DEFAULT_COURSE))
}

/// Look up a category summary.
pub fn category(id: &str) -> Option<&'static CourseSummary> {
    CATEGORIES.iter().find(|c| c.id == id)
}

#[cfg(test)]
mod tests {
    use chrono::Utc;
    use pinnacle_types::UserId;

    use super::*;

    #[test]
    fn unknown_id_falls_back() {
        let course = course_or_default("does-not-exist");
        assert_eq!(course.map(|c| c.id), Some(DEFAULT_COURSE));
        assert_eq!(course.map(Course::price), Some(Decimal::from(15_000)));
    }

    #[test]
    fn every_detail_page_has_a_category() {
        for course in COURSES {
            assert!(category(course.id).is_some(), "{} has no category", course.id);
            assert!(course.free_preview_count <= course.modules.len());
        }
    }

    #[test]
    fn preview_modules_are_open_rest_need_unlock() {
        let Some(course) = course_or_default(DEFAULT_COURSE) else {
            return;
        };
        assert!(course.module_viewable(0, None));
        assert!(course.module_viewable(1, None));
        assert!(!course.module_viewable(2, None));

        let mut record = UserRecord::new(UserId::from("u1"), None, Utc::now());
        assert!(!course.module_viewable(2, Some(&record)));
        record.unlock_course(course.course_id());
        assert!(course.module_viewable(8, Some(&record)));
        assert!(!course.module_viewable(9, Some(&record)));
    }
}
