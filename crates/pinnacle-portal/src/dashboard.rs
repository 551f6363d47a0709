//! Learner dashboard summary.

use pinnacle_types::{CourseId, UserId, UserRecord};

use crate::error::RecordError;
use crate::records::UserRecords;
use crate::store::DocumentStore;

/// Points awarded per solved challenge.
pub const POINTS_PER_CHALLENGE: u64 = 50;

/// Shown in place of the course list when nothing is enrolled.
pub const NO_COURSES_MESSAGE: &str = "You have not enrolled in any course yet";

/// Rank earned from the CTF score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Rank {
    /// Below 50 points.
    Rookie,
    /// 50 points or more.
    Skilled,
    /// 100 points or more.
    Pro,
    /// 200 points or more.
    Elite,
}

impl Rank {
    /// Rank for a score.
    pub const fn for_score(score: u64) -> Self {
        match score {
            200.. => Self::Elite,
            100.. => Self::Pro,
            50.. => Self::Skilled,
            _ => Self::Rookie,
        }
    }

    /// Display title.
    pub const fn title(self) -> &'static str {
        match self {
            Self::Rookie => "Rookie Hacker",
            Self::Skilled => "Skilled Hacker",
            Self::Pro => "Pro Hacker",
            Self::Elite => "Elite Hacker",
        }
    }
}

/// Figures shown on the learner dashboard.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DashboardSummary {
    /// CTF score.
    pub score: u64,
    /// Rank derived from the score.
    pub rank: Rank,
    /// Challenges solved, derived from the score.
    pub challenges_completed: u64,
    /// Badges in award order.
    pub badges: Vec<String>,
    /// Courses the learner is enrolled in, for the "My Courses" list.
    pub enrolled_courses: Vec<CourseId>,
    /// Number of unlocked courses.
    pub unlocked_courses: usize,
}

impl DashboardSummary {
    /// Summarize a record.
    pub fn from_record(record: &UserRecord) -> Self {
        let mut summary = Self::from_score(record.score);
        summary.badges.clone_from(&record.badges);
        summary.enrolled_courses = record.enrolled_courses.iter().cloned().collect();
        summary.unlocked_courses = record.unlocked_courses.len();
        summary
    }

    /// Summary for a learner with only a score.
    pub const fn from_score(score: u64) -> Self {
        Self {
            score,
            rank: Rank::for_score(score),
            challenges_completed: score / POINTS_PER_CHALLENGE,
            badges: Vec::new(),
            enrolled_courses: Vec::new(),
            unlocked_courses: 0,
        }
    }

    /// Text for the "My Courses" section when the list is empty.
    pub fn courses_placeholder(&self) -> Option<&'static str> {
        self.enrolled_courses.is_empty().then_some(NO_COURSES_MESSAGE)
    }

    /// Load a learner's summary; a learner without a record shows zeros.
    pub async fn load<S: DocumentStore>(
        records: &UserRecords<S>,
        uid: &UserId,
    ) -> Result<Self, RecordError> {
        match records.load_record(uid).await {
            Ok(record) => Ok(Self::from_record(&record)),
            Err(RecordError::NotFound(_)) => Ok(Self::from_score(0)),
            Err(e) => Err(e),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::MemoryStore;

    #[test]
    fn rank_thresholds() {
        assert_eq!(Rank::for_score(0), Rank::Rookie);
        assert_eq!(Rank::for_score(49), Rank::Rookie);
        assert_eq!(Rank::for_score(50), Rank::Skilled);
        assert_eq!(Rank::for_score(100), Rank::Pro);
        assert_eq!(Rank::for_score(199).title(), "Pro Hacker");
        assert_eq!(Rank::for_score(200).title(), "Elite Hacker");
    }

    #[test]
    fn challenges_round_down() {
        assert_eq!(DashboardSummary::from_score(149).challenges_completed, 2);
    }

    #[tokio::test]
    async fn load_reads_the_record() {
        let records = UserRecords::new(MemoryStore::new());
        let uid = UserId::from("u1");
        assert!(matches!(
            DashboardSummary::load(&records, &uid).await,
            Ok(DashboardSummary { score: 0, rank: Rank::Rookie, .. })
        ));

        assert!(records.create_user_record(&uid, None).await.is_ok());
        assert!(records.add_score(&uid, 120).await.is_ok());
        assert!(records.award_badge(&uid, "first-flag").await.is_ok());

        let summary = DashboardSummary::load(&records, &uid).await;
        assert!(summary.is_ok_and(|s| s.rank == Rank::Pro
            && s.challenges_completed == 2
            && s.badges == ["first-flag"]));
    }

    #[tokio::test]
    async fn enrolled_courses_are_listed() {
        let records = UserRecords::new(MemoryStore::new());
        let uid = UserId::from("u2");
        assert!(records.create_user_record(&uid, None).await.is_ok());

        let empty = DashboardSummary::load(&records, &uid).await;
        assert!(empty.is_ok_and(|s| s.enrolled_courses.is_empty()
            && s.courses_placeholder() == Some(NO_COURSES_MESSAGE)));

        let hacking = CourseId::from("ethical-hacking");
        let osint = CourseId::from("osint-intelligence");
        assert!(records.enroll(&uid, &osint).await.is_ok());
        assert!(records.enroll(&uid, &hacking).await.is_ok());
        assert!(records.unlock_course(&uid, &hacking).await.is_ok());

        let summary = DashboardSummary::load(&records, &uid).await;
        assert!(summary.is_ok_and(|s| s.enrolled_courses == [hacking, osint]
            && s.unlocked_courses == 1
            && s.courses_placeholder().is_none()));
    }
}
