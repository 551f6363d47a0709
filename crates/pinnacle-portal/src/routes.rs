//! The portal's route table.
//!
//! Maps URL paths to views, each tagged with the [`Guard`] it sits behind.
//! Patterns are literal segments plus `:name` captures; the first matching
//! pattern wins.

use std::collections::BTreeMap;

use crate::guard::{GateDecision, Guard, Redirect};
use crate::session::AuthSnapshot;

/// Every view the portal can render.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum View {
    /// Landing page.
    Home,
    /// About the platform.
    About,
    /// Project showcase.
    Projects,
    /// Contact form.
    Contact,
    /// Team page.
    Team,
    /// Article index.
    Articles,
    /// One article, by `slug`.
    Article,
    /// AI chat assistant.
    CyberAi,
    /// AI tools overview.
    AiDashboard,
    /// Recon tools.
    ReconTools,
    /// Attack Lab templates.
    AttackLab,
    /// Forensics lab.
    ForensicsLab,
    /// Generated reports.
    Reports,
    /// Admin dashboard (usage counters).
    AdminDashboard,
    /// Admin log view.
    AdminLogs,
    /// Admin user management.
    AdminUsers,
    /// Live SOC event monitor.
    SocMonitor,
    /// CTF challenge list.
    Ctf,
    /// One CTF challenge, by `title`.
    ChallengeDetails,
    /// Sign-up form.
    Signup,
    /// Login form.
    Login,
    /// Learner dashboard.
    Dashboard,
    /// Score leaderboard.
    Leaderboard,
    /// Training overview.
    Training,
    /// Course categories.
    Courses,
    /// One course, by `id`.
    CourseDetails,
    /// Membership plans.
    Memberships,
    /// Training packages.
    TrainingPackages,
    /// Career training.
    CareerTraining,
    /// Offers for organizations.
    ForOrganizations,
    /// Full course list.
    ListCourses,
    /// Learning paths.
    TrainingPaths,
    /// Package comparison.
    ComparePackages,
}

/// One entry of the route table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RouteDef {
    /// Path pattern, e.g. `/courses/:id`.
    pub pattern: &'static str,
    /// View rendered at this path.
    pub view: View,
    /// Check applied before rendering.
    pub guard: Guard,
}

const fn route(pattern: &'static str, view: View, guard: Guard) -> RouteDef {
    RouteDef {
        pattern,
        view,
        guard,
    }
}

/// The full route table, in match order.
pub const ROUTES: &[RouteDef] = &[
    // Main
    route("/", View::Home, Guard::Public),
    route("/about", View::About, Guard::Public),
    route("/projects", View::Projects, Guard::Public),
    route("/contact", View::Contact, Guard::Public),
    route("/team", View::Team, Guard::Public),
    // Articles
    route("/articles", View::Articles, Guard::Public),
    route("/articles/:slug", View::Article, Guard::Public),
    // AI platform
    route("/ai", View::CyberAi, Guard::Public),
    route("/ai/dashboard", View::AiDashboard, Guard::Public),
    route("/ai/recon", View::ReconTools, Guard::Public),
    route("/ai/lab", View::AttackLab, Guard::Public),
    route("/ai/forensics", View::ForensicsLab, Guard::Public),
    route("/ai/reports", View::Reports, Guard::Public),
    // Admin
    route("/admin", View::AdminDashboard, Guard::Admin),
    route("/admin/logs", View::AdminLogs, Guard::Admin),
    route("/admin/users", View::AdminUsers, Guard::Admin),
    route("/admin/soc", View::SocMonitor, Guard::Admin),
    // CTF
    route("/ctf", View::Ctf, Guard::Public),
    route("/ctf/:title", View::ChallengeDetails, Guard::Verified),
    // Auth and dashboard
    route("/signup", View::Signup, Guard::Public),
    route("/login", View::Login, Guard::Public),
    route("/dashboard", View::Dashboard, Guard::Verified),
    route("/leaderboard", View::Leaderboard, Guard::Public),
    // Training and courses
    route("/training", View::Training, Guard::Public),
    route("/courses", View::Courses, Guard::Public),
    route("/courses/:id", View::CourseDetails, Guard::Public),
    route("/memberships", View::Memberships, Guard::Public),
    route("/training-packages", View::TrainingPackages, Guard::Public),
    route("/career-training", View::CareerTraining, Guard::Public),
    route("/for-organizations", View::ForOrganizations, Guard::Public),
    route("/list-courses", View::ListCourses, Guard::Public),
    route("/training-paths", View::TrainingPaths, Guard::Public),
    route("/compare-packages", View::ComparePackages, Guard::Public),
];

/// What the shell should do for a requested path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Navigation {
    /// Render a view with its captured path parameters.
    Render {
        /// The matched view.
        view: View,
        /// Values captured by `:name` segments.
        params: BTreeMap<&'static str, String>,
    },
    /// The guard refused; go here instead.
    Redirect(Redirect),
    /// No route matches.
    NotFound,
}

/// Resolve a path against [`ROUTES`] and apply the matched route's guard.
///
/// Query strings and fragments are ignored, as is a trailing slash.
pub fn resolve(path: &str, auth: &AuthSnapshot) -> Navigation {
    let path = path
        .split(['?', '#'])
        .next()
        .unwrap_or_default();

    for def in ROUTES {
        if let Some(params) = match_pattern(def.pattern, path) {
            return match def.guard.check(auth) {
                GateDecision::Allow => Navigation::Render {
                    view: def.view,
                    params,
                },
                GateDecision::Redirect(redirect) => Navigation::Redirect(redirect),
            };
        }
    }
    Navigation::NotFound
}

/// Match `path` against `pattern`, returning captured parameters.
fn match_pattern(pattern: &'static str, path: &str) -> Option<BTreeMap<&'static str, String>> {
    let mut want = segments(pattern);
    let mut got = segments(path);
    let mut params = BTreeMap::new();

    loop {
        match (want.next(), got.next()) {
            (None, None) => return Some(params),
            (Some(w), Some(g)) => {
                if let Some(name) = w.strip_prefix(':') {
                    params.insert(name, g.to_owned());
                } else if w != g {
                    return None;
                }
            }
            _ => return None,
        }
    }
}

fn segments(path: &str) -> impl Iterator<Item = &str> {
    path.split('/').filter(|s| !s.is_empty())
}
