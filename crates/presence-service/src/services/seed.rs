//! Synthetic users for demos and local development

use presence_common::auth::{hash_password, validate_password_strength};
use presence_core::NewUser;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;
use serde::Serialize;
use tracing::{debug, info, instrument};

use super::context::ServiceContext;
use super::error::ServiceResult;

/// Default number of users created by the seeder
pub const DEFAULT_SEED_COUNT: usize = 20;

const SEED_LEVEL: &str = "Senior";

const FIRST_NAMES: &[&str] = &[
    "Ada", "Alan", "Barbara", "Brian", "Dennis", "Donald", "Edsger", "Frances", "Grace", "Guido",
    "Hedy", "John", "Ken", "Linus", "Margaret", "Niklaus", "Radia", "Rob", "Sophie", "Tim",
];

const LAST_NAMES: &[&str] = &[
    "Allen", "Backus", "Cerf", "Dijkstra", "Hamilton", "Hopper", "Kay", "Kernighan", "Knuth",
    "Lamport", "Liskov", "Lovelace", "McCarthy", "Perlman", "Pike", "Ritchie", "Thompson",
    "Turing", "Wilson", "Wirth",
];

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct SeedReport {
    pub created: usize,
    /// Emails that were already registered
    pub skipped: usize,
}

pub struct SeedService<'a> {
    ctx: &'a ServiceContext,
    seed: u64,
}

impl<'a> SeedService<'a> {
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx, seed: 42 }
    }

    /// Use a different name sequence
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    /// Create `count` users sharing `password`
    ///
    /// Emails carry the running index, so re-running with the same seed skips
    /// users that already exist instead of failing.
    #[instrument(skip(self, password))]
    pub async fn seed(&self, count: usize, password: &str) -> ServiceResult<SeedReport> {
        validate_password_strength(password)?;
        let password_hash = hash_password(password)?;

        let mut report = SeedReport::default();
        for new_user in self.generate(count) {
            if self.ctx.user_repo().email_exists(&new_user.email).await? {
                debug!(email = %new_user.email, "Seed user exists");
                report.skipped += 1;
                continue;
            }

            let user = new_user.into_user(self.ctx.generate_id(), self.ctx.presence().default_status);
            self.ctx.user_repo().create(&user, &password_hash).await?;
            report.created += 1;
        }

        info!(created = report.created, skipped = report.skipped, "Seeding finished");
        Ok(report)
    }

    fn generate(&self, count: usize) -> Vec<NewUser> {
        let mut rng = StdRng::seed_from_u64(self.seed);

        (1..=count)
            .map(|n| {
                let first = FIRST_NAMES.choose(&mut rng).copied().unwrap_or("Ada");
                let last = LAST_NAMES.choose(&mut rng).copied().unwrap_or("Lovelace");
                let handle = format!("{first}{last}{n}").to_lowercase();

                NewUser {
                    name: format!("{first} {last}"),
                    email: format!("{}.{}{n}@example.com", first.to_lowercase(), last.to_lowercase()),
                    level: Some(SEED_LEVEL.to_string()),
                    github_link: Some(format!("https://github.com/{handle}")),
                }
            })
            .collect()
    }
}
