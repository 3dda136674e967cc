// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Startup seeding with the demo activity list.

use crate::config::SeedMode;
use crate::db::ActivityRepository;
use crate::error::Result;
use crate::models::Activity;
use futures_util::{stream, StreamExt};

const MAX_CONCURRENT_DB_OPS: usize = 10;

/// (name, description, schedule, max_participants, participants)
const SEED_TABLE: &[(&str, &str, &str, u32, [&str; 2])] = &[
    (
        "Chess Club",
        "Learn strategies and compete in chess tournaments",
        "Fridays, 3:30 PM - 5:00 PM",
        12,
        ["michael@mergington.edu", "daniel@mergington.edu"],
    ),
    (
        "Programming Class",
        "Learn programming fundamentals and build software projects",
        "Tuesdays and Thursdays, 3:30 PM - 4:30 PM",
        20,
        ["emma@mergington.edu", "sophia@mergington.edu"],
    ),
    (
        "Gym Class",
        "Physical education and sports activities",
        "Mondays, Wednesdays, Fridays, 2:00 PM - 3:00 PM",
        30,
        ["john@mergington.edu", "olivia@mergington.edu"],
    ),
    (
        "Soccer Team",
        "Join the school soccer team and compete in local leagues",
        "Tuesdays and Thursdays, 4:00 PM - 5:30 PM",
        18,
        ["lucas@mergington.edu", "mia@mergington.edu"],
    ),
    (
        "Basketball Club",
        "Practice basketball skills and play friendly matches",
        "Wednesdays, 3:30 PM - 5:00 PM",
        15,
        ["liam@mergington.edu", "ava@mergington.edu"],
    ),
    (
        "Drama Club",
        "Act in plays and improve your stage presence",
        "Mondays, 4:00 PM - 5:30 PM",
        20,
        ["noah@mergington.edu", "isabella@mergington.edu"],
    ),
    (
        "Art Workshop",
        "Explore painting, drawing, and sculpture techniques",
        "Thursdays, 3:30 PM - 5:00 PM",
        16,
        ["amelia@mergington.edu", "benjamin@mergington.edu"],
    ),
    (
        "Math Olympiad",
        "Prepare for math competitions and solve challenging problems",
        "Fridays, 2:00 PM - 3:30 PM",
        10,
        ["charlotte@mergington.edu", "elijah@mergington.edu"],
    ),
    (
        "Debate Team",
        "Develop public speaking and argumentation skills",
        "Wednesdays, 4:00 PM - 5:30 PM",
        14,
        ["james@mergington.edu", "harper@mergington.edu"],
    ),
];

/// The demo activities with their initial rosters.
pub fn seed_activities() -> Vec<Activity> {
    SEED_TABLE
        .iter()
        .map(
            |(name, description, schedule, max_participants, participants)| Activity {
                name: name.to_string(),
                description: description.to_string(),
                schedule: schedule.to_string(),
                max_participants: *max_participants,
                participants: participants.iter().map(|p| p.to_string()).collect(),
            },
        )
        .collect()
}

/// Seed the store according to `mode`.
///
/// Returns the number of activities inserted.
pub async fn seed(repo: &dyn ActivityRepository, mode: SeedMode) -> Result<usize> {
    match mode {
        SeedMode::Skip => {
            tracing::info!("Seeding skipped");
            return Ok(0);
        }
        SeedMode::IfEmpty => {
            let existing = repo.list_all().await?.len();
            if existing > 0 {
                tracing::info!(existing, "Store already has activities, not seeding");
                return Ok(0);
            }
        }
        SeedMode::Reset => {
            let removed = repo.clear().await?;
            tracing::warn!(removed, "Reset mode: cleared all activities and signups");
        }
    }

    let activities = seed_activities();
    let count = activities.len();

    stream::iter(activities)
        .map(|activity| async move { repo.insert(&activity).await })
        .buffer_unordered(MAX_CONCURRENT_DB_OPS)
        .collect::<Vec<Result<()>>>()
        .await
        .into_iter()
        .collect::<Result<Vec<()>>>()?;

    tracing::info!(count, ?mode, "Seeded activities");
    Ok(count)
}
