use std::time::Instant;

use chrono::{DateTime, Duration, NaiveTime, Utc};
use futures::future::BoxFuture;
use tokio::task::JoinHandle;

use crate::database::utils::clamped_day;

/// Wall-clock firing rule for one periodic job.
#[derive(Debug, Clone, Copy)]
pub enum Schedule {
    /// Every day at the given UTC time.
    Daily { at: NaiveTime },
    /// Every month on the given day (clamped to month length) at the
    /// given UTC time.
    Monthly { day: u32, at: NaiveTime },
}

impl Schedule {
    /// The first firing instant strictly after `now`.
    pub fn next_after(&self, now: DateTime<Utc>) -> DateTime<Utc> {
        match *self {
            Schedule::Daily { at } => {
                let today = now.date_naive().and_time(at).and_utc();
                if today > now {
                    today
                } else {
                    (now.date_naive() + Duration::days(1)).and_time(at).and_utc()
                }
            }
            Schedule::Monthly { day, at } => {
                let date = now.date_naive();
                for offset in 0..=1 {
                    let (year, month) =
                        crate::database::utils::shift_month(date, offset);
                    if let Ok(fire_date) = clamped_day(year, month, day) {
                        let fire = fire_date.and_time(at).and_utc();
                        if fire > now {
                            return fire;
                        }
                    }
                }
                // Unreachable for valid months; fall back to tomorrow so a
                // broken schedule degrades to retrying instead of spinning.
                (date + Duration::days(1)).and_time(at).and_utc()
            }
        }
    }
}

type JobTask = Box<dyn Fn() -> BoxFuture<'static, anyhow::Result<String>> + Send + Sync>;

struct ScheduledJob {
    name: &'static str,
    schedule: Schedule,
    task: JobTask,
}

/// Process-wide registry of periodic jobs, built once at startup. Each
/// job runs on its own tokio task, sleeps to the next firing, and is
/// retried only by its next scheduled run - never immediately.
#[derive(Default)]
pub struct Scheduler {
    jobs: Vec<ScheduledJob>,
}

impl Scheduler {
    pub fn new() -> Self {
        Self { jobs: Vec::new() }
    }

    pub fn register<F>(&mut self, name: &'static str, schedule: Schedule, task: F)
    where
        F: Fn() -> BoxFuture<'static, anyhow::Result<String>> + Send + Sync + 'static,
    {
        self.jobs.push(ScheduledJob {
            name,
            schedule,
            task: Box::new(task),
        });
    }

    /// Start one loop per registered job. Dropping or aborting the
    /// returned handles stops the timers.
    pub fn spawn(self) -> Vec<JoinHandle<()>> {
        self.jobs
            .into_iter()
            .map(|job| {
                tokio::spawn(async move {
                    loop {
                        let now = Utc::now();
                        let next = job.schedule.next_after(now);
                        let wait = (next - now)
                            .to_std()
                            .unwrap_or(std::time::Duration::ZERO);
                        log::debug!("Job {} sleeping until {}", job.name, next);
                        tokio::time::sleep(wait).await;

                        let started = Instant::now();
                        match (job.task)().await {
                            Ok(summary) => log::info!(
                                "Job {} finished in {:.1?}: {}",
                                job.name,
                                started.elapsed(),
                                summary
                            ),
                            Err(e) => log::error!(
                                "Job {} failed after {:.1?}: {}",
                                job.name,
                                started.elapsed(),
                                e
                            ),
                        }
                    }
                })
            })
            .collect()
    }
}
