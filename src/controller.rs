use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use chrono::{TimeZone, Utc};
use chrono_tz::Tz;
use sha2::{Digest, Sha256};
use tokio::sync::{broadcast, RwLock};
use tokio::task::JoinHandle;
use tracing::{info, info_span, warn, Instrument};

use crate::domain::models::notification::{DirectoryBus, DirectoryEvent};
use crate::domain::models::overlay::CalendarSnapshot;
use crate::domain::models::schedule::{ScheduleOwner, WeeklySchedule};
use crate::domain::services::overlay::{build_overlay, view_timezone, OverlayInputs, OverlayQuery};
use crate::error::AppError;
use crate::state::AppState;

const SNAPSHOT_CACHE_LIMIT: usize = 64;

/// Coordinates the overlay derivation around the pure pipeline:
/// fetches inputs through the ports, caches snapshots under explicit
/// input-fingerprint keys, sequences refreshes with monotonic tickets
/// so a slow superseded fetch can never overwrite a newer one, and
/// subscribes to directory events to drop stale cached schedule entries
/// before the next recompute.
pub struct CalendarController {
    state: AppState,
    bus: DirectoryBus,
    tickets: AtomicU64,
    schedule_cache: RwLock<HashMap<String, Vec<WeeklySchedule>>>,
    snapshot_cache: RwLock<HashMap<String, Arc<CalendarSnapshot>>>,
    current: RwLock<Option<Arc<CalendarSnapshot>>>,
}

impl CalendarController {
    pub fn new(state: AppState) -> Arc<Self> {
        Arc::new(Self {
            state,
            bus: DirectoryBus::new(64),
            tickets: AtomicU64::new(0),
            schedule_cache: RwLock::new(HashMap::new()),
            snapshot_cache: RwLock::new(HashMap::new()),
            current: RwLock::new(None),
        })
    }

    pub fn bus(&self) -> DirectoryBus {
        self.bus.clone()
    }

    /// Spawns the directory-event listener. Subscription happens before
    /// the task is spawned, so events published right after this call
    /// are not lost.
    pub fn spawn_event_listener(self: Arc<Self>) -> JoinHandle<()> {
        let controller = self;
        let mut rx = controller.bus.subscribe();
        tokio::spawn(async move {
            loop {
                match rx.recv().await {
                    Ok(event) => controller.handle_event(event).await,
                    Err(broadcast::error::RecvError::Lagged(skipped)) => {
                        warn!(
                            "Directory listener lagged, {} events dropped; invalidating caches",
                            skipped
                        );
                        controller.invalidate_all().await;
                    }
                    Err(broadcast::error::RecvError::Closed) => break,
                }
            }
        })
    }

    pub async fn handle_event(&self, event: DirectoryEvent) {
        match event {
            DirectoryEvent::StaffDeleted { staff_id } => {
                info!("Staff {} deleted, dropping cached schedule entries", staff_id);
                let owner = ScheduleOwner::Staff { staff_id };
                self.schedule_cache.write().await.remove(&owner.key());
                self.snapshot_cache.write().await.clear();
            }
            DirectoryEvent::ScheduleChanged { owner } => {
                self.schedule_cache.write().await.remove(&owner.key());
                self.snapshot_cache.write().await.clear();
            }
            DirectoryEvent::AppointmentsChanged { .. } => {
                self.snapshot_cache.write().await.clear();
            }
        }
    }

    pub async fn invalidate_all(&self) {
        self.schedule_cache.write().await.clear();
        self.snapshot_cache.write().await.clear();
    }

    pub async fn current(&self) -> Option<Arc<CalendarSnapshot>> {
        self.current.read().await.clone()
    }

    /// Loads (or re-derives) the overlay for a query. Every call takes a
    /// fresh ticket; when the computation finishes after a newer ticket
    /// was issued, its result is returned to the caller but discarded as
    /// the committed snapshot, so stale responses cannot clobber newer
    /// ones.
    pub async fn load_view(&self, query: &OverlayQuery) -> Result<Arc<CalendarSnapshot>, AppError> {
        let ticket = self.tickets.fetch_add(1, Ordering::SeqCst) + 1;
        let span = info_span!("load_view", ticket);
        self.load_view_inner(query, ticket).instrument(span).await
    }

    async fn load_view_inner(
        &self,
        query: &OverlayQuery,
        ticket: u64,
    ) -> Result<Arc<CalendarSnapshot>, AppError> {
        let key = self.fingerprint(query).await?;

        if let Some(hit) = self.snapshot_cache.read().await.get(&key).cloned() {
            self.commit(ticket, hit.clone()).await;
            return Ok(hit);
        }

        let default_tz: Tz = self
            .state
            .config
            .default_timezone
            .parse()
            .unwrap_or(chrono_tz::UTC);

        let locations = self.state.location_repo.list().await?;
        let rooms = self.state.location_repo.list_rooms().await?;
        let staff = self.state.staff_repo.list().await?;

        let mut schedules = Vec::new();
        for location in &locations {
            let owner = ScheduleOwner::Location {
                location_id: location.id.clone(),
            };
            schedules.extend(self.schedules_for(&owner).await?);
        }
        for member in &staff {
            let owner = ScheduleOwner::Staff {
                staff_id: member.id.clone(),
            };
            schedules.extend(self.schedules_for(&owner).await?);
        }

        let range = query.view.range(query.anchor);
        let tz = view_timezone(query, &locations, default_tz);
        let fetch_start = local_day_bound(range.start, 0, 0, 0, tz)?;
        let fetch_end = local_day_bound(range.end, 23, 59, 59, tz)?;
        let appointments = self
            .state
            .appointment_repo
            .list_by_range(query.location_id.as_deref(), fetch_start, fetch_end)
            .await?;

        let inputs = OverlayInputs {
            schedules: &schedules,
            appointments: &appointments,
            staff: &staff,
            rooms: &rooms,
            locations: &locations,
        };
        let days = build_overlay(query, &inputs, default_tz);

        let snapshot = Arc::new(CalendarSnapshot {
            range,
            days,
            generated_at: Utc::now(),
        });

        {
            let mut cache = self.snapshot_cache.write().await;
            if cache.len() >= SNAPSHOT_CACHE_LIMIT {
                cache.clear();
            }
            cache.insert(key, snapshot.clone());
        }

        self.commit(ticket, snapshot.clone()).await;
        Ok(snapshot)
    }

    async fn commit(&self, ticket: u64, snapshot: Arc<CalendarSnapshot>) -> bool {
        if self.tickets.load(Ordering::SeqCst) > ticket {
            info!("Discarding superseded refresh (ticket {})", ticket);
            return false;
        }
        *self.current.write().await = Some(snapshot);
        true
    }

    async fn schedules_for(&self, owner: &ScheduleOwner) -> Result<Vec<WeeklySchedule>, AppError> {
        if let Some(cached) = self.schedule_cache.read().await.get(&owner.key()) {
            return Ok(cached.clone());
        }
        let fetched = self.state.schedule_repo.list_for_owner(owner).await?;
        self.schedule_cache
            .write()
            .await
            .insert(owner.key(), fetched.clone());
        Ok(fetched)
    }

    /// Explicit cache key: the query plus a change counter per input
    /// collection, so any mutation of schedules, appointments, staff or
    /// locations produces a different key.
    async fn fingerprint(&self, query: &OverlayQuery) -> Result<String, AppError> {
        let schedule_rev = self.state.schedule_repo.revision().await?;
        let appointment_rev = self.state.appointment_repo.revision().await?;
        let staff_rev = self.state.staff_repo.revision().await?;
        let location_rev = self.state.location_repo.revision().await?;

        let query_json = serde_json::to_vec(query)?;
        let mut hasher = Sha256::new();
        hasher.update(&query_json);
        hasher.update(schedule_rev.to_le_bytes());
        hasher.update(appointment_rev.to_le_bytes());
        hasher.update(staff_rev.to_le_bytes());
        hasher.update(location_rev.to_le_bytes());
        Ok(hex::encode(hasher.finalize()))
    }
}

fn local_day_bound(
    date: chrono::NaiveDate,
    hour: u32,
    min: u32,
    sec: u32,
    tz: Tz,
) -> Result<chrono::DateTime<Utc>, AppError> {
    let naive = date.and_hms_opt(hour, min, sec).ok_or(AppError::Internal)?;
    tz.from_local_datetime(&naive)
        .single()
        .map(|dt| dt.with_timezone(&Utc))
        .ok_or_else(|| {
            AppError::Validation(format!(
                "Day bound {} {:02}:{:02} does not resolve in {}",
                date, hour, min, tz
            ))
        })
}
