//! Activity lifecycle controller.
//!
//! ```text
//! Pending --complete--> PendingApproval --approve--> Completed
//!                              |
//!                              +--reject--> Pending
//! ```
//!
//! This is the only writer of activities, and approval is the only path
//! through which XP changes. Each mutation holds the shared write lock for
//! its whole load-modify-save cycle and validates before writing anything.

use chrono::NaiveDate;
use std::sync::Arc;
use tracing::{debug, error, info, warn};

use super::clock::Clock;
use super::commands::activities::{
    ActivityListQuery, ApproveActivityCommand, ApproveActivityResult, CompleteActivityResult,
    CreateActivityCommand, CreateActivityResult, LifecycleEvent,
};
use super::errors::{EngineError, EngineResult};
use super::models::activity::{
    Activity, ActivityStatus, LifecycleAction, MAX_DESCRIPTION_LENGTH, MAX_NAME_LENGTH, MAX_POINTS,
    MIN_POINTS,
};
use super::notifier::Notifier;
use super::progression;
use crate::storage::Stores;

#[derive(Clone)]
pub struct ActivityService {
    stores: Stores,
    clock: Arc<dyn Clock>,
    notifier: Arc<dyn Notifier>,
}

impl ActivityService {
    pub fn new(stores: Stores, clock: Arc<dyn Clock>, notifier: Arc<dyn Notifier>) -> Self {
        Self {
            stores,
            clock,
            notifier,
        }
    }

    /// Assign a new Pending activity to an existing child
    pub async fn create_activity(&self, command: CreateActivityCommand) -> EngineResult<CreateActivityResult> {
        info!(
            "Creating activity '{}' for {} ({} points)",
            command.name, command.user_id, command.points
        );

        let name = command.name.trim().to_string();
        let description = command
            .description
            .map(|text| text.trim().to_string())
            .filter(|text| !text.is_empty());
        let points = Self::validate_activity(&name, description.as_deref(), command.points)?;

        let _guard = self.stores.write_lock.lock().await;

        let users = self.stores.users.load_users().await?;
        match users.iter().find(|user| user.id == command.user_id) {
            Some(user) if user.is_child() => {}
            Some(_) => {
                return Err(EngineError::validation("Activities can only be assigned to a child"));
            }
            None => {
                return Err(EngineError::validation(format!(
                    "No child with id {}",
                    command.user_id
                )));
            }
        }

        let activity = Activity {
            id: Activity::generate_id(),
            user_id: command.user_id,
            name,
            description,
            points,
            status: ActivityStatus::Pending,
            date: command.date.unwrap_or_else(|| self.clock.today()),
            created_at: self.clock.now(),
        };

        let mut activities = self.stores.activities.load_activities().await?;
        activities.push(activity.clone());
        self.stores.activities.save_activities(&activities).await?;

        let event = LifecycleEvent::ActivityCreated {
            activity_id: activity.id.clone(),
            user_id: activity.user_id.clone(),
        };
        info!("{:?}", event);
        Ok(CreateActivityResult { activity, event })
    }

    /// Child submits a Pending activity for approval. Grants no XP.
    pub async fn complete_activity(&self, activity_id: &str) -> EngineResult<CompleteActivityResult> {
        info!("Submitting activity {} for approval", activity_id);

        let _guard = self.stores.write_lock.lock().await;

        let mut activities = self.stores.activities.load_activities().await?;
        let index = Self::position(&activities, activity_id)?;
        let next = Self::transition(&activities[index], LifecycleAction::Complete)?;

        activities[index].status = next;
        self.stores.activities.save_activities(&activities).await?;

        let activity = activities.swap_remove(index);
        let message = self.notifier.activity_submitted(&activity);
        let event = LifecycleEvent::ActivitySubmitted {
            activity_id: activity.id.clone(),
            message: message.clone(),
        };
        info!("{:?}", event);
        Ok(CompleteActivityResult {
            activity,
            message,
            event,
        })
    }

    /// Parent decision on a submitted activity.
    ///
    /// Approval completes the activity, credits its points to the owner and
    /// merges any newly unlocked achievements. Rejection sends it back to
    /// Pending and changes nothing else.
    pub async fn approve_activity(&self, command: ApproveActivityCommand) -> EngineResult<ApproveActivityResult> {
        let action = if command.approve {
            LifecycleAction::Approve
        } else {
            LifecycleAction::Reject
        };
        info!("Parent decision on {}: {}", command.activity_id, action);

        let _guard = self.stores.write_lock.lock().await;

        let mut activities = self.stores.activities.load_activities().await?;
        let index = Self::position(&activities, &command.activity_id)?;
        let next = Self::transition(&activities[index], action)?;

        let mut users = self.stores.users.load_users().await?;
        let owner_index = users
            .iter()
            .position(|user| user.id == activities[index].user_id)
            .ok_or_else(|| EngineError::user_not_found(activities[index].user_id.clone()))?;

        let previous_activities = activities.clone();
        activities[index].status = next;

        if !command.approve {
            self.stores.activities.save_activities(&activities).await?;

            let activity = activities.swap_remove(index);
            let event = LifecycleEvent::ActivityRejected {
                activity_id: activity.id.clone(),
            };
            info!("{:?}", event);
            return Ok(ApproveActivityResult {
                activity,
                user: users.swap_remove(owner_index),
                xp_awarded: 0,
                unlocked: Vec::new(),
                event,
            });
        }

        let xp_awarded = activities[index].points;
        let owner = &mut users[owner_index];
        owner.xp = owner.xp.saturating_add(xp_awarded);
        let unlocked = progression::check_unlocks(owner, &activities, self.clock.today());
        owner.achievements.extend(unlocked.iter().copied());

        self.stores.activities.save_activities(&activities).await?;
        if let Err(save_error) = self.stores.users.save_users(&users).await {
            warn!(
                "Saving users failed after approving {}, restoring activities: {:#}",
                command.activity_id, save_error
            );
            if let Err(restore_error) = self.stores.activities.save_activities(&previous_activities).await {
                error!("Failed to restore activities: {:#}", restore_error);
            }
            return Err(save_error.into());
        }

        let activity = activities.swap_remove(index);
        let user = users.swap_remove(owner_index);
        let event = LifecycleEvent::ActivityApproved {
            activity_id: activity.id.clone(),
            user_id: user.id.clone(),
            xp_awarded,
            new_xp: user.xp,
            new_level: user.level(),
            unlocked: unlocked.clone(),
        };
        info!("{:?}", event);
        Ok(ApproveActivityResult {
            activity,
            user,
            xp_awarded,
            unlocked,
            event,
        })
    }

    pub async fn get_activity(&self, activity_id: &str) -> EngineResult<Activity> {
        self.stores
            .activities
            .load_activities()
            .await?
            .into_iter()
            .find(|activity| activity.id == activity_id)
            .ok_or_else(|| EngineError::activity_not_found(activity_id))
    }

    pub async fn list_activities(&self, query: ActivityListQuery) -> EngineResult<Vec<Activity>> {
        if query.today_only {
            let user_id = query
                .user_id
                .ok_or_else(|| EngineError::validation("today=true requires a user_id"))?;
            return self.todays_activities(&user_id).await;
        }

        let activities = self.stores.activities.load_activities().await?;
        let activities: Vec<Activity> = match query.user_id.as_deref() {
            Some(user_id) => activities
                .into_iter()
                .filter(|activity| activity.belongs_to(user_id))
                .collect(),
            None => activities,
        };
        debug!("Listed {} activities", activities.len());
        Ok(activities)
    }

    /// Activities of `user_id` scheduled for today
    pub async fn todays_activities(&self, user_id: &str) -> EngineResult<Vec<Activity>> {
        let users = self.stores.users.load_users().await?;
        if !users.iter().any(|user| user.id == user_id) {
            return Err(EngineError::user_not_found(user_id));
        }

        let today = self.clock.today();
        let activities = self.stores.activities.load_activities().await?;
        Ok(Self::dated(activities, user_id, today))
    }

    /// Every activity awaiting a parent decision, oldest date first
    pub async fn pending_approvals(&self) -> EngineResult<Vec<Activity>> {
        let mut pending: Vec<Activity> = self
            .stores
            .activities
            .load_activities()
            .await?
            .into_iter()
            .filter(|activity| activity.status == ActivityStatus::PendingApproval)
            .collect();
        // stable: same-day entries keep creation order
        pending.sort_by_key(|activity| activity.date);
        Ok(pending)
    }

    pub(crate) fn dated(activities: Vec<Activity>, user_id: &str, date: NaiveDate) -> Vec<Activity> {
        activities
            .into_iter()
            .filter(|activity| activity.belongs_to(user_id) && activity.date == date)
            .collect()
    }

    fn position(activities: &[Activity], activity_id: &str) -> EngineResult<usize> {
        activities
            .iter()
            .position(|activity| activity.id == activity_id)
            .ok_or_else(|| EngineError::activity_not_found(activity_id))
    }

    fn transition(activity: &Activity, action: LifecycleAction) -> EngineResult<ActivityStatus> {
        activity.status.apply(action).ok_or_else(|| {
            warn!("Refused to {} activity {} in status {}", action, activity.id, activity.status);
            EngineError::InvalidTransition {
                activity_id: activity.id.clone(),
                action,
                status: activity.status,
            }
        })
    }

    /// Checks name, description and points; returns the points as stored
    fn validate_activity(name: &str, description: Option<&str>, points: i64) -> EngineResult<u32> {
        if name.is_empty() {
            return Err(EngineError::validation("Activity name cannot be empty"));
        }
        if name.chars().count() > MAX_NAME_LENGTH {
            return Err(EngineError::validation(format!(
                "Activity name cannot be longer than {} characters",
                MAX_NAME_LENGTH
            )));
        }
        if let Some(description) = description {
            if description.chars().count() > MAX_DESCRIPTION_LENGTH {
                return Err(EngineError::validation(format!(
                    "Description cannot be longer than {} characters",
                    MAX_DESCRIPTION_LENGTH
                )));
            }
        }
        if points < i64::from(MIN_POINTS) || points > i64::from(MAX_POINTS) {
            return Err(EngineError::validation(format!(
                "Points must be between {} and {}",
                MIN_POINTS, MAX_POINTS
            )));
        }
        Ok(points as u32)
    }
}
