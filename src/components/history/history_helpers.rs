use im::Vector;

use crate::view_model::{Activity, ActivityId, SenderId};

/// Linear scan. This is the hot path for long logs; an id index would
/// have to be kept in insertion order alongside the vector.
pub fn position_of(activities: &Vector<Activity>, id: &ActivityId) -> Option<usize> {
    activities.iter().position(|e| &e.id == id)
}

/// Replace the entry with the same id in place, or append.
///
/// Before appending, any typing indicator of the same sender is dropped:
/// real content (or a newer indicator) supersedes it.
pub fn upsert_activity(activities: &Vector<Activity>, activity: Activity) -> Vector<Activity> {
    let mut updated = activities.clone();
    if let Some(pos) = position_of(&updated, &activity.id) {
        updated[pos] = activity;
        return updated;
    }
    if remove_typing_from(&mut updated, activity.sender()) {
        log::debug!("typing of {} superseded by {}", activity.sender(), activity.id);
    }
    updated.push_back(activity);
    updated
}

/// Returns `None` if no entry carries `id`, so callers can keep the old log.
pub fn remove_activity(activities: &Vector<Activity>, id: &ActivityId) -> Option<Vector<Activity>> {
    let pos = position_of(activities, id)?;
    let mut updated = activities.clone();
    updated.remove(pos);
    Some(updated)
}

fn remove_typing_from(activities: &mut Vector<Activity>, sender: &SenderId) -> bool {
    let mut removed = false;
    while let Some(pos) = activities.iter().position(|e| e.is_typing_from(sender)) {
        activities.remove(pos);
        removed = true;
    }
    removed
}

/// Only keep the newest `limit` entries. Otherwise memory piles up on
/// long running conversations.
pub fn trim_to_limit(activities: &Vector<Activity>, limit: usize) -> Option<Vector<Activity>> {
    let excess = activities.len().checked_sub(limit).filter(|e| *e > 0)?;
    let mut updated = activities.clone();
    Some(updated.split_off(excess))
}
