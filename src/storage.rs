use gloo_storage::{LocalStorage, Storage};

/// The one localStorage key the app uses. Holds the id of the last dismissed announcement.
pub const ANNOUNCEMENT_KEY: &str = "announcement_dismissed";

pub fn announcement_dismissed(id: &str) -> bool {
    LocalStorage::get::<String>(ANNOUNCEMENT_KEY)
        .map(|stored| stored == id)
        .unwrap_or(false)
}

pub fn dismiss_announcement(id: &str) {
    if let Err(e) = LocalStorage::set(ANNOUNCEMENT_KEY, id) {
        tracing::warn!(error = ?e, "could not persist banner dismissal");
    }
}
