//! Customer notices stored in the session.
//!
//! A notice is pushed when a request is interrupted and shown by the next page
//! that renders notices, which also clears them.

use tower_sessions::Session;

use order_value_bouncer_core::Notice;

use crate::models::session_keys;

/// Queue a notice for the next rendered page.
///
/// A notice identical to one already queued is not added again, so a blocked
/// checkout followed by the cart page's own check shows the message once.
///
/// # Errors
///
/// Returns an error if the session cannot be read or written.
pub async fn add_notice(
    session: &Session,
    notice: Notice,
) -> Result<(), tower_sessions::session::Error> {
    let mut notices = session
        .get::<Vec<Notice>>(session_keys::NOTICES)
        .await?
        .unwrap_or_default();

    if notices.contains(&notice) {
        return Ok(());
    }

    notices.push(notice);
    session.insert(session_keys::NOTICES, notices).await
}

/// Remove and return every queued notice.
///
/// # Errors
///
/// Returns an error if the session cannot be read or written.
pub async fn take_notices(session: &Session) -> Result<Vec<Notice>, tower_sessions::session::Error> {
    Ok(session
        .remove::<Vec<Notice>>(session_keys::NOTICES)
        .await?
        .unwrap_or_default())
}
