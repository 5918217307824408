//! Notification mailbox between element callbacks and the session

use crate::{audio::MediaNotification, Session};
use std::cell::RefCell;
use std::collections::VecDeque;
use std::rc::{Rc, Weak};

/// Queue of media notifications waiting to be applied to a session
///
/// Element callbacks may fire while the session is already borrowed (a
/// `play()` call inside a session operation, for example). Notifications
/// are therefore queued and applied as soon as the session is free, in the
/// order they were posted.
#[derive(Clone, Default)]
pub struct Mailbox {
    inbox: Rc<RefCell<VecDeque<MediaNotification>>>,
    target: Rc<RefCell<Option<Weak<RefCell<Session>>>>>,
}

impl Mailbox {
    /// Create an unattached mailbox
    pub fn new() -> Self {
        Self::default()
    }

    /// Deliver future notifications to `session`
    pub fn attach(&self, session: &Rc<RefCell<Session>>) {
        *self.target.borrow_mut() = Some(Rc::downgrade(session));
    }

    /// Queue a notification and try to deliver it
    pub fn post(&self, notification: MediaNotification) {
        self.inbox.borrow_mut().push_back(notification);
        self.flush();
    }

    /// Apply queued notifications if the session is not borrowed
    pub fn flush(&self) {
        let Some(session) = self.target.borrow().as_ref().and_then(Weak::upgrade) else {
            return;
        };
        let Ok(mut session) = session.try_borrow_mut() else {
            // Delivered by the caller's own flush once it releases the session
            return;
        };

        loop {
            let next = self.inbox.borrow_mut().pop_front();
            match next {
                Some(notification) => session.handle_media_event(notification),
                None => break,
            }
        }
    }

    /// Number of queued notifications
    pub fn pending(&self) -> usize {
        self.inbox.borrow().len()
    }
}

impl std::fmt::Debug for Mailbox {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Mailbox")
            .field("pending", &self.pending())
            .finish_non_exhaustive()
    }
}
