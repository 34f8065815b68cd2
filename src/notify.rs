//! User Feedback
//!
//! Blocking failure notifications, the invalid-input shake, and the single
//! place where mutation results are settled.

use std::time::Duration;

use leptos::prelude::*;

use crate::config::SHAKE_MS;
use crate::error::{Operation, TodoError};
use crate::mutation::MutationResult;
use crate::store::{store_apply_patch, AppStore};

/// Log the failure and show a blocking alert
pub fn report_failure(op: Operation, err: &TodoError) {
    log::error!("{:?} failed: {}", op, err);
    if let Some(window) = web_sys::window() {
        let _ = window.alert_with_message(&err.notification(op));
    }
}

/// Raise the invalid-input cue for a moment
pub fn shake(flag: RwSignal<bool>) {
    flag.set(true);
    set_timeout(move || flag.set(false), Duration::from_millis(SHAKE_MS));
}

/// Apply a mutation result to the store. Returns `true` on success.
pub fn settle(store: AppStore, op: Operation, result: MutationResult, shaking: Option<RwSignal<bool>>) -> bool {
    match result {
        Ok(Some(patch)) => {
            store_apply_patch(&store, patch);
            true
        }
        Ok(None) => true,
        Err(err) => {
            reject(op, &err, shaking);
            false
        }
    }
}

/// Invalid input shakes the field; anything else is a blocking notification
pub fn reject(op: Operation, err: &TodoError, shaking: Option<RwSignal<bool>>) {
    if err.is_validation() {
        log::debug!("{:?} rejected: {}", op, err);
        if let Some(flag) = shaking {
            shake(flag);
        }
    } else {
        report_failure(op, err);
    }
}
