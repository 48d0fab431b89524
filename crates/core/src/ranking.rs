//! Ranking & Merge
//!
//! Orders devices from every platform into one menu: most recently opened
//! first, and iOS ahead of Android whenever history does not decide.

use std::cmp::Ordering;

use crate::config::UsageHistory;
use crate::device::{Device, Platform};

/// Merge and order `devices` against a history snapshot.
///
/// Sorting is stable, so devices that compare equal keep their input order.
pub fn rank(mut devices: Vec<Device>, history: &UsageHistory) -> Vec<Device> {
    devices.sort_by(|a, b| compare(a, b, history));
    devices
}

/// Total order used by [`rank`].
pub fn compare(a: &Device, b: &Device, history: &UsageHistory) -> Ordering {
    // Absent history sorts as "", below any real timestamp
    let a_opened = history.last_opened(a.id()).unwrap_or_default();
    let b_opened = history.last_opened(b.id()).unwrap_or_default();

    b_opened
        .cmp(a_opened)
        .then_with(|| platform_weight(a.platform()).cmp(&platform_weight(b.platform())))
}

fn platform_weight(platform: Platform) -> u8 {
    match platform {
        Platform::Ios => 0,
        Platform::Android => 1,
    }
}
