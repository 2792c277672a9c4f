//! Timers, the theme change watch and transient notices.
//!
//! The UI shell calls [`Scheduler::poll`] once per frame with the current
//! [`Instant`] and acts on the returned ticks. Nothing in here reads the real
//! clock, which keeps every schedule decision testable.

use std::time::{Duration, Instant};

use chrono::NaiveDate;

use crate::theme::Theme;

/// How often the OS theme is probed for changes.
pub const THEME_POLL_INTERVAL: Duration = Duration::from_secs(2);

/// How often the week number is recomputed. Coarse on purpose: the week
/// changes at most once a day.
pub const WEEK_REFRESH_INTERVAL: Duration = Duration::from_secs(5 * 60);

/// Time sources the app depends on. Swapped for fixed values in tests.
pub trait Clock {
    fn now(&self) -> Instant;
    fn today(&self) -> NaiveDate;
}

/// The real wall clock.
#[derive(Clone, Copy, Debug, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> Instant {
        Instant::now()
    }

    fn today(&self) -> NaiveDate {
        chrono::Local::now().date_naive()
    }
}

// ----------------------------------------------------------------------------

/// A due unit of periodic work.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Tick {
    /// Recompute the week number and refresh badge/tray text.
    WeekRefresh,
    /// Probe the OS theme.
    ThemePoll,
}

/// Fixed-interval scheduler for the two periodic jobs.
///
/// A late poll (the process was suspended, the event loop stalled) emits each
/// overdue tick once, not once per missed period, and re-anchors the deadline
/// at the poll time.
#[derive(Clone, Copy, Debug)]
pub struct Scheduler {
    next_week_refresh: Instant,
    next_theme_poll: Instant,
}

impl Scheduler {
    /// First ticks come one full interval after `now`; callers do their
    /// initial refresh themselves.
    pub fn new(now: Instant) -> Self {
        Self {
            next_week_refresh: now + WEEK_REFRESH_INTERVAL,
            next_theme_poll: now + THEME_POLL_INTERVAL,
        }
    }

    /// All ticks due at `now`, week refresh first.
    pub fn poll(&mut self, now: Instant) -> Vec<Tick> {
        let mut due = Vec::new();
        if now >= self.next_week_refresh {
            due.push(Tick::WeekRefresh);
            self.next_week_refresh = now + WEEK_REFRESH_INTERVAL;
        }
        if now >= self.next_theme_poll {
            due.push(Tick::ThemePoll);
            self.next_theme_poll = now + THEME_POLL_INTERVAL;
        }
        due
    }

    /// When the next tick is due. Feed this to the frame scheduler so an idle
    /// app repaints exactly then.
    pub fn next_deadline(&self) -> Instant {
        self.next_week_refresh.min(self.next_theme_poll)
    }

    /// Time from `now` until [`Self::next_deadline`], zero if overdue.
    pub fn until_next(&self, now: Instant) -> Duration {
        self.next_deadline().saturating_duration_since(now)
    }
}

// ----------------------------------------------------------------------------

/// Deduplicates theme probes so a restyle only happens on a real change.
#[derive(Clone, Copy, Debug)]
pub struct ThemeWatch {
    current: Theme,
}

impl ThemeWatch {
    pub fn new(initial: Theme) -> Self {
        Self { current: initial }
    }

    pub fn current(&self) -> Theme {
        self.current
    }

    /// Records a probe result. `Some` with the new theme on a change, `None`
    /// when the probe matched what is already applied.
    pub fn observe(&mut self, probed: Theme) -> Option<Theme> {
        if probed == self.current {
            None
        } else {
            self.current = probed;
            Some(probed)
        }
    }
}

// ----------------------------------------------------------------------------

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum NoticeKind {
    Info,
    Warning,
}

const INFO_NOTICE_TTL: Duration = Duration::from_millis(2000);
const WARNING_NOTICE_TTL: Duration = Duration::from_millis(3000);

/// A short-lived message shown near the tray, e.g. after toggling autostart.
#[derive(Clone, Debug)]
pub struct Notice {
    pub text: String,
    pub kind: NoticeKind,
    expires_at: Instant,
}

impl Notice {
    pub fn info(text: impl Into<String>, now: Instant) -> Self {
        Self {
            text: text.into(),
            kind: NoticeKind::Info,
            expires_at: now + INFO_NOTICE_TTL,
        }
    }

    pub fn warning(text: impl Into<String>, now: Instant) -> Self {
        Self {
            text: text.into(),
            kind: NoticeKind::Warning,
            expires_at: now + WARNING_NOTICE_TTL,
        }
    }

    pub fn expired(&self, now: Instant) -> bool {
        now >= self.expires_at
    }

    /// When the notice should disappear, for frame scheduling.
    pub fn deadline(&self) -> Instant {
        self.expires_at
    }
}

// ----------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::theme::{Mode, Rgb};

    #[test]
    fn nothing_due_before_first_interval() {
        let t0 = Instant::now();
        let mut scheduler = Scheduler::new(t0);
        assert!(scheduler.poll(t0).is_empty());
        assert!(scheduler.poll(t0 + Duration::from_millis(1999)).is_empty());
    }

    #[test]
    fn theme_poll_every_two_seconds() {
        let t0 = Instant::now();
        let mut scheduler = Scheduler::new(t0);
        assert_eq!(scheduler.poll(t0 + Duration::from_secs(2)), vec![Tick::ThemePoll]);
        assert!(scheduler.poll(t0 + Duration::from_secs(3)).is_empty());
        assert_eq!(scheduler.poll(t0 + Duration::from_secs(4)), vec![Tick::ThemePoll]);
    }

    #[test]
    fn week_refresh_precedes_theme_poll_when_both_due() {
        let t0 = Instant::now();
        let mut scheduler = Scheduler::new(t0);
        assert_eq!(
            scheduler.poll(t0 + Duration::from_secs(300)),
            vec![Tick::WeekRefresh, Tick::ThemePoll]
        );
    }

    #[test]
    fn late_poll_coalesces_missed_periods() {
        let t0 = Instant::now();
        let mut scheduler = Scheduler::new(t0);

        // Half an hour late: each job fires once, not per missed period.
        let late = t0 + Duration::from_secs(1800);
        assert_eq!(scheduler.poll(late), vec![Tick::WeekRefresh, Tick::ThemePoll]);
        assert!(scheduler.poll(late).is_empty());

        // Deadlines are re-anchored at the late poll, not at t0.
        assert_eq!(scheduler.next_deadline(), late + THEME_POLL_INTERVAL);
    }

    #[test]
    fn next_deadline_tracks_earliest_job() {
        let t0 = Instant::now();
        let mut scheduler = Scheduler::new(t0);
        assert_eq!(scheduler.next_deadline(), t0 + THEME_POLL_INTERVAL);
        assert_eq!(scheduler.until_next(t0), THEME_POLL_INTERVAL);

        // Just before the week refresh, that becomes the earliest.
        let near = t0 + Duration::from_secs(299);
        scheduler.poll(near);
        assert_eq!(scheduler.next_deadline(), t0 + WEEK_REFRESH_INTERVAL);
        assert!(scheduler.until_next(near) <= Duration::from_secs(1));
    }

    #[test]
    fn theme_watch_only_reports_changes() {
        let light = Theme::default();
        let dark = Theme { mode: Mode::Dark, accent: light.accent };
        let mut watch = ThemeWatch::new(light);

        assert_eq!(watch.observe(light), None);
        assert_eq!(watch.observe(dark), Some(dark));
        assert_eq!(watch.observe(dark), None);
        assert_eq!(watch.current(), dark);

        let recolored = Theme {
            mode: Mode::Dark,
            accent: Rgb::new(255, 140, 0),
        };
        assert_eq!(watch.observe(recolored), Some(recolored));
    }

    #[test]
    fn notice_lifetimes() {
        let t0 = Instant::now();
        let info = Notice::info("Autostart enabled.", t0);
        let warning = Notice::warning("Failed to update autostart setting.", t0);

        assert!(!info.expired(t0 + Duration::from_millis(1999)));
        assert!(info.expired(t0 + Duration::from_millis(2000)));
        assert!(!warning.expired(t0 + Duration::from_millis(2500)));
        assert!(warning.expired(t0 + Duration::from_millis(3000)));
        assert_eq!(warning.deadline(), t0 + Duration::from_millis(3000));
    }
}
