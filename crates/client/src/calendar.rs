//! Calendar view arithmetic for the week and day grids.
//!
//! Everything here is layout bookkeeping over the fetched appointment list:
//! bucketing by day and hour, pixel offsets for cards, the current-time
//! line, and date navigation. None of it makes scheduling decisions.

use std::collections::BTreeMap;

use chrono::{DateTime, Datelike, Duration, NaiveDate, Timelike, Utc};

use crate::api::Appointment;

/// Number of color palette entries cards cycle through.
pub const PALETTE_SIZE: usize = 8;

pub const MIN_CARD_HEIGHT_PX: i64 = 20;
pub const MAX_CARD_HEIGHT_PX: i64 = 60;

/// Pixel height of one hour row in the grid.
const HOUR_ROW_PX: f64 = 60.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ViewMode {
    Week,
    Day,
}

/// Vertical placement of an appointment card inside its hour slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CardLayout {
    pub top_px: i64,
    pub height_px: i64,
}

/// View state for one calendar: a reference date, a working-hours window
/// (client-side only, never persisted), and the derived grid geometry.
#[derive(Debug, Clone)]
pub struct CalendarView {
    pub mode: ViewMode,
    /// Week start (Monday) in week mode, the day itself in day mode.
    pub selected_date: NaiveDate,
    pub working_hours_start: u32,
    pub working_hours_end: u32,
}

impl CalendarView {
    pub fn new(mode: ViewMode, today: NaiveDate) -> Self {
        let (start, end) = match mode {
            ViewMode::Week => (8, 20),
            ViewMode::Day => (9, 18),
        };
        Self {
            mode,
            selected_date: match mode {
                ViewMode::Week => week_start(today),
                ViewMode::Day => today,
            },
            working_hours_start: start,
            working_hours_end: end,
        }
    }

    /// Working hours are clamped to a sane window; start must stay below end.
    pub fn set_working_hours(&mut self, start: u32, end: u32) {
        if start < end && end <= 24 {
            self.working_hours_start = start;
            self.working_hours_end = end;
        }
    }

    /// The 7 days of the selected week, Monday first.
    pub fn week_days(&self) -> Vec<NaiveDate> {
        let monday = week_start(self.selected_date);
        (0..7).map(|i| monday + Duration::days(i)).collect()
    }

    /// Hourly slot starts between working-hours start (inclusive) and end
    /// (exclusive).
    pub fn time_slots(&self) -> Vec<u32> {
        (self.working_hours_start..self.working_hours_end).collect()
    }

    /// Appointments falling on the given calendar day.
    pub fn appointments_on<'a>(
        &self,
        appointments: &'a [Appointment],
        day: NaiveDate,
    ) -> Vec<&'a Appointment> {
        appointments
            .iter()
            .filter(|a| a.start_time.date_naive() == day)
            .collect()
    }

    /// Appointments for the selected day bucketed by hour-of-day, each
    /// bucket sorted by start time.
    pub fn appointments_by_hour<'a>(
        &self,
        appointments: &'a [Appointment],
    ) -> BTreeMap<u32, Vec<&'a Appointment>> {
        let mut buckets: BTreeMap<u32, Vec<&'a Appointment>> = BTreeMap::new();
        for appointment in self.appointments_on(appointments, self.selected_date) {
            buckets
                .entry(appointment.start_time.hour())
                .or_default()
                .push(appointment);
        }
        for bucket in buckets.values_mut() {
            bucket.sort_by_key(|a| a.start_time);
        }
        buckets
    }

    /// Card placement inside its hour row: top = minute-of-hour offset
    /// (never negative), height = duration clamped to the card range.
    pub fn card_layout(&self, appointment: &Appointment) -> CardLayout {
        CardLayout {
            top_px: (appointment.start_time.minute() as i64).max(0),
            height_px: (appointment.duration_minutes as i64)
                .clamp(MIN_CARD_HEIGHT_PX, MAX_CARD_HEIGHT_PX),
        }
    }

    /// Offset of the current-time line from the top of the grid, in pixels.
    /// Negative before working hours, beyond the grid after them; the caller
    /// decides whether to draw it.
    pub fn current_time_line_position(&self, now: DateTime<Utc>) -> f64 {
        let minutes_since_midnight = (now.hour() * 60 + now.minute()) as f64;
        (minutes_since_midnight - (self.working_hours_start * 60) as f64) / 60.0 * HOUR_ROW_PX
    }

    /// A slot is past once its hour has fully elapsed.
    pub fn is_past_slot(&self, day: NaiveDate, slot_hour: u32, now: DateTime<Utc>) -> bool {
        match day.and_hms_opt(slot_hour + 1, 0, 0) {
            Some(slot_end) => slot_end <= now.naive_utc(),
            // slot_hour 23 has no next hour on the same day
            None => day < now.date_naive(),
        }
    }

    /// Stable palette slot for the appointment at `index` in the list.
    pub fn palette_index(&self, index: usize) -> usize {
        index % PALETTE_SIZE
    }

    pub fn previous(&mut self) {
        self.selected_date = self.selected_date - self.step();
    }

    pub fn next(&mut self) {
        self.selected_date = self.selected_date + self.step();
    }

    pub fn today(&mut self, today: NaiveDate) {
        self.selected_date = match self.mode {
            ViewMode::Week => week_start(today),
            ViewMode::Day => today,
        };
    }

    fn step(&self) -> Duration {
        match self.mode {
            ViewMode::Week => Duration::days(7),
            ViewMode::Day => Duration::days(1),
        }
    }
}

/// Monday of the week containing `date`.
pub fn week_start(date: NaiveDate) -> NaiveDate {
    date - Duration::days(date.weekday().num_days_from_monday() as i64)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use uuid::Uuid;

    fn appointment(start: DateTime<Utc>, duration: i32) -> Appointment {
        Appointment {
            id: Uuid::new_v4(),
            owner_id: Uuid::new_v4(),
            service_id: Uuid::new_v4(),
            client_name: "Jane".into(),
            start_time: start,
            duration_minutes: duration,
            created_at: start,
            updated_at: start,
            service: None,
        }
    }

    fn at(day: u32, hour: u32, minute: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 3, day, hour, minute, 0).unwrap()
    }

    #[test]
    fn week_starts_on_monday() {
        // 2026-03-04 is a Wednesday
        let wednesday = NaiveDate::from_ymd_opt(2026, 3, 4).unwrap();
        assert_eq!(week_start(wednesday), NaiveDate::from_ymd_opt(2026, 3, 2).unwrap());
        // Monday maps to itself
        let monday = NaiveDate::from_ymd_opt(2026, 3, 2).unwrap();
        assert_eq!(week_start(monday), monday);
        // Sunday belongs to the preceding Monday's week
        let sunday = NaiveDate::from_ymd_opt(2026, 3, 8).unwrap();
        assert_eq!(week_start(sunday), monday);
    }

    #[test]
    fn default_working_hours_differ_per_view() {
        let today = NaiveDate::from_ymd_opt(2026, 3, 4).unwrap();
        let week = CalendarView::new(ViewMode::Week, today);
        assert_eq!((week.working_hours_start, week.working_hours_end), (8, 20));
        let day = CalendarView::new(ViewMode::Day, today);
        assert_eq!((day.working_hours_start, day.working_hours_end), (9, 18));
    }

    #[test]
    fn slot_count_matches_working_window() {
        let today = NaiveDate::from_ymd_opt(2026, 3, 4).unwrap();
        let mut view = CalendarView::new(ViewMode::Week, today);
        assert_eq!(view.time_slots().len(), 12);
        assert_eq!(view.time_slots().first(), Some(&8));
        assert_eq!(view.time_slots().last(), Some(&19));

        view.set_working_hours(10, 14);
        assert_eq!(view.time_slots(), vec![10, 11, 12, 13]);

        // Inverted window is rejected, state unchanged
        view.set_working_hours(15, 9);
        assert_eq!(view.time_slots(), vec![10, 11, 12, 13]);
    }

    #[test]
    fn week_days_are_seven_consecutive_from_monday() {
        let view = CalendarView::new(ViewMode::Week, NaiveDate::from_ymd_opt(2026, 3, 4).unwrap());
        let days = view.week_days();
        assert_eq!(days.len(), 7);
        assert_eq!(days[0], NaiveDate::from_ymd_opt(2026, 3, 2).unwrap());
        assert_eq!(days[6], NaiveDate::from_ymd_opt(2026, 3, 8).unwrap());
    }

    #[test]
    fn bucketing_filters_to_selected_day_and_sorts_within_hour() {
        let day = NaiveDate::from_ymd_opt(2026, 3, 4).unwrap();
        let view = CalendarView::new(ViewMode::Day, day);
        let appointments = vec![
            appointment(at(4, 9, 30), 30),
            appointment(at(4, 9, 0), 30),
            appointment(at(4, 14, 0), 30),
            appointment(at(5, 9, 0), 30), // other day, excluded
        ];
        let buckets = view.appointments_by_hour(&appointments);
        assert_eq!(buckets.keys().copied().collect::<Vec<_>>(), vec![9, 14]);
        let nine = &buckets[&9];
        assert_eq!(nine.len(), 2);
        assert!(nine[0].start_time < nine[1].start_time);
    }

    #[test]
    fn card_height_clamps_to_range() {
        let view = CalendarView::new(ViewMode::Week, NaiveDate::from_ymd_opt(2026, 3, 2).unwrap());
        let short = view.card_layout(&appointment(at(2, 9, 0), 10));
        assert_eq!(short.height_px, MIN_CARD_HEIGHT_PX);
        let long = view.card_layout(&appointment(at(2, 9, 0), 120));
        assert_eq!(long.height_px, MAX_CARD_HEIGHT_PX);
        let exact = view.card_layout(&appointment(at(2, 9, 0), 45));
        assert_eq!(exact.height_px, 45);
    }

    #[test]
    fn card_top_tracks_minute_offset() {
        let view = CalendarView::new(ViewMode::Week, NaiveDate::from_ymd_opt(2026, 3, 2).unwrap());
        assert_eq!(view.card_layout(&appointment(at(2, 9, 0), 30)).top_px, 0);
        assert_eq!(view.card_layout(&appointment(at(2, 9, 45), 30)).top_px, 45);
    }

    #[test]
    fn current_time_line_is_relative_to_working_start() {
        let view = CalendarView::new(ViewMode::Week, NaiveDate::from_ymd_opt(2026, 3, 2).unwrap());
        // 08:00 with an 8:00 start sits at the top
        assert_eq!(view.current_time_line_position(at(2, 8, 0)), 0.0);
        // 09:30 is one and a half rows down
        assert_eq!(view.current_time_line_position(at(2, 9, 30)), 90.0);
        // before working hours the offset goes negative
        assert!(view.current_time_line_position(at(2, 7, 0)) < 0.0);
    }

    #[test]
    fn past_slot_detection() {
        let day = NaiveDate::from_ymd_opt(2026, 3, 4).unwrap();
        let view = CalendarView::new(ViewMode::Day, day);
        let now = at(4, 12, 30);
        assert!(view.is_past_slot(day, 10, now)); // 10-11 fully elapsed
        assert!(view.is_past_slot(day, 11, now)); // ended exactly at 12 < 12:30
        assert!(!view.is_past_slot(day, 12, now)); // in progress
        assert!(!view.is_past_slot(day, 14, now)); // future
    }

    #[test]
    fn palette_cycles_over_eight_entries() {
        let view = CalendarView::new(ViewMode::Week, NaiveDate::from_ymd_opt(2026, 3, 2).unwrap());
        assert_eq!(view.palette_index(0), 0);
        assert_eq!(view.palette_index(7), 7);
        assert_eq!(view.palette_index(8), 0);
        assert_eq!(view.palette_index(19), 3);
    }

    #[test]
    fn navigation_steps_by_view_granularity() {
        let today = NaiveDate::from_ymd_opt(2026, 3, 4).unwrap();
        let mut week = CalendarView::new(ViewMode::Week, today);
        week.next();
        assert_eq!(week.selected_date, NaiveDate::from_ymd_opt(2026, 3, 9).unwrap());
        week.previous();
        week.previous();
        assert_eq!(week.selected_date, NaiveDate::from_ymd_opt(2026, 2, 23).unwrap());
        week.today(today);
        assert_eq!(week.selected_date, NaiveDate::from_ymd_opt(2026, 3, 2).unwrap());

        let mut day = CalendarView::new(ViewMode::Day, today);
        day.next();
        assert_eq!(day.selected_date, NaiveDate::from_ymd_opt(2026, 3, 5).unwrap());
        day.today(today);
        assert_eq!(day.selected_date, today);
    }
}
