//! Client-side companion to the scheduling API: a typed HTTP client, state
//! containers for the service/appointment lists, and the calendar view
//! arithmetic used to lay out week and day grids.

pub mod api;
pub mod calendar;
pub mod store;
