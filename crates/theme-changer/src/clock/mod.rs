//! Clock widget: a text display refreshed once per second.
//!
//! The widget is two text slots, one for the time (`HH:MM:SS`) and one for
//! the date (`DD-MM-YYYY`). Every tick rewrites the time; the date is only
//! rewritten when its text actually changes.
//!
//! The refresh loop is a cancellable task:
//!
//! - natively, [`spawn`] runs it on a thread and returns a [`ClockHandle`]
//! - in the browser, `web::clock_init` drives it from `setInterval`
//!
//! Both stop when their handle is stopped or dropped.

mod display;
#[cfg(not(target_arch = "wasm32"))]
mod task;

pub use display::{
    format_date, format_time, render_widget, ClockWidget, TextSlot, DATE_SELECTOR,
    DISPLAY_CLASS, TIME_SELECTOR,
};
#[cfg(not(target_arch = "wasm32"))]
pub use task::{spawn, ClockHandle};

use chrono::NaiveDateTime;

/// Refresh interval used by the page widget.
pub const TICK: std::time::Duration = std::time::Duration::from_secs(1);

/// Where the clock reads the current time from.
pub trait TimeSource {
    fn now(&self) -> NaiveDateTime;
}

/// The local wall clock.
#[derive(Debug, Clone, Copy, Default)]
pub struct LocalTime;

impl TimeSource for LocalTime {
    fn now(&self) -> NaiveDateTime {
        chrono::Local::now().naive_local()
    }
}

impl<F> TimeSource for F
where
    F: Fn() -> NaiveDateTime,
{
    fn now(&self) -> NaiveDateTime {
        self()
    }
}
