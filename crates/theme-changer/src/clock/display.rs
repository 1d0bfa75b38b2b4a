use chrono::NaiveDateTime;
use minijinja::{context, Environment};

use crate::error::ThemeError;

/// Class of the element wrapping the time and date slots.
pub const DISPLAY_CLASS: &str = "core__clock_display";

/// Selector of the time slot, relative to the widget element.
pub const TIME_SELECTOR: &str = ".core__clock_display .time";

/// Selector of the date slot, relative to the widget element.
pub const DATE_SELECTOR: &str = ".core__clock_display .date";

const WIDGET_TEMPLATE_NAME: &str = "clock.html";

const WIDGET_TEMPLATE: &str = r#"<div id="{{ widget_id }}" class="core__clock">
  <div class="{{ display_class }}">
    <span class="time"></span>
    <span class="date"></span>
  </div>
</div>"#;

/// A piece of text on the page the clock writes into.
pub trait TextSlot {
    fn text(&self) -> String;
    fn set_text(&mut self, text: &str);
}

impl TextSlot for String {
    fn text(&self) -> String {
        self.clone()
    }

    fn set_text(&mut self, text: &str) {
        self.clear();
        self.push_str(text);
    }
}

/// `HH:MM:SS`, 24 hour clock.
pub fn format_time(now: &NaiveDateTime) -> String {
    now.format("%H:%M:%S").to_string()
}

/// `DD-MM-YYYY`.
pub fn format_date(now: &NaiveDateTime) -> String {
    now.format("%d-%m-%Y").to_string()
}

/// Renders the widget shell the clock slots live in.
pub fn render_widget(widget_id: &str) -> Result<String, ThemeError> {
    let mut env = Environment::new();
    env.add_template(WIDGET_TEMPLATE_NAME, WIDGET_TEMPLATE)?;
    let tmpl = env.get_template(WIDGET_TEMPLATE_NAME)?;
    Ok(tmpl.render(context! {
        widget_id => widget_id,
        display_class => DISPLAY_CLASS,
    })?)
}

/// The time and date slots of one clock widget.
#[derive(Debug, Clone)]
pub struct ClockWidget<T> {
    time: T,
    date: T,
}

impl<T: TextSlot> ClockWidget<T> {
    pub fn new(time: T, date: T) -> Self {
        Self { time, date }
    }

    /// Writes the time, and the date if it changed.
    pub fn update(&mut self, now: &NaiveDateTime) {
        self.time.set_text(&format_time(now));

        let date = format_date(now);
        if self.date.text() != date {
            self.date.set_text(&date);
        }
    }

    pub fn time(&self) -> &T {
        &self.time
    }

    pub fn date(&self) -> &T {
        &self.date
    }

    pub fn into_slots(self) -> (T, T) {
        (self.time, self.date)
    }
}
