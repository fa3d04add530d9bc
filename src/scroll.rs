//! Scrolling messages that are wider than the display.
//!
//! A message that fits is shown right-justified and held for the whole duration. A longer one
//! is shown as a series of windows, moving one digit at a time, with an extra pause on the
//! first and the last window so that the start and end of the message can be read.

use embedded_hal::blocking::delay::DelayMs;

use crate::bus::SerialBus;
use crate::font::BLANK;
use crate::text::{preprocess, DecoratedChar};
use crate::{LedControl, DIGITS};

/// Longest message (in digits) that is scrolled, longer messages are cut
pub const MAX_MESSAGE_LEN: usize = 64;

/// Timing and geometry of a scrolling message
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ScrollConfig {
    /// Visible digits per display
    pub digits: usize,
    /// Messages are truncated to this many digits before scrolling
    pub max_len: usize,
    /// Percent of `duration / digits` each window is shown for
    pub each_dwell_percent: u32,
    /// Percent of `duration` added after the first window
    pub first_extra_percent: u32,
    /// Percent of `duration` added after the last window
    pub last_extra_percent: u32,
}

impl Default for ScrollConfig {
    fn default() -> Self {
        ScrollConfig {
            digits: DIGITS,
            max_len: MAX_MESSAGE_LEN,
            each_dwell_percent: 115,
            first_extra_percent: 55,
            last_extra_percent: 50,
        }
    }
}

impl ScrollConfig {
    /// Number of visible digits, clamped to 1..=8
    pub fn with_digits(mut self, digits: usize) -> Self {
        self.digits = digits.clamp(1, DIGITS);
        self
    }

    pub fn with_max_len(mut self, max_len: usize) -> Self {
        self.max_len = max_len;
        self
    }

    pub fn with_dwell(mut self, each_percent: u32, first_percent: u32, last_percent: u32) -> Self {
        self.each_dwell_percent = each_percent;
        self.first_extra_percent = first_percent;
        self.last_extra_percent = last_percent;
        self
    }

    fn visible(&self) -> usize {
        self.digits.clamp(1, DIGITS)
    }

    /// Length actually played. Only messages that need scrolling are cut to `max_len`, and
    /// never below the display width.
    fn played_len(&self, len: usize) -> usize {
        let visible = self.visible();
        if len <= visible {
            len
        } else {
            len.min(self.max_len.max(visible))
        }
    }
}

/// One step of a scroll animation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Step {
    /// Show the window starting at `offset` then wait `dwell_ms`
    Window { offset: usize, dwell_ms: u32 },
    /// Leave the current window up for this many more milliseconds
    Pause(u32),
}

/// The full schedule for one message, yielded step by step
#[derive(Debug, Clone)]
pub struct ScrollPlan {
    windows: usize,
    each_ms: u32,
    first_extra_ms: u32,
    last_extra_ms: u32,
    scrolling: bool,
    cursor: usize,
}

impl ScrollPlan {
    /// Plan a message `len` digits long. Scrolling messages are first cut to `config.max_len`.
    pub fn new(config: &ScrollConfig, len: usize, duration_ms: u32) -> Self {
        let visible = config.visible();
        let len = config.played_len(len);

        if len <= visible {
            return ScrollPlan {
                windows: 1,
                each_ms: duration_ms,
                first_extra_ms: 0,
                last_extra_ms: 0,
                scrolling: false,
                cursor: 0,
            };
        }

        ScrollPlan {
            windows: len - visible + 1,
            each_ms: percent_of(duration_ms, config.each_dwell_percent, visible),
            first_extra_ms: percent_of(duration_ms, config.first_extra_percent, 1),
            last_extra_ms: percent_of(duration_ms, config.last_extra_percent, 1),
            scrolling: true,
            cursor: 0,
        }
    }

    /// Number of windows shown
    pub fn windows(&self) -> usize {
        self.windows
    }

    /// Dwell of every window
    pub fn each_ms(&self) -> u32 {
        self.each_ms
    }

    /// Whole playback time in milliseconds
    pub fn total_ms(&self) -> u64 {
        let windows = self.windows as u64 * u64::from(self.each_ms);
        windows + u64::from(self.first_extra_ms) + u64::from(self.last_extra_ms)
    }

    fn window(&self, offset: usize) -> Step {
        Step::Window {
            offset,
            dwell_ms: self.each_ms,
        }
    }
}

impl Iterator for ScrollPlan {
    type Item = Step;

    fn next(&mut self) -> Option<Step> {
        let cursor = self.cursor;
        self.cursor += 1;

        if !self.scrolling {
            return match cursor {
                0 => Some(self.window(0)),
                _ => None,
            };
        }

        // window 0, first pause, windows 1.., last pause
        match cursor {
            0 => Some(self.window(0)),
            1 => Some(Step::Pause(self.first_extra_ms)),
            n if n <= self.windows => Some(self.window(n - 1)),
            n if n == self.windows + 1 => Some(Step::Pause(self.last_extra_ms)),
            _ => None,
        }
    }
}

/// `duration * percent / divisor / 100` without overflowing, saturating at `u32::MAX`
fn percent_of(duration_ms: u32, percent: u32, divisor: usize) -> u32 {
    let scaled = u64::from(duration_ms) * u64::from(percent) / divisor.max(1) as u64 / 100;
    u32::try_from(scaled).unwrap_or(u32::MAX)
}

impl<B: SerialBus> LedControl<B> {
    /// Show `text` on `device` for `duration_ms`, scrolling if it does not fit. Returns once
    /// the last pause is over. All waiting is done by `delay`.
    pub fn display_and_scroll<D: DelayMs<u32>>(
        &mut self,
        device: usize,
        text: &[DecoratedChar],
        duration_ms: u32,
        delay: &mut D,
    ) -> Result<(), B::Error> {
        if device >= self.device_count() {
            return Ok(());
        }

        let config = *self.scroll_config();
        let visible = config.visible();
        let text = &text[..config.played_len(text.len())];
        let plan = ScrollPlan::new(&config, text.len(), duration_ms);

        #[cfg(feature = "defmt")]
        defmt::debug!(
            "scroll device={} len={} windows={} total_ms={}",
            device,
            text.len(),
            plan.windows(),
            plan.total_ms()
        );

        for step in plan {
            match step {
                Step::Window { offset, dwell_ms } => {
                    let end = (offset + visible).min(text.len());
                    self.render_window(device, &text[offset..end])?;

                    #[cfg(feature = "defmt")]
                    defmt::trace!("window offset={} dwell_ms={}", offset, dwell_ms);

                    delay.delay_ms(dwell_ms);
                }
                Step::Pause(ms) => delay.delay_ms(ms),
            }
        }

        Ok(())
    }

    /// Preprocess `text` and play it with [`display_and_scroll`](Self::display_and_scroll)
    pub fn display_text<D: DelayMs<u32>>(
        &mut self,
        device: usize,
        text: &str,
        duration_ms: u32,
        delay: &mut D,
    ) -> Result<(), B::Error> {
        let decorated = preprocess::<MAX_MESSAGE_LEN>(text);
        self.display_and_scroll(device, &decorated, duration_ms, delay)
    }

    /// Right-justify `window` on the display: its first char goes on the highest used digit,
    /// its last on digit 0. Unused digits on the left are blanked.
    fn render_window(&mut self, device: usize, window: &[DecoratedChar]) -> Result<(), B::Error> {
        let len = window.len();
        for (i, ch) in window.iter().enumerate() {
            self.set_char(device, (len - 1 - i) as u8, ch.code, ch.dot)?;
        }

        for digit in len..self.scroll_config().visible() {
            self.set_char(device, digit as u8, BLANK, false)?;
        }

        Ok(())
    }
}

#[cfg(feature = "std")]
impl<B: SerialBus> LedControl<B> {
    /// [`display_and_scroll`](Self::display_and_scroll) waiting with a blocking sleep
    pub fn display_and_scroll_blocking(
        &mut self,
        device: usize,
        text: &[DecoratedChar],
        duration_ms: u32,
    ) -> Result<(), B::Error> {
        self.display_and_scroll(device, text, duration_ms, &mut crate::delay::StdDelay)
    }

    /// [`display_text`](Self::display_text) waiting with a blocking sleep
    pub fn display_text_blocking(
        &mut self,
        device: usize,
        text: &str,
        duration_ms: u32,
    ) -> Result<(), B::Error> {
        self.display_text(device, text, duration_ms, &mut crate::delay::StdDelay)
    }
}
