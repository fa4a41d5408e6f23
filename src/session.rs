use crate::stats;
use std::time::Instant;

/// Countdown length used when nothing else is configured.
pub const DEFAULT_DURATION_SECS: u64 = 60;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Status {
    Idle,
    Running,
    Finished,
}

/// Classification of one reference character against the typed input.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CharClass {
    Pending,
    Current,
    Correct,
    Incorrect,
}

/// Final results snapshot, frozen when a session finishes.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Report {
    pub gross_wpm: f64,
    pub net_wpm: u32,
    pub accuracy: u32,
    pub total_chars: usize,
}

/// One typing-test attempt: reference passage, countdown, typed input and the
/// per-character classification derived from it.
///
/// The session is a strict state machine (Idle -> Running -> Finished ->
/// reset -> Idle); operations arriving in the wrong state are silent no-ops
/// rather than errors. All statistics are recomputed on demand from the raw
/// counters, never mutated independently.
#[derive(Debug)]
pub struct Session {
    text: String,
    reference: Vec<char>,
    status: Status,
    started_at: Option<Instant>,
    duration_secs: u64,
    remaining_secs: u64,
    typed: Vec<char>,
    error_count: usize,
    classes: Vec<CharClass>,
    final_report: Option<Report>,
}

impl Session {
    pub fn new(reference_text: impl Into<String>, duration_secs: u64) -> Self {
        let text = reference_text.into();
        let reference: Vec<char> = text.chars().collect();
        let classes = vec![CharClass::Pending; reference.len()];

        Self {
            text,
            reference,
            status: Status::Idle,
            started_at: None,
            duration_secs,
            remaining_secs: duration_secs,
            typed: Vec::new(),
            error_count: 0,
            classes,
            final_report: None,
        }
    }

    /// Re-initialize to a fresh Idle state over a new reference passage.
    /// Valid from any status; this is the only way out of Finished.
    pub fn reset(&mut self, reference_text: impl Into<String>) {
        *self = Session::new(reference_text, self.duration_secs);
    }

    /// Idle -> Running: records the start instant and arms the countdown.
    /// No-op from any other status, regardless of what triggered it.
    pub fn start(&mut self) {
        if self.status != Status::Idle {
            return;
        }

        self.status = Status::Running;
        self.started_at = Some(Instant::now());
    }

    /// One countdown step, expected once per second while Running. Decrements
    /// before the zero-check; at zero the session finishes. Ticks arriving in
    /// Idle or Finished are suppressed, so the countdown can never go
    /// negative and a straggler tick after the end changes nothing.
    pub fn tick(&mut self) {
        if self.status != Status::Running {
            return;
        }

        self.remaining_secs = self.remaining_secs.saturating_sub(1);

        if self.remaining_secs == 0 {
            self.end();
        }
    }

    /// Accept the full contents of the input field and reclassify the
    /// reference against it. Only valid while Running; stray input events in
    /// Idle/Finished are ignored.
    ///
    /// The error count is recomputed from scratch on every call rather than
    /// accumulated, so backspacing over a mistake never double-counts it.
    /// Typing the whole reference ends the session regardless of the clock.
    pub fn on_input(&mut self, raw: &str) {
        if self.status != Status::Running {
            return;
        }

        let raw_len = raw.chars().count();
        self.typed = raw.chars().take(self.reference.len()).collect();
        self.classify();

        if raw_len >= self.reference.len() {
            self.end();
        }
    }

    /// Running -> Finished: freezes the final report. The status change is
    /// what disables further input and countdown ticks.
    pub fn end(&mut self) {
        if self.status != Status::Running {
            return;
        }

        self.status = Status::Finished;
        self.final_report = Some(self.report_at(Instant::now()));
    }

    fn classify(&mut self) {
        self.error_count = 0;

        for idx in 0..self.reference.len() {
            self.classes[idx] = if idx < self.typed.len() {
                if self.typed[idx] == self.reference[idx] {
                    CharClass::Correct
                } else {
                    self.error_count += 1;
                    CharClass::Incorrect
                }
            } else if idx == self.typed.len() {
                CharClass::Current
            } else {
                CharClass::Pending
            };
        }
    }

    /// Derived statistics at an explicit instant. Pure with respect to the
    /// session counters, which keeps the scoring testable without sleeping.
    pub fn report_at(&self, now: Instant) -> Report {
        let elapsed_minutes = match self.started_at {
            Some(started) => now.duration_since(started).as_secs_f64() / 60.0,
            None => 0.0,
        };

        let typed_len = self.typed.len();
        let gross = stats::gross_wpm(typed_len, elapsed_minutes);

        Report {
            gross_wpm: if gross.is_finite() { gross } else { 0.0 },
            net_wpm: stats::net_wpm(typed_len, self.error_count, elapsed_minutes),
            accuracy: stats::accuracy(typed_len, self.error_count),
            total_chars: typed_len,
        }
    }

    /// The report to display: the frozen one once Finished, live otherwise.
    pub fn report(&self) -> Report {
        match self.final_report {
            Some(report) => report,
            None => self.report_at(Instant::now()),
        }
    }

    pub fn progress_percent(&self) -> f64 {
        stats::progress_percent(self.typed.len(), self.reference.len())
    }

    pub fn progress_label(&self) -> String {
        stats::progress_label(self.progress_percent())
    }

    pub fn status(&self) -> Status {
        self.status
    }

    pub fn reference_text(&self) -> &str {
        &self.text
    }

    pub fn reference_char(&self, idx: usize) -> Option<char> {
        self.reference.get(idx).copied()
    }

    pub fn typed_char(&self, idx: usize) -> Option<char> {
        self.typed.get(idx).copied()
    }

    pub fn typed_len(&self) -> usize {
        self.typed.len()
    }

    pub fn error_count(&self) -> usize {
        self.error_count
    }

    pub fn classes(&self) -> &[CharClass] {
        &self.classes
    }

    pub fn remaining_secs(&self) -> u64 {
        self.remaining_secs
    }

    pub fn duration_secs(&self) -> u64 {
        self.duration_secs
    }

    pub fn started_at(&self) -> Option<Instant> {
        self.started_at
    }
}
