//! Application state around the presenter: selector keys, section
//! navigation, toasts and the demo light.
//!
//! Nothing in here reads the clock. Callers pass `now` in, which keeps every
//! timer testable.

use std::time::{Duration, Instant};

use ratatui::crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

use crate::catalog::{self, ScenarioId};
use crate::presenter::{BarPalette, Presenter, RenderPlan};

pub const TOAST_TTL: Duration = Duration::from_secs(3);
pub const COUNTER_TTL: Duration = Duration::from_secs(3);
pub const DEMO_LIGHT_PERIOD: Duration = Duration::from_secs(3);

pub const WELCOME: &str = "Selamat datang di platform IoT Lampu Lalu Lintas!";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Section {
    pub id: &'static str,
    pub name: &'static str,
}

pub const SECTIONS: [Section; 10] = [
    Section { id: "hero", name: "Hero" },
    Section { id: "overview", name: "Ringkasan" },
    Section { id: "iot-fundamentals", name: "Dasar IoT" },
    Section { id: "microcontroller", name: "Mikrokontroler" },
    Section { id: "project-details", name: "Proyek" },
    Section { id: "technical", name: "Teknis" },
    Section { id: "wokwi-simulations", name: "Simulasi" },
    Section { id: "practical-examples", name: "Contoh" },
    Section { id: "troubleshooting", name: "Pemecahan" },
    Section { id: "sources", name: "Sumber" },
];

const HERO: usize = 0;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToastKind {
    Success,
    Error,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Toast {
    pub kind: ToastKind,
    pub message: String,
    shown_at: Instant,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DemoPhase {
    Red,
    Yellow,
    Green,
}

impl DemoPhase {
    fn next(self) -> Self {
        match self {
            DemoPhase::Red => DemoPhase::Yellow,
            DemoPhase::Yellow => DemoPhase::Green,
            DemoPhase::Green => DemoPhase::Red,
        }
    }
}

#[derive(Debug, Clone)]
struct DemoLight {
    phase: DemoPhase,
    last_switch: Instant,
}

impl DemoLight {
    fn new(now: Instant) -> Self {
        Self {
            phase: DemoPhase::Red,
            last_switch: now,
        }
    }

    /// Steps once per elapsed period. Late ticks catch up on the fixed grid.
    fn advance(&mut self, now: Instant) {
        while now.saturating_duration_since(self.last_switch) >= DEMO_LIGHT_PERIOD {
            self.phase = self.phase.next();
            self.last_switch += DEMO_LIGHT_PERIOD;
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    Continue,
    Quit,
}

#[derive(Debug, Clone)]
pub struct App {
    presenter: Presenter,
    section: usize,
    counter_shown_at: Option<Instant>,
    toast: Option<Toast>,
    demo: DemoLight,
}

impl App {
    pub fn new(initial: ScenarioId, palette: BarPalette, now: Instant) -> Self {
        let mut app = Self {
            presenter: Presenter::new(initial, palette),
            section: HERO,
            counter_shown_at: Some(now),
            toast: None,
            demo: DemoLight::new(now),
        };
        app.show_toast(ToastKind::Success, WELCOME, now);
        app
    }

    pub fn plan(&self) -> &RenderPlan {
        self.presenter.plan()
    }

    pub fn selected(&self) -> ScenarioId {
        self.presenter.selected()
    }

    pub fn section(&self) -> Section {
        SECTIONS[self.section]
    }

    pub fn section_index(&self) -> usize {
        self.section
    }

    /// Share of sections reached so far, in `(0, 1]`.
    pub fn progress(&self) -> f64 {
        (self.section + 1) as f64 / SECTIONS.len() as f64
    }

    pub fn counter_label(&self) -> Option<String> {
        self.counter_shown_at.map(|_| {
            format!(
                "{} · {}/{}",
                self.section().name,
                self.section + 1,
                SECTIONS.len()
            )
        })
    }

    pub fn toast(&self) -> Option<&Toast> {
        self.toast.as_ref()
    }

    pub fn demo_phase(&self) -> DemoPhase {
        self.demo.phase
    }

    pub fn show_toast(&mut self, kind: ToastKind, message: impl Into<String>, now: Instant) {
        self.toast = Some(Toast {
            kind,
            message: message.into(),
            shown_at: now,
        });
    }

    pub fn select(&mut self, id: ScenarioId, now: Instant) {
        self.presenter.render(id);
        let name = catalog::lookup(id).name;
        self.show_toast(ToastKind::Success, format!("{name} dipilih!"), now);
    }

    /// Maps a digit key to a selector button.
    pub fn select_key(&mut self, key: char, now: Instant) {
        let id = key
            .to_digit(10)
            .and_then(|d| (d as usize).checked_sub(1))
            .and_then(|i| ScenarioId::ALL.get(i).copied());
        match id {
            Some(id) => self.select(id, now),
            None => self.show_toast(
                ToastKind::Error,
                format!("Tidak ada skenario untuk tombol {key}"),
                now,
            ),
        }
    }

    /// Returns false when `index` is already the current section.
    pub fn navigate_to(&mut self, index: usize, now: Instant) -> bool {
        let index = index % SECTIONS.len();
        if index == self.section {
            return false;
        }
        self.show_section(index, now);
        true
    }

    /// Shows `index` unconditionally, re-showing the counter even when it is
    /// already current.
    pub fn show_section(&mut self, index: usize, now: Instant) {
        let index = index % SECTIONS.len();
        self.section = index;
        self.counter_shown_at = Some(now);
        tracing::debug!(section = SECTIONS[index].id, "section shown");
    }

    pub fn next_section(&mut self, now: Instant) -> bool {
        self.navigate_to(self.section + 1, now)
    }

    pub fn prev_section(&mut self, now: Instant) -> bool {
        self.navigate_to(self.section + SECTIONS.len() - 1, now)
    }

    pub fn tick(&mut self, now: Instant) {
        if self
            .toast
            .as_ref()
            .is_some_and(|t| now.saturating_duration_since(t.shown_at) >= TOAST_TTL)
        {
            self.toast = None;
        }
        if self
            .counter_shown_at
            .is_some_and(|at| now.saturating_duration_since(at) >= COUNTER_TTL)
        {
            self.counter_shown_at = None;
        }
        self.demo.advance(now);
    }

    pub fn handle_key(&mut self, key: KeyEvent, now: Instant) -> Action {
        if key.kind != KeyEventKind::Press {
            return Action::Continue;
        }
        match (key.code, key.modifiers) {
            (KeyCode::Char('c'), KeyModifiers::CONTROL) => return Action::Quit,
            (KeyCode::Char('q') | KeyCode::Char('Q'), _) => return Action::Quit,
            (KeyCode::Char(c), _) if c.is_ascii_digit() => self.select_key(c, now),
            (KeyCode::Tab | KeyCode::Right, _) => {
                self.next_section(now);
            }
            (KeyCode::BackTab | KeyCode::Left, _) => {
                self.prev_section(now);
            }
            (KeyCode::Esc, _) => self.show_section(HERO, now),
            _ => {}
        }
        Action::Continue
    }
}
