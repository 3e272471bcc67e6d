//! Static catalog of intersection scenarios.
//!
//! Every scenario is compiled in; nothing here is created or mutated at
//! runtime. Light values keep the Indonesian vocabulary of the timing sheets
//! they were transcribed from (Hijau / Kuning / Merah, `Kuning*` for blinking).

use std::fmt;
use std::str::FromStr;

use serde::Serialize;

use crate::error::{Error, Result};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum ScenarioId {
    TwoWay,
    YShape,
    TShape,
    FourWay,
}

impl ScenarioId {
    /// Button order.
    pub const ALL: [ScenarioId; 4] = [
        ScenarioId::TwoWay,
        ScenarioId::YShape,
        ScenarioId::TShape,
        ScenarioId::FourWay,
    ];

    pub fn key(self) -> &'static str {
        match self {
            ScenarioId::TwoWay => "twoWay",
            ScenarioId::YShape => "yShape",
            ScenarioId::TShape => "tShape",
            ScenarioId::FourWay => "fourWay",
        }
    }

    pub fn index(self) -> usize {
        match self {
            ScenarioId::TwoWay => 0,
            ScenarioId::YShape => 1,
            ScenarioId::TShape => 2,
            ScenarioId::FourWay => 3,
        }
    }
}

impl fmt::Display for ScenarioId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

impl FromStr for ScenarioId {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "twoway" | "two-way" | "2way" => Ok(ScenarioId::TwoWay),
            "yshape" | "y-shape" => Ok(ScenarioId::YShape),
            "tshape" | "t-shape" | "simpangtiga" => Ok(ScenarioId::TShape),
            "fourway" | "four-way" | "4way" | "simpangempat" => Ok(ScenarioId::FourWay),
            _ => Err(Error::UnknownScenario(s.to_string())),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Light {
    Green,
    Yellow,
    Red,
    BlinkingYellow,
}

impl Light {
    pub fn label(self) -> &'static str {
        match self {
            Light::Green => "Hijau",
            Light::Yellow => "Kuning",
            Light::Red => "Merah",
            Light::BlinkingYellow => "Kuning*",
        }
    }
}

impl fmt::Display for Light {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StateRow {
    pub number: u32,
    pub lights: &'static [Light],
    pub duration_secs: u32,
    pub note: &'static str,
}

impl StateRow {
    const fn new(
        number: u32,
        lights: &'static [Light],
        duration_secs: u32,
        note: &'static str,
    ) -> Self {
        Self {
            number,
            lights,
            duration_secs,
            note,
        }
    }
}

/// Display strings shown next to the chart, passed through as written.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Summary {
    pub total_cycle: &'static str,
    pub state_count: &'static str,
    pub max_green: &'static str,
    pub transition_time: &'static str,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Scenario {
    pub id: ScenarioId,
    pub name: &'static str,
    pub headers: &'static [&'static str],
    pub states: &'static [StateRow],
    pub summary: Summary,
}

/// Non-light columns: state number, duration, note.
pub const FIXED_COLUMNS: usize = 3;

impl Scenario {
    /// Headers of the per-direction light columns.
    pub fn light_columns(&self) -> &'static [&'static str] {
        let end = self.headers.len().saturating_sub(2);
        self.headers.get(1..end).unwrap_or(&[])
    }

    pub fn total_duration(&self) -> u32 {
        self.states.iter().map(|s| s.duration_secs).sum()
    }

    pub fn max_duration(&self) -> u32 {
        self.states
            .iter()
            .map(|s| s.duration_secs)
            .max()
            .unwrap_or(0)
    }
}

pub fn lookup(id: ScenarioId) -> &'static Scenario {
    match id {
        ScenarioId::TwoWay => &TWO_WAY,
        ScenarioId::YShape => &Y_SHAPE,
        ScenarioId::TShape => &T_SHAPE,
        ScenarioId::FourWay => &FOUR_WAY,
    }
}

pub fn all() -> impl Iterator<Item = &'static Scenario> {
    ScenarioId::ALL.into_iter().map(lookup)
}

/// Checks the structural invariants of every scenario.
pub fn validate() -> Result<()> {
    all().try_for_each(validate_scenario)
}

fn validate_scenario(scenario: &Scenario) -> Result<()> {
    let fail = |reason: String| Error::InvalidCatalog {
        scenario: scenario.id.key(),
        reason,
    };

    if scenario.states.is_empty() {
        return Err(fail("no states".to_string()));
    }
    if scenario.headers.len() <= FIXED_COLUMNS {
        return Err(fail(format!(
            "{} headers leave no light columns",
            scenario.headers.len()
        )));
    }

    let lights = scenario.headers.len() - FIXED_COLUMNS;
    for (i, state) in scenario.states.iter().enumerate() {
        let expected = i as u32 + 1;
        if state.number != expected {
            return Err(fail(format!(
                "state {} found where {expected} was expected",
                state.number
            )));
        }
        if state.lights.len() != lights {
            return Err(fail(format!(
                "state {} has {} lights, headers name {lights}",
                state.number,
                state.lights.len()
            )));
        }
        if state.duration_secs == 0 {
            return Err(fail(format!("state {} has zero duration", state.number)));
        }
    }
    tracing::debug!(
        scenario = %scenario.id,
        states = scenario.states.len(),
        cycle_secs = scenario.total_duration(),
        "scenario checked"
    );
    Ok(())
}

const G: Light = Light::Green;
const Y: Light = Light::Yellow;
const R: Light = Light::Red;
const B: Light = Light::BlinkingYellow;

static TWO_WAY: Scenario = Scenario {
    id: ScenarioId::TwoWay,
    name: "Jalan Lurus 2 Arah",
    headers: &["State", "Arah 1", "Arah 2", "Durasi (detik)", "Keterangan"],
    states: &[
        StateRow::new(1, &[G, R], 20, "Arah 1 Hijau, Arah 2 Merah"),
        StateRow::new(2, &[Y, R], 3, "Arah 1 Kuning, Arah 2 Merah"),
        StateRow::new(3, &[R, R], 2, "Kedua Arah Merah (Transisi)"),
        StateRow::new(4, &[R, G], 20, "Arah 1 Merah, Arah 2 Hijau"),
        StateRow::new(5, &[R, Y], 3, "Arah 1 Merah, Arah 2 Kuning"),
        StateRow::new(6, &[R, R], 2, "Kedua Arah Merah (Transisi)"),
    ],
    summary: Summary {
        total_cycle: "~50 detik",
        state_count: "6 states",
        max_green: "20 detik",
        transition_time: "2 detik",
    },
};

static Y_SHAPE: Scenario = Scenario {
    id: ScenarioId::YShape,
    name: "Pertigaan Y-Shape",
    headers: &[
        "State",
        "Jalur Utama",
        "Cabang 1",
        "Cabang 2",
        "Durasi (detik)",
        "Keterangan",
    ],
    states: &[
        StateRow::new(1, &[G, R, R], 30, "Jalur Utama Hijau, Cabang 1 & 2 Merah"),
        StateRow::new(2, &[Y, R, R], 4, "Jalur Utama Kuning, Cabang 1 & 2 Merah"),
        StateRow::new(3, &[R, R, R], 2, "Semua Merah (Transisi)"),
        StateRow::new(4, &[R, G, R], 25, "Cabang 1 Hijau, Jalur Utama & Cabang 2 Merah"),
        StateRow::new(5, &[R, Y, R], 4, "Cabang 1 Kuning, Jalur Utama & Cabang 2 Merah"),
        StateRow::new(6, &[R, R, R], 2, "Semua Merah (Transisi)"),
        StateRow::new(7, &[R, R, G], 25, "Cabang 2 Hijau, Jalur Utama & Cabang 1 Merah"),
        StateRow::new(8, &[R, R, Y], 4, "Cabang 2 Kuning, Jalur Utama & Cabang 1 Merah"),
        StateRow::new(9, &[R, R, R], 2, "Semua Merah (Transisi)"),
    ],
    summary: Summary {
        total_cycle: "~120 detik",
        state_count: "9 states",
        max_green: "30 detik",
        transition_time: "2 detik",
    },
};

static T_SHAPE: Scenario = Scenario {
    id: ScenarioId::TShape,
    name: "Pertigaan T-Shape",
    headers: &[
        "State",
        "Main Road",
        "Side Road",
        "Left Turn",
        "Durasi (detik)",
        "Keterangan",
    ],
    states: &[
        StateRow::new(1, &[G, R, R], 35, "Main Road Hijau, Side Road & Left Turn Merah"),
        StateRow::new(2, &[Y, R, R], 4, "Main Road Kuning, Side Road & Left Turn Merah"),
        StateRow::new(3, &[R, R, R], 2, "Semua Merah (Transisi)"),
        StateRow::new(4, &[R, G, R], 20, "Side Road Hijau, Main Road & Left Turn Merah"),
        StateRow::new(5, &[R, Y, R], 4, "Side Road Kuning, Main Road & Left Turn Merah"),
        StateRow::new(6, &[R, R, R], 2, "Semua Merah (Transisi)"),
        StateRow::new(7, &[R, R, G], 15, "Left Turn Hijau, Main Road & Side Road Merah"),
        StateRow::new(8, &[R, R, Y], 4, "Left Turn Kuning, Main Road & Side Road Merah"),
        StateRow::new(9, &[R, R, R], 2, "Semua Merah (Transisi)"),
    ],
    summary: Summary {
        total_cycle: "~100 detik",
        state_count: "9 states",
        max_green: "35 detik",
        transition_time: "2 detik",
    },
};

static FOUR_WAY: Scenario = Scenario {
    id: ScenarioId::FourWay,
    name: "Perempatan Lengkap",
    headers: &[
        "State",
        "Utara",
        "Selatan",
        "Timur",
        "Barat",
        "Durasi (detik)",
        "Keterangan",
    ],
    states: &[
        StateRow::new(1, &[G, G, R, R], 30, "Utara & Selatan Hijau, Timur & Barat Merah"),
        StateRow::new(2, &[Y, Y, R, R], 4, "Utara & Selatan Kuning, Timur & Barat Merah"),
        StateRow::new(3, &[R, R, R, R], 2, "Semua Merah (Transisi)"),
        StateRow::new(4, &[R, R, G, G], 25, "Timur & Barat Hijau, Utara & Selatan Merah"),
        StateRow::new(5, &[R, R, Y, Y], 4, "Timur & Barat Kuning, Utara & Selatan Merah"),
        StateRow::new(6, &[R, R, R, R], 2, "Semua Merah (Transisi)"),
        StateRow::new(7, &[G, R, R, R], 10, "Individual: Utara Hijau (Belok Kanan)"),
        StateRow::new(8, &[R, R, G, R], 10, "Individual: Timur Hijau (Belok Kanan)"),
        StateRow::new(9, &[R, G, R, R], 10, "Individual: Selatan Hijau (Belok Kanan)"),
        StateRow::new(10, &[R, R, R, G], 10, "Individual: Barat Hijau (Belok Kanan)"),
        StateRow::new(11, &[B, B, B, B], 5, "Emergency Mode: Blinking Yellow"),
        StateRow::new(12, &[R, R, R, R], 15, "Pedestrian Mode: Semua Merah"),
    ],
    summary: Summary {
        total_cycle: "~180 detik",
        state_count: "12 states",
        max_green: "30 detik",
        transition_time: "2 detik",
    },
};
