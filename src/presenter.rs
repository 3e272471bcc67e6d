//! Projection of a catalog scenario into something a surface can draw.
//!
//! [`project`] is pure. [`Presenter`] only remembers which scenario is
//! selected and the plan built for it; every `render` replaces both.

use serde::Serialize;

use crate::catalog::{self, Light, ScenarioId};

pub const DARK_GREEN: Rgb = Rgb(0x16, 0x65, 0x34);
pub const AMBER: Rgb = Rgb(0xca, 0x8a, 0x04);
pub const RED: Rgb = Rgb(0xdc, 0x26, 0x26);

pub const LONG_STATE_SECS: u32 = 20;
pub const MEDIUM_STATE_SECS: u32 = 10;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rgb(pub u8, pub u8, pub u8);

impl Rgb {
    pub fn hex(self) -> String {
        format!("#{:02x}{:02x}{:02x}", self.0, self.1, self.2)
    }
}

impl Serialize for Rgb {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.hex())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum BarPalette {
    /// Color by duration bucket.
    #[default]
    Bucketed,
    Uniform,
}

impl BarPalette {
    pub fn color_for(self, duration_secs: u32) -> Rgb {
        match self {
            BarPalette::Uniform => DARK_GREEN,
            BarPalette::Bucketed if duration_secs >= LONG_STATE_SECS => DARK_GREEN,
            BarPalette::Bucketed if duration_secs >= MEDIUM_STATE_SECS => AMBER,
            BarPalette::Bucketed => RED,
        }
    }
}

/// Styling tag for a light cell. Cosmetic only.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum StatusClass {
    Active,
    Masked,
    Inactive,
}

impl StatusClass {
    pub fn for_light(light: Light) -> Option<StatusClass> {
        match light {
            Light::Green => Some(StatusClass::Active),
            Light::Yellow => Some(StatusClass::Masked),
            Light::Red => Some(StatusClass::Inactive),
            Light::BlinkingYellow => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CellView {
    pub text: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<StatusClass>,
}

impl CellView {
    fn plain(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            status: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RowView {
    pub cells: Vec<CellView>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BarView {
    pub label: String,
    pub value: u32,
    pub color: Rgb,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SummaryView {
    pub total_cycle: String,
    pub state_count: String,
    pub max_green: String,
    pub transition_time: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RenderPlan {
    pub scenario: ScenarioId,
    pub title: String,
    pub headers: Vec<String>,
    pub rows: Vec<RowView>,
    pub chart_title: String,
    pub bars: Vec<BarView>,
    pub summary: SummaryView,
}

impl RenderPlan {
    pub fn max_bar(&self) -> u32 {
        self.bars.iter().map(|b| b.value).max().unwrap_or(0)
    }
}

pub fn project(id: ScenarioId, palette: BarPalette) -> RenderPlan {
    let scenario = catalog::lookup(id);

    let rows = scenario
        .states
        .iter()
        .map(|state| {
            let mut cells = Vec::with_capacity(state.lights.len() + 3);
            cells.push(CellView::plain(state.number.to_string()));
            cells.extend(state.lights.iter().map(|&light| CellView {
                text: light.label().to_string(),
                status: StatusClass::for_light(light),
            }));
            cells.push(CellView::plain(state.duration_secs.to_string()));
            cells.push(CellView::plain(state.note));
            RowView { cells }
        })
        .collect();

    let bars = scenario
        .states
        .iter()
        .map(|state| BarView {
            label: format!("State {}", state.number),
            value: state.duration_secs,
            color: palette.color_for(state.duration_secs),
        })
        .collect();

    RenderPlan {
        scenario: id,
        title: scenario.name.to_string(),
        headers: scenario.headers.iter().map(|h| h.to_string()).collect(),
        rows,
        chart_title: "Durasi State (detik)".to_string(),
        bars,
        summary: SummaryView {
            total_cycle: scenario.summary.total_cycle.to_string(),
            state_count: scenario.summary.state_count.to_string(),
            max_green: scenario.summary.max_green.to_string(),
            transition_time: scenario.summary.transition_time.to_string(),
        },
    }
}

/// Holds the currently displayed scenario.
#[derive(Debug, Clone)]
pub struct Presenter {
    palette: BarPalette,
    plan: RenderPlan,
}

impl Presenter {
    pub fn new(initial: ScenarioId, palette: BarPalette) -> Self {
        Self {
            palette,
            plan: project(initial, palette),
        }
    }

    /// Replaces the current plan with the projection of `id`.
    pub fn render(&mut self, id: ScenarioId) -> &RenderPlan {
        if self.plan.scenario != id {
            self.plan = project(id, self.palette);
            tracing::info!(
                scenario = %id,
                states = self.plan.rows.len(),
                "scenario selected"
            );
        }
        &self.plan
    }

    pub fn selected(&self) -> ScenarioId {
        self.plan.scenario
    }

    pub fn plan(&self) -> &RenderPlan {
        &self.plan
    }

    pub fn palette(&self) -> BarPalette {
        self.palette
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn two_way_projection() {
        let plan = project(ScenarioId::TwoWay, BarPalette::Bucketed);
        assert_eq!(plan.title, "Jalan Lurus 2 Arah");
        assert_eq!(plan.rows.len(), 6);
        assert_eq!(plan.bars.len(), 6);
        assert_eq!(plan.max_bar(), 20);
        assert_eq!(plan.summary.total_cycle, "~50 detik");
        assert_eq!(plan.bars[5].label, "State 6");
    }

    #[test]
    fn rows_have_one_cell_per_header() {
        for id in ScenarioId::ALL {
            let plan = project(id, BarPalette::Bucketed);
            for row in &plan.rows {
                assert_eq!(row.cells.len(), plan.headers.len());
            }
        }
    }

    #[test]
    fn light_cells_carry_status_classes() {
        let plan = project(ScenarioId::TwoWay, BarPalette::Bucketed);
        let first = &plan.rows[0].cells;
        assert_eq!(first[0].status, None);
        assert_eq!(first[1].text, "Hijau");
        assert_eq!(first[1].status, Some(StatusClass::Active));
        assert_eq!(first[2].status, Some(StatusClass::Inactive));
        assert_eq!(plan.rows[1].cells[1].status, Some(StatusClass::Masked));
        assert_eq!(first[3].text, "20");
        assert_eq!(first[4].status, None);
    }

    #[test]
    fn blinking_yellow_has_no_status_class() {
        let plan = project(ScenarioId::FourWay, BarPalette::Bucketed);
        let emergency = &plan.rows[10].cells;
        assert_eq!(emergency[1].text, "Kuning*");
        assert_eq!(emergency[1].status, None);
    }

    #[test]
    fn bucketed_palette_thresholds() {
        let p = BarPalette::Bucketed;
        assert_eq!(p.color_for(35), DARK_GREEN);
        assert_eq!(p.color_for(20), DARK_GREEN);
        assert_eq!(p.color_for(19), AMBER);
        assert_eq!(p.color_for(10), AMBER);
        assert_eq!(p.color_for(9), RED);
        assert_eq!(p.color_for(2), RED);
    }

    #[test]
    fn uniform_palette_ignores_duration() {
        let plan = project(ScenarioId::FourWay, BarPalette::Uniform);
        assert!(plan.bars.iter().all(|b| b.color == DARK_GREEN));
    }

    #[test]
    fn rgb_hex() {
        assert_eq!(DARK_GREEN.hex(), "#166534");
        assert_eq!(AMBER.hex(), "#ca8a04");
        assert_eq!(RED.hex(), "#dc2626");
    }

    #[test]
    fn render_is_idempotent() {
        let mut presenter = Presenter::new(ScenarioId::TwoWay, BarPalette::Bucketed);
        let first = presenter.render(ScenarioId::YShape).clone();
        let second = presenter.render(ScenarioId::YShape).clone();
        assert_eq!(first, second);
    }

    #[test]
    fn switching_replaces_rows() {
        let mut presenter = Presenter::new(ScenarioId::FourWay, BarPalette::Bucketed);
        assert_eq!(presenter.plan().rows.len(), 12);
        presenter.render(ScenarioId::TwoWay);
        assert_eq!(presenter.plan().rows.len(), 6);
        assert_eq!(presenter.plan().bars.len(), 6);
        assert_eq!(presenter.selected(), ScenarioId::TwoWay);
    }

    fn any_id() -> impl Strategy<Value = ScenarioId> {
        prop::sample::select(ScenarioId::ALL.to_vec())
    }

    proptest! {
        #[test]
        fn plan_depends_only_on_last_selection(ids in prop::collection::vec(any_id(), 1..16)) {
            let mut presenter = Presenter::new(ScenarioId::TwoWay, BarPalette::Bucketed);
            for id in &ids {
                presenter.render(*id);
            }
            let last = *ids.last().unwrap();
            prop_assert_eq!(presenter.plan(), &project(last, BarPalette::Bucketed));
        }
    }
}
